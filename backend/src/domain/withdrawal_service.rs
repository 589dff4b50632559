//! Withdrawal submission.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    calendar,
    caller::Caller,
    commands::withdrawals::SubmitWithdrawalCommand,
    error::{LedgerError, LedgerResult},
    events::{EventBus, WITHDRAWAL_ADDED},
    models::{withdrawal::Withdrawal, MAX_AMOUNT},
};
use crate::storage::{Connection, WithdrawalStorage};

#[derive(Clone)]
pub struct WithdrawalService<C: Connection> {
    withdrawal_repository: C::WithdrawalRepository,
    events: EventBus,
}

impl<C: Connection> WithdrawalService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            withdrawal_repository: connection.create_withdrawal_repository(),
            events,
        }
    }

    /// Record money taken out of the caller's balance.
    ///
    /// Any number of withdrawals may share a date. The balance is allowed to
    /// go negative.
    pub async fn submit_withdrawal(
        &self,
        caller: &Caller,
        command: SubmitWithdrawalCommand,
    ) -> LedgerResult<Withdrawal> {
        let owner = caller.require()?;
        let date = calendar::parse_date(&command.date)?;

        if command.amount < 0 {
            return Err(LedgerError::validation("withdrawal amount cannot be negative"));
        }
        if command.amount > MAX_AMOUNT {
            return Err(LedgerError::validation(format!("withdrawal amount cannot exceed {}", MAX_AMOUNT)));
        }

        let memo = command
            .memo
            .as_deref()
            .map(str::trim)
            .filter(|memo| !memo.is_empty())
            .map(str::to_string);

        let withdrawal = Withdrawal {
            id: Withdrawal::generate_id(),
            user_id: owner.to_string(),
            date,
            amount: command.amount,
            memo,
            created_at: Utc::now(),
        };

        self.withdrawal_repository.store_withdrawal(&withdrawal).await?;

        info!("Recorded withdrawal {} of {} for {} on {}", withdrawal.id, withdrawal.amount, owner, date);
        self.events.publish(owner, WITHDRAWAL_ADDED);
        Ok(withdrawal)
    }
}
