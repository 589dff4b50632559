//! Owner-scoped ledger reads and item deletion.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::ItemKind;
use tracing::{debug, info};

use crate::domain::{
    calendar::{self, MonthWindow},
    caller::Caller,
    commands::ledger::DeleteItemCommand,
    error::LedgerResult,
    events::{EventBus, ITEM_DELETED},
    ledger::{self, LedgerSummary},
};
use crate::storage::{Connection, LessonStorage, WithdrawalStorage};

#[derive(Clone)]
pub struct LedgerService<C: Connection> {
    lesson_repository: C::LessonRepository,
    withdrawal_repository: C::WithdrawalRepository,
    events: EventBus,
}

impl<C: Connection> LedgerService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            lesson_repository: connection.create_lesson_repository(),
            withdrawal_repository: connection.create_withdrawal_repository(),
            events,
        }
    }

    /// Summary for `month` (`YYYY-MM`), defaulting to the current local month
    pub async fn ledger_summary(&self, caller: &Caller, month: Option<&str>) -> LedgerResult<LedgerSummary> {
        self.ledger_summary_as_of(caller, month, calendar::local_today()).await
    }

    /// Same as [`ledger_summary`](Self::ledger_summary) with an explicit "today"
    pub async fn ledger_summary_as_of(
        &self,
        caller: &Caller,
        month: Option<&str>,
        today: NaiveDate,
    ) -> LedgerResult<LedgerSummary> {
        let owner = caller.require()?;
        let month = MonthWindow::resolve(month, today)?;

        let lessons = self.lesson_repository.list_lessons(owner).await?;
        let withdrawals = self.withdrawal_repository.list_withdrawals(owner).await?;
        debug!(
            "Summarizing {} for {}: {} lessons, {} withdrawals",
            month.label(),
            owner,
            lessons.len(),
            withdrawals.len()
        );

        ledger::summarize(month, lessons, withdrawals)
    }

    /// Delete one of the caller's lessons or withdrawals.
    ///
    /// Deleting an id that does not exist or belongs to someone else succeeds
    /// without changing anything.
    pub async fn delete_item(&self, caller: &Caller, command: DeleteItemCommand) -> LedgerResult<()> {
        let owner = caller.require()?;

        let removed = match command.kind {
            ItemKind::Lesson => self.lesson_repository.delete_lesson(owner, &command.id).await?,
            ItemKind::Withdrawal => self.withdrawal_repository.delete_withdrawal(owner, &command.id).await?,
        };

        if removed > 0 {
            info!("Deleted {:?} {} for {}", command.kind, command.id, owner);
        } else {
            debug!("No {:?} {} owned by {}; nothing deleted", command.kind, command.id, owner);
        }

        self.events.publish(owner, ITEM_DELETED);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::lessons::SubmitLessonCommand;
    use crate::domain::commands::withdrawals::SubmitWithdrawalCommand;
    use crate::domain::error::LedgerError;
    use crate::domain::events::testing::recording_bus;
    use crate::domain::ledger::HistoryItem;
    use crate::domain::lesson_service::LessonService;
    use crate::domain::models::profile::Profile;
    use crate::domain::withdrawal_service::WithdrawalService;
    use crate::storage::{DbConnection, ProfileStorage};
    use shared::{HistoryCategory, LessonType, TimeSlot};

    struct Fixture {
        db: Arc<DbConnection>,
        lessons: LessonService<DbConnection>,
        withdrawals: WithdrawalService<DbConnection>,
        ledger: LedgerService<DbConnection>,
    }

    async fn setup_test() -> Fixture {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        let events = EventBus::new();
        Fixture {
            lessons: LessonService::new(db.clone(), events.clone()),
            withdrawals: WithdrawalService::new(db.clone(), events.clone()),
            ledger: LedgerService::new(db.clone(), events),
            db,
        }
    }

    fn day(value: &str) -> NaiveDate {
        calendar::parse_date(value).unwrap()
    }

    async fn set_rates(db: &DbConnection, user_id: &str, rate_ski: i64, rate_board: i64) {
        let profile = Profile {
            username: "Mina".to_string(),
            rate_ski,
            rate_board,
            ..Profile::empty(user_id)
        };
        db.create_profile_repository().upsert_profile(&profile).await.unwrap();
    }

    async fn lesson(f: &Fixture, caller: &Caller, date: &str, lesson_type: LessonType, time_slot: TimeSlot) -> String {
        f.lessons
            .submit_lesson(
                caller,
                SubmitLessonCommand {
                    date: date.to_string(),
                    lesson_type,
                    time_slot,
                },
            )
            .await
            .unwrap()
            .id
    }

    async fn withdrawal(f: &Fixture, caller: &Caller, date: &str, amount: i64) -> String {
        f.withdrawals
            .submit_withdrawal(
                caller,
                SubmitWithdrawalCommand {
                    date: date.to_string(),
                    amount,
                    memo: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_month_of_lessons_and_a_withdrawal() {
        let f = setup_test().await;
        let caller = Caller::authenticated("u1");
        set_rates(&f.db, "u1", 50000, 55000).await;

        lesson(&f, &caller, "2024-02-01", LessonType::Ski, TimeSlot::Am).await;
        lesson(&f, &caller, "2024-02-01", LessonType::Board, TimeSlot::Pm).await;
        withdrawal(&f, &caller, "2024-02-02", 30000).await;

        let summary = f
            .ledger
            .ledger_summary_as_of(&caller, Some("2024-02"), day("2024-02-20"))
            .await
            .unwrap();

        assert_eq!(summary.monthly_total, 105000);
        assert_eq!(summary.monthly_count, 2);
        assert_eq!(summary.accumulated_income, 105000);
        assert_eq!(summary.accumulated_withdrawal, 30000);
        assert_eq!(summary.net_balance, 75000);

        let categories: Vec<HistoryCategory> = summary.history.iter().map(HistoryItem::category).collect();
        assert_eq!(
            categories,
            vec![HistoryCategory::Withdrawal, HistoryCategory::Income, HistoryCategory::Income]
        );
    }

    #[tokio::test]
    async fn test_rate_lesson_withdrawal_scenario() {
        let f = setup_test().await;
        let caller = Caller::authenticated("u1");
        set_rates(&f.db, "u1", 50000, 0).await;

        lesson(&f, &caller, "2024-03-04", LessonType::Ski, TimeSlot::Am).await;
        withdrawal(&f, &caller, "2024-03-05", 20000).await;

        let summary = f
            .ledger
            .ledger_summary_as_of(&caller, None, day("2024-03-06"))
            .await
            .unwrap();

        assert_eq!(summary.accumulated_income, 50000);
        assert_eq!(summary.accumulated_withdrawal, 20000);
        assert_eq!(summary.net_balance, 30000);
    }

    #[tokio::test]
    async fn test_accumulated_figures_ignore_month() {
        let f = setup_test().await;
        let caller = Caller::authenticated("u1");
        set_rates(&f.db, "u1", 50000, 55000).await;

        lesson(&f, &caller, "2024-01-31", LessonType::Ski, TimeSlot::Am).await;
        lesson(&f, &caller, "2024-02-01", LessonType::Ski, TimeSlot::Am).await;

        let summary = f
            .ledger
            .ledger_summary_as_of(&caller, None, day("2024-02-15"))
            .await
            .unwrap();

        assert_eq!(summary.month.label(), "2024-02");
        assert_eq!(summary.monthly_count, 1);
        assert_eq!(summary.accumulated_income, 100000);
        assert_eq!(summary.history.len(), 2);
        assert_eq!(summary.net_balance, summary.accumulated_income - summary.accumulated_withdrawal);
    }

    #[tokio::test]
    async fn test_balance_can_go_negative() {
        let f = setup_test().await;
        let caller = Caller::authenticated("u1");

        withdrawal(&f, &caller, "2024-02-02", 20000).await;

        let summary = f
            .ledger
            .ledger_summary_as_of(&caller, Some("2024-02"), day("2024-02-20"))
            .await
            .unwrap();

        assert_eq!(summary.net_balance, -20000);
        assert_eq!(summary.monthly_total, 0);
    }

    #[tokio::test]
    async fn test_other_owners_rows_are_invisible() {
        let f = setup_test().await;
        let alice = Caller::authenticated("alice");
        let bob = Caller::authenticated("bob");
        set_rates(&f.db, "alice", 50000, 50000).await;

        lesson(&f, &alice, "2024-02-01", LessonType::Ski, TimeSlot::Am).await;
        withdrawal(&f, &alice, "2024-02-02", 1000).await;

        let summary = f
            .ledger
            .ledger_summary_as_of(&bob, Some("2024-02"), day("2024-02-20"))
            .await
            .unwrap();

        assert!(summary.history.is_empty());
        assert_eq!(summary.accumulated_income, 0);
    }

    #[tokio::test]
    async fn test_bad_month_label_is_a_validation_error() {
        let f = setup_test().await;

        let result = f
            .ledger
            .ledger_summary_as_of(&Caller::authenticated("u1"), Some("2024-13"), day("2024-02-20"))
            .await;

        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_is_scoped_and_idempotent() {
        let f = setup_test().await;
        let alice = Caller::authenticated("alice");
        let bob = Caller::authenticated("bob");
        let lesson_id = lesson(&f, &alice, "2024-02-01", LessonType::Ski, TimeSlot::Am).await;

        // Someone else's id: succeeds, removes nothing
        f.ledger
            .delete_item(&bob, DeleteItemCommand { id: lesson_id.clone(), kind: ItemKind::Lesson })
            .await
            .unwrap();
        let summary = f
            .ledger
            .ledger_summary_as_of(&alice, None, day("2024-02-20"))
            .await
            .unwrap();
        assert_eq!(summary.history.len(), 1);

        for _ in 0..2 {
            f.ledger
                .delete_item(&alice, DeleteItemCommand { id: lesson_id.clone(), kind: ItemKind::Lesson })
                .await
                .unwrap();
        }
        let summary = f
            .ledger
            .ledger_summary_as_of(&alice, None, day("2024-02-20"))
            .await
            .unwrap();
        assert!(summary.history.is_empty());
    }

    #[tokio::test]
    async fn test_kind_selects_the_table() {
        let f = setup_test().await;
        let caller = Caller::authenticated("u1");
        let withdrawal_id = withdrawal(&f, &caller, "2024-02-02", 1000).await;

        f.ledger
            .delete_item(&caller, DeleteItemCommand { id: withdrawal_id.clone(), kind: ItemKind::Lesson })
            .await
            .unwrap();
        let summary = f.ledger.ledger_summary_as_of(&caller, None, day("2024-02-20")).await.unwrap();
        assert_eq!(summary.accumulated_withdrawal, 1000);

        f.ledger
            .delete_item(&caller, DeleteItemCommand { id: withdrawal_id, kind: ItemKind::Withdrawal })
            .await
            .unwrap();
        let summary = f.ledger.ledger_summary_as_of(&caller, None, day("2024-02-20")).await.unwrap();
        assert_eq!(summary.accumulated_withdrawal, 0);
    }

    #[tokio::test]
    async fn test_anonymous_delete_is_rejected() {
        let f = setup_test().await;

        let result = f
            .ledger
            .delete_item(&Caller::anonymous(), DeleteItemCommand { id: "x".to_string(), kind: ItemKind::Lesson })
            .await;

        assert!(matches!(result, Err(LedgerError::Authentication)));
    }

    #[tokio::test]
    async fn test_delete_publishes_change() {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        let (bus, listener) = recording_bus();
        let ledger = LedgerService::new(db, bus);

        ledger
            .delete_item(&Caller::authenticated("u1"), DeleteItemCommand { id: "gone".to_string(), kind: ItemKind::Withdrawal })
            .await
            .unwrap();

        let events = listener.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].views, ITEM_DELETED);
    }
}
