//! Ledger aggregation: income and withdrawal totals, net balance and the
//! merged history feed for a single owner.
//!
//! These are pure functions over already-decoded rows. The store decides
//! which rows belong to the owner; this module only folds them.

use std::cmp::Ordering;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use shared::HistoryCategory;

use super::calendar::MonthWindow;
use super::error::{LedgerError, LedgerResult};
use super::models::{lesson::Lesson, withdrawal::Withdrawal};

/// A lesson or withdrawal placed in the unified history feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryItem {
    Lesson(Lesson),
    Withdrawal(Withdrawal),
}

impl HistoryItem {
    pub fn id(&self) -> &str {
        match self {
            HistoryItem::Lesson(lesson) => &lesson.id,
            HistoryItem::Withdrawal(withdrawal) => &withdrawal.id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            HistoryItem::Lesson(lesson) => lesson.date,
            HistoryItem::Withdrawal(withdrawal) => withdrawal.date,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            HistoryItem::Lesson(lesson) => lesson.created_at,
            HistoryItem::Withdrawal(withdrawal) => withdrawal.created_at,
        }
    }

    pub fn category(&self) -> HistoryCategory {
        match self {
            HistoryItem::Lesson(_) => HistoryCategory::Income,
            HistoryItem::Withdrawal(_) => HistoryCategory::Withdrawal,
        }
    }

    /// Income is positive, withdrawals negative
    pub fn signed_amount(&self) -> i64 {
        match self {
            HistoryItem::Lesson(lesson) => lesson.income,
            HistoryItem::Withdrawal(withdrawal) => -withdrawal.amount,
        }
    }

    /// Newest first: date desc, then creation time desc, then id desc
    fn newest_first(a: &HistoryItem, b: &HistoryItem) -> Ordering {
        b.date()
            .cmp(&a.date())
            .then_with(|| b.created_at().cmp(&a.created_at()))
            .then_with(|| b.id().cmp(a.id()))
    }
}

/// Everything the money and home views show for one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub month: MonthWindow,
    pub monthly_total: i64,
    pub monthly_count: u32,
    pub accumulated_income: i64,
    pub accumulated_withdrawal: i64,
    /// May be negative when advances exceed recorded income
    pub net_balance: i64,
    pub history: Vec<HistoryItem>,
}

/// Fold an owner's complete lesson and withdrawal sets into a summary.
///
/// `lessons` and `withdrawals` must be all of the owner's rows; the monthly
/// figures are filtered from them using the month's half-open window.
pub fn summarize(
    month: MonthWindow,
    lessons: Vec<Lesson>,
    withdrawals: Vec<Withdrawal>,
) -> LedgerResult<LedgerSummary> {
    let window = month.window()?;

    let monthly: Vec<i64> = lessons
        .iter()
        .filter(|lesson| window.contains(lesson.date))
        .map(|lesson| lesson.income)
        .collect();
    let monthly_count = u32::try_from(monthly.len()).map_err(|_| overflow())?;
    let monthly_total = checked_total(monthly)?;

    let accumulated_income = checked_total(lessons.iter().map(|lesson| lesson.income))?;
    let accumulated_withdrawal = checked_total(withdrawals.iter().map(|withdrawal| withdrawal.amount))?;
    let net_balance = accumulated_income
        .checked_sub(accumulated_withdrawal)
        .ok_or_else(overflow)?;

    Ok(LedgerSummary {
        month,
        monthly_total,
        monthly_count,
        accumulated_income,
        accumulated_withdrawal,
        net_balance,
        history: merge_history(lessons, withdrawals),
    })
}

fn checked_total(amounts: impl IntoIterator<Item = i64>) -> LedgerResult<i64> {
    amounts
        .into_iter()
        .try_fold(0i64, |total, amount| total.checked_add(amount))
        .ok_or_else(overflow)
}

fn overflow() -> LedgerError {
    LedgerError::Persistence(anyhow!("stored amounts overflow the ledger totals"))
}

/// Merge both tables into one reverse-chronological feed.
///
/// Same-day entries appear most-recently-created first regardless of which
/// table they came from.
pub fn merge_history(lessons: Vec<Lesson>, withdrawals: Vec<Withdrawal>) -> Vec<HistoryItem> {
    let mut history: Vec<HistoryItem> = lessons
        .into_iter()
        .map(HistoryItem::Lesson)
        .chain(withdrawals.into_iter().map(HistoryItem::Withdrawal))
        .collect();
    history.sort_by(HistoryItem::newest_first);
    history
}
