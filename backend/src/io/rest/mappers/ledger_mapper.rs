use crate::domain::ledger::{HistoryItem, LedgerSummary as DomainLedgerSummary};
use crate::io::rest::mappers::lesson_mapper::LessonMapper;
use shared::{HistoryEntry, ItemKind, LedgerSummary as SharedLedgerSummary};

pub struct LedgerMapper;

impl LedgerMapper {
    pub fn to_dto(domain: DomainLedgerSummary) -> SharedLedgerSummary {
        SharedLedgerSummary {
            month: domain.month.label(),
            previous_month: domain.month.previous().label(),
            next_month: domain.month.next().label(),
            monthly_total: domain.monthly_total,
            monthly_count: domain.monthly_count,
            accumulated_income: domain.accumulated_income,
            accumulated_withdrawal: domain.accumulated_withdrawal,
            net_balance: domain.net_balance,
            history: domain.history.into_iter().map(Self::history_to_dto).collect(),
        }
    }

    fn history_to_dto(item: HistoryItem) -> HistoryEntry {
        let category = item.category();
        let amount = item.signed_amount();
        match item {
            HistoryItem::Lesson(lesson) => HistoryEntry {
                kind: ItemKind::Lesson,
                category,
                date: lesson.date.to_string(),
                created_at: LessonMapper::timestamp(lesson.created_at),
                amount,
                lesson_type: Some(lesson.lesson_type),
                time_slot: Some(lesson.time_slot),
                memo: None,
                id: lesson.id,
            },
            HistoryItem::Withdrawal(withdrawal) => HistoryEntry {
                kind: ItemKind::Withdrawal,
                category,
                date: withdrawal.date.to_string(),
                created_at: LessonMapper::timestamp(withdrawal.created_at),
                amount,
                lesson_type: None,
                time_slot: None,
                memo: withdrawal.memo,
                id: withdrawal.id,
            },
        }
    }
}
