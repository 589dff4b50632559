use crate::domain::models::withdrawal::Withdrawal as DomainWithdrawal;
use crate::io::rest::mappers::lesson_mapper::LessonMapper;
use shared::Withdrawal as SharedWithdrawal;

pub struct WithdrawalMapper;

impl WithdrawalMapper {
    pub fn to_dto(domain: DomainWithdrawal) -> SharedWithdrawal {
        SharedWithdrawal {
            id: domain.id,
            date: domain.date.to_string(),
            amount: domain.amount,
            memo: domain.memo,
            created_at: LessonMapper::timestamp(domain.created_at),
        }
    }
}
