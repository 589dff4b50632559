use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::models::lesson::Lesson as DomainLesson;
use shared::Lesson as SharedLesson;

pub struct LessonMapper;

impl LessonMapper {
    pub fn to_dto(domain: DomainLesson) -> SharedLesson {
        SharedLesson {
            id: domain.id,
            date: domain.date.to_string(),
            lesson_type: domain.lesson_type,
            time_slot: domain.time_slot,
            income: domain.income,
            created_at: Self::timestamp(domain.created_at),
        }
    }

    /// RFC 3339 with millisecond precision, as every DTO carries it
    pub fn timestamp(value: DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
