//! Domain model for a recorded lesson.
use chrono::{DateTime, NaiveDate, Utc};
use shared::{LessonType, TimeSlot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub lesson_type: LessonType,
    pub time_slot: TimeSlot,
    /// Income snapshotted from the owner's rate when the lesson was recorded
    pub income: i64,
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Outcome of inserting a lesson into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonInsert {
    Stored,
    /// The unique `(owner, date, time_slot)` index rejected the row
    SlotTaken,
}

/// A lesson joined with its owner's public profile fields.
///
/// Name and team are `None` when the owning profile row is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOwner {
    pub user_id: String,
    pub username: Option<String>,
    pub team_name: Option<String>,
}
