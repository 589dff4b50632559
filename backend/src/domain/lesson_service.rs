//! Lesson submission (duplicate guard + income snapshot) and recent activity.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    calendar,
    caller::Caller,
    commands::lessons::SubmitLessonCommand,
    error::{LedgerError, LedgerResult},
    events::{EventBus, LESSON_ADDED},
    models::lesson::{Lesson, LessonInsert},
};
use crate::storage::{Connection, LessonStorage, ProfileStorage};

/// Number of lessons returned by the recent activity feed by default
pub const DEFAULT_RECENT_LIMIT: u32 = 5;
const MAX_RECENT_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct LessonService<C: Connection> {
    lesson_repository: C::LessonRepository,
    profile_repository: C::ProfileRepository,
    events: EventBus,
}

impl<C: Connection> LessonService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            lesson_repository: connection.create_lesson_repository(),
            profile_repository: connection.create_profile_repository(),
            events,
        }
    }

    /// Record a lesson for the caller.
    ///
    /// Income is taken from the caller's current rate for the lesson type (0
    /// when unset) and stored on the lesson; later rate changes do not touch it.
    pub async fn submit_lesson(&self, caller: &Caller, command: SubmitLessonCommand) -> LedgerResult<Lesson> {
        let owner = caller.require()?;
        let date = calendar::parse_date(&command.date)?;

        info!(
            "Submitting {} lesson for {} on {} ({})",
            command.lesson_type.as_str(),
            owner,
            date,
            command.time_slot.as_str()
        );

        if let Some(existing) = self
            .lesson_repository
            .find_lesson_in_slot(owner, date, command.time_slot)
            .await?
        {
            warn!("Rejecting lesson for {}: slot {} {} already holds {}", owner, date, command.time_slot.as_str(), existing);
            return Err(LedgerError::duplicate_lesson_slot());
        }

        let income = self
            .profile_repository
            .get_profile(owner)
            .await?
            .map(|profile| profile.rate_for(command.lesson_type))
            .unwrap_or(0);

        let lesson = Lesson {
            id: Lesson::generate_id(),
            user_id: owner.to_string(),
            date,
            lesson_type: command.lesson_type,
            time_slot: command.time_slot,
            income,
            created_at: Utc::now(),
        };

        match self.lesson_repository.store_lesson(&lesson).await? {
            LessonInsert::Stored => {}
            LessonInsert::SlotTaken => {
                // Lost a race with a concurrent submission for the same slot
                warn!("Unique index rejected lesson for {} on {} {}", owner, date, command.time_slot.as_str());
                return Err(LedgerError::duplicate_lesson_slot());
            }
        }

        info!("Recorded lesson {} for {} with income {}", lesson.id, owner, lesson.income);
        self.events.publish(owner, LESSON_ADDED);
        Ok(lesson)
    }

    /// The caller's latest lessons, newest first
    pub async fn recent_lessons(&self, caller: &Caller, limit: Option<u32>) -> LedgerResult<Vec<Lesson>> {
        let owner = caller.require()?;
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);

        let lessons = self.lesson_repository.list_recent_lessons(owner, limit).await?;
        Ok(lessons)
    }

    /// One of the caller's lessons by id
    pub async fn get_lesson(&self, caller: &Caller, lesson_id: &str) -> LedgerResult<Option<Lesson>> {
        let owner = caller.require()?;
        Ok(self.lesson_repository.get_lesson(owner, lesson_id).await?)
    }
}
