//! Leaderboard over every instructor's lessons.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::RankingMode;
use tracing::debug;

use crate::domain::{
    calendar,
    caller::Caller,
    error::LedgerResult,
    leaderboard::{self, RankingEntry},
};
use crate::storage::{Connection, LessonStorage};

#[derive(Clone)]
pub struct RankingService<C: Connection> {
    lesson_repository: C::LessonRepository,
}

impl<C: Connection> RankingService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            lesson_repository: connection.create_lesson_repository(),
        }
    }

    /// Ranked lesson counts per instructor for the current local week or all time
    pub async fn ranking(&self, caller: &Caller, mode: RankingMode) -> LedgerResult<Vec<RankingEntry>> {
        self.ranking_as_of(caller, mode, calendar::local_today()).await
    }

    /// Same as [`ranking`](Self::ranking) with an explicit "today".
    ///
    /// The weekly window starts at Monday of `today`'s week and has no upper
    /// bound, so lessons dated later in the week already count.
    pub async fn ranking_as_of(
        &self,
        caller: &Caller,
        mode: RankingMode,
        today: NaiveDate,
    ) -> LedgerResult<Vec<RankingEntry>> {
        caller.require()?;
        let since = leaderboard::lower_bound(mode, today);

        let owners = self.lesson_repository.list_lesson_owners(since).await?;
        debug!("Ranking {} lessons in {} mode since {:?}", owners.len(), mode, since);

        Ok(leaderboard::rank_lessons(owners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::lessons::SubmitLessonCommand;
    use crate::domain::error::LedgerError;
    use crate::domain::events::EventBus;
    use crate::domain::leaderboard::UNKNOWN_INSTRUCTOR_NAME;
    use crate::domain::lesson_service::LessonService;
    use crate::domain::models::profile::Profile;
    use crate::storage::{DbConnection, ProfileStorage};
    use shared::{LessonType, TimeSlot};

    async fn setup_test() -> (RankingService<DbConnection>, LessonService<DbConnection>, Arc<DbConnection>) {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        (
            RankingService::new(db.clone()),
            LessonService::new(db.clone(), EventBus::new()),
            db,
        )
    }

    async fn profile(db: &DbConnection, user_id: &str, name: &str, team: &str) {
        let profile = Profile {
            username: name.to_string(),
            team_name: team.to_string(),
            ..Profile::empty(user_id)
        };
        db.create_profile_repository().upsert_profile(&profile).await.unwrap();
    }

    async fn lesson(lessons: &LessonService<DbConnection>, user_id: &str, date: &str, time_slot: TimeSlot) {
        lessons
            .submit_lesson(
                &Caller::authenticated(user_id),
                SubmitLessonCommand {
                    date: date.to_string(),
                    lesson_type: LessonType::Ski,
                    time_slot,
                },
            )
            .await
            .unwrap();
    }

    fn day(value: &str) -> NaiveDate {
        calendar::parse_date(value).unwrap()
    }

    #[tokio::test]
    async fn test_weekly_window_starts_on_monday() {
        let (ranking, lessons, db) = setup_test().await;
        profile(&db, "mina", "Mina", "Blue").await;

        // 2024-01-08 is a Monday, 2024-01-07 the Sunday before
        lesson(&lessons, "mina", "2024-01-07", TimeSlot::Am).await;
        lesson(&lessons, "mina", "2024-01-08", TimeSlot::Am).await;
        lesson(&lessons, "mina", "2024-01-10", TimeSlot::Am).await;

        let caller = Caller::authenticated("mina");
        let weekly = ranking
            .ranking_as_of(&caller, RankingMode::Weekly, day("2024-01-10"))
            .await
            .unwrap();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].count, 2);
        assert_eq!(weekly[0].name, "Mina");
        assert_eq!(weekly[0].team, "Blue");

        let all = ranking
            .ranking_as_of(&caller, RankingMode::All, day("2024-01-10"))
            .await
            .unwrap();
        assert_eq!(all[0].count, 3);
    }

    #[tokio::test]
    async fn test_order_by_count_then_identity() {
        let (ranking, lessons, db) = setup_test().await;
        profile(&db, "b-user", "Bo", "Red").await;
        profile(&db, "a-user", "Ari", "Red").await;

        lesson(&lessons, "top", "2024-01-08", TimeSlot::Am).await;
        lesson(&lessons, "top", "2024-01-08", TimeSlot::Pm).await;
        lesson(&lessons, "top", "2024-01-08", TimeSlot::Night).await;
        lesson(&lessons, "b-user", "2024-01-08", TimeSlot::Am).await;
        lesson(&lessons, "a-user", "2024-01-09", TimeSlot::Am).await;

        let entries = ranking
            .ranking_as_of(&Caller::authenticated("a-user"), RankingMode::All, day("2024-01-10"))
            .await
            .unwrap();

        let order: Vec<&str> = entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["top", "a-user", "b-user"]);

        // "top" never created a profile
        assert_eq!(entries[0].name, UNKNOWN_INSTRUCTOR_NAME);
        assert_eq!(entries[0].team, "unaffiliated");
    }

    #[tokio::test]
    async fn test_empty_window_is_empty_list() {
        let (ranking, _lessons, _db) = setup_test().await;

        let entries = ranking
            .ranking_as_of(&Caller::authenticated("u1"), RankingMode::Weekly, day("2024-01-10"))
            .await
            .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_rejected() {
        let (ranking, _lessons, _db) = setup_test().await;

        let result = ranking.ranking(&Caller::anonymous(), RankingMode::All).await;

        assert!(matches!(result, Err(LedgerError::Authentication)));
    }
}
