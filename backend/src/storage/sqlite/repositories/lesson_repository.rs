use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::TimeSlot;

use crate::domain::models::lesson::{Lesson, LessonInsert, LessonOwner};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::sqlite::rows::{decode_all, encode_date, encode_timestamp, LessonOwnerRow, LessonRow};
use crate::storage::traits::LessonStorage;

/// Repository for lesson operations
#[derive(Clone)]
pub struct LessonRepository {
    db: DbConnection,
}

impl LessonRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonStorage for LessonRepository {
    async fn find_lesson_in_slot(&self, user_id: &str, date: NaiveDate, time_slot: TimeSlot) -> Result<Option<String>> {
        let id: Option<String> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM lessons
            WHERE user_id = ? AND date = ? AND time_slot = ?
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(encode_date(date))
        .bind(time_slot.as_str())
        .fetch_optional(self.db.pool())
        .await?;
        Ok(id)
    }

    async fn store_lesson(&self, lesson: &Lesson) -> Result<LessonInsert> {
        let result = sqlx::query(
            r#"
            INSERT INTO lessons (id, user_id, date, type, time_slot, income, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lesson.id)
        .bind(&lesson.user_id)
        .bind(encode_date(lesson.date))
        .bind(lesson.lesson_type.as_str())
        .bind(lesson.time_slot.as_str())
        .bind(lesson.income)
        .bind(encode_timestamp(lesson.created_at))
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => Ok(LessonInsert::Stored),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(LessonInsert::SlotTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_lesson(&self, user_id: &str, lesson_id: &str) -> Result<Option<Lesson>> {
        let row: Option<LessonRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, type, time_slot, income, created_at
            FROM lessons
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(lesson_id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(Lesson::try_from).transpose()
    }

    async fn list_lessons(&self, user_id: &str) -> Result<Vec<Lesson>> {
        let rows: Vec<LessonRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, type, time_slot, income, created_at
            FROM lessons
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        decode_all(rows)
    }

    async fn list_recent_lessons(&self, user_id: &str, limit: u32) -> Result<Vec<Lesson>> {
        let rows: Vec<LessonRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, type, time_slot, income, created_at
            FROM lessons
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(self.db.pool())
        .await?;

        decode_all(rows)
    }

    async fn list_lesson_owners(&self, since: Option<NaiveDate>) -> Result<Vec<LessonOwner>> {
        let rows: Vec<LessonOwnerRow> = if let Some(since) = since {
            sqlx::query_as(
                r#"
                SELECT l.user_id AS user_id, p.username AS username, p.team_name AS team_name
                FROM lessons l
                LEFT JOIN profiles p ON p.id = l.user_id
                WHERE l.date >= ?
                "#,
            )
            .bind(encode_date(since))
            .fetch_all(self.db.pool())
            .await?
        } else {
            sqlx::query_as(
                r#"
                SELECT l.user_id AS user_id, p.username AS username, p.team_name AS team_name
                FROM lessons l
                LEFT JOIN profiles p ON p.id = l.user_id
                "#,
            )
            .fetch_all(self.db.pool())
            .await?
        };

        Ok(rows.into_iter().map(LessonOwner::from).collect())
    }

    async fn delete_lesson(&self, user_id: &str, lesson_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = ? AND user_id = ?")
            .bind(lesson_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use shared::LessonType;

    async fn setup_test() -> LessonRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        LessonRepository::new(db)
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn created(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0).unwrap()
    }

    fn lesson(id: &str, user_id: &str, day: &str, slot: TimeSlot, hour: u32) -> Lesson {
        Lesson {
            id: id.to_string(),
            user_id: user_id.to_string(),
            date: date(day),
            lesson_type: LessonType::Ski,
            time_slot: slot,
            income: 50000,
            created_at: created(hour),
        }
    }

    #[tokio::test]
    async fn test_store_and_read_back() {
        let repo = setup_test().await;
        let original = lesson("l1", "u1", "2024-01-10", TimeSlot::Am, 9);

        assert_eq!(repo.store_lesson(&original).await.unwrap(), LessonInsert::Stored);

        let stored = repo.get_lesson("u1", "l1").await.unwrap().unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_slot() {
        let repo = setup_test().await;
        repo.store_lesson(&lesson("l1", "u1", "2024-01-10", TimeSlot::Am, 9))
            .await
            .unwrap();

        let duplicate = repo
            .store_lesson(&lesson("l2", "u1", "2024-01-10", TimeSlot::Am, 10))
            .await
            .unwrap();
        assert_eq!(duplicate, LessonInsert::SlotTaken);

        let other_slot = repo
            .store_lesson(&lesson("l3", "u1", "2024-01-10", TimeSlot::Pm, 10))
            .await
            .unwrap();
        assert_eq!(other_slot, LessonInsert::Stored);

        let other_owner = repo
            .store_lesson(&lesson("l4", "u2", "2024-01-10", TimeSlot::Am, 10))
            .await
            .unwrap();
        assert_eq!(other_owner, LessonInsert::Stored);
    }

    #[tokio::test]
    async fn test_find_lesson_in_slot() {
        let repo = setup_test().await;
        repo.store_lesson(&lesson("l1", "u1", "2024-01-10", TimeSlot::Night, 9))
            .await
            .unwrap();

        let found = repo
            .find_lesson_in_slot("u1", date("2024-01-10"), TimeSlot::Night)
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("l1"));

        let other_owner = repo
            .find_lesson_in_slot("u2", date("2024-01-10"), TimeSlot::Night)
            .await
            .unwrap();
        assert!(other_owner.is_none());
    }

    #[tokio::test]
    async fn test_list_lessons_owner_and_order() {
        let repo = setup_test().await;
        for l in [
            lesson("jan31", "u1", "2024-01-31", TimeSlot::Am, 9),
            lesson("feb01-am", "u1", "2024-02-01", TimeSlot::Am, 9),
            lesson("feb01-pm", "u1", "2024-02-01", TimeSlot::Pm, 14),
            lesson("mar01", "u1", "2024-03-01", TimeSlot::Am, 9),
            lesson("other", "u2", "2024-02-10", TimeSlot::Am, 9),
        ] {
            repo.store_lesson(&l).await.unwrap();
        }

        let all: Vec<String> = repo
            .list_lessons("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(all, vec!["mar01", "feb01-pm", "feb01-am", "jan31"]);

        let recent = repo.list_recent_lessons("u1", 2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].id, "feb01-pm");
    }

    #[tokio::test]
    async fn test_lesson_owners_left_join_profiles() {
        let repo = setup_test().await;
        sqlx::query("INSERT INTO profiles (id, username, team_name) VALUES ('u1', 'Mina', 'Blue')")
            .execute(repo.db.pool())
            .await
            .unwrap();
        repo.store_lesson(&lesson("l1", "u1", "2024-01-08", TimeSlot::Am, 9))
            .await
            .unwrap();
        repo.store_lesson(&lesson("l2", "orphan", "2024-01-01", TimeSlot::Am, 9))
            .await
            .unwrap();

        let all = repo.list_lesson_owners(None).await.unwrap();
        assert_eq!(all.len(), 2);
        let orphan = all.iter().find(|o| o.user_id == "orphan").unwrap();
        assert!(orphan.username.is_none());

        let since = repo.list_lesson_owners(Some(date("2024-01-08"))).await.unwrap();
        assert_eq!(since.len(), 1);
        assert_eq!(since[0].username.as_deref(), Some("Mina"));
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_owner() {
        let repo = setup_test().await;
        repo.store_lesson(&lesson("l1", "u1", "2024-01-10", TimeSlot::Am, 9))
            .await
            .unwrap();

        assert_eq!(repo.delete_lesson("u2", "l1").await.unwrap(), 0);
        assert!(repo.get_lesson("u1", "l1").await.unwrap().is_some());

        assert_eq!(repo.delete_lesson("u1", "l1").await.unwrap(), 1);
        assert_eq!(repo.delete_lesson("u1", "l1").await.unwrap(), 0);
    }
}
