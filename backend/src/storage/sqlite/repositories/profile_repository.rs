use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::profile::Profile;
use crate::storage::sqlite::{connection::DbConnection, rows::ProfileRow};
use crate::storage::traits::ProfileStorage;

/// Repository for profile operations
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, username, team_name, rate_ski, rate_board
            FROM profiles
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, team_name, rate_ski, rate_board)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                team_name = excluded.team_name,
                rate_ski = excluded.rate_ski,
                rate_board = excluded.rate_board,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.username)
        .bind(&profile.team_name)
        .bind(profile.rate_ski)
        .bind(profile.rate_board)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
