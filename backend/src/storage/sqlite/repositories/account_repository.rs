use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{
    account::{Account, AccountInsert},
    profile::Profile,
};
use crate::storage::sqlite::{connection::DbConnection, rows::AccountRow};
use crate::storage::traits::AccountStorage;

/// Repository for login accounts
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn create_account(&self, account: &Account, profile: &Profile) -> Result<AccountInsert> {
        let mut tx = self.db.pool().begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO accounts (id, login_id, password_hash)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.login_id)
        .bind(&account.password_hash)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tx.rollback().await?;
                return Ok(AccountInsert::LoginTaken);
            }
            Err(e) => return Err(e.into()),
        }

        sqlx::query(
            r#"
            INSERT INTO profiles (id, username, team_name, rate_ski, rate_board)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.username)
        .bind(&profile.team_name)
        .bind(profile.rate_ski)
        .bind(profile.rate_board)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AccountInsert::Created)
    }

    async fn find_account_by_login(&self, login_id: &str) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, login_id, password_hash
            FROM accounts
            WHERE login_id = ?
            "#,
        )
        .bind(login_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Account::from))
    }
}
