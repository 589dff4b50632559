use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::withdrawal::Withdrawal;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::sqlite::rows::{decode_all, encode_date, encode_timestamp, WithdrawalRow};
use crate::storage::traits::WithdrawalStorage;

/// Repository for withdrawal operations
#[derive(Clone)]
pub struct WithdrawalRepository {
    db: DbConnection,
}

impl WithdrawalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WithdrawalStorage for WithdrawalRepository {
    async fn store_withdrawal(&self, withdrawal: &Withdrawal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO withdrawals (id, user_id, date, amount, memo, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&withdrawal.id)
        .bind(&withdrawal.user_id)
        .bind(encode_date(withdrawal.date))
        .bind(withdrawal.amount)
        .bind(&withdrawal.memo)
        .bind(encode_timestamp(withdrawal.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_withdrawals(&self, user_id: &str) -> Result<Vec<Withdrawal>> {
        let rows: Vec<WithdrawalRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, amount, memo, created_at
            FROM withdrawals
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        decode_all(rows)
    }

    async fn delete_withdrawal(&self, user_id: &str, withdrawal_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM withdrawals WHERE id = ? AND user_id = ?")
            .bind(withdrawal_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
