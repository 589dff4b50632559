//! Domain model for a cash withdrawal (wage payout or advance).
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Withdrawal {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
