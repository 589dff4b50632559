//! Raw row shapes as SQLite returns them, and the single decoding step that
//! turns them into domain models.
//!
//! Nullable money columns become `0` here and nowhere else.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use shared::{LessonType, TimeSlot};
use sqlx::FromRow;

use crate::domain::models::{
    account::Account,
    lesson::{Lesson, LessonOwner},
    profile::Profile,
    withdrawal::Withdrawal,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored form of a calendar date
pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Stored form of a creation timestamp; fixed-width so it sorts as text
pub fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn decode_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).with_context(|| format!("invalid stored date '{}'", value))
}

fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .with_context(|| format!("invalid stored timestamp '{}'", value))
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub rate_ski: Option<i64>,
    pub rate_board: Option<i64>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            team_name: Profile::normalize_team_name(row.team_name.as_deref()),
            username: row.username.unwrap_or_default(),
            rate_ski: row.rate_ski.unwrap_or(0),
            rate_board: row.rate_board.unwrap_or(0),
            id: row.id,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct AccountRow {
    pub id: String,
    pub login_id: String,
    pub password_hash: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            login_id: row.login_id,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct LessonRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    #[sqlx(rename = "type")]
    pub lesson_type: String,
    pub time_slot: String,
    pub income: Option<i64>,
    pub created_at: String,
}

impl TryFrom<LessonRow> for Lesson {
    type Error = anyhow::Error;

    fn try_from(row: LessonRow) -> Result<Self> {
        Ok(Lesson {
            date: decode_date(&row.date)?,
            lesson_type: row
                .lesson_type
                .parse::<LessonType>()
                .map_err(|e| anyhow!("lesson {}: {}", row.id, e))?,
            time_slot: row
                .time_slot
                .parse::<TimeSlot>()
                .map_err(|e| anyhow!("lesson {}: {}", row.id, e))?,
            income: row.income.unwrap_or(0),
            created_at: decode_timestamp(&row.created_at)?,
            id: row.id,
            user_id: row.user_id,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct LessonOwnerRow {
    pub user_id: String,
    pub username: Option<String>,
    pub team_name: Option<String>,
}

impl From<LessonOwnerRow> for LessonOwner {
    fn from(row: LessonOwnerRow) -> Self {
        LessonOwner {
            user_id: row.user_id,
            username: row.username,
            team_name: row.team_name,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct WithdrawalRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub amount: Option<i64>,
    pub memo: Option<String>,
    pub created_at: String,
}

impl TryFrom<WithdrawalRow> for Withdrawal {
    type Error = anyhow::Error;

    fn try_from(row: WithdrawalRow) -> Result<Self> {
        Ok(Withdrawal {
            date: decode_date(&row.date)?,
            amount: row.amount.unwrap_or(0),
            created_at: decode_timestamp(&row.created_at)?,
            id: row.id,
            user_id: row.user_id,
            memo: row.memo,
        })
    }
}

/// Decode a batch of rows, failing on the first malformed one
pub fn decode_all<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = anyhow::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}
