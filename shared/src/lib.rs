use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of lesson taught; selects which rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonType {
    Ski,
    Board,
}

/// Coarse subdivision of a lesson day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSlot {
    Am,
    Pm,
    Night,
}

/// Which table a history entry or deletion target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lesson,
    Withdrawal,
}

/// Direction of money for a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryCategory {
    Income,
    Withdrawal,
}

/// Time window used by the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// From Monday of the current week onwards
    #[default]
    Weekly,
    /// Every lesson ever recorded
    All,
}

/// Error returned when a stored or submitted enum label is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Ski => "SKI",
            LessonType::Board => "BOARD",
        }
    }
}

impl FromStr for LessonType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKI" => Ok(LessonType::Ski),
            "BOARD" => Ok(LessonType::Board),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Am => "AM",
            TimeSlot::Pm => "PM",
            TimeSlot::Night => "NIGHT",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(TimeSlot::Am),
            "PM" => Ok(TimeSlot::Pm),
            "NIGHT" => Ok(TimeSlot::Night),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for ItemKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lesson" => Ok(ItemKind::Lesson),
            "withdrawal" => Ok(ItemKind::Withdrawal),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for RankingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingMode::Weekly => write!(f, "weekly"),
            RankingMode::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub login_id: String,
    pub password: String,
    pub name: String,
    /// Blank or missing team falls back to "unaffiliated"
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// Issued bearer token for a signed-in instructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: String,
    pub token: String,
    /// Expiry as seconds since the Unix epoch
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub team_name: String,
    pub rate_ski: i64,
    pub rate_board: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub team_name: Option<String>,
    pub rate_ski: i64,
    pub rate_board: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    /// Calendar date in `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    pub time_slot: TimeSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    pub time_slot: TimeSlot,
    pub income: i64,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLessonsResponse {
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWithdrawalRequest {
    pub date: String,
    pub amount: i64,
    #[serde(default)]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: String,
    pub date: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub created_at: String,
}

/// One line of the merged income/withdrawal feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub kind: ItemKind,
    pub category: HistoryCategory,
    pub date: String,
    pub created_at: String,
    /// Positive for income, negative for withdrawals
    pub amount: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub lesson_type: Option<LessonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Month the monthly figures cover, `YYYY-MM`
    pub month: String,
    pub previous_month: String,
    pub next_month: String,
    pub monthly_total: i64,
    pub monthly_count: u32,
    pub accumulated_income: i64,
    pub accumulated_withdrawal: i64,
    pub net_balance: i64,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub identity: String,
    pub name: String,
    pub team: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingList {
    pub entries: Vec<RankingEntry>,
    pub mode: RankingMode,
}

/// Body returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
