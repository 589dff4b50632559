//! Domain-level command types.
//!
//! Services take these rather than the public DTOs from the `shared` crate; the
//! REST layer maps one onto the other.

pub mod lessons {
    use shared::{LessonType, TimeSlot};

    /// Input for recording a lesson.
    #[derive(Debug, Clone)]
    pub struct SubmitLessonCommand {
        /// Calendar date as submitted, `YYYY-MM-DD`
        pub date: String,
        pub lesson_type: LessonType,
        pub time_slot: TimeSlot,
    }
}

pub mod withdrawals {
    /// Input for recording a withdrawal.
    #[derive(Debug, Clone)]
    pub struct SubmitWithdrawalCommand {
        pub date: String,
        pub amount: i64,
        pub memo: Option<String>,
    }
}

pub mod ledger {
    use shared::ItemKind;

    /// Input for deleting one lesson or withdrawal owned by the caller.
    #[derive(Debug, Clone)]
    pub struct DeleteItemCommand {
        pub id: String,
        pub kind: ItemKind,
    }
}

pub mod profile {
    /// Input for updating the caller's own profile.
    #[derive(Debug, Clone)]
    pub struct UpdateProfileCommand {
        pub username: String,
        pub team_name: Option<String>,
        pub rate_ski: i64,
        pub rate_board: i64,
    }
}

pub mod accounts {
    /// Input for creating an account and its profile.
    #[derive(Debug, Clone)]
    pub struct SignupCommand {
        pub login_id: String,
        pub password: String,
        pub name: String,
        pub team_name: Option<String>,
    }

    /// Input for checking credentials.
    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub login_id: String,
        pub password: String,
    }
}
