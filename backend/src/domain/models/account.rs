//! Login credentials bound to a profile identity.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Same value as the owning profile's id
    pub id: String,
    pub login_id: String,
    pub password_hash: String,
}

/// Outcome of creating an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountInsert {
    Created,
    LoginTaken,
}
