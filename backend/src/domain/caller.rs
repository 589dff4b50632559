//! Identity of whoever issued the current request.

use super::error::{LedgerError, LedgerResult};

/// Caller identity as resolved by the IO layer before any domain call.
///
/// Services never look up the identity themselves; they receive it and call
/// [`Caller::require`] before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller {
    user_id: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// The owner identity, or `Authentication` when nobody is signed in
    pub fn require(&self) -> LedgerResult<&str> {
        self.user_id.as_deref().ok_or(LedgerError::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_caller_is_rejected() {
        assert!(matches!(
            Caller::anonymous().require(),
            Err(LedgerError::Authentication)
        ));
    }

    #[test]
    fn test_authenticated_caller_yields_identity() {
        let caller = Caller::authenticated("user-a");
        assert_eq!(caller.require().unwrap(), "user-a");
    }
}
