//! Account creation and credential checks.
//!
//! Passwords are stored as argon2 PHC strings. Issuing a session token for a
//! verified identity is left to the IO layer.

use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    commands::accounts::{LoginCommand, SignupCommand},
    error::{LedgerError, LedgerResult},
    models::{
        account::{Account, AccountInsert},
        profile::Profile,
    },
};
use crate::storage::{AccountStorage, Connection};

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone)]
pub struct AccountService<C: Connection> {
    account_repository: C::AccountRepository,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
        }
    }

    /// Create an account with an empty-rate profile; returns the new identity
    pub async fn signup(&self, command: SignupCommand) -> LedgerResult<String> {
        let login_id = command.login_id.trim();
        if login_id.is_empty() {
            return Err(LedgerError::validation("login id is required"));
        }
        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(LedgerError::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let user_id = Uuid::new_v4().to_string();
        let account = Account {
            id: user_id.clone(),
            login_id: login_id.to_string(),
            password_hash: hash_password(&command.password)?,
        };
        let profile = Profile {
            username: command.name.trim().to_string(),
            team_name: Profile::normalize_team_name(command.team_name.as_deref()),
            ..Profile::empty(&user_id)
        };

        match self.account_repository.create_account(&account, &profile).await? {
            AccountInsert::Created => {
                info!("Created account {} for login {}", user_id, login_id);
                Ok(user_id)
            }
            AccountInsert::LoginTaken => {
                warn!("Signup rejected: login {} already exists", login_id);
                Err(LedgerError::Conflict("this login id is already taken".to_string()))
            }
        }
    }

    /// Check credentials; returns the owner identity on success.
    ///
    /// Unknown login and wrong password are indistinguishable to the caller.
    pub async fn login(&self, command: LoginCommand) -> LedgerResult<String> {
        let login_id = command.login_id.trim();
        let Some(account) = self.account_repository.find_account_by_login(login_id).await? else {
            warn!("Login failed: unknown login {}", login_id);
            return Err(LedgerError::Authentication);
        };

        if !verify_password(&command.password, &account.password_hash)? {
            warn!("Login failed: wrong password for {}", login_id);
            return Err(LedgerError::Authentication);
        }

        info!("Login succeeded for {}", account.id);
        Ok(account.id)
    }
}

fn hash_password(password: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> LedgerResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| anyhow!("stored password hash is malformed: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
