//! The caller's own profile: display name, team and per-lesson rates.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    caller::Caller,
    commands::profile::UpdateProfileCommand,
    error::{LedgerError, LedgerResult},
    events::{EventBus, PROFILE_UPDATED},
    models::{profile::Profile, MAX_AMOUNT},
};
use crate::storage::{Connection, ProfileStorage};

#[derive(Clone)]
pub struct ProfileService<C: Connection> {
    profile_repository: C::ProfileRepository,
    events: EventBus,
}

impl<C: Connection> ProfileService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            profile_repository: connection.create_profile_repository(),
            events,
        }
    }

    /// The caller's profile; an owner without a stored row gets zero rates
    /// and the default team
    pub async fn get_profile(&self, caller: &Caller) -> LedgerResult<Profile> {
        let owner = caller.require()?;
        let profile = self.profile_repository.get_profile(owner).await?;
        Ok(profile.unwrap_or_else(|| Profile::empty(owner)))
    }

    /// Replace the caller's profile. Existing lessons keep the income they were
    /// recorded with.
    pub async fn update_profile(&self, caller: &Caller, command: UpdateProfileCommand) -> LedgerResult<Profile> {
        let owner = caller.require()?;

        if command.rate_ski < 0 || command.rate_board < 0 {
            return Err(LedgerError::validation("lesson rates cannot be negative"));
        }
        if command.rate_ski > MAX_AMOUNT || command.rate_board > MAX_AMOUNT {
            return Err(LedgerError::validation(format!("lesson rates cannot exceed {}", MAX_AMOUNT)));
        }

        let profile = Profile {
            id: owner.to_string(),
            username: command.username.trim().to_string(),
            team_name: Profile::normalize_team_name(command.team_name.as_deref()),
            rate_ski: command.rate_ski,
            rate_board: command.rate_board,
        };

        self.profile_repository.upsert_profile(&profile).await?;

        info!(
            "Updated profile for {}: team {}, rates {}/{}",
            owner, profile.team_name, profile.rate_ski, profile.rate_board
        );
        self.events.publish(owner, PROFILE_UPDATED);
        Ok(profile)
    }
}
