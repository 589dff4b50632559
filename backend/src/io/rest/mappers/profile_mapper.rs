use crate::domain::commands::profile::UpdateProfileCommand;
use crate::domain::models::profile::Profile as DomainProfile;
use shared::{Profile as SharedProfile, UpdateProfileRequest};

pub struct ProfileMapper;

impl ProfileMapper {
    pub fn to_dto(domain: DomainProfile) -> SharedProfile {
        SharedProfile {
            id: domain.id,
            username: domain.username,
            team_name: domain.team_name,
            rate_ski: domain.rate_ski,
            rate_board: domain.rate_board,
        }
    }

    pub fn to_update_command(request: UpdateProfileRequest) -> UpdateProfileCommand {
        UpdateProfileCommand {
            username: request.username,
            team_name: request.team_name,
            rate_ski: request.rate_ski,
            rate_board: request.rate_board,
        }
    }
}
