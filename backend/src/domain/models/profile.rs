//! Domain model for an instructor profile.
use shared::LessonType;

/// Team label used when an instructor has not joined one
pub const DEFAULT_TEAM_NAME: &str = "unaffiliated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub team_name: String,
    pub rate_ski: i64,
    pub rate_board: i64,
}

impl Profile {
    /// Profile used when the owner has no stored row yet
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            username: String::new(),
            team_name: DEFAULT_TEAM_NAME.to_string(),
            rate_ski: 0,
            rate_board: 0,
        }
    }

    /// Pay for one lesson of the given type
    pub fn rate_for(&self, lesson_type: LessonType) -> i64 {
        match lesson_type {
            LessonType::Ski => self.rate_ski,
            LessonType::Board => self.rate_board,
        }
    }

    /// Trimmed team name, or the default label when blank
    pub fn normalize_team_name(team_name: Option<&str>) -> String {
        match team_name.map(str::trim) {
            Some(team) if !team.is_empty() => team.to_string(),
            _ => DEFAULT_TEAM_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_for_selects_by_lesson_type() {
        let profile = Profile {
            rate_ski: 50000,
            rate_board: 55000,
            ..Profile::empty("u1")
        };
        assert_eq!(profile.rate_for(LessonType::Ski), 50000);
        assert_eq!(profile.rate_for(LessonType::Board), 55000);
    }

    #[test]
    fn test_blank_team_falls_back_to_default() {
        assert_eq!(Profile::normalize_team_name(None), DEFAULT_TEAM_NAME);
        assert_eq!(Profile::normalize_team_name(Some("   ")), DEFAULT_TEAM_NAME);
        assert_eq!(Profile::normalize_team_name(Some(" Red ")), "Red");
    }
}
