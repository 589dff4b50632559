//! Leaderboard aggregation: lesson counts per instructor within a window.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::RankingMode;

use super::calendar::week_start;
use super::models::lesson::LessonOwner;
use super::models::profile::DEFAULT_TEAM_NAME;

/// Display name used when a lesson's owner has no profile row
pub const UNKNOWN_INSTRUCTOR_NAME: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub user_id: String,
    pub name: String,
    pub team: String,
    pub count: u32,
}

/// Inclusive lower date bound for a mode; `None` means unbounded
pub fn lower_bound(mode: RankingMode, today: NaiveDate) -> Option<NaiveDate> {
    match mode {
        RankingMode::Weekly => Some(week_start(today)),
        RankingMode::All => None,
    }
}

/// Group lessons by owner and rank by lesson count.
///
/// Ordering is count descending, then owner identity ascending so that equal
/// counts always come out in the same order.
pub fn rank_lessons(lessons: Vec<LessonOwner>) -> Vec<RankingEntry> {
    let mut by_owner: HashMap<String, RankingEntry> = HashMap::new();

    for lesson in lessons {
        let entry = by_owner
            .entry(lesson.user_id.clone())
            .or_insert_with(|| RankingEntry {
                name: display_or(lesson.username.as_deref(), UNKNOWN_INSTRUCTOR_NAME),
                team: display_or(lesson.team_name.as_deref(), DEFAULT_TEAM_NAME),
                user_id: lesson.user_id,
                count: 0,
            });
        entry.count += 1;
    }

    let mut entries: Vec<RankingEntry> = by_owner.into_values().collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
    entries
}

fn display_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: &str, name: Option<&str>, team: Option<&str>) -> LessonOwner {
        LessonOwner {
            user_id: user_id.to_string(),
            username: name.map(str::to_string),
            team_name: team.map(str::to_string),
        }
    }

    #[test]
    fn test_counts_per_owner_sorted_descending() {
        let rows = vec![
            row("b", Some("Bo"), Some("Blue")),
            row("a", Some("Ann"), Some("Red")),
            row("b", Some("Bo"), Some("Blue")),
            row("c", Some("Cy"), Some("Red")),
            row("b", Some("Bo"), Some("Blue")),
            row("c", Some("Cy"), Some("Red")),
        ];

        let ranking = rank_lessons(rows);
        let summary: Vec<(&str, u32)> = ranking.iter().map(|e| (e.user_id.as_str(), e.count)).collect();

        assert_eq!(summary, vec![("b", 3), ("c", 2), ("a", 1)]);
        assert_eq!(ranking[0].name, "Bo");
        assert_eq!(ranking[0].team, "Blue");
    }

    #[test]
    fn test_ties_break_by_identity_ascending() {
        let rows = vec![
            row("zed", Some("Z"), None),
            row("amy", Some("A"), None),
            row("kim", Some("K"), None),
        ];

        let ids: Vec<String> = rank_lessons(rows).into_iter().map(|e| e.user_id).collect();
        assert_eq!(ids, vec!["amy", "kim", "zed"]);
    }

    #[test]
    fn test_missing_profile_degrades_to_placeholders() {
        let ranking = rank_lessons(vec![row("orphan", None, None), row("blank", Some(" "), Some(""))]);

        for entry in &ranking {
            assert_eq!(entry.name, UNKNOWN_INSTRUCTOR_NAME);
            assert_eq!(entry.team, DEFAULT_TEAM_NAME);
        }
    }

    #[test]
    fn test_lower_bound_per_mode() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            lower_bound(RankingMode::Weekly, wednesday),
            NaiveDate::from_ymd_opt(2024, 1, 8)
        );
        assert_eq!(lower_bound(RankingMode::All, wednesday), None);
    }

    #[test]
    fn test_empty_input_gives_empty_ranking() {
        assert!(rank_lessons(Vec::new()).is_empty());
    }
}
