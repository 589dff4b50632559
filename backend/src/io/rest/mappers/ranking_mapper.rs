use crate::domain::leaderboard::RankingEntry as DomainRankingEntry;
use shared::{RankingEntry as SharedRankingEntry, RankingList, RankingMode};

pub struct RankingMapper;

impl RankingMapper {
    pub fn to_dto(mode: RankingMode, entries: Vec<DomainRankingEntry>) -> RankingList {
        RankingList {
            entries: entries.into_iter().map(Self::entry_to_dto).collect(),
            mode,
        }
    }

    fn entry_to_dto(domain: DomainRankingEntry) -> SharedRankingEntry {
        SharedRankingEntry {
            identity: domain.user_id,
            name: domain.name,
            team: domain.team,
            count: domain.count,
        }
    }
}
