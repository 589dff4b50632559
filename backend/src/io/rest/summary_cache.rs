//! Computed ledger and ranking responses, kept until a change event says
//! they are stale.
//!
//! A reader takes a [`Generation`] before it queries the store and hands it
//! back when storing the result. Every change event bumps the generation it
//! touches, so a result computed from rows older than the change is never
//! cached.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use shared::{LedgerSummary, RankingList, RankingMode};
use tracing::debug;

use crate::domain::{LedgerChanged, LedgerListener, SummaryView};

/// Change counter observed before a summary was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// One ledger per owner, for whichever month was stored last
#[derive(Default)]
struct LedgerSlots {
    summaries: HashMap<String, LedgerSummary>,
    generations: HashMap<String, u64>,
}

/// At most one list per mode, keyed by the first day of its window
/// (`None` for all-time)
#[derive(Default)]
struct RankingSlots {
    lists: HashMap<RankingMode, (Option<NaiveDate>, RankingList)>,
    generation: u64,
}

#[derive(Default)]
pub struct SummaryCache {
    ledgers: RwLock<LedgerSlots>,
    rankings: RwLock<RankingSlots>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger_generation(&self, owner: &str) -> Generation {
        let ledgers = self.ledgers.read().unwrap_or_else(PoisonError::into_inner);
        Generation(ledgers.generations.get(owner).copied().unwrap_or(0))
    }

    pub fn ledger(&self, owner: &str, month: &str) -> Option<LedgerSummary> {
        let ledgers = self.ledgers.read().unwrap_or_else(PoisonError::into_inner);
        ledgers
            .summaries
            .get(owner)
            .filter(|summary| summary.month == month)
            .cloned()
    }

    /// Cache `summary` unless the owner's ledger changed after `seen` was taken.
    /// Returns whether it was stored.
    pub fn store_ledger(&self, owner: &str, seen: Generation, summary: LedgerSummary) -> bool {
        let mut ledgers = self.ledgers.write().unwrap_or_else(PoisonError::into_inner);
        let current = ledgers.generations.get(owner).copied().unwrap_or(0);
        if current != seen.0 {
            debug!("Ledger for {} changed while it was computed; not caching", owner);
            return false;
        }
        ledgers.summaries.insert(owner.to_string(), summary);
        true
    }

    pub fn ranking_generation(&self) -> Generation {
        let rankings = self.rankings.read().unwrap_or_else(PoisonError::into_inner);
        Generation(rankings.generation)
    }

    pub fn ranking(&self, mode: RankingMode, since: Option<NaiveDate>) -> Option<RankingList> {
        let rankings = self.rankings.read().unwrap_or_else(PoisonError::into_inner);
        rankings
            .lists
            .get(&mode)
            .filter(|(cached_since, _)| *cached_since == since)
            .map(|(_, list)| list.clone())
    }

    /// Cache `ranking` unless any ranking-relevant change happened after
    /// `seen` was taken. Returns whether it was stored.
    pub fn store_ranking(&self, seen: Generation, since: Option<NaiveDate>, ranking: RankingList) -> bool {
        let mut rankings = self.rankings.write().unwrap_or_else(PoisonError::into_inner);
        if rankings.generation != seen.0 {
            debug!("Rankings changed while {} ranking was computed; not caching", ranking.mode);
            return false;
        }
        rankings.lists.insert(ranking.mode, (since, ranking));
        true
    }
}

impl LedgerListener for SummaryCache {
    fn ledger_changed(&self, event: &LedgerChanged) {
        if event.affects(SummaryView::Money) || event.affects(SummaryView::Home) {
            let mut ledgers = self.ledgers.write().unwrap_or_else(PoisonError::into_inner);
            ledgers.summaries.remove(&event.owner);
            *ledgers.generations.entry(event.owner.clone()).or_insert(0) += 1;
            debug!("Dropped cached ledger for {}", event.owner);
        }

        // Any owner's change can move everyone's rank
        if event.affects(SummaryView::Ranking) {
            let mut rankings = self.rankings.write().unwrap_or_else(PoisonError::into_inner);
            rankings.lists.clear();
            rankings.generation += 1;
            debug!("Dropped cached rankings after change by {}", event.owner);
        }
    }
}
