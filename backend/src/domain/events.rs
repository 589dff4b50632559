//! "Ledger changed" notifications.
//!
//! Mutating services publish a [`LedgerChanged`] after a successful write.
//! Presentation layers subscribe and translate the event into whatever cache
//! invalidation they use; the domain knows nothing about routes or pages.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

/// A computed view whose contents may be stale after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryView {
    /// Monthly totals and balance overview
    Home,
    /// Full ledger with history feed
    Money,
    /// Leaderboard across all instructors
    Ranking,
    /// The owner's own profile
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerChanged {
    pub owner: String,
    pub views: &'static [SummaryView],
}

impl LedgerChanged {
    pub fn affects(&self, view: SummaryView) -> bool {
        self.views.contains(&view)
    }
}

pub const LESSON_ADDED: &[SummaryView] = &[SummaryView::Home, SummaryView::Money, SummaryView::Ranking];
pub const WITHDRAWAL_ADDED: &[SummaryView] = &[SummaryView::Home, SummaryView::Money];
pub const ITEM_DELETED: &[SummaryView] = &[SummaryView::Home, SummaryView::Money, SummaryView::Ranking];
pub const PROFILE_UPDATED: &[SummaryView] = &[SummaryView::Home, SummaryView::Ranking, SummaryView::Profile];

/// Receiver of ledger change notifications
pub trait LedgerListener: Send + Sync {
    fn ledger_changed(&self, event: &LedgerChanged);
}

/// Fan-out of change events to every subscribed listener.
///
/// Listeners are registered while the application is assembled and are called
/// synchronously, so by the time a mutation returns every listener has seen it.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Vec<Arc<dyn LedgerListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn LedgerListener>) {
        self.listeners.push(listener);
    }

    pub fn publish(&self, owner: &str, views: &'static [SummaryView]) {
        let event = LedgerChanged {
            owner: owner.to_string(),
            views,
        };
        debug!("Publishing ledger change for {} to {} listeners: {:?}", owner, self.listeners.len(), views);
        for listener in &self.listeners {
            listener.ledger_changed(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
