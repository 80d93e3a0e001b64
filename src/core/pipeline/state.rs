//! Pipeline lifecycle states
//!
//! The coordinator publishes every state through a `watch` channel. Moves are
//! validated so no state is ever skipped:
//!
//! ```text
//! Idle -> Fetching(1) -> ... -> Fetching(n) -> CatalogReady -> Downloading -> Done
//! ```

use crate::domain::{HearthError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing started yet
    #[default]
    Idle,
    /// Fetching the given 1-indexed page (retries stay in this state)
    Fetching { page: u32 },
    /// Every page fetched; catalog complete
    CatalogReady { records: usize },
    /// Download phase started for `total` records
    Downloading { total: usize },
    /// All download tasks reached a terminal outcome
    Done,
}

impl PipelineState {
    /// Whether moving from `self` to `next` is legal
    ///
    /// `page_count` is needed to know when the fetch phase may end.
    pub fn can_transition_to(&self, next: &PipelineState, page_count: u32) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Idle, Fetching { page }) => *page == 1,
            (Idle, CatalogReady { .. }) => page_count == 0,
            (Fetching { page: current }, Fetching { page }) => *page == current + 1,
            (Fetching { page }, CatalogReady { .. }) => *page == page_count,
            (CatalogReady { .. }, Downloading { .. }) => true,
            (Downloading { .. }, Done) => true,
            _ => false,
        }
    }

    /// Move to `next`, rejecting illegal transitions
    pub fn transition(&mut self, next: PipelineState, page_count: u32) -> Result<()> {
        if !self.can_transition_to(&next, page_count) {
            return Err(HearthError::Other(format!(
                "illegal pipeline transition {self} -> {next}"
            )));
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Fetching { page } => write!(f, "fetching(page {page})"),
            PipelineState::CatalogReady { records } => write!(f, "catalog_ready({records} records)"),
            PipelineState::Downloading { total } => write!(f, "downloading({total} tasks)"),
            PipelineState::Done => write!(f, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut state = PipelineState::Idle;
        state.transition(PipelineState::Fetching { page: 1 }, 2).unwrap();
        state.transition(PipelineState::Fetching { page: 2 }, 2).unwrap();
        state.transition(PipelineState::CatalogReady { records: 20 }, 2).unwrap();
        state.transition(PipelineState::Downloading { total: 20 }, 2).unwrap();
        state.transition(PipelineState::Done, 2).unwrap();
        assert_eq!(state, PipelineState::Done);
    }

    #[test]
    fn test_cannot_skip_pages() {
        let mut state = PipelineState::Fetching { page: 1 };
        assert!(state.transition(PipelineState::Fetching { page: 3 }, 5).is_err());
        assert!(state.transition(PipelineState::CatalogReady { records: 0 }, 5).is_err());
        assert_eq!(state, PipelineState::Fetching { page: 1 });
    }

    #[test]
    fn test_cannot_skip_download_phase() {
        let state = PipelineState::CatalogReady { records: 3 };
        assert!(!state.can_transition_to(&PipelineState::Done, 1));
        assert!(!PipelineState::Idle.can_transition_to(&PipelineState::Downloading { total: 0 }, 1));
    }

    #[test]
    fn test_zero_pages_goes_straight_to_catalog_ready() {
        assert!(PipelineState::Idle.can_transition_to(&PipelineState::CatalogReady { records: 0 }, 0));
        assert!(!PipelineState::Idle.can_transition_to(&PipelineState::CatalogReady { records: 0 }, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(PipelineState::Fetching { page: 4 }.to_string(), "fetching(page 4)");
        assert_eq!(PipelineState::Done.to_string(), "done");
    }
}
