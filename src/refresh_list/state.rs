//! The refresh/load-more state machine.
//!
//! Refreshing and loading more are mutually exclusive. Keeping them as one
//! enum instead of two flags makes the overlap unrepresentable; the guarded
//! transitions below are the only way in or out.

use tracing::{debug, warn};

/// What the list is busy with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A pull-to-refresh is waiting for `notify_refresh_completed`.
    Refreshing,
    /// A load-more is waiting for `notify_load_more_completed`.
    LoadingMore,
}

impl Activity {
    /// Whether nothing is in flight.
    pub fn is_idle(self) -> bool {
        self == Activity::Idle
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(self) -> bool {
        self == Activity::Refreshing
    }

    /// Whether a load-more is in flight.
    pub fn is_loading_more(self) -> bool {
        self == Activity::LoadingMore
    }

    /// `Idle -> Refreshing`. Returns `false` and stays put otherwise.
    pub(crate) fn try_begin_refresh(&mut self) -> bool {
        if *self != Activity::Idle {
            debug!(activity = ?self, "refresh rejected");
            return false;
        }
        *self = Activity::Refreshing;
        debug!("refresh started");
        true
    }

    /// `Refreshing -> Idle`. Returns whether a refresh was in flight.
    pub(crate) fn finish_refresh(&mut self) -> bool {
        if *self != Activity::Refreshing {
            warn!(activity = ?self, "refresh completed while not refreshing");
            return false;
        }
        *self = Activity::Idle;
        debug!("refresh finished");
        true
    }

    /// `Idle -> LoadingMore`. Returns `false` and stays put otherwise.
    pub(crate) fn try_begin_load_more(&mut self) -> bool {
        if *self != Activity::Idle {
            debug!(activity = ?self, "load more rejected");
            return false;
        }
        *self = Activity::LoadingMore;
        debug!("load more started");
        true
    }

    /// `LoadingMore -> Idle`. Returns whether a load-more was in flight.
    pub(crate) fn finish_load_more(&mut self) -> bool {
        if *self != Activity::LoadingMore {
            warn!(activity = ?self, "load more completed while not loading");
            return false;
        }
        *self = Activity::Idle;
        debug!("load more finished");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_are_exclusive() {
        let mut a = Activity::default();
        assert!(a.try_begin_refresh());
        assert!(!a.try_begin_load_more());
        assert!(!a.try_begin_refresh());
        assert!(a.is_refreshing() && !a.is_loading_more());

        assert!(a.finish_refresh());
        assert!(a.is_idle());

        assert!(a.try_begin_load_more());
        assert!(!a.try_begin_refresh());
        assert!(!a.finish_refresh());
        assert!(a.is_loading_more());
        assert!(a.finish_load_more());
        assert!(!a.finish_load_more());
    }
}
