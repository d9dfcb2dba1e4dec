//! Ordering of overlapping requests against the same scope.
//!
//! Each request gets a ticket; only the most recently issued ticket for a
//! scope may apply its response. Scopes do not affect each other.

use std::collections::HashMap;

/// Identifies one issued request for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Key of the scope the request will swap
    pub scope: u64,
    /// Process-wide issue number
    pub sequence: u64,
}

/// Latest ticket issued per scope
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: HashMap<u64, u64>,
}

impl Sequencer {
    /// A sequencer with no scopes
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `scope`, superseding any earlier one
    pub fn issue(&mut self, scope: u64) -> Ticket {
        let sequence = partial_utils::next_request_counter();
        self.latest.insert(scope, sequence);

        Ticket { scope, sequence }
    }

    /// Whether `ticket` is still the newest issued for its scope
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.scope) == Some(&ticket.sequence)
    }

    /// Forget a scope whose element no longer exists
    pub fn forget(&mut self, scope: u64) {
        self.latest.remove(&scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_issued_ticket_wins() {
        let mut sequencer = Sequencer::new();
        let first = sequencer.issue(7);
        let second = sequencer.issue(7);

        assert!(!sequencer.is_current(&first));
        assert!(sequencer.is_current(&second));
    }

    #[test]
    fn scopes_are_independent() {
        let mut sequencer = Sequencer::new();
        let a = sequencer.issue(1);
        let b = sequencer.issue(2);

        assert!(sequencer.is_current(&a));
        assert!(sequencer.is_current(&b));

        sequencer.issue(2);
        assert!(sequencer.is_current(&a));
        assert!(!sequencer.is_current(&b));
    }

    #[test]
    fn forgotten_scope_rejects_old_tickets() {
        let mut sequencer = Sequencer::new();
        let ticket = sequencer.issue(3);
        sequencer.forget(3);

        assert!(!sequencer.is_current(&ticket));
    }
}
