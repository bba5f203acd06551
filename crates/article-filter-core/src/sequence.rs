//! Request sequencing.
//!
//! Every cycle takes a ticket before its fetch. When responses overlap, only
//! the holder of the newest ticket may touch the page.

use std::cell::Cell;

/// Ticket identifying one request cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket dispenser for one widget.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RequestTicket(next)
    }

    /// No ticket was issued after `ticket`.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert_eq!(second.id(), 2);
    }

    #[test]
    fn test_only_newest_is_latest() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_latest(first));
        let second = sequencer.issue();
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
    }
}
