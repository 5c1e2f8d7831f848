//! Generation-based debounce gate for search-as-you-type inputs.
//!
//! Every keystroke takes a new [`Ticket`]; the timer that belongs to a ticket
//! may only fire the query if no newer keystroke (and no cancel) happened in
//! between. The gate knows nothing about timers, the frontend pairs it with
//! `gloo_timers`.

/// Delay between the last keystroke and the backend query.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Minimum trimmed length before a term is sent to the backend.
pub const MIN_SEARCH_LEN: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub term: String,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    generation: u64,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            generation: 0,
            delay_ms,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Register a keystroke; the previous pending ticket becomes stale.
    pub fn schedule(&mut self, term: impl Into<String>) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
            term: term.into(),
        }
    }

    /// Invalidate whatever is pending (unmount, dialog close).
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Called when a ticket's timer elapses. Returns the term to query, or
    /// `None` when the ticket is stale or the term is too short.
    pub fn fire(&self, ticket: &Ticket) -> Option<String> {
        if !self.is_current(ticket) {
            return None;
        }
        let term = ticket.term.trim();
        if term.chars().count() < MIN_SEARCH_LEN {
            return None;
        }
        Some(term.to_string())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapid_typing_fires_once_with_last_term() {
        let mut d = Debouncer::default();
        let t1 = d.schedule("A");
        let t2 = d.schedule("AB");
        let t3 = d.schedule("ABC");

        // All three timers elapse, in order.
        let fired: Vec<String> = [t1, t2, t3].iter().filter_map(|t| d.fire(t)).collect();
        assert_eq!(fired, vec!["ABC".to_string()]);
    }

    #[test]
    fn test_cancel_drops_pending_ticket() {
        let mut d = Debouncer::default();
        let t = d.schedule("proveedor");
        d.cancel();
        assert_eq!(d.fire(&t), None);
    }

    #[test]
    fn test_blank_term_is_not_queried() {
        let mut d = Debouncer::default();
        let t = d.schedule("   ");
        assert_eq!(d.fire(&t), None);
    }

    #[test]
    fn test_pause_between_keystrokes_fires_each() {
        let mut d = Debouncer::new(10);
        let t1 = d.schedule("90012");
        assert_eq!(d.fire(&t1).as_deref(), Some("90012"));
        let t2 = d.schedule("900123");
        assert_eq!(d.fire(&t2).as_deref(), Some("900123"));
    }
}
