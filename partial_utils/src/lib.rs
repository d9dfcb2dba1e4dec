#![allow(missing_docs)]

use std::sync::atomic::{AtomicU64, Ordering};

// Global counters for runtime key generation
static SCOPE_COUNTER: AtomicU64 = AtomicU64::new(1);
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_scope_counter() -> u64 {
    SCOPE_COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn next_request_counter() -> u64 {
    REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_monotonic() {
        let first = next_scope_counter();
        let second = next_scope_counter();

        assert!(first > 0);
        assert!(second > first);

        let ticket = next_request_counter();
        assert!(next_request_counter() > ticket);
    }
}
