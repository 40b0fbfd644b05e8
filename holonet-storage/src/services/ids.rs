use holonet_api_types::EntityId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source producing `<prefix>1`, `<prefix>2`, ...
#[derive(Debug)]
pub struct IdSequence {
    prefix: &'static str,
    next: AtomicU64,
}

impl IdSequence {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> EntityId {
        EntityId::sequential(self.prefix, self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let ids = IdSequence::new("s");
        assert_eq!(ids.next_id().as_str(), "s1");
        assert_eq!(ids.next_id().as_str(), "s2");
    }
}
