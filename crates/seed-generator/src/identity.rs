//! Per-thread identity lookup.

use seed_core::EntityId;
use std::collections::HashMap;

/// Maps `thread -> account -> position` in the run-wide identity list.
///
/// An account has at most one identity per thread; a second lookup for the
/// same pair returns the position recorded by the first.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    by_thread: HashMap<EntityId, HashMap<EntityId, usize>>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, thread_id: EntityId, account_id: EntityId) -> Option<usize> {
        self.by_thread
            .get(&thread_id)
            .and_then(|accounts| accounts.get(&account_id))
            .copied()
    }

    /// Record `position` for the pair. Returns the existing position instead
    /// if the pair is already indexed.
    pub fn insert(&mut self, thread_id: EntityId, account_id: EntityId, position: usize) -> usize {
        let accounts = self.by_thread.entry(thread_id).or_default();
        match accounts.get(&account_id) {
            Some(existing) => *existing,
            None => {
                accounts.insert(account_id, position);
                position
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_get() {
        let mut index = IdentityIndex::new();
        assert_eq!(index.get(1, 7), None);

        assert_eq!(index.insert(1, 7, 0), 0);
        assert_eq!(index.get(1, 7), Some(0));
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut index = IdentityIndex::new();
        index.insert(1, 7, 0);

        assert_eq!(index.insert(1, 7, 5), 0);
        assert_eq!(index.get(1, 7), Some(0));
    }

    #[test]
    fn test_threads_are_independent() {
        let mut index = IdentityIndex::new();
        index.insert(1, 7, 0);
        index.insert(2, 7, 1);
        index.insert(2, 8, 2);

        assert_eq!(index.get(1, 7), Some(0));
        assert_eq!(index.get(2, 7), Some(1));
        assert_eq!(index.get(2, 8), Some(2));
        assert_eq!(index.get(3, 7), None);
    }
}
