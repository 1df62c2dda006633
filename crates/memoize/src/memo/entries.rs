//! Insertion-ordered entry storage
//!
//! Entries are kept oldest-first and looked up by a linear scan. A custom
//! reconciler is an arbitrary predicate, so there is no key to hash.

use std::collections::VecDeque;

use super::config::MaxSize;
use super::reconcile::Reconciler;

/// One memoized call: the argument snapshot and what the function returned
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<A, V> {
    arguments: Vec<A>,
    result: V,
}

/// Bounded FIFO list of cache entries
#[derive(Debug)]
pub(crate) struct EntryList<A, V> {
    entries: VecDeque<CacheEntry<A, V>>,
    max_size: MaxSize,
    /// Bumped on every append; lets a caller detect appends made while it
    /// was not holding a borrow
    generation: u64,
}

impl<A, V> EntryList<A, V> {
    pub(crate) fn new(max_size: MaxSize) -> Self {
        Self { entries: VecDeque::new(), max_size, generation: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// First stored result whose snapshot the reconciler accepts for
    /// `supplied`. Never reorders.
    pub(crate) fn find<R>(&self, supplied: &[A], reconciler: &R) -> Option<&V>
    where
        R: Reconciler<A> + ?Sized,
    {
        self.entries
            .iter()
            .find(|entry| reconciler.reconcile(supplied, &entry.arguments))
            .map(|entry| &entry.result)
    }

    /// Evict from the front until one more entry fits. Returns how many
    /// entries were dropped.
    pub(crate) fn make_room(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() >= self.max_size.get() {
            if self.entries.pop_front().is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    /// Append a new entry at the back. Callers make room first.
    pub(crate) fn push(&mut self, arguments: Vec<A>, result: V) {
        debug_assert!(self.entries.len() < self.max_size.get());
        self.entries.push_back(CacheEntry { arguments, result });
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Argument snapshots, oldest first
    pub(crate) fn arguments(&self) -> impl Iterator<Item = &[A]> {
        self.entries.iter().map(|entry| entry.arguments.as_slice())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for memo::entries.
    use super::*;
    use crate::memo::reconcile::PositionalEq;

    fn list(max: usize) -> EntryList<&'static str, usize> {
        EntryList::new(MaxSize::from(max))
    }

    /// Validates lookup by argument list.
    #[test]
    fn test_find_returns_stored_result() {
        let mut entries = list(3);
        entries.push(vec!["a"], 1);
        entries.push(vec!["b"], 2);

        assert_eq!(entries.find(&["b"], &PositionalEq), Some(&2));
        assert_eq!(entries.find(&["c"], &PositionalEq), None);
    }

    /// Validates that the first matching entry wins.
    #[test]
    fn test_find_returns_first_match() {
        let mut entries = list(3);
        entries.push(vec!["a"], 1);
        entries.push(vec!["b"], 2);

        let anything = |_: &[&str], _: &[&str]| true;
        assert_eq!(entries.find(&["b"], &anything), Some(&1));
    }

    /// Validates FIFO eviction.
    ///
    /// Assertions:
    /// - Confirms `make_room` is a no-op below capacity.
    /// - Confirms the oldest entry is dropped at capacity.
    #[test]
    fn test_make_room_evicts_oldest() {
        let mut entries = list(2);
        assert_eq!(entries.make_room(), 0);
        entries.push(vec!["a"], 1);
        assert_eq!(entries.make_room(), 0);
        entries.push(vec!["b"], 2);

        assert_eq!(entries.make_room(), 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.find(&["a"], &PositionalEq), None);
        assert_eq!(entries.find(&["b"], &PositionalEq), Some(&2));
    }

    /// Validates that lookups never reorder the list.
    #[test]
    fn test_find_does_not_reorder() {
        let mut entries = list(2);
        entries.push(vec!["a"], 1);
        entries.push(vec!["b"], 2);
        let _ = entries.find(&["a"], &PositionalEq);

        entries.make_room();
        let remaining: Vec<_> = entries.arguments().map(<[_]>::to_vec).collect();
        assert_eq!(remaining, vec![vec!["b"]]);
    }

    /// Validates the generation counter.
    #[test]
    fn test_generation_tracks_appends() {
        let mut entries = list(1);
        assert_eq!(entries.generation(), 0);
        entries.push(vec!["a"], 1);
        entries.make_room();
        entries.push(vec!["b"], 2);
        assert_eq!(entries.generation(), 2);

        entries.clear();
        assert_eq!(entries.len(), 0);
        assert_eq!(entries.generation(), 2);
    }
}
