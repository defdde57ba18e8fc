//! Capacity-limited collections used by session state.
//!
//! Both collections evict their oldest entry when a push would exceed
//! capacity, so a session can never grow past its caps no matter which
//! store persists it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// FIFO log with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedLog<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedLog<T> {
    /// Creates an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an entry, returning the evicted oldest entry if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Returns the last `n` entries, oldest first.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip)
    }

    /// Iterates all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Insertion-ordered, duplicate-free set of words with a fixed capacity.
///
/// Membership is case-insensitive. Re-inserting a known word moves it to
/// the most recent position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedSet {
    capacity: usize,
    items: VecDeque<String>,
}

impl BoundedSet {
    /// Creates an empty set holding at most `capacity` words.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Inserts a word. Returns true if it was not already present.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.capacity == 0 || item.trim().is_empty() {
            return false;
        }
        let existing = self
            .items
            .iter()
            .position(|known| known.eq_ignore_ascii_case(&item));
        if let Some(index) = existing {
            if let Some(known) = self.items.remove(index) {
                self.items.push_back(known);
            }
            return false;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
        true
    }

    /// Inserts every word in order.
    pub fn extend<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.insert(item);
        }
    }

    /// Drops all words, then inserts the given ones.
    pub fn replace<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.clear();
        self.extend(items);
    }

    /// Picks a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.items.len());
        self.items.get(index).map(String::as_str)
    }

    /// The most recently inserted word.
    pub fn most_recent(&self) -> Option<&str> {
        self.items.back().map(String::as_str)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|known| known.eq_ignore_ascii_case(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    mod bounded_log {
        use super::*;

        #[test]
        fn push_evicts_oldest_when_full() {
            let mut log = BoundedLog::new(2);
            assert_eq!(log.push(1), None);
            assert_eq!(log.push(2), None);
            assert_eq!(log.push(3), Some(1));
            assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        }

        #[test]
        fn last_n_returns_newest_in_order() {
            let mut log = BoundedLog::new(5);
            for i in 0..5 {
                log.push(i);
            }
            assert_eq!(log.last_n(2).copied().collect::<Vec<_>>(), vec![3, 4]);
            assert_eq!(log.last_n(10).count(), 5);
        }

        #[test]
        fn zero_capacity_log_stays_empty() {
            let mut log = BoundedLog::new(0);
            assert_eq!(log.push("x"), Some("x"));
            assert!(log.is_empty());
        }

        proptest! {
            #[test]
            fn never_exceeds_capacity(capacity in 1usize..8, items in prop::collection::vec(any::<u16>(), 0..40)) {
                let mut log = BoundedLog::new(capacity);
                for item in &items {
                    log.push(*item);
                    prop_assert!(log.len() <= capacity);
                }
                let expected: Vec<u16> = items.iter().rev().take(capacity).rev().copied().collect();
                prop_assert_eq!(log.iter().copied().collect::<Vec<_>>(), expected);
            }
        }
    }

    mod bounded_set {
        use super::*;

        #[test]
        fn insert_evicts_oldest_when_full() {
            let mut set = BoundedSet::new(3);
            set.extend(["music", "football", "tea", "travel"]);
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["football", "tea", "travel"]);
        }

        #[test]
        fn duplicates_are_ignored_case_insensitively() {
            let mut set = BoundedSet::new(3);
            assert!(set.insert("Music"));
            assert!(!set.insert("music"));
            assert_eq!(set.len(), 1);
            assert!(set.contains("MUSIC"));
        }

        #[test]
        fn reinsert_refreshes_recency() {
            let mut set = BoundedSet::new(3);
            set.extend(["a1", "b2", "c3"]);
            set.insert("a1");
            assert_eq!(set.most_recent(), Some("a1"));
            set.insert("d4");
            assert!(!set.contains("b2"));
        }

        #[test]
        fn replace_drops_previous_words() {
            let mut set = BoundedSet::new(3);
            set.extend(["old"]);
            set.replace(["new", "words"]);
            assert!(!set.contains("old"));
            assert_eq!(set.len(), 2);
        }

        #[test]
        fn choose_on_empty_is_none() {
            let set = BoundedSet::new(3);
            let mut rng = StdRng::seed_from_u64(1);
            assert_eq!(set.choose(&mut rng), None);
        }

        #[test]
        fn choose_returns_a_member() {
            let mut set = BoundedSet::new(3);
            set.extend(["park", "dog"]);
            let mut rng = StdRng::seed_from_u64(7);
            for _ in 0..20 {
                let picked = set.choose(&mut rng).unwrap();
                assert!(set.contains(picked));
            }
        }

        proptest! {
            #[test]
            fn never_exceeds_capacity(words in prop::collection::vec("[a-z]{3,6}", 0..30)) {
                let mut set = BoundedSet::new(3);
                for word in words {
                    set.insert(word);
                    prop_assert!(set.len() <= 3);
                }
            }
        }
    }
}
