//! Insertion-ordered grouping used by every aggregation.
//!
//! Groups iterate in the order their key was first seen, so downstream stable
//! sorts break ties by first encounter.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> OrderedGroups<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Accumulator for `key`, created with `init` on first encounter.
    pub fn entry_or_insert_with(&mut self, key: String, init: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, init()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_iter().map(|(_, value)| value)
    }

    /// `(key, accumulator)` pairs in first-seen order.
    pub fn into_iter_keyed(self) -> impl Iterator<Item = (String, V)> {
        self.entries.into_iter()
    }
}

impl<V> Default for OrderedGroups<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Group `items` by `key_of`, folding each into its accumulator with `fold`.
pub fn group_by<T, V>(
    items: impl IntoIterator<Item = T>,
    key_of: impl Fn(&T) -> String,
    init: impl Fn(&T) -> V,
    fold: impl Fn(&mut V, &T),
) -> OrderedGroups<V> {
    let mut groups = OrderedGroups::new();
    for item in items {
        let acc = groups.entry_or_insert_with(key_of(&item), || init(&item));
        fold(acc, &item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = group_by(
            vec![("b", 1), ("a", 2), ("b", 3), ("c", 4)],
            |(key, _)| key.to_string(),
            |_| 0,
            |sum, (_, n)| *sum += n,
        );

        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get("b"), Some(&4));
        let values: Vec<_> = groups.into_values().collect();
        assert_eq!(values, vec![4, 2, 4]);
    }

    #[test]
    fn test_init_runs_once_per_key() {
        let groups = group_by(
            vec![("x", 10), ("x", 20)],
            |(key, _)| key.to_string(),
            |(_, first)| vec![*first],
            |seen, (_, n)| seen.push(*n),
        );
        assert_eq!(groups.get("x"), Some(&vec![10, 10, 20]));
    }
}
