use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::StateIndex;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is the natural order of their elements.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps whose iteration order is the natural order of their keys.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Type alias for sets that remember the order in which elements were inserted.
pub type IndexedSet<S> = indexmap::IndexSet<S>;
/// Type alias for maps that remember the order in which keys were inserted.
pub type IndexedMap<K, V> = indexmap::IndexMap<K, V>;

/// A set of state indices. The subset construction uses these as the states of the
/// deterministic automaton it builds, two sets are considered the same state precisely
/// if they contain the same indices.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(OrderedSet<StateIndex>);

impl StateSet {
    /// Creates a set containing only `q`.
    pub fn singleton(q: StateIndex) -> Self {
        Self(OrderedSet::from_iter([q]))
    }

    /// Adds `q` to the set and returns `true` if it was not present before.
    pub fn insert(&mut self, q: StateIndex) -> bool {
        self.0.insert(q)
    }

    /// Returns `true` if `q` is an element of the set.
    pub fn contains(&self, q: StateIndex) -> bool {
        self.0.contains(&q)
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ StateIndex> + '_ {
        self.0.iter()
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every element of `self` is also an element of `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl Extend<StateIndex> for StateSet {
    fn extend<T: IntoIterator<Item = StateIndex>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateIndex>>(iter: T) -> Self {
        Self(OrderedSet::from_iter(iter))
    }
}

impl IntoIterator for StateSet {
    type IntoIter = std::collections::btree_set::IntoIter<StateIndex>;
    type Item = StateIndex;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type IntoIter = std::collections::btree_set::Iter<'a, StateIndex>;
    type Item = &'a StateIndex;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.iter().join(", "))
        }
    }
}

impl std::fmt::Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::StateSet;

    #[test]
    fn state_set_equality_ignores_insertion_order() {
        let left = StateSet::from_iter([2, 0, 1]);
        let mut right = StateSet::singleton(1);
        right.extend([0, 2, 2]);
        assert_eq!(left, right);
        assert_eq!(left.len(), 3);
        assert!(StateSet::singleton(0).is_subset(&left));
    }

    #[test]
    fn state_set_debug() {
        assert_eq!(format!("{:?}", StateSet::default()), "∅");
        assert_eq!(format!("{:?}", StateSet::from_iter([3, 1])), "{1, 3}");
    }
}
