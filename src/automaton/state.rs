use crate::{
    math::{IndexedMap, IndexedSet},
    StateIndex, Symbol,
};

/// A single state of an [`super::Nfa`]. It stores whether it is accepting and, for every
/// symbol, the set of states that can be reached on it. As the targets form a set, a
/// transition is never stored twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    accepting: bool,
    transitions: IndexedMap<Symbol, IndexedSet<StateIndex>>,
}

impl State {
    /// Creates a state without outgoing transitions.
    pub fn new(accepting: bool) -> Self {
        Self {
            accepting,
            transitions: IndexedMap::default(),
        }
    }

    /// Returns `true` if the state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Iterates over all outgoing transitions as `(symbol, target)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, StateIndex)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&symbol, targets)| targets.iter().map(move |&target| (symbol, target)))
    }

    /// Iterates over the targets of transitions on `symbol`.
    pub fn targets(&self, symbol: Symbol) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions
            .get(&symbol)
            .into_iter()
            .flat_map(|targets| targets.iter().copied())
    }

    /// Iterates over the symbols for which at least one transition exists.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.transitions.keys().copied()
    }

    /// The number of outgoing transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|targets| targets.len()).sum()
    }

    pub(crate) fn add_transition(&mut self, symbol: Symbol, target: StateIndex) -> bool {
        self.transitions.entry(symbol).or_default().insert(target)
    }

    /// Removes every transition on `symbol`, returning the targets if there were any.
    pub(crate) fn remove_transitions(&mut self, symbol: Symbol) -> Option<IndexedSet<StateIndex>> {
        self.transitions.shift_remove(&symbol)
    }
}
