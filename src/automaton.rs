use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::trace;

use crate::{math::OrderedSet, StateIndex, Symbol};

mod state;
pub use state::State;

mod epsilon;

mod subset;

/// The symbol that denotes epsilon if nothing else is specified.
pub const DEFAULT_EPSILON: Symbol = '*';

/// A nondeterministic finite automaton whose transitions may be labeled with epsilon.
///
/// States are stored in a vector and identified by their position in it, so the indices are
/// always `0..self.size()`. One symbol is reserved for epsilon, it is fixed when the automaton
/// is created and can be queried through [`Nfa::epsilon`].
///
/// An automaton obtained from [`crate::text::parse`] or [`crate::NfaBuilder`] can be made free of
/// epsilon transitions with [`Nfa::remove_epsilon_transitions`] and subsequently determinized
/// with [`Nfa::to_dfa`]. These two steps have to happen in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,
    initial: Option<StateIndex>,
    epsilon: Symbol,
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl Nfa {
    /// Creates an empty automaton that uses `epsilon` as the symbol for epsilon transitions.
    pub fn new(epsilon: Symbol) -> Self {
        Self {
            states: vec![],
            initial: None,
            epsilon,
        }
    }

    /// Creates an automaton with `size` states, none of which is accepting and none of which
    /// has outgoing transitions.
    pub fn with_states(epsilon: Symbol, size: usize) -> Self {
        Self {
            states: vec![State::default(); size],
            initial: None,
            epsilon,
        }
    }

    /// Returns the symbol that is used for epsilon transitions.
    pub fn epsilon(&self) -> Symbol {
        self.epsilon
    }

    /// Returns `true` if `symbol` denotes epsilon in this automaton.
    pub fn is_epsilon(&self, symbol: Symbol) -> bool {
        symbol == self.epsilon
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the automaton has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over all state indices in ascending order.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.states.len()
    }

    /// Gives the designated initial state, if one was set.
    pub fn initial(&self) -> Option<StateIndex> {
        self.initial
    }

    /// Makes `state` the initial state. Panics if `state` does not exist.
    pub fn set_initial(&mut self, state: StateIndex) {
        self.assert_exists(state);
        self.initial = Some(state);
    }

    /// Returns the state with index `state` if it exists.
    pub fn state(&self, state: StateIndex) -> Option<&State> {
        self.states.get(state)
    }

    /// All states, positioned according to their index.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Appends a new state without outgoing transitions and returns its index.
    pub fn add_state(&mut self, accepting: bool) -> StateIndex {
        let id = self.states.len();
        self.states.push(State::new(accepting));
        id
    }

    /// Returns `true` if `state` exists and is accepting.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.states.get(state).is_some_and(State::is_accepting)
    }

    /// Marks `state` as accepting or rejecting. Panics if `state` does not exist.
    pub fn set_accepting(&mut self, state: StateIndex, accepting: bool) {
        self.assert_exists(state);
        self.states[state].set_accepting(accepting);
    }

    /// Adds a transition from `source` to `target` on `symbol` and returns `true` if it did
    /// not exist before. Adding the same transition twice has no effect. Panics if either
    /// `source` or `target` does not exist.
    pub fn add_transition(&mut self, source: StateIndex, symbol: Symbol, target: StateIndex) -> bool {
        self.assert_exists(source);
        self.assert_exists(target);
        self.states[source].add_transition(symbol, target)
    }

    /// Iterates over the outgoing transitions of `state` as `(symbol, target)` pairs. They are
    /// grouped by symbol, symbols and targets each appear in the order in which they were added.
    /// The iterator is empty if `state` does not exist.
    pub fn transitions_from(
        &self,
        state: StateIndex,
    ) -> impl Iterator<Item = (Symbol, StateIndex)> + '_ {
        self.states.get(state).into_iter().flat_map(|q| q.transitions())
    }

    /// Returns the targets of all transitions leaving `state` on `symbol`.
    pub fn targets(&self, state: StateIndex, symbol: Symbol) -> impl Iterator<Item = StateIndex> + '_ {
        self.states
            .get(state)
            .into_iter()
            .flat_map(move |q| q.targets(symbol))
    }

    /// The number of transitions in the automaton.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(State::transition_count).sum()
    }

    /// Collects all symbols, except for epsilon, that label at least one transition.
    pub fn alphabet(&self) -> OrderedSet<Symbol> {
        self.states
            .iter()
            .flat_map(|q| q.symbols())
            .filter(|&symbol| !self.is_epsilon(symbol))
            .collect()
    }

    /// Returns `true` if any state has an outgoing epsilon transition.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.states
            .iter()
            .any(|q| q.targets(self.epsilon).next().is_some())
    }

    /// Returns true if the automaton is deterministic, meaning there are no epsilon transitions
    /// and no state has two transitions on the same symbol. Missing transitions are allowed.
    pub fn is_deterministic(&self) -> bool {
        for (idx, state) in self.states.iter().enumerate() {
            for symbol in state.symbols() {
                if self.is_epsilon(symbol) {
                    trace!("found epsilon transition from {idx}");
                    return false;
                }
                if state.targets(symbol).nth(1).is_some() {
                    trace!("found multiple transitions from {idx} on {symbol}");
                    return false;
                }
            }
        }
        true
    }

    /// Computes the states that can be reached from the initial state, following transitions
    /// on any symbol including epsilon. Indices are returned in the order they are discovered
    /// by a breadth-first search. If there is no initial state, nothing is reachable.
    pub fn reachable_state_indices(&self) -> Vec<StateIndex> {
        let Some(initial) = self.initial else {
            return vec![];
        };
        let mut seen = BitSet::with_capacity(self.size());
        let mut queue = VecDeque::from([initial]);
        let mut reachable = vec![];
        seen.insert(initial);

        while let Some(q) = queue.pop_front() {
            reachable.push(q);
            for (_, p) in self.states[q].transitions() {
                if seen.insert(p) {
                    queue.push_back(p);
                }
            }
        }
        reachable
    }

    fn assert_exists(&self, state: StateIndex) {
        if state >= self.states.len() {
            panic!(
                "Index {state} is out of bounds, there are only {} states",
                self.states.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn duplicate_transitions_are_stored_once() {
        let mut nfa = Nfa::with_states(DEFAULT_EPSILON, 2);
        assert!(nfa.add_transition(0, 'a', 1));
        assert!(nfa.add_transition(0, 'a', 0));
        assert!(!nfa.add_transition(0, 'a', 1));
        assert!(nfa.add_transition(0, 'b', 1));

        assert_eq!(nfa.transition_count(), 3);
        assert_eq!(
            nfa.transitions_from(0).collect::<Vec<_>>(),
            vec![('a', 1), ('a', 0), ('b', 1)]
        );
        assert_eq!(nfa.targets(0, 'a').collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(nfa.transitions_from(5).count(), 0);
    }

    #[test_log::test]
    fn determinism_and_alphabet() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'b', 0), (1, 'a', 1)])
            .into_nfa(0);
        assert!(nfa.is_deterministic());
        assert!(!nfa.has_epsilon_transitions());
        assert_eq!(nfa.alphabet().into_iter().collect::<String>(), "ab");

        let nfa = NfaBuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'a', 0)])
            .into_nfa(0);
        assert!(!nfa.is_deterministic());

        let nfa = NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, 'a', 0)])
            .into_nfa(0);
        assert!(nfa.has_epsilon_transitions());
        assert!(!nfa.is_deterministic());
        assert_eq!(nfa.alphabet().len(), 1);
    }

    #[test_log::test]
    fn reachability_follows_all_symbols() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, 'a', 2), (3, 'a', 0)])
            .into_nfa(0);
        assert_eq!(nfa.reachable_state_indices(), vec![0, 1, 2]);
        assert!(Nfa::default().reachable_state_indices().is_empty());
    }

    #[test]
    #[should_panic]
    fn transition_to_missing_state_panics() {
        let mut nfa = Nfa::with_states('*', 1);
        nfa.add_transition(0, 'a', 1);
    }

    #[test]
    #[should_panic]
    fn initial_must_exist() {
        Nfa::default().set_initial(0);
    }
}
