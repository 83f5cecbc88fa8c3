use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{Nfa, State};
use crate::{
    math::{Map, OrderedMap, StateSet},
    StateIndex, Symbol,
};

impl Nfa {
    /// Computes the set of states that can be reached from some state in `set` with a single
    /// transition on `symbol`.
    pub fn successors(&self, set: &StateSet, symbol: Symbol) -> StateSet {
        set.iter()
            .flat_map(|&q| self.targets(q, symbol))
            .collect()
    }

    /// For every symbol that labels a transition leaving a state of `set`, collects the set of
    /// states reached on it. Symbols are produced in ascending order.
    fn successor_sets(&self, set: &StateSet) -> OrderedMap<Symbol, StateSet> {
        let mut successors: OrderedMap<Symbol, StateSet> = OrderedMap::new();
        for &q in set {
            for (symbol, target) in self.states[q].transitions() {
                successors.entry(symbol).or_default().insert(target);
            }
        }
        successors
    }

    /// Replaces `self` by an equivalent deterministic automaton using the subset construction.
    /// The returned vector associates each state of the result with the set of states of the
    /// original automaton it represents.
    ///
    /// The construction begins with one state for every singleton `{q}`, which keeps the index
    /// `q`. Afterwards, sets of states are explored in breadth-first order and every set that
    /// is produced as the successor of an existing one on some symbol becomes a new state. A set
    /// is accepting if one of its elements is. The initial state of the result is the one for
    /// the singleton of the original initial state. Singletons that cannot be reached from it
    /// are kept and sets of states that are never produced as a successor are never created.
    /// No sink state is added, so the result can lack transitions for some symbols.
    ///
    /// Epsilon transitions must have been removed with [`Nfa::remove_epsilon_transitions`]
    /// before, otherwise the epsilon symbol is treated like any other symbol.
    pub fn to_dfa(&mut self) -> Vec<StateSet> {
        if self.has_epsilon_transitions() {
            debug!("determinizing an automaton with epsilon transitions, the result is not equivalent");
        }

        let mut subsets: Vec<StateSet> = Vec::with_capacity(self.size());
        let mut indices: Map<StateSet, StateIndex> = Map::default();
        let mut states: Vec<State> = Vec::with_capacity(self.size());
        let mut queue = VecDeque::with_capacity(self.size());

        for (q, state) in self.states.iter().enumerate() {
            let singleton = StateSet::singleton(q);
            indices.insert(singleton.clone(), q);
            subsets.push(singleton);
            states.push(State::new(state.is_accepting()));
            queue.push_back(q);
        }

        while let Some(source) = queue.pop_front() {
            for (symbol, set) in self.successor_sets(&subsets[source]) {
                let target = match indices.get(&set) {
                    Some(&existing) => existing,
                    None => {
                        let id = states.len();
                        let accepting = set.iter().any(|&q| self.states[q].is_accepting());
                        trace!("discovered {set:?} as state {id}, accepting: {accepting}");
                        states.push(State::new(accepting));
                        indices.insert(set.clone(), id);
                        subsets.push(set);
                        queue.push_back(id);
                        id
                    }
                };
                trace!("adding transition {source} --{symbol}--> {target}");
                states[source].add_transition(symbol, target);
            }
        }

        let initial = self
            .initial
            .and_then(|q| indices.get(&StateSet::singleton(q)).copied());
        debug!(
            "subset construction turned {} states into {}",
            self.states.len(),
            states.len()
        );
        self.states = states;
        self.initial = initial;
        subsets
    }
}
