use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use super::{Nfa, State};
use crate::{math::StateSet, StateIndex};

impl Nfa {
    /// Computes the epsilon closure of `state`, which consists of all states that can be
    /// reached from `state` by taking zero or more epsilon transitions. In particular, the
    /// closure always contains `state` itself.
    ///
    /// # Panics
    /// If `state` does not exist.
    pub fn epsilon_closure(&self, state: StateIndex) -> StateSet {
        self.assert_exists(state);
        let closure = self.epsilon_closure_of([state]);
        trace!("epsilon closure of {state} is {closure:?}");
        closure
    }

    /// Computes the union of the epsilon closures of all given states.
    ///
    /// # Panics
    /// If one of the states does not exist.
    pub fn epsilon_closure_of<I: IntoIterator<Item = StateIndex>>(&self, states: I) -> StateSet {
        let mut visited = BitSet::with_capacity(self.size());
        let mut queue = VecDeque::new();
        for q in states {
            self.assert_exists(q);
            if visited.insert(q) {
                queue.push_back(q);
            }
        }

        while let Some(q) = queue.pop_front() {
            for p in self.states[q].targets(self.epsilon) {
                if visited.insert(p) {
                    queue.push_back(p);
                }
            }
        }
        visited.iter().collect()
    }

    /// Turns `self` into an equivalent automaton without epsilon transitions. The number of
    /// states, their indices and the initial state stay the same.
    ///
    /// Every state inherits the transitions on proper symbols of all states in its epsilon
    /// closure and becomes accepting if one of them is accepting. Only then are the epsilon
    /// transitions dropped. Calling this on an automaton without epsilon transitions leaves it
    /// unchanged.
    pub fn remove_epsilon_transitions(&mut self) {
        let epsilon = self.epsilon;
        // all closures have to be known before any epsilon transition is touched
        let closures: Vec<StateSet> = self
            .state_indices()
            .map(|q| self.epsilon_closure(q))
            .collect();

        let mut states: Vec<State> = self.states.clone();
        let mut added = 0usize;
        for (q, closure) in closures.iter().enumerate() {
            for &c in closure.iter().filter(|&&c| c != q) {
                let reached = &self.states[c];
                if reached.is_accepting() && !states[q].is_accepting() {
                    trace!("{q} becomes accepting as {c} is in its epsilon closure");
                    states[q].set_accepting(true);
                }
                for (symbol, target) in reached.transitions().filter(|(s, _)| *s != epsilon) {
                    if states[q].add_transition(symbol, target) {
                        trace!("adding transition {q} --{symbol}--> {target} inherited from {c}");
                        added += 1;
                    }
                }
            }
        }

        let mut removed = 0usize;
        for state in states.iter_mut() {
            if let Some(targets) = state.remove_transitions(epsilon) {
                removed += targets.len();
            }
        }

        debug!(
            "removed {removed} epsilon transitions and added {added} transitions in an automaton with {} states",
            states.len()
        );
        self.states = states;
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn chain() -> Nfa {
        NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, '*', 2), (2, 'b', 3), (1, 'a', 0), (3, '*', 3)])
            .with_accepting([2])
            .into_nfa(0)
    }

    #[test_log::test]
    fn closure_contains_origin() {
        let nfa = chain();
        for q in nfa.state_indices() {
            assert!(nfa.epsilon_closure(q).contains(q));
        }
        assert_eq!(nfa.epsilon_closure(2), StateSet::singleton(2));
        assert_eq!(nfa.epsilon_closure(3), StateSet::singleton(3));
        assert_eq!(nfa.epsilon_closure(0), StateSet::from_iter([0, 1, 2]));
        assert_eq!(nfa.epsilon_closure(1), StateSet::from_iter([1, 2]));
    }

    #[test_log::test]
    fn closure_terminates_on_cycles() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, '*', 2), (2, '*', 0), (2, 'a', 3)])
            .into_nfa(0);
        let expected = StateSet::from_iter([0, 1, 2]);
        for q in 0..3 {
            assert_eq!(nfa.epsilon_closure(q), expected);
        }
        assert_eq!(nfa.epsilon_closure_of([3, 1]), StateSet::from_iter([0, 1, 2, 3]));
    }

    #[test_log::test]
    fn closure_is_closed_under_epsilon_steps() {
        let nfa = NfaBuilder::default()
            .with_transitions([
                (0, '*', 3),
                (3, '*', 1),
                (1, 'a', 2),
                (2, '*', 4),
                (4, '*', 2),
                (3, 'b', 4),
            ])
            .into_nfa(0);
        for q in nfa.state_indices() {
            let closure = nfa.epsilon_closure(q);
            for &p in &closure {
                for r in nfa.targets(p, '*') {
                    assert!(closure.contains(r), "{r} missing in closure of {q}");
                }
                assert!(nfa.epsilon_closure(p).is_subset(&closure));
            }
        }
    }

    #[test_log::test]
    fn removal_inherits_transitions() {
        let mut nfa = NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, 'a', 2)])
            .with_accepting([2])
            .into_nfa(0);
        nfa.remove_epsilon_transitions();

        assert!(!nfa.has_epsilon_transitions());
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.initial(), Some(0));
        assert_eq!(nfa.transitions_from(0).collect::<Vec<_>>(), vec![('a', 2)]);
        assert_eq!(nfa.transitions_from(1).collect::<Vec<_>>(), vec![('a', 2)]);
        assert!(!nfa.is_accepting(0));
        assert!(!nfa.is_accepting(1));
        assert!(nfa.is_accepting(2));
    }

    #[test_log::test]
    fn removal_propagates_acceptance() {
        let original = chain();
        let mut nfa = original.clone();
        nfa.remove_epsilon_transitions();

        assert!(!nfa.has_epsilon_transitions());
        for q in nfa.state_indices() {
            let expected = original
                .epsilon_closure(q)
                .iter()
                .any(|&p| original.is_accepting(p));
            assert_eq!(nfa.is_accepting(q), expected, "state {q}");
        }
        assert!(nfa.is_accepting(0));
        assert!(nfa.is_accepting(1));
        assert!(!nfa.is_accepting(3));

        // 0 reaches 2 via two epsilon steps and thereby the b-transition to 3
        let from_zero: Vec<_> = nfa.transitions_from(0).collect();
        assert!(from_zero.contains(&('b', 3)));
        assert!(from_zero.contains(&('a', 0)));
        assert_eq!(from_zero.len(), 2);
        assert!(nfa.transitions_from(3).next().is_none());
    }

    #[test_log::test]
    fn removal_is_idempotent() {
        let mut nfa = chain();
        nfa.remove_epsilon_transitions();
        let once = nfa.clone();
        nfa.remove_epsilon_transitions();
        assert_eq!(nfa, once);
        assert_eq!(nfa.transition_count(), once.transition_count());
    }

    #[test_log::test]
    fn removal_without_transitions_is_noop() {
        let mut nfa = NfaBuilder::default()
            .with_accepting([0])
            .into_nfa(0);
        let before = nfa.clone();
        nfa.remove_epsilon_transitions();
        assert_eq!(nfa, before);
    }

    #[test_log::test]
    fn custom_epsilon_symbol() {
        let mut nfa = NfaBuilder::default()
            .with_epsilon('e')
            .with_transitions([(0, 'e', 1), (1, '*', 2)])
            .into_nfa(0);
        assert_eq!(nfa.epsilon_closure(0), StateSet::from_iter([0, 1]));
        nfa.remove_epsilon_transitions();
        assert_eq!(nfa.transitions_from(0).collect::<Vec<_>>(), vec![('*', 2)]);
    }
}
