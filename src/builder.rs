use crate::{automaton::DEFAULT_EPSILON, Nfa, StateIndex, Symbol};

/// Helper struct for the construction of automata. It collects transitions and accepting
/// states and creates just enough states to accommodate every index that is mentioned.
///
/// # Example
///
/// We want to create an automaton with three states 0, 1 and 2, where state 0 is initial and
/// state 2 is accepting. There should be an epsilon transition from 0 to 1 and two transitions
/// from 1 on symbol `'a'`, one to 1 and one to 2.
/// ```
/// use lambda_nfa::prelude::*;
///
/// let nfa = NfaBuilder::default()
///     .with_transitions([(0, '*', 1), (1, 'a', 1), (1, 'a', 2)])
///     .with_accepting([2])
///     .into_nfa(0); // 0 is the initial state
///
/// assert_eq!(nfa.size(), 3);
/// assert!(nfa.has_epsilon_transitions());
/// ```
#[derive(Debug, Clone)]
pub struct NfaBuilder {
    epsilon: Symbol,
    size: usize,
    transitions: Vec<(StateIndex, Symbol, StateIndex)>,
    accepting: Vec<StateIndex>,
}

impl Default for NfaBuilder {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            size: 0,
            transitions: vec![],
            accepting: vec![],
        }
    }
}

impl NfaBuilder {
    /// Sets the symbol that denotes epsilon, by default this is [`DEFAULT_EPSILON`].
    pub fn with_epsilon(mut self, epsilon: Symbol) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Ensures the automaton has at least `size` states, even if some of them are never
    /// mentioned in a transition.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = self.size.max(size);
        self
    }

    /// Adds a list of `(source, symbol, target)` transitions.
    pub fn with_transitions<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, Symbol, StateIndex)>,
    {
        self.transitions.extend(iter);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, iter: I) -> Self {
        self.accepting.extend(iter);
        self
    }

    /// Determines acceptance from a list of flags, which are assigned to the states in the
    /// order in which they are given.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(self, iter: I) -> Self {
        let colors: Vec<bool> = iter.into_iter().collect();
        let size = colors.len();
        self.with_accepting(
            colors
                .into_iter()
                .enumerate()
                .filter_map(|(q, accepting)| accepting.then_some(q)),
        )
        .with_size(size)
    }

    /// Builds the automaton with `initial` as its initial state.
    pub fn into_nfa(self, initial: StateIndex) -> Nfa {
        let size = self
            .transitions
            .iter()
            .flat_map(|&(p, _, q)| [p, q])
            .chain(self.accepting.iter().copied())
            .chain(std::iter::once(initial))
            .map(|q| q + 1)
            .fold(self.size, usize::max);

        let mut nfa = Nfa::with_states(self.epsilon, size);
        for (source, symbol, target) in self.transitions {
            nfa.add_transition(source, symbol, target);
        }
        for q in self.accepting {
            nfa.set_accepting(q, true);
        }
        nfa.set_initial(initial);
        nfa
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn size_covers_all_mentioned_states() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 'a', 1)])
            .with_accepting([4])
            .into_nfa(0);
        assert_eq!(nfa.size(), 5);
        assert!(nfa.is_accepting(4));
        assert_eq!(nfa.initial(), Some(0));

        assert_eq!(NfaBuilder::default().into_nfa(2).size(), 3);
        assert_eq!(NfaBuilder::default().with_size(7).into_nfa(0).size(), 7);
    }

    #[test]
    fn state_colors_in_order() {
        let nfa = NfaBuilder::default()
            .with_state_colors([false, true, false])
            .with_epsilon('#')
            .into_nfa(0);
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.epsilon(), '#');
        assert!(nfa.is_accepting(1));
        assert!(!nfa.is_accepting(2));
    }
}
