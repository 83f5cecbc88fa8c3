//! Library for turning nondeterministic finite automata with epsilon (lambda) transitions
//! into deterministic ones.
//!
//! An automaton ([`Nfa`]) is a list of states, each identified by its position in that list.
//! Every state knows whether it is accepting and stores, for each symbol, the set of states it can
//! move to. One symbol is reserved to denote epsilon, i.e. a transition that can be taken without
//! reading anything. By default this is `'*'`, see [`DEFAULT_EPSILON`].
//!
//! The conversion happens in two steps that operate on the automaton in place:
//! - [`Nfa::remove_epsilon_transitions`] eliminates all epsilon transitions by propagating the
//!   transitions and acceptance of every state's [epsilon closure](Nfa::epsilon_closure) back to the
//!   state itself.
//! - [`Nfa::to_dfa`] performs the subset construction, afterwards every state has at most one
//!   successor per symbol. The resulting automaton may be partial, no sink state is added.
//!
//! Automata are read from and written to a simple textual format, see the [`text`] module. The
//! [`display`] module contains alternative renderings as a transition table or in the DOT format.
//!
//! ```
//! use lambda_nfa::prelude::*;
//!
//! let mut nfa = NfaBuilder::default()
//!     .with_transitions([(0, '*', 1), (1, 'a', 2), (1, 'a', 1)])
//!     .with_accepting([2])
//!     .into_nfa(0);
//!
//! nfa.remove_epsilon_transitions();
//! assert!(!nfa.has_epsilon_transitions());
//!
//! nfa.to_dfa();
//! assert!(nfa.is_deterministic());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use lambda_nfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Nfa, State, DEFAULT_EPSILON},
        builder::NfaBuilder,
        display,
        math::{self, StateSet},
        text::{self, ParseError},
        StateIndex, Symbol,
    };
}

/// Contains type aliases for the collections used throughout the crate as well as [`StateSet`].
pub mod math;
pub use math::StateSet;

/// Defines the [`Nfa`] together with epsilon elimination and the subset construction.
pub mod automaton;
pub use automaton::{Nfa, DEFAULT_EPSILON};

mod builder;
pub use builder::NfaBuilder;

pub mod text;

pub mod display;

/// States are identified by their position in the list of states of an automaton.
pub type StateIndex = usize;

/// Transitions are labeled with single characters, one of which is reserved for epsilon.
pub type Symbol = char;
