//! Reading and writing automata in a plain textual format.
//!
//! The input consists of whitespace separated tokens:
//! ```text
//! <number of states> <number of transitions>
//! <source> <target> <symbol>      (once for every transition)
//! <initial state> <number of accepting states>
//! <accepting state>...
//! ```
//! The output lists one state per line, for example `Node 0 (initial): (a 1) (LAMBDA 2) `,
//! where epsilon transitions are written with the label [`EPSILON_LABEL`].
use std::{
    fmt,
    io::{Read, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{automaton::DEFAULT_EPSILON, Nfa, StateIndex, Symbol};

/// The label under which epsilon transitions are printed.
pub const EPSILON_LABEL: &str = "LAMBDA";

/// Abstracts the types of errors that can occur when parsing an [`Nfa`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("could not read automaton: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input, expected {0}")]
    MissingToken(&'static str),
    #[error("expected {what}, found `{token}`")]
    InvalidNumber { what: &'static str, token: String },
    #[error("transition symbol `{0}` is not a single character")]
    InvalidSymbol(String),
    #[error("{what} {index} does not exist, the automaton has {size} states")]
    StateOutOfRange {
        what: &'static str,
        index: usize,
        size: usize,
    },
}

struct Tokens<'a>(std::str::SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn token(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.0.next().ok_or(ParseError::MissingToken(what))
    }

    fn number(&mut self, what: &'static str) -> Result<usize, ParseError> {
        let token = self.token(what)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            what,
            token: token.to_string(),
        })
    }

    fn state(&mut self, what: &'static str, size: usize) -> Result<StateIndex, ParseError> {
        let index = self.number(what)?;
        if index >= size {
            return Err(ParseError::StateOutOfRange { what, index, size });
        }
        Ok(index)
    }

    fn symbol(&mut self) -> Result<Symbol, ParseError> {
        let token = self.token("transition symbol")?;
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Ok(symbol),
            _ => Err(ParseError::InvalidSymbol(token.to_string())),
        }
    }
}

/// Parses an automaton from `input`, `epsilon` is the symbol that marks epsilon transitions.
pub fn parse_str(input: &str, epsilon: Symbol) -> Result<Nfa, ParseError> {
    let mut tokens = Tokens(input.split_whitespace());

    let size = tokens.number("number of states")?;
    let transition_count = tokens.number("number of transitions")?;
    trace!("parsing automaton with {size} states and {transition_count} transitions");

    let mut nfa = Nfa::with_states(epsilon, size);
    for _ in 0..transition_count {
        let source = tokens.state("source state", size)?;
        let target = tokens.state("target state", size)?;
        let symbol = tokens.symbol()?;
        if !nfa.add_transition(source, symbol, target) {
            debug!("ignoring duplicate transition {source} --{symbol}--> {target}");
        }
    }

    let initial = tokens.state("initial state", size)?;
    nfa.set_initial(initial);

    let accepting_count = tokens.number("number of accepting states")?;
    for _ in 0..accepting_count {
        let q = tokens.state("accepting state", size)?;
        nfa.set_accepting(q, true);
    }
    Ok(nfa)
}

/// Reads `reader` to its end and parses the automaton it contains, see [`parse_str`].
pub fn parse<R: Read>(mut reader: R, epsilon: Symbol) -> Result<Nfa, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str(&input, epsilon)
}

/// Writes the textual representation of `nfa` to `writer`.
pub fn render<W: Write>(nfa: &Nfa, mut writer: W) -> std::io::Result<()> {
    write!(writer, "{nfa}")
}

impl FromStr for Nfa {
    type Err = ParseError;

    /// Parses an automaton that uses [`DEFAULT_EPSILON`] for epsilon transitions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s, DEFAULT_EPSILON)
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in self.state_indices() {
            write!(f, "Node {q}")?;
            if self.initial() == Some(q) {
                write!(f, " (initial)")?;
            }
            if self.is_accepting(q) {
                write!(f, " (final)")?;
            }
            write!(f, ": ")?;
            for (symbol, target) in self.transitions_from(q) {
                if self.is_epsilon(symbol) {
                    write!(f, "({EPSILON_LABEL} {target}) ")?;
                } else {
                    write!(f, "({symbol} {target}) ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    const INPUT: &str = "3 3
        0 1 *
        1 2 a
        1 2 a
        0 1
        2
    ";

    #[test_log::test]
    fn parse_description() {
        let nfa: Nfa = INPUT.parse().unwrap();
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.initial(), Some(0));
        assert_eq!(nfa.transition_count(), 2);
        assert!(nfa.is_accepting(2));
        assert!(!nfa.is_accepting(0));

        let expected = NfaBuilder::default()
            .with_transitions([(0, '*', 1), (1, 'a', 2)])
            .with_accepting([2])
            .into_nfa(0);
        assert_eq!(nfa, expected);
    }

    #[test_log::test]
    fn parse_from_reader_with_custom_epsilon() {
        let nfa = parse("2 2\n0 1 e\n1 1 *\n1 1\n0\n".as_bytes(), 'e').unwrap();
        assert_eq!(nfa.epsilon(), 'e');
        assert_eq!(nfa.epsilon_closure(0), StateSet::from_iter([0, 1]));
        assert_eq!(nfa.initial(), Some(1));
        assert!(nfa.is_accepting(0));
    }

    #[test_log::test]
    fn render_lines() {
        let nfa: Nfa = INPUT.parse().unwrap();
        assert_eq!(
            nfa.to_string(),
            "Node 0 (initial): (LAMBDA 1) \nNode 1: (a 2) \nNode 2 (final): \n"
        );

        let mut buffer = vec![];
        render(&nfa, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), nfa.to_string());
    }

    #[test_log::test]
    fn render_initial_and_final() {
        let nfa = NfaBuilder::default()
            .with_transitions([(0, 'b', 0), (0, 'a', 0)])
            .with_accepting([0])
            .into_nfa(0);
        assert_eq!(nfa.to_string(), "Node 0 (initial) (final): (b 0) (a 0) \n");
    }

    #[test_log::test]
    fn malformed_input() {
        assert!(matches!(
            "2".parse::<Nfa>(),
            Err(ParseError::MissingToken("number of transitions"))
        ));
        assert!(matches!(
            "2 1 0 x a".parse::<Nfa>(),
            Err(ParseError::InvalidNumber { what: "target state", .. })
        ));
        assert!(matches!(
            "2 1 0 1 ab 0 0".parse::<Nfa>(),
            Err(ParseError::InvalidSymbol(s)) if s == "ab"
        ));
        assert!(matches!(
            "2 1 0 2 a 0 0".parse::<Nfa>(),
            Err(ParseError::StateOutOfRange { index: 2, size: 2, .. })
        ));
        assert!(matches!(
            "2 0 0 1 5".parse::<Nfa>(),
            Err(ParseError::StateOutOfRange { what: "accepting state", .. })
        ));
        assert!(matches!(
            "2 0 0 2 1".parse::<Nfa>(),
            Err(ParseError::MissingToken("accepting state"))
        ));
    }
}
