//! Alternative renderings of an [`Nfa`], as a transition table and in the graphviz DOT format.
use itertools::Itertools;

use crate::{text::EPSILON_LABEL, Nfa, StateIndex, Symbol};

fn column_label(nfa: &Nfa, symbol: Symbol) -> String {
    if nfa.is_epsilon(symbol) {
        EPSILON_LABEL.to_string()
    } else {
        symbol.to_string()
    }
}

/// Builds a table with one row per state and one column per symbol, the epsilon column comes
/// last. Initial states are prefixed with `→`, accepting states are followed by `*`. Each cell
/// holds the targets on the respective symbol, or `-` if there are none.
pub fn transition_table(nfa: &Nfa) -> String {
    let mut symbols: Vec<Symbol> = nfa.alphabet().into_iter().collect();
    if nfa.has_epsilon_transitions() {
        symbols.push(nfa.epsilon());
    }

    let mut builder = tabled::builder::Builder::default();
    builder.push_record(
        std::iter::once("State".to_string()).chain(symbols.iter().map(|&s| column_label(nfa, s))),
    );
    for q in nfa.state_indices() {
        let mut row = vec![format!(
            "{}{}{}",
            if nfa.initial() == Some(q) { "→ " } else { "" },
            q,
            if nfa.is_accepting(q) { " *" } else { "" }
        )];
        for &symbol in &symbols {
            let targets: Vec<StateIndex> = nfa.targets(q, symbol).collect();
            row.push(match targets.as_slice() {
                [] => "-".to_string(),
                [single] => single.to_string(),
                many => format!("{{{}}}", many.iter().join(", ")),
            });
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}

/// Compute the graphviz representation, for more information on the DOT format,
/// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
/// Accepting states are drawn as double circles and epsilon transitions are labeled `ε`.
pub fn dot(nfa: &Nfa) -> String {
    let header = [
        "digraph A {".to_string(),
        "rankdir=LR".to_string(),
        "init [label=\"\", shape=none]".to_string(),
    ];

    let states = nfa.state_indices().map(|q| {
        let shape = if nfa.is_accepting(q) {
            "doublecircle"
        } else {
            "circle"
        };
        format!("q{q} [label=\"{q}\", shape={shape}]")
    });

    let initial = nfa.initial().map(|q| format!("init -> q{q}"));

    let transitions = nfa.state_indices().flat_map(move |q| {
        nfa.transitions_from(q).map(move |(symbol, target)| {
            let label = if nfa.is_epsilon(symbol) {
                "ε".to_string()
            } else {
                symbol.escape_default().to_string()
            };
            format!("q{q} -> q{target} [label=\"{label}\"]")
        })
    });

    header
        .into_iter()
        .chain(states)
        .chain(initial)
        .chain(transitions)
        .chain(std::iter::once("}".to_string()))
        .join("\n")
}
