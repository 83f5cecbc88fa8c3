use std::{
    fs::File,
    io::{self, BufReader, Write},
    process::ExitCode,
};

use lambda_nfa::prelude::*;

use thiserror::Error;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

#[derive(Debug, Error)]
enum DriverError {
    #[error("could not open `{path}`: {source}")]
    Open { path: String, source: io::Error },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("could not write output: {0}")]
    Write(#[from] io::Error),
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Plain,
    Table,
    Dot,
}

impl Format {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("format").map(|f| f.as_str()) {
            Some("table") => Format::Table,
            Some("dot") => Format::Dot,
            _ => Format::Plain,
        }
    }

    fn render(self, nfa: &Nfa) -> String {
        match self {
            Format::Plain => nfa.to_string(),
            Format::Table => display::transition_table(nfa) + "\n",
            Format::Dot => display::dot(nfa) + "\n",
        }
    }
}

fn cli() -> clap::Command {
    Command::new("nfa2dfa")
    .about("Reads a lambda-NFA, removes its epsilon transitions and determinizes it, printing every stage")
    .arg(
        Arg::new("input")
        .value_name("FILE")
        .default_value("data.txt")
        .help("file containing the automaton, `-` reads from stdin")
    )
    .arg(
        Arg::new("epsilon")
        .short('e')
        .long("epsilon")
        .value_parser(value_parser!(char))
        .default_value("*")
        .help("symbol that marks epsilon transitions")
    )
    .arg(
        Arg::new("format")
        .short('f')
        .long("format")
        .value_parser(["plain", "table", "dot"])
        .default_value("plain")
    )
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_automaton(path: &str, epsilon: Symbol) -> Result<Nfa, DriverError> {
    if path == "-" {
        debug!("reading automaton from stdin");
        return Ok(text::parse(io::stdin().lock(), epsilon)?);
    }
    debug!("reading automaton from {path}");
    let file = File::open(path).map_err(|source| DriverError::Open {
        path: path.to_string(),
        source,
    })?;
    Ok(text::parse(BufReader::new(file), epsilon)?)
}

fn run(matches: &ArgMatches) -> Result<(), DriverError> {
    let path = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("data.txt");
    let epsilon = matches
        .get_one::<char>("epsilon")
        .copied()
        .unwrap_or(DEFAULT_EPSILON);
    let format = Format::from_matches(matches);

    let mut nfa = read_automaton(path, epsilon)?;
    info!(
        "read automaton with {} states and {} transitions",
        nfa.size(),
        nfa.transition_count()
    );

    let mut out = io::stdout().lock();
    writeln!(out, "LAMBDA-NFA:")?;
    writeln!(out, "{}", format.render(&nfa))?;

    let start = std::time::Instant::now();
    nfa.remove_epsilon_transitions();
    info!(
        "epsilon removal took {}µs",
        start.elapsed().as_micros()
    );
    writeln!(out, "NFA:")?;
    writeln!(out, "{}", format.render(&nfa))?;

    let start = std::time::Instant::now();
    let subsets = nfa.to_dfa();
    info!(
        "subset construction took {}µs and produced {} states",
        start.elapsed().as_micros(),
        subsets.len()
    );
    for (q, set) in subsets.iter().enumerate() {
        debug!("state {q} represents {set}");
    }
    writeln!(out, "DFA: ")?;
    writeln!(out, "{}", format.render(&nfa))?;
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
