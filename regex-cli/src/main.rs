use std::io::Read;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use subset_regex::{Config, Graph, MatchKind, Regex, DFA, NFA};

/// Compile a pattern to an NFA and DFA, and print every match in a text.
///
/// Matches are printed one per line as the byte offset of the match, a tab,
/// and the matched text.
#[derive(Parser, Debug)]
#[command(name = "subset-regex")]
struct Args {
    /// The pattern. Supports literals, `|`, `*`, `+` and parentheses.
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// The text to search. Read from stdin when omitted.
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Match letters in either case.
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Only report matches surrounded by whitespace or the edges of the text.
    #[arg(short = 'w', long)]
    whole_word: bool,

    /// Simulate the NFA instead of running the DFA.
    #[arg(long)]
    nfa: bool,

    /// Stop growing the DFA after this many states.
    #[arg(long, value_name = "STATES")]
    dfa_size_limit: Option<usize>,

    /// Print a compilation stage instead of searching.
    #[arg(long, value_enum, value_name = "STAGE")]
    dump: Option<Stage>,

    /// Print an automaton as a Graphviz graph instead of searching.
    #[arg(long, value_enum, value_name = "AUTOMATON")]
    dot: Option<Automaton>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Stage {
    Postfix,
    Nfa,
    Dfa,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Automaton {
    Nfa,
    Dfa,
}

impl Args {
    fn config(&self) -> Config {
        let kind = if self.nfa { MatchKind::Nfa } else { MatchKind::Dfa };
        Config::new()
            .case_insensitive(self.ignore_case)
            .whole_word(self.whole_word)
            .match_kind(kind)
            .dfa_size_limit(self.dfa_size_limit)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let re = match Regex::builder().configure(args.config()).build(&args.pattern) {
        Ok(re) => re,
        Err(err) => {
            eprintln!("invalid pattern: {}", err);
            std::process::exit(2);
        }
    };

    if let Some(stage) = args.dump {
        match stage {
            Stage::Postfix => println!("{}", re.postfix()),
            Stage::Nfa => print_nfa(re.nfa()),
            Stage::Dfa => print_dfa(re.dfa()),
        }
        return Ok(());
    }
    if let Some(which) = args.dot {
        let graph = match which {
            Automaton::Nfa => Graph::from_nfa(re.nfa()),
            Automaton::Dfa => Graph::from_dfa(re.dfa()),
        };
        print!("{}", graph.to_dot());
        return Ok(());
    }

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            text
        }
    };
    for m in re.find_all(&text) {
        println!("{}\t{}", m.start(), m.as_str());
    }
    Ok(())
}

fn print_nfa(nfa: &NFA) {
    println!("Start state: {}", nfa.start());
    println!("States:");
    for (id, state) in nfa.states().iter().enumerate() {
        let marker = if state.is_accepting() { " (accepting)" } else { "" };
        println!("  {}{}:", id, marker);
        for (ch, targets) in state.transitions() {
            println!("    {:?} -> {:?}", ch, targets);
        }
        if !state.epsilons().is_empty() {
            println!("    ε -> {:?}", state.epsilons());
        }
    }
}

fn print_dfa(dfa: &DFA) {
    println!("Start state: {}", dfa.start());
    println!("States:");
    for (id, state) in dfa.states().iter().enumerate() {
        let marker = if state.is_accepting() { " (accepting)" } else { "" };
        println!("  {} {{{}}}{}:", id, state.key_string(), marker);
        for (ch, target) in state.transitions() {
            println!("    {:?} -> {}", ch, target);
        }
    }
}
