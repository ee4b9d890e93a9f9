/*!
A small regular expression engine built from textbook parts.

A pattern is compiled in four steps:

1. [`syntax::insert_concat`] makes concatenation explicit: `ab*` becomes
   `a.b*`.
2. [`syntax::to_postfix`] reorders the tokens into postfix with the
   shunting-yard algorithm: `a.b*` becomes `ab*.`.
3. [`Compiler`] builds a Thompson NFA from the postfix tokens.
4. [`DFA::from_nfa`] turns the NFA into a DFA with the subset construction.

Searching runs the DFA (or simulates the NFA) from every position of the
text, then keeps the leftmost, and among those the longest, of any
overlapping matches.

# Syntax

Only a handful of constructs are supported:

* Any character other than `(`, `)`, `|`, `*` and `+` matches itself.
* `xy` matches `x` followed by `y`.
* `x|y` matches `x` or `y`.
* `x*` matches `x` zero or more times, `x+` one or more times.
* `(x)` groups.

There is no escaping, so the operator characters can never be matched
literally. There are no character classes, anchors or counted repetitions.

# Example

```
use subset_regex::Regex;

let re = Regex::builder().case_insensitive(true).build("a*b")?;
let found: Vec<(usize, &str)> =
    re.find_all("AaB b").iter().map(|m| (m.start(), m.as_str())).collect();
assert_eq!(vec![(0, "AaB"), (4, "b")], found);
# Ok::<(), subset_regex::CompileError>(())
```

# Crate features

* **std** - Enabled by default. Currently required.
* **logging** - Emits `log` messages while compiling and searching.
* **serde** - Derives `Serialize` for the [`graph`] export types.
*/

#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod macros;

pub mod case;
pub mod compiler;
pub mod config;
pub mod dfa;
mod engine;
pub mod error;
pub mod graph;
pub mod nfa;
mod regex;
pub mod search;
pub mod syntax;

pub use crate::{
    compiler::Compiler,
    config::{Config, MatchKind, SearchConfig},
    dfa::DFA,
    engine::Engine,
    error::{CompileError, CompileResult, ErrorKind},
    graph::Graph,
    nfa::{Fragment, NFA},
    regex::{Builder, Regex},
    search::Match,
};
