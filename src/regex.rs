use crate::{
    case,
    compiler::Compiler,
    config::{Config, MatchKind, SearchConfig},
    dfa::DFA,
    error::CompileResult,
    nfa::NFA,
    search::{self, Match},
    syntax::{self, Token, Tokens},
};

/// A compiled regular expression.
///
/// A `Regex` keeps every stage of compilation around: the postfix token
/// stream, the Thompson NFA and the DFA built from it. Searches use the DFA
/// unless configured otherwise.
///
/// # Example
///
/// ```
/// use subset_regex::Regex;
///
/// let re = Regex::new("(a|b)*a")?;
/// let found: Vec<(usize, &str)> = re
///     .find_all("abba bab")
///     .iter()
///     .map(|m| (m.start(), m.as_str()))
///     .collect();
/// assert_eq!(vec![(0, "abba"), (5, "ba")], found);
/// # Ok::<(), subset_regex::CompileError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    config: Config,
    postfix: Vec<Token>,
    nfa: NFA,
    dfa: DFA,
}

impl Regex {
    /// Compiles `pattern` with the default configuration.
    ///
    /// # Errors
    ///
    /// This returns an error if `pattern` is malformed, e.g., it has
    /// unbalanced parentheses or an operator without an operand.
    pub fn new(pattern: &str) -> CompileResult<Regex> {
        Builder::new().build(pattern)
    }

    /// Returns a builder for configuring compilation.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The pattern this regex was compiled from, before any rewriting.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The configuration this regex was compiled with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pattern in postfix order, after case folding if it was enabled.
    pub fn postfix(&self) -> Tokens<'_> {
        Tokens(&self.postfix)
    }

    /// The Thompson NFA.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }

    /// The DFA built from the NFA.
    pub fn dfa(&self) -> &DFA {
        &self.dfa
    }

    /// Finds all non-overlapping matches in `haystack`.
    ///
    /// When several matches overlap, the one starting first wins, and among
    /// matches starting at the same position the longest wins. Empty
    /// matches are never reported.
    pub fn find_all<'h>(&self, haystack: &'h str) -> Vec<Match<'h>> {
        self.find_all_with(haystack, &SearchConfig::new())
    }

    /// Like [`Regex::find_all`], but with per search overrides of the
    /// compiled configuration.
    pub fn find_all_with<'h>(
        &self,
        haystack: &'h str,
        opts: &SearchConfig,
    ) -> Vec<Match<'h>> {
        let whole_word = opts.resolve_whole_word(&self.config);
        match opts.resolve_match_kind(&self.config) {
            MatchKind::Dfa => search::find_all(&self.dfa, haystack, whole_word),
            MatchKind::Nfa => search::find_all(&self.nfa, haystack, whole_word),
        }
    }

    /// Returns true if all of `haystack` matches, from start to finish.
    pub fn is_match_exact(&self, haystack: &str) -> bool {
        search::is_match_exact(&self.dfa, haystack)
    }
}

/// A builder for a [`Regex`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Returns a builder with the default configuration.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Apply the given configuration on top of this builder's
    /// configuration. Only options set in `config` take effect.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.overwrite(config);
        self
    }

    /// See [`Config::case_insensitive`].
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Builder {
        self.configure(Config::new().case_insensitive(yes))
    }

    /// See [`Config::whole_word`].
    pub fn whole_word(&mut self, yes: bool) -> &mut Builder {
        self.configure(Config::new().whole_word(yes))
    }

    /// See [`Config::match_kind`].
    pub fn match_kind(&mut self, kind: MatchKind) -> &mut Builder {
        self.configure(Config::new().match_kind(kind))
    }

    /// See [`Config::dfa_size_limit`].
    pub fn dfa_size_limit(&mut self, limit: Option<usize>) -> &mut Builder {
        self.configure(Config::new().dfa_size_limit(limit))
    }

    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// This returns an error if `pattern` is malformed, or if the DFA would
    /// exceed a configured size limit.
    pub fn build(&self, pattern: &str) -> CompileResult<Regex> {
        let config = self.config.clone();
        let folded;
        let source = if config.get_case_insensitive() {
            folded = case::fold_case(pattern);
            folded.as_str()
        } else {
            pattern
        };
        let postfix = syntax::parse(source)?;
        debug!("compiling {:?}, postfix {:?}", pattern, Tokens(&postfix).to_string());
        let nfa = Compiler::new().compile(&postfix)?;
        let dfa = DFA::from_nfa(&nfa, config.get_dfa_size_limit())?;
        Ok(Regex { pattern: pattern.to_string(), config, postfix, nfa, dfa })
    }
}
