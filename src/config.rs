/// The automaton used to run a search.
///
/// Both kinds always report the same matches. They differ only in how the
/// work is split between compile time and search time.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MatchKind {
    /// Run the DFA produced by the subset construction.
    #[default]
    Dfa,
    /// Simulate the Thompson NFA directly, tracking the set of active
    /// states.
    Nfa,
}

/// The configuration used to compile a pattern.
///
/// Every option is unset by default. An unset option resolves to its
/// default via the corresponding `get_*` method. This makes it possible to
/// layer one configuration on top of another with [`Config::overwrite`].
#[derive(Clone, Debug, Default)]
pub struct Config {
    case_insensitive: Option<bool>,
    whole_word: Option<bool>,
    match_kind: Option<MatchKind>,
    dfa_size_limit: Option<Option<usize>>,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Whether letters in the pattern match both their upper and lower case
    /// forms.
    ///
    /// This is implemented by rewriting the pattern before it is compiled.
    /// Each letter with distinct simple case mappings, e.g. `a`, is replaced
    /// by the group `(a|A)`. Letters whose case mappings expand to more than
    /// one character, e.g. `ß`, are left alone.
    ///
    /// This is disabled by default.
    pub fn case_insensitive(mut self, yes: bool) -> Config {
        self.case_insensitive = Some(yes);
        self
    }

    /// Whether searches only report matches bounded by whitespace or by the
    /// edges of the text.
    ///
    /// This is applied after overlapping matches have been resolved, so a
    /// match that is dropped by this filter does not make room for a shorter
    /// overlapping match.
    ///
    /// This is disabled by default. It can be overridden per search with
    /// [`SearchConfig::whole_word`].
    pub fn whole_word(mut self, yes: bool) -> Config {
        self.whole_word = Some(yes);
        self
    }

    /// Set the automaton used for searches.
    ///
    /// The default is [`MatchKind::Dfa`].
    pub fn match_kind(mut self, kind: MatchKind) -> Config {
        self.match_kind = Some(kind);
        self
    }

    /// Set a limit on the number of DFA states the subset construction may
    /// create.
    ///
    /// The subset construction can produce a number of states exponential in
    /// the size of the NFA. When a limit is set and would be exceeded,
    /// compilation fails with [`ErrorKind::TooBig`](crate::ErrorKind::TooBig).
    ///
    /// There is no limit by default.
    pub fn dfa_size_limit(mut self, limit: Option<usize>) -> Config {
        self.dfa_size_limit = Some(limit);
        self
    }

    /// Returns whether case insensitive matching is enabled.
    pub fn get_case_insensitive(&self) -> bool {
        self.case_insensitive.unwrap_or(false)
    }

    /// Returns whether whole word filtering is enabled.
    pub fn get_whole_word(&self) -> bool {
        self.whole_word.unwrap_or(false)
    }

    /// Returns the automaton used for searches.
    pub fn get_match_kind(&self) -> MatchKind {
        self.match_kind.unwrap_or_default()
    }

    /// Returns the DFA size limit, if one is set.
    pub fn get_dfa_size_limit(&self) -> Option<usize> {
        self.dfa_size_limit.unwrap_or(None)
    }

    /// Overwrite the options in `self` with every option that is set in
    /// `o`.
    pub fn overwrite(&self, o: Config) -> Config {
        Config {
            case_insensitive: o.case_insensitive.or(self.case_insensitive),
            whole_word: o.whole_word.or(self.whole_word),
            match_kind: o.match_kind.or(self.match_kind),
            dfa_size_limit: o.dfa_size_limit.or(self.dfa_size_limit),
        }
    }
}

/// Options that apply to a single search.
///
/// Unset options fall back to the configuration the pattern was compiled
/// with.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    whole_word: Option<bool>,
    match_kind: Option<MatchKind>,
}

impl SearchConfig {
    /// Return a search configuration that defers to the compiled
    /// configuration for everything.
    pub fn new() -> SearchConfig {
        SearchConfig::default()
    }

    /// Override whole word filtering for this search.
    pub fn whole_word(mut self, yes: bool) -> SearchConfig {
        self.whole_word = Some(yes);
        self
    }

    /// Override the automaton used for this search.
    pub fn match_kind(mut self, kind: MatchKind) -> SearchConfig {
        self.match_kind = Some(kind);
        self
    }

    pub(crate) fn resolve_whole_word(&self, compiled: &Config) -> bool {
        self.whole_word.unwrap_or_else(|| compiled.get_whole_word())
    }

    pub(crate) fn resolve_match_kind(&self, compiled: &Config) -> MatchKind {
        self.match_kind.unwrap_or_else(|| compiled.get_match_kind())
    }
}
