use crate::{
    config::{Config, SearchConfig},
    error::CompileResult,
    regex::{Builder, Regex},
    search::Match,
};

/// Holds at most one compiled pattern for interactive use.
///
/// This is the shape a text box with a live search wants: the pattern is
/// recompiled on every edit, and searching runs against whatever compiled
/// last. A failed compilation discards the previous pattern, so that stale
/// results are never shown for a pattern that no longer parses.
///
/// # Example
///
/// ```
/// use subset_regex::{Config, Engine, SearchConfig};
///
/// let mut engine = Engine::new();
/// engine.compile("a*b", Config::new())?;
/// let found = engine.search("aaab", &SearchConfig::new());
/// assert_eq!(1, found.len());
/// assert_eq!("aaab", found[0].as_str());
///
/// assert!(engine.compile("(a|b", Config::new()).is_err());
/// assert!(engine.search("aaab", &SearchConfig::new()).is_empty());
/// # Ok::<(), subset_regex::CompileError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    compiled: Option<Regex>,
}

impl Engine {
    /// Returns an engine with nothing compiled.
    pub fn new() -> Engine {
        Engine::default()
    }

    /// Compiles `pattern`, replacing whatever was compiled before.
    ///
    /// # Errors
    ///
    /// This returns an error if `pattern` is malformed. In that case the
    /// engine is left with nothing compiled.
    pub fn compile(&mut self, pattern: &str, config: Config) -> CompileResult<()> {
        self.compiled = None;
        let regex = Builder::new().configure(config).build(pattern)?;
        self.compiled = Some(regex);
        Ok(())
    }

    /// Finds all matches of the compiled pattern in `haystack`. This
    /// returns no matches when nothing is compiled.
    pub fn search<'h>(&self, haystack: &'h str, opts: &SearchConfig) -> Vec<Match<'h>> {
        match self.compiled {
            Some(ref regex) => regex.find_all_with(haystack, opts),
            None => vec![],
        }
    }

    /// The compiled pattern, if any.
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }

    /// Discards the compiled pattern.
    pub fn reset(&mut self) {
        self.compiled = None;
    }
}
