/*!
Finding all matches of a compiled automaton in a text.

The search is deliberately simple. The automaton is run from every position
in the text, every accepting position is recorded as a candidate, and
overlapping candidates are then resolved in a single sweep: the leftmost
candidate wins, and among candidates starting at the same position the
longest wins. Searching is therefore quadratic in the length of the text.
*/

use core::{fmt, ops::Range};
use std::collections::BTreeSet;

use crate::{
    dfa::{self, DFA},
    nfa::{self, NFA},
};

/// A single match of a pattern in a text.
///
/// Offsets are byte offsets into the searched text and always fall on
/// `char` boundaries. A match is never empty.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Match<'h> {
    haystack: &'h str,
    start: usize,
    end: usize,
}

impl<'h> Match<'h> {
    fn new(haystack: &'h str, start: usize, end: usize) -> Match<'h> {
        Match { haystack, start, end }
    }

    /// The byte offset of the start of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte offset just past the end of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length of the match in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false, since empty matches are never reported.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The range of the match in the searched text.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched text.
    #[inline]
    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.range()]
    }
}

impl<'h> fmt::Debug for Match<'h> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("string", &self.as_str())
            .finish()
    }
}

/// An automaton that can be run one character at a time.
///
/// This is what the search is generic over, so that the same search,
/// overlap resolution and filtering apply to both the DFA and the NFA.
pub trait Automaton {
    /// The state of a run of the automaton.
    type State;

    /// The state before any input is consumed.
    fn initial(&self) -> Self::State;

    /// The state after consuming `ch` in `current`, or `None` if the
    /// automaton cannot consume `ch` there.
    fn step(&self, current: &Self::State, ch: char) -> Option<Self::State>;

    /// Whether `state` is a match.
    fn accepts(&self, state: &Self::State) -> bool;
}

impl Automaton for DFA {
    type State = dfa::StateId;

    fn initial(&self) -> dfa::StateId {
        self.start()
    }

    fn step(&self, current: &dfa::StateId, ch: char) -> Option<dfa::StateId> {
        self.next_state(*current, ch)
    }

    fn accepts(&self, state: &dfa::StateId) -> bool {
        self.state(*state).is_accepting()
    }
}

/// Simulates the NFA by tracking the set of states it could be in.
impl Automaton for NFA {
    type State = BTreeSet<nfa::StateId>;

    fn initial(&self) -> BTreeSet<nfa::StateId> {
        self.epsilon_closure([self.start()])
    }

    fn step(
        &self,
        current: &BTreeSet<nfa::StateId>,
        ch: char,
    ) -> Option<BTreeSet<nfa::StateId>> {
        let next = self.move_on(current, ch);
        if next.is_empty() {
            return None;
        }
        Some(self.epsilon_closure(next))
    }

    fn accepts(&self, state: &BTreeSet<nfa::StateId>) -> bool {
        self.is_accepting(state)
    }
}

/// Returns true if `aut` accepts all of `haystack`, from start to finish.
pub fn is_match_exact<A: Automaton>(aut: &A, haystack: &str) -> bool {
    let mut state = aut.initial();
    for ch in haystack.chars() {
        match aut.step(&state, ch) {
            Some(next) => state = next,
            None => return false,
        }
    }
    aut.accepts(&state)
}

/// Finds all non-overlapping matches of `aut` in `haystack`, in order.
///
/// When `whole_word` is enabled, matches that are not preceded and followed
/// by whitespace or an edge of the text are dropped. This filter runs after
/// overlaps have been resolved.
pub fn find_all<'h, A: Automaton>(
    aut: &A,
    haystack: &'h str,
    whole_word: bool,
) -> Vec<Match<'h>> {
    let candidates = candidates(aut, haystack);
    let _found = candidates.len();
    let mut matches: Vec<Match<'h>> = resolve_overlaps(candidates)
        .into_iter()
        .map(|(start, end)| Match::new(haystack, start, end))
        .collect();
    if whole_word {
        matches.retain(|m| is_whole_word(haystack, m.start(), m.end()));
    }
    debug!(
        "search over {} bytes: {} candidates, {} matches reported",
        haystack.len(),
        _found,
        matches.len(),
    );
    matches
}

/// Records a `(start, end)` candidate for every starting position and
/// every position at which the automaton is in an accepting state after
/// consuming at least one character.
fn candidates<A: Automaton>(aut: &A, haystack: &str) -> Vec<(usize, usize)> {
    let mut candidates = vec![];
    for (start, _) in haystack.char_indices() {
        let mut state = aut.initial();
        for (offset, ch) in haystack[start..].char_indices() {
            state = match aut.step(&state, ch) {
                Some(next) => next,
                None => break,
            };
            if aut.accepts(&state) {
                candidates.push((start, start + offset + ch.len_utf8()));
            }
        }
    }
    candidates
}

/// Sorts candidates leftmost first and longest first among those sharing a
/// start, then keeps each candidate that begins at or after the end of the
/// previously kept one.
fn resolve_overlaps(mut candidates: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    let mut kept = vec![];
    let mut last_end = 0;
    for (start, end) in candidates {
        if start >= last_end {
            kept.push((start, end));
            last_end = end;
        }
    }
    kept
}

fn is_whole_word(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    before.map_or(true, char::is_whitespace) && after.map_or(true, char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compiler::Compiler, syntax};

    fn nfa(pattern: &str) -> NFA {
        Compiler::new().compile(&syntax::parse(pattern).unwrap()).unwrap()
    }

    fn spans<'h>(matches: &[Match<'h>]) -> Vec<(usize, &'h str)> {
        matches.iter().map(|m| (m.start(), m.as_str())).collect()
    }

    fn search(pattern: &str, haystack: &str) -> Vec<(usize, String)> {
        let nfa = nfa(pattern);
        let dfa = DFA::from_nfa(&nfa, None).unwrap();
        let with_dfa = find_all(&dfa, haystack, false);
        let with_nfa = find_all(&nfa, haystack, false);
        assert_eq!(spans(&with_dfa), spans(&with_nfa), "pattern: {:?}", pattern);
        with_dfa.iter().map(|m| (m.start(), m.as_str().to_string())).collect()
    }

    fn owned(expected: &[(usize, &str)]) -> Vec<(usize, String)> {
        expected.iter().map(|&(i, s)| (i, s.to_string())).collect()
    }

    #[test]
    fn overlap_resolution() {
        let kept = resolve_overlaps(vec![(1, 4), (0, 1), (3, 4), (0, 4), (5, 6)]);
        assert_eq!(vec![(0, 4), (5, 6)], kept);
    }

    #[test]
    fn adjacent_matches_are_kept() {
        let kept = resolve_overlaps(vec![(0, 2), (2, 4), (1, 3)]);
        assert_eq!(vec![(0, 2), (2, 4)], kept);
    }

    #[test]
    fn greedy_leftmost() {
        assert_eq!(owned(&[(0, "aaab")]), search("a*b", "aaab"));
        assert_eq!(owned(&[(1, "a"), (2, "b")]), search("a|b", "cab"));
        assert_eq!(owned(&[(0, "abba")]), search("(a|b)*a", "abba"));
        assert_eq!(owned(&[(0, "aa"), (3, "a")]), search("a+", "aa a"));
    }

    #[test]
    fn empty_matches_are_never_reported() {
        assert!(search("a*", "bbb").is_empty());
        assert!(search("", "abc").is_empty());
        assert!(search("a", "").is_empty());
    }

    #[test]
    fn offsets_are_bytes() {
        assert_eq!(owned(&[(1, "é"), (4, "é")]), search("é", "aé é"));
        let nfa = nfa("ü+");
        let matches = find_all(&nfa, "xüü", false);
        assert_eq!(1, matches.len());
        assert_eq!(1..5, matches[0].range());
        assert_eq!(4, matches[0].len());
    }

    #[test]
    fn whole_word() {
        let nfa = nfa("a");
        assert!(find_all(&nfa, "banana", true).is_empty());
        let matches = find_all(&nfa, "a b a\ta", true);
        assert_eq!(vec![(0, "a"), (4, "a"), (6, "a")], spans(&matches));
    }

    #[test]
    fn whole_word_does_not_use_punctuation() {
        let nfa = nfa("cat");
        assert!(find_all(&nfa, "cat, dog", true).is_empty());
        assert_eq!(1, find_all(&nfa, "a cat\n", true).len());
    }

    #[test]
    fn whole_word_filters_after_overlap_resolution() {
        // "x y" wins at offset 0 and is then dropped. The shorter "x" it
        // displaced is not reconsidered.
        let nfa = nfa("x|x y");
        assert_eq!(vec![(0, "x y")], spans(&find_all(&nfa, "x yz", false)));
        assert!(find_all(&nfa, "x yz", true).is_empty());
    }

    #[test]
    fn exact() {
        let empty = DFA::from_nfa(&nfa(""), None).unwrap();
        assert!(is_match_exact(&empty, ""));
        assert!(!is_match_exact(&empty, "a"));

        let nfa = nfa("(a|b)*c");
        let dfa = DFA::from_nfa(&nfa, None).unwrap();
        assert!(is_match_exact(&dfa, "abac"));
        assert!(is_match_exact(&nfa, "abac"));
        assert!(!is_match_exact(&dfa, "abacc"));
        assert!(!is_match_exact(&dfa, ""));
    }

    #[test]
    fn match_debug() {
        let m = Match::new("xabc", 1, 3);
        assert_eq!(r#"Match { start: 1, end: 3, string: "ab" }"#, format!("{:?}", m));
    }
}
