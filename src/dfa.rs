/*!
Conversion of a Thompson NFA into a DFA with the subset construction.

Every DFA state stands for the set of NFA states the NFA could be in at the
same time. That set, sorted, is the state's key, and two DFA states are never
created for the same key. No minimization is performed.
*/

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::{
    error::{CompileError, CompileResult},
    nfa::{self, NFA},
};

/// A state ID in the DFA. The start state always has ID `0`.
pub type StateId = usize;

/// A DFA state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    key: Vec<nfa::StateId>,
    accepting: bool,
    transitions: BTreeMap<char, StateId>,
}

impl State {
    /// The sorted IDs of the NFA states this state represents.
    pub fn key(&self) -> &[nfa::StateId] {
        &self.key
    }

    /// Whether any NFA state represented by this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The transitions out of this state, ordered by character. There is at
    /// most one target per character.
    pub fn transitions(&self) -> &BTreeMap<char, StateId> {
        &self.transitions
    }

    /// Renders the key as a comma separated list, e.g., `0,2,5`.
    pub fn key_string(&self) -> String {
        let ids: Vec<String> = self.key.iter().map(|id| id.to_string()).collect();
        ids.join(",")
    }
}

/// A deterministic finite automaton.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DFA {
    states: Vec<State>,
    by_key: HashMap<Vec<nfa::StateId>, StateId>,
}

impl DFA {
    /// Builds a DFA accepting exactly the language of `nfa`.
    ///
    /// When `size_limit` is set, building fails as soon as more than that
    /// many states would be needed.
    ///
    /// # Errors
    ///
    /// This only fails when a size limit is given and exceeded.
    pub fn from_nfa(nfa: &NFA, size_limit: Option<usize>) -> CompileResult<DFA> {
        let mut builder = Builder { nfa, size_limit, states: vec![], by_key: HashMap::new() };
        let start = nfa.epsilon_closure([nfa.start()]);
        let mut queue: VecDeque<StateId> = VecDeque::new();
        let (start_id, _) = builder.add(start)?;
        queue.push_back(start_id);

        while let Some(current) = queue.pop_front() {
            let members: BTreeSet<nfa::StateId> =
                builder.states[current].key.iter().copied().collect();
            for ch in nfa.alphabet(&members) {
                let next = nfa.epsilon_closure(nfa.move_on(&members, ch));
                if next.is_empty() {
                    continue;
                }
                let (next_id, created) = builder.add(next)?;
                if created {
                    queue.push_back(next_id);
                }
                builder.states[current].transitions.insert(ch, next_id);
            }
        }
        debug!(
            "subset construction produced {} DFA states from {} NFA states",
            builder.states.len(),
            nfa.len(),
        );
        Ok(DFA { states: builder.states, by_key: builder.by_key })
    }

    /// The starting state. This is always `0`.
    pub fn start(&self) -> StateId {
        0
    }

    /// All states in the DFA, in the order they were discovered.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// This panics when `id` does not refer to a state in this DFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// The total number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false, since a DFA has at least its start state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state reached from `from` by consuming `ch`, if any.
    pub fn next_state(&self, from: StateId, ch: char) -> Option<StateId> {
        self.states[from].transitions.get(&ch).copied()
    }

    /// Looks up the state representing exactly the given NFA states.
    pub fn find(&self, key: &[nfa::StateId]) -> Option<StateId> {
        self.by_key.get(key).copied()
    }
}

struct Builder<'a> {
    nfa: &'a NFA,
    size_limit: Option<usize>,
    states: Vec<State>,
    by_key: HashMap<Vec<nfa::StateId>, StateId>,
}

impl<'a> Builder<'a> {
    /// Returns the state for the given NFA state set, creating it if needed.
    /// The boolean is true when the state was created by this call.
    fn add(&mut self, members: BTreeSet<nfa::StateId>) -> CompileResult<(StateId, bool)> {
        let key: Vec<nfa::StateId> = members.iter().copied().collect();
        if let Some(&id) = self.by_key.get(&key) {
            return Ok((id, false));
        }
        if let Some(limit) = self.size_limit {
            if self.states.len() >= limit {
                debug!("DFA size limit of {} states exceeded", limit);
                return Err(CompileError::too_big(limit));
            }
        }
        let id = self.states.len();
        let accepting = self.nfa.is_accepting(&members);
        trace!("DFA state {} = {{{:?}}}, accepting: {}", id, key, accepting);
        self.states.push(State { key: key.clone(), accepting, transitions: BTreeMap::new() });
        self.by_key.insert(key, id);
        Ok((id, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compiler::Compiler, error::ErrorKind, syntax};

    fn nfa(pattern: &str) -> NFA {
        Compiler::new().compile(&syntax::parse(pattern).unwrap()).unwrap()
    }

    fn dfa(pattern: &str) -> DFA {
        DFA::from_nfa(&nfa(pattern), None).unwrap()
    }

    fn accepts(dfa: &DFA, input: &str) -> bool {
        let mut sid = dfa.start();
        for ch in input.chars() {
            match dfa.next_state(sid, ch) {
                Some(next) => sid = next,
                None => return false,
            }
        }
        dfa.state(sid).is_accepting()
    }

    #[test]
    fn start_is_closure_of_nfa_start() {
        let nfa = nfa("a*b");
        let dfa = DFA::from_nfa(&nfa, None).unwrap();
        let closure: Vec<_> = nfa.epsilon_closure([nfa.start()]).into_iter().collect();
        assert_eq!(closure.as_slice(), dfa.state(dfa.start()).key());
        assert_eq!(Some(0), dfa.find(&closure));
    }

    #[test]
    fn find_every_state_by_key() {
        let dfa = dfa("(a|b)*abb");
        for (id, state) in dfa.states().iter().enumerate() {
            assert_eq!(Some(id), dfa.find(state.key()));
        }
        assert_eq!(None, dfa.find(&[usize::MAX]));
    }

    #[test]
    fn single_literal() {
        let dfa = dfa("a");
        assert_eq!(2, dfa.len());
        assert!(!dfa.state(0).is_accepting());
        assert_eq!(Some(1), dfa.next_state(0, 'a'));
        assert!(dfa.state(1).is_accepting());
        assert_eq!(None, dfa.next_state(1, 'a'));
    }

    #[test]
    fn states_are_deduplicated() {
        // Every 'a' from any state leads back into the same subset.
        let dfa = dfa("a*");
        assert_eq!(2, dfa.len());
        assert_eq!(Some(1), dfa.next_state(0, 'a'));
        assert_eq!(Some(1), dfa.next_state(1, 'a'));
        assert!(dfa.state(0).is_accepting());

        let keys: BTreeSet<_> = dfa.states().iter().map(|s| s.key().to_vec()).collect();
        assert_eq!(dfa.len(), keys.len());
    }

    #[test]
    fn empty_pattern() {
        let dfa = dfa("");
        assert_eq!(1, dfa.len());
        assert!(dfa.state(0).is_accepting());
        assert!(dfa.state(0).transitions().is_empty());
    }

    #[test]
    fn language_matches_nfa() {
        let dfa = dfa("(a|b)*abb");
        assert!(accepts(&dfa, "abb"));
        assert!(accepts(&dfa, "aabb"));
        assert!(accepts(&dfa, "babbabb"));
        assert!(!accepts(&dfa, "abab"));
        assert!(!accepts(&dfa, ""));
        assert!(!accepts(&dfa, "abbc"));
    }

    #[test]
    fn key_string() {
        let dfa = dfa("a");
        assert_eq!("0", dfa.state(0).key_string());
        assert_eq!("1", dfa.state(1).key_string());
    }

    #[test]
    fn size_limit() {
        let nfa = nfa("(a|b)*a(a|b)(a|b)(a|b)");
        let err = DFA::from_nfa(&nfa, Some(4)).unwrap_err();
        assert_eq!(&ErrorKind::TooBig(4), err.kind());
        assert!(DFA::from_nfa(&nfa, None).unwrap().len() > 4);
    }
}
