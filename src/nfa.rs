use std::collections::{BTreeMap, BTreeSet};

/// A state ID in the NFA. This is the index of the state in the NFA's
/// state list.
pub type StateId = usize;

/// A Thompson NFA state.
///
/// A state may transition to other states either by consuming a single
/// character or by an epsilon transition, which consumes nothing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    accepting: bool,
    transitions: BTreeMap<char, Vec<StateId>>,
    epsilons: Vec<StateId>,
}

impl State {
    /// Whether reaching this state means a match.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// The character transitions out of this state, ordered by character.
    ///
    /// The Thompson construction never creates more than one target per
    /// character, but nothing here relies on that.
    pub fn transitions(&self) -> &BTreeMap<char, Vec<StateId>> {
        &self.transitions
    }

    /// The epsilon transitions out of this state, in insertion order.
    pub fn epsilons(&self) -> &[StateId] {
        &self.epsilons
    }

    pub(crate) fn set_accepting(&mut self, yes: bool) {
        self.accepting = yes;
    }

    pub(crate) fn add_transition(&mut self, ch: char, to: StateId) {
        let targets = self.transitions.entry(ch).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    pub(crate) fn add_epsilon(&mut self, to: StateId) {
        self.epsilons.push(to);
    }
}

/// Fragment of an NFA with start and end states.
///
/// While a fragment is being built, its end state is the only accepting
/// state reachable from its start state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// A Thompson NFA.
///
/// All states live in a single list and refer to one another by index.
/// Loops created by `*` and `+` are therefore plain back edges and there is
/// no shared ownership anywhere in the graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
}

impl NFA {
    pub(crate) fn new(states: Vec<State>, start: StateId) -> NFA {
        NFA { states, start }
    }

    /// The starting state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// All states in the NFA.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// This panics when `id` does not refer to a state in this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// The total number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if this NFA has no states. NFAs produced by the
    /// compiler always have at least two.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get the epsilon closure of a set of states: the states themselves
    /// and every state reachable from them through epsilon transitions
    /// only.
    pub fn epsilon_closure<I>(&self, states: I) -> BTreeSet<StateId>
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut stack: Vec<StateId> = states.into_iter().collect();
        let mut closure: BTreeSet<StateId> = stack.iter().copied().collect();
        while let Some(id) = stack.pop() {
            for &next in self.states[id].epsilons() {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }
        closure
    }

    /// Get every state reachable from `states` by consuming `ch`. Epsilon
    /// transitions are not followed.
    pub fn move_on(&self, states: &BTreeSet<StateId>, ch: char) -> BTreeSet<StateId> {
        let mut next = BTreeSet::new();
        for &id in states {
            if let Some(targets) = self.states[id].transitions().get(&ch) {
                next.extend(targets.iter().copied());
            }
        }
        next
    }

    /// Every character with a transition out of any state in `states`.
    pub fn alphabet(&self, states: &BTreeSet<StateId>) -> BTreeSet<char> {
        states
            .iter()
            .flat_map(|&id| self.states[id].transitions().keys().copied())
            .collect()
    }

    /// Check if any state in the set is accepting.
    pub fn is_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        states.iter().any(|&id| self.states[id].is_accepting())
    }
}
