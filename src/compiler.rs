use crate::{
    error::{CompileError, CompileResult},
    nfa::{Fragment, State, StateId, NFA},
    syntax::Token,
};

/// Compiler that converts a postfix token stream into a Thompson NFA.
///
/// Each compiler numbers its own states starting from zero, so independent
/// compilations never share state IDs.
#[derive(Debug, Default)]
pub struct Compiler {
    states: Vec<State>,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Compile postfix tokens, as produced by
    /// [`syntax::to_postfix`](crate::syntax::to_postfix), to a Thompson NFA.
    ///
    /// An empty token stream compiles to an NFA that only matches the empty
    /// string.
    ///
    /// # Errors
    ///
    /// This returns an error if the token stream is not well formed postfix,
    /// e.g., an operator has too few operands or two operands are left
    /// without an operator joining them.
    pub fn compile(mut self, postfix: &[Token]) -> CompileResult<NFA> {
        if postfix.is_empty() {
            let fragment = self.compile_empty();
            return Ok(NFA::new(self.states, fragment.start));
        }

        let mut stack: Vec<Fragment> = Vec::new();
        for &token in postfix {
            let fragment = match token {
                Token::Literal(ch) => self.compile_literal(ch),
                Token::Star => {
                    let inner = pop(&mut stack, token)?;
                    self.compile_star(inner)
                }
                Token::Plus => {
                    let inner = pop(&mut stack, token)?;
                    self.compile_plus(inner)
                }
                Token::Alternate => {
                    let right = pop(&mut stack, token)?;
                    let left = pop(&mut stack, token)?;
                    self.compile_alternation(left, right)
                }
                Token::Concat => {
                    let right = pop(&mut stack, token)?;
                    let left = pop(&mut stack, token)?;
                    self.compile_concat(left, right)
                }
                Token::Open => return Err(CompileError::unmatched_open()),
                Token::Close => return Err(CompileError::unmatched_close()),
            };
            stack.push(fragment);
        }

        let fragment = match stack.pop() {
            Some(fragment) if stack.is_empty() => fragment,
            _ => return Err(CompileError::missing_operator()),
        };
        debug!("compiled Thompson NFA with {} states", self.states.len());
        Ok(NFA::new(self.states, fragment.start))
    }

    /// Add a new state and return its ID
    fn add_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len();
        let mut state = State::default();
        state.set_accepting(accepting);
        self.states.push(state);
        id
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].add_epsilon(to);
    }

    /// Turns the end of an absorbed fragment into an interior state.
    fn demote(&mut self, id: StateId) {
        self.states[id].set_accepting(false);
    }

    /// Compile empty match
    fn compile_empty(&mut self) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.epsilon(start, end);
        Fragment { start, end }
    }

    /// Compile a single literal character
    fn compile_literal(&mut self, ch: char) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.states[start].add_transition(ch, end);
        Fragment { start, end }
    }

    /// Compile `*`: zero or more repetitions of `inner`
    fn compile_star(&mut self, inner: Fragment) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.epsilon(start, inner.start);
        self.epsilon(start, end);
        self.epsilon(inner.end, inner.start);
        self.epsilon(inner.end, end);
        self.demote(inner.end);
        Fragment { start, end }
    }

    /// Compile `+`: one or more repetitions of `inner`. This differs from
    /// `*` only in that the new start cannot skip straight to the end.
    fn compile_plus(&mut self, inner: Fragment) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.epsilon(start, inner.start);
        self.epsilon(inner.end, inner.start);
        self.epsilon(inner.end, end);
        self.demote(inner.end);
        Fragment { start, end }
    }

    /// Compile alternation using Thompson construction
    fn compile_alternation(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.add_state(false);
        let end = self.add_state(true);
        self.epsilon(start, left.start);
        self.epsilon(start, right.start);
        self.epsilon(left.end, end);
        self.demote(left.end);
        self.epsilon(right.end, end);
        self.demote(right.end);
        Fragment { start, end }
    }

    /// Compile concatenation by linking the end of `left` to the start of
    /// `right`. No new states are created.
    fn compile_concat(&mut self, left: Fragment, right: Fragment) -> Fragment {
        self.epsilon(left.end, right.start);
        self.demote(left.end);
        Fragment { start: left.start, end: right.end }
    }
}

fn pop(stack: &mut Vec<Fragment>, op: Token) -> CompileResult<Fragment> {
    stack.pop().ok_or_else(|| CompileError::missing_operand(op.as_char()))
}
