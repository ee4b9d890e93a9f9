use thiserror::Error;

/// The result of compiling a pattern.
pub type CompileResult<T> = Result<T, CompileError>;

/// An error that occurred while compiling a pattern.
///
/// Compile errors are deliberately coarse. They say what kind of problem was
/// found, but not where in the pattern it was found. Callers presenting the
/// error to a user will usually just say "invalid pattern".
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct CompileError {
    kind: ErrorKind,
}

/// The kind of a [`CompileError`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ErrorKind {
    /// An opening parenthesis was never closed, e.g., `(a|b`.
    #[error("unclosed group: missing ')'")]
    UnmatchedOpen,
    /// A closing parenthesis appeared without a corresponding opening
    /// parenthesis, e.g., `a)`.
    #[error("unopened group: unexpected ')'")]
    UnmatchedClose,
    /// An operator did not have enough operands, e.g., `*a` or `a|`.
    ///
    /// The operator is reported as it is written in a pattern. Implicit
    /// concatenation is reported as `.`.
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(char),
    /// More than one sub-expression was left over after compilation without
    /// an operator joining them.
    #[error("sub-expressions are not joined by an operator")]
    MissingOperator,
    /// Subset construction would have produced more DFA states than the
    /// configured limit allows. The argument is the limit.
    #[error("compiled DFA exceeds the size limit of {0} states")]
    TooBig(usize),
}

impl CompileError {
    pub(crate) fn new(kind: ErrorKind) -> CompileError {
        CompileError { kind }
    }

    pub(crate) fn unmatched_open() -> CompileError {
        CompileError::new(ErrorKind::UnmatchedOpen)
    }

    pub(crate) fn unmatched_close() -> CompileError {
        CompileError::new(ErrorKind::UnmatchedClose)
    }

    pub(crate) fn missing_operand(op: char) -> CompileError {
        CompileError::new(ErrorKind::MissingOperand(op))
    }

    pub(crate) fn missing_operator() -> CompileError {
        CompileError::new(ErrorKind::MissingOperator)
    }

    pub(crate) fn too_big(limit: usize) -> CompileError {
        CompileError::new(ErrorKind::TooBig(limit))
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
