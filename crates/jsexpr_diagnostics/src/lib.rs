//! jsexpr_diagnostics: Error types for parsing and evaluation.
//!
//! Two error families exist:
//!
//! * [`ParseError`]: raised while parsing. Carries the offending position
//!   and the `no_match` flag that distinguishes "no rule applies here"
//!   (used internally to drive alternation, list termination and
//!   speculative rollback) from "a rule matched but the input is
//!   malformed" (always a hard error).
//! * [`EvalError`]: raised while walking an AST. Carries the source range
//!   of the offending node when the tree was parsed with range tracking.
//!
//! Both implement `miette::Diagnostic` so the CLI can render labeled
//! reports against the original expression text.

use jsexpr_core::text::{TextPos, TextRange};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub mod messages;

/// A syntax error detected while parsing an expression.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{description} at position {position}")]
#[diagnostic(code(jsexpr::parse))]
pub struct ParseError {
    /// Human readable description of the problem.
    pub description: String,
    /// Char offset in the expression where the error was found.
    pub position: TextPos,
    /// Marks that no rule matched at this position.
    ///
    /// A `no_match` error escaping the outermost parse attempt is still a
    /// syntax error; the flag only matters to enclosing speculative
    /// branches and list parsers, which treat it as "nothing here".
    pub no_match: bool,
    #[label("{description}")]
    span: SourceSpan,
}

impl ParseError {
    /// A hard syntax error: something matched but was malformed.
    pub fn new(description: impl Into<String>, position: TextPos) -> Self {
        let description = description.into();
        Self {
            description,
            position,
            no_match: false,
            span: SourceSpan::new((position as usize).into(), 0),
        }
    }

    /// A no-match signal: no rule applies at this position.
    pub fn no_match(description: impl Into<String>, position: TextPos) -> Self {
        let mut err = Self::new(description, position);
        err.no_match = true;
        err
    }

    /// Whether this error is a hard (non-recoverable) syntax error.
    pub fn is_hard(&self) -> bool {
        !self.no_match
    }
}

/// An error raised while evaluating an AST.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(jsexpr::eval))]
pub struct EvalError {
    /// Human readable description of the failure.
    pub message: String,
    /// Source range of the node that failed, when available.
    pub range: Option<TextRange>,
    #[label("{message}")]
    span: Option<SourceSpan>,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            range: None,
            span: None,
        }
    }

    /// Attach the source range of the offending node, keeping the first
    /// (innermost) range if one is already set.
    pub fn with_range(mut self, range: Option<TextRange>) -> Self {
        if self.range.is_none() {
            if let Some(r) = range {
                self.range = Some(r);
                self.span = Some(SourceSpan::new(
                    (r.pos as usize).into(),
                    r.len() as usize,
                ));
            }
        }
        self
    }
}

/// Convenience alias for parse results.
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience alias for evaluation results.
pub type EvalResult<T> = Result<T, EvalError>;
