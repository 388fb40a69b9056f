//! Parse tree definitions for clite.
//!
//! The parse tree represents the syntactic structure of a program exactly as
//! it was written. Unlike the typed tree produced by semantic analysis, every
//! node keeps the tokens it was built from, so the tree can regenerate source
//! text ([`Program::to_source`]) and print itself for diagnostics
//! ([`Program::dump`]).
//!
//! # Structure
//!
//! ```text
//! Program
//! └── Vec<Statement>
//!     ├── VariableDeclaration { type_name, name, initializer }
//!     ├── FunctionDeclaration(FunctionDecl { params, body, ... })
//!     ├── If { condition: Expr, then_branch, else_branch }
//!     └── ...
//! ```
//!
//! # Design Decisions
//!
//! - **Owned nodes**: nodes own their children and their tokens (no lifetimes),
//!   so the tree can outlive the source text.
//! - **Span on every node**: every node tracks its source location for error
//!   messages.
//! - **Tokens kept verbatim**: literals are not decoded here. The semantic
//!   analyzer decodes and range-checks them.

mod dump;
mod expr;
mod source;
mod stmt;

pub use expr::*;
pub use stmt::*;

use std::fmt;

/// A span representing a range in the source text.
///
/// Spans are half-open byte offsets from the start of the source, matching
/// the lexer's spans.
///
/// # Example
///
/// ```
/// use clite::ast::Span;
///
/// let span = Span::new(0, 5);
/// assert_eq!(span.start, 0);
/// assert_eq!(span.end, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start of the span (inclusive).
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span from start to end byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is after end {end}");
        Self { start, end }
    }

    /// Creates a span that covers both `self` and `other`.
    ///
    /// Useful for combining spans when building parent nodes from children.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.start, self.end)
    }
}

/// A complete clite program.
///
/// A program is a sequence of top-level statements executed in order.
/// Function declarations are statements too and may appear anywhere a
/// statement may.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The statements that make up the program.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a new program with the given statements.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// The span covering every statement, or an empty span for an empty program.
    pub fn span(&self) -> Span {
        match (self.statements.first(), self.statements.last()) {
            (Some(first), Some(last)) => first.span.merge(&last.span),
            _ => Span::default(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(5, 10);
        let b = Span::new(15, 25);
        assert_eq!(a.merge(&b), Span::new(5, 25));
        assert_eq!(b.merge(&a), Span::new(5, 25));
    }

    #[test]
    fn test_span_from_range() {
        let span: Span = (5..10).into();
        assert_eq!(span, Span::new(5, 10));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 7).to_string(), "[3 7]");
    }

    #[test]
    fn test_empty_program_span() {
        assert!(Program::new(Vec::new()).span().is_empty());
    }
}
