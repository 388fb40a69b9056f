//! Crate-level error type covering every pipeline stage.

use crate::ast::Span;
use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::semantic::SemanticError;
use thiserror::Error;

/// Any error the pipeline can produce.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Location of the failure in the source text.
    pub fn span(&self) -> Span {
        match self {
            Error::Parse(err) => err.span(),
            Error::Semantic(err) => err.span(),
            Error::Runtime(err) => err.span(),
        }
    }

    /// 1-based line and column of [`Error::span`] within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.span().start.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) + 1;
        (line, column)
    }
}
