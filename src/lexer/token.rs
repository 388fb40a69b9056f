//! Token definitions for the clite lexer.
//!
//! This module defines all tokens recognized by the lexer:
//! - Keywords (`if`, `while`, `return`, ...)
//! - The four primitive type keywords plus `void`
//! - Literals (bool, int, float, string)
//! - Operators and punctuation
//!
//! ## Design Notes
//!
//! We use the `logos` crate for lexical analysis. Logos generates a fast,
//! table-driven lexer from token definitions using procedural macros.
//! Keywords are plain `#[token]`s; logos prefers the longest match, so
//! `iffy` still lexes as an identifier.

use logos::Logos;
use std::fmt;

use crate::ast::Span;

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The original text of the token
    pub text: String,
    /// Byte range of the token in the source
    pub span: Span,
}

impl Token {
    /// Create a new token with the given kind, span, and text.
    pub fn new(kind: TokenKind, span: impl Into<Span>, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            span: span.into(),
        }
    }

    /// The end-of-input token for a source of the given length.
    pub fn eof(source_len: usize) -> Self {
        Self::new(TokenKind::Eof, Span::new(source_len, source_len), "")
    }

    /// Returns true if this token names one of the primitive variable types.
    pub fn is_type_name(&self) -> bool {
        self.kind.is_type_name()
    }
}

/// All token types of the language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // ==================== Keywords ====================
    #[token("void")]
    Void,

    #[token("return")]
    Return,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("while")]
    While,

    #[token("break")]
    Break,

    #[token("continue")]
    Continue,

    // ==================== Type Keywords ====================
    #[token("bool")]
    Bool,

    #[token("int")]
    Int,

    #[token("float")]
    Float,

    #[token("string")]
    String_, // Underscore to avoid conflict with Rust's String

    // ==================== Literals ====================
    /// `true` or `false`
    #[token("true")]
    #[token("false")]
    BoolLiteral,

    /// Decimal integer: `42`
    #[regex(r"[0-9]+")]
    IntLiteral,

    /// Float with a mandatory dot: `3.14`, `2.`, `.5`
    #[regex(r"[0-9]+\.[0-9]*")]
    #[regex(r"\.[0-9]+")]
    FloatLiteral,

    /// Double-quoted string without escapes: `"hello"`
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    // ==================== Operators ====================
    #[token("=")]
    Assign,

    #[token("==")]
    EqualEqual,

    #[token("!=")]
    NotEqual,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("<=")]
    LessEqual,

    #[token(">=")]
    GreaterEqual,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("!")]
    Bang,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    // ==================== Punctuation ====================
    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    // ==================== Identifiers ====================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // ==================== Special ====================
    /// A run of input no other pattern accepts. Produced by the
    /// [`Lexer`](super::Lexer) wrapper, never by logos itself.
    Invalid,

    /// End of input. Produced by the token stream, never by logos itself.
    Eof,
}

impl TokenKind {
    /// Returns true for `bool`, `int`, `float` and `string`.
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::Bool | TokenKind::Int | TokenKind::Float | TokenKind::String_
        )
    }

    /// Returns true for any literal token.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::BoolLiteral
                | TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::StringLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Void => "`void`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Bool => "`bool`",
            TokenKind::Int => "`int`",
            TokenKind::Float => "`float`",
            TokenKind::String_ => "`string`",
            TokenKind::BoolLiteral => "bool literal",
            TokenKind::IntLiteral => "int literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Assign => "`=`",
            TokenKind::EqualEqual => "`==`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Bang => "`!`",
            TokenKind::AndAnd => "`&&`",
            TokenKind::OrOr => "`||`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::Identifier => "identifier",
            TokenKind::Invalid => "invalid input",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source).map(|k| k.unwrap()).collect()
    }

    #[test]
    fn test_keywords_and_types() {
        assert_eq!(
            kinds("void return if else while int float bool string"),
            vec![
                TokenKind::Void,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Bool,
                TokenKind::String_,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("iffy integer"), vec![TokenKind::Identifier; 2]);
        assert_eq!(kinds("trueish"), vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            kinds("42 3.14 2. .5"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
                TokenKind::FloatLiteral,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= && || = < >"),
            vec![
                TokenKind::EqualEqual,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Assign,
                TokenKind::Less,
                TokenKind::Greater,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("int a; // trailing words\nint b;"),
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Semicolon,
            ]
        );
    }
}
