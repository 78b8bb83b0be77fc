//! Parse failures
//!
//! Parsing stops at the first error. The error carries the character offset
//! where scanning stopped and the full input so callers can render a
//! diagnostic without re-parsing.

use super::tokens::TokenRole;
use thiserror::Error;

/// What went wrong while scanning a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected token TAG_CLOSE outside tag")]
    TagCloseOutsideTag,

    #[error("Unexpected end of string while escaping")]
    UnexpectedEndWhileEscaping,

    #[error("Unexpected escaped character \"{0}\"")]
    UnexpectedEscapedCharacter(String),

    #[error("Unexpected token {0} escaped outside string")]
    DelimiterEscapedOutsideString(TokenRole),

    #[error("Unexpected token TAG_PATH_SEPARATOR with no preceding segment")]
    EmptyPathSegment,

    #[error("Unexpected empty tag")]
    EmptyTag,

    #[error("Unexpected value \"{0}\" in modifiers")]
    UnexpectedModifierValue(String),

    #[error("Unexpected value \"{0}\", expected tag close")]
    ExpectedTagClose(String),

    #[error("Token {0} is configured as an empty string")]
    EmptyToken(TokenRole),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at offset {offset} of \"{input}\")")]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
    input: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize, input: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            input: input.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Character offset at which parsing stopped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The complete template being parsed.
    pub fn input(&self) -> &str {
        &self.input
    }
}
