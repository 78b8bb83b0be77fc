//! Configurable delimiter tokens
//!
//! A template is tokenised by five fixed roles. Each role maps to a literal
//! string which the caller may change before parsing. Roles are matched by
//! exact substring equality, so callers must avoid overlapping assignments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five syntactic roles recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenRole {
    Escape,
    TagOpen,
    TagClose,
    TagModifier,
    TagPathSeparator,
}

impl TokenRole {
    pub const ALL: [TokenRole; 5] = [
        TokenRole::Escape,
        TokenRole::TagOpen,
        TokenRole::TagClose,
        TokenRole::TagModifier,
        TokenRole::TagPathSeparator,
    ];

    /// Stable identifier used in error messages and configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            TokenRole::Escape => "ESCAPE",
            TokenRole::TagOpen => "TAG_OPEN",
            TokenRole::TagClose => "TAG_CLOSE",
            TokenRole::TagModifier => "TAG_MODIFIER",
            TokenRole::TagPathSeparator => "TAG_PATH_SEPARATOR",
        }
    }

    fn default_literal(self) -> &'static str {
        match self {
            TokenRole::Escape => "\\",
            TokenRole::TagOpen => "{",
            TokenRole::TagClose => "}",
            TokenRole::TagModifier => "|",
            TokenRole::TagPathSeparator => ".",
        }
    }
}

impl fmt::Display for TokenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role to literal mapping. Every role always has a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    escape: String,
    tag_open: String,
    tag_close: String,
    tag_modifier: String,
    tag_path_separator: String,
}

impl TokenSet {
    pub fn new() -> Self {
        Self {
            escape: TokenRole::Escape.default_literal().to_string(),
            tag_open: TokenRole::TagOpen.default_literal().to_string(),
            tag_close: TokenRole::TagClose.default_literal().to_string(),
            tag_modifier: TokenRole::TagModifier.default_literal().to_string(),
            tag_path_separator: TokenRole::TagPathSeparator.default_literal().to_string(),
        }
    }

    pub fn get(&self, role: TokenRole) -> &str {
        match role {
            TokenRole::Escape => &self.escape,
            TokenRole::TagOpen => &self.tag_open,
            TokenRole::TagClose => &self.tag_close,
            TokenRole::TagModifier => &self.tag_modifier,
            TokenRole::TagPathSeparator => &self.tag_path_separator,
        }
    }

    pub fn set(&mut self, role: TokenRole, literal: impl Into<String>) {
        let literal = literal.into();
        match role {
            TokenRole::Escape => self.escape = literal,
            TokenRole::TagOpen => self.tag_open = literal,
            TokenRole::TagClose => self.tag_close = literal,
            TokenRole::TagModifier => self.tag_modifier = literal,
            TokenRole::TagPathSeparator => self.tag_path_separator = literal,
        }
    }

    /// Builder-style variant of [`TokenSet::set`].
    pub fn with(mut self, role: TokenRole, literal: impl Into<String>) -> Self {
        self.set(role, literal);
        self
    }

    /// Merges the given assignments, leaving unspecified roles untouched.
    pub fn merge<I, S>(&mut self, assignments: I)
    where
        I: IntoIterator<Item = (TokenRole, S)>,
        S: Into<String>,
    {
        for (role, literal) in assignments {
            self.set(role, literal);
        }
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}
