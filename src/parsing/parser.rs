//! Template parser
//!
//! Scans a template with a [`Cursor`] and produces an [`Ast`] of text and tag
//! nodes. Delimiters come from a [`TokenSet`] so the same grammar serves
//! `{tag}`, `{{ tag }}` or `[[ tag ]]` styles.
//!
//! Grammar, with default tokens:
//!
//! ```text
//! template  := (text | escape | tag)*
//! escape    := '\' ('\' | '{' | '}')
//! tag       := '{' ws path ws modifiers ws '}'
//! path      := value ('.' value)*
//! modifiers := ('|' ws modifier ws)*
//! value     := [a-z] ([a-zA-Z0-9_]* [a-zA-Z0-9])?
//! modifier  := [a-z] ([a-z0-9_]* [a-z0-9])?
//! ```
//!
//! A close delimiter outside a tag is an error, as is any escape other than
//! the three above. Tags cannot nest.

use super::ast::Ast;
use super::cursor::{Cursor, DEFAULT_WHITESPACE};
use super::error::{ParseError, ParseErrorKind};
use super::nodes::Node;
use super::tokens::{TokenRole, TokenSet};
use crate::config::TokenisedConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static PATTERN_VALUE: Lazy<Regex> = Lazy::new(|| {
    Cursor::anchored("[a-z](?:[a-zA-Z0-9_]*[a-zA-Z0-9])?").expect("value pattern is valid")
});

static PATTERN_MODIFIER: Lazy<Regex> = Lazy::new(|| {
    Cursor::anchored("[a-z](?:[a-z0-9_]*[a-z0-9])?").expect("modifier pattern is valid")
});

pub type ParseResult<T> = Result<T, ParseError>;

/// Reusable, configurable template parser.
///
/// The parser itself holds only configuration; each call to [`Parser::parse`]
/// scans with fresh state, so one parser can be shared freely.
#[derive(Debug, Clone)]
pub struct Parser {
    tokens: TokenSet,
    whitespace: Regex,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_tokens(TokenSet::default())
    }

    pub fn with_tokens(tokens: TokenSet) -> Self {
        Self {
            tokens,
            whitespace: DEFAULT_WHITESPACE.clone(),
        }
    }

    /// Parser with the tokens and whitespace pattern of a loaded
    /// configuration.
    pub fn from_config(config: &TokenisedConfig) -> Result<Self, regex::Error> {
        let mut parser = Self::with_tokens(config.tokens.to_token_set());
        parser.set_whitespace_pattern(&config.parser.whitespace_pattern)?;
        Ok(parser)
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Sets new literals for some or all roles. Roles not given keep their
    /// current literal.
    pub fn set_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = (TokenRole, S)>,
        S: Into<String>,
    {
        self.tokens.merge(tokens);
    }

    /// Replaces the pattern used to skip whitespace inside tags.
    pub fn set_whitespace_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.whitespace = Cursor::anchored(pattern)?;
        Ok(())
    }

    pub fn parse(&self, template: &str) -> ParseResult<Ast> {
        tracing::trace!(template, "parsing template");

        let mut cursor = Cursor::with_whitespace(template, self.whitespace.clone());
        for role in TokenRole::ALL {
            if self.tokens.get(role).is_empty() {
                return Err(fail(&cursor, ParseErrorKind::EmptyToken(role)));
            }
        }

        let mut scan = Scan {
            tokens: &self.tokens,
            cursor: &mut cursor,
            ast: Ast::new(),
        };
        scan.template()?;

        let mut ast = scan.ast;
        ast.prune_empty();

        tracing::debug!(nodes = ast.len(), "parsed template");
        Ok(ast)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn fail(cursor: &Cursor, kind: ParseErrorKind) -> ParseError {
    ParseError::new(kind, cursor.index(), cursor.as_str())
}

/// State for a single parse.
struct Scan<'a> {
    tokens: &'a TokenSet,
    cursor: &'a mut Cursor,
    ast: Ast,
}

impl Scan<'_> {
    fn t(&self, role: TokenRole) -> &str {
        self.tokens.get(role)
    }

    fn next_is(&self, role: TokenRole) -> bool {
        self.cursor.next_equals(self.tokens.get(role))
    }

    fn skip(&mut self, role: TokenRole) {
        let tokens = self.tokens;
        self.cursor.seek_same(tokens.get(role));
    }

    fn fail(&self, kind: ParseErrorKind) -> ParseError {
        fail(&*self.cursor, kind)
    }

    /// Scans literal text until the end of the template, parsing tags as they
    /// are reached.
    fn template(&mut self) -> ParseResult<()> {
        let mut text = String::new();
        let mut escaping = false;

        while !self.cursor.is_at_end() {
            if escaping {
                let escaped = self.escaped()?;
                text.push_str(&escaped);
                escaping = false;
                continue;
            }

            if self.next_is(TokenRole::Escape) {
                self.skip(TokenRole::Escape);
                escaping = true;
                continue;
            }

            if self.next_is(TokenRole::TagOpen) {
                self.flush_text(&mut text);
                self.tag()?;
                continue;
            }

            if self.next_is(TokenRole::TagClose) {
                return Err(self.fail(ParseErrorKind::TagCloseOutsideTag));
            }

            text.push_str(self.cursor.read(1));
        }

        if escaping {
            return Err(self.fail(ParseErrorKind::UnexpectedEndWhileEscaping));
        }

        self.flush_text(&mut text);
        Ok(())
    }

    fn flush_text(&mut self, text: &mut String) {
        if !text.is_empty() {
            self.ast.push_node(Node::text(std::mem::take(text)));
        }
    }

    /// Resolves the sequence following an escape token into literal text.
    fn escaped(&mut self) -> ParseResult<String> {
        if self.next_is(TokenRole::Escape) {
            self.skip(TokenRole::Escape);
            return Ok(self.t(TokenRole::Escape).to_string());
        }

        let delimiter = if self.next_is(TokenRole::TagOpen) {
            Some(TokenRole::TagOpen)
        } else if self.next_is(TokenRole::TagClose) {
            Some(TokenRole::TagClose)
        } else {
            None
        };

        let Some(role) = delimiter else {
            let found = self.cursor.peek(1).to_string();
            return Err(self.fail(ParseErrorKind::UnexpectedEscapedCharacter(found)));
        };

        // Escaped delimiters are only accepted where text is being built.
        if !self.ast.is_empty() && !self.ast.current_node().is_text() {
            return Err(self.fail(ParseErrorKind::DelimiterEscapedOutsideString(role)));
        }

        self.skip(role);
        Ok(self.t(role).to_string())
    }

    fn tag(&mut self) -> ParseResult<()> {
        self.skip(TokenRole::TagOpen);
        self.cursor.seek_whitespace();

        let path = self.tag_path()?;
        self.cursor.seek_whitespace();

        let modifiers = self.tag_modifiers()?;
        self.cursor.seek_whitespace();

        if !self.next_is(TokenRole::TagClose) {
            let found = self.cursor.peek(1).to_string();
            return Err(self.fail(ParseErrorKind::ExpectedTagClose(found)));
        }
        self.skip(TokenRole::TagClose);

        tracing::trace!(?path, ?modifiers, "parsed tag");
        self.ast.push_node(Node::tag(path, modifiers));
        Ok(())
    }

    fn tag_path(&mut self) -> ParseResult<Vec<String>> {
        let mut path: Vec<String> = Vec::new();
        let mut awaiting_segment = false;

        while !self.cursor.is_at_end() {
            let value = self.cursor.read_pattern(&PATTERN_VALUE);
            if !value.is_empty() {
                path.push(value);
                awaiting_segment = false;
                continue;
            }

            if self.next_is(TokenRole::TagPathSeparator) {
                if path.is_empty() || awaiting_segment {
                    return Err(self.fail(ParseErrorKind::EmptyPathSegment));
                }
                self.skip(TokenRole::TagPathSeparator);
                awaiting_segment = true;
                continue;
            }

            break;
        }

        if path.is_empty() {
            return Err(self.fail(ParseErrorKind::EmptyTag));
        }
        Ok(path)
    }

    fn tag_modifiers(&mut self) -> ParseResult<Vec<String>> {
        let mut modifiers = Vec::new();

        while !self.cursor.is_at_end() && self.next_is(TokenRole::TagModifier) {
            self.skip(TokenRole::TagModifier);
            self.cursor.seek_whitespace();

            let modifier = self.cursor.read_pattern(&PATTERN_MODIFIER);
            if modifier.is_empty() {
                let found = self.cursor.peek(1).to_string();
                return Err(self.fail(ParseErrorKind::UnexpectedModifierValue(found)));
            }

            modifiers.push(modifier);
            self.cursor.seek_whitespace();
        }

        Ok(modifiers)
    }
}
