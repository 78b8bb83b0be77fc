//! Scanning position over an immutable template string
//!
//! All offsets are measured in characters, not bytes, so multibyte input is
//! traversed safely. The cursor is permissive about bounds: peeking, reading or
//! seeking past the end clamps to the remaining length instead of failing.
//!
//! - `peek*` returns the upcoming substring without moving
//! - `seek*` advances the position
//! - `read*` returns the upcoming substring and advances past it
//!
//! Pattern operations take a [`Regex`] built with [`Cursor::anchored`] and only
//! match at the current position. No match yields an empty string.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static DEFAULT_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Cursor::anchored(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone)]
pub struct Cursor {
    source: String,
    /// Byte offset of every character boundary, including the final one.
    boundaries: Vec<usize>,
    index: usize,
    whitespace: Regex,
}

impl Cursor {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_whitespace(source, DEFAULT_WHITESPACE.clone())
    }

    /// Creates a cursor which skips whitespace using `whitespace` (see
    /// [`Cursor::seek_whitespace`]). The pattern should be anchored.
    pub fn with_whitespace(source: impl Into<String>, whitespace: Regex) -> Self {
        let source = source.into();
        let boundaries = source
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(source.len()))
            .collect();
        Self {
            source,
            boundaries,
            index: 0,
            whitespace,
        }
    }

    /// Compiles `pattern` so that it only matches at the start of the input.
    pub fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{pattern})"))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length of the input in characters.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position in characters.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.len()
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }

    pub fn peek(&self, length: usize) -> &str {
        let end = self.index.saturating_add(length).min(self.len());
        &self.source[self.boundaries[self.index]..self.boundaries[end]]
    }

    pub fn read(&mut self, length: usize) -> &str {
        let start = self.boundaries[self.index];
        self.seek(length);
        &self.source[start..self.boundaries[self.index]]
    }

    pub fn seek(&mut self, length: usize) {
        self.index = self.index.saturating_add(length).min(self.len());
    }

    /// Peeks as many characters as `template` contains.
    pub fn peek_same(&self, template: &str) -> &str {
        self.peek(template.chars().count())
    }

    pub fn read_same(&mut self, template: &str) -> &str {
        self.read(template.chars().count())
    }

    pub fn seek_same(&mut self, template: &str) {
        self.seek(template.chars().count());
    }

    pub fn peek_pattern(&self, pattern: &Regex) -> &str {
        let rest = self.rest();
        match pattern.find(rest) {
            Some(found) if found.start() == 0 => &rest[..found.end()],
            _ => "",
        }
    }

    pub fn read_pattern(&mut self, pattern: &Regex) -> String {
        let matched = self.peek_pattern(pattern).to_string();
        self.seek_same(&matched);
        matched
    }

    pub fn seek_pattern(&mut self, pattern: &Regex) {
        let length = self.peek_pattern(pattern).chars().count();
        self.seek(length);
    }

    /// Advances past any whitespace at the current position.
    pub fn seek_whitespace(&mut self) {
        let length = self.peek_pattern(&self.whitespace).chars().count();
        self.seek(length);
    }

    pub fn next_equals(&self, expected: &str) -> bool {
        self.peek_same(expected) == expected
    }

    pub fn next_matches(&self, pattern: &Regex) -> bool {
        !self.peek_pattern(pattern).is_empty()
    }

    fn rest(&self) -> &str {
        &self.source[self.boundaries[self.index]..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word() -> Regex {
        Cursor::anchored(r"\w+").unwrap()
    }

    #[test]
    fn peek_does_not_move() {
        let cursor = Cursor::new("Hello World");

        assert_eq!(cursor.peek(1), "H");
        assert_eq!(cursor.peek(3), "Hel");
        assert_eq!(cursor.peek(999_999), "Hello World");
        assert_eq!(cursor.peek_same("abcdef"), "Hello ");
        assert_eq!(cursor.peek_pattern(&word()), "Hello");
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn read_advances() {
        let mut cursor = Cursor::new("Hello World");

        assert_eq!(cursor.read(1), "H");
        assert_eq!(cursor.read(3), "ell");
        assert_eq!(cursor.read_same("abcdef"), "o Worl");

        cursor.rewind();
        assert_eq!(cursor.read_pattern(&word()), "Hello");
        assert_eq!(cursor.index(), 5);
    }

    #[test]
    fn seek_clamps_to_end() {
        let mut cursor = Cursor::new("Hello World");

        cursor.seek(1);
        assert_eq!(cursor.index(), 1);
        cursor.seek(3);
        assert_eq!(cursor.index(), 4);
        cursor.seek_same("abcdef");
        assert_eq!(cursor.index(), 10);
        cursor.seek(9999);
        assert_eq!(cursor.index(), 11);
        assert!(cursor.is_at_end());

        cursor.rewind();
        cursor.seek_pattern(&word());
        assert_eq!(cursor.index(), 5);
    }

    #[test]
    fn pattern_only_matches_at_position() {
        let cursor = Cursor::new("  Hello");
        assert_eq!(cursor.peek_pattern(&word()), "");
        assert!(!cursor.next_matches(&word()));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut cursor = Cursor::new("héllo wörld");
        assert_eq!(cursor.len(), 11);
        assert_eq!(cursor.read(2), "hé");
        cursor.seek(4);
        assert_eq!(cursor.peek(3), "wör");
        assert!(cursor.next_equals("wö"));
    }

    #[test]
    fn skips_whitespace() {
        let mut cursor = Cursor::new("Hello    world");
        cursor.seek(5);
        assert_eq!(cursor.peek(9999), "    world");
        cursor.seek_whitespace();
        assert_eq!(cursor.index(), 9);
        assert_eq!(cursor.peek(9999), "world");
    }

    #[test]
    fn custom_whitespace() {
        let pattern = Cursor::anchored("[%&]+").unwrap();
        let mut cursor = Cursor::with_whitespace("%&%&%&% %& Hello", pattern);
        cursor.seek_whitespace();
        assert_eq!(cursor.peek(9999), " %& Hello");
    }

    #[test]
    fn end_and_rewind() {
        let mut cursor = Cursor::new("Hello World");
        assert!(!cursor.is_at_end());
        cursor.seek(2);
        assert!(!cursor.is_at_end());
        cursor.seek(99_999);
        assert!(cursor.is_at_end());
        cursor.rewind();
        assert!(!cursor.is_at_end());
        assert_eq!(cursor.len(), 11);
    }

    #[test]
    fn empty_input() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_empty());
        assert!(cursor.is_at_end());
        assert_eq!(cursor.read(3), "");
    }
}
