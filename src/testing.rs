//! Fluent assertions over parsed templates
//!
//! Tests describe the expected tree through semantic methods rather than by
//! matching on [`Node`] directly, so a change to the node layout only touches
//! this module.
//!
//! ```rust
//! use tokenised_strings::parsing::Parser;
//! use tokenised_strings::testing::assert_tree;
//!
//! let ast = Parser::new().parse("Hello {user.name|upper}!").unwrap();
//! assert_tree(&ast)
//!     .node_count(3)
//!     .text(0, "Hello ")
//!     .tag(1, |tag| tag.path(&["user", "name"]).modifiers(&["upper"]))
//!     .text(2, "!");
//! ```

use crate::parsing::{Ast, Node, TagNode};

pub fn assert_tree(ast: &Ast) -> TreeAssertion<'_> {
    TreeAssertion { ast }
}

pub struct TreeAssertion<'a> {
    ast: &'a Ast,
}

impl<'a> TreeAssertion<'a> {
    pub fn node_count(self, expected: usize) -> Self {
        let actual = self.ast.len();
        assert_eq!(
            actual, expected,
            "Expected {} nodes, found {}: {:?}",
            expected, actual, self.ast
        );
        self
    }

    pub fn is_empty(self) -> Self {
        assert!(self.ast.is_empty(), "Expected an empty tree, found {:?}", self.ast);
        self
    }

    /// Asserts node `index` is text with exactly `expected` as content.
    pub fn text(self, index: usize, expected: &str) -> Self {
        match self.node(index) {
            Node::Text(text) => assert_eq!(
                text.content, expected,
                "node {}: text content mismatch",
                index
            ),
            other => panic!("node {}: expected text, found {:?}", index, other),
        }
        self
    }

    pub fn tag<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TagAssertion<'a>) -> TagAssertion<'a>,
    {
        match self.node(index) {
            Node::Tag(tag) => {
                assertion(TagAssertion {
                    tag,
                    context: format!("node {}", index),
                });
            }
            other => panic!("node {}: expected tag, found {:?}", index, other),
        }
        self
    }

    /// Asserts the tree alternates as `kinds`, `'t'` for text and `'#'` for
    /// tags.
    pub fn shape(self, kinds: &str) -> Self {
        let actual: String = self
            .ast
            .iter()
            .map(|node| if node.is_text() { 't' } else { '#' })
            .collect();
        assert_eq!(actual, kinds, "tree shape mismatch");
        self
    }

    fn node(&self, index: usize) -> &'a Node {
        self.ast.tree().get(index).unwrap_or_else(|| {
            panic!(
                "node {} out of range, tree has {} nodes",
                index,
                self.ast.len()
            )
        })
    }
}

pub struct TagAssertion<'a> {
    tag: &'a TagNode,
    context: String,
}

impl<'a> TagAssertion<'a> {
    pub fn path(self, expected: &[&str]) -> Self {
        assert_eq!(self.tag.path, expected, "{}: path mismatch", self.context);
        self
    }

    pub fn dotted_path(self, expected: &str) -> Self {
        assert_eq!(
            self.tag.dotted_path(),
            expected,
            "{}: path mismatch",
            self.context
        );
        self
    }

    pub fn modifiers(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.tag.modifiers, expected,
            "{}: modifiers mismatch",
            self.context
        );
        self
    }

    pub fn no_modifiers(self) -> Self {
        assert!(
            self.tag.modifiers.is_empty(),
            "{}: expected no modifiers, found {:?}",
            self.context,
            self.tag.modifiers
        );
        self
    }
}
