//! Syntax tree nodes
//!
//! A template is literal text interleaved with tags, so the node type is a
//! closed two-case variant.

use serde::Serialize;

/// Static text copied verbatim into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub content: String,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A placeholder naming a value path and the modifiers applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagNode {
    /// Non-empty list of nested keys.
    pub path: Vec<String>,
    /// Modifier identifiers in application order.
    pub modifiers: Vec<String>,
}

impl TagNode {
    pub fn new<P, M>(path: P, modifiers: M) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        debug_assert!(!path.is_empty(), "tag paths are never empty");
        Self {
            path,
            modifiers: modifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Path joined with `.`, for diagnostics.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(TextNode),
    Tag(TagNode),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode::new(content))
    }

    pub fn tag<P, M>(path: P, modifiers: M) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Node::Tag(TagNode::new(path, modifiers))
    }

    /// Tags are never empty; text is empty when it has no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Text(text) => text.is_empty(),
            Node::Tag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Tag(_) => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }
}
