//! Parsed template tree
//!
//! An append-only buffer of nodes in document order. The parser pushes nodes
//! as it scans and prunes empty text once at the end.

use super::nodes::Node;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ast {
    tree: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(tree: Vec<Node>) -> Self {
        Self { tree }
    }

    pub fn push_node(&mut self, node: Node) {
        self.tree.push(node);
    }

    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// The last node pushed.
    ///
    /// # Panics
    ///
    /// Panics when the tree is empty; check [`Ast::is_empty`] first.
    pub fn current_node(&self) -> &Node {
        self.tree.last().expect("the syntax tree is empty")
    }

    /// Removes every empty node, preserving order.
    pub fn prune_empty(&mut self) {
        self.tree.retain(|node| !node.is_empty());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.tree.iter()
    }
}

impl<'a> IntoIterator for &'a Ast {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_current() {
        let mut ast = Ast::new();
        assert!(ast.is_empty());

        ast.push_node(Node::text("one"));
        ast.push_node(Node::tag(["two"], Vec::<String>::new()));

        assert_eq!(ast.len(), 2);
        assert!(!ast.current_node().is_text());
    }

    #[test]
    #[should_panic(expected = "the syntax tree is empty")]
    fn current_node_underflows() {
        Ast::new().current_node();
    }

    #[test]
    fn prune_keeps_order() {
        let mut ast = Ast::from_nodes(vec![
            Node::text(""),
            Node::text("a"),
            Node::tag(["b"], Vec::<String>::new()),
            Node::text(""),
            Node::text("c"),
        ]);
        ast.prune_empty();

        assert_eq!(
            ast.tree(),
            &[
                Node::text("a"),
                Node::tag(["b"], Vec::<String>::new()),
                Node::text("c"),
            ]
        );
    }
}
