//! Syntax tree handed over by the parser.
//!
//! The tree is produced by an external parser; this module only gives it a
//! traversable shape. Node ids are assigned in depth-first pre-order when a
//! [`SyntaxTree`] is built, so traversal order and id order agree.

use serde::Serialize;

/// Identifier of a node within one tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub u32);

/// Kind of a syntax node.
///
/// For [`NodeKind::BinaryExpression`] the node's `name` holds the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    ClassOrObject,
    SuperTypeEntry,
    Function,
    Property,
    Block,
    CallExpression,
    ValueArgument,
    BinaryExpression,
    IsExpression,
    UnsafeCast,
    NameReference,
    TypeReference,
    Constant,
    TryExpression,
    CatchClause,
    Parameter,
    Other(String),
}

/// A source range, 1-indexed like editor positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextRange {
    /// Starting line.
    pub start_line: usize,
    /// Starting column.
    pub start_col: usize,
    /// Ending line.
    pub end_line: usize,
    /// Ending column.
    pub end_col: usize,
}

impl TextRange {
    /// Create a range covering a single line.
    pub fn line(line: usize) -> Self {
        Self {
            start_line: line,
            start_col: 1,
            end_line: line,
            end_col: usize::MAX,
        }
    }

    /// Create a range with precise positions.
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// One node of a syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    id: NodeId,
    kind: NodeKind,
    text: String,
    name: Option<String>,
    range: TextRange,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a leaf node. Its id is assigned once it is part of a [`SyntaxTree`].
    pub fn new(kind: NodeKind, text: impl Into<String>, range: TextRange) -> Self {
        Self {
            id: NodeId::default(),
            kind,
            text: text.into(),
            name: None,
            range,
            children: Vec::new(),
        }
    }

    /// Attach a name (declaration name, or operator for binary expressions).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child nodes, keeping their order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// First direct child of the given kind.
    pub fn child_of_kind(&self, kind: &NodeKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| &c.kind == kind)
    }

    /// This node and all nodes below it, depth-first, left-to-right.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Descendants (including self) of the given kind, in traversal order.
    pub fn descendants_of_kind<'a>(
        &'a self,
        kind: &'a NodeKind,
    ) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.descendants().filter(move |n| &n.kind == kind)
    }

    fn assign_ids(&mut self, next: &mut u32) {
        self.id = NodeId(*next);
        *next += 1;
        for child in &mut self.children {
            child.assign_ids(next);
        }
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A complete syntax tree with stable node ids.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Take ownership of `root` and number its nodes in pre-order.
    pub fn new(mut root: SyntaxNode) -> Self {
        let mut next = 0;
        root.assign_ids(&mut next);
        Self { root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Look a node up by id.
    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.root.descendants().find(|n| n.id == id)
    }

    /// First node matching `predicate` in traversal order.
    pub fn find(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<&SyntaxNode> {
        self.root.descendants().find(|n| predicate(n))
    }
}

/// Walk `node` depth-first and call `visit` for every node of `kind`.
///
/// Stops at the first error returned by `visit`.
pub fn walk_kind<F>(node: &SyntaxNode, kind: &NodeKind, mut visit: F) -> anyhow::Result<()>
where
    F: FnMut(&SyntaxNode) -> anyhow::Result<()>,
{
    for n in node.descendants_of_kind(kind) {
        visit(n)?;
    }
    Ok(())
}
