use super::{Ast, AstNode, LookaroundKind, NodeId};
use crate::generator::canonical_equal;

/// A read-only handle binding a node to its position in the tree.
///
/// Paths borrow the [`Ast`], so they are transient: they must be dropped
/// before the tree is mutated.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    ast: &'a Ast,
    id: NodeId,
    node: &'a AstNode,
}

impl<'a> Path<'a> {
    pub(crate) fn new(ast: &'a Ast, id: NodeId) -> Option<Self> {
        let node = ast.get(id)?;
        Some(Self { ast, id, node })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn node(&self) -> &'a AstNode {
        self.node
    }

    #[must_use]
    pub fn parent(&self) -> Option<Path<'a>> {
        Path::new(self.ast, self.ast.parent(self.id)?)
    }

    /// Returns the position of this node among its parent's children.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.parent()?
            .node
            .children()
            .iter()
            .position(|&child| child == self.id)
    }

    #[must_use]
    pub fn previous_sibling(&self) -> Option<Path<'a>> {
        let parent = self.parent()?;
        let index = self.index()?.checked_sub(1)?;
        Path::new(self.ast, *parent.node.children().get(index)?)
    }

    #[must_use]
    pub fn next_sibling(&self) -> Option<Path<'a>> {
        let parent = self.parent()?;
        let index = self.index()? + 1;
        Path::new(self.ast, *parent.node.children().get(index)?)
    }

    /// Returns the body of a group, look-around or repetition.
    #[must_use]
    pub fn child(&self) -> Option<Path<'a>> {
        Path::new(self.ast, self.node.body()?)
    }

    /// Iterates over the ancestors of this node, nearest first.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors { next: self.parent() }
    }

    /// Compares the canonical source of two subtrees.
    ///
    /// Different shapes printing the same text are equal; semantically
    /// equivalent patterns with different text are not.
    #[must_use]
    pub fn has_equal_source(&self, other: &Path<'_>) -> bool {
        std::ptr::eq(self.ast, other.ast) && canonical_equal(self.ast, self.id, other.id)
    }

    /// Returns `true` if this node is matched left to right.
    ///
    /// Only the nearest enclosing look-around matters: a lookahead nested in
    /// a lookbehind matches forward again.
    #[must_use]
    pub fn matches_forward(&self) -> bool {
        for ancestor in self.ancestors() {
            if let AstNode::Lookaround { kind, .. } = ancestor.node {
                return *kind == LookaroundKind::Lookahead;
            }
        }
        true
    }
}

/// Iterator returned by [`Path::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<Path<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Path<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
