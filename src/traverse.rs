//! The traversal driver transforms are installed into.

use super::{
    Result,
    ast::{Ast, NodeId, Tag},
};

/// A rewrite applied to every node of one kind.
pub trait Transform {
    /// A short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// The kind of node this transform is invoked for.
    fn tag(&self) -> Tag;

    /// Visits the live node `id`, possibly rewriting the tree.
    ///
    /// Returns `true` if the tree changed.
    fn visit(&mut self, ast: &mut Ast, id: NodeId) -> Result<bool>;
}

/// Visits every node tagged [`Transform::tag`] once, in document order.
///
/// The nodes to visit are collected before the first visit, so a transform
/// may remove nodes at any position: removed nodes are skipped, and nodes
/// added during the sweep are not visited.
///
/// Returns the number of visits that changed the tree.
pub fn sweep(ast: &mut Ast, transform: &mut dyn Transform) -> Result<usize> {
    let Some(root) = ast.root() else {
        return Ok(0);
    };

    let tag = transform.tag();
    let pending = ast
        .preorder(root)
        .into_iter()
        .filter(|&id| ast.get(id).is_some_and(|node| node.tag() == tag))
        .collect::<Vec<_>>();

    let mut changes = 0;
    for id in pending {
        if ast.contains(id) && transform.visit(ast, id)? {
            changes += 1;
        }
    }

    Ok(changes)
}
