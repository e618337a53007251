pub mod node;
pub mod path;
pub mod quantifier;

pub use self::{
    node::{Anchor, AstNode, ClassEscape, LookaroundKind, SetItem, Tag},
    path::{Ancestors, Path},
    quantifier::{Bounds, Quantifier, QuantifierKind},
};
pub use super::parser::parse_pattern;

use super::{Error, Result};
use std::fmt;

/// A stable handle to a node in an [`Ast`].
///
/// Ids are never reused: once a node is removed, its id stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Slot {
    node: AstNode,
    parent: Option<NodeId>,
}

/// An arena-allocated regular expression tree with parent back-references.
#[derive(Debug, Default)]
pub struct Ast {
    slots: Vec<Option<Slot>>,
    root: Option<NodeId>,
}

impl Ast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` to the arena, adopting its children.
    ///
    /// # Errors
    ///
    /// Every child must be a live node that has no parent yet, and may be
    /// listed only once. Otherwise [`Error::UnknownNode`] or
    /// [`Error::AlreadyAdopted`] is returned and the arena is left unchanged.
    /// A repetition with `to < from` is rejected with
    /// [`Error::QuantifierRange`].
    pub fn add(&mut self, node: AstNode) -> Result<NodeId> {
        if let Some(quantifier) = node.quantifier() {
            quantifier.check()?;
        }

        let children = node.children();
        for (i, &child) in children.iter().enumerate() {
            match self.slot(child)?.parent {
                Some(_) => return Err(Error::AlreadyAdopted(child)),
                None if self.root == Some(child) => return Err(Error::AlreadyAdopted(child)),
                None if children[..i].contains(&child) => {
                    return Err(Error::AlreadyAdopted(child));
                }
                None => {}
            }
        }

        let id = NodeId(self.slots.len());
        for &child in node.children() {
            if let Some(slot) = self.slots[child.0].as_mut() {
                slot.parent = Some(id);
            }
        }
        self.slots.push(Some(Slot { node, parent: None }));
        Ok(id)
    }

    /// Marks `id` as the root of the tree.
    ///
    /// # Errors
    ///
    /// The node must be live and parentless.
    pub fn set_root(&mut self, id: NodeId) -> Result<()> {
        if self.slot(id)?.parent.is_some() {
            return Err(Error::AlreadyAdopted(id));
        }
        self.root = Some(id);
        Ok(())
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.slots.get(id.0)?.as_ref().map(|slot| &slot.node)
    }

    /// Like [`Ast::get`], but reports a missing node as an error.
    pub fn node(&self, id: NodeId) -> Result<&AstNode> {
        self.slot(id).map(|slot| &slot.node)
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0)?.as_ref()?.parent
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Returns a traversal handle for `id`, if it is live.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Option<Path<'_>> {
        Path::new(self, id)
    }

    /// Returns the ids of the subtree rooted at `from` in document order
    /// (parents before children, children left to right).
    #[must_use]
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children().iter().rev());
        }
        order
    }

    /// Overwrites the quantifier of a repetition node.
    ///
    /// # Errors
    ///
    /// If `id` is not a live repetition node, or `quantifier` has `to < from`,
    /// an [`Error`] is returned and the node keeps its old quantifier.
    pub fn set_quantifier(&mut self, id: NodeId, quantifier: Quantifier) -> Result<()> {
        quantifier.check()?;
        match &mut self.slot_mut(id)?.node {
            AstNode::Repetition { quantifier: q, .. } => {
                *q = quantifier;
                Ok(())
            }
            _ => Err(Error::NotARepetition(id)),
        }
    }

    /// Detaches `id` from the sequence of its parent `Alternative` and frees
    /// its whole subtree. Later siblings shift down by one.
    ///
    /// Returns the index the node occupied among its siblings.
    ///
    /// # Errors
    ///
    /// If `id` is not a live child of an `Alternative`, an [`Error`] is
    /// returned and the tree is left unchanged.
    pub fn remove(&mut self, id: NodeId) -> Result<usize> {
        let parent = self.slot(id)?.parent.ok_or(Error::NotInSequence(id))?;

        let AstNode::Alternative(siblings) = &mut self.slot_mut(parent)?.node else {
            return Err(Error::NotInSequence(id));
        };
        let index = siblings
            .iter()
            .position(|&sibling| sibling == id)
            .ok_or(Error::NotInSequence(id))?;
        siblings.remove(index);

        for freed in self.preorder(id) {
            self.slots[freed.0] = None;
        }

        Ok(index)
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownNode(id))
    }
}
