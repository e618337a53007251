//! Merging of adjacent repetitions of the same sub-pattern.
//!
//! ```text
//! a{2}a+      -> a{3,}
//! a{2}a{3}    -> a{5}
//! a{1,2}a{0,3} -> a{1,5}
//! ```
//!
//! A merge is only sound if the operand matched first cannot trade
//! iterations with the second one on backtracking. Inside a lookbehind the
//! sequence is matched right to left, so the roles of the two operands swap.

use super::{
    Error, Result,
    ast::{Ast, AstNode, NodeId, Path, Quantifier, Tag},
    traverse::Transform,
};

/// The order in which the terms of a sequence are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Resolves the matching direction at `path` from its nearest look-around.
#[must_use]
pub fn direction(path: &Path<'_>) -> Direction {
    if path.matches_forward() {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Decides whether `prev` followed by `cur` (both repeating the same body)
/// can be merged, returning the combined quantifier.
#[must_use]
pub fn decide(prev: &Quantifier, cur: &Quantifier, direction: Direction) -> Option<Quantifier> {
    if !prev.is_valid() || !cur.is_valid() {
        return None;
    }

    // `first` is matched before `second`
    let (first, second) = match direction {
        Direction::Forward => (prev, cur),
        Direction::Backward => (cur, prev),
    };

    let greedy = if first.is_forced() {
        // r{n1}r{n2,m2} -> r{n1+n2,n1+m2}, lazy if the second operand is
        second.greedy
    } else if first.greedy && second.greedy && second.is_from_zero() {
        // r{n1,m1}r{0,m2} -> r{n1,m1+m2}
        true
    } else {
        return None;
    };

    let bounds = prev.bounds().checked_add(cur.bounds())?;
    Some(bounds.into_quantifier(greedy))
}

/// A decided merge: `absorb` is removed and `keep` takes `quantifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub keep: NodeId,
    pub absorb: NodeId,
    pub quantifier: Quantifier,
}

/// Plans a merge of the repetition at `path` with its previous sibling.
#[must_use]
pub fn plan(path: &Path<'_>) -> Option<Merge> {
    let cur = path.node().quantifier()?;
    if !matches!(path.parent()?.node(), AstNode::Alternative(_)) {
        return None;
    }

    let previous = path.previous_sibling()?;
    let prev = previous.node().quantifier()?;

    if !previous.child()?.has_equal_source(&path.child()?) {
        return None;
    }

    let quantifier = decide(prev, cur, direction(path))?;

    Some(Merge {
        keep: path.id(),
        absorb: previous.id(),
        quantifier,
    })
}

/// Rewrites the kept repetition and removes the absorbed one.
///
/// # Errors
///
/// If either node is no longer live, `keep` is not a repetition, `absorb` is
/// not the sibling right before it in a sequence, or the quantifier is
/// invalid, an [`Error`](crate::Error) is returned and the tree is left
/// unchanged.
pub fn apply(ast: &mut Ast, merge: Merge) -> Result<()> {
    ast.node(merge.absorb)?;
    if ast.node(merge.keep)?.quantifier().is_none() {
        return Err(Error::NotARepetition(merge.keep));
    }

    let adjacent = ast.path(merge.keep).is_some_and(|keep| {
        keep.parent()
            .is_some_and(|parent| matches!(parent.node(), AstNode::Alternative(_)))
            && keep.previous_sibling().map(|p| p.id()) == Some(merge.absorb)
    });
    if !adjacent {
        return Err(Error::NotInSequence(merge.absorb));
    }

    ast.set_quantifier(merge.keep, merge.quantifier)?;
    ast.remove(merge.absorb)?;
    Ok(())
}

/// Merges each repetition with an equal repetition right before it.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuantifiersMerge;

impl Transform for QuantifiersMerge {
    fn name(&self) -> &'static str {
        "quantifiers-merge"
    }

    fn tag(&self) -> Tag {
        Tag::Repetition
    }

    fn visit(&mut self, ast: &mut Ast, id: NodeId) -> Result<bool> {
        let Some(merge) = ast.path(id).as_ref().and_then(plan) else {
            return Ok(false);
        };

        log::trace!(
            "merging {} into {} as {}",
            merge.absorb,
            merge.keep,
            merge.quantifier
        );
        apply(ast, merge)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(from: u32, to: Option<u32>, greedy: bool) -> Quantifier {
        Quantifier::range(from, to, greedy).unwrap()
    }

    #[test]
    fn forward_forced_first() {
        let exact2 = Quantifier::exact(2, true);
        assert_eq!(
            decide(&exact2, &Quantifier::exact(3, true), Direction::Forward),
            Some(Quantifier::exact(5, true))
        );
        assert_eq!(
            decide(&exact2, &Quantifier::plus(true), Direction::Forward),
            Some(range(3, None, true))
        );
        // laziness follows the second operand
        assert_eq!(
            decide(
                &Quantifier::exact(1, true),
                &range(2, Some(4), false),
                Direction::Forward
            ),
            Some(range(3, Some(5), false))
        );
        assert_eq!(
            decide(
                &Quantifier::exact(1, false),
                &range(2, Some(4), true),
                Direction::Forward
            ),
            Some(range(3, Some(5), true))
        );
    }

    #[test]
    fn forward_second_from_zero() {
        assert_eq!(
            decide(
                &range(1, Some(2), true),
                &range(0, Some(3), true),
                Direction::Forward
            ),
            Some(range(1, Some(5), true))
        );
        assert_eq!(
            decide(&Quantifier::plus(true), &Quantifier::star(true), Direction::Forward),
            Some(range(1, None, true))
        );
        assert_eq!(
            decide(
                &Quantifier::plus(true),
                &Quantifier::optional(true),
                Direction::Forward
            ),
            Some(range(1, None, true))
        );
    }

    #[test]
    fn forward_rejections() {
        // a+a{2} keeps its shape: the first operand is not forced and the
        // second one cannot be empty
        assert_eq!(
            decide(
                &Quantifier::plus(true),
                &Quantifier::exact(2, true),
                Direction::Forward
            ),
            None
        );
        assert_eq!(
            decide(
                &range(1, Some(2), false),
                &range(0, Some(3), true),
                Direction::Forward
            ),
            None
        );
        assert_eq!(
            decide(
                &range(1, Some(2), true),
                &Quantifier::star(false),
                Direction::Forward
            ),
            None
        );
    }

    #[test]
    fn backward_forced_second() {
        assert_eq!(
            decide(
                &range(1, Some(2), false),
                &Quantifier::exact(3, true),
                Direction::Backward
            ),
            Some(range(4, Some(5), false))
        );
        assert_eq!(
            decide(
                &range(1, Some(2), true),
                &Quantifier::exact(3, false),
                Direction::Backward
            ),
            Some(range(4, Some(5), true))
        );
    }

    #[test]
    fn backward_first_from_zero() {
        assert_eq!(
            decide(
                &range(0, Some(2), true),
                &range(3, Some(4), true),
                Direction::Backward
            ),
            Some(range(3, Some(6), true))
        );
        // forward only rule does not apply when reversed
        assert_eq!(
            decide(
                &range(1, Some(2), true),
                &range(0, Some(3), true),
                Direction::Backward
            ),
            None
        );
        assert_eq!(
            decide(
                &Quantifier::exact(2, true),
                &Quantifier::plus(true),
                Direction::Backward
            ),
            None
        );
    }

    #[test]
    fn reversed_bounds_are_not_merged() {
        let reversed = Quantifier {
            kind: crate::ast::QuantifierKind::Range {
                from: 5,
                to: Some(2),
            },
            greedy: true,
        };
        assert_eq!(
            decide(&Quantifier::exact(1, true), &reversed, Direction::Forward),
            None
        );
        assert_eq!(
            decide(&reversed, &Quantifier::exact(1, true), Direction::Backward),
            None
        );
    }

    #[test]
    fn overflow_is_not_merged() {
        assert_eq!(
            decide(
                &Quantifier::exact(u32::MAX, true),
                &Quantifier::exact(1, true),
                Direction::Forward
            ),
            None
        );
    }
}
