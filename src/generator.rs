//! Canonical source generation for [`Ast`] subtrees.

use super::ast::{Anchor, Ast, AstNode, LookaroundKind, NodeId, SetItem};
use std::fmt::{self, Display, Write as _};

/// Prints the whole tree back to pattern source.
#[must_use]
pub fn generate(ast: &Ast) -> String {
    ast.root()
        .map(|root| generate_node(ast, root))
        .unwrap_or_default()
}

/// Prints the canonical source of the subtree rooted at `id`.
#[must_use]
pub fn generate_node(ast: &Ast, id: NodeId) -> String {
    Source { ast, id }.to_string()
}

/// Returns `true` if both subtrees print the same canonical source.
#[must_use]
pub fn canonical_equal(ast: &Ast, a: NodeId, b: NodeId) -> bool {
    ast.contains(a) && ast.contains(b) && generate_node(ast, a) == generate_node(ast, b)
}

/// A [`Display`] adapter printing a subtree.
#[derive(Clone, Copy)]
pub struct Source<'a> {
    pub ast: &'a Ast,
    pub id: NodeId,
}

impl Source<'_> {
    fn child(&self, id: NodeId) -> Self {
        Source { ast: self.ast, id }
    }

    /// Repetition bodies must be single atoms.
    fn needs_group(&self, mut body: NodeId) -> bool {
        loop {
            match self.ast.get(body) {
                Some(AstNode::Alternative(nodes)) if nodes.len() == 1 => body = nodes[0],
                Some(
                    AstNode::Alternative(_) | AstNode::Disjunction(_) | AstNode::Repetition { .. },
                ) => return true,
                _ => return false,
            }
        }
    }
}

impl Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.ast.get(self.id) else {
            return Ok(());
        };

        match node {
            AstNode::Char(c) => write_char(f, *c),
            AstNode::Any => f.write_char('.'),
            AstNode::Class(class) => write!(f, "\\{}", class.to_char()),
            AstNode::Set { negated, items } => {
                f.write_char('[')?;
                if *negated {
                    f.write_char('^')?;
                }
                for item in items {
                    match *item {
                        SetItem::Char(c) => write_set_char(f, c)?,
                        SetItem::Range(start, end) => {
                            write_set_char(f, start)?;
                            f.write_char('-')?;
                            write_set_char(f, end)?;
                        }
                        SetItem::Class(class) => write!(f, "\\{}", class.to_char())?,
                    }
                }
                f.write_char(']')
            }
            AstNode::Anchor(anchor) => f.write_str(match anchor {
                Anchor::Start => "^",
                Anchor::End => "$",
                Anchor::WordBoundary => "\\b",
                Anchor::NonWordBoundary => "\\B",
            }),
            AstNode::Backreference(n) => write!(f, "\\{n}"),
            AstNode::Group { capturing, body } => {
                f.write_str(if *capturing { "(" } else { "(?:" })?;
                self.child(*body).fmt(f)?;
                f.write_char(')')
            }
            AstNode::Lookaround {
                kind,
                negative,
                body,
            } => {
                f.write_str(match (kind, negative) {
                    (LookaroundKind::Lookahead, false) => "(?=",
                    (LookaroundKind::Lookahead, true) => "(?!",
                    (LookaroundKind::Lookbehind, false) => "(?<=",
                    (LookaroundKind::Lookbehind, true) => "(?<!",
                })?;
                self.child(*body).fmt(f)?;
                f.write_char(')')
            }
            AstNode::Disjunction(branches) => {
                for (i, &branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_char('|')?;
                    }
                    self.child(branch).fmt(f)?;
                }
                Ok(())
            }
            AstNode::Alternative(nodes) => nodes.iter().try_for_each(|&n| self.child(n).fmt(f)),
            AstNode::Repetition { body, quantifier } => {
                if self.needs_group(*body) {
                    write!(f, "(?:{})", self.child(*body))?;
                } else {
                    self.child(*body).fmt(f)?;
                }
                quantifier.fmt(f)
            }
        }
    }
}

fn write_control(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\n"),
        '\t' => f.write_str("\\t"),
        '\r' => f.write_str("\\r"),
        '\u{c}' => f.write_str("\\f"),
        '\u{b}' => f.write_str("\\v"),
        '\0' => f.write_str("\\0"),
        c => write!(f, "\\u{:04X}", u32::from(c)),
    }
}

fn write_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' => {
            write!(f, "\\{c}")
        }
        c if c.is_control() => write_control(f, c),
        c => f.write_char(c),
    }
}

fn write_set_char(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\\' | ']' | '[' | '-' | '^' => write!(f, "\\{c}"),
        '\u{8}' => f.write_str("\\b"),
        c if c.is_control() => write_control(f, c),
        c => f.write_char(c),
    }
}
