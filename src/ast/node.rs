use super::{NodeId, Quantifier};

#[derive(Clone, PartialEq, Debug)]
pub enum AstNode {
    Char(char),
    Any,                // .
    Class(ClassEscape), // \d, \W, ...
    Set {
        negated: bool, // [^...]
        items: Vec<SetItem>,
    },
    Anchor(Anchor),
    Backreference(u32), // \1 ... \9

    Group {
        capturing: bool, // false for (?:...)
        body: NodeId,
    },

    // Zero-width assertions wrapping a sub-pattern
    Lookaround {
        kind: LookaroundKind,
        negative: bool,
        body: NodeId,
    },

    Disjunction(Vec<NodeId>), // a|b|c
    Alternative(Vec<NodeId>), // concatenation, in matching order

    Repetition {
        body: NodeId,
        quantifier: Quantifier,
    },
}

/// A fieldless discriminant of [`AstNode`], used to select which nodes a
/// transform visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Char,
    Any,
    Class,
    Set,
    Anchor,
    Backreference,
    Group,
    Lookaround,
    Disjunction,
    Alternative,
    Repetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassEscape {
    Digit,
    Word,
    Space,
    NotDigit,
    NotWord,
    NotSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetItem {
    Char(char),
    Range(char, char),
    Class(ClassEscape),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,           // ^
    End,             // $
    WordBoundary,    // \b
    NonWordBoundary, // \B
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookaroundKind {
    Lookahead,
    /// Reverses the matching direction of everything inside it.
    Lookbehind,
}

impl AstNode {
    #[must_use]
    pub const fn tag(&self) -> Tag {
        match self {
            AstNode::Char(_) => Tag::Char,
            AstNode::Any => Tag::Any,
            AstNode::Class(_) => Tag::Class,
            AstNode::Set { .. } => Tag::Set,
            AstNode::Anchor(_) => Tag::Anchor,
            AstNode::Backreference(_) => Tag::Backreference,
            AstNode::Group { .. } => Tag::Group,
            AstNode::Lookaround { .. } => Tag::Lookaround,
            AstNode::Disjunction(_) => Tag::Disjunction,
            AstNode::Alternative(_) => Tag::Alternative,
            AstNode::Repetition { .. } => Tag::Repetition,
        }
    }

    /// Returns the direct children of this node, in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match self {
            AstNode::Group { body, .. }
            | AstNode::Lookaround { body, .. }
            | AstNode::Repetition { body, .. } => std::slice::from_ref(body),
            AstNode::Disjunction(nodes) | AstNode::Alternative(nodes) => nodes,
            _ => &[],
        }
    }

    /// Returns the single body of a group, look-around or repetition.
    #[must_use]
    pub const fn body(&self) -> Option<NodeId> {
        match self {
            AstNode::Group { body, .. }
            | AstNode::Lookaround { body, .. }
            | AstNode::Repetition { body, .. } => Some(*body),
            _ => None,
        }
    }

    #[must_use]
    pub const fn quantifier(&self) -> Option<&Quantifier> {
        match self {
            AstNode::Repetition { quantifier, .. } => Some(quantifier),
            _ => None,
        }
    }
}

impl ClassEscape {
    /// Returns the escape letter, e.g. `d` for `\d`.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            ClassEscape::Digit => 'd',
            ClassEscape::Word => 'w',
            ClassEscape::Space => 's',
            ClassEscape::NotDigit => 'D',
            ClassEscape::NotWord => 'W',
            ClassEscape::NotSpace => 'S',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' => ClassEscape::Digit,
            'w' => ClassEscape::Word,
            's' => ClassEscape::Space,
            'D' => ClassEscape::NotDigit,
            'W' => ClassEscape::NotWord,
            'S' => ClassEscape::NotSpace,
            _ => return None,
        })
    }
}
