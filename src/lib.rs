//! A regular expression optimization pass that merges adjacent repetitions
//! of the same sub-pattern (`a{2}a{3}` -> `a{5}`).

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc)]

pub mod ast;
pub mod generator;
pub mod lexer;
pub mod merge;
pub mod optimizer;
pub mod parser;
pub mod traverse;

pub use self::{
    ast::{Ast, AstNode, NodeId, Path, Quantifier, QuantifierKind},
    generator::{canonical_equal, generate},
    lexer::{Lexer, Token},
    merge::{Direction, Merge, QuantifiersMerge, decide},
    optimizer::{Optimizer, Stats, optimize},
    parser::{Parser, parse_pattern},
    traverse::{Transform, sweep},
};

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// A character was found where it cannot appear.
    #[error("unexpected '{}' at {pos}", ch.escape_debug())]
    UnexpectedToken { pos: usize, ch: char },

    /// A token of an unexpected type was encountered.
    #[error("expected {expected:?}, got {actual:?} at {pos}")]
    ExpectedToken {
        pos: usize,
        expected: Token,
        actual: Option<Token>,
    },

    #[error("unexpected end of pattern at {pos}")]
    UnexpectedEndOfPattern { pos: usize },

    /// A quantifier follows nothing, an assertion or another quantifier.
    #[error("nothing to repeat at {pos}")]
    NothingToRepeat { pos: usize },

    /// The pattern ends with a lone `\`.
    #[error("\\ at end of pattern at {pos}")]
    TrailingBackslash { pos: usize },

    #[error("invalid escape sequence '\\{}' at {pos}", ch.escape_debug())]
    InvalidEscape { pos: usize, ch: char },

    /// A quantifier bound does not fit the supported range.
    #[error("quantifier bound too large at {pos}")]
    InvalidQuantifier { pos: usize },

    #[error("numbers out of order in {{{from},{to}}} quantifier")]
    QuantifierRange { from: u32, to: u32 },

    #[error("range out of order in character class ({start:?} > {end:?}) at {pos}")]
    SetRange { pos: usize, start: char, end: char },

    /// The node id does not refer to a live node.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// A node cannot have two parents.
    #[error("node {0} already has a parent")]
    AlreadyAdopted(NodeId),

    #[error("node {0} is not a repetition")]
    NotARepetition(NodeId),

    /// Only children of an alternative can be removed.
    #[error("node {0} is not part of a sequence")]
    NotInSequence(NodeId),
}

pub type Result<T> = std::result::Result<T, Error>;
