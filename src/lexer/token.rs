use crate::ast::ClassEscape;

/// A pattern string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A plain character.
    Char(char),
    /// A character escaped by `\`, including control escapes like `\n`.
    Escaped(char),
    /// `.`
    Any,
    /// `\d`, `\w`, `\s` and their negations.
    Class(ClassEscape),
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `\1` ... `\9`
    Backreference(u32),
    /// `(`
    LParen,
    /// `(?:`
    NonCapture,
    /// `(?=` or `(?!`
    Lookahead { negative: bool },
    /// `(?<=` or `(?<!`
    Lookbehind { negative: bool },
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `^`
    Caret,
    /// `$`
    Dollar,
    /// `|`
    Pipe,
    /// `-`. Only produced inside a bracket set.
    Minus,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{n}`, `{n,}` or `{n,m}`. Bounds are not validated by the lexer.
    Range { from: u32, to: Option<u32> },
}

impl Token {
    /// Returns the first character of the token's source text.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Token::Char(c) | Token::Escaped(c) => c,
            Token::Any => '.',
            Token::Class(_)
            | Token::WordBoundary
            | Token::NonWordBoundary
            | Token::Backreference(_) => '\\',
            Token::LParen | Token::NonCapture | Token::Lookahead { .. } | Token::Lookbehind { .. } => {
                '('
            }
            Token::RParen => ')',
            Token::LBracket => '[',
            Token::RBracket => ']',
            Token::Caret => '^',
            Token::Dollar => '$',
            Token::Pipe => '|',
            Token::Minus => '-',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Question => '?',
            Token::Range { .. } => '{',
        }
    }

    /// Returns `true` for tokens that quantify the preceding item.
    #[must_use]
    pub const fn is_quantifier(self) -> bool {
        matches!(
            self,
            Token::Star | Token::Plus | Token::Question | Token::Range { .. }
        )
    }
}

/// A [`Token`] with associated position information.
#[derive(Clone, Copy, Debug, Eq)]
pub struct PosToken {
    /// The start position of the token in the pattern string.
    pub pos: usize,
    /// The token.
    pub token: Token,
}

impl core::ops::Deref for PosToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl PartialEq for PosToken {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}
