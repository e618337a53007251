use super::{Error, Result, ast::ClassEscape};

pub mod token;

pub use token::{PosToken, Token};

/// Splits a pattern string into [`Token`]s, one token of lookahead.
///
/// The lexer is context sensitive: between `[` and `]` quantifier and group
/// characters are plain characters, and `\b` means backspace.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    in_set: bool,
    peeked: Option<PosToken>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer and reads the first token.
    ///
    /// # Errors
    ///
    /// If the first token is malformed, an [`Error`] is returned.
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer {
            input,
            pos: 0,
            in_set: false,
            peeked: None,
        };
        lexer.peeked = lexer.lex()?;
        Ok(lexer)
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<PosToken> {
        self.peeked
    }

    /// Returns the position of the next token, or the end of the input.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.peeked.map_or(self.input.len(), |t| t.pos)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Option<PosToken>> {
        let current = self.peeked;
        if current.is_some() {
            self.peeked = self.lex()?;
        }
        Ok(current)
    }

    /// Consumes the next token if it equals `token`.
    pub fn consume(&mut self, token: Token) -> Result<bool> {
        if self.peeked.is_some_and(|t| t.token == token) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the next token, which must equal `expected`.
    pub fn expect(&mut self, expected: Token) -> Result<PosToken> {
        let peeked = self.peeked;
        match peeked {
            Some(t) if t.token == expected => {
                self.next_token()?;
                Ok(t)
            }
            actual => Err(Error::ExpectedToken {
                pos: self.tell(),
                expected,
                actual: actual.map(|t| t.token),
            }),
        }
    }

    /// Consumes the next token unless it equals `end`.
    pub fn until(&mut self, end: Token) -> Result<Option<PosToken>> {
        let peeked = self.peeked;
        match peeked {
            Some(t) if t.token == end => Ok(None),
            _ => self.next_token(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn lex(&mut self) -> Result<Option<PosToken>> {
        let pos = self.pos;
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let token = if self.in_set {
            self.lex_set_item(c, pos)?
        } else {
            self.lex_atom(c, pos)?
        };

        Ok(Some(PosToken { pos, token }))
    }

    fn lex_atom(&mut self, c: char, pos: usize) -> Result<Token> {
        Ok(match c {
            '(' => {
                if self.skip("?:") {
                    Token::NonCapture
                } else if self.skip("?=") {
                    Token::Lookahead { negative: false }
                } else if self.skip("?!") {
                    Token::Lookahead { negative: true }
                } else if self.skip("?<=") {
                    Token::Lookbehind { negative: false }
                } else if self.skip("?<!") {
                    Token::Lookbehind { negative: true }
                } else {
                    Token::LParen
                }
            }
            ')' => Token::RParen,
            '[' => {
                self.in_set = true;
                Token::LBracket
            }
            '.' => Token::Any,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            '|' => Token::Pipe,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Question,
            '{' => self.lex_range(pos)?.unwrap_or(Token::Char('{')),
            '\\' => self.lex_escape(pos)?,
            c => Token::Char(c),
        })
    }

    fn lex_set_item(&mut self, c: char, pos: usize) -> Result<Token> {
        Ok(match c {
            ']' => {
                self.in_set = false;
                Token::RBracket
            }
            '^' => Token::Caret,
            '-' => Token::Minus,
            '\\' => self.lex_escape(pos)?,
            c => Token::Char(c),
        })
    }

    /// Lexes `{n}`, `{n,}` or `{n,m}` after the opening brace. Anything else
    /// leaves the cursor untouched and yields `None`.
    fn lex_range(&mut self, pos: usize) -> Result<Option<Token>> {
        let rest = self.rest();
        let Some(end) = rest.find('}') else {
            return Ok(None);
        };
        let body = &rest[..end];
        let (from, to) = match body.split_once(',') {
            Some((from, to)) => (from, Some(to)),
            None => (body, None),
        };

        let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_number(from) || to.is_some_and(|to| !to.is_empty() && !is_number(to)) {
            return Ok(None);
        }

        let parse = |s: &str| s.parse::<u32>().map_err(|_| Error::InvalidQuantifier { pos });
        let from = parse(from)?;
        let to = match to {
            None => Some(from),
            Some("") => None,
            Some(to) => Some(parse(to)?),
        };

        self.pos += end + 1;
        Ok(Some(Token::Range { from, to }))
    }

    fn lex_escape(&mut self, pos: usize) -> Result<Token> {
        let Some(c) = self.advance() else {
            return Err(Error::TrailingBackslash { pos });
        };

        if let Some(class) = ClassEscape::from_char(c) {
            return Ok(Token::Class(class));
        }

        Ok(match c {
            'b' if self.in_set => Token::Escaped('\u{8}'),
            'b' => Token::WordBoundary,
            'B' if !self.in_set => Token::NonWordBoundary,
            d @ '1'..='9' if !self.in_set => Token::Backreference(u32::from(d) - u32::from('0')),
            '0' => Token::Escaped('\0'),
            'n' => Token::Escaped('\n'),
            't' => Token::Escaped('\t'),
            'r' => Token::Escaped('\r'),
            'f' => Token::Escaped('\u{c}'),
            'v' => Token::Escaped('\u{b}'),
            'x' => Token::Escaped(self.lex_hex(pos, 2)?),
            'u' => Token::Escaped(self.lex_hex(pos, 4)?),
            c if c.is_ascii_alphanumeric() => return Err(Error::InvalidEscape { pos, ch: c }),
            c => Token::Escaped(c),
        })
    }

    fn lex_hex(&mut self, pos: usize, digits: usize) -> Result<char> {
        let rest = self.rest();
        let invalid = Error::InvalidEscape {
            pos,
            ch: self.input[pos..].chars().nth(1).unwrap_or('\\'),
        };

        let hex = rest.get(..digits).ok_or_else(|| invalid.clone())?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid);
        }

        let c = u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or(invalid)?;
        self.pos += digits;
        Ok(c)
    }
}
