use super::{
    Error, Result,
    ast::{Anchor, Ast, AstNode, LookaroundKind, NodeId, Quantifier, SetItem},
    lexer::{Lexer, PosToken, Token},
};

/// Parses a regular expression pattern into an [`Ast`].
///
/// Every sequence of terms, including a single term or an empty one, becomes
/// an [`AstNode::Alternative`].
///
/// # Errors
///
/// If the pattern string cannot be parsed, an [`Error`] is returned.
pub fn parse_pattern(pattern: &str) -> Result<Ast> {
    Parser::new(pattern)?.parse()
}

/// Converts a pattern string into an AST.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    ast: Ast,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given `pattern`.
    ///
    /// # Errors
    ///
    /// If the first character sequence in the input is not a valid token, an
    /// [`Error`] is returned.
    pub fn new(pattern: &'a str) -> Result<Self> {
        Ok(Parser {
            lexer: Lexer::new(pattern)?,
            ast: Ast::new(),
        })
    }

    /// Converts the pattern into an [`Ast`], consuming the parser.
    ///
    /// # Errors
    ///
    /// If the pattern string is invalid, an [`Error`] is returned.
    pub fn parse(mut self) -> Result<Ast> {
        let root = self.parse_disjunction()?;

        if let Some(PosToken { pos, token }) = self.lexer.peek() {
            return Err(Error::UnexpectedToken {
                pos,
                ch: token.to_char(),
            });
        }

        self.ast.set_root(root)?;
        Ok(self.ast)
    }

    fn parse_disjunction(&mut self) -> Result<NodeId> {
        let mut branches = vec![self.parse_alternative()?];
        while self.lexer.consume(Token::Pipe)? {
            branches.push(self.parse_alternative()?);
        }

        if branches.len() == 1 {
            Ok(branches[0])
        } else {
            self.ast.add(AstNode::Disjunction(branches))
        }
    }

    fn parse_alternative(&mut self) -> Result<NodeId> {
        let mut terms = Vec::new();

        while let Some(PosToken { token, .. }) = self.lexer.peek()
            && !matches!(token, Token::Pipe | Token::RParen)
        {
            terms.push(self.parse_term()?);
        }

        self.ast.add(AstNode::Alternative(terms))
    }

    fn parse_term(&mut self) -> Result<NodeId> {
        let mut item = self.parse_atom()?;

        if let Some(PosToken { pos, token }) = self.lexer.peek()
            && token.is_quantifier()
        {
            self.lexer.next_token()?;

            if matches!(
                self.ast.node(item)?,
                AstNode::Anchor(_) | AstNode::Lookaround { .. }
            ) {
                return Err(Error::NothingToRepeat { pos });
            }

            let greedy = !self.lexer.consume(Token::Question)?;
            let quantifier = match token {
                Token::Star => Quantifier::star(greedy),
                Token::Plus => Quantifier::plus(greedy),
                Token::Question => Quantifier::optional(greedy),
                Token::Range { from, to } => Quantifier::range(from, to, greedy)?,
                _ => unreachable!("is_quantifier accepted {token:?}"),
            };

            item = self.ast.add(AstNode::Repetition {
                body: item,
                quantifier,
            })?;

            if let Some(PosToken { pos, token }) = self.lexer.peek()
                && token.is_quantifier()
            {
                return Err(Error::NothingToRepeat { pos });
            }
        }

        Ok(item)
    }

    fn parse_atom(&mut self) -> Result<NodeId> {
        let Some(PosToken { pos, token }) = self.lexer.next_token()? else {
            return Err(Error::UnexpectedEndOfPattern {
                pos: self.lexer.tell(),
            });
        };

        let node = match token {
            Token::Char(c) | Token::Escaped(c) => AstNode::Char(c),
            Token::RBracket | Token::Minus => AstNode::Char(token.to_char()),
            Token::Any => AstNode::Any,
            Token::Class(class) => AstNode::Class(class),
            Token::Caret => AstNode::Anchor(Anchor::Start),
            Token::Dollar => AstNode::Anchor(Anchor::End),
            Token::WordBoundary => AstNode::Anchor(Anchor::WordBoundary),
            Token::NonWordBoundary => AstNode::Anchor(Anchor::NonWordBoundary),
            Token::Backreference(n) => AstNode::Backreference(n),
            Token::LParen | Token::NonCapture => {
                let body = self.parse_group_body()?;
                AstNode::Group {
                    capturing: token == Token::LParen,
                    body,
                }
            }
            Token::Lookahead { negative } => AstNode::Lookaround {
                kind: LookaroundKind::Lookahead,
                negative,
                body: self.parse_group_body()?,
            },
            Token::Lookbehind { negative } => AstNode::Lookaround {
                kind: LookaroundKind::Lookbehind,
                negative,
                body: self.parse_group_body()?,
            },
            Token::LBracket => self.parse_set()?,
            Token::Star | Token::Plus | Token::Question | Token::Range { .. } => {
                return Err(Error::NothingToRepeat { pos });
            }
            Token::RParen | Token::Pipe => {
                return Err(Error::UnexpectedToken {
                    pos,
                    ch: token.to_char(),
                });
            }
        };

        self.ast.add(node)
    }

    fn parse_group_body(&mut self) -> Result<NodeId> {
        let body = self.parse_disjunction()?;
        self.lexer.expect(Token::RParen)?;
        Ok(body)
    }

    fn parse_set(&mut self) -> Result<AstNode> {
        let negated = self.lexer.consume(Token::Caret)?;
        let mut items = Vec::new();

        while let Some(PosToken { pos, token }) = self.lexer.until(Token::RBracket)? {
            let start = match token {
                Token::Class(class) => {
                    items.push(SetItem::Class(class));
                    continue;
                }
                t => t.to_char(),
            };

            if !self.lexer.consume(Token::Minus)? {
                items.push(SetItem::Char(start));
                continue;
            }

            match self.lexer.peek().map(|t| t.token) {
                // [a-] or [a-\d]
                None | Some(Token::RBracket | Token::Class(_)) => {
                    items.push(SetItem::Char(start));
                    items.push(SetItem::Char('-'));
                }
                Some(end) => {
                    self.lexer.next_token()?;
                    let end = end.to_char();
                    if end < start {
                        return Err(Error::SetRange { pos, start, end });
                    }
                    items.push(SetItem::Range(start, end));
                }
            }
        }

        self.lexer.expect(Token::RBracket)?;

        Ok(AstNode::Set { negated, items })
    }
}
