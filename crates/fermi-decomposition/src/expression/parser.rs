//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | identifier | '(' expr ')'
//! ```
//!
//! Parenthesis and sign nesting is capped at [`MAX_NESTING`] and formula
//! length at [`MAX_TOKENS`], which bounds the depth of the resulting tree.

use fermi_core::errors::ExpressionError;

use super::lexer::{Token, TokenKind};
use super::{BinaryOp, Expr};

pub const MAX_NESTING: usize = 64;
pub const MAX_TOKENS: usize = 512;

pub fn parse_tokens(tokens: &[Token]) -> Result<Expr, ExpressionError> {
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ExpressionError::TooLong {
            tokens: tokens.len(),
            limit: MAX_TOKENS,
        });
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(Token {
            kind: TokenKind::RParen,
            ..
        }) => Err(ExpressionError::UnbalancedParentheses),
        Some(token) => Err(unexpected(token)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ExpressionError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ExpressionError::TooDeep { limit: MAX_NESTING });
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().and_then(|t| match t.kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }) {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(|t| match t.kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }) {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.nesting -= 1;
                Ok(Expr::Negate(Box::new(inner)))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.nesting -= 1;
                Ok(inner)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        let Some(token) = self.advance() else {
            return Err(ExpressionError::UnexpectedToken {
                found: "end of formula".to_string(),
                offset: self.tokens.last().map_or(0, |t| t.offset + 1),
            });
        };
        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(*n)),
            TokenKind::Ident(name) => Ok(Expr::Variable(name.clone())),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.nesting -= 1;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    None => Err(ExpressionError::UnbalancedParentheses),
                    Some(other) => Err(unexpected(other)),
                }
            }
            TokenKind::RParen => Err(ExpressionError::UnbalancedParentheses),
            _ => Err(unexpected(token)),
        }
    }
}

fn unexpected(token: &Token) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        found: token.kind.describe(),
        offset: token.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::lexer::tokenize;

    fn parse(input: &str) -> Result<Expr, ExpressionError> {
        parse_tokens(&tokenize(input)?)
    }

    #[test]
    fn nesting_at_the_limit_parses() {
        let formula = format!("{}a{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&formula), Ok(Expr::Variable("a".into())));
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let formula = format!("{}a{}", "(".repeat(200_000), ")".repeat(200_000));
        assert!(matches!(
            parse(&formula),
            Err(ExpressionError::TooLong { .. })
        ));
        let formula = format!("{}a{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(
            parse(&formula),
            Err(ExpressionError::TooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn long_sign_chains_are_rejected() {
        let formula = format!("{}a", "-".repeat(MAX_NESTING + 1));
        assert_eq!(
            parse(&formula),
            Err(ExpressionError::TooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn long_sums_are_rejected() {
        let formula = vec!["a"; MAX_TOKENS].join(" + ");
        assert!(matches!(
            parse(&formula),
            Err(ExpressionError::TooLong { limit: MAX_TOKENS, .. })
        ));
    }

    #[test]
    fn sibling_groups_do_not_accumulate_nesting() {
        let formula = vec!["(a)"; MAX_NESTING + 10].join(" * ");
        assert!(parse(&formula).is_ok());
    }
}
