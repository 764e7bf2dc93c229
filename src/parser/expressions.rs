//! Expression parsing implementation
//!
//! One method per precedence level, loosest first:
//!
//! 1. comparisons: `<` `>` `<=` `>=` `==` `!=`
//! 2. additive: `+` `-`
//! 3. multiplicative: `*` `/`
//! 4. primary: literals, identifiers, parenthesized expressions
//!
//! Every binary level is left-associative; there is no exponentiation or
//! unary operator. A `-` written directly before a numeric literal folds into
//! a negative literal.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        let mut chain = 0;

        loop {
            let loc = self.current_location();
            let op = match self.peek() {
                Token::Lt(_) => BinOp::Lt,
                Token::Le(_) => BinOp::Le,
                Token::Gt(_) => BinOp::Gt,
                Token::Ge(_) => BinOp::Ge,
                Token::EqEq(_) => BinOp::Eq,
                Token::NotEq(_) => BinOp::Ne,
                _ => break,
            };
            self.advance();
            // Each operator in a chain deepens the left-leaning tree
            self.enter_nesting("expression")?;
            chain += 1;
            let right = self.parse_additive()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        self.exit_nesting(chain);
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        let mut chain = 0;

        loop {
            let loc = self.current_location();
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            self.enter_nesting("expression")?;
            chain += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        self.exit_nesting(chain);
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;
        let mut chain = 0;

        loop {
            let loc = self.current_location();
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                _ => break,
            };
            self.advance();
            self.enter_nesting("expression")?;
            chain += 1;
            let right = self.parse_primary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        self.exit_nesting(chain);
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let value = match self.peek_token() {
            Token::IntLiteral(n, _) => Literal::Int(n),
            Token::FloatLiteral(x, _) => Literal::Float(x),
            Token::StringLiteral(s, _) => Literal::Str(s),
            Token::True(_) => Literal::Bool(true),
            Token::False(_) => Literal::Bool(false),
            Token::Ident(name, _) => {
                self.advance();
                return Ok(Expr::Identifier {
                    name,
                    location: loc,
                });
            }
            Token::LParen(_) => {
                self.advance();
                self.enter_nesting("expression")?;
                let expr = self.parse_expression()?;
                self.exit_nesting(1);
                self.expect_rparen("to close parenthesized expression")?;
                return Ok(expr);
            }
            Token::Minus(_) => return self.parse_negative_literal(),
            Token::Range(_) => {
                return Err(ParseError::new(
                    "range() can only be used as the iterable of a for loop",
                    loc,
                ))
            }
            _ => return Err(self.unexpected()),
        };

        self.advance();
        Ok(Expr::Literal {
            value,
            location: loc,
        })
    }

    /// `-` followed directly by a numeric literal
    fn parse_negative_literal(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume '-'

        let value = match self.peek_token() {
            Token::IntLiteral(n, _) => Literal::Int(-n),
            Token::FloatLiteral(x, _) => Literal::Float(-x),
            _ => {
                return Err(ParseError::new(
                    "unary '-' is only supported before a number",
                    loc,
                ))
            }
        };
        self.advance();

        Ok(Expr::Literal {
            value,
            location: loc,
        })
    }
}
