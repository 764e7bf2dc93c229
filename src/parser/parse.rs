//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements and indentation-delimited blocks
//! - `expressions`: Parsing expressions with a fixed precedence ladder
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The first error aborts the parse; no partial program is ever returned.

use crate::interpreter::constants::MAX_NESTING_DEPTH;
use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token};
use thiserror::Error;

/// Syntax error raised by the lexer/parser pipeline
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}", line = .location.line)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError {
            message: message.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

/// Recursive descent parser for the teaching language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Open parentheses, operator chains and blocks around the current token
    pub(crate) depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self::from_tokens(tokens)
    }

    /// Build a parser over an already tokenized stream
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(|t| t.location())
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the entire program (top-level statements)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        loop {
            while self.match_token(&Token::Newline(self.current_location())) {}

            if self.is_at_end() {
                break;
            }

            if self.check(&Token::Indent(self.current_location())) {
                return Err(ParseError::new(
                    "unexpected indent",
                    self.current_location(),
                ));
            }

            let statements = self.parse_statement()?;
            program.statements.extend(statements);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        // from_tokens guarantees a trailing Eof, and advance never moves past it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.peek().clone()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    /// Enter one nesting level; `what` names the construct in the error
    pub(crate) fn enter_nesting(&mut self, what: &str) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                format!("{} nested too deeply", what),
                self.current_location(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Error for the current token when nothing it could start is valid here
    pub(crate) fn unexpected(&self) -> ParseError {
        match self.peek() {
            Token::Malformed(message, loc) => ParseError::new(message.clone(), *loc),
            Token::Newline(_) => ParseError::new(
                "unexpected end of line",
                self.previous_location(),
            ),
            token => ParseError::new(format!("unexpected token {}", token), token.location()),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            return Ok(());
        }

        match self.peek() {
            Token::Malformed(..) | Token::Unknown(..) => Err(self.unexpected()),
            found => {
                let line = match found {
                    Token::Newline(_) | Token::Eof(_) => self.previous_location().line,
                    _ => found.location().line,
                };
                Err(ParseError::new(
                    format!("{}, found {}", message, found),
                    SourceLocation::new(line, found.location().column),
                ))
            }
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_colon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Colon(self.current_location()),
            &format!("expected ':' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            match self.peek() {
                Token::Malformed(..) | Token::Unknown(..) => Err(self.unexpected()),
                found => Err(ParseError::new(
                    format!("expected identifier {}, found {}", ctx, found),
                    self.current_location(),
                )),
            }
        }
    }
}

/// Parse source text into a [`Program`]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_loop_sample() {
        let source = "total = 0\nfor i in range(3):\n    total = total + i\n    print(total)\n";
        let program = parse(source).unwrap();

        assert_eq!(program.statements.len(), 2);
        match &program.statements[1] {
            Stmt::For {
                var,
                range,
                body,
                location,
            } => {
                assert_eq!(var, "i");
                assert!(matches!(range, Expr::RangeCall { .. }));
                assert_eq!(body.len(), 2);
                assert_eq!(location.line, 2);
                assert_eq!(body[1].location().line, 4);
            }
            other => panic!("Expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse("\n# nothing here\n\n").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = parse("x = 1\ny = 2\nz = 3\nprint(1) x\n").unwrap_err();
        assert_eq!(err.line(), 4);
        assert_eq!(err.to_string(), "unexpected token 'x' at line 4");
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_NESTING_DEPTH;
        let ok = format!("x = {}1{}\n", "(".repeat(depth - 1), ")".repeat(depth - 1));
        assert!(parse(&ok).is_ok());

        let deep = format!("x = {}1{}\n", "(".repeat(depth + 1), ")".repeat(depth + 1));
        let err = parse(&deep).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
        assert_eq!(err.line(), 1);

        let chain = format!("x = 1{}\n", " + 1".repeat(depth + 1));
        assert!(parse(&chain).is_err());
    }

    #[test]
    fn test_unexpected_indent() {
        let err = parse("x = 1\n    y = 2\n").unwrap_err();
        assert_eq!(err.message, "unexpected indent");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_unknown_character_reported() {
        let err = parse("x = 3 $ 4\n").unwrap_err();
        assert_eq!(err.to_string(), "unexpected token '$' at line 1");
    }

    #[test]
    fn test_lint_token_reported() {
        let err = parse("if x:\n    y = 1\n  z = 2\n").unwrap_err();
        assert!(err.message.contains("unindent"));
        assert_eq!(err.line(), 3);
    }
}
