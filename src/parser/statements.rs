//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Assignments: `total = total + i`
//! - Output: `print(a, b)`
//! - Control flow: `if` / `elif` / `else`, `for name in range(n)`
//! - `pass`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= if_stmt | for_stmt | simple_line
//! simple_line ::= simple_stmt (';' simple_stmt)* [';'] NEWLINE
//! simple_stmt ::= IDENT '=' expr | 'print' '(' [expr (',' expr)* [',']] ')' | 'pass'
//! if_stmt     ::= 'if' expr ':' block ('elif' expr ':' block)* ['else' ':' block]
//! for_stmt    ::= 'for' IDENT 'in' 'range' '(' expr ')' ':' block
//! block       ::= NEWLINE INDENT statement+ DEDENT | simple_line
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one statement. A simple line may hold several `;`-separated statements.
    pub(crate) fn parse_statement(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::If(loc)) {
            return Ok(vec![self.parse_if_statement()?]);
        }

        if self.match_token(&Token::For(loc)) {
            return Ok(vec![self.parse_for_statement()?]);
        }

        self.parse_simple_line()
    }

    /// Parse an indentation-delimited block, or a simple line on the same line as the `:`
    pub(crate) fn parse_block(&mut self, ctx: &str) -> Result<Vec<Stmt>, ParseError> {
        if !self.match_token(&Token::Newline(self.current_location())) {
            return self.parse_simple_line();
        }

        if !self.check(&Token::Indent(self.current_location())) {
            return Err(match self.peek() {
                Token::Malformed(..) => self.unexpected(),
                _ => ParseError::new(
                    format!("expected an indented block {}", ctx),
                    self.current_location(),
                ),
            });
        }
        self.advance();
        self.enter_nesting("block")?;

        let mut statements = Vec::new();
        while !self.check(&Token::Dedent(self.current_location())) && !self.is_at_end() {
            if self.check(&Token::Indent(self.current_location())) {
                return Err(ParseError::new("unexpected indent", self.current_location()));
            }
            statements.extend(self.parse_statement()?);
        }

        self.expect_token(
            &Token::Dedent(self.current_location()),
            &format!("expected end of block {}", ctx),
        )?;
        self.exit_nesting(1);

        Ok(statements)
    }

    /// Parse `simple_stmt (';' simple_stmt)* NEWLINE`
    fn parse_simple_line(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = vec![self.parse_simple_statement()?];

        loop {
            if self.match_token(&Token::Newline(self.current_location())) {
                break;
            }
            if self.is_at_end() {
                break;
            }
            if !self.match_token(&Token::Semicolon(self.current_location())) {
                return Err(self.unexpected());
            }
            // A trailing ';' may end the line
            if self.match_token(&Token::Newline(self.current_location())) {
                break;
            }
            statements.push(self.parse_simple_statement()?);
        }

        Ok(statements)
    }

    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        match self.peek_token() {
            Token::Print(_) => {
                self.advance();
                self.parse_print_statement(loc)
            }
            Token::Pass(_) => {
                self.advance();
                Ok(Stmt::Pass { location: loc })
            }
            Token::Ident(name, _) => {
                self.advance();
                self.expect_token(
                    &Token::Eq(self.current_location()),
                    &format!("expected '=' after '{}'", name),
                )?;
                let value = self.parse_expression()?;
                Ok(Stmt::Assign {
                    name,
                    value,
                    location: loc,
                })
            }
            Token::Range(_) => Err(ParseError::new(
                "range() can only be used as the iterable of a for loop",
                loc,
            )),
            _ => Err(self.unexpected()),
        }
    }

    /// Parse `print(args)`; the `print` keyword is already consumed
    fn parse_print_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        self.expect_lparen("after 'print'")?;

        let mut args = Vec::new();
        if !self.check(&Token::RParen(self.current_location())) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma(self.current_location())) {
                    break;
                }
                // Allow a trailing comma
                if self.check(&Token::RParen(self.current_location())) {
                    break;
                }
            }
        }

        self.expect_rparen("after print arguments")?;

        Ok(Stmt::Print {
            args,
            location: loc,
        })
    }

    /// Parse `if` / `elif` / `else`; the `if` keyword is already consumed
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();
        let mut branches = Vec::new();

        let condition = self.parse_expression()?;
        self.expect_colon("after if condition")?;
        let body = self.parse_block("after 'if'")?;
        branches.push(IfBranch {
            condition,
            body,
            location: loc,
        });

        while self.match_token(&Token::Elif(self.current_location())) {
            let elif_loc = self.previous_location();
            let condition = self.parse_expression()?;
            self.expect_colon("after elif condition")?;
            let body = self.parse_block("after 'elif'")?;
            branches.push(IfBranch {
                condition,
                body,
                location: elif_loc,
            });
        }

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            let else_loc = self.previous_location();
            self.expect_colon("after 'else'")?;
            let body = self.parse_block("after 'else'")?;
            Some(ElseBranch {
                body,
                location: else_loc,
            })
        } else {
            None
        };

        Ok(Stmt::If {
            branches,
            else_branch,
            location: loc,
        })
    }

    /// Parse `for name in range(n):`; the `for` keyword is already consumed
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.previous_location();

        let var = self.expect_identifier("after 'for'")?;
        self.expect_token(
            &Token::In(self.current_location()),
            "expected 'in' after loop variable",
        )?;

        if !self.check(&Token::Range(self.current_location())) {
            return Err(match self.peek() {
                Token::Malformed(..) | Token::Unknown(..) => self.unexpected(),
                found => ParseError::new(
                    format!("for loops can only iterate over range(...), found {}", found),
                    self.current_location(),
                ),
            });
        }
        let range = self.parse_range_call()?;

        self.expect_colon("after for loop header")?;
        let body = self.parse_block("after 'for'")?;

        Ok(Stmt::For {
            var,
            range,
            body,
            location: loc,
        })
    }

    /// Parse `range(expr)`; only reachable from a `for` header
    fn parse_range_call(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'range'
        self.expect_lparen("after 'range'")?;

        if self.check(&Token::RParen(self.current_location())) {
            return Err(ParseError::new(
                "range() takes exactly one argument",
                self.current_location(),
            ));
        }
        let arg = self.parse_expression()?;
        if self.check(&Token::Comma(self.current_location())) {
            return Err(ParseError::new(
                "range() takes exactly one argument",
                self.current_location(),
            ));
        }
        self.expect_rparen("after range argument")?;

        Ok(Expr::RangeCall {
            arg: Box::new(arg),
            location: loc,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_if_elif_else() {
        let source = "\
x = 5
if x < 3:
    print(\"small\")
elif x < 10:
    print(\"medium\")
else:
    print(\"large\")
print(\"done\")
";
        let program = parse(source).unwrap();
        assert_eq!(program.statements.len(), 3);

        match &program.statements[1] {
            Stmt::If {
                branches,
                else_branch,
                ..
            } => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[0].location.line, 2);
                assert_eq!(branches[1].location.line, 4);
                assert_eq!(branches[1].condition.to_string(), "x < 10");
                let else_branch = else_branch.as_ref().expect("else branch");
                assert_eq!(else_branch.location.line, 6);
                assert_eq!(else_branch.body.len(), 1);
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_inline_suite_and_semicolons() {
        let program = parse("x = 10; y = 20\nif x < y: z = x + y; print(z)\n").unwrap();

        assert_eq!(program.statements.len(), 3);
        match &program.statements[2] {
            Stmt::If { branches, .. } => {
                assert_eq!(branches[0].body.len(), 2);
                assert!(matches!(branches[0].body[1], Stmt::Print { .. }));
            }
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_blocks() {
        let source = "\
for i in range(2):
    for j in range(3):
        if i == j:
            print(i, j)
    x = i
y = 0
";
        let program = parse(source).unwrap();
        assert_eq!(program.statements.len(), 2);

        let Stmt::For { body, .. } = &program.statements[0] else {
            panic!("Expected outer for");
        };
        assert_eq!(body.len(), 2);
        let Stmt::For { body: inner, .. } = &body[0] else {
            panic!("Expected inner for");
        };
        assert!(matches!(inner[0], Stmt::If { .. }));
    }

    #[test]
    fn test_unexpected_indent_inside_block() {
        let source = "for i in range(2):\n    x = i\n    y = x\n        z = y\n";
        let err = parse(source).unwrap_err();
        assert_eq!(err.message, "unexpected indent");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_blocks_nested_too_deeply() {
        let mut source = String::new();
        for level in 0..=crate::interpreter::constants::MAX_NESTING_DEPTH {
            source.push_str(&"    ".repeat(level));
            source.push_str("if True:\n");
        }
        source.push_str(&"    ".repeat(crate::interpreter::constants::MAX_NESTING_DEPTH + 1));
        source.push_str("pass\n");

        let err = parse(&source).unwrap_err();
        assert_eq!(err.message, "block nested too deeply");
    }

    #[test]
    fn test_print_arguments() {
        let program = parse("print()\nprint(1, \"a\", x,)\n").unwrap();
        let counts: Vec<usize> = program
            .statements
            .iter()
            .map(|s| match s {
                Stmt::Print { args, .. } => args.len(),
                _ => panic!("Expected print"),
            })
            .collect();
        assert_eq!(counts, vec![0, 3]);
    }

    #[test]
    fn test_pass_body() {
        let program = parse("for i in range(1000):\n    pass\n").unwrap();
        let Stmt::For { body, .. } = &program.statements[0] else {
            panic!("Expected for");
        };
        assert!(matches!(body[0], Stmt::Pass { .. }));
    }

    #[test]
    fn test_range_outside_for_is_error() {
        let err = parse("x = range(3)\n").unwrap_err();
        assert!(err.message.contains("range()"));
        assert_eq!(err.line(), 1);

        let err = parse("range(3)\n").unwrap_err();
        assert!(err.message.contains("iterable of a for loop"));
    }

    #[test]
    fn test_for_requires_range() {
        let err = parse("for i in items:\n    print(i)\n").unwrap_err();
        assert!(err.message.contains("range(...)"));

        let err = parse("for i in range(1, 2):\n    print(i)\n").unwrap_err();
        assert_eq!(err.message, "range() takes exactly one argument");
    }

    #[test]
    fn test_missing_colon() {
        let err = parse("if x < 3\n    print(x)\n").unwrap_err();
        assert_eq!(err.to_string(), "expected ':' after if condition, found end of line at line 1");
    }

    #[test]
    fn test_missing_indented_block() {
        let err = parse("for i in range(3):\nprint(i)\n").unwrap_err();
        assert_eq!(err.message, "expected an indented block after 'for'");
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_stray_else() {
        let err = parse("else:\n    x = 1\n").unwrap_err();
        assert_eq!(err.to_string(), "unexpected token 'else' at line 1");
    }
}
