//! Lexer (tokenizer) for the teaching language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Block structure is indentation-based, so the lexer measures the leading
//! whitespace of every logical line and emits explicit [`Token::Indent`] and
//! [`Token::Dedent`] tokens, followed by a [`Token::Newline`] at the end of
//! each line. Blank lines and `#` comments never reach the token stream.
//!
//! Tokenizing never fails. Characters the language does not know become
//! [`Token::Unknown`], and lint-level problems (mixed tabs and spaces,
//! inconsistent dedents, unterminated strings) become [`Token::Malformed`].
//! The parser turns either one into a syntax error at the right line.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    FloatLiteral(f64, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    If(SourceLocation),
    Elif(SourceLocation),
    Else(SourceLocation),
    For(SourceLocation),
    In(SourceLocation),
    Print(SourceLocation),
    Range(SourceLocation),
    Pass(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),  // +
    Minus(SourceLocation), // -
    Star(SourceLocation),  // *
    Slash(SourceLocation), // /

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    Comma(SourceLocation),     // ,
    Colon(SourceLocation),     // :
    Semicolon(SourceLocation), // ;

    // Layout
    Newline(SourceLocation),
    Indent(SourceLocation),
    Dedent(SourceLocation),

    // Lint tokens, always rejected by the parser
    Unknown(char, SourceLocation),
    Malformed(String, SourceLocation),

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::FloatLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::If(loc)
            | Token::Elif(loc)
            | Token::Else(loc)
            | Token::For(loc)
            | Token::In(loc)
            | Token::Print(loc)
            | Token::Range(loc)
            | Token::Pass(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Comma(loc)
            | Token::Colon(loc)
            | Token::Semicolon(loc)
            | Token::Newline(loc)
            | Token::Indent(loc)
            | Token::Dedent(loc)
            | Token::Unknown(_, loc)
            | Token::Malformed(_, loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "'{}'", n),
            Token::FloatLiteral(x, _) => write!(f, "'{:?}'", x),
            Token::StringLiteral(s, _) => write!(f, "'\"{}\"'", s),
            Token::Ident(s, _) => write!(f, "'{}'", s),
            Token::If(_) => write!(f, "'if'"),
            Token::Elif(_) => write!(f, "'elif'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::For(_) => write!(f, "'for'"),
            Token::In(_) => write!(f, "'in'"),
            Token::Print(_) => write!(f, "'print'"),
            Token::Range(_) => write!(f, "'range'"),
            Token::Pass(_) => write!(f, "'pass'"),
            Token::True(_) => write!(f, "'True'"),
            Token::False(_) => write!(f, "'False'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Colon(_) => write!(f, "':'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Newline(_) => write!(f, "end of line"),
            Token::Indent(_) => write!(f, "indent"),
            Token::Dedent(_) => write!(f, "dedent"),
            Token::Unknown(c, _) => write!(f, "'{}'", c),
            Token::Malformed(message, _) => write!(f, "{}", message),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer for the teaching language
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Open indentation widths; the bottom entry is always 0
    indent_stack: Vec<usize>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.lex_line(&mut tokens);
        }

        // Close any blocks still open at end of input
        let loc = self.current_location();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            tokens.push(Token::Dedent(loc));
        }
        tokens.push(Token::Eof(loc));

        tokens
    }

    /// Lex one physical line, including its indentation and trailing newline
    fn lex_line(&mut self, tokens: &mut Vec<Token>) {
        let line_start = self.current_location();
        let (width, mixed) = self.consume_indentation();

        // Blank and comment-only lines carry no block structure
        if matches!(self.peek(), None | Some('\n') | Some('#'))
            || (self.peek() == Some('\r') && matches!(self.peek_ahead(1), None | Some('\n')))
        {
            self.skip_rest_of_line();
            return;
        }

        if mixed {
            tokens.push(Token::Malformed(
                "inconsistent use of tabs and spaces in indentation".to_string(),
                line_start,
            ));
        }
        self.emit_indentation(width, tokens);

        loop {
            self.skip_inline_whitespace();
            match self.peek() {
                None => break,
                Some('\n') => {
                    self.advance();
                    break;
                }
                Some('#') => {
                    self.skip_rest_of_line();
                    break;
                }
                Some(_) => tokens.push(self.next_token()),
            }
        }

        tokens.push(Token::Newline(SourceLocation::new(line_start.line, 0)));
    }

    /// Consume leading whitespace, returning its width and whether tabs and spaces were mixed
    fn consume_indentation(&mut self) -> (usize, bool) {
        let mut width = 0;
        let mut seen_space = false;
        let mut seen_tab = false;

        while let Some(ch) = self.peek() {
            match ch {
                ' ' => seen_space = true,
                '\t' => seen_tab = true,
                _ => break,
            }
            width += 1;
            self.advance();
        }

        (width, seen_space && seen_tab)
    }

    /// Compare a line's indentation against the open blocks
    fn emit_indentation(&mut self, width: usize, tokens: &mut Vec<Token>) {
        let loc = self.current_location();
        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            self.indent_stack.push(width);
            tokens.push(Token::Indent(loc));
            return;
        }

        while self.indent_stack.last().is_some_and(|&top| top > width) {
            self.indent_stack.pop();
            tokens.push(Token::Dedent(loc));
        }

        if self.indent_stack.last().copied().unwrap_or(0) != width {
            tokens.push(Token::Malformed(
                "unindent does not match any outer indentation level".to_string(),
                loc,
            ));
        }
    }

    /// Get next token; the caller guarantees a non-whitespace character is available
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::Eof(loc),
        };

        match ch {
            '"' | '\'' => self.string_literal(ch, loc),

            '0'..='9' => self.number_literal(ch, loc),

            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(c, loc),

            '+' => Token::Plus(loc),
            '-' => Token::Minus(loc),
            '*' => Token::Star(loc),
            '/' => Token::Slash(loc),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::EqEq(loc)
                } else {
                    Token::Eq(loc)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::NotEq(loc)
                } else {
                    Token::Unknown('!', loc)
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::Le(loc)
                } else {
                    Token::Lt(loc)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::Ge(loc)
                } else {
                    Token::Gt(loc)
                }
            }
            '(' => Token::LParen(loc),
            ')' => Token::RParen(loc),
            ',' => Token::Comma(loc),
            ':' => Token::Colon(loc),
            ';' => Token::Semicolon(loc),

            other => Token::Unknown(other, loc),
        }
    }

    /// Parse a string literal opened by `quote`; no escape sequences
    fn string_literal(&mut self, quote: char, loc: SourceLocation) -> Token {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == quote {
                self.advance(); // consume closing quote
                return Token::StringLiteral(string, loc);
            }
            if ch == '\n' {
                break;
            }
            string.push(ch);
            self.advance();
        }

        Token::Malformed("unterminated string literal".to_string(), loc)
    }

    /// Parse an integer or float literal
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);

            return match num_str.parse::<f64>() {
                Ok(value) => Token::FloatLiteral(value, loc),
                Err(_) => Token::Malformed(format!("invalid float literal '{}'", num_str), loc),
            };
        }

        match num_str.parse::<i64>() {
            Ok(value) => Token::IntLiteral(value, loc),
            Err(_) => Token::Malformed(format!("integer literal '{}' is too large", num_str), loc),
        }
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                buf.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "if" => Token::If(loc),
            "elif" => Token::Elif(loc),
            "else" => Token::Else(loc),
            "for" => Token::For(loc),
            "in" => Token::In(loc),
            "print" => Token::Print(loc),
            "range" => Token::Range(loc),
            "pass" => Token::Pass(loc),
            "True" => Token::True(loc),
            "False" => Token::False(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\r')) {
            self.advance();
        }
    }

    /// Skip up to and including the next newline
    fn skip_rest_of_line(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = lex("total = total + 1\n");

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "total"));
        assert!(matches!(tokens[1], Token::Eq(_)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "total"));
        assert!(matches!(tokens[3], Token::Plus(_)));
        assert!(matches!(tokens[4], Token::IntLiteral(1, _)));
        assert!(matches!(tokens[5], Token::Newline(_)));
        assert!(matches!(tokens[6], Token::Eof(_)));
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_indent_and_dedent() {
        let tokens = lex("for i in range(3):\n    print(i)\nx = 1");

        let layout: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Indent(_) => Some("indent"),
                Token::Dedent(_) => Some("dedent"),
                Token::Newline(_) => Some("newline"),
                _ => None,
            })
            .collect();
        assert_eq!(layout, vec!["newline", "indent", "newline", "dedent", "newline"]);
        assert_eq!(tokens[0].location().line, 1);
        assert!(matches!(tokens[9], Token::Indent(_)));
        assert!(matches!(tokens[10], Token::Print(loc) if loc.line == 2));
    }

    #[test]
    fn test_dedents_flushed_at_end() {
        let tokens = lex("if a:\n    if b:\n        c = 1\n");
        let dedents = tokens
            .iter()
            .filter(|t| matches!(t, Token::Dedent(_)))
            .count();
        assert_eq!(dedents, 2);
        assert!(matches!(tokens.last(), Some(Token::Eof(_))));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let tokens = lex("# heading\n\nx = 1  # trailing\n   \n  # indented comment\ny = 2\n");

        assert!(!tokens.iter().any(|t| matches!(t, Token::Indent(_))));
        assert!(matches!(tokens[0], Token::Ident(ref s, loc) if s == "x" && loc.line == 3));
        assert!(matches!(tokens[4], Token::Ident(ref s, loc) if s == "y" && loc.line == 6));
    }

    #[test]
    fn test_string_literals_both_quotes() {
        let tokens = lex("a = \"Logic\" + 'Trace'");

        assert!(matches!(tokens[2], Token::StringLiteral(ref s, _) if s == "Logic"));
        assert!(matches!(tokens[4], Token::StringLiteral(ref s, _) if s == "Trace"));
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        let tokens = lex("s = \"#1\"");
        assert!(matches!(tokens[2], Token::StringLiteral(ref s, _) if s == "#1"));
    }

    #[test]
    fn test_numbers_and_operators() {
        let tokens = lex("x = 2.5 <= 10 != 3 >= 1.0 == y");

        assert!(matches!(tokens[2], Token::FloatLiteral(v, _) if v == 2.5));
        assert!(matches!(tokens[3], Token::Le(_)));
        assert!(matches!(tokens[4], Token::IntLiteral(10, _)));
        assert!(matches!(tokens[5], Token::NotEq(_)));
        assert!(matches!(tokens[7], Token::Ge(_)));
        assert!(matches!(tokens[9], Token::EqEq(_)));
    }

    #[test]
    fn test_unknown_character_is_not_fatal() {
        let tokens = lex("x = 1 $ 2");
        assert!(matches!(tokens[3], Token::Unknown('$', _)));
        assert!(matches!(tokens[4], Token::IntLiteral(2, _)));
    }

    #[test]
    fn test_unterminated_string_is_malformed() {
        let tokens = lex("x = \"open\ny = 2");
        assert!(matches!(tokens[2], Token::Malformed(_, loc) if loc.line == 1));
        assert!(tokens
            .iter()
            .any(|t| matches!(t, Token::Ident(ref s, _) if s == "y")));
    }

    #[test]
    fn test_mixed_tabs_and_spaces() {
        let tokens = lex("if x:\n \tprint(x)\n");
        assert!(tokens.iter().any(
            |t| matches!(t, Token::Malformed(ref m, loc) if m.contains("tabs") && loc.line == 2)
        ));
    }

    #[test]
    fn test_inconsistent_dedent() {
        let tokens = lex("if x:\n    y = 1\n  z = 2\n");
        assert!(tokens.iter().any(
            |t| matches!(t, Token::Malformed(ref m, loc) if m.contains("unindent") && loc.line == 3)
        ));
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = lex("x = 1\r\n\r\ny = 2\r\n");
        let idents = tokens
            .iter()
            .filter(|t| matches!(t, Token::Ident(_, _)))
            .count();
        assert_eq!(idents, 2);
        assert!(!tokens.iter().any(|t| matches!(t, Token::Unknown(_, _))));
    }
}
