//! Source parser for the teaching language
//!
//! This module transforms source text into a statement tree:
//! - [`lexer`]: Tokenization (source text → tokens, including indent/dedent)
//! - [`parse`]: Parser struct, error type and entry point (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! A small, Python-shaped subset:
//! - Values: integers, floats, strings (single or double quoted), `True`/`False`
//! - Statements: assignment, `print(...)`, `if`/`elif`/`else`,
//!   `for name in range(n)`, `pass`
//! - Expressions: `+ - * /` and comparisons, parentheses
//! - Blocks are delimited by indentation, Python-style
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse, ParseError, Parser};
