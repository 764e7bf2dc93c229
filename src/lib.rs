//! # Introduction
//!
//! logictrace runs small programs written in a Python-like teaching subset and
//! records every observable step: which line ran, what happened, a short
//! plain-language reason, and the complete variables and console output after
//! that step. The recorded trace can be exported as JSON, dumped as text, or
//! replayed forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → Program → Interpreter → Trace → JSON / text / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source (indentation included) and builds the
//!    statement tree.
//! 2. [`interpreter`]: walks the tree, evaluates expressions, narrates and
//!    records one step per event.
//! 3. [`memory`]: scalar [`memory::value::Value`]s held in a flat, ordered
//!    [`memory::Environment`].
//! 4. [`snapshot`]: the step log, the finished [`Trace`] and its wire form
//!    [`TraceResult`].
//! 5. [`ui`]: ratatui-based step player; not part of the stable library API.
//!
//! ## Supported subset
//!
//! Values: `int`, `float`, `str`, `bool`. Statements: assignment, `print(...)`,
//! `if/elif/else`, `for name in range(n)`, `pass`. Operators: `+ - * /` and
//! `== != < <= > >=`.
//!
//! ```
//! let trace = logictrace::trace("x = 10\ny = 20\nprint(x + y)\n").unwrap();
//! assert_eq!(trace.len(), 3);
//! assert_eq!(trace.final_output(), ["30".to_string()]);
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use interpreter::engine::TraceConfig;
pub use interpreter::errors::{RuntimeError, TraceError};
pub use snapshot::{ExecutionStep, Trace, TraceResult};

use interpreter::engine::Interpreter;

/// Trace `source` with the default configuration
pub fn trace(source: &str) -> Result<Trace, TraceError> {
    trace_with_config(source, &TraceConfig::default())
}

/// Parse and run `source`, returning every recorded step.
///
/// On failure no partial steps are returned: the error carries the kind,
/// message and line instead.
pub fn trace_with_config(source: &str, config: &TraceConfig) -> Result<Trace, TraceError> {
    let program = parser::parse(source)?;
    log::debug!("Parsed {} top-level statements", program.statements.len());

    let trace = Interpreter::new(source, config).execute(&program)?;
    Ok(trace)
}
