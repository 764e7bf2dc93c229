//! Tracing interpreter
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`engine::Interpreter`], which runs a program and records steps
//! - [`evaluator`]: pure expression evaluation
//! - [`narrator`]: maps each step's context to an action and a reason
//! - [`errors`]: runtime and trace error types
//!
//! # Execution Model
//!
//! The interpreter walks the statement tree once, top to bottom. Every
//! assignment, `print`, taken (or skipped) `if`, and loop iteration records
//! one [`crate::snapshot::ExecutionStep`] holding a full copy of the
//! variables and console output at that moment.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod evaluator;
mod loops;
pub mod narrator;
mod statements;
