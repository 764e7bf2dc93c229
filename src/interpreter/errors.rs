//! Error types for the tracing interpreter
//!
//! [`RuntimeError`] covers everything that can go wrong while a parsed program
//! executes. [`TraceError`] is what a trace call returns on failure: either a
//! syntax error from the parser or a runtime error, each carrying the line it
//! happened on.
//!
//! All errors are fatal. A failed trace returns no steps.

use crate::parser::ast::SourceLocation;
use crate::parser::ParseError;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read of a variable that was never assigned
    #[error("Undefined variable '{name}' at line {line}", line = .location.line)]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Operand types the operator does not accept
    #[error("Type mismatch at line {line}: {message}", line = .location.line)]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    /// `range` bound that is negative
    #[error("Invalid range at line {line}: {message}", line = .location.line)]
    InvalidRange {
        message: String,
        location: SourceLocation,
    },

    /// Division by zero
    #[error("Division by zero in {operation} at line {line}", line = .location.line)]
    DivisionByZero {
        operation: String,
        location: SourceLocation,
    },

    /// Integer overflow in arithmetic operation
    #[error("Integer overflow in {operation} at line {line}", line = .location.line)]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Step history cap reached
    #[error("Step limit of {limit} exceeded at line {line}", line = .location.line)]
    StepLimitExceeded {
        limit: usize,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::InvalidRange { location, .. }
            | RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::StepLimitExceeded { location, .. } => *location,
        }
    }

    /// Short machine-readable label for the error class
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::UndefinedVariable { .. } => "UndefinedVariable",
            RuntimeError::TypeMismatch { .. } => "TypeMismatch",
            RuntimeError::InvalidRange { .. } => "InvalidRange",
            RuntimeError::DivisionByZero { .. } => "DivisionByZero",
            RuntimeError::IntegerOverflow { .. } => "IntegerOverflow",
            RuntimeError::StepLimitExceeded { .. } => "StepLimitExceeded",
        }
    }
}

/// Failure of a whole trace call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl TraceError {
    /// Line the error was detected on
    pub fn line(&self) -> Option<usize> {
        match self {
            TraceError::Syntax(err) => Some(err.line()),
            TraceError::Runtime(err) => Some(err.location().line),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TraceError::Syntax(_) => "SyntaxError",
            TraceError::Runtime(err) => err.kind(),
        }
    }

    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            TraceError::Runtime(err) => Some(err),
            TraceError::Syntax(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_error_messages() {
        let err = RuntimeError::UndefinedVariable {
            name: "y".to_string(),
            location: SourceLocation::new(3, 5),
        };
        assert_eq!(err.to_string(), "Undefined variable 'y' at line 3");
        assert_eq!(err.kind(), "UndefinedVariable");

        let err = RuntimeError::StepLimitExceeded {
            limit: 10,
            location: SourceLocation::new(2, 1),
        };
        assert_eq!(err.to_string(), "Step limit of 10 exceeded at line 2");
    }

    #[test]
    fn test_trace_error_wraps_both_kinds() {
        let syntax: TraceError =
            ParseError::new("unexpected token 'x'", SourceLocation::new(4, 1)).into();
        assert_eq!(syntax.to_string(), "Syntax error: unexpected token 'x' at line 4");
        assert_eq!(syntax.line(), Some(4));
        assert_eq!(syntax.kind(), "SyntaxError");

        let runtime: TraceError = RuntimeError::TypeMismatch {
            message: "cannot add str and int".to_string(),
            location: SourceLocation::new(1, 7),
        }
        .into();
        assert_eq!(runtime.kind(), "TypeMismatch");
        assert!(runtime.as_runtime().is_some());
    }
}
