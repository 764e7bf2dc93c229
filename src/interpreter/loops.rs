//! Loop statement execution (`for name in range(n)`).
//!
//! The range bound is evaluated exactly once, before the first iteration, so
//! the number of iterations is fixed up front and every loop terminates.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::narrator::StepContext;
use crate::memory::value::Value;
use crate::parser::ast::{Expr, SourceLocation, Stmt};

impl Interpreter {
    /// Executes a `for var in range(n)` loop.
    ///
    /// Each iteration binds `var`, records a "Loop Iteration" step at the loop
    /// header, then runs the body. `var` keeps its last value after the loop;
    /// `range(0)` runs nothing and leaves `var` untouched.
    pub(crate) fn execute_for(
        &mut self,
        var: &str,
        range: &Expr,
        body: &[Stmt],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let bound_expr = match range {
            Expr::RangeCall { arg, .. } => arg.as_ref(),
            other => other,
        };
        let total = self.range_bound(evaluate(bound_expr, &self.env)?, bound_expr.location())?;

        for i in 0..total {
            self.env.set(var, Value::Int(i));
            self.record(
                location,
                StepContext::LoopIteration {
                    var,
                    iteration: (i + 1) as usize,
                    total: total as usize,
                    value: i,
                },
            )?;
            self.execute_block(body)?;
        }

        Ok(())
    }

    fn range_bound(&self, bound: Value, location: SourceLocation) -> Result<i64, RuntimeError> {
        match bound {
            Value::Int(n) if n >= 0 => Ok(n),
            Value::Int(n) => Err(RuntimeError::InvalidRange {
                message: format!("range() bound must not be negative, got {}", n),
                location,
            }),
            other => Err(RuntimeError::TypeMismatch {
                message: format!(
                    "range() bound must be an int, got {} {}",
                    other.type_name(),
                    other.repr()
                ),
                location,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::{Interpreter, TraceConfig};
    use crate::interpreter::errors::RuntimeError;
    use crate::memory::value::Value;
    use crate::parser::parse;

    fn run(source: &str) -> Result<Interpreter, RuntimeError> {
        let program = parse(source).expect("parse");
        let mut interpreter = Interpreter::new(source, &TraceConfig::default());
        interpreter.run(&program)?;
        Ok(interpreter)
    }

    #[test]
    fn test_iteration_steps() {
        let interpreter = run("for i in range(3):\n    pass\n").unwrap();
        let trace = interpreter.into_trace().unwrap();
        let reasons: Vec<&str> = trace.iter().map(|s| s.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "Iteration 1 of 3: 'i' is now 0.",
                "Iteration 2 of 3: 'i' is now 1.",
                "Iteration 3 of 3: 'i' is now 2.",
            ]
        );
    }

    #[test]
    fn test_zero_iterations_leave_var_unbound() {
        let interpreter = run("n = 0\nfor i in range(n):\n    print(i)\n").unwrap();
        assert!(!interpreter.environment().contains("i"));
        assert_eq!(interpreter.total_steps(), 1);
    }

    #[test]
    fn test_bound_evaluated_once() {
        let interpreter = run("n = 2\nfor i in range(n):\n    n = n + 1\n").unwrap();
        assert_eq!(interpreter.environment().get("n"), Some(&Value::Int(4)));
        assert_eq!(interpreter.environment().get("i"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_negative_bound() {
        let err = run("for i in range(-1):\n    pass\n").err().unwrap();
        assert!(matches!(err, RuntimeError::InvalidRange { .. }));
    }

    #[test]
    fn test_non_integer_bound() {
        let err = run("for i in range(2.5):\n    pass\n").err().unwrap();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));

        let err = run("for i in range(\"3\"):\n    pass\n").err().unwrap();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }
}
