//! Statement execution implementation
//!
//! Adds `impl Interpreter` methods for every statement kind. Each method
//! performs the statement's effect first and then records the step, so the
//! recorded variables and output already include that effect. Condition
//! steps are the exception: they are recorded before the chosen body runs,
//! with the state the condition was evaluated against.
//!
//! `for` loops live in `loops`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::narrator::{ConditionOutcome, StepContext};
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter {
    pub(crate) fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute_statement(stmt)?;
        }
        Ok(())
    }

    /// Execute a single statement
    pub(crate) fn execute_statement(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Assign {
                name,
                value,
                location,
            } => self.execute_assign(name, value, *location),

            Stmt::Print { args, location } => self.execute_print(args, *location),

            Stmt::If {
                branches,
                else_branch,
                location,
            } => self.execute_if(branches, else_branch.as_ref(), *location),

            Stmt::For {
                var,
                range,
                body,
                location,
            } => self.execute_for(var, range, body, *location),

            Stmt::Pass { .. } => Ok(()),
        }
    }

    fn execute_assign(
        &mut self,
        name: &str,
        expr: &Expr,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = evaluate(expr, &self.env)?;
        let sources = expr.referenced_names();
        let previous = self.env.set(name, value.clone());

        self.record(
            location,
            StepContext::Assignment {
                name,
                value: &value,
                previous: previous.as_ref(),
                sources: &sources,
            },
        )
    }

    /// `print(a, b, ...)`: arguments joined by a single space, one line per call
    fn execute_print(&mut self, args: &[Expr], location: SourceLocation) -> Result<(), RuntimeError> {
        let parts = args
            .iter()
            .map(|arg| evaluate(arg, &self.env).map(|v| v.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let line = parts.join(" ");

        self.console.print_line(line.clone());
        self.record(location, StepContext::Output { line: &line })
    }

    fn execute_if(
        &mut self,
        branches: &[IfBranch],
        else_branch: Option<&ElseBranch>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let mut first_value: Option<Value> = None;

        for (idx, branch) in branches.iter().enumerate() {
            let value = evaluate(&branch.condition, &self.env)?;

            if value.is_truthy() {
                self.record(
                    branch.location,
                    StepContext::Condition(ConditionOutcome::Branch {
                        keyword: if idx == 0 { "if" } else { "elif" },
                        condition: &branch.condition,
                        value: &value,
                        skipped: idx,
                    }),
                )?;
                return self.execute_block(&branch.body);
            }

            if first_value.is_none() {
                first_value = Some(value);
            }
        }

        if let Some(else_branch) = else_branch {
            self.record(
                else_branch.location,
                StepContext::Condition(ConditionOutcome::Else {
                    skipped: branches.len(),
                }),
            )?;
            return self.execute_block(&else_branch.body);
        }

        // Nothing ran; still leave a step so the skip is visible
        match (branches.first(), first_value) {
            (Some(first), Some(value)) => self.record(
                location,
                StepContext::Condition(ConditionOutcome::NoBranch {
                    condition: &first.condition,
                    value: &value,
                    checked: branches.len(),
                }),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::{Interpreter, TraceConfig};
    use crate::memory::value::Value;
    use crate::parser::parse;
    use crate::snapshot::Trace;

    fn trace(source: &str) -> Trace {
        let program = parse(source).expect("parse");
        let mut interpreter = Interpreter::new(source, &TraceConfig::default());
        interpreter.run(&program).expect("run");
        interpreter.into_trace().expect("trace")
    }

    fn actions(trace: &Trace) -> Vec<&str> {
        trace.iter().map(|s| s.action.as_str()).collect()
    }

    #[test]
    fn test_print_joins_with_space() {
        let trace = trace("a = 1\nb = \"x\"\nprint(a, b, 2.5)\nprint()\n");
        assert_eq!(trace.final_output(), ["1 x 2.5".to_string(), String::new()]);
        assert_eq!(trace.steps()[2].reason, "Printed \"1 x 2.5\" to the console.");
    }

    #[test]
    fn test_elif_branch_taken() {
        let trace = trace("x = 5\nif x < 3:\n    y = 1\nelif x < 10:\n    y = 2\nelse:\n    y = 3\n");
        assert_eq!(actions(&trace), vec!["Assignment", "Condition", "Assignment"]);
        assert_eq!(trace.steps()[1].line_no, 4);
        assert!(trace.steps()[1].reason.contains("elif"));
        assert_eq!(trace.steps()[2].variables.get("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_else_branch_taken() {
        let trace = trace("x = 50\nif x < 3:\n    y = 1\nelse:\n    y = 3\n");
        assert_eq!(trace.steps()[1].line_no, 4);
        assert_eq!(
            trace.steps()[1].reason,
            "The condition was False, so the else block runs."
        );
    }

    #[test]
    fn test_no_branch_emits_single_step() {
        let trace = trace("x = 1\nif x > 5:\n    print(x)\nprint(\"after\")\n");
        assert_eq!(actions(&trace), vec!["Assignment", "Condition", "Output"]);
        assert_eq!(trace.steps()[1].line_no, 2);
        assert!(trace.steps()[1].reason.contains("no branch runs"));
        assert!(trace.steps()[1].output.is_empty());
    }

    #[test]
    fn test_condition_snapshot_before_body() {
        let trace = trace("if True:\n    z = 1\n");
        assert!(!trace.steps()[0].variables.contains("z"));
        assert!(trace.steps()[1].variables.contains("z"));
    }

    #[test]
    fn test_truthy_condition() {
        let trace = trace("name = \"Ada\"\nif name:\n    print(name)\n");
        assert!(trace.steps()[1].reason.contains("\"Ada\" (truthy)"));
    }

    #[test]
    fn test_pass_records_nothing() {
        let trace = trace("pass\nx = 1\n");
        assert_eq!(trace.len(), 1);
    }
}
