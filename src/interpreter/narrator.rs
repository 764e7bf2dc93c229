//! Step narration
//!
//! [`narrate`] turns what just happened into the short `action` tag and the
//! one-sentence `reason` stored on each execution step. It is a pure mapping
//! keyed by [`StepContext`] variant: no clock, no randomness, no I/O. The
//! same program therefore always narrates to byte-identical text, which the
//! step player relies on when it scrubs back and forth.

use crate::memory::value::Value;
use crate::parser::ast::Expr;

pub const ACTION_ASSIGNMENT: &str = "Assignment";
pub const ACTION_OUTPUT: &str = "Output";
pub const ACTION_CONDITION: &str = "Condition";
pub const ACTION_LOOP_ITERATION: &str = "Loop Iteration";

/// Everything the narrator may look at for one step
#[derive(Debug, Clone, Copy)]
pub enum StepContext<'a> {
    Assignment {
        name: &'a str,
        value: &'a Value,
        /// Value before this write; `None` when the variable is new
        previous: Option<&'a Value>,
        /// Variables the right-hand side read, in order of first appearance
        sources: &'a [String],
    },
    Output {
        line: &'a str,
    },
    Condition(ConditionOutcome<'a>),
    LoopIteration {
        var: &'a str,
        /// 1-based
        iteration: usize,
        total: usize,
        value: i64,
    },
}

/// Which arm of an `if` statement ran
#[derive(Debug, Clone, Copy)]
pub enum ConditionOutcome<'a> {
    /// An `if` or `elif` condition held
    Branch {
        keyword: &'static str,
        condition: &'a Expr,
        value: &'a Value,
        /// Earlier conditions that were false
        skipped: usize,
    },
    /// Every condition was false and the `else` arm ran
    Else { skipped: usize },
    /// Every condition was false and there is no `else`
    NoBranch {
        condition: &'a Expr,
        value: &'a Value,
        checked: usize,
    },
}

/// The `(action, reason)` pair stored on a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub action: &'static str,
    pub reason: String,
}

pub fn narrate(context: &StepContext<'_>) -> Narration {
    match *context {
        StepContext::Assignment {
            name,
            value,
            previous,
            sources,
        } => {
            let mut reason = match previous {
                None => format!("Created variable '{}' with value {}.", name, value.repr()),
                Some(old) if old == value => {
                    format!("Set '{}' to {} (unchanged).", name, value.repr())
                }
                Some(old) => format!(
                    "Updated '{}' from {} to {}.",
                    name,
                    old.repr(),
                    value.repr()
                ),
            };
            if !sources.is_empty() {
                reason.push_str(&format!(" Computed from {}.", join_names(sources)));
            }
            Narration {
                action: ACTION_ASSIGNMENT,
                reason,
            }
        }

        StepContext::Output { line } => Narration {
            action: ACTION_OUTPUT,
            reason: if line.is_empty() {
                "Printed an empty line to the console.".to_string()
            } else {
                format!("Printed \"{}\" to the console.", line)
            },
        },

        StepContext::Condition(outcome) => Narration {
            action: ACTION_CONDITION,
            reason: narrate_condition(outcome),
        },

        StepContext::LoopIteration {
            var,
            iteration,
            total,
            value,
        } => Narration {
            action: ACTION_LOOP_ITERATION,
            reason: format!(
                "Iteration {} of {}: '{}' is now {}.",
                iteration, total, var, value
            ),
        },
    }
}

fn narrate_condition(outcome: ConditionOutcome<'_>) -> String {
    match outcome {
        ConditionOutcome::Branch {
            keyword,
            condition,
            value,
            skipped,
        } => {
            let lead = match skipped {
                0 => String::new(),
                1 => "The previous condition was False. ".to_string(),
                n => format!("The previous {} conditions were False. ", n),
            };
            format!(
                "{}The condition `{}` is {}, so the {} block runs.",
                lead,
                condition,
                describe_truth(value),
                keyword
            )
        }
        ConditionOutcome::Else { skipped } => {
            if skipped == 1 {
                "The condition was False, so the else block runs.".to_string()
            } else {
                format!(
                    "None of the {} conditions were True, so the else block runs.",
                    skipped
                )
            }
        }
        ConditionOutcome::NoBranch {
            condition,
            value,
            checked,
        } => {
            if checked == 1 {
                format!(
                    "The condition `{}` is {} and there is no else, so no branch runs.",
                    condition,
                    describe_truth(value)
                )
            } else {
                format!(
                    "None of the {} conditions were True and there is no else, so no branch runs.",
                    checked
                )
            }
        }
    }
}

/// `True`/`False` as-is; other values note how they were read
fn describe_truth(value: &Value) -> String {
    match value {
        Value::Bool(_) => value.to_string(),
        other if other.is_truthy() => format!("{} (truthy)", other.repr()),
        other => format!("{} (falsy)", other.repr()),
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
