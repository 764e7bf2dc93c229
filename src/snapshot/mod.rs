// Execution steps: the recorded, replayable history of one trace

use crate::interpreter::errors::TraceError;
use crate::memory::Variables;
use serde::Serialize;

/// Console buffer capturing `print` output
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Console { lines: Vec::new() }
    }

    /// Append one printed line
    pub fn print_line(&mut self, text: String) {
        self.lines.push(text);
    }

    /// Get all lines printed so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One immutable record of interpreter state.
///
/// `output` is the whole console history up to and including this step, so a
/// consumer can render any step without replaying the ones before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    pub line_no: usize,
    #[serde(rename = "code")]
    pub source_line: String,
    pub action: String,
    pub reason: String,
    pub variables: Variables,
    pub output: Vec<String>,
}

/// Append-only step history with a hard cap on its length
#[derive(Debug)]
pub struct StepLog {
    steps: Vec<ExecutionStep>,
    max_steps: usize,
}

impl StepLog {
    pub fn new(max_steps: usize) -> Self {
        StepLog {
            steps: Vec::new(),
            max_steps,
        }
    }

    /// Whether another push would exceed the cap
    pub fn is_full(&self) -> bool {
        self.steps.len() >= self.max_steps
    }

    /// Add a step to history; callers check [`StepLog::is_full`] first
    pub fn push(&mut self, step: ExecutionStep) {
        self.steps.push(step);
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&ExecutionStep> {
        self.steps.get(index)
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step_limit(&self) -> usize {
        self.max_steps
    }

    pub fn into_trace(self) -> Trace {
        Trace { steps: self.steps }
    }
}

/// A completed, successful trace: the full ordered step sequence
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<ExecutionStep>,
}

impl Trace {
    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&ExecutionStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionStep> {
        self.steps.iter()
    }

    /// Everything the program printed, in execution order
    pub fn final_output(&self) -> &[String] {
        self.steps.last().map(|s| s.output.as_slice()).unwrap_or(&[])
    }

    /// Variable state after the last step
    pub fn final_variables(&self) -> Option<&Variables> {
        self.steps.last().map(|s| &s.variables)
    }

    pub fn into_steps(self) -> Vec<ExecutionStep> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a ExecutionStep;
    type IntoIter = std::slice::Iter<'a, ExecutionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Wire form handed to consumers: either all steps, or an error and no steps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceResult {
    pub steps: Vec<ExecutionStep>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl From<Result<Trace, TraceError>> for TraceResult {
    fn from(result: Result<Trace, TraceError>) -> Self {
        match result {
            Ok(trace) => TraceResult {
                steps: trace.into_steps(),
                success: true,
                error: None,
                line: None,
                kind: None,
            },
            Err(err) => TraceResult {
                steps: Vec::new(),
                success: false,
                error: Some(err.to_string()),
                line: err.line(),
                kind: Some(err.kind()),
            },
        }
    }
}
