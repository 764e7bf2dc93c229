// Execution engine for the tracing interpreter

use crate::interpreter::constants::DEFAULT_STEP_LIMIT;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::narrator::{narrate, Narration, StepContext};
use crate::memory::Environment;
use crate::parser::ast::{Program, SourceLocation};
use crate::snapshot::{Console, ExecutionStep, StepLog, Trace};

/// Knobs for a single trace call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Maximum number of steps recorded before the trace fails
    pub step_limit: usize,
}

impl TraceConfig {
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

/// Lifecycle of one trace run
#[derive(Debug, Clone, PartialEq)]
pub enum TracerState {
    Running,
    Halted,
    Failed(RuntimeError),
}

/// Executes a parsed program and records one step per observable event.
///
/// The interpreter does not own the program: statements are borrowed from
/// the caller while step contexts borrow names out of them.
pub struct Interpreter {
    /// Source text split into lines, for the `code` field of each step
    source_lines: Vec<String>,

    /// Flat, program-wide variable table
    pub(crate) env: Environment,

    /// Everything printed so far
    pub(crate) console: Console,

    /// Recorded steps
    log: StepLog,

    state: TracerState,
}

impl Interpreter {
    /// Create a new interpreter for the given source text
    pub fn new(source: &str, config: &TraceConfig) -> Self {
        Interpreter {
            source_lines: source.lines().map(|l| l.trim().to_string()).collect(),
            env: Environment::new(),
            console: Console::new(),
            log: StepLog::new(config.step_limit),
            state: TracerState::Running,
        }
    }

    /// Run the program from start to finish
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        if self.state != TracerState::Running {
            log::warn!("run() called on a finished interpreter; ignoring");
            return match &self.state {
                TracerState::Failed(err) => Err(err.clone()),
                _ => Ok(()),
            };
        }

        log::debug!(
            "Tracing program with {} top-level statements",
            program.statements.len()
        );

        match self.execute_block(&program.statements) {
            Ok(()) => {
                log::info!(
                    "Trace completed: {} steps, {} output lines",
                    self.log.len(),
                    self.console.len()
                );
                self.state = TracerState::Halted;
                Ok(())
            }
            Err(err) => {
                log::debug!("Trace failed after {} steps: {}", self.log.len(), err);
                self.state = TracerState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Run the program and hand back its trace, or the error that stopped it
    pub fn execute(mut self, program: &Program) -> Result<Trace, RuntimeError> {
        self.run(program)?;
        Ok(self.log.into_trace())
    }

    /// Record a step for `context`, narrated and stamped with the current state
    pub(crate) fn record(
        &mut self,
        location: SourceLocation,
        context: StepContext<'_>,
    ) -> Result<(), RuntimeError> {
        if self.log.is_full() {
            return Err(RuntimeError::StepLimitExceeded {
                limit: self.log.step_limit(),
                location,
            });
        }

        let Narration { action, reason } = narrate(&context);
        log::trace!(
            "step {} line {}: {} - {}",
            self.log.len(),
            location.line,
            action,
            reason
        );

        let step = ExecutionStep {
            line_no: location.line,
            source_line: self.source_line(location.line),
            action: action.to_string(),
            reason,
            variables: self.env.snapshot(),
            output: self.console.lines().to_vec(),
        };
        self.log.push(step);

        Ok(())
    }

    fn source_line(&self, line: usize) -> String {
        line.checked_sub(1)
            .and_then(|idx| self.source_lines.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    // ========== Getter methods ==========

    pub fn state(&self) -> &TracerState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn total_steps(&self) -> usize {
        self.log.len()
    }

    /// The recorded trace, available only after a successful run
    pub fn into_trace(self) -> Option<Trace> {
        match self.state {
            TracerState::Halted => Some(self.log.into_trace()),
            _ => None,
        }
    }
}
