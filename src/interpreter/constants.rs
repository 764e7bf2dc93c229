// Constants for the tracing interpreter

/// Default cap on recorded steps per trace
/// Bounded loops always terminate; the cap only guards against huge nested ranges
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// Deepest nesting of parentheses, operator chains and blocks the parser accepts
/// Evaluation and narration recurse over the tree, so this also bounds their stack use
pub const MAX_NESTING_DEPTH: usize = 100;
