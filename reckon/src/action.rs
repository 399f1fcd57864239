use strum::IntoStaticStr;

use crate::EvalError;

/// Every operation a user can trigger on a [crate::Calculator]
///
/// Front ends map their inputs (keys, buttons, clicks) to actions and identify their own
/// widgets by action, never by the text those widgets display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Action {
    /// Type a character into the expression
    Input(char),
    /// Evaluate the expression
    Evaluate,
    /// Delete the last character
    Backspace,
    /// Clear the expression
    Clear,
    /// Negate the trailing number
    ToggleSign,
    /// Append a percent sign
    Percent,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
}

impl Action {
    /// The name of the action, for logging
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The result of an [Action::Evaluate]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The expression was replaced by its value
    Evaluated(f64),
    /// The expression was replaced by the error marker
    Failed(EvalError),
}
