//! # Calculator Module - Session State and Orchestration
//!
//! The [Calculator] bundles everything a calculator session owns: the expression buffer, the
//! memory register, the history log and the storage they are persisted to. Front ends create
//! one calculator, feed it [Action]s and read its state back for rendering.
//!
//! ## Action Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/action_flow.mmd")]
//!
//! ## Persistence
//!
//! The memory register is written to [MEMORY_KEY] after every memory mutation, the history log
//! to [HISTORY_KEY] after every successful evaluation. Storage failures are logged and
//! otherwise ignored; a calculator keeps working when its storage doesn't.
//!
//! ## Usage Example
//!
//! ```rust
//! use reckon::{Action, Calculator, ERROR_MARKER, storage::MemoryStorage};
//!
//! let mut calculator = Calculator::load(MemoryStorage::default());
//!
//! calculator.apply(Action::Input('4'));
//! calculator.apply(Action::MemoryAdd);
//! assert_eq!(calculator.memory(), 4.0);
//!
//! calculator.apply(Action::Input('/'));
//! calculator.apply(Action::Input('0'));
//! calculator.apply(Action::Evaluate);
//! assert_eq!(calculator.display(), ERROR_MARKER);
//! ```

use crate::buffer::ExpressionBuffer;
use crate::history::{self, HistoryLog};
use crate::memory::MemoryRegister;
use crate::number::format_number;
use crate::storage::Storage;
use crate::{Action, ERROR_MARKER, EvalError, HISTORY_KEY, MEMORY_KEY, Outcome, evaluate};

/// A calculator session
///
/// Not thread-safe; a calculator is driven from a single event loop.
#[derive(Debug)]
pub struct Calculator<S: Storage> {
    /// The expression being typed
    buffer: ExpressionBuffer,
    /// The memory register
    memory: MemoryRegister,
    /// Past calculations, newest first
    history: HistoryLog,
    /// Where memory and history are persisted
    storage: S,
}

impl<S: Storage> Calculator<S> {
    /// Create a calculator, restoring memory and history from `storage`
    ///
    /// Missing or unreadable values start out empty.
    pub fn load(storage: S) -> Self {
        let memory = MemoryRegister::from_persisted(storage.get(MEMORY_KEY).as_deref());

        let history = storage
            .get(HISTORY_KEY)
            .map(|json| {
                HistoryLog::from_json(&json).unwrap_or_else(|error| {
                    tracing::warn!(%error, "discarding unreadable history");
                    HistoryLog::new()
                })
            })
            .unwrap_or_default();

        tracing::info!(
            memory = memory.value(),
            history = history.len(),
            "calculator loaded"
        );

        Self {
            buffer: ExpressionBuffer::new(),
            memory,
            history,
            storage,
        }
    }

    /// Perform an action
    ///
    /// Returns the [Outcome] of [Action::Evaluate]; every other action returns `None`.
    pub fn apply(&mut self, action: Action) -> Option<Outcome> {
        tracing::trace!(action = action.name(), "apply");

        match action {
            Action::Input(character) => self.buffer.append(character),
            Action::Evaluate => {
                return Some(match self.calculate() {
                    Ok(value) => Outcome::Evaluated(value),
                    Err(error) => Outcome::Failed(error),
                });
            }
            Action::Backspace => self.buffer.backspace(),
            Action::Clear => self.buffer.clear(),
            Action::ToggleSign => self.buffer.toggle_sign(),
            Action::Percent => self.buffer.percent(),
            Action::MemoryClear => self.memory_clear(),
            Action::MemoryRecall => self.memory_recall(),
            Action::MemoryAdd => self.memory_add(),
            Action::MemorySubtract => self.memory_subtract(),
        }

        None
    }

    /// Evaluate the expression
    ///
    /// On success the expression is replaced by the result and `"<expression> = <result>"` is
    /// recorded in the history. On failure the expression is replaced by [ERROR_MARKER] and the
    /// history is left alone.
    pub fn calculate(&mut self) -> Result<f64, EvalError> {
        let expression = self.buffer.as_str().to_string();

        match evaluate(&expression) {
            Ok(value) => {
                let result = format_number(value);
                self.buffer.set(result.as_str());
                self.push_history(format!("{expression} = {result}"));
                Ok(value)
            }
            Err(error) => {
                tracing::debug!(%error, %expression, "evaluation failed");
                self.buffer.set(ERROR_MARKER);
                Err(error)
            }
        }
    }

    /// Reset the memory register to 0
    pub fn memory_clear(&mut self) {
        self.memory.clear();
        self.persist_memory();
    }

    /// Append the memory register to the expression
    pub fn memory_recall(&mut self) {
        self.buffer.push_str(&self.memory.to_text());
    }

    /// Add the value of the expression to the memory register
    ///
    /// Does nothing if the expression can't be evaluated.
    pub fn memory_add(&mut self) {
        if let Some(value) = self.evaluate_for_memory() {
            self.memory.add(value);
            self.persist_memory();
        }
    }

    /// Subtract the value of the expression from the memory register
    ///
    /// Does nothing if the expression can't be evaluated.
    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.evaluate_for_memory() {
            self.memory.subtract(value);
            self.persist_memory();
        }
    }

    /// The expression, result or error marker currently displayed
    pub fn display(&self) -> &str {
        self.buffer.as_str()
    }

    /// The value of the memory register
    pub const fn memory(&self) -> f64 {
        self.memory.value()
    }

    /// Past calculations
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The underlying storage
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Evaluate the expression (an empty one counts as `0`) without touching the display
    fn evaluate_for_memory(&self) -> Option<f64> {
        let expression = if self.buffer.is_empty() {
            "0"
        } else {
            self.buffer.as_str()
        };

        evaluate(expression)
            .inspect_err(|error| tracing::debug!(%error, "memory operation skipped"))
            .ok()
    }

    fn push_history(&mut self, text: String) {
        self.history.push(text, history::now());

        match self.history.to_json() {
            Ok(json) => self.persist(HISTORY_KEY, json),
            Err(error) => tracing::warn!(%error, "failed to serialize history"),
        }
    }

    fn persist_memory(&mut self) {
        let text = self.memory.to_text();
        self.persist(MEMORY_KEY, text);
    }

    fn persist(&mut self, key: &str, value: String) {
        if let Err(error) = self.storage.set(key, value) {
            tracing::warn!(%error, key, "failed to persist");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HISTORY_LIMIT;
    use crate::storage::{MemoryStorage, StorageError};

    fn calculator_with(expression: &str) -> Calculator<MemoryStorage> {
        let mut calculator = Calculator::load(MemoryStorage::default());
        for character in expression.chars() {
            calculator.apply(Action::Input(character));
        }
        calculator
    }

    #[test]
    fn test_evaluate_success() {
        let mut calculator = calculator_with("7*6");

        let outcome = calculator.apply(Action::Evaluate);

        assert_eq!(outcome, Some(Outcome::Evaluated(42.0)));
        assert_eq!(calculator.display(), "42");
        assert_eq!(calculator.history().latest().unwrap().text, "7*6 = 42");
        assert_eq!(
            calculator.storage().get(HISTORY_KEY).unwrap(),
            calculator.history().to_json().unwrap()
        );
    }

    #[test]
    fn test_evaluate_failure() {
        let mut calculator = calculator_with("2+");

        let outcome = calculator.apply(Action::Evaluate);

        assert_eq!(outcome, Some(Outcome::Failed(EvalError::InvalidExpression)));
        assert_eq!(calculator.display(), ERROR_MARKER);
        assert!(calculator.history().is_empty());
        assert_eq!(calculator.storage().get(HISTORY_KEY), None);

        let mut calculator = calculator_with("1/0");
        assert_eq!(
            calculator.apply(Action::Evaluate),
            Some(Outcome::Failed(EvalError::NonFiniteResult))
        );
        assert_eq!(calculator.display(), ERROR_MARKER);
    }

    #[test]
    fn test_percent_in_history_keeps_original_expression() {
        let mut calculator = calculator_with("10+50");
        calculator.apply(Action::Percent);
        calculator.apply(Action::Evaluate);

        assert_eq!(calculator.display(), "10.5");
        assert_eq!(calculator.history().latest().unwrap().text, "10+50% = 10.5");
    }

    #[test]
    fn test_other_actions_return_nothing() {
        let mut calculator = calculator_with("12");
        assert_eq!(calculator.apply(Action::ToggleSign), None);
        assert_eq!(calculator.display(), "-12");
        assert_eq!(calculator.apply(Action::Backspace), None);
        assert_eq!(calculator.display(), "-1");
        assert_eq!(calculator.apply(Action::Clear), None);
        assert_eq!(calculator.display(), "");
    }

    #[test]
    fn test_memory_add_and_recall() {
        let mut calculator = calculator_with("4");

        calculator.apply(Action::MemoryAdd);
        assert_eq!(calculator.memory(), 4.0);
        assert_eq!(calculator.storage().get(MEMORY_KEY).as_deref(), Some("4"));

        calculator.apply(Action::Clear);
        calculator.apply(Action::MemoryRecall);
        assert_eq!(calculator.display(), "4");

        // Recall appends instead of replacing
        calculator.apply(Action::Input('+'));
        calculator.apply(Action::MemoryRecall);
        assert_eq!(calculator.display(), "4+4");
    }

    #[test]
    fn test_memory_subtract_and_clear() {
        let mut calculator = calculator_with("2*3");
        calculator.apply(Action::MemorySubtract);
        assert_eq!(calculator.memory(), -6.0);
        assert_eq!(calculator.storage().get(MEMORY_KEY).as_deref(), Some("-6"));

        calculator.apply(Action::MemoryClear);
        assert_eq!(calculator.memory(), 0.0);
        assert_eq!(calculator.storage().get(MEMORY_KEY).as_deref(), Some("0"));
    }

    #[test]
    fn test_memory_with_empty_expression() {
        let mut calculator = Calculator::load(MemoryStorage::default());
        calculator.apply(Action::MemoryAdd);
        assert_eq!(calculator.memory(), 0.0);
        assert_eq!(calculator.storage().get(MEMORY_KEY).as_deref(), Some("0"));
    }

    #[test]
    fn test_memory_failures_are_swallowed() {
        let mut calculator = calculator_with("5");
        calculator.apply(Action::MemoryAdd);

        calculator.apply(Action::Input('/'));
        calculator.apply(Action::Input('0'));
        calculator.apply(Action::MemoryAdd);
        calculator.apply(Action::MemorySubtract);

        assert_eq!(calculator.memory(), 5.0);
        assert_eq!(calculator.display(), "5/0");
    }

    #[test]
    fn test_load_restores_state() {
        let storage = MemoryStorage::with_values([
            (MEMORY_KEY, "2.5"),
            (HISTORY_KEY, r#"[{"t":5,"v":"1+1 = 2"}]"#),
        ]);

        let calculator = Calculator::load(storage);

        assert_eq!(calculator.memory(), 2.5);
        assert_eq!(calculator.history().len(), 1);
        assert_eq!(calculator.history().latest().unwrap().timestamp, 5);
        assert_eq!(calculator.display(), "");
    }

    #[test]
    fn test_load_ignores_corrupt_values() {
        let storage =
            MemoryStorage::with_values([(MEMORY_KEY, "abc"), (HISTORY_KEY, "{broken")]);

        let calculator = Calculator::load(storage);

        assert_eq!(calculator.memory(), 0.0);
        assert!(calculator.history().is_empty());
    }

    #[test]
    fn test_history_is_capped() {
        let mut calculator = Calculator::load(MemoryStorage::default());

        for i in 0..=HISTORY_LIMIT {
            calculator.apply(Action::Clear);
            for character in format!("{i}+1").chars() {
                calculator.apply(Action::Input(character));
            }
            calculator.apply(Action::Evaluate);
        }

        let history = calculator.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.latest().unwrap().text, "30+1 = 31");
        assert_eq!(history.entries().last().unwrap().text, "1+1 = 2");

        let persisted = HistoryLog::from_json(&calculator.storage().get(HISTORY_KEY).unwrap());
        assert_eq!(persisted.unwrap().len(), HISTORY_LIMIT);
    }

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::WriteFile(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_storage_failures_do_not_interrupt() {
        let mut calculator = Calculator::load(FailingStorage);
        calculator.apply(Action::Input('3'));
        calculator.apply(Action::MemoryAdd);
        assert_eq!(calculator.apply(Action::Evaluate), Some(Outcome::Evaluated(3.0)));
        assert_eq!(calculator.memory(), 3.0);
        assert_eq!(calculator.history().len(), 1);
    }
}
