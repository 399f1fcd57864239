//! # Reckon - A library for writing arithmetic calculators
//!
//! Reckon contains everything a calculator front end needs besides the front end itself:
//! an editable expression buffer, a safe arithmetic evaluator, a memory register and a
//! bounded history of past calculations, all persisted through a small key-value
//! [storage::Storage] trait.
//!
//! ## Usage
//!
//! ```rust
//! use reckon::{Action, Calculator, Outcome, storage::MemoryStorage};
//!
//! let mut calculator = Calculator::load(MemoryStorage::default());
//!
//! for character in "7*6".chars() {
//!     calculator.apply(Action::Input(character));
//! }
//!
//! assert_eq!(calculator.apply(Action::Evaluate), Some(Outcome::Evaluated(42.0)));
//! assert_eq!(calculator.display(), "42");
//! assert_eq!(calculator.history().latest().unwrap().text, "7*6 = 42");
//! ```

pub mod action;
pub mod buffer;
pub mod calculator;
pub mod eval;
pub mod history;
pub mod memory;
pub mod number;
pub mod sanitize;
pub mod storage;

pub use action::{Action, Outcome};
pub use calculator::Calculator;
pub use eval::{EvalError, evaluate};
pub use number::format_number;
pub use sanitize::sanitize;

/// Text shown in place of the expression when an evaluation fails
pub const ERROR_MARKER: &str = "Error";

/// Maximum amount of entries kept in the history log
pub const HISTORY_LIMIT: usize = 30;

/// Storage key holding the JSON-encoded history log
pub const HISTORY_KEY: &str = "calc_history";

/// Storage key holding the memory register
pub const MEMORY_KEY: &str = "calc_memory";

/// Milliseconds since the unix epoch, as stored in history entries
pub type Timestamp = i64;
