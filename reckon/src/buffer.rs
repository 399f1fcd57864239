//! # Buffer Module - Expression Input and Operand Editing
//!
//! The [ExpressionBuffer] is the live line of calculator input. It only ever grows or shrinks
//! at its end, which keeps the editing rules simple:
//!
//! - A decimal point is ignored if the number currently being typed already has one
//! - A lone `0` is replaced by the next digit or operator instead of being extended
//! - The sign of the trailing number can be toggled in place
//!
//! Data layout example: `"12+3.5"`
//! ```text
//! Characters: [1][2][+][3][.][5]
//! Segments:   [-12-]   [--3.5--]   <- split on + - * /
//! Trailing:            [--3.5--]   <- operand for toggle_sign
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::number::format_number;

lazy_static! {
    /// An unsigned number at the very end of the buffer
    static ref TRAILING_NUMBER: Regex =
        Regex::new(r"\d+(?:\.\d+)?$").expect("TRAILING_NUMBER is a valid pattern");
}

/// Characters that separate the numeric segments of an expression
const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// The editable text of the current expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
}

impl ExpressionBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// The current contents
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Check if nothing has been typed
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole contents, e.g. with a result or the error marker
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append text without applying any input rules
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a typed character
    ///
    /// A decimal point is dropped when the numeric segment being typed (everything after the
    /// last operator) already contains one. When the buffer holds exactly `"0"`, any other
    /// character replaces it.
    ///
    /// ```rust
    /// use reckon::buffer::ExpressionBuffer;
    ///
    /// let mut buffer = ExpressionBuffer::new();
    /// for character in "0.5.".chars() {
    ///     buffer.append(character);
    /// }
    /// assert_eq!(buffer.as_str(), "0.5");
    /// ```
    pub fn append(&mut self, character: char) {
        if character == '.' && self.current_segment().contains('.') {
            return;
        }

        if self.text == "0" && character != '.' {
            self.text.clear();
        }

        self.text.push(character);
    }

    /// Remove the last character, if any
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append a percent sign
    ///
    /// The percentage itself is resolved when the expression is evaluated.
    pub fn percent(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.text.push('%');
    }

    /// Negate the number at the end of the buffer
    ///
    /// A `+` or `-` directly in front of the number is treated as its sign when it is unary,
    /// i.e. at the start of the buffer or following an operator or an opening parenthesis.
    /// Otherwise it stays an operator and the negated number is appended after it.
    ///
    /// ```rust
    /// use reckon::buffer::ExpressionBuffer;
    ///
    /// let mut buffer = ExpressionBuffer::new();
    /// buffer.set("5+3");
    ///
    /// buffer.toggle_sign();
    /// assert_eq!(buffer.as_str(), "5+-3");
    ///
    /// buffer.toggle_sign();
    /// assert_eq!(buffer.as_str(), "5+3");
    /// ```
    pub fn toggle_sign(&mut self) {
        let Some((start, value)) = self.trailing_operand() else {
            return;
        };

        self.text.truncate(start);
        self.text.push_str(&format_number(-value));
    }

    /// The part of the buffer after the last operator
    fn current_segment(&self) -> &str {
        self.text
            .rsplit(OPERATORS)
            .next()
            .unwrap_or(self.text.as_str())
    }

    /// Locate the trailing number and its unary sign, if any
    ///
    /// Returns the byte offset where the operand starts and its signed value. Digits that are
    /// the exponent of a number like `1e+21` are not an operand.
    fn trailing_operand(&self) -> Option<(usize, f64)> {
        let number = TRAILING_NUMBER.find(&self.text)?;
        let mut start = number.start();

        let prefix = &self.text[..start];
        let unsigned_prefix = prefix.trim_end_matches(['+', '-']);
        if unsigned_prefix.ends_with(['e', 'E']) {
            return None;
        }

        if let Some(sign) = prefix.chars().last().filter(|c| matches!(c, '+' | '-')) {
            let before_sign = prefix[..prefix.len() - sign.len_utf8()].trim_end();
            let is_unary = before_sign
                .chars()
                .last()
                .is_none_or(|c| OPERATORS.contains(&c) || c == '(');
            if is_unary {
                start -= sign.len_utf8();
            }
        }

        let value = self.text[start..].parse().ok()?;
        Some((start, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> ExpressionBuffer {
        let mut buffer = ExpressionBuffer::new();
        buffer.set(text);
        buffer
    }

    #[test]
    fn test_append_and_leading_zero() {
        let mut input = ExpressionBuffer::new();
        input.append('0');
        input.append('7');
        assert_eq!(input.as_str(), "7");

        let mut input = buffer("0");
        input.append('.');
        input.append('5');
        assert_eq!(input.as_str(), "0.5");

        let mut input = buffer("0");
        input.append('+');
        assert_eq!(input.as_str(), "+");

        let mut input = buffer("10");
        input.append('0');
        assert_eq!(input.as_str(), "100");
    }

    #[test]
    fn test_duplicate_decimal_point() {
        let mut input = buffer("1.5");
        input.append('.');
        assert_eq!(input.as_str(), "1.5");

        let mut input = buffer("1.5+2");
        input.append('.');
        assert_eq!(input.as_str(), "1.5+2.");

        let mut input = buffer("1.5*");
        input.append('.');
        assert_eq!(input.as_str(), "1.5*.");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut input = buffer("12+");
        input.backspace();
        assert_eq!(input.as_str(), "12");

        let mut empty = ExpressionBuffer::new();
        empty.backspace();
        assert!(empty.is_empty());

        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_percent() {
        let mut input = buffer("50");
        input.percent();
        assert_eq!(input.as_str(), "50%");

        let mut empty = ExpressionBuffer::new();
        empty.percent();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_toggle_sign() {
        let cases = [
            ("5+3", "5+-3"),
            ("5+-3", "5+3"),
            ("-3", "3"),
            ("3", "-3"),
            ("5-3", "5--3"),
            ("5*-2.5", "5*2.5"),
            ("(4", "(-4"),
            ("(-4", "(4"),
            ("7 - 2", "7 - -2"),
            ("0", "0"),
        ];

        for (before, after) in cases {
            let mut input = buffer(before);
            input.toggle_sign();
            assert_eq!(input.as_str(), after, "toggling {before:?}");
        }
    }

    #[test]
    fn test_toggle_sign_without_trailing_number() {
        for text in ["", "5+", "(2+3)", "Error", "2.", "1e+21", "1.5e-7"] {
            let mut input = buffer(text);
            input.toggle_sign();
            assert_eq!(input.as_str(), text);
        }
    }
}
