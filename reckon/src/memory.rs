//! The memory register: a single number that survives between sessions.

use crate::number::{format_number, parse_leading_number};

/// A single numeric memory slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    /// Restore a register from its persisted text
    ///
    /// Anything that doesn't start with a number (or parses to NaN or zero) restores to 0.
    pub fn from_persisted(text: Option<&str>) -> Self {
        let value = text
            .and_then(parse_leading_number)
            .filter(|value| !value.is_nan())
            .unwrap_or_default();

        // Normalize -0
        Self {
            value: if value == 0.0 { 0.0 } else { value },
        }
    }

    /// The value currently stored
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The canonical text of the value, as persisted and recalled
    pub fn to_text(&self) -> String {
        format_number(self.value)
    }

    /// Reset the register to 0
    pub const fn clear(&mut self) {
        self.value = 0.0;
    }

    /// Add to the register
    pub fn add(&mut self, amount: f64) {
        self.value += amount;
    }

    /// Subtract from the register
    pub fn subtract(&mut self, amount: f64) {
        self.value -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let mut register = MemoryRegister::default();
        register.add(4.0);
        register.add(2.5);
        register.subtract(1.5);
        assert_eq!(register.value(), 5.0);
        assert_eq!(register.to_text(), "5");

        register.clear();
        assert_eq!(register.value(), 0.0);
    }

    #[test]
    fn test_from_persisted() {
        assert_eq!(MemoryRegister::from_persisted(Some("12.5")).value(), 12.5);
        assert_eq!(MemoryRegister::from_persisted(Some("-3")).value(), -3.0);
        assert_eq!(MemoryRegister::from_persisted(Some("1e+21")).value(), 1e21);
        assert_eq!(MemoryRegister::from_persisted(Some("garbage")).value(), 0.0);
        assert_eq!(MemoryRegister::from_persisted(Some("NaN")).value(), 0.0);
        assert_eq!(MemoryRegister::from_persisted(None).value(), 0.0);
    }
}
