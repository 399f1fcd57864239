//! # Sanitize Module - Percent Rewriting and Character Validation
//!
//! Expressions typed by a user may contain percent suffixes (`50%`). Before evaluation they are
//! rewritten into plain divisions (`(50/100)`), and the result is checked against the set of
//! characters the evaluator understands.
//!
//! ```rust
//! use reckon::sanitize;
//!
//! assert_eq!(sanitize("10+50%").unwrap(), "10+(50/100)");
//! assert!(sanitize("2+a").is_err());
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::EvalError;

lazy_static! {
    /// A number directly followed by a percent sign
    static ref PERCENT: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)%").expect("PERCENT is a valid pattern");

    /// Digits, operators, parentheses, decimal points and whitespace only
    static ref ALLOWED: Regex =
        Regex::new(r"^[0-9+\-*/().\s]+$").expect("ALLOWED is a valid pattern");
}

/// Rewrite percentages and validate the character set of an expression
///
/// Every `<number>%` becomes `(<number>/100)`. The rewritten expression must be non-empty and
/// consist of digits, `+ - * /`, parentheses, decimal points and whitespace only; otherwise
/// [EvalError::InvalidExpression] is returned and nothing of the rewrite is kept.
pub fn sanitize(expression: &str) -> Result<String, EvalError> {
    let rewritten = PERCENT.replace_all(expression, "($1/100)");

    if !ALLOWED.is_match(&rewritten) {
        return Err(EvalError::InvalidExpression);
    }

    Ok(rewritten.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rewrite() {
        assert_eq!(sanitize("50%").unwrap(), "(50/100)");
        assert_eq!(sanitize("10+50%").unwrap(), "10+(50/100)");
        assert_eq!(sanitize("12.5%*2").unwrap(), "(12.5/100)*2");
        assert_eq!(sanitize("1%+2%").unwrap(), "(1/100)+(2/100)");
    }

    #[test]
    fn test_plain_expressions_pass_through() {
        assert_eq!(sanitize("2 + 3 * (4 - 1)").unwrap(), "2 + 3 * (4 - 1)");
        assert_eq!(sanitize(".5").unwrap(), ".5");
    }

    #[test]
    fn test_disallowed_characters() {
        for expression in ["2+a", "1;2", "1=1", "alert(1)", "2^3", "Error", "(2+3)%", "%"] {
            assert_eq!(
                sanitize(expression),
                Err(EvalError::InvalidExpression),
                "{expression} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(sanitize(""), Err(EvalError::InvalidExpression));
    }
}
