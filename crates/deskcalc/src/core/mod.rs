//! Core calculator state machine
//!
//! Everything in this module is pure: state transitions in response to
//! discrete input events, no I/O, no timers. The TUI layer owns scheduling.

pub mod engine;
pub mod format;
pub mod history;

pub use engine::Engine;

/// Result type for arithmetic that can fail
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error kinds
///
/// These surface as a transient display message, never as an `Err` escaping
/// an engine operation. Unparsable operands are not an error kind at all:
/// they degrade silently (no result, or 0 for the memory register).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// Invalid input for an operation (square root of a negative)
    #[error("Invalid input")]
    InvalidInput,
}

/// The four pending binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl BinaryOp {
    /// Returns the operator symbol used in history lines and previews
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Applies the operator to two operands
    ///
    /// Division by zero fails with [`CalcError::DivideByZero`] instead of
    /// producing infinity.
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_divide_by_zero() {
        assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by zero");
    }

    #[test]
    fn test_calc_error_display_invalid_input() {
        assert_eq!(CalcError::InvalidInput.to_string(), "Invalid input");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivideByZero);
        assert!(err.to_string().contains("divide"));
    }

    // ===== BinaryOp tests =====

    #[test]
    fn test_symbol_add() {
        assert_eq!(BinaryOp::Add.symbol(), "+");
    }

    #[test]
    fn test_symbol_subtract() {
        assert_eq!(BinaryOp::Subtract.symbol(), "-");
    }

    #[test]
    fn test_symbol_multiply() {
        assert_eq!(BinaryOp::Multiply.symbol(), "×");
    }

    #[test]
    fn test_symbol_divide() {
        assert_eq!(BinaryOp::Divide.symbol(), "÷");
    }

    #[test]
    fn test_apply_add() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), Ok(5.0));
    }

    #[test]
    fn test_apply_subtract() {
        assert_eq!(BinaryOp::Subtract.apply(5.0, 3.0), Ok(2.0));
    }

    #[test]
    fn test_apply_multiply() {
        assert_eq!(BinaryOp::Multiply.apply(4.0, 3.0), Ok(12.0));
    }

    #[test]
    fn test_apply_divide() {
        assert_eq!(BinaryOp::Divide.apply(12.0, 4.0), Ok(3.0));
    }

    #[test]
    fn test_apply_divide_by_zero() {
        assert_eq!(
            BinaryOp::Divide.apply(10.0, 0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_apply_divide_zero_numerator() {
        assert_eq!(BinaryOp::Divide.apply(0.0, 5.0), Ok(0.0));
    }

    #[test]
    fn test_apply_never_returns_infinity_for_zero_divisor() {
        // -0.0 == 0.0, so signed zero divisors fail the same way
        assert_eq!(
            BinaryOp::Divide.apply(1.0, -0.0),
            Err(CalcError::DivideByZero)
        );
    }
}
