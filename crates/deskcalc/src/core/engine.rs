//! The calculator engine
//!
//! A deterministic state machine over a handful of fields: the current-value
//! input buffer, a pending operand/operator pair, a memory register, and the
//! completed-calculation history. Input events mutate the state; the display
//! layer reads snapshots. Arithmetic failures become a transient error
//! display rather than an `Err` escaping to the caller — while an error is
//! showing, all inputs are ignored and [`Engine::all_clear`] is the only way
//! out (the controller issues it when the dwell elapses or a new input
//! supersedes the pending recovery).

use crate::core::format::{format_result, group_thousands};
use crate::core::history::History;
use crate::core::{BinaryOp, CalcError};

/// Calculator state machine
///
/// The current value is kept as a string while a number is being entered and
/// converted only at evaluation boundaries; it is always a valid numeric
/// literal (`"0"` at rest, never empty).
#[derive(Debug)]
pub struct Engine {
    /// Numeric literal under construction / on display
    current: String,
    /// Left-hand operand awaiting the right-hand operand
    previous: Option<f64>,
    /// Pending binary operator; present iff `previous` is present
    operator: Option<BinaryOp>,
    /// Next digit starts a fresh number instead of appending
    waiting_for_number: bool,
    /// Single-register memory store
    memory: f64,
    /// Completed-calculation log
    history: History,
    /// Transient error display, distinct from `current`
    error: Option<CalcError>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine in the all-clear default state
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: "0".to_string(),
            previous: None,
            operator: None,
            waiting_for_number: false,
            memory: 0.0,
            history: History::new(),
            error: None,
        }
    }

    // ===== Read-only snapshot surface =====

    /// Returns the current-value literal
    #[must_use]
    pub fn current_value(&self) -> &str {
        &self.current
    }

    /// Returns the pending left-hand operand, if any
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.previous
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn operator(&self) -> Option<BinaryOp> {
        self.operator
    }

    /// Returns true if the next digit starts a fresh number
    #[must_use]
    pub fn is_waiting_for_number(&self) -> bool {
        self.waiting_for_number
    }

    /// Returns the memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Returns true when the memory indicator should light up
    #[must_use]
    pub fn memory_indicator(&self) -> bool {
        self.memory != 0.0
    }

    /// Returns the calculation history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the transient error, if one is on display
    #[must_use]
    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// Returns the main display text: the error message while one is
    /// showing, otherwise the current value with thousands separators when
    /// it is a plain integer of four or more digits.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self.error {
            Some(err) => err.to_string(),
            None => group_thousands(&self.current),
        }
    }

    /// Returns the secondary line: the in-progress `prev op` preview while
    /// an operator is pending, otherwise the last completed calculation.
    #[must_use]
    pub fn preview_line(&self) -> String {
        if let (Some(prev), Some(op)) = (self.previous, self.operator) {
            return format!("{} {}", format_result(prev), op.symbol());
        }
        self.history
            .last()
            .map(super::history::HistoryEntry::display)
            .unwrap_or_default()
    }

    // ===== Value entry =====

    /// Enters a digit (0-9); other values are ignored
    pub fn input_digit(&mut self, digit: u8) {
        if self.error.is_some() || digit > 9 {
            return;
        }
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.waiting_for_number || self.current == "0" {
            self.current.clear();
            self.current.push(ch);
            self.waiting_for_number = false;
        } else {
            self.current.push(ch);
        }
    }

    /// Enters the decimal point; at most one per number
    pub fn input_decimal(&mut self) {
        if self.error.is_some() {
            return;
        }
        if self.waiting_for_number {
            self.current = "0.".to_string();
            self.waiting_for_number = false;
        } else if !self.current.contains('.') {
            self.current.push('.');
        }
    }

    /// Removes the last character; an emptied buffer resets to `"0"`
    pub fn backspace(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.current.pop();
        if self.current.is_empty() || self.current == "-" {
            self.current = "0".to_string();
        }
    }

    // ===== Binary operators =====

    /// Selects a binary operator.
    ///
    /// Stores the current value as the left-hand operand, or — when an
    /// operator is already pending — resolves the pending calculation first
    /// and carries the result forward. On arithmetic failure the state is
    /// left unchanged apart from the error display.
    pub fn input_operator(&mut self, op: BinaryOp) {
        if self.error.is_some() {
            return;
        }
        let Ok(value) = self.current.parse::<f64>() else {
            return;
        };

        if self.previous.is_none() {
            self.previous = Some(value);
        } else if self.operator.is_some() {
            match self.evaluate() {
                Some(result) => {
                    self.previous = Some(result);
                    self.current = format_result(result);
                }
                None => {
                    if self.error.is_some() {
                        return;
                    }
                }
            }
        }

        self.operator = Some(op);
        self.waiting_for_number = true;
    }

    /// Computes `previous OP current`.
    ///
    /// Returns `None` either silently (unparsable operand, no pending pair)
    /// or after routing an arithmetic failure into the error display.
    fn evaluate(&mut self) -> Option<f64> {
        let (Some(lhs), Some(op)) = (self.previous, self.operator) else {
            return None;
        };
        let Ok(rhs) = self.current.parse::<f64>() else {
            return None;
        };
        match op.apply(lhs, rhs) {
            Ok(result) => Some(result),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    /// Equals: resolves the pending calculation and records it.
    ///
    /// Acts only when an operator and left-hand operand are pending and a
    /// right-hand number has actually been entered — pressing an operator
    /// immediately followed by equals does nothing.
    pub fn calculate(&mut self) {
        if self.error.is_some() || self.waiting_for_number {
            return;
        }
        let (Some(lhs), Some(op)) = (self.previous, self.operator) else {
            return;
        };

        let Some(result) = self.evaluate() else {
            return;
        };
        let formatted = format_result(result);
        let expression = format!("{} {} {}", format_result(lhs), op.symbol(), self.current);
        self.history.record(&expression, &formatted);

        self.current = formatted;
        self.previous = None;
        self.operator = None;
        self.waiting_for_number = true;
    }

    // ===== Clearing =====

    /// Clear entry (CE): resets only the current value
    pub fn clear_entry(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.current = "0".to_string();
    }

    /// All clear (AC): resets everything except the memory register.
    ///
    /// Also the sole exit from the transient error state.
    pub fn all_clear(&mut self) {
        self.current = "0".to_string();
        self.previous = None;
        self.operator = None;
        self.waiting_for_number = false;
        self.history.clear();
        self.error = None;
    }

    // ===== Unary operations =====

    /// Divides the current value by 100
    pub fn percentage(&mut self) {
        if self.error.is_some() {
            return;
        }
        let Ok(value) = self.current.parse::<f64>() else {
            return;
        };
        self.current = format_result(value / 100.0);
    }

    /// Square root; negative input raises the invalid-input error
    pub fn square_root(&mut self) {
        if self.error.is_some() {
            return;
        }
        let Ok(value) = self.current.parse::<f64>() else {
            return;
        };
        if value < 0.0 {
            self.error = Some(CalcError::InvalidInput);
            return;
        }
        self.current = format_result(value.sqrt());
    }

    /// Squares the current value
    pub fn square(&mut self) {
        if self.error.is_some() {
            return;
        }
        let Ok(value) = self.current.parse::<f64>() else {
            return;
        };
        self.current = format_result(value * value);
    }

    /// Toggles a leading minus sign; no-op on `"0"`
    pub fn toggle_sign(&mut self) {
        if self.error.is_some() || self.current == "0" {
            return;
        }
        if let Some(rest) = self.current.strip_prefix('-') {
            self.current = rest.to_string();
        } else {
            self.current.insert(0, '-');
        }
    }

    // ===== Memory register =====

    fn current_as_number(&self) -> f64 {
        self.current.parse().unwrap_or(0.0)
    }

    /// Resets the memory register to zero
    pub fn memory_clear(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.memory = 0.0;
    }

    /// Copies the memory register into the current value
    pub fn memory_recall(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.current = format_result(self.memory);
        self.waiting_for_number = false;
    }

    /// Adds the current value to the memory register
    pub fn memory_add(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.memory += self.current_as_number();
    }

    /// Subtracts the current value from the memory register
    pub fn memory_subtract(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.memory -= self.current_as_number();
    }

    /// Overwrites the memory register with the current value
    pub fn memory_store(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.memory = self.current_as_number();
    }
}
