//! Keyboard input handling
//!
//! Maps crossterm key events 1:1 onto engine operations, mirroring the
//! original key bindings: digit keys, `+ - * /`, Enter/`=` for equals,
//! Escape for clear-entry, Backspace, and `.` for the decimal point.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::BinaryOp;

/// Memory-register operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryAction {
    /// MC — reset the register to zero
    Clear,
    /// MR — copy the register into the current value
    Recall,
    /// M+ — add the current value to the register
    Add,
    /// M− — subtract the current value from the register
    Subtract,
    /// MS — overwrite the register with the current value
    Store,
}

/// Discrete calculator actions triggered by keyboard or keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter the decimal point
    Decimal,
    /// Select a binary operator
    Operator(BinaryOp),
    /// Equals
    Equals,
    /// Clear entry (CE)
    ClearEntry,
    /// All clear (AC)
    AllClear,
    /// Remove the last character
    Backspace,
    /// Divide the current value by 100
    Percent,
    /// Square root
    SquareRoot,
    /// Square
    Square,
    /// Toggle the sign
    ToggleSign,
    /// Memory-register operation
    Memory(MemoryAction),
    /// Switch between light and dark theme
    ToggleTheme,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> Action {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => Action::Quit,
                KeyCode::Char('l') => Action::AllClear,
                _ => Action::None,
            };
        }

        match code {
            KeyCode::Char(c @ '0'..='9') => {
                Action::Digit(c.to_digit(10).map_or(0, |d| d as u8))
            }
            KeyCode::Char('.') => Action::Decimal,
            KeyCode::Char('+') => Action::Operator(BinaryOp::Add),
            KeyCode::Char('-') => Action::Operator(BinaryOp::Subtract),
            KeyCode::Char('*') => Action::Operator(BinaryOp::Multiply),
            KeyCode::Char('/') => Action::Operator(BinaryOp::Divide),
            KeyCode::Char('=') | KeyCode::Enter => Action::Equals,
            KeyCode::Char('%') => Action::Percent,
            KeyCode::Char('r') => Action::SquareRoot,
            KeyCode::Char('s') => Action::Square,
            KeyCode::Char('n') => Action::ToggleSign,
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => Action::ClearEntry,
            KeyCode::Delete => Action::AllClear,
            KeyCode::Backspace => Action::Backspace,
            _ => Action::None,
        }
    }
}
