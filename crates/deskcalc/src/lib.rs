//! deskcalc - a keypad-style desk calculator with a clickable terminal UI
//!
//! The crate is split into a pure core and a TUI host:
//!
//! - [`core`] holds the calculator engine: a deterministic state machine
//!   over the current-value buffer, a pending operand/operator pair, a
//!   memory register, and the calculation history. No I/O, no timers.
//! - [`tui`] hosts the engine behind ratatui: key/mouse events map to
//!   discrete engine operations, and the controller schedules the transient
//!   error display's auto-recovery.
//! - [`theme`] persists the light/dark preference across sessions.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.input_digit(1);
//! engine.input_digit(2);
//! engine.input_operator(BinaryOp::Add);
//! engine.input_digit(8);
//! engine.calculate();
//!
//! assert_eq!(engine.current_value(), "20");
//! assert_eq!(engine.history().last().unwrap().display(), "12 + 8 = 20");
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod theme;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::engine::Engine;
    pub use crate::core::format::{format_result, group_thousands};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{BinaryOp, CalcError, CalcResult};
    pub use crate::theme::{Theme, ThemePreference};
    pub use crate::tui::{Action, App, InputHandler, Keypad, MemoryAction, ERROR_DWELL};
}
