//! Terminal UI: input adapter, keypad, controller, and renderer

pub mod app;
pub mod input;
pub mod keypad;
pub mod ui;

pub use app::{App, ERROR_DWELL};
pub use input::{Action, InputHandler, MemoryAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, Palette};
