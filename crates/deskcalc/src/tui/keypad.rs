//! Clickable keypad grid
//!
//! A button grid that mirrors the original calculator's on-screen keypad:
//! memory row, clear/backspace row, unary operations, digits, operators,
//! equals. Buttons can be clicked with the mouse (hit testing) and light up
//! briefly when the matching key is pressed; the highlight is cosmetic and
//! released on the next tick.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::BinaryOp;
use crate::tui::input::{Action, MemoryAction};
use crate::tui::ui::Palette;

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// The label shown on the button
    pub label: &'static str,
    /// Whether the button is currently pressed/highlighted
    pub pressed: bool,
    /// The action this button performs
    pub action: Action,
}

impl KeypadButton {
    const fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            pressed: false,
            action,
        }
    }
}

/// The keypad layout, a 7x4 grid:
///
/// ```text
/// [MC] [MR] [M+] [M-]
/// [MS] [AC] [CE] [⌫]
/// [%]  [√]  [x²] [÷]
/// [7]  [8]  [9]  [×]
/// [4]  [5]  [6]  [-]
/// [1]  [2]  [3]  [+]
/// [±]  [0]  [.]  [=]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 1: memory register
            KeypadButton::new("MC", Action::Memory(MemoryAction::Clear)),
            KeypadButton::new("MR", Action::Memory(MemoryAction::Recall)),
            KeypadButton::new("M+", Action::Memory(MemoryAction::Add)),
            KeypadButton::new("M-", Action::Memory(MemoryAction::Subtract)),
            // Row 2: store and clearing
            KeypadButton::new("MS", Action::Memory(MemoryAction::Store)),
            KeypadButton::new("AC", Action::AllClear),
            KeypadButton::new("CE", Action::ClearEntry),
            KeypadButton::new("⌫", Action::Backspace),
            // Row 3: unary operations
            KeypadButton::new("%", Action::Percent),
            KeypadButton::new("√", Action::SquareRoot),
            KeypadButton::new("x²", Action::Square),
            KeypadButton::new("÷", Action::Operator(BinaryOp::Divide)),
            // Row 4
            KeypadButton::new("7", Action::Digit(7)),
            KeypadButton::new("8", Action::Digit(8)),
            KeypadButton::new("9", Action::Digit(9)),
            KeypadButton::new("×", Action::Operator(BinaryOp::Multiply)),
            // Row 5
            KeypadButton::new("4", Action::Digit(4)),
            KeypadButton::new("5", Action::Digit(5)),
            KeypadButton::new("6", Action::Digit(6)),
            KeypadButton::new("-", Action::Operator(BinaryOp::Subtract)),
            // Row 6
            KeypadButton::new("1", Action::Digit(1)),
            KeypadButton::new("2", Action::Digit(2)),
            KeypadButton::new("3", Action::Digit(3)),
            KeypadButton::new("+", Action::Operator(BinaryOp::Add)),
            // Row 7
            KeypadButton::new("±", Action::ToggleSign),
            KeypadButton::new("0", Action::Digit(0)),
            KeypadButton::new(".", Action::Decimal),
            KeypadButton::new("=", Action::Equals),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 7,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button that performs the given action
    #[must_use]
    pub fn find_button_by_action(&self, action: Action) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Highlights the button that performs the given action, releasing any
    /// previous highlight
    pub fn highlight_action(&mut self, action: Action) {
        self.release_all();
        if let Some(idx) = self.find_button_by_action(action) {
            if let Some(btn) = self.buttons.get_mut(idx) {
                btn.pressed = true;
            }
        }
    }

    /// Releases all pressed highlights
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(
        &self,
    ) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position inside the keypad area to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Account for the border (1 cell on each side)
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Converts a click position to the action of the button it lands on
    #[must_use]
    pub fn action_at(&self, area: Rect, x: u16, y: u16) -> Option<Action> {
        self.hit_test(area, x, y)
            .and_then(|idx| self.buttons.get(idx))
            .map(|btn| btn.action)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    palette: Palette,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget styled by the given palette
    #[must_use]
    pub fn new(keypad: &'a Keypad, palette: Palette) -> Self {
        Self { keypad, palette }
    }

    fn button_style(&self, btn: &KeypadButton) -> Style {
        if btn.pressed {
            return Style::default()
                .fg(self.palette.background)
                .bg(self.palette.accent)
                .add_modifier(Modifier::BOLD);
        }
        match btn.action {
            Action::Digit(_) | Action::Decimal => Style::default().fg(self.palette.text),
            Action::Operator(_) => Style::default().fg(self.palette.accent),
            Action::Equals => Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
            Action::AllClear | Action::ClearEntry | Action::Backspace => {
                Style::default().fg(self.palette.error)
            }
            _ => Style::default().fg(self.palette.muted),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return; // too small to render
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);
            let style = self.button_style(btn);

            let label = format!("[{}]", btn.label);
            let width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(width) / 2;
            let label_y = y + btn_height / 2;

            if label_y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(label_x, label_y, &Span::styled(label, style), btn_width);
            }
        }
    }
}
