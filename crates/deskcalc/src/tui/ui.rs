//! TUI rendering
//!
//! Reads engine snapshots (display text, preview line, memory indicator)
//! and draws them with the active theme's palette. Layout is deterministic
//! so the event loop can hit-test mouse clicks against [`keypad_area`].

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use crate::theme::Theme;
use crate::tui::app::App;
use crate::tui::keypad::KeypadWidget;

/// Width of the keypad column
const KEYPAD_WIDTH: u16 = 24;

/// Colors derived from the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fill behind pressed buttons
    pub background: Color,
    /// Primary text
    pub text: Color,
    /// Secondary text (preview line, hints)
    pub muted: Color,
    /// Operators, results, the memory badge
    pub accent: Color,
    /// Error display
    pub error: Color,
    /// Block borders
    pub border: Color,
}

impl Palette {
    /// Returns the palette for a theme
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                error: Color::Red,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Yellow,
                error: Color::LightRed,
                border: Color::DarkGray,
            },
        }
    }
}

/// Splits the frame into the main column and the keypad column
fn split_columns(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(KEYPAD_WIDTH)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Returns the keypad area for a given frame size, for mouse hit testing
#[must_use]
pub fn keypad_area(frame_area: Rect) -> Rect {
    split_columns(frame_area).1
}

/// Renders the calculator UI to the frame
pub fn render(app: &App, frame: &mut Frame) {
    let ui = CalculatorUi::new(app);
    frame.render_widget(ui, frame.area());
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUi<'a> {
    app: &'a App,
    palette: Palette,
}

impl<'a> CalculatorUi<'a> {
    /// Creates the UI widget for the app's current state
    #[must_use]
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            palette: Palette::for_theme(app.theme()),
        }
    }

    fn main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // display (preview + value)
                Constraint::Length(1), // status line
                Constraint::Min(3),    // history
            ])
            .split(area)
            .to_vec()
    }

    /// Renders the display: preview line on top, current value below
    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let value_style = if engine.error().is_some() {
            Style::default().fg(self.palette.error).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                engine.preview_line(),
                Style::default().fg(self.palette.muted),
            )),
            Line::from(Span::styled(engine.display_text(), value_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" deskcalc ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.border)),
            )
            .render(area, buf);
    }

    /// Renders the status line: memory badge, theme, key hints
    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let memory_badge = if self.app.engine().memory_indicator() {
            Span::styled(
                " M ",
                Style::default()
                    .fg(self.palette.background)
                    .bg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("   ")
        };

        let line = Line::from(vec![
            memory_badge,
            Span::raw(" "),
            Span::styled(
                format!("theme: {}", self.app.theme().name()),
                Style::default().fg(self.palette.muted),
            ),
            Span::styled(
                "  t theme · Esc CE · Del AC · q quit",
                Style::default().fg(self.palette.muted),
            ),
        ]);

        Paragraph::new(line).render(area, buf);
    }

    /// Renders recent history, newest first
    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .engine()
            .history()
            .iter_rev()
            .take(usize::from(area.height.saturating_sub(2)))
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.expression.clone(),
                        Style::default().fg(self.palette.muted),
                    ),
                    Span::raw(" = "),
                    Span::styled(
                        entry.result.clone(),
                        Style::default().fg(self.palette.accent),
                    ),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" History ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.border)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUi<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (main, keypad) = split_columns(area);
        let chunks = Self::main_layout(main);

        if chunks.len() == 3 {
            self.render_display(chunks[0], buf);
            self.render_status(chunks[1], buf);
            self.render_history(chunks[2], buf);
        }

        KeypadWidget::new(self.app.keypad(), self.palette).render(keypad, buf);
    }
}
