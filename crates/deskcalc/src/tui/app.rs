//! Application controller
//!
//! Owns the engine, the theme, the keypad highlight state, and the pending
//! error-recovery deadline. The error dwell is an explicit scheduled
//! transition: when an engine operation raises the transient error display,
//! the controller arms a deadline; `tick` performs the implicit all-clear
//! once it elapses, and any input event arriving earlier supersedes the
//! pending recovery (recover first, then apply the input).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::core::Engine;
use crate::theme::{Theme, ThemePreference};
use crate::tui::input::{Action, MemoryAction};
use crate::tui::keypad::Keypad;

/// How long an error message stays on display before the implicit all-clear
pub const ERROR_DWELL: Duration = Duration::from_secs(2);

/// Calculator application state
#[derive(Debug)]
pub struct App {
    /// The calculator engine
    engine: Engine,
    /// Clickable keypad (highlight state lives here)
    keypad: Keypad,
    /// Active display theme
    theme: Theme,
    /// Persisted theme preference, when a config directory exists
    preferences: Option<ThemePreference>,
    /// When the transient error display auto-recovers
    error_deadline: Option<Instant>,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app with the default theme and no persistence
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            keypad: Keypad::new(),
            theme: Theme::default(),
            preferences: None,
            error_deadline: None,
            should_quit: false,
        }
    }

    /// Creates an app backed by a preference store; the persisted theme is
    /// loaded immediately.
    #[must_use]
    pub fn with_preferences(preferences: ThemePreference) -> Self {
        let theme = preferences.load();
        Self {
            engine: Engine::new(),
            keypad: Keypad::new(),
            theme,
            preferences: Some(preferences),
            error_deadline: None,
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the active theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns how long until the pending error recovery fires, if one is
    /// armed. Used by the event loop as its poll timeout.
    #[must_use]
    pub fn recovery_timeout(&self, now: Instant) -> Option<Duration> {
        self.error_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Applies an input action.
    ///
    /// A new input arriving while the error display is up supersedes the
    /// pending recovery: the all-clear runs first, then the action.
    pub fn apply(&mut self, action: Action, now: Instant) {
        if action == Action::None {
            return;
        }
        if self.error_deadline.take().is_some() {
            self.engine.all_clear();
        }
        self.keypad.highlight_action(action);

        match action {
            Action::Digit(d) => self.engine.input_digit(d),
            Action::Decimal => self.engine.input_decimal(),
            Action::Operator(op) => self.engine.input_operator(op),
            Action::Equals => self.engine.calculate(),
            Action::ClearEntry => self.engine.clear_entry(),
            Action::AllClear => self.engine.all_clear(),
            Action::Backspace => self.engine.backspace(),
            Action::Percent => self.engine.percentage(),
            Action::SquareRoot => self.engine.square_root(),
            Action::Square => self.engine.square(),
            Action::ToggleSign => self.engine.toggle_sign(),
            Action::Memory(mem) => match mem {
                MemoryAction::Clear => self.engine.memory_clear(),
                MemoryAction::Recall => self.engine.memory_recall(),
                MemoryAction::Add => self.engine.memory_add(),
                MemoryAction::Subtract => self.engine.memory_subtract(),
                MemoryAction::Store => self.engine.memory_store(),
            },
            Action::ToggleTheme => self.toggle_theme(),
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }

        if let Some(err) = self.engine.error() {
            tracing::debug!(%err, "error display armed, recovering in {ERROR_DWELL:?}");
            self.error_deadline = Some(now + ERROR_DWELL);
        }
    }

    /// Applies a mouse click at terminal coordinates, given the rendered
    /// keypad area
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16, now: Instant) {
        if let Some(action) = self.keypad.action_at(keypad_area, x, y) {
            self.apply(action, now);
        }
    }

    /// Advances time-driven state: releases the cosmetic button highlight
    /// and performs the implicit all-clear once the error dwell elapses.
    pub fn tick(&mut self, now: Instant) {
        self.keypad.release_all();
        if let Some(deadline) = self.error_deadline {
            if now >= deadline {
                self.engine.all_clear();
                self.error_deadline = None;
            }
        }
    }

    /// Switches theme and persists the choice when a store is configured
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Some(prefs) = &self.preferences {
            if let Err(err) = prefs.save(self.theme) {
                tracing::warn!(%err, "failed to persist theme preference");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOp, CalcError};

    fn divide_by_zero(app: &mut App, now: Instant) {
        app.apply(Action::Digit(5), now);
        app.apply(Action::Operator(BinaryOp::Divide), now);
        app.apply(Action::Digit(0), now);
        app.apply(Action::Equals, now);
    }

    // ===== Basic dispatch tests =====

    #[test]
    fn test_app_new() {
        let app = App::new();
        assert_eq!(app.engine().current_value(), "0");
        assert_eq!(app.theme(), Theme::Light);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_end_to_end_calculation() {
        let mut app = App::new();
        let now = Instant::now();
        app.apply(Action::Digit(1), now);
        app.apply(Action::Digit(2), now);
        app.apply(Action::Operator(BinaryOp::Add), now);
        app.apply(Action::Digit(8), now);
        app.apply(Action::Equals, now);
        assert_eq!(app.engine().display_text(), "20");
        assert_eq!(
            app.engine().history().last().unwrap().display(),
            "12 + 8 = 20"
        );
    }

    #[test]
    fn test_quit_action() {
        let mut app = App::new();
        app.apply(Action::Quit, Instant::now());
        assert!(app.should_quit());
    }

    #[test]
    fn test_none_action_is_ignored() {
        let mut app = App::new();
        app.apply(Action::None, Instant::now());
        assert_eq!(app.engine().current_value(), "0");
        assert!(app.keypad().buttons_with_positions().all(|(_, b)| !b.pressed));
    }

    #[test]
    fn test_memory_actions_dispatch() {
        let mut app = App::new();
        let now = Instant::now();
        app.apply(Action::Digit(7), now);
        app.apply(Action::Memory(MemoryAction::Store), now);
        app.apply(Action::ClearEntry, now);
        app.apply(Action::Memory(MemoryAction::Recall), now);
        assert_eq!(app.engine().current_value(), "7");
    }

    // ===== Error dwell tests =====

    #[test]
    fn test_error_arms_recovery_deadline() {
        let mut app = App::new();
        let now = Instant::now();
        divide_by_zero(&mut app, now);
        assert_eq!(app.engine().error(), Some(CalcError::DivideByZero));
        assert_eq!(app.recovery_timeout(now), Some(ERROR_DWELL));
    }

    #[test]
    fn test_tick_before_dwell_keeps_error() {
        let mut app = App::new();
        let now = Instant::now();
        divide_by_zero(&mut app, now);
        app.tick(now + Duration::from_millis(500));
        assert_eq!(app.engine().error(), Some(CalcError::DivideByZero));
    }

    #[test]
    fn test_tick_after_dwell_all_clears() {
        let mut app = App::new();
        let now = Instant::now();
        divide_by_zero(&mut app, now);
        app.tick(now + ERROR_DWELL);
        assert!(app.engine().error().is_none());
        assert_eq!(app.engine().current_value(), "0");
        assert!(app.engine().operator().is_none());
        assert!(app.recovery_timeout(now).is_none());
    }

    #[test]
    fn test_input_supersedes_pending_recovery() {
        let mut app = App::new();
        let now = Instant::now();
        divide_by_zero(&mut app, now);
        // New input before the dwell elapses: recover first, then apply
        app.apply(Action::Digit(9), now + Duration::from_millis(100));
        assert!(app.engine().error().is_none());
        assert_eq!(app.engine().current_value(), "9");
        assert!(app.recovery_timeout(now).is_none());
    }

    #[test]
    fn test_recovery_timeout_counts_down() {
        let mut app = App::new();
        let now = Instant::now();
        divide_by_zero(&mut app, now);
        let later = now + Duration::from_millis(1500);
        assert_eq!(
            app.recovery_timeout(later),
            Some(Duration::from_millis(500))
        );
    }

    // ===== Highlight tests =====

    #[test]
    fn test_apply_highlights_button() {
        let mut app = App::new();
        app.apply(Action::Digit(5), Instant::now());
        assert!(app
            .keypad()
            .buttons_with_positions()
            .any(|(_, b)| b.pressed && b.action == Action::Digit(5)));
    }

    #[test]
    fn test_tick_releases_highlight() {
        let mut app = App::new();
        let now = Instant::now();
        app.apply(Action::Digit(5), now);
        app.tick(now);
        assert!(app.keypad().buttons_with_positions().all(|(_, b)| !b.pressed));
    }

    // ===== Mouse tests =====

    #[test]
    fn test_click_dispatches_button_action() {
        let mut app = App::new();
        let area = Rect::new(0, 0, 22, 16);
        // Top-left button is MC; clicking it must not disturb entry state
        app.click(area, 1, 1, Instant::now());
        assert_eq!(app.engine().current_value(), "0");
        assert_eq!(app.engine().memory(), 0.0);
    }

    #[test]
    fn test_click_outside_keypad_is_ignored() {
        let mut app = App::new();
        let area = Rect::new(10, 10, 22, 16);
        app.click(area, 0, 0, Instant::now());
        assert_eq!(app.engine().current_value(), "0");
    }

    // ===== Theme tests =====

    #[test]
    fn test_toggle_theme_without_store() {
        let mut app = App::new();
        app.apply(Action::ToggleTheme, Instant::now());
        assert_eq!(app.theme(), Theme::Dark);
        app.apply(Action::ToggleTheme, Instant::now());
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = ThemePreference::at(dir.path().join("theme.json"));
        let mut app = App::with_preferences(prefs.clone());
        assert_eq!(app.theme(), Theme::Light);

        app.apply(Action::ToggleTheme, Instant::now());
        assert_eq!(prefs.load(), Theme::Dark);

        // A fresh app picks the persisted theme back up
        let restored = App::with_preferences(prefs);
        assert_eq!(restored.theme(), Theme::Dark);
    }
}
