//! deskcalc terminal application
//!
//! Sets up the terminal, runs the event loop, and restores the terminal on
//! exit. The poll timeout is driven by the pending error-recovery deadline
//! so the implicit all-clear fires on time without a busy tick.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use deskcalc::theme::ThemePreference;
use deskcalc::tui::{keypad_area, render, App, InputHandler};

/// Idle redraw interval when no recovery is pending
const TICK: Duration = Duration::from_millis(250);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = match ThemePreference::from_config_dir() {
        Some(prefs) => App::with_preferences(prefs),
        None => App::new(),
    };
    let input_handler = InputHandler::new();

    loop {
        terminal.draw(|f| render(&app, f))?;

        let now = Instant::now();
        let timeout = app.recovery_timeout(now).unwrap_or(TICK).min(TICK);
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.apply(input_handler.handle_key(key), now);
                }
                Event::Mouse(mouse)
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                {
                    let frame = terminal.get_frame().area();
                    app.click(keypad_area(frame), mouse.column, mouse.row, now);
                }
                _ => {}
            }
        } else {
            // Timeout: release the cosmetic highlight and run a due recovery
            app.tick(Instant::now());
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
