//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tracing::debug;

use crate::app::JunoApp;
use crate::screens::{self, ScreenId};

/// Frame interval; input polling times out after this long.
const FRAME: Duration = Duration::from_millis(16);

/// Launch the TUI application.
pub fn run(mut app: JunoApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    app.view.unmount();
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut JunoApp,
) -> Result<(), String> {
    loop {
        app.update();
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(FRAME).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            handle_event(app, event);
        }
    }
}

/// Handle a crossterm event.
fn handle_event(app: &mut JunoApp, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::FocusLost => {
            let now = app.now();
            app.view.handle_focus_lost(now);
        }
        _ => {}
    }
}

/// Handle keyboard input.
fn handle_key(app: &mut JunoApp, key: KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Esc if app.show_help => app.show_help = false,
        KeyCode::Tab | KeyCode::BackTab => app.switch_screen(app.active.next()),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(screen) = number_to_screen(c) {
                app.switch_screen(screen);
            }
        }
        _ => {
            let now = app.now();
            app.view.handle_key(now, key);
        }
    }
}

/// Map a digit key to a screen.
fn number_to_screen(c: char) -> Option<ScreenId> {
    let idx = c.to_digit(10)? as usize;
    ScreenId::ALL.get(idx.checked_sub(1)?).copied()
}

/// Handle mouse events.
fn handle_mouse(app: &mut JunoApp, mouse: MouseEvent) {
    // The screen bar sits on row 0
    if mouse.row == 0 && mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        if let Some(screen) = screens::screen_bar_hit_test(mouse.column) {
            debug!(?screen, "screen bar clicked");
            app.switch_screen(screen);
        }
        return;
    }
    let now = app.now();
    app.view.handle_mouse(now, mouse);
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &mut JunoApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Screen bar
            Constraint::Min(0),    // Wallet
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    screens::draw_screen_bar(frame, app.active, chunks[0]);

    let now = app.now();
    app.view.draw(frame, chunks[1], now);

    let status = Paragraph::new(app.view.status_hint())
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[2]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}
