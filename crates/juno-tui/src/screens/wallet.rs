//! The wallet home screen: balance card, actions, token list, refresh.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use juno_core::{HomeScreen, MotionConfig, RefreshMode, Release};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::debug;

use crate::playback::{PullIndicator, SpinnerLoader};
use crate::shared::{centered_column, glyph_spans};

/// Pointer pixels per terminal row.
pub const ROW_PX: f64 = 16.0;

/// Width of the phone-shaped column the screen is drawn in.
const PHONE_WIDTH: u16 = 46;

/// Spinners step once every this many frames.
const SPIN_EVERY: u64 = 5;

const ALEO: Token = Token {
    name: "aleo",
    amount: "342.5 aleo",
    value: "$9,348",
    change: "+$327.19",
    change_percent: "+12.3%",
};

const TOKENS: [Token; 3] = [ALEO, ALEO, ALEO];

const ACTIONS: [&str; 3] = ["↗ Send", "↙ Receive", "◈ Shield"];

const FILTERS: [&str; 3] = ["All", "Public", "Private"];

struct Token {
    name: &'static str,
    amount: &'static str,
    value: &'static str,
    change: &'static str,
    change_percent: &'static str,
}

/// A mounted wallet screen and the layout it was last drawn with.
#[derive(Debug)]
pub struct WalletView {
    home: HomeScreen<SpinnerLoader, PullIndicator>,
    /// Phone column from the last draw; pointer rows are relative to it.
    area: Rect,
    /// Refresh button from the last draw.
    refresh_button: Rect,
    frames: u64,
}

impl WalletView {
    /// Mount a wallet screen.
    ///
    /// The variant count is capped at the spinner's frame sets so every
    /// pick shows a distinct spinner.
    pub fn new(mode: RefreshMode, config: MotionConfig, seed: u64) -> Self {
        let config = MotionConfig {
            loader_variants: config.loader_variants.min(SpinnerLoader::variant_count()),
            ..config
        };
        let mut home = HomeScreen::new(mode, config, seed);
        home.attach_loader(SpinnerLoader::new());
        if mode == RefreshMode::Pull {
            home.attach_indicator(PullIndicator::new());
        }
        Self {
            home,
            area: Rect::default(),
            refresh_button: Rect::default(),
            frames: 0,
        }
    }

    /// The screen's controllers.
    pub fn home(&self) -> &HomeScreen<SpinnerLoader, PullIndicator> {
        &self.home
    }

    /// Advance one frame.
    pub fn update(&mut self, now: Duration) {
        self.home.update(now);
        self.frames = (self.frames + 1) % SPIN_EVERY;
        if self.frames == 0 {
            let refreshing = self.home.is_refreshing();
            if let Some(loader) = self.home.loader_mut().filter(|_| refreshing) {
                loader.advance();
            }
            if let Some(indicator) = self.home.indicator_mut() {
                indicator.advance();
            }
        }
    }

    /// Drop pending timers before the view goes away.
    pub fn unmount(&mut self) {
        self.home.unmount();
    }

    /// Pointer pixel position for a terminal row.
    fn pointer_y(&self, row: u16) -> f64 {
        f64::from(row.saturating_sub(self.area.y)) * ROW_PX
    }

    /// Run a pull gesture from the keyboard: past the threshold and back.
    pub fn scripted_pull(&mut self, now: Duration) -> Release {
        let reach = self.home.config().threshold * 1.5;
        if !self.home.pointer_down(0.0) {
            return Release::Ignored;
        }
        self.home.pointer_move(reach);
        self.home.pointer_up(now)
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, now: Duration, key: KeyEvent) {
        match (self.home.mode(), key.code) {
            (RefreshMode::Button, KeyCode::Char('r') | KeyCode::Enter) => {
                if self.home.press_refresh(now) {
                    debug!("refresh requested from keyboard");
                }
            }
            (RefreshMode::Pull, KeyCode::Char(' ')) => {
                let release = self.scripted_pull(now);
                debug!(?release, "scripted pull");
            }
            _ => {}
        }
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, now: Duration, mouse: MouseEvent) {
        let inside = hit(self.area, mouse.column, mouse.row);
        let y = self.pointer_y(mouse.row);
        match (self.home.mode(), mouse.kind) {
            (RefreshMode::Button, MouseEventKind::Down(MouseButton::Left)) => {
                if hit(self.refresh_button, mouse.column, mouse.row) {
                    self.home.press_refresh(now);
                }
            }
            (RefreshMode::Pull, MouseEventKind::Down(MouseButton::Left)) if inside => {
                self.home.pointer_down(y);
            }
            (RefreshMode::Pull, MouseEventKind::Drag(MouseButton::Left)) => {
                if inside {
                    self.home.pointer_move(y);
                } else {
                    self.home.pointer_leave(now);
                }
            }
            (RefreshMode::Pull, MouseEventKind::Up(MouseButton::Left)) => {
                self.home.pointer_up(now);
            }
            _ => {}
        }
    }

    /// The pointer left the terminal window.
    pub fn handle_focus_lost(&mut self, now: Duration) {
        self.home.pointer_leave(now);
    }

    /// Draw the screen into `area`.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, now: Duration) {
        let phone = centered_column(PHONE_WIDTH, area);
        self.area = phone;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(phone);
        frame.render_widget(block, phone);

        if inner.height < 4 || inner.width < 30 {
            return;
        }

        let stretch_rows = match self.home.mode() {
            RefreshMode::Pull => (self.home.stretch_height() / ROW_PX).round() as u16,
            RefreshMode::Button => 1,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // Header
                Constraint::Length(stretch_rows), // Stretch / loader
                Constraint::Length(4),            // Balance card
                Constraint::Length(1),            // Actions
                Constraint::Length(1),            // Spacer
                Constraint::Length(1),            // Filters
                Constraint::Min(0),               // Tokens
                Constraint::Length(1),            // Manage tokens
            ])
            .split(inner);

        self.draw_header(frame, chunks[0]);
        self.draw_stretch(frame, chunks[1]);
        self.draw_balance(frame, chunks[2], now);
        draw_actions(frame, chunks[3]);
        draw_filters(frame, chunks[5]);
        draw_tokens(frame, chunks[6]);
        frame.render_widget(
            Paragraph::new("Manage tokens")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[7],
        );
    }

    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let account = Line::from(vec![
            Span::styled("◉ ", Style::default().fg(Color::Cyan)),
            Span::styled("JUNO", Style::default().fg(Color::White).bold()),
            Span::styled(" ▾", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(account), area);

        if self.home.mode() == RefreshMode::Button {
            let button = Rect {
                x: area.x + area.width.saturating_sub(3),
                y: area.y,
                width: 3.min(area.width),
                height: 1,
            };
            let style = if self.home.is_refreshing() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White).bold()
            };
            frame.render_widget(Paragraph::new(Span::styled("[↻]", style)), button);
            self.refresh_button = button;
        } else {
            self.refresh_button = Rect::default();
        }
    }

    fn draw_stretch(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let line = if self.home.is_refreshing() {
            let spinner = self.home.loader().map(SpinnerLoader::glyph).unwrap_or(' ');
            let mut spans = Vec::new();
            if let Some(indicator) = self.home.indicator() {
                spans.push(Span::styled(
                    format!("{} ", indicator.glyph()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(
                format!("{spinner} Refreshing"),
                Style::default().fg(Color::Cyan),
            ));
            Line::from(spans)
        } else if self.home.tracker().is_pulling() {
            match self.home.indicator() {
                Some(indicator) => {
                    let hint = if indicator.progress() >= 100.0 {
                        "release to refresh"
                    } else {
                        "pull to refresh"
                    };
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", indicator.glyph()),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(indicator.bar(16), Style::default().fg(Color::Green)),
                        Span::styled(format!(" {hint}"), Style::default().fg(Color::DarkGray)),
                    ])
                }
                None => Line::from(""),
            }
        } else {
            Line::from("")
        };

        // Vertically center the line in the stretch area
        let row = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
    }

    fn draw_balance(&self, frame: &mut Frame, area: Rect, now: Duration) {
        let block = Block::default()
            .title(" Balance ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let balance = self.home.balance();
        let white = Style::default().fg(Color::White).bold();
        let dim = Style::default().fg(Color::DarkGray).bold();
        let amount = Line::from(glyph_spans(
            &balance.glyphs(now),
            white,
            dim,
            balance.value().decimal_index(),
        ));

        let green = Style::default().fg(Color::Green);
        let mut change = vec![Span::styled("▲ ", green)];
        change.extend(glyph_spans(
            &self.home.percent_change().glyphs(now),
            green,
            green,
            None,
        ));
        change.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        change.extend(glyph_spans(
            &self.home.dollar_change().glyphs(now),
            green,
            green,
            None,
        ));

        frame.render_widget(Paragraph::new(vec![amount, Line::from(change)]), inner);
    }

    /// Return context-sensitive status bar text.
    pub fn status_hint(&self) -> &str {
        match self.home.mode() {
            RefreshMode::Button => "r/Enter:refresh  Tab:screen  ?:help  q:quit",
            RefreshMode::Pull => "drag down:pull  Space:scripted pull  Tab:screen  ?:help  q:quit",
        }
    }
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

fn draw_actions(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, label) in ACTIONS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("[ {label} ]"),
            Style::default().fg(Color::White).bg(Color::Black),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_filters(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, label) in FILTERS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if i == 0 {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label.to_uppercase(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tokens(frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let mut lines = Vec::new();
    for token in &TOKENS {
        lines.push(spread(
            vec![
                Span::styled("◎ ", Style::default().fg(Color::Cyan)),
                Span::styled(token.name.to_uppercase(), Style::default().fg(Color::White).bold()),
            ],
            vec![Span::styled(token.value, Style::default().fg(Color::White).bold())],
            width,
        ));
        lines.push(spread(
            vec![Span::styled(
                format!("  {}", token.amount),
                Style::default().fg(Color::Gray),
            )],
            vec![Span::styled(
                format!("{} · {}", token.change, token.change_percent),
                Style::default().fg(Color::Green),
            )],
            width,
        ));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Lay out `left` and `right` on one line, padding between them.
fn spread(left: Vec<Span<'static>>, right: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let used: usize = left.iter().chain(right.iter()).map(Span::width).sum();
    let mut spans = left;
    spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));
    spans.extend(right);
    Line::from(spans)
}
