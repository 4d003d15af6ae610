//! Screen definitions and the screen bar.

pub mod wallet;

use juno_core::RefreshMode;
use ratatui::prelude::*;

/// Identifies which wallet screen is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    /// Home screen with a refresh button.
    Button,
    /// Home screen with pull to refresh.
    Pull,
}

impl ScreenId {
    /// All screens in display order.
    pub const ALL: [ScreenId; 2] = [ScreenId::Button, ScreenId::Pull];

    /// Parse a screen name.
    pub fn from_name(name: &str) -> Option<ScreenId> {
        match name.to_lowercase().as_str() {
            "button" | "tap" => Some(ScreenId::Button),
            "pull" | "gesture" => Some(ScreenId::Pull),
            _ => None,
        }
    }

    /// Label shown in the screen bar.
    pub fn label(self) -> &'static str {
        match self {
            ScreenId::Button => "[1]Button refresh",
            ScreenId::Pull => "[2]Pull to refresh",
        }
    }

    /// The refresh mode this screen mounts.
    pub fn mode(self) -> RefreshMode {
        match self {
            ScreenId::Button => RefreshMode::Button,
            ScreenId::Pull => RefreshMode::Pull,
        }
    }

    /// Index of this screen in the bar.
    pub fn index(self) -> usize {
        ScreenId::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// The other screen (wrapping).
    pub fn next(self) -> ScreenId {
        ScreenId::ALL[(self.index() + 1) % ScreenId::ALL.len()]
    }
}

const DIVIDER: &str = " | ";

/// Draw the screen bar.
pub fn draw_screen_bar(frame: &mut Frame, active: ScreenId, area: Rect) {
    let mut spans = Vec::new();
    for (i, screen) in ScreenId::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(DIVIDER, Style::default().fg(Color::DarkGray)));
        }
        let style = if *screen == active {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(screen.label(), style));
    }
    frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(spans)), area);
}

/// Hit-test the screen bar for mouse clicks.
pub fn screen_bar_hit_test(col: u16) -> Option<ScreenId> {
    let mut x = 0u16;
    for screen in ScreenId::ALL {
        let end_x = x + screen.label().chars().count() as u16;
        if col >= x && col < end_x {
            return Some(screen);
        }
        x = end_x + DIVIDER.len() as u16;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse() {
        assert_eq!(ScreenId::from_name("Pull"), Some(ScreenId::Pull));
        assert_eq!(ScreenId::from_name("button"), Some(ScreenId::Button));
        assert_eq!(ScreenId::from_name("swipe"), None);
    }

    #[test]
    fn next_wraps() {
        assert_eq!(ScreenId::Button.next(), ScreenId::Pull);
        assert_eq!(ScreenId::Pull.next(), ScreenId::Button);
    }

    #[test]
    fn bar_hit_test() {
        assert_eq!(screen_bar_hit_test(0), Some(ScreenId::Button));
        assert_eq!(screen_bar_hit_test(16), Some(ScreenId::Button));
        // divider
        assert_eq!(screen_bar_hit_test(18), None);
        assert_eq!(screen_bar_hit_test(20), Some(ScreenId::Pull));
        assert_eq!(screen_bar_hit_test(80), None);
    }
}
