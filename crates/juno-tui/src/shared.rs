//! Shared helpers for views: layout, glyph styling, and popups.

use juno_core::Glyph;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A rectangle of at most `width` columns, horizontally centered in `r`.
pub fn centered_column(width: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y,
        width,
        height: r.height,
    }
}

/// Style one animated glyph.
///
/// Terminals cannot blend opacity, so it is bucketed: fully faded glyphs
/// render as blanks and partial ones drop to dim gray.
pub fn glyph_span(glyph: &Glyph, base: Style) -> Span<'static> {
    if glyph.opacity <= 0.05 {
        return Span::styled(" ", base);
    }
    let style = if glyph.opacity < 0.5 {
        base.fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if glyph.opacity < 0.95 {
        base.add_modifier(Modifier::DIM)
    } else {
        base
    };
    Span::styled(glyph.ch.to_string(), style)
}

/// Style a run of glyphs, switching to `dim` from character `dim_from` on.
pub fn glyph_spans(
    glyphs: &[Glyph],
    base: Style,
    dim: Style,
    dim_from: Option<usize>,
) -> Vec<Span<'static>> {
    glyphs
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let style = match dim_from {
                Some(from) if i >= from => dim,
                _ => base,
            };
            glyph_span(g, style)
        })
        .collect()
}

/// Draw a global help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard & Mouse").style(Style::default().bold()),
        Line::from(""),
        Line::from("Screens:"),
        Line::from("  1 / 2 / Tab  Switch screen (remounts it)"),
        Line::from(""),
        Line::from("Button refresh:"),
        Line::from("  r / Enter    Refresh"),
        Line::from("  Click [↻]    Refresh"),
        Line::from(""),
        Line::from("Pull to refresh:"),
        Line::from("  Drag down    Pull; release past the line to refresh"),
        Line::from("  Space        Scripted pull"),
        Line::from(""),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl+C   Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char, opacity: f32) -> Glyph {
        Glyph {
            ch,
            opacity,
            lift: 1.0 - opacity,
        }
    }

    #[test]
    fn faded_glyph_is_blank() {
        let span = glyph_span(&glyph('7', 0.0), Style::default());
        assert_eq!(span.content, " ");
    }

    #[test]
    fn visible_glyph_keeps_style() {
        let base = Style::default().fg(Color::Green);
        let span = glyph_span(&glyph('7', 1.0), base);
        assert_eq!(span.content, "7");
        assert_eq!(span.style, base);
    }

    #[test]
    fn dim_from_index() {
        let glyphs: Vec<Glyph> = "$1.50".chars().map(|c| glyph(c, 1.0)).collect();
        let base = Style::default().fg(Color::White);
        let dim = Style::default().fg(Color::DarkGray);
        let spans = glyph_spans(&glyphs, base, dim, Some(2));
        assert_eq!(spans[1].style, base);
        assert_eq!(spans[2].style, dim);
        assert_eq!(spans[4].style, dim);
    }

    #[test]
    fn centered_column_clamps() {
        let r = Rect::new(0, 0, 100, 10);
        assert_eq!(centered_column(40, r), Rect::new(30, 0, 40, 10));
        assert_eq!(centered_column(200, r).width, 100);
    }
}
