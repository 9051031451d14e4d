use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::session::StatusKind;

/// Footer color for each status severity.
pub(crate) fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::Green),
        StatusKind::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

/// `3.  Beaver Creek` for single digits, `12. Sally Goodin` otherwise, so
/// the titles line up in the first hundred entries.
pub(crate) fn numbered_title(number: usize, title: &str) -> String {
    let pad = if number <= 9 { " " } else { "" };
    format!("{number}.{pad} {title}")
}

/// Clip length as `m:ss`.
pub(crate) fn format_length(length: Duration) -> String {
    let secs = length.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(crate) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
