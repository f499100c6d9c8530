//! Submit and reset buttons

use crate::state::FormStatus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic bordered button. A disabled button renders dimmed even
/// while selected.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let (border_style, text_style) = if !is_enabled {
        let dimmed = Style::default().fg(Color::DarkGray);
        (dimmed, dimmed)
    } else if is_selected {
        let active = Style::default().fg(Color::Cyan);
        (active, active.add_modifier(Modifier::BOLD))
    } else {
        (Style::default().fg(Color::DarkGray), Style::default())
    };

    let button = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(button, area);
}

/// Render the submit button; while a submit is in flight it is disabled and
/// its label swaps to a progress message.
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    status: &FormStatus,
    is_selected: bool,
) {
    let content = if status.is_submitting {
        "Submitting…"
    } else {
        label
    };
    render_button(frame, area, content, is_selected, !status.is_submitting);
}

/// Render the reset button.
pub fn render_reset_button(frame: &mut Frame, area: Rect, is_selected: bool) {
    render_button(frame, area, "Reset", is_selected, true);
}
