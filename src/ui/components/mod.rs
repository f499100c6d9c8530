//! Visual form components
//!
//! Each component owns a [`Field`](crate::state::Field) plus view-only
//! state, translates key events into element mutations and change/blur
//! events, and draws itself with a label, required marker, bordered input,
//! field-local error line and optional help text.

mod buttons;
mod checkbox;
mod file;
mod input;
mod radio;
mod range;
mod select;
mod textarea;

pub use buttons::{render_button, render_reset_button, render_submit_button, BUTTON_HEIGHT};
pub use checkbox::Checkbox;
pub use file::FileInput;
pub use input::TextInput;
pub use radio::{RadioGroup, RadioOption};
pub use range::{RangeInput, RangeTick};
pub use select::Select;
pub use textarea::{TextareaInput, TextareaTab};

use crate::state::Field;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Vertical slices of a field's area: label line, input block, error line,
/// help line. Absent parts get a zero-height rect.
pub(crate) struct FieldLayout {
    pub label: Rect,
    pub input: Rect,
    pub error: Rect,
    pub help: Rect,
}

pub(crate) fn layout_field(
    area: Rect,
    has_label: bool,
    input_height: u16,
    has_error: bool,
    has_help: bool,
) -> FieldLayout {
    fn slice(area: Rect, bottom: u16, y: &mut u16, height: u16) -> Rect {
        let height = height.min(bottom.saturating_sub(*y));
        let rect = Rect {
            x: area.x,
            y: *y,
            width: area.width,
            height,
        };
        *y += height;
        rect
    }

    let bottom = area.y + area.height;
    let mut y = area.y;

    let label = slice(area, bottom, &mut y, u16::from(has_label));
    let error_height = u16::from(has_error);
    let help_height = u16::from(has_help);
    let reserved = error_height + help_height;
    let input_height = input_height.min(bottom.saturating_sub(y).saturating_sub(reserved));
    let input = slice(area, bottom, &mut y, input_height);
    let error = slice(area, bottom, &mut y, error_height);
    let help = slice(area, bottom, &mut y, help_height);

    FieldLayout {
        label,
        input,
        error,
        help,
    }
}

/// Style for the main content of an input.
pub(crate) fn text_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Border style for an input block: errors win over focus.
pub(crate) fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(crate) fn input_block(is_active: bool, has_error: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_active, has_error))
}

/// Draw the field label with its required marker.
pub(crate) fn draw_label(frame: &mut Frame, area: Rect, field: &Field, is_active: bool) {
    if area.height == 0 {
        return;
    }
    let config = field.config();
    let label = config.label.clone().unwrap_or_else(|| config.name.clone());
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(label, style)];
    if config.required.is_required() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            config.required.marker().to_string(),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub(crate) fn draw_error(frame: &mut Frame, area: Rect, error: &str) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red)),
        area,
    );
}

pub(crate) fn draw_help(frame: &mut Frame, area: Rect, help: &str) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(help.to_string()).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
