//! Checkbox component

use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A toggleable checkbox bound to a checkbox field.
pub struct Checkbox {
    field: Field,
}

impl Checkbox {
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_checked(&self) -> bool {
        self.field.state().checked
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
            self.toggle();
        }
    }

    pub fn toggle(&mut self) {
        {
            let element = self.field.element();
            let mut element = element.borrow_mut();
            element.checked = !element.checked;
        }
        self.field.on_change();
    }

    pub fn blur(&mut self) {
        self.field.on_blur();
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let element = self.field.element();
        let element = element.borrow();
        let is_active = element.is_focused();
        let error = self.field.error();
        let config = self.field.config();

        let layout = layout_field(area, false, 1, error.is_some(), config.help_text.is_some());

        let glyph = if element.checked { "[x]" } else { "[ ]" };
        let label = config.label.clone().unwrap_or_else(|| config.name.clone());
        let mut spans = vec![
            Span::styled(glyph, text_style(is_active)),
            Span::raw(" "),
            Span::styled(
                label,
                if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                },
            ),
        ];
        if config.required.is_required() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                config.required.marker().to_string(),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), layout.input);

        if let Some(error) = &error {
            draw_error(frame, layout.error, error);
        }
        if let Some(help) = &config.help_text {
            draw_help(frame, layout.help, help);
        }
    }
}
