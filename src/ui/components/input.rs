//! Single-line text input component (text, password, number, email)

use crate::element::FieldKind;
use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, draw_label, input_block, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Single-line input bound to a text-like field.
pub struct TextInput {
    field: Field,
}

impl TextInput {
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Translate a key press into an element edit and a change event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('v') {
            self.paste();
            return;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.field.element().borrow_mut().value.push(c);
                self.field.on_change();
            }
            KeyCode::Backspace => {
                let removed = self.field.element().borrow_mut().value.pop().is_some();
                if removed {
                    self.field.on_change();
                }
            }
            _ => {}
        }
    }

    fn paste(&mut self) {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => {
                self.field
                    .element()
                    .borrow_mut()
                    .value
                    .push_str(text.trim_end_matches('\n'));
                self.field.on_change();
            }
            Err(err) => tracing::warn!(%err, "clipboard paste failed"),
        }
    }

    /// Raise a blur event on the underlying field.
    pub fn blur(&mut self) {
        self.field.on_blur();
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let element = self.field.element();
        let element = element.borrow();
        let is_active = element.is_focused();
        let error = self.field.error();
        let config = self.field.config();

        let layout = layout_field(area, true, 3, error.is_some(), config.help_text.is_some());
        draw_label(frame, layout.label, &self.field, is_active);

        let mut display = if element.kind() == FieldKind::Password {
            "•".repeat(element.value.chars().count())
        } else {
            element.value.clone()
        };
        if display.is_empty() && !is_active {
            display = config
                .placeholder
                .clone()
                .unwrap_or_else(|| "(empty)".to_string());
        }
        let cursor = if is_active { "▌" } else { "" };
        let content = Paragraph::new(Line::from(vec![
            Span::styled(display, text_style(is_active)),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
        .block(input_block(is_active, error.is_some()));
        frame.render_widget(content, layout.input);

        if let Some(error) = &error {
            draw_error(frame, layout.error, error);
        }
        if let Some(help) = &config.help_text {
            draw_help(frame, layout.help, help);
        }
    }
}
