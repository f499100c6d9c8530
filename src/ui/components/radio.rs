//! Radio group component: one field binding per option, sharing a name

use crate::element::FieldKind;
use crate::state::{Field, FieldConfig, Form};
use crate::ui::components::{draw_error, layout_field, text_style};
use crate::validate::Requirement;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One option of a radio group.
#[derive(Debug, Clone)]
pub struct RadioOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

impl RadioOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            checked: false,
        }
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

/// A group of radio buttons sharing a field name. Each member registers its
/// own binding, keyed by `"name.value"`.
pub struct RadioGroup {
    fields: Vec<Field>,
    cursor: usize,
}

impl RadioGroup {
    pub fn new(
        form: &Form,
        name: impl Into<String>,
        required: Requirement,
        options: Vec<RadioOption>,
    ) -> Self {
        let name = name.into();
        let fields = options
            .into_iter()
            .map(|option| {
                let mut config = FieldConfig::new(name.clone(), FieldKind::Radio)
                    .default_value(option.value)
                    .default_checked(option.checked)
                    .label(option.label);
                config.required = required.clone();
                form.field(config)
            })
            .collect();
        Self { fields, cursor: 0 }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Value of the currently checked member, if any.
    pub fn checked_value(&self) -> Option<String> {
        self.fields
            .iter()
            .find(|field| field.state().checked)
            .and_then(|field| field.state().value.as_text().map(str::to_string))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Left => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(self.fields.len().saturating_sub(1));
            }
            KeyCode::Down | KeyCode::Right => {
                if !self.fields.is_empty() {
                    self.cursor = (self.cursor + 1) % self.fields.len();
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.select(self.cursor),
            _ => {}
        }
    }

    /// Check the member at `index`, unchecking every other member. Change
    /// events fire for each member whose checked flag actually changed.
    pub fn select(&mut self, index: usize) {
        if index >= self.fields.len() {
            return;
        }
        for (i, field) in self.fields.iter().enumerate() {
            let element = field.element();
            let was_checked = element.borrow().checked;
            let now_checked = i == index;
            if was_checked != now_checked {
                element.borrow_mut().checked = now_checked;
                field.on_change();
            }
        }
    }

    /// Blur the member under the cursor.
    pub fn blur(&mut self) {
        if let Some(field) = self.fields.get(self.cursor) {
            field.on_blur();
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let is_active = self
            .fields
            .iter()
            .any(|field| field.element().borrow().is_focused());
        let error = self.fields.iter().find_map(|field| field.error());

        let rows = self.fields.len() as u16;
        let layout = layout_field(area, false, rows, error.is_some(), false);

        for (i, field) in self.fields.iter().enumerate() {
            let row = Rect {
                x: layout.input.x,
                y: layout.input.y + i as u16,
                width: layout.input.width,
                height: 1,
            };
            if row.y >= layout.input.y + layout.input.height {
                break;
            }
            let state = field.state();
            let glyph = if state.checked { "(•)" } else { "( )" };
            let highlighted = is_active && i == self.cursor;
            let label = field
                .config()
                .label
                .clone()
                .unwrap_or_else(|| state.value.as_text().unwrap_or("").to_string());
            let mut spans = vec![
                Span::styled(glyph, text_style(highlighted)),
                Span::raw(" "),
                Span::styled(
                    label,
                    if highlighted {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    },
                ),
            ];
            if field.config().required.is_required() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    field.config().required.marker().to_string(),
                    Style::default().fg(Color::Red),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), row);
        }

        if let Some(error) = &error {
            draw_error(frame, layout.error, error);
        }
    }
}
