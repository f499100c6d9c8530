//! Select component: single- and multi-choice option lists

use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, draw_label, input_block, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Dropdown bound to a select field. Closed it shows the current choice and
/// a chevron; open it lists the options for keyboard selection. A multiple
/// select toggles options and stays open, a single select replaces the
/// choice and closes.
pub struct Select {
    field: Field,
    open: bool,
    highlighted: usize,
}

impl Select {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            open: false,
            highlighted: 0,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
                self.open = true;
                let element = self.field.element();
                let element = element.borrow();
                self.highlighted = element
                    .options
                    .iter()
                    .position(|option| option.selected)
                    .unwrap_or(0);
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.open = false,
            KeyCode::Up => self.highlighted = self.highlighted.saturating_sub(1),
            KeyCode::Down => {
                let last = self.field.element().borrow().options.len().saturating_sub(1);
                self.highlighted = (self.highlighted + 1).min(last);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(self.highlighted),
            _ => {}
        }
    }

    /// Pick the option at `index` and raise a change event.
    pub fn choose(&mut self, index: usize) {
        let multiple = {
            let element = self.field.element();
            let mut element = element.borrow_mut();
            if index >= element.options.len() {
                return;
            }
            if element.multiple {
                element.options[index].selected = !element.options[index].selected;
            } else {
                for option in &mut element.options {
                    option.selected = false;
                }
                element.options[index].selected = true;
            }
            element.multiple
        };
        self.field.on_change();
        if !multiple {
            self.open = false;
        }
    }

    pub fn blur(&mut self) {
        self.open = false;
        self.field.on_blur();
    }

    /// Labels of the selected options, for the closed summary line.
    fn summary(&self) -> String {
        let element = self.field.element();
        let element = element.borrow();
        let labels: Vec<&str> = element
            .options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label.as_str())
            .collect();
        if labels.is_empty() {
            self.field
                .config()
                .placeholder
                .clone()
                .unwrap_or_else(|| "(select)".to_string())
        } else {
            labels.join(", ")
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let element = self.field.element();
        let element = element.borrow();
        let is_active = element.is_focused();
        let error = self.field.error();
        let config = self.field.config();

        let input_height = if self.open {
            element.options.len() as u16 + 2
        } else {
            3
        };
        let layout = layout_field(
            area,
            true,
            input_height,
            error.is_some(),
            config.help_text.is_some(),
        );
        draw_label(frame, layout.label, &self.field, is_active);

        let lines: Vec<Line> = if self.open {
            element
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let marker = if element.multiple {
                        if option.selected { "[x] " } else { "[ ] " }
                    } else if option.selected {
                        "• "
                    } else {
                        "  "
                    };
                    let style = if i == self.highlighted {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(
                        format!("{marker}{}", option.label),
                        style,
                    ))
                })
                .collect()
        } else {
            vec![Line::from(vec![
                Span::styled(self.summary(), text_style(is_active)),
                Span::raw(" "),
                Span::styled("▼", Style::default().fg(Color::DarkGray)),
            ])]
        };
        frame.render_widget(
            Paragraph::new(lines).block(input_block(is_active, error.is_some())),
            layout.input,
        );

        if let Some(error) = &error {
            draw_error(frame, layout.error, error);
        }
        if let Some(help) = &config.help_text {
            draw_help(frame, layout.help, help);
        }
    }
}
