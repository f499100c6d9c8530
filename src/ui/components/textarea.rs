//! Multi-line textarea component with a raw/preview tab pair

use crate::markdown::MarkdownRenderer;
use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, draw_label, input_block, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Which textarea pane is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextareaTab {
    Raw,
    Preview,
}

/// Multi-line editor bound to a textarea field, with a markdown preview
/// pane. Ctrl+P switches between the raw text and the rendered preview.
pub struct TextareaInput {
    field: Field,
    tab: TextareaTab,
    rows: u16,
    disabled: bool,
}

impl TextareaInput {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            tab: TextareaTab::Raw,
            rows: 4,
            disabled: false,
        }
    }

    /// Number of visible content rows.
    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = rows.max(1);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn tab(&self) -> TextareaTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: TextareaTab) {
        if !self.disabled {
            self.tab = tab;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.disabled {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('p') {
            self.tab = match self.tab {
                TextareaTab::Raw => TextareaTab::Preview,
                TextareaTab::Preview => TextareaTab::Raw,
            };
            return;
        }
        if self.tab == TextareaTab::Preview {
            return;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.field.element().borrow_mut().value.push(c);
                self.field.on_change();
            }
            KeyCode::Enter => {
                self.field.element().borrow_mut().value.push('\n');
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

    pub fn blur(&mut self) {
        self.field.on_blur();
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, markdown: &dyn MarkdownRenderer) {
        let element = self.field.element();
        let element = element.borrow();
        let is_active = element.is_focused() && !self.disabled;
        let error = self.field.error();
        let config = self.field.config();

        let layout = layout_field(
            area,
            true,
            self.rows + 3,
            error.is_some(),
            config.help_text.is_some(),
        );
        draw_label(frame, layout.label, &self.field, is_active);

        // Tab row, then the bordered content pane underneath
        let tabs = Rect {
            height: 1.min(layout.input.height),
            ..layout.input
        };
        let pane = Rect {
            y: layout.input.y + tabs.height,
            height: layout.input.height.saturating_sub(tabs.height),
            ..layout.input
        };

        let tab_style = |active: bool| {
            if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Raw", tab_style(self.tab == TextareaTab::Raw)),
                Span::raw(" │ "),
                Span::styled("Preview", tab_style(self.tab == TextareaTab::Preview)),
            ]))
            .right_aligned(),
            tabs,
        );

        let content = match self.tab {
            TextareaTab::Raw => {
                let mut lines: Vec<Line> = element
                    .value
                    .split('\n')
                    .map(|line| Line::styled(line.to_string(), text_style(is_active)))
                    .collect();
                if is_active {
                    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));
                    match lines.last_mut() {
                        Some(last) => last.spans.push(cursor),
                        None => lines.push(Line::from(cursor)),
                    }
                }
                lines
            }
            TextareaTab::Preview => markdown
                .render(&element.value)
                .lines()
                .map(|line| Line::from(line.to_string()))
                .collect(),
        };
        frame.render_widget(
            Paragraph::new(content)
                .wrap(Wrap { trim: false })
                .block(input_block(is_active, error.is_some())),
            pane,
        );

        if let Some(error) = &error {
            draw_error(frame, layout.error, error);
        }
        if let Some(help) = &config.help_text {
            draw_help(frame, layout.help, help);
        }
    }
}
