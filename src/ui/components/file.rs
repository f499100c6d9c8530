//! File input component
//!
//! How files get picked is the host application's concern (a picker dialog,
//! drag-and-drop, a path prompt); this component exposes `add_file` and
//! `set_files` for it and renders the chosen list.

use crate::element::FileHandle;
use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, draw_label, input_block, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// File chooser bound to a file field.
pub struct FileInput {
    field: Field,
}

impl FileInput {
    pub fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn files(&self) -> Vec<FileHandle> {
        self.field.state().files.clone().unwrap_or_default()
    }

    /// Append one chosen file and raise a change event.
    pub fn add_file(&mut self, file: FileHandle) {
        {
            let element = self.field.element();
            let mut element = element.borrow_mut();
            element.files.get_or_insert_with(Vec::new).push(file);
        }
        self.field.on_change();
    }

    /// Replace the chosen files and raise a change event.
    pub fn set_files(&mut self, files: Vec<FileHandle>) {
        self.field.element().borrow_mut().files = Some(files);
        self.field.on_change();
    }

    /// Drop every chosen file and raise a change event.
    pub fn clear_files(&mut self) {
        self.field.element().borrow_mut().files = None;
        self.field.on_change();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
            self.clear_files();
        }
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

        let files = self.files();
        let rows = (files.len().max(1) as u16) + 2;
        let layout = layout_field(area, true, rows, error.is_some(), config.help_text.is_some());
        draw_label(frame, layout.label, &self.field, is_active);

        let lines: Vec<Line> = if files.is_empty() {
            vec![Line::styled("(no files chosen)", text_style(is_active))]
        } else {
            files
                .iter()
                .map(|file| Line::styled(file.name.clone(), text_style(is_active)))
                .collect()
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
