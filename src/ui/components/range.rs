//! Range slider component

use crate::state::Field;
use crate::ui::components::{draw_error, draw_help, draw_label, input_block, layout_field, text_style};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One tick mark on a range slider's scale.
#[derive(Debug, Clone)]
pub struct RangeTick {
    pub value: f64,
    pub label: Option<String>,
    /// Render a pipe glyph at the tick position.
    pub pipe: bool,
}

impl RangeTick {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            label: None,
            pipe: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Horizontal slider bound to a range field.
pub struct RangeInput {
    field: Field,
    min: f64,
    max: f64,
    step: f64,
    ticks: Vec<RangeTick>,
}

impl RangeInput {
    pub fn new(field: Field, min: f64, max: f64) -> Self {
        Self {
            field,
            min,
            max,
            step: 1.0,
            ticks: Vec::new(),
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn ticks(mut self, ticks: Vec<RangeTick>) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Current numeric value, if one has been picked.
    pub fn value(&self) -> Option<f64> {
        self.field.element().borrow().value.trim().parse().ok()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Down => self.nudge(-1.0),
            KeyCode::Right | KeyCode::Up => self.nudge(1.0),
            KeyCode::Home => self.set_value(self.min),
            KeyCode::End => self.set_value(self.max),
            _ => {}
        }
    }

    fn nudge(&mut self, direction: f64) {
        let current = self.value().unwrap_or(self.min);
        self.set_value(current + direction * self.step);
    }

    /// Clamp into range, write the value string and raise a change event.
    pub fn set_value(&mut self, value: f64) {
        let clamped = value.clamp(self.min, self.max);
        self.field.element().borrow_mut().value = format_value(clamped);
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

        let input_height = if self.ticks.is_empty() { 3 } else { 4 };
        let layout = layout_field(
            area,
            true,
            input_height,
            error.is_some(),
            config.help_text.is_some(),
        );
        draw_label(frame, layout.label, &self.field, is_active);

        let inner_width = layout.input.width.saturating_sub(2).max(1) as usize;
        let display = element.value.trim().to_string();
        let track_width = inner_width.saturating_sub(display.len() + 1).max(1);
        let mut lines = vec![Line::from(vec![
            Span::styled(self.track(track_width), text_style(is_active)),
            Span::raw(" "),
            Span::styled(display, Style::default().fg(Color::White)),
        ])];
        if !self.ticks.is_empty() {
            lines.push(Line::styled(
                self.scale(track_width),
                Style::default().fg(Color::DarkGray),
            ));
        }
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

    fn ratio(&self, value: f64) -> f64 {
        if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// The slider track with the handle at the current position.
    fn track(&self, width: usize) -> String {
        let position = self
            .value()
            .map(|value| (self.ratio(value) * (width.saturating_sub(1)) as f64).round() as usize)
            .unwrap_or(0);
        let mut track = String::with_capacity(width * 3);
        for i in 0..width {
            track.push(if i == position && self.value().is_some() {
                '●'
            } else {
                '─'
            });
        }
        track
    }

    /// The tick scale under the track: pipes at tick positions, labels where
    /// they fit.
    fn scale(&self, width: usize) -> String {
        let mut scale: Vec<char> = vec![' '; width];
        for tick in &self.ticks {
            let position = (self.ratio(tick.value) * (width.saturating_sub(1)) as f64).round() as usize;
            if tick.pipe {
                if let Some(slot) = scale.get_mut(position) {
                    *slot = '|';
                }
            }
            if let Some(label) = &tick.label {
                for (offset, c) in label.chars().enumerate() {
                    if let Some(slot) = scale.get_mut(position + offset + 1) {
                        *slot = c;
                    }
                }
            }
        }
        scale.into_iter().collect()
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
