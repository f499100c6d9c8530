//! Markdown rendering seam for textarea previews and normalization

use pulldown_cmark::{html, Options, Parser};

/// Trait for the markdown-to-HTML collaborator, enabling mocking in tests.
///
/// `render` must be deterministic for the same input; it is called for the
/// textarea live preview and again at normalization time.
#[cfg_attr(test, mockall::automock)]
pub trait MarkdownRenderer {
    /// Render markdown source to an HTML string.
    fn render(&self, markdown: &str) -> String;
}

/// Default renderer backed by pulldown-cmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}
