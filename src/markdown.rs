// ABOUTME: Markdown rendering seam for the soapbox slide compiler
// ABOUTME: Defines the renderer trait and the default comrak-backed implementation

use comrak::{markdown_to_html, ComrakOptions};

/// The markdown engine is injected behind this trait so the compiler and the
/// transform pipeline stay engine-agnostic. Special blocks (notes, handouts)
/// are re-rendered through the same renderer as the slide body.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Default renderer backed by comrak, with raw HTML allowed so directive
/// markers and inline markup survive the round trip.
pub struct ComrakRenderer {
    options: ComrakOptions,
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        let mut options = ComrakOptions::default();
        options.render.unsafe_ = true; // Allow raw HTML
        Self { options }
    }
}

impl ComrakRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &self.options)
    }
}
