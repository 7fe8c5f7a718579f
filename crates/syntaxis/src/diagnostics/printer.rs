//! Builder-pattern printer for rendering parse errors.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use super::ParseError;

/// Renders a `ParseError` as an annotated source snippet.
pub struct ParseErrorPrinter<'e, 's> {
    error: &'e ParseError,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> ParseErrorPrinter<'e, 's> {
    pub fn new(error: &'e ParseError, source: &'s str) -> Self {
        Self {
            error,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.error.message();
        let range = clamp_range(self.error.span.range(), self.source);
        let mut snippet = Snippet::source(self.source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range));
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }

        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
        renderer.render(&report).to_string()
    }
}

/// Keep the range inside the source and on character boundaries; an error at
/// the very end points past it.
fn clamp_range(range: std::ops::Range<usize>, source: &str) -> std::ops::Range<usize> {
    let mut start = range.start.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = range.end.clamp(start, source.len());
    while !source.is_char_boundary(end) {
        end += 1;
    }
    start..end
}
