mod code;

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use code::{ErrorCode, Severity};
pub use text_size::TextRange;

#[salsa::accumulator]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, range: TextRange) -> Self {
        Self { code, message: code.template().to_owned(), range }
    }

    pub fn with_args(code: ErrorCode, args: &[impl AsRef<str>], range: TextRange) -> Self {
        Self { code, message: code.format(args), range }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    #[must_use]
    pub fn with_range(self, range: TextRange) -> Self {
        Self { range, ..self }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity() {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let message = level.title(&self.message).id(self.code.id()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{severity} {}: {} at {:?}", self.code, self.message, self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_plain() {
        let text = "class C { int x = 1l; }";
        let diagnostic =
            Diagnostic::new(ErrorCode::LowercaseEllSuffix, TextRange::new(18.into(), 20.into()));
        let renderer = Renderer::plain();
        let rendered = diagnostic.render(&renderer, "test.cs", text).to_string();
        assert!(rendered.starts_with("warning[CS0078]: The 'l' suffix"), "{rendered}");
        assert!(rendered.contains("test.cs:1:19"), "{rendered}");
        assert!(rendered.contains("^^ here"), "{rendered}");
    }

    #[test]
    fn display() {
        let diagnostic = Diagnostic::new(ErrorCode::SemicolonExpected, TextRange::empty(3.into()));
        assert_eq!(diagnostic.to_string(), "error CS1002: ; expected at 3..3");
        assert!(diagnostic.is_error());

        let diagnostic =
            Diagnostic::with_args(ErrorCode::InvalidExprTerm, &[")"], TextRange::empty(0.into()));
        assert_eq!(diagnostic.message(), "Invalid expression term ')'");
    }
}
