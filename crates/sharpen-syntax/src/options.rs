use rustc_hash::FxHashSet;

/// How `///` comments are treated while lexing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DocumentationMode {
    /// Plain single-line comments.
    None,
    /// Parsed into documentation comment trivia.
    #[default]
    Parse,
    /// Parsed, with malformed XML reported.
    Diagnose,
}

/// Options shared by every parse entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    preprocessor_symbols: FxHashSet<Box<str>>,
    documentation_mode: DocumentationMode,
}

impl ParseOptions {
    #[must_use]
    pub fn with_preprocessor_symbols<S: AsRef<str>>(mut self, symbols: impl IntoIterator<Item = S>) -> Self {
        self.preprocessor_symbols = symbols.into_iter().map(|symbol| symbol.as_ref().into()).collect();
        self
    }

    #[must_use]
    pub fn with_documentation_mode(mut self, mode: DocumentationMode) -> Self {
        self.documentation_mode = mode;
        self
    }

    /// Whether `symbol` is defined before the first `#define`.
    pub fn is_defined(&self, symbol: &str) -> bool {
        self.preprocessor_symbols.contains(symbol)
    }

    pub fn preprocessor_symbols(&self) -> impl Iterator<Item = &str> {
        self.preprocessor_symbols.iter().map(|symbol| &**symbol)
    }

    pub fn documentation_mode(&self) -> DocumentationMode {
        self.documentation_mode
    }
}
