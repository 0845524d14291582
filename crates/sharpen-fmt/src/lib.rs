//! Whitespace normalization.
//!
//! Every token's trivia is rebuilt from the shape of the tree: line breaks
//! and indentation follow the kinds around each token, and tokens sharing a
//! line are separated by at most one space. Comments, documentation
//! comments, directives, disabled text and skipped tokens are kept; all
//! other whitespace is replaced.

mod layout;
mod spacing;
#[cfg(test)]
mod tests;
mod trivia;

use rustc_hash::FxHashMap;
use sharpen_syntax::SyntaxKind::*;
use sharpen_syntax::{GreenTriviaList, Result, SyntaxKind, SyntaxNode, SyntaxSet, SyntaxToken};

use layout::Layout;
use trivia::{Gap, kept_pieces};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// One level of indentation.
    pub indentation: String,
    pub end_of_line: String,
    /// Initializers below these kinds stay on one line.
    pub single_line_contexts: SyntaxSet,
}

impl NormalizeOptions {
    pub const DEFAULT_SINGLE_LINE_CONTEXTS: SyntaxSet = SyntaxSet::new([
        ATTRIBUTE_ARGUMENT_LIST,
        INTERPOLATION,
        BASE_CONSTRUCTOR_INITIALIZER,
        PRIMARY_CONSTRUCTOR_BASE_TYPE,
    ]);

    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    pub fn with_end_of_line(mut self, end_of_line: impl Into<String>) -> Self {
        self.end_of_line = end_of_line.into();
        self
    }

    pub fn with_single_line_context(mut self, kind: SyntaxKind) -> Self {
        self.single_line_contexts = self.single_line_contexts.with(kind);
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            indentation: "    ".to_owned(),
            end_of_line: "\r\n".to_owned(),
            single_line_contexts: Self::DEFAULT_SINGLE_LINE_CONTEXTS,
        }
    }
}

/// Returns `node` with its whitespace rewritten. The result is a new root;
/// `node` itself is unchanged.
pub fn normalize_whitespace(node: &SyntaxNode, options: &NormalizeOptions) -> Result<SyntaxNode> {
    tracing::debug!(kind = ?node.kind(), width = ?node.full_width(), "normalize whitespace");

    let tokens = node.descendant_tokens().filter(|token| !token.is_missing()).collect::<Vec<_>>();
    let Some(last) = tokens.last() else {
        return Ok(node.clone());
    };

    let layout = Layout::new(node, options);
    let gap = Gap::new(options);

    let mut leading = vec![GreenTriviaList::empty(); tokens.len()];
    let mut trailing = vec![GreenTriviaList::empty(); tokens.len()];

    let first = &tokens[0];
    leading[0] = gap.line_start(&kept_pieces(first, true), layout.depth(first), at_end(first));

    for (index, pair) in tokens.windows(2).enumerate() {
        let [prev, next] = pair else { continue };
        let lines = layout.line_breaks(prev, next);
        let space = lines == 0 && spacing::needs_space(prev, next);
        let (after, before) = gap.between(
            &kept_pieces(prev, false),
            &kept_pieces(next, true),
            lines,
            space,
            layout.depth(next),
            at_end(next),
        );
        trailing[index] = after;
        leading[index + 1] = before;
    }

    trailing[tokens.len() - 1] = gap.line_end(&kept_pieces(last, false));

    let mut rewritten = tokens
        .iter()
        .cloned()
        .zip(leading.into_iter().zip(trailing))
        .collect::<FxHashMap<_, _>>();
    node.replace_tokens(&tokens, |token, green| match rewritten.remove(token) {
        Some((leading, trailing)) => green.with_leading(leading).with_trailing(trailing),
        None => green,
    })
}

fn at_end(token: &SyntaxToken) -> bool {
    token.kind() == END_OF_FILE
}
