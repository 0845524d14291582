//! Incremental builder for green trees.

use sharpen_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use crate::factory::shape;
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::SyntaxKind;

struct Opened {
    kind: SyntaxKind,
    /// Index of the node's first child in `children`.
    first_child: usize,
    start: TextSize,
    diagnostics: Vec<Diagnostic>,
}

/// Builds a green tree from parser events.
///
/// Children are pushed flat; on `finish_node` they are matched against the
/// node's shape, which groups list items into list nodes and fills absent
/// required slots with missing placeholders.
pub struct Builder {
    opened: Vec<Opened>,
    children: Vec<GreenElement>,
    text_len: TextSize,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_CHILDREN_LEN: usize = 1024;

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
            text_len: TextSize::new(0),
        }
    }

    /// Full width of everything added so far.
    pub fn text_len(&self) -> TextSize {
        self.text_len
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.opened.push(Opened {
            kind,
            first_child: self.children.len(),
            start: self.text_len,
            diagnostics: Vec::new(),
        });
    }

    /// Adds a token, trivia included, to the current node.
    pub fn token(&mut self, token: GreenToken) {
        self.text_len += token.full_width();
        self.children.push(token.into());
    }

    /// Adds an already built node to the current node.
    pub fn node(&mut self, node: GreenNode) {
        self.text_len += node.full_width();
        self.children.push(node.into());
    }

    /// Attaches `diagnostic`, given in absolute positions, to the current
    /// node.
    #[track_caller]
    pub fn error(&mut self, diagnostic: Diagnostic) {
        let Some(opened) = self.opened.last_mut() else {
            panic!("no opened node to attach an error to");
        };
        let range = diagnostic.range();
        let start = range.start().max(opened.start) - opened.start;
        let range = TextRange::at(start, range.end().max(opened.start) - opened.start - start);
        opened.diagnostics.push(diagnostic.with_range(range));
    }

    /// Completes the current node and adds it to its parent.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let Some(opened) = self.opened.pop() else {
            panic!("no opened node to finish");
        };
        let children = self.children.split_off(opened.first_child);
        let children = match shape::arrange(opened.kind, children) {
            Ok(children) => children,
            Err(misfit) => {
                tracing::warn!(
                    kind = ?opened.kind,
                    unexpected = ?misfit.unexpected_kind(),
                    "children do not fit the node shape"
                );
                debug_assert!(false, "children of {:?} do not fit its shape", opened.kind);
                misfit.children
            }
        };
        let node = GreenNode::with_diagnostics(opened.kind, children, opened.diagnostics);
        self.children.push(node.into());
    }

    /// Completes the tree and returns its root.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.opened.is_empty(), "you should finish every node before `Builder::finish()`");
        match self.children.pop() {
            Some(GreenElement::Node(root)) if self.children.is_empty() => root,
            _ => panic!("a tree has exactly one root node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use sharpen_errors::ErrorCode;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenTrivia, GreenTriviaList, SyntaxNode};

    fn token(kind: SyntaxKind, text: &str, trailing: &str) -> GreenToken {
        let trailing = if trailing.is_empty() {
            GreenTriviaList::empty()
        } else {
            GreenTriviaList::new([GreenTrivia::new(WHITESPACE, trailing)])
        };
        GreenToken::new(kind, text, GreenTriviaList::empty(), trailing)
    }

    #[test]
    fn children_are_arranged() {
        let mut builder = Builder::new();
        builder.start_node(BLOCK);
        builder.token(token(OPEN_BRACE, "{", " "));
        builder.start_node(EXPRESSION_STATEMENT);
        builder.start_node(IDENTIFIER_NAME);
        builder.token(token(IDENTIFIER, "x", ""));
        builder.finish_node();
        builder.error(Diagnostic::new(ErrorCode::SemicolonExpected, TextRange::empty(3.into())));
        builder.finish_node();
        builder.token(token(CLOSE_BRACE, "}", ""));
        builder.finish_node();
        let root = SyntaxNode::new_root(builder.finish());

        expect_test::expect![[r#"
            BLOCK@0..4
              OPEN_BRACE@0..1 "{"
              trailing WHITESPACE@1..2 " "
              EXPRESSION_STATEMENT@2..3
                IDENTIFIER_NAME@2..3
                  IDENTIFIER@2..3 "x"
                SEMICOLON@3..3 "" (missing)
              CLOSE_BRACE@3..4 "}"
        "#]]
        .assert_eq(&root.debug_dump());
        assert_eq!(root.to_full_string(), "{ x}");
        let diagnostics = root.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range(), TextRange::empty(3.into()));
    }

    #[test]
    #[should_panic(expected = "you should call `Builder::finish()`")]
    fn unfinished_builder_panics() {
        let mut builder = Builder::new();
        builder.start_node(BLOCK);
    }
}
