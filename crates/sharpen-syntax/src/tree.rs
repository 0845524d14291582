use std::fmt;
use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use line_index::{LineCol, LineIndex};
use sharpen_errors::Diagnostic;
use text_size::TextRange;
use triomphe::Arc;

use crate::{Encoding, GreenNode, ParseOptions, SourceHashAlgorithm, SyntaxNode};

/// Metadata shared by every node of one parsed tree.
pub(crate) struct TreeInfo {
    path: Utf8PathBuf,
    options: ParseOptions,
    encoding: Option<Encoding>,
    checksum_algorithm: SourceHashAlgorithm,
    line_index: OnceLock<LineIndex>,
}

impl TreeInfo {
    fn with(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut info = Self {
            path: self.path.clone(),
            options: self.options.clone(),
            encoding: self.encoding,
            checksum_algorithm: self.checksum_algorithm,
            line_index: OnceLock::new(),
        };
        f(&mut info);
        info
    }

    fn same_source(&self, other: &Self) -> bool {
        self.path == other.path
            && self.options == other.options
            && self.encoding == other.encoding
            && self.checksum_algorithm == other.checksum_algorithm
    }
}

/// A parsed compilation unit together with its source metadata.
///
/// Cloning is cheap; the tree is an immutable view over shared green nodes.
#[derive(Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

// SAFETY: the old value is kept only when both the green tree and the
// metadata are unchanged; otherwise it is overwritten in place.
#[allow(unsafe_code)]
unsafe impl salsa::Update for SyntaxTree {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if old_value.root.green() == new_value.root.green()
            && old_value.info().same_source(new_value.info())
        {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

impl SyntaxTree {
    pub fn new(root: GreenNode, options: ParseOptions) -> Self {
        let info = TreeInfo {
            path: Utf8PathBuf::new(),
            options,
            encoding: None,
            checksum_algorithm: SourceHashAlgorithm::default(),
            line_index: OnceLock::new(),
        };
        Self { root: SyntaxNode::new_tree_root(root, Arc::new(info)) }
    }

    /// Wraps a node that was created as a tree root.
    pub(crate) fn from_root(root: SyntaxNode) -> Self {
        debug_assert!(root.tree_info().is_some());
        Self { root }
    }

    fn info(&self) -> &TreeInfo {
        match self.root.tree_info() {
            Some(info) => info,
            None => unreachable!("tree roots always carry their metadata"),
        }
    }

    fn map_info(&self, f: impl FnOnce(&mut TreeInfo)) -> Self {
        let info = self.info().with(f);
        Self { root: SyntaxNode::new_tree_root(self.root.green().clone(), Arc::new(info)) }
    }

    #[must_use]
    pub fn with_path(&self, path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        self.map_info(|info| info.path = path)
    }

    #[must_use]
    pub fn with_encoding(&self, encoding: Option<Encoding>) -> Self {
        self.map_info(|info| info.encoding = encoding)
    }

    #[must_use]
    pub fn with_checksum_algorithm(&self, algorithm: SourceHashAlgorithm) -> Self {
        self.map_info(|info| info.checksum_algorithm = algorithm)
    }

    /// A tree with the same metadata over a different root.
    #[must_use]
    pub fn with_root(&self, root: GreenNode) -> Self {
        let info = self.info().with(|_| {});
        Self { root: SyntaxNode::new_tree_root(root, Arc::new(info)) }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn path(&self) -> &Utf8Path {
        &self.info().path
    }

    pub fn options(&self) -> &ParseOptions {
        &self.info().options
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.info().encoding
    }

    pub fn checksum_algorithm(&self) -> SourceHashAlgorithm {
        self.info().checksum_algorithm
    }

    /// The full source text, byte for byte.
    pub fn text(&self) -> String {
        self.root.to_full_string()
    }

    pub fn checksum(&self) -> Vec<u8> {
        let encoding = self.encoding().unwrap_or_default();
        self.checksum_algorithm().checksum(encoding, &self.text())
    }

    /// Every diagnostic in the tree, ordered by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.root.diagnostics()
    }

    pub fn line_index(&self) -> &LineIndex {
        self.info().line_index.get_or_init(|| LineIndex::new(&self.text()))
    }

    /// Zero-based line and column of both ends of `span`.
    pub fn line_span(&self, span: TextRange) -> LineSpan {
        let index = self.line_index();
        LineSpan {
            path: self.path().to_owned(),
            start: index.line_col(span.start()),
            end: index.line_col(span.end()),
        }
    }

    pub fn location(&self, span: TextRange) -> Location {
        Location::Source { tree: self.clone(), span }
    }
}

impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl Eq for SyntaxTree {}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("path", &self.path()).field("root", &self.root).finish()
    }
}

/// Path plus zero-based start and end positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSpan {
    pub path: Utf8PathBuf,
    pub start: LineCol,
    pub end: LineCol,
}

/// Where an element came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// Detached or synthesized elements have no source position.
    None,
    Source { tree: SyntaxTree, span: TextRange },
}

impl Location {
    pub(crate) fn of(tree: Option<SyntaxTree>, span: TextRange) -> Self {
        match tree {
            Some(tree) => Self::Source { tree, span },
            None => Self::None,
        }
    }

    pub fn is_in_source(&self) -> bool {
        matches!(self, Self::Source { .. })
    }

    pub fn source_span(&self) -> Option<TextRange> {
        match self {
            Self::None => None,
            Self::Source { span, .. } => Some(*span),
        }
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        match self {
            Self::None => None,
            Self::Source { tree, .. } => Some(tree),
        }
    }

    pub fn line_span(&self) -> Option<LineSpan> {
        match self {
            Self::None => None,
            Self::Source { tree, span } => Some(tree.line_span(*span)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenToken, GreenTrivia, GreenTriviaList};

    fn tree() -> SyntaxTree {
        let eol = GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]);
        let x = GreenToken::new(IDENTIFIER, "x", GreenTriviaList::empty(), GreenTriviaList::empty());
        let semicolon = GreenToken::new(SEMICOLON, ";", GreenTriviaList::empty(), eol);
        let name = GreenNode::new(IDENTIFIER_NAME, [x.into()]);
        let statement = GreenNode::new(EXPRESSION_STATEMENT, [name.into(), semicolon.into()]);
        let y = GreenToken::new(IDENTIFIER, "y", GreenTriviaList::empty(), GreenTriviaList::empty());
        let members = GreenNode::new(LIST, [statement.into()]);
        let eof = GreenToken::new(END_OF_FILE, "", GreenTriviaList::empty(), GreenTriviaList::empty());
        let root = GreenNode::new(
            COMPILATION_UNIT,
            [members.into(), GreenNode::new(IDENTIFIER_NAME, [y.into()]).into(), eof.into()],
        );
        SyntaxTree::new(root, ParseOptions::default()).with_path("a.cs")
    }

    #[test]
    fn nodes_know_their_tree() {
        let tree = tree();
        let y = tree.root().descendant_tokens().find(|token| token.text() == "y").unwrap();
        assert_eq!(y.syntax_tree(), Some(tree.clone()));

        let Location::Source { span, .. } = y.location() else { panic!("expected a source location") };
        assert_eq!(span, TextRange::new(3.into(), 4.into()));
        let line_span = y.location().line_span().unwrap();
        assert_eq!(line_span.path, "a.cs");
        assert_eq!((line_span.start.line, line_span.start.col), (1, 0));

        let detached = SyntaxNode::new_root(tree.root().green().clone());
        assert_eq!(detached.location(), Location::None);
        assert_eq!(tree.text(), "x;\ny");
    }

    #[test]
    fn metadata_round_trips() {
        let tree = tree().with_encoding(Some(Encoding::Utf8Bom));
        assert_eq!(tree.encoding(), Some(Encoding::Utf8Bom));
        assert_eq!(tree.checksum_algorithm(), SourceHashAlgorithm::Sha256);
        assert_eq!(tree.checksum().len(), 32);
        assert_eq!(tree.with_checksum_algorithm(SourceHashAlgorithm::Sha512).checksum().len(), 64);
        assert!(tree.diagnostics().is_empty());
        assert_ne!(tree, tree.with_path("b.cs"));
    }

    #[test]
    #[allow(unsafe_code)]
    fn update_replaces_trees_with_new_metadata() {
        let mut old = tree();
        let same = old.with_root(old.root().green().clone());
        assert!(!unsafe { salsa::Update::maybe_update(&raw mut old, same) });
        assert_eq!(old.path(), "a.cs");

        for new in [
            old.with_path("b.cs"),
            old.with_encoding(Some(Encoding::Utf16Le)),
            old.with_checksum_algorithm(SourceHashAlgorithm::Sha512),
        ] {
            let mut current = old.clone();
            assert!(unsafe { salsa::Update::maybe_update(&raw mut current, new.clone()) });
            assert_eq!(current.path(), new.path());
            assert_eq!(current.encoding(), new.encoding());
            assert_eq!(current.checksum_algorithm(), new.checksum_algorithm());
        }
    }
}
