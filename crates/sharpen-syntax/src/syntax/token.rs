use std::fmt;
use std::hash::{Hash, Hasher};

use sharpen_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use super::iter::ChildrenWithTokens;
use super::{NodeOrToken, SlotIndex, SyntaxElement, SyntaxNode, TriviaIter};
use crate::green::{self, Flags};
use crate::tree::{Location, SyntaxTree};
use crate::{GreenToken, GreenTriviaList, SyntaxKind, TokenValue};

/// Token handle: a green token plus its parent and absolute offset.
#[derive(Clone)]
pub struct SyntaxToken {
    parent: Option<SyntaxNode>,
    green: GreenToken,
    index: SlotIndex,
    /// Start of the leading trivia.
    offset: TextSize,
}

impl SyntaxToken {
    pub(crate) fn new(
        parent: Option<SyntaxNode>,
        green: GreenToken,
        index: SlotIndex,
        offset: TextSize,
    ) -> Self {
        Self { parent, green, index, offset }
    }

    /// A token that is not part of any tree.
    pub fn new_root(green: GreenToken) -> Self {
        Self::new(None, green, SlotIndex::default(), TextSize::new(0))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    #[inline]
    pub fn value(&self) -> Option<&TokenValue> {
        self.green.value()
    }

    /// Identifier name without `@`, or the decoded literal text.
    #[inline]
    pub fn value_text(&self) -> &str {
        self.green.value_text()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    #[inline]
    pub fn parent(&self) -> Option<&SyntaxNode> {
        self.parent.as_ref()
    }

    #[inline]
    pub(crate) fn index(&self) -> SlotIndex {
        self.index
    }

    /// Ancestors starting from the parent, stepping out of structured trivia.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        std::iter::successors(self.parent.clone(), SyntaxNode::parent_or_trivia_owner)
    }

    pub fn is_part_of_structured_trivia(&self) -> bool {
        self.parent.as_ref().is_some_and(SyntaxNode::is_part_of_structured_trivia)
    }

    pub fn syntax_tree(&self) -> Option<SyntaxTree> {
        self.parent.as_ref()?.syntax_tree()
    }

    pub fn location(&self) -> Location {
        Location::of(self.syntax_tree(), self.span())
    }

    /// Start of the leading trivia.
    #[inline]
    pub fn position(&self) -> TextSize {
        self.offset
    }

    #[inline]
    pub fn end_position(&self) -> TextSize {
        self.offset + self.full_width()
    }

    #[inline]
    pub fn width(&self) -> TextSize {
        self.green.width()
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.green.full_width()
    }

    #[inline]
    pub fn span_start(&self) -> TextSize {
        self.offset + self.green.leading().width()
    }

    #[inline]
    pub fn span(&self) -> TextRange {
        TextRange::at(self.span_start(), self.width())
    }

    #[inline]
    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.offset, self.full_width())
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn leading_trivia(&self) -> TriviaIter {
        TriviaIter::new(self.clone(), self.green.leading().clone(), 0, self.offset)
    }

    pub fn trailing_trivia(&self) -> TriviaIter {
        let base = self.green.leading().len();
        let offset = self.span().end();
        TriviaIter::new(self.clone(), self.green.trailing().clone(), base, offset)
    }

    /// Leading followed by trailing trivia, as one indexable sequence.
    pub fn all_trivia(&self) -> TriviaIter {
        let all = self.green.leading().concat(self.green.trailing());
        let split = self.green.leading().len();
        TriviaIter::with_gap(self.clone(), all, 0, self.offset, split, self.width())
    }

    #[inline]
    pub fn has_leading_trivia(&self) -> bool {
        !self.green.leading().is_empty()
    }

    #[inline]
    pub fn has_trailing_trivia(&self) -> bool {
        !self.green.trailing().is_empty()
    }

    pub fn has_structured_trivia(&self) -> bool {
        self.green.flags().contains(Flags::CONTAINS_STRUCTURED_TRIVIA)
    }

    pub fn contains_directives(&self) -> bool {
        self.green.flags().contains(Flags::CONTAINS_DIRECTIVES)
    }

    pub fn contains_diagnostics(&self) -> bool {
        self.green.flags().contains(Flags::CONTAINS_DIAGNOSTICS)
    }

    /// Diagnostics on the token and its trivia, with absolute ranges.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        green::collect_diagnostics(&NodeOrToken::Token(self.green.clone()), self.offset, &mut diagnostics);
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        diagnostics
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent.clone()?;
        ChildrenWithTokens::after(parent, self.index, self.end_position()).next()
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent.clone()?;
        ChildrenWithTokens::before(parent, self.index, self.offset).next_back()
    }

    /// Returns a detached copy with `trivia` as its leading trivia.
    #[must_use]
    pub fn with_leading_trivia(&self, trivia: GreenTriviaList) -> SyntaxToken {
        SyntaxToken::new_root(self.green.with_leading(trivia))
    }

    /// Returns a detached copy with `trivia` as its trailing trivia.
    #[must_use]
    pub fn with_trailing_trivia(&self, trivia: GreenTriviaList) -> SyntaxToken {
        SyntaxToken::new_root(self.green.with_trailing(trivia))
    }

    pub fn to_full_string(&self) -> String {
        self.green.to_full_string()
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
            && self.index == other.index
            && self.green.ptr_eq(&other.green)
            && self.parent == other.parent
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.green.addr().hash(state);
        self.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.span(), self.text())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
