use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use sharpen_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use super::{SyntaxNode, SyntaxToken};
use crate::green;
use crate::tree::Location;
use crate::{GreenTrivia, GreenTriviaList, SyntaxKind};

/// A trivia piece positioned inside its owning token.
#[derive(Clone)]
pub struct SyntaxTrivia {
    token: Option<SyntaxToken>,
    green: GreenTrivia,
    /// Position in the token's leading trivia followed by its trailing trivia.
    index: u32,
    offset: TextSize,
}

impl SyntaxTrivia {
    pub(crate) fn new(token: SyntaxToken, green: GreenTrivia, index: usize, offset: TextSize) -> Self {
        Self { token: Some(token), green, index: index as u32, offset }
    }

    /// Trivia that is not attached to any token.
    pub fn new_root(green: GreenTrivia) -> Self {
        Self { token: None, green, index: 0, offset: TextSize::new(0) }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenTrivia {
        &self.green
    }

    /// The owning token; `None` for detached trivia.
    #[inline]
    pub fn token(&self) -> Option<&SyntaxToken> {
        self.token.as_ref()
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }

    /// Whether this piece sits before the owning token's text.
    pub fn is_leading(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| self.index() < token.green().leading().len())
    }

    #[inline]
    pub fn position(&self) -> TextSize {
        self.offset
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.green.width()
    }

    #[inline]
    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.offset, self.full_width())
    }

    /// Trivia has no trivia of its own, so this equals the full span.
    #[inline]
    pub fn span(&self) -> TextRange {
        self.full_span()
    }

    #[inline]
    pub fn is_directive(&self) -> bool {
        self.kind().is_directive()
    }

    #[inline]
    pub fn has_structure(&self) -> bool {
        self.green.structure().is_some()
    }

    /// Root of the structured subtree; its `parent_trivia` points back here.
    pub fn structure(&self) -> Option<SyntaxNode> {
        let node = self.green.structure()?;
        Some(SyntaxNode::new_structure(node.clone(), self.clone()))
    }

    pub fn is_part_of_structured_trivia(&self) -> bool {
        self.token.as_ref().is_some_and(SyntaxToken::is_part_of_structured_trivia)
    }

    pub fn location(&self) -> Location {
        let tree = self.token.as_ref().and_then(SyntaxToken::syntax_tree);
        Location::of(tree, self.span())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let single = GreenTriviaList::new([self.green.clone()]);
        green::collect_trivia_diagnostics(&single, self.offset, &mut diagnostics);
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        diagnostics
    }

    pub fn to_full_string(&self) -> String {
        self.green.to_full_string()
    }
}

impl PartialEq for SyntaxTrivia {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.offset == other.offset
            && self.green.ptr_eq(&other.green)
            && self.token == other.token
    }
}

impl Eq for SyntaxTrivia {}

impl Hash for SyntaxTrivia {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_span())
    }
}

impl fmt::Display for SyntaxTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.green.write_to(&mut buf);
        f.write_str(&buf)
    }
}

/// Double-ended iterator over one of a token's trivia lists.
#[derive(Clone)]
pub struct TriviaIter {
    token: SyntaxToken,
    list: GreenTriviaList,
    base: usize,
    start: TextSize,
    /// Pieces from `split` on start after a gap of `gap`: the token text
    /// when leading and trailing trivia are walked together.
    split: usize,
    gap: TextSize,
    front: usize,
    back: usize,
    front_offset: TextSize,
    back_offset: TextSize,
}

impl TriviaIter {
    pub(crate) fn new(token: SyntaxToken, list: GreenTriviaList, base: usize, offset: TextSize) -> Self {
        let split = list.len();
        Self::with_gap(token, list, base, offset, split, TextSize::new(0))
    }

    pub(crate) fn with_gap(
        token: SyntaxToken,
        list: GreenTriviaList,
        base: usize,
        offset: TextSize,
        split: usize,
        gap: TextSize,
    ) -> Self {
        let back = list.len();
        let gap = if split < back { gap } else { TextSize::new(0) };
        let front_offset = if split == 0 { offset + gap } else { offset };
        let back_offset = offset + list.width() + gap;
        Self { token, list, base, start: offset, split, gap, front: 0, back, front_offset, back_offset }
    }

    /// The piece at `index` within this list, independent of iteration state.
    pub fn get(&self, index: usize) -> Option<SyntaxTrivia> {
        let pieces = self.list.pieces();
        let green = pieces.get(index)?;
        let gap = if index >= self.split { self.gap } else { TextSize::new(0) };
        let offset =
            self.start + gap + pieces[..index].iter().map(GreenTrivia::width).sum::<TextSize>();
        Some(SyntaxTrivia::new(self.token.clone(), green.clone(), self.base + index, offset))
    }

    /// Total width of the whole list.
    pub fn full_width(&self) -> TextSize {
        self.list.width()
    }

    pub fn span(&self) -> TextRange {
        TextRange::at(self.start, self.list.width() + self.gap)
    }

    pub fn to_full_string(&self) -> String {
        let mut buf = String::with_capacity(self.list.width().into());
        self.list.write_to(&mut buf);
        buf
    }
}

impl Iterator for TriviaIter {
    type Item = SyntaxTrivia;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let green = self.list.pieces()[self.front].clone();
        let trivia =
            SyntaxTrivia::new(self.token.clone(), green, self.base + self.front, self.front_offset);
        self.front_offset += trivia.full_width();
        self.front += 1;
        if self.front == self.split {
            self.front_offset += self.gap;
        }
        Some(trivia)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for TriviaIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let green = self.list.pieces()[self.back].clone();
        self.back_offset -= green.width();
        let trivia =
            SyntaxTrivia::new(self.token.clone(), green, self.base + self.back, self.back_offset);
        if self.back == self.split {
            self.back_offset -= self.gap;
        }
        Some(trivia)
    }
}

impl ExactSizeIterator for TriviaIter {}

impl FusedIterator for TriviaIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenToken;
    use crate::SyntaxKind::*;

    fn token() -> SyntaxToken {
        let space = || GreenTrivia::new(WHITESPACE, " ");
        let leading = GreenTriviaList::new([space(), GreenTrivia::new(SINGLE_LINE_COMMENT, "// c"), space()]);
        let trailing = GreenTriviaList::new([space(), GreenTrivia::new(END_OF_LINE, "\n")]);
        SyntaxToken::new_root(GreenToken::new(IDENTIFIER, "x", leading, trailing))
    }

    #[test]
    fn offsets_and_indices() {
        let token = token();
        let leading = token.leading_trivia().collect::<Vec<_>>();
        let spans = leading.iter().map(SyntaxTrivia::full_span).collect::<Vec<_>>();
        assert_eq!(
            spans,
            [
                TextRange::new(0.into(), 1.into()),
                TextRange::new(1.into(), 5.into()),
                TextRange::new(5.into(), 6.into()),
            ]
        );

        let trailing = token.trailing_trivia().rev().collect::<Vec<_>>();
        assert_eq!(trailing[0].kind(), END_OF_LINE);
        assert_eq!(trailing[0].full_span(), TextRange::new(8.into(), 9.into()));
        assert_eq!(trailing[0].index(), 4);
        assert!(!trailing[0].is_leading());
        assert!(leading[2].is_leading());
    }

    #[test]
    fn identical_pieces_are_distinct() {
        let token = token();
        let all = token.all_trivia().collect::<Vec<_>>();
        assert_eq!(all.len(), 5);
        assert_ne!(all[0], all[2]);
        assert_eq!(all[0], token.leading_trivia().next().unwrap());
        assert_eq!(token.all_trivia().get(3), token.trailing_trivia().next());
        assert_eq!(all[1].to_string(), "// c");
        assert_eq!(all[3].full_span(), TextRange::new(7.into(), 8.into()));
        assert_eq!(token.all_trivia().next_back().unwrap().full_span(), TextRange::new(8.into(), 9.into()));
    }
}
