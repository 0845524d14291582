//! Immutable, position-independent tree storage.
//!
//! Green elements know their kind, text and width but not where they live;
//! identical subtrees are shared between trees by reference counting.

use std::fmt;
use std::ops::BitOr;

use sharpen_errors::Diagnostic;
use text_size::{TextRange, TextSize};
use triomphe::{Arc, ThinArc};

use crate::{NodeOrToken, SyntaxKind, TokenValue};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Summary bits propagated from children to parents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Flags(u8);

impl Flags {
    pub(crate) const NONE: Self = Self(0);
    pub(crate) const CONTAINS_DIAGNOSTICS: Self = Self(1);
    pub(crate) const CONTAINS_DIRECTIVES: Self = Self(1 << 1);
    pub(crate) const CONTAINS_STRUCTURED_TRIVIA: Self = Self(1 << 2);
    pub(crate) const CONTAINS_SKIPPED_TEXT: Self = Self(1 << 3);

    #[inline]
    pub(crate) const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    const fn when(self, condition: bool) -> Self {
        if condition { self } else { Self::NONE }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    full_width: TextSize,
    flags: Flags,
    children: Box<[GreenElement]>,
    diagnostics: Box<[Diagnostic]>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        Self::with_diagnostics(kind, children, Vec::new())
    }

    /// Creates a node carrying `diagnostics`, whose ranges are relative to
    /// the node's full start.
    pub fn with_diagnostics(
        kind: SyntaxKind,
        children: impl IntoIterator<Item = GreenElement>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let full_width = children.iter().map(GreenElement::full_width).sum();
        let flags = children.iter().fold(
            Flags::CONTAINS_DIAGNOSTICS.when(!diagnostics.is_empty()),
            |flags, child| flags | child.flags(),
        );
        Self(Arc::new(GreenNodeData {
            kind,
            full_width,
            flags,
            children,
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.0.full_width
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    #[inline]
    pub(crate) fn flags(&self) -> Flags {
        self.0.flags
    }

    /// Returns `true` when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        std::ptr::from_ref(&*self.0).addr()
    }

    /// Returns a copy of this node with different children.
    #[must_use]
    pub fn replace_children(&self, children: impl IntoIterator<Item = GreenElement>) -> Self {
        Self::with_diagnostics(self.kind(), children, self.0.diagnostics.to_vec())
    }

    /// First token in document order, zero-width tokens included.
    pub fn first_token(&self) -> Option<&GreenToken> {
        self.children().iter().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Last token in document order, zero-width tokens included.
    pub fn last_token(&self) -> Option<&GreenToken> {
        self.children().iter().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// A node is missing when it has tokens and every one of them is missing.
    pub fn is_missing(&self) -> bool {
        self.full_width() == TextSize::new(0)
            && self.first_token().is_some()
            && self.tokens_all_missing()
    }

    fn tokens_all_missing(&self) -> bool {
        self.children().iter().all(|child| match child {
            NodeOrToken::Node(node) => node.tokens_all_missing(),
            NodeOrToken::Token(token) => token.is_missing(),
        })
    }

    pub fn leading_trivia_width(&self) -> TextSize {
        self.first_token().map_or(TextSize::new(0), |token| token.leading().width())
    }

    pub fn trailing_trivia_width(&self) -> TextSize {
        self.last_token().map_or(TextSize::new(0), |token| token.trailing().width())
    }

    /// Width without the leading trivia of the first token and the trailing
    /// trivia of the last one.
    pub fn width(&self) -> TextSize {
        let trivia = self.leading_trivia_width() + self.trailing_trivia_width();
        self.full_width().checked_sub(trivia).unwrap_or_default()
    }

    pub fn write_to(&self, buf: &mut String, leading: bool, trailing: bool) {
        let children = self.children();
        let last = children.len().saturating_sub(1);
        // Only the outermost terminals lose their trivia, so track which
        // child actually holds the first and last token.
        let first_index = children.iter().position(GreenElement::has_tokens);
        let last_index = children.iter().rposition(GreenElement::has_tokens).unwrap_or(last);
        for (index, child) in children.iter().enumerate() {
            let leading = leading || Some(index) != first_index;
            let trailing = trailing || index != last_index;
            child.write_to(buf, leading, trailing);
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut buf = String::with_capacity(self.full_width().into());
        self.write_to(&mut buf, true, true);
        buf
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("full_width", &self.full_width())
            .field("children", &self.children().len())
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(Clone, PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    value: Option<TokenValue>,
    value_text: Option<Box<str>>,
    leading: GreenTriviaList,
    trailing: GreenTriviaList,
    is_missing: bool,
    flags: Flags,
    diagnostics: Box<[Diagnostic]>,
}

impl GreenTokenData {
    fn compute_flags(&mut self) {
        self.flags = Flags::CONTAINS_DIAGNOSTICS.when(!self.diagnostics.is_empty())
            | self.leading.flags()
            | self.trailing.flags();
    }
}

impl GreenToken {
    pub fn new(
        kind: SyntaxKind,
        text: &str,
        leading: GreenTriviaList,
        trailing: GreenTriviaList,
    ) -> Self {
        let mut data = GreenTokenData {
            kind,
            text: text.into(),
            value: None,
            value_text: None,
            leading,
            trailing,
            is_missing: false,
            flags: Flags::NONE,
            diagnostics: Box::default(),
        };
        data.compute_flags();
        Self(Arc::new(data))
    }

    /// A zero-width placeholder for an expected token.
    pub fn missing(kind: SyntaxKind) -> Self {
        let mut token = Self::new(kind, "", GreenTriviaList::empty(), GreenTriviaList::empty());
        Arc::make_mut(&mut token.0).is_missing = true;
        token
    }

    fn map(&self, f: impl FnOnce(&mut GreenTokenData)) -> Self {
        let mut data = GreenTokenData::clone(&self.0);
        f(&mut data);
        data.compute_flags();
        Self(Arc::new(data))
    }

    /// Re-kinds the token, e.g. an identifier used as a contextual keyword.
    #[must_use]
    pub fn with_kind(&self, kind: SyntaxKind) -> Self {
        self.map(|data| data.kind = kind)
    }

    #[must_use]
    pub fn with_value(&self, value: Option<TokenValue>, value_text: Option<&str>) -> Self {
        self.map(|data| {
            data.value = value;
            data.value_text = value_text.map(Into::into);
        })
    }

    #[must_use]
    pub fn with_leading(&self, leading: GreenTriviaList) -> Self {
        self.map(|data| data.leading = leading)
    }

    #[must_use]
    pub fn with_trailing(&self, trailing: GreenTriviaList) -> Self {
        self.map(|data| data.trailing = trailing)
    }

    /// Replaces the diagnostics; ranges are relative to the token's full start.
    #[must_use]
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> Self {
        self.map(|data| data.diagnostics = diagnostics.into_boxed_slice())
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[inline]
    pub fn value(&self) -> Option<&TokenValue> {
        self.0.value.as_ref()
    }

    /// Decoded text: the identifier without `@`, or the literal's value.
    #[inline]
    pub fn value_text(&self) -> &str {
        self.0.value_text.as_deref().unwrap_or(self.text())
    }

    #[inline]
    pub fn leading(&self) -> &GreenTriviaList {
        &self.0.leading
    }

    #[inline]
    pub fn trailing(&self) -> &GreenTriviaList {
        &self.0.trailing
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.0.is_missing
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    #[inline]
    pub(crate) fn flags(&self) -> Flags {
        self.0.flags
    }

    #[inline]
    pub fn width(&self) -> TextSize {
        TextSize::of(self.text())
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.leading().width() + self.width() + self.trailing().width()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        std::ptr::from_ref(&*self.0).addr()
    }

    pub fn write_to(&self, buf: &mut String, leading: bool, trailing: bool) {
        if leading {
            self.leading().write_to(buf);
        }
        buf.push_str(self.text());
        if trailing {
            self.trailing().write_to(buf);
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut buf = String::with_capacity(self.full_width().into());
        self.write_to(&mut buf, true, true);
        buf
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("is_missing", &self.is_missing())
            .finish()
    }
}

/// A single trivia piece: plain text, or a whole structured subtree.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenTrivia(Arc<GreenTriviaData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenTriviaData {
    kind: SyntaxKind,
    repr: TriviaRepr,
    diagnostics: Box<[Diagnostic]>,
}

#[derive(PartialEq, Eq, Hash)]
enum TriviaRepr {
    Text(Box<str>),
    Structured(GreenNode),
}

impl GreenTrivia {
    pub fn new(kind: SyntaxKind, text: &str) -> Self {
        Self::with_diagnostics(kind, text, Vec::new())
    }

    pub fn with_diagnostics(kind: SyntaxKind, text: &str, diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(kind.is_trivia() && !kind.is_structured_trivia(), "{kind:?}");
        Self(Arc::new(GreenTriviaData {
            kind,
            repr: TriviaRepr::Text(text.into()),
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    /// Wraps a directive, documentation comment or skipped-token node.
    pub fn structured(node: GreenNode) -> Self {
        debug_assert!(node.kind().is_structured_trivia(), "{:?}", node.kind());
        Self(Arc::new(GreenTriviaData {
            kind: node.kind(),
            repr: TriviaRepr::Structured(node),
            diagnostics: Box::default(),
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Text of a simple trivia piece; `None` for structured trivia.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match &self.0.repr {
            TriviaRepr::Text(text) => Some(text),
            TriviaRepr::Structured(_) => None,
        }
    }

    #[inline]
    pub fn structure(&self) -> Option<&GreenNode> {
        match &self.0.repr {
            TriviaRepr::Text(_) => None,
            TriviaRepr::Structured(node) => Some(node),
        }
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    pub fn width(&self) -> TextSize {
        match &self.0.repr {
            TriviaRepr::Text(text) => TextSize::of(&**text),
            TriviaRepr::Structured(node) => node.full_width(),
        }
    }

    pub(crate) fn flags(&self) -> Flags {
        let own = Flags::CONTAINS_DIAGNOSTICS.when(!self.diagnostics().is_empty())
            | Flags::CONTAINS_DIRECTIVES.when(self.kind().is_directive())
            | Flags::CONTAINS_SKIPPED_TEXT.when(self.kind() == SyntaxKind::SKIPPED_TOKENS_TRIVIA);
        match self.structure() {
            Some(node) => own | Flags::CONTAINS_STRUCTURED_TRIVIA | node.flags(),
            None => own,
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn write_to(&self, buf: &mut String) {
        match &self.0.repr {
            TriviaRepr::Text(text) => buf.push_str(text),
            TriviaRepr::Structured(node) => node.write_to(buf, true, true),
        }
    }

    pub fn to_full_string(&self) -> String {
        let mut buf = String::new();
        self.write_to(&mut buf);
        buf
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("kind", &self.kind())
            .field("text", &self.to_full_string())
            .finish()
    }
}

/// The leading or trailing trivia of a token.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTriviaList {
    ptr: Option<ThinArc<TextSize, GreenTrivia>>,
}

impl fmt::Debug for GreenTriviaList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTriviaList")
            .field("pieces", &self.pieces())
            .field("width", &self.width())
            .finish()
    }
}

impl Default for GreenTriviaList {
    fn default() -> Self {
        Self::empty()
    }
}

impl GreenTriviaList {
    pub fn new(pieces: impl IntoIterator<Item = GreenTrivia>) -> Self {
        let pieces: Vec<GreenTrivia> = pieces.into_iter().collect();
        if pieces.is_empty() {
            return Self::empty();
        }
        let width = pieces.iter().map(GreenTrivia::width).sum();
        Self { ptr: Some(ThinArc::from_header_and_iter(width, pieces.into_iter())) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn width(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn pieces(&self) -> &[GreenTrivia] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub(crate) fn flags(&self) -> Flags {
        self.pieces().iter().fold(Flags::NONE, |flags, piece| flags | piece.flags())
    }

    pub fn write_to(&self, buf: &mut String) {
        for piece in self.pieces() {
            piece.write_to(buf);
        }
    }

    /// Concatenation of two lists.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => other.clone(),
            (_, true) => self.clone(),
            _ => Self::new(self.pieces().iter().chain(other.pieces()).cloned()),
        }
    }
}

impl FromIterator<GreenTrivia> for GreenTriviaList {
    fn from_iter<I: IntoIterator<Item = GreenTrivia>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.full_width(),
            NodeOrToken::Token(token) => token.full_width(),
        }
    }

    #[inline]
    pub(crate) fn flags(&self) -> Flags {
        match self {
            NodeOrToken::Node(node) => node.flags(),
            NodeOrToken::Token(token) => token.flags(),
        }
    }

    fn has_tokens(&self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.first_token().is_some(),
            NodeOrToken::Token(_) => true,
        }
    }

    pub fn write_to(&self, buf: &mut String, leading: bool, trailing: bool) {
        match self {
            NodeOrToken::Node(node) => node.write_to(buf, leading, trailing),
            NodeOrToken::Token(token) => token.write_to(buf, leading, trailing),
        }
    }

    /// Diagnostics attached to this element, shifted by `offset`.
    pub(crate) fn own_diagnostics(&self, offset: TextSize) -> impl Iterator<Item = Diagnostic> {
        let diagnostics = match self {
            NodeOrToken::Node(node) => node.diagnostics(),
            NodeOrToken::Token(token) => token.diagnostics(),
        };
        diagnostics.to_vec().into_iter().map(move |diagnostic| shift(diagnostic, offset))
    }
}

/// Appends every diagnostic under `element`, which starts at `offset`, with
/// absolute ranges.
pub(crate) fn collect_diagnostics(element: &GreenElement, offset: TextSize, out: &mut Vec<Diagnostic>) {
    if !element.flags().contains(Flags::CONTAINS_DIAGNOSTICS) {
        return;
    }
    out.extend(element.own_diagnostics(offset));
    match element {
        NodeOrToken::Node(node) => {
            let mut offset = offset;
            for child in node.children() {
                collect_diagnostics(child, offset, out);
                offset += child.full_width();
            }
        }
        NodeOrToken::Token(token) => {
            collect_trivia_diagnostics(token.leading(), offset, out);
            let trailing = offset + token.leading().width() + token.width();
            collect_trivia_diagnostics(token.trailing(), trailing, out);
        }
    }
}

pub(crate) fn collect_trivia_diagnostics(
    list: &GreenTriviaList,
    mut offset: TextSize,
    out: &mut Vec<Diagnostic>,
) {
    if !list.flags().contains(Flags::CONTAINS_DIAGNOSTICS) {
        return;
    }
    for piece in list.pieces() {
        out.extend(piece.diagnostics().iter().cloned().map(|diagnostic| shift(diagnostic, offset)));
        if let Some(node) = piece.structure() {
            collect_diagnostics(&NodeOrToken::Node(node.clone()), offset, out);
        }
        offset += piece.width();
    }
}

pub(crate) fn shift(diagnostic: Diagnostic, offset: TextSize) -> Diagnostic {
    let range = diagnostic.range();
    diagnostic.with_range(TextRange::at(range.start() + offset, range.len()))
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    fn whitespace(text: &str) -> GreenTriviaList {
        GreenTriviaList::new([GreenTrivia::new(WHITESPACE, text)])
    }

    #[test]
    fn token_widths() {
        let token = GreenToken::new(INT_KW, "int", whitespace("\t "), whitespace(" "));

        assert_eq!(token.width(), TextSize::new(3));
        assert_eq!(token.full_width(), TextSize::new(6));
        assert_eq!(token.to_full_string(), "\t int ");

        let mut buf = String::new();
        token.write_to(&mut buf, false, false);
        assert_eq!(buf, "int");
    }

    #[test]
    fn missing_token_is_zero_width() {
        let token = GreenToken::missing(SEMICOLON);
        assert!(token.is_missing());
        assert_eq!(token.width(), TextSize::new(0));
        assert_eq!(token.text(), "");
    }

    #[test]
    fn node_span_excludes_outer_trivia() {
        let a = GreenToken::new(IDENTIFIER, "a", whitespace("  "), whitespace(" "));
        let plus = GreenToken::new(PLUS, "+", GreenTriviaList::empty(), whitespace(" "));
        let b = GreenToken::new(IDENTIFIER, "b", GreenTriviaList::empty(), whitespace("\t"));
        let name = |token: GreenToken| GreenNode::new(IDENTIFIER_NAME, [token.into()]);
        let add =
            GreenNode::new(ADD_EXPRESSION, [name(a).into(), plus.into(), name(b).into()]);

        assert_eq!(add.full_width(), TextSize::new(9));
        assert_eq!(add.width(), TextSize::new(5));
        assert_eq!(add.to_full_string(), "  a + b\t");

        let mut buf = String::new();
        add.write_to(&mut buf, false, false);
        assert_eq!(buf, "a + b");
    }

    #[test]
    fn flags_propagate_from_structured_trivia() {
        let hash = GreenToken::new(HASH, "#", GreenTriviaList::empty(), GreenTriviaList::empty());
        let region =
            GreenToken::new(REGION_KW, "region", GreenTriviaList::empty(), GreenTriviaList::empty());
        let end = GreenToken::new(
            END_OF_DIRECTIVE,
            "",
            GreenTriviaList::empty(),
            GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]),
        );
        let directive =
            GreenNode::new(REGION_DIRECTIVE_TRIVIA, [hash.into(), region.into(), end.into()]);
        let trivia = GreenTriviaList::new([GreenTrivia::structured(directive)]);
        let token = GreenToken::new(CLASS_KW, "class", trivia, GreenTriviaList::empty());
        let node = GreenNode::new(CLASS_DECLARATION, [token.into()]);

        assert!(node.flags().contains(Flags::CONTAINS_DIRECTIVES));
        assert!(node.flags().contains(Flags::CONTAINS_STRUCTURED_TRIVIA));
        assert!(!node.flags().contains(Flags::CONTAINS_DIAGNOSTICS));
        assert_eq!(node.to_full_string(), "#region\nclass");
    }
}
