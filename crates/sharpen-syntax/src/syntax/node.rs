use std::fmt;
use std::hash::{Hash, Hasher};

use sharpen_errors::Diagnostic;
use text_size::{TextRange, TextSize};
use triomphe::Arc;

use super::iter::{Children, ChildrenWithTokens};
use super::{NodeOrToken, SyntaxElement, SyntaxToken, SyntaxTrivia};
use crate::green::{self, Flags};
use crate::tree::{Location, SyntaxTree, TreeInfo};
use crate::{GreenNode, SyntaxKind};

/// Where an element sits among its parent's green slots. `item` indexes into
/// a list slot and is zero for ordinary slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SlotIndex {
    pub(crate) slot: u32,
    pub(crate) item: u32,
}

impl SlotIndex {
    pub(crate) fn new(slot: usize, item: usize) -> Self {
        Self { slot: slot as u32, item: item as u32 }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.slot as usize
    }

    #[inline]
    pub(crate) fn item(self) -> usize {
        self.item as usize
    }
}

/// Node handle carrying its absolute offset and a link to its parent.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    /// Set on the root of a structured trivia subtree that was reached
    /// through its trivia.
    parent_trivia: Option<SyntaxTrivia>,
    index: SlotIndex,
    offset: TextSize,
    tree: Option<Arc<TreeInfo>>,
}

impl SyntaxNode {
    /// Creates a detached root: no parent, no owning tree.
    pub fn new_root(green: GreenNode) -> Self {
        Self::root_with(green, None, None, TextSize::new(0))
    }

    pub(crate) fn new_tree_root(green: GreenNode, info: Arc<TreeInfo>) -> Self {
        Self::root_with(green, None, Some(info), TextSize::new(0))
    }

    pub(crate) fn new_structure(green: GreenNode, trivia: SyntaxTrivia) -> Self {
        let offset = trivia.full_span().start();
        Self::root_with(green, Some(trivia), None, offset)
    }

    fn root_with(
        green: GreenNode,
        parent_trivia: Option<SyntaxTrivia>,
        tree: Option<Arc<TreeInfo>>,
        offset: TextSize,
    ) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: None,
            parent_trivia,
            index: SlotIndex::default(),
            offset,
            tree,
        }))
    }

    pub(crate) fn new_child(
        parent: &SyntaxNode,
        green: GreenNode,
        index: SlotIndex,
        offset: TextSize,
    ) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: Some(parent.clone()),
            parent_trivia: None,
            index,
            offset,
            tree: None,
        }))
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub(crate) fn index(&self) -> SlotIndex {
        self.0.index
    }

    pub(crate) fn tree_info(&self) -> Option<&Arc<TreeInfo>> {
        self.0.tree.as_ref()
    }

    /// Returns the parent node. Roots of structured trivia have none; use
    /// [`SyntaxNode::parent_trivia`] to get back to the owning token.
    #[inline]
    pub fn parent(&self) -> Option<SyntaxNode> {
        self.0.parent.clone()
    }

    /// The trivia this structured subtree was reached through.
    pub fn parent_trivia(&self) -> Option<&SyntaxTrivia> {
        self.0.parent_trivia.as_ref()
    }

    /// Parent node, or the parent of the token owning this structured trivia.
    pub fn parent_or_trivia_owner(&self) -> Option<SyntaxNode> {
        match &self.0.parent {
            Some(parent) => Some(parent.clone()),
            None => self.0.parent_trivia.as_ref()?.token()?.parent().cloned(),
        }
    }

    /// Ancestors starting from the parent, stepping out of structured trivia.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        std::iter::successors(self.parent_or_trivia_owner(), SyntaxNode::parent_or_trivia_owner)
    }

    /// Like [`SyntaxNode::ancestors`], starting with `self`.
    pub fn ancestors_and_self(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent_or_trivia_owner)
    }

    /// Ancestors that stay inside the structured trivia containing `self`.
    pub fn ancestors_within_trivia(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        std::iter::successors(self.parent(), SyntaxNode::parent)
    }

    pub fn first_ancestor_or_self(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<Self> {
        self.ancestors_and_self().find(|node| predicate(node))
    }

    /// The topmost node reachable through parents, without leaving trivia.
    pub fn root(&self) -> SyntaxNode {
        self.ancestors_within_trivia().last().unwrap_or_else(|| self.clone())
    }

    /// The tree this node was parsed into, if it is attached to one.
    pub fn syntax_tree(&self) -> Option<SyntaxTree> {
        let outermost = self.ancestors_and_self().last()?;
        outermost.0.tree.is_some().then(|| SyntaxTree::from_root(outermost))
    }

    pub fn location(&self) -> Location {
        Location::of(self.syntax_tree(), self.span())
    }

    #[inline]
    pub fn full_width(&self) -> TextSize {
        self.0.green.full_width()
    }

    #[inline]
    pub fn width(&self) -> TextSize {
        self.0.green.width()
    }

    /// Start of the leading trivia of the first token.
    #[inline]
    pub fn position(&self) -> TextSize {
        self.0.offset
    }

    #[inline]
    pub fn end_position(&self) -> TextSize {
        self.0.offset + self.full_width()
    }

    /// Range including leading and trailing trivia.
    #[inline]
    pub fn full_span(&self) -> TextRange {
        TextRange::at(self.0.offset, self.full_width())
    }

    /// Range without the leading trivia of the first token and the trailing
    /// trivia of the last.
    pub fn span(&self) -> TextRange {
        let start = self.0.offset + self.0.green.leading_trivia_width();
        TextRange::at(start, self.width())
    }

    #[inline]
    pub fn span_start(&self) -> TextSize {
        self.span().start()
    }

    pub fn is_missing(&self) -> bool {
        self.0.green.is_missing()
    }

    pub fn is_structured_trivia(&self) -> bool {
        self.kind().is_structured_trivia()
    }

    pub fn is_part_of_structured_trivia(&self) -> bool {
        self.ancestors_and_self().any(|node| node.is_structured_trivia())
    }

    pub fn contains_diagnostics(&self) -> bool {
        self.0.green.flags().contains(Flags::CONTAINS_DIAGNOSTICS)
    }

    pub fn contains_directives(&self) -> bool {
        self.0.green.flags().contains(Flags::CONTAINS_DIRECTIVES)
    }

    pub fn has_structured_trivia(&self) -> bool {
        self.0.green.flags().contains(Flags::CONTAINS_STRUCTURED_TRIVIA)
    }

    pub fn contains_skipped_text(&self) -> bool {
        self.0.green.flags().contains(Flags::CONTAINS_SKIPPED_TEXT)
    }

    /// Every diagnostic in this subtree, ordered by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        green::collect_diagnostics(
            &NodeOrToken::Node(self.0.green.clone()),
            self.0.offset,
            &mut diagnostics,
        );
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        diagnostics
    }

    /// Iterates children including tokens, flattening lists.
    #[inline]
    pub fn children_with_tokens(&self) -> ChildrenWithTokens {
        ChildrenWithTokens::new(self.clone())
    }

    /// Iterates child nodes, skipping tokens.
    #[inline]
    pub fn children(&self) -> Children {
        Children::new(self.children_with_tokens())
    }

    /// Offset of the green slot `slot`.
    pub(crate) fn slot_offset(&self, slot: usize) -> TextSize {
        let children = self.0.green.children();
        self.0.offset + children[..slot.min(children.len())].iter().map(|it| it.full_width()).sum::<TextSize>()
    }

    /// The element in an ordinary (non-list) slot.
    pub fn slot(&self, slot: usize) -> Option<SyntaxElement> {
        let green = self.0.green.children().get(slot)?;
        if green.kind().is_list() {
            return None;
        }
        Some(SyntaxElement::new(self, green, SlotIndex::new(slot, 0), self.slot_offset(slot)))
    }

    /// Items of the list stored in `slot`; empty when the slot holds no list.
    pub fn slot_items(&self, slot: usize) -> ChildrenWithTokens {
        let is_list = self.0.green.children().get(slot).is_some_and(|it| it.kind().is_list());
        if is_list {
            ChildrenWithTokens::slot_range(self.clone(), slot, self.slot_offset(slot))
        } else {
            ChildrenWithTokens::empty(self.clone())
        }
    }

    /// Whether the green slot at `index` holds a list.
    pub(crate) fn is_list_slot(&self, slot: usize) -> bool {
        self.0.green.children().get(slot).is_some_and(|it| it.kind().is_list())
    }

    pub fn next_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent()?;
        ChildrenWithTokens::after(parent, self.index(), self.end_position()).next()
    }

    pub fn prev_sibling_or_token(&self) -> Option<SyntaxElement> {
        let parent = self.parent()?;
        ChildrenWithTokens::before(parent, self.index(), self.position()).next_back()
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode> {
        let parent = self.parent()?;
        Children::new(ChildrenWithTokens::after(parent, self.index(), self.end_position())).next()
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode> {
        let parent = self.parent()?;
        Children::new(ChildrenWithTokens::before(parent, self.index(), self.position())).next_back()
    }

    /// Leading trivia of the first token, zero-width tokens included.
    pub fn leading_trivia(&self) -> Option<super::TriviaIter> {
        Some(self.first_token_with(super::TokenFilter::DEFAULT.with_zero_width())?.leading_trivia())
    }

    /// Trailing trivia of the last token, zero-width tokens included.
    pub fn trailing_trivia(&self) -> Option<super::TriviaIter> {
        Some(self.last_token_with(super::TokenFilter::DEFAULT.with_zero_width())?.trailing_trivia())
    }

    pub fn to_full_string(&self) -> String {
        self.0.green.to_full_string()
    }

    /// Renders the subtree as an indented list of kinds, ranges and token texts.
    pub fn debug_dump(&self) -> String {
        DebugDump(self).to_string()
    }
}

struct DebugDump<'a>(&'a SyntaxNode);

impl fmt::Display for DebugDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump(self.0, 0, f)
    }
}

fn dump(node: &SyntaxNode, depth: usize, out: &mut impl fmt::Write) -> fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.full_span())?;
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => dump(&child, depth + 1, out)?,
            NodeOrToken::Token(token) => {
                let indent = "  ".repeat(depth + 1);
                for trivia in token.leading_trivia() {
                    dump_trivia(&trivia, depth + 1, "leading", out)?;
                }
                let missing = if token.is_missing() { " (missing)" } else { "" };
                writeln!(out, "{indent}{:?}@{:?} {:?}{missing}", token.kind(), token.span(), token.text())?;
                for trivia in token.trailing_trivia() {
                    dump_trivia(&trivia, depth + 1, "trailing", out)?;
                }
            }
        }
    }
    Ok(())
}

fn dump_trivia(trivia: &SyntaxTrivia, depth: usize, side: &str, out: &mut impl fmt::Write) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match trivia.structure() {
        Some(structure) => {
            writeln!(out, "{indent}{side} {:?}@{:?}", trivia.kind(), trivia.full_span())?;
            dump(&structure, depth + 1, out)
        }
        None => writeln!(
            out,
            "{indent}{side} {:?}@{:?} {:?}",
            trivia.kind(),
            trivia.full_span(),
            trivia.to_full_string()
        ),
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        let (this, that) = (&*self.0, &*other.0);
        if !this.green.ptr_eq(&that.green) || this.offset != that.offset || this.index != that.index
        {
            return false;
        }
        match (&this.parent, &that.parent) {
            (Some(this), Some(that)) => this == that,
            (None, None) => match (&this.parent_trivia, &that.parent_trivia) {
                (Some(this), Some(that)) => this == that,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.green.addr().hash(state);
        self.0.offset.hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_span())
    }
}

/// Writes the node text without its outer trivia.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::with_capacity(self.width().into());
        self.0.green.write_to(&mut buf, false, false);
        f.write_str(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenToken, GreenTrivia, GreenTriviaList};

    fn token(kind: SyntaxKind, text: &str, trailing: &str) -> GreenToken {
        let trailing = if trailing.is_empty() {
            GreenTriviaList::empty()
        } else {
            GreenTriviaList::new([GreenTrivia::new(WHITESPACE, trailing)])
        };
        GreenToken::new(kind, text, GreenTriviaList::empty(), trailing)
    }

    /// `m(a, b)` with a flattened separated argument list.
    fn invocation() -> SyntaxNode {
        let name = |text| GreenNode::new(IDENTIFIER_NAME, [token(IDENTIFIER, text, "").into()]);
        let argument = |text| GreenNode::new(ARGUMENT, [name(text).into()]);
        let list = GreenNode::new(
            SEPARATED_LIST,
            [argument("a").into(), token(COMMA, ",", " ").into(), argument("b").into()],
        );
        let arguments = GreenNode::new(
            ARGUMENT_LIST,
            [token(OPEN_PAREN, "(", "").into(), list.into(), token(CLOSE_PAREN, ")", "").into()],
        );
        SyntaxNode::new_root(GreenNode::new(
            INVOCATION_EXPRESSION,
            [name("m").into(), arguments.into()],
        ))
    }

    #[test]
    fn lists_are_flattened() {
        let root = invocation();
        let arguments = root.children().nth(1).unwrap();
        let kinds = arguments.children_with_tokens().map(|it| it.kind()).collect::<Vec<_>>();
        assert_eq!(kinds, [OPEN_PAREN, ARGUMENT, COMMA, ARGUMENT, CLOSE_PAREN]);

        let reversed = arguments.children_with_tokens().rev().collect::<Vec<_>>();
        let mut forward = arguments.children_with_tokens().collect::<Vec<_>>();
        forward.reverse();
        assert_eq!(forward, reversed);
        assert_eq!(reversed[1].full_span(), TextRange::new(5.into(), 6.into()));
    }

    #[test]
    fn siblings_walk_across_list_boundaries() {
        let root = invocation();
        let arguments = root.children().nth(1).unwrap();
        let open = arguments.children_with_tokens().next().unwrap();

        let mut kinds = Vec::new();
        let mut current = Some(open);
        while let Some(element) = current {
            kinds.push(element.kind());
            current = element.next_sibling_or_token();
        }
        assert_eq!(kinds, [OPEN_PAREN, ARGUMENT, COMMA, ARGUMENT, CLOSE_PAREN]);

        let close = arguments.children_with_tokens().last().unwrap();
        let comma = close.prev_sibling_or_token().unwrap().prev_sibling_or_token().unwrap();
        assert_eq!(comma.kind(), COMMA);
        assert_eq!(comma.span(), TextRange::new(3.into(), 4.into()));
    }

    #[test]
    fn equality_is_positional() {
        let root = invocation();
        let first = root.children().nth(1).unwrap();
        let again = root.children().nth(1).unwrap();
        assert_eq!(first, again);
        assert_ne!(root, SyntaxNode::new_root(root.green().clone()));
        assert_eq!(root.to_string(), "m(a, b)");
        assert!(root.syntax_tree().is_none());
    }
}
