//! Child iteration and preorder walks.

use text_size::TextSize;

use super::{NodeOrToken, SlotIndex, SyntaxElement, SyntaxNode, SyntaxToken};
use crate::GreenElement;

/// One end of a [`ChildrenWithTokens`] range.
#[derive(Clone, Copy)]
struct Cursor {
    slot: usize,
    item: usize,
    offset: TextSize,
}

impl Cursor {
    #[inline]
    fn key(self) -> (usize, usize) {
        (self.slot, self.item)
    }
}

/// Iterator over children including tokens, flattening list slots.
///
/// The back cursor is exclusive: for an ordinary slot `item == 1` means "after
/// the element", for a list slot it is the number of items still in range.
#[derive(Clone)]
pub struct ChildrenWithTokens {
    parent: SyntaxNode,
    front: Cursor,
    back: Cursor,
}

impl ChildrenWithTokens {
    pub(crate) fn new(parent: SyntaxNode) -> Self {
        let front = Cursor { slot: 0, item: 0, offset: parent.position() };
        let back = Cursor {
            slot: parent.green().children().len(),
            item: 0,
            offset: parent.end_position(),
        };
        Self { parent, front, back }
    }

    pub(crate) fn empty(parent: SyntaxNode) -> Self {
        let front = Cursor { slot: 0, item: 0, offset: parent.position() };
        Self { parent, front, back: front }
    }

    /// Just the items of the list in `slot`.
    pub(crate) fn slot_range(parent: SyntaxNode, slot: usize, offset: TextSize) -> Self {
        let end = offset + parent.green().children()[slot].full_width();
        let front = Cursor { slot, item: 0, offset };
        let back = Cursor { slot: slot + 1, item: 0, offset: end };
        Self { parent, front, back }
    }

    /// Everything after the child at `index`, whose full span ends at `end`.
    pub(crate) fn after(parent: SyntaxNode, index: SlotIndex, end: TextSize) -> Self {
        let mut children = Self::new(parent);
        children.front = if children.parent.is_list_slot(index.slot()) {
            Cursor { slot: index.slot(), item: index.item() + 1, offset: end }
        } else {
            Cursor { slot: index.slot() + 1, item: 0, offset: end }
        };
        children
    }

    /// Everything before the child at `index`, whose full span starts at `start`.
    pub(crate) fn before(parent: SyntaxNode, index: SlotIndex, start: TextSize) -> Self {
        let mut children = Self::new(parent);
        children.back = Cursor { slot: index.slot(), item: index.item(), offset: start };
        children
    }

    #[inline]
    fn green(&self, slot: usize) -> Option<&GreenElement> {
        self.parent.green().children().get(slot)
    }
}

impl Iterator for ChildrenWithTokens {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.front.key() >= self.back.key() {
                return None;
            }
            let Cursor { slot, item, offset } = self.front;
            let green = self.green(slot)?;
            let (child, index) = match green {
                NodeOrToken::Node(list) if list.kind().is_list() => {
                    match list.children().get(item) {
                        Some(child) => (child, SlotIndex::new(slot, item)),
                        None => {
                            self.front = Cursor { slot: slot + 1, item: 0, offset };
                            continue;
                        }
                    }
                }
                _ => (green, SlotIndex::new(slot, 0)),
            };
            let element = SyntaxElement::new(&self.parent, child, index, offset);
            let offset = offset + child.full_width();
            self.front = if green.kind().is_list() {
                Cursor { slot, item: item + 1, offset }
            } else {
                Cursor { slot: slot + 1, item: 0, offset }
            };
            return Some(element);
        }
    }
}

impl DoubleEndedIterator for ChildrenWithTokens {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if self.back.key() <= self.front.key() {
                return None;
            }
            let Cursor { slot, item, offset } = self.back;
            if item == 0 {
                let slot = slot.checked_sub(1)?;
                let green = self.green(slot)?;
                let item = match green {
                    NodeOrToken::Node(list) if list.kind().is_list() => list.children().len(),
                    _ => 1,
                };
                self.back = Cursor { slot, item, offset };
                continue;
            }
            let item = item - 1;
            let green = self.green(slot)?;
            let (child, index) = match green {
                NodeOrToken::Node(list) if list.kind().is_list() => {
                    (list.children().get(item)?, SlotIndex::new(slot, item))
                }
                _ => (green, SlotIndex::new(slot, 0)),
            };
            let offset = offset - child.full_width();
            let element = SyntaxElement::new(&self.parent, child, index, offset);
            self.back = Cursor { slot, item, offset };
            return Some(element);
        }
    }
}

/// Iterator over child nodes only.
#[derive(Clone)]
pub struct Children {
    inner: ChildrenWithTokens,
}

impl Children {
    pub(crate) fn new(inner: ChildrenWithTokens) -> Self {
        Self { inner }
    }

    #[inline]
    fn filter_child(child: SyntaxElement) -> Option<SyntaxNode> {
        match child {
            NodeOrToken::Node(it) => Some(it),
            NodeOrToken::Token(_) => None,
        }
    }
}

impl Iterator for Children {
    type Item = SyntaxNode;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(Self::filter_child)
    }
}

impl DoubleEndedIterator for Children {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().rev().find_map(Self::filter_child)
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder {
    inner: PreorderWithTokens,
}

impl Preorder {
    #[inline]
    fn new(start: SyntaxNode) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }

    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Debug)]
pub enum WalkEvent {
    Enter(SyntaxNode),
    Leave(SyntaxNode),
}

/// Preorder traversal over nodes and tokens. Structured trivia is not entered.
#[derive(Clone)]
pub struct PreorderWithTokens {
    stack: Vec<(SyntaxNode, ChildrenWithTokens)>,
    root: Option<SyntaxNode>,
}

impl PreorderWithTokens {
    #[inline]
    fn new(start: SyntaxNode) -> Self {
        Self { stack: Vec::with_capacity(128), root: Some(start) }
    }

    /// Skips the current subtree during traversal.
    #[inline]
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEventWithTokens;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root.clone(), root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(NodeOrToken::Node(child)) => {
                self.stack.push((child.clone(), child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(NodeOrToken::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Debug)]
pub enum WalkEventWithTokens {
    EnterNode(SyntaxNode),
    LeaveNode(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxNode {
    /// Returns a preorder iterator over nodes.
    #[inline]
    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    /// Returns a preorder iterator over nodes and tokens.
    #[inline]
    pub fn preorder_with_tokens(&self) -> PreorderWithTokens {
        PreorderWithTokens::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenNode, GreenToken, GreenTriviaList};

    fn token(kind: crate::SyntaxKind, text: &str) -> GreenElement {
        GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty()).into()
    }

    #[test]
    fn preorder_skips_subtrees() {
        let inner = GreenNode::new(IDENTIFIER_NAME, [token(IDENTIFIER, "x")]);
        let modifiers = GreenNode::new(LIST, []);
        let root = SyntaxNode::new_root(GreenNode::new(
            RETURN_STATEMENT,
            [token(RETURN_KW, "return"), modifiers.into(), inner.into(), token(SEMICOLON, ";")],
        ));

        let mut kinds = Vec::new();
        let mut walk = root.preorder_with_tokens();
        while let Some(event) = walk.next() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    kinds.push(node.kind());
                    if node.kind() == IDENTIFIER_NAME {
                        walk.skip_subtree();
                    }
                }
                WalkEventWithTokens::Token(token) => kinds.push(token.kind()),
                WalkEventWithTokens::LeaveNode(_) => {}
            }
        }
        assert_eq!(kinds, [RETURN_STATEMENT, RETURN_KW, IDENTIFIER_NAME, SEMICOLON]);
    }

    #[test]
    fn empty_lists_are_invisible() {
        let root = SyntaxNode::new_root(GreenNode::new(
            BLOCK,
            [token(OPEN_BRACE, "{"), GreenNode::new(LIST, []).into(), token(CLOSE_BRACE, "}")],
        ));
        let open = root.children_with_tokens().next().unwrap();
        let close = open.next_sibling_or_token().unwrap();
        assert_eq!(close.kind(), CLOSE_BRACE);
        assert_eq!(close.prev_sibling_or_token(), Some(open));
        assert_eq!(root.children_with_tokens().rev().count(), 2);
        assert!(root.slot_items(1).next().is_none());
    }
}
