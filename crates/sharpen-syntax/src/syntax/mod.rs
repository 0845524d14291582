//! Public syntax tree API built on parent-linked views over the green tree.
//!
//! Red handles are created on demand while navigating and are cheap to clone.
//! Two handles compare equal when they denote the same position in the same
//! tree, even if they were reached along different paths.

mod descendants;
mod directives;
mod find;
mod iter;
mod navigation;
mod node;
mod token;
mod trivia;

use std::fmt;

use text_size::{TextRange, TextSize};

pub use descendants::{
    DescendantElements, DescendantNodes, DescendantTokens, DescendantTrivia, Descendants,
};
pub use iter::{
    Children, ChildrenWithTokens, Preorder, PreorderWithTokens, WalkEvent, WalkEventWithTokens,
};
pub use navigation::TokenFilter;
pub(crate) use node::SlotIndex;
pub use node::SyntaxNode;
pub use token::SyntaxToken;
pub use trivia::{SyntaxTrivia, TriviaIter};

use crate::{GreenElement, SyntaxKind};

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, NodeOrToken::Node(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, NodeOrToken::Token(_))
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl SyntaxElement {
    pub(crate) fn new(
        parent: &SyntaxNode,
        green: &GreenElement,
        index: SlotIndex,
        offset: TextSize,
    ) -> Self {
        match green {
            NodeOrToken::Node(node) => {
                NodeOrToken::Node(SyntaxNode::new_child(parent, node.clone(), index, offset))
            }
            NodeOrToken::Token(token) => NodeOrToken::Token(SyntaxToken::new(
                Some(parent.clone()),
                token.clone(),
                index,
                offset,
            )),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn green(&self) -> GreenElement {
        match self {
            NodeOrToken::Node(node) => NodeOrToken::Node(node.green().clone()),
            NodeOrToken::Token(token) => NodeOrToken::Token(token.green().clone()),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => token.parent().cloned(),
        }
    }

    /// Range including the outer trivia.
    pub fn full_span(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.full_span(),
            NodeOrToken::Token(token) => token.full_span(),
        }
    }

    /// Range excluding the outer trivia.
    pub fn span(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.span(),
            NodeOrToken::Token(token) => token.span(),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.is_missing(),
            NodeOrToken::Token(token) => token.is_missing(),
        }
    }

    pub(crate) fn index(&self) -> SlotIndex {
        match self {
            NodeOrToken::Node(node) => node.index(),
            NodeOrToken::Token(token) => token.index(),
        }
    }

    pub fn contains_directives(&self) -> bool {
        match self {
            NodeOrToken::Node(node) => node.contains_directives(),
            NodeOrToken::Token(token) => token.contains_directives(),
        }
    }

    pub fn next_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.next_sibling_or_token(),
            NodeOrToken::Token(token) => token.next_sibling_or_token(),
        }
    }

    pub fn prev_sibling_or_token(&self) -> Option<Self> {
        match self {
            NodeOrToken::Node(node) => node.prev_sibling_or_token(),
            NodeOrToken::Token(token) => token.prev_sibling_or_token(),
        }
    }

    pub fn to_full_string(&self) -> String {
        match self {
            NodeOrToken::Node(node) => node.to_full_string(),
            NodeOrToken::Token(token) => token.to_full_string(),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        NodeOrToken::Token(token)
    }
}

/// Overlap with `span`, or touching it for empty ranges.
pub(crate) fn is_in_span(span: TextRange, child: TextRange) -> bool {
    let overlaps = span.start().max(child.start()) < span.end().min(child.end());
    overlaps || (child.is_empty() && span.start() <= child.end() && child.start() <= span.end())
}
