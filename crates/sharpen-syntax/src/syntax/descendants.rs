//! Depth-first descendant walks with span, pruning and trivia options.

use std::iter::Chain;
use std::rc::Rc;

use text_size::TextRange;

use super::iter::ChildrenWithTokens;
use super::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia, TriviaIter, is_in_span};

type DescendInto = Rc<dyn Fn(&SyntaxNode) -> bool>;

/// Configures a descendant walk rooted at a node.
///
/// By default the walk visits everything below the root in document order,
/// skips the root itself and does not look inside structured trivia.
#[derive(Clone)]
pub struct Descendants {
    root: SyntaxNode,
    span: Option<TextRange>,
    descend_into: Option<DescendInto>,
    into_trivia: bool,
    and_self: bool,
}

impl Descendants {
    fn new(root: SyntaxNode) -> Self {
        Self { root, span: None, descend_into: None, into_trivia: false, and_self: false }
    }

    /// Only visit elements whose full span intersects `span`.
    #[must_use]
    pub fn within(mut self, span: TextRange) -> Self {
        self.span = Some(span);
        self
    }

    /// Prune the children of nodes for which `predicate` returns `false`.
    /// The node itself is still visited.
    #[must_use]
    pub fn descend_into(mut self, predicate: impl Fn(&SyntaxNode) -> bool + 'static) -> Self {
        self.descend_into = Some(Rc::new(predicate));
        self
    }

    /// Also walk the subtrees of structured trivia, in document order.
    #[must_use]
    pub fn descend_into_trivia(mut self) -> Self {
        self.into_trivia = true;
        self
    }

    /// Visit the root first.
    #[must_use]
    pub fn and_self(mut self) -> Self {
        self.and_self = true;
        self
    }

    pub fn elements(self) -> DescendantElements {
        DescendantElements::new(self)
    }

    pub fn nodes(self) -> DescendantNodes {
        DescendantNodes { inner: self.elements() }
    }

    pub fn tokens(self) -> DescendantTokens {
        DescendantTokens { inner: self.elements() }
    }

    pub fn trivia(self) -> DescendantTrivia {
        DescendantTrivia::new(self)
    }
}

enum Pending {
    Children(ChildrenWithTokens),
    Node(SyntaxNode),
    Token(SyntaxToken),
}

/// Nodes and tokens in document order.
pub struct DescendantElements {
    stack: Vec<Pending>,
    span: Option<TextRange>,
    descend_into: Option<DescendInto>,
    into_trivia: bool,
}

impl DescendantElements {
    fn new(config: Descendants) -> Self {
        let Descendants { root, span, descend_into, into_trivia, and_self } = config;
        let mut walk = Self { stack: Vec::new(), span, descend_into, into_trivia };
        if and_self {
            if walk.in_span(root.full_span()) {
                walk.stack.push(Pending::Node(root));
            }
        } else {
            walk.push_children(&root);
        }
        walk
    }

    fn in_span(&self, range: TextRange) -> bool {
        self.span.is_none_or(|span| is_in_span(span, range))
    }

    fn push_children(&mut self, node: &SyntaxNode) {
        if self.descend_into.as_ref().is_none_or(|descend| descend(node)) {
            self.stack.push(Pending::Children(node.children_with_tokens()));
        }
    }

    fn enter(&mut self, node: SyntaxNode) -> SyntaxElement {
        self.push_children(&node);
        NodeOrToken::Node(node)
    }

    /// Queues the token between the structures of its leading and trailing
    /// trivia.
    fn push_token_with_trivia(&mut self, token: SyntaxToken) {
        let structures = |trivia: TriviaIter| {
            trivia.filter(|trivia| self.in_span(trivia.full_span())).filter_map(|trivia| trivia.structure())
        };
        let leading = structures(token.leading_trivia()).collect::<Vec<_>>();
        let trailing = structures(token.trailing_trivia()).collect::<Vec<_>>();
        self.stack.extend(trailing.into_iter().rev().map(Pending::Node));
        self.stack.push(Pending::Token(token));
        self.stack.extend(leading.into_iter().rev().map(Pending::Node));
    }
}

impl Iterator for DescendantElements {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Pending::Children(mut children) => {
                    let Some(child) = children.next() else { continue };
                    self.stack.push(Pending::Children(children));
                    if !self.in_span(child.full_span()) {
                        continue;
                    }
                    match child {
                        NodeOrToken::Node(node) => return Some(self.enter(node)),
                        NodeOrToken::Token(token) if self.into_trivia && token.has_structured_trivia() => {
                            self.push_token_with_trivia(token);
                        }
                        NodeOrToken::Token(token) => return Some(NodeOrToken::Token(token)),
                    }
                }
                Pending::Node(node) => return Some(self.enter(node)),
                Pending::Token(token) => return Some(NodeOrToken::Token(token)),
            }
        }
    }
}

/// Nodes in document order.
pub struct DescendantNodes {
    inner: DescendantElements,
}

impl Iterator for DescendantNodes {
    type Item = SyntaxNode;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(SyntaxElement::into_node)
    }
}

/// Tokens in document order.
pub struct DescendantTokens {
    inner: DescendantElements,
}

impl Iterator for DescendantTokens {
    type Item = SyntaxToken;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(SyntaxElement::into_token)
    }
}

enum TriviaFrame {
    Tokens(DescendantTokens),
    Trivia(Chain<TriviaIter, TriviaIter>),
}

/// Leading and trailing trivia of every descendant token in document order.
pub struct DescendantTrivia {
    stack: Vec<TriviaFrame>,
    span: Option<TextRange>,
    descend_into: Option<DescendInto>,
    into_trivia: bool,
}

impl DescendantTrivia {
    fn new(config: Descendants) -> Self {
        let span = config.span;
        let descend_into = config.descend_into.clone();
        let into_trivia = config.into_trivia;
        let tokens = Descendants { into_trivia: false, ..config }.tokens();
        Self { stack: vec![TriviaFrame::Tokens(tokens)], span, descend_into, into_trivia }
    }

    fn tokens_of(&self, structure: SyntaxNode) -> DescendantTokens {
        let mut config = Descendants::new(structure);
        config.span = self.span;
        config.descend_into = self.descend_into.clone();
        config.tokens()
    }
}

impl Iterator for DescendantTrivia {
    type Item = SyntaxTrivia;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.last_mut()? {
                TriviaFrame::Tokens(tokens) => match tokens.next() {
                    Some(token) => {
                        let trivia = token.leading_trivia().chain(token.trailing_trivia());
                        self.stack.push(TriviaFrame::Trivia(trivia));
                    }
                    None => {
                        self.stack.pop();
                    }
                },
                TriviaFrame::Trivia(trivia) => {
                    let Some(trivia) = trivia.next() else {
                        self.stack.pop();
                        continue;
                    };
                    if self.span.is_some_and(|span| !is_in_span(span, trivia.full_span())) {
                        continue;
                    }
                    if self.into_trivia
                        && let Some(structure) = trivia.structure()
                    {
                        let tokens = self.tokens_of(structure);
                        self.stack.push(TriviaFrame::Tokens(tokens));
                    }
                    return Some(trivia);
                }
            }
        }
    }
}

impl SyntaxNode {
    /// Starts configuring a descendant walk.
    pub fn descendants(&self) -> Descendants {
        Descendants::new(self.clone())
    }

    pub fn descendant_nodes(&self) -> DescendantNodes {
        self.descendants().nodes()
    }

    pub fn descendant_nodes_and_tokens(&self) -> DescendantElements {
        self.descendants().elements()
    }

    pub fn descendant_tokens(&self) -> DescendantTokens {
        self.descendants().tokens()
    }

    pub fn descendant_trivia(&self) -> DescendantTrivia {
        self.descendants().trivia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::{self, *};
    use crate::{GreenNode, GreenToken, GreenTrivia, GreenTriviaList};

    fn token(kind: SyntaxKind, text: &str, trailing: &str) -> GreenToken {
        let trailing = match trailing {
            "" => GreenTriviaList::empty(),
            text => GreenTriviaList::new([GreenTrivia::new(WHITESPACE, text)]),
        };
        GreenToken::new(kind, text, GreenTriviaList::empty(), trailing)
    }

    /// `a + b` with a leading `#region` directive on `a`.
    fn tree() -> SyntaxNode {
        let end = GreenToken::new(
            END_OF_DIRECTIVE,
            "",
            GreenTriviaList::empty(),
            GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]),
        );
        let region = GreenNode::new(
            REGION_DIRECTIVE_TRIVIA,
            [token(HASH, "#", "").into(), token(REGION_KW, "region", "").into(), end.into()],
        );
        let a = token(IDENTIFIER, "a", " ")
            .with_leading(GreenTriviaList::new([GreenTrivia::structured(region)]));
        let name = |token: GreenToken| GreenNode::new(IDENTIFIER_NAME, [token.into()]);
        SyntaxNode::new_root(GreenNode::new(
            ADD_EXPRESSION,
            [name(a).into(), token(PLUS, "+", " ").into(), name(token(IDENTIFIER, "b", "")).into()],
        ))
    }

    fn kinds(iter: impl Iterator<Item = SyntaxElement>) -> Vec<SyntaxKind> {
        iter.map(|element| element.kind()).collect()
    }

    #[test]
    fn structured_trivia_is_opt_in() {
        let root = tree();
        assert_eq!(
            kinds(root.descendant_nodes_and_tokens()),
            [IDENTIFIER_NAME, IDENTIFIER, PLUS, IDENTIFIER_NAME, IDENTIFIER]
        );
        assert_eq!(
            kinds(root.descendants().descend_into_trivia().and_self().elements()),
            [
                ADD_EXPRESSION,
                IDENTIFIER_NAME,
                REGION_DIRECTIVE_TRIVIA,
                HASH,
                REGION_KW,
                END_OF_DIRECTIVE,
                IDENTIFIER,
                PLUS,
                IDENTIFIER_NAME,
                IDENTIFIER,
            ]
        );
    }

    #[test]
    fn pruning_keeps_the_pruned_node() {
        let root = tree();
        let nodes = root
            .descendants()
            .descend_into(|node| node.kind() != IDENTIFIER_NAME)
            .descend_into_trivia()
            .nodes()
            .map(|node| node.kind())
            .collect::<Vec<_>>();
        assert_eq!(nodes, [IDENTIFIER_NAME, IDENTIFIER_NAME]);
    }

    #[test]
    fn span_filter_and_trivia() {
        let root = tree();
        let span = TextRange::new(10.into(), 11.into());
        let tokens = root.descendants().within(span).tokens().map(|token| token.kind()).collect::<Vec<_>>();
        assert_eq!(tokens, [PLUS]);

        let trivia = root.descendant_trivia().map(|trivia| trivia.kind()).collect::<Vec<_>>();
        assert_eq!(trivia, [REGION_DIRECTIVE_TRIVIA, WHITESPACE, WHITESPACE]);
        let trivia = root
            .descendants()
            .descend_into_trivia()
            .trivia()
            .map(|trivia| trivia.kind())
            .collect::<Vec<_>>();
        assert_eq!(trivia, [REGION_DIRECTIVE_TRIVIA, END_OF_LINE, WHITESPACE, WHITESPACE]);
    }
}
