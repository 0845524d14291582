//! Token-order navigation: first/last tokens and next/previous token.
//!
//! Walks are driven by two callbacks: `accept` picks which tokens count and
//! `step_into` picks which structured trivia are searched. Leaving a
//! structured trivia subtree continues with the owning token's remaining
//! trivia, then the token itself, then whatever follows it.

use text_size::TextSize;

use super::iter::ChildrenWithTokens;
use super::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
use crate::SyntaxKind;

/// Which tokens token navigation stops at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenFilter {
    /// Stop at zero-width tokens, missing ones included.
    pub include_zero_width: bool,
    /// Visit tokens inside skipped-token trivia.
    pub include_skipped: bool,
    /// Visit tokens inside preprocessor directives.
    pub include_directives: bool,
    /// Visit tokens inside documentation comments.
    pub include_doc_comments: bool,
}

impl TokenFilter {
    /// Non-zero-width tokens outside structured trivia.
    pub const DEFAULT: Self = Self {
        include_zero_width: false,
        include_skipped: false,
        include_directives: false,
        include_doc_comments: false,
    };

    #[must_use]
    pub const fn with_zero_width(mut self) -> Self {
        self.include_zero_width = true;
        self
    }

    #[must_use]
    pub const fn with_skipped(mut self) -> Self {
        self.include_skipped = true;
        self
    }

    #[must_use]
    pub const fn with_directives(mut self) -> Self {
        self.include_directives = true;
        self
    }

    #[must_use]
    pub const fn with_doc_comments(mut self) -> Self {
        self.include_doc_comments = true;
        self
    }

    fn accepts(&self, token: &SyntaxToken) -> bool {
        self.include_zero_width || token.width() != TextSize::new(0)
    }

    fn steps_into_any(&self) -> bool {
        self.include_skipped || self.include_directives || self.include_doc_comments
    }

    fn steps_into(&self, trivia: &SyntaxTrivia) -> bool {
        let kind = trivia.kind();
        (self.include_skipped && kind == SyntaxKind::SKIPPED_TOKENS_TRIVIA)
            || (self.include_directives && kind.is_directive())
            || (self.include_doc_comments
                && kind == SyntaxKind::SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA)
    }
}

type Accept<'a> = &'a dyn Fn(&SyntaxToken) -> bool;
type StepInto<'a> = Option<&'a dyn Fn(&SyntaxTrivia) -> bool>;

struct Navigator<'a> {
    accept: Accept<'a>,
    step_into: StepInto<'a>,
}

impl<'a> Navigator<'a> {
    fn new(accept: Accept<'a>, step_into: StepInto<'a>) -> Self {
        Self { accept, step_into }
    }

    fn with_filter<R>(filter: TokenFilter, f: impl FnOnce(&Navigator<'_>) -> R) -> R {
        let accept = |token: &SyntaxToken| filter.accepts(token);
        let step_into = |trivia: &SyntaxTrivia| filter.steps_into(trivia);
        let step_into: StepInto<'_> = if filter.steps_into_any() { Some(&step_into) } else { None };
        f(&Navigator::new(&accept, step_into))
    }

    fn first_in_element(&self, element: &SyntaxElement) -> Option<SyntaxToken> {
        match element {
            NodeOrToken::Node(node) => self.first_in_node(node),
            NodeOrToken::Token(token) => self.first_in_token(token),
        }
    }

    fn first_in_node(&self, node: &SyntaxNode) -> Option<SyntaxToken> {
        node.children_with_tokens().find_map(|child| self.first_in_element(&child))
    }

    fn first_in_token(&self, token: &SyntaxToken) -> Option<SyntaxToken> {
        if self.step_into.is_some()
            && let Some(found) = token.leading_trivia().find_map(|trivia| self.first_in_trivia(&trivia))
        {
            return Some(found);
        }
        if (self.accept)(token) {
            return Some(token.clone());
        }
        if self.step_into.is_some() {
            return token.trailing_trivia().find_map(|trivia| self.first_in_trivia(&trivia));
        }
        None
    }

    fn first_in_trivia(&self, trivia: &SyntaxTrivia) -> Option<SyntaxToken> {
        let step_into = self.step_into?;
        if !trivia.has_structure() || !step_into(trivia) {
            return None;
        }
        self.first_in_node(&trivia.structure()?)
    }

    fn last_in_element(&self, element: &SyntaxElement) -> Option<SyntaxToken> {
        match element {
            NodeOrToken::Node(node) => self.last_in_node(node),
            NodeOrToken::Token(token) => self.last_in_token(token),
        }
    }

    fn last_in_node(&self, node: &SyntaxNode) -> Option<SyntaxToken> {
        node.children_with_tokens().rev().find_map(|child| self.last_in_element(&child))
    }

    fn last_in_token(&self, token: &SyntaxToken) -> Option<SyntaxToken> {
        if self.step_into.is_some()
            && let Some(found) =
                token.trailing_trivia().rev().find_map(|trivia| self.last_in_trivia(&trivia))
        {
            return Some(found);
        }
        if (self.accept)(token) {
            return Some(token.clone());
        }
        if self.step_into.is_some() {
            return token.leading_trivia().rev().find_map(|trivia| self.last_in_trivia(&trivia));
        }
        None
    }

    fn last_in_trivia(&self, trivia: &SyntaxTrivia) -> Option<SyntaxToken> {
        let step_into = self.step_into?;
        if !trivia.has_structure() || !step_into(trivia) {
            return None;
        }
        self.last_in_node(&trivia.structure()?)
    }

    fn next_after_token(&self, token: &SyntaxToken, search_trailing: bool) -> Option<SyntaxToken> {
        let parent = token.parent()?;
        if search_trailing
            && self.step_into.is_some()
            && let Some(found) = token.trailing_trivia().find_map(|trivia| self.first_in_trivia(&trivia))
        {
            return Some(found);
        }
        let siblings = ChildrenWithTokens::after(parent.clone(), token.index(), token.end_position());
        for sibling in siblings {
            if let Some(found) = self.first_in_element(&sibling) {
                return Some(found);
            }
        }
        self.next_after_node(parent)
    }

    fn next_after_node(&self, node: &SyntaxNode) -> Option<SyntaxToken> {
        let mut node = node.clone();
        loop {
            let Some(parent) = node.parent() else {
                let trivia = node.parent_trivia()?.clone();
                return self.next_after_trivia(&trivia);
            };
            let siblings = ChildrenWithTokens::after(parent.clone(), node.index(), node.end_position());
            for sibling in siblings {
                if let Some(found) = self.first_in_element(&sibling) {
                    return Some(found);
                }
            }
            node = parent;
        }
    }

    fn next_after_trivia(&self, trivia: &SyntaxTrivia) -> Option<SyntaxToken> {
        let token = trivia.token()?;
        let mut past_self = false;
        for candidate in token.leading_trivia() {
            if past_self {
                if let Some(found) = self.first_in_trivia(&candidate) {
                    return Some(found);
                }
            } else if candidate.index() == trivia.index() {
                past_self = true;
            }
        }
        if past_self && (self.accept)(token) {
            return Some(token.clone());
        }
        for candidate in token.trailing_trivia() {
            if past_self {
                if let Some(found) = self.first_in_trivia(&candidate) {
                    return Some(found);
                }
            } else if candidate.index() == trivia.index() {
                past_self = true;
            }
        }
        self.next_after_token(token, false)
    }

    fn prev_before_token(&self, token: &SyntaxToken, search_leading: bool) -> Option<SyntaxToken> {
        let parent = token.parent()?;
        if search_leading
            && self.step_into.is_some()
            && let Some(found) =
                token.leading_trivia().rev().find_map(|trivia| self.last_in_trivia(&trivia))
        {
            return Some(found);
        }
        let siblings = ChildrenWithTokens::before(parent.clone(), token.index(), token.position());
        for sibling in siblings.rev() {
            if let Some(found) = self.last_in_element(&sibling) {
                return Some(found);
            }
        }
        self.prev_before_node(parent)
    }

    fn prev_before_node(&self, node: &SyntaxNode) -> Option<SyntaxToken> {
        let mut node = node.clone();
        loop {
            let Some(parent) = node.parent() else {
                let trivia = node.parent_trivia()?.clone();
                return self.prev_before_trivia(&trivia);
            };
            let siblings = ChildrenWithTokens::before(parent.clone(), node.index(), node.position());
            for sibling in siblings.rev() {
                if let Some(found) = self.last_in_element(&sibling) {
                    return Some(found);
                }
            }
            node = parent;
        }
    }

    fn prev_before_trivia(&self, trivia: &SyntaxTrivia) -> Option<SyntaxToken> {
        let token = trivia.token()?;
        let mut past_self = false;
        for candidate in token.trailing_trivia().rev() {
            if past_self {
                if let Some(found) = self.last_in_trivia(&candidate) {
                    return Some(found);
                }
            } else if candidate.index() == trivia.index() {
                past_self = true;
            }
        }
        if past_self && (self.accept)(token) {
            return Some(token.clone());
        }
        for candidate in token.leading_trivia().rev() {
            if past_self {
                if let Some(found) = self.last_in_trivia(&candidate) {
                    return Some(found);
                }
            } else if candidate.index() == trivia.index() {
                past_self = true;
            }
        }
        self.prev_before_token(token, false)
    }
}

impl SyntaxNode {
    /// First non-zero-width token, structured trivia not entered.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.first_token_with(TokenFilter::DEFAULT)
    }

    pub fn first_token_with(&self, filter: TokenFilter) -> Option<SyntaxToken> {
        Navigator::with_filter(filter, |nav| nav.first_in_node(self))
    }

    /// First token satisfying `accept`, searching structured trivia chosen by
    /// `step_into`.
    pub fn first_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).first_in_node(self)
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.last_token_with(TokenFilter::DEFAULT)
    }

    pub fn last_token_with(&self, filter: TokenFilter) -> Option<SyntaxToken> {
        Navigator::with_filter(filter, |nav| nav.last_in_node(self))
    }

    pub fn last_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).last_in_node(self)
    }
}

impl SyntaxToken {
    /// The following non-zero-width token, or `None` at the end of the tree.
    pub fn next_token(&self) -> Option<SyntaxToken> {
        self.next_token_with(TokenFilter::DEFAULT)
    }

    pub fn next_token_with(&self, filter: TokenFilter) -> Option<SyntaxToken> {
        Navigator::with_filter(filter, |nav| nav.next_after_token(self, true))
    }

    pub fn next_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).next_after_token(self, true)
    }

    /// The preceding non-zero-width token, or `None` at the start of the tree.
    pub fn prev_token(&self) -> Option<SyntaxToken> {
        self.prev_token_with(TokenFilter::DEFAULT)
    }

    pub fn prev_token_with(&self, filter: TokenFilter) -> Option<SyntaxToken> {
        Navigator::with_filter(filter, |nav| nav.prev_before_token(self, true))
    }

    pub fn prev_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).prev_before_token(self, true)
    }
}

impl SyntaxTrivia {
    /// The token following this trivia, searching later structured trivia
    /// of the same token first.
    pub fn next_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).next_after_trivia(self)
    }

    pub fn prev_token_by(
        &self,
        accept: &dyn Fn(&SyntaxToken) -> bool,
        step_into: Option<&dyn Fn(&SyntaxTrivia) -> bool>,
    ) -> Option<SyntaxToken> {
        Navigator::new(accept, step_into).prev_before_trivia(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenNode, GreenToken, GreenTrivia, GreenTriviaList};

    fn plain(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty())
    }

    /// `#region\nreturn;` followed by end of file.
    fn tree() -> SyntaxNode {
        let end = GreenToken::new(
            END_OF_DIRECTIVE,
            "",
            GreenTriviaList::empty(),
            GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]),
        );
        let region = GreenNode::new(
            REGION_DIRECTIVE_TRIVIA,
            [plain(HASH, "#").into(), plain(REGION_KW, "region").into(), end.into()],
        );
        let return_kw = GreenToken::new(
            RETURN_KW,
            "return",
            GreenTriviaList::new([GreenTrivia::structured(region)]),
            GreenTriviaList::empty(),
        );
        let statement =
            GreenNode::new(RETURN_STATEMENT, [return_kw.into(), plain(SEMICOLON, ";").into()]);
        let members = GreenNode::new(LIST, [statement.into()]);
        SyntaxNode::new_root(GreenNode::new(
            COMPILATION_UNIT,
            [members.into(), plain(END_OF_FILE, "").into()],
        ))
    }

    #[test]
    fn zero_width_tokens_are_skipped_by_default() {
        let root = tree();
        let semicolon = root.last_token().unwrap();
        assert_eq!(semicolon.kind(), SEMICOLON);
        assert_eq!(semicolon.next_token(), None);

        let eof = semicolon.next_token_with(TokenFilter::DEFAULT.with_zero_width()).unwrap();
        assert_eq!(eof.kind(), END_OF_FILE);
        assert_eq!(eof.prev_token(), Some(semicolon));
    }

    #[test]
    fn directives_are_entered_on_request() {
        let root = tree();
        assert_eq!(root.first_token().unwrap().kind(), RETURN_KW);

        let filter = TokenFilter::DEFAULT.with_directives();
        let hash = root.first_token_with(filter).unwrap();
        assert_eq!(hash.kind(), HASH);
        assert!(hash.is_part_of_structured_trivia());

        let kinds = std::iter::successors(Some(hash), |token| token.next_token_with(filter))
            .map(|token| token.kind())
            .collect::<Vec<_>>();
        assert_eq!(kinds, [HASH, REGION_KW, RETURN_KW, SEMICOLON]);

        let region = root.first_token_with(filter).unwrap().next_token().unwrap();
        assert_eq!(region.kind(), REGION_KW);
        assert_eq!(region.next_token().unwrap().kind(), RETURN_KW);

        let with_zero_width = filter.with_zero_width();
        let end = root
            .first_token_with(filter)
            .and_then(|hash| hash.next_token_with(with_zero_width))
            .and_then(|region| region.next_token_with(with_zero_width))
            .unwrap();
        assert_eq!(end.kind(), END_OF_DIRECTIVE);
        assert_eq!(end.prev_token_with(with_zero_width).unwrap().kind(), REGION_KW);
    }
}
