//! Position and span lookup.

use text_size::{TextRange, TextSize};

use super::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia, TokenFilter};
use crate::{Result, SyntaxError, SyntaxKind};

impl SyntaxNode {
    /// The child whose full span contains `position`.
    pub fn child_that_contains_position(&self, position: TextSize) -> Option<SyntaxElement> {
        if !self.full_span().contains(position) {
            return None;
        }
        self.children_with_tokens().find(|child| child.full_span().contains(position))
    }

    /// The token whose full span contains `position`.
    ///
    /// The end of a compilation unit maps to its end-of-file token. With
    /// `find_inside_trivia`, a position inside structured trivia yields the
    /// token of that trivia's subtree instead.
    pub fn find_token(&self, position: TextSize, find_inside_trivia: bool) -> Result<SyntaxToken> {
        let token = self.find_token_outside_trivia(position)?;
        if !find_inside_trivia {
            return Ok(token);
        }
        match trivia_containing(&token, position).and_then(|trivia| trivia.structure()) {
            Some(structure) => structure.find_token_outside_trivia(position),
            None => Ok(token),
        }
    }

    fn find_token_outside_trivia(&self, position: TextSize) -> Result<SyntaxToken> {
        if position == self.end_position()
            && self.kind() == SyntaxKind::COMPILATION_UNIT
            && let Some(eof) = self.last_token_with(TokenFilter::DEFAULT.with_zero_width())
        {
            return Ok(eof);
        }
        let mut node = self.clone();
        loop {
            match node.child_that_contains_position(position) {
                Some(NodeOrToken::Token(token)) => return Ok(token),
                Some(NodeOrToken::Node(child)) => node = child,
                None => return Err(SyntaxError::OutOfRange("position")),
            }
        }
    }

    /// The trivia containing `position`, if the position falls in trivia.
    ///
    /// `None` stands for the empty default trivia. A position inside a
    /// token's own text, or outside this node, is not an error.
    pub fn find_trivia(&self, position: TextSize, find_inside_trivia: bool) -> Option<SyntaxTrivia> {
        if !self.full_span().contains(position) {
            return None;
        }
        let token = self.find_token_outside_trivia(position).ok()?;
        let trivia = trivia_containing(&token, position)?;
        if find_inside_trivia && let Some(structure) = trivia.structure() {
            return structure.find_trivia(position, true);
        }
        Some(trivia)
    }

    /// The outermost node whose full span contains `span` and starts at the
    /// token at `span.start()`.
    ///
    /// Ties between nested nodes with the same full width resolve to the
    /// outermost one, never climbing to the tree's root, unless
    /// `innermost_for_tie` is set.
    pub fn find_node(
        &self,
        span: TextRange,
        find_inside_trivia: bool,
        innermost_for_tie: bool,
    ) -> Result<SyntaxNode> {
        if !self.full_span().contains_range(span) {
            return Err(SyntaxError::OutOfRange("span"));
        }
        let token = self.find_token(span.start(), find_inside_trivia)?;
        let mut node = token
            .parent()
            .and_then(|parent| parent.first_ancestor_or_self(|node| node.full_span().contains_range(span)))
            .ok_or(SyntaxError::OutOfRange("span"))?;
        if innermost_for_tie {
            return Ok(node);
        }
        let root = node.ancestors_and_self().last();
        while let Some(parent) = node.parent() {
            if parent.full_width() != node.full_width() || Some(&parent) == root.as_ref() {
                break;
            }
            node = parent;
        }
        Ok(node)
    }
}

/// The leading or trailing trivia piece of `token` covering `position`.
fn trivia_containing(token: &SyntaxToken, position: TextSize) -> Option<SyntaxTrivia> {
    let span = token.span();
    let mut trivia = if position < span.start() {
        token.leading_trivia()
    } else if position >= span.end() {
        token.trailing_trivia()
    } else {
        return None;
    };
    trivia.find(|trivia| trivia.full_span().contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenNode, GreenToken, GreenTrivia, GreenTriviaList};

    fn plain(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty())
    }

    /// ` #region\nx;` as a compilation unit with an expression statement.
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
        let leading = GreenTriviaList::new([
            GreenTrivia::new(WHITESPACE, " "),
            GreenTrivia::structured(region),
        ]);
        let x = GreenToken::new(IDENTIFIER, "x", leading, GreenTriviaList::empty());
        let name = GreenNode::new(IDENTIFIER_NAME, [x.into()]);
        let statement = GreenNode::new(EXPRESSION_STATEMENT, [name.into(), plain(SEMICOLON, ";").into()]);
        let members = GreenNode::new(LIST, [statement.into()]);
        SyntaxNode::new_root(GreenNode::new(
            COMPILATION_UNIT,
            [members.into(), plain(END_OF_FILE, "").into()],
        ))
    }

    #[test]
    fn find_token_inside_and_outside_trivia() {
        let root = tree();
        assert_eq!(root.find_token(3.into(), false).unwrap().kind(), IDENTIFIER);
        assert_eq!(root.find_token(3.into(), true).unwrap().kind(), REGION_KW);
        assert_eq!(root.find_token(0.into(), true).unwrap().kind(), IDENTIFIER);
        assert_eq!(root.find_token(11.into(), false).unwrap().kind(), END_OF_FILE);
        assert_eq!(root.find_token(12.into(), false), Err(SyntaxError::OutOfRange("position")));
    }

    #[test]
    fn find_trivia_by_position() {
        let root = tree();
        assert_eq!(root.find_trivia(0.into(), false).unwrap().kind(), WHITESPACE);
        assert_eq!(root.find_trivia(4.into(), false).unwrap().kind(), REGION_DIRECTIVE_TRIVIA);
        assert_eq!(root.find_trivia(8.into(), true).unwrap().kind(), END_OF_LINE);
        assert_eq!(root.find_trivia(9.into(), false), None);
        assert_eq!(root.find_trivia(12.into(), false), None);
    }

    #[test]
    fn find_node_prefers_outermost_on_ties() {
        let root = tree();
        let x = TextRange::new(9.into(), 10.into());
        assert_eq!(root.find_node(x, false, false).unwrap().kind(), IDENTIFIER_NAME);

        let statement = root.children().next().unwrap();
        let full = statement.full_span();
        assert_eq!(root.find_node(full, false, false).unwrap().kind(), EXPRESSION_STATEMENT);
        assert_eq!(
            statement.children().next().unwrap().find_node(full, false, false),
            Err(SyntaxError::OutOfRange("span"))
        );
    }
}
