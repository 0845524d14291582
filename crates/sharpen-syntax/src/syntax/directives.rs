//! Preprocessor directive navigation.
//!
//! Directives live as structured trivia, so these walks hop between the
//! trivia lists of consecutive tokens that contain directives. Related
//! directives are the members of one `#if`/`#elif`/`#else`/`#endif` run or
//! one `#region`/`#endregion` pair; fully nested runs are skipped.

use super::{NodeOrToken, SyntaxNode, SyntaxToken, SyntaxTrivia};
use crate::SyntaxKind::{self, *};

impl SyntaxNode {
    /// Every directive under this node in document order.
    pub fn directives(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.descendants()
            .descend_into(Self::contains_directives)
            .descend_into_trivia()
            .nodes()
            .filter(|node| node.kind().is_directive())
    }

    pub fn first_directive(&self) -> Option<SyntaxNode> {
        self.first_directive_where(|_| true)
    }

    pub fn first_directive_where(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        self.first_directive_by(&predicate)
    }

    fn first_directive_by(&self, predicate: &dyn Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        for child in self.children_with_tokens().filter(|child| child.contains_directives()) {
            let found = match child {
                NodeOrToken::Node(node) => node.first_directive_by(predicate),
                NodeOrToken::Token(token) => {
                    token.all_trivia().find_map(|trivia| matching_directive(&trivia, predicate))
                }
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    pub fn last_directive(&self) -> Option<SyntaxNode> {
        self.last_directive_where(|_| true)
    }

    pub fn last_directive_where(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        self.last_directive_by(&predicate)
    }

    fn last_directive_by(&self, predicate: &dyn Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        for child in self.children_with_tokens().rev().filter(|child| child.contains_directives()) {
            let found = match child {
                NodeOrToken::Node(node) => node.last_directive_by(predicate),
                NodeOrToken::Token(token) => {
                    token.all_trivia().rev().find_map(|trivia| matching_directive(&trivia, predicate))
                }
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Whether a directive of `kind` occurs under this node.
    pub fn contains_directive(&self, kind: SyntaxKind) -> bool {
        self.contains_directives() && self.directives().any(|directive| directive.kind() == kind)
    }

    /// The next directive in the tree after this directive.
    pub fn next_directive(&self) -> Option<SyntaxNode> {
        self.next_directive_where(|_| true)
    }

    pub fn next_directive_where(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        let trivia = self.parent_trivia()?;
        let mut token = trivia.token()?.clone();
        let skip = trivia.index() + 1;
        if let Some(found) =
            token.all_trivia().skip(skip).find_map(|trivia| matching_directive(&trivia, &predicate))
        {
            return Some(found);
        }
        while let Some(next) = next_token_with_directives(&token) {
            if let Some(found) =
                next.all_trivia().find_map(|trivia| matching_directive(&trivia, &predicate))
            {
                return Some(found);
            }
            token = next;
        }
        None
    }

    /// The directive preceding this directive in the tree.
    pub fn prev_directive(&self) -> Option<SyntaxNode> {
        self.prev_directive_where(|_| true)
    }

    pub fn prev_directive_where(&self, predicate: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        let trivia = self.parent_trivia()?;
        let mut token = trivia.token()?.clone();
        let before = token.all_trivia().len() - trivia.index();
        if let Some(found) = token
            .all_trivia()
            .rev()
            .skip(before)
            .find_map(|trivia| matching_directive(&trivia, &predicate))
        {
            return Some(found);
        }
        while let Some(prev) = prev_token_with_directives(&token) {
            if let Some(found) =
                prev.all_trivia().rev().find_map(|trivia| matching_directive(&trivia, &predicate))
            {
                return Some(found);
            }
            token = prev;
        }
        None
    }

    /// All directives of the conditional run or region pair this directive
    /// belongs to, in document order.
    pub fn related_directives(&self) -> Vec<SyntaxNode> {
        let mut related = std::iter::successors(self.prev_related_directive(), |directive| {
            directive.prev_related_directive()
        })
        .collect::<Vec<_>>();
        related.reverse();
        related.push(self.clone());
        related.extend(std::iter::successors(self.next_related_directive(), |directive| {
            directive.next_related_directive()
        }));
        related
    }

    fn next_related_directive(&self) -> Option<SyntaxNode> {
        let mut current = Some(self.clone());
        match self.kind() {
            IF_DIRECTIVE_TRIVIA => {}
            ELIF_DIRECTIVE_TRIVIA => current = self.next_possibly_related_directive(),
            ELSE_DIRECTIVE_TRIVIA | REGION_DIRECTIVE_TRIVIA => {}
            _ => return None,
        }
        let closes: &[SyntaxKind] = match self.kind() {
            IF_DIRECTIVE_TRIVIA | ELIF_DIRECTIVE_TRIVIA => {
                &[ELIF_DIRECTIVE_TRIVIA, ELSE_DIRECTIVE_TRIVIA, END_IF_DIRECTIVE_TRIVIA]
            }
            ELSE_DIRECTIVE_TRIVIA => &[END_IF_DIRECTIVE_TRIVIA],
            _ => &[END_REGION_DIRECTIVE_TRIVIA],
        };
        while let Some(directive) = current {
            if closes.contains(&directive.kind()) {
                return Some(directive);
            }
            current = directive.next_possibly_related_directive();
        }
        None
    }

    /// The next directive at the same nesting level.
    fn next_possibly_related_directive(&self) -> Option<SyntaxNode> {
        let mut current = self.next_directive();
        while let Some(directive) = current {
            let close = match directive.kind() {
                IF_DIRECTIVE_TRIVIA => END_IF_DIRECTIVE_TRIVIA,
                REGION_DIRECTIVE_TRIVIA => END_REGION_DIRECTIVE_TRIVIA,
                _ => return Some(directive),
            };
            let mut nested = Some(directive);
            while let Some(inner) = nested.take_if(|inner| inner.kind() != close) {
                nested = inner.next_related_directive();
            }
            current = nested?.next_directive();
        }
        None
    }

    fn prev_related_directive(&self) -> Option<SyntaxNode> {
        let mut current = Some(self.clone());
        let opens: &[SyntaxKind] = match self.kind() {
            END_IF_DIRECTIVE_TRIVIA => &[IF_DIRECTIVE_TRIVIA, ELIF_DIRECTIVE_TRIVIA, ELSE_DIRECTIVE_TRIVIA],
            ELIF_DIRECTIVE_TRIVIA => {
                current = self.prev_possibly_related_directive();
                &[IF_DIRECTIVE_TRIVIA, ELIF_DIRECTIVE_TRIVIA]
            }
            ELSE_DIRECTIVE_TRIVIA => &[IF_DIRECTIVE_TRIVIA, ELIF_DIRECTIVE_TRIVIA],
            END_REGION_DIRECTIVE_TRIVIA => &[REGION_DIRECTIVE_TRIVIA],
            _ => return None,
        };
        while let Some(directive) = current {
            if opens.contains(&directive.kind()) {
                return Some(directive);
            }
            current = directive.prev_possibly_related_directive();
        }
        None
    }

    /// The previous directive at the same nesting level.
    fn prev_possibly_related_directive(&self) -> Option<SyntaxNode> {
        let mut current = self.prev_directive();
        while let Some(directive) = current {
            let open = match directive.kind() {
                END_IF_DIRECTIVE_TRIVIA => IF_DIRECTIVE_TRIVIA,
                END_REGION_DIRECTIVE_TRIVIA => REGION_DIRECTIVE_TRIVIA,
                _ => return Some(directive),
            };
            let mut nested = Some(directive);
            while let Some(inner) = nested.take_if(|inner| inner.kind() != open) {
                nested = inner.prev_related_directive();
            }
            current = nested?.prev_directive();
        }
        None
    }
}

fn matching_directive(trivia: &SyntaxTrivia, predicate: &dyn Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
    if !trivia.is_directive() {
        return None;
    }
    trivia.structure().filter(|directive| predicate(directive))
}

fn next_token_with_directives(token: &SyntaxToken) -> Option<SyntaxToken> {
    token.next_token_by(&SyntaxToken::contains_directives, None)
}

fn prev_token_with_directives(token: &SyntaxToken) -> Option<SyntaxToken> {
    token.prev_token_by(&SyntaxToken::contains_directives, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreenNode, GreenToken, GreenTrivia, GreenTriviaList};

    fn plain(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty())
    }

    fn directive(kind: SyntaxKind) -> GreenTrivia {
        let (keyword, text) = match kind {
            IF_DIRECTIVE_TRIVIA => (IF_KW, "if"),
            ELIF_DIRECTIVE_TRIVIA => (ELIF_KW, "elif"),
            ELSE_DIRECTIVE_TRIVIA => (ELSE_KW, "else"),
            END_IF_DIRECTIVE_TRIVIA => (ENDIF_KW, "endif"),
            REGION_DIRECTIVE_TRIVIA => (REGION_KW, "region"),
            _ => (ENDREGION_KW, "endregion"),
        };
        let end = GreenToken::new(
            END_OF_DIRECTIVE,
            "",
            GreenTriviaList::empty(),
            GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]),
        );
        GreenTrivia::structured(GreenNode::new(
            kind,
            [plain(HASH, "#").into(), plain(keyword, text).into(), end.into()],
        ))
    }

    fn statement(directives: &[SyntaxKind]) -> GreenNode {
        let leading = directives.iter().map(|&kind| directive(kind)).collect();
        let x = GreenToken::new(IDENTIFIER, "x", leading, GreenTriviaList::empty());
        let name = GreenNode::new(IDENTIFIER_NAME, [x.into()]);
        GreenNode::new(EXPRESSION_STATEMENT, [name.into(), plain(SEMICOLON, ";").into()])
    }

    fn tree() -> SyntaxNode {
        let statements = GreenNode::new(
            LIST,
            [
                statement(&[IF_DIRECTIVE_TRIVIA, REGION_DIRECTIVE_TRIVIA]).into(),
                statement(&[END_REGION_DIRECTIVE_TRIVIA, ELIF_DIRECTIVE_TRIVIA]).into(),
                statement(&[IF_DIRECTIVE_TRIVIA, END_IF_DIRECTIVE_TRIVIA, ELSE_DIRECTIVE_TRIVIA]).into(),
            ],
        );
        let eof = plain(END_OF_FILE, "")
            .with_leading(GreenTriviaList::new([directive(END_IF_DIRECTIVE_TRIVIA)]));
        SyntaxNode::new_root(GreenNode::new(COMPILATION_UNIT, [statements.into(), eof.into()]))
    }

    fn kinds(directives: &[SyntaxNode]) -> Vec<SyntaxKind> {
        directives.iter().map(SyntaxNode::kind).collect()
    }

    #[test]
    fn walks_every_directive() {
        let root = tree();
        let all = root.directives().collect::<Vec<_>>();
        assert_eq!(all.len(), 8);

        let forward = std::iter::successors(root.first_directive(), SyntaxNode::next_directive)
            .collect::<Vec<_>>();
        assert_eq!(forward, all);

        let mut backward = std::iter::successors(root.last_directive(), SyntaxNode::prev_directive)
            .collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(backward, all);

        assert!(root.contains_directive(ELSE_DIRECTIVE_TRIVIA));
        assert!(!root.contains_directive(PRAGMA_WARNING_DIRECTIVE_TRIVIA));
        let first_endif = root.first_directive_where(|node| node.kind() == END_IF_DIRECTIVE_TRIVIA);
        assert_eq!(first_endif, Some(all[5].clone()));
    }

    #[test]
    fn related_directives_skip_nested_runs() {
        let root = tree();
        let all = root.directives().collect::<Vec<_>>();
        let outer = [IF_DIRECTIVE_TRIVIA, ELIF_DIRECTIVE_TRIVIA, ELSE_DIRECTIVE_TRIVIA, END_IF_DIRECTIVE_TRIVIA];
        for index in [0, 3, 6, 7] {
            let related = all[index].related_directives();
            assert_eq!(kinds(&related), outer, "from directive {index}");
            assert_eq!(related[0], all[0]);
            assert_eq!(related[3], all[7]);
        }
        assert_eq!(kinds(&all[1].related_directives()), [REGION_DIRECTIVE_TRIVIA, END_REGION_DIRECTIVE_TRIVIA]);
        assert_eq!(all[4].related_directives(), [all[4].clone(), all[5].clone()]);
    }
}
