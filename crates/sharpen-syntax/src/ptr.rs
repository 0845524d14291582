use text_size::TextRange;

use crate::{SyntaxKind, SyntaxNode};

/// Stable identifier for a node by kind and span, valid across trees of the
/// same text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNodePtr {
    pub kind: SyntaxKind,
    /// Span without the outer trivia.
    pub range: TextRange,
}

impl SyntaxNodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self { kind: node.kind(), range: node.span() }
    }

    /// Attempts to resolve this pointer within `root`.
    pub fn try_to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if root.parent().is_some() || !root.full_span().contains_range(self.range) {
            return None;
        }
        let matches = |node: &SyntaxNode| node.kind() == self.kind && node.span() == self.range;
        let found = root
            .find_token(self.range.start(), false)
            .ok()
            .and_then(|token| token.parent().cloned())
            .and_then(|parent| parent.ancestors_and_self().find(matches));
        found.or_else(|| root.descendants().within(self.range).and_self().nodes().find(matches))
    }

    #[track_caller]
    pub fn to_node(&self, root: &SyntaxNode) -> SyntaxNode {
        match self.try_to_node(root) {
            Some(node) => node,
            None => panic!("{self:?} does not point into {root:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;
    use crate::factory::{self, identifier, token};

    fn statement(text: &str) -> SyntaxNode {
        let name = factory::node(IDENTIFIER_NAME, [identifier(Some(text)).unwrap().into()]).unwrap();
        let statement =
            factory::node(EXPRESSION_STATEMENT, [name.into(), token(SEMICOLON).unwrap().into()]).unwrap();
        SyntaxNode::new_root(
            factory::node(
                BLOCK,
                [token(OPEN_BRACE).unwrap().into(), statement.into(), token(CLOSE_BRACE).unwrap().into()],
            )
            .unwrap(),
        )
    }

    #[test]
    fn resolves_across_trees() {
        let first = statement("x");
        let name = first.descendant_nodes().find(|node| node.kind() == IDENTIFIER_NAME).unwrap();
        let ptr = SyntaxNodePtr::new(&name);
        assert_eq!(ptr.range, TextRange::new(1.into(), 2.into()));

        let second = statement("y");
        let resolved = ptr.to_node(&second);
        assert_eq!(resolved.kind(), IDENTIFIER_NAME);
        assert_eq!(resolved.to_string(), "y");

        let statement_ptr = SyntaxNodePtr::new(&name.parent().unwrap());
        assert_eq!(statement_ptr.to_node(&second).kind(), EXPRESSION_STATEMENT);
        assert_eq!(SyntaxNodePtr::new(&second).to_node(&second), second);
        assert!(ptr.try_to_node(&name).is_none());
    }
}
