//! Structural equivalence, ignoring trivia.

use crate::SyntaxKind::*;
use crate::{GreenNode, GreenToken, NodeOrToken, SyntaxNode, SyntaxToken};

impl SyntaxNode {
    /// Whether both nodes have the same kinds and token texts.
    ///
    /// With `top_level`, member bodies and the initializers of fields and
    /// properties are skipped, except for constants and enum members.
    pub fn is_equivalent_to(&self, other: &SyntaxNode, top_level: bool) -> bool {
        nodes_equivalent(self.green(), other.green(), top_level)
    }
}

impl SyntaxToken {
    pub fn is_equivalent_to(&self, other: &SyntaxToken) -> bool {
        tokens_equivalent(self.green(), other.green())
    }
}

fn nodes_equivalent(this: &GreenNode, that: &GreenNode, top_level: bool) -> bool {
    if this.ptr_eq(that) {
        return true;
    }
    if this.kind() != that.kind() {
        return false;
    }
    let top_level = top_level && !is_constant(this);
    if top_level && matches!(this.kind(), BLOCK | ARROW_EXPRESSION_CLAUSE) {
        return true;
    }
    let skip_initializer = top_level && matches!(this.kind(), VARIABLE_DECLARATOR | PROPERTY_DECLARATION);
    this.children().len() == that.children().len()
        && this.children().iter().zip(that.children()).all(|pair| match pair {
            (NodeOrToken::Node(this), NodeOrToken::Node(that))
                if skip_initializer && this.kind() == EQUALS_VALUE_CLAUSE =>
            {
                that.kind() == EQUALS_VALUE_CLAUSE
            }
            (NodeOrToken::Node(this), NodeOrToken::Node(that)) => {
                nodes_equivalent(this, that, top_level)
            }
            (NodeOrToken::Token(this), NodeOrToken::Token(that)) => tokens_equivalent(this, that),
            _ => false,
        })
}

fn tokens_equivalent(this: &GreenToken, that: &GreenToken) -> bool {
    this.kind() == that.kind() && this.text() == that.text()
}

/// Declarations whose initializers are part of their signature.
fn is_constant(node: &GreenNode) -> bool {
    match node.kind() {
        ENUM_MEMBER_DECLARATION => true,
        FIELD_DECLARATION => node.children().iter().any(|child| match child {
            NodeOrToken::Node(list) if list.kind() == LIST => {
                list.children().iter().any(|modifier| modifier.kind() == CONST_KW)
            }
            _ => false,
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{self, identifier, token};
    use crate::{GreenElement, GreenTrivia, GreenTriviaList, SyntaxKind};

    fn name(text: &str) -> GreenElement {
        factory::node(IDENTIFIER_NAME, [identifier(Some(text)).unwrap().into()]).unwrap().into()
    }

    fn field(modifier: Option<SyntaxKind>, value: &str) -> SyntaxNode {
        let declarator = factory::node(
            VARIABLE_DECLARATOR,
            [
                identifier(Some("x")).unwrap().into(),
                factory::node(EQUALS_VALUE_CLAUSE, [token(EQUALS).unwrap().into(), name(value)])
                    .unwrap()
                    .into(),
            ],
        )
        .unwrap();
        let declaration = factory::node(
            VARIABLE_DECLARATION,
            [
                factory::node(PREDEFINED_TYPE, [token(INT_KW).unwrap().into()]).unwrap().into(),
                declarator.into(),
            ],
        )
        .unwrap();
        let mut children: Vec<GreenElement> =
            modifier.map(|kind| token(kind).unwrap().into()).into_iter().collect();
        children.extend([declaration.into(), token(SEMICOLON).unwrap().into()]);
        SyntaxNode::new_root(factory::node(FIELD_DECLARATION, children).unwrap())
    }

    fn method(statement: &str) -> SyntaxNode {
        let body = factory::node(
            BLOCK,
            [
                token(OPEN_BRACE).unwrap().into(),
                factory::node(EXPRESSION_STATEMENT, [name(statement), token(SEMICOLON).unwrap().into()])
                    .unwrap()
                    .into(),
                token(CLOSE_BRACE).unwrap().into(),
            ],
        )
        .unwrap();
        let parameters = factory::node(
            PARAMETER_LIST,
            [token(OPEN_PAREN).unwrap().into(), token(CLOSE_PAREN).unwrap().into()],
        )
        .unwrap();
        let method = factory::node(
            METHOD_DECLARATION,
            [
                factory::node(PREDEFINED_TYPE, [token(VOID_KW).unwrap().into()]).unwrap().into(),
                identifier(Some("M")).unwrap().into(),
                parameters.into(),
                body.into(),
            ],
        )
        .unwrap();
        SyntaxNode::new_root(method)
    }

    #[test]
    fn trivia_is_ignored() {
        let plain = method("a");
        let spaced = plain.with_leading_trivia(GreenTriviaList::new([GreenTrivia::new(WHITESPACE, "  ")]));
        assert_ne!(plain.to_full_string(), spaced.to_full_string());
        assert!(plain.is_equivalent_to(&spaced, false));
        assert!(!plain.is_equivalent_to(&method("b"), false));

        let a = plain.first_token().unwrap();
        let b = method("b").first_token().unwrap();
        assert!(a.is_equivalent_to(&b));
    }

    #[test]
    fn top_level_skips_bodies_and_initializers() {
        assert!(method("a").is_equivalent_to(&method("b"), true));
        assert!(field(None, "a").is_equivalent_to(&field(None, "b"), true));
        assert!(!field(None, "a").is_equivalent_to(&field(None, "b"), false));
        assert!(!field(Some(CONST_KW), "a").is_equivalent_to(&field(Some(CONST_KW), "b"), true));
        assert!(!field(Some(CONST_KW), "a").is_equivalent_to(&field(Some(STATIC_KW), "a"), true));
    }
}
