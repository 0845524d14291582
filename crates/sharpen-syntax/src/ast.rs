//! Typed views over untyped nodes.

use crate::SyntaxKind::{self, *};
use crate::{NodeOrToken, SyntaxNode, SyntaxToken};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(syntax: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:pat_param)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $($kind)|+)
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(CompilationUnit, COMPILATION_UNIT);
ast_node!(
    /// Class, struct, interface or record declaration.
    TypeDeclaration,
    CLASS_DECLARATION
        | STRUCT_DECLARATION
        | INTERFACE_DECLARATION
        | RECORD_DECLARATION
        | RECORD_STRUCT_DECLARATION
);
ast_node!(MethodDeclaration, METHOD_DECLARATION);
ast_node!(ParameterList, PARAMETER_LIST);
ast_node!(Parameter, PARAMETER);
ast_node!(Block, BLOCK);
ast_node!(InvocationExpression, INVOCATION_EXPRESSION);
ast_node!(ArgumentList, ARGUMENT_LIST);
ast_node!(Argument, ARGUMENT);
ast_node!(IdentifierName, IDENTIFIER_NAME);

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .find(|token| token.kind() == kind)
}

fn modifiers(parent: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    parent
        .children_with_tokens()
        .filter_map(NodeOrToken::into_token)
        .filter(|token| token.kind().is_modifier())
}

impl CompilationUnit {
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_member_declaration())
    }

    pub fn types(&self) -> impl Iterator<Item = TypeDeclaration> + use<> {
        children(&self.0)
    }

    pub fn end_of_file_token(&self) -> Option<SyntaxToken> {
        token(&self.0, END_OF_FILE)
    }
}

impl TypeDeclaration {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        token(&self.0, IDENTIFIER)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        modifiers(&self.0)
    }

    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_member_declaration())
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDeclaration> + use<> {
        children(&self.0)
    }
}

impl MethodDeclaration {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        token(&self.0, IDENTIFIER)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        modifiers(&self.0)
    }

    /// The return type.
    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind().is_type())
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    /// The `=> expression` body.
    pub fn expression_body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind() == ARROW_EXPRESSION_CLAUSE)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + use<> {
        children(&self.0)
    }
}

impl Parameter {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        token(&self.0, IDENTIFIER)
    }

    pub fn ty(&self) -> Option<SyntaxNode> {
        self.0.children().find(|node| node.kind().is_type())
    }
}

impl Block {
    pub fn open_brace_token(&self) -> Option<SyntaxToken> {
        token(&self.0, OPEN_BRACE)
    }

    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_statement())
    }

    pub fn close_brace_token(&self) -> Option<SyntaxToken> {
        token(&self.0, CLOSE_BRACE)
    }
}

impl InvocationExpression {
    /// The invoked expression.
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().next().filter(|node| node.kind().is_expression())
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        child(&self.0)
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Argument> + use<> {
        children(&self.0)
    }

    pub fn separators(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.0
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter(|token| token.kind() == COMMA)
    }
}

impl Argument {
    /// `ref`, `out` or `in`.
    pub fn ref_kind_keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .find(|token| matches!(token.kind(), REF_KW | OUT_KW | IN_KW))
    }

    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.children().last().filter(|node| node.kind().is_expression())
    }
}

impl IdentifierName {
    pub fn identifier(&self) -> Option<SyntaxToken> {
        token(&self.0, IDENTIFIER)
    }

    /// The identifier without a verbatim `@`.
    pub fn name(&self) -> String {
        self.identifier().map(|token| token.value_text().to_owned()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{self, identifier, token as fixed};
    use crate::{GreenElement, GreenNode};

    fn name(text: &str) -> GreenNode {
        factory::node(IDENTIFIER_NAME, [identifier(Some(text)).unwrap().into()]).unwrap()
    }

    fn argument(text: &str) -> GreenNode {
        factory::node(ARGUMENT, [name(text).into()]).unwrap()
    }

    #[test]
    fn typed_accessors() {
        let arguments = factory::separated_nodes([argument("a"), argument("@b")]);
        let list = factory::node(
            ARGUMENT_LIST,
            [fixed(OPEN_PAREN).unwrap().into(), arguments.into(), fixed(CLOSE_PAREN).unwrap().into()],
        )
        .unwrap();
        let children: [GreenElement; 2] = [name("m").into(), list.into()];
        let root = SyntaxNode::new_root(factory::node(INVOCATION_EXPRESSION, children).unwrap());

        let invocation = InvocationExpression::cast(root.clone()).unwrap();
        assert_eq!(invocation.syntax(), &root);
        let callee = IdentifierName::cast(invocation.expression().unwrap()).unwrap();
        assert_eq!(callee.name(), "m");

        let list = invocation.argument_list().unwrap();
        let names = list
            .arguments()
            .filter_map(|argument| argument.expression())
            .filter_map(IdentifierName::cast)
            .map(|name| name.name())
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(list.separators().count(), 1);
        assert!(list.arguments().all(|argument| argument.ref_kind_keyword().is_none()));

        assert!(Block::cast(root).is_none());
        assert!(TypeDeclaration::can_cast(RECORD_STRUCT_DECLARATION));
        assert!(!TypeDeclaration::can_cast(ENUM_DECLARATION));
    }
}
