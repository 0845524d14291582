//! Child layout of every node kind.
//!
//! A shape lists the slots of a node in order. Absent optional slots are not
//! stored at all, while list slots are always present as a `LIST` or
//! `SEPARATED_LIST` node, even when empty. [`arrange`] matches a flat child
//! sequence against a shape greedily, grouping list items and filling absent
//! required slots with missing placeholders.

use crate::SyntaxKind::{self, *};
use crate::green::{GreenElement, GreenNode, GreenToken};
use crate::syntax::NodeOrToken;

/// A set of kinds, with the kind used for a placeholder when nothing matches.
#[derive(Clone, Copy)]
pub(crate) enum Kinds {
    One(SyntaxKind),
    OneOf(&'static [SyntaxKind]),
    Class(fn(SyntaxKind) -> bool, SyntaxKind),
}

impl Kinds {
    pub(crate) fn accepts(self, kind: SyntaxKind) -> bool {
        match self {
            Self::One(one) => one == kind,
            Self::OneOf(kinds) => kinds.contains(&kind),
            Self::Class(accepts, _) => accepts(kind),
        }
    }

    pub(crate) fn placeholder(self) -> SyntaxKind {
        match self {
            Self::One(kind) | Self::Class(_, kind) => kind,
            Self::OneOf(kinds) => kinds[0],
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) enum Slot {
    Token(Kinds),
    OptionalToken(Kinds),
    Node(Kinds),
    OptionalNode(Kinds),
    List(Kinds),
    /// Element kinds and the separator token.
    SeparatedList(Kinds, SyntaxKind),
    TokenList(Kinds),
}

impl Slot {
    pub(crate) fn is_list(self) -> bool {
        matches!(self, Self::List(_) | Self::SeparatedList(..) | Self::TokenList(_))
    }

    pub(crate) fn is_optional(self) -> bool {
        matches!(self, Self::OptionalToken(_) | Self::OptionalNode(_))
    }

    /// Whether `element` may fill this slot on its own.
    fn accepts(self, element: &GreenElement) -> bool {
        match (self, element) {
            (Self::Token(kinds) | Self::OptionalToken(kinds), NodeOrToken::Token(token)) => {
                kinds.accepts(token.kind())
            }
            (Self::Node(kinds) | Self::OptionalNode(kinds), NodeOrToken::Node(node)) => {
                kinds.accepts(node.kind())
            }
            (Self::List(_) | Self::TokenList(_), NodeOrToken::Node(node)) => node.kind() == LIST,
            (Self::SeparatedList(..), NodeOrToken::Node(node)) => node.kind() == SEPARATED_LIST,
            _ => false,
        }
    }

    /// Whether `element` may be an item of this list slot.
    fn accepts_item(self, element: &GreenElement) -> bool {
        match (self, element) {
            (Self::List(kinds), NodeOrToken::Node(node)) => kinds.accepts(node.kind()),
            (Self::TokenList(kinds), NodeOrToken::Token(token)) => kinds.accepts(token.kind()),
            (Self::SeparatedList(kinds, _), NodeOrToken::Node(node)) => kinds.accepts(node.kind()),
            (Self::SeparatedList(_, separator), NodeOrToken::Token(token)) => {
                token.kind() == separator
            }
            _ => false,
        }
    }

    fn list_kind(self) -> SyntaxKind {
        match self {
            Self::SeparatedList(..) => SEPARATED_LIST,
            _ => LIST,
        }
    }

    /// What an absent required slot holds.
    fn placeholder(self) -> Option<GreenElement> {
        match self {
            Self::Token(kinds) => Some(GreenToken::missing(kinds.placeholder()).into()),
            Self::Node(kinds) => Some(missing_node(kinds.placeholder()).into()),
            Self::List(_) | Self::SeparatedList(..) | Self::TokenList(_) => {
                Some(GreenNode::new(self.list_kind(), []).into())
            }
            Self::OptionalToken(_) | Self::OptionalNode(_) => None,
        }
    }
}

/// A node of `kind` whose required slots all hold missing placeholders.
pub(crate) fn missing_node(kind: SyntaxKind) -> GreenNode {
    let children = shape(kind).iter().filter_map(|slot| slot.placeholder());
    GreenNode::new(kind, children)
}

/// Children that do not fit a shape: the arranged prefix followed by the
/// rest of the input.
pub(crate) struct Misfit {
    pub(crate) children: Vec<GreenElement>,
    /// Index of the first child that did not fit.
    pub(crate) unexpected: usize,
}

impl Misfit {
    pub(crate) fn unexpected_kind(&self) -> SyntaxKind {
        self.children[self.unexpected].kind()
    }
}

/// Matches `children` against the shape of `kind`.
pub(crate) fn arrange(
    kind: SyntaxKind,
    children: Vec<GreenElement>,
) -> Result<Vec<GreenElement>, Misfit> {
    let shape = shape(kind);
    let mut arranged = Vec::with_capacity(shape.len());
    let mut input = children.into_iter().peekable();
    for &slot in shape {
        let child = if let Some(child) = input.next_if(|child| slot.accepts(child)) {
            Some(child)
        } else if slot.is_list() {
            let mut items = Vec::new();
            while let Some(item) = input.next_if(|child| slot.accepts_item(child)) {
                items.push(item);
            }
            Some(GreenNode::new(slot.list_kind(), items).into())
        } else {
            slot.placeholder()
        };
        arranged.extend(child);
    }
    if input.peek().is_none() {
        return Ok(arranged);
    }
    let unexpected = arranged.len();
    arranged.extend(input);
    Err(Misfit { children: arranged, unexpected })
}

/// Slot of each child of an already arranged node.
pub(crate) fn slots_of(node: &GreenNode) -> Vec<Option<Slot>> {
    let shape = shape(node.kind());
    let mut slots = Vec::with_capacity(node.children().len());
    let mut next = 0;
    for child in node.children() {
        let found = shape[next.min(shape.len())..]
            .iter()
            .position(|slot| slot.accepts(child))
            .map(|offset| next + offset);
        match found {
            Some(index) => {
                slots.push(Some(shape[index]));
                next = index + 1;
            }
            None => slots.push(None),
        }
    }
    slots
}

pub(crate) fn shape(kind: SyntaxKind) -> &'static [Slot] {
    match kind {
        IDENTIFIER_NAME => IDENTIFIER_NAME_SHAPE,
        GENERIC_NAME => GENERIC_NAME_SHAPE,
        TYPE_ARGUMENT_LIST => TYPE_ARGUMENT_LIST_SHAPE,
        QUALIFIED_NAME => QUALIFIED_NAME_SHAPE,
        ALIAS_QUALIFIED_NAME => ALIAS_QUALIFIED_NAME_SHAPE,
        PREDEFINED_TYPE => PREDEFINED_TYPE_SHAPE,
        ARRAY_TYPE => ARRAY_TYPE_SHAPE,
        ARRAY_RANK_SPECIFIER => ARRAY_RANK_SPECIFIER_SHAPE,
        OMITTED_ARRAY_SIZE_EXPRESSION | OMITTED_TYPE_ARGUMENT => &[],
        POINTER_TYPE => POINTER_TYPE_SHAPE,
        NULLABLE_TYPE => NULLABLE_TYPE_SHAPE,
        TUPLE_TYPE => TUPLE_TYPE_SHAPE,
        TUPLE_ELEMENT => TUPLE_ELEMENT_SHAPE,
        FUNCTION_POINTER_TYPE => FUNCTION_POINTER_TYPE_SHAPE,
        FUNCTION_POINTER_PARAMETER_LIST => FUNCTION_POINTER_PARAMETER_LIST_SHAPE,
        FUNCTION_POINTER_PARAMETER => FUNCTION_POINTER_PARAMETER_SHAPE,

        PARENTHESIZED_EXPRESSION => PARENTHESIZED_EXPRESSION_SHAPE,
        TUPLE_EXPRESSION => TUPLE_EXPRESSION_SHAPE,
        CONDITIONAL_EXPRESSION => CONDITIONAL_EXPRESSION_SHAPE,
        CAST_EXPRESSION => CAST_EXPRESSION_SHAPE,
        kind if kind.is_binary_expression() => BINARY_SHAPE,
        kind if kind.is_assignment_expression() => ASSIGNMENT_SHAPE,
        kind if kind.is_prefix_unary_expression() => PREFIX_UNARY_SHAPE,
        AWAIT_EXPRESSION => AWAIT_EXPRESSION_SHAPE,
        kind if kind.is_postfix_unary_expression() => POSTFIX_UNARY_SHAPE,
        RANGE_EXPRESSION => RANGE_EXPRESSION_SHAPE,
        SIMPLE_MEMBER_ACCESS_EXPRESSION => MEMBER_ACCESS_SHAPE,
        POINTER_MEMBER_ACCESS_EXPRESSION => POINTER_MEMBER_ACCESS_SHAPE,
        CONDITIONAL_ACCESS_EXPRESSION => CONDITIONAL_ACCESS_SHAPE,
        MEMBER_BINDING_EXPRESSION => MEMBER_BINDING_SHAPE,
        ELEMENT_BINDING_EXPRESSION => ELEMENT_BINDING_SHAPE,
        INVOCATION_EXPRESSION => INVOCATION_SHAPE,
        ELEMENT_ACCESS_EXPRESSION => ELEMENT_ACCESS_SHAPE,
        NUMERIC_LITERAL_EXPRESSION => NUMERIC_LITERAL_SHAPE,
        STRING_LITERAL_EXPRESSION => STRING_LITERAL_SHAPE,
        CHARACTER_LITERAL_EXPRESSION => CHARACTER_LITERAL_SHAPE,
        TRUE_LITERAL_EXPRESSION => TRUE_LITERAL_SHAPE,
        FALSE_LITERAL_EXPRESSION => FALSE_LITERAL_SHAPE,
        NULL_LITERAL_EXPRESSION => NULL_LITERAL_SHAPE,
        DEFAULT_LITERAL_EXPRESSION => DEFAULT_LITERAL_SHAPE,
        THIS_EXPRESSION => THIS_EXPRESSION_SHAPE,
        BASE_EXPRESSION => BASE_EXPRESSION_SHAPE,
        TYPEOF_EXPRESSION => TYPEOF_SHAPE,
        SIZEOF_EXPRESSION => SIZEOF_SHAPE,
        DEFAULT_EXPRESSION => DEFAULT_SHAPE,
        CHECKED_EXPRESSION => CHECKED_EXPRESSION_SHAPE,
        UNCHECKED_EXPRESSION => UNCHECKED_EXPRESSION_SHAPE,
        OBJECT_CREATION_EXPRESSION => OBJECT_CREATION_SHAPE,
        IMPLICIT_OBJECT_CREATION_EXPRESSION => IMPLICIT_OBJECT_CREATION_SHAPE,
        ANONYMOUS_OBJECT_CREATION_EXPRESSION => ANONYMOUS_OBJECT_CREATION_SHAPE,
        ARRAY_CREATION_EXPRESSION => ARRAY_CREATION_SHAPE,
        IMPLICIT_ARRAY_CREATION_EXPRESSION => IMPLICIT_ARRAY_CREATION_SHAPE,
        STACK_ALLOC_ARRAY_CREATION_EXPRESSION => STACK_ALLOC_SHAPE,
        kind if kind.is_initializer_expression() => INITIALIZER_SHAPE,
        WITH_EXPRESSION => WITH_EXPRESSION_SHAPE,
        SIMPLE_LAMBDA_EXPRESSION => SIMPLE_LAMBDA_SHAPE,
        PARENTHESIZED_LAMBDA_EXPRESSION => PARENTHESIZED_LAMBDA_SHAPE,
        ANONYMOUS_METHOD_EXPRESSION => ANONYMOUS_METHOD_SHAPE,
        INTERPOLATED_STRING_EXPRESSION => INTERPOLATED_STRING_SHAPE,
        DECLARATION_EXPRESSION => DECLARATION_EXPRESSION_SHAPE,
        IS_PATTERN_EXPRESSION => IS_PATTERN_SHAPE,
        THROW_EXPRESSION => THROW_EXPRESSION_SHAPE,

        ARGUMENT_LIST => ARGUMENT_LIST_SHAPE,
        BRACKETED_ARGUMENT_LIST => BRACKETED_ARGUMENT_LIST_SHAPE,
        ARGUMENT => ARGUMENT_SHAPE,
        NAME_COLON => NAME_COLON_SHAPE,
        NAME_EQUALS => NAME_EQUALS_SHAPE,
        ANONYMOUS_OBJECT_MEMBER_DECLARATOR => ANONYMOUS_OBJECT_MEMBER_SHAPE,
        INTERPOLATED_STRING_TEXT => INTERPOLATED_STRING_TEXT_SHAPE,
        INTERPOLATION => INTERPOLATION_SHAPE,
        INTERPOLATION_ALIGNMENT_CLAUSE => ALIGNMENT_CLAUSE_SHAPE,
        INTERPOLATION_FORMAT_CLAUSE => FORMAT_CLAUSE_SHAPE,
        SINGLE_VARIABLE_DESIGNATION => SINGLE_VARIABLE_DESIGNATION_SHAPE,
        DECLARATION_PATTERN => DECLARATION_PATTERN_SHAPE,
        CONSTANT_PATTERN => CONSTANT_PATTERN_SHAPE,

        BLOCK => BLOCK_SHAPE,
        LOCAL_DECLARATION_STATEMENT => LOCAL_DECLARATION_SHAPE,
        LOCAL_FUNCTION_STATEMENT => LOCAL_FUNCTION_SHAPE,
        EXPRESSION_STATEMENT => EXPRESSION_STATEMENT_SHAPE,
        EMPTY_STATEMENT => EMPTY_STATEMENT_SHAPE,
        LABELED_STATEMENT => LABELED_STATEMENT_SHAPE,
        GOTO_STATEMENT => GOTO_SHAPE,
        GOTO_CASE_STATEMENT => GOTO_CASE_SHAPE,
        GOTO_DEFAULT_STATEMENT => GOTO_DEFAULT_SHAPE,
        BREAK_STATEMENT => BREAK_SHAPE,
        CONTINUE_STATEMENT => CONTINUE_SHAPE,
        RETURN_STATEMENT => RETURN_SHAPE,
        THROW_STATEMENT => THROW_STATEMENT_SHAPE,
        YIELD_RETURN_STATEMENT => YIELD_RETURN_SHAPE,
        YIELD_BREAK_STATEMENT => YIELD_BREAK_SHAPE,
        WHILE_STATEMENT => WHILE_SHAPE,
        DO_STATEMENT => DO_SHAPE,
        FOR_STATEMENT => FOR_SHAPE,
        FOREACH_STATEMENT => FOREACH_SHAPE,
        USING_STATEMENT => USING_STATEMENT_SHAPE,
        FIXED_STATEMENT => FIXED_SHAPE,
        CHECKED_STATEMENT => CHECKED_STATEMENT_SHAPE,
        UNCHECKED_STATEMENT => UNCHECKED_STATEMENT_SHAPE,
        UNSAFE_STATEMENT => UNSAFE_SHAPE,
        LOCK_STATEMENT => LOCK_SHAPE,
        IF_STATEMENT => IF_SHAPE,
        SWITCH_STATEMENT => SWITCH_SHAPE,
        TRY_STATEMENT => TRY_SHAPE,
        VARIABLE_DECLARATION => VARIABLE_DECLARATION_SHAPE,
        VARIABLE_DECLARATOR => VARIABLE_DECLARATOR_SHAPE,
        EQUALS_VALUE_CLAUSE => EQUALS_VALUE_CLAUSE_SHAPE,
        ELSE_CLAUSE => ELSE_CLAUSE_SHAPE,
        SWITCH_SECTION => SWITCH_SECTION_SHAPE,
        CASE_SWITCH_LABEL => CASE_LABEL_SHAPE,
        DEFAULT_SWITCH_LABEL => DEFAULT_LABEL_SHAPE,
        CATCH_CLAUSE => CATCH_CLAUSE_SHAPE,
        CATCH_DECLARATION => CATCH_DECLARATION_SHAPE,
        CATCH_FILTER_CLAUSE => CATCH_FILTER_SHAPE,
        FINALLY_CLAUSE => FINALLY_SHAPE,

        COMPILATION_UNIT => COMPILATION_UNIT_SHAPE,
        EXTERN_ALIAS_DIRECTIVE => EXTERN_ALIAS_SHAPE,
        USING_DIRECTIVE => USING_DIRECTIVE_SHAPE,
        ATTRIBUTE_LIST => ATTRIBUTE_LIST_SHAPE,
        ATTRIBUTE_TARGET_SPECIFIER => ATTRIBUTE_TARGET_SHAPE,
        ATTRIBUTE => ATTRIBUTE_SHAPE,
        ATTRIBUTE_ARGUMENT_LIST => ATTRIBUTE_ARGUMENT_LIST_SHAPE,
        ATTRIBUTE_ARGUMENT => ATTRIBUTE_ARGUMENT_SHAPE,
        NAMESPACE_DECLARATION => NAMESPACE_SHAPE,
        FILE_SCOPED_NAMESPACE_DECLARATION => FILE_SCOPED_NAMESPACE_SHAPE,
        CLASS_DECLARATION => CLASS_SHAPE,
        STRUCT_DECLARATION => STRUCT_SHAPE,
        INTERFACE_DECLARATION => INTERFACE_SHAPE,
        RECORD_DECLARATION => RECORD_SHAPE,
        RECORD_STRUCT_DECLARATION => RECORD_STRUCT_SHAPE,
        ENUM_DECLARATION => ENUM_SHAPE,
        DELEGATE_DECLARATION => DELEGATE_SHAPE,
        ENUM_MEMBER_DECLARATION => ENUM_MEMBER_SHAPE,
        FIELD_DECLARATION => FIELD_SHAPE,
        EVENT_FIELD_DECLARATION => EVENT_FIELD_SHAPE,
        METHOD_DECLARATION => METHOD_SHAPE,
        OPERATOR_DECLARATION => OPERATOR_SHAPE,
        CONVERSION_OPERATOR_DECLARATION => CONVERSION_OPERATOR_SHAPE,
        CONSTRUCTOR_DECLARATION => CONSTRUCTOR_SHAPE,
        DESTRUCTOR_DECLARATION => DESTRUCTOR_SHAPE,
        PROPERTY_DECLARATION => PROPERTY_SHAPE,
        EVENT_DECLARATION => EVENT_SHAPE,
        INDEXER_DECLARATION => INDEXER_SHAPE,
        INCOMPLETE_MEMBER => INCOMPLETE_MEMBER_SHAPE,
        BASE_LIST => BASE_LIST_SHAPE,
        SIMPLE_BASE_TYPE => SIMPLE_BASE_TYPE_SHAPE,
        PRIMARY_CONSTRUCTOR_BASE_TYPE => PRIMARY_CONSTRUCTOR_BASE_TYPE_SHAPE,
        TYPE_PARAMETER_LIST => TYPE_PARAMETER_LIST_SHAPE,
        TYPE_PARAMETER => TYPE_PARAMETER_SHAPE,
        TYPE_PARAMETER_CONSTRAINT_CLAUSE => CONSTRAINT_CLAUSE_SHAPE,
        TYPE_CONSTRAINT => TYPE_CONSTRAINT_SHAPE,
        CLASS_CONSTRAINT => CLASS_CONSTRAINT_SHAPE,
        STRUCT_CONSTRAINT => STRUCT_CONSTRAINT_SHAPE,
        CONSTRUCTOR_CONSTRAINT => CONSTRUCTOR_CONSTRAINT_SHAPE,
        EXPLICIT_INTERFACE_SPECIFIER => EXPLICIT_INTERFACE_SHAPE,
        ACCESSOR_LIST => ACCESSOR_LIST_SHAPE,
        kind if kind.is_accessor_declaration() => ACCESSOR_SHAPE,
        ARROW_EXPRESSION_CLAUSE => ARROW_CLAUSE_SHAPE,
        BASE_CONSTRUCTOR_INITIALIZER => BASE_INITIALIZER_SHAPE,
        THIS_CONSTRUCTOR_INITIALIZER => THIS_INITIALIZER_SHAPE,
        PARAMETER_LIST => PARAMETER_LIST_SHAPE,
        BRACKETED_PARAMETER_LIST => BRACKETED_PARAMETER_LIST_SHAPE,
        PARAMETER => PARAMETER_SHAPE,

        XML_ELEMENT => XML_ELEMENT_SHAPE,
        XML_ELEMENT_START_TAG => XML_START_TAG_SHAPE,
        XML_ELEMENT_END_TAG => XML_END_TAG_SHAPE,
        XML_EMPTY_ELEMENT => XML_EMPTY_ELEMENT_SHAPE,
        XML_NAME => XML_NAME_SHAPE,
        XML_TEXT_ATTRIBUTE => XML_TEXT_ATTRIBUTE_SHAPE,
        XML_TEXT => XML_TEXT_SHAPE,

        SKIPPED_TOKENS_TRIVIA => SKIPPED_TOKENS_SHAPE,
        SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA => DOCUMENTATION_COMMENT_SHAPE,
        IF_DIRECTIVE_TRIVIA => IF_DIRECTIVE_SHAPE,
        ELIF_DIRECTIVE_TRIVIA => ELIF_DIRECTIVE_SHAPE,
        ELSE_DIRECTIVE_TRIVIA => ELSE_DIRECTIVE_SHAPE,
        END_IF_DIRECTIVE_TRIVIA => END_IF_DIRECTIVE_SHAPE,
        REGION_DIRECTIVE_TRIVIA => REGION_DIRECTIVE_SHAPE,
        END_REGION_DIRECTIVE_TRIVIA => END_REGION_DIRECTIVE_SHAPE,
        DEFINE_DIRECTIVE_TRIVIA => DEFINE_DIRECTIVE_SHAPE,
        UNDEF_DIRECTIVE_TRIVIA => UNDEF_DIRECTIVE_SHAPE,
        ERROR_DIRECTIVE_TRIVIA => ERROR_DIRECTIVE_SHAPE,
        WARNING_DIRECTIVE_TRIVIA => WARNING_DIRECTIVE_SHAPE,
        LINE_DIRECTIVE_TRIVIA => LINE_DIRECTIVE_SHAPE,
        PRAGMA_WARNING_DIRECTIVE_TRIVIA => PRAGMA_WARNING_SHAPE,
        NULLABLE_DIRECTIVE_TRIVIA => NULLABLE_DIRECTIVE_SHAPE,
        BAD_DIRECTIVE_TRIVIA => BAD_DIRECTIVE_SHAPE,
        _ => &[],
    }
}

const fn tok(kind: SyntaxKind) -> Slot {
    Slot::Token(Kinds::One(kind))
}

const fn tok_of(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::Token(Kinds::OneOf(kinds))
}

const fn opt_tok(kind: SyntaxKind) -> Slot {
    Slot::OptionalToken(Kinds::One(kind))
}

const fn opt_tok_of(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::OptionalToken(Kinds::OneOf(kinds))
}

const fn node(kind: SyntaxKind) -> Slot {
    Slot::Node(Kinds::One(kind))
}

const fn opt_node(kind: SyntaxKind) -> Slot {
    Slot::OptionalNode(Kinds::One(kind))
}

const fn opt_node_of(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::OptionalNode(Kinds::OneOf(kinds))
}

const fn list(kind: SyntaxKind) -> Slot {
    Slot::List(Kinds::One(kind))
}

const fn list_of(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::List(Kinds::OneOf(kinds))
}

const fn separated(kind: SyntaxKind) -> Slot {
    Slot::SeparatedList(Kinds::One(kind), COMMA)
}

const fn separated_of(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::SeparatedList(Kinds::OneOf(kinds), COMMA)
}

const fn tokens(kinds: &'static [SyntaxKind]) -> Slot {
    Slot::TokenList(Kinds::OneOf(kinds))
}

const fn is_any_token(kind: SyntaxKind) -> bool {
    kind.is_token()
}

const fn is_expression_or_block(kind: SyntaxKind) -> bool {
    kind.is_expression() || matches!(kind, BLOCK)
}

const fn is_member(kind: SyntaxKind) -> bool {
    kind.is_member_declaration()
}

const fn is_xml_node(kind: SyntaxKind) -> bool {
    kind.is_xml_node() && !matches!(kind, XML_ELEMENT_START_TAG | XML_ELEMENT_END_TAG | XML_NAME)
}

const EXPRESSION: Kinds = Kinds::Class(SyntaxKind::is_expression, IDENTIFIER_NAME);
const TYPE: Kinds = Kinds::Class(SyntaxKind::is_type, IDENTIFIER_NAME);
const NAME: Kinds = Kinds::Class(SyntaxKind::is_name, IDENTIFIER_NAME);
const SIMPLE_NAME: Kinds = Kinds::OneOf(&[IDENTIFIER_NAME, GENERIC_NAME]);
const STATEMENT: Kinds = Kinds::Class(SyntaxKind::is_statement, EXPRESSION_STATEMENT);
const BODY: Kinds = Kinds::Class(is_expression_or_block, IDENTIFIER_NAME);
const MEMBER: Kinds = Kinds::Class(is_member, INCOMPLETE_MEMBER);
const MODIFIERS: Slot = Slot::TokenList(Kinds::Class(SyntaxKind::is_modifier, PUBLIC_KW));
const ATTRIBUTES: Slot = list(ATTRIBUTE_LIST);
const CONSTRAINTS: Slot = list(TYPE_PARAMETER_CONSTRAINT_CLAUSE);
const XML_CONTENT: Slot = Slot::List(Kinds::Class(is_xml_node, XML_TEXT));

const IDENTIFIER_NAME_SHAPE: &[Slot] = &[tok(IDENTIFIER)];
const GENERIC_NAME_SHAPE: &[Slot] = &[tok(IDENTIFIER), node(TYPE_ARGUMENT_LIST)];
const TYPE_ARGUMENT_LIST_SHAPE: &[Slot] = &[
    tok(LESS_THAN),
    Slot::SeparatedList(Kinds::Class(is_type_argument, IDENTIFIER_NAME), COMMA),
    tok(GREATER_THAN),
];
const QUALIFIED_NAME_SHAPE: &[Slot] =
    &[Slot::Node(NAME), tok(DOT), Slot::Node(SIMPLE_NAME)];
const ALIAS_QUALIFIED_NAME_SHAPE: &[Slot] =
    &[node(IDENTIFIER_NAME), tok(COLON_COLON), Slot::Node(SIMPLE_NAME)];
const PREDEFINED_TYPE_SHAPE: &[Slot] =
    &[Slot::Token(Kinds::Class(SyntaxKind::is_predefined_type, OBJECT_KW))];
const ARRAY_TYPE_SHAPE: &[Slot] = &[Slot::Node(TYPE), list(ARRAY_RANK_SPECIFIER)];
const ARRAY_RANK_SPECIFIER_SHAPE: &[Slot] = &[
    tok(OPEN_BRACKET),
    Slot::SeparatedList(Kinds::Class(is_array_size, OMITTED_ARRAY_SIZE_EXPRESSION), COMMA),
    tok(CLOSE_BRACKET),
];
const POINTER_TYPE_SHAPE: &[Slot] = &[Slot::Node(TYPE), tok(ASTERISK)];
const NULLABLE_TYPE_SHAPE: &[Slot] = &[Slot::Node(TYPE), tok(QUESTION)];
const TUPLE_TYPE_SHAPE: &[Slot] = &[tok(OPEN_PAREN), separated(TUPLE_ELEMENT), tok(CLOSE_PAREN)];
const TUPLE_ELEMENT_SHAPE: &[Slot] = &[Slot::Node(TYPE), opt_tok(IDENTIFIER)];
const FUNCTION_POINTER_TYPE_SHAPE: &[Slot] =
    &[tok(DELEGATE_KW), tok(ASTERISK), node(FUNCTION_POINTER_PARAMETER_LIST)];
const FUNCTION_POINTER_PARAMETER_LIST_SHAPE: &[Slot] =
    &[tok(LESS_THAN), separated(FUNCTION_POINTER_PARAMETER), tok(GREATER_THAN)];
const FUNCTION_POINTER_PARAMETER_SHAPE: &[Slot] =
    &[tokens(&[REF_KW, OUT_KW, IN_KW]), Slot::Node(TYPE)];

const fn is_type_argument(kind: SyntaxKind) -> bool {
    kind.is_type() || matches!(kind, OMITTED_TYPE_ARGUMENT)
}

const fn is_array_size(kind: SyntaxKind) -> bool {
    kind.is_expression() || matches!(kind, OMITTED_ARRAY_SIZE_EXPRESSION)
}

const PARENTHESIZED_EXPRESSION_SHAPE: &[Slot] =
    &[tok(OPEN_PAREN), Slot::Node(EXPRESSION), tok(CLOSE_PAREN)];
const TUPLE_EXPRESSION_SHAPE: &[Slot] = &[tok(OPEN_PAREN), separated(ARGUMENT), tok(CLOSE_PAREN)];
const CONDITIONAL_EXPRESSION_SHAPE: &[Slot] = &[
    Slot::Node(EXPRESSION),
    tok(QUESTION),
    Slot::Node(EXPRESSION),
    tok(COLON),
    Slot::Node(EXPRESSION),
];
const CAST_EXPRESSION_SHAPE: &[Slot] =
    &[tok(OPEN_PAREN), Slot::Node(TYPE), tok(CLOSE_PAREN), Slot::Node(EXPRESSION)];
const BINARY_SHAPE: &[Slot] = &[
    Slot::Node(EXPRESSION),
    Slot::Token(Kinds::Class(is_binary_operator, PLUS)),
    Slot::Node(EXPRESSION),
];
const ASSIGNMENT_SHAPE: &[Slot] = &[
    Slot::Node(EXPRESSION),
    Slot::Token(Kinds::Class(is_assignment_operator, EQUALS)),
    Slot::Node(EXPRESSION),
];
const PREFIX_UNARY_SHAPE: &[Slot] = &[
    Slot::Token(Kinds::Class(is_prefix_operator, MINUS)),
    Slot::Node(EXPRESSION),
];
const AWAIT_EXPRESSION_SHAPE: &[Slot] = &[tok(AWAIT_KW), Slot::Node(EXPRESSION)];
const POSTFIX_UNARY_SHAPE: &[Slot] =
    &[Slot::Node(EXPRESSION), tok_of(&[PLUS_PLUS, MINUS_MINUS, EXCLAMATION])];
const RANGE_EXPRESSION_SHAPE: &[Slot] =
    &[Slot::OptionalNode(EXPRESSION), tok(DOT_DOT), Slot::OptionalNode(EXPRESSION)];
const MEMBER_ACCESS_SHAPE: &[Slot] =
    &[Slot::Node(EXPRESSION), tok(DOT), Slot::Node(SIMPLE_NAME)];
const POINTER_MEMBER_ACCESS_SHAPE: &[Slot] =
    &[Slot::Node(EXPRESSION), tok(MINUS_GREATER_THAN), Slot::Node(SIMPLE_NAME)];
const CONDITIONAL_ACCESS_SHAPE: &[Slot] =
    &[Slot::Node(EXPRESSION), tok(QUESTION), Slot::Node(EXPRESSION)];
const MEMBER_BINDING_SHAPE: &[Slot] = &[tok(DOT), Slot::Node(SIMPLE_NAME)];
const ELEMENT_BINDING_SHAPE: &[Slot] = &[node(BRACKETED_ARGUMENT_LIST)];
const INVOCATION_SHAPE: &[Slot] = &[Slot::Node(EXPRESSION), node(ARGUMENT_LIST)];
const ELEMENT_ACCESS_SHAPE: &[Slot] = &[Slot::Node(EXPRESSION), node(BRACKETED_ARGUMENT_LIST)];
const NUMERIC_LITERAL_SHAPE: &[Slot] = &[tok(NUMERIC_LITERAL)];
const STRING_LITERAL_SHAPE: &[Slot] = &[tok(STRING_LITERAL)];
const CHARACTER_LITERAL_SHAPE: &[Slot] = &[tok(CHARACTER_LITERAL)];
const TRUE_LITERAL_SHAPE: &[Slot] = &[tok(TRUE_KW)];
const FALSE_LITERAL_SHAPE: &[Slot] = &[tok(FALSE_KW)];
const NULL_LITERAL_SHAPE: &[Slot] = &[tok(NULL_KW)];
const DEFAULT_LITERAL_SHAPE: &[Slot] = &[tok(DEFAULT_KW)];
const THIS_EXPRESSION_SHAPE: &[Slot] = &[tok(THIS_KW)];
const BASE_EXPRESSION_SHAPE: &[Slot] = &[tok(BASE_KW)];
const TYPEOF_SHAPE: &[Slot] =
    &[tok(TYPEOF_KW), tok(OPEN_PAREN), Slot::Node(TYPE), tok(CLOSE_PAREN)];
const SIZEOF_SHAPE: &[Slot] =
    &[tok(SIZEOF_KW), tok(OPEN_PAREN), Slot::Node(TYPE), tok(CLOSE_PAREN)];
const DEFAULT_SHAPE: &[Slot] =
    &[tok(DEFAULT_KW), tok(OPEN_PAREN), Slot::Node(TYPE), tok(CLOSE_PAREN)];
const CHECKED_EXPRESSION_SHAPE: &[Slot] =
    &[tok(CHECKED_KW), tok(OPEN_PAREN), Slot::Node(EXPRESSION), tok(CLOSE_PAREN)];
const UNCHECKED_EXPRESSION_SHAPE: &[Slot] =
    &[tok(UNCHECKED_KW), tok(OPEN_PAREN), Slot::Node(EXPRESSION), tok(CLOSE_PAREN)];
const CREATION_INITIALIZERS: &[SyntaxKind] =
    &[OBJECT_INITIALIZER_EXPRESSION, COLLECTION_INITIALIZER_EXPRESSION];
const OBJECT_CREATION_SHAPE: &[Slot] = &[
    tok(NEW_KW),
    Slot::Node(TYPE),
    opt_node(ARGUMENT_LIST),
    opt_node_of(CREATION_INITIALIZERS),
];
const IMPLICIT_OBJECT_CREATION_SHAPE: &[Slot] =
    &[tok(NEW_KW), node(ARGUMENT_LIST), opt_node_of(CREATION_INITIALIZERS)];
const ANONYMOUS_OBJECT_CREATION_SHAPE: &[Slot] = &[
    tok(NEW_KW),
    tok(OPEN_BRACE),
    separated(ANONYMOUS_OBJECT_MEMBER_DECLARATOR),
    tok(CLOSE_BRACE),
];
const ARRAY_CREATION_SHAPE: &[Slot] =
    &[tok(NEW_KW), node(ARRAY_TYPE), opt_node(ARRAY_INITIALIZER_EXPRESSION)];
const IMPLICIT_ARRAY_CREATION_SHAPE: &[Slot] = &[
    tok(NEW_KW),
    tok(OPEN_BRACKET),
    tokens(&[COMMA]),
    tok(CLOSE_BRACKET),
    node(ARRAY_INITIALIZER_EXPRESSION),
];
const STACK_ALLOC_SHAPE: &[Slot] =
    &[tok(STACKALLOC_KW), Slot::Node(TYPE), opt_node(ARRAY_INITIALIZER_EXPRESSION)];
const INITIALIZER_SHAPE: &[Slot] = &[
    tok(OPEN_BRACE),
    Slot::SeparatedList(EXPRESSION, COMMA),
    tok(CLOSE_BRACE),
];
const WITH_EXPRESSION_SHAPE: &[Slot] =
    &[Slot::Node(EXPRESSION), tok(WITH_KW), node(WITH_INITIALIZER_EXPRESSION)];
const LAMBDA_MODIFIERS: Slot = tokens(&[ASYNC_KW, STATIC_KW]);
const SIMPLE_LAMBDA_SHAPE: &[Slot] = &[
    LAMBDA_MODIFIERS,
    node(PARAMETER),
    tok(EQUALS_GREATER_THAN),
    Slot::Node(BODY),
];
const PARENTHESIZED_LAMBDA_SHAPE: &[Slot] = &[
    LAMBDA_MODIFIERS,
    node(PARAMETER_LIST),
    tok(EQUALS_GREATER_THAN),
    Slot::Node(BODY),
];
const ANONYMOUS_METHOD_SHAPE: &[Slot] =
    &[LAMBDA_MODIFIERS, tok(DELEGATE_KW), opt_node(PARAMETER_LIST), node(BLOCK)];
const INTERPOLATED_STRING_SHAPE: &[Slot] = &[
    tok_of(&[INTERPOLATED_STRING_START, INTERPOLATED_VERBATIM_STRING_START]),
    list_of(&[INTERPOLATED_STRING_TEXT, INTERPOLATION]),
    tok(INTERPOLATED_STRING_END),
];
const DECLARATION_EXPRESSION_SHAPE: &[Slot] =
    &[Slot::Node(TYPE), node(SINGLE_VARIABLE_DESIGNATION)];
const IS_PATTERN_SHAPE: &[Slot] = &[
    Slot::Node(EXPRESSION),
    tok(IS_KW),
    Slot::Node(Kinds::OneOf(&[CONSTANT_PATTERN, DECLARATION_PATTERN])),
];
const THROW_EXPRESSION_SHAPE: &[Slot] = &[tok(THROW_KW), Slot::Node(EXPRESSION)];

const fn is_binary_operator(kind: SyntaxKind) -> bool {
    kind.binary_expression().is_some()
}

const fn is_assignment_operator(kind: SyntaxKind) -> bool {
    kind.assignment_expression().is_some()
}

const fn is_prefix_operator(kind: SyntaxKind) -> bool {
    kind.prefix_unary_expression().is_some()
}

const ARGUMENT_LIST_SHAPE: &[Slot] = &[tok(OPEN_PAREN), separated(ARGUMENT), tok(CLOSE_PAREN)];
const BRACKETED_ARGUMENT_LIST_SHAPE: &[Slot] =
    &[tok(OPEN_BRACKET), separated(ARGUMENT), tok(CLOSE_BRACKET)];
const ARGUMENT_SHAPE: &[Slot] =
    &[opt_node(NAME_COLON), opt_tok_of(&[REF_KW, OUT_KW, IN_KW]), Slot::Node(EXPRESSION)];
const NAME_COLON_SHAPE: &[Slot] = &[node(IDENTIFIER_NAME), tok(COLON)];
const NAME_EQUALS_SHAPE: &[Slot] = &[node(IDENTIFIER_NAME), tok(EQUALS)];
const ANONYMOUS_OBJECT_MEMBER_SHAPE: &[Slot] = &[opt_node(NAME_EQUALS), Slot::Node(EXPRESSION)];
const INTERPOLATED_STRING_TEXT_SHAPE: &[Slot] = &[tok(INTERPOLATED_STRING_TEXT_TOKEN)];
const INTERPOLATION_SHAPE: &[Slot] = &[
    tok(OPEN_BRACE),
    Slot::Node(EXPRESSION),
    opt_node(INTERPOLATION_ALIGNMENT_CLAUSE),
    opt_node(INTERPOLATION_FORMAT_CLAUSE),
    tok(CLOSE_BRACE),
];
const ALIGNMENT_CLAUSE_SHAPE: &[Slot] = &[tok(COMMA), Slot::Node(EXPRESSION)];
const FORMAT_CLAUSE_SHAPE: &[Slot] = &[tok(COLON), tok(INTERPOLATED_STRING_TEXT_TOKEN)];
const SINGLE_VARIABLE_DESIGNATION_SHAPE: &[Slot] = &[tok(IDENTIFIER)];
const DECLARATION_PATTERN_SHAPE: &[Slot] = &[Slot::Node(TYPE), node(SINGLE_VARIABLE_DESIGNATION)];
const CONSTANT_PATTERN_SHAPE: &[Slot] = &[Slot::Node(EXPRESSION)];

const BLOCK_SHAPE: &[Slot] = &[tok(OPEN_BRACE), Slot::List(STATEMENT), tok(CLOSE_BRACE)];
const LOCAL_DECLARATION_SHAPE: &[Slot] = &[
    opt_tok(AWAIT_KW),
    opt_tok(USING_KW),
    MODIFIERS,
    node(VARIABLE_DECLARATION),
    tok(SEMICOLON),
];
const LOCAL_FUNCTION_SHAPE: &[Slot] = &[
    MODIFIERS,
    Slot::Node(TYPE),
    tok(IDENTIFIER),
    opt_node(TYPE_PARAMETER_LIST),
    node(PARAMETER_LIST),
    CONSTRAINTS,
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const EXPRESSION_STATEMENT_SHAPE: &[Slot] = &[Slot::Node(EXPRESSION), tok(SEMICOLON)];
const EMPTY_STATEMENT_SHAPE: &[Slot] = &[tok(SEMICOLON)];
const LABELED_STATEMENT_SHAPE: &[Slot] = &[tok(IDENTIFIER), tok(COLON), Slot::Node(STATEMENT)];
const GOTO_SHAPE: &[Slot] = &[tok(GOTO_KW), Slot::Node(EXPRESSION), tok(SEMICOLON)];
const GOTO_CASE_SHAPE: &[Slot] =
    &[tok(GOTO_KW), tok(CASE_KW), Slot::Node(EXPRESSION), tok(SEMICOLON)];
const GOTO_DEFAULT_SHAPE: &[Slot] = &[tok(GOTO_KW), tok(DEFAULT_KW), tok(SEMICOLON)];
const BREAK_SHAPE: &[Slot] = &[tok(BREAK_KW), tok(SEMICOLON)];
const CONTINUE_SHAPE: &[Slot] = &[tok(CONTINUE_KW), tok(SEMICOLON)];
const RETURN_SHAPE: &[Slot] = &[tok(RETURN_KW), Slot::OptionalNode(EXPRESSION), tok(SEMICOLON)];
const THROW_STATEMENT_SHAPE: &[Slot] =
    &[tok(THROW_KW), Slot::OptionalNode(EXPRESSION), tok(SEMICOLON)];
const YIELD_RETURN_SHAPE: &[Slot] =
    &[tok(YIELD_KW), tok(RETURN_KW), Slot::Node(EXPRESSION), tok(SEMICOLON)];
const YIELD_BREAK_SHAPE: &[Slot] = &[tok(YIELD_KW), tok(BREAK_KW), tok(SEMICOLON)];
const WHILE_SHAPE: &[Slot] = &[
    tok(WHILE_KW),
    tok(OPEN_PAREN),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const DO_SHAPE: &[Slot] = &[
    tok(DO_KW),
    Slot::Node(STATEMENT),
    tok(WHILE_KW),
    tok(OPEN_PAREN),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    tok(SEMICOLON),
];
const FOR_SHAPE: &[Slot] = &[
    tok(FOR_KW),
    tok(OPEN_PAREN),
    opt_node(VARIABLE_DECLARATION),
    Slot::SeparatedList(EXPRESSION, COMMA),
    tok(SEMICOLON),
    Slot::OptionalNode(EXPRESSION),
    tok(SEMICOLON),
    Slot::SeparatedList(EXPRESSION, COMMA),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const FOREACH_SHAPE: &[Slot] = &[
    opt_tok(AWAIT_KW),
    tok(FOREACH_KW),
    tok(OPEN_PAREN),
    Slot::Node(TYPE),
    tok(IDENTIFIER),
    tok(IN_KW),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const USING_STATEMENT_SHAPE: &[Slot] = &[
    opt_tok(AWAIT_KW),
    tok(USING_KW),
    tok(OPEN_PAREN),
    opt_node(VARIABLE_DECLARATION),
    Slot::OptionalNode(EXPRESSION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const FIXED_SHAPE: &[Slot] = &[
    tok(FIXED_KW),
    tok(OPEN_PAREN),
    node(VARIABLE_DECLARATION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const CHECKED_STATEMENT_SHAPE: &[Slot] = &[tok(CHECKED_KW), node(BLOCK)];
const UNCHECKED_STATEMENT_SHAPE: &[Slot] = &[tok(UNCHECKED_KW), node(BLOCK)];
const UNSAFE_SHAPE: &[Slot] = &[tok(UNSAFE_KW), node(BLOCK)];
const LOCK_SHAPE: &[Slot] = &[
    tok(LOCK_KW),
    tok(OPEN_PAREN),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
];
const IF_SHAPE: &[Slot] = &[
    tok(IF_KW),
    tok(OPEN_PAREN),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    Slot::Node(STATEMENT),
    opt_node(ELSE_CLAUSE),
];
const SWITCH_SHAPE: &[Slot] = &[
    tok(SWITCH_KW),
    tok(OPEN_PAREN),
    Slot::Node(EXPRESSION),
    tok(CLOSE_PAREN),
    tok(OPEN_BRACE),
    list(SWITCH_SECTION),
    tok(CLOSE_BRACE),
];
const TRY_SHAPE: &[Slot] =
    &[tok(TRY_KW), node(BLOCK), list(CATCH_CLAUSE), opt_node(FINALLY_CLAUSE)];
const VARIABLE_DECLARATION_SHAPE: &[Slot] = &[Slot::Node(TYPE), separated(VARIABLE_DECLARATOR)];
const VARIABLE_DECLARATOR_SHAPE: &[Slot] = &[
    tok(IDENTIFIER),
    opt_node(BRACKETED_ARGUMENT_LIST),
    opt_node(EQUALS_VALUE_CLAUSE),
];
const EQUALS_VALUE_CLAUSE_SHAPE: &[Slot] = &[tok(EQUALS), Slot::Node(EXPRESSION)];
const ELSE_CLAUSE_SHAPE: &[Slot] = &[tok(ELSE_KW), Slot::Node(STATEMENT)];
const SWITCH_SECTION_SHAPE: &[Slot] =
    &[list_of(&[CASE_SWITCH_LABEL, DEFAULT_SWITCH_LABEL]), Slot::List(STATEMENT)];
const CASE_LABEL_SHAPE: &[Slot] = &[tok(CASE_KW), Slot::Node(EXPRESSION), tok(COLON)];
const DEFAULT_LABEL_SHAPE: &[Slot] = &[tok(DEFAULT_KW), tok(COLON)];
const CATCH_CLAUSE_SHAPE: &[Slot] = &[
    tok(CATCH_KW),
    opt_node(CATCH_DECLARATION),
    opt_node(CATCH_FILTER_CLAUSE),
    node(BLOCK),
];
const CATCH_DECLARATION_SHAPE: &[Slot] =
    &[tok(OPEN_PAREN), Slot::Node(TYPE), opt_tok(IDENTIFIER), tok(CLOSE_PAREN)];
const CATCH_FILTER_SHAPE: &[Slot] =
    &[tok(WHEN_KW), tok(OPEN_PAREN), Slot::Node(EXPRESSION), tok(CLOSE_PAREN)];
const FINALLY_SHAPE: &[Slot] = &[tok(FINALLY_KW), node(BLOCK)];

const COMPILATION_UNIT_SHAPE: &[Slot] = &[
    list(EXTERN_ALIAS_DIRECTIVE),
    list(USING_DIRECTIVE),
    ATTRIBUTES,
    Slot::List(MEMBER),
    tok(END_OF_FILE),
];
const EXTERN_ALIAS_SHAPE: &[Slot] =
    &[tok(EXTERN_KW), tok(ALIAS_KW), tok(IDENTIFIER), tok(SEMICOLON)];
const USING_DIRECTIVE_SHAPE: &[Slot] = &[
    opt_tok(GLOBAL_KW),
    tok(USING_KW),
    opt_tok(STATIC_KW),
    opt_node(NAME_EQUALS),
    Slot::Node(TYPE),
    tok(SEMICOLON),
];
const ATTRIBUTE_LIST_SHAPE: &[Slot] = &[
    tok(OPEN_BRACKET),
    opt_node(ATTRIBUTE_TARGET_SPECIFIER),
    separated(ATTRIBUTE),
    tok(CLOSE_BRACKET),
];
const ATTRIBUTE_TARGET_SHAPE: &[Slot] =
    &[tok_of(&[IDENTIFIER, RETURN_KW, EVENT_KW]), tok(COLON)];
const ATTRIBUTE_SHAPE: &[Slot] = &[Slot::Node(NAME), opt_node(ATTRIBUTE_ARGUMENT_LIST)];
const ATTRIBUTE_ARGUMENT_LIST_SHAPE: &[Slot] =
    &[tok(OPEN_PAREN), separated(ATTRIBUTE_ARGUMENT), tok(CLOSE_PAREN)];
const ATTRIBUTE_ARGUMENT_SHAPE: &[Slot] =
    &[opt_node(NAME_EQUALS), opt_node(NAME_COLON), Slot::Node(EXPRESSION)];
const NAMESPACE_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(NAMESPACE_KW),
    Slot::Node(NAME),
    tok(OPEN_BRACE),
    list(EXTERN_ALIAS_DIRECTIVE),
    list(USING_DIRECTIVE),
    Slot::List(MEMBER),
    tok(CLOSE_BRACE),
    opt_tok(SEMICOLON),
];
const FILE_SCOPED_NAMESPACE_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(NAMESPACE_KW),
    Slot::Node(NAME),
    tok(SEMICOLON),
    list(EXTERN_ALIAS_DIRECTIVE),
    list(USING_DIRECTIVE),
    Slot::List(MEMBER),
];

macro_rules! type_declaration {
    ($($keyword:expr),+; $brace:ident) => {
        &[
            ATTRIBUTES,
            MODIFIERS,
            $($keyword,)+
            tok(IDENTIFIER),
            opt_node(TYPE_PARAMETER_LIST),
            opt_node(PARAMETER_LIST),
            opt_node(BASE_LIST),
            CONSTRAINTS,
            $brace(OPEN_BRACE),
            Slot::List(MEMBER),
            $brace(CLOSE_BRACE),
            opt_tok(SEMICOLON),
        ]
    };
}

const CLASS_SHAPE: &[Slot] = type_declaration!(tok(CLASS_KW); tok);
const STRUCT_SHAPE: &[Slot] = type_declaration!(tok(STRUCT_KW); tok);
const INTERFACE_SHAPE: &[Slot] = type_declaration!(tok(INTERFACE_KW); tok);
const RECORD_SHAPE: &[Slot] = type_declaration!(tok(RECORD_KW), opt_tok(CLASS_KW); opt_tok);
const RECORD_STRUCT_SHAPE: &[Slot] = type_declaration!(tok(RECORD_KW), tok(STRUCT_KW); opt_tok);
const ENUM_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(ENUM_KW),
    tok(IDENTIFIER),
    opt_node(BASE_LIST),
    tok(OPEN_BRACE),
    separated(ENUM_MEMBER_DECLARATION),
    tok(CLOSE_BRACE),
    opt_tok(SEMICOLON),
];
const DELEGATE_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(DELEGATE_KW),
    Slot::Node(TYPE),
    tok(IDENTIFIER),
    opt_node(TYPE_PARAMETER_LIST),
    node(PARAMETER_LIST),
    CONSTRAINTS,
    tok(SEMICOLON),
];
const ENUM_MEMBER_SHAPE: &[Slot] =
    &[ATTRIBUTES, tok(IDENTIFIER), opt_node(EQUALS_VALUE_CLAUSE)];
const FIELD_SHAPE: &[Slot] =
    &[ATTRIBUTES, MODIFIERS, node(VARIABLE_DECLARATION), tok(SEMICOLON)];
const EVENT_FIELD_SHAPE: &[Slot] =
    &[ATTRIBUTES, MODIFIERS, tok(EVENT_KW), node(VARIABLE_DECLARATION), tok(SEMICOLON)];
const METHOD_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    Slot::Node(TYPE),
    opt_node(EXPLICIT_INTERFACE_SPECIFIER),
    tok(IDENTIFIER),
    opt_node(TYPE_PARAMETER_LIST),
    node(PARAMETER_LIST),
    CONSTRAINTS,
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const OPERATOR_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    Slot::Node(TYPE),
    tok(OPERATOR_KW),
    Slot::Token(Kinds::Class(is_overloadable_operator, PLUS)),
    node(PARAMETER_LIST),
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const CONVERSION_OPERATOR_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok_of(&[IMPLICIT_KW, EXPLICIT_KW]),
    tok(OPERATOR_KW),
    Slot::Node(TYPE),
    node(PARAMETER_LIST),
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const CONSTRUCTOR_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(IDENTIFIER),
    node(PARAMETER_LIST),
    opt_node_of(&[BASE_CONSTRUCTOR_INITIALIZER, THIS_CONSTRUCTOR_INITIALIZER]),
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const DESTRUCTOR_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(TILDE),
    tok(IDENTIFIER),
    node(PARAMETER_LIST),
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const PROPERTY_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    Slot::Node(TYPE),
    opt_node(EXPLICIT_INTERFACE_SPECIFIER),
    tok(IDENTIFIER),
    opt_node(ACCESSOR_LIST),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_node(EQUALS_VALUE_CLAUSE),
    opt_tok(SEMICOLON),
];
const EVENT_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok(EVENT_KW),
    Slot::Node(TYPE),
    opt_node(EXPLICIT_INTERFACE_SPECIFIER),
    tok(IDENTIFIER),
    opt_node(ACCESSOR_LIST),
    opt_tok(SEMICOLON),
];
const INDEXER_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    Slot::Node(TYPE),
    opt_node(EXPLICIT_INTERFACE_SPECIFIER),
    tok(THIS_KW),
    node(BRACKETED_PARAMETER_LIST),
    opt_node(ACCESSOR_LIST),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const INCOMPLETE_MEMBER_SHAPE: &[Slot] = &[ATTRIBUTES, MODIFIERS, Slot::OptionalNode(TYPE)];
const BASE_LIST_SHAPE: &[Slot] =
    &[tok(COLON), separated_of(&[SIMPLE_BASE_TYPE, PRIMARY_CONSTRUCTOR_BASE_TYPE])];
const SIMPLE_BASE_TYPE_SHAPE: &[Slot] = &[Slot::Node(TYPE)];
const PRIMARY_CONSTRUCTOR_BASE_TYPE_SHAPE: &[Slot] = &[Slot::Node(TYPE), node(ARGUMENT_LIST)];
const TYPE_PARAMETER_LIST_SHAPE: &[Slot] =
    &[tok(LESS_THAN), separated(TYPE_PARAMETER), tok(GREATER_THAN)];
const TYPE_PARAMETER_SHAPE: &[Slot] =
    &[ATTRIBUTES, opt_tok_of(&[IN_KW, OUT_KW]), tok(IDENTIFIER)];
const CONSTRAINT_CLAUSE_SHAPE: &[Slot] = &[
    tok(WHERE_KW),
    node(IDENTIFIER_NAME),
    tok(COLON),
    separated_of(&[CLASS_CONSTRAINT, STRUCT_CONSTRAINT, CONSTRUCTOR_CONSTRAINT, TYPE_CONSTRAINT]),
];
const TYPE_CONSTRAINT_SHAPE: &[Slot] = &[Slot::Node(TYPE)];
const CLASS_CONSTRAINT_SHAPE: &[Slot] = &[tok(CLASS_KW), opt_tok(QUESTION)];
const STRUCT_CONSTRAINT_SHAPE: &[Slot] = &[tok(STRUCT_KW)];
const CONSTRUCTOR_CONSTRAINT_SHAPE: &[Slot] =
    &[tok(NEW_KW), tok(OPEN_PAREN), tok(CLOSE_PAREN)];
const EXPLICIT_INTERFACE_SHAPE: &[Slot] = &[Slot::Node(NAME), tok(DOT)];
const ACCESSOR_LIST_SHAPE: &[Slot] = &[
    tok(OPEN_BRACE),
    Slot::List(Kinds::Class(SyntaxKind::is_accessor_declaration, GET_ACCESSOR_DECLARATION)),
    tok(CLOSE_BRACE),
];
const ACCESSOR_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    MODIFIERS,
    tok_of(&[GET_KW, SET_KW, INIT_KW, ADD_KW, REMOVE_KW, IDENTIFIER]),
    opt_node(BLOCK),
    opt_node(ARROW_EXPRESSION_CLAUSE),
    opt_tok(SEMICOLON),
];
const ARROW_CLAUSE_SHAPE: &[Slot] = &[tok(EQUALS_GREATER_THAN), Slot::Node(EXPRESSION)];
const BASE_INITIALIZER_SHAPE: &[Slot] = &[tok(COLON), tok(BASE_KW), node(ARGUMENT_LIST)];
const THIS_INITIALIZER_SHAPE: &[Slot] = &[tok(COLON), tok(THIS_KW), node(ARGUMENT_LIST)];
const PARAMETER_LIST_SHAPE: &[Slot] =
    &[tok(OPEN_PAREN), separated(PARAMETER), tok(CLOSE_PAREN)];
const BRACKETED_PARAMETER_LIST_SHAPE: &[Slot] =
    &[tok(OPEN_BRACKET), separated(PARAMETER), tok(CLOSE_BRACKET)];
const PARAMETER_SHAPE: &[Slot] = &[
    ATTRIBUTES,
    tokens(&[REF_KW, OUT_KW, IN_KW, PARAMS_KW, THIS_KW]),
    Slot::OptionalNode(TYPE),
    tok(IDENTIFIER),
    opt_node(EQUALS_VALUE_CLAUSE),
];

const fn is_overloadable_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        PLUS | MINUS
            | EXCLAMATION
            | TILDE
            | PLUS_PLUS
            | MINUS_MINUS
            | ASTERISK
            | SLASH
            | PERCENT
            | AMPERSAND
            | BAR
            | CARET
            | LESS_THAN_LESS_THAN
            | GREATER_THAN_GREATER_THAN
            | GREATER_THAN_GREATER_THAN_GREATER_THAN
            | EQUALS_EQUALS
            | EXCLAMATION_EQUALS
            | LESS_THAN
            | GREATER_THAN
            | LESS_THAN_EQUALS
            | GREATER_THAN_EQUALS
            | TRUE_KW
            | FALSE_KW
    )
}

const XML_ELEMENT_SHAPE: &[Slot] =
    &[node(XML_ELEMENT_START_TAG), XML_CONTENT, node(XML_ELEMENT_END_TAG)];
const XML_START_TAG_SHAPE: &[Slot] =
    &[tok(LESS_THAN), node(XML_NAME), list(XML_TEXT_ATTRIBUTE), tok(GREATER_THAN)];
const XML_END_TAG_SHAPE: &[Slot] = &[tok(LESS_THAN_SLASH), node(XML_NAME), tok(GREATER_THAN)];
const XML_EMPTY_ELEMENT_SHAPE: &[Slot] =
    &[tok(LESS_THAN), node(XML_NAME), list(XML_TEXT_ATTRIBUTE), tok(SLASH_GREATER_THAN)];
const XML_NAME_SHAPE: &[Slot] = &[tok(IDENTIFIER)];
const XML_TEXT_TOKENS: &[SyntaxKind] = &[XML_TEXT_LITERAL, XML_TEXT_LITERAL_NEW_LINE];
const XML_TEXT_ATTRIBUTE_SHAPE: &[Slot] = &[
    node(XML_NAME),
    tok(EQUALS),
    tok_of(&[DOUBLE_QUOTE, SINGLE_QUOTE]),
    tokens(XML_TEXT_TOKENS),
    tok_of(&[DOUBLE_QUOTE, SINGLE_QUOTE]),
];
const XML_TEXT_SHAPE: &[Slot] = &[tokens(XML_TEXT_TOKENS)];

const SKIPPED_TOKENS_SHAPE: &[Slot] =
    &[Slot::TokenList(Kinds::Class(is_any_token, BAD_TOKEN))];
const DOCUMENTATION_COMMENT_SHAPE: &[Slot] = &[XML_CONTENT, tok(END_OF_DOCUMENTATION_COMMENT)];

macro_rules! directive {
    ($($slot:expr),*) => {
        &[tok(HASH), $($slot,)* tok(END_OF_DIRECTIVE)]
    };
}

const IF_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(IF_KW), Slot::Node(EXPRESSION));
const ELIF_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(ELIF_KW), Slot::Node(EXPRESSION));
const ELSE_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(ELSE_KW));
const END_IF_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(ENDIF_KW));
const REGION_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(REGION_KW));
const END_REGION_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(ENDREGION_KW));
const DEFINE_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(DEFINE_KW), tok(IDENTIFIER));
const UNDEF_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(UNDEF_KW), tok(IDENTIFIER));
const ERROR_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(ERROR_KW));
const WARNING_DIRECTIVE_SHAPE: &[Slot] = directive!(tok(WARNING_KW));
const LINE_DIRECTIVE_SHAPE: &[Slot] = directive!(
    tok(LINE_KW),
    tok_of(&[NUMERIC_LITERAL, DEFAULT_KW, HIDDEN_KW]),
    opt_tok(STRING_LITERAL)
);
const PRAGMA_WARNING_SHAPE: &[Slot] = directive!(
    tok(PRAGMA_KW),
    tok(WARNING_KW),
    tok_of(&[DISABLE_KW, RESTORE_KW]),
    separated_of(&[IDENTIFIER_NAME, NUMERIC_LITERAL_EXPRESSION])
);
const NULLABLE_DIRECTIVE_SHAPE: &[Slot] = directive!(
    tok(NULLABLE_KW),
    tok_of(&[ENABLE_KW, DISABLE_KW, RESTORE_KW]),
    opt_tok_of(&[WARNINGS_KW, ANNOTATIONS_KW])
);
const BAD_DIRECTIVE_SHAPE: &[Slot] = directive!(opt_tok(IDENTIFIER));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenTriviaList;

    fn token(kind: SyntaxKind, text: &str) -> GreenElement {
        GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty()).into()
    }

    fn kinds(children: &[GreenElement]) -> Vec<SyntaxKind> {
        children.iter().map(GreenElement::kind).collect()
    }

    #[test]
    fn lists_are_grouped_and_materialized() {
        let name = |text| GreenNode::new(IDENTIFIER_NAME, [token(IDENTIFIER, text)]);
        let argument = |text| GreenNode::new(ARGUMENT, [name(text).into()]).into();
        let arranged = arrange(
            ARGUMENT_LIST,
            vec![token(OPEN_PAREN, "("), argument("a"), token(COMMA, ","), argument("b")],
        )
        .unwrap_or_else(|_| panic!("argument list should arrange"));
        assert_eq!(kinds(&arranged), [OPEN_PAREN, SEPARATED_LIST, CLOSE_PAREN]);
        let NodeOrToken::Node(list) = &arranged[1] else { panic!() };
        assert_eq!(list.children().len(), 3);
        let NodeOrToken::Token(close) = &arranged[2] else { panic!() };
        assert!(close.is_missing());

        let block = arrange(BLOCK, vec![token(OPEN_BRACE, "{"), token(CLOSE_BRACE, "}")])
            .unwrap_or_else(|_| panic!("block should arrange"));
        assert_eq!(kinds(&block), [OPEN_BRACE, LIST, CLOSE_BRACE]);
    }

    #[test]
    fn optional_slots_are_left_out() {
        let missing = missing_node(RETURN_STATEMENT);
        assert_eq!(kinds(missing.children()), [RETURN_KW, SEMICOLON]);
        assert!(missing.is_missing());

        let method = missing_node(METHOD_DECLARATION);
        assert_eq!(
            kinds(method.children()),
            [LIST, LIST, IDENTIFIER_NAME, IDENTIFIER, PARAMETER_LIST, LIST]
        );
        let slots = slots_of(&method);
        assert!(slots.iter().all(Option::is_some));
        assert!(slots[0].is_some_and(Slot::is_list));
    }

    #[test]
    fn unexpected_children_are_reported() {
        let misfit = arrange(EMPTY_STATEMENT, vec![token(SEMICOLON, ";"), token(COMMA, ",")])
            .err()
            .unwrap();
        assert_eq!(kinds(&misfit.children), [SEMICOLON, COMMA]);
        assert_eq!(misfit.unexpected_kind(), COMMA);
    }
}
