use sharpen_errors::ErrorCode;
use sharpen_syntax::SyntaxKind::{self, *};

use super::types::{self, scan_type, scan_type_argument_list};
use super::{delimited, exprs, stmts};
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn compilation_unit(p: &mut Parser) {
    let m = p.start();
    body_of(p, Scope::CompilationUnit);
    p.bump_eof();
    m.complete(p, COMPILATION_UNIT);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    CompilationUnit,
    Namespace,
    FileScopedNamespace,
}

/// Extern aliases, usings and members of a compilation unit or namespace.
fn body_of(p: &mut Parser, scope: Scope) {
    while p.at(EXTERN_KW) && p.nth_at_contextual(1, ALIAS_KW) {
        extern_alias(p);
    }
    while at_using_directive(p) {
        using_directive(p);
    }
    if scope == Scope::CompilationUnit {
        while at_global_attribute(p) {
            attribute_list(p);
        }
    }

    loop {
        if p.at_end() || (scope == Scope::Namespace && p.at(CLOSE_BRACE)) {
            break;
        }
        let start = p.position();
        if member_declaration(p).is_none() || p.position() == start {
            p.skip_with_error(ErrorCode::EofExpected);
        }
    }
}

fn extern_alias(p: &mut Parser) {
    let m = p.start();
    p.bump();
    p.bump_remap(ALIAS_KW);
    p.expect(IDENTIFIER);
    p.expect(SEMICOLON);
    m.complete(p, EXTERN_ALIAS_DIRECTIVE);
}

fn at_using_directive(p: &Parser) -> bool {
    (p.at(USING_KW) && p.nth(1) != OPEN_PAREN)
        || (p.at_contextual(GLOBAL_KW) && p.nth(1) == USING_KW)
}

fn using_directive(p: &mut Parser) {
    let m = p.start();
    p.eat_contextual(GLOBAL_KW);
    p.bump();
    p.eat(STATIC_KW);
    if p.at(IDENTIFIER) && p.nth(1) == EQUALS {
        exprs::name_equals(p);
    }
    types::type_(p);
    p.expect(SEMICOLON);
    m.complete(p, USING_DIRECTIVE);
}

fn at_global_attribute(p: &Parser) -> bool {
    p.at(OPEN_BRACKET)
        && p.nth(1) == IDENTIFIER
        && matches!(p.nth_text(1), "assembly" | "module")
        && p.nth(2) == COLON
}

pub(crate) fn attributes(p: &mut Parser) {
    while p.at(OPEN_BRACKET) {
        attribute_list(p);
    }
}

fn attribute_list(p: &mut Parser) {
    let m = p.start();
    p.bump();
    if matches!(p.current(), IDENTIFIER | RETURN_KW | EVENT_KW) && p.nth(1) == COLON {
        let target = p.start();
        p.bump();
        p.bump();
        target.complete(p, ATTRIBUTE_TARGET_SPECIFIER);
    }
    loop {
        attribute(p);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(CLOSE_BRACKET);
    m.complete(p, ATTRIBUTE_LIST);
}

fn attribute(p: &mut Parser) {
    let m = p.start();
    types::name(p);
    if p.at(OPEN_PAREN) {
        let arguments = p.start();
        delimited(
            p,
            OPEN_PAREN,
            CLOSE_PAREN,
            |p| exprs::can_start_expression(p.current()),
            |p| {
                let argument = p.start();
                if p.at(IDENTIFIER) && p.nth(1) == EQUALS {
                    exprs::name_equals(p);
                } else if p.at(IDENTIFIER) && p.nth(1) == COLON {
                    exprs::name_colon(p);
                }
                exprs::expr(p);
                argument.complete(p, ATTRIBUTE_ARGUMENT);
            },
        );
        arguments.complete(p, ATTRIBUTE_ARGUMENT_LIST);
    }
    m.complete(p, ATTRIBUTE);
}

/// A contextual keyword acting as a modifier, when what follows could not
/// make it the member's type or name.
fn contextual_modifier(p: &Parser) -> Option<SyntaxKind> {
    let kind = [PARTIAL_KW, ASYNC_KW, REQUIRED_KW, FILE_KW]
        .into_iter()
        .find(|&kind| p.nth_at_contextual(0, kind))?;
    let next = p.nth(1);
    let modifies = next.is_modifier()
        || matches!(
            next,
            CLASS_KW | STRUCT_KW | INTERFACE_KW | ENUM_KW | DELEGATE_KW | EVENT_KW | VOID_KW
        )
        || scan_type(p, 1).is_some_and(|end| matches!(p.nth(end), IDENTIFIER | THIS_KW | OPERATOR_KW));
    modifies.then_some(kind)
}

pub(crate) fn modifiers(p: &mut Parser) {
    loop {
        if p.current().is_modifier() {
            p.bump();
        } else if let Some(kind) = contextual_modifier(p) {
            p.bump_remap(kind);
        } else {
            break;
        }
    }
}

fn at_record(p: &Parser) -> bool {
    p.at_contextual(RECORD_KW) && matches!(p.nth(1), IDENTIFIER | CLASS_KW | STRUCT_KW)
}

fn can_start_member(p: &Parser) -> bool {
    let kind = p.current();
    kind.is_modifier()
        || kind.is_predefined_type()
        || matches!(
            kind,
            OPEN_BRACKET
                | IDENTIFIER
                | OPEN_PAREN
                | NAMESPACE_KW
                | CLASS_KW
                | STRUCT_KW
                | INTERFACE_KW
                | ENUM_KW
                | DELEGATE_KW
                | EVENT_KW
                | TILDE
                | IMPLICIT_KW
                | EXPLICIT_KW
        )
}

pub(crate) fn member_declaration(p: &mut Parser) -> Option<CompletedMarker> {
    if !can_start_member(p) {
        return None;
    }

    let m = p.start();
    attributes(p);
    modifiers(p);
    let kind = match p.current() {
        NAMESPACE_KW => namespace(p),
        CLASS_KW | STRUCT_KW | INTERFACE_KW => {
            let kind = match p.current() {
                CLASS_KW => CLASS_DECLARATION,
                STRUCT_KW => STRUCT_DECLARATION,
                _ => INTERFACE_DECLARATION,
            };
            p.bump();
            type_declaration_rest(p, false);
            kind
        }
        IDENTIFIER if at_record(p) => {
            p.bump_remap(RECORD_KW);
            let kind = if p.eat(STRUCT_KW) {
                RECORD_STRUCT_DECLARATION
            } else {
                p.eat(CLASS_KW);
                RECORD_DECLARATION
            };
            type_declaration_rest(p, true);
            kind
        }
        ENUM_KW => enum_declaration(p),
        DELEGATE_KW if p.nth(1) != ASTERISK => {
            p.bump();
            types::type_(p);
            p.expect(IDENTIFIER);
            if p.at(LESS_THAN) {
                type_parameter_list(p);
            }
            parameter_list(p);
            constraint_clauses(p);
            p.expect(SEMICOLON);
            DELEGATE_DECLARATION
        }
        EVENT_KW => event(p),
        TILDE => {
            p.bump();
            p.expect(IDENTIFIER);
            parameter_list(p);
            body(p);
            DESTRUCTOR_DECLARATION
        }
        IMPLICIT_KW | EXPLICIT_KW => {
            p.bump();
            p.expect(OPERATOR_KW);
            types::type_(p);
            parameter_list(p);
            body(p);
            CONVERSION_OPERATOR_DECLARATION
        }
        IDENTIFIER if p.nth(1) == OPEN_PAREN => constructor(p),
        kind if kind.is_predefined_type() || matches!(kind, IDENTIFIER | OPEN_PAREN | DELEGATE_KW) => {
            typed_member(p)
        }
        _ => {
            p.expected(IDENTIFIER);
            INCOMPLETE_MEMBER
        }
    };
    Some(m.complete(p, kind))
}

fn namespace(p: &mut Parser) -> SyntaxKind {
    p.bump();
    types::name(p);
    if p.eat(SEMICOLON) {
        body_of(p, Scope::FileScopedNamespace);
        return FILE_SCOPED_NAMESPACE_DECLARATION;
    }
    p.expect(OPEN_BRACE);
    body_of(p, Scope::Namespace);
    p.expect(CLOSE_BRACE);
    p.eat(SEMICOLON);
    NAMESPACE_DECLARATION
}

/// Everything after the keywords of a class, struct, interface or record.
/// Records may end in `;` instead of a body.
fn type_declaration_rest(p: &mut Parser, record: bool) {
    p.expect(IDENTIFIER);
    if p.at(LESS_THAN) {
        type_parameter_list(p);
    }
    if p.at(OPEN_PAREN) {
        parameter_list(p);
    }
    if p.at(COLON) {
        base_list(p);
    }
    constraint_clauses(p);
    if record && p.eat(SEMICOLON) {
        return;
    }

    p.expect(OPEN_BRACE);
    while !p.at(CLOSE_BRACE) && !p.at_end() {
        let start = p.position();
        if member_declaration(p).is_none() || p.position() == start {
            p.skip_with_error(ErrorCode::InvalidMemberDecl);
        }
    }
    p.expect(CLOSE_BRACE);
    p.eat(SEMICOLON);
}

fn base_list(p: &mut Parser) {
    let m = p.start();
    p.bump();
    loop {
        let base = p.start();
        types::type_(p);
        if p.at(OPEN_PAREN) {
            exprs::argument_list(p);
            base.complete(p, PRIMARY_CONSTRUCTOR_BASE_TYPE);
        } else {
            base.complete(p, SIMPLE_BASE_TYPE);
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, BASE_LIST);
}

fn enum_declaration(p: &mut Parser) -> SyntaxKind {
    p.bump();
    p.expect(IDENTIFIER);
    if p.at(COLON) {
        base_list(p);
    }
    p.expect(OPEN_BRACE);
    while !p.at(CLOSE_BRACE) && !p.at_end() {
        let member = p.start();
        attributes(p);
        p.expect(IDENTIFIER);
        if p.at(EQUALS) {
            stmts::equals_value(p);
        }
        member.complete(p, ENUM_MEMBER_DECLARATION);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(CLOSE_BRACE);
    p.eat(SEMICOLON);
    ENUM_DECLARATION
}

pub(crate) fn type_parameter_list(p: &mut Parser) {
    let m = p.start();
    p.bump();
    loop {
        let parameter = p.start();
        attributes(p);
        if matches!(p.current(), IN_KW | OUT_KW) {
            p.bump();
        }
        p.expect(IDENTIFIER);
        parameter.complete(p, TYPE_PARAMETER);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(GREATER_THAN);
    m.complete(p, TYPE_PARAMETER_LIST);
}

pub(crate) fn constraint_clauses(p: &mut Parser) {
    while p.at_contextual(WHERE_KW) {
        let m = p.start();
        p.bump_remap(WHERE_KW);
        types::identifier_name(p);
        p.expect(COLON);
        loop {
            let constraint = p.start();
            let kind = match p.current() {
                CLASS_KW => {
                    p.bump();
                    p.eat(QUESTION);
                    CLASS_CONSTRAINT
                }
                STRUCT_KW => {
                    p.bump();
                    STRUCT_CONSTRAINT
                }
                NEW_KW => {
                    p.bump();
                    p.expect(OPEN_PAREN);
                    p.expect(CLOSE_PAREN);
                    CONSTRUCTOR_CONSTRAINT
                }
                _ => {
                    types::type_(p);
                    TYPE_CONSTRAINT
                }
            };
            constraint.complete(p, kind);
            if !p.eat(COMMA) {
                break;
            }
        }
        m.complete(p, TYPE_PARAMETER_CONSTRAINT_CLAUSE);
    }
}

fn can_start_parameter(p: &Parser) -> bool {
    let kind = p.current();
    kind.is_predefined_type()
        || matches!(
            kind,
            OPEN_BRACKET | IDENTIFIER | OPEN_PAREN | REF_KW | OUT_KW | IN_KW | PARAMS_KW | THIS_KW
        )
}

pub(crate) fn parameter_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, OPEN_PAREN, CLOSE_PAREN, can_start_parameter, parameter);
    m.complete(p, PARAMETER_LIST);
}

fn bracketed_parameter_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, OPEN_BRACKET, CLOSE_BRACKET, can_start_parameter, parameter);
    m.complete(p, BRACKETED_PARAMETER_LIST);
}

fn parameter(p: &mut Parser) {
    let m = p.start();
    attributes(p);
    while matches!(p.current(), REF_KW | OUT_KW | IN_KW | PARAMS_KW | THIS_KW) {
        p.bump();
    }
    // Lambda parameters may leave out the type.
    let untyped = p.at(IDENTIFIER)
        && matches!(p.nth(1), COMMA | CLOSE_PAREN | CLOSE_BRACKET | EQUALS);
    if !untyped {
        types::type_(p);
    }
    p.expect(IDENTIFIER);
    if p.at(EQUALS) {
        stmts::equals_value(p);
    }
    m.complete(p, PARAMETER);
}

/// A block, an expression body with its `;`, or a lone `;`.
pub(crate) fn body(p: &mut Parser) {
    match p.current() {
        OPEN_BRACE => {
            stmts::block(p);
        }
        EQUALS_GREATER_THAN => {
            arrow_clause(p);
            p.expect(SEMICOLON);
        }
        _ => {
            p.expect(SEMICOLON);
        }
    }
}

fn arrow_clause(p: &mut Parser) {
    let m = p.start();
    p.bump();
    exprs::expr(p);
    m.complete(p, ARROW_EXPRESSION_CLAUSE);
}

fn constructor(p: &mut Parser) -> SyntaxKind {
    p.bump();
    parameter_list(p);
    if p.at(COLON) {
        let m = p.start();
        p.bump();
        let kind = if p.at(THIS_KW) {
            THIS_CONSTRUCTOR_INITIALIZER
        } else {
            BASE_CONSTRUCTOR_INITIALIZER
        };
        p.expect(if kind == THIS_CONSTRUCTOR_INITIALIZER { THIS_KW } else { BASE_KW });
        exprs::argument_list(p);
        m.complete(p, kind);
    }
    body(p);
    CONSTRUCTOR_DECLARATION
}

fn event(p: &mut Parser) -> SyntaxKind {
    p.bump();
    let ty = types::type_(p);
    let segments = explicit_interface_segments(p);
    if segments > 0 || (p.at(IDENTIFIER) && p.nth(1) == OPEN_BRACE) {
        if segments > 0 {
            explicit_interface_specifier(p, segments);
        }
        p.expect(IDENTIFIER);
        if p.at(OPEN_BRACE) {
            accessor_list(p);
        } else {
            p.expect(SEMICOLON);
        }
        return EVENT_DECLARATION;
    }
    stmts::variable_declarators(p, ty);
    p.expect(SEMICOLON);
    EVENT_FIELD_DECLARATION
}

fn is_overloadable_operator(kind: SyntaxKind) -> bool {
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

/// Fields, methods, properties, indexers and operators all start with a
/// type.
fn typed_member(p: &mut Parser) -> SyntaxKind {
    let ty = types::type_(p);

    if p.eat(OPERATOR_KW) {
        let (op, count) = exprs::operator(p);
        if is_overloadable_operator(op) {
            p.bump_compound(op, count);
        } else {
            p.expected(PLUS);
            p.missing(PLUS);
        }
        parameter_list(p);
        body(p);
        return OPERATOR_DECLARATION;
    }

    let segments = explicit_interface_segments(p);
    if segments > 0 {
        explicit_interface_specifier(p, segments);
    }
    if p.at(THIS_KW) {
        p.bump();
        bracketed_parameter_list(p);
        property_body(p, false);
        return INDEXER_DECLARATION;
    }
    if !p.at(IDENTIFIER) {
        p.expected(IDENTIFIER);
        return if segments > 0 { property_missing_name(p) } else { INCOMPLETE_MEMBER };
    }

    match p.nth(1) {
        OPEN_PAREN | LESS_THAN => {
            p.bump();
            if p.at(LESS_THAN) {
                type_parameter_list(p);
            }
            parameter_list(p);
            constraint_clauses(p);
            body(p);
            METHOD_DECLARATION
        }
        OPEN_BRACE | EQUALS_GREATER_THAN => {
            p.bump();
            property_body(p, true);
            PROPERTY_DECLARATION
        }
        _ if segments > 0 => {
            p.bump();
            property_body(p, true);
            PROPERTY_DECLARATION
        }
        _ => {
            stmts::variable_declarators(p, ty);
            p.expect(SEMICOLON);
            FIELD_DECLARATION
        }
    }
}

/// An explicit interface member whose name is missing reads as a property.
fn property_missing_name(p: &mut Parser) -> SyntaxKind {
    p.missing(IDENTIFIER);
    property_body(p, true);
    PROPERTY_DECLARATION
}

/// Accessors or an expression body, with an initializer for properties.
fn property_body(p: &mut Parser, initializer: bool) {
    if p.at(OPEN_BRACE) {
        accessor_list(p);
        if initializer && p.at(EQUALS) {
            stmts::equals_value(p);
            p.expect(SEMICOLON);
        }
    } else if p.at(EQUALS_GREATER_THAN) {
        arrow_clause(p);
        p.expect(SEMICOLON);
    } else {
        let m = p.start();
        p.expect(OPEN_BRACE);
        p.missing(CLOSE_BRACE);
        m.complete(p, ACCESSOR_LIST);
    }
}

/// Number of `Name.` segments ahead that qualify the member name.
fn explicit_interface_segments(p: &Parser) -> usize {
    let mut n = 0;
    let mut segments = 0;
    loop {
        if p.nth(n) != IDENTIFIER {
            return 0;
        }
        n += 1;
        if p.nth(n) == LESS_THAN {
            match scan_type_argument_list(p, n) {
                Some(end) => n = end,
                None => return 0,
            }
        }
        if p.nth(n) != DOT {
            return segments;
        }
        segments += 1;
        n += 1;
        if p.nth(n) == THIS_KW {
            return segments;
        }
    }
}

fn explicit_interface_specifier(p: &mut Parser, segments: usize) {
    let m = p.start();
    let mut name = types::simple_name(p, false);
    for _ in 1..segments {
        let qualified = name.precede(p);
        p.bump();
        types::simple_name(p, false);
        name = qualified.complete(p, QUALIFIED_NAME);
    }
    p.expect(DOT);
    m.complete(p, EXPLICIT_INTERFACE_SPECIFIER);
}

fn accessor_list(p: &mut Parser) {
    let m = p.start();
    p.bump();
    while !p.at(CLOSE_BRACE) && !p.at_end() {
        if !accessor(p) {
            p.skip_with_error(ErrorCode::InvalidMemberDecl);
        }
    }
    p.expect(CLOSE_BRACE);
    m.complete(p, ACCESSOR_LIST);
}

fn accessor(p: &mut Parser) -> bool {
    if !(p.at(OPEN_BRACKET) || p.at(IDENTIFIER) || p.current().is_modifier()) {
        return false;
    }

    let m = p.start();
    attributes(p);
    while p.current().is_modifier() {
        p.bump();
    }
    let keyword = [
        (GET_KW, GET_ACCESSOR_DECLARATION),
        (SET_KW, SET_ACCESSOR_DECLARATION),
        (INIT_KW, INIT_ACCESSOR_DECLARATION),
        (ADD_KW, ADD_ACCESSOR_DECLARATION),
        (REMOVE_KW, REMOVE_ACCESSOR_DECLARATION),
    ]
    .into_iter()
    .find(|&(keyword, _)| p.at_contextual(keyword));
    let kind = match keyword {
        Some((keyword, kind)) => {
            p.bump_remap(keyword);
            kind
        }
        None => {
            p.expected(GET_KW);
            p.eat(IDENTIFIER);
            UNKNOWN_ACCESSOR_DECLARATION
        }
    };
    body(p);
    m.complete(p, kind);
    true
}
