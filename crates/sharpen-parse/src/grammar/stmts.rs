use sharpen_errors::ErrorCode;
use sharpen_syntax::SyntaxKind::{self, *};

use super::{exprs, items, types};
use crate::parser::{CompletedMarker, Marker, Parser};

pub(crate) fn block(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.expect(OPEN_BRACE);
    statements(p, |_| false);
    p.expect(CLOSE_BRACE);
    m.complete(p, BLOCK)
}

/// Statements up to the enclosing `}`. Tokens that cannot start a statement
/// are reported and skipped.
fn statements(p: &mut Parser, stop: fn(&Parser) -> bool) {
    while !p.at(CLOSE_BRACE) && !p.at_end() && !stop(p) {
        let start = p.position();
        if statement(p).is_none() || p.position() == start {
            p.skip_with_error(ErrorCode::InvalidExprTerm);
        }
    }
}

/// A statement in a position that requires one, such as the body of an
/// `if`. When none starts here the slot is left for a missing placeholder.
fn embedded_statement(p: &mut Parser) {
    if statement(p).is_none() {
        p.error(ErrorCode::InvalidExprTerm);
    }
}

pub(crate) fn statement(p: &mut Parser) -> Option<CompletedMarker> {
    let m = p.start();
    let kind = match p.current() {
        OPEN_BRACE => {
            m.abandon(p);
            return Some(block(p));
        }
        SEMICOLON => {
            p.bump();
            EMPTY_STATEMENT
        }
        IF_KW => {
            p.bump();
            parenthesized_condition(p);
            embedded_statement(p);
            if p.at(ELSE_KW) {
                let clause = p.start();
                p.bump();
                embedded_statement(p);
                clause.complete(p, ELSE_CLAUSE);
            }
            IF_STATEMENT
        }
        WHILE_KW | LOCK_KW => {
            let kind = if p.at(WHILE_KW) { WHILE_STATEMENT } else { LOCK_STATEMENT };
            p.bump();
            parenthesized_condition(p);
            embedded_statement(p);
            kind
        }
        DO_KW => {
            p.bump();
            embedded_statement(p);
            p.expect(WHILE_KW);
            parenthesized_condition(p);
            p.expect(SEMICOLON);
            DO_STATEMENT
        }
        FOR_KW => for_statement(p),
        FOREACH_KW => foreach_statement(p),
        SWITCH_KW => switch_statement(p),
        TRY_KW => try_statement(p),
        RETURN_KW | THROW_KW => {
            let kind = if p.at(RETURN_KW) { RETURN_STATEMENT } else { THROW_STATEMENT };
            p.bump();
            if !p.at(SEMICOLON) {
                exprs::expr(p);
            }
            p.expect(SEMICOLON);
            kind
        }
        BREAK_KW | CONTINUE_KW => {
            let kind = if p.at(BREAK_KW) { BREAK_STATEMENT } else { CONTINUE_STATEMENT };
            p.bump();
            p.expect(SEMICOLON);
            kind
        }
        GOTO_KW => goto_statement(p),
        FIXED_KW => {
            p.bump();
            p.expect(OPEN_PAREN);
            variable_declaration(p);
            p.expect(CLOSE_PAREN);
            embedded_statement(p);
            FIXED_STATEMENT
        }
        CHECKED_KW | UNCHECKED_KW | UNSAFE_KW if p.nth(1) == OPEN_BRACE => {
            let kind = match p.current() {
                CHECKED_KW => CHECKED_STATEMENT,
                UNCHECKED_KW => UNCHECKED_STATEMENT,
                _ => UNSAFE_STATEMENT,
            };
            p.bump();
            block(p);
            kind
        }
        USING_KW => using(p),
        IDENTIFIER if p.at_contextual(YIELD_KW) && matches!(p.nth(1), RETURN_KW | BREAK_KW) => {
            p.bump_remap(YIELD_KW);
            if p.eat(RETURN_KW) {
                exprs::expr(p);
                p.expect(SEMICOLON);
                YIELD_RETURN_STATEMENT
            } else {
                p.bump();
                p.expect(SEMICOLON);
                YIELD_BREAK_STATEMENT
            }
        }
        IDENTIFIER if p.at_contextual(AWAIT_KW) && p.nth(1) == FOREACH_KW => {
            p.bump_remap(AWAIT_KW);
            foreach_statement(p)
        }
        IDENTIFIER if p.at_contextual(AWAIT_KW) && p.nth(1) == USING_KW => {
            p.bump_remap(AWAIT_KW);
            using(p)
        }
        IDENTIFIER if p.nth(1) == COLON => {
            p.bump();
            p.bump();
            embedded_statement(p);
            LABELED_STATEMENT
        }
        _ => return declaration_or_expression(p, m),
    };
    Some(m.complete(p, kind))
}

fn parenthesized_condition(p: &mut Parser) {
    p.expect(OPEN_PAREN);
    exprs::expr(p);
    p.expect(CLOSE_PAREN);
}

/// Number of local modifiers at the start of a declaration.
fn local_modifiers(p: &Parser) -> usize {
    let mut n = 0;
    loop {
        match p.nth(n) {
            CONST_KW | STATIC_KW | READONLY_KW | VOLATILE_KW | EXTERN_KW => n += 1,
            UNSAFE_KW if p.nth(n + 1) != OPEN_BRACE => n += 1,
            IDENTIFIER
                if p.nth_at_contextual(n, ASYNC_KW)
                    && types::scan_type(p, n + 1).is_some_and(|end| p.nth(end) == IDENTIFIER) =>
            {
                n += 1;
            }
            _ => return n,
        }
    }
}

fn bump_modifiers(p: &mut Parser, count: usize) {
    for _ in 0..count {
        if p.at(IDENTIFIER) {
            p.bump_remap(ASYNC_KW);
        } else {
            p.bump();
        }
    }
}

fn declaration_or_expression(p: &mut Parser, m: Marker) -> Option<CompletedMarker> {
    if p.at_contextual(AWAIT_KW) && exprs::is_await(p) {
        return Some(expression_statement(p, m));
    }

    let modifiers = local_modifiers(p);
    let declaration = types::scan_type(p, modifiers)
        .filter(|&end| p.nth(end) == IDENTIFIER)
        .map(|end| p.nth(end + 1));
    match declaration {
        Some(OPEN_PAREN | LESS_THAN) => Some(local_function(p, m, modifiers)),
        Some(EQUALS | SEMICOLON | COMMA | OPEN_BRACKET) => {
            Some(local_declaration(p, m, modifiers))
        }
        Some(_) | None if modifiers > 0 => Some(local_declaration(p, m, modifiers)),
        _ if exprs::can_start_expression(p.current()) => Some(expression_statement(p, m)),
        _ => {
            m.abandon(p);
            None
        }
    }
}

fn expression_statement(p: &mut Parser, m: Marker) -> CompletedMarker {
    exprs::expr(p);
    p.expect(SEMICOLON);
    m.complete(p, EXPRESSION_STATEMENT)
}

fn local_declaration(p: &mut Parser, m: Marker, modifiers: usize) -> CompletedMarker {
    bump_modifiers(p, modifiers);
    variable_declaration(p);
    p.expect(SEMICOLON);
    m.complete(p, LOCAL_DECLARATION_STATEMENT)
}

fn local_function(p: &mut Parser, m: Marker, modifiers: usize) -> CompletedMarker {
    bump_modifiers(p, modifiers);
    types::type_(p);
    p.expect(IDENTIFIER);
    if p.at(LESS_THAN) {
        items::type_parameter_list(p);
    }
    items::parameter_list(p);
    items::constraint_clauses(p);
    items::body(p);
    m.complete(p, LOCAL_FUNCTION_STATEMENT)
}

pub(crate) fn variable_declaration(p: &mut Parser) -> CompletedMarker {
    let ty = types::type_(p);
    variable_declarators(p, ty)
}

/// Declarators following an already parsed type, which becomes the first
/// child of the declaration.
pub(crate) fn variable_declarators(p: &mut Parser, ty: CompletedMarker) -> CompletedMarker {
    let m = ty.precede(p);
    loop {
        let declarator = p.start();
        p.expect(IDENTIFIER);
        if p.at(OPEN_BRACKET) {
            exprs::bracketed_argument_list(p);
        }
        if p.at(EQUALS) {
            equals_value(p);
        }
        declarator.complete(p, VARIABLE_DECLARATOR);
        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, VARIABLE_DECLARATION)
}

pub(crate) fn equals_value(p: &mut Parser) {
    let m = p.start();
    p.bump();
    if p.at(OPEN_BRACE) {
        exprs::initializer(p, ARRAY_INITIALIZER_EXPRESSION);
    } else {
        exprs::expr(p);
    }
    m.complete(p, EQUALS_VALUE_CLAUSE);
}

/// Whether a variable declaration rather than an expression starts here.
fn at_declaration(p: &Parser) -> bool {
    types::scan_type(p, 0).is_some_and(|end| {
        p.nth(end) == IDENTIFIER && matches!(p.nth(end + 1), EQUALS | COMMA | SEMICOLON | CLOSE_PAREN)
    })
}

fn for_statement(p: &mut Parser) -> SyntaxKind {
    p.bump();
    p.expect(OPEN_PAREN);
    if at_declaration(p) {
        variable_declaration(p);
    } else if !p.at(SEMICOLON) {
        expression_list(p);
    }
    p.expect(SEMICOLON);
    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON);
    if !p.at(CLOSE_PAREN) {
        expression_list(p);
    }
    p.expect(CLOSE_PAREN);
    embedded_statement(p);
    FOR_STATEMENT
}

fn expression_list(p: &mut Parser) {
    exprs::expr(p);
    while p.eat(COMMA) {
        exprs::expr(p);
    }
}

fn foreach_statement(p: &mut Parser) -> SyntaxKind {
    p.expect(FOREACH_KW);
    p.expect(OPEN_PAREN);
    types::type_(p);
    p.expect(IDENTIFIER);
    p.expect(IN_KW);
    exprs::expr(p);
    p.expect(CLOSE_PAREN);
    embedded_statement(p);
    FOREACH_STATEMENT
}

/// `using (...)` statements and `using` local declarations.
fn using(p: &mut Parser) -> SyntaxKind {
    p.bump();
    if !p.at(OPEN_PAREN) {
        let modifiers = local_modifiers(p);
        bump_modifiers(p, modifiers);
        variable_declaration(p);
        p.expect(SEMICOLON);
        return LOCAL_DECLARATION_STATEMENT;
    }

    p.bump();
    if at_declaration(p) {
        variable_declaration(p);
    } else {
        exprs::expr(p);
    }
    p.expect(CLOSE_PAREN);
    embedded_statement(p);
    USING_STATEMENT
}

fn goto_statement(p: &mut Parser) -> SyntaxKind {
    p.bump();
    let kind = match p.current() {
        CASE_KW => {
            p.bump();
            exprs::expr(p);
            GOTO_CASE_STATEMENT
        }
        DEFAULT_KW => {
            p.bump();
            GOTO_DEFAULT_STATEMENT
        }
        _ => {
            types::identifier_name(p);
            GOTO_STATEMENT
        }
    };
    p.expect(SEMICOLON);
    kind
}

fn at_switch_label(p: &Parser) -> bool {
    p.at(CASE_KW) || (p.at(DEFAULT_KW) && p.nth(1) == COLON)
}

fn switch_statement(p: &mut Parser) -> SyntaxKind {
    p.bump();
    parenthesized_condition(p);
    p.expect(OPEN_BRACE);
    while !p.at(CLOSE_BRACE) && !p.at_end() {
        if !at_switch_label(p) {
            p.skip_with_error(ErrorCode::InvalidExprTerm);
            continue;
        }
        let section = p.start();
        while at_switch_label(p) {
            let label = p.start();
            if p.eat(CASE_KW) {
                exprs::expr(p);
                p.expect(COLON);
                label.complete(p, CASE_SWITCH_LABEL);
            } else {
                p.bump();
                p.bump();
                label.complete(p, DEFAULT_SWITCH_LABEL);
            }
        }
        statements(p, at_switch_label);
        section.complete(p, SWITCH_SECTION);
    }
    p.expect(CLOSE_BRACE);
    SWITCH_STATEMENT
}

fn try_statement(p: &mut Parser) -> SyntaxKind {
    p.bump();
    block(p);

    let mut handlers = 0;
    while p.at(CATCH_KW) {
        handlers += 1;
        let clause = p.start();
        p.bump();
        if p.at(OPEN_PAREN) {
            let declaration = p.start();
            p.bump();
            types::type_(p);
            p.eat(IDENTIFIER);
            p.expect(CLOSE_PAREN);
            declaration.complete(p, CATCH_DECLARATION);
        }
        if p.at_contextual(WHEN_KW) {
            let filter = p.start();
            p.bump_remap(WHEN_KW);
            parenthesized_condition(p);
            filter.complete(p, CATCH_FILTER_CLAUSE);
        }
        block(p);
        clause.complete(p, CATCH_CLAUSE);
    }
    if p.at(FINALLY_KW) {
        handlers += 1;
        let clause = p.start();
        p.bump();
        block(p);
        clause.complete(p, FINALLY_CLAUSE);
    }
    if handlers == 0 {
        p.error_at_previous(ErrorCode::ExpectedEndTry);
    }
    TRY_STATEMENT
}
