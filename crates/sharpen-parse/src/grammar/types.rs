//! Types and names, plus lookahead scans that recognize a type without
//! consuming anything.

use sharpen_errors::ErrorCode;
use sharpen_syntax::SyntaxKind::*;

use super::exprs;
use crate::parser::{CompletedMarker, Parser};

/// Where a type appears. After `is`/`as` a `?` may start a conditional
/// instead, and after `new` brackets belong to the array creation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeMode {
    Normal,
    Expression,
    Creation,
}

pub(crate) fn type_(p: &mut Parser) -> CompletedMarker {
    type_with(p, TypeMode::Normal)
}

pub(crate) fn type_with(p: &mut Parser, mode: TypeMode) -> CompletedMarker {
    let mut ty = match p.current() {
        kind if kind.is_predefined_type() => predefined_type(p),
        IDENTIFIER => name(p),
        OPEN_PAREN => tuple_type(p),
        DELEGATE_KW if p.nth(1) == ASTERISK => function_pointer_type(p),
        _ => {
            let m = p.start();
            p.error(ErrorCode::TypeExpected);
            p.missing(IDENTIFIER);
            m.complete(p, IDENTIFIER_NAME)
        }
    };

    loop {
        ty = match p.current() {
            QUESTION if mode != TypeMode::Expression || !nullable_is_conditional(p) => {
                let m = ty.precede(p);
                p.bump();
                m.complete(p, NULLABLE_TYPE)
            }
            ASTERISK if mode == TypeMode::Normal => {
                let m = ty.precede(p);
                p.bump();
                m.complete(p, POINTER_TYPE)
            }
            OPEN_BRACKET
                if mode != TypeMode::Creation && matches!(p.nth(1), CLOSE_BRACKET | COMMA) =>
            {
                let m = ty.precede(p);
                while p.at(OPEN_BRACKET) {
                    rank_specifier(p, false);
                }
                m.complete(p, ARRAY_TYPE)
            }
            _ => return ty,
        };
    }
}

/// `x is T ? a : b` reads the `?` as a conditional.
fn nullable_is_conditional(p: &Parser) -> bool {
    exprs::can_start_expression(p.nth(1))
}

pub(crate) fn predefined_type(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    m.complete(p, PREDEFINED_TYPE)
}

/// `[`, sizes or omitted sizes separated by commas, `]`.
pub(crate) fn rank_specifier(p: &mut Parser, sizes: bool) {
    let m = p.start();
    p.bump();
    loop {
        if sizes && exprs::can_start_expression(p.current()) {
            exprs::expr(p);
        } else {
            let omitted = p.start();
            omitted.complete(p, OMITTED_ARRAY_SIZE_EXPRESSION);
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(CLOSE_BRACKET);
    m.complete(p, ARRAY_RANK_SPECIFIER);
}

fn tuple_type(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    loop {
        let element = p.start();
        type_(p);
        p.eat(IDENTIFIER);
        element.complete(p, TUPLE_ELEMENT);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(CLOSE_PAREN);
    m.complete(p, TUPLE_TYPE)
}

fn function_pointer_type(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.bump();

    let list = p.start();
    p.expect(LESS_THAN);
    loop {
        let parameter = p.start();
        while matches!(p.current(), REF_KW | OUT_KW | IN_KW) {
            p.bump();
        }
        type_(p);
        parameter.complete(p, FUNCTION_POINTER_PARAMETER);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(GREATER_THAN);
    list.complete(p, FUNCTION_POINTER_PARAMETER_LIST);

    m.complete(p, FUNCTION_POINTER_TYPE)
}

/// A possibly qualified name in type position.
pub(crate) fn name(p: &mut Parser) -> CompletedMarker {
    let mut name = if p.at(IDENTIFIER) && p.nth(1) == COLON_COLON {
        alias_qualified_name(p, false)
    } else {
        simple_name(p, false)
    };
    while p.at(DOT) && p.nth(1) == IDENTIFIER {
        let m = name.precede(p);
        p.bump();
        simple_name(p, false);
        name = m.complete(p, QUALIFIED_NAME);
    }
    name
}

pub(crate) fn alias_qualified_name(p: &mut Parser, in_expression: bool) -> CompletedMarker {
    let m = p.start();
    identifier_name(p);
    p.bump();
    simple_name(p, in_expression);
    m.complete(p, ALIAS_QUALIFIED_NAME)
}

pub(crate) fn identifier_name(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.expect(IDENTIFIER);
    m.complete(p, IDENTIFIER_NAME)
}

/// An identifier, generic when type arguments follow. Inside expressions
/// `<` only opens type arguments when the token after the closing `>`
/// could not continue a comparison.
pub(crate) fn simple_name(p: &mut Parser, in_expression: bool) -> CompletedMarker {
    let m = p.start();
    p.expect(IDENTIFIER);
    if p.at(LESS_THAN) && scan_generic(p, in_expression) {
        type_argument_list(p);
        return m.complete(p, GENERIC_NAME);
    }
    m.complete(p, IDENTIFIER_NAME)
}

fn scan_generic(p: &Parser, in_expression: bool) -> bool {
    let Some(end) = scan_type_argument_list(p, 0) else {
        return false;
    };
    !in_expression
        || matches!(
            p.nth(end),
            OPEN_PAREN
                | CLOSE_PAREN
                | CLOSE_BRACKET
                | CLOSE_BRACE
                | COLON
                | SEMICOLON
                | COMMA
                | DOT
                | QUESTION
                | EQUALS_EQUALS
                | EXCLAMATION_EQUALS
                | BAR
                | CARET
                | AMPERSAND_AMPERSAND
                | BAR_BAR
                | AMPERSAND
                | OPEN_BRACKET
                | END_OF_FILE
        )
}

fn type_argument_list(p: &mut Parser) {
    let m = p.start();
    p.bump();
    loop {
        if matches!(p.current(), COMMA | GREATER_THAN) {
            let omitted = p.start();
            omitted.complete(p, OMITTED_TYPE_ARGUMENT);
        } else {
            type_(p);
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(GREATER_THAN);
    m.complete(p, TYPE_ARGUMENT_LIST);
}

/// Index just past a type starting at token `n`, if the tokens there read
/// as one.
pub(crate) fn scan_type(p: &Parser, n: usize) -> Option<usize> {
    let mut n = match p.nth(n) {
        kind if kind.is_predefined_type() => n + 1,
        IDENTIFIER => scan_name(p, n)?,
        OPEN_PAREN => scan_tuple_type(p, n)?,
        DELEGATE_KW if p.nth(n + 1) == ASTERISK => scan_function_pointer(p, n)?,
        _ => return None,
    };
    loop {
        match p.nth(n) {
            QUESTION | ASTERISK => n += 1,
            OPEN_BRACKET => {
                let mut close = n + 1;
                while p.nth(close) == COMMA {
                    close += 1;
                }
                if p.nth(close) != CLOSE_BRACKET {
                    return Some(n);
                }
                n = close + 1;
            }
            _ => return Some(n),
        }
    }
}

fn scan_name(p: &Parser, mut n: usize) -> Option<usize> {
    if p.nth(n + 1) == COLON_COLON {
        n += 2;
        if p.nth(n) != IDENTIFIER {
            return None;
        }
    }
    loop {
        n += 1;
        if p.nth(n) == LESS_THAN
            && let Some(end) = scan_type_argument_list(p, n)
        {
            n = end;
        }
        if p.nth(n) == DOT && p.nth(n + 1) == IDENTIFIER {
            n += 1;
            continue;
        }
        return Some(n);
    }
}

/// Index just past the `>` closing type arguments that open at `n`.
pub(crate) fn scan_type_argument_list(p: &Parser, n: usize) -> Option<usize> {
    let mut n = n + 1;
    loop {
        if !matches!(p.nth(n), COMMA | GREATER_THAN) {
            n = scan_type(p, n)?;
        }
        match p.nth(n) {
            COMMA => n += 1,
            GREATER_THAN => return Some(n + 1),
            _ => return None,
        }
    }
}

fn scan_tuple_type(p: &Parser, n: usize) -> Option<usize> {
    let mut n = n + 1;
    let mut elements = 0;
    loop {
        n = scan_type(p, n)?;
        if p.nth(n) == IDENTIFIER {
            n += 1;
        }
        elements += 1;
        match p.nth(n) {
            COMMA => n += 1,
            CLOSE_PAREN if elements > 1 => return Some(n + 1),
            _ => return None,
        }
    }
}

fn scan_function_pointer(p: &Parser, n: usize) -> Option<usize> {
    let mut n = n + 2;
    if p.nth(n) != LESS_THAN {
        return None;
    }
    let mut depth = 0usize;
    loop {
        match p.nth(n) {
            LESS_THAN => depth += 1,
            GREATER_THAN => {
                depth -= 1;
                if depth == 0 {
                    return Some(n + 1);
                }
            }
            SEMICOLON | OPEN_BRACE | CLOSE_BRACE | END_OF_FILE => return None,
            _ => {}
        }
        n += 1;
    }
}
