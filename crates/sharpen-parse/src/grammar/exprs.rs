use sharpen_errors::ErrorCode;
use sharpen_syntax::SyntaxKind::{self, *};

use super::types::{self, TypeMode};
use super::{delimited, items, stmts};
use crate::parser::{CompletedMarker, Marker, Parser};

/// Whether a token of `kind` can begin an expression.
pub(crate) fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.prefix_unary_expression().is_some()
        || kind.is_predefined_type()
        || matches!(
            kind,
            IDENTIFIER
                | NUMERIC_LITERAL
                | STRING_LITERAL
                | CHARACTER_LITERAL
                | INTERPOLATED_STRING_START
                | INTERPOLATED_VERBATIM_STRING_START
                | TRUE_KW
                | FALSE_KW
                | NULL_KW
                | DEFAULT_KW
                | THIS_KW
                | BASE_KW
                | TYPEOF_KW
                | SIZEOF_KW
                | CHECKED_KW
                | UNCHECKED_KW
                | NEW_KW
                | STACKALLOC_KW
                | DELEGATE_KW
                | THROW_KW
                | OPEN_PAREN
                | DOT_DOT
        )
}

/// The operator at the current token. Adjacent `>` and `>=` tokens join
/// into shifts here, since the lexer cannot tell them from closing type
/// arguments.
pub(crate) fn operator(p: &Parser) -> (SyntaxKind, usize) {
    if p.at(GREATER_THAN) && p.is_adjacent(0) {
        match p.nth(1) {
            GREATER_THAN_EQUALS => return (GREATER_THAN_GREATER_THAN_EQUALS, 2),
            GREATER_THAN if p.is_adjacent(1) && p.nth(2) == GREATER_THAN_EQUALS => {
                return (GREATER_THAN_GREATER_THAN_GREATER_THAN_EQUALS, 3);
            }
            GREATER_THAN if p.is_adjacent(1) && p.nth(2) == GREATER_THAN => {
                return (GREATER_THAN_GREATER_THAN_GREATER_THAN, 3);
            }
            GREATER_THAN => return (GREATER_THAN_GREATER_THAN, 2),
            _ => {}
        }
    }
    (p.current(), 1)
}

pub(crate) fn expr(p: &mut Parser) -> CompletedMarker {
    if let Some(lambda) = lambda(p) {
        return lambda;
    }
    if p.at(THROW_KW) {
        return throw_expr(p);
    }

    let lhs = conditional(p);
    let (op, count) = operator(p);
    let Some(kind) = op.assignment_expression() else {
        return lhs;
    };
    let m = lhs.precede(p);
    p.bump_compound(op, count);
    expr(p);
    m.complete(p, kind)
}

fn throw_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    expr(p);
    m.complete(p, THROW_EXPRESSION)
}

fn conditional(p: &mut Parser) -> CompletedMarker {
    let condition = binary(p, 1);
    if !p.at(QUESTION) {
        return condition;
    }
    let m = condition.precede(p);
    p.bump();
    expr(p);
    p.expect(COLON);
    expr(p);
    m.complete(p, CONDITIONAL_EXPRESSION)
}

fn precedence(op: SyntaxKind) -> u8 {
    match op {
        QUESTION_QUESTION => 1,
        BAR_BAR => 2,
        AMPERSAND_AMPERSAND => 3,
        BAR => 4,
        CARET => 5,
        AMPERSAND => 6,
        EQUALS_EQUALS | EXCLAMATION_EQUALS => 7,
        LESS_THAN | GREATER_THAN | LESS_THAN_EQUALS | GREATER_THAN_EQUALS | IS_KW | AS_KW => 8,
        LESS_THAN_LESS_THAN
        | GREATER_THAN_GREATER_THAN
        | GREATER_THAN_GREATER_THAN_GREATER_THAN => 9,
        PLUS | MINUS => 10,
        _ => 11,
    }
}

fn binary(p: &mut Parser, min_precedence: u8) -> CompletedMarker {
    let mut lhs = range(p);

    loop {
        let (op, count) = operator(p);
        let Some(kind) = op.binary_expression() else {
            break;
        };
        let precedence = precedence(op);
        if precedence < min_precedence {
            break;
        }

        let m = lhs.precede(p);
        lhs = match op {
            IS_KW => {
                p.bump();
                is_rhs(p, m)
            }
            AS_KW => {
                p.bump();
                types::type_with(p, TypeMode::Expression);
                m.complete(p, kind)
            }
            _ => {
                p.bump_compound(op, count);
                // `??` groups to the right.
                let next = if op == QUESTION_QUESTION { precedence } else { precedence + 1 };
                binary(p, next);
                m.complete(p, kind)
            }
        };
    }

    lhs
}

fn is_rhs(p: &mut Parser, m: Marker) -> CompletedMarker {
    let scanned = types::scan_type(p, 0);
    if let Some(end) = scanned
        && p.nth(end) == IDENTIFIER
        && p.nth(end - 1) != QUESTION
        && !p.nth_at_contextual(end, WHEN_KW)
    {
        let pattern = p.start();
        types::type_(p);
        single_variable_designation(p);
        pattern.complete(p, DECLARATION_PATTERN);
        return m.complete(p, IS_PATTERN_EXPRESSION);
    }
    if scanned.is_some() {
        types::type_with(p, TypeMode::Expression);
        return m.complete(p, IS_EXPRESSION);
    }

    let pattern = p.start();
    binary(p, precedence(LESS_THAN_LESS_THAN));
    pattern.complete(p, CONSTANT_PATTERN);
    m.complete(p, IS_PATTERN_EXPRESSION)
}

fn single_variable_designation(p: &mut Parser) {
    let m = p.start();
    p.expect(IDENTIFIER);
    m.complete(p, SINGLE_VARIABLE_DESIGNATION);
}

fn range(p: &mut Parser) -> CompletedMarker {
    let m = if p.at(DOT_DOT) {
        p.start()
    } else {
        let lhs = with_expr(p);
        if !p.at(DOT_DOT) {
            return lhs;
        }
        lhs.precede(p)
    };
    p.bump();
    if can_start_expression(p.current()) {
        unary(p);
    }
    m.complete(p, RANGE_EXPRESSION)
}

fn with_expr(p: &mut Parser) -> CompletedMarker {
    let mut lhs = unary(p);
    while p.at_contextual(WITH_KW) && p.nth(1) == OPEN_BRACE {
        let m = lhs.precede(p);
        p.bump_remap(WITH_KW);
        initializer(p, WITH_INITIALIZER_EXPRESSION);
        lhs = m.complete(p, WITH_EXPRESSION);
    }
    lhs
}

pub(crate) fn unary(p: &mut Parser) -> CompletedMarker {
    if let Some(kind) = p.current().prefix_unary_expression() {
        let m = p.start();
        p.bump();
        unary(p);
        return m.complete(p, kind);
    }
    if p.at_contextual(AWAIT_KW) && is_await(p) {
        let m = p.start();
        p.bump_remap(AWAIT_KW);
        unary(p);
        return m.complete(p, AWAIT_EXPRESSION);
    }
    if p.at(OPEN_PAREN) && is_cast(p) {
        let m = p.start();
        p.bump();
        types::type_(p);
        p.expect(CLOSE_PAREN);
        unary(p);
        return m.complete(p, CAST_EXPRESSION);
    }

    let lhs = primary(p);
    postfix(p, lhs)
}

/// `await` followed by an operand; otherwise it is a plain identifier.
pub(crate) fn is_await(p: &Parser) -> bool {
    let next = p.nth(1);
    can_start_expression(next)
        && next.binary_expression().is_none()
        && !matches!(next, PLUS_PLUS | MINUS_MINUS | OPEN_BRACKET)
}

fn is_cast(p: &Parser) -> bool {
    let Some(end) = types::scan_type(p, 1) else {
        return false;
    };
    if p.nth(end) != CLOSE_PAREN {
        return false;
    }
    let next = p.nth(end + 1);
    if p.nth(1).is_predefined_type() {
        return can_start_expression(next);
    }
    match next {
        IDENTIFIER | NUMERIC_LITERAL | STRING_LITERAL | CHARACTER_LITERAL | OPEN_PAREN
        | EXCLAMATION | TILDE | INTERPOLATED_STRING_START | INTERPOLATED_VERBATIM_STRING_START => {
            true
        }
        kind => kind.is_keyword() && can_start_expression(kind) && kind != THROW_KW,
    }
}

fn primary(p: &mut Parser) -> CompletedMarker {
    let kind = p.current();
    if let Some(literal) = kind.literal_expression()
        && !(kind == DEFAULT_KW && p.nth(1) == OPEN_PAREN)
    {
        let m = p.start();
        p.bump();
        return m.complete(p, literal);
    }

    match kind {
        THIS_KW | BASE_KW => {
            let m = p.start();
            p.bump();
            m.complete(p, if kind == THIS_KW { THIS_EXPRESSION } else { BASE_EXPRESSION })
        }
        DEFAULT_KW => parenthesized_type(p, DEFAULT_EXPRESSION),
        TYPEOF_KW => parenthesized_type(p, TYPEOF_EXPRESSION),
        SIZEOF_KW => parenthesized_type(p, SIZEOF_EXPRESSION),
        CHECKED_KW | UNCHECKED_KW => {
            let m = p.start();
            p.bump();
            p.expect(OPEN_PAREN);
            expr(p);
            p.expect(CLOSE_PAREN);
            m.complete(p, if kind == CHECKED_KW { CHECKED_EXPRESSION } else { UNCHECKED_EXPRESSION })
        }
        NEW_KW => creation(p),
        STACKALLOC_KW => stackalloc(p),
        DELEGATE_KW => {
            let m = p.start();
            anonymous_method(p, m)
        }
        INTERPOLATED_STRING_START | INTERPOLATED_VERBATIM_STRING_START => interpolated_string(p),
        OPEN_PAREN => parenthesized_or_tuple(p),
        THROW_KW => throw_expr(p),
        kind if kind.is_predefined_type() => types::predefined_type(p),
        IDENTIFIER if p.nth(1) == COLON_COLON => types::alias_qualified_name(p, true),
        IDENTIFIER => types::simple_name(p, true),
        _ => missing_expression(p),
    }
}

/// Reports the current token and stands in a missing name for the operand.
fn missing_expression(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.error(ErrorCode::InvalidExprTerm);
    p.missing(IDENTIFIER);
    m.complete(p, IDENTIFIER_NAME)
}

fn parenthesized_type(p: &mut Parser, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.expect(OPEN_PAREN);
    types::type_(p);
    p.expect(CLOSE_PAREN);
    m.complete(p, kind)
}

fn postfix(p: &mut Parser, mut lhs: CompletedMarker) -> CompletedMarker {
    loop {
        lhs = match p.current() {
            OPEN_PAREN => {
                let m = lhs.precede(p);
                argument_list(p);
                m.complete(p, INVOCATION_EXPRESSION)
            }
            OPEN_BRACKET => {
                let m = lhs.precede(p);
                bracketed_argument_list(p);
                m.complete(p, ELEMENT_ACCESS_EXPRESSION)
            }
            DOT | MINUS_GREATER_THAN => {
                let kind = if p.at(DOT) {
                    SIMPLE_MEMBER_ACCESS_EXPRESSION
                } else {
                    POINTER_MEMBER_ACCESS_EXPRESSION
                };
                let m = lhs.precede(p);
                p.bump();
                types::simple_name(p, true);
                m.complete(p, kind)
            }
            PLUS_PLUS | MINUS_MINUS | EXCLAMATION => {
                let kind = match p.current() {
                    PLUS_PLUS => POST_INCREMENT_EXPRESSION,
                    MINUS_MINUS => POST_DECREMENT_EXPRESSION,
                    _ => SUPPRESS_NULLABLE_WARNING_EXPRESSION,
                };
                let m = lhs.precede(p);
                p.bump();
                m.complete(p, kind)
            }
            QUESTION if matches!(p.nth(1), DOT | OPEN_BRACKET) => {
                let m = lhs.precede(p);
                p.bump();
                let binding = p.start();
                let binding = if p.at(DOT) {
                    p.bump();
                    types::simple_name(p, true);
                    binding.complete(p, MEMBER_BINDING_EXPRESSION)
                } else {
                    bracketed_argument_list(p);
                    binding.complete(p, ELEMENT_BINDING_EXPRESSION)
                };
                postfix(p, binding);
                m.complete(p, CONDITIONAL_ACCESS_EXPRESSION)
            }
            _ => return lhs,
        };
    }
}

fn can_start_argument(p: &Parser) -> bool {
    can_start_expression(p.current()) || matches!(p.current(), REF_KW | OUT_KW | IN_KW)
}

pub(crate) fn argument_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, OPEN_PAREN, CLOSE_PAREN, can_start_argument, argument);
    m.complete(p, ARGUMENT_LIST);
}

pub(crate) fn bracketed_argument_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, OPEN_BRACKET, CLOSE_BRACKET, can_start_argument, argument);
    m.complete(p, BRACKETED_ARGUMENT_LIST);
}

fn argument(p: &mut Parser) {
    let m = p.start();
    if p.at(IDENTIFIER) && p.nth(1) == COLON {
        name_colon(p);
    }
    let modifier = p.current();
    if matches!(modifier, REF_KW | OUT_KW | IN_KW) {
        p.bump();
    }
    if modifier == OUT_KW
        && let Some(end) = types::scan_type(p, 0)
        && p.nth(end) == IDENTIFIER
    {
        let declaration = p.start();
        types::type_(p);
        single_variable_designation(p);
        declaration.complete(p, DECLARATION_EXPRESSION);
    } else {
        expr(p);
    }
    m.complete(p, ARGUMENT);
}

pub(crate) fn name_colon(p: &mut Parser) {
    let m = p.start();
    types::identifier_name(p);
    p.expect(COLON);
    m.complete(p, NAME_COLON);
}

pub(crate) fn name_equals(p: &mut Parser) {
    let m = p.start();
    types::identifier_name(p);
    p.expect(EQUALS);
    m.complete(p, NAME_EQUALS);
}

fn parenthesized_or_tuple(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();

    let named = p.at(IDENTIFIER) && p.nth(1) == COLON;
    let first = p.start();
    if named {
        name_colon(p);
    }
    expr(p);

    if !named && !p.at(COMMA) {
        first.abandon(p);
        p.expect(CLOSE_PAREN);
        return m.complete(p, PARENTHESIZED_EXPRESSION);
    }

    first.complete(p, ARGUMENT);
    while p.eat(COMMA) {
        argument(p);
    }
    p.expect(CLOSE_PAREN);
    m.complete(p, TUPLE_EXPRESSION)
}

/// Index of the `)` matching the `(` at `n`.
fn matching_paren(p: &Parser, n: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut n = n;
    loop {
        match p.nth(n) {
            OPEN_PAREN => depth += 1,
            CLOSE_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(n);
                }
            }
            SEMICOLON | OPEN_BRACE | CLOSE_BRACE | END_OF_FILE => return None,
            _ => {}
        }
        n += 1;
    }
}

/// Lambdas and `async`/`static` anonymous methods.
fn lambda(p: &mut Parser) -> Option<CompletedMarker> {
    let mut n = 0;
    while (p.nth(n) == STATIC_KW || p.nth_at_contextual(n, ASYNC_KW))
        && p.nth(n + 1) != EQUALS_GREATER_THAN
    {
        n += 1;
    }

    let kind = match p.nth(n) {
        IDENTIFIER if p.nth(n + 1) == EQUALS_GREATER_THAN => SIMPLE_LAMBDA_EXPRESSION,
        OPEN_PAREN
            if matching_paren(p, n).is_some_and(|close| p.nth(close + 1) == EQUALS_GREATER_THAN) =>
        {
            PARENTHESIZED_LAMBDA_EXPRESSION
        }
        DELEGATE_KW if n > 0 => ANONYMOUS_METHOD_EXPRESSION,
        _ => return None,
    };

    let m = p.start();
    for _ in 0..n {
        if p.at(STATIC_KW) {
            p.bump();
        } else {
            p.bump_remap(ASYNC_KW);
        }
    }
    Some(match kind {
        SIMPLE_LAMBDA_EXPRESSION => {
            let parameter = p.start();
            p.bump();
            parameter.complete(p, PARAMETER);
            lambda_body(p);
            m.complete(p, kind)
        }
        PARENTHESIZED_LAMBDA_EXPRESSION => {
            items::parameter_list(p);
            lambda_body(p);
            m.complete(p, kind)
        }
        _ => anonymous_method(p, m),
    })
}

fn lambda_body(p: &mut Parser) {
    p.expect(EQUALS_GREATER_THAN);
    if p.at(OPEN_BRACE) {
        stmts::block(p);
    } else {
        expr(p);
    }
}

fn anonymous_method(p: &mut Parser, m: Marker) -> CompletedMarker {
    p.bump();
    if p.at(OPEN_PAREN) {
        items::parameter_list(p);
    }
    stmts::block(p);
    m.complete(p, ANONYMOUS_METHOD_EXPRESSION)
}

fn creation(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();

    match p.current() {
        OPEN_BRACKET => {
            p.bump();
            while p.at(COMMA) {
                p.bump();
            }
            p.expect(CLOSE_BRACKET);
            initializer(p, ARRAY_INITIALIZER_EXPRESSION);
            m.complete(p, IMPLICIT_ARRAY_CREATION_EXPRESSION)
        }
        OPEN_BRACE => {
            p.bump();
            while !p.at(CLOSE_BRACE) && !p.at_end() {
                let member = p.start();
                if p.at(IDENTIFIER) && p.nth(1) == EQUALS {
                    name_equals(p);
                }
                expr(p);
                member.complete(p, ANONYMOUS_OBJECT_MEMBER_DECLARATOR);
                if !p.eat(COMMA) {
                    break;
                }
            }
            p.expect(CLOSE_BRACE);
            m.complete(p, ANONYMOUS_OBJECT_CREATION_EXPRESSION)
        }
        OPEN_PAREN => {
            argument_list(p);
            if p.at(OPEN_BRACE) {
                object_or_collection_initializer(p);
            }
            m.complete(p, IMPLICIT_OBJECT_CREATION_EXPRESSION)
        }
        _ => {
            let ty = types::type_with(p, TypeMode::Creation);
            if p.at(OPEN_BRACKET) {
                let array = ty.precede(p);
                while p.at(OPEN_BRACKET) {
                    types::rank_specifier(p, true);
                }
                array.complete(p, ARRAY_TYPE);
                if p.at(OPEN_BRACE) {
                    initializer(p, ARRAY_INITIALIZER_EXPRESSION);
                }
                return m.complete(p, ARRAY_CREATION_EXPRESSION);
            }

            let has_arguments = p.at(OPEN_PAREN);
            if has_arguments {
                argument_list(p);
            }
            if p.at(OPEN_BRACE) {
                object_or_collection_initializer(p);
            } else if !has_arguments {
                p.expected(OPEN_PAREN);
                let list = p.start();
                p.missing(OPEN_PAREN);
                p.missing(CLOSE_PAREN);
                list.complete(p, ARGUMENT_LIST);
            }
            m.complete(p, OBJECT_CREATION_EXPRESSION)
        }
    }
}

fn stackalloc(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    let ty = types::type_with(p, TypeMode::Creation);
    if p.at(OPEN_BRACKET) {
        let array = ty.precede(p);
        while p.at(OPEN_BRACKET) {
            types::rank_specifier(p, true);
        }
        array.complete(p, ARRAY_TYPE);
    }
    if p.at(OPEN_BRACE) {
        initializer(p, ARRAY_INITIALIZER_EXPRESSION);
    }
    m.complete(p, STACK_ALLOC_ARRAY_CREATION_EXPRESSION)
}

fn object_or_collection_initializer(p: &mut Parser) {
    let object = p.nth(1) == CLOSE_BRACE || (p.nth(1) == IDENTIFIER && p.nth(2) == EQUALS);
    let kind =
        if object { OBJECT_INITIALIZER_EXPRESSION } else { COLLECTION_INITIALIZER_EXPRESSION };
    initializer(p, kind);
}

/// `{`, comma-separated elements with an optional trailing comma, `}`.
pub(crate) fn initializer(p: &mut Parser, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.expect(OPEN_BRACE);
    while !p.at(CLOSE_BRACE) && !p.at_end() {
        initializer_element(p, kind);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(CLOSE_BRACE);
    m.complete(p, kind)
}

fn initializer_element(p: &mut Parser, kind: SyntaxKind) {
    match kind {
        OBJECT_INITIALIZER_EXPRESSION | WITH_INITIALIZER_EXPRESSION
            if p.at(IDENTIFIER) && p.nth(1) == EQUALS && p.nth(2) == OPEN_BRACE =>
        {
            let m = p.start();
            types::identifier_name(p);
            p.bump();
            object_or_collection_initializer(p);
            m.complete(p, SIMPLE_ASSIGNMENT_EXPRESSION);
        }
        COLLECTION_INITIALIZER_EXPRESSION if p.at(OPEN_BRACE) => {
            initializer(p, COMPLEX_ELEMENT_INITIALIZER_EXPRESSION);
        }
        ARRAY_INITIALIZER_EXPRESSION if p.at(OPEN_BRACE) => {
            initializer(p, ARRAY_INITIALIZER_EXPRESSION);
        }
        _ => {
            expr(p);
        }
    }
}

fn interpolated_string(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.bump();
    loop {
        match p.current() {
            INTERPOLATED_STRING_TEXT_TOKEN => {
                let text = p.start();
                p.bump();
                text.complete(p, INTERPOLATED_STRING_TEXT);
            }
            OPEN_BRACE => interpolation(p),
            _ => break,
        }
    }
    p.expect(INTERPOLATED_STRING_END);
    m.complete(p, INTERPOLATED_STRING_EXPRESSION)
}

fn interpolation(p: &mut Parser) {
    let m = p.start();
    p.bump();
    expr(p);
    if p.at(COMMA) {
        let alignment = p.start();
        p.bump();
        expr(p);
        alignment.complete(p, INTERPOLATION_ALIGNMENT_CLAUSE);
    }
    if p.at(COLON) {
        let format = p.start();
        p.bump();
        p.expect(INTERPOLATED_STRING_TEXT_TOKEN);
        format.complete(p, INTERPOLATION_FORMAT_CLAUSE);
    }
    while !matches!(p.current(), CLOSE_BRACE | INTERPOLATED_STRING_END | END_OF_FILE) {
        p.skip_with_error(ErrorCode::InvalidExprTerm);
    }
    p.expect(CLOSE_BRACE);
    m.complete(p, INTERPOLATION);
}
