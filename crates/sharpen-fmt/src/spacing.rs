//! Whether two tokens on the same line are separated by a space.

use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::SyntaxToken;

pub(crate) fn needs_space(prev: &SyntaxToken, next: &SyntaxToken) -> bool {
    let tight = tight_after(prev) || tight_before(next);
    !tight || would_fuse(prev.text(), next.text())
}

fn parent_kind(token: &SyntaxToken) -> SyntaxKind {
    token.parent().map_or(TOMBSTONE, |parent| parent.kind())
}

fn grandparent_kind(token: &SyntaxToken) -> SyntaxKind {
    token.parent().and_then(|parent| parent.parent()).map_or(TOMBSTONE, |node| node.kind())
}

fn tight_after(prev: &SyntaxToken) -> bool {
    let parent = parent_kind(prev);
    match prev.kind() {
        OPEN_PAREN | OPEN_BRACKET | DOT | COLON_COLON | MINUS_GREATER_THAN | DOT_DOT => true,
        INTERPOLATED_STRING_START
        | INTERPOLATED_VERBATIM_STRING_START
        | INTERPOLATED_STRING_TEXT_TOKEN => true,
        OPEN_BRACE | CLOSE_BRACE => parent == INTERPOLATION,
        CLOSE_PAREN => parent == CAST_EXPRESSION,
        LESS_THAN => is_angle_list(parent),
        QUESTION => parent == CONDITIONAL_ACCESS_EXPRESSION,
        ASTERISK => matches!(parent, POINTER_TYPE | FUNCTION_POINTER_TYPE),
        COMMA => parent == INTERPOLATION_ALIGNMENT_CLAUSE,
        COLON => parent == INTERPOLATION_FORMAT_CLAUSE,
        kind => kind.is_punctuation() && parent.is_prefix_unary_expression(),
    }
}

fn tight_before(next: &SyntaxToken) -> bool {
    let parent = parent_kind(next);
    match next.kind() {
        CLOSE_PAREN | CLOSE_BRACKET | COMMA | SEMICOLON | DOT | COLON_COLON | MINUS_GREATER_THAN
        | DOT_DOT => true,
        INTERPOLATED_STRING_TEXT_TOKEN | INTERPOLATED_STRING_END => true,
        OPEN_BRACE | CLOSE_BRACE => parent == INTERPOLATION,
        OPEN_PAREN => match parent {
            ARGUMENT_LIST | ATTRIBUTE_ARGUMENT_LIST | TYPEOF_EXPRESSION | SIZEOF_EXPRESSION
            | DEFAULT_EXPRESSION | CHECKED_EXPRESSION | UNCHECKED_EXPRESSION
            | CONSTRUCTOR_CONSTRAINT => true,
            PARAMETER_LIST => !grandparent_kind(next).is_lambda_expression(),
            _ => false,
        },
        OPEN_BRACKET => matches!(
            parent,
            ARRAY_RANK_SPECIFIER
                | BRACKETED_ARGUMENT_LIST
                | BRACKETED_PARAMETER_LIST
                | IMPLICIT_ARRAY_CREATION_EXPRESSION
        ),
        LESS_THAN | GREATER_THAN => is_angle_list(parent),
        QUESTION => matches!(parent, NULLABLE_TYPE | CONDITIONAL_ACCESS_EXPRESSION),
        ASTERISK => parent == FUNCTION_POINTER_TYPE,
        COLON => matches!(
            parent,
            CASE_SWITCH_LABEL
                | DEFAULT_SWITCH_LABEL
                | LABELED_STATEMENT
                | NAME_COLON
                | ATTRIBUTE_TARGET_SPECIFIER
                | INTERPOLATION_FORMAT_CLAUSE
        ),
        kind => kind.is_punctuation() && parent.is_postfix_unary_expression(),
    }
}

fn is_angle_list(kind: SyntaxKind) -> bool {
    matches!(kind, TYPE_ARGUMENT_LIST | TYPE_PARAMETER_LIST | FUNCTION_POINTER_PARAMETER_LIST)
}

/// `true` when printing `prev` and `next` side by side would lex as
/// something else.
fn would_fuse(prev: &str, next: &str) -> bool {
    let (Some(last), Some(first)) = (prev.chars().next_back(), next.chars().next()) else {
        return false;
    };
    let word = |c: char| c.is_alphanumeric() || c == '_' || c == '@';
    (word(last) && word(first))
        || matches!(
            (last, first),
            ('+', '+')
                | ('-', '-')
                | ('&', '&')
                | ('|', '|')
                | ('<', '<')
                | ('=', '=')
                | ('-', '>')
                | ('/', '/')
                | ('/', '*')
                | ('?', '?')
                | ('.', '.')
        )
}
