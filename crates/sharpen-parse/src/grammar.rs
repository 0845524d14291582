use sharpen_errors::ErrorCode;
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::SyntaxSet;

use crate::parser::Parser;

pub(crate) mod exprs;
pub(crate) mod items;
pub(crate) mod stmts;
pub(crate) mod types;

/// Tokens a comma-separated list never skips over.
const LIST_STOP: SyntaxSet = SyntaxSet::new([
    SEMICOLON,
    OPEN_BRACE,
    CLOSE_BRACE,
    CLOSE_PAREN,
    CLOSE_BRACKET,
    END_OF_FILE,
]);

/// A comma-separated list between `bra` and `ket`.
///
/// A missing comma is inserted when the next token can start another item;
/// tokens that cannot are skipped until the list closes.
pub(crate) fn delimited(
    p: &mut Parser,
    bra: SyntaxKind,
    ket: SyntaxKind,
    first: fn(&Parser) -> bool,
    mut item: impl FnMut(&mut Parser),
) {
    if !p.expect(bra) {
        p.missing(ket);
        return;
    }
    if p.eat(ket) {
        return;
    }

    'items: loop {
        let start = p.position();
        item(p);
        loop {
            if p.eat(COMMA) {
                continue 'items;
            }
            if p.at(ket) || p.at_set(&LIST_STOP) {
                break 'items;
            }
            if first(p) && p.position() != start {
                p.expected(COMMA);
                p.missing(COMMA);
                continue 'items;
            }
            p.skip_with_error(ErrorCode::InvalidExprTerm);
        }
    }

    p.expect(ket);
}
