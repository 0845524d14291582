//! Constructors for tokens, trivia, lists and nodes.
//!
//! Everything here builds green elements. Node constructors take their
//! children in document order and lay them out with the node's shape, so
//! omitted required children become missing placeholders of the right kind.

pub(crate) mod shape;

use std::fmt::Write as _;

use crate::SyntaxKind::{self, *};
use crate::green::{GreenElement, GreenNode, GreenToken, GreenTrivia, GreenTriviaList};
use crate::syntax::NodeOrToken;
use crate::{ParseOptions, Result, SyntaxError, SyntaxTree, TokenValue};

/// A token of a kind with fixed text, without trivia.
pub fn token(kind: SyntaxKind) -> Result<GreenToken> {
    token_with_trivia(GreenTriviaList::empty(), kind, GreenTriviaList::empty())
}

pub fn token_with_trivia(
    leading: GreenTriviaList,
    kind: SyntaxKind,
    trailing: GreenTriviaList,
) -> Result<GreenToken> {
    if !kind.is_token() {
        return Err(SyntaxError::argument(format!("{kind:?} is not a token kind")));
    }
    let Some(text) = kind.fixed_text() else {
        return Err(SyntaxError::argument(format!("{kind:?} has no fixed text")));
    };
    Ok(GreenToken::new(kind, text, leading, trailing))
}

/// A token with caller-chosen text.
///
/// Identifiers and numeric or character literals carry a decoded value, so
/// they must be built with [`identifier`] or the literal constructors.
pub fn token_with_text(
    leading: GreenTriviaList,
    kind: SyntaxKind,
    text: &str,
    value_text: &str,
    trailing: GreenTriviaList,
) -> Result<GreenToken> {
    if !kind.is_token() {
        return Err(SyntaxError::argument(format!("{kind:?} is not a token kind")));
    }
    if matches!(kind, IDENTIFIER | CHARACTER_LITERAL | NUMERIC_LITERAL) {
        return Err(SyntaxError::argument(format!(
            "{kind:?} tokens must be created with the identifier or literal constructors"
        )));
    }
    let token = GreenToken::new(kind, text, leading, trailing);
    Ok(if value_text == text { token } else { token.with_value(None, Some(value_text)) })
}

/// A zero-width placeholder for an expected token.
pub fn missing_token(kind: SyntaxKind) -> Result<GreenToken> {
    if !kind.is_token() {
        return Err(SyntaxError::argument(format!("{kind:?} is not a token kind")));
    }
    Ok(GreenToken::missing(kind))
}

/// The zero-width token ending every compilation unit.
pub fn end_of_file() -> GreenToken {
    GreenToken::new(END_OF_FILE, "", GreenTriviaList::empty(), GreenTriviaList::empty())
}

/// An identifier token; a leading `@` is kept in the text but not in the
/// value text.
pub fn identifier(text: Option<&str>) -> Result<GreenToken> {
    let text = text.ok_or(SyntaxError::ArgumentNull("text"))?;
    let token = GreenToken::new(IDENTIFIER, text, GreenTriviaList::empty(), GreenTriviaList::empty());
    Ok(match text.strip_prefix('@') {
        Some(value_text) => token.with_value(None, Some(value_text)),
        None => token,
    })
}

fn literal_token(kind: SyntaxKind, text: &str, value: TokenValue) -> GreenToken {
    GreenToken::new(kind, text, GreenTriviaList::empty(), GreenTriviaList::empty())
        .with_value(Some(value), None)
}

pub fn literal_i32(value: i32) -> GreenToken {
    literal_token(NUMERIC_LITERAL, &value.to_string(), TokenValue::Int32(value))
}

pub fn literal_u32(value: u32) -> GreenToken {
    literal_token(NUMERIC_LITERAL, &format!("{value}U"), TokenValue::UInt32(value))
}

pub fn literal_i64(value: i64) -> GreenToken {
    literal_token(NUMERIC_LITERAL, &format!("{value}L"), TokenValue::Int64(value))
}

pub fn literal_u64(value: u64) -> GreenToken {
    literal_token(NUMERIC_LITERAL, &format!("{value}UL"), TokenValue::UInt64(value))
}

/// Renders with the shortest text that reads back as the same `f32`.
pub fn literal_f32(value: f32) -> Result<GreenToken> {
    if !value.is_finite() {
        return Err(SyntaxError::argument(format!("{value} has no literal form")));
    }
    let text = format!("{}F", render_real(value.to_string(), format!("{value:e}"), 7));
    Ok(literal_token(NUMERIC_LITERAL, &text, TokenValue::Single(value)))
}

/// Renders with the shortest text that reads back as the same `f64`.
pub fn literal_f64(value: f64) -> Result<GreenToken> {
    if !value.is_finite() {
        return Err(SyntaxError::argument(format!("{value} has no literal form")));
    }
    let text = format!("{}D", render_real(value.to_string(), format!("{value:e}"), 15));
    Ok(literal_token(NUMERIC_LITERAL, &text, TokenValue::Double(value)))
}

/// Picks positional or exponent notation. Exponents get a sign and at least
/// two digits, as in `1E+20`.
fn render_real(positional: String, scientific: String, max_exponent: i32) -> String {
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return positional;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return positional;
    };
    if exponent < max_exponent && exponent >= -4 {
        return positional;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

pub fn literal_char(value: char) -> GreenToken {
    let mut text = String::from('\'');
    escape_into(&mut text, value, '\'');
    text.push('\'');
    literal_token(CHARACTER_LITERAL, &text, TokenValue::Char(value))
}

pub fn literal_string(value: &str) -> GreenToken {
    let mut text = String::from('"');
    for c in value.chars() {
        escape_into(&mut text, c, '"');
    }
    text.push('"');
    literal_token(STRING_LITERAL, &text, TokenValue::String(value.into()))
}

/// A literal with caller-chosen text, e.g. `0x1F` or `1u`; the kind follows
/// the value.
pub fn literal(text: Option<&str>, value: TokenValue) -> Result<GreenToken> {
    let text = text.ok_or(SyntaxError::ArgumentNull("text"))?;
    let kind = match value {
        TokenValue::Bool(_) => {
            return Err(SyntaxError::argument("boolean literals are keyword tokens"));
        }
        TokenValue::Char(_) => CHARACTER_LITERAL,
        TokenValue::String(_) => STRING_LITERAL,
        _ => NUMERIC_LITERAL,
    };
    Ok(literal_token(kind, text, value))
}

fn escape_into(buf: &mut String, c: char, quote: char) {
    let escaped = match c {
        '\0' => "\\0",
        '\u{7}' => "\\a",
        '\u{8}' => "\\b",
        '\u{c}' => "\\f",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        '\u{b}' => "\\v",
        '\\' => "\\\\",
        c if c == quote => {
            buf.push('\\');
            buf.push(c);
            return;
        }
        c if c.is_control() => {
            let _ = write!(buf, "\\u{:04X}", c as u32);
            return;
        }
        c => {
            buf.push(c);
            return;
        }
    };
    buf.push_str(escaped);
}

pub fn whitespace(text: &str) -> GreenTrivia {
    GreenTrivia::new(WHITESPACE, text)
}

pub fn end_of_line(text: &str) -> GreenTrivia {
    GreenTrivia::new(END_OF_LINE, text)
}

/// A `//` or `/* */` comment.
pub fn comment(text: &str) -> Result<GreenTrivia> {
    let kind = if text.starts_with("//") {
        SINGLE_LINE_COMMENT
    } else if text.starts_with("/*") {
        MULTI_LINE_COMMENT
    } else {
        return Err(SyntaxError::argument(format!("{text:?} is not a comment")));
    };
    Ok(GreenTrivia::new(kind, text))
}

/// A list of nodes; empty input gives an empty list.
pub fn list(nodes: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    GreenNode::new(LIST, nodes.into_iter().map(GreenElement::from))
}

pub fn token_list(tokens: impl IntoIterator<Item = GreenToken>) -> GreenNode {
    GreenNode::new(LIST, tokens.into_iter().map(GreenElement::from))
}

/// A separated list from alternating elements and separators.
///
/// The sequence must start with a node, alternate nodes and tokens, and end
/// with a node.
pub fn separated_list(items: impl IntoIterator<Item = GreenElement>) -> Result<GreenNode> {
    let items = items.into_iter().collect::<Vec<_>>();
    for (index, item) in items.iter().enumerate() {
        match (index % 2, item) {
            (0, NodeOrToken::Token(token)) => {
                return Err(SyntaxError::argument(format!(
                    "element expected at position {index}, found {:?}",
                    token.kind()
                )));
            }
            (1, NodeOrToken::Node(node)) => {
                return Err(SyntaxError::argument(format!(
                    "separator expected at position {index}, found {:?}",
                    node.kind()
                )));
            }
            _ => {}
        }
    }
    if items.len() % 2 == 0 && !items.is_empty() {
        return Err(SyntaxError::argument("a separated list cannot end with a separator"));
    }
    Ok(GreenNode::new(SEPARATED_LIST, items))
}

/// A comma-separated list of `nodes`.
pub fn separated_nodes(nodes: impl IntoIterator<Item = GreenNode>) -> GreenNode {
    let comma = GreenToken::new(COMMA, ",", GreenTriviaList::empty(), GreenTriviaList::empty());
    let mut items = Vec::new();
    for node in nodes {
        if !items.is_empty() {
            items.push(comma.clone().into());
        }
        items.push(node.into());
    }
    GreenNode::new(SEPARATED_LIST, items)
}

/// A node of `kind` from its children in document order.
///
/// List slots take either a prebuilt list or their items inline. Absent
/// required children are filled with missing placeholders.
pub fn node(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Result<GreenNode> {
    if !kind.is_node() || kind.is_list() {
        return Err(SyntaxError::argument(format!("{kind:?} is not a node kind")));
    }
    match shape::arrange(kind, children.into_iter().collect()) {
        Ok(children) => Ok(GreenNode::new(kind, children)),
        Err(misfit) => Err(SyntaxError::argument(format!(
            "{kind:?} does not accept {:?} at position {}",
            misfit.unexpected_kind(),
            misfit.unexpected
        ))),
    }
}

/// A node of `kind` made only of missing placeholders.
pub fn missing_node(kind: SyntaxKind) -> Result<GreenNode> {
    if !kind.is_node() || kind.is_list() {
        return Err(SyntaxError::argument(format!("{kind:?} is not a node kind")));
    }
    Ok(shape::missing_node(kind))
}

/// Wraps directives, documentation comments or skipped tokens as trivia.
pub fn structured_trivia(node: GreenNode) -> Result<GreenTrivia> {
    if !node.kind().is_structured_trivia() {
        return Err(SyntaxError::argument(format!("{:?} is not structured trivia", node.kind())));
    }
    Ok(GreenTrivia::structured(node))
}

/// Finishes a compilation unit: appends the end-of-file token when the
/// children lack one and roots the result in a new tree.
pub fn compilation_unit(
    children: impl IntoIterator<Item = GreenElement>,
    options: ParseOptions,
) -> Result<SyntaxTree> {
    let mut children = children.into_iter().collect::<Vec<_>>();
    if children.last().is_none_or(|last| last.kind() != END_OF_FILE) {
        children.push(end_of_file().into());
    }
    Ok(SyntaxTree::new(node(COMPILATION_UNIT, children)?, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxNode;

    fn name(text: &str) -> GreenNode {
        node(IDENTIFIER_NAME, [identifier(Some(text)).unwrap().into()]).unwrap()
    }

    #[test]
    fn token_contracts() {
        assert_eq!(token(SEMICOLON).unwrap().text(), ";");
        assert_eq!(token(CLASS_KW).unwrap().text(), "class");
        assert!(matches!(token(IDENTIFIER), Err(SyntaxError::Argument(_))));
        assert!(matches!(token(ADD_EXPRESSION), Err(SyntaxError::Argument(_))));

        let empty = GreenTriviaList::empty;
        let odd = token_with_text(empty(), SEMICOLON, "x", "x", empty()).unwrap();
        assert_eq!(odd.text(), "x");
        for kind in [IDENTIFIER, CHARACTER_LITERAL, NUMERIC_LITERAL] {
            let result = token_with_text(empty(), kind, "a", "a", empty());
            assert!(matches!(result, Err(SyntaxError::Argument(_))), "{kind:?}");
        }
        let string = token_with_text(empty(), STRING_LITERAL, "\"a\"", "a", empty()).unwrap();
        assert_eq!(string.value_text(), "a");

        let missing = missing_token(CLOSE_BRACE).unwrap();
        assert!(missing.is_missing());
        assert_eq!(missing.text(), "");
        assert!(missing_token(BLOCK).is_err());
    }

    #[test]
    fn identifiers() {
        assert_eq!(identifier(None), Err(SyntaxError::ArgumentNull("text")));
        let verbatim = identifier(Some("@class")).unwrap();
        assert_eq!(verbatim.text(), "@class");
        assert_eq!(verbatim.value_text(), "class");
        assert_eq!(literal(None, TokenValue::Int32(1)), Err(SyntaxError::ArgumentNull("text")));
    }

    #[test]
    fn literal_rendering() {
        assert_eq!(literal_i32(-12).text(), "-12");
        assert_eq!(literal_u32(3).text(), "3U");
        assert_eq!(literal_i64(3).text(), "3L");
        assert_eq!(literal_u64(u64::MAX).text(), "18446744073709551615UL");
        assert_eq!(literal_f32(1.5).unwrap().text(), "1.5F");
        assert_eq!(literal_f64(0.1).unwrap().text(), "0.1D");
        assert_eq!(literal_f64(1e20).unwrap().text(), "1E+20D");
        assert_eq!(literal_f64(1.5e-7).unwrap().text(), "1.5E-07D");
        assert!(literal_f64(f64::NAN).is_err());

        assert_eq!(literal_char('a').text(), "'a'");
        assert_eq!(literal_char('\'').text(), "'\\''");
        assert_eq!(literal_char('\u{1}').text(), "'\\u0001'");
        assert_eq!(literal_string("a\"b\\\n\t").text(), "\"a\\\"b\\\\\\n\\t\"");
        assert_eq!(literal_string("it's").text(), "\"it's\"");
        assert_eq!(literal_string("x").value(), Some(&TokenValue::String("x".into())));

        let hex = literal(Some("0x1F"), TokenValue::Int32(31)).unwrap();
        assert_eq!((hex.kind(), hex.text()), (NUMERIC_LITERAL, "0x1F"));
        assert_eq!(literal(Some("1u8"), TokenValue::UInt32(1)).unwrap().text(), "1u8");
    }

    #[test]
    fn separated_lists_alternate() {
        let int = || node(PREDEFINED_TYPE, [token(INT_KW).unwrap().into()]).unwrap();
        let comma = || GreenElement::from(token(COMMA).unwrap());

        let list = separated_list([int().into(), comma(), int().into()]).unwrap();
        assert_eq!(list.children().len(), 3);
        assert!(separated_list([]).unwrap().children().is_empty());

        let trailing = separated_list([int().into(), comma(), int().into(), comma()]);
        assert!(matches!(trailing, Err(SyntaxError::Argument(_))));
        let leading = separated_list([comma(), int().into()]);
        assert!(matches!(leading, Err(SyntaxError::Argument(_))));
        let adjacent = separated_list([int().into(), int().into()]);
        assert!(matches!(adjacent, Err(SyntaxError::Argument(_))));

        assert_eq!(separated_nodes([name("a"), name("b")]).to_full_string(), "a,b");
        assert!(list_is_empty(&super::list([])));
    }

    fn list_is_empty(node: &GreenNode) -> bool {
        node.kind() == LIST && node.children().is_empty()
    }

    #[test]
    fn omitted_children_become_placeholders() {
        let block = node(BLOCK, []).unwrap();
        let root = SyntaxNode::new_root(block);
        let braces = root.children_with_tokens().map(|child| child.kind()).collect::<Vec<_>>();
        assert_eq!(braces, [OPEN_BRACE, CLOSE_BRACE]);
        assert!(root.children_with_tokens().all(|child| child.is_missing()));

        let statement = node(RETURN_STATEMENT, [token(RETURN_KW).unwrap().into()]).unwrap();
        assert_eq!(statement.to_full_string(), "return");
        assert_eq!(statement.children().len(), 2);

        let misplaced = node(RETURN_STATEMENT, [token(COMMA).unwrap().into()]);
        assert!(matches!(misplaced, Err(SyntaxError::Argument(_))));
        assert!(node(LIST, []).is_err());
    }

    #[test]
    fn compilation_units_end_with_end_of_file() {
        let class = node(
            CLASS_DECLARATION,
            [
                token(CLASS_KW).unwrap().into(),
                identifier(Some("C")).unwrap().into(),
                token(OPEN_BRACE).unwrap().into(),
                token(CLOSE_BRACE).unwrap().into(),
            ],
        )
        .unwrap();
        let tree = compilation_unit([class.into()], ParseOptions::default()).unwrap();
        assert_eq!(tree.text(), "classC{}");
        let last = tree.root().last_token_with(crate::TokenFilter::DEFAULT.with_zero_width());
        let last = last.unwrap();
        assert_eq!(last.kind(), END_OF_FILE);
        assert!(!last.is_missing());
    }
}
