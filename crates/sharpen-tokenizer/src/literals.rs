//! Numeric, character and string literals.

use sharpen_errors::{Diagnostic, ErrorCode};
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::TokenValue;
use text_size::{TextRange, TextSize};

use crate::cursor::{Cursor, EOF_CHAR, is_newline};

/// A scanned token body with its decoded value.
pub(crate) struct Lexed {
    pub(crate) kind: SyntaxKind,
    pub(crate) value: Option<TokenValue>,
    pub(crate) value_text: Option<String>,
    /// Ranges relative to the start of the token text.
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Lexed {
    pub(crate) fn new(kind: SyntaxKind) -> Self {
        Self { kind, value: None, value_text: None, diagnostics: Vec::new() }
    }

    pub(crate) fn error(&mut self, start: usize, code: ErrorCode, range: std::ops::Range<usize>) {
        self.error_with(start, code, &[] as &[&str], range);
    }

    pub(crate) fn error_with(
        &mut self,
        start: usize,
        code: ErrorCode,
        args: &[impl AsRef<str>],
        range: std::ops::Range<usize>,
    ) {
        let range = TextRange::new(
            TextSize::new((range.start - start) as u32),
            TextSize::new((range.end - start) as u32),
        );
        self.diagnostics.push(Diagnostic::with_args(code, args, range));
    }
}

fn digits(cursor: &mut Cursor<'_>, radix: u32) -> bool {
    let before = cursor.pos();
    cursor.advance_while(|c| c == '_' || c.is_digit(radix));
    cursor.pos() != before
}

/// Scans a numeric literal; the cursor is at a digit or at `.` before one.
pub(crate) fn number(cursor: &mut Cursor<'_>) -> Lexed {
    let start = cursor.pos();
    let mut radix = 10;
    if cursor.peek() == '0' && matches!(cursor.second(), 'x' | 'X') {
        cursor.advance();
        cursor.advance();
        radix = 16;
    } else if cursor.peek() == '0' && matches!(cursor.second(), 'b' | 'B') {
        cursor.advance();
        cursor.advance();
        radix = 2;
    }
    let body_start = cursor.pos();
    digits(cursor, radix);

    let mut is_real = false;
    if radix == 10 {
        if cursor.peek() == '.' && cursor.second().is_ascii_digit() {
            cursor.advance();
            digits(cursor, 10);
            is_real = true;
        }
        let exponent_follows = match cursor.second() {
            '+' | '-' => cursor.nth(2).is_ascii_digit(),
            c => c.is_ascii_digit(),
        };
        if matches!(cursor.peek(), 'e' | 'E') && exponent_follows {
            cursor.advance();
            if !cursor.eat('+') {
                cursor.eat('-');
            }
            digits(cursor, 10);
            is_real = true;
        }
    }
    let body = cursor.slice(body_start).replace('_', "");

    let mut lexed = Lexed::new(NUMERIC_LITERAL);
    let real_suffix = match cursor.peek() {
        'f' | 'F' if radix == 10 => Some(RealKind::Single),
        'd' | 'D' if radix == 10 => Some(RealKind::Double),
        'm' | 'M' if radix == 10 => Some(RealKind::Decimal),
        _ => None,
    };
    if let Some(kind) = real_suffix {
        cursor.advance();
        lexed.value = Some(real_value(&mut lexed, start, cursor.pos(), &body, kind));
        return lexed;
    }
    if is_real {
        lexed.value = Some(real_value(&mut lexed, start, cursor.pos(), &body, RealKind::Double));
        return lexed;
    }

    let suffix_start = cursor.pos();
    let (mut unsigned, mut long) = (false, false);
    loop {
        match cursor.peek() {
            'u' | 'U' if !unsigned => unsigned = true,
            'l' | 'L' if !long => long = true,
            _ => break,
        }
        cursor.advance();
    }
    let suffix = cursor.slice(suffix_start);
    if suffix.contains('l') {
        lexed.error(start, ErrorCode::LowercaseEllSuffix, start..cursor.pos());
    }

    let parsed = if body.is_empty() { Some(0) } else { u64::from_str_radix(&body, radix).ok() };
    let Some(value) = parsed else {
        lexed.error(start, ErrorCode::IntOverflow, start..cursor.pos());
        lexed.value = Some(TokenValue::Int32(0));
        return lexed;
    };
    lexed.value = Some(match (unsigned, long) {
        (false, false) if value <= i32::MAX as u64 => TokenValue::Int32(value as i32),
        (false, false) | (true, false) if value <= u32::MAX as u64 => {
            TokenValue::UInt32(value as u32)
        }
        (false, _) if value <= i64::MAX as u64 => TokenValue::Int64(value as i64),
        _ => TokenValue::UInt64(value),
    });
    lexed
}

#[derive(Clone, Copy)]
enum RealKind {
    Single,
    Double,
    Decimal,
}

fn real_value(lexed: &mut Lexed, start: usize, end: usize, body: &str, kind: RealKind) -> TokenValue {
    let body = if body.starts_with('.') { format!("0{body}") } else { body.to_owned() };
    match kind {
        RealKind::Single => {
            let value = body.parse::<f32>().unwrap_or_default();
            if value.is_infinite() {
                lexed.error_with(start, ErrorCode::FloatOverflow, &["float"], start..end);
            }
            TokenValue::Single(value)
        }
        RealKind::Double => {
            let value = body.parse::<f64>().unwrap_or_default();
            if value.is_infinite() {
                lexed.error_with(start, ErrorCode::FloatOverflow, &["double"], start..end);
            }
            TokenValue::Double(value)
        }
        RealKind::Decimal => TokenValue::Decimal(body.into()),
    }
}

/// Decodes one escape sequence; the cursor is at the backslash.
pub(crate) fn escape(cursor: &mut Cursor<'_>, lexed: &mut Lexed, start: usize) -> Option<char> {
    let escape_start = cursor.pos();
    cursor.advance();
    let c = match cursor.advance() {
        '\'' => '\'',
        '"' => '"',
        '\\' => '\\',
        '0' => '\0',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{b}',
        kind @ ('u' | 'U' | 'x') => {
            let (min, max) = match kind {
                'u' => (4, 4),
                'U' => (8, 8),
                _ => (1, 4),
            };
            let digits_start = cursor.pos();
            while cursor.pos() - digits_start < max && cursor.peek().is_ascii_hexdigit() {
                cursor.advance();
            }
            let digits = cursor.slice(digits_start);
            match u32::from_str_radix(digits, 16).ok().filter(|_| digits.len() >= min) {
                Some(code) => match char::from_u32(code) {
                    Some(c) => c,
                    None => {
                        lexed.error(start, ErrorCode::IllegalEscape, escape_start..cursor.pos());
                        return None;
                    }
                },
                None => {
                    lexed.error(start, ErrorCode::IllegalEscape, escape_start..cursor.pos());
                    return None;
                }
            }
        }
        _ => {
            lexed.error(start, ErrorCode::IllegalEscape, escape_start..cursor.pos());
            return None;
        }
    };
    Some(c)
}

/// Scans a character literal; the cursor is at the opening quote.
pub(crate) fn character(cursor: &mut Cursor<'_>) -> Lexed {
    let start = cursor.pos();
    let mut lexed = Lexed::new(CHARACTER_LITERAL);
    cursor.advance();
    let mut chars = Vec::new();
    loop {
        match cursor.peek() {
            '\'' => {
                cursor.advance();
                break;
            }
            c if is_newline(c) || cursor.is_eof() => {
                lexed.error(start, ErrorCode::NewlineInConst, start..cursor.pos());
                break;
            }
            '\\' => chars.push(escape(cursor, &mut lexed, start).unwrap_or(char::REPLACEMENT_CHARACTER)),
            _ => chars.push(cursor.advance()),
        }
    }
    let closed = cursor.slice(start).len() > 1 && cursor.slice(start).ends_with('\'');
    match chars.as_slice() {
        [] if closed => lexed.error(start, ErrorCode::EmptyCharConst, start..cursor.pos()),
        [_, _, ..] => lexed.error(start, ErrorCode::TooManyCharsInConst, start..cursor.pos()),
        _ => {}
    }
    let value = chars.first().copied().unwrap_or(EOF_CHAR);
    lexed.value = Some(TokenValue::Char(value));
    lexed.value_text = Some(value.to_string());
    lexed
}

/// Scans a regular or verbatim string; the cursor is at `"` or `@"`.
pub(crate) fn string(cursor: &mut Cursor<'_>) -> Lexed {
    let start = cursor.pos();
    let verbatim = cursor.eat('@');
    cursor.advance();
    let mut lexed = Lexed::new(STRING_LITERAL);
    let mut value = String::new();
    loop {
        match cursor.peek() {
            '"' if verbatim && cursor.second() == '"' => {
                cursor.advance();
                cursor.advance();
                value.push('"');
            }
            '"' => {
                cursor.advance();
                break;
            }
            _ if cursor.is_eof() => {
                let code =
                    if verbatim { ErrorCode::UnterminatedStringLit } else { ErrorCode::NewlineInConst };
                lexed.error(start, code, start..cursor.pos());
                break;
            }
            c if is_newline(c) && !verbatim => {
                lexed.error(start, ErrorCode::NewlineInConst, start..cursor.pos());
                break;
            }
            '\\' if !verbatim => value.extend(escape(cursor, &mut lexed, start)),
            _ => value.push(cursor.advance()),
        }
    }
    lexed.value_text = Some(value.clone());
    lexed.value = Some(TokenValue::String(value.into()));
    lexed
}

/// Scans literal text of an interpolated string up to a hole, the closing
/// quote or, for regular strings, the end of the line.
pub(crate) fn interpolated_text(cursor: &mut Cursor<'_>, verbatim: bool) -> Lexed {
    let start = cursor.pos();
    let mut lexed = Lexed::new(INTERPOLATED_STRING_TEXT_TOKEN);
    let mut value = String::new();
    loop {
        match cursor.peek() {
            '{' | '}' if cursor.second() == cursor.peek() => {
                value.push(cursor.advance());
                cursor.advance();
            }
            '{' => break,
            '"' if verbatim && cursor.second() == '"' => {
                cursor.advance();
                cursor.advance();
                value.push('"');
            }
            '"' => break,
            _ if cursor.is_eof() => break,
            c if is_newline(c) && !verbatim => break,
            '\\' if !verbatim => value.extend(escape(cursor, &mut lexed, start)),
            _ => value.push(cursor.advance()),
        }
    }
    lexed.value_text = Some(value.clone());
    lexed.value = Some(TokenValue::String(value.into()));
    lexed
}

/// Scans the format text after `:` in an interpolation hole.
pub(crate) fn format_text(cursor: &mut Cursor<'_>) -> Lexed {
    cursor.advance_while(|c| c != '}' && c != '"' && !is_newline(c));
    Lexed::new(INTERPOLATED_STRING_TEXT_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str, f: fn(&mut Cursor<'_>) -> Lexed) -> (Lexed, usize) {
        let mut cursor = Cursor::new(text);
        let lexed = f(&mut cursor);
        (lexed, cursor.pos())
    }

    fn codes(lexed: &Lexed) -> Vec<ErrorCode> {
        lexed.diagnostics.iter().map(Diagnostic::code).collect()
    }

    #[test]
    fn integer_types_follow_value_and_suffix() {
        let cases = [
            ("42", TokenValue::Int32(42)),
            ("0x1F", TokenValue::Int32(31)),
            ("0b1010_1010", TokenValue::Int32(170)),
            ("1_000", TokenValue::Int32(1000)),
            ("3000000000", TokenValue::UInt32(3_000_000_000)),
            ("5000000000", TokenValue::Int64(5_000_000_000)),
            ("1U", TokenValue::UInt32(1)),
            ("1L", TokenValue::Int64(1)),
            ("1UL", TokenValue::UInt64(1)),
            ("1Lu", TokenValue::UInt64(1)),
        ];
        for (text, value) in cases {
            let (lexed, end) = scan(text, number);
            assert_eq!(end, text.len(), "{text}");
            assert_eq!(lexed.value, Some(value), "{text}");
            assert!(lexed.diagnostics.is_empty(), "{text}");
        }
    }

    #[test]
    fn real_literals() {
        let (lexed, _) = scan("1.5", number);
        assert_eq!(lexed.value, Some(TokenValue::Double(1.5)));
        let (lexed, _) = scan(".25f", number);
        assert_eq!(lexed.value, Some(TokenValue::Single(0.25)));
        let (lexed, _) = scan("1e3", number);
        assert_eq!(lexed.value, Some(TokenValue::Double(1000.0)));
        let (lexed, _) = scan("1_0.5m", number);
        assert_eq!(lexed.value, Some(TokenValue::Decimal("10.5".into())));
        let (lexed, end) = scan("1.ToString", number);
        assert_eq!(end, 1);
        assert_eq!(lexed.value, Some(TokenValue::Int32(1)));
        let (lexed, _) = scan("1e999", number);
        assert_eq!(codes(&lexed), [ErrorCode::FloatOverflow]);
    }

    #[test]
    fn integer_diagnostics() {
        let (lexed, _) = scan("1l", number);
        assert_eq!(codes(&lexed), [ErrorCode::LowercaseEllSuffix]);
        assert_eq!(lexed.diagnostics[0].range(), TextRange::new(0.into(), 2.into()));
        assert_eq!(lexed.value, Some(TokenValue::Int64(1)));

        let (lexed, _) = scan("99999999999999999999", number);
        assert_eq!(codes(&lexed), [ErrorCode::IntOverflow]);
    }

    #[test]
    fn characters() {
        let (lexed, end) = scan(r"'\n'", character);
        assert_eq!(end, 4);
        assert_eq!(lexed.value, Some(TokenValue::Char('\n')));
        assert!(lexed.diagnostics.is_empty());

        let (lexed, _) = scan(r"'A'", character);
        assert_eq!(lexed.value_text.as_deref(), Some("A"));

        assert_eq!(codes(&scan("''", character).0), [ErrorCode::EmptyCharConst]);
        assert_eq!(codes(&scan("'ab'", character).0), [ErrorCode::TooManyCharsInConst]);
        assert_eq!(codes(&scan("'a\n", character).0), [ErrorCode::NewlineInConst]);
        assert_eq!(codes(&scan(r"'\q'", character).0), [ErrorCode::IllegalEscape]);
    }

    #[test]
    fn strings() {
        let (lexed, end) = scan(r#""a\tb" rest"#, string);
        assert_eq!(end, 6);
        assert_eq!(lexed.value_text.as_deref(), Some("a\tb"));

        let (lexed, _) = scan("@\"say \"\"hi\"\"\n\"", string);
        assert_eq!(lexed.value_text.as_deref(), Some("say \"hi\"\n"));
        assert!(lexed.diagnostics.is_empty());

        assert_eq!(codes(&scan("\"open\nx", string).0), [ErrorCode::NewlineInConst]);
        assert_eq!(codes(&scan("@\"open", string).0), [ErrorCode::UnterminatedStringLit]);
    }

    #[test]
    fn interpolated_text_stops_at_holes() {
        let mut cursor = Cursor::new("a {{b}} {c}\"");
        let lexed = interpolated_text(&mut cursor, false);
        assert_eq!(cursor.peek(), '{');
        assert_eq!(lexed.value_text.as_deref(), Some("a {b} "));
    }
}
