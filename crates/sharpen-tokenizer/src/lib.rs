//! Tokenizer for C# source text.
//!
//! Every token carries the trivia around it: leading trivia runs from the
//! end of the previous token, trailing trivia runs up to and including the
//! first line break. Preprocessor directives and `///` documentation comments
//! are lexed into structured trivia as they are met, and lines excluded by
//! conditional directives become disabled text.

mod cursor;
mod directives;
mod documentation;
mod literals;

use cursor::{Cursor, is_identifier_part, is_identifier_start, is_newline, is_whitespace};
use directives::Preprocessor;
use literals::Lexed;
use sharpen_errors::{Diagnostic, ErrorCode};
pub use sharpen_syntax::SyntaxKind;
use sharpen_syntax::SyntaxKind::*;
use sharpen_syntax::{
    DocumentationMode, GreenToken, GreenTrivia, GreenTriviaList, ParseOptions, TokenValue,
};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Keyword an identifier would be in a contextual position, e.g. `var`
    /// is not one but `async` and `where` are.
    pub contextual_kind: Option<SyntaxKind>,
    pub green: GreenToken,
}

impl Token {
    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Whether `next` follows this token with no trivia in between.
    pub fn is_adjacent_to(&self, next: &Self) -> bool {
        self.green.trailing().is_empty() && next.green.leading().is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Literal text of an interpolated string.
    InterpolatedText { verbatim: bool },
    /// Expression inside `{...}` of an interpolated string.
    Hole { verbatim: bool, depth: u32, formatted: bool },
    /// Format specifier after `:` in a hole.
    Format,
}

pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    documentation_mode: DocumentationMode,
    current: Token,
    modes: Vec<Mode>,
    preprocessor: Preprocessor,
    /// Only whitespace has been seen since the last line break.
    at_line_start: bool,
    seen_token: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, options: &ParseOptions) -> Self {
        let mut tokenizer = Self::unprimed(text, options);
        tokenizer.current = tokenizer.lex();
        tokenizer
    }

    fn unprimed(text: &'a str, options: &ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(text),
            documentation_mode: options.documentation_mode(),
            current: Token {
                kind: END_OF_FILE,
                contextual_kind: None,
                green: GreenToken::missing(END_OF_FILE),
            },
            modes: Vec::new(),
            preprocessor: Preprocessor::new(options),
            at_line_start: true,
            seen_token: false,
            finished: false,
        }
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn next_token(&mut self) -> Token {
        let next = self.lex();
        std::mem::replace(&mut self.current, next)
    }

    /// Lexes the trivia at the start of `text` as if it followed a token on
    /// the same line.
    pub fn trailing_trivia(text: &'a str, options: &ParseOptions) -> GreenTriviaList {
        let mut tokenizer = Self::unprimed(text, options);
        tokenizer.at_line_start = false;
        GreenTriviaList::new(tokenizer.trailing())
    }

    fn lex(&mut self) -> Token {
        match self.modes.last() {
            Some(&Mode::InterpolatedText { verbatim }) => self.interpolated_text(verbatim),
            Some(Mode::Format) => self.format_text(),
            _ => self.token(),
        }
    }

    fn token(&mut self) -> Token {
        let leading = self.leading();
        if let Some(token) = self.unclosed_hole(&leading) {
            return token;
        }

        let start = self.cursor.pos();
        let (lexed, contextual_kind) = self.scan();
        let text = self.cursor.slice(start);
        if lexed.kind != END_OF_FILE {
            self.seen_token = true;
            self.at_line_start = false;
        }
        let trailing = if self.trailing_allowed() { self.trailing() } else { Vec::new() };
        self.finish(leading, lexed, text, trailing, contextual_kind)
    }

    fn finish(
        &self,
        leading: Vec<GreenTrivia>,
        lexed: Lexed,
        text: &str,
        trailing: Vec<GreenTrivia>,
        contextual_kind: Option<SyntaxKind>,
    ) -> Token {
        let leading = GreenTriviaList::new(leading);
        let offset = leading.width();
        let mut green = GreenToken::new(lexed.kind, text, leading, GreenTriviaList::new(trailing));
        if lexed.value.is_some() || lexed.value_text.is_some() {
            green = green.with_value(lexed.value, lexed.value_text.as_deref());
        }
        if !lexed.diagnostics.is_empty() {
            let diagnostics = lexed
                .diagnostics
                .into_iter()
                .map(|diagnostic| {
                    let range = diagnostic.range() + offset;
                    diagnostic.with_range(range)
                })
                .collect();
            green = green.with_diagnostics(diagnostics);
        }
        Token { kind: lexed.kind, contextual_kind, green }
    }

    fn missing(&self, leading: Vec<GreenTrivia>, kind: SyntaxKind, code: ErrorCode) -> Token {
        let leading = GreenTriviaList::new(leading);
        let diagnostic = Diagnostic::new(code, TextRange::empty(leading.width()));
        let green = GreenToken::missing(kind).with_leading(leading).with_diagnostics(vec![diagnostic]);
        Token { kind, contextual_kind: None, green }
    }

    fn trailing_allowed(&self) -> bool {
        matches!(self.modes.last(), None | Some(Mode::Hole { .. }))
    }

    fn in_single_line_hole(&self) -> bool {
        matches!(self.modes.last(), Some(Mode::Hole { verbatim: false, .. }))
    }

    fn scan(&mut self) -> (Lexed, Option<SyntaxKind>) {
        if self.cursor.is_eof() {
            return (self.end_of_file(), None);
        }
        let lexed = match (self.cursor.peek(), self.cursor.second()) {
            ('@', '$') | ('$', '@') if self.cursor.nth(2) == '"' => {
                for _ in 0..3 {
                    self.cursor.advance();
                }
                self.modes.push(Mode::InterpolatedText { verbatim: true });
                Lexed::new(INTERPOLATED_VERBATIM_STRING_START)
            }
            ('$', '"') => {
                self.cursor.eat_str("$\"");
                self.modes.push(Mode::InterpolatedText { verbatim: false });
                Lexed::new(INTERPOLATED_STRING_START)
            }
            ('"', _) | ('@', '"') => literals::string(&mut self.cursor),
            ('\'', _) => literals::character(&mut self.cursor),
            ('0'..='9', _) => literals::number(&mut self.cursor),
            ('.', second) if second.is_ascii_digit() => literals::number(&mut self.cursor),
            (first, _) if is_identifier_start(first) => return self.identifier(),
            ('@', second) if is_identifier_start(second) || second == '\\' => {
                return self.identifier();
            }
            ('\\', 'u' | 'U') => return self.identifier(),
            _ => self.punctuation(),
        };
        (lexed, None)
    }

    fn identifier(&mut self) -> (Lexed, Option<SyntaxKind>) {
        let start = self.cursor.pos();
        let verbatim = self.cursor.eat('@');
        let mut lexed = Lexed::new(IDENTIFIER);
        let mut value = String::new();
        let mut escaped = false;
        loop {
            match self.cursor.peek() {
                '\\' if matches!(self.cursor.second(), 'u' | 'U') => {
                    escaped = true;
                    value.extend(literals::escape(&mut self.cursor, &mut lexed, start));
                }
                c if is_identifier_part(c) => value.push(self.cursor.advance()),
                _ => break,
            }
        }
        if verbatim || escaped {
            lexed.value_text = Some(value);
            return (lexed, None);
        }

        let text = self.cursor.slice(start);
        if let Some(kind) = SyntaxKind::keyword(text) {
            lexed.kind = kind;
            match kind {
                TRUE_KW => lexed.value = Some(TokenValue::Bool(true)),
                FALSE_KW => lexed.value = Some(TokenValue::Bool(false)),
                _ => {}
            }
            return (lexed, None);
        }
        (lexed, SyntaxKind::contextual_keyword(text))
    }

    fn punctuation(&mut self) -> Lexed {
        let start = self.cursor.pos();
        let kind = match self.cursor.advance() {
            '~' => TILDE,
            '!' => self.then('=', EXCLAMATION_EQUALS, EXCLAMATION),
            '%' => self.then('=', PERCENT_EQUALS, PERCENT),
            '^' => self.then('=', CARET_EQUALS, CARET),
            '*' => self.then('=', ASTERISK_EQUALS, ASTERISK),
            '/' => self.then('=', SLASH_EQUALS, SLASH),
            '(' => OPEN_PAREN,
            ')' => CLOSE_PAREN,
            '[' => OPEN_BRACKET,
            ']' => CLOSE_BRACKET,
            '{' => OPEN_BRACE,
            '}' => CLOSE_BRACE,
            ';' => SEMICOLON,
            ',' => COMMA,
            '&' if self.cursor.eat('&') => AMPERSAND_AMPERSAND,
            '&' => self.then('=', AMPERSAND_EQUALS, AMPERSAND),
            '|' if self.cursor.eat('|') => BAR_BAR,
            '|' => self.then('=', BAR_EQUALS, BAR),
            '-' if self.cursor.eat('-') => MINUS_MINUS,
            '-' if self.cursor.eat('>') => MINUS_GREATER_THAN,
            '-' => self.then('=', MINUS_EQUALS, MINUS),
            '+' if self.cursor.eat('+') => PLUS_PLUS,
            '+' => self.then('=', PLUS_EQUALS, PLUS),
            '=' if self.cursor.eat('=') => EQUALS_EQUALS,
            '=' => self.then('>', EQUALS_GREATER_THAN, EQUALS),
            ':' => self.then(':', COLON_COLON, COLON),
            '<' if self.cursor.eat_str("<=") => LESS_THAN_LESS_THAN_EQUALS,
            '<' if self.cursor.eat('<') => LESS_THAN_LESS_THAN,
            '<' => self.then('=', LESS_THAN_EQUALS, LESS_THAN),
            // `>>` is assembled by the parser so that `List<List<int>>` closes twice.
            '>' => self.then('=', GREATER_THAN_EQUALS, GREATER_THAN),
            '.' => self.then('.', DOT_DOT, DOT),
            '?' if self.cursor.eat_str("?=") => QUESTION_QUESTION_EQUALS,
            '?' => self.then('?', QUESTION_QUESTION, QUESTION),
            c => {
                let mut lexed = Lexed::new(BAD_TOKEN);
                lexed.error_with(
                    start,
                    ErrorCode::UnexpectedCharacter,
                    &[c.to_string()],
                    start..self.cursor.pos(),
                );
                return lexed;
            }
        };
        self.track_hole(kind);
        Lexed::new(kind)
    }

    fn then(&mut self, c: char, matched: SyntaxKind, otherwise: SyntaxKind) -> SyntaxKind {
        if self.cursor.eat(c) { matched } else { otherwise }
    }

    /// Follows bracket nesting inside an interpolation hole, which ends at a
    /// top-level `}` and switches to format text at a top-level `:`.
    fn track_hole(&mut self, kind: SyntaxKind) {
        let Some(Mode::Hole { depth, formatted, .. }) = self.modes.last_mut() else {
            return;
        };
        match kind {
            OPEN_PAREN | OPEN_BRACKET | OPEN_BRACE => *depth += 1,
            CLOSE_PAREN | CLOSE_BRACKET | CLOSE_BRACE if *depth > 0 => *depth -= 1,
            CLOSE_BRACE => {
                self.modes.pop();
            }
            COLON if *depth == 0 => {
                *formatted = true;
                self.modes.push(Mode::Format);
            }
            _ => {}
        }
    }

    /// A hole cut short by the end of its string or line gets a missing `}`.
    fn unclosed_hole(&mut self, leading: &[GreenTrivia]) -> Option<Token> {
        let Some(&Mode::Hole { verbatim, formatted, .. }) = self.modes.last() else {
            return None;
        };
        let c = self.cursor.peek();
        let cut = self.cursor.is_eof() || (formatted && c != '}') || (!verbatim && is_newline(c));
        if !cut {
            return None;
        }
        self.modes.pop();
        Some(self.missing(leading.to_vec(), CLOSE_BRACE, ErrorCode::UnclosedExpressionHole))
    }

    fn interpolated_text(&mut self, verbatim: bool) -> Token {
        let start = self.cursor.pos();
        let c = self.cursor.peek();
        let lexed = match c {
            _ if self.cursor.is_eof() || (!verbatim && is_newline(c)) => {
                self.modes.pop();
                return self.missing(
                    Vec::new(),
                    INTERPOLATED_STRING_END,
                    ErrorCode::UnterminatedStringLit,
                );
            }
            '"' if !(verbatim && self.cursor.second() == '"') => {
                self.cursor.advance();
                self.modes.pop();
                Lexed::new(INTERPOLATED_STRING_END)
            }
            '{' if self.cursor.second() != '{' => {
                self.cursor.advance();
                self.modes.push(Mode::Hole { verbatim, depth: 0, formatted: false });
                Lexed::new(OPEN_BRACE)
            }
            _ => literals::interpolated_text(&mut self.cursor, verbatim),
        };
        let text = self.cursor.slice(start);
        let trailing = if self.trailing_allowed() { self.trailing() } else { Vec::new() };
        self.finish(Vec::new(), lexed, text, trailing, None)
    }

    fn format_text(&mut self) -> Token {
        let start = self.cursor.pos();
        let lexed = literals::format_text(&mut self.cursor);
        self.modes.pop();
        let text = self.cursor.slice(start);
        if text.is_empty() {
            let green = GreenToken::missing(INTERPOLATED_STRING_TEXT_TOKEN);
            return Token { kind: INTERPOLATED_STRING_TEXT_TOKEN, contextual_kind: None, green };
        }
        self.finish(Vec::new(), lexed, text, Vec::new(), None)
    }

    fn end_of_file(&mut self) -> Lexed {
        let mut lexed = Lexed::new(END_OF_FILE);
        if !self.finished {
            self.finished = true;
            lexed.diagnostics.extend(self.preprocessor.unterminated());
        }
        lexed
    }

    fn leading(&mut self) -> Vec<GreenTrivia> {
        let mut trivia = Vec::new();
        loop {
            if self.at_line_start
                && self.modes.is_empty()
                && !self.preprocessor.is_active()
                && let Some(disabled) = self.disabled_text()
            {
                trivia.push(disabled);
                continue;
            }

            let piece = match (self.cursor.peek(), self.cursor.second()) {
                _ if self.cursor.is_eof() => break,
                (c, _) if is_whitespace(c) => self.whitespace(),
                (c, _) if is_newline(c) && !self.in_single_line_hole() => self.end_of_line(),
                ('/', '/') if self.modes.is_empty() && self.is_documentation_comment() => {
                    self.documentation_comment()
                }
                ('/', '/') => self.single_line_comment(),
                ('/', '*') => self.multi_line_comment(),
                ('#', _) if self.modes.is_empty() && self.at_line_start => self.directive(),
                ('#', _) if self.modes.is_empty() => self.misplaced_directive(),
                _ => break,
            };
            trivia.push(piece);
        }
        trivia
    }

    fn trailing(&mut self) -> Vec<GreenTrivia> {
        let mut trivia = Vec::new();
        loop {
            let piece = match (self.cursor.peek(), self.cursor.second()) {
                _ if self.cursor.is_eof() => break,
                (c, _) if is_whitespace(c) => self.whitespace(),
                (c, _) if is_newline(c) && !self.in_single_line_hole() => {
                    trivia.push(self.end_of_line());
                    break;
                }
                ('/', '/') => self.single_line_comment(),
                ('/', '*') => self.multi_line_comment(),
                ('#', _) if self.modes.is_empty() => {
                    trivia.push(self.misplaced_directive());
                    break;
                }
                _ => break,
            };
            trivia.push(piece);
        }
        trivia
    }

    fn whitespace(&mut self) -> GreenTrivia {
        let start = self.cursor.pos();
        self.cursor.advance_while(is_whitespace);
        GreenTrivia::new(WHITESPACE, self.cursor.slice(start))
    }

    fn end_of_line(&mut self) -> GreenTrivia {
        let start = self.cursor.pos();
        self.cursor.eat_newline();
        self.at_line_start = true;
        GreenTrivia::new(END_OF_LINE, self.cursor.slice(start))
    }

    fn single_line_comment(&mut self) -> GreenTrivia {
        let start = self.cursor.pos();
        self.cursor.advance_to_line_end();
        self.at_line_start = false;
        GreenTrivia::new(SINGLE_LINE_COMMENT, self.cursor.slice(start))
    }

    fn multi_line_comment(&mut self) -> GreenTrivia {
        let start = self.cursor.pos();
        self.cursor.eat_str("/*");
        let mut diagnostics = Vec::new();
        loop {
            if self.cursor.eat_str("*/") {
                break;
            }
            if self.cursor.is_eof() {
                let range = TextRange::up_to(TextSize::new((self.cursor.pos() - start) as u32));
                diagnostics.push(Diagnostic::new(ErrorCode::OpenEndedComment, range));
                break;
            }
            self.cursor.advance();
        }
        self.at_line_start = false;
        GreenTrivia::with_diagnostics(MULTI_LINE_COMMENT, self.cursor.slice(start), diagnostics)
    }

    /// Lines skipped by a false conditional, up to the next directive line.
    fn disabled_text(&mut self) -> Option<GreenTrivia> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof()
            && !self.cursor.rest().trim_start_matches(is_whitespace).starts_with('#')
        {
            self.cursor.advance_to_line_end();
            self.cursor.eat_newline();
        }
        (self.cursor.pos() != start)
            .then(|| GreenTrivia::new(DISABLED_TEXT, self.cursor.slice(start)))
    }
}

/// Lexes `text` to the end, `END_OF_FILE` included.
pub fn tokenize(text: &str, options: &ParseOptions) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text, options);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let done = token.kind == END_OF_FILE;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use expect_test::{Expect, expect};

    use super::*;

    fn trivia(list: &GreenTriviaList) -> String {
        let pieces: Vec<_> = list
            .pieces()
            .iter()
            .map(|piece| format!("{:?}{:?}", piece.kind(), piece.to_full_string()))
            .collect();
        pieces.join(" ")
    }

    pub(crate) fn dump(text: &str, options: &ParseOptions) -> String {
        let mut out = String::new();
        for token in tokenize(text, options) {
            let green = &token.green;
            write!(out, "{:?} {:?}", token.kind, green.text()).unwrap();
            if let Some(kind) = token.contextual_kind {
                write!(out, " ({kind:?})").unwrap();
            }
            if green.is_missing() {
                out.push_str(" missing");
            }
            if let Some(value) = green.value() {
                write!(out, " = {value:?}").unwrap();
            }
            if !green.leading().is_empty() {
                write!(out, " leading[{}]", trivia(green.leading())).unwrap();
            }
            if !green.trailing().is_empty() {
                write!(out, " trailing[{}]", trivia(green.trailing())).unwrap();
            }
            for diagnostic in green.diagnostics() {
                write!(out, " {}@{:?}", diagnostic.code().id(), diagnostic.range()).unwrap();
            }
            out.push('\n');
        }
        out
    }

    fn check(text: &str, expect: Expect) {
        let actual = dump(text, &ParseOptions::default());
        expect.assert_eq(&actual);
    }

    #[test]
    fn trivia_attaches_to_tokens() {
        check(
            "  x = 1; // done\n\ty",
            expect![[r#"
                IDENTIFIER "x" leading[WHITESPACE"  "] trailing[WHITESPACE" "]
                EQUALS "=" trailing[WHITESPACE" "]
                NUMERIC_LITERAL "1" = Int32(1)
                SEMICOLON ";" trailing[WHITESPACE" " SINGLE_LINE_COMMENT"// done" END_OF_LINE"\n"]
                IDENTIFIER "y" leading[WHITESPACE"\t"]
                END_OF_FILE ""
            "#]],
        );
    }

    #[test]
    fn keywords_and_contextual_keywords() {
        check(
            "class async @class \\u0061b true",
            expect![[r#"
                CLASS_KW "class" trailing[WHITESPACE" "]
                IDENTIFIER "async" (ASYNC_KW) trailing[WHITESPACE" "]
                IDENTIFIER "@class" trailing[WHITESPACE" "]
                IDENTIFIER "\\u0061b" trailing[WHITESPACE" "]
                TRUE_KW "true" = Bool(true)
                END_OF_FILE ""
            "#]],
        );
    }

    #[test]
    fn identifier_value_text_drops_escapes() {
        let tokens = tokenize("@class \\u0061b", &ParseOptions::default());
        assert_eq!(tokens[0].green.value_text(), "class");
        assert_eq!(tokens[1].green.value_text(), "ab");
    }

    #[test]
    fn operators() {
        let tokens = tokenize("a>>=b ?? c?.d => e<<=f", &ParseOptions::default());
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(
            kinds,
            [
                IDENTIFIER,
                GREATER_THAN,
                GREATER_THAN_EQUALS,
                IDENTIFIER,
                QUESTION_QUESTION,
                IDENTIFIER,
                QUESTION,
                DOT,
                IDENTIFIER,
                EQUALS_GREATER_THAN,
                IDENTIFIER,
                LESS_THAN_LESS_THAN_EQUALS,
                IDENTIFIER,
                END_OF_FILE,
            ]
        );
        assert!(tokens[1].is_adjacent_to(&tokens[2]));
    }

    #[test]
    fn unexpected_character() {
        check(
            "a ` b",
            expect![[r#"
                IDENTIFIER "a" trailing[WHITESPACE" "]
                BAD_TOKEN "`" trailing[WHITESPACE" "] CS1056@0..1
                IDENTIFIER "b"
                END_OF_FILE ""
            "#]],
        );
    }

    #[test]
    fn unterminated_block_comment() {
        check(
            "x /* open",
            expect![[r#"
                IDENTIFIER "x" trailing[WHITESPACE" " MULTI_LINE_COMMENT"/* open"]
                END_OF_FILE ""
            "#]],
        );
        let tokens = tokenize("x /* open", &ParseOptions::default());
        let comment = &tokens[0].green.trailing().pieces()[1];
        assert_eq!(comment.diagnostics()[0].code(), ErrorCode::OpenEndedComment);
    }

    #[test]
    fn interpolated_strings() {
        check(
            "$\"a{b,5:N2}c{{\" x",
            expect![[r#"
                INTERPOLATED_STRING_START "$\""
                INTERPOLATED_STRING_TEXT_TOKEN "a" = String("a")
                OPEN_BRACE "{"
                IDENTIFIER "b"
                COMMA ","
                NUMERIC_LITERAL "5" = Int32(5)
                COLON ":"
                INTERPOLATED_STRING_TEXT_TOKEN "N2"
                CLOSE_BRACE "}"
                INTERPOLATED_STRING_TEXT_TOKEN "c{{" = String("c{")
                INTERPOLATED_STRING_END "\"" trailing[WHITESPACE" "]
                IDENTIFIER "x"
                END_OF_FILE ""
            "#]],
        );
    }

    #[test]
    fn unterminated_interpolations() {
        check(
            "$\"{a\nb",
            expect![[r#"
                INTERPOLATED_STRING_START "$\""
                OPEN_BRACE "{"
                IDENTIFIER "a"
                CLOSE_BRACE "" missing CS8076@0..0
                INTERPOLATED_STRING_END "" missing CS1039@0..0
                IDENTIFIER "b" leading[END_OF_LINE"\n"]
                END_OF_FILE ""
            "#]],
        );
        check(
            "$@\"{x:}\"",
            expect![[r#"
                INTERPOLATED_VERBATIM_STRING_START "$@\""
                OPEN_BRACE "{"
                IDENTIFIER "x"
                COLON ":"
                INTERPOLATED_STRING_TEXT_TOKEN "" missing
                CLOSE_BRACE "}"
                INTERPOLATED_STRING_END "\""
                END_OF_FILE ""
            "#]],
        );
    }

    #[test]
    fn nested_braces_stay_in_the_hole() {
        let tokens = tokenize("$\"{new[] {1}}\"", &ParseOptions::default());
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert_eq!(
            kinds,
            [
                INTERPOLATED_STRING_START,
                OPEN_BRACE,
                NEW_KW,
                OPEN_BRACKET,
                CLOSE_BRACKET,
                OPEN_BRACE,
                NUMERIC_LITERAL,
                CLOSE_BRACE,
                CLOSE_BRACE,
                INTERPOLATED_STRING_END,
                END_OF_FILE,
            ]
        );
    }

    #[test]
    fn trailing_trivia_stops_after_line_break() {
        let list = Tokenizer::trailing_trivia(" // c\n  x", &ParseOptions::default());
        expect![[r#"WHITESPACE" " SINGLE_LINE_COMMENT"// c" END_OF_LINE"\n""#]].assert_eq(&trivia(&list));
    }
}
