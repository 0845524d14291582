use std::str::Chars;

pub(crate) const EOF_CHAR: char = '\0';

/// Character cursor over the source text.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    chars: Chars<'a>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars() }
    }

    /// Byte offset of the next character.
    pub(crate) fn pos(&self) -> usize {
        self.text.len() - self.chars.as_str().len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn slice(&self, start: usize) -> &'a str {
        &self.text[start..self.pos()]
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        self.nth(1)
    }

    pub(crate) fn nth(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == c && !self.is_eof() {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            for _ in s.chars() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    /// Advances to, but not past, the next line break.
    pub(crate) fn advance_to_line_end(&mut self) {
        self.advance_while(|c| !is_newline(c));
    }

    /// Consumes one line break, `\r\n` counting as one.
    pub(crate) fn eat_newline(&mut self) -> bool {
        match self.peek() {
            '\r' => {
                self.advance();
                self.eat('\n');
                true
            }
            c if is_newline(c) && !self.is_eof() => {
                self.advance();
                true
            }
            _ => false,
        }
    }
}

pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{b}' | '\u{c}' | '\u{a0}' | '\u{feff}')
        || (!c.is_ascii() && !is_newline(c) && c.is_whitespace())
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub(crate) fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_newlines() {
        let mut cursor = Cursor::new("ab\r\nc");
        cursor.advance_to_line_end();
        assert_eq!(cursor.slice(0), "ab");
        assert!(cursor.eat_newline());
        assert_eq!(cursor.pos(), 4);
        assert_eq!(cursor.peek(), 'c');
        assert!(!cursor.eat('x'));
        assert!(cursor.eat('c'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), EOF_CHAR);
        assert!(!cursor.eat(EOF_CHAR));
    }
}
