//! `///` documentation comments, lexed into XML structured trivia.

use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::{
    Builder, DocumentationMode, GreenNode, GreenToken, GreenTrivia, GreenTriviaList,
};

use crate::Tokenizer;
use crate::cursor::{is_identifier_part, is_identifier_start, is_newline, is_whitespace};

fn is_documentation_line(text: &str) -> bool {
    let text = text.trim_start_matches([' ', '\t']);
    text.starts_with("///") && !text.starts_with("////")
}

fn after_newline(text: &str) -> &str {
    text.strip_prefix("\r\n").unwrap_or_else(|| {
        let mut chars = text.chars();
        chars.next();
        chars.as_str()
    })
}

fn starts_tag(text: &str) -> bool {
    text.strip_prefix('<').and_then(|rest| rest.chars().next()).is_some_and(is_identifier_start)
}

fn is_name_part(c: char) -> bool {
    is_identifier_part(c) || matches!(c, ':' | '-' | '.')
}

impl Tokenizer<'_> {
    pub(crate) fn is_documentation_comment(&self) -> bool {
        self.documentation_mode != DocumentationMode::None
            && is_documentation_line(self.cursor.rest())
    }

    /// Lexes consecutive `///` lines into one documentation comment, the
    /// final line break included.
    pub(crate) fn documentation_comment(&mut self) -> GreenTrivia {
        let mut builder = Builder::new();
        builder.start_node(SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA);
        let mut documentation = Documentation { tokenizer: self, leading: Vec::new(), ended: false };
        documentation.exterior();
        documentation.content(&mut builder, false);
        let end = documentation.empty_token(END_OF_DOCUMENTATION_COMMENT);
        builder.token(end);
        builder.finish_node();
        self.at_line_start = true;
        GreenTrivia::structured(builder.finish())
    }
}

struct Documentation<'t, 'a> {
    tokenizer: &'t mut Tokenizer<'a>,
    /// Exterior waiting for the first token of its line.
    leading: Vec<GreenTrivia>,
    ended: bool,
}

impl Documentation<'_, '_> {
    fn at_end(&self) -> bool {
        self.ended || self.tokenizer.cursor.is_eof()
    }

    fn rest(&self) -> &str {
        self.tokenizer.cursor.rest()
    }

    fn peek(&self) -> char {
        self.tokenizer.cursor.peek()
    }

    /// Consumes indentation and `///`.
    fn exterior(&mut self) {
        let cursor = &mut self.tokenizer.cursor;
        let start = cursor.pos();
        cursor.advance_while(|c| c == ' ' || c == '\t');
        cursor.eat_str("///");
        self.leading.push(GreenTrivia::new(DOCUMENTATION_COMMENT_EXTERIOR, cursor.slice(start)));
    }

    fn next_line(&mut self) {
        if is_documentation_line(self.rest()) {
            self.exterior();
        } else {
            self.ended = true;
        }
    }

    fn token(&mut self, kind: SyntaxKind, start: usize, trailing: Vec<GreenTrivia>) -> GreenToken {
        let text = self.tokenizer.cursor.slice(start);
        let leading = GreenTriviaList::new(std::mem::take(&mut self.leading));
        GreenToken::new(kind, text, leading, GreenTriviaList::new(trailing))
    }

    fn empty_token(&mut self, kind: SyntaxKind) -> GreenToken {
        let start = self.tokenizer.cursor.pos();
        self.token(kind, start, Vec::new())
    }

    /// Punctuation of a tag; `trailing` lets whitespace inside the tag follow it.
    fn tag_token(&mut self, kind: SyntaxKind, trailing: bool) -> GreenToken {
        let start = self.tokenizer.cursor.pos();
        let len = kind.fixed_text().map_or(1, str::len);
        while self.tokenizer.cursor.pos() - start < len {
            self.tokenizer.cursor.advance();
        }
        let trailing = if trailing { self.tag_trivia() } else { Vec::new() };
        self.token(kind, start, trailing)
    }

    /// Whitespace inside a tag, which may continue on the next `///` line.
    fn tag_trivia(&mut self) -> Vec<GreenTrivia> {
        let mut trivia = Vec::new();
        loop {
            let c = self.peek();
            if self.tokenizer.cursor.is_eof() {
                break;
            } else if is_whitespace(c) {
                trivia.push(self.tokenizer.whitespace());
            } else if is_newline(c) && is_documentation_line(after_newline(self.rest())) {
                trivia.push(self.tokenizer.end_of_line());
                self.exterior();
                trivia.append(&mut self.leading);
            } else {
                break;
            }
        }
        trivia
    }

    fn content(&mut self, builder: &mut Builder, in_element: bool) {
        while !self.at_end() {
            if in_element && self.rest().starts_with("</") {
                return;
            }
            if starts_tag(self.rest()) {
                self.element(builder);
            } else {
                self.text(builder, in_element);
            }
        }
    }

    fn text(&mut self, builder: &mut Builder, in_element: bool) {
        let stops = |rest: &str| {
            rest.is_empty()
                || rest.starts_with(is_newline)
                || starts_tag(rest)
                || (in_element && rest.starts_with("</"))
        };
        builder.start_node(XML_TEXT);
        while !self.at_end()
            && !(starts_tag(self.rest()) || (in_element && self.rest().starts_with("</")))
        {
            let start = self.tokenizer.cursor.pos();
            if is_newline(self.peek()) {
                self.tokenizer.cursor.eat_newline();
                let token = self.token(XML_TEXT_LITERAL_NEW_LINE, start, Vec::new());
                builder.token(token);
                self.next_line();
                continue;
            }
            self.tokenizer.cursor.advance();
            while !stops(self.rest()) {
                self.tokenizer.cursor.advance();
            }
            let token = self.token(XML_TEXT_LITERAL, start, Vec::new());
            builder.token(token);
        }
        builder.finish_node();
    }

    fn element(&mut self, builder: &mut Builder) {
        let less_than = self.tag_token(LESS_THAN, true);
        let name = self.name();
        let mut attributes = Vec::new();
        while !self.at_end() && is_identifier_start(self.peek()) {
            attributes.push(self.attribute());
        }

        if self.rest().starts_with("/>") {
            let close = self.tag_token(SLASH_GREATER_THAN, false);
            builder.start_node(XML_EMPTY_ELEMENT);
            builder.token(less_than);
            builder.node(name);
            for attribute in attributes {
                builder.node(attribute);
            }
            builder.token(close);
            builder.finish_node();
            return;
        }

        let close = if self.peek() == '>' {
            self.tag_token(GREATER_THAN, false)
        } else {
            GreenToken::missing(GREATER_THAN)
        };
        builder.start_node(XML_ELEMENT);
        builder.start_node(XML_ELEMENT_START_TAG);
        builder.token(less_than);
        builder.node(name);
        for attribute in attributes {
            builder.node(attribute);
        }
        builder.token(close);
        builder.finish_node();

        self.content(builder, true);

        builder.start_node(XML_ELEMENT_END_TAG);
        if !self.at_end() && self.rest().starts_with("</") {
            let less_than_slash = self.tag_token(LESS_THAN_SLASH, true);
            builder.token(less_than_slash);
            let name = self.name();
            builder.node(name);
            let close = if self.peek() == '>' {
                self.tag_token(GREATER_THAN, false)
            } else {
                GreenToken::missing(GREATER_THAN)
            };
            builder.token(close);
        } else {
            builder.token(GreenToken::missing(LESS_THAN_SLASH));
            builder.node(GreenNode::new(XML_NAME, [GreenToken::missing(IDENTIFIER).into()]));
            builder.token(GreenToken::missing(GREATER_THAN));
        }
        builder.finish_node();
        builder.finish_node();
    }

    fn name(&mut self) -> GreenNode {
        let start = self.tokenizer.cursor.pos();
        self.tokenizer.cursor.advance_while(is_name_part);
        let token = if self.tokenizer.cursor.pos() == start {
            GreenToken::missing(IDENTIFIER)
        } else {
            let trailing = self.tag_trivia();
            self.token(IDENTIFIER, start, trailing)
        };
        GreenNode::new(XML_NAME, [token.into()])
    }

    fn attribute(&mut self) -> GreenNode {
        let mut builder = Builder::new();
        builder.start_node(XML_TEXT_ATTRIBUTE);
        let name = self.name();
        builder.node(name);
        let equals = if self.peek() == '=' {
            self.tag_token(EQUALS, true)
        } else {
            GreenToken::missing(EQUALS)
        };
        builder.token(equals);

        match self.peek() {
            quote @ ('"' | '\'') => {
                let kind = if quote == '"' { DOUBLE_QUOTE } else { SINGLE_QUOTE };
                let open = self.tag_token(kind, false);
                builder.token(open);
                let start = self.tokenizer.cursor.pos();
                self.tokenizer.cursor.advance_while(|c| c != quote && !is_newline(c));
                if self.tokenizer.cursor.pos() != start {
                    let text = self.token(XML_TEXT_LITERAL, start, Vec::new());
                    builder.token(text);
                }
                let close = if self.peek() == quote && !self.tokenizer.cursor.is_eof() {
                    self.tag_token(kind, true)
                } else {
                    GreenToken::missing(kind)
                };
                builder.token(close);
            }
            _ => {
                builder.token(GreenToken::missing(DOUBLE_QUOTE));
                builder.token(GreenToken::missing(DOUBLE_QUOTE));
            }
        }
        builder.finish_node();
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use sharpen_syntax::{DocumentationMode, ParseOptions, SyntaxKind::*, SyntaxNode};

    use crate::tokenize;

    fn documentation(text: &str) -> SyntaxNode {
        let tokens = tokenize(text, &ParseOptions::default());
        let trivia = tokens[0]
            .green
            .leading()
            .pieces()
            .iter()
            .find(|piece| piece.kind() == SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA)
            .and_then(|piece| piece.structure())
            .cloned()
            .unwrap();
        SyntaxNode::new_root(trivia)
    }

    #[test]
    fn elements_and_text() {
        let text = "/// <summary>Hi</summary>\n    /// <see cref=\"A\"/>\n    class C {}";
        expect![[r#"
            SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA@0..50
              LIST@0..50
                XML_TEXT@0..4
                  LIST@0..4
                    leading DOCUMENTATION_COMMENT_EXTERIOR@0..3 "///"
                    XML_TEXT_LITERAL@3..4 " "
                XML_ELEMENT@4..25
                  XML_ELEMENT_START_TAG@4..13
                    LESS_THAN@4..5 "<"
                    XML_NAME@5..12
                      IDENTIFIER@5..12 "summary"
                    LIST@12..12
                    GREATER_THAN@12..13 ">"
                  LIST@13..15
                    XML_TEXT@13..15
                      LIST@13..15
                        XML_TEXT_LITERAL@13..15 "Hi"
                  XML_ELEMENT_END_TAG@15..25
                    LESS_THAN_SLASH@15..17 "</"
                    XML_NAME@17..24
                      IDENTIFIER@17..24 "summary"
                    GREATER_THAN@24..25 ">"
                XML_TEXT@25..34
                  LIST@25..34
                    XML_TEXT_LITERAL_NEW_LINE@25..26 "\n"
                    leading DOCUMENTATION_COMMENT_EXTERIOR@26..33 "    ///"
                    XML_TEXT_LITERAL@33..34 " "
                XML_EMPTY_ELEMENT@34..49
                  LESS_THAN@34..35 "<"
                  XML_NAME@35..39
                    IDENTIFIER@35..38 "see"
                    trailing WHITESPACE@38..39 " "
                  LIST@39..47
                    XML_TEXT_ATTRIBUTE@39..47
                      XML_NAME@39..43
                        IDENTIFIER@39..43 "cref"
                      EQUALS@43..44 "="
                      DOUBLE_QUOTE@44..45 "\""
                      LIST@45..46
                        XML_TEXT_LITERAL@45..46 "A"
                      DOUBLE_QUOTE@46..47 "\""
                  SLASH_GREATER_THAN@47..49 "/>"
                XML_TEXT@49..50
                  LIST@49..50
                    XML_TEXT_LITERAL_NEW_LINE@49..50 "\n"
              END_OF_DOCUMENTATION_COMMENT@50..50 ""
        "#]]
        .assert_eq(&documentation(text).debug_dump());
    }

    #[test]
    fn unclosed_element_gets_missing_end_tag() {
        let root = documentation("/// <para>text\nx");
        let end_tag = root.descendants().nodes().find(|node| node.kind() == XML_ELEMENT_END_TAG);
        let end_tag = end_tag.unwrap();
        assert!(end_tag.is_missing());
        assert_eq!(root.to_full_string(), "/// <para>text\n");
    }

    #[test]
    fn quadruple_slash_is_a_comment() {
        let tokens = tokenize("//// not docs\nx", &ParseOptions::default());
        assert_eq!(tokens[0].green.leading().pieces()[0].kind(), SINGLE_LINE_COMMENT);

        let options = ParseOptions::default().with_documentation_mode(DocumentationMode::None);
        let tokens = tokenize("/// plain\nx", &options);
        assert_eq!(tokens[0].green.leading().pieces()[0].kind(), SINGLE_LINE_COMMENT);
    }
}
