//! Preprocessor directives and conditional compilation state.

use rustc_hash::FxHashSet;
use sharpen_errors::{Diagnostic, ErrorCode};
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::{
    Builder, GreenNode, GreenToken, GreenTrivia, GreenTriviaList, NodeOrToken, ParseOptions,
    TokenValue,
};
use text_size::{TextRange, TextSize};

use crate::Tokenizer;
use crate::cursor::{is_identifier_part, is_identifier_start, is_newline, is_whitespace};
use crate::literals::{self, Lexed};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BranchKind {
    Conditional,
    Region,
}

#[derive(Debug)]
struct Branch {
    kind: BranchKind,
    active: bool,
    taken: bool,
    seen_else: bool,
}

/// Defined symbols and the stack of open `#if` and `#region` blocks.
#[derive(Debug)]
pub(crate) struct Preprocessor {
    defined: FxHashSet<Box<str>>,
    branches: Vec<Branch>,
}

impl Preprocessor {
    pub(crate) fn new(options: &ParseOptions) -> Self {
        Self { defined: options.preprocessor_symbols().map(Into::into).collect(), branches: Vec::new() }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.branches.iter().all(|branch| branch.active)
    }

    fn is_parent_active(&self) -> bool {
        let open = self.branches.len().saturating_sub(1);
        self.branches[..open].iter().all(|branch| branch.active)
    }

    /// One diagnostic per block still open at the end of the file.
    pub(crate) fn unterminated(&self) -> impl Iterator<Item = Diagnostic> + use<'_> {
        self.branches.iter().rev().map(|branch| {
            let code = match branch.kind {
                BranchKind::Conditional => ErrorCode::EndifDirectiveExpected,
                BranchKind::Region => ErrorCode::EndRegionDirectiveExpected,
            };
            Diagnostic::new(code, TextRange::empty(TextSize::new(0)))
        })
    }

    fn open_if(&mut self, condition: bool) {
        let active = self.is_active() && condition;
        self.branches.push(Branch {
            kind: BranchKind::Conditional,
            active,
            taken: active,
            seen_else: false,
        });
    }

    fn open_elif(&mut self, condition: bool) -> bool {
        let parent_active = self.is_parent_active();
        match self.branches.last_mut() {
            Some(branch) if branch.kind == BranchKind::Conditional && !branch.seen_else => {
                branch.active = parent_active && !branch.taken && condition;
                branch.taken |= branch.active;
                true
            }
            _ => false,
        }
    }

    fn open_else(&mut self) -> bool {
        let parent_active = self.is_parent_active();
        match self.branches.last_mut() {
            Some(branch) if branch.kind == BranchKind::Conditional && !branch.seen_else => {
                branch.active = parent_active && !branch.taken;
                branch.taken = true;
                branch.seen_else = true;
                true
            }
            _ => false,
        }
    }

    fn close(&mut self, kind: BranchKind) -> bool {
        if self.branches.last().is_some_and(|branch| branch.kind == kind) {
            self.branches.pop();
            true
        } else {
            false
        }
    }

    fn open_region(&mut self) {
        self.branches.push(Branch {
            kind: BranchKind::Region,
            active: true,
            taken: true,
            seen_else: false,
        });
    }

    fn evaluate(&self, condition: &GreenNode) -> bool {
        let operand = |index: usize| {
            condition
                .children()
                .get(index)
                .and_then(NodeOrToken::as_node)
                .is_some_and(|node| self.evaluate(node))
        };
        match condition.kind() {
            LOGICAL_OR_EXPRESSION => operand(0) || operand(2),
            LOGICAL_AND_EXPRESSION => operand(0) && operand(2),
            EQUALS_EXPRESSION => operand(0) == operand(2),
            NOT_EQUALS_EXPRESSION => operand(0) != operand(2),
            LOGICAL_NOT_EXPRESSION => !operand(1),
            PARENTHESIZED_EXPRESSION => operand(1),
            TRUE_LITERAL_EXPRESSION => true,
            IDENTIFIER_NAME => condition
                .first_token()
                .is_some_and(|name| !name.is_missing() && self.defined.contains(name.text())),
            _ => false,
        }
    }
}

fn missing(kind: SyntaxKind, code: ErrorCode) -> GreenToken {
    GreenToken::missing(kind)
        .with_diagnostics(vec![Diagnostic::new(code, TextRange::empty(TextSize::new(0)))])
}

fn name_or_literal(token: GreenToken) -> GreenNode {
    match token.text() {
        "true" => GreenNode::new(TRUE_LITERAL_EXPRESSION, [token.with_kind(TRUE_KW).into()]),
        "false" => GreenNode::new(FALSE_LITERAL_EXPRESSION, [token.with_kind(FALSE_KW).into()]),
        _ => GreenNode::new(IDENTIFIER_NAME, [token.into()]),
    }
}

fn missing_name() -> GreenNode {
    GreenNode::new(IDENTIFIER_NAME, [missing(IDENTIFIER, ErrorCode::InvalidPreprocExpr).into()])
}

impl<'a> Tokenizer<'a> {
    /// Lexes a directive starting at `#` at the beginning of a line.
    pub(crate) fn directive(&mut self) -> GreenTrivia {
        let active = self.preprocessor.is_active();
        let hash = self.hash();
        let name = self.directive_lexeme();
        let keyword = name
            .as_ref()
            .filter(|name| name.kind() == IDENTIFIER)
            .and_then(|name| SyntaxKind::preprocessor_keyword(name.text()));

        let (kind, name) =
            match keyword.and_then(|keyword| Some((directive_kind(keyword)?, keyword))) {
                Some((kind, keyword)) => (kind, name.map(|name| name.with_kind(keyword))),
                None => (BAD_DIRECTIVE_TRIVIA, name),
            };

        tracing::trace!(?kind, active, "directive");
        let mut builder = Builder::new();
        if kind == PRAGMA_WARNING_DIRECTIVE_TRIVIA {
            return self.pragma(builder, hash, name);
        }

        let mut rest = Vec::new();
        builder.start_node(kind);
        builder.token(hash);
        match name {
            Some(name) if kind != BAD_DIRECTIVE_TRIVIA || name.kind() == IDENTIFIER => {
                builder.token(name);
            }
            other => rest.extend(other),
        }
        let unexpected = |builder: &mut Builder| {
            let range = TextRange::up_to(builder.text_len());
            builder.error(Diagnostic::new(ErrorCode::UnexpectedDirective, range));
        };
        match kind {
            IF_DIRECTIVE_TRIVIA => {
                let (condition, rest) = self.condition();
                let value = self.preprocessor.evaluate(&condition);
                self.preprocessor.open_if(value);
                builder.node(condition);
                self.end_of_directive(&mut builder, rest, Some(ErrorCode::EndOfPpLineExpected));
            }
            ELIF_DIRECTIVE_TRIVIA => {
                let (condition, rest) = self.condition();
                let value = self.preprocessor.evaluate(&condition);
                if !self.preprocessor.open_elif(value) {
                    unexpected(&mut builder);
                }
                builder.node(condition);
                self.end_of_directive(&mut builder, rest, Some(ErrorCode::EndOfPpLineExpected));
            }
            ELSE_DIRECTIVE_TRIVIA => {
                if !self.preprocessor.open_else() {
                    unexpected(&mut builder);
                }
                self.end_of_directive(&mut builder, rest, Some(ErrorCode::EndOfPpLineExpected));
            }
            END_IF_DIRECTIVE_TRIVIA => {
                if !self.preprocessor.close(BranchKind::Conditional) {
                    unexpected(&mut builder);
                }
                self.end_of_directive(&mut builder, rest, Some(ErrorCode::EndOfPpLineExpected));
            }
            REGION_DIRECTIVE_TRIVIA => {
                self.preprocessor.open_region();
                self.message(&mut builder);
            }
            END_REGION_DIRECTIVE_TRIVIA => {
                if !self.preprocessor.close(BranchKind::Region) {
                    unexpected(&mut builder);
                }
                self.message(&mut builder);
            }
            ERROR_DIRECTIVE_TRIVIA | WARNING_DIRECTIVE_TRIVIA => {
                let start = builder.text_len();
                let message = self.message(&mut builder);
                if active {
                    let code = if kind == ERROR_DIRECTIVE_TRIVIA {
                        ErrorCode::ErrorDirective
                    } else {
                        ErrorCode::WarningDirective
                    };
                    let range = TextRange::at(start, TextSize::of(message));
                    builder.error(Diagnostic::with_args(code, &[message.trim_end()], range));
                }
            }
            DEFINE_DIRECTIVE_TRIVIA | UNDEF_DIRECTIVE_TRIVIA => {
                match self.directive_lexeme() {
                    Some(symbol) if symbol.kind() == IDENTIFIER => {
                        if active && !self.seen_token {
                            if kind == DEFINE_DIRECTIVE_TRIVIA {
                                self.preprocessor.defined.insert(symbol.text().into());
                            } else {
                                self.preprocessor.defined.remove(symbol.text());
                            }
                        }
                        builder.token(symbol);
                    }
                    other => {
                        builder.token(missing(IDENTIFIER, ErrorCode::IdentifierExpected));
                        rest.extend(other);
                    }
                }
                if self.seen_token {
                    let range = TextRange::up_to(builder.text_len());
                    builder.error(Diagnostic::new(ErrorCode::PpDefFollowsToken, range));
                }
                self.end_of_directive(&mut builder, rest, Some(ErrorCode::EndOfPpLineExpected));
            }
            LINE_DIRECTIVE_TRIVIA => self.line(&mut builder),
            NULLABLE_DIRECTIVE_TRIVIA => self.nullable(&mut builder),
            _ => {
                let range = TextRange::up_to(builder.text_len());
                builder.error(Diagnostic::new(ErrorCode::PpDirectiveExpected, range));
                self.end_of_directive(&mut builder, rest, None);
            }
        }
        self.finish_directive(builder)
    }

    /// A `#` that does not start its line: reported and kept as a bad
    /// directive spanning the rest of the line.
    pub(crate) fn misplaced_directive(&mut self) -> GreenTrivia {
        let hash = self.hash();
        let mut builder = Builder::new();
        builder.start_node(BAD_DIRECTIVE_TRIVIA);
        builder.token(hash);
        let range = TextRange::up_to(builder.text_len());
        builder.error(Diagnostic::new(ErrorCode::BadDirectivePlacement, range));
        let mut rest = Vec::new();
        match self.directive_lexeme() {
            Some(name) if name.kind() == IDENTIFIER => builder.token(name),
            other => rest.extend(other),
        }
        self.end_of_directive(&mut builder, rest, None);
        self.finish_directive(builder)
    }

    fn finish_directive(&mut self, mut builder: Builder) -> GreenTrivia {
        builder.finish_node();
        self.at_line_start = true;
        GreenTrivia::structured(builder.finish())
    }

    fn hash(&mut self) -> GreenToken {
        self.cursor.advance();
        let trailing = GreenTriviaList::new(self.directive_whitespace());
        GreenToken::new(HASH, "#", GreenTriviaList::empty(), trailing)
    }

    fn directive_whitespace(&mut self) -> Vec<GreenTrivia> {
        if is_whitespace(self.cursor.peek()) { vec![self.whitespace()] } else { Vec::new() }
    }

    /// Next token on the directive line, or `None` at a comment or the end
    /// of the line.
    fn directive_lexeme(&mut self) -> Option<GreenToken> {
        let c = self.cursor.peek();
        if self.cursor.is_eof() || is_newline(c) || (c == '/' && self.cursor.second() == '/') {
            return None;
        }
        let start = self.cursor.pos();
        let lexed = match c {
            c if is_identifier_start(c) => {
                self.cursor.advance_while(is_identifier_part);
                Lexed::new(IDENTIFIER)
            }
            '0'..='9' => literals::number(&mut self.cursor),
            '"' => literals::string(&mut self.cursor),
            _ => {
                self.cursor.advance();
                let kind = match c {
                    '!' if self.cursor.eat('=') => EXCLAMATION_EQUALS,
                    '!' => EXCLAMATION,
                    '=' if self.cursor.eat('=') => EQUALS_EQUALS,
                    '&' if self.cursor.eat('&') => AMPERSAND_AMPERSAND,
                    '|' if self.cursor.eat('|') => BAR_BAR,
                    '(' => OPEN_PAREN,
                    ')' => CLOSE_PAREN,
                    ',' => COMMA,
                    _ => BAD_TOKEN,
                };
                Lexed::new(kind)
            }
        };
        let text = self.cursor.slice(start);
        let trailing = self.directive_whitespace();
        Some(self.finish(Vec::new(), lexed, text, trailing, None).green)
    }

    /// Skips what is left on the line and adds the `END_OF_DIRECTIVE` token.
    fn end_of_directive(
        &mut self,
        builder: &mut Builder,
        mut skipped: Vec<GreenToken>,
        code: Option<ErrorCode>,
    ) {
        skipped.extend(std::iter::from_fn(|| self.directive_lexeme()));
        let mut leading = Vec::new();
        if !skipped.is_empty() {
            let mut skipped_builder = Builder::new();
            skipped_builder.start_node(SKIPPED_TOKENS_TRIVIA);
            for token in skipped {
                skipped_builder.token(token);
            }
            skipped_builder.finish_node();
            let node = skipped_builder.finish();
            if let Some(code) = code {
                let range = TextRange::at(builder.text_len(), node.full_width());
                builder.error(Diagnostic::new(code, range));
            }
            leading.push(GreenTrivia::structured(node));
        }
        if self.cursor.peek() == '/' && self.cursor.second() == '/' {
            leading.push(self.single_line_comment());
        }
        self.end_of_directive_token(builder, leading);
    }

    fn end_of_directive_token(&mut self, builder: &mut Builder, leading: Vec<GreenTrivia>) {
        let trailing = if is_newline(self.cursor.peek()) && !self.cursor.is_eof() {
            vec![self.end_of_line()]
        } else {
            Vec::new()
        };
        builder.token(GreenToken::new(
            END_OF_DIRECTIVE,
            "",
            GreenTriviaList::new(leading),
            GreenTriviaList::new(trailing),
        ));
    }

    /// Keeps the rest of the line as a message and returns it.
    fn message(&mut self, builder: &mut Builder) -> &'a str {
        let start = self.cursor.pos();
        self.cursor.advance_to_line_end();
        let message = self.cursor.slice(start);
        let leading = if message.is_empty() {
            Vec::new()
        } else {
            vec![GreenTrivia::new(PREPROCESSING_MESSAGE, message)]
        };
        self.end_of_directive_token(builder, leading);
        message
    }

    fn line(&mut self, builder: &mut Builder) {
        let mut rest = Vec::new();
        let mut numbered = false;
        match self.directive_lexeme() {
            Some(number) if number.kind() == NUMERIC_LITERAL => {
                let valid = matches!(number.value(), Some(TokenValue::Int32(line)) if *line > 0);
                let number = if valid {
                    number
                } else {
                    let range = TextRange::up_to(number.width());
                    number.with_diagnostics(vec![Diagnostic::new(ErrorCode::InvalidLineNumber, range)])
                };
                builder.token(number);
                numbered = true;
            }
            Some(keyword) if matches!(keyword.text(), "default" | "hidden") => {
                let kind = if keyword.text() == "default" { DEFAULT_KW } else { HIDDEN_KW };
                builder.token(keyword.with_kind(kind));
            }
            other => {
                builder.token(missing(NUMERIC_LITERAL, ErrorCode::InvalidLineNumber));
                rest.extend(other);
            }
        }
        let mut code = ErrorCode::EndOfPpLineExpected;
        if numbered {
            code = ErrorCode::MissingPpFile;
            match self.directive_lexeme() {
                Some(file) if file.kind() == STRING_LITERAL => {
                    builder.token(file);
                    code = ErrorCode::EndOfPpLineExpected;
                }
                other => rest.extend(other),
            }
        }
        self.end_of_directive(builder, rest, Some(code));
    }

    /// `#pragma warning`; any other pragma is a bad directive.
    fn pragma(
        &mut self,
        mut builder: Builder,
        hash: GreenToken,
        name: Option<GreenToken>,
    ) -> GreenTrivia {
        let mut rest = Vec::new();
        let warning = self.directive_lexeme();
        let (Some(name), Some(warning)) =
            (name.clone(), warning.clone().filter(|warning| warning.text() == "warning"))
        else {
            builder.start_node(BAD_DIRECTIVE_TRIVIA);
            builder.token(hash);
            if let Some(name) = name {
                builder.token(name.with_kind(IDENTIFIER));
            }
            let range = TextRange::up_to(builder.text_len());
            builder.error(Diagnostic::new(ErrorCode::PpDirectiveExpected, range));
            rest.extend(warning);
            self.end_of_directive(&mut builder, rest, None);
            return self.finish_directive(builder);
        };

        let mut code = Some(ErrorCode::EndOfPpLineExpected);
        builder.start_node(PRAGMA_WARNING_DIRECTIVE_TRIVIA);
        builder.token(hash);
        builder.token(name);
        builder.token(warning.with_kind(WARNING_KW));
        match self.directive_lexeme() {
            Some(action) if matches!(action.text(), "disable" | "restore") => {
                let kind = if action.text() == "disable" { DISABLE_KW } else { RESTORE_KW };
                builder.token(action.with_kind(kind));
                while let Some(code) = self.directive_lexeme() {
                    let kind = match code.kind() {
                        IDENTIFIER => IDENTIFIER_NAME,
                        NUMERIC_LITERAL => NUMERIC_LITERAL_EXPRESSION,
                        _ => {
                            rest.push(code);
                            break;
                        }
                    };
                    builder.node(GreenNode::new(kind, [code.into()]));
                    match self.directive_lexeme() {
                        Some(comma) if comma.kind() == COMMA => builder.token(comma),
                        other => {
                            rest.extend(other);
                            break;
                        }
                    }
                }
            }
            other => {
                builder.token(missing(DISABLE_KW, ErrorCode::IllegalPpWarning));
                rest.extend(other);
                code = None;
            }
        }
        self.end_of_directive(&mut builder, rest, code);
        self.finish_directive(builder)
    }

    fn nullable(&mut self, builder: &mut Builder) {
        let mut rest = Vec::new();
        match self.directive_lexeme() {
            Some(setting) if matches!(setting.text(), "enable" | "disable" | "restore") => {
                let kind = SyntaxKind::preprocessor_keyword(setting.text()).unwrap_or(ENABLE_KW);
                builder.token(setting.with_kind(kind));
                match self.directive_lexeme() {
                    Some(target) if matches!(target.text(), "warnings" | "annotations") => {
                        let kind =
                            SyntaxKind::preprocessor_keyword(target.text()).unwrap_or(WARNINGS_KW);
                        builder.token(target.with_kind(kind));
                    }
                    other => rest.extend(other),
                }
            }
            other => {
                builder.token(missing(ENABLE_KW, ErrorCode::NullableDirectiveQualifierExpected));
                rest.extend(other);
            }
        }
        self.end_of_directive(builder, rest, Some(ErrorCode::EndOfPpLineExpected));
    }

    /// Parses an `#if` condition; also returns a token it could not use.
    fn condition(&mut self) -> (GreenNode, Vec<GreenToken>) {
        let mut parser = Condition { current: self.directive_lexeme(), tokenizer: self };
        let condition = parser.or();
        (condition, parser.current.into_iter().collect())
    }
}

fn directive_kind(keyword: SyntaxKind) -> Option<SyntaxKind> {
    let kind = match keyword {
        IF_KW => IF_DIRECTIVE_TRIVIA,
        ELIF_KW => ELIF_DIRECTIVE_TRIVIA,
        ELSE_KW => ELSE_DIRECTIVE_TRIVIA,
        ENDIF_KW => END_IF_DIRECTIVE_TRIVIA,
        REGION_KW => REGION_DIRECTIVE_TRIVIA,
        ENDREGION_KW => END_REGION_DIRECTIVE_TRIVIA,
        DEFINE_KW => DEFINE_DIRECTIVE_TRIVIA,
        UNDEF_KW => UNDEF_DIRECTIVE_TRIVIA,
        ERROR_KW => ERROR_DIRECTIVE_TRIVIA,
        WARNING_KW => WARNING_DIRECTIVE_TRIVIA,
        LINE_KW => LINE_DIRECTIVE_TRIVIA,
        PRAGMA_KW => PRAGMA_WARNING_DIRECTIVE_TRIVIA,
        NULLABLE_KW => NULLABLE_DIRECTIVE_TRIVIA,
        _ => return None,
    };
    Some(kind)
}

/// Recursive descent over `||`, `&&`, `==`, `!=`, `!` and parentheses.
struct Condition<'t, 'a> {
    tokenizer: &'t mut Tokenizer<'a>,
    current: Option<GreenToken>,
}

impl Condition<'_, '_> {
    fn at(&self, kind: SyntaxKind) -> bool {
        self.current.as_ref().is_some_and(|token| token.kind() == kind)
    }

    fn bump(&mut self) -> Option<GreenToken> {
        let next = self.tokenizer.directive_lexeme();
        std::mem::replace(&mut self.current, next)
    }

    fn binary(
        &mut self,
        operators: &[(SyntaxKind, SyntaxKind)],
        operand: fn(&mut Self) -> GreenNode,
    ) -> GreenNode {
        let mut lhs = operand(self);
        while let Some(&(_, kind)) = operators.iter().find(|(operator, _)| self.at(*operator)) {
            let Some(operator) = self.bump() else { break };
            let rhs = operand(self);
            lhs = GreenNode::new(kind, [lhs.into(), operator.into(), rhs.into()]);
        }
        lhs
    }

    fn or(&mut self) -> GreenNode {
        self.binary(&[(BAR_BAR, LOGICAL_OR_EXPRESSION)], Self::and)
    }

    fn and(&mut self) -> GreenNode {
        self.binary(&[(AMPERSAND_AMPERSAND, LOGICAL_AND_EXPRESSION)], Self::equality)
    }

    fn equality(&mut self) -> GreenNode {
        self.binary(
            &[(EQUALS_EQUALS, EQUALS_EXPRESSION), (EXCLAMATION_EQUALS, NOT_EQUALS_EXPRESSION)],
            Self::unary,
        )
    }

    fn unary(&mut self) -> GreenNode {
        if self.at(EXCLAMATION)
            && let Some(operator) = self.bump()
        {
            let operand = self.unary();
            return GreenNode::new(LOGICAL_NOT_EXPRESSION, [operator.into(), operand.into()]);
        }
        self.primary()
    }

    fn primary(&mut self) -> GreenNode {
        match self.current.as_ref().map(GreenToken::kind) {
            Some(OPEN_PAREN) => {
                let open = self.bump().map(Into::into);
                let inner = self.or();
                let close = if self.at(CLOSE_PAREN) { self.bump() } else { None };
                let close =
                    close.unwrap_or_else(|| missing(CLOSE_PAREN, ErrorCode::CloseParenExpected));
                GreenNode::new(
                    PARENTHESIZED_EXPRESSION,
                    open.into_iter().chain([inner.into(), close.into()]),
                )
            }
            Some(IDENTIFIER) => self.bump().map_or_else(missing_name, name_or_literal),
            _ => missing_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};
    use sharpen_syntax::{GreenTriviaList, ParseOptions, SyntaxNode};

    use crate::{Token, tokenize};

    fn dump_trivia(list: &GreenTriviaList, out: &mut String) {
        for piece in list.pieces() {
            match piece.structure() {
                Some(structure) => out.push_str(&SyntaxNode::new_root(structure.clone()).debug_dump()),
                None => out.push_str(&format!("{:?} {:?}\n", piece.kind(), piece.to_full_string())),
            }
        }
    }

    fn dump(tokens: &[Token]) -> String {
        let mut out = String::new();
        for token in tokens {
            dump_trivia(token.green.leading(), &mut out);
            out.push_str(&format!("{:?} {:?}\n", token.kind, token.text()));
            dump_trivia(token.green.trailing(), &mut out);
        }
        out
    }

    fn check(text: &str, expect: Expect) {
        let options = ParseOptions::default().with_preprocessor_symbols(["DEBUG"]);
        expect.assert_eq(&dump(&tokenize(text, &options)));
    }

    fn codes(text: &str) -> Vec<&'static str> {
        let mut codes = Vec::new();
        for token in tokenize(text, &ParseOptions::default()) {
            codes.extend(token.green.diagnostics().iter().map(|d| d.code().id()));
            for piece in token.green.leading().pieces().iter().chain(token.green.trailing().pieces()) {
                if let Some(structure) = piece.structure() {
                    let root = SyntaxNode::new_root(structure.clone());
                    codes.extend(root.diagnostics().iter().map(|d| d.code().id()));
                }
            }
        }
        codes
    }

    #[test]
    fn conditional_sections() {
        check(
            "#if DEBUG && !RELEASE\na\n#else\nb\n#endif\n",
            expect![[r##"
                IF_DIRECTIVE_TRIVIA@0..22
                  HASH@0..1 "#"
                  IF_KW@1..3 "if"
                  trailing WHITESPACE@3..4 " "
                  LOGICAL_AND_EXPRESSION@4..21
                    IDENTIFIER_NAME@4..10
                      IDENTIFIER@4..9 "DEBUG"
                      trailing WHITESPACE@9..10 " "
                    AMPERSAND_AMPERSAND@10..12 "&&"
                    trailing WHITESPACE@12..13 " "
                    LOGICAL_NOT_EXPRESSION@13..21
                      EXCLAMATION@13..14 "!"
                      IDENTIFIER_NAME@14..21
                        IDENTIFIER@14..21 "RELEASE"
                  END_OF_DIRECTIVE@21..21 ""
                  trailing END_OF_LINE@21..22 "\n"
                IDENTIFIER "a"
                END_OF_LINE "\n"
                ELSE_DIRECTIVE_TRIVIA@0..6
                  HASH@0..1 "#"
                  ELSE_KW@1..5 "else"
                  END_OF_DIRECTIVE@5..5 ""
                  trailing END_OF_LINE@5..6 "\n"
                DISABLED_TEXT "b\n"
                END_IF_DIRECTIVE_TRIVIA@0..7
                  HASH@0..1 "#"
                  ENDIF_KW@1..6 "endif"
                  END_OF_DIRECTIVE@6..6 ""
                  trailing END_OF_LINE@6..7 "\n"
                END_OF_FILE ""
            "##]],
        );
    }

    #[test]
    fn define_changes_later_conditions() {
        check(
            "#define X\n#undef DEBUG\n#if X || DEBUG\nx\n#endif",
            expect![[r##"
                DEFINE_DIRECTIVE_TRIVIA@0..10
                  HASH@0..1 "#"
                  DEFINE_KW@1..7 "define"
                  trailing WHITESPACE@7..8 " "
                  IDENTIFIER@8..9 "X"
                  END_OF_DIRECTIVE@9..9 ""
                  trailing END_OF_LINE@9..10 "\n"
                UNDEF_DIRECTIVE_TRIVIA@0..13
                  HASH@0..1 "#"
                  UNDEF_KW@1..6 "undef"
                  trailing WHITESPACE@6..7 " "
                  IDENTIFIER@7..12 "DEBUG"
                  END_OF_DIRECTIVE@12..12 ""
                  trailing END_OF_LINE@12..13 "\n"
                IF_DIRECTIVE_TRIVIA@0..15
                  HASH@0..1 "#"
                  IF_KW@1..3 "if"
                  trailing WHITESPACE@3..4 " "
                  LOGICAL_OR_EXPRESSION@4..14
                    IDENTIFIER_NAME@4..6
                      IDENTIFIER@4..5 "X"
                      trailing WHITESPACE@5..6 " "
                    BAR_BAR@6..8 "||"
                    trailing WHITESPACE@8..9 " "
                    IDENTIFIER_NAME@9..14
                      IDENTIFIER@9..14 "DEBUG"
                  END_OF_DIRECTIVE@14..14 ""
                  trailing END_OF_LINE@14..15 "\n"
                IDENTIFIER "x"
                END_OF_LINE "\n"
                END_IF_DIRECTIVE_TRIVIA@0..6
                  HASH@0..1 "#"
                  ENDIF_KW@1..6 "endif"
                  END_OF_DIRECTIVE@6..6 ""
                END_OF_FILE ""
            "##]],
        );
    }

    #[test]
    fn region_messages() {
        check(
            "  #region Helpers // x\n#endregion\n",
            expect![[r##"
                WHITESPACE "  "
                REGION_DIRECTIVE_TRIVIA@0..21
                  HASH@0..1 "#"
                  REGION_KW@1..7 "region"
                  trailing WHITESPACE@7..8 " "
                  leading PREPROCESSING_MESSAGE@8..20 "Helpers // x"
                  END_OF_DIRECTIVE@20..20 ""
                  trailing END_OF_LINE@20..21 "\n"
                END_REGION_DIRECTIVE_TRIVIA@0..11
                  HASH@0..1 "#"
                  ENDREGION_KW@1..10 "endregion"
                  END_OF_DIRECTIVE@10..10 ""
                  trailing END_OF_LINE@10..11 "\n"
                END_OF_FILE ""
            "##]],
        );
    }

    #[test]
    fn directive_diagnostics() {
        assert_eq!(codes("#endif\n"), ["CS1028"]);
        assert_eq!(codes("#if A\n"), ["CS1027"]);
        assert_eq!(codes("#region\n"), ["CS1038"]);
        assert_eq!(codes("#if (A\n#endif"), ["CS1026"]);
        assert_eq!(codes("#if\n#endif"), ["CS1517"]);
        assert_eq!(codes("#if A B\n#endif"), ["CS1025"]);
        assert_eq!(codes("#foo\n"), ["CS1024"]);
        assert_eq!(codes("#error stop here \n"), ["CS1029"]);
        assert_eq!(codes("#warning careful\n"), ["CS1030"]);
        assert_eq!(codes("x\n#define A\n"), ["CS1032"]);
        assert_eq!(codes("#define\n"), ["CS1001"]);
        assert_eq!(codes("#line 0\n"), ["CS1576"]);
        assert_eq!(codes("#line 10 x\n"), ["CS1578"]);
        assert_eq!(codes("#pragma warning foo\n"), ["CS1634"]);
        assert_eq!(codes("#nullable\n"), ["CS8637"]);
        assert_eq!(codes("x # y\n"), ["CS1040"]);
        assert!(codes("#if false\n#error no\n#endif\n").is_empty());
    }

    #[test]
    fn error_directive_message_argument() {
        let tokens = tokenize("#error stop here \n", &ParseOptions::default());
        let trivia = &tokens[0].green.leading().pieces()[0];
        let root = SyntaxNode::new_root(trivia.structure().unwrap().clone());
        let diagnostic = root.diagnostics().remove(0);
        assert_eq!(diagnostic.message(), "#error: 'stop here'");
        assert_eq!(diagnostic.range(), text_size::TextRange::new(7.into(), 17.into()));
    }

    #[test]
    fn pragma_and_line() {
        check(
            "#pragma warning disable CS0168, 219\n#line 12 \"a.cs\"\n#nullable enable warnings\n",
            expect![[r##"
                PRAGMA_WARNING_DIRECTIVE_TRIVIA@0..36
                  HASH@0..1 "#"
                  PRAGMA_KW@1..7 "pragma"
                  trailing WHITESPACE@7..8 " "
                  WARNING_KW@8..15 "warning"
                  trailing WHITESPACE@15..16 " "
                  DISABLE_KW@16..23 "disable"
                  trailing WHITESPACE@23..24 " "
                  SEPARATED_LIST@24..35
                    IDENTIFIER_NAME@24..30
                      IDENTIFIER@24..30 "CS0168"
                    COMMA@30..31 ","
                    trailing WHITESPACE@31..32 " "
                    NUMERIC_LITERAL_EXPRESSION@32..35
                      NUMERIC_LITERAL@32..35 "219"
                  END_OF_DIRECTIVE@35..35 ""
                  trailing END_OF_LINE@35..36 "\n"
                LINE_DIRECTIVE_TRIVIA@0..16
                  HASH@0..1 "#"
                  LINE_KW@1..5 "line"
                  trailing WHITESPACE@5..6 " "
                  NUMERIC_LITERAL@6..8 "12"
                  trailing WHITESPACE@8..9 " "
                  STRING_LITERAL@9..15 "\"a.cs\""
                  END_OF_DIRECTIVE@15..15 ""
                  trailing END_OF_LINE@15..16 "\n"
                NULLABLE_DIRECTIVE_TRIVIA@0..26
                  HASH@0..1 "#"
                  NULLABLE_KW@1..9 "nullable"
                  trailing WHITESPACE@9..10 " "
                  ENABLE_KW@10..16 "enable"
                  trailing WHITESPACE@16..17 " "
                  WARNINGS_KW@17..25 "warnings"
                  END_OF_DIRECTIVE@25..25 ""
                  trailing END_OF_LINE@25..26 "\n"
                END_OF_FILE ""
            "##]],
        );
    }
}
