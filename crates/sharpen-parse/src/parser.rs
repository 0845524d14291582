use std::mem;

use drop_bomb::DropBomb;
use sharpen_errors::{Diagnostic, ErrorCode};
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::{
    Builder, GreenNode, GreenToken, GreenTrivia, GreenTriviaList, ParseOptions, SyntaxSet,
};
use sharpen_tokenizer::Token;
use text_size::{TextRange, TextSize};

pub(crate) struct Parser {
    tokens: Vec<Token>,
    /// Full start of every token.
    offsets: Vec<TextSize>,
    pos: usize,
    events: Vec<Event>,
}

impl Parser {
    pub(crate) fn new(text: &str, options: &ParseOptions) -> Self {
        let tokens = sharpen_tokenizer::tokenize(text, options);
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut offset = TextSize::new(0);
        for token in &tokens {
            offsets.push(offset);
            offset += token.green.full_width();
        }
        Self { tokens, offsets, pos: 0, events: Vec::new() }
    }

    fn index(&self, n: usize) -> usize {
        (self.pos + n).min(self.tokens.len() - 1)
    }

    fn token(&self, n: usize) -> &Token {
        &self.tokens[self.index(n)]
    }

    fn span(&self, index: usize) -> TextRange {
        let green = &self.tokens[index].green;
        TextRange::at(self.offsets[index] + green.leading().width(), green.width())
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.token(n).kind
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Whether token `n` is an identifier that reads as contextual keyword
    /// `kind`.
    pub(crate) fn nth_at_contextual(&self, n: usize, kind: SyntaxKind) -> bool {
        let token = self.token(n);
        token.kind == IDENTIFIER && token.contextual_kind == Some(kind)
    }

    pub(crate) fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.nth_at_contextual(0, kind)
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.current())
    }

    pub(crate) fn nth_text(&self, n: usize) -> &str {
        self.token(n).text()
    }

    pub(crate) fn current_text(&self) -> &str {
        self.nth_text(0)
    }

    /// Whether tokens `n` and `n + 1` touch with no trivia in between.
    pub(crate) fn is_adjacent(&self, n: usize) -> bool {
        self.token(n).is_adjacent_to(self.token(n + 1))
    }

    /// Index of the next token, used to detect lack of progress.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_end(&self) -> bool {
        self.at(END_OF_FILE)
    }

    pub(crate) fn bump(&mut self) {
        if self.at_end() {
            return;
        }
        let green = self.token(0).green.clone();
        self.push_token(green, 1);
    }

    /// Consumes an identifier in its contextual keyword role.
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        if self.at_end() {
            return;
        }
        let green = self.token(0).green.with_kind(kind);
        self.push_token(green, 1);
    }

    pub(crate) fn bump_eof(&mut self) {
        debug_assert!(self.at_end());
        let green = self.token(0).green.clone();
        self.push_token(green, 1);
    }

    /// Merges `count` adjacent tokens into one token of `kind`, e.g. the two
    /// `>` of a right shift.
    pub(crate) fn bump_compound(&mut self, kind: SyntaxKind, count: usize) {
        if count == 1 {
            self.bump_remap(kind);
            return;
        }
        let parts = &self.tokens[self.pos..self.pos + count];
        let text: String = parts.iter().map(Token::text).collect();
        let leading = parts[0].green.leading().clone();
        let trailing = parts[count - 1].green.trailing().clone();
        let green = GreenToken::new(kind, &text, leading, trailing);
        self.push_token(green, count);
    }

    fn push_token(&mut self, green: GreenToken, count: usize) {
        self.events.push(Event::Token(green));
        self.pos = (self.pos + count).min(self.tokens.len());
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.bump();
        true
    }

    pub(crate) fn eat_contextual(&mut self, kind: SyntaxKind) -> bool {
        if !self.at_contextual(kind) {
            return false;
        }
        self.bump_remap(kind);
        true
    }

    /// Consumes `kind` or inserts it as a missing token with a diagnostic.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.expected(kind);
        self.missing(kind);
        false
    }

    /// Like [`Parser::expect`] for an identifier playing keyword `kind`.
    pub(crate) fn expect_contextual(&mut self, kind: SyntaxKind) -> bool {
        if self.eat_contextual(kind) {
            return true;
        }
        self.expected(kind);
        self.missing(kind);
        false
    }

    pub(crate) fn expected(&mut self, kind: SyntaxKind) {
        let at = TextRange::empty(self.previous_end());
        let diagnostic = match kind {
            SEMICOLON => Diagnostic::new(ErrorCode::SemicolonExpected, at),
            CLOSE_PAREN => Diagnostic::new(ErrorCode::CloseParenExpected, at),
            CLOSE_BRACE => Diagnostic::new(ErrorCode::RbraceExpected, at),
            OPEN_BRACE => Diagnostic::new(ErrorCode::LbraceExpected, at),
            IDENTIFIER if self.current().is_reserved_keyword() => Diagnostic::with_args(
                ErrorCode::IdentifierExpectedKw,
                &[self.current_text()],
                self.span(self.index(0)),
            ),
            IDENTIFIER => Diagnostic::new(ErrorCode::IdentifierExpected, at),
            _ => {
                let text = kind.fixed_text().unwrap_or("token");
                Diagnostic::with_args(ErrorCode::SyntaxError, &[text], at)
            }
        };
        self.push_error(diagnostic);
    }

    /// A zero-width placeholder for a token that is not there.
    pub(crate) fn missing(&mut self, kind: SyntaxKind) {
        self.events.push(Event::Token(GreenToken::missing(kind)));
    }

    /// Reports `code` on the current token.
    pub(crate) fn error(&mut self, code: ErrorCode) {
        let range = self.span(self.index(0));
        self.push_error(Diagnostic::with_args(code, &[self.current_text()], range));
    }

    pub(crate) fn error_at_previous(&mut self, code: ErrorCode) {
        let range = TextRange::empty(self.previous_end());
        self.push_error(Diagnostic::new(code, range));
    }

    fn push_error(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code(), range = ?diagnostic.range(), "parse error");
        self.events.push(Event::Error(diagnostic));
    }

    /// End of the last consumed token, or the start of the current one.
    fn previous_end(&self) -> TextSize {
        match self.pos.checked_sub(1) {
            Some(index) => self.span(index).end(),
            None => self.span(self.index(0)).start(),
        }
    }

    /// Moves the current token into skipped-tokens trivia of the next token.
    pub(crate) fn skip(&mut self) {
        if self.at_end() {
            return;
        }
        self.events.push(Event::Skipped(self.token(0).green.clone()));
        self.pos += 1;
    }

    pub(crate) fn skip_with_error(&mut self, code: ErrorCode) {
        self.error(code);
        self.skip();
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Turns everything after the parsed fragment into trivia of its last
    /// token, so the fragment still covers the whole input.
    pub(crate) fn finish_fragment(&mut self) {
        let last = self.events.iter().rposition(|event| matches!(event, Event::Token(_)));
        let mut rest = Vec::new();
        for event in &mut self.events[last.map_or(0, |last| last + 1)..] {
            if let Event::Skipped(token) = event {
                rest.push(token.clone());
                *event = Event::TOMBSTONE;
            }
        }
        if !self.at_end() {
            let end = self.span(self.tokens.len() - 2).end();
            let range = TextRange::new(self.span(self.pos).start(), end);
            let diagnostic = Diagnostic::with_args(ErrorCode::SyntaxError, &["end of file"], range);
            // The fragment's root is already closed; report inside it.
            let root_end = self.events.iter().rposition(|event| matches!(event, Event::Finish));
            let at = root_end.unwrap_or(self.events.len());
            self.events.insert(at, Event::Error(diagnostic));
            while !self.at_end() {
                rest.push(self.token(0).green.clone());
                self.pos += 1;
            }
        }

        let mut trailing = Vec::new();
        if !rest.is_empty() {
            trailing.push(skipped_tokens(rest));
        }
        trailing.extend(self.token(0).green.leading().pieces().iter().cloned());
        if trailing.is_empty() {
            return;
        }
        let trailing = GreenTriviaList::new(trailing);
        if let Some(Event::Token(token)) = last.map(|last| &mut self.events[last]) {
            *token = token.with_trailing(token.trailing().concat(&trailing));
        }
    }

    pub(crate) fn build_tree(self) -> GreenNode {
        let Parser { mut events, .. } = self;
        attach_skipped(&mut events);

        let mut builder = Builder::new();
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => builder.finish_node(),
                Event::Token(token) => builder.token(token),
                Event::Error(diagnostic) => builder.error(diagnostic),
                Event::Skipped(_) => {}
            }
        }

        builder.finish()
    }
}

/// Folds runs of skipped tokens into the leading trivia of the next real
/// token; a run at the very end goes to the trailing trivia of the last one.
fn attach_skipped(events: &mut [Event]) {
    let mut pending = Vec::new();
    let mut last_token = None;
    for i in 0..events.len() {
        match &mut events[i] {
            Event::Skipped(token) => pending.push(token.clone()),
            Event::Token(token) if !token.is_missing() => {
                if !pending.is_empty() {
                    let skipped = GreenTriviaList::new([skipped_tokens(mem::take(&mut pending))]);
                    *token = token.with_leading(skipped.concat(token.leading()));
                }
                last_token = Some(i);
            }
            Event::Token(_) => last_token = last_token.or(Some(i)),
            _ => {}
        }
    }
    if pending.is_empty() {
        return;
    }
    if let Some(Event::Token(token)) = last_token.map(|i| &mut events[i]) {
        let skipped = GreenTriviaList::new([skipped_tokens(pending)]);
        *token = token.with_trailing(token.trailing().concat(&skipped));
    }
}

fn skipped_tokens(tokens: Vec<GreenToken>) -> GreenTrivia {
    let mut builder = Builder::new();
    builder.start_node(SKIPPED_TOKENS_TRIVIA);
    for token in tokens {
        builder.token(token);
    }
    builder.finish_node();
    GreenTrivia::structured(builder.finish())
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(GreenToken),
    Skipped(GreenToken),
    Error(Diagnostic),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(position: u32) -> Self {
        Self { position, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => *slot = kind,
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker { position: self.position, kind }
    }

    /// Drops the marker; its children attach to the enclosing node.
    pub(crate) fn abandon(mut self, p: &mut Parser) {
        self.bomb.defuse();
        if self.position as usize == p.events.len() - 1 {
            p.events.pop();
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    position: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    pub(crate) fn kind(self) -> SyntaxKind {
        self.kind
    }

    /// Starts a node that will become the parent of this one.
    pub(crate) fn precede(self, p: &mut Parser) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.position as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.position);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
