//! Placing the trivia that survives normalization, and the whitespace
//! between tokens.

use sharpen_syntax::SyntaxKind::*;
use sharpen_syntax::{GreenTrivia, GreenTriviaList, SyntaxToken, factory};

use crate::NormalizeOptions;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Stays on the current line, separated by spaces.
    Inline,
    /// Stays on the current line and ends it.
    EndsLine,
    /// Starts a line at the indentation of the next token and ends it.
    OwnLine,
    /// Starts a line at column zero and ends it.
    ColumnZero,
}

fn placement(piece: &GreenTrivia, leading: bool) -> Option<Placement> {
    let placement = match piece.kind() {
        SINGLE_LINE_COMMENT if leading => Placement::OwnLine,
        SINGLE_LINE_COMMENT => Placement::EndsLine,
        MULTI_LINE_COMMENT | SKIPPED_TOKENS_TRIVIA => Placement::Inline,
        SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA => Placement::OwnLine,
        DISABLED_TEXT => Placement::ColumnZero,
        kind if kind.is_directive() => Placement::ColumnZero,
        _ => return None,
    };
    Some(placement)
}

/// Trivia of `token` that is kept, with where it goes.
pub(crate) fn kept_pieces(token: &SyntaxToken, leading: bool) -> Vec<(GreenTrivia, Placement)> {
    let green = token.green();
    let list = if leading { green.leading() } else { green.trailing() };
    list.pieces()
        .iter()
        .filter_map(|piece| Some((piece.clone(), placement(piece, leading)?)))
        .collect()
}

pub(crate) struct Gap<'a> {
    options: &'a NormalizeOptions,
}

impl<'a> Gap<'a> {
    pub(crate) fn new(options: &'a NormalizeOptions) -> Self {
        Self { options }
    }

    /// Trivia between two tokens, split the way the tokenizer splits it:
    /// everything up to the first line break trails `prev`.
    pub(crate) fn between(
        &self,
        after: &[(GreenTrivia, Placement)],
        before: &[(GreenTrivia, Placement)],
        lines: usize,
        space: bool,
        depth: usize,
        at_end: bool,
    ) -> (GreenTriviaList, GreenTriviaList) {
        let mut writer = Writer::new(self.options, false);
        for (piece, placement) in after {
            writer.piece(piece, *placement, depth);
        }
        if lines > 0 {
            writer.line_break();
            for _ in 1..lines {
                writer.end_of_line();
            }
        }
        for (piece, placement) in before {
            writer.piece(piece, *placement, depth);
        }
        writer.before_token(space, depth, at_end);

        let trivia = writer.out;
        let split = trivia
            .iter()
            .position(|piece| piece.kind() == END_OF_LINE)
            .map_or(trivia.len(), |index| index + 1);
        let (trailing, leading) = trivia.split_at(split);
        (GreenTriviaList::new(trailing.iter().cloned()), GreenTriviaList::new(leading.iter().cloned()))
    }

    /// Leading trivia of the first token.
    pub(crate) fn line_start(
        &self,
        before: &[(GreenTrivia, Placement)],
        depth: usize,
        at_end: bool,
    ) -> GreenTriviaList {
        let mut writer = Writer::new(self.options, true);
        for (piece, placement) in before {
            writer.piece(piece, *placement, depth);
        }
        writer.before_token(false, depth, at_end);
        GreenTriviaList::new(writer.out)
    }

    /// Trailing trivia of the last token.
    pub(crate) fn line_end(&self, after: &[(GreenTrivia, Placement)]) -> GreenTriviaList {
        let mut writer = Writer::new(self.options, false);
        for (piece, placement) in after {
            writer.piece(piece, *placement, 0);
        }
        GreenTriviaList::new(writer.out)
    }
}

struct Writer<'a> {
    options: &'a NormalizeOptions,
    out: Vec<GreenTrivia>,
    at_line_start: bool,
}

impl<'a> Writer<'a> {
    fn new(options: &'a NormalizeOptions, at_line_start: bool) -> Self {
        Self { options, out: Vec::new(), at_line_start }
    }

    fn piece(&mut self, piece: &GreenTrivia, placement: Placement, depth: usize) {
        match placement {
            Placement::Inline | Placement::EndsLine => {
                if self.at_line_start {
                    self.indent(depth);
                } else {
                    self.space();
                }
                self.out.push(piece.clone());
                self.at_line_start = false;
                if placement == Placement::EndsLine {
                    self.end_of_line();
                }
            }
            Placement::OwnLine | Placement::ColumnZero => {
                self.line_break();
                if placement == Placement::OwnLine {
                    self.indent(depth);
                }
                self.out.push(piece.clone());
                // Directives and documentation comments carry their own line break.
                if !piece.to_full_string().ends_with('\n') {
                    self.end_of_line();
                }
                self.at_line_start = true;
            }
        }
    }

    fn before_token(&mut self, space: bool, depth: usize, at_end: bool) {
        if at_end {
            return;
        }
        if self.at_line_start {
            self.indent(depth);
        } else if space || !self.out.is_empty() {
            self.space();
        }
    }

    /// Ends the current line unless it is already empty.
    fn line_break(&mut self) {
        if !self.at_line_start {
            self.end_of_line();
        }
    }

    fn end_of_line(&mut self) {
        self.out.push(factory::end_of_line(&self.options.end_of_line));
        self.at_line_start = true;
    }

    fn space(&mut self) {
        self.out.push(factory::whitespace(" "));
    }

    fn indent(&mut self, depth: usize) {
        if depth > 0 && !self.options.indentation.is_empty() {
            self.out.push(factory::whitespace(&self.options.indentation.repeat(depth)));
        }
    }
}
