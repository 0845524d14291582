//! Recursive-descent parser for C# source.
//!
//! The grammar functions record start, finish and token events; the events
//! are replayed into a green tree once parsing is done. Malformed input
//! never fails: expected tokens are inserted as missing tokens and stray
//! ones are folded into skipped-token trivia, so every entry point returns
//! a tree whose text is exactly its input.

use camino::Utf8PathBuf;
use sharpen_inputs::File;
use sharpen_syntax::SyntaxKind::{END_OF_FILE, EXPRESSION_STATEMENT, SEMICOLON};
use sharpen_syntax::{
    GreenToken, GreenTriviaList, ParseOptions, SyntaxNode, SyntaxToken, SyntaxTree, SyntaxTrivia,
};
use sharpen_tokenizer::Tokenizer;

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

use grammar::{exprs, items, stmts, types};
use parser::Parser;

pub trait FileParse {
    fn parse(self, db: &dyn salsa::Database) -> &SyntaxTree;
}

#[salsa::tracked]
impl FileParse for File {
    #[salsa::tracked(returns(ref), no_eq)]
    fn parse(self, db: &dyn salsa::Database) -> SyntaxTree {
        let tree = parse_syntax_tree(self.text(db), self.options(db), self.path(db).clone());
        tree.with_encoding(Some(self.encoding(db)))
    }
}

pub fn parse_syntax_tree(
    text: &str,
    options: &ParseOptions,
    path: impl Into<Utf8PathBuf>,
) -> SyntaxTree {
    let path = path.into();
    tracing::debug!(%path, len = text.len(), "parsing compilation unit");
    let mut p = Parser::new(text, options);
    items::compilation_unit(&mut p);
    SyntaxTree::new(p.build_tree(), options.clone()).with_path(path)
}

pub fn parse_compilation_unit(text: &str, options: &ParseOptions) -> SyntaxNode {
    parse_syntax_tree(text, options, Utf8PathBuf::new()).root().clone()
}

/// Parses `text` with `grammar`, folding whatever it leaves unconsumed into
/// the trailing trivia of the fragment.
fn parse_fragment(text: &str, options: &ParseOptions, grammar: fn(&mut Parser)) -> SyntaxNode {
    let mut p = Parser::new(text, options);
    grammar(&mut p);
    p.finish_fragment();
    SyntaxNode::new_root(p.build_tree())
}

pub fn parse_expression(text: &str, options: &ParseOptions) -> SyntaxNode {
    tracing::debug!(len = text.len(), "parsing expression");
    parse_fragment(text, options, |p| {
        exprs::expr(p);
    })
}

pub fn parse_statement(text: &str, options: &ParseOptions) -> SyntaxNode {
    tracing::debug!(len = text.len(), "parsing statement");
    parse_fragment(text, options, |p| {
        if stmts::statement(p).is_none() {
            // Nothing starts a statement here; recover as an expression.
            let m = p.start();
            exprs::expr(p);
            p.expect(SEMICOLON);
            m.complete(p, EXPRESSION_STATEMENT);
        }
    })
}

/// Parses a member declaration, or `None` when the text does not start one.
pub fn parse_member_declaration(text: &str, options: &ParseOptions) -> Option<SyntaxNode> {
    let mut p = Parser::new(text, options);
    items::member_declaration(&mut p)?;
    p.finish_fragment();
    Some(SyntaxNode::new_root(p.build_tree()))
}

pub fn parse_type_name(text: &str, options: &ParseOptions) -> SyntaxNode {
    parse_fragment(text, options, |p| {
        types::type_(p);
    })
}

pub fn parse_name(text: &str, options: &ParseOptions) -> SyntaxNode {
    parse_fragment(text, options, |p| {
        types::name(p);
    })
}

pub fn parse_argument_list(text: &str, options: &ParseOptions) -> SyntaxNode {
    parse_fragment(text, options, exprs::argument_list)
}

pub fn parse_parameter_list(text: &str, options: &ParseOptions) -> SyntaxNode {
    parse_fragment(text, options, items::parameter_list)
}

/// The first token of `text`, with its trivia. Lexical diagnostics are not
/// kept: they only make sense against a tree.
pub fn parse_token(text: &str, options: &ParseOptions) -> SyntaxToken {
    let token = Tokenizer::new(text, options).next_token();
    SyntaxToken::new_root(token.green.with_diagnostics(Vec::new()))
}

/// Every token of `text`, the end of file included.
pub fn parse_tokens(text: &str, options: &ParseOptions) -> Vec<SyntaxToken> {
    sharpen_tokenizer::tokenize(text, options)
        .into_iter()
        .map(|token| SyntaxToken::new_root(token.green))
        .collect()
}

/// Trivia at the start of `text`, up to its first token.
pub fn parse_leading_trivia(text: &str, options: &ParseOptions) -> Vec<SyntaxTrivia> {
    let token = Tokenizer::new(text, options).next_token();
    let holder = GreenToken::missing(token.kind).with_leading(token.green.leading().clone());
    SyntaxToken::new_root(holder).leading_trivia().collect()
}

/// Trivia at the start of `text` as if it followed a token: it stops after
/// the first line break.
pub fn parse_trailing_trivia(text: &str, options: &ParseOptions) -> Vec<SyntaxTrivia> {
    let trivia: GreenTriviaList = Tokenizer::trailing_trivia(text, options);
    let holder = GreenToken::missing(END_OF_FILE).with_trailing(trivia);
    SyntaxToken::new_root(holder).trailing_trivia().collect()
}
