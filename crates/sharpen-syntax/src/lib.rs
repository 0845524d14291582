//! Full-fidelity syntax trees for C# source.
//!
//! Green trees are immutable and shared; red handles add parent links and
//! absolute positions on demand. Every character of the source, trivia
//! included, is reachable from the root, so printing a tree reproduces its
//! text exactly.

/// Typed wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod edit;
mod equivalence;
mod error;
/// Constructors for tokens, trivia, lists and nodes.
pub mod factory;
mod green;
mod options;
mod ptr;
mod source;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod tree;
mod value;

/// Incremental builder for constructing green trees.
pub use builder::Builder;
pub use edit::RemoveOptions;
pub use error::{Result, SyntaxError};
/// Immutable, shareable tree storage.
pub use green::{GreenElement, GreenNode, GreenToken, GreenTrivia, GreenTriviaList};
pub use options::{DocumentationMode, ParseOptions};
pub use ptr::SyntaxNodePtr;
pub use source::{Encoding, SourceHashAlgorithm};
/// Primary syntax tree API types and adapters.
pub use syntax::{
    Children, ChildrenWithTokens, DescendantElements, DescendantNodes, DescendantTokens,
    DescendantTrivia, Descendants, NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement,
    SyntaxNode, SyntaxToken, SyntaxTrivia, TokenFilter, TriviaIter, WalkEvent,
    WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use tree::{LineSpan, Location, SyntaxTree};
pub use value::TokenValue;
