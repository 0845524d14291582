//! Non-destructive edits.
//!
//! Every operation is called on a root and returns a new root. Only the path
//! from the root down to the edited elements is rebuilt; everything else is
//! shared with the original tree.

use std::fmt;
use std::ops::BitOr;

use rustc_hash::FxHashSet;
use text_size::{TextRange, TextSize};

use crate::SyntaxKind::*;
use crate::factory::shape::{self, Slot};
use crate::syntax::{SlotIndex, TriviaIter};
use crate::{
    GreenElement, GreenNode, GreenToken, GreenTrivia, GreenTriviaList, NodeOrToken, Result,
    SyntaxElement, SyntaxError, SyntaxNode, SyntaxToken, SyntaxTree, SyntaxTrivia, TokenFilter,
};

/// What [`SyntaxNode::remove_node`] keeps of the removed node's trivia.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RemoveOptions(u8);

impl RemoveOptions {
    pub const KEEP_NO_TRIVIA: Self = Self(0);
    pub const KEEP_LEADING_TRIVIA: Self = Self(1);
    pub const KEEP_TRAILING_TRIVIA: Self = Self(1 << 1);
    pub const KEEP_EXTERIOR_TRIVIA: Self = Self(Self::KEEP_LEADING_TRIVIA.0 | Self::KEEP_TRAILING_TRIVIA.0);
    /// Keeps directives whose partners are not removed with them.
    pub const KEEP_UNBALANCED_DIRECTIVES: Self = Self(1 << 2);
    pub const KEEP_DIRECTIVES: Self = Self(1 << 3);
    /// Leaves a line break where a discarded side of the node had one.
    pub const KEEP_END_OF_LINE: Self = Self(1 << 4);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for RemoveOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for RemoveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(RemoveOptions, &str); 5] = [
            (RemoveOptions::KEEP_LEADING_TRIVIA, "KEEP_LEADING_TRIVIA"),
            (RemoveOptions::KEEP_TRAILING_TRIVIA, "KEEP_TRAILING_TRIVIA"),
            (RemoveOptions::KEEP_UNBALANCED_DIRECTIVES, "KEEP_UNBALANCED_DIRECTIVES"),
            (RemoveOptions::KEEP_DIRECTIVES, "KEEP_DIRECTIVES"),
            (RemoveOptions::KEEP_END_OF_LINE, "KEEP_END_OF_LINE"),
        ];
        let mut names = NAMES.iter().filter(|(flag, _)| self.contains(*flag)).map(|(_, name)| *name);
        match names.next() {
            None => f.write_str("KEEP_NO_TRIVIA"),
            Some(first) => {
                f.write_str(first)?;
                names.try_for_each(|name| write!(f, " | {name}"))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Side {
    Before,
    After,
}

impl Side {
    fn arrange<T: Clone>(self, anchor: T, inserted: &[T]) -> Vec<T> {
        let mut arranged = Vec::with_capacity(inserted.len() + 1);
        match self {
            Self::Before => {
                arranged.extend_from_slice(inserted);
                arranged.push(anchor);
            }
            Self::After => {
                arranged.push(anchor);
                arranged.extend_from_slice(inserted);
            }
        }
        arranged
    }
}

impl SyntaxNode {
    pub fn replace_node(&self, old: &SyntaxNode, new: GreenNode) -> Result<SyntaxNode> {
        self.replace_node_with_many(old, [new])
    }

    /// Replaces `old` with any number of nodes when it is a list item, or
    /// with exactly one node otherwise. Separators are not inserted.
    pub fn replace_node_with_many(
        &self,
        old: &SyntaxNode,
        new: impl IntoIterator<Item = GreenNode>,
    ) -> Result<SyntaxNode> {
        self.ensure_contains(old)?;
        let new = new.into_iter().map(GreenElement::from).collect::<Vec<_>>();
        if new.len() != 1 && !old.is_list_item() {
            return Err(SyntaxError::invalid_operation(format!(
                "{:?} is not a list item and must be replaced by exactly one node",
                old.kind()
            )));
        }
        tracing::debug!(kind = ?old.kind(), count = new.len(), "replace node");
        Rewriter::new().nodes([old.clone()], move |_, _| new.clone()).run(self)
    }

    /// Replaces every node of `nodes` in one bottom-up pass.
    ///
    /// `rewrite` receives the original node and its green node with the
    /// replacements below it already applied.
    pub fn replace_nodes<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n SyntaxNode>,
        mut rewrite: impl FnMut(&SyntaxNode, GreenNode) -> GreenNode,
    ) -> Result<SyntaxNode> {
        let nodes = nodes.into_iter().cloned().collect::<Vec<_>>();
        for node in &nodes {
            self.ensure_contains(node)?;
        }
        tracing::debug!(count = nodes.len(), "replace nodes");
        Rewriter::new().nodes(nodes, move |node, green| vec![rewrite(node, green).into()]).run(self)
    }

    pub fn insert_nodes_before(
        &self,
        anchor: &SyntaxNode,
        nodes: impl IntoIterator<Item = GreenNode>,
    ) -> Result<SyntaxNode> {
        self.insert_nodes(anchor, nodes, Side::Before)
    }

    pub fn insert_nodes_after(
        &self,
        anchor: &SyntaxNode,
        nodes: impl IntoIterator<Item = GreenNode>,
    ) -> Result<SyntaxNode> {
        self.insert_nodes(anchor, nodes, Side::After)
    }

    fn insert_nodes(
        &self,
        anchor: &SyntaxNode,
        nodes: impl IntoIterator<Item = GreenNode>,
        side: Side,
    ) -> Result<SyntaxNode> {
        self.ensure_contains(anchor)?;
        if !anchor.is_list_item() {
            return Err(SyntaxError::invalid_operation(format!(
                "cannot insert next to {:?}, which is not a list item",
                anchor.kind()
            )));
        }
        let nodes = nodes.into_iter().map(GreenElement::from).collect::<Vec<_>>();
        tracing::debug!(anchor = ?anchor.kind(), count = nodes.len(), ?side, "insert nodes");
        Rewriter::new()
            .nodes([anchor.clone()], move |_, green| side.arrange(green.into(), &nodes))
            .run(self)
    }

    pub fn replace_token(&self, old: &SyntaxToken, new: GreenToken) -> Result<SyntaxNode> {
        self.replace_token_with_many(old, [new])
    }

    /// Replaces `old` with any number of tokens when it sits in a token list
    /// or separated list, or with exactly one token otherwise.
    pub fn replace_token_with_many(
        &self,
        old: &SyntaxToken,
        new: impl IntoIterator<Item = GreenToken>,
    ) -> Result<SyntaxNode> {
        self.ensure_contains_token(old)?;
        let new = new.into_iter().map(GreenElement::from).collect::<Vec<_>>();
        if new.len() != 1 && !is_list_item(old.parent(), old.index()) {
            return Err(SyntaxError::invalid_operation(format!(
                "{:?} is not a list item and must be replaced by exactly one token",
                old.kind()
            )));
        }
        tracing::debug!(kind = ?old.kind(), count = new.len(), "replace token");
        Rewriter::new().tokens([old.clone()], move |_, _| new.clone()).run(self)
    }

    /// Replaces every token of `tokens`; `rewrite` sees each token with
    /// edits inside its structured trivia already applied.
    pub fn replace_tokens<'t>(
        &self,
        tokens: impl IntoIterator<Item = &'t SyntaxToken>,
        mut rewrite: impl FnMut(&SyntaxToken, GreenToken) -> GreenToken,
    ) -> Result<SyntaxNode> {
        let tokens = tokens.into_iter().cloned().collect::<Vec<_>>();
        for token in &tokens {
            self.ensure_contains_token(token)?;
        }
        tracing::debug!(count = tokens.len(), "replace tokens");
        Rewriter::new()
            .tokens(tokens, move |token, green| vec![rewrite(token, green).into()])
            .run(self)
    }

    pub fn insert_tokens_before(
        &self,
        anchor: &SyntaxToken,
        tokens: impl IntoIterator<Item = GreenToken>,
    ) -> Result<SyntaxNode> {
        self.insert_tokens(anchor, tokens, Side::Before)
    }

    pub fn insert_tokens_after(
        &self,
        anchor: &SyntaxToken,
        tokens: impl IntoIterator<Item = GreenToken>,
    ) -> Result<SyntaxNode> {
        self.insert_tokens(anchor, tokens, Side::After)
    }

    fn insert_tokens(
        &self,
        anchor: &SyntaxToken,
        tokens: impl IntoIterator<Item = GreenToken>,
        side: Side,
    ) -> Result<SyntaxNode> {
        self.ensure_contains_token(anchor)?;
        if !is_list_item(anchor.parent(), anchor.index()) {
            return Err(SyntaxError::invalid_operation(format!(
                "cannot insert next to {:?}, which is not a list item",
                anchor.kind()
            )));
        }
        let tokens = tokens.into_iter().map(GreenElement::from).collect::<Vec<_>>();
        tracing::debug!(anchor = ?anchor.kind(), count = tokens.len(), ?side, "insert tokens");
        Rewriter::new()
            .tokens([anchor.clone()], move |_, green| side.arrange(green.into(), &tokens))
            .run(self)
    }

    /// Replaces one trivia piece with any number of pieces.
    pub fn replace_trivia(
        &self,
        old: &SyntaxTrivia,
        new: impl IntoIterator<Item = GreenTrivia>,
    ) -> Result<SyntaxNode> {
        self.ensure_contains_trivia(old)?;
        let new = new.into_iter().collect::<Vec<_>>();
        tracing::debug!(kind = ?old.kind(), count = new.len(), "replace trivia");
        Rewriter::new().trivia([old.clone()], move |_| new.clone()).run(self)
    }

    pub fn replace_trivia_with<'t>(
        &self,
        trivia: impl IntoIterator<Item = &'t SyntaxTrivia>,
        mut rewrite: impl FnMut(&SyntaxTrivia) -> GreenTrivia,
    ) -> Result<SyntaxNode> {
        let trivia = trivia.into_iter().cloned().collect::<Vec<_>>();
        for piece in &trivia {
            self.ensure_contains_trivia(piece)?;
        }
        tracing::debug!(count = trivia.len(), "replace trivia");
        Rewriter::new().trivia(trivia, move |piece| vec![rewrite(piece)]).run(self)
    }

    pub fn insert_trivia_before(
        &self,
        anchor: &SyntaxTrivia,
        trivia: impl IntoIterator<Item = GreenTrivia>,
    ) -> Result<SyntaxNode> {
        self.insert_trivia(anchor, trivia, Side::Before)
    }

    pub fn insert_trivia_after(
        &self,
        anchor: &SyntaxTrivia,
        trivia: impl IntoIterator<Item = GreenTrivia>,
    ) -> Result<SyntaxNode> {
        self.insert_trivia(anchor, trivia, Side::After)
    }

    fn insert_trivia(
        &self,
        anchor: &SyntaxTrivia,
        trivia: impl IntoIterator<Item = GreenTrivia>,
        side: Side,
    ) -> Result<SyntaxNode> {
        self.ensure_contains_trivia(anchor)?;
        let trivia = trivia.into_iter().collect::<Vec<_>>();
        tracing::debug!(anchor = ?anchor.kind(), count = trivia.len(), ?side, "insert trivia");
        Rewriter::new()
            .trivia([anchor.clone()], move |piece| side.arrange(piece.green().clone(), &trivia))
            .run(self)
    }

    /// Replaces the leading trivia of the first token, zero-width included.
    #[must_use]
    pub fn with_leading_trivia(&self, trivia: GreenTriviaList) -> SyntaxNode {
        let Some(first) = self.first_token_with(TokenFilter::DEFAULT.with_zero_width()) else {
            return self.clone();
        };
        let green = Rewriter::new()
            .tokens([first], move |_, green| vec![green.with_leading(trivia.clone()).into()])
            .rewrite_children(self);
        new_root(self, green)
    }

    /// Replaces the trailing trivia of the last token, zero-width included.
    #[must_use]
    pub fn with_trailing_trivia(&self, trivia: GreenTriviaList) -> SyntaxNode {
        let Some(last) = self.last_token_with(TokenFilter::DEFAULT.with_zero_width()) else {
            return self.clone();
        };
        let green = Rewriter::new()
            .tokens([last], move |_, green| vec![green.with_trailing(trivia.clone()).into()])
            .rewrite_children(self);
        new_root(self, green)
    }

    /// Removes `node`, keeping the trivia selected by `options`.
    ///
    /// A list item is removed together with one adjacent separator. A node
    /// in an optional slot is dropped; one in a required slot is replaced by
    /// a missing placeholder. Kept trivia is prepended to the next token, or
    /// appended to the last token when nothing follows. Removing the root
    /// itself gives `None`.
    pub fn remove_node(
        &self,
        node: &SyntaxNode,
        options: RemoveOptions,
    ) -> Result<Option<SyntaxNode>> {
        if node == self {
            return Ok(None);
        }
        self.ensure_contains(node)?;
        let Some(parent) = node.parent() else {
            return Err(SyntaxError::invalid_operation(
                "the root of structured trivia cannot be removed",
            ));
        };

        let slot = node.index().slot();
        let (removed, replacement) = if parent.is_list_slot(slot) {
            (removed_list_items(&parent, node), Vec::new())
        } else {
            (vec![SyntaxElement::from(node.clone())], placeholder(&parent, node))
        };
        let residual = GreenTriviaList::new(residual_trivia(node, &removed, options));
        let next = removed
            .last()
            .and_then(|last| match last {
                NodeOrToken::Node(node) => node.last_token_with(TokenFilter::DEFAULT.with_zero_width()),
                NodeOrToken::Token(token) => Some(token.clone()),
            })
            .and_then(|last| last.next_token_with(TokenFilter::DEFAULT.with_zero_width()))
            .filter(|next| next.ancestors().any(|ancestor| ancestor == *self));
        tracing::debug!(
            kind = ?node.kind(),
            ?options,
            removed = removed.len(),
            residual = residual.len(),
            "remove node"
        );

        let mut tokens = removed.iter().filter_map(|element| element.as_token().cloned()).collect::<Vec<_>>();
        let attach_to = next.filter(|_| !residual.is_empty());
        tokens.extend(attach_to.clone());
        let root = {
            let attach_to = attach_to.clone();
            let residual = residual.clone();
            Rewriter::new()
                .nodes([node.clone()], move |_, _| replacement.clone())
                .tokens(tokens, move |token, green| match &attach_to {
                    Some(next) if next == token => {
                        vec![green.with_leading(residual.concat(green.leading())).into()]
                    }
                    _ => Vec::new(),
                })
                .run(self)?
        };
        if residual.is_empty() || attach_to.is_some() {
            return Ok(Some(root));
        }

        let Some(last) = root.last_token_with(TokenFilter::DEFAULT.with_zero_width()) else {
            return Ok(Some(root));
        };
        let trailing = last.green().trailing().concat(&residual);
        let root = Rewriter::new()
            .tokens([last], move |_, green| vec![green.with_trailing(trailing.clone()).into()])
            .run(&root)?;
        Ok(Some(root))
    }

    fn is_list_item(&self) -> bool {
        is_list_item(self.parent().as_ref(), self.index())
    }

    fn ensure_contains(&self, node: &SyntaxNode) -> Result<()> {
        if node == self || node.ancestors().any(|ancestor| ancestor == *self) {
            Ok(())
        } else {
            Err(SyntaxError::argument(format!("{node:?} is not part of {self:?}")))
        }
    }

    fn ensure_contains_token(&self, token: &SyntaxToken) -> Result<()> {
        if token.ancestors().any(|ancestor| ancestor == *self) {
            Ok(())
        } else {
            Err(SyntaxError::argument(format!("{token:?} is not part of {self:?}")))
        }
    }

    fn ensure_contains_trivia(&self, trivia: &SyntaxTrivia) -> Result<()> {
        match trivia.token() {
            Some(token) => self.ensure_contains_token(token),
            None => Err(SyntaxError::argument(format!("{trivia:?} is not attached to a token"))),
        }
    }
}

fn is_list_item(parent: Option<&SyntaxNode>, index: SlotIndex) -> bool {
    parent.is_some_and(|parent| parent.is_list_slot(index.slot()))
}

/// A root for `green`, keeping the tree metadata when `old` is a tree root.
fn new_root(old: &SyntaxNode, green: GreenNode) -> SyntaxNode {
    if old.tree_info().is_some() {
        SyntaxTree::from_root(old.clone()).with_root(green).root().clone()
    } else {
        SyntaxNode::new_root(green)
    }
}

/// `node` and the separator removed with it.
///
/// The following separator goes with the node when it ends the node's line;
/// otherwise the preceding one does, falling back to the following one for
/// the first item.
fn removed_list_items(parent: &SyntaxNode, node: &SyntaxNode) -> Vec<SyntaxElement> {
    let slot = node.index().slot();
    if parent.green().children()[slot].kind() != SEPARATED_LIST {
        return vec![node.clone().into()];
    }
    let separator = |element: Option<SyntaxElement>| {
        element.and_then(NodeOrToken::into_token).filter(|token| token.index().slot() == slot)
    };
    let prev = separator(node.prev_sibling_or_token());
    let next = separator(node.next_sibling_or_token());
    let next_belongs_to_node = next.as_ref().is_some_and(|separator| {
        !separator.has_leading_trivia()
            && !node.trailing_trivia().is_some_and(has_end_of_line)
            && has_end_of_line(separator.trailing_trivia())
    });
    match (prev, next) {
        (Some(prev), _) if !next_belongs_to_node => vec![prev.into(), node.clone().into()],
        (_, Some(next)) => vec![node.clone().into(), next.into()],
        _ => vec![node.clone().into()],
    }
}

/// What a removed node from a non-list slot leaves behind.
fn placeholder(parent: &SyntaxNode, node: &SyntaxNode) -> Vec<GreenElement> {
    match shape::slots_of(parent.green()).get(node.index().slot()).copied().flatten() {
        Some(slot) if slot.is_optional() => Vec::new(),
        Some(Slot::Node(kinds)) => vec![shape::missing_node(kinds.placeholder()).into()],
        _ => vec![shape::missing_node(node.kind()).into()],
    }
}

fn has_end_of_line(mut trivia: TriviaIter) -> bool {
    trivia.any(|piece| piece.kind() == END_OF_LINE)
}

/// Trivia that survives removing `removed`, in document order.
fn residual_trivia(
    node: &SyntaxNode,
    removed: &[SyntaxElement],
    options: RemoveOptions,
) -> Vec<GreenTrivia> {
    let span = node.span();
    let (mut leading, mut trailing) = (Vec::new(), Vec::new());
    for element in removed {
        let trivia: Vec<SyntaxTrivia> = match element {
            NodeOrToken::Token(token) => token.all_trivia().collect(),
            NodeOrToken::Node(node) => {
                let leading = node.leading_trivia().into_iter().flatten();
                leading.chain(node.trailing_trivia().into_iter().flatten()).collect()
            }
        };
        for piece in trivia {
            if piece.position() < span.start() {
                leading.push(piece.green().clone());
            } else {
                trailing.push(piece.green().clone());
            }
        }
    }

    let mut residual = Residual::default();
    residual.add_side(leading, options, RemoveOptions::KEEP_LEADING_TRIVIA);

    let (Some(first), Some(last)) = (removed.first(), removed.last()) else {
        return residual.pieces;
    };
    let keep = RemoveOptions::KEEP_DIRECTIVES | RemoveOptions::KEEP_UNBALANCED_DIRECTIVES;
    if options.intersects(keep) && removed.iter().any(SyntaxElement::contains_directives) {
        let mut removed_span = TextRange::new(first.full_span().start(), last.full_span().end());
        if options.contains(RemoveOptions::KEEP_LEADING_TRIVIA) {
            removed_span = TextRange::new(span.start(), removed_span.end());
        }
        if options.contains(RemoveOptions::KEEP_TRAILING_TRIVIA) {
            removed_span = TextRange::new(removed_span.start(), span.end());
        }
        for element in removed {
            let trivia: Vec<SyntaxTrivia> = match element {
                NodeOrToken::Token(token) => token.all_trivia().collect(),
                NodeOrToken::Node(node) => node.descendant_trivia().collect(),
            };
            for directive in trivia {
                if directive.is_directive()
                    && removed_span.contains_range(directive.full_span())
                    && keep_directive(&directive, removed_span, options)
                {
                    residual.add_directive(&directive);
                }
            }
        }
    }

    residual.add_side(trailing, options, RemoveOptions::KEEP_TRAILING_TRIVIA);
    residual.pieces
}

fn keep_directive(directive: &SyntaxTrivia, removed: TextRange, options: RemoveOptions) -> bool {
    if options.contains(RemoveOptions::KEEP_DIRECTIVES)
        || matches!(directive.kind(), DEFINE_DIRECTIVE_TRIVIA | UNDEF_DIRECTIVE_TRIVIA)
    {
        return true;
    }
    let Some(structure) = directive.structure() else {
        return false;
    };
    let overlaps = |range: TextRange| removed.intersect(range).is_some_and(|common| !common.is_empty());
    !structure.related_directives().iter().all(|related| overlaps(related.full_span()))
}

#[derive(Default)]
struct Residual {
    pieces: Vec<GreenTrivia>,
}

impl Residual {
    /// Keeps one side of the removed trivia, or just its line break.
    fn add_side(&mut self, trivia: Vec<GreenTrivia>, options: RemoveOptions, keep: RemoveOptions) {
        if options.contains(keep) {
            self.pieces.extend(trivia);
        } else if options.contains(RemoveOptions::KEEP_END_OF_LINE)
            && let Some(end_of_line) = find_end_of_line(&trivia)
        {
            self.add_end_of_line(end_of_line);
        }
    }

    fn add_end_of_line(&mut self, end_of_line: GreenTrivia) {
        if self.pieces.last().is_none_or(|last| !ends_line(last)) {
            self.pieces.push(end_of_line);
        }
    }

    /// Adds a directive on a line of its own, with its indentation.
    fn add_directive(&mut self, directive: &SyntaxTrivia) {
        let end_of_line = directive
            .green()
            .structure()
            .and_then(end_of_line_in)
            .unwrap_or_else(|| GreenTrivia::new(END_OF_LINE, "\r\n"));
        self.add_end_of_line(end_of_line);
        if let Some(indentation) = indentation_of(directive) {
            self.pieces.push(indentation);
        }
        self.pieces.push(directive.green().clone());
    }
}

fn ends_line(trivia: &GreenTrivia) -> bool {
    let kind = trivia.kind();
    kind == END_OF_LINE || kind == SINGLE_LINE_DOCUMENTATION_COMMENT_TRIVIA || kind.is_directive()
}

/// Whitespace directly before `directive` on its line.
fn indentation_of(directive: &SyntaxTrivia) -> Option<GreenTrivia> {
    let token = directive.token()?;
    let previous = token.all_trivia().get(directive.index().checked_sub(1)?)?;
    (previous.kind() == WHITESPACE && previous.is_leading() == directive.is_leading())
        .then(|| previous.green().clone())
}

fn find_end_of_line(trivia: &[GreenTrivia]) -> Option<GreenTrivia> {
    trivia.iter().find_map(|piece| {
        if piece.kind() == END_OF_LINE {
            Some(piece.clone())
        } else {
            piece.structure().and_then(end_of_line_in)
        }
    })
}

fn end_of_line_in(node: &GreenNode) -> Option<GreenTrivia> {
    node.children().iter().find_map(|child| match child {
        NodeOrToken::Node(node) => end_of_line_in(node),
        NodeOrToken::Token(token) => find_end_of_line(token.leading().pieces())
            .or_else(|| find_end_of_line(token.trailing().pieces())),
    })
}

type NodeRewrite<'a> = Box<dyn FnMut(&SyntaxNode, GreenNode) -> Vec<GreenElement> + 'a>;
type TokenRewrite<'a> = Box<dyn FnMut(&SyntaxToken, GreenToken) -> Vec<GreenElement> + 'a>;
type TriviaRewrite<'a> = Box<dyn FnMut(&SyntaxTrivia) -> Vec<GreenTrivia> + 'a>;

/// One top-down pass replacing the targeted nodes, tokens and trivia.
///
/// Subtrees whose full span holds no target are reused as they are.
struct Rewriter<'a> {
    spans: Vec<TextRange>,
    nodes: FxHashSet<SyntaxNode>,
    tokens: FxHashSet<SyntaxToken>,
    trivia: FxHashSet<SyntaxTrivia>,
    rewrite_node: NodeRewrite<'a>,
    rewrite_token: TokenRewrite<'a>,
    rewrite_trivia: TriviaRewrite<'a>,
}

impl<'a> Rewriter<'a> {
    fn new() -> Self {
        Self {
            spans: Vec::new(),
            nodes: FxHashSet::default(),
            tokens: FxHashSet::default(),
            trivia: FxHashSet::default(),
            rewrite_node: Box::new(|_, green| vec![green.into()]),
            rewrite_token: Box::new(|_, green| vec![green.into()]),
            rewrite_trivia: Box::new(|trivia| vec![trivia.green().clone()]),
        }
    }

    fn nodes(
        mut self,
        nodes: impl IntoIterator<Item = SyntaxNode>,
        rewrite: impl FnMut(&SyntaxNode, GreenNode) -> Vec<GreenElement> + 'a,
    ) -> Self {
        for node in nodes {
            self.spans.push(node.full_span());
            self.nodes.insert(node);
        }
        self.rewrite_node = Box::new(rewrite);
        self
    }

    fn tokens(
        mut self,
        tokens: impl IntoIterator<Item = SyntaxToken>,
        rewrite: impl FnMut(&SyntaxToken, GreenToken) -> Vec<GreenElement> + 'a,
    ) -> Self {
        for token in tokens {
            self.spans.push(token.full_span());
            self.tokens.insert(token);
        }
        self.rewrite_token = Box::new(rewrite);
        self
    }

    fn trivia(
        mut self,
        trivia: impl IntoIterator<Item = SyntaxTrivia>,
        rewrite: impl FnMut(&SyntaxTrivia) -> Vec<GreenTrivia> + 'a,
    ) -> Self {
        for piece in trivia {
            self.spans.push(piece.full_span());
            self.trivia.insert(piece);
        }
        self.rewrite_trivia = Box::new(rewrite);
        self
    }

    fn run(mut self, root: &SyntaxNode) -> Result<SyntaxNode> {
        let mut rewritten = self.visit_node(root);
        match (rewritten.pop(), rewritten.is_empty()) {
            (Some(NodeOrToken::Node(green)), true) => Ok(new_root(root, green)),
            _ => Err(SyntaxError::invalid_operation("the root must be replaced by exactly one node")),
        }
    }

    /// Rewrites below `root`, never `root` itself.
    fn rewrite_children(mut self, root: &SyntaxNode) -> GreenNode {
        self.visit_children(root)
    }

    fn touches(&self, range: TextRange) -> bool {
        self.spans.iter().any(|span| range.contains_range(*span))
    }

    fn visit_element(&mut self, element: SyntaxElement) -> Vec<GreenElement> {
        match element {
            NodeOrToken::Node(node) => self.visit_node(&node),
            NodeOrToken::Token(token) => self.visit_token(&token),
        }
    }

    fn visit_node(&mut self, node: &SyntaxNode) -> Vec<GreenElement> {
        let green = if self.touches(node.full_span()) {
            self.visit_children(node)
        } else {
            node.green().clone()
        };
        if self.nodes.contains(node) { (self.rewrite_node)(node, green) } else { vec![green.into()] }
    }

    fn visit_children(&mut self, node: &SyntaxNode) -> GreenNode {
        let green = node.green();
        let mut children = Vec::with_capacity(green.children().len());
        let mut offset = node.position();
        for (slot, child) in green.children().iter().enumerate() {
            let range = TextRange::at(offset, child.full_width());
            match child {
                _ if !self.touches(range) => children.push(child.clone()),
                NodeOrToken::Node(list) if list.kind().is_list() => {
                    children.push(self.visit_items(node, slot, list, offset).into());
                }
                _ => {
                    let element = SyntaxElement::new(node, child, SlotIndex::new(slot, 0), offset);
                    children.extend(self.visit_element(element));
                }
            }
            offset = range.end();
        }
        if same_elements(green.children(), &children) {
            green.clone()
        } else {
            green.replace_children(children)
        }
    }

    fn visit_items(
        &mut self,
        parent: &SyntaxNode,
        slot: usize,
        list: &GreenNode,
        mut offset: TextSize,
    ) -> GreenNode {
        let mut items = Vec::with_capacity(list.children().len());
        for (item, child) in list.children().iter().enumerate() {
            let range = TextRange::at(offset, child.full_width());
            if self.touches(range) {
                let element = SyntaxElement::new(parent, child, SlotIndex::new(slot, item), offset);
                items.extend(self.visit_element(element));
            } else {
                items.push(child.clone());
            }
            offset = range.end();
        }
        if same_elements(list.children(), &items) { list.clone() } else { list.replace_children(items) }
    }

    fn visit_token(&mut self, token: &SyntaxToken) -> Vec<GreenElement> {
        let mut green = token.green().clone();
        if !self.trivia.is_empty() || token.has_structured_trivia() {
            if let Some(leading) = self.visit_trivia_list(token.leading_trivia()) {
                green = green.with_leading(leading);
            }
            if let Some(trailing) = self.visit_trivia_list(token.trailing_trivia()) {
                green = green.with_trailing(trailing);
            }
        }
        if self.tokens.contains(token) {
            (self.rewrite_token)(token, green)
        } else {
            vec![green.into()]
        }
    }

    /// The rewritten list, or `None` when nothing in it changed.
    fn visit_trivia_list(&mut self, trivia: TriviaIter) -> Option<GreenTriviaList> {
        let mut changed = false;
        let mut pieces = Vec::with_capacity(trivia.len());
        for piece in trivia {
            let rewritten = self.visit_trivia(&piece);
            changed |= !matches!(rewritten.as_slice(), [only] if only.ptr_eq(piece.green()));
            pieces.extend(rewritten);
        }
        changed.then(|| GreenTriviaList::new(pieces))
    }

    fn visit_trivia(&mut self, trivia: &SyntaxTrivia) -> Vec<GreenTrivia> {
        if self.trivia.contains(trivia) {
            return (self.rewrite_trivia)(trivia);
        }
        match trivia.structure() {
            Some(structure) if self.touches(trivia.full_span()) => self
                .visit_node(&structure)
                .into_iter()
                .filter_map(NodeOrToken::into_node)
                .map(|node| {
                    if node.ptr_eq(structure.green()) {
                        trivia.green().clone()
                    } else {
                        GreenTrivia::structured(node)
                    }
                })
                .collect(),
            _ => vec![trivia.green().clone()],
        }
    }
}

fn same_elements(old: &[GreenElement], new: &[GreenElement]) -> bool {
    old.len() == new.len()
        && old.iter().zip(new).all(|pair| match pair {
            (NodeOrToken::Node(old), NodeOrToken::Node(new)) => old.ptr_eq(new),
            (NodeOrToken::Token(old), NodeOrToken::Token(new)) => old.ptr_eq(new),
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;
    use crate::SyntaxKind;
    use crate::factory;

    fn trivia(text: &str) -> GreenTriviaList {
        if text.is_empty() {
            return GreenTriviaList::empty();
        }
        let kind = if text.starts_with("/*") { MULTI_LINE_COMMENT } else { WHITESPACE };
        GreenTriviaList::new([GreenTrivia::new(kind, text)])
    }

    fn token(leading: &str, kind: SyntaxKind, text: &str, trailing: &str) -> GreenToken {
        GreenToken::new(kind, text, trivia(leading), trivia(trailing))
    }

    fn name(leading: &str, text: &str) -> GreenNode {
        GreenNode::new(IDENTIFIER_NAME, [token(leading, IDENTIFIER, text, "").into()])
    }

    fn argument(leading: &str, text: &str) -> GreenElement {
        factory::node(ARGUMENT, [name(leading, text).into()]).unwrap().into()
    }

    /// `m(a, b, /* trivia */ c)`
    fn invocation() -> SyntaxNode {
        let comma = || -> GreenElement { token("", COMMA, ",", " ").into() };
        let arguments = factory::separated_list([
            argument("", "a"),
            comma(),
            argument("", "b"),
            comma(),
            GreenNode::new(
                ARGUMENT,
                [GreenNode::new(
                    IDENTIFIER_NAME,
                    [GreenToken::new(
                        IDENTIFIER,
                        "c",
                        GreenTriviaList::new([
                            GreenTrivia::new(MULTI_LINE_COMMENT, "/* trivia */"),
                            GreenTrivia::new(WHITESPACE, " "),
                        ]),
                        GreenTriviaList::empty(),
                    )
                    .into()],
                )
                .into()],
            )
            .into(),
        ])
        .unwrap();
        let list = factory::node(
            ARGUMENT_LIST,
            [token("", OPEN_PAREN, "(", "").into(), arguments.into(), token("", CLOSE_PAREN, ")", "").into()],
        )
        .unwrap();
        let root = factory::node(INVOCATION_EXPRESSION, [name("", "m").into(), list.into()]).unwrap();
        SyntaxNode::new_root(root)
    }

    fn argument_named(root: &SyntaxNode, text: &str) -> SyntaxNode {
        root.descendant_nodes()
            .find(|node| node.kind() == ARGUMENT && node.to_string() == text)
            .unwrap()
    }

    #[test]
    fn remove_list_item() {
        let root = invocation();
        assert_eq!(root.to_full_string(), "m(a, b, /* trivia */ c)");
        let b = argument_named(&root, "b");

        let kept = root.remove_node(&b, RemoveOptions::KEEP_EXTERIOR_TRIVIA).unwrap().unwrap();
        assert_eq!(kept.to_full_string(), "m(a , /* trivia */ c)");
        let stripped = root.remove_node(&b, RemoveOptions::KEEP_NO_TRIVIA).unwrap().unwrap();
        assert_eq!(stripped.to_full_string(), "m(a, /* trivia */ c)");

        let first = argument_named(&root, "a");
        let removed = root.remove_node(&first, RemoveOptions::KEEP_NO_TRIVIA).unwrap().unwrap();
        assert_eq!(removed.to_full_string(), "m(b, /* trivia */ c)");

        assert_eq!(root.remove_node(&root, RemoveOptions::KEEP_NO_TRIVIA).unwrap(), None);
    }

    #[test]
    fn remove_required_child_leaves_placeholder() {
        let root = invocation();
        let callee = root.children().next().unwrap();
        let removed = root.remove_node(&callee, RemoveOptions::KEEP_NO_TRIVIA).unwrap().unwrap();
        assert_eq!(removed.to_full_string(), "(a, b, /* trivia */ c)");
        let placeholder = removed.children().next().unwrap();
        assert_eq!(placeholder.kind(), IDENTIFIER_NAME);
        assert!(placeholder.is_missing());
    }

    #[test]
    fn replace_shares_untouched_subtrees() {
        let root = invocation();
        let a = argument_named(&root, "a");
        let b = argument_named(&root, "b");
        let new = GreenNode::new(ARGUMENT, [name("", "x").into()]);
        let replaced = root.replace_node(&b, new).unwrap();
        assert_eq!(replaced.to_full_string(), "m(a, x, /* trivia */ c)");

        let new_a = argument_named(&replaced, "a");
        assert!(new_a.green().ptr_eq(a.green()));
        let callee = replaced.children().next().unwrap();
        assert!(callee.green().ptr_eq(root.children().next().unwrap().green()));
    }

    #[test]
    fn list_items_expand_but_single_slots_do_not() {
        let root = invocation();
        let b = argument_named(&root, "b");
        let spliced = root
            .replace_node_with_many(&b, [GreenNode::new(ARGUMENT, [name("", "x").into()])])
            .unwrap();
        assert_eq!(spliced.to_full_string(), "m(a, x, /* trivia */ c)");
        let dropped = root.replace_node_with_many(&b, []).unwrap();
        assert_eq!(dropped.to_full_string(), "m(a, , /* trivia */ c)");

        let callee = root.children().next().unwrap();
        assert!(matches!(
            root.replace_node_with_many(&callee, []),
            Err(SyntaxError::InvalidOperation(_))
        ));
        assert!(matches!(
            root.insert_nodes_before(&callee, [name("", "x")]),
            Err(SyntaxError::InvalidOperation(_))
        ));

        let inserted = root
            .insert_nodes_after(&b, [GreenNode::new(ARGUMENT, [name("", "y").into()])])
            .unwrap();
        assert_eq!(inserted.to_full_string(), "m(a, by, /* trivia */ c)");
    }

    #[test]
    fn replace_nodes_sees_rewritten_descendants() {
        let root = invocation();
        let targets = root
            .descendant_nodes()
            .filter(|node| matches!(node.kind(), ARGUMENT | IDENTIFIER_NAME))
            .filter(|node| node.to_string() == "a")
            .collect::<Vec<_>>();
        assert_eq!(targets.len(), 2);

        let mut seen = Vec::new();
        let replaced = root
            .replace_nodes(&targets, |original, rewritten| {
                seen.push((original.kind(), rewritten.to_full_string()));
                match original.kind() {
                    IDENTIFIER_NAME => name("", "A"),
                    _ => rewritten,
                }
            })
            .unwrap();
        assert_eq!(replaced.to_full_string(), "m(A, b, /* trivia */ c)");
        assert_eq!(seen, [(IDENTIFIER_NAME, "a".to_owned()), (ARGUMENT, "A".to_owned())]);
    }

    #[test]
    fn token_edits() {
        let root = invocation();
        let open = root.descendant_tokens().find(|token| token.kind() == OPEN_PAREN).unwrap();
        let replaced = root.replace_token(&open, token("", OPEN_PAREN, "(", " ")).unwrap();
        assert_eq!(replaced.to_full_string(), "m( a, b, /* trivia */ c)");
        assert!(matches!(
            root.replace_token_with_many(&open, []),
            Err(SyntaxError::InvalidOperation(_))
        ));

        let comma = root.descendant_tokens().find(|token| token.kind() == COMMA).unwrap();
        let doubled = root.insert_tokens_after(&comma, [token("", COMMA, ",", "")]).unwrap();
        assert_eq!(doubled.to_full_string(), "m(a, ,b, /* trivia */ c)");

        let foreign = invocation().descendant_tokens().next().unwrap();
        assert!(matches!(
            root.replace_token(&foreign, foreign.green().clone()),
            Err(SyntaxError::Argument(_))
        ));
        let inner = root.descendant_nodes().find(|node| node.kind() == ARGUMENT_LIST).unwrap();
        let callee_token = root.descendant_tokens().next().unwrap();
        assert!(matches!(
            inner.replace_token(&callee_token, callee_token.green().clone()),
            Err(SyntaxError::Argument(_))
        ));
    }

    #[test]
    fn trivia_edits() {
        let root = invocation();
        let comment = root.descendant_trivia().find(|piece| piece.kind() == MULTI_LINE_COMMENT).unwrap();
        let removed = root.replace_trivia(&comment, []).unwrap();
        assert_eq!(removed.to_full_string(), "m(a, b,  c)");

        let before = root
            .insert_trivia_before(&comment, [GreenTrivia::new(MULTI_LINE_COMMENT, "/**/")])
            .unwrap();
        assert_eq!(before.to_full_string(), "m(a, b, /**//* trivia */ c)");

        let spaces = root
            .descendant_trivia()
            .filter(|piece| piece.kind() == WHITESPACE)
            .collect::<Vec<_>>();
        let tabs = root
            .replace_trivia_with(&spaces, |_| GreenTrivia::new(WHITESPACE, "\t"))
            .unwrap();
        assert_eq!(tabs.to_full_string(), "m(a,\tb,\t/* trivia */\tc)");
    }

    #[test]
    fn outer_trivia() {
        let root = invocation();
        let wrapped = root
            .with_leading_trivia(trivia("  "))
            .with_trailing_trivia(GreenTriviaList::new([GreenTrivia::new(END_OF_LINE, "\n")]));
        expect![[r#"
            "  m(a, b, /* trivia */ c)\n"
        "#]]
        .assert_debug_eq(&wrapped.to_full_string());
    }

    #[test]
    fn option_flags() {
        let options = RemoveOptions::KEEP_EXTERIOR_TRIVIA | RemoveOptions::KEEP_DIRECTIVES;
        assert!(options.contains(RemoveOptions::KEEP_LEADING_TRIVIA));
        assert!(options.contains(RemoveOptions::KEEP_TRAILING_TRIVIA));
        assert!(!options.contains(RemoveOptions::KEEP_END_OF_LINE));
        assert_eq!(
            format!("{options:?}"),
            "KEEP_LEADING_TRIVIA | KEEP_TRAILING_TRIVIA | KEEP_DIRECTIVES"
        );
        assert_eq!(format!("{:?}", RemoveOptions::default()), "KEEP_NO_TRIVIA");
    }
}
