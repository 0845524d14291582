//! Line breaks and indentation.
//!
//! A node is *expanded* when its braces sit on lines of their own and its
//! contents are indented one level between them.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::{NodeOrToken, SyntaxNode, SyntaxToken};
use text_size::TextSize;

use crate::NormalizeOptions;

pub(crate) struct Layout<'a> {
    root: &'a SyntaxNode,
    options: &'a NormalizeOptions,
    expanded: RefCell<FxHashMap<SyntaxNode, bool>>,
    braces: RefCell<FxHashMap<SyntaxNode, Option<(TextSize, TextSize)>>>,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(root: &'a SyntaxNode, options: &'a NormalizeOptions) -> Self {
        Self {
            root,
            options,
            expanded: RefCell::default(),
            braces: RefCell::default(),
        }
    }

    pub(crate) fn is_expanded(&self, node: &SyntaxNode) -> bool {
        if let Some(&expanded) = self.expanded.borrow().get(node) {
            return expanded;
        }
        let expanded = match node.kind() {
            BLOCK | NAMESPACE_DECLARATION | SWITCH_STATEMENT => true,
            kind if kind.is_type_declaration() => true,
            ACCESSOR_LIST => node
                .children()
                .any(|accessor| accessor.children().any(|child| child.kind() == BLOCK)),
            COMPLEX_ELEMENT_INITIALIZER_EXPRESSION => false,
            kind if kind.is_initializer_expression() => !self.in_single_line_context(node),
            _ => false,
        };
        self.expanded.borrow_mut().insert(node.clone(), expanded);
        expanded
    }

    fn in_single_line_context(&self, node: &SyntaxNode) -> bool {
        node.ancestors().any(|ancestor| self.options.single_line_contexts.contains(ancestor.kind()))
    }

    /// End of the `{` and start of the `}` directly under `node`.
    fn braces(&self, node: &SyntaxNode) -> Option<(TextSize, TextSize)> {
        if let Some(&braces) = self.braces.borrow().get(node) {
            return braces;
        }
        let mut open = None;
        let mut close = None;
        for child in node.children_with_tokens() {
            if let NodeOrToken::Token(token) = child {
                match token.kind() {
                    OPEN_BRACE if open.is_none() => open = Some(token.span().end()),
                    CLOSE_BRACE => close = Some(token.span().start()),
                    _ => {}
                }
            }
        }
        let braces = open.map(|open| (open, close.unwrap_or_else(|| node.end_position())));
        self.braces.borrow_mut().insert(node.clone(), braces);
        braces
    }

    /// Indentation level of the line `token` starts.
    pub(crate) fn depth(&self, token: &SyntaxToken) -> usize {
        let mut depth = 0;
        let start = token.span().start();
        let mut child_kind = token.kind();
        let mut child_is_statement = false;

        for node in token.ancestors() {
            if self.is_expanded(&node)
                && let Some((open, close)) = self.braces(&node)
                && open <= start
                && start < close
            {
                depth += 1;
            }
            if child_is_statement && indents_statement(node.kind(), child_kind) {
                depth += 1;
            }
            if node == *self.root {
                break;
            }
            child_kind = node.kind();
            child_is_statement = child_kind.is_statement();
        }
        depth
    }

    /// How many line breaks separate `prev` from `next`.
    pub(crate) fn line_breaks(&self, prev: &SyntaxToken, next: &SyntaxToken) -> usize {
        if next.kind() == END_OF_FILE {
            return 0;
        }
        self.breaks_after(prev, next).max(self.breaks_before(next)).max(self.member_gap(prev, next))
    }

    fn breaks_after(&self, prev: &SyntaxToken, next: &SyntaxToken) -> usize {
        let Some(parent) = prev.parent() else {
            return 0;
        };
        match prev.kind() {
            SEMICOLON => match parent.kind() {
                FOR_STATEMENT => 0,
                kind if kind.is_accessor_declaration() => {
                    usize::from(parent.parent().is_some_and(|list| self.is_expanded(&list)))
                }
                FILE_SCOPED_NAMESPACE_DECLARATION => 2,
                _ => 1,
            },
            OPEN_BRACE if self.is_expanded(parent) => 1,
            CLOSE_BRACE if self.is_expanded(parent) => match next.kind() {
                SEMICOLON | COMMA | CLOSE_PAREN | CLOSE_BRACKET | DOT => 0,
                WHILE_KW if next.parent().is_some_and(|node| node.kind() == DO_STATEMENT) => 0,
                _ => 1,
            },
            COMMA if self.one_per_line(parent) => 1,
            COLON if matches!(parent.kind(), CASE_SWITCH_LABEL | DEFAULT_SWITCH_LABEL) => 1,
            CLOSE_BRACKET if parent.kind() == ATTRIBUTE_LIST && attributes_on_own_line(parent) => 1,
            _ => 0,
        }
    }

    fn one_per_line(&self, node: &SyntaxNode) -> bool {
        match node.kind() {
            ENUM_DECLARATION => true,
            kind if kind.is_initializer_expression() => self.is_expanded(node),
            _ => false,
        }
    }

    fn breaks_before(&self, next: &SyntaxToken) -> usize {
        if let Some(parent) = next.parent()
            && matches!(next.kind(), OPEN_BRACE | CLOSE_BRACE)
            && self.is_expanded(parent)
        {
            return 1;
        }

        let mut node = next.parent().cloned();
        while let Some(current) = node {
            if current.first_token().as_ref() != Some(next) {
                break;
            }
            if self.starts_line(&current) {
                return 1;
            }
            if current == *self.root {
                break;
            }
            node = current.parent();
        }
        0
    }

    /// Whether `node` always begins a line of its own.
    fn starts_line(&self, node: &SyntaxNode) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        match node.kind() {
            USING_DIRECTIVE | EXTERN_ALIAS_DIRECTIVE | SWITCH_SECTION | CASE_SWITCH_LABEL
            | DEFAULT_SWITCH_LABEL | ELSE_CLAUSE | CATCH_CLAUSE | FINALLY_CLAUSE => true,
            ATTRIBUTE_LIST => parent.kind() == COMPILATION_UNIT,
            kind if kind.is_member_declaration() => true,
            kind if kind.is_accessor_declaration() => self.is_expanded(&parent),
            kind if kind.is_statement() => match parent.kind() {
                ELSE_CLAUSE => kind != IF_STATEMENT,
                LABELED_STATEMENT => false,
                parent_kind => parent_kind.is_statement() || parent_kind == SWITCH_SECTION,
            },
            _ => false,
        }
    }

    /// Blank lines between sibling declarations: one when either side
    /// spans several lines or the kind of directive changes.
    fn member_gap(&self, prev: &SyntaxToken, next: &SyntaxToken) -> usize {
        let Some(last) = enclosing_unit(prev, |node| node.last_token()) else {
            return 0;
        };
        let Some(first) = enclosing_unit(next, |node| node.first_token()) else {
            return 0;
        };
        if last.parent() != first.parent() {
            return 0;
        }
        match (last.kind(), first.kind()) {
            (USING_DIRECTIVE, USING_DIRECTIVE)
            | (EXTERN_ALIAS_DIRECTIVE, EXTERN_ALIAS_DIRECTIVE)
            | (ATTRIBUTE_LIST, ATTRIBUTE_LIST) => 1,
            (USING_DIRECTIVE | EXTERN_ALIAS_DIRECTIVE | ATTRIBUTE_LIST, _) => 2,
            _ if self.spans_lines(&last) || self.spans_lines(&first) => 2,
            _ => 1,
        }
    }

    fn spans_lines(&self, node: &SyntaxNode) -> bool {
        node.descendants().and_self().nodes().any(|node| self.is_expanded(&node))
    }
}

/// `true` when a statement of kind `child` directly under `parent` is
/// indented one level past it.
fn indents_statement(parent: SyntaxKind, child: SyntaxKind) -> bool {
    match parent {
        SWITCH_SECTION => true,
        ELSE_CLAUSE => !matches!(child, BLOCK | IF_STATEMENT),
        USING_STATEMENT | FIXED_STATEMENT => {
            !matches!(child, BLOCK | USING_STATEMENT | FIXED_STATEMENT)
        }
        IF_STATEMENT | WHILE_STATEMENT | DO_STATEMENT | FOR_STATEMENT | FOREACH_STATEMENT
        | LOCK_STATEMENT => child != BLOCK,
        _ => false,
    }
}

fn attributes_on_own_line(list: &SyntaxNode) -> bool {
    list.parent().is_some_and(|owner| {
        let kind = owner.kind();
        kind == COMPILATION_UNIT || kind.is_member_declaration() || kind.is_accessor_declaration()
    })
}

/// The declaration or directive that `token` begins or ends, as chosen by
/// `edge`.
fn enclosing_unit(
    token: &SyntaxToken,
    edge: impl Fn(&SyntaxNode) -> Option<SyntaxToken>,
) -> Option<SyntaxNode> {
    let mut node = token.parent().cloned();
    while let Some(current) = node {
        if edge(&current).as_ref() != Some(token) {
            return None;
        }
        let kind = current.kind();
        let is_unit = matches!(kind, USING_DIRECTIVE | EXTERN_ALIAS_DIRECTIVE)
            || kind.is_member_declaration()
            || (kind == ATTRIBUTE_LIST
                && current.parent().is_some_and(|parent| parent.kind() == COMPILATION_UNIT));
        if is_unit {
            return Some(current);
        }
        node = current.parent();
    }
    None
}
