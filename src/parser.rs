// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Parser module for handling Python source code parsing
//!
//! Parses with tree-sitter and lowers the concrete tree into an owned
//! [`SyntaxNode`] tree that only distinguishes the node kinds the search
//! cares about: classes, functions, structural blocks, and everything else.

use std::ops::Range;

use tree_sitter::{Language, Node, Parser};

use crate::error::{Result, SearchError};

/// Statement containers the walker descends into without changing the class context
const BLOCK_KINDS: &[&str] = &[
    "module",
    "block",
    "decorated_definition",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

/// A source position: 1-based line, 0-based column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Class { name: String },
    Function,
    Block,
    Other,
}

/// Owned syntax node. Only `Class` and `Block` nodes carry children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub start: Position,
    pub end: Position,
    pub byte_range: Range<usize>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn class_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Class { name } => Some(name),
            _ => None,
        }
    }
}

/// Parse result for one source file; owns both the text and the lowered tree
#[derive(Debug, Clone)]
pub struct ParsedFile {
    source: String,
    root: SyntaxNode,
}

impl ParsedFile {
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Source text of a node, widened back to the start of its first line
    /// so the signature keeps its indentation.
    pub fn function_code(&self, node: &SyntaxNode) -> &str {
        let end = node.byte_range.end.min(self.source.len());
        let start = line_start(&self.source, node.byte_range.start.min(end));
        self.source.get(start..end).unwrap_or_default()
    }
}

/// Parse Python source into a [`ParsedFile`]
///
/// Fails with [`SearchError::Parse`] if the tree contains any error or
/// missing node, reporting the line of the first one. The whole file is
/// rejected, including functions the error does not touch.
pub fn parse_file(source: &str) -> Result<ParsedFile> {
    let language: Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| SearchError::Language {
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| SearchError::parse(1, "parser returned no tree"))?;
    let root = tree.root_node();

    if root.has_error() {
        let line = first_error(root).map_or(1, |n| n.start_position().row + 1);
        return Err(SearchError::parse(
            line,
            "invalid Python syntax, whole file rejected",
        ));
    }

    Ok(ParsedFile {
        source: source.to_string(),
        root: lower(root, source),
    })
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn classify(node: Node<'_>, source: &str) -> NodeKind {
    match node.kind() {
        "class_definition" => {
            let name = node
                .child_by_field_name("name")
                .and_then(|n| source.get(n.byte_range()))
                .unwrap_or_default()
                .to_string();
            NodeKind::Class { name }
        }
        "function_definition" => NodeKind::Function,
        kind if BLOCK_KINDS.contains(&kind) => NodeKind::Block,
        _ => NodeKind::Other,
    }
}

fn lower(node: Node<'_>, source: &str) -> SyntaxNode {
    let kind = classify(node, source);
    let children = match kind {
        NodeKind::Class { .. } | NodeKind::Block => {
            let mut cursor = node.walk();
            let named: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            named.into_iter().map(|child| lower(child, source)).collect()
        }
        NodeKind::Function | NodeKind::Other => Vec::new(),
    };

    let start = node.start_position();
    let end = node.end_position();
    SyntaxNode {
        kind,
        start: Position {
            line: start.row + 1,
            column: start.column,
        },
        end: Position {
            line: end.row + 1,
            column: end.column,
        },
        byte_range: node.byte_range(),
        children,
    }
}

fn line_start(source: &str, byte: usize) -> usize {
    source
        .get(..byte)
        .and_then(|prefix| prefix.rfind('\n'))
        .map_or(0, |i| i + 1)
}
