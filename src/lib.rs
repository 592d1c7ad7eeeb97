// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Simple Search - find Python functions by pattern proximity
//!
//! Locates function definitions whose source mentions every one of a set of
//! regular expressions, optionally within a bounded number of lines of each
//! other, and reports each match with its enclosing class.

pub mod args;
pub mod error;
pub mod parser;
pub mod proximity;
pub mod report;
pub mod search;

// Re-export commonly used items
pub use args::{find_source_files, format_number, PathFilter, SearchArgs, SearchSource};
pub use error::SearchError;
pub use parser::{parse_file, NodeKind, ParsedFile, Position, SyntaxNode};
pub use proximity::HitPolicy;
pub use search::{search, search_file, search_files, search_source, FileResults, MatchRecord, Options};
