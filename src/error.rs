// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Error types for simple-search

use std::path::PathBuf;

/// Errors raised while configuring or running a search
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// A pattern string did not compile as a regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source contains syntax the parser could not accept
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to load Python grammar: {message}")]
    Language { message: String },
}

impl SearchError {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// True for errors that only affect one file's search
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
