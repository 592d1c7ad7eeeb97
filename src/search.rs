// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Function search over parsed Python sources
//!
//! The walker descends through classes and structural blocks, remembering
//! the nearest enclosing class, and hands every function it meets to the
//! proximity matcher.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::parser::{parse_file, NodeKind, ParsedFile, SyntaxNode};
use crate::proximity::{self, HitPolicy};

/// Search configuration, fixed for one invocation
#[derive(Debug, Clone)]
pub struct Options {
    patterns: Vec<Regex>,
    max_distance: i64,
    hit_policy: HitPolicy,
}

impl Options {
    /// Compile the pattern strings. Fails on the first invalid one.
    pub fn new<S: AsRef<str>>(patterns: &[S], max_distance: i64) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| SearchError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Options {
            patterns,
            max_distance,
            hit_policy: HitPolicy::default(),
        })
    }

    /// Build from a comma-separated pattern list, e.g. `"open,close"`
    pub fn from_includes(includes: &str, max_distance: i64) -> Result<Self> {
        let patterns: Vec<&str> = includes.split(',').collect();
        Self::new(patterns.as_slice(), max_distance)
    }

    pub fn with_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.hit_policy = hit_policy;
        self
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn max_distance(&self) -> i64 {
        self.max_distance
    }

    pub fn hit_policy(&self) -> HitPolicy {
        self.hit_policy
    }

    /// Window size in lines, or `None` when distance is unlimited
    pub fn window(&self) -> Option<usize> {
        usize::try_from(self.max_distance).ok().filter(|&d| d > 0)
    }
}

/// One matching function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Nearest enclosing class, empty at module level
    pub class_name: String,
    pub first_line: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// All matches found in one file, in walk order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResults {
    pub path: PathBuf,
    pub matches: Vec<MatchRecord>,
}

/// Walk the children of `node`, returning a record for each matching function
///
/// Classes set the class context for their subtree, blocks keep the current
/// one, functions are evaluated but never descended into, and every other
/// node is skipped.
pub fn search(
    file: &ParsedFile,
    node: &SyntaxNode,
    options: &Options,
    class_name: &str,
) -> Vec<MatchRecord> {
    let mut results = Vec::new();

    for child in &node.children {
        match &child.kind {
            NodeKind::Class { name } => {
                results.extend(search(file, child, options, name));
            }
            NodeKind::Block => {
                results.extend(search(file, child, options, class_name));
            }
            NodeKind::Function => {
                if let Some(record) = evaluate(file, child, options, class_name) {
                    results.push(record);
                }
            }
            NodeKind::Other => {}
        }
    }

    results
}

/// Run the proximity matcher on one function node
pub fn evaluate(
    file: &ParsedFile,
    function: &SyntaxNode,
    options: &Options,
    class_name: &str,
) -> Option<MatchRecord> {
    let code = file.function_code(function);
    let found = proximity::evaluate(code.lines(), options)?;

    tracing::debug!(
        class = class_name,
        line = function.start.line,
        "function matched"
    );

    Some(MatchRecord {
        class_name: class_name.to_string(),
        first_line: found.first_line,
        start_line: function.start.line,
        end_line: function.end.line,
    })
}

/// Parse Python source and search it from the module root
pub fn search_source(source: &str, options: &Options) -> Result<Vec<MatchRecord>> {
    let parsed = parse_file(source)?;
    Ok(search(&parsed, parsed.root(), options, ""))
}

/// Read one file fully, then parse and search it
pub fn search_file(path: &Path, options: &Options) -> Result<FileResults> {
    let source = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = source.len(), "searching file");

    let matches = search_source(&source, options)?;
    Ok(FileResults {
        path: path.to_path_buf(),
        matches,
    })
}

/// Search many files on the rayon pool, keeping input order
///
/// A file that fails to parse is logged and skipped whole, even functions
/// away from the syntax error. Any other error (an unreadable file) aborts
/// the whole search.
pub fn search_files(files: &[PathBuf], options: &Options) -> Result<Vec<FileResults>> {
    let outcomes: Vec<Result<FileResults>> = files
        .par_iter()
        .map(|path| search_file(path, options))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(found) => results.push(found),
            Err(e) if e.is_parse() => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping file with syntax errors, none of its functions searched"
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_disabled_for_non_positive() {
        assert_eq!(Options::new(&["a"], -1).unwrap().window(), None);
        assert_eq!(Options::new(&["a"], 0).unwrap().window(), None);
        assert_eq!(Options::new(&["a"], 4).unwrap().window(), Some(4));
    }

    #[test]
    fn test_from_includes_splits_on_commas() {
        let options = Options::from_includes("open,close", -1).unwrap();
        let patterns: Vec<&str> = options.patterns().iter().map(Regex::as_str).collect();
        assert_eq!(patterns, vec!["open", "close"]);
    }

    #[test]
    fn test_invalid_pattern_names_the_pattern() {
        let err = Options::new(&["ok", "(unclosed"], -1).unwrap_err();
        match err {
            SearchError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
