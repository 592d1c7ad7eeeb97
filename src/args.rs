// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Command-line arguments and source file selection
//!
//! A search runs either over a single source file or over every file with
//! the chosen extension beneath a set of directories, optionally narrowed by
//! path regexes.

use std::path::{Path, PathBuf};

use clap::Parser;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, SearchError};
use crate::proximity::HitPolicy;
use crate::search::Options;

#[derive(Parser, Debug, Clone)]
#[command(name = "simple-search")]
#[command(about = "Find functions whose bodies mention all patterns within a line distance")]
pub struct SearchArgs {
    /// Source file to search
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Patterns to find, comma-separated regular expressions
    #[arg(long)]
    pub includes: String,

    /// Max distance in lines between the first and last pattern (<= 0: unlimited)
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    pub max_distance: i64,

    /// Directories to search, comma-separated (overrides --source-file)
    #[arg(long, default_value = "")]
    pub directories: String,

    /// Skip file paths matching any of these comma-separated regexes
    #[arg(long, default_value = "")]
    pub filepath_exclude: String,

    /// Only search file paths matching one of these comma-separated regexes
    #[arg(long, default_value = "")]
    pub filepath_only: String,

    /// File extension searched in directory mode
    #[arg(long, default_value = "py")]
    pub extension: String,

    /// Let each line satisfy at most one new pattern
    #[arg(long)]
    pub one_hit_per_line: bool,

    /// Print one JSON object per match
    #[arg(long)]
    pub json: bool,

    /// Highlight file locations with ANSI colors
    #[arg(long)]
    pub color: bool,

    /// Worker threads for directory mode (0: one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub jobs: usize,

    /// Log debug details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Where the files to search come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSource {
    SourceFile(PathBuf),
    Directories(Vec<PathBuf>),
}

impl SearchArgs {
    /// Compile the search options. Runs before any file is touched.
    pub fn options(&self) -> Result<Options> {
        let policy = if self.one_hit_per_line {
            HitPolicy::OnePerLine
        } else {
            HitPolicy::EveryPattern
        };
        Ok(Options::from_includes(&self.includes, self.max_distance)?.with_hit_policy(policy))
    }

    /// Directories take precedence over a single source file
    pub fn source(&self) -> anyhow::Result<SearchSource> {
        let directories = split_list(&self.directories);
        if !directories.is_empty() {
            return Ok(SearchSource::Directories(
                directories.into_iter().map(PathBuf::from).collect(),
            ));
        }
        match &self.source_file {
            Some(path) => Ok(SearchSource::SourceFile(path.clone())),
            None => Err(anyhow::anyhow!(
                "No input specified: use --source-file FILE or --directories DIR[,DIR...]"
            )),
        }
    }

    pub fn path_filter(&self) -> Result<PathFilter> {
        PathFilter::new(&self.filepath_exclude, &self.filepath_only)
    }
}

/// Split a comma-separated option value; an empty value yields no items
pub fn split_list(value: &str) -> Vec<&str> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(',').collect()
    }
}

/// Exclude/only path filters applied in directory mode
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    excludes: Vec<Regex>,
    only: Vec<Regex>,
}

impl PathFilter {
    pub fn new(excludes: &str, only: &str) -> Result<Self> {
        Ok(PathFilter {
            excludes: compile_all(excludes)?,
            only: compile_all(only)?,
        })
    }

    /// Kept iff no exclude matches and, when only-filters exist, one of them matches
    pub fn accepts(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        if self.excludes.iter().any(|re| re.is_match(&path)) {
            return false;
        }
        self.only.is_empty() || self.only.iter().any(|re| re.is_match(&path))
    }
}

fn compile_all(value: &str) -> Result<Vec<Regex>> {
    split_list(value)
        .into_iter()
        .map(|p| {
            Regex::new(p).map_err(|source| SearchError::InvalidPattern {
                pattern: p.to_string(),
                source,
            })
        })
        .collect()
}

/// Find all files with `extension` beneath the given directories
///
/// Directories are walked in the order given; entries within each directory
/// are sorted by file name for reproducible output. Symlinks are followed.
/// Entries that cannot be read (dangling links, unreadable subdirectories)
/// are logged and skipped.
pub fn find_source_files(dirs: &[PathBuf], extension: &str, filter: &PathFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "not a directory, skipping");
            continue;
        }
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|e| e == extension)
                && filter.accepts(path)
            {
                files.push(path.to_path_buf());
            }
        }
    }
    files
}

/// Format a number with comma separators for readability
///
/// Examples:
/// - 1234 -> "1,234"
/// - 1000000 -> "1,000,000"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
