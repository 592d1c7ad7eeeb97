// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Rendering of search results

use std::path::Path;

use serde::Serialize;

use crate::search::{FileResults, MatchRecord};

/// Output style for result lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

// ANSI color codes
fn red(color: bool) -> &'static str {
    if color { "\x1b[31m" } else { "" }
}
fn green(color: bool) -> &'static str {
    if color { "\x1b[38;5;22m" } else { "" }
}
fn reset(color: bool) -> &'static str {
    if color { "\x1b[0m" } else { "" }
}

/// `<path>@<start_line> [<class_name>]: <first_line>`
pub fn text_line(path: &Path, record: &MatchRecord, color: bool) -> String {
    format!(
        "{}{}@{}{} [{}{}{}]: {}",
        red(color),
        path.display(),
        record.start_line,
        reset(color),
        green(color),
        record.class_name,
        reset(color),
        record.first_line
    )
}

#[derive(Serialize)]
struct JsonLine<'a> {
    path: String,
    #[serde(flatten)]
    record: &'a MatchRecord,
}

pub fn json_line(path: &Path, record: &MatchRecord) -> serde_json::Result<String> {
    serde_json::to_string(&JsonLine {
        path: path.display().to_string(),
        record,
    })
}

/// Render every match of a file, one output line per match
pub fn render(results: &FileResults, format: Format, color: bool) -> serde_json::Result<Vec<String>> {
    results
        .matches
        .iter()
        .map(|record| match format {
            Format::Text => Ok(text_line(&results.path, record, color)),
            Format::Json => json_line(&results.path, record),
        })
        .collect()
}
