// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Simple Search - find Python functions mentioning patterns near each other
//!
//! Usage:
//!   simple-search --source-file FILE --includes PAT[,PAT...] [--max-distance N]
//!   simple-search --directories DIR[,DIR...] --includes PAT[,PAT...]
//!                 [--filepath-exclude RE[,RE...]] [--filepath-only RE[,RE...]]
//!
//! Each match prints as `<file>@<line> [<class>]: <first line>`.
//!
//! Binary: simple-search

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simple_search::report::{self, Format};
use simple_search::{
    find_source_files, format_number, search_file, search_files, FileResults, SearchArgs,
    SearchSource,
};

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SIMPLE_SEARCH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Resolve the input source into results, one entry per searched file
fn run_search(args: &SearchArgs) -> Result<Vec<FileResults>> {
    // Patterns compile before any file is read
    let options = args.options().context("Invalid --includes")?;

    match args.source()? {
        SearchSource::SourceFile(path) => {
            let results = search_file(&path, &options)
                .with_context(|| format!("Failed to search {}", path.display()))?;
            Ok(vec![results])
        }
        SearchSource::Directories(dirs) => {
            let filter = args.path_filter().context("Invalid path filter")?;
            let files: Vec<PathBuf> = find_source_files(&dirs, &args.extension, &filter);
            tracing::info!(files = %format_number(files.len()), "collected source files");

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(args.jobs)
                .build()
                .context("Failed to start worker pool")?;
            pool.install(|| search_files(&files, &options))
                .context("Directory search aborted")
        }
    }
}

fn main() -> Result<()> {
    let args = SearchArgs::parse();
    init_tracing(args.quiet, args.verbose)?;

    let results = run_search(&args)?;

    let format = if args.json { Format::Json } else { Format::Text };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total = 0usize;

    for file in &results {
        for line in report::render(file, format, args.color)? {
            writeln!(out, "{line}")?;
        }
        total += file.matches.len();
    }
    out.flush()?;

    tracing::info!(
        files = %format_number(results.len()),
        matches = %format_number(total),
        "search complete"
    );

    Ok(())
}
