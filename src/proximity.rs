// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Proximity matching over the lines of one function
//!
//! Walks the lines of a function in order and records which patterns have
//! been seen. With a positive maximum distance the patterns must all be seen
//! inside one window: the window opens on the first hit, and once it has run
//! for `max_distance` lines all progress is discarded and matching starts
//! over. With a maximum distance of zero or less there is no window.

use crate::search::Options;

/// How many new patterns a single line may satisfy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HitPolicy {
    /// Every remaining pattern that matches the line is recorded
    #[default]
    EveryPattern,
    /// Only the first remaining pattern (in pattern order) is recorded
    OnePerLine,
}

/// Per-function matching state. Created fresh for each function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    /// Indexed by pattern position; true while the pattern is still unmatched
    remaining: Vec<bool>,
    hit_count: usize,
    /// Lines elapsed since the window's first hit
    distance: usize,
}

impl MatchState {
    pub fn new(pattern_count: usize) -> Self {
        MatchState {
            remaining: vec![true; pattern_count],
            hit_count: 0,
            distance: 0,
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.iter().filter(|&&r| r).count()
    }

    pub fn is_remaining(&self, index: usize) -> bool {
        self.remaining.get(index).copied().unwrap_or(false)
    }

    /// All patterns seen; terminal for the function
    pub fn is_satisfied(&self) -> bool {
        self.hit_count == self.remaining.len()
    }

    fn reset(&mut self) {
        self.remaining.iter_mut().for_each(|r| *r = true);
        self.hit_count = 0;
        self.distance = 0;
    }

    fn record_hit(&mut self, index: usize) {
        if let Some(slot) = self.remaining.get_mut(index) {
            if *slot {
                *slot = false;
                self.hit_count += 1;
            }
        }
    }

    /// Window bookkeeping done at the top of every line
    fn advance(&mut self, window: Option<usize>) {
        let Some(window) = window else {
            return;
        };
        if self.distance >= window {
            tracing::trace!(distance = self.distance, window, "proximity window reset");
            self.reset();
        }
        if self.hit_count >= 1 {
            self.distance += 1;
        }
    }

    fn scan(&mut self, line: &str, options: &Options) {
        for (index, pattern) in options.patterns().iter().enumerate() {
            if self.is_remaining(index) && pattern.is_match(line) {
                self.record_hit(index);
                if options.hit_policy() == HitPolicy::OnePerLine {
                    break;
                }
            }
        }
    }
}

/// A function that satisfied every pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityMatch {
    /// First non-empty line of the function, trimmed
    pub first_line: String,
    pub state: MatchState,
}

/// Decide whether the given function lines satisfy all patterns
///
/// Returns `None` for an empty function or when the patterns were never all
/// seen inside one window.
pub fn evaluate<'a, I>(lines: I, options: &Options) -> Option<ProximityMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let window = options.window();
    let mut state = MatchState::new(options.patterns().len());
    let mut first_line = "";
    let mut line_count = 0usize;

    for line in lines {
        line_count += 1;
        let satisfied = state.is_satisfied();

        if !satisfied {
            state.advance(window);
        }

        if first_line.is_empty() && !line.is_empty() {
            first_line = line;
        }

        if !satisfied {
            state.scan(line, options);
        }
    }

    if line_count == 0 || !state.is_satisfied() {
        return None;
    }

    Some(ProximityMatch {
        first_line: first_line.trim().to_string(),
        state,
    })
}
