//! Snippet highlighting
//!
//! Splits a snippet into plain and marked segments. The query is matched as a
//! literal, case-insensitively, everywhere it occurs.

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Marked(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Marked(text) => text,
        }
    }

    pub fn is_marked(&self) -> bool {
        matches!(self, Segment::Marked(_))
    }
}

fn literal_pattern(query: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

pub fn highlight_snippet<'a>(snippet: &'a str, query: &str) -> Vec<Segment<'a>> {
    if query.is_empty() {
        return vec![Segment::Plain(snippet)];
    }

    let pattern = match literal_pattern(query) {
        Some(pattern) => pattern,
        None => return vec![Segment::Plain(snippet)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(snippet) {
        if found.start() > last {
            segments.push(Segment::Plain(&snippet[last..found.start()]));
        }
        segments.push(Segment::Marked(found.as_str()));
        last = found.end();
    }
    if last < snippet.len() || segments.is_empty() {
        segments.push(Segment::Plain(&snippet[last..]));
    }
    segments
}

/// Marked substrings only, in order
pub fn marked_parts<'a>(snippet: &'a str, query: &str) -> Vec<&'a str> {
    highlight_snippet(snippet, query)
        .into_iter()
        .filter(Segment::is_marked)
        .map(|segment| segment.text())
        .collect()
}
