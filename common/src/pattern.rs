//! Keyword set that filenames are matched against.
//!
//! Matching is a plain, case-sensitive substring search. No globbing, no
//! regular expressions.

use std::path::Path;

use crate::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
}

impl PatternSet {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Builds the set from the command line.
    ///
    /// Without a pattern file the set is exactly `[literal]`. The literal
    /// defaults to empty, and the empty keyword is a substring of every name,
    /// so an unfiltered run reports everything. With a pattern file the
    /// literal is only added when it is non-empty.
    ///
    /// An unreadable pattern file is logged and skipped; a non-empty literal
    /// still applies.
    pub fn load(literal: &str, file: Option<&Path>) -> Self {
        let Some(path) = file else {
            return Self::new(vec![literal.to_string()]);
        };

        let mut patterns = Vec::new();
        match std::fs::read_to_string(path) {
            Ok(contents) => patterns.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            ),
            Err(e) => warn!("Error reading pattern file {}: {}", path.display(), e),
        }

        if !literal.is_empty() {
            patterns.push(literal.to_string());
        }

        Self { patterns }
    }

    /// True when any keyword occurs in `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when every name matches, i.e. the set holds the empty keyword.
    pub fn matches_everything(&self) -> bool {
        self.patterns.iter().any(String::is_empty)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
