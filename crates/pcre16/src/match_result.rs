//! Decoded results of one match attempt.

use std::ops::{Index, Range};

use smol_str::SmolStr;

/// One capture group of a match. Offsets are UTF-16 code units into the
/// subject; `start <= end <= subject length`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capture {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub name: Option<SmolStr>,
}

impl Capture {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Captures of a single match, addressable by group number and, for named
/// groups, by name. Group 0 is always the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchResult {
    whole: Capture,
    /// Groups 1.. in order; `None` for groups that did not participate.
    groups: Vec<Option<Capture>>,
}

impl MatchResult {
    pub(crate) fn new(whole: Capture, groups: Vec<Option<Capture>>) -> Self {
        MatchResult { whole, groups }
    }

    /// Number of capture slots reported by the engine, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len() + 1
    }

    /// Never true; a match always has group 0.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn whole(&self) -> &Capture {
        &self.whole
    }

    pub fn start(&self) -> usize {
        self.whole.start
    }

    pub fn end(&self) -> usize {
        self.whole.end
    }

    pub fn get(&self, index: usize) -> Option<&Capture> {
        match index {
            0 => Some(&self.whole),
            n => self.groups.get(n - 1).and_then(Option::as_ref),
        }
    }

    /// The first participating group declared with `name`.
    pub fn name(&self, name: &str) -> Option<&Capture> {
        self.iter().find(|c| c.name.as_deref() == Some(name))
    }

    /// Participating groups in index order, starting with group 0.
    pub fn iter(&self) -> impl Iterator<Item = &Capture> {
        std::iter::once(&self.whole).chain(self.groups.iter().flatten())
    }

    /// Participating named groups.
    pub fn named(&self) -> impl Iterator<Item = (&str, &Capture)> {
        self.iter().filter_map(|c| c.name.as_deref().map(|name| (name, c)))
    }
}

impl Index<usize> for MatchResult {
    type Output = Capture;

    fn index(&self, index: usize) -> &Capture {
        match self.get(index) {
            Some(capture) => capture,
            None => panic!("no capture for group {}", index),
        }
    }
}

impl Index<&str> for MatchResult {
    type Output = Capture;

    fn index(&self, name: &str) -> &Capture {
        match self.name(name) {
            Some(capture) => capture,
            None => panic!("no capture for group named '{}'", name),
        }
    }
}
