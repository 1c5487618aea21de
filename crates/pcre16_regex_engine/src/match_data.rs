// Match data block: one start/end pair of UTF-16 offsets per capture slot.

use regex::Captures;

use crate::codes;
use crate::utf16::Text;

pub struct MatchData {
    pub ovector: Vec<u32>,
}

impl MatchData {
    pub fn new(pairs: usize) -> Self {
        MatchData {
            ovector: vec![codes::UNSET_OFFSET; pairs * 2],
        }
    }

    pub fn pairs(&self) -> usize {
        self.ovector.len() / 2
    }

    /// Store the offsets of `caps` and return the PCRE2 result code: one more
    /// than the highest group that was set.
    pub fn record(&mut self, caps: &Captures<'_>, text: &Text) -> i32 {
        self.ovector.fill(codes::UNSET_OFFSET);
        let mut highest = 0;
        for (i, group) in caps.iter().enumerate().take(self.pairs()) {
            if let Some(m) = group {
                self.ovector[2 * i] = text.unit_at_byte(m.start()) as u32;
                self.ovector[2 * i + 1] = text.unit_at_byte(m.end()) as u32;
                highest = i + 1;
            }
        }
        highest as i32
    }
}
