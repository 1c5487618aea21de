// Repeated matching over one subject

use crate::codec::{self, Utf16Source};
use crate::error::{PcreError, PcreResult};
use crate::ffi::ForeignBuffer;
use crate::flags::ExecFlags;
use crate::match_result::MatchResult;

use super::Pattern;

impl Pattern {
    /// All non-overlapping matches, left to right.
    ///
    /// After an empty match the search resumes one character later so the
    /// scan always makes progress. Fails with `IterationLimit` once the
    /// engine's `max_match_iterations` is exceeded.
    pub fn match_all<S>(&self, subject: &S) -> PcreResult<Vec<MatchResult>>
    where
        S: Utf16Source + ?Sized,
    {
        self.handle()?;
        let units = subject.to_code_units();
        let mut matches = Vec::new();
        if units.is_empty() {
            return Ok(matches);
        }

        let limit = self.engine.limits().max_match_iterations;
        let buffer = ForeignBuffer::from_units(self.engine.api(), &units)?;
        let mut start = 0;
        while start < units.len() {
            let Some(found) = self.exec_once(&buffer, &units, start)? else {
                break;
            };
            start = if found.end() > found.start() {
                found.end()
            } else {
                codec::next_boundary(&units, found.end())
            };
            matches.push(found);
            if matches.len() > limit {
                log::warn!("{}: match_all stopped after {} iterations", self, limit);
                return Err(PcreError::IterationLimit { limit });
            }
        }
        Ok(matches)
    }

    /// `"g"` collects every match; any other flag set yields at most one.
    pub fn exec<S>(&self, subject: &S, flags: &str) -> PcreResult<Vec<MatchResult>>
    where
        S: Utf16Source + ?Sized,
    {
        let flags: ExecFlags = flags.parse()?;
        if flags.global {
            self.match_all(subject)
        } else {
            Ok(self.find(subject)?.into_iter().collect())
        }
    }
}
