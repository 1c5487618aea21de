// Substitution with a growing output buffer

use crate::codec::{self, Utf16Source};
use crate::error::{PcreError, PcreResult, SubstituteError};
use crate::ffi::{ForeignBuffer, codes};
use crate::flags::SubstituteOptions;
use crate::last_error;

use super::Pattern;
use super::matcher::MatchBlock;

impl Pattern {
    /// Replace the first match. A subject without a match comes back as is.
    pub fn substitute<S, R>(&self, subject: &S, replacement: &R) -> PcreResult<String>
    where
        S: Utf16Source + ?Sized,
        R: Utf16Source + ?Sized,
    {
        self.substitute_from_start(subject, replacement, SubstituteOptions::default())
    }

    /// Replace every match.
    pub fn substitute_all<S, R>(&self, subject: &S, replacement: &R) -> PcreResult<String>
    where
        S: Utf16Source + ?Sized,
        R: Utf16Source + ?Sized,
    {
        self.substitute_from_start(subject, replacement, SubstituteOptions::global())
    }

    fn substitute_from_start<S, R>(
        &self,
        subject: &S,
        replacement: &R,
        options: SubstituteOptions,
    ) -> PcreResult<String>
    where
        S: Utf16Source + ?Sized,
        R: Utf16Source + ?Sized,
    {
        // Only an empty subject yields None at offset 0.
        Ok(self
            .substitute_at(subject, replacement, 0, options)?
            .unwrap_or_default())
    }

    /// Substitute starting at code unit `start`.
    ///
    /// Returns `Ok(None)` when `start` is at or past the end of the subject.
    /// The output buffer starts at one and a half times the subject length
    /// and doubles whenever the engine runs out of room; past
    /// `max_substitute_units` the call fails with [`PcreError::NoMemory`].
    pub fn substitute_at<S, R>(
        &self,
        subject: &S,
        replacement: &R,
        start: usize,
        options: SubstituteOptions,
    ) -> PcreResult<Option<String>>
    where
        S: Utf16Source + ?Sized,
        R: Utf16Source + ?Sized,
    {
        let code = self.handle()?;
        let units = subject.to_code_units();
        if start >= units.len() {
            return Ok(None);
        }
        let replacement = replacement.to_code_units();

        let api = self.engine.api();
        let limits = self.engine.limits();
        let subject_buffer = ForeignBuffer::from_units(api, &units)?;
        let replacement_buffer = ForeignBuffer::from_units(api, &replacement)?;
        let block = MatchBlock::create(api, code)?;

        let mut capacity = limits.initial_substitute_capacity(units.len());
        loop {
            let mut output = ForeignBuffer::alloc(api, capacity)?;
            let rc = unsafe {
                (api.substitute)(
                    code,
                    subject_buffer.as_ptr(),
                    units.len(),
                    start,
                    block.as_ptr(),
                    options.bits(),
                    replacement_buffer.as_ptr(),
                    replacement.len(),
                    output.as_mut_ptr(),
                    capacity,
                )
            };

            if rc == codes::NOMEMORY {
                let next = capacity.saturating_mul(2).max(capacity.saturating_add(1));
                if capacity >= limits.max_substitute_units || next > limits.max_substitute_units {
                    log::warn!(
                        "{}: substitution output would exceed {} code units",
                        self,
                        limits.max_substitute_units
                    );
                    return Err(PcreError::NoMemory {
                        capacity: next,
                        limit: limits.max_substitute_units,
                    });
                }
                log::debug!("{}: output buffer {} -> {} code units", self, capacity, next);
                capacity = next;
                continue;
            }
            if rc < 0 {
                let err = last_error::read(api)?;
                return Err(SubstituteError {
                    code: rc,
                    message: PcreError::engine_message(rc, &err.message),
                }
                .into());
            }
            if rc == 0 {
                // Zero units written is either no match or an empty result.
                if self.exec_once(&subject_buffer, &units, start)?.is_some() {
                    return Ok(Some(String::new()));
                }
                return codec::decode(&units).map(Some);
            }
            return codec::decode(output.units(rc as usize)).map(Some);
        }
    }
}
