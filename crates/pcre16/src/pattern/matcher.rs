// Single match attempts
// Every attempt allocates its own match block and releases it on all paths.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::codec::Utf16Source;
use crate::error::{MatchError, PcreError, PcreResult};
use crate::ffi::{EngineApi, ForeignBuffer, codes};
use crate::last_error;
use crate::match_result::{Capture, MatchResult};

use super::Pattern;

/// Engine-owned match data sized for one pattern.
pub(crate) struct MatchBlock<'a> {
    api: &'a EngineApi,
    ptr: NonNull<c_void>,
}

impl<'a> MatchBlock<'a> {
    pub fn create(api: &'a EngineApi, code: *mut c_void) -> PcreResult<Self> {
        let raw = unsafe { (api.create_match_data)(code) };
        let ptr = NonNull::new(raw).ok_or_else(|| {
            PcreError::Match(MatchError {
                code: codes::NOMEMORY,
                message: PcreError::engine_message(codes::NOMEMORY, "could not create match data"),
            })
        })?;
        Ok(MatchBlock { api, ptr })
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// Offset pairs, flattened. Valid until the next engine call on this block.
    pub fn ovector(&self) -> &[u32] {
        unsafe {
            let pairs = (self.api.get_ovector_count)(self.as_ptr()) as usize;
            let ptr = (self.api.get_ovector_pointer)(self.as_ptr());
            if ptr.is_null() || pairs == 0 {
                return &[];
            }
            std::slice::from_raw_parts(ptr, pairs * 2)
        }
    }
}

impl Drop for MatchBlock<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.destroy_match_data)(self.ptr.as_ptr()) };
    }
}

impl Pattern {
    /// One match attempt starting at code unit `start`.
    ///
    /// `Ok(None)` when nothing matches, including when `start` is at or past
    /// the end of the subject.
    pub fn match_at<S>(&self, subject: &S, start: usize) -> PcreResult<Option<MatchResult>>
    where
        S: Utf16Source + ?Sized,
    {
        self.handle()?;
        let units = subject.to_code_units();
        if start >= units.len() {
            return Ok(None);
        }
        let buffer = ForeignBuffer::from_units(self.engine.api(), &units)?;
        self.exec_once(&buffer, &units, start)
    }

    /// First match from the start of the subject.
    pub fn find<S>(&self, subject: &S) -> PcreResult<Option<MatchResult>>
    where
        S: Utf16Source + ?Sized,
    {
        self.match_at(subject, 0)
    }

    pub fn is_match<S>(&self, subject: &S) -> PcreResult<bool>
    where
        S: Utf16Source + ?Sized,
    {
        Ok(self.find(subject)?.is_some())
    }

    /// Match against a subject already copied to the engine heap.
    pub(crate) fn exec_once(
        &self,
        buffer: &ForeignBuffer<'_>,
        units: &[u16],
        start: usize,
    ) -> PcreResult<Option<MatchResult>> {
        let code = self.handle()?;
        let api = self.engine.api();
        let block = MatchBlock::create(api, code)?;

        let rc = unsafe { (api.match_)(code, buffer.as_ptr(), units.len(), start, block.as_ptr()) };
        if rc == codes::NOMATCH {
            return Ok(None);
        }
        if rc < 0 {
            let err = last_error::read(api)?;
            // Some engines report no-match through other negative codes.
            if err.is_clear() {
                return Ok(None);
            }
            return Err(MatchError {
                code: rc,
                message: PcreError::engine_message(rc, &err.message),
            }
            .into());
        }
        if rc == 0 {
            return Ok(None);
        }

        self.decode_captures(units, block.ovector(), rc as usize).map(Some)
    }

    /// Turn offset pairs into captures. Groups at or beyond `set`, and pairs
    /// holding the unset marker, become absent entries.
    fn decode_captures(&self, units: &[u16], ovector: &[u32], set: usize) -> PcreResult<MatchResult> {
        let mut slots = Vec::with_capacity(ovector.len() / 2);
        for (index, pair) in ovector.chunks_exact(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if index >= set || start == codes::UNSET_OFFSET {
                slots.push(None);
                continue;
            }
            let (s, e) = (start as usize, end as usize);
            if s > e || e > units.len() {
                return Err(PcreError::InvalidOvector { index, start, end });
            }
            slots.push(Some(Capture {
                index,
                start: s,
                end: e,
                text: String::from_utf16_lossy(&units[s..e]),
                name: self.names.name(index).cloned(),
            }));
        }

        let mut slots = slots.into_iter();
        let whole = match slots.next() {
            Some(Some(whole)) => whole,
            _ => {
                return Err(PcreError::InvalidOvector {
                    index: 0,
                    start: codes::UNSET_OFFSET,
                    end: codes::UNSET_OFFSET,
                });
            }
        };
        Ok(MatchResult::new(whole, slots.collect()))
    }
}
