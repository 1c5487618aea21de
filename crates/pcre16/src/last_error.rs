//! Reader for the engine's last-error channel.
//!
//! The channel is a single process-wide slot inside the engine. It describes
//! only the most recent failing call, so it has to be read right after that
//! call and before any other engine call that could overwrite it. Only the
//! engine allocator may run in between; it never touches the channel.

use crate::codec;
use crate::error::PcreResult;
use crate::ffi::{EngineApi, ForeignBuffer, codes};
use crate::limits::ERROR_MESSAGE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub message: String,
    /// Offset in code units into the pattern or subject.
    pub offset: usize,
}

impl LastError {
    /// True when the engine reports that no error is pending.
    pub fn is_clear(&self) -> bool {
        self.message.is_empty() || self.message == codes::NO_ERROR_MESSAGE
    }
}

/// Read message and offset of the last failure. Messages longer than
/// [`ERROR_MESSAGE_CAPACITY`] are truncated.
pub(crate) fn read(api: &EngineApi) -> PcreResult<LastError> {
    let mut buffer = ForeignBuffer::alloc(api, ERROR_MESSAGE_CAPACITY)?;
    let written = unsafe { (api.last_error_message)(buffer.as_mut_ptr(), buffer.capacity()) };
    // A negative count means the message was cut short; the buffer still
    // holds a terminated prefix.
    let filled = usize::try_from(written).unwrap_or(buffer.capacity());
    let message = String::from_utf16_lossy(codec::trim_nul(buffer.units(filled)));
    let offset = unsafe { (api.last_error_offset)() };
    Ok(LastError { message, offset })
}
