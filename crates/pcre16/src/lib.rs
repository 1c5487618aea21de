// UTF-16 regex bindings
// Marshaling and lifetime layer over a natively compiled PCRE2-style engine

#[cfg(test)]
mod test;

pub mod codec;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod flags;
pub mod global;
pub mod last_error;
pub mod limits;
pub mod match_result;
pub mod pattern;

pub use codec::Utf16Source;
pub use engine::Engine;
pub use error::{CompileError, MatchError, PcreError, PcreResult, SubstituteError};
pub use ffi::EngineApi;
pub use flags::{CompileFlags, ExecFlags, SubstituteOptions};
pub use global::{engine as global_engine, init, init_from_env, init_with, version};
pub use last_error::LastError;
pub use limits::Limits;
pub use match_result::{Capture, MatchResult};
pub use pattern::{NameTable, Pattern};
