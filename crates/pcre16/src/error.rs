//! Error taxonomy for the marshaling layer.
//!
//! "No match" is not an error: match operations return `Ok(None)`. Every
//! other failure carries enough detail (engine code, message, offset) to
//! locate the problem in the pattern or subject.

use std::fmt;

use crate::ffi::codes;

/// The engine rejected a pattern at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    /// Offset in UTF-16 code units into the pattern.
    pub offset: usize,
}

/// A genuine engine failure while matching, distinct from no-match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchError {
    pub code: i32,
    pub message: String,
}

/// A negative engine code from a substitution, other than running out of
/// output space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstituteError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcreError {
    Compile(CompileError),
    Match(MatchError),
    Substitute(SubstituteError),
    /// The substitution output would exceed the configured ceiling.
    NoMemory { capacity: usize, limit: usize },
    /// `match_all` ran past its iteration ceiling.
    IterationLimit { limit: usize },
    InvalidFlag { flag: char, flags: String },
    /// The engine handed back offsets outside the subject.
    InvalidOvector { index: usize, start: u32, end: u32 },
    /// Host-side decoding of engine output failed.
    Encoding(String),
    /// The engine heap refused an allocation.
    Allocation { bytes: usize },
    /// The native module or one of its symbols could not be loaded.
    Load(String),
    NotInitialized,
    Destroyed,
}

impl PcreError {
    /// Raw engine result code, when the failure came from one.
    pub fn code(&self) -> Option<i32> {
        match self {
            PcreError::Match(err) => Some(err.code),
            PcreError::Substitute(err) => Some(err.code),
            PcreError::NoMemory { .. } => Some(codes::NOMEMORY),
            _ => None,
        }
    }

    /// Whether the engine rejected the subject or replacement as malformed
    /// UTF-16.
    pub fn is_utf_error(&self) -> bool {
        self.code().is_some_and(codes::is_utf16_error)
    }

    /// Whether this is the terminal out-of-memory result of a substitution.
    pub fn is_no_memory(&self) -> bool {
        matches!(self, PcreError::NoMemory { .. })
    }

    pub(crate) fn engine_message(code: i32, message: &str) -> String {
        match codes::name(code) {
            Some(name) if message.is_empty() => name.to_string(),
            Some(name) => format!("{}: {}", name, message),
            None if message.is_empty() => format!("engine error {}", code),
            None => format!("engine error {}: {}", code, message),
        }
    }
}

impl fmt::Display for PcreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcreError::Compile(err) => write!(f, "{} at offset {}", err.message, err.offset),
            PcreError::Match(err) => write!(f, "match failed: {}", err.message),
            PcreError::Substitute(err) => write!(f, "substitution failed: {}", err.message),
            PcreError::NoMemory { capacity, limit } => write!(
                f,
                "{}: substitution output needs more than {} code units (limit {})",
                codes::name(codes::NOMEMORY).unwrap_or("no memory"),
                capacity,
                limit
            ),
            PcreError::IterationLimit { limit } => {
                write!(f, "match_all exceeded {} iterations", limit)
            }
            PcreError::InvalidFlag { flag, flags } => {
                write!(f, "unknown flag '{}' in \"{}\"", flag, flags)
            }
            PcreError::InvalidOvector { index, start, end } => write!(
                f,
                "engine returned invalid offsets {}..{} for group {}",
                start, end, index
            ),
            PcreError::Encoding(msg) => write!(f, "invalid UTF-16 from engine: {}", msg),
            PcreError::Allocation { bytes } => {
                write!(f, "engine heap could not allocate {} bytes", bytes)
            }
            PcreError::Load(msg) => write!(f, "failed to load engine: {}", msg),
            PcreError::NotInitialized => write!(f, "engine not initialized, call init() first"),
            PcreError::Destroyed => write!(f, "pattern has been destroyed"),
        }
    }
}

impl std::error::Error for PcreError {}

impl From<CompileError> for PcreError {
    fn from(err: CompileError) -> Self {
        PcreError::Compile(err)
    }
}

impl From<MatchError> for PcreError {
    fn from(err: MatchError) -> Self {
        PcreError::Match(err)
    }
}

impl From<SubstituteError> for PcreError {
    fn from(err: SubstituteError) -> Self {
        PcreError::Substitute(err)
    }
}

pub type PcreResult<T> = Result<T, PcreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_message_names_known_codes() {
        let msg = PcreError::engine_message(-24, "UTF-16 error: missing low surrogate at end");
        assert!(msg.starts_with("PCRE2_ERROR_UTF16_ERR1: "));
        assert_eq!(PcreError::engine_message(-999, ""), "engine error -999");
    }

    #[test]
    fn test_no_memory_code() {
        let err = PcreError::NoMemory {
            capacity: 10,
            limit: 8,
        };
        assert_eq!(err.code(), Some(-48));
        assert!(err.is_no_memory());
        assert!(!err.is_utf_error());
        assert!(err.to_string().contains("PCRE2_ERROR_NOMEMORY"));
    }

    #[test]
    fn test_utf_error_detection() {
        let err = PcreError::Match(MatchError {
            code: -26,
            message: String::new(),
        });
        assert!(err.is_utf_error());
    }
}
