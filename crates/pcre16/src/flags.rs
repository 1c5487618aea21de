//! Flag strings parsed once into structured options at the API boundary.

use std::fmt;
use std::str::FromStr;

use crate::error::{PcreError, PcreResult};
use crate::ffi::codes;

fn invalid(flag: char, flags: &str) -> PcreError {
    PcreError::InvalidFlag {
        flag,
        flags: flags.to_string(),
    }
}

/// Pattern flags: `i` caseless, `m` multiline, `s` dotall, `x` extended,
/// `U` ungreedy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompileFlags {
    pub caseless: bool,
    pub multiline: bool,
    pub dotall: bool,
    pub extended: bool,
    pub ungreedy: bool,
}

impl CompileFlags {
    /// The canonical flag string the engine's compile entry point receives.
    pub fn as_flag_string(&self) -> String {
        let mut s = String::with_capacity(5);
        for (set, letter) in [
            (self.caseless, 'i'),
            (self.multiline, 'm'),
            (self.dotall, 's'),
            (self.extended, 'x'),
            (self.ungreedy, 'U'),
        ] {
            if set {
                s.push(letter);
            }
        }
        s
    }
}

impl FromStr for CompileFlags {
    type Err = PcreError;

    fn from_str(flags: &str) -> PcreResult<Self> {
        let mut parsed = CompileFlags::default();
        for flag in flags.chars() {
            match flag {
                'i' => parsed.caseless = true,
                'm' => parsed.multiline = true,
                's' => parsed.dotall = true,
                'x' => parsed.extended = true,
                'U' => parsed.ungreedy = true,
                other => return Err(invalid(other, flags)),
            }
        }
        Ok(parsed)
    }
}

impl fmt::Display for CompileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_flag_string())
    }
}

/// Options for a substitution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstituteOptions {
    /// Replace every non-overlapping match instead of the first.
    pub global: bool,
    /// Enable `\U`, `\L`, `\E`, `\u`, `\l` and character escapes in the
    /// replacement.
    pub extended: bool,
    /// Expand references to unset groups as empty instead of failing.
    pub unset_empty: bool,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            global: false,
            extended: true,
            unset_empty: false,
        }
    }
}

impl SubstituteOptions {
    pub fn global() -> Self {
        Self {
            global: true,
            ..Self::default()
        }
    }

    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.global {
            bits |= codes::SUBSTITUTE_GLOBAL;
        }
        if self.extended {
            bits |= codes::SUBSTITUTE_EXTENDED;
        }
        if self.unset_empty {
            bits |= codes::SUBSTITUTE_UNSET_EMPTY;
        }
        bits
    }
}

/// Flags for `exec`: `g` returns every match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecFlags {
    pub global: bool,
}

impl FromStr for ExecFlags {
    type Err = PcreError;

    fn from_str(flags: &str) -> PcreResult<Self> {
        let mut parsed = ExecFlags::default();
        for flag in flags.chars() {
            match flag {
                'g' => parsed.global = true,
                other => return Err(invalid(other, flags)),
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_flags_canonical_order() {
        let flags: CompileFlags = "xsi".parse().unwrap();
        assert!(flags.caseless && flags.dotall && flags.extended);
        assert!(!flags.multiline);
        assert_eq!(flags.as_flag_string(), "isx");
    }

    #[test]
    fn test_compile_flags_reject_unknown() {
        let err = "iq".parse::<CompileFlags>().unwrap_err();
        assert_eq!(
            err,
            PcreError::InvalidFlag {
                flag: 'q',
                flags: "iq".to_string()
            }
        );
    }

    #[test]
    fn test_substitute_option_bits() {
        assert_eq!(SubstituteOptions::default().bits(), codes::SUBSTITUTE_EXTENDED);
        assert_eq!(
            SubstituteOptions::global().bits(),
            codes::SUBSTITUTE_GLOBAL | codes::SUBSTITUTE_EXTENDED
        );
    }

    #[test]
    fn test_exec_flags() {
        assert!("g".parse::<ExecFlags>().unwrap().global);
        assert!(!"".parse::<ExecFlags>().unwrap().global);
        assert!("gi".parse::<ExecFlags>().is_err());
    }
}
