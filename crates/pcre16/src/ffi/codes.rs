//! Engine result codes and option bits (PCRE2 numbering).

pub const NOMATCH: i32 = -1;
pub const PARTIAL: i32 = -2;
pub const UTF16_ERR1: i32 = -24;
pub const UTF16_ERR2: i32 = -25;
pub const UTF16_ERR3: i32 = -26;
pub const NOMEMORY: i32 = -48;

pub const SUBSTITUTE_GLOBAL: u32 = 0x0000_0100;
pub const SUBSTITUTE_EXTENDED: u32 = 0x0000_0200;
pub const SUBSTITUTE_UNSET_EMPTY: u32 = 0x0000_0400;

/// Ovector entry of a group that did not participate in the match.
pub const UNSET_OFFSET: u32 = u32::MAX;

/// Message the engine reports when its error channel holds nothing.
pub const NO_ERROR_MESSAGE: &str = "no error";

pub fn is_utf16_error(code: i32) -> bool {
    (UTF16_ERR3..=UTF16_ERR1).contains(&code)
}

/// Symbolic name of a negative result code.
pub fn name(code: i32) -> Option<&'static str> {
    let name = match code {
        NOMATCH => "PCRE2_ERROR_NOMATCH",
        PARTIAL => "PCRE2_ERROR_PARTIAL",
        -23..=-3 => "PCRE2_ERROR_UTF8",
        UTF16_ERR1 => "PCRE2_ERROR_UTF16_ERR1",
        UTF16_ERR2 => "PCRE2_ERROR_UTF16_ERR2",
        UTF16_ERR3 => "PCRE2_ERROR_UTF16_ERR3",
        -27 => "PCRE2_ERROR_UTF32_ERR1",
        -28 => "PCRE2_ERROR_UTF32_ERR2",
        -29 => "PCRE2_ERROR_BADDATA",
        -30 => "PCRE2_ERROR_MIXEDTABLES",
        -31 => "PCRE2_ERROR_BADMAGIC",
        -32 => "PCRE2_ERROR_BADMODE",
        -33 => "PCRE2_ERROR_BADOFFSET",
        -34 => "PCRE2_ERROR_BADOPTION",
        -35 => "PCRE2_ERROR_BADREPLACEMENT",
        -36 => "PCRE2_ERROR_BADUTFOFFSET",
        -37 => "PCRE2_ERROR_CALLOUT",
        -44 => "PCRE2_ERROR_INTERNAL",
        -45 => "PCRE2_ERROR_JIT_BADOPTION",
        -46 => "PCRE2_ERROR_JIT_STACKLIMIT",
        -47 => "PCRE2_ERROR_MATCHLIMIT",
        NOMEMORY => "PCRE2_ERROR_NOMEMORY",
        -49 => "PCRE2_ERROR_NOSUBSTRING",
        -50 => "PCRE2_ERROR_NOUNIQUESUBSTRING",
        -51 => "PCRE2_ERROR_NULL",
        -52 => "PCRE2_ERROR_RECURSELOOP",
        -53 => "PCRE2_ERROR_DEPTHLIMIT",
        -54 => "PCRE2_ERROR_UNAVAILABLE",
        -55 => "PCRE2_ERROR_UNSET",
        -56 => "PCRE2_ERROR_BADOFFSETLIMIT",
        -57 => "PCRE2_ERROR_BADREPESCAPE",
        -58 => "PCRE2_ERROR_REPMISSINGBRACE",
        -59 => "PCRE2_ERROR_BADSUBSTITUTION",
        -60 => "PCRE2_ERROR_BADSUBSPATTERN",
        -61 => "PCRE2_ERROR_TOOMANYREPLACE",
        -63 => "PCRE2_ERROR_HEAPLIMIT",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_range() {
        assert!(is_utf16_error(-24));
        assert!(is_utf16_error(-26));
        assert!(!is_utf16_error(-27));
        assert!(!is_utf16_error(NOMATCH));
    }

    #[test]
    fn test_names() {
        assert_eq!(name(NOMEMORY), Some("PCRE2_ERROR_NOMEMORY"));
        assert_eq!(name(-10), Some("PCRE2_ERROR_UTF8"));
        assert_eq!(name(0), None);
    }
}
