// Result codes and their messages, numbered the way PCRE2 numbers them so a
// host written against the native module sees identical values.

pub const NOMATCH: i32 = -1;
pub const UTF16_ERR1: i32 = -24;
pub const UTF16_ERR2: i32 = -25;
pub const UTF16_ERR3: i32 = -26;
pub const BADOFFSET: i32 = -33;
pub const BADREPLACEMENT: i32 = -35;
pub const BADUTFOFFSET: i32 = -36;
pub const INTERNAL: i32 = -44;
pub const NOMEMORY: i32 = -48;
pub const NOSUBSTRING: i32 = -49;
pub const NULL: i32 = -51;
pub const UNSET: i32 = -55;
pub const BADREPESCAPE: i32 = -57;
pub const REPMISSINGBRACE: i32 = -58;

/// Substitute option bits.
pub const SUBSTITUTE_GLOBAL: u32 = 0x0000_0100;
pub const SUBSTITUTE_EXTENDED: u32 = 0x0000_0200;
pub const SUBSTITUTE_UNSET_EMPTY: u32 = 0x0000_0400;

/// Ovector value for a group that did not participate in the match.
pub const UNSET_OFFSET: u32 = u32::MAX;

pub fn message(code: i32) -> &'static str {
    match code {
        0 => "no error",
        NOMATCH => "no match",
        UTF16_ERR1 => "UTF-16 error: missing low surrogate at end",
        UTF16_ERR2 => "UTF-16 error: invalid low surrogate",
        UTF16_ERR3 => "UTF-16 error: isolated low surrogate",
        BADOFFSET => "bad offset value",
        BADREPLACEMENT => "bad replacement string",
        BADUTFOFFSET => "offset in UTF-16 string not at start of character",
        INTERNAL => "internal error - pattern overwritten?",
        NOMEMORY => "no more memory",
        NOSUBSTRING => "unknown substring",
        NULL => "NULL argument passed with non-zero length",
        UNSET => "requested value is not set",
        BADREPESCAPE => "bad escape sequence in replacement string",
        REPMISSINGBRACE => "expected closing curly bracket in replacement string",
        _ => "unknown error code",
    }
}
