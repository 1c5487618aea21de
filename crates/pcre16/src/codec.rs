//! String codec between host text and the engine's UTF-16 code units.
//!
//! Host text is Rust UTF-8; anything crossing the boundary is UTF-16. Raw
//! code-unit input is accepted as-is so callers can hand the engine exactly
//! what they hold, including malformed sequences the engine will reject.

use std::borrow::Cow;

use crate::error::{PcreError, PcreResult};

/// Text that can be presented to the engine as UTF-16 code units.
pub trait Utf16Source {
    fn to_code_units(&self) -> Cow<'_, [u16]>;
}

impl Utf16Source for str {
    fn to_code_units(&self) -> Cow<'_, [u16]> {
        Cow::Owned(self.encode_utf16().collect())
    }
}

impl Utf16Source for String {
    fn to_code_units(&self) -> Cow<'_, [u16]> {
        self.as_str().to_code_units()
    }
}

impl Utf16Source for [u16] {
    fn to_code_units(&self) -> Cow<'_, [u16]> {
        Cow::Borrowed(self)
    }
}

impl Utf16Source for Vec<u16> {
    fn to_code_units(&self) -> Cow<'_, [u16]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<const N: usize> Utf16Source for [u16; N] {
    fn to_code_units(&self) -> Cow<'_, [u16]> {
        Cow::Borrowed(self.as_slice())
    }
}

/// Decode engine output strictly.
pub fn decode(units: &[u16]) -> PcreResult<String> {
    String::from_utf16(units).map_err(|e| PcreError::Encoding(e.to_string()))
}

/// Cut `units` at the first NUL, if any.
pub fn trim_nul(units: &[u16]) -> &[u16] {
    match units.iter().position(|&u| u == 0) {
        Some(end) => &units[..end],
        None => units,
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Offset of the character boundary after `at`.
pub(crate) fn next_boundary(units: &[u16], at: usize) -> usize {
    match (units.get(at), units.get(at + 1)) {
        (Some(&hi), Some(&lo)) if is_high_surrogate(hi) && is_low_surrogate(lo) => at + 2,
        _ => at + 1,
    }
}
