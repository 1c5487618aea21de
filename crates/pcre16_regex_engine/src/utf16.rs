// UTF-16 validation and the unit <-> byte offset maps needed to run a
// UTF-8 regex over UTF-16 subjects while reporting UTF-16 offsets.

use crate::codes;

const INSIDE: usize = usize::MAX;

/// A validated UTF-16 buffer re-encoded as UTF-8.
pub struct Text {
    pub string: String,
    unit_to_byte: Vec<usize>,
    byte_to_unit: Vec<usize>,
}

impl Text {
    /// Byte offset of code unit `unit`, or `None` when it falls inside a
    /// surrogate pair or past the end.
    pub fn byte_at_unit(&self, unit: usize) -> Option<usize> {
        match self.unit_to_byte.get(unit) {
            Some(&INSIDE) | None => None,
            Some(&byte) => Some(byte),
        }
    }

    /// Code unit offset of a byte offset that lies on a char boundary.
    pub fn unit_at_byte(&self, byte: usize) -> usize {
        self.byte_to_unit[byte]
    }
}

/// Decode `units`, failing with a PCRE2 UTF-16 error code and the offset of
/// the offending unit.
pub fn decode(units: &[u16]) -> Result<Text, (i32, usize)> {
    let mut string = String::with_capacity(units.len());
    let mut unit_to_byte = vec![INSIDE; units.len() + 1];
    let mut byte_to_unit = Vec::with_capacity(units.len() + 1);

    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        let (scalar, width) = match unit {
            0xD800..=0xDBFF => match units.get(i + 1) {
                None => return Err((codes::UTF16_ERR1, i)),
                Some(&low @ 0xDC00..=0xDFFF) => {
                    let high = (unit as u32 - 0xD800) << 10;
                    (0x10000 + high + (low as u32 - 0xDC00), 2)
                }
                Some(_) => return Err((codes::UTF16_ERR2, i + 1)),
            },
            0xDC00..=0xDFFF => return Err((codes::UTF16_ERR3, i)),
            _ => (unit as u32, 1),
        };
        let ch = char::from_u32(scalar).ok_or((codes::INTERNAL, i))?;

        unit_to_byte[i] = string.len();
        byte_to_unit.push(i);
        for _ in 1..ch.len_utf8() {
            byte_to_unit.push(INSIDE);
        }
        string.push(ch);
        i += width;
    }
    unit_to_byte[units.len()] = string.len();
    byte_to_unit.push(units.len());

    Ok(Text {
        string,
        unit_to_byte,
        byte_to_unit,
    })
}

pub fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Borrow a caller-provided buffer, tolerating a null pointer for empty input.
///
/// # Safety
/// When `len > 0`, `ptr` must point to `len` readable code units.
pub unsafe fn units_from_raw<'a>(ptr: *const u16, len: usize) -> &'a [u16] {
    if len == 0 || ptr.is_null() {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_maps_surrogate_pairs() {
        let units = encode("a\u{1F600}b");
        let text = decode(&units).unwrap();
        assert_eq!(text.string, "a\u{1F600}b");
        assert_eq!(text.byte_at_unit(1), Some(1));
        assert_eq!(text.byte_at_unit(2), None);
        assert_eq!(text.byte_at_unit(3), Some(5));
        assert_eq!(text.unit_at_byte(5), 3);
        assert_eq!(text.unit_at_byte(6), 4);
    }

    #[test]
    fn test_decode_reports_utf16_errors() {
        assert_eq!(decode(&[0x61, 0xD800]).err(), Some((codes::UTF16_ERR1, 1)));
        assert_eq!(decode(&[0xD800, 0x61]).err(), Some((codes::UTF16_ERR2, 1)));
        assert_eq!(decode(&[0xDC00]).err(), Some((codes::UTF16_ERR3, 0)));
    }
}
