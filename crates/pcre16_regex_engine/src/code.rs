// Pattern compilation and the PCRE2-layout name table.

use regex::{Regex, RegexBuilder};
use regex_syntax::ast::ErrorKind;
use regex_syntax::ast::parse::ParserBuilder;

use crate::utf16;

#[derive(Debug, Default, Clone, Copy)]
pub struct Flags {
    pub caseless: bool,
    pub multiline: bool,
    pub dotall: bool,
    pub extended: bool,
    pub ungreedy: bool,
}

impl Flags {
    pub fn parse(flags: &str) -> Result<Self, String> {
        let mut parsed = Flags::default();
        for flag in flags.chars() {
            match flag {
                'i' => parsed.caseless = true,
                'm' => parsed.multiline = true,
                's' => parsed.dotall = true,
                'x' => parsed.extended = true,
                'U' => parsed.ungreedy = true,
                other => return Err(format!("unrecognized flag '{}'", other)),
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug)]
pub struct CompileFailure {
    pub message: String,
    pub offset: usize,
}

/// Named groups laid out the way PCRE2 exposes them: fixed-size entries of a
/// 16-bit group number followed by the NUL-terminated UTF-16 name, sorted by
/// name.
pub struct NameTable {
    pub bytes: Vec<u8>,
    pub count: u32,
    pub entry_size: u32,
}

impl NameTable {
    fn build(regex: &Regex) -> Self {
        let mut entries: Vec<(u16, Vec<u16>)> = regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| name.map(|n| (index as u16, utf16::encode(n))))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1));

        let longest = entries.iter().map(|(_, name)| name.len()).max().unwrap_or(0);
        // group number + name + terminator
        let entry_units = if entries.is_empty() { 0 } else { longest + 2 };
        let entry_size = entry_units * 2;

        let mut bytes = vec![0u8; entry_size * entries.len()];
        for (slot, (index, name)) in entries.iter().enumerate() {
            let entry = &mut bytes[slot * entry_size..(slot + 1) * entry_size];
            entry[..2].copy_from_slice(&index.to_ne_bytes());
            for (k, unit) in name.iter().enumerate() {
                entry[2 + k * 2..4 + k * 2].copy_from_slice(&unit.to_ne_bytes());
            }
        }

        NameTable {
            bytes,
            count: entries.len() as u32,
            entry_size: entry_size as u32,
        }
    }
}

pub struct CompiledCode {
    pub regex: Regex,
    pub capture_count: u32,
    pub names: NameTable,
}

impl CompiledCode {
    pub fn compile(pattern: &[u16], flags: &str) -> Result<Self, CompileFailure> {
        let flags = Flags::parse(flags).map_err(|message| CompileFailure { message, offset: 0 })?;
        let text = utf16::decode(pattern).map_err(|(code, offset)| CompileFailure {
            message: crate::codes::message(code).to_string(),
            offset,
        })?;

        // The AST parser reports spans, which the regex builder does not.
        ParserBuilder::new()
            .ignore_whitespace(flags.extended)
            .build()
            .parse(&text.string)
            .map_err(|err| {
                let offset = match err.kind() {
                    ErrorKind::GroupUnclosed => pattern.len(),
                    _ => text.unit_at_byte(err.span().start.offset),
                };
                CompileFailure {
                    message: describe(err.kind()),
                    offset,
                }
            })?;

        let regex = RegexBuilder::new(&text.string)
            .case_insensitive(flags.caseless)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dotall)
            .ignore_whitespace(flags.extended)
            .swap_greed(flags.ungreedy)
            .build()
            .map_err(|err| CompileFailure {
                message: err.to_string(),
                offset: 0,
            })?;

        let names = NameTable::build(&regex);
        Ok(CompiledCode {
            capture_count: (regex.captures_len() - 1) as u32,
            names,
            regex,
        })
    }
}

fn describe(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::GroupUnclosed => "missing closing parenthesis".to_string(),
        ErrorKind::GroupUnopened => "unmatched closing parenthesis".to_string(),
        ErrorKind::ClassUnclosed => "missing terminating ] for character class".to_string(),
        ErrorKind::RepetitionMissing => "quantifier does not follow a repeatable item".to_string(),
        ErrorKind::EscapeUnexpectedEof => "\\ at end of pattern".to_string(),
        ErrorKind::GroupNameDuplicate { .. } => {
            "two named subpatterns have the same name (PCRE2_DUPNAMES not set)".to_string()
        }
        ErrorKind::GroupNameEmpty => "subpattern name expected".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> Result<CompiledCode, CompileFailure> {
        CompiledCode::compile(&utf16::encode(pattern), "")
    }

    #[test]
    fn test_unclosed_group_message() {
        let err = compile("a(a").err().unwrap();
        assert_eq!(err.message, "missing closing parenthesis");
    }

    #[test]
    fn test_unopened_group_offset() {
        let err = compile("a)aa").err().unwrap();
        assert_eq!(err.offset, 1);
        assert_eq!(err.message, "unmatched closing parenthesis");
    }

    #[test]
    fn test_unknown_flag() {
        let err = CompiledCode::compile(&utf16::encode("a"), "q").err().unwrap();
        assert!(err.message.contains("'q'"));
    }

    #[test]
    fn test_name_table_layout() {
        let code = compile("(?<zeta>a)(b)(?<al>c)").unwrap();
        assert_eq!(code.capture_count, 3);
        assert_eq!(code.names.count, 2);
        // "zeta" is the longest name: 1 + 4 + 1 units
        assert_eq!(code.names.entry_size, 12);

        let first = &code.names.bytes[..12];
        assert_eq!(u16::from_ne_bytes([first[0], first[1]]), 3);
        assert_eq!(u16::from_ne_bytes([first[2], first[3]]), 'a' as u16);
        let second = &code.names.bytes[12..];
        assert_eq!(u16::from_ne_bytes([second[0], second[1]]), 1);
    }
}
