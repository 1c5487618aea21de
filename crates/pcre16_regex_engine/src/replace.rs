// Replacement templates: `$n`, `${n}`, `$name`, `${name}`, `$$`, plus the
// extended escapes (`\U`, `\L`, `\E`, `\u`, `\l`, `\n`, `\t`, `\r`).

use regex::{Captures, Regex};

use crate::codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
}

#[derive(Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Convert(Option<Case>),
    ConvertNext(Case),
}

pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(template: &str, regex: &Regex, extended: bool) -> Result<Self, i32> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '$' => {
                    let group = match chars.peek().copied() {
                        Some('$') => {
                            chars.next();
                            literal.push('$');
                            continue;
                        }
                        Some('{') => {
                            chars.next();
                            let mut name = String::new();
                            loop {
                                match chars.next() {
                                    Some('}') => break,
                                    Some(c) => name.push(c),
                                    None => return Err(codes::REPMISSINGBRACE),
                                }
                            }
                            name
                        }
                        Some(c) if c.is_ascii_digit() => {
                            let mut digits = String::new();
                            while let Some(&d) = chars.peek() {
                                if !d.is_ascii_digit() {
                                    break;
                                }
                                digits.push(d);
                                chars.next();
                            }
                            digits
                        }
                        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                            let mut name = String::new();
                            while let Some(&c) = chars.peek() {
                                if c != '_' && !c.is_ascii_alphanumeric() {
                                    break;
                                }
                                name.push(c);
                                chars.next();
                            }
                            name
                        }
                        _ => return Err(codes::BADREPLACEMENT),
                    };
                    flush(&mut literal, &mut pieces);
                    pieces.push(Piece::Group(resolve(&group, regex)?));
                }
                '\\' if extended => {
                    let piece = match chars.next() {
                        Some('U') => Piece::Convert(Some(Case::Upper)),
                        Some('L') => Piece::Convert(Some(Case::Lower)),
                        Some('E') => Piece::Convert(None),
                        Some('u') => Piece::ConvertNext(Case::Upper),
                        Some('l') => Piece::ConvertNext(Case::Lower),
                        Some('n') => {
                            literal.push('\n');
                            continue;
                        }
                        Some('t') => {
                            literal.push('\t');
                            continue;
                        }
                        Some('r') => {
                            literal.push('\r');
                            continue;
                        }
                        Some(c) if !c.is_alphanumeric() => {
                            literal.push(c);
                            continue;
                        }
                        _ => return Err(codes::BADREPESCAPE),
                    };
                    flush(&mut literal, &mut pieces);
                    pieces.push(piece);
                }
                c => literal.push(c),
            }
        }
        flush(&mut literal, &mut pieces);

        Ok(Template { pieces })
    }

    /// Append the expansion for one match to `out`.
    pub fn expand(&self, caps: &Captures<'_>, unset_empty: bool, out: &mut String) -> Result<(), i32> {
        let mut mode = None;
        let mut next = None;
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => emit(text, mode, &mut next, out),
                Piece::Group(index) => match caps.get(*index) {
                    Some(m) => emit(m.as_str(), mode, &mut next, out),
                    None if unset_empty => {}
                    None => return Err(codes::UNSET),
                },
                Piece::Convert(case) => mode = *case,
                Piece::ConvertNext(case) => next = Some(*case),
            }
        }
        Ok(())
    }
}

fn flush(literal: &mut String, pieces: &mut Vec<Piece>) {
    if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(literal)));
    }
}

fn resolve(group: &str, regex: &Regex) -> Result<usize, i32> {
    if let Ok(index) = group.parse::<usize>() {
        return if index < regex.captures_len() {
            Ok(index)
        } else {
            Err(codes::NOSUBSTRING)
        };
    }
    regex
        .capture_names()
        .position(|name| name == Some(group))
        .ok_or(codes::NOSUBSTRING)
}

fn emit(text: &str, mode: Option<Case>, next: &mut Option<Case>, out: &mut String) {
    for ch in text.chars() {
        match next.take().or(mode) {
            Some(Case::Upper) => out.extend(ch.to_uppercase()),
            Some(Case::Lower) => out.extend(ch.to_lowercase()),
            None => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(pattern: &str, subject: &str, template: &str) -> Result<String, i32> {
        let regex = Regex::new(pattern).unwrap();
        let template = Template::parse(template, &regex, true)?;
        let caps = regex.captures(subject).unwrap();
        let mut out = String::new();
        template.expand(&caps, false, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_numbered_and_named_groups() {
        assert_eq!(apply("(a)(?<b>b)", "ab", "$2$1${b}$$").unwrap(), "bab$");
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(apply("(\\w+)", "bułgaria", "\\U$1\\E!").unwrap(), "BUŁGARIA!");
        assert_eq!(apply("(\\w+)", "WORLD", "\\u\\L$1").unwrap(), "World");
    }

    #[test]
    fn test_template_errors() {
        assert_eq!(apply("(a)", "a", "$5").err(), Some(codes::NOSUBSTRING));
        assert_eq!(apply("(a)", "a", "${1").err(), Some(codes::REPMISSINGBRACE));
        assert_eq!(apply("(a)", "a", "\\q").err(), Some(codes::BADREPESCAPE));
    }

    #[test]
    fn test_unset_group() {
        assert_eq!(apply("(a)|(b)", "a", "$2").err(), Some(codes::UNSET));
    }
}
