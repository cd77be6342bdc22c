//! Backslash escapes for control and non-ASCII code points.
//!
//! Escaping produces `\xNN` up to U+00FF, `\uNNNN` inside the BMP and
//! `\UNNNNNNNN` above it. Unescaping accepts those plus the single-letter
//! escapes and 1-3 digit octal escapes. Named escapes (`\N{BULLET}`) are
//! not resolved and are kept as written, like any other unknown letter.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::CodecError;

/// Returns the character a single-letter escape stands for (`n` -> newline).
#[must_use]
pub fn decode_basic_escape(marker: char) -> Option<char> {
    match marker {
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0b}'),
        _ => None,
    }
}

/// Returns the escape letter used when escaping `ch`, if it has one.
#[must_use]
pub fn encode_basic_escape(ch: char) -> Option<char> {
    match ch {
        '\\' => Some('\\'),
        '\t' => Some('t'),
        '\n' => Some('n'),
        '\r' => Some('r'),
        _ => None,
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(marker) = encode_basic_escape(ch) {
            out.push('\\');
            out.push(marker);
            continue;
        }
        let code = u32::from(ch);
        if (0x20..=0x7e).contains(&code) {
            out.push(ch);
            continue;
        }
        let token = match code {
            0x00..=0xff => format!("\\x{code:02x}"),
            0x100..=0xffff => format!("\\u{code:04x}"),
            _ => format!("\\U{code:08x}"),
        };
        out.push_str(&token);
    }
    out
}

pub fn unescape(text: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, marker)) = chars.next() else {
            return Err(malformed(offset, "trailing backslash"));
        };
        match marker {
            'x' => out.push(read_hex(&mut chars, offset, 2)?),
            'u' => out.push(read_hex(&mut chars, offset, 4)?),
            'U' => out.push(read_hex(&mut chars, offset, 8)?),
            '0'..='7' => out.push(read_octal(&mut chars, marker)),
            // Line continuation.
            '\n' => {}
            _ => match decode_basic_escape(marker) {
                Some(decoded) => out.push(decoded),
                None => {
                    out.push('\\');
                    out.push(marker);
                }
            },
        }
    }

    Ok(out)
}

fn read_hex(
    chars: &mut Peekable<CharIndices<'_>>,
    offset: usize,
    digits: usize,
) -> Result<char, CodecError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next_if(|(_, c)| c.is_ascii_hexdigit())
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or_else(|| malformed(offset, "truncated hex escape"))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| malformed(offset, "escape is not a Unicode scalar value"))
}

fn read_octal(chars: &mut Peekable<CharIndices<'_>>, first: char) -> char {
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.next_if(|(_, c)| ('0'..='7').contains(c)) {
            Some((_, c)) => value = value * 8 + c.to_digit(8).unwrap_or(0),
            None => break,
        }
    }
    // At most 0o777, always a valid scalar value.
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn malformed(offset: usize, reason: &'static str) -> CodecError {
    CodecError::MalformedEscape { offset, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("plain ascii", "plain ascii")]
    #[case("tab\there", "tab\\there")]
    #[case("line\r\n", "line\\r\\n")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("\u{01}\u{7f}", "\\x01\\x7f")]
    #[case("é", "\\xe9")]
    #[case("中文", "\\u4e2d\\u6587")]
    #[case("😀", "\\U0001f600")]
    fn escape_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[rstest]
    #[case("\\u4e2d\\u6587", "中文")]
    #[case("\\U0001F600", "😀")]
    #[case("\\x3cscript\\x3e", "<script>")]
    #[case("\\101\\102", "AB")]
    #[case("\\0", "\0")]
    #[case("quote\\'s \\\"x\\\"", "quote's \"x\"")]
    #[case("\\a\\b\\f\\v", "\u{07}\u{08}\u{0c}\u{0b}")]
    #[case("keep \\q as is", "keep \\q as is")]
    #[case("\\N{BULLET} item", "\\N{BULLET} item")]
    #[case("joined \\\nline", "joined line")]
    fn unescape_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape(input).unwrap(), expected);
    }

    #[test]
    fn unescape_keeps_non_ascii_text() {
        assert_eq!(unescape("café \\u00e9").unwrap(), "café é");
    }

    #[rstest]
    #[case("abc\\", 3)]
    #[case("\\x4", 0)]
    #[case("ok \\u12g4", 3)]
    #[case("\\U00110000", 0)]
    #[case("\\ud800", 0)]
    fn unescape_reports_malformed_escapes(#[case] input: &str, #[case] at: usize) {
        match unescape(input) {
            Err(CodecError::MalformedEscape { offset, .. }) => assert_eq!(offset, at),
            other => panic!("expected MalformedEscape, got {other:?}"),
        }
    }

    #[test]
    fn basic_escape_tables_agree() {
        for ch in ['\\', '\t', '\n', '\r'] {
            let marker = encode_basic_escape(ch).unwrap();
            assert_eq!(decode_basic_escape(marker), Some(ch));
        }
        assert_eq!(encode_basic_escape('é'), None);
        assert_eq!(decode_basic_escape('é'), None);
    }
}
