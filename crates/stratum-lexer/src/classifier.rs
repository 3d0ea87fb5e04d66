//! Branch-free character predicates and zero-allocation consumers. Every
//! consumer operates on a byte slice and returns an end-position plus
//! structured metadata; none of them allocate.

use crate::escape::{self, EscapeResult};

/// ASCII digit `0-9`.
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
pub fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
pub fn is_string_delimiter(b: u8, allow_single_quotes: bool) -> bool {
    b == b'"' || (allow_single_quotes && b == b'\'')
}

/// Advance past consecutive whitespace bytes, returning the new offset.
/// Caller is responsible for updating line/column bookkeeping from the
/// consumed slice.
pub fn skip_whitespace(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() && is_whitespace(bytes[i]) {
        i += 1;
    }
    i
}

/// Metadata produced by [`consume_identifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentifierInfo {
    pub end: usize,
}

/// Consume `[A-Za-z_][A-Za-z0-9_]*` starting at `pos`. `pos` must already
/// point at a byte for which [`is_identifier_start`] holds; returns `None`
/// otherwise.
pub fn consume_identifier(bytes: &[u8], pos: usize) -> Option<IdentifierInfo> {
    if pos >= bytes.len() || !is_identifier_start(bytes[pos]) {
        return None;
    }
    let mut i = pos + 1;
    while i < bytes.len() && is_identifier_char(bytes[i]) {
        i += 1;
    }
    Some(IdentifierInfo { end: i })
}

/// Metadata produced by [`consume_string`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringInfo {
    pub end: usize,
    /// Whether a closing quote was found before EOF/newline.
    pub terminated: bool,
    /// Whether any `\` escape sequence occurred in the body.
    pub has_escapes: bool,
}

/// Consume a quoted string literal starting at `pos` (which must point at
/// `quote`). When `allow_escapes` is set, a backslash escapes the
/// following byte rather than terminating consumption (the lexer's state
/// machine owns interpreting the escape itself — this only tracks where
/// the literal ends and whether it saw one).
///
/// Single-line strings stop at an un-escaped `quote`, an un-escaped
/// newline (unterminated), or EOF (unterminated).
pub fn consume_string(bytes: &[u8], pos: usize, quote: u8, allow_escapes: bool) -> StringInfo {
    debug_assert_eq!(bytes.get(pos), Some(&quote));
    let mut i = pos + 1;
    let mut has_escapes = false;
    while i < bytes.len() {
        let b = bytes[i];
        if b == quote {
            return StringInfo { end: i + 1, terminated: true, has_escapes };
        }
        if b == b'\n' {
            return StringInfo { end: i, terminated: false, has_escapes };
        }
        if allow_escapes && b == b'\\' && i + 1 < bytes.len() {
            has_escapes = true;
            i += 2;
            continue;
        }
        i += 1;
    }
    StringInfo { end: i, terminated: false, has_escapes }
}

/// Metadata produced by [`consume_number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberInfo {
    pub end: usize,
    pub is_float: bool,
    pub is_hex: bool,
    pub is_binary: bool,
    pub is_octal: bool,
    /// At least one digit was consumed; `false` means the caller should
    /// emit an error token.
    pub valid: bool,
}

/// Consume a numeric literal starting at `pos`: optional sign, optional
/// base prefix, digits (optionally `_`-separated when `allow_separators`),
/// optional fractional part, optional exponent. Leading-zero rejection for
/// JSON is a parse-time concern and is not enforced here.
pub fn consume_number(bytes: &[u8], pos: usize, allow_separators: bool) -> NumberInfo {
    let mut i = pos;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mut is_hex = false;
    let mut is_binary = false;
    let mut is_octal = false;

    if i + 1 < bytes.len() && bytes[i] == b'0' {
        match bytes[i + 1] {
            b'x' | b'X' => {
                is_hex = true;
                i += 2;
            }
            b'b' | b'B' => {
                is_binary = true;
                i += 2;
            }
            b'o' | b'O' => {
                is_octal = true;
                i += 2;
            }
            _ => {}
        }
    }

    let digit_ok: fn(u8) -> bool = if is_hex {
        is_hex_digit
    } else if is_binary {
        |b| b == b'0' || b == b'1'
    } else if is_octal {
        |b| (b'0'..=b'7').contains(&b)
    } else {
        is_digit
    };

    let digits_start = i;
    i = consume_digit_run(bytes, i, digit_ok, allow_separators);
    let mut saw_digit = i > digits_start;

    let mut is_float = false;
    if !is_hex && !is_binary && !is_octal {
        if i < bytes.len() && bytes[i] == b'.' && i + 1 < bytes.len() && is_digit(bytes[i + 1]) {
            is_float = true;
            i += 1;
            i = consume_digit_run(bytes, i, is_digit, allow_separators);
        }
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            if j < bytes.len() && is_digit(bytes[j]) {
                is_float = true;
                i = consume_digit_run(bytes, j, is_digit, allow_separators);
            }
        }
    }

    if !saw_digit {
        saw_digit = false;
    }

    NumberInfo {
        end: i,
        is_float,
        is_hex,
        is_binary,
        is_octal,
        valid: saw_digit,
    }
}

fn consume_digit_run(bytes: &[u8], pos: usize, ok: fn(u8) -> bool, allow_separators: bool) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        if ok(bytes[i]) {
            i += 1;
        } else if allow_separators && bytes[i] == b'_' && i + 1 < bytes.len() && ok(bytes[i + 1]) {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Metadata produced by [`consume_single_line_comment`] /
/// [`consume_multi_line_comment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentInfo {
    pub end: usize,
    pub terminated: bool,
    /// Number of `\n` bytes consumed (multi-line comments only).
    pub newlines: u32,
}

/// Consume from `pos` (just past `prefix`) to the end of line or EOF.
pub fn consume_single_line_comment(bytes: &[u8], pos: usize) -> CommentInfo {
    let mut i = pos;
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    CommentInfo { end: i, terminated: true, newlines: 0 }
}

/// Consume from `pos` (just past the opening `start` delimiter) until
/// `end` is found or EOF. Tracks newlines for line bookkeeping.
pub fn consume_multi_line_comment(bytes: &[u8], pos: usize, end: &[u8]) -> CommentInfo {
    let mut i = pos;
    let mut newlines = 0u32;
    while i < bytes.len() {
        if bytes[i..].starts_with(end) {
            return CommentInfo { end: i + end.len(), terminated: true, newlines };
        }
        if bytes[i] == b'\n' {
            newlines += 1;
        }
        i += 1;
    }
    CommentInfo { end: i, terminated: false, newlines }
}

/// Stable diagnostic kinds produced by [`scan_string_body`]. Each maps to
/// one of the stable `rule_id`s a string literal's content can violate:
/// malformed UTF-8 in the source bytes, a disallowed code point once
/// decoded, or a syntactically broken escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringIssueKind {
    InvalidUtf8Sequence,
    IncompleteUtf8Sequence,
    OverlongUtf8Sequence,
    SurrogateInString,
    NoncharacterInString,
    ControlCharacterInString,
    CarriageReturnInString,
    BomAtStringStart,
    InvalidEscape,
}

/// One issue found in a string literal's content, as a byte range relative
/// to the same buffer passed to [`scan_string_body`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringIssue {
    pub kind: StringIssueKind,
    pub start: usize,
    pub end: usize,
}

/// Outcome of decoding one UTF-8 scalar value. Kept distinct from
/// `std::str::from_utf8`'s error type because overlong encodings,
/// surrogate halves, and truncated sequences each carry a different
/// stable rule_id and that error type collapses all three into one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Utf8Decode {
    Ok { ch: char, len: usize },
    Surrogate { len: usize },
    Overlong { len: usize },
    Invalid { len: usize },
    Incomplete { len: usize },
}

fn decode_utf8_char(bytes: &[u8], pos: usize) -> Utf8Decode {
    let b0 = bytes[pos];
    if b0 < 0x80 {
        return Utf8Decode::Ok { ch: b0 as char, len: 1 };
    }
    let (len, min, mut cp) = if b0 & 0xE0 == 0xC0 {
        (2, 0x80u32, (b0 & 0x1F) as u32)
    } else if b0 & 0xF0 == 0xE0 {
        (3, 0x800u32, (b0 & 0x0F) as u32)
    } else if b0 & 0xF8 == 0xF0 {
        (4, 0x10000u32, (b0 & 0x07) as u32)
    } else {
        return Utf8Decode::Invalid { len: 1 };
    };
    if pos + len > bytes.len() {
        return Utf8Decode::Incomplete { len: bytes.len() - pos };
    }
    for &cont in &bytes[pos + 1..pos + len] {
        if cont & 0xC0 != 0x80 {
            return Utf8Decode::Invalid { len: 1 };
        }
        cp = (cp << 6) | (cont & 0x3F) as u32;
    }
    if cp < min {
        return Utf8Decode::Overlong { len };
    }
    if (0xD800..=0xDFFF).contains(&cp) {
        return Utf8Decode::Surrogate { len };
    }
    if cp > 0x10FFFF {
        return Utf8Decode::Invalid { len };
    }
    match char::from_u32(cp) {
        Some(ch) => Utf8Decode::Ok { ch, len },
        None => Utf8Decode::Invalid { len },
    }
}

/// U+FDD0..=U+FDEF and the last two code points of each plane (RFC 9839's
/// "noncharacters").
fn is_noncharacter(cp: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}

/// C0/C1 controls other than `\t`/`\n`/`\r`, which get their own handling.
fn is_disallowed_control(ch: char) -> bool {
    matches!(ch as u32, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F..=0x9F)
}

/// Classify one escape sequence starting at `pos` (just after the `\`).
/// Returns the number of bytes consumed after the backslash and, if the
/// escape is malformed or decodes to a disallowed surrogate, the issue to
/// report. `rust_style_escapes` selects `\u{...}`/`\xNN` (Zig-like
/// dialects) over JSON's `\uXXXX`-only form.
fn classify_escape(
    bytes: &[u8],
    pos: usize,
    content_end: usize,
    rust_style_escapes: bool,
) -> (usize, Option<StringIssueKind>) {
    let body = &bytes[pos..content_end];
    if body.is_empty() {
        return (0, Some(StringIssueKind::InvalidEscape));
    }
    if let Some(result) = escape::parse_simple_escape(body) {
        return match result {
            EscapeResult::Scalar { len, .. } => (len, None),
            EscapeResult::Invalid { len } => (len, Some(StringIssueKind::InvalidEscape)),
        };
    }
    match body[0] {
        b'u' if rust_style_escapes => match escape::parse_rust_unicode_escape(&body[1..]) {
            EscapeResult::Scalar { len, .. } => (1 + len, None),
            EscapeResult::Invalid { len } => (1 + len, Some(StringIssueKind::InvalidEscape)),
        },
        b'u' => match escape::parse_json_unicode_escape(&body[1..]) {
            EscapeResult::Scalar { len, .. } => (1 + len, None),
            EscapeResult::Invalid { len } => {
                let kind = peek_hex4(&body[1..])
                    .filter(|cp| (0xD800..=0xDFFF).contains(cp))
                    .map_or(StringIssueKind::InvalidEscape, |_| StringIssueKind::SurrogateInString);
                (1 + len, Some(kind))
            }
        },
        b'x' if rust_style_escapes => match escape::parse_hex_byte_escape(&body[1..]) {
            EscapeResult::Scalar { len, .. } => (1 + len, None),
            EscapeResult::Invalid { len } => (1 + len, Some(StringIssueKind::InvalidEscape)),
        },
        _ => (1, Some(StringIssueKind::InvalidEscape)),
    }
}

fn peek_hex4(body: &[u8]) -> Option<u32> {
    if body.len() < 4 {
        return None;
    }
    std::str::from_utf8(&body[..4]).ok().and_then(|s| u32::from_str_radix(s, 16).ok())
}

/// Scan a string literal's content (`content_start..content_end`,
/// excluding the surrounding quotes) for malformed escapes and RFC
/// 9839-flavored Unicode policy violations, in one pass. Severity is the
/// caller's concern (it depends on the active `UnicodePolicy`); this only
/// locates and classifies.
pub fn scan_string_body(
    bytes: &[u8],
    content_start: usize,
    content_end: usize,
    rust_style_escapes: bool,
) -> Vec<StringIssue> {
    let mut issues = Vec::new();
    if bytes[content_start..content_end].starts_with(&[0xEF, 0xBB, 0xBF]) {
        issues.push(StringIssue {
            kind: StringIssueKind::BomAtStringStart,
            start: content_start,
            end: content_start + 3,
        });
    }
    let mut i = content_start;
    while i < content_end {
        let b = bytes[i];
        if b == b'\\' {
            let (len, issue_kind) = classify_escape(bytes, i + 1, content_end, rust_style_escapes);
            if let Some(kind) = issue_kind {
                issues.push(StringIssue { kind, start: i, end: i + 1 + len });
            }
            i += 1 + len;
            continue;
        }
        match decode_utf8_char(&bytes[..content_end], i) {
            Utf8Decode::Ok { ch, len } => {
                if ch == '\r' {
                    issues.push(StringIssue { kind: StringIssueKind::CarriageReturnInString, start: i, end: i + len });
                } else if is_disallowed_control(ch) {
                    issues.push(StringIssue {
                        kind: StringIssueKind::ControlCharacterInString,
                        start: i,
                        end: i + len,
                    });
                } else if is_noncharacter(ch as u32) {
                    issues.push(StringIssue { kind: StringIssueKind::NoncharacterInString, start: i, end: i + len });
                }
                i += len;
            }
            Utf8Decode::Surrogate { len } => {
                issues.push(StringIssue { kind: StringIssueKind::SurrogateInString, start: i, end: i + len });
                i += len;
            }
            Utf8Decode::Overlong { len } => {
                issues.push(StringIssue { kind: StringIssueKind::OverlongUtf8Sequence, start: i, end: i + len });
                i += len;
            }
            Utf8Decode::Invalid { len } => {
                issues.push(StringIssue { kind: StringIssueKind::InvalidUtf8Sequence, start: i, end: i + len });
                i += len.max(1);
            }
            Utf8Decode::Incomplete { len } => {
                issues.push(StringIssue { kind: StringIssueKind::IncompleteUtf8Sequence, start: i, end: i + len });
                i += len.max(1);
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_consumes_alnum_and_underscore() {
        let info = consume_identifier(b"foo_bar2 rest", 0).unwrap();
        assert_eq!(info.end, 8);
    }

    #[test]
    fn identifier_rejects_non_start_byte() {
        assert!(consume_identifier(b"2abc", 0).is_none());
    }

    #[test]
    fn string_tracks_escapes_and_termination() {
        let info = consume_string(br#""a\"b""#, 0, b'"', true);
        assert!(info.terminated);
        assert!(info.has_escapes);
        assert_eq!(info.end, 6);
    }

    #[test]
    fn string_unterminated_at_newline() {
        let info = consume_string(b"\"abc\nmore", 0, b'"', true);
        assert!(!info.terminated);
        assert_eq!(info.end, 4);
    }

    #[test]
    fn number_plain_integer() {
        let info = consume_number(b"123,", 0, false);
        assert!(info.valid);
        assert!(!info.is_float);
        assert_eq!(info.end, 3);
    }

    #[test]
    fn number_float_with_exponent() {
        let info = consume_number(b"1.5e-10 ", 0, false);
        assert!(info.valid);
        assert!(info.is_float);
        assert_eq!(info.end, 7);
    }

    #[test]
    fn number_hex_prefix() {
        let info = consume_number(b"0xFF_AA", 0, true);
        assert!(info.valid);
        assert!(info.is_hex);
        assert_eq!(info.end, 7);
    }

    #[test]
    fn number_requires_at_least_one_digit() {
        let info = consume_number(b"e5", 0, false);
        assert!(!info.valid);
    }

    #[test]
    fn single_line_comment_stops_before_newline() {
        let info = consume_single_line_comment(b"hello\nworld", 0);
        assert_eq!(info.end, 5);
        assert!(info.terminated);
    }

    #[test]
    fn multi_line_comment_counts_newlines() {
        let info = consume_multi_line_comment(b"a\nb\nc*/tail", 0, b"*/");
        assert!(info.terminated);
        assert_eq!(info.newlines, 2);
        assert_eq!(info.end, 7);
    }

    #[test]
    fn multi_line_comment_unterminated_at_eof() {
        let info = consume_multi_line_comment(b"a\nb", 0, b"*/");
        assert!(!info.terminated);
        assert_eq!(info.newlines, 1);
        assert_eq!(info.end, 3);
    }

    #[test]
    fn scan_string_body_flags_control_character() {
        let bytes = b"a\x00b";
        let issues = scan_string_body(bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::ControlCharacterInString);
        assert_eq!((issues[0].start, issues[0].end), (1, 2));
    }

    #[test]
    fn scan_string_body_allows_tab_and_newline() {
        let bytes = b"a\tb\nc";
        assert!(scan_string_body(bytes, 0, bytes.len(), false).is_empty());
    }

    #[test]
    fn scan_string_body_flags_carriage_return_distinctly() {
        let bytes = b"a\rb";
        let issues = scan_string_body(bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::CarriageReturnInString);
    }

    #[test]
    fn scan_string_body_flags_bom_at_start_only() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"rest");
        let issues = scan_string_body(&bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::BomAtStringStart);
    }

    #[test]
    fn scan_string_body_flags_overlong_encoding() {
        // C0 80 is an overlong two-byte encoding of NUL.
        let bytes = &[0xC0, 0x80];
        let issues = scan_string_body(bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::OverlongUtf8Sequence);
    }

    #[test]
    fn scan_string_body_json_lone_surrogate_escape() {
        let bytes = br#"\ud83dxxxx"#;
        let issues = scan_string_body(bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::SurrogateInString);
    }

    #[test]
    fn scan_string_body_json_valid_surrogate_pair_is_clean() {
        // UTF-8 encoding of U+1F600 GRINNING FACE.
        let bytes = &[0xF0, 0x9F, 0x98, 0x80];
        assert!(scan_string_body(bytes, 0, bytes.len(), false).is_empty());
    }

    #[test]
    fn scan_string_body_invalid_escape_letter() {
        let bytes = br#"\q"#;
        let issues = scan_string_body(bytes, 0, bytes.len(), false);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, StringIssueKind::InvalidEscape);
    }

    #[test]
    fn scan_string_body_rust_style_unicode_escape_is_clean() {
        let bytes = br#"\u{1F600}"#;
        assert!(scan_string_body(bytes, 0, bytes.len(), true).is_empty());
    }

    #[test]
    fn scan_string_body_hex_byte_escape_requires_rust_style() {
        let bytes = br#"\x41"#;
        assert_eq!(scan_string_body(bytes, 0, bytes.len(), true).len(), 0);
        assert_eq!(scan_string_body(bytes, 0, bytes.len(), false).len(), 1);
    }
}
