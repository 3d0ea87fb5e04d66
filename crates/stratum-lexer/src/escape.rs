//! Escape-sequence parsers for string literals: the
//! common backslash escapes, JSON-style `\uXXXX` with surrogate pairs,
//! Rust-style `\u{...}`, and `\xNN`.

/// Outcome of parsing one escape sequence starting just after the `\`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EscapeResult {
    /// A single scalar value was decoded, consuming `len` bytes (including
    /// any trailing low surrogate that combined with this escape).
    Scalar { ch: char, len: usize },
    /// The escape was syntactically malformed (bad hex digits, lone
    /// surrogate, out-of-range `\u{...}`, unknown `\xNN` when disabled...).
    Invalid { len: usize },
}

/// Parse the simple single-character escapes common to both dialects:
/// `\" \\ \/ \b \f \n \r \t`. Returns `None` if `body[0]` isn't one of
/// these — caller falls through to the Unicode/`\xNN` forms.
pub fn parse_simple_escape(body: &[u8]) -> Option<EscapeResult> {
    let ch = match *body.first()? {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{8}',
        b'f' => '\u{c}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        _ => return None,
    };
    Some(EscapeResult::Scalar { ch, len: 1 })
}

/// Parse a JSON-style `\uXXXX` escape (body starts just after `\u`),
/// combining with a following `\uDCxx` low surrogate if `body` continues
/// with one immediately after the first four hex digits.
pub fn parse_json_unicode_escape(body: &[u8]) -> EscapeResult {
    let Some(high) = parse_hex4(body) else {
        return EscapeResult::Invalid { len: body.len().min(4) };
    };

    if !(0xD800..=0xDBFF).contains(&high) {
        return match char::from_u32(high) {
            Some(ch) if !(0xDC00..=0xDFFF).contains(&high) => EscapeResult::Scalar { ch, len: 4 },
            _ => EscapeResult::Invalid { len: 4 },
        };
    }

    // High surrogate: require an immediately-following `\uDCxx` low surrogate.
    if body.len() >= 10 && &body[4..6] == b"\\u" {
        if let Some(low) = parse_hex4(&body[6..]) {
            if (0xDC00..=0xDFFF).contains(&low) {
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                if let Some(ch) = char::from_u32(combined) {
                    return EscapeResult::Scalar { ch, len: 10 };
                }
            }
        }
    }

    EscapeResult::Invalid { len: 4 }
}

fn parse_hex4(body: &[u8]) -> Option<u32> {
    if body.len() < 4 {
        return None;
    }
    let s = std::str::from_utf8(&body[..4]).ok()?;
    u32::from_str_radix(s, 16).ok()
}

/// Parse a Rust-style `\u{...}` escape (body starts just after `\u`,
/// i.e. at the `{`).
pub fn parse_rust_unicode_escape(body: &[u8]) -> EscapeResult {
    if body.first() != Some(&b'{') {
        return EscapeResult::Invalid { len: 0 };
    }
    let Some(close) = body.iter().position(|&b| b == b'}') else {
        return EscapeResult::Invalid { len: body.len() };
    };
    let digits = &body[1..close];
    if digits.is_empty() || digits.len() > 6 {
        return EscapeResult::Invalid { len: close + 1 };
    }
    let Ok(s) = std::str::from_utf8(digits) else {
        return EscapeResult::Invalid { len: close + 1 };
    };
    match u32::from_str_radix(s, 16).ok().and_then(char::from_u32) {
        Some(ch) => EscapeResult::Scalar { ch, len: close + 1 },
        None => EscapeResult::Invalid { len: close + 1 },
    }
}

/// Parse a `\xNN` escape (body starts just after `\x`). Two hex digits,
/// byte value used directly as a scalar (matches common non-JSON dialects
/// rather than the stricter `\x00`-`\x7F`-only ASCII-only variants).
pub fn parse_hex_byte_escape(body: &[u8]) -> EscapeResult {
    if body.len() < 2 {
        return EscapeResult::Invalid { len: body.len() };
    }
    let Ok(s) = std::str::from_utf8(&body[..2]) else {
        return EscapeResult::Invalid { len: 2 };
    };
    match u8::from_str_radix(s, 16).ok() {
        Some(byte) => EscapeResult::Scalar { ch: byte as char, len: 2 },
        None => EscapeResult::Invalid { len: 2 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_escapes() {
        assert_eq!(parse_simple_escape(b"n"), Some(EscapeResult::Scalar { ch: '\n', len: 1 }));
        assert_eq!(parse_simple_escape(b"\""), Some(EscapeResult::Scalar { ch: '"', len: 1 }));
        assert_eq!(parse_simple_escape(b"q"), None);
    }

    #[test]
    fn json_bmp_escape() {
        assert_eq!(
            parse_json_unicode_escape(b"00e9rest"),
            EscapeResult::Scalar { ch: '\u{e9}', len: 4 }
        );
    }

    #[test]
    fn json_surrogate_pair() {
        // U+1F600 GRINNING FACE = D83D DE00
        let body = b"d83d\\ude00";
        assert_eq!(
            parse_json_unicode_escape(body),
            EscapeResult::Scalar { ch: '\u{1F600}', len: 10 }
        );
    }

    #[test]
    fn json_lone_high_surrogate_is_invalid() {
        match parse_json_unicode_escape(b"d83dxxxx") {
            EscapeResult::Invalid { .. } => {}
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn rust_style_escape() {
        assert_eq!(
            parse_rust_unicode_escape(b"{1F600}"),
            EscapeResult::Scalar { ch: '\u{1F600}', len: 8 }
        );
    }

    #[test]
    fn rust_style_escape_rejects_surrogate() {
        match parse_rust_unicode_escape(b"{D800}") {
            EscapeResult::Invalid { .. } => {}
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn hex_byte_escape() {
        assert_eq!(parse_hex_byte_escape(b"41"), EscapeResult::Scalar { ch: 'A', len: 2 });
    }
}
