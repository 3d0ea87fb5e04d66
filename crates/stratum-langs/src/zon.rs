//! ZON's lexical surface. ZON (Zig Object Notation) reuses JSON's scalar
//! literals but replaces object/array syntax with `.{ ... }` struct/array
//! literals and `.name = value` fields — see S3.

use std::sync::LazyLock;

use stratum_core::TokenKind;
use stratum_lexer::{CoreTags, DelimiterEntry, DelimiterKind, LangTag, LanguageTable};
use stratum_syntax::SyntaxKind;

fn tag(kind: SyntaxKind) -> LangTag {
    LangTag(kind as u16)
}

pub fn generic_kind(t: LangTag) -> TokenKind {
    match to_syntax_kind(t) {
        SyntaxKind::BraceOpen | SyntaxKind::BracketOpen | SyntaxKind::ParenOpen => {
            TokenKind::DelimiterOpen
        }
        SyntaxKind::BraceClose | SyntaxKind::BracketClose | SyntaxKind::ParenClose => {
            TokenKind::DelimiterClose
        }
        SyntaxKind::Dot | SyntaxKind::Equals | SyntaxKind::Comma => TokenKind::Operator,
        SyntaxKind::StringLiteral => TokenKind::StringLiteral,
        SyntaxKind::NumberLiteral => TokenKind::NumberLiteral,
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => TokenKind::BooleanLiteral,
        SyntaxKind::KwNull => TokenKind::NullLiteral,
        SyntaxKind::KwUndefined | SyntaxKind::KwImport => TokenKind::Keyword,
        SyntaxKind::Identifier | SyntaxKind::FieldName => TokenKind::Identifier,
        SyntaxKind::MultilineStringLiteral => TokenKind::StringLiteral,
        SyntaxKind::Whitespace => TokenKind::Whitespace,
        SyntaxKind::Newline => TokenKind::Newline,
        SyntaxKind::LineComment | SyntaxKind::BlockComment => TokenKind::Comment,
        SyntaxKind::Eof => TokenKind::Eof,
        SyntaxKind::Error => TokenKind::Error,
        _ => TokenKind::Unknown,
    }
}

pub fn to_syntax_kind(t: LangTag) -> SyntaxKind {
    assert!(t.0 < SyntaxKind::__LAST as u16, "tag {} out of range for SyntaxKind", t.0);
    // SAFETY: see `json::to_syntax_kind` — same construction scheme.
    unsafe { std::mem::transmute::<u16, SyntaxKind>(t.0) }
}

static DELIMITERS: &[DelimiterEntry] = &[
    DelimiterEntry {
        open: b'{',
        close: b'}',
        open_tag: LangTag(SyntaxKind::BraceOpen as u16),
        close_tag: LangTag(SyntaxKind::BraceClose as u16),
        bracket_kind: DelimiterKind(0),
    },
    DelimiterEntry {
        open: b'[',
        close: b']',
        open_tag: LangTag(SyntaxKind::BracketOpen as u16),
        close_tag: LangTag(SyntaxKind::BracketClose as u16),
        bracket_kind: DelimiterKind(1),
    },
    DelimiterEntry {
        open: b'(',
        close: b')',
        open_tag: LangTag(SyntaxKind::ParenOpen as u16),
        close_tag: LangTag(SyntaxKind::ParenClose as u16),
        bracket_kind: DelimiterKind(2),
    },
];

static PUNCTUATION: &[(u8, LangTag)] = &[
    (b'.', LangTag(SyntaxKind::Dot as u16)),
    (b'=', LangTag(SyntaxKind::Equals as u16)),
    (b',', LangTag(SyntaxKind::Comma as u16)),
];

static KEYWORDS: &[(&str, LangTag)] = &[
    ("true", LangTag(SyntaxKind::KwTrue as u16)),
    ("false", LangTag(SyntaxKind::KwFalse as u16)),
    ("null", LangTag(SyntaxKind::KwNull as u16)),
    ("undefined", LangTag(SyntaxKind::KwUndefined as u16)),
];

/// The canonical ZON [`LanguageTable`]: digit separators and `\xNN` escapes
/// are on by default, single-quoted strings are not part of the grammar,
/// and Zig has no block comments. `@"name"` field names, `@import`, and
/// `\\...` multiline strings are lexed; only the scalar/struct grammar
/// consumes them so far (see DESIGN.md).
pub fn table() -> &'static LanguageTable {
    static TABLE: LazyLock<LanguageTable> = LazyLock::new(|| LanguageTable {
        name: "zon",
        core: CoreTags {
            eof: tag(SyntaxKind::Eof),
            error: tag(SyntaxKind::Error),
            unknown: tag(SyntaxKind::Garbage),
            whitespace: tag(SyntaxKind::Whitespace),
            comment: tag(SyntaxKind::LineComment),
            newline: tag(SyntaxKind::Newline),
            identifier: tag(SyntaxKind::Identifier),
            string: tag(SyntaxKind::StringLiteral),
            number: tag(SyntaxKind::NumberLiteral),
            bool_true: tag(SyntaxKind::KwTrue),
            bool_false: tag(SyntaxKind::KwFalse),
            null: tag(SyntaxKind::KwNull),
        },
        delimiters: DELIMITERS,
        punctuation: PUNCTUATION,
        keywords: KEYWORDS,
        allow_single_quotes: false,
        allows_digit_separators: true,
        allows_hex_byte_escapes: true,
        line_comment: Some("//"),
        block_comment: None,
        field_name: Some(tag(SyntaxKind::FieldName)),
        import_keyword: Some(tag(SyntaxKind::KwImport)),
        multiline_string: Some(tag(SyntaxKind::MultilineStringLiteral)),
        generic_kind,
    });
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_lexer::{lex_all, LexerConfig};

    fn lex(src: &str) -> Vec<SyntaxKind> {
        let (tokens, diags) = lex_all(table(), &LexerConfig::default(), src.as_bytes());
        assert!(!diags.has_errors(), "unexpected diagnostics: {diags:?}");
        tokens.iter().filter(|t| !t.is_trivia()).map(|t| to_syntax_kind(t.tag)).collect()
    }

    #[test]
    fn quoted_field_name_is_lexed_as_field_name() {
        assert_eq!(
            lex(r#".@"weird name""#),
            vec![SyntaxKind::Dot, SyntaxKind::FieldName, SyntaxKind::Eof]
        );
    }

    #[test]
    fn at_import_is_lexed_as_keyword() {
        assert_eq!(lex(r#"@import("std")"#), vec![
            SyntaxKind::KwImport,
            SyntaxKind::ParenOpen,
            SyntaxKind::StringLiteral,
            SyntaxKind::ParenClose,
            SyntaxKind::Eof,
        ]);
    }

    #[test]
    fn unknown_at_builtin_falls_back_to_unexpected_character() {
        let (tokens, diags) = lex_all(table(), &LexerConfig::default(), b"@TypeOf");
        assert!(diags.has_errors());
        assert!(tokens.iter().any(|t| t.is_error()));
    }

    #[test]
    fn multiline_string_segment_is_lexed() {
        assert_eq!(
            lex("\\\\hello"),
            vec![SyntaxKind::MultilineStringLiteral, SyntaxKind::Eof]
        );
    }
}
