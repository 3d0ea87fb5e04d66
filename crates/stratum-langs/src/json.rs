//! JSON's lexical surface: the delimiter/punctuation/keyword tables that
//! parameterise the generic streaming lexer (`stratum-lexer`) for JSON.

use std::sync::LazyLock;

use stratum_core::TokenKind;
use stratum_lexer::{CoreTags, DelimiterEntry, DelimiterKind, LangTag, LanguageTable};
use stratum_syntax::SyntaxKind;

fn tag(kind: SyntaxKind) -> LangTag {
    LangTag(kind as u16)
}

/// Down-projects a JSON [`LangTag`] to the generic [`TokenKind`] set (C2).
pub fn generic_kind(t: LangTag) -> TokenKind {
    match to_syntax_kind(t) {
        SyntaxKind::BraceOpen | SyntaxKind::BracketOpen => TokenKind::DelimiterOpen,
        SyntaxKind::BraceClose | SyntaxKind::BracketClose => TokenKind::DelimiterClose,
        SyntaxKind::Colon | SyntaxKind::Comma => TokenKind::Operator,
        SyntaxKind::StringLiteral => TokenKind::StringLiteral,
        SyntaxKind::NumberLiteral => TokenKind::NumberLiteral,
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => TokenKind::BooleanLiteral,
        SyntaxKind::KwNull => TokenKind::NullLiteral,
        SyntaxKind::Identifier => TokenKind::Identifier,
        SyntaxKind::Whitespace => TokenKind::Whitespace,
        SyntaxKind::Newline => TokenKind::Newline,
        SyntaxKind::LineComment | SyntaxKind::BlockComment => TokenKind::Comment,
        SyntaxKind::Eof => TokenKind::Eof,
        SyntaxKind::Error => TokenKind::Error,
        _ => TokenKind::Unknown,
    }
}

/// Bounds-checked transmute from a JSON [`LangTag`] back to [`SyntaxKind`] —
/// sound because every tag in [`table`] was built from a `SyntaxKind`
/// discriminant in the first place.
pub fn to_syntax_kind(t: LangTag) -> SyntaxKind {
    assert!(t.0 < SyntaxKind::__LAST as u16, "tag {} out of range for SyntaxKind", t.0);
    // SAFETY: bounds-checked above; SyntaxKind is repr(u16) and every JSON
    // tag is constructed from a SyntaxKind discriminant by `tag()`.
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
];

static PUNCTUATION: &[(u8, LangTag)] =
    &[(b':', LangTag(SyntaxKind::Colon as u16)), (b',', LangTag(SyntaxKind::Comma as u16))];

static KEYWORDS: &[(&str, LangTag)] = &[
    ("true", LangTag(SyntaxKind::KwTrue as u16)),
    ("false", LangTag(SyntaxKind::KwFalse as u16)),
    ("null", LangTag(SyntaxKind::KwNull as u16)),
];

/// The canonical JSON [`LanguageTable`]. Comment markers are present in
/// the table (S1's "lenient mode" parses `/* ... */`) but only consumed
/// when `LexerConfig::allow_comments` is set — strict JSON leaves it off.
pub fn table() -> &'static LanguageTable {
    static TABLE: LazyLock<LanguageTable> = LazyLock::new(|| LanguageTable {
        name: "json",
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
        allows_digit_separators: false,
        allows_hex_byte_escapes: false,
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        field_name: None,
        import_keyword: None,
        multiline_string: None,
        generic_kind,
    });
    &TABLE
}
