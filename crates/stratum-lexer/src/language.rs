//! Parameterisation tables that let the one streaming state machine (C4)
//! serve multiple languages.

use stratum_core::TokenKind;

use crate::bracket_tracker::DelimiterKind;

/// Opaque per-language token tag. The generic lexer never interprets
/// these beyond equality and table lookup; a language crate (`stratum-langs`)
/// assigns the concrete meaning and converts to/from its own enum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LangTag(pub u16);

/// The handful of tags every language must supply, because the generic
/// state machine emits them directly rather than looking them up in
/// `keywords`/`delimiters`.
#[derive(Clone, Copy, Debug)]
pub struct CoreTags {
    pub eof: LangTag,
    pub error: LangTag,
    pub unknown: LangTag,
    pub whitespace: LangTag,
    pub comment: LangTag,
    pub newline: LangTag,
    pub identifier: LangTag,
    pub string: LangTag,
    pub number: LangTag,
    pub bool_true: LangTag,
    pub bool_false: LangTag,
    pub null: LangTag,
}

/// One delimiter pair in a language's bracket table.
#[derive(Clone, Copy, Debug)]
pub struct DelimiterEntry {
    pub open: u8,
    pub close: u8,
    pub open_tag: LangTag,
    pub close_tag: LangTag,
    pub bracket_kind: DelimiterKind,
}

/// Static description of one language's lexical surface: its delimiter
/// table, keyword table, single-byte punctuation, comment markers, and
/// literal policy defaults.
pub struct LanguageTable {
    pub name: &'static str,
    pub core: CoreTags,
    pub delimiters: &'static [DelimiterEntry],
    /// Single-byte operator/punctuation tokens, e.g. `:` `,` `=` `.`.
    pub punctuation: &'static [(u8, LangTag)],
    pub keywords: &'static [(&'static str, LangTag)],
    pub allow_single_quotes: bool,
    pub allows_digit_separators: bool,
    pub allows_hex_byte_escapes: bool,
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Tag for a `.name`/`@"name"` field-name token. `None` means the
    /// generic lexer never tags anything this way for this language.
    pub field_name: Option<LangTag>,
    /// Tag for the `@import` keyword. `None` disables `@`-prefixed
    /// keyword lexing entirely.
    pub import_keyword: Option<LangTag>,
    /// Tag for a `\\...` multiline string segment. `None` disables it;
    /// a bare `\` is then lexed byte-by-byte like any other unrecognised
    /// character.
    pub multiline_string: Option<LangTag>,
    /// Down-projection from a language tag to the generic [`TokenKind`].
    pub generic_kind: fn(LangTag) -> TokenKind,
}

impl LanguageTable {
    pub fn find_delimiter_open(&self, b: u8) -> Option<DelimiterEntry> {
        self.delimiters.iter().copied().find(|d| d.open == b)
    }

    pub fn find_delimiter_close(&self, b: u8) -> Option<DelimiterEntry> {
        self.delimiters.iter().copied().find(|d| d.close == b)
    }

    pub fn find_punctuation(&self, b: u8) -> Option<LangTag> {
        self.punctuation.iter().find(|(pb, _)| *pb == b).map(|(_, tag)| *tag)
    }

    pub fn classify_keyword(&self, text: &str) -> Option<LangTag> {
        self.keywords.iter().find(|(kw, _)| *kw == text).map(|(_, tag)| *tag)
    }
}
