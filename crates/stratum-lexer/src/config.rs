//! Lexer configuration.

/// Unicode validation policy, RFC 9839-aligned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodePolicy {
    /// Reject BOM at string start, C0/C1 controls (except `\t`/`\n`),
    /// surrogates, non-characters, and non-minimal UTF-8 encodings.
    #[default]
    Strict,
    /// Same rejection rules, but offending code points are replaced with
    /// U+FFFD instead of raising an error.
    Sanitise,
    /// Accept any well-formed UTF-8.
    Permissive,
}

/// Lexer configuration: the generic options plus two policy knobs that
/// are resolved here rather than guessed per-language (digit separators,
/// `\xNN` escapes).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexerConfig {
    pub allow_comments: bool,
    pub preserve_comments: bool,
    pub allow_trailing_commas: bool,
    pub allow_single_quotes: bool,
    pub track_locations: bool,
    pub ring_buffer_size: usize,
    pub unicode_policy: UnicodePolicy,
    /// `None` defers to the active [`LanguageTable`](crate::language::LanguageTable)'s default.
    pub allow_digit_separators: Option<bool>,
    /// `None` defers to the active [`LanguageTable`](crate::language::LanguageTable)'s default.
    pub allow_hex_byte_escapes: Option<bool>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            allow_comments: true,
            preserve_comments: false,
            allow_trailing_commas: false,
            allow_single_quotes: false,
            track_locations: true,
            ring_buffer_size: 64 * 1024,
            unicode_policy: UnicodePolicy::Strict,
            allow_digit_separators: None,
            allow_hex_byte_escapes: None,
        }
    }
}
