//! Format-preserving reverse emitter.
//!
//! `SyntaxNode` is built from a lossless green tree — every trivia token
//! survives parsing untouched — so reconstructing source text is exact
//! token-text concatenation rather than a print-from-AST walk. Round-trip
//! falls out of the tree representation itself.

use crate::syntax_kind::SyntaxNode;

/// Reconstructs the full source text covered by `root`.
pub fn emit(root: &SyntaxNode) -> String {
    root.text().to_string()
}

#[cfg(test)]
mod tests {
    use crate::parser::json;
    use crate::parser::{from_lang_tokens, json::JsonParserConfig};
    use stratum_core::TokenKind;
    use stratum_lexer::{lex_all, CoreTags, DelimiterEntry, DelimiterKind, LangTag, LanguageTable, LexerConfig};

    use crate::syntax_kind::SyntaxKind;

    fn to_syntax_kind(t: LangTag) -> SyntaxKind {
        assert!(t.0 < SyntaxKind::__LAST as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(t.0) }
    }

    fn unused_generic_kind(_t: LangTag) -> TokenKind {
        TokenKind::Unknown
    }

    fn test_table() -> &'static LanguageTable {
        static DELIMS: &[DelimiterEntry] = &[
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
        static PUNCT: &[(u8, LangTag)] =
            &[(b':', LangTag(SyntaxKind::Colon as u16)), (b',', LangTag(SyntaxKind::Comma as u16))];
        static KEYWORDS: &[(&str, LangTag)] = &[
            ("true", LangTag(SyntaxKind::KwTrue as u16)),
            ("false", LangTag(SyntaxKind::KwFalse as u16)),
            ("null", LangTag(SyntaxKind::KwNull as u16)),
        ];
        static TABLE: LanguageTable = LanguageTable {
            name: "json-test",
            core: CoreTags {
                eof: LangTag(SyntaxKind::Eof as u16),
                error: LangTag(SyntaxKind::Error as u16),
                unknown: LangTag(SyntaxKind::Garbage as u16),
                whitespace: LangTag(SyntaxKind::Whitespace as u16),
                comment: LangTag(SyntaxKind::LineComment as u16),
                newline: LangTag(SyntaxKind::Newline as u16),
                identifier: LangTag(SyntaxKind::Identifier as u16),
                string: LangTag(SyntaxKind::StringLiteral as u16),
                number: LangTag(SyntaxKind::NumberLiteral as u16),
                bool_true: LangTag(SyntaxKind::KwTrue as u16),
                bool_false: LangTag(SyntaxKind::KwFalse as u16),
                null: LangTag(SyntaxKind::KwNull as u16),
            },
            delimiters: DELIMS,
            punctuation: PUNCT,
            keywords: KEYWORDS,
            allow_single_quotes: false,
            allows_digit_separators: false,
            allows_hex_byte_escapes: false,
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            field_name: None,
            import_keyword: None,
            multiline_string: None,
            generic_kind: unused_generic_kind,
        };
        &TABLE
    }

    #[test]
    fn round_trips_well_formed_json() {
        let src = "{ \"a\" : 1 , \"b\" : [2, 3] }";
        let (tokens, _) = lex_all(test_table(), &LexerConfig::default(), src.as_bytes());
        let syn_tokens = from_lang_tokens(&tokens, to_syntax_kind);
        let result = json::parse(src, syn_tokens, JsonParserConfig::default()).unwrap();
        assert!(!result.diagnostics.has_errors());
        assert_eq!(super::emit(result.root.syntax()), src);
    }
}
