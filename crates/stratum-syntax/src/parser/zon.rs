//! ZON grammar: `.{ ... }` struct/array literals, `.name = value` fields,
//! scalar literals. Grounded on the S3 scenario: a struct literal nests
//! further struct literals as field values and an anonymous (field-less)
//! struct literal stands in for an array.
//!
//! Field names (bare and `@"quoted"`) are part of the grammar via
//! [`zon_field`]. `@import(...)` and general parenthesised call
//! expressions are lexed (`@import` as `KwImport`, `(`/`)` as
//! `ParenOpen`/`ParenClose`, `\\...` multiline strings as
//! `MultilineStringLiteral`) but have no grammar production yet — see
//! DESIGN.md.

use stratum_core::{Diagnostics, Result};

use super::{rule_ids, Parser, RecoveredNode, SynToken};
use crate::ast::zon::Root;
use crate::syntax_kind::{token_sets, SyntaxKind, SyntaxNode, TokenSet};

#[derive(Debug, Clone, Copy)]
pub struct ZonParserConfig {
    pub allow_trailing_commas: bool,
    pub max_depth: Option<u32>,
    pub warn_depth: Option<u32>,
    pub max_errors: Option<u32>,
    pub recursion_fuel: Option<u32>,
}

impl Default for ZonParserConfig {
    fn default() -> Self {
        ZonParserConfig {
            allow_trailing_commas: true,
            max_depth: Some(256),
            warn_depth: Some(64),
            max_errors: None,
            recursion_fuel: Some(4096),
        }
    }
}

pub struct ZonParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub recovered: Vec<RecoveredNode>,
    pub exec_fuel_consumed: u32,
}

pub fn parse(source: &str, tokens: Vec<SynToken>, config: ZonParserConfig) -> Result<ZonParseResult> {
    let mut parser = Parser::new(source, tokens)
        .with_recursion_fuel(config.recursion_fuel)
        .with_max_errors(config.max_errors)
        .with_max_depth(config.max_depth)
        .with_warn_depth(config.warn_depth)
        .with_trailing_commas(config.allow_trailing_commas);

    parser.start_node(SyntaxKind::Root);
    zon_value(&mut parser);
    parser.eat_trivia();
    parser.finish_node();

    let (green, diagnostics, recovered, exec_fuel_consumed) = parser.finish_green()?;
    let root = Root::cast(SyntaxNode::new_root(green)).expect("parser always produces Root");
    Ok(ZonParseResult { root, diagnostics, recovered, exec_fuel_consumed })
}

fn recovery_set() -> TokenSet {
    token_sets::OBJECT_RECOVERY
        .union(token_sets::ARRAY_RECOVERY)
        .union(TokenSet::single(SyntaxKind::Eof))
}

fn zon_value(p: &mut Parser<'_>) {
    match p.peek() {
        SyntaxKind::Dot if p.peek_nth(1) == SyntaxKind::BraceOpen => zon_literal(p),
        SyntaxKind::StringLiteral => zon_scalar(p, SyntaxKind::StringNode),
        SyntaxKind::NumberLiteral => zon_scalar(p, SyntaxKind::NumberNode),
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => zon_scalar(p, SyntaxKind::BooleanNode),
        SyntaxKind::KwNull => zon_scalar(p, SyntaxKind::NullNode),
        SyntaxKind::KwUndefined => zon_scalar(p, SyntaxKind::UndefinedNode),
        _ => p.error_recover(rule_ids::UNEXPECTED_TOKEN, "expected a ZON value", recovery_set()),
    }
}

fn zon_scalar(p: &mut Parser<'_>, wrapper: SyntaxKind) {
    p.start_node(wrapper);
    p.bump();
    p.finish_node();
}

/// `.{ ... }`: a field-bearing struct literal, or — if no member carries a
/// `.name =` prefix — an anonymous array literal (e.g. `.paths = .{ "a", "b" }`).
/// The decision can't be made until the first member is seen, so the node
/// is opened retroactively via checkpoint.
fn zon_literal(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    p.bump(); // '.'
    p.expect(SyntaxKind::BraceOpen, "'{'");
    p.push_delimiter(SyntaxKind::BraceOpen);

    if !p.enter_recursion() || p.check_depth() {
        p.skip_balanced(SyntaxKind::BraceOpen, SyntaxKind::BraceClose);
        p.pop_delimiter();
        p.start_node_at(checkpoint, SyntaxKind::Struct);
        p.finish_node();
        return;
    }

    let mut is_struct = false;
    let mut first = true;
    while !p.should_stop() && p.peek() != SyntaxKind::BraceClose {
        if first {
            is_struct = p.peek() == SyntaxKind::Dot && p.peek_nth(1) != SyntaxKind::BraceOpen;
            first = false;
        }
        if is_struct {
            zon_field(p);
        } else {
            zon_value(p);
        }
        if p.peek() == SyntaxKind::Comma {
            p.bump();
            if p.peek() == SyntaxKind::BraceClose {
                if !p.allow_trailing_commas() {
                    p.error(rule_ids::TRAILING_COMMA_NOT_ALLOWED, "trailing comma is not allowed here");
                }
                break;
            }
        } else if p.peek() != SyntaxKind::BraceClose {
            p.error_recover(rule_ids::UNEXPECTED_TOKEN, "expected ',' or '}'", token_sets::OBJECT_RECOVERY);
        }
    }

    p.expect(SyntaxKind::BraceClose, "'}'");
    p.pop_delimiter();
    p.exit_recursion();

    let kind = if is_struct { SyntaxKind::Struct } else { SyntaxKind::Array };
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

/// `.name = value` or `.@"quoted name" = value`. A bare name is lexed as
/// a plain `Identifier` (the lexer has no notion of field position) and
/// gets reclassified to `FieldName` here; a quoted `@"..."` name is
/// already tagged `FieldName` by the lexer.
fn zon_field(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Field);
    p.expect(SyntaxKind::Dot, "'.'");
    match p.peek() {
        SyntaxKind::FieldName => p.bump(),
        SyntaxKind::Identifier => p.bump_as(SyntaxKind::FieldName),
        _ => p.error(rule_ids::UNEXPECTED_TOKEN, "expected a field name"),
    }
    p.expect(SyntaxKind::Equals, "'='");
    zon_value(p);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::from_lang_tokens;
    use stratum_core::TokenKind;
    use stratum_lexer::{lex_all, CoreTags, DelimiterEntry, DelimiterKind, LangTag, LanguageTable, LexerConfig};

    fn to_syntax_kind(t: LangTag) -> SyntaxKind {
        assert!(t.0 < SyntaxKind::__LAST as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(t.0) }
    }

    fn unused_generic_kind(_t: LangTag) -> TokenKind {
        TokenKind::Unknown
    }

    fn test_table() -> &'static LanguageTable {
        static DELIMS: &[DelimiterEntry] = &[DelimiterEntry {
            open: b'{',
            close: b'}',
            open_tag: LangTag(SyntaxKind::BraceOpen as u16),
            close_tag: LangTag(SyntaxKind::BraceClose as u16),
            bracket_kind: DelimiterKind(0),
        }];
        static PUNCT: &[(u8, LangTag)] = &[
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
        static TABLE: LanguageTable = LanguageTable {
            name: "zon-test",
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
            allows_digit_separators: true,
            allows_hex_byte_escapes: true,
            line_comment: Some("//"),
            block_comment: None,
            field_name: Some(LangTag(SyntaxKind::FieldName as u16)),
            import_keyword: Some(LangTag(SyntaxKind::KwImport as u16)),
            multiline_string: Some(LangTag(SyntaxKind::MultilineStringLiteral as u16)),
            generic_kind: unused_generic_kind,
        };
        &TABLE
    }

    fn parse_str(src: &str) -> ZonParseResult {
        let (tokens, _) = lex_all(test_table(), &LexerConfig::default(), src.as_bytes());
        let syn_tokens = from_lang_tokens(&tokens, to_syntax_kind);
        parse(src, syn_tokens, ZonParserConfig::default()).unwrap()
    }

    #[test]
    fn struct_literal_nests_fields() {
        let result = parse_str(r#".{ .name = "p", .version = "0.1.0" }"#);
        assert!(!result.diagnostics.has_errors());
        let root_value = result.root.value().unwrap();
        assert_eq!(root_value.syntax().kind(), SyntaxKind::Struct);
        let fields: Vec<_> = root_value.syntax().children().filter(|c| c.kind() == SyntaxKind::Field).collect();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn field_less_literal_is_array() {
        let result = parse_str(r#".{ "a", "b" }"#);
        assert!(!result.diagnostics.has_errors());
        assert_eq!(result.root.value().unwrap().syntax().kind(), SyntaxKind::Array);
    }

    #[test]
    fn nested_struct_reports_correct_depth() {
        let src = r#".{ .dependencies = .{ .x = .{ .url = "u", .hash = "h" } } }"#;
        let result = parse_str(src);
        assert!(!result.diagnostics.has_errors());
    }

    #[test]
    fn bare_field_name_is_reclassified_in_the_tree() {
        let result = parse_str(r#".{ .name = "p" }"#);
        assert!(!result.diagnostics.has_errors());
        let field = result
            .root
            .value()
            .unwrap()
            .syntax()
            .children()
            .find(|c| c.kind() == SyntaxKind::Field)
            .unwrap();
        assert!(field
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::FieldName));
    }

    #[test]
    fn quoted_field_name_parses() {
        let result = parse_str(r#".{ .@"weird name" = "p" }"#);
        assert!(!result.diagnostics.has_errors());
        let field = result
            .root
            .value()
            .unwrap()
            .syntax()
            .children()
            .find(|c| c.kind() == SyntaxKind::Field)
            .unwrap();
        assert!(field
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::FieldName));
    }
}
