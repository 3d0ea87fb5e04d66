//! JSON grammar: object/array/member/string/number/boolean/null, with
//! error recovery resynchronisation rule.

use stratum_core::{Diagnostics, Result};

use super::{rule_ids, Parser, RecoveredNode, SynToken};
use crate::ast::json::Root;
use crate::syntax_kind::{token_sets, SyntaxKind, SyntaxNode, TokenSet};

/// Parser-level configuration.
#[derive(Debug, Clone, Copy)]
pub struct JsonParserConfig {
    pub allow_trailing_commas: bool,
    pub max_depth: Option<u32>,
    pub warn_depth: Option<u32>,
    pub max_errors: Option<u32>,
    pub recursion_fuel: Option<u32>,
}

impl Default for JsonParserConfig {
    fn default() -> Self {
        JsonParserConfig {
            allow_trailing_commas: false,
            max_depth: Some(256),
            warn_depth: Some(64),
            max_errors: None,
            recursion_fuel: Some(4096),
        }
    }
}

pub struct JsonParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub recovered: Vec<RecoveredNode>,
    pub exec_fuel_consumed: u32,
}

pub fn parse(source: &str, tokens: Vec<SynToken>, config: JsonParserConfig) -> Result<JsonParseResult> {
    let mut parser = Parser::new(source, tokens)
        .with_recursion_fuel(config.recursion_fuel)
        .with_max_errors(config.max_errors)
        .with_max_depth(config.max_depth)
        .with_warn_depth(config.warn_depth)
        .with_trailing_commas(config.allow_trailing_commas);

    parser.start_node(SyntaxKind::Root);
    json_value(&mut parser);
    parser.eat_trivia();
    parser.finish_node();

    let (green, diagnostics, recovered, exec_fuel_consumed) = parser.finish_green()?;
    let root = Root::cast(SyntaxNode::new_root(green)).expect("parser always produces Root");
    Ok(JsonParseResult { root, diagnostics, recovered, exec_fuel_consumed })
}

fn recovery_set() -> TokenSet {
    token_sets::OBJECT_RECOVERY
        .union(token_sets::ARRAY_RECOVERY)
        .union(TokenSet::single(SyntaxKind::Eof))
}

fn json_value(p: &mut Parser<'_>) {
    match p.peek() {
        SyntaxKind::BraceOpen => json_object(p),
        SyntaxKind::BracketOpen => json_array(p),
        SyntaxKind::StringLiteral => json_literal(p, SyntaxKind::StringNode),
        SyntaxKind::NumberLiteral => json_literal(p, SyntaxKind::NumberNode),
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => json_literal(p, SyntaxKind::BooleanNode),
        SyntaxKind::KwNull => json_literal(p, SyntaxKind::NullNode),
        _ => p.error_recover(rule_ids::UNEXPECTED_TOKEN, "expected a value", recovery_set()),
    }
}

fn json_literal(p: &mut Parser<'_>, wrapper: SyntaxKind) {
    if wrapper == SyntaxKind::NumberNode {
        check_leading_zero(p);
    }
    p.start_node(wrapper);
    p.bump();
    p.finish_node();
}

/// JSON forbids a leading zero in a number's integer part (`01`, `-007`);
/// `0`, `0.5`, and `0e1` are fine. Informational rather than a hard error —
/// the token is still well-formed enough to parse.
fn check_leading_zero(p: &mut Parser<'_>) {
    let text = p.current_text();
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut chars = digits.chars();
    if matches!(chars.next(), Some('0')) && matches!(chars.next(), Some(c) if c.is_ascii_digit()) {
        let span = p.current_span();
        p.diagnostics
            .info("leading zeros are not allowed in JSON number literals", span)
            .rule(rule_ids::LEADING_ZERO)
            .emit();
    }
}

fn json_object(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Object);
    p.expect(SyntaxKind::BraceOpen, "'{'");
    p.push_delimiter(SyntaxKind::BraceOpen);

    if !p.enter_recursion() || p.check_depth() {
        p.skip_balanced(SyntaxKind::BraceOpen, SyntaxKind::BraceClose);
        p.pop_delimiter();
        p.finish_node();
        return;
    }

    while !p.should_stop() && p.peek() != SyntaxKind::BraceClose {
        json_member(p);
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
    p.finish_node();
}

fn json_member(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Member);
    if !p.expect(SyntaxKind::StringLiteral, "a string key") {
        p.error_recover(rule_ids::UNEXPECTED_TOKEN, "expected a member", token_sets::MEMBER_RECOVERY);
        p.finish_node();
        return;
    }
    p.expect(SyntaxKind::Colon, "':'");
    json_value(p);
    p.finish_node();
}

fn json_array(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Array);
    p.expect(SyntaxKind::BracketOpen, "'['");
    p.push_delimiter(SyntaxKind::BracketOpen);

    if !p.enter_recursion() || p.check_depth() {
        p.skip_balanced(SyntaxKind::BracketOpen, SyntaxKind::BracketClose);
        p.pop_delimiter();
        p.finish_node();
        return;
    }

    while !p.should_stop() && p.peek() != SyntaxKind::BracketClose {
        json_value(p);
        if p.peek() == SyntaxKind::Comma {
            p.bump();
            if p.peek() == SyntaxKind::BracketClose {
                if !p.allow_trailing_commas() {
                    p.error(rule_ids::TRAILING_COMMA_NOT_ALLOWED, "trailing comma is not allowed here");
                }
                break;
            }
        } else if p.peek() != SyntaxKind::BracketClose {
            p.error_recover(rule_ids::UNEXPECTED_TOKEN, "expected ',' or ']'", token_sets::ARRAY_RECOVERY);
        }
    }

    p.expect(SyntaxKind::BracketClose, "']'");
    p.pop_delimiter();
    p.exit_recursion();
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::from_lang_tokens;
    use stratum_core::TokenKind;
    use stratum_lexer::{lex_all, CoreTags, DelimiterEntry, DelimiterKind, LangTag, LanguageTable, LexerConfig};

    /// Tags are set to the matching `SyntaxKind` discriminant, mirroring
    /// the scheme `stratum-langs` uses to keep the lexer and syntax layers
    /// numerically consistent.
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
        static PUNCT: &[(u8, LangTag)] = &[
            (b':', LangTag(SyntaxKind::Colon as u16)),
            (b',', LangTag(SyntaxKind::Comma as u16)),
        ];
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

    fn parse_str(src: &str) -> JsonParseResult {
        let (tokens, _) = lex_all(test_table(), &LexerConfig::default(), src.as_bytes());
        let syn_tokens = from_lang_tokens(&tokens, to_syntax_kind);
        parse(src, syn_tokens, JsonParserConfig::default()).unwrap()
    }

    #[test]
    fn parses_simple_object() {
        let result = parse_str(r#"{"a": 1, "b": [2, 3]}"#);
        assert!(!result.diagnostics.has_errors());
        assert_eq!(result.root.value().unwrap().syntax().kind(), SyntaxKind::Object);
    }

    #[test]
    fn trailing_comma_reported_when_disallowed() {
        let result = parse_str(r#"{"a": 1,}"#);
        assert!(result.diagnostics.iter().any(|d| d.rule_id() == Some(rule_ids::TRAILING_COMMA_NOT_ALLOWED)));
    }

    #[test]
    fn trailing_comma_allowed_when_configured() {
        let (tokens, _) = lex_all(test_table(), &LexerConfig::default(), br#"{"a": 1,}"#);
        let syn_tokens = from_lang_tokens(&tokens, to_syntax_kind);
        let result = parse(
            r#"{"a": 1,}"#,
            syn_tokens,
            JsonParserConfig { allow_trailing_commas: true, ..Default::default() },
        )
        .unwrap();
        assert!(!result.diagnostics.iter().any(|d| d.rule_id() == Some(rule_ids::TRAILING_COMMA_NOT_ALLOWED)));
    }

    #[test]
    fn leading_zero_is_reported_informationally() {
        let result = parse_str(r#"{"a": 007}"#);
        assert!(!result.diagnostics.has_errors());
        assert!(result.diagnostics.iter().any(|d| d.rule_id() == Some(rule_ids::LEADING_ZERO)));
    }

    #[test]
    fn zero_point_five_has_no_leading_zero_diagnostic() {
        let result = parse_str(r#"{"a": 0.5}"#);
        assert!(!result.diagnostics.iter().any(|d| d.rule_id() == Some(rule_ids::LEADING_ZERO)));
    }

    #[test]
    fn missing_comma_recovers_and_keeps_both_members() {
        let result = parse_str(r#"{"x": 1 "y": 2}"#);
        assert!(result.diagnostics.has_errors());
        assert_eq!(result.recovered.len(), 1);
        let obj = result.root.value().unwrap();
        let members: Vec<_> = obj.syntax().children().filter(|c| c.kind() == SyntaxKind::Member).collect();
        assert_eq!(members.len(), 2);
    }
}
