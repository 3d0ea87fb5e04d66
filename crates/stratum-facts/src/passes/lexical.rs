//! Built-in lexical analysis pass: `is_token`, `has_text`,
//! `bracket_depth`, `is_open/close_delimiter`, `is_trivia` over every
//! token in the tree.

use stratum_core::TokenKind;
use stratum_syntax::SyntaxKind;

use crate::pass::{AnalysisPass, PassContext};
use crate::predicate::Predicate;
use crate::store::FactStore;

/// Maps a shared `SyntaxKind` token variant to the generic `TokenKind`
/// space — the same projection `stratum-langs`' per-language tables
/// perform, but the kind space is shared so one mapping covers both
/// JSON and ZON tokens here.
fn token_kind_for(kind: SyntaxKind) -> TokenKind {
    match kind {
        SyntaxKind::BraceOpen | SyntaxKind::BracketOpen | SyntaxKind::ParenOpen => {
            TokenKind::DelimiterOpen
        }
        SyntaxKind::BraceClose | SyntaxKind::BracketClose | SyntaxKind::ParenClose => {
            TokenKind::DelimiterClose
        }
        SyntaxKind::Colon | SyntaxKind::Equals | SyntaxKind::Dot | SyntaxKind::Comma => {
            TokenKind::Operator
        }
        SyntaxKind::StringLiteral => TokenKind::StringLiteral,
        SyntaxKind::NumberLiteral => TokenKind::NumberLiteral,
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => TokenKind::BooleanLiteral,
        SyntaxKind::KwNull => TokenKind::NullLiteral,
        SyntaxKind::KwUndefined => TokenKind::Keyword,
        SyntaxKind::Identifier | SyntaxKind::FieldName => TokenKind::Identifier,
        SyntaxKind::Whitespace => TokenKind::Whitespace,
        SyntaxKind::Newline => TokenKind::Newline,
        SyntaxKind::LineComment | SyntaxKind::BlockComment => TokenKind::Comment,
        SyntaxKind::Eof => TokenKind::Eof,
        SyntaxKind::Error | SyntaxKind::Garbage => TokenKind::Error,
        _ => TokenKind::Unknown,
    }
}

fn is_container(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Object | SyntaxKind::Array | SyntaxKind::Struct)
}

pub struct LexicalFactsPass;

impl AnalysisPass for LexicalFactsPass {
    fn name(&self) -> &'static str {
        "lexical_facts"
    }

    fn run(&self, ctx: &PassContext<'_>, store: &mut FactStore) {
        for element in ctx.root.descendants_with_tokens() {
            let Some(token) = element.into_token() else { continue };
            let kind = token.kind();
            let span = stratum_core::Span::new(token.text_range().start().into(), token.text_range().end().into());

            let depth = token
                .parent()
                .map(|parent| parent.ancestors().filter(|n| is_container(n.kind())).count())
                .unwrap_or(0) as u16;

            store.add(span, Predicate::IsToken(token_kind_for(kind)), None, 1.0);
            store.add(span, Predicate::BracketDepth(depth), None, 1.0);

            if kind.is_trivia() {
                store.add(span, Predicate::IsTrivia, None, 1.0);
                continue;
            }
            match kind {
                SyntaxKind::BraceOpen | SyntaxKind::BracketOpen | SyntaxKind::ParenOpen => {
                    store.add(span, Predicate::IsOpenDelimiter, None, 1.0);
                }
                SyntaxKind::BraceClose | SyntaxKind::BracketClose | SyntaxKind::ParenClose => {
                    store.add(span, Predicate::IsCloseDelimiter, None, 1.0);
                }
                _ => {}
            }
            if matches!(
                kind,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumberLiteral
                    | SyntaxKind::Identifier
                    | SyntaxKind::FieldName
            ) {
                store.add(span, Predicate::HasText(token.text().to_string()), None, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredicateCategory;
    use stratum_langs::json_descriptor;
    use stratum_lexer::{lex_all, LexerConfig};

    #[test]
    fn emits_one_is_token_fact_per_token() {
        let descriptor = json_descriptor();
        let src = r#"{"a":1}"#;
        let (tokens, _) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        let doc = descriptor.parse(src, tokens, Default::default()).unwrap();

        let mut store = FactStore::new();
        LexicalFactsPass.run(&PassContext { root: &doc.root, source: src }, &mut store);

        let token_facts = store.by_category(PredicateCategory::Lexical).count();
        assert!(token_facts > 0);
    }

    #[test]
    fn bracket_depth_reflects_nesting() {
        let descriptor = json_descriptor();
        let src = r#"{"a":[1]}"#;
        let (tokens, _) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        let doc = descriptor.parse(src, tokens, Default::default()).unwrap();

        let mut store = FactStore::new();
        LexicalFactsPass.run(&PassContext { root: &doc.root, source: src }, &mut store);

        let number_span = stratum_core::Span::new(6, 7);
        let depth = store
            .find_overlapping(number_span)
            .find_map(|f| match f.predicate {
                Predicate::BracketDepth(d) => Some(d),
                _ => None,
            })
            .unwrap();
        assert_eq!(depth, 2);
    }
}
