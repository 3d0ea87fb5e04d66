//! Built-in syntactic analysis pass: `is_node`, `has_child`,
//! `has_parent`, `precedes`/`follows`, `has_field`.

use indexmap::IndexMap;
use stratum_core::Span;
use stratum_syntax::{SyntaxKind, SyntaxNode};

use crate::pass::{AnalysisPass, PassContext};
use crate::predicate::{FactId, Predicate};
use crate::store::FactStore;

fn span_of(node: &SyntaxNode) -> Span {
    let range = node.text_range();
    Span::new(range.start().into(), range.end().into())
}

/// The key token of a `Member`/`Field`-shaped node: JSON keys are
/// `StringLiteral` tokens, ZON field names are `Identifier` tokens.
fn field_name(node: &SyntaxNode) -> Option<String> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| matches!(t.kind(), SyntaxKind::StringLiteral | SyntaxKind::Identifier | SyntaxKind::FieldName))
        .map(|t| t.text().to_string())
}

pub struct SyntacticFactsPass;

impl AnalysisPass for SyntacticFactsPass {
    fn name(&self) -> &'static str {
        "syntactic_facts"
    }

    fn run(&self, ctx: &PassContext<'_>, store: &mut FactStore) {
        // Pre-order traversal records each node's `FactId` so children can
        // link back to their parent's `is_node` fact.
        let mut fact_id_of: IndexMap<SyntaxNode, FactId> = IndexMap::new();

        for node in ctx.root.descendants() {
            let span = span_of(&node);
            let id = store.add(span, Predicate::IsNode(node.kind()), None, 1.0);
            fact_id_of.insert(node.clone(), id);

            if let Some(parent) = node.parent() {
                if let Some(&parent_id) = fact_id_of.get(&parent) {
                    store.add(span, Predicate::HasParent(parent_id), None, 1.0);
                    let parent_span = span_of(&parent);
                    store.add(parent_span, Predicate::HasChild(id), None, 1.0);
                }
            }

            if matches!(node.kind(), SyntaxKind::Member | SyntaxKind::Field) {
                if let Some(name) = field_name(&node) {
                    store.add(span, Predicate::HasField(name), None, 1.0);
                }
            }
        }

        for parent in ctx.root.descendants() {
            let mut prev: Option<(Span, FactId)> = None;
            for child in parent.children() {
                let span = span_of(&child);
                let Some(&id) = fact_id_of.get(&child) else { continue };
                if let Some((prev_span, prev_id)) = prev {
                    store.add(prev_span, Predicate::Precedes(id), None, 1.0);
                    store.add(span, Predicate::Follows(prev_id), None, 1.0);
                }
                prev = Some((span, id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredicateCategory;
    use stratum_langs::{json_descriptor, zon_descriptor};
    use stratum_lexer::{lex_all, LexerConfig};

    #[test]
    fn every_node_gets_an_is_node_fact() {
        let descriptor = json_descriptor();
        let src = r#"{"a":1,"b":2}"#;
        let (tokens, _) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        let doc = descriptor.parse(src, tokens, Default::default()).unwrap();

        let mut store = FactStore::new();
        SyntacticFactsPass.run(&PassContext { root: &doc.root, source: src }, &mut store);

        let node_facts = store
            .by_category(PredicateCategory::Syntactic)
            .filter(|f| matches!(f.predicate, Predicate::IsNode(_)))
            .count();
        // Root, Object, Member(a), Member(b), NumberNode x2 == 6.
        assert_eq!(node_facts, 6);
    }

    #[test]
    fn members_get_has_field_facts() {
        let descriptor = json_descriptor();
        let src = r#"{"a":1}"#;
        let (tokens, _) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        let doc = descriptor.parse(src, tokens, Default::default()).unwrap();

        let mut store = FactStore::new();
        SyntacticFactsPass.run(&PassContext { root: &doc.root, source: src }, &mut store);

        let fields: Vec<String> = store
            .by_category(PredicateCategory::Syntactic)
            .filter_map(|f| match &f.predicate {
                Predicate::HasField(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["\"a\""]);
    }

    #[test]
    fn zon_fields_are_identifier_keyed() {
        let descriptor = zon_descriptor();
        let src = r#".{ .name = "p" }"#;
        let (tokens, _) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        let doc = descriptor.parse(src, tokens, Default::default()).unwrap();

        let mut store = FactStore::new();
        SyntacticFactsPass.run(&PassContext { root: &doc.root, source: src }, &mut store);

        let fields: Vec<String> = store
            .by_category(PredicateCategory::Syntactic)
            .filter_map(|f| match &f.predicate {
                Predicate::HasField(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["name"]);
    }
}
