//! Built-in semantic pass: duplicate-key detection over `Object`/`Struct`
//! containers, emitting `has_diagnostic(duplicate_key)` facts. Declares a
//! dependency on `syntactic_facts` — the check only needs the raw tree,
//! but the dependency demonstrates passes running downstream of the
//! facts they build on.

use std::collections::HashSet;

use stratum_core::Span;
use stratum_syntax::{SyntaxKind, SyntaxNode};

use crate::pass::{AnalysisPass, PassContext};
use crate::predicate::{DiagnosticKind, Predicate};
use crate::store::FactStore;

fn span_of(node: &SyntaxNode) -> Span {
    let range = node.text_range();
    Span::new(range.start().into(), range.end().into())
}

fn member_key(node: &SyntaxNode) -> Option<String> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| matches!(t.kind(), SyntaxKind::StringLiteral | SyntaxKind::Identifier | SyntaxKind::FieldName))
        .map(|t| t.text().to_string())
}

pub struct DuplicateKeyPass;

impl AnalysisPass for DuplicateKeyPass {
    fn name(&self) -> &'static str {
        "duplicate_key"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["syntactic_facts"]
    }

    fn run(&self, ctx: &PassContext<'_>, store: &mut FactStore) {
        for container in ctx.root.descendants() {
            if !matches!(container.kind(), SyntaxKind::Object | SyntaxKind::Struct) {
                continue;
            }
            let mut seen: HashSet<String> = HashSet::new();
            for member in container.children() {
                if !matches!(member.kind(), SyntaxKind::Member | SyntaxKind::Field) {
                    continue;
                }
                let Some(key) = member_key(&member) else { continue };
                if !seen.insert(key) {
                    store.add(span_of(&member), Predicate::HasDiagnostic(DiagnosticKind::Warning), None, 1.0);
                }
            }
        }
    }
}
