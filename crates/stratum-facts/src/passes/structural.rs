//! Built-in structural analysis pass: `is_boundary`, `is_error_region`,
//! `is_foldable`, `indent_level` over every node.

use stratum_core::Span;
use stratum_syntax::SyntaxKind;

use crate::pass::{AnalysisPass, PassContext};
use crate::predicate::{BoundaryKind, Predicate};
use crate::store::FactStore;

fn is_container(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Object | SyntaxKind::Array | SyntaxKind::Struct)
}

fn span_of(range: rowan::TextRange) -> Span {
    Span::new(range.start().into(), range.end().into())
}

pub struct StructuralFactsPass;

impl AnalysisPass for StructuralFactsPass {
    fn name(&self) -> &'static str {
        "structural_facts"
    }

    fn run(&self, ctx: &PassContext<'_>, store: &mut FactStore) {
        for node in ctx.root.descendants() {
            let kind = node.kind();
            let span = span_of(node.text_range());

            if kind.is_error() {
                store.add(span, Predicate::IsErrorRegion, None, 1.0);
            }

            if !is_container(kind) {
                continue;
            }

            let indent_level = node.ancestors().skip(1).filter(|n| is_container(n.kind())).count() as u32;
            store.add(span, Predicate::IndentLevel(indent_level), None, 1.0);

            let text = &ctx.source[span.start as usize..span.end as usize];
            if text.contains('\n') {
                store.add(span, Predicate::IsFoldable, None, 1.0);
            }

            if let Some(open) = node.first_token() {
                store.add(span_of(open.text_range()), Predicate::IsBoundary(BoundaryKind::ContainerOpen), None, 1.0);
            }
            if let Some(close) = node.last_token() {
                store.add(span_of(close.text_range()), Predicate::IsBoundary(BoundaryKind::ContainerClose), None, 1.0);
            }
        }
    }
}
