//! The fact-stream intermediate representation and transform pipeline
//! (C7) — [`FactStore`]'s immutable, generation-tracked facts; a small
//! relational [`FactQuery`] builder; [`AnalysisPass`]es composed by
//! dependency order; and the [`Pipeline`] that drives bytes → tokens →
//! AST → facts end to end, with `round_trip` exercising the
//! parse/emit/parse invariant.
//!
//! Everything here walks the shared [`stratum_syntax::SyntaxKind`] tree
//! produced by `stratum-langs`' descriptors rather than a per-language
//! typed AST, so one set of built-in passes serves both JSON and ZON.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod fact;
mod pass;
mod passes;
mod pipeline;
mod predicate;
mod query;
mod store;

pub use fact::Fact;
pub use pass::{run_passes, AnalysisPass, PassContext, PipelineError};
pub use passes::{default_passes, DuplicateKeyPass, LexicalFactsPass, StructuralFactsPass, SyntacticFactsPass};
pub use pipeline::{Pipeline, PipelineOutput, RoundTrip, StageError};
pub use predicate::{
    BoundaryKind, DeclFlag, DiagnosticKind, FactId, HighlightKind, LayerKind, Predicate, PredicateCategory,
};
pub use query::{FactQuery, OrderBy};
pub use store::FactStore;

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_langs::json_descriptor;

    #[test]
    fn pipeline_round_trip_and_query_compose() {
        let pipeline = Pipeline::new(json_descriptor());
        let output = pipeline.run(r#"{"a":1,"a":2}"#).unwrap();

        let duplicates: Vec<_> = FactQuery::new()
            .where_category(PredicateCategory::Editor)
            .execute(&output.facts)
            .collect();
        assert_eq!(duplicates.len(), 1);
    }
}
