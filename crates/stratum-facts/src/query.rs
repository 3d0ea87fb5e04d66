//! `FactQuery`: a small relational query builder over a [`FactStore`],
//! using a configure-then-`execute()` two-phase idiom.

use stratum_core::Span;

use crate::fact::Fact;
use crate::predicate::PredicateCategory;
use crate::store::FactStore;

/// A `WHERE` clause: which field of a fact to compare, and how.
enum Clause {
    Category(PredicateCategory),
    SpanOverlaps(Span),
    MinConfidence(f32),
    Generation(u32),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Subject,
    Generation,
}

/// Builder for a lazy query over a store's facts. Clauses are ANDed;
/// `execute` returns a streaming (non-collected) cursor so callers can
/// short-circuit with `.take`/`.find` without materialising every match.
#[derive(Default)]
pub struct FactQuery {
    clauses: Vec<Clause>,
    order_by: Option<OrderBy>,
}

impl FactQuery {
    pub fn new() -> Self {
        FactQuery::default()
    }

    pub fn where_category(mut self, category: PredicateCategory) -> Self {
        self.clauses.push(Clause::Category(category));
        self
    }

    pub fn where_span_overlaps(mut self, span: Span) -> Self {
        self.clauses.push(Clause::SpanOverlaps(span));
        self
    }

    pub fn where_min_confidence(mut self, confidence: f32) -> Self {
        self.clauses.push(Clause::MinConfidence(confidence));
        self
    }

    pub fn where_generation(mut self, generation: u32) -> Self {
        self.clauses.push(Clause::Generation(generation));
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    fn matches(clauses: &[Clause], fact: &Fact) -> bool {
        clauses.iter().all(|clause| match clause {
            Clause::Category(cat) => fact.predicate.category() == *cat,
            Clause::SpanOverlaps(span) => fact.subject.overlaps(*span),
            Clause::MinConfidence(min) => fact.confidence >= *min,
            Clause::Generation(g) => fact.generation <= *g,
        })
    }

    /// Runs the query against `store`. Picks the store's category or
    /// spatial index as the seed set when the query names one, so a
    /// narrow query does not scan every fact.
    pub fn execute<'a>(self, store: &'a FactStore) -> Box<dyn Iterator<Item = &'a Fact> + 'a> {
        let seed: Box<dyn Iterator<Item = &'a Fact> + 'a> = {
            let category_clause = self.clauses.iter().find_map(|c| match c {
                Clause::Category(cat) => Some(*cat),
                _ => None,
            });
            let span_clause = self.clauses.iter().find_map(|c| match c {
                Clause::SpanOverlaps(span) => Some(*span),
                _ => None,
            });
            match (category_clause, span_clause) {
                (_, Some(span)) => Box::new(store.find_overlapping(span)),
                (Some(cat), None) => Box::new(store.by_category(cat)),
                (None, None) => Box::new(store.iter()),
            }
        };

        let clauses = self.clauses;
        let mut matched: Vec<&'a Fact> = seed.filter(move |f| Self::matches(&clauses, f)).collect();

        match self.order_by {
            Some(OrderBy::Subject) => matched.sort_by_key(|f| f.subject),
            Some(OrderBy::Generation) => matched.sort_by_key(|f| f.generation),
            None => {}
        }

        Box::new(matched.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;

    fn span(s: u32, e: u32) -> Span {
        Span::new(s, e)
    }

    #[test]
    fn category_and_span_clauses_narrow_results() {
        let mut store = FactStore::new();
        store.add(span(0, 3), Predicate::IsTrivia, None, 1.0);
        store.add(span(3, 6), Predicate::IsFoldable, None, 1.0);
        store.add(span(6, 9), Predicate::IsTrivia, None, 0.5);

        let results: Vec<_> = FactQuery::new()
            .where_category(PredicateCategory::Lexical)
            .execute(&store)
            .collect();
        assert_eq!(results.len(), 2);

        let overlap: Vec<_> = FactQuery::new().where_span_overlaps(span(4, 5)).execute(&store).collect();
        assert_eq!(overlap.len(), 1);
        assert_eq!(overlap[0].subject, span(3, 6));
    }

    #[test]
    fn min_confidence_filters_speculative_facts() {
        let mut store = FactStore::new();
        store.add(span(0, 1), Predicate::IsTrivia, None, 1.0);
        store.add(span(1, 2), Predicate::IsTrivia, None, 0.4);

        let results: Vec<_> = FactQuery::new().where_min_confidence(1.0).execute(&store).collect();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn order_by_subject_sorts_ascending() {
        let mut store = FactStore::new();
        store.add(span(5, 6), Predicate::IsTrivia, None, 1.0);
        store.add(span(0, 1), Predicate::IsTrivia, None, 1.0);

        let results: Vec<_> = FactQuery::new().order_by(OrderBy::Subject).execute(&store).collect();
        assert_eq!(results[0].subject, span(0, 1));
        assert_eq!(results[1].subject, span(5, 6));
    }
}
