//! `FactStore`: an append-only fact collection indexed by predicate
//! category and by span, using `IndexMap` for deterministic iteration
//! order.
//!
//! Facts are never mutated or removed in place (invariant 6): a
//! reparse calls [`FactStore::advance_generation`] and adds new facts:
//! the old ones remain queryable by generation for diffing.

use indexmap::IndexMap;
use stratum_core::{Span, Value};

use crate::fact::Fact;
use crate::predicate::{FactId, Predicate, PredicateCategory};

#[derive(Debug, Default)]
pub struct FactStore {
    facts: Vec<Fact>,
    by_category: IndexMap<PredicateCategory, Vec<FactId>>,
    /// Sorted by `(span.start, span.end)`, mirroring `Span`'s own `Ord`.
    /// A sorted list rather than an interval tree — stratum's fact
    /// volumes per parse don't warrant the extra structure.
    spatial: Vec<(Span, FactId)>,
    generation: u32,
}

impl FactStore {
    pub fn new() -> Self {
        FactStore::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advances the store to a new generation, returning it. Facts added
    /// afterwards are stamped with the new generation; facts from earlier
    /// generations remain in the store and queryable.
    pub fn advance_generation(&mut self) -> u32 {
        self.generation += 1;
        self.generation
    }

    /// Appends a new fact stamped with the store's current generation.
    /// Returns the assigned [`FactId`].
    pub fn add(&mut self, subject: Span, predicate: Predicate, object: Option<Value>, confidence: f32) -> FactId {
        let id = FactId(self.facts.len() as u32);
        let category = predicate.category();
        self.facts.push(Fact { id, subject, predicate, object, confidence, generation: self.generation });

        self.by_category.entry(category).or_default().push(id);

        let pos = self.spatial.partition_point(|(span, _)| *span < subject);
        self.spatial.insert(pos, (subject, id));

        id
    }

    pub fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn by_category(&self, category: PredicateCategory) -> impl Iterator<Item = &Fact> {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.get(*id))
    }

    /// All facts whose `subject` overlaps `span`, in subject order.
    pub fn find_overlapping(&self, span: Span) -> impl Iterator<Item = &Fact> {
        // No fact starting at or after `span.end` can overlap a half-open
        // span, so the candidate window ends at the first entry whose
        // start is >= span.end; everything before still needs an
        // overlap check since earlier facts can extend past `span.start`.
        let window_end = self.spatial.partition_point(|(s, _)| s.start < span.end);
        self.spatial[..window_end]
            .iter()
            .filter(move |(s, _)| s.overlaps(span))
            .filter_map(move |(_, id)| self.get(*id))
    }

    /// Facts visible as of `generation` (inclusive) — i.e. not yet
    /// superseded by a later reparse.
    pub fn as_of(&self, generation: u32) -> impl Iterator<Item = &Fact> {
        self.facts.iter().filter(move |f| f.generation <= generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: u32, e: u32) -> Span {
        Span::new(s, e)
    }

    #[test]
    fn add_assigns_sequential_ids_and_current_generation() {
        let mut store = FactStore::new();
        let a = store.add(span(0, 3), Predicate::IsTrivia, None, 1.0);
        store.advance_generation();
        let b = store.add(span(3, 6), Predicate::IsTrivia, None, 1.0);
        assert_eq!(a, FactId(0));
        assert_eq!(b, FactId(1));
        assert_eq!(store.get(a).unwrap().generation, 0);
        assert_eq!(store.get(b).unwrap().generation, 1);
    }

    #[test]
    fn category_index_groups_by_taxonomy_bucket() {
        let mut store = FactStore::new();
        store.add(span(0, 1), Predicate::IsTrivia, None, 1.0);
        store.add(span(1, 2), Predicate::IsFoldable, None, 1.0);
        store.add(span(2, 3), Predicate::IsOpenDelimiter, None, 1.0);

        let lexical: Vec<_> = store.by_category(PredicateCategory::Lexical).collect();
        assert_eq!(lexical.len(), 2);
        let structural: Vec<_> = store.by_category(PredicateCategory::Structural).collect();
        assert_eq!(structural.len(), 1);
    }

    #[test]
    fn find_overlapping_is_span_accurate() {
        let mut store = FactStore::new();
        store.add(span(0, 5), Predicate::IsTrivia, None, 1.0);
        store.add(span(10, 15), Predicate::IsTrivia, None, 1.0);
        store.add(span(4, 11), Predicate::IsTrivia, None, 1.0);

        let hits: Vec<_> = store.find_overlapping(span(5, 10)).map(|f| f.subject).collect();
        assert_eq!(hits, vec![span(4, 11)]);
    }

    #[test]
    fn generation_never_decreases_and_as_of_filters() {
        let mut store = FactStore::new();
        store.add(span(0, 1), Predicate::IsTrivia, None, 1.0);
        store.advance_generation();
        store.add(span(1, 2), Predicate::IsTrivia, None, 1.0);
        assert_eq!(store.as_of(0).count(), 1);
        assert_eq!(store.as_of(1).count(), 2);
        assert!(store.generation() >= 0);
    }
}
