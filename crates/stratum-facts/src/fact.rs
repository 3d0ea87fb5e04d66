//! `Fact`: one immutable assertion over a span.

use stratum_core::{Span, Value};

use crate::predicate::{FactId, Predicate};

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    pub id: FactId,
    pub subject: Span,
    pub predicate: Predicate,
    pub object: Option<Value>,
    /// In `[0, 1]`. `1.0` facts are never silently retracted, only
    /// superseded in a later generation; `< 1.0` marks speculation (e.g.
    /// a recovered AST node's facts).
    pub confidence: f32,
    pub generation: u32,
}

impl Fact {
    pub fn is_speculative(&self) -> bool {
        self.confidence < 1.0
    }
}
