//! The fact-layer predicate taxonomy: six closed categories, one
//! `Predicate` enum.

use stratum_core::{TokenKind, Value};

/// A stable handle to a previously-asserted [`crate::Fact`]. Used by
/// relational predicates (`HasChild`, `DerivedFrom`, ...) to reference
/// one fact from another without borrowing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactId(pub u32);

/// Which of the six taxonomy categories a [`Predicate`] belongs to.
/// `FactStore`'s category index is keyed on this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PredicateCategory {
    Lexical,
    Structural,
    Syntactic,
    Semantic,
    Editor,
    Meta,
}

/// Structural boundary kinds (`is_boundary`). Not an exhaustive grammar
/// taxonomy — just the shapes C7's built-in structural pass emits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryKind {
    ContainerOpen,
    ContainerClose,
    Statement,
}

/// Declarative semantic flags folded into one variant rather than one
/// `Predicate` case apiece (`is_function`, `is_public`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclFlag {
    IsFunction,
    IsPublic,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HighlightKind {
    Keyword,
    String,
    Number,
    Comment,
    Punctuation,
    Property,
}

/// One of the stable diagnostic `rule_id`s, narrowed to the set the
/// Editor category cares about rendering a squiggle for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    Error,
    Warning,
    Info,
    Hint,
}

/// Which pipeline stage derived a fact (`from_layer`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayerKind {
    Lexical,
    Structural,
    Syntactic,
    Semantic,
}

/// The closed predicate set. `Predicate::category` recovers which of the
/// six taxonomy buckets a given variant falls into, used to populate
/// `FactStore`'s category index.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    // --- Lexical ---
    IsToken(TokenKind),
    HasText(String),
    BracketDepth(u16),
    IsOpenDelimiter,
    IsCloseDelimiter,
    IsTrivia,

    // --- Structural ---
    IsBoundary(BoundaryKind),
    IsErrorRegion,
    IsFoldable,
    IndentLevel(u32),

    // --- Syntactic ---
    IsNode(stratum_syntax::SyntaxKind),
    HasChild(FactId),
    HasParent(FactId),
    Precedes(FactId),
    Follows(FactId),
    HasField(String),

    // --- Semantic ---
    BindsSymbol(String),
    ReferencesSymbol(String),
    HasType(String),
    HasValue(Value),
    InScope(String),
    Decl(DeclFlag),

    // --- Editor ---
    HighlightColor(HighlightKind),
    HasDiagnostic(DiagnosticKind),
    IsSelected,
    IsVisible,
    IsDirty,

    // --- Meta ---
    DerivedFrom(FactId),
    Confidence(u32),
    FromLayer(LayerKind),
    IsSpeculative,
}

impl Predicate {
    pub fn category(&self) -> PredicateCategory {
        use Predicate::*;
        match self {
            IsToken(_) | HasText(_) | BracketDepth(_) | IsOpenDelimiter | IsCloseDelimiter
            | IsTrivia => PredicateCategory::Lexical,
            IsBoundary(_) | IsErrorRegion | IsFoldable | IndentLevel(_) => {
                PredicateCategory::Structural
            }
            IsNode(_) | HasChild(_) | HasParent(_) | Precedes(_) | Follows(_) | HasField(_) => {
                PredicateCategory::Syntactic
            }
            BindsSymbol(_) | ReferencesSymbol(_) | HasType(_) | HasValue(_) | InScope(_)
            | Decl(_) => PredicateCategory::Semantic,
            HighlightColor(_) | HasDiagnostic(_) | IsSelected | IsVisible | IsDirty => {
                PredicateCategory::Editor
            }
            DerivedFrom(_) | Confidence(_) | FromLayer(_) | IsSpeculative => {
                PredicateCategory::Meta
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_follows_taxonomy() {
        assert_eq!(Predicate::IsTrivia.category(), PredicateCategory::Lexical);
        assert_eq!(Predicate::IsFoldable.category(), PredicateCategory::Structural);
        assert_eq!(
            Predicate::HasField("name".into()).category(),
            PredicateCategory::Syntactic
        );
        assert_eq!(Predicate::IsSpeculative.category(), PredicateCategory::Meta);
    }
}
