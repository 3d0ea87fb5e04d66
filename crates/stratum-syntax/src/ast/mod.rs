//! Typed AST wrappers over the CST.
//!
//! Each language owns a complete, closed node algebra; casts are infallible
//! for a correctly-kinded node — validation happens in the parser, not here.

pub mod json;
pub mod zon;

/// Generates a newtype wrapper around `SyntaxNode` with `cast`/`syntax`/`span`.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn syntax(&self) -> &SyntaxNode {
                &self.0
            }

            /// The node's span.
            pub fn span(&self) -> stratum_core::Span {
                let range = self.0.text_range();
                stratum_core::Span::new(range.start().into(), range.end().into())
            }
        }
    };
}

pub(crate) use ast_node;
