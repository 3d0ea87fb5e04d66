//! Rowan-based lossless syntax trees, a recursive-descent parser with
//! error recovery, typed ASTs, and a format-preserving reverse emitter
//!.
//!
//! [`syntax_kind`] is the shared token/node vocabulary; [`parser`] turns a
//! token stream into a green tree; [`ast`] wraps the resulting
//! [`syntax_kind::SyntaxNode`]s with typed, per-language accessors;
//! [`emit`] reconstructs source text from a tree losslessly.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod emit;
pub mod parser;
pub mod syntax_kind;

pub use syntax_kind::{StratumLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet};
