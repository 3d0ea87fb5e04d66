//! The parser's view of a token: a syntax kind plus a span, with text
//! sliced from source lazily rather than stored (grounded on the
//! teacher's zero-copy `Token`/`token_text` split).

use stratum_core::Span;
use stratum_lexer::{LangTag, LangToken};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynToken {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl SynToken {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        SynToken { kind, span }
    }
}

/// O(1) slice into source; never allocates.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &SynToken) -> &'s str {
    &source[token.span.start as usize..token.span.end as usize]
}

/// Down-projects a lexed token stream into the parser's token view, using
/// `project` to turn each language-specific tag into a shared [`SyntaxKind`]
/// (for stratum's languages this is `LangTag(SyntaxKind::X as u16)`, so
/// `project` is just a bounds-checked transmute — see `stratum-langs`).
pub fn from_lang_tokens(
    tokens: &[LangToken],
    project: impl Fn(LangTag) -> SyntaxKind,
) -> Vec<SynToken> {
    tokens
        .iter()
        .map(|t| SynToken::new(project(t.tag), t.span))
        .collect()
}
