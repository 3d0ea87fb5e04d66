//! The language-specific rich token a lexer instance emits, and its
//! down-projection onto the generic [`stratum_core::Token`].

use stratum_core::{Span, Token, TokenFlags, TokenKind};

use crate::language::{LangTag, LanguageTable};

/// A language-specific token: a tagged span plus the same bracket-depth
/// and flag bookkeeping the generic token carries. Every `LangToken` can
/// be down-projected to a generic [`Token`] via [`LangToken::down_project`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LangToken {
    pub span: Span,
    pub tag: LangTag,
    pub bracket_depth: u16,
    pub flags: TokenFlags,
}

impl LangToken {
    pub fn new(span: Span, tag: LangTag, bracket_depth: u16, flags: TokenFlags) -> Self {
        LangToken { span, tag, bracket_depth, flags }
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.flags.contains(TokenFlags::IS_TRIVIA)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.flags.contains(TokenFlags::IS_ERROR)
    }

    /// Down-project to the generic [`Token`] using `table`'s tag→kind map.
    pub fn down_project(&self, table: &LanguageTable) -> Token {
        let kind = if self.flags.contains(TokenFlags::IS_ERROR) {
            TokenKind::Error
        } else {
            (table.generic_kind)(self.tag)
        };
        Token::new(self.span, kind, self.bracket_depth, self.flags)
    }
}
