//! Character classification, the chunk-safe streaming lexer, and the
//! bracket tracker (C3–C5).
//!
//! [`classifier`] and [`escape`] are zero-allocation building blocks;
//! [`lexer`] is the stateful consumer of them; [`bracket_tracker`] is kept
//! in lock-step alongside it by the caller (or, for the common case, by
//! [`StreamingLexer`] itself).

pub mod bracket_tracker;
pub mod classifier;
pub mod config;
pub mod escape;
pub mod lang_token;
pub mod language;
pub mod lexer;
pub mod state;

pub use bracket_tracker::{BracketInfo, BracketTracker, DelimiterKind};
pub use config::{LexerConfig, UnicodePolicy};
pub use lang_token::LangToken;
pub use language::{CoreTags, DelimiterEntry, LangTag, LanguageTable};
pub use lexer::{lex_all, StreamingLexer};
pub use state::{Context, LexerState};

/// A cursor over an already-lexed token sequence — the "bulk adapter" side
/// of iterator contract (the streaming side is
/// [`StreamingLexer::process_chunk`]/[`finish`](StreamingLexer::finish)).
pub struct TokenCursor {
    tokens: Vec<LangToken>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<LangToken>) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    pub fn next(&mut self) -> Option<LangToken> {
        let tok = self.tokens.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub fn peek(&self) -> Option<LangToken> {
        self.tokens.get(self.pos).copied()
    }

    pub fn peek_nth(&self, n: usize) -> Option<LangToken> {
        self.tokens.get(self.pos + n).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::Span;

    #[test]
    fn cursor_advances_in_order() {
        let tokens = vec![
            LangToken::new(Span::new(0, 1), LangTag(1), 0, Default::default()),
            LangToken::new(Span::new(1, 2), LangTag(2), 0, Default::default()),
        ];
        let mut cursor = TokenCursor::new(tokens);
        assert_eq!(cursor.peek().map(|t| t.tag), Some(LangTag(1)));
        assert_eq!(cursor.next().map(|t| t.tag), Some(LangTag(1)));
        assert_eq!(cursor.peek_nth(0).map(|t| t.tag), Some(LangTag(2)));
        assert_eq!(cursor.next().map(|t| t.tag), Some(LangTag(2)));
        assert_eq!(cursor.next(), None);
    }
}
