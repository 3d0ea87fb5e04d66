//! Generic token data model shared across every language.

use crate::span::Span;

/// The finite tag set a generic [`Token`] is drawn from. Language-specific
/// lexers emit a richer tagged union and down-project onto this set for
/// cross-cutting consumers (the bracket tracker, generic formatters, etc).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    NullLiteral,
    DelimiterOpen,
    DelimiterClose,
    Whitespace,
    Comment,
    Newline,
    Eof,
    Unknown,
    Error,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment | TokenKind::Newline)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral
                | TokenKind::NumberLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        )
    }
}

/// Per-token flags, a hand-rolled `u8` bitset in the same
/// style as the syntax layer's `TokenSet` — small enough that a crate
/// dependency would be overkill.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenFlags(u8);

impl TokenFlags {
    pub const IS_OPEN_DELIMITER: TokenFlags = TokenFlags(1 << 0);
    pub const IS_CLOSE_DELIMITER: TokenFlags = TokenFlags(1 << 1);
    pub const IS_TRIVIA: TokenFlags = TokenFlags(1 << 2);
    pub const IS_ERROR: TokenFlags = TokenFlags(1 << 3);
    /// Synthetic token inserted by parser error recovery.
    pub const IS_INSERTED: TokenFlags = TokenFlags(1 << 4);
    pub const IS_END_OF_LINE: TokenFlags = TokenFlags(1 << 5);

    #[inline]
    pub const fn empty() -> Self {
        TokenFlags(0)
    }

    #[inline]
    pub const fn contains(self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: TokenFlags) -> Self {
        TokenFlags(self.0 | other.0)
    }

    #[inline]
    pub fn insert(&mut self, other: TokenFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for TokenFlags {
    type Output = TokenFlags;
    fn bitor(self, rhs: TokenFlags) -> TokenFlags {
        self.union(rhs)
    }
}

/// A generic token: `{ span, kind, bracket_depth, flags }`.
///
/// `bracket_depth` reflects the nesting level *before* an opening delimiter
/// and *after* a closing one; trivia tokens carry depth `0` for stream
/// consumers that skip trivia entirely.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
    pub bracket_depth: u16,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(span: Span, kind: TokenKind, bracket_depth: u16, flags: TokenFlags) -> Self {
        Token { span, kind, bracket_depth, flags }
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.flags.contains(TokenFlags::IS_TRIVIA)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.flags.contains(TokenFlags::IS_ERROR)
    }

    #[inline]
    pub fn is_inserted(&self) -> bool {
        self.flags.contains(TokenFlags::IS_INSERTED)
    }

    /// `bracketDelta` : `-1` for a closer, `+1` for an
    /// opener, `0` otherwise.
    pub fn bracket_delta(&self) -> i8 {
        if self.flags.contains(TokenFlags::IS_OPEN_DELIMITER) {
            1
        } else if self.flags.contains(TokenFlags::IS_CLOSE_DELIMITER) {
            -1
        } else {
            0
        }
    }

    /// Whether `self` could plausibly close something `opener` opened —
    /// i.e. both are delimiters of the appropriate directions. Precise
    /// bracket-kind pairing (e.g. `{` vs `(`) is a language concern decided
    /// by the lexer's delimiter table; this only checks direction.
    pub fn is_matching_pair(&self, opener: &Token) -> bool {
        opener.flags.contains(TokenFlags::IS_OPEN_DELIMITER)
            && self.flags.contains(TokenFlags::IS_CLOSE_DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, flags: TokenFlags) -> Token {
        Token::new(Span::new(0, 1), kind, 0, flags)
    }

    #[test]
    fn bracket_delta_reflects_direction() {
        let open = tok(TokenKind::DelimiterOpen, TokenFlags::IS_OPEN_DELIMITER);
        let close = tok(TokenKind::DelimiterClose, TokenFlags::IS_CLOSE_DELIMITER);
        let plain = tok(TokenKind::Identifier, TokenFlags::empty());
        assert_eq!(open.bracket_delta(), 1);
        assert_eq!(close.bracket_delta(), -1);
        assert_eq!(plain.bracket_delta(), 0);
    }

    #[test]
    fn matching_pair_checks_direction_only() {
        let open = tok(TokenKind::DelimiterOpen, TokenFlags::IS_OPEN_DELIMITER);
        let close = tok(TokenKind::DelimiterClose, TokenFlags::IS_CLOSE_DELIMITER);
        assert!(close.is_matching_pair(&open));
        assert!(!open.is_matching_pair(&close));
    }

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
    }
}
