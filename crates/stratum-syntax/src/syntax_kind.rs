//! Syntax kinds shared by every language's syntax tree.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node
//! kinds (from the parser). Tokens come first, then nodes, then a
//! `__LAST` sentinel — `#[repr(u16)]` lets `kind_from_raw` safely
//! transmute a bounds-checked raw value back to this enum. JSON and ZON
//! each use the subset of variants their grammar needs; a single kind
//! space keeps the rowan `Language` impl and `TokenSet` machinery shared
//! rather than duplicated per language.

use rowan::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxKind {
    // --- Tokens shared across JSON/ZON ---
    BraceOpen = 0,
    BraceClose,
    BracketOpen,
    BracketClose,
    ParenOpen,
    ParenClose,
    Colon,
    Equals,
    Dot,
    Comma,
    StringLiteral,
    NumberLiteral,
    KwTrue,
    KwFalse,
    KwNull,
    KwUndefined,
    KwImport,
    Identifier,
    FieldName,
    MultilineStringLiteral,
    Whitespace,
    Newline,
    LineComment,
    BlockComment,
    Eof,
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Object,
    Array,
    Member,
    StringNode,
    NumberNode,
    BooleanNode,
    NullNode,
    Struct,
    Field,
    UndefinedNode,

    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for rowan's tree types — stratum has one shared kind
/// space, so one `Language` impl serves every grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StratumLang {}

impl Language for StratumLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: bounds-checked above; SyntaxKind is repr(u16).
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<StratumLang>;
pub type SyntaxToken = rowan::SyntaxToken<StratumLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) FIRST/recovery-set membership.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets shared by the JSON and ZON grammars.
pub mod token_sets {
    use super::*;

    pub const VALUE_FIRST: TokenSet = TokenSet::new(&[
        BraceOpen,
        BracketOpen,
        StringLiteral,
        NumberLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        KwUndefined,
        Dot,
        Identifier,
    ]);

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment]);

    pub const OBJECT_RECOVERY: TokenSet = TokenSet::new(&[BraceClose, Comma]);
    pub const ARRAY_RECOVERY: TokenSet = TokenSet::new(&[BracketClose, Comma]);
    pub const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[Comma, BraceClose]);
}
