//! `LanguageDescriptor`: the static bundle of tables that parameterises
//! the generic streaming lexer and parser for one concrete language.

use stratum_core::{Diagnostics, Result};
use stratum_lexer::{LangTag, LanguageTable};
use stratum_syntax::parser::{from_lang_tokens, json, zon, RecoveredNode};
use stratum_syntax::SyntaxKind;

use crate::{json as json_table, zon as zon_table};

/// Which built-in grammar a [`LanguageDescriptor`] drives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LanguageId {
    Json,
    Zon,
}

impl LanguageId {
    pub fn name(self) -> &'static str {
        match self {
            LanguageId::Json => "json",
            LanguageId::Zon => "zon",
        }
    }
}

/// Parser-level knobs shared across languages ( `ParserConfig`:
/// `error_recovery_enabled` is implicit — recovery is always on; every
/// other field enumerated there has a home here).
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    pub allow_trailing_commas: bool,
    pub max_depth: Option<u32>,
    pub warn_depth: Option<u32>,
    pub max_errors: Option<u32>,
    pub recursion_fuel: Option<u32>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            allow_trailing_commas: false,
            max_depth: Some(256),
            warn_depth: Some(64),
            max_errors: None,
            recursion_fuel: Some(4096),
        }
    }
}

/// A parsed document, down-projected to the shared [`SyntaxNode`] so that
/// C7's fact-generation passes can walk it without per-language dispatch —
/// JSON's `Object`/`Array`/`Member` and ZON's `Struct`/`Field` are simply
/// different [`SyntaxKind`]s in the one shared kind space (`stratum-syntax`).
pub struct ParsedDocument {
    pub root: stratum_syntax::SyntaxNode,
    pub diagnostics: Diagnostics,
    pub recovered: Vec<RecoveredNode>,
    pub exec_fuel_consumed: u32,
}

/// Bundles a language's lexical table with its grammar entry point and
/// tag-to-`SyntaxKind` projection.
pub struct LanguageDescriptor {
    pub id: LanguageId,
    pub table: &'static LanguageTable,
    pub to_syntax_kind: fn(LangTag) -> SyntaxKind,
}

impl LanguageDescriptor {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Parses an already-lexed token stream into a [`ParsedDocument`].
    /// Callers typically get `tokens` from [`stratum_lexer::lex_all`] (or a
    /// [`stratum_lexer::StreamingLexer`] run to completion) against
    /// [`Self::table`].
    pub fn parse(
        &self,
        source: &str,
        tokens: Vec<stratum_lexer::LangToken>,
        options: ParserOptions,
    ) -> Result<ParsedDocument> {
        let syn_tokens = from_lang_tokens(&tokens, self.to_syntax_kind);
        match self.id {
            LanguageId::Json => {
                let config = json::JsonParserConfig {
                    allow_trailing_commas: options.allow_trailing_commas,
                    max_depth: options.max_depth,
                    warn_depth: options.warn_depth,
                    max_errors: options.max_errors,
                    recursion_fuel: options.recursion_fuel,
                };
                let result = json::parse(source, syn_tokens, config)?;
                Ok(ParsedDocument {
                    root: result.root.syntax().clone(),
                    diagnostics: result.diagnostics,
                    recovered: result.recovered,
                    exec_fuel_consumed: result.exec_fuel_consumed,
                })
            }
            LanguageId::Zon => {
                let config = zon::ZonParserConfig {
                    allow_trailing_commas: options.allow_trailing_commas,
                    max_depth: options.max_depth,
                    warn_depth: options.warn_depth,
                    max_errors: options.max_errors,
                    recursion_fuel: options.recursion_fuel,
                };
                let result = zon::parse(source, syn_tokens, config)?;
                Ok(ParsedDocument {
                    root: result.root.syntax().clone(),
                    diagnostics: result.diagnostics,
                    recovered: result.recovered,
                    exec_fuel_consumed: result.exec_fuel_consumed,
                })
            }
        }
    }
}

pub fn json_descriptor() -> LanguageDescriptor {
    LanguageDescriptor { id: LanguageId::Json, table: json_table::table(), to_syntax_kind: json_table::to_syntax_kind }
}

pub fn zon_descriptor() -> LanguageDescriptor {
    LanguageDescriptor { id: LanguageId::Zon, table: zon_table::table(), to_syntax_kind: zon_table::to_syntax_kind }
}
