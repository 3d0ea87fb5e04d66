//! `Pipeline`: the bytes → tokens → AST → facts composition, plus
//! `round_trip` (invariant 2).

use stratum_core::{Diagnostics, Span};
use stratum_langs::{LanguageDescriptor, ParsedDocument, ParserOptions};
use stratum_lexer::LexerConfig;
use stratum_syntax::parser::RecoveredNode;
use stratum_syntax::SyntaxNode;

use crate::pass::{run_passes, AnalysisPass, PassContext, PipelineError};
use crate::passes::default_passes;
use crate::store::FactStore;

/// Stage identity for a pipeline failure: every failure surfaces with
/// stage identity, source span, and a human-readable message. Only the
/// fatal class reaches here — recoverable issues stay in
/// [`PipelineOutput::diagnostics`].
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("{stage} stage failed at {span:?}: {message}")]
    Fatal { stage: &'static str, span: Option<Span>, message: String },
    #[error("analysis stage failed: {0}")]
    Analysis(#[from] PipelineError),
}

pub struct PipelineOutput {
    pub root: SyntaxNode,
    pub diagnostics: Diagnostics,
    pub recovered: Vec<RecoveredNode>,
    pub exec_fuel_consumed: u32,
    pub facts: FactStore,
}

/// Drives one language's descriptor through every stage. Owns its own
/// `LexerConfig`/[`ParserOptions`] and (optionally) a custom analysis
/// pass set; `Pipeline::new` installs [`default_passes`].
pub struct Pipeline {
    descriptor: LanguageDescriptor,
    lexer_config: LexerConfig,
    parser_options: ParserOptions,
    passes: Vec<Box<dyn AnalysisPass>>,
}

impl Pipeline {
    pub fn new(descriptor: LanguageDescriptor) -> Self {
        Pipeline {
            descriptor,
            lexer_config: LexerConfig::default(),
            parser_options: ParserOptions::default(),
            passes: default_passes(),
        }
    }

    pub fn with_lexer_config(mut self, config: LexerConfig) -> Self {
        self.lexer_config = config;
        self
    }

    pub fn with_parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = options;
        self
    }

    pub fn with_passes(mut self, passes: Vec<Box<dyn AnalysisPass>>) -> Self {
        self.passes = passes;
        self
    }

    fn parse_document(&self, source: &str) -> Result<(ParsedDocument, Diagnostics), StageError> {
        let (tokens, lex_diagnostics) = stratum_lexer::lex_all(self.descriptor.table, &self.lexer_config, source.as_bytes());

        let doc = self
            .descriptor
            .parse(source, tokens, self.parser_options)
            .map_err(|e| StageError::Fatal { stage: "syntactic", span: None, message: e.to_string() })?;

        Ok((doc, lex_diagnostics))
    }

    /// Runs bytes → tokens → AST → facts, returning the best-effort
    /// result plus the combined diagnostic list from every stage.
    pub fn run(&self, source: &str) -> Result<PipelineOutput, StageError> {
        let (doc, lex_diagnostics) = self.parse_document(source)?;

        let mut diagnostics = lex_diagnostics;
        diagnostics.extend(doc.diagnostics);

        let mut facts = FactStore::new();
        let ctx = PassContext { root: &doc.root, source };
        run_passes(&self.passes, &ctx, &mut facts)?;

        Ok(PipelineOutput {
            root: doc.root,
            diagnostics,
            recovered: doc.recovered,
            exec_fuel_consumed: doc.exec_fuel_consumed,
            facts,
        })
    }

    /// Exercises invariant 2: `parse(emit(parse(s))) ≡ parse(s)`. Returns
    /// `true` (and the reconstructed source) when the AST shapes agree,
    /// ignoring trivia, after one parse → emit → parse round trip.
    pub fn round_trip(&self, source: &str) -> Result<RoundTrip, StageError> {
        let (first, _) = self.parse_document(source)?;
        let emitted = stratum_syntax::emit::emit(&first.root);

        let (second, _) = self.parse_document(&emitted)?;
        let matches = structurally_equal(&first.root, &second.root);

        Ok(RoundTrip { emitted, matches })
    }
}

pub struct RoundTrip {
    pub emitted: String,
    pub matches: bool,
}

/// Structural equality ignoring trivia: same shape of non-trivia node
/// and token kinds, same token texts.
fn structurally_equal(a: &SyntaxNode, b: &SyntaxNode) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    let a_sig: Vec<_> = a
        .descendants_with_tokens()
        .filter(|e| !e.kind().is_trivia())
        .map(|e| (e.kind(), e.as_token().map(|t| t.text().to_string())))
        .collect();
    let b_sig: Vec<_> = b
        .descendants_with_tokens()
        .filter(|e| !e.kind().is_trivia())
        .map(|e| (e.kind(), e.as_token().map(|t| t.text().to_string())))
        .collect();
    a_sig == b_sig
}
