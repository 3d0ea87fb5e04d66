//! Parser state machine and low-level operations, shared by every
//! language's recursive-descent grammar (`json` and `zon`).

mod token;
pub mod json;
pub mod zon;

pub use token::{from_lang_tokens, token_text, SynToken};

use std::cell::Cell;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use stratum_core::{Diagnostics, Error, Result, Span};

use crate::syntax_kind::{SyntaxKind, TokenSet};

/// Stable rule IDs for syntactic diagnostics.
pub mod rule_ids {
    pub const UNEXPECTED_TOKEN: &str = "unexpected_token";
    pub const UNMATCHED_BRACKET: &str = "unmatched_bracket";
    pub const DUPLICATE_KEY: &str = "duplicate_key";
    pub const TRAILING_COMMA_NOT_ALLOWED: &str = "trailing_comma_not_allowed";
    pub const DEPTH_EXCEEDED: &str = "depth_exceeded";
    pub const DEEP_NESTING: &str = "deep_nesting";
    pub const LEADING_ZERO: &str = "leading_zero";
}

/// A span of source recovered after a parse error. Confidence is a coarse
/// fixed value rather than a computed one: every recovery wraps exactly
/// one resynchronisation in an `Error` node, so there is no finer signal
/// to derive it from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveredNode {
    pub span: Span,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenDelimiter {
    #[allow(dead_code)]
    pub kind: SyntaxKind,
    pub span: Span,
}

/// Trivia tokens (whitespace, comments) are buffered and flushed as leading
/// trivia when starting a new node. This gives predictable trivia
/// attachment without backtracking.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<SynToken>,
    pos: usize,
    trivia_buffer: Vec<SynToken>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    last_diagnostic_pos: Option<u32>,
    delimiter_stack: Vec<OpenDelimiter>,
    recovered: Vec<RecoveredNode>,
    debug_fuel: Cell<u32>,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    max_errors: Option<u32>,
    max_depth: Option<u32>,
    warn_depth: Option<u32>,
    warned_deep_nesting: bool,
    allow_trailing_commas: bool,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<SynToken>) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            recovered: Vec::new(),
            debug_fuel: Cell::new(256),
            exec_fuel_initial: None,
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            max_errors: None,
            max_depth: None,
            warn_depth: None,
            warned_deep_nesting: false,
            allow_trailing_commas: false,
            fatal_error: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_initial = limit;
        self.exec_fuel_remaining = limit;
        self
    }

    /// `max_depth` from parser config.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    /// `max_errors` from parser config; once reached, further
    /// diagnostics are suppressed but parsing continues (best-effort AST
    /// is still returned).
    pub fn with_max_errors(mut self, limit: Option<u32>) -> Self {
        self.max_errors = limit;
        self
    }

    pub fn with_max_depth(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn with_warn_depth(mut self, limit: Option<u32>) -> Self {
        self.warn_depth = limit;
        self
    }

    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub(crate) fn allow_trailing_commas(&self) -> bool {
        self.allow_trailing_commas
    }

    /// Checks the structural-depth policy at the current nesting level:
    /// hard `max_depth` is Recoverable — the caller degrades
    /// to a flat, unstructured consumption of the remaining container
    /// rather than recursing further; `warn_depth` only emits one
    /// informational diagnostic per parse (S5).
    pub(crate) fn check_depth(&mut self) -> bool {
        if let Some(max) = self.max_depth
            && self.depth() >= max
        {
            self.error(rule_ids::DEPTH_EXCEEDED, "maximum nesting depth exceeded");
            return true;
        }
        if let Some(warn) = self.warn_depth
            && self.depth() >= warn
            && !self.warned_deep_nesting
        {
            let span = self.current_span();
            self.diagnostics
                .info("nesting exceeds the configured warning depth", span)
                .rule(rule_ids::DEEP_NESTING)
                .emit();
            self.warned_deep_nesting = true;
        }
        false
    }

    /// Degrades an over-deep container to a flat token run: bumps every
    /// token up to and including the matching `close`, without building
    /// nested node structure. Used once `check_depth` trips.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut local_depth: u32 = 0;
        while !self.should_stop() {
            let k = self.peek();
            if k == close && local_depth == 0 {
                self.bump();
                return;
            }
            if k == open {
                local_depth += 1;
            } else if k == close {
                local_depth -= 1;
            }
            self.bump();
        }
    }

    pub(crate) fn finish_green(
        mut self,
    ) -> Result<(GreenNode, Diagnostics, Vec<RecoveredNode>, u32)> {
        self.drain_trivia();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        Ok((
            self.builder.finish(),
            self.diagnostics,
            self.recovered,
            exec_fuel_consumed,
        ))
    }

    pub(crate) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    /// Returns `Error` at EOF (acts as sentinel).
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(crate) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| Span::empty_at(self.eof_offset()), |t| t.span)
    }

    pub(crate) fn eof_offset(&self) -> u32 {
        self.source.len() as u32
    }

    /// Source text of the current (not-yet-consumed) token.
    pub(crate) fn current_text(&self) -> &'src str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(crate) fn peek(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.current()
    }

    /// LL(k) lookahead past trivia.
    pub(crate) fn peek_nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        let mut count = 0;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            let kind = self.tokens[pos].kind;
            if !kind.is_trivia() {
                if count == n {
                    return kind;
                }
                count += 1;
            }
            pos += 1;
        }
        SyntaxKind::Error
    }

    pub(crate) fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    pub(crate) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    pub(crate) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    /// Wrap previously-parsed content using a checkpoint (used when the
    /// node kind isn't known until after its first child is parsed, e.g.
    /// ZON's struct-vs-array literal).
    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    /// Like [`bump`](Self::bump), but pushes the token into the tree
    /// tagged as `kind` rather than its own lexer kind. Used for
    /// contextual reclassification the generic lexer can't do on its
    /// own — e.g. a bare ZON field name, which is lexed as a plain
    /// `Identifier` and only becomes a `FieldName` once the parser sees
    /// it in field position.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) {
        assert!(!self.eof(), "bump_as called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(kind.into(), text);
        self.pos += 1;
    }

    pub(crate) fn skip_token(&mut self) {
        assert!(!self.eof(), "skip_token called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume (allows parent recovery).
    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(rule_ids::UNEXPECTED_TOKEN, format!("expected {what}"));
        false
    }

    /// Emit a diagnostic at the current position; repeated diagnostics at
    /// the same position are suppressed (a single malformed token should
    /// not cascade into dozens of redundant errors).
    pub(crate) fn error(&mut self, rule_id: &'static str, message: impl Into<String>) {
        let span = self.current_span();
        if self.last_diagnostic_pos == Some(span.start) {
            return;
        }
        if let Some(max) = self.max_errors
            && self.diagnostics.error_count() as u32 >= max
        {
            return;
        }
        self.last_diagnostic_pos = Some(span.start);
        self.diagnostics.error(message, span).rule(rule_id).emit();
    }

    #[allow(dead_code)]
    pub(crate) fn error_and_bump(&mut self, rule_id: &'static str, message: impl Into<String>) {
        self.error(rule_id, message);
        if !self.eof() {
            let span = self.current_span();
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
            self.recovered.push(RecoveredNode { span, confidence: 0.5 });
        }
    }

    /// Resynchronise by discarding tokens up to (not including) the next
    /// token in `recovery`, wrapping the skipped span in an `Error` node.
    /// Always makes progress: either consumes ≥ 1 token here, or the
    /// caller already is at a sync point and nothing is skipped.
    pub(crate) fn error_recover(&mut self, rule_id: &'static str, message: &str, recovery: TokenSet) {
        if self.at_set(recovery) || self.should_stop() {
            self.error(rule_id, message);
            return;
        }

        let start = self.current_span();
        self.start_node(SyntaxKind::Error);
        self.error(rule_id, message);
        while !self.at_set(recovery) && !self.should_stop() {
            self.bump();
        }
        let end = self.last_non_trivia_end().unwrap_or(start.end);
        self.finish_node();
        self.recovered.push(RecoveredNode {
            span: Span::new(start.start, end),
            confidence: 0.5,
        });
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn push_delimiter(&mut self, kind: SyntaxKind) {
        self.delimiter_stack.push(OpenDelimiter { kind, span: self.current_span() });
    }

    pub(crate) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    pub(crate) fn last_non_trivia_end(&self) -> Option<u32> {
        for i in (0..self.pos).rev() {
            if !self.tokens[i].kind.is_trivia() {
                return Some(self.tokens[i].span.end);
            }
        }
        None
    }
}
