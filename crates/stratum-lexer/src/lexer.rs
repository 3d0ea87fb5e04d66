//! The chunk-safe streaming lexer state machine (C4, ) — the
//! central component of this crate. One `StreamingLexer` is reused across
//! languages by swapping its [`LanguageTable`].

use stratum_core::diagnostics::Diagnostics;
use stratum_core::{Span, TokenFlags, TokenKind};

use crate::bracket_tracker::BracketTracker;
use crate::classifier::{
    consume_identifier, consume_multi_line_comment, consume_number, consume_single_line_comment,
    consume_string, is_digit, is_identifier_start, is_whitespace, scan_string_body, skip_whitespace,
    StringIssue, StringIssueKind,
};
use crate::config::{LexerConfig, UnicodePolicy};
use crate::lang_token::LangToken;
use crate::language::{LangTag, LanguageTable};
use crate::state::{Context, LexerState};

/// Outcome of attempting to lex one token from the current buffer.
enum Step {
    /// A complete token was produced, consuming `consumed` bytes.
    Token(LangToken, usize),
    /// The buffer ended mid-lexeme; more input is needed before this can
    /// be resolved. Nothing is consumed.
    NeedMoreData,
    /// The buffer is empty and this is the final chunk.
    Eof,
}

/// Chunk-safe lexer: `process_chunk` may be called repeatedly with
/// arbitrarily small slices; the concatenation of all emitted tokens
/// equals the token stream produced by a single call on the full input.
pub struct StreamingLexer<'t> {
    table: &'t LanguageTable,
    config: LexerConfig,
    state: LexerState,
    /// Bytes seen but not yet resolved into emitted tokens.
    buffer: Vec<u8>,
    brackets: BracketTracker,
    diagnostics: Diagnostics,
    finished: bool,
}

impl<'t> StreamingLexer<'t> {
    pub fn new(table: &'t LanguageTable, config: LexerConfig) -> Self {
        let ring_hint = config.ring_buffer_size;
        StreamingLexer {
            table,
            config,
            state: LexerState::new(),
            buffer: Vec::with_capacity(ring_hint.min(1 << 20)),
            brackets: BracketTracker::new(),
            diagnostics: Diagnostics::new(),
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn bracket_tracker(&self) -> &BracketTracker {
        &self.brackets
    }

    /// Feed the next chunk of input, returning all tokens that could be
    /// conclusively resolved. Any trailing partial lexeme is retained
    /// internally and completed by a later `process_chunk` or by
    /// [`finish`](Self::finish).
    pub fn process_chunk(&mut self, chunk: &[u8]) -> Vec<LangToken> {
        assert!(!self.finished, "process_chunk called after finish()");
        self.buffer.extend_from_slice(chunk);
        self.drain_complete_tokens(false)
    }

    /// Signal that no further chunks are coming. Forces resolution of any
    /// pending partial lexeme and appends the final EOF token.
    pub fn finish(&mut self) -> Vec<LangToken> {
        assert!(!self.finished, "finish() called twice");
        let mut tokens = self.drain_complete_tokens(true);
        let eof_span = Span::empty_at(self.state.byte_offset);
        tokens.push(LangToken::new(eof_span, self.table.core.eof, self.state.bracket_depth, TokenFlags::empty()));
        self.finished = true;
        tokens
    }

    fn drain_complete_tokens(&mut self, at_eof: bool) -> Vec<LangToken> {
        let mut out = Vec::new();
        loop {
            match self.lex_step(at_eof) {
                Step::Token(tok, consumed) => {
                    self.consume(consumed);
                    out.push(tok);
                }
                Step::NeedMoreData | Step::Eof => break,
            }
        }
        out
    }

    /// Advance state/byte_offset by `n` bytes and drop them from the
    /// front of `buffer`.
    fn consume(&mut self, n: usize) {
        let head: Vec<u8> = self.buffer[..n].to_vec();
        self.state.advance_for_bytes(&head);
        self.buffer.drain(..n);
    }

    fn lex_step(&mut self, at_eof: bool) -> Step {
        if self.buffer.is_empty() {
            return if at_eof { Step::Eof } else { Step::NeedMoreData };
        }
        let bytes = &self.buffer;
        let b0 = bytes[0];
        let start = self.state.byte_offset;

        if is_whitespace(b0) {
            let end = skip_whitespace(bytes, 0);
            if end == bytes.len() && !at_eof {
                return Step::NeedMoreData;
            }
            let has_nl = bytes[..end].contains(&b'\n');
            let mut flags = TokenFlags::IS_TRIVIA;
            if has_nl {
                flags = flags.union(TokenFlags::IS_END_OF_LINE);
            }
            return Step::Token(self.trivia_token(self.table.core.whitespace, start, end, flags), end);
        }

        if self.config.allow_comments {
            if let Some(prefix) = self.table.line_comment {
                if bytes.starts_with(prefix.as_bytes()) {
                    let info = consume_single_line_comment(bytes, prefix.len());
                    if info.end == bytes.len() && !at_eof {
                        return Step::NeedMoreData;
                    }
                    return Step::Token(
                        self.trivia_token(self.table.core.comment, start, info.end, TokenFlags::IS_TRIVIA),
                        info.end,
                    );
                }
            }
            if let Some((open, close)) = self.table.block_comment {
                if bytes.starts_with(open.as_bytes()) {
                    let info = consume_multi_line_comment(bytes, open.len(), close.as_bytes());
                    if !info.terminated && !at_eof {
                        return Step::NeedMoreData;
                    }
                    if !info.terminated {
                        self.diagnostics
                            .error("unterminated block comment", Span::new(start, start + info.end as u32))
                            .rule("unterminated_comment")
                            .emit();
                    }
                    self.state.line += info.newlines;
                    return Step::Token(
                        self.trivia_token(self.table.core.comment, start, info.end, TokenFlags::IS_TRIVIA),
                        info.end,
                    );
                }
            }
        }

        if let Some(entry) = self.table.find_delimiter_open(b0) {
            let depth_before = self.state.bracket_depth;
            self.brackets.enter(start, entry.bracket_kind);
            self.state.push_container(entry);
            self.state.bracket_depth = self.state.bracket_depth.saturating_add(1);
            if self.state.depth_exceeded {
                self.diagnostics
                    .warning("maximum bracket nesting depth exceeded", Span::new(start, start + 1))
                    .rule("depth_exceeded")
                    .emit();
                self.state.depth_exceeded = false;
            }
            let tok = LangToken::new(
                Span::new(start, start + 1),
                entry.open_tag,
                depth_before,
                TokenFlags::IS_OPEN_DELIMITER,
            );
            return Step::Token(tok, 1);
        }

        if let Some(entry) = self.table.find_delimiter_close(b0) {
            self.brackets.exit(start, entry.bracket_kind);
            let opener = self.state.pop_container();
            if opener.is_none() {
                self.diagnostics
                    .error("unmatched closing bracket", Span::new(start, start + 1))
                    .rule("unmatched_bracket")
                    .emit();
            }
            self.state.bracket_depth = self.state.bracket_depth.saturating_sub(1);
            let depth_after = self.state.bracket_depth;
            let tag = match opener {
                Some(o) if o.close == entry.close => entry.close_tag,
                _ => self.table.core.error,
            };
            let mut flags = TokenFlags::IS_CLOSE_DELIMITER;
            if tag == self.table.core.error {
                flags.insert(TokenFlags::IS_ERROR);
            }
            return Step::Token(LangToken::new(Span::new(start, start + 1), tag, depth_after, flags), 1);
        }

        if let Some(tag) = self.table.find_punctuation(b0) {
            return Step::Token(self.simple_token(tag, start, 1, TokenFlags::empty()), 1);
        }

        if b0 == b'@' {
            if let Some(step) = self.lex_at_prefixed(bytes, start, at_eof) {
                return step;
            }
        }

        if b0 == b'\\' && bytes.get(1) == Some(&b'\\') {
            if let Some(tag) = self.table.multiline_string {
                let info = consume_single_line_comment(bytes, 2);
                if info.end == bytes.len() && !at_eof {
                    return Step::NeedMoreData;
                }
                return Step::Token(self.simple_token(tag, start, info.end, TokenFlags::empty()), info.end);
            }
        }

        let allow_single = self.table.allow_single_quotes || self.config.allow_single_quotes;
        let quote = match b0 {
            b'"' => Some(b'"'),
            b'\'' if allow_single => Some(b'\''),
            _ => None,
        };
        if let Some(q) = quote {
            let info = consume_string(bytes, 0, q, true);
            if !info.terminated && info.end == bytes.len() && !at_eof {
                return Step::NeedMoreData;
            }
            if !info.terminated {
                self.diagnostics
                    .error("unterminated string literal", Span::new(start, start + info.end as u32))
                    .rule("unterminated_string")
                    .emit();
            }
            let mut flags = TokenFlags::empty();
            if !info.terminated {
                flags.insert(TokenFlags::IS_ERROR);
            }
            let content_end = if info.terminated { info.end - 1 } else { info.end };
            let rust_style_escapes =
                self.config.allow_hex_byte_escapes.unwrap_or(self.table.allows_hex_byte_escapes);
            let issues = scan_string_body(bytes, 1, content_end, rust_style_escapes);
            if self.report_string_issues(start, &issues) {
                flags.insert(TokenFlags::IS_ERROR);
            }
            let tag = if flags.contains(TokenFlags::IS_ERROR) { self.table.core.error } else { self.table.core.string };
            return Step::Token(self.simple_token(tag, start, info.end, flags), info.end);
        }

        let looks_like_number_start = is_digit(b0)
            || ((b0 == b'+' || b0 == b'-') && bytes.get(1).is_some_and(|b| is_digit(*b)));
        if looks_like_number_start {
            let allow_sep = self.config.allow_digit_separators.unwrap_or(self.table.allows_digit_separators);
            let info = consume_number(bytes, 0, allow_sep);
            if info.end == bytes.len() && !at_eof {
                return Step::NeedMoreData;
            }
            if !info.valid {
                self.diagnostics
                    .error("invalid numeric literal", Span::new(start, start + info.end.max(1) as u32))
                    .rule("invalid_number")
                    .emit();
            }
            let mut flags = TokenFlags::empty();
            if !info.valid {
                flags.insert(TokenFlags::IS_ERROR);
            }
            let tag = if info.valid { self.table.core.number } else { self.table.core.error };
            let end = info.end.max(1);
            return Step::Token(self.simple_token(tag, start, end, flags), end);
        }

        if is_identifier_start(b0) {
            let info = consume_identifier(bytes, 0).expect("checked is_identifier_start");
            if info.end == bytes.len() && !at_eof {
                return Step::NeedMoreData;
            }
            let text = std::str::from_utf8(&bytes[..info.end]).unwrap_or("");
            let tag = self.table.classify_keyword(text).unwrap_or(self.table.core.identifier);
            return Step::Token(self.simple_token(tag, start, info.end, TokenFlags::empty()), info.end);
        }

        // Unrecognised single byte: emit an `unknown` error token and
        // advance by one so the stream always makes progress.
        self.diagnostics
            .error("unexpected character", Span::new(start, start + 1))
            .rule("unexpected_token")
            .emit();
        Step::Token(
            self.simple_token(self.table.core.unknown, start, 1, TokenFlags::IS_ERROR),
            1,
        )
    }

    /// Lex one of `@"name"` (a quoted field name) or `@import` (the only
    /// `@`-prefixed keyword this grammar recognises so far), starting at
    /// `b0 == '@'`. Returns `None` when neither applies — the caller then
    /// falls through to the generic unrecognised-byte path, which is the
    /// right outcome for languages that don't set `field_name`/
    /// `import_keyword` at all, or for an unsupported builtin like
    /// `@TypeOf`.
    fn lex_at_prefixed(&mut self, bytes: &[u8], start: u32, at_eof: bool) -> Option<Step> {
        if bytes.len() < 2 && !at_eof {
            return Some(Step::NeedMoreData);
        }
        if let Some(field_tag) = self.table.field_name {
            if bytes.get(1) == Some(&b'"') {
                let info = consume_string(bytes, 1, b'"', true);
                if !info.terminated && info.end == bytes.len() && !at_eof {
                    return Some(Step::NeedMoreData);
                }
                if !info.terminated {
                    self.diagnostics
                        .error("unterminated field name", Span::new(start, start + info.end as u32))
                        .rule("unterminated_string")
                        .emit();
                }
                let mut flags = TokenFlags::empty();
                if !info.terminated {
                    flags.insert(TokenFlags::IS_ERROR);
                }
                let content_end = if info.terminated { info.end - 1 } else { info.end };
                let rust_style_escapes =
                    self.config.allow_hex_byte_escapes.unwrap_or(self.table.allows_hex_byte_escapes);
                let issues = scan_string_body(bytes, 2, content_end, rust_style_escapes);
                if self.report_string_issues(start, &issues) {
                    flags.insert(TokenFlags::IS_ERROR);
                }
                let tag = if flags.contains(TokenFlags::IS_ERROR) { self.table.core.error } else { field_tag };
                return Some(Step::Token(self.simple_token(tag, start, info.end, flags), info.end));
            }
        }
        if let Some(import_tag) = self.table.import_keyword {
            if let Some(id) = consume_identifier(bytes, 1) {
                if id.end == bytes.len() && !at_eof {
                    return Some(Step::NeedMoreData);
                }
                let text = std::str::from_utf8(&bytes[1..id.end]).unwrap_or("");
                if text == "import" {
                    return Some(Step::Token(self.simple_token(import_tag, start, id.end, TokenFlags::empty()), id.end));
                }
            }
        }
        None
    }

    /// Emit one diagnostic per string-content issue found by
    /// [`scan_string_body`]. Malformed encodings and broken escapes are
    /// always errors; issues that are purely `UnicodePolicy` content
    /// (BOM, disallowed controls, surrogates, noncharacters, bare `\r`)
    /// are gated by the active policy: errors under `Strict`, warnings
    /// under `Sanitise` (documenting the eventual U+FFFD substitution),
    /// and dropped under `Permissive`. Returns whether any issue was
    /// reported at error severity.
    fn report_string_issues(&mut self, base: u32, issues: &[StringIssue]) -> bool {
        let mut had_error = false;
        for issue in issues {
            let span = Span::new(base + issue.start as u32, base + issue.end as u32);
            let (rule_id, message) = string_issue_diagnostic(issue.kind);
            if is_malformed_encoding(issue.kind) {
                self.diagnostics.error(message, span).rule(rule_id).emit();
                had_error = true;
                continue;
            }
            match self.config.unicode_policy {
                UnicodePolicy::Strict => {
                    self.diagnostics.error(message, span).rule(rule_id).emit();
                    had_error = true;
                }
                UnicodePolicy::Sanitise => {
                    self.diagnostics
                        .warning(message, span)
                        .rule(rule_id)
                        .fix("replace with the Unicode replacement character", "\u{FFFD}")
                        .emit();
                }
                UnicodePolicy::Permissive => {}
            }
        }
        had_error
    }

    fn simple_token(&self, tag: LangTag, start: u32, len: usize, flags: TokenFlags) -> LangToken {
        LangToken::new(Span::new(start, start + len as u32), tag, self.state.bracket_depth, flags)
    }

    fn trivia_token(&self, tag: LangTag, start: u32, len: usize, flags: TokenFlags) -> LangToken {
        // Trivia always carries depth 0 for consumers that skip it.
        LangToken::new(Span::new(start, start + len as u32), tag, 0, flags)
    }
}

/// Malformed byte sequences and broken escapes are rejected even under
/// `UnicodePolicy::Permissive`, which only relaxes which well-formed code
/// points are admissible, not well-formedness itself.
fn is_malformed_encoding(kind: StringIssueKind) -> bool {
    matches!(
        kind,
        StringIssueKind::InvalidUtf8Sequence
            | StringIssueKind::IncompleteUtf8Sequence
            | StringIssueKind::OverlongUtf8Sequence
            | StringIssueKind::InvalidEscape
    )
}

fn string_issue_diagnostic(kind: StringIssueKind) -> (&'static str, &'static str) {
    match kind {
        StringIssueKind::InvalidUtf8Sequence => {
            ("invalid_utf8_sequence", "invalid UTF-8 byte sequence in string literal")
        }
        StringIssueKind::IncompleteUtf8Sequence => {
            ("incomplete_utf8_sequence", "incomplete UTF-8 byte sequence at end of string literal")
        }
        StringIssueKind::OverlongUtf8Sequence => {
            ("overlong_utf8_sequence", "non-minimal (overlong) UTF-8 encoding in string literal")
        }
        StringIssueKind::SurrogateInString => ("surrogate_in_string", "unpaired UTF-16 surrogate in string literal"),
        StringIssueKind::NoncharacterInString => {
            ("noncharacter_in_string", "Unicode noncharacter in string literal")
        }
        StringIssueKind::ControlCharacterInString => {
            ("control_character_in_string", "control character in string literal")
        }
        StringIssueKind::CarriageReturnInString => {
            ("carriage_return_in_string", "bare carriage return in string literal")
        }
        StringIssueKind::BomAtStringStart => ("bom_at_string_start", "byte order mark at start of string literal"),
        StringIssueKind::InvalidEscape => ("invalid_escape", "invalid escape sequence in string literal"),
    }
}

/// Lex a known-complete input in one call: a bulk adapter alongside the
/// streaming `process_chunk` path.
pub fn lex_all(table: &LanguageTable, config: &LexerConfig, source: &[u8]) -> (Vec<LangToken>, Diagnostics) {
    let mut lexer = StreamingLexer::new(table, config.clone());
    let mut tokens = lexer.process_chunk(source);
    tokens.extend(lexer.finish());
    (tokens, lexer.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket_tracker::DelimiterKind;
    use crate::language::{CoreTags, DelimiterEntry};

    // Tiny JSON-shaped table sufficient to exercise the state machine
    // without pulling in the full `stratum-langs` descriptor.
    fn test_table() -> LanguageTable {
        const OBJ: DelimiterEntry = DelimiterEntry {
            open: b'{',
            close: b'}',
            open_tag: LangTag(1),
            close_tag: LangTag(2),
            bracket_kind: DelimiterKind(0),
        };
        const ARR: DelimiterEntry = DelimiterEntry {
            open: b'[',
            close: b']',
            open_tag: LangTag(3),
            close_tag: LangTag(4),
            bracket_kind: DelimiterKind(1),
        };
        static DELIMS: [DelimiterEntry; 2] = [OBJ, ARR];
        static PUNCT: [(u8, LangTag); 2] = [(b':', LangTag(5)), (b',', LangTag(6))];
        static KEYWORDS: [(&str, LangTag); 3] =
            [("true", LangTag(7)), ("false", LangTag(8)), ("null", LangTag(9))];

        fn generic_kind(tag: LangTag) -> TokenKind {
            match tag.0 {
                1 | 3 => TokenKind::DelimiterOpen,
                2 | 4 => TokenKind::DelimiterClose,
                5 | 6 => TokenKind::Operator,
                7 | 8 => TokenKind::BooleanLiteral,
                9 => TokenKind::NullLiteral,
                10 => TokenKind::StringLiteral,
                11 => TokenKind::NumberLiteral,
                12 => TokenKind::Identifier,
                13 => TokenKind::Comment,
                14 => TokenKind::Whitespace,
                15 => TokenKind::Newline,
                16 => TokenKind::Eof,
                _ => TokenKind::Unknown,
            }
        }

        LanguageTable {
            name: "test-json",
            core: CoreTags {
                eof: LangTag(16),
                error: LangTag(0),
                unknown: LangTag(0),
                whitespace: LangTag(14),
                comment: LangTag(13),
                newline: LangTag(15),
                identifier: LangTag(12),
                string: LangTag(10),
                number: LangTag(11),
                bool_true: LangTag(7),
                bool_false: LangTag(8),
                null: LangTag(9),
            },
            delimiters: &DELIMS,
            punctuation: &PUNCT,
            keywords: &KEYWORDS,
            allow_single_quotes: false,
            allows_digit_separators: false,
            allows_hex_byte_escapes: false,
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            field_name: None,
            import_keyword: None,
            multiline_string: None,
            generic_kind,
        }
    }

    fn lex(source: &[u8]) -> Vec<LangToken> {
        let table = test_table();
        let (tokens, _) = lex_all(&table, &LexerConfig::default(), source);
        tokens
    }

    fn non_trivia_tags(tokens: &[LangToken]) -> Vec<u16> {
        tokens.iter().filter(|t| !t.is_trivia()).map(|t| t.tag.0).collect()
    }

    #[test]
    fn tokenises_simple_object() {
        let tokens = lex(br#"{"k":"v"}"#);
        assert_eq!(non_trivia_tags(&tokens), vec![1, 10, 5, 10, 2, 16]);
    }

    #[test]
    fn bracket_depth_before_open_after_close() {
        let tokens = lex(b"[[1]]");
        let depths: Vec<u16> = tokens.iter().map(|t| t.bracket_depth).collect();
        // outer [, inner [, 1, inner ], outer ], eof
        assert_eq!(depths, vec![0, 1, 2, 1, 0, 0]);
    }

    #[test]
    fn chunk_boundary_matches_single_call() {
        let source = br#"{"key": [1, 2.5e10, true, null], "x": "esc\"aped"}"#;
        let whole = lex(source);

        // Feed byte-by-byte: the worst case for a chunk-safe lexer.
        let table = test_table();
        let mut lexer = StreamingLexer::new(&table, LexerConfig::default());
        let mut chunked = Vec::new();
        for b in source {
            chunked.extend(lexer.process_chunk(&[*b]));
        }
        chunked.extend(lexer.finish());

        assert_eq!(whole, chunked);
    }

    #[test]
    fn unterminated_string_reports_diagnostic() {
        let table = test_table();
        let (tokens, diags) = lex_all(&table, &LexerConfig::default(), b"\"abc");
        assert!(tokens.iter().any(|t| t.is_error()));
        assert!(diags.has_errors());
    }

    #[test]
    fn unmatched_close_reports_diagnostic_but_keeps_progress() {
        let table = test_table();
        let (tokens, diags) = lex_all(&table, &LexerConfig::default(), b"]");
        assert_eq!(tokens.len(), 2); // error-flagged close + eof
        assert!(diags.has_errors());
    }

    #[test]
    fn keywords_are_reclassified() {
        let tokens = lex(b"true false null");
        assert_eq!(non_trivia_tags(&tokens), vec![7, 8, 9, 16]);
    }

    #[test]
    fn line_comment_is_trivia_with_depth_zero() {
        let tokens = lex(b"// hi\n1");
        let comment = tokens.iter().find(|t| t.tag == LangTag(13)).unwrap();
        assert_eq!(comment.bracket_depth, 0);
        assert!(comment.is_trivia());
    }

    #[test]
    fn strict_policy_rejects_control_character_in_string() {
        let table = test_table();
        let mut config = LexerConfig::default();
        config.unicode_policy = UnicodePolicy::Strict;
        let (tokens, diags) = lex_all(&table, &config, b"\"a\x00b\"");
        assert!(tokens.iter().any(|t| t.is_error()));
        assert!(diags.iter().any(|d| d.rule_id() == Some("control_character_in_string")));
    }

    #[test]
    fn sanitise_policy_warns_but_does_not_error_on_control_character() {
        let table = test_table();
        let mut config = LexerConfig::default();
        config.unicode_policy = UnicodePolicy::Sanitise;
        let (tokens, diags) = lex_all(&table, &config, b"\"a\x00b\"");
        assert!(!tokens.iter().any(|t| t.is_error()));
        assert!(diags.has_warnings());
        assert!(!diags.has_errors());
    }

    #[test]
    fn permissive_policy_accepts_control_character() {
        let table = test_table();
        let mut config = LexerConfig::default();
        config.unicode_policy = UnicodePolicy::Permissive;
        let (tokens, diags) = lex_all(&table, &config, b"\"a\x00b\"");
        assert!(!tokens.iter().any(|t| t.is_error()));
        assert!(diags.is_empty());
    }

    #[test]
    fn malformed_utf8_is_rejected_even_under_permissive_policy() {
        let table = test_table();
        let mut config = LexerConfig::default();
        config.unicode_policy = UnicodePolicy::Permissive;
        let (tokens, diags) = lex_all(&table, &config, b"\"a\xC0\x80b\"");
        assert!(tokens.iter().any(|t| t.is_error()));
        assert!(diags.iter().any(|d| d.rule_id() == Some("overlong_utf8_sequence")));
    }

    #[test]
    fn invalid_escape_reports_diagnostic() {
        let table = test_table();
        let (tokens, diags) = lex_all(&table, &LexerConfig::default(), br#""a\qb""#);
        assert!(tokens.iter().any(|t| t.is_error()));
        assert!(diags.iter().any(|d| d.rule_id() == Some("invalid_escape")));
    }

    proptest::proptest! {
        /// Splitting a well-formed document at any byte boundary and
        /// feeding it through `process_chunk` in two pieces must produce
        /// the same tokens as lexing it in one call — the chunk-safe
        /// counterpart of `chunk_boundary_matches_single_call`, but
        /// checked at every split point rather than just byte-by-byte.
        #[test]
        fn arbitrary_split_matches_single_call(split in 0usize..=52) {
            let source: &[u8] = br#"{"key": [1, 2.5e10, true, null], "x": "esc\"aped"}"#;
            let split = split.min(source.len());
            let table = test_table();

            let whole = lex(source);

            let mut lexer = StreamingLexer::new(&table, LexerConfig::default());
            let mut chunked = lexer.process_chunk(&source[..split]);
            chunked.extend(lexer.process_chunk(&source[split..]));
            chunked.extend(lexer.finish());

            prop_assert_eq!(whole, chunked);
        }
    }
}
