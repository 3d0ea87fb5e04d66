use crate::span::Span;

use super::message::{DiagnosticMessage, Fix, RelatedInfo, RuleId, Severity};
use super::printer::DiagnosticsPrinter;

/// An append-only collection of diagnostics produced by a pipeline stage.
/// Stages always return their best-effort result alongside this
/// collection.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Builder for one diagnostic; nothing is recorded until [`emit`](Self::emit)
/// is called.
#[must_use = "diagnostic not recorded until .emit() is called"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.at(Severity::Error, msg, span)
    }

    pub fn warning(&mut self, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.at(Severity::Warning, msg, span)
    }

    pub fn info(&mut self, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.at(Severity::Info, msg, span)
    }

    pub fn hint(&mut self, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        self.at(Severity::Hint, msg, span)
    }

    fn at(&mut self, severity: Severity, msg: impl Into<String>, span: Span) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder { diagnostics: self, message: DiagnosticMessage::new(severity, span, msg) }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_warning)
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn printer<'a>(&'a self) -> DiagnosticsPrinter<'a, 'a> {
        DiagnosticsPrinter::new(self)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    pub fn rule(mut self, rule_id: RuleId) -> Self {
        self.message.rule_id = Some(rule_id);
        self
    }

    pub fn expected(mut self, kinds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.message.expected_kinds.extend(kinds.into_iter().map(Into::into));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, span: Span) -> Self {
        self.message.related.push(RelatedInfo::new(span, msg));
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_severity() {
        let mut d = Diagnostics::new();
        d.error("bad token", Span::new(0, 1)).rule("unexpected_token").emit();
        d.warning("deep nesting", Span::new(2, 3)).emit();
        assert_eq!(d.len(), 2);
        assert_eq!(d.error_count(), 1);
        assert_eq!(d.warning_count(), 1);
        assert!(d.has_errors());
    }

    #[test]
    fn builder_not_emitted_until_emit_called() {
        let mut d = Diagnostics::new();
        let _ = d.error("unused", Span::new(0, 1));
        assert!(d.is_empty());
    }
}
