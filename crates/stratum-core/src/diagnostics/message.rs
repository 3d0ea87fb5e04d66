//! Diagnostic message types.

use crate::span::Span;

/// Severity level of a diagnostic, four-way split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
    Hint,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A suggested fix for a diagnostic: replace its span with `replacement`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self { replacement: replacement.into(), description: description.into() }
    }
}

/// A secondary location related to a diagnostic's primary span.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self { span, message: message.into() }
    }
}

/// One of the stable error codes a diagnostic can carry, e.g.
/// `unterminated_string`, `unexpected_token`, `depth_exceeded`.
pub type RuleId = &'static str;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticMessage {
    pub(crate) severity: Severity,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) rule_id: Option<RuleId>,
    pub(crate) expected_kinds: Vec<String>,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(severity: Severity, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity,
            span,
            message: message.into(),
            rule_id: None,
            expected_kinds: Vec::new(),
            fix: None,
            related: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn rule_id(&self) -> Option<RuleId> {
        self.rule_id
    }

    pub fn expected_kinds(&self) -> &[String] {
        &self.expected_kinds
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}..{}: {}", self.severity, self.span.start, self.span.end, self.message)?;
        if let Some(rule_id) = self.rule_id {
            write!(f, " [{rule_id}]")?;
        }
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(f, " (related: {} at {}..{})", related.message, related.span.start, related.span.end)?;
        }
        Ok(())
    }
}
