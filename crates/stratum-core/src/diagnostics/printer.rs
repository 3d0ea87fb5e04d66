//! Source-quoted rendering of a [`Diagnostics`] collection, built on
//! `annotate-snippets`.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use super::collection::Diagnostics;
use super::message::Severity;

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self { diagnostics, source: None, path: None, colored: false }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };
        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored { Renderer::styled() } else { Renderer::plain() };

        for diag in self.diagnostics.iter() {
            let range = adjust_range(diag.span.start as usize, diag.span.end as usize, source.len());
            let level = level_for(diag.severity);

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&diag.message));
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }
            for related in &diag.related {
                let r = adjust_range(related.span.start as usize, related.span.end as usize, source.len());
                snippet = snippet.annotation(AnnotationKind::Context.span(r).label(&related.message));
            }

            let group = level.primary_title(&diag.message).element(snippet);
            writeln!(w, "{}", renderer.render(&[group]))?;
        }
        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for diag in self.diagnostics.iter() {
            writeln!(w, "{diag}")?;
        }
        Ok(())
    }
}

fn level_for(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
        Severity::Info => Level::INFO,
        Severity::Hint => Level::HELP,
    }
}

fn adjust_range(start: usize, end: usize, len: usize) -> std::ops::Range<usize> {
    let start = start.min(len);
    let end = end.max(start).min(len);
    start..end
}
