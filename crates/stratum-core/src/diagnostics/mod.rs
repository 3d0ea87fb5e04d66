//! Diagnostics collection and rendering.

mod collection;
mod message;
mod printer;

pub use collection::{DiagnosticBuilder, Diagnostics};
pub use message::{DiagnosticMessage, Fix, RelatedInfo, RuleId, Severity};
pub use printer::DiagnosticsPrinter;
