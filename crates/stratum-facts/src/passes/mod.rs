//! Built-in analysis passes: the default set a [`crate::Pipeline`] runs
//! to populate a [`crate::FactStore`] from a parsed document.

mod lexical;
mod semantic;
mod structural;
mod syntactic;

pub use lexical::LexicalFactsPass;
pub use semantic::DuplicateKeyPass;
pub use structural::StructuralFactsPass;
pub use syntactic::SyntacticFactsPass;

use crate::pass::AnalysisPass;

/// The default pass set, in declaration order (dependency order is
/// resolved separately by [`crate::pass::run_passes`]).
pub fn default_passes() -> Vec<Box<dyn AnalysisPass>> {
    vec![
        Box::new(LexicalFactsPass),
        Box::new(StructuralFactsPass),
        Box::new(SyntacticFactsPass),
        Box::new(DuplicateKeyPass),
    ]
}
