//! Built-in [`LanguageDescriptor`]s for JSON and ZON.
//!
//! Each language module (`json`, `zon`) owns a static [`stratum_lexer::LanguageTable`]
//! plus the tag↔`SyntaxKind` projection the generic lexer needs to stay
//! language-agnostic; [`descriptor`] bundles those into a single
//! [`LanguageDescriptor`] with a uniform `parse` entry point, and
//! [`registry`] resolves one by name or file extension.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod descriptor;
pub mod json;
pub mod registry;
pub mod zon;

pub use descriptor::{json_descriptor, zon_descriptor, LanguageDescriptor, LanguageId, ParsedDocument, ParserOptions};
pub use registry::{all, from_extension, from_name};

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_lexer::{lex_all, LexerConfig};

    #[test]
    fn json_descriptor_parses_simple_object() {
        let descriptor = json_descriptor();
        let src = r#"{"a": 1, "b": [2, 3]}"#;
        let (tokens, diags) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        assert!(!diags.has_errors());
        let doc = descriptor.parse(src, tokens, ParserOptions::default()).unwrap();
        assert!(!doc.diagnostics.has_errors());
        assert_eq!(doc.root.text(), src);
    }

    #[test]
    fn zon_descriptor_parses_nested_struct() {
        let descriptor = zon_descriptor();
        let src = r#".{ .name = "p", .version = "0.1.0" }"#;
        let (tokens, diags) = lex_all(descriptor.table, &LexerConfig::default(), src.as_bytes());
        assert!(!diags.has_errors());
        let doc = descriptor.parse(src, tokens, ParserOptions::default()).unwrap();
        assert!(!doc.diagnostics.has_errors());
        assert_eq!(doc.root.text(), src);
    }
}
