//! Static language registry: resolve a [`LanguageDescriptor`] by name or
//! file extension. A `from_name`/`from_ext`/`all` triad, minus any dynamic
//! grammar-loading machinery this crate has no use for (stratum's two
//! languages are built in, not plugged in).

use crate::descriptor::{json_descriptor, zon_descriptor, LanguageDescriptor};

pub fn from_name(name: &str) -> Option<LanguageDescriptor> {
    match name.to_ascii_lowercase().as_str() {
        "json" => Some(json_descriptor()),
        "zon" => Some(zon_descriptor()),
        _ => None,
    }
}

pub fn from_extension(ext: &str) -> Option<LanguageDescriptor> {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "json" => Some(json_descriptor()),
        "zon" => Some(zon_descriptor()),
        _ => None,
    }
}

pub fn all() -> Vec<LanguageDescriptor> {
    vec![json_descriptor(), zon_descriptor()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name_case_insensitively() {
        assert_eq!(from_name("JSON").unwrap().name(), "json");
        assert_eq!(from_name("zon").unwrap().name(), "zon");
        assert!(from_name("yaml").is_none());
    }

    #[test]
    fn resolves_by_extension() {
        assert_eq!(from_extension(".json").unwrap().name(), "json");
        assert_eq!(from_extension("zon").unwrap().name(), "zon");
    }

    #[test]
    fn all_lists_every_builtin() {
        let names: Vec<_> = all().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["json", "zon"]);
    }
}
