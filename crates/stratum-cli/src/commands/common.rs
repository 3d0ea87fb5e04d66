//! Shared helpers: source loading and language resolution.

use std::path::Path;

use stratum_langs::LanguageDescriptor;

/// Reads `path` to a string, exiting with code 2 (fatal) on I/O failure.
pub fn read_source(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read '{}': {}", path.display(), e);
        std::process::exit(2);
    })
}

/// Resolve a language: explicit `--lang` takes precedence, otherwise infer
/// from `path`'s extension.
pub fn resolve_lang(lang: Option<&str>, path: &Path) -> LanguageDescriptor {
    if let Some(name) = lang {
        return stratum_langs::from_name(name).unwrap_or_else(|| {
            eprintln!("error: unknown language '{}'", name);
            eprintln!("known languages: json, zon");
            std::process::exit(2);
        });
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_else(|| {
        eprintln!("error: cannot infer language from '{}', use --lang", path.display());
        std::process::exit(2);
    });

    stratum_langs::from_extension(ext).unwrap_or_else(|| {
        eprintln!("error: cannot infer language from extension '.{}', use --lang", ext);
        std::process::exit(2);
    })
}

pub fn should_colorize(choice: &str) -> bool {
    match choice {
        "always" => true,
        "never" => false,
        _ => std::io::IsTerminal::is_terminal(&std::io::stdout()),
    }
}
