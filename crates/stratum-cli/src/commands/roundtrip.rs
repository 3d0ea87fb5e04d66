//! `stratum roundtrip`: exercise invariant 2 (parse(emit(parse(s))) ≡ parse(s)).

use stratum_facts::Pipeline;

use crate::cli::RoundtripArgs;
use crate::commands::common::{read_source, resolve_lang};

pub fn run(args: RoundtripArgs) -> i32 {
    let lang = resolve_lang(args.lang.as_deref(), &args.file);
    let source = read_source(&args.file);

    let span = tracing::info_span!("roundtrip", file = %args.file.display(), lang = lang.name());
    let _enter = span.enter();

    let pipeline = Pipeline::new(lang);
    let result = match pipeline.round_trip(&source) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    if result.matches {
        println!("round trip ok");
        0
    } else {
        eprintln!("round trip mismatch");
        for diff in diff_lines(&source, &result.emitted) {
            eprintln!("{diff}");
        }
        1
    }
}

/// Minimal line-level diff: `-` for lines only in `before`, `+` for lines
/// only in `after`, nothing for lines common to both at the same index.
fn diff_lines(before: &str, after: &str) -> Vec<String> {
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();
    let mut out = Vec::new();

    for i in 0..before_lines.len().max(after_lines.len()) {
        match (before_lines.get(i), after_lines.get(i)) {
            (Some(b), Some(a)) if b == a => {}
            (Some(b), Some(a)) => {
                out.push(format!("- {b}"));
                out.push(format!("+ {a}"));
            }
            (Some(b), None) => out.push(format!("- {b}")),
            (None, Some(a)) => out.push(format!("+ {a}")),
            (None, None) => unreachable!(),
        }
    }

    out
}
