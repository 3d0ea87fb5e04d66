//! `stratum facts`: dump the fact stream, optionally filtered by category.

use stratum_facts::{FactQuery, Pipeline, PredicateCategory};

use crate::cli::FactsArgs;
use crate::commands::common::{read_source, resolve_lang, should_colorize};

fn parse_category(name: &str) -> Option<PredicateCategory> {
    match name.to_ascii_lowercase().as_str() {
        "lexical" => Some(PredicateCategory::Lexical),
        "structural" => Some(PredicateCategory::Structural),
        "syntactic" => Some(PredicateCategory::Syntactic),
        "semantic" => Some(PredicateCategory::Semantic),
        "editor" => Some(PredicateCategory::Editor),
        "meta" => Some(PredicateCategory::Meta),
        _ => None,
    }
}

pub fn run(args: FactsArgs) -> i32 {
    let lang = resolve_lang(args.lang.as_deref(), &args.file);
    let source = read_source(&args.file);

    let span = tracing::info_span!("facts", file = %args.file.display(), lang = lang.name());
    let _enter = span.enter();

    let category = match args.category.as_deref() {
        Some(name) => match parse_category(name) {
            Some(cat) => Some(cat),
            None => {
                eprintln!("error: unknown category '{}'", name);
                eprintln!("known categories: lexical, structural, syntactic, semantic, editor, meta");
                return 2;
            }
        },
        None => None,
    };

    let pipeline = Pipeline::new(lang);
    let output = match pipeline.run(&source) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    let mut query = FactQuery::new();
    if let Some(cat) = category {
        query = query.where_category(cat);
    }

    for fact in query.execute(&output.facts) {
        println!(
            "{:>6}..{:<6} gen={:<3} conf={:<4.2} {:?}",
            fact.subject.start, fact.subject.end, fact.generation, fact.confidence, fact.predicate
        );
    }

    if output.diagnostics.has_errors() {
        eprint!(
            "{}",
            output
                .diagnostics
                .printer()
                .source(&source)
                .path(&args.file.display().to_string())
                .colored(should_colorize("auto"))
                .render()
        );
        1
    } else {
        0
    }
}
