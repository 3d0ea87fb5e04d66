//! `stratum lex`: dump the generic token stream.

use stratum_lexer::LexerConfig;

use crate::cli::LexArgs;
use crate::commands::common::{read_source, resolve_lang, should_colorize};

pub fn run(args: LexArgs) -> i32 {
    let lang = resolve_lang(args.lang.as_deref(), &args.file);
    let source = read_source(&args.file);

    let span = tracing::info_span!("lex", file = %args.file.display(), lang = lang.name());
    let _enter = span.enter();

    let (tokens, diagnostics) = stratum_lexer::lex_all(lang.table, &LexerConfig::default(), source.as_bytes());

    for tok in &tokens {
        let token = tok.down_project(lang.table);
        let text = &source[token.span.start as usize..token.span.end as usize];
        println!(
            "{:>6}..{:<6} depth={:<3} {:?} {:?}",
            token.span.start,
            token.span.end,
            token.bracket_depth,
            token.kind,
            text
        );
    }

    if diagnostics.has_errors() {
        eprint!(
            "{}",
            diagnostics
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
