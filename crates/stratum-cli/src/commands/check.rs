//! `stratum check`: print diagnostics and set the exit code
//! (0 = clean, 1 = diagnostics present but parse completed, 2 = fatal).

use stratum_facts::Pipeline;

use crate::cli::CheckArgs;
use crate::commands::common::{read_source, resolve_lang, should_colorize};

pub fn run(args: CheckArgs) -> i32 {
    let lang = resolve_lang(args.lang.as_deref(), &args.file);
    let source = read_source(&args.file);

    let span = tracing::info_span!("check", file = %args.file.display(), lang = lang.name());
    let _enter = span.enter();

    let pipeline = Pipeline::new(lang);
    let output = match pipeline.run(&source) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    if output.diagnostics.is_empty() {
        return 0;
    }

    eprint!(
        "{}",
        output
            .diagnostics
            .printer()
            .source(&source)
            .path(&args.file.display().to_string())
            .colored(should_colorize(&args.color))
            .render()
    );

    1
}
