//! `stratum parse`: dump the syntax tree, as an s-expression or as JSON.

use serde_json::{json, Value};
use stratum_langs::ParserOptions;
use stratum_syntax::{SyntaxElement, SyntaxNode};

use crate::cli::ParseArgs;
use crate::commands::common::{read_source, resolve_lang, should_colorize};

pub fn run(args: ParseArgs) -> i32 {
    let lang = resolve_lang(args.lang.as_deref(), &args.file);
    let source = read_source(&args.file);

    let span = tracing::info_span!("parse", file = %args.file.display(), lang = lang.name());
    let _enter = span.enter();

    let (tokens, lex_diagnostics) =
        stratum_lexer::lex_all(lang.table, &stratum_lexer::LexerConfig::default(), source.as_bytes());

    let doc = match lang.parse(&source, tokens, ParserOptions::default()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    let mut diagnostics = lex_diagnostics;
    diagnostics.extend(doc.diagnostics);

    if args.json {
        let tree = node_to_json(&doc.root);
        println!("{}", serde_json::to_string_pretty(&tree).expect("json tree is never cyclic"));
    } else {
        print!("{}", dump_sexp(&doc.root, 0));
    }

    if !diagnostics.is_empty() {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .source(&source)
                .path(&args.file.display().to_string())
                .colored(should_colorize("auto"))
                .render()
        );
    }

    if diagnostics.has_errors() {
        1
    } else {
        0
    }
}

fn dump_sexp(node: &SyntaxNode, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut out = format!("{indent}({:?}\n", node.kind());
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(child) => out.push_str(&dump_sexp(&child, depth + 1)),
            SyntaxElement::Token(token) if token.kind().is_trivia() => {}
            SyntaxElement::Token(token) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&format!("{:?} {:?}\n", token.kind(), token.text()));
            }
        }
    }
    out.push_str(&indent);
    out.push_str(")\n");
    out
}

fn node_to_json(node: &SyntaxNode) -> Value {
    let children: Vec<Value> = node
        .children_with_tokens()
        .filter(|e| match e {
            SyntaxElement::Token(t) => !t.kind().is_trivia(),
            SyntaxElement::Node(_) => true,
        })
        .map(|e| match e {
            SyntaxElement::Node(n) => node_to_json(&n),
            SyntaxElement::Token(t) => json!({
                "kind": format!("{:?}", t.kind()),
                "text": t.text(),
                "start": u32::from(t.text_range().start()),
                "end": u32::from(t.text_range().end()),
            }),
        })
        .collect();

    json!({
        "kind": format!("{:?}", node.kind()),
        "start": u32::from(node.text_range().start()),
        "end": u32::from(node.text_range().end()),
        "children": children,
    })
}
