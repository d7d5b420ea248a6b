//! `stalg dump` and `stalg tokens`.

use std::fmt::Write as _;
use std::path::Path;

use stalg_syntax::lexer::lex_with_text;

use crate::config::Settings;
use crate::input::{parse_entry, read_source};
use crate::report::render_text;
use crate::style::Palette;

/// Prints the tree as JSON on stdout and diagnostics on stderr. Returns
/// whether any error was reported.
pub fn run_dump(path: &Path, compact: bool, settings: &Settings) -> anyhow::Result<bool> {
    let text = read_source(path)?;
    let output = parse_entry(settings.entry, &text, true)?;

    if let Some(tree) = &output.tree {
        let json = if compact {
            serde_json::to_string(tree)?
        } else {
            serde_json::to_string_pretty(tree)?
        };
        println!("{json}");
    }
    if !output.diagnostics.is_empty() {
        eprint!(
            "{}",
            render_text(
                path,
                &text,
                &output.diagnostics,
                settings.max_per_file,
                Palette::for_stderr(),
            )
        );
    }
    Ok(output.has_errors())
}

pub fn run_tokens(path: &Path, trivia: bool, palette: Palette) -> anyhow::Result<()> {
    let text = read_source(path)?;
    print!("{}", render_tokens(&text, trivia, palette));
    Ok(())
}

/// One token per line: kind, byte range, and text.
fn render_tokens(text: &str, trivia: bool, palette: Palette) -> String {
    let mut out = String::new();
    for (token, token_text) in lex_with_text(text) {
        if token.kind.is_trivia() && !trivia {
            continue;
        }
        let range = format!(
            "{}..{}",
            u32::from(token.range.start()),
            u32::from(token.range.end())
        );
        let _ = writeln!(
            out,
            "{:<20} {} {token_text:?}",
            format!("{:?}", token.kind),
            palette.dim(format!("{range:<9}"))
        );
    }
    out
}
