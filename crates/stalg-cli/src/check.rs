//! `stalg check`: parse files and print their diagnostics.

use std::io::Write;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::input::{collect_files, parse_entry, read_source};
use crate::report::{render_json, render_text};
use crate::style::Palette;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub files_with_errors: usize,
    pub diagnostics: usize,
}

pub fn run_check(paths: &[PathBuf], settings: &Settings) -> anyhow::Result<CheckSummary> {
    let files = collect_files(paths, &settings.include)?;
    let palette = Palette::for_stdout(settings.color);
    let mut summary = CheckSummary::default();
    let mut stdout = std::io::stdout().lock();

    for path in &files {
        let text = read_source(path)?;
        let output = parse_entry(settings.entry, &text, false)?;
        tracing::debug!(
            path = %path.display(),
            diagnostics = output.diagnostics.len(),
            "checked file"
        );

        summary.files += 1;
        summary.diagnostics += output.diagnostics.len();
        if output.has_errors() {
            summary.files_with_errors += 1;
        }

        let rendered = match settings.format {
            OutputFormat::Text => render_text(
                path,
                &text,
                &output.diagnostics,
                settings.max_per_file,
                palette,
            ),
            OutputFormat::Json => {
                render_json(path, &text, &output.diagnostics, settings.max_per_file)?
            }
        };
        stdout.write_all(rendered.as_bytes())?;
    }
    stdout.flush()?;

    if settings.format == OutputFormat::Text {
        print_summary(summary);
    }
    Ok(summary)
}

fn print_summary(summary: CheckSummary) {
    let palette = Palette::for_stderr();
    if summary.files == 0 {
        eprintln!("{}", palette.warning("No files to check"));
    } else if summary.files_with_errors == 0 {
        eprintln!(
            "{}",
            palette.success(format!("Checked {} file(s), no errors", summary.files))
        );
    } else {
        eprintln!(
            "{}",
            palette.error(format!(
                "Checked {} file(s): {} with errors, {} diagnostic(s)",
                summary.files, summary.files_with_errors, summary.diagnostics
            ))
        );
    }
}
