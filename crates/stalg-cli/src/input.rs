//! Finding, reading, and parsing input files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use stalg_syntax::{
    parse_algorithm, parse_expression_source, parse_initializer_expression_source, parse_method,
    parse_source, parse_statements, Diagnostic, Parse,
};

use crate::cli::Entry;

/// Files named on the command line, with directories expanded through the
/// include patterns. No paths means the patterns apply to the working
/// directory.
pub fn collect_files(paths: &[PathBuf], include: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    if paths.is_empty() {
        for pattern in include {
            glob_into(pattern, &mut files)?;
        }
    }
    for path in paths {
        if path.is_dir() {
            for pattern in include {
                glob_into(&format!("{}/{}", path.display(), pattern), &mut files)?;
            }
        } else {
            files.insert(path.clone());
        }
    }

    tracing::debug!(count = files.len(), "collected input files");
    Ok(files.into_iter().collect())
}

fn glob_into(pattern: &str, files: &mut BTreeSet<PathBuf>) -> anyhow::Result<()> {
    for entry in glob::glob(pattern).with_context(|| format!("invalid include pattern '{pattern}'"))? {
        let path = entry?;
        if path.is_file() {
            files.insert(path);
        }
    }
    Ok(())
}

pub fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

/// Diagnostics of a parse, plus the tree as JSON when requested.
pub struct ParseOutput {
    pub tree: Option<serde_json::Value>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

pub fn parse_entry(entry: Entry, text: &str, with_tree: bool) -> serde_json::Result<ParseOutput> {
    match entry {
        Entry::Source => finish(parse_source(text), with_tree),
        Entry::Algorithm => finish(parse_algorithm(text), with_tree),
        Entry::Method => finish(parse_method(text), with_tree),
        Entry::Statements => finish(parse_statements(text), with_tree),
        Entry::Expression => finish(parse_expression_source(text), with_tree),
        Entry::Initializer => finish(parse_initializer_expression_source(text), with_tree),
    }
}

fn finish<T: Serialize>(parse: Parse<T>, with_tree: bool) -> serde_json::Result<ParseOutput> {
    let (tree, diagnostics) = parse.into_parts();
    let tree = match tree {
        Some(tree) if with_tree => Some(serde_json::to_value(tree)?),
        _ => None,
    };
    Ok(ParseOutput { tree, diagnostics })
}
