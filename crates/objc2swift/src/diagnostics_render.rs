// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic rendering
//!
//! Converts the pipeline's accumulated diagnostics into annotated terminal
//! output. The core never formats anything itself; this is the only place
//! that knows how a diagnostic looks.

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use objc_syntax::{DiagnosticSeverity, Diagnostics, InputSource};
use std::collections::HashMap;
use termcolor::WriteColor;

/// Render every accumulated diagnostic against its source text.
pub fn render_diagnostics(
    diagnostics: &Diagnostics,
    sources: &[InputSource],
    writer: &mut dyn WriteColor,
) -> anyhow::Result<()> {
    let mut files = SimpleFiles::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for source in sources {
        let id = files.add(source.name.as_str(), source.text.as_str());
        ids.insert(source.name.as_str(), id);
    }

    let config = term::Config::default();
    for entry in diagnostics.entries() {
        let severity = match entry.severity {
            DiagnosticSeverity::Error => Severity::Error,
            DiagnosticSeverity::Warning => Severity::Warning,
            DiagnosticSeverity::Note => Severity::Note,
        };
        let mut diagnostic = Diagnostic::new(severity).with_message(entry.message.clone());

        if let Some(&file_id) = ids.get(entry.source_name.as_str()) {
            let source = sources
                .iter()
                .find(|s| s.name == entry.source_name)
                .expect("file id registered above");
            if !source.text.is_empty() {
                let offset = byte_offset(&source.text, entry.location.line, entry.location.column);
                let end = (offset + 1).min(source.text.len());
                diagnostic = diagnostic.with_labels(vec![Label::primary(file_id, offset..end)]);
            }
        }

        term::emit(writer, &config, &files, &diagnostic)?;
    }
    Ok(())
}

/// Byte offset of a 1-based line/column position; clamps out-of-range
/// positions to the nearest valid offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line = line.saturating_sub(1);
    let column = column.saturating_sub(1);
    let mut offset = 0;
    for (index, candidate) in text.split_inclusive('\n').enumerate() {
        if index == line {
            return offset + column.min(candidate.len().saturating_sub(1));
        }
        offset += candidate.len();
    }
    text.len().saturating_sub(1)
}
