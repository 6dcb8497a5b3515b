// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Accumulating diagnostics sink
//!
//! Diagnostics never interrupt translation; readers and passes push entries
//! here and the pipeline carries on. Rendering is the driver's concern.

use crate::source::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Note,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub source_name: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(
        &mut self,
        source_name: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) {
        self.push(DiagnosticSeverity::Error, source_name, location, message);
    }

    pub fn warning(
        &mut self,
        source_name: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) {
        self.push(DiagnosticSeverity::Warning, source_name, location, message);
    }

    pub fn note(
        &mut self,
        source_name: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) {
        self.push(DiagnosticSeverity::Note, source_name, location, message);
    }

    fn push(
        &mut self,
        severity: DiagnosticSeverity,
        source_name: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            message: message.into(),
            source_name: source_name.into(),
            location,
        });
    }

    /// Fold another sink's entries into this one, preserving order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
