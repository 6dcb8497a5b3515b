// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Input interfaces
//!
//! The pipeline is fed through two seams: a [`SourceProvider`] that
//! enumerates raw sources, and a [`ParserAdapter`] that turns one source into
//! a CST plus the file's assume-nonnull token ranges. The grammar itself
//! lives outside this workspace.

use crate::ast::ObjcFile;
use crate::diagnostics::Diagnostics;
use crate::source::NonnullRegions;

/// One input source: a file name and its full text.
#[derive(Debug, Clone)]
pub struct InputSource {
    pub name: String,
    pub text: String,
}

impl InputSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Enumerates the sources to translate.
pub trait SourceProvider: Sync {
    fn sources(&self) -> Vec<InputSource>;
}

/// The result of parsing one source.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub file: ObjcFile,
    pub nonnull_regions: NonnullRegions,
}

impl ParsedSource {
    pub fn new(file: ObjcFile) -> Self {
        Self {
            file,
            nonnull_regions: NonnullRegions::default(),
        }
    }

    pub fn with_nonnull_regions(mut self, regions: NonnullRegions) -> Self {
        self.nonnull_regions = regions;
        self
    }
}

/// Source-to-CST adapter, invoked once per source.
///
/// Recoverable parse problems are reported through `diagnostics` and show up
/// as `Unknown` nodes in the CST; an `Err` return means the source could not
/// be processed at all and only aborts that one file.
pub trait ParserAdapter: Sync {
    fn parse(
        &self,
        source: &InputSource,
        diagnostics: &mut Diagnostics,
    ) -> anyhow::Result<ParsedSource>;
}
