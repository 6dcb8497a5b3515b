// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C to Swift translation driver
//!
//! Wires the external seams together: a source provider enumerates inputs, a
//! parser adapter delivers CSTs, the translation pipeline produces the
//! intention graph, and the Swift backend renders it through a writer
//! output. The grammar itself is not part of this workspace; embedders bring
//! their own adapter, and tests feed pre-parsed CSTs through
//! [`PreparsedAdapter`].

mod adapters;
mod diagnostics_render;
mod output;
mod providers;

pub use adapters::PreparsedAdapter;
pub use diagnostics_render::render_diagnostics;
pub use output::{FileSystemOutput, MemoryOutput, WriterOutput};
pub use providers::{FileListSourceProvider, MemorySourceProvider};

pub use swift_source_backend::WriterOptions;

use objc_syntax::{Diagnostics, ParserAdapter, SourceProvider};
use objc_to_intentions::TranslationPipeline;
use swift_intention_format::IntentionCollection;
use swift_source_backend::render_collection;

pub struct Rewriter {
    pub options: WriterOptions,
}

impl Rewriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Translate every source and write one `.swift` file per surviving file
    /// intention. Returns the accumulated diagnostics; errors never abort
    /// the run before rendering.
    pub fn rewrite(
        &self,
        provider: &dyn SourceProvider,
        adapter: &dyn ParserAdapter,
        output: &mut dyn WriterOutput,
    ) -> anyhow::Result<Diagnostics> {
        let (collection, diagnostics) = self.translate(provider, adapter);
        for (path, text) in render_collection(&collection, &self.options) {
            let mut sink = output.create(&path)?;
            use std::io::Write;
            sink.write_all(text.as_bytes())?;
        }
        Ok(diagnostics)
    }

    /// Run translation only, handing back the finalized intention graph.
    pub fn translate(
        &self,
        provider: &dyn SourceProvider,
        adapter: &dyn ParserAdapter,
    ) -> (IntentionCollection, Diagnostics) {
        TranslationPipeline::new().run(provider, adapter)
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}
