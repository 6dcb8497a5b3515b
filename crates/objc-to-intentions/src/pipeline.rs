// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation pipeline orchestrator
//!
//! Parse every input source in parallel, read each into a file intention,
//! run the sequential structural passes, then collect the function body
//! queue (again in parallel) and drain it through the body-rewriting passes.
//! Failures never stop the pipeline; they accumulate in the diagnostics
//! sink, and a source that cannot be processed only loses itself.

use crate::structural_reader::StructuralReader;
use crate::type_mapper::TypeMapper;
use objc_syntax::{Diagnostics, ParserAdapter, SourceLocation, SourceProvider};
use rayon::prelude::*;
use std::sync::Arc;
use swift_intention_format::analysis::{default_passes, run_passes};
use swift_intention_format::body::{body_context_for, default_body_passes, run_body_passes};
use swift_intention_format::{
    FileIntention, FunctionBodyQueue, IntentionCollection, IntentionIdGenerator,
};

#[derive(Default)]
pub struct TranslationPipeline {
    mapper: TypeMapper,
}

impl TranslationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full translation pipeline over every source the provider
    /// enumerates. Returns the finalized intention collection, ready for the
    /// pretty-printer, along with all accumulated diagnostics.
    pub fn run(
        &self,
        provider: &dyn SourceProvider,
        adapter: &dyn ParserAdapter,
    ) -> (IntentionCollection, Diagnostics) {
        let sources = provider.sources();
        let ids = Arc::new(IntentionIdGenerator::new());

        log::debug!("parsing {} sources", sources.len());

        // Parallel region one: parse and read each source independently.
        let results: Vec<(Option<FileIntention>, Diagnostics)> = sources
            .par_iter()
            .map(|source| {
                let mut diagnostics = Diagnostics::new();
                match adapter.parse(source, &mut diagnostics) {
                    Ok(parsed) => {
                        let reader = StructuralReader::new(&self.mapper, &ids);
                        (Some(reader.read_file(&parsed)), diagnostics)
                    }
                    Err(error) => {
                        diagnostics.error(
                            &source.name,
                            SourceLocation::unknown(),
                            format!("source could not be processed: {:#}", error),
                        );
                        (None, diagnostics)
                    }
                }
            })
            .collect();

        let mut collection = IntentionCollection::new(ids);
        let mut diagnostics = Diagnostics::new();
        for (file, file_diagnostics) in results {
            diagnostics.merge(file_diagnostics);
            if let Some(file) = file {
                collection.push_file(file);
            }
        }

        // Sequential structural pipeline.
        run_passes(&mut collection, &mut default_passes());

        // Parallel region two: body queue collection; then the sequential
        // body-rewriting passes.
        let queue = FunctionBodyQueue::collect(&collection, &body_context_for);
        let items = queue.into_items();
        log::debug!("rewriting {} function bodies", items.len());
        run_body_passes(&mut collection, items, &default_body_passes());

        (collection, diagnostics)
    }
}
