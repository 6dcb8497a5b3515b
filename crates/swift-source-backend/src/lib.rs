// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Swift Source Backend
//!
//! Renders a finalized intention collection as Swift source text. Per file:
//! typealiases, then globals, then types; inside a type: ivars, properties,
//! initializers, methods. Categories carry a MARK comment, and with
//! `print_intention_history` each declaration is preceded by its provenance
//! log.

mod declarations;
mod expressions;
mod options;
mod statements;
mod writer;

pub use declarations::FileRenderer;
pub use expressions::ExpressionRenderer;
pub use options::WriterOptions;
pub use statements::StatementRenderer;
pub use writer::SwiftWriter;

use std::path::Path;
use swift_intention_format::IntentionCollection;

/// Render every file in the collection. Returns `(output path, text)` pairs,
/// with the source extension swapped for `.swift`.
pub fn render_collection(
    collection: &IntentionCollection,
    options: &WriterOptions,
) -> Vec<(String, String)> {
    log::debug!("rendering {} file(s)", collection.files().len());
    collection
        .files()
        .iter()
        .map(|file| {
            let path = Path::new(&file.source_path)
                .with_extension("swift")
                .to_string_lossy()
                .into_owned();
            let renderer = FileRenderer::new(options.clone());
            (path, renderer.render(file))
        })
        .collect()
}
