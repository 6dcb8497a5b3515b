// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Structural intention passes
//!
//! Each pass mutates the whole collection in place; the pipeline order is
//! fixed and later passes rely on invariants established by earlier ones.
//! Every mutation appends a history record prefixed with the pass name.

mod duplicate_removal;
mod file_grouping;
mod merging;
mod override_detection;
mod property_merge;
mod protocol_nullability;
mod synthesize_backing;
mod usage_analysis;

pub use duplicate_removal::DuplicateTypeRemovalPass;
pub use file_grouping::FileGroupingPass;
pub use override_detection::OverrideDetectionPass;
pub use property_merge::PropertyMergePass;
pub use protocol_nullability::ProtocolNullabilityPass;
pub use synthesize_backing::SynthesizeBackingFieldPass;
pub use usage_analysis::UsageAnalysisPass;

use crate::IntentionCollection;

/// A mutator over the intention collection.
pub trait IntentionPass {
    fn name(&self) -> &'static str;
    fn apply(&mut self, collection: &mut IntentionCollection);
}

/// The canonical structural pipeline, in its documented order.
pub fn default_passes() -> Vec<Box<dyn IntentionPass>> {
    vec![
        Box::new(FileGroupingPass),
        Box::new(DuplicateTypeRemovalPass),
        Box::new(ProtocolNullabilityPass),
        Box::new(PropertyMergePass),
        Box::new(SynthesizeBackingFieldPass),
        Box::new(OverrideDetectionPass),
        Box::new(UsageAnalysisPass),
    ]
}

/// Run a pass sequence to completion, in order.
pub fn run_passes(collection: &mut IntentionCollection, passes: &mut [Box<dyn IntentionPass>]) {
    for pass in passes {
        log::debug!("running intention pass: {}", pass.name());
        pass.apply(collection);
    }
}
