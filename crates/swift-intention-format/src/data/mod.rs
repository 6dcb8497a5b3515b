// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Intention graph data model
//!
//! The collection exclusively owns its file intentions, files own their types
//! and globals, and types own their members. Children keep a weak back-link
//! to their parent as a bare [`IntentionId`]; re-parenting always goes
//! through move operations that unlink from the previous parent first.

use indexmap::IndexMap;
use objc_syntax::SourceLocation;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub mod expressions;
pub mod file;
pub mod history;
pub mod members;
pub mod statements;
pub mod swift_type;
pub mod type_intentions;

use file::FileIntention;
use history::IntentionHistory;
use type_intentions::{ClassIntention, TypeIntention};

/// Stable identity of one intention.
pub type IntentionId = usize;

/// Allocates intention IDs. Shared across the parallel parse region, so the
/// counter is atomic.
#[derive(Debug, Default)]
pub struct IntentionIdGenerator {
    next: AtomicUsize,
}

impl IntentionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> IntentionId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Where an intention came from: source file name plus the location of the
/// CST node that produced it. Synthesized intentions use an unknown location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRef {
    pub file: String,
    pub location: SourceLocation,
}

impl SourceRef {
    pub fn new(file: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            file: file.into(),
            location,
        }
    }

    pub fn synthesized() -> Self {
        Self::default()
    }
}

/// State common to every intention: identity, the weak parent back-link, the
/// producing CST node, the assume-nonnull flag captured at creation, and the
/// history log.
#[derive(Debug, Clone)]
pub struct IntentionBase {
    pub id: IntentionId,
    pub parent: Option<IntentionId>,
    pub source: SourceRef,
    pub in_nonnull_context: bool,
    pub history: IntentionHistory,
}

impl IntentionBase {
    /// Create base state with an eager `Creation` history record stamped with
    /// the producing node's location.
    pub fn new(ids: &IntentionIdGenerator, source: SourceRef, in_nonnull_context: bool) -> Self {
        let mut history = IntentionHistory::new();
        if source.file.is_empty() {
            history.record("Creation", "synthesized");
        } else {
            history.record(
                "Creation",
                format!("created from {} at {}", source.file, source.location),
            );
        }
        Self {
            id: ids.next_id(),
            parent: None,
            source,
            in_nonnull_context,
            history,
        }
    }

    /// Unlink from the current parent. Must precede any re-parenting.
    pub fn unlink(&mut self) {
        self.parent = None;
    }
}

/// Reference sites collected by the usage analysis pass, keyed by the
/// referenced intention. Consumed by the body-rewriting passes.
#[derive(Debug, Clone, Default)]
pub struct UsageGraph {
    sites: IndexMap<IntentionId, Vec<UsageSite>>,
}

/// One call or reference site inside a function body.
#[derive(Debug, Clone)]
pub struct UsageSite {
    pub file: String,
    /// Human-readable description of the enclosing body.
    pub context: String,
    pub is_write: bool,
}

impl UsageGraph {
    pub fn record(&mut self, target: IntentionId, site: UsageSite) {
        self.sites.entry(target).or_default().push(site);
    }

    pub fn sites_for(&self, target: IntentionId) -> &[UsageSite] {
        self.sites.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn referenced_ids(&self) -> impl Iterator<Item = IntentionId> + '_ {
        self.sites.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

// ============================================================================
// Intention Collection
// ============================================================================

/// Root of the intention graph: the ordered set of file intentions produced
/// from one translation run.
#[derive(Debug, Default)]
pub struct IntentionCollection {
    pub ids: Arc<IntentionIdGenerator>,
    files: Vec<FileIntention>,
    pub usage: UsageGraph,
}

impl IntentionCollection {
    pub fn new(ids: Arc<IntentionIdGenerator>) -> Self {
        Self {
            ids,
            files: Vec::new(),
            usage: UsageGraph::default(),
        }
    }

    pub fn push_file(&mut self, file: FileIntention) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[FileIntention] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut Vec<FileIntention> {
        &mut self.files
    }

    pub fn remove_file(&mut self, index: usize) -> FileIntention {
        let mut file = self.files.remove(index);
        file.base.unlink();
        file
    }

    pub fn file_index_by_path(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|f| f.source_path == path)
    }

    /// All type intentions across every file.
    pub fn types(&self) -> impl Iterator<Item = &TypeIntention> {
        self.files.iter().flat_map(|f| f.types.iter())
    }

    /// All class intentions across every file.
    pub fn classes(&self) -> impl Iterator<Item = &ClassIntention> {
        self.types().filter_map(|t| match t {
            TypeIntention::Class(c) => Some(c),
            _ => None,
        })
    }

    /// Global type lookup used by override detection and type resolution.
    pub fn find_class(&self, name: &str) -> Option<&ClassIntention> {
        self.classes().find(|c| c.name == name)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeIntention> {
        self.types().find(|t| t.name() == name)
    }
}
