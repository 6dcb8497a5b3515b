// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source providers

use objc_syntax::{InputSource, SourceProvider};
use std::path::PathBuf;

/// In-memory sources, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceProvider {
    sources: Vec<InputSource>,
}

impl MemorySourceProvider {
    pub fn new(sources: Vec<InputSource>) -> Self {
        Self { sources }
    }

    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.push(InputSource::new(name, text));
    }
}

impl SourceProvider for MemorySourceProvider {
    fn sources(&self) -> Vec<InputSource> {
        self.sources.clone()
    }
}

/// Reads an explicit list of paths from disk. A file that cannot be read is
/// dropped with a warning; the other files continue.
#[derive(Debug, Clone, Default)]
pub struct FileListSourceProvider {
    paths: Vec<PathBuf>,
}

impl FileListSourceProvider {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl SourceProvider for FileListSourceProvider {
    fn sources(&self) -> Vec<InputSource> {
        self.paths
            .iter()
            .filter_map(|path| match std::fs::read_to_string(path) {
                Ok(text) => Some(InputSource::new(path.to_string_lossy(), text)),
                Err(error) => {
                    log::warn!("skipping {}: {}", path.display(), error);
                    None
                }
            })
            .collect()
    }
}
