// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Parser adapters

use anyhow::anyhow;
use objc_syntax::{Diagnostics, InputSource, ParsedSource, ParserAdapter};
use std::collections::HashMap;
use std::sync::Mutex;

/// An adapter over already-parsed CSTs, keyed by source name. This is the
/// seam tests and embedders use when the external grammar runs out of
/// process: parse elsewhere, hand the trees in here.
#[derive(Debug, Default)]
pub struct PreparsedAdapter {
    files: Mutex<HashMap<String, ParsedSource>>,
}

impl PreparsedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, parsed: ParsedSource) {
        self.files
            .lock()
            .expect("adapter mutex poisoned")
            .insert(name.into(), parsed);
    }

    pub fn with(mut self, name: impl Into<String>, parsed: ParsedSource) -> Self {
        self.insert(name, parsed);
        self
    }
}

impl ParserAdapter for PreparsedAdapter {
    fn parse(
        &self,
        source: &InputSource,
        _diagnostics: &mut Diagnostics,
    ) -> anyhow::Result<ParsedSource> {
        self.files
            .lock()
            .expect("adapter mutex poisoned")
            .get(&source.name)
            .cloned()
            .ok_or_else(|| anyhow!("no parsed tree registered for '{}'", source.name))
    }
}
