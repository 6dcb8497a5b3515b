// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source locations and assume-nonnull region tracking

use serde::{Deserialize, Serialize};

/// Position of a syntax node within its source file.
///
/// `token_index` is the index of the node's first token in the file's token
/// stream; it is the coordinate used to decide whether a node falls inside an
/// assume-nonnull region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub token_index: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, token_index: usize) -> Self {
        Self {
            line,
            column,
            token_index,
        }
    }

    /// Location for synthesized nodes that have no source counterpart.
    pub fn unknown() -> Self {
        Self {
            line: 0,
            column: 0,
            token_index: 0,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range of token indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, token_index: usize) -> bool {
        token_index >= self.start && token_index < self.end
    }
}

/// The set of `NS_ASSUME_NONNULL_BEGIN`/`NS_ASSUME_NONNULL_END` regions of a
/// file, expressed as token ranges delivered by the parser adapter.
///
/// Inside such a region, unannotated object pointer types default to nonnull.
#[derive(Debug, Clone, Default)]
pub struct NonnullRegions {
    ranges: Vec<TokenRange>,
}

impl NonnullRegions {
    pub fn new(ranges: Vec<TokenRange>) -> Self {
        Self { ranges }
    }

    /// Whole-file region, for sources known to be fully annotated.
    pub fn whole_file() -> Self {
        Self {
            ranges: vec![TokenRange::new(0, usize::MAX)],
        }
    }

    pub fn contains(&self, token_index: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(token_index))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        let regions = NonnullRegions::new(vec![TokenRange::new(4, 10), TokenRange::new(20, 25)]);
        assert!(!regions.contains(3));
        assert!(regions.contains(4));
        assert!(regions.contains(9));
        assert!(!regions.contains(10));
        assert!(regions.contains(22));
    }
}
