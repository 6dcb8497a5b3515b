// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
    /// Suppress `@objc` attributes, the implicit `NSObject` base class, and
    /// the `NSObjectProtocol` refinement on protocols.
    pub omit_objc_compatibility: bool,
    /// Emit each intention's history log as a comment block preceding its
    /// declaration.
    pub print_intention_history: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            omit_objc_compatibility: false,
            print_intention_history: false,
        }
    }
}
