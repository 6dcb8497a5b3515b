// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Duplicate type removal pass
//!
//! After file grouping, a file that declared both `@interface C` and
//! `@implementation C` (the single-file layout) still holds two class
//! intentions for `C`. The interface-sourced one is folded into the
//! implementation-sourced one and removed.

use super::merging::merge_class;
use super::IntentionPass;
use crate::{IntentionCollection, TypeIntention, TypeOrigin};

pub struct DuplicateTypeRemovalPass;

const TAG: &str = "DuplicateTypeRemoval";

impl IntentionPass for DuplicateTypeRemovalPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        for file in collection.files_mut() {
            loop {
                let duplicate = file.types.iter().enumerate().find_map(|(index, ty)| {
                    let class = ty.as_class()?;
                    if class.origin != TypeOrigin::Interface {
                        return None;
                    }
                    let has_implementation = file.types.iter().any(|other| {
                        other
                            .as_class()
                            .is_some_and(|c| c.origin == TypeOrigin::Implementation && c.name == class.name)
                    });
                    has_implementation.then_some(index)
                });

                let Some(index) = duplicate else { break };
                let TypeIntention::Class(interface_class) = file.take_type(index) else {
                    unreachable!("index located a class intention");
                };
                let name = interface_class.name.clone();
                let target = file
                    .types
                    .iter_mut()
                    .find_map(|t| match t {
                        TypeIntention::Class(c)
                            if c.origin == TypeOrigin::Implementation && c.name == name =>
                        {
                            Some(c)
                        }
                        _ => None,
                    })
                    .expect("implementation counterpart located above");
                merge_class(target, interface_class, TAG);
                target
                    .base
                    .history
                    .record(TAG, "removed duplicate interface-sourced declaration");
            }
        }
    }
}
