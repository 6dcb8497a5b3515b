// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! File grouping pass
//!
//! Pairs each implementation file with the header sharing its basename,
//! merges the header's declarations into the implementation file, and drops
//! the header intention. Same-named classes are merged member by member;
//! everything else the header declares moves over so no declaration is lost.

use super::merging::merge_class;
use super::IntentionPass;
use crate::{FileIntention, IntentionCollection, TypeIntention};
use itertools::Itertools;

pub struct FileGroupingPass;

const TAG: &str = "FileGrouping";

impl IntentionPass for FileGroupingPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        // One pair at a time; removing the header shifts indices, so both
        // sides are located fresh on every round.
        loop {
            let Some((header_index, implementation_index)) = next_pair(collection) else {
                break;
            };
            let header = collection.remove_file(header_index);
            // Removing an earlier file shifts later indices down by one.
            let implementation_index = if header_index < implementation_index {
                implementation_index - 1
            } else {
                implementation_index
            };
            let implementation = &mut collection.files_mut()[implementation_index];
            log::debug!(
                "grouping {} into {}",
                header.source_path,
                implementation.source_path
            );
            merge_file(implementation, header);
        }
    }
}

fn next_pair(collection: &IntentionCollection) -> Option<(usize, usize)> {
    for (header_index, header) in collection.files().iter().enumerate() {
        if !header.is_header() {
            continue;
        }
        let implementation = collection.files().iter().find_position(|candidate| {
            candidate.is_implementation() && candidate.base_name() == header.base_name()
        });
        if let Some((implementation_index, _)) = implementation {
            return Some((header_index, implementation_index));
        }
    }
    None
}

/// Merge the whole contents of a header file intention into its
/// implementation file intention.
fn merge_file(target: &mut FileIntention, header: FileIntention) {
    let header_path = header.source_path.clone();

    for ty in header.types {
        match ty {
            TypeIntention::Class(class) => {
                let existing = target.types.iter_mut().find_map(|t| match t {
                    TypeIntention::Class(c) if c.name == class.name => Some(c),
                    _ => None,
                });
                match existing {
                    Some(existing) => merge_class(existing, class, TAG),
                    None => move_type(target, TypeIntention::Class(class), &header_path),
                }
            }
            TypeIntention::Extension(extension) => {
                let matched = target.types.iter().any(|t| match t {
                    TypeIntention::Extension(e) => {
                        e.class_name == extension.class_name
                            && e.category_name == extension.category_name
                    }
                    _ => false,
                });
                if matched {
                    // Category interface already represented by its
                    // implementation; fold members the same way classes merge.
                    merge_extension(target, extension);
                } else {
                    move_type(target, TypeIntention::Extension(extension), &header_path);
                }
            }
            other => {
                let duplicate = target.types.iter().any(|t| {
                    t.name() == other.name()
                        && std::mem::discriminant(t) == std::mem::discriminant(&other)
                });
                if !duplicate {
                    move_type(target, other, &header_path);
                }
            }
        }
    }

    for alias in header.typealiases {
        if !target.typealiases.iter().any(|a| a.name == alias.name) {
            target.add_typealias(alias);
        }
    }

    for global in header.globals {
        // `extern` declarations lose to the defining side.
        if !target.globals.iter().any(|g| g.name == global.name) {
            target.add_global(global);
        }
    }

    for function in header.global_functions {
        let existing = target
            .global_functions
            .iter_mut()
            .find(|f| f.signature.name == function.signature.name);
        match existing {
            Some(existing) => {
                if existing.body.is_none() {
                    existing.body = function.body;
                }
            }
            None => target.add_global_function(function),
        }
    }

    target
        .preprocessor_directives
        .extend(header.preprocessor_directives);

    target
        .base
        .history
        .record(TAG, format!("merged contents of {}", header_path));
}

fn move_type(target: &mut FileIntention, mut ty: TypeIntention, header_path: &str) {
    ty.base_mut()
        .history
        .record(TAG, format!("moved from {}", header_path));
    target.add_type(ty);
}

fn merge_extension(
    target: &mut FileIntention,
    source: crate::ClassExtensionIntention,
) {
    let existing = target
        .types
        .iter_mut()
        .find_map(|t| match t {
            TypeIntention::Extension(e)
                if e.class_name == source.class_name && e.category_name == source.category_name =>
            {
                Some(e)
            }
            _ => None,
        })
        .expect("caller checked the extension exists");

    for property in source.properties {
        if !existing.properties.iter().any(|p| p.name == property.name) {
            existing.add_property(property);
        }
    }
    for method in source.methods {
        let selector = method.selector();
        match existing
            .methods
            .iter_mut()
            .find(|m| m.selector() == selector)
        {
            Some(target_method) => {
                super::merging::merge_method_signatures(target_method, method, TAG)
            }
            None => existing.add_method(method),
        }
    }
    for protocol in source.protocols {
        if !existing.protocols.contains(&protocol) {
            existing.protocols.push(protocol);
        }
    }
    existing
        .base
        .history
        .record(TAG, "merged category interface declaration");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::IntentionPass;
    use crate::{
        ClassIntention, FunctionSignature, IntentionBase, IntentionIdGenerator, MethodIntention,
        SourceRef, SwiftType, TypeOrigin,
    };
    use objc_syntax::{Nullability, SourceLocation};
    use std::sync::Arc;

    fn collection() -> IntentionCollection {
        IntentionCollection::new(Arc::new(IntentionIdGenerator::new()))
    }

    fn file(collection: &IntentionCollection, path: &str) -> FileIntention {
        FileIntention::new(
            IntentionBase::new(
                &collection.ids,
                SourceRef::new(path, SourceLocation::unknown()),
                false,
            ),
            path,
        )
    }

    fn class(collection: &IntentionCollection, name: &str, origin: TypeOrigin) -> ClassIntention {
        ClassIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            name,
            origin,
        )
    }

    fn method(collection: &IntentionCollection, name: &str) -> MethodIntention {
        MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new(name, SwiftType::Void),
            body: None,
            is_optional: false,
            is_override: false,
        }
    }

    #[test]
    fn test_header_merges_into_implementation_and_is_dropped() {
        let mut collection = collection();

        let mut header = file(&collection, "C.h");
        let mut declared = class(&collection, "C", TypeOrigin::Interface);
        declared.superclass = Some("NSObject".to_string());
        let mut declared_method = method(&collection, "m");
        declared_method.signature.return_nullability = Nullability::Nonnull;
        declared.add_method(declared_method);
        header.add_type(TypeIntention::Class(declared));

        let mut implementation = file(&collection, "C.m");
        let mut defined = class(&collection, "C", TypeOrigin::Implementation);
        let mut defined_method = method(&collection, "m");
        defined_method.body = Some(crate::FunctionBody::empty());
        defined.add_method(defined_method);
        implementation.add_type(TypeIntention::Class(defined));

        collection.push_file(header);
        collection.push_file(implementation);

        FileGroupingPass.apply(&mut collection);

        assert_eq!(collection.files().len(), 1);
        let merged = collection.files()[0]
            .types
            .iter()
            .filter_map(TypeIntention::as_class)
            .find(|c| c.name == "C")
            .expect("class C survives");
        assert_eq!(merged.superclass.as_deref(), Some("NSObject"));
        assert_eq!(merged.methods.len(), 1);
        assert_eq!(
            merged.methods[0].signature.return_nullability,
            Nullability::Nonnull
        );
        assert!(merged.methods[0].body.is_some());
    }

    #[test]
    fn test_header_without_implementation_is_kept() {
        let mut collection = collection();
        let mut header = file(&collection, "Lone.h");
        header.add_type(TypeIntention::Class(class(
            &collection,
            "Lone",
            TypeOrigin::Interface,
        )));
        collection.push_file(header);

        FileGroupingPass.apply(&mut collection);

        assert_eq!(collection.files().len(), 1);
        assert_eq!(collection.files()[0].source_path, "Lone.h");
    }
}
