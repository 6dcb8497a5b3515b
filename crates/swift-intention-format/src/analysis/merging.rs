// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Shared declaration-merging routines
//!
//! Used by file grouping (header into implementation across files) and by
//! duplicate type removal (interface into implementation within one file).
//! Merge policy: implementation wins for bodies and parameter names,
//! declaration wins for nullability annotations it specifies and the
//! implementation leaves unspecified.

use crate::{ClassIntention, MethodIntention};

/// Merge an interface-sourced class declaration into its implementation-
/// sourced counterpart. `tag` is the calling pass's name for history records.
pub(crate) fn merge_class(target: &mut ClassIntention, source: ClassIntention, tag: &str) {
    let source_file = source.base.source.file.clone();

    if target.superclass.is_none() {
        target.superclass = source.superclass.clone();
    }

    for protocol in source.protocols {
        target.add_protocol(protocol);
    }

    for ivar in source.ivars {
        if !target.has_ivar(&ivar.name) {
            target.add_ivar(ivar);
        }
    }

    for property in source.properties {
        if target.property_index(&property.name).is_none() {
            target.add_property(property);
        }
    }

    for method in source.methods {
        let selector = method.selector();
        match target.methods.iter_mut().find(|m| m.selector() == selector) {
            Some(existing) => merge_method_signatures(existing, method, tag),
            None => target.add_method(method),
        }
    }

    target.synthesizes.extend(source.synthesizes);

    target
        .base
        .history
        .record(tag, format!("merged interface declaration from {}", source_file));
}

/// Reconcile two selector-matched method declarations.
///
/// The target (implementation side) keeps its parameter names and its body;
/// the incoming declaration contributes nullability annotations wherever the
/// target's are unspecified. When the target has no body, the incoming one is
/// adopted.
pub(crate) fn merge_method_signatures(
    target: &mut MethodIntention,
    incoming: MethodIntention,
    tag: &str,
) {
    let positions = target
        .signature
        .parameters
        .len()
        .min(incoming.signature.parameters.len());
    for index in 0..positions {
        let annotation = incoming.signature.parameters[index].nullability;
        if annotation.is_specified() && !target.signature.parameters[index].nullability.is_specified()
        {
            target.apply_parameter_nullability(index, annotation, tag);
        }
    }

    let return_annotation = incoming.signature.return_nullability;
    if return_annotation.is_specified() && !target.signature.return_nullability.is_specified() {
        target.apply_return_nullability(return_annotation, tag);
    }

    if target.body.is_none() && incoming.body.is_some() {
        target.body = incoming.body;
        target
            .base
            .history
            .record(tag, "adopted body from merged declaration");
    }
}
