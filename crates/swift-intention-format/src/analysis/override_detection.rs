// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Override detection pass
//!
//! A method is an override iff a member with an equal selector exists
//! somewhere up the resolved superclass chain, or its body calls
//! `super.<name>(...)`. Protocol requirements reached only through
//! conformance never count; the walk stays on the class chain.

use super::IntentionPass;
use crate::{FunctionBody, IntentionCollection, Selector, SwiftExpression, TypeIntention};
use indexmap::IndexMap;
use std::collections::HashSet;

pub struct OverrideDetectionPass;

const TAG: &str = "OverrideDetection";

/// Per-class selector table used for chain lookups.
struct ClassFacts {
    superclass: Option<String>,
    method_selectors: HashSet<Selector>,
    initializer_selectors: HashSet<Selector>,
}

impl IntentionPass for OverrideDetectionPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        let facts = collect_facts(collection);

        for file in collection.files_mut() {
            for ty in &mut file.types {
                let TypeIntention::Class(class) = ty else {
                    continue;
                };
                let superclass = class.superclass.clone();

                for method in &mut class.methods {
                    let selector = method.selector();
                    if chain_declares(&facts, superclass.as_deref(), &selector, false) {
                        method.mark_override(TAG, "matching selector found in supertype chain");
                    } else if body_calls_super(method.body.as_ref(), &method.signature.name) {
                        method.mark_override(TAG, "body calls super");
                    }
                }

                for initializer in &mut class.initializers {
                    let selector = initializer.selector();
                    if chain_declares(&facts, superclass.as_deref(), &selector, true) {
                        initializer
                            .mark_override(TAG, "matching initializer found in supertype chain");
                    } else if body_calls_super(initializer.body.as_ref(), "init") {
                        initializer.mark_override(TAG, "body calls super.init");
                    }
                }
            }
        }
    }
}

fn collect_facts(collection: &IntentionCollection) -> IndexMap<String, ClassFacts> {
    let mut facts: IndexMap<String, ClassFacts> = IndexMap::new();

    for ty in collection.types() {
        match ty {
            TypeIntention::Class(class) => {
                let entry = facts
                    .entry(class.name.clone())
                    .or_insert_with(|| ClassFacts {
                        superclass: None,
                        method_selectors: HashSet::new(),
                        initializer_selectors: HashSet::new(),
                    });
                if entry.superclass.is_none() {
                    entry.superclass = class.superclass.clone();
                }
                entry
                    .method_selectors
                    .extend(class.methods.iter().map(|m| m.selector()));
                entry
                    .initializer_selectors
                    .extend(class.initializers.iter().map(|i| i.selector()));
                // Property accessors answer to selectors too.
                for property in &class.properties {
                    entry.method_selectors.insert(property.getter_selector());
                    if !property.attributes.is_readonly {
                        entry.method_selectors.insert(property.setter_selector());
                    }
                }
            }
            // Category members extend the class they name.
            TypeIntention::Extension(extension) => {
                let entry = facts
                    .entry(extension.class_name.clone())
                    .or_insert_with(|| ClassFacts {
                        superclass: None,
                        method_selectors: HashSet::new(),
                        initializer_selectors: HashSet::new(),
                    });
                entry
                    .method_selectors
                    .extend(extension.methods.iter().map(|m| m.selector()));
            }
            _ => {}
        }
    }

    facts
}

/// Walk the superclass chain looking for a member with this selector. The
/// visited set guards against inheritance cycles in malformed input.
fn chain_declares(
    facts: &IndexMap<String, ClassFacts>,
    superclass: Option<&str>,
    selector: &Selector,
    initializer: bool,
) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = superclass;
    while let Some(name) = current {
        if !visited.insert(name) {
            break;
        }
        let Some(class_facts) = facts.get(name) else {
            break;
        };
        let selectors = if initializer {
            &class_facts.initializer_selectors
        } else {
            &class_facts.method_selectors
        };
        if selectors.contains(selector) {
            return true;
        }
        current = class_facts.superclass.as_deref();
    }
    false
}

/// `super.<name>(...)` anywhere in the body is sufficient evidence of an
/// override even when the supertype declaration is not visible.
fn body_calls_super(body: Option<&FunctionBody>, name: &str) -> bool {
    let Some(body) = body else {
        return false;
    };
    let mut found = false;
    body.for_each_expression(&mut |expression| {
        if let SwiftExpression::Member {
            base,
            name: member, ..
        } = expression
        {
            if member == name && matches!(base.as_ref(), SwiftExpression::Identifier(id) if id == "super")
            {
                found = true;
            }
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CallArgument, ClassIntention, CompoundStatement, FileIntention, FunctionSignature,
        IntentionBase, IntentionIdGenerator, MethodIntention, SourceRef, SwiftStatement,
        SwiftType, TypeOrigin,
    };
    use std::sync::Arc;

    fn method(ids: &IntentionIdGenerator, name: &str) -> MethodIntention {
        MethodIntention {
            base: IntentionBase::new(ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new(name, SwiftType::Void),
            body: None,
            is_optional: false,
            is_override: false,
        }
    }

    fn build_collection(
        build: impl FnOnce(&IntentionIdGenerator, &mut FileIntention),
    ) -> IntentionCollection {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "Test.m",
        );
        build(&collection.ids, &mut file);
        collection.push_file(file);
        collection
    }

    #[test]
    fn test_method_in_superclass_chain_is_override() {
        let mut collection = build_collection(|ids, file| {
            let mut base = ClassIntention::new(
                IntentionBase::new(ids, SourceRef::synthesized(), false),
                "Base",
                TypeOrigin::Implementation,
            );
            base.add_method(method(ids, "refresh"));
            file.add_type(TypeIntention::Class(base));

            let mut derived = ClassIntention::new(
                IntentionBase::new(ids, SourceRef::synthesized(), false),
                "Derived",
                TypeOrigin::Implementation,
            );
            derived.superclass = Some("Base".to_string());
            derived.add_method(method(ids, "refresh"));
            derived.add_method(method(ids, "onlyHere"));
            file.add_type(TypeIntention::Class(derived));
        });

        OverrideDetectionPass.apply(&mut collection);

        let derived = collection.find_class("Derived").unwrap();
        assert!(derived.methods[0].is_override);
        assert!(!derived.methods[1].is_override);
    }

    #[test]
    fn test_super_call_is_sufficient_evidence() {
        let mut collection = build_collection(|ids, file| {
            let mut class = ClassIntention::new(
                IntentionBase::new(ids, SourceRef::synthesized(), false),
                "C",
                TypeOrigin::Implementation,
            );
            // - (void)viewDidLoad { [super viewDidLoad]; }
            let mut m = method(ids, "viewDidLoad");
            let call = SwiftExpression::call(
                SwiftExpression::member(SwiftExpression::ident("super"), "viewDidLoad"),
                Vec::<CallArgument>::new(),
            );
            m.body = Some(FunctionBody::new(CompoundStatement::statements(vec![
                SwiftStatement::expression(call),
            ])));
            class.add_method(m);
            // Superclass UIViewController is not in the collection.
            class.superclass = Some("UIViewController".to_string());
            file.add_type(TypeIntention::Class(class));
        });

        OverrideDetectionPass.apply(&mut collection);

        let class = collection.find_class("C").unwrap();
        assert!(class.methods[0].is_override);
    }

    #[test]
    fn test_protocol_requirement_is_not_override() {
        let mut collection = build_collection(|ids, file| {
            let mut protocol = crate::ProtocolIntention::new(
                IntentionBase::new(ids, SourceRef::synthesized(), false),
                "P",
            );
            protocol.add_method(method(ids, "conform"));
            file.add_type(TypeIntention::Protocol(protocol));

            let mut class = ClassIntention::new(
                IntentionBase::new(ids, SourceRef::synthesized(), false),
                "C",
                TypeOrigin::Implementation,
            );
            class.add_protocol("P");
            class.add_method(method(ids, "conform"));
            file.add_type(TypeIntention::Class(class));
        });

        OverrideDetectionPass.apply(&mut collection);

        let class = collection.find_class("C").unwrap();
        assert!(!class.methods[0].is_override);
    }
}
