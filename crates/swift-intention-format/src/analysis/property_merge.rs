// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Property merge pass
//!
//! Finds explicit accessor methods whose selectors match a property's
//! synthesized getter (`name`) and setter (`setName:`), removes them, and
//! folds their bodies into the property. After this pass no method in a type
//! answers to one of that type's property accessor selectors.

use super::IntentionPass;
use crate::{
    FunctionBody, IntentionCollection, MethodIntention, PropertyIntention, PropertyMode,
    PropertySetter, TypeIntention,
};

pub struct PropertyMergePass;

const TAG: &str = "PropertyMerge";

impl IntentionPass for PropertyMergePass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        for file in collection.files_mut() {
            for ty in &mut file.types {
                match ty {
                    TypeIntention::Class(class) => {
                        merge_accessors(&mut class.properties, &mut class.methods);
                    }
                    TypeIntention::Extension(extension) => {
                        merge_accessors(&mut extension.properties, &mut extension.methods);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn merge_accessors(properties: &mut [PropertyIntention], methods: &mut Vec<MethodIntention>) {
    for property in properties.iter_mut() {
        // Only stored properties can still have free-standing accessors.
        if !matches!(property.mode, PropertyMode::Stored) {
            continue;
        }

        let getter_selector = property.getter_selector();
        let setter_selector = property.setter_selector();

        // Accessor declarations without bodies are redundant with the
        // property itself; after this pass no method answers to an accessor
        // selector.
        methods.retain(|m| {
            let selector = m.selector();
            m.body.is_some() || (selector != getter_selector && selector != setter_selector)
        });

        let getter_index = methods.iter().position(|m| {
            m.selector() == getter_selector && m.body.as_ref().is_some_and(|b| !b.is_empty())
        });
        let Some(getter_index) = getter_index else {
            continue;
        };

        let mut getter = remove_accessor(methods, getter_index, &property.name);
        let getter_body = getter.body.take().expect("getter body checked above");

        let setter_index = methods
            .iter()
            .position(|m| m.selector() == setter_selector && m.body.is_some());

        let (mode, description) = match setter_index {
            Some(setter_index) => {
                let mut setter = remove_accessor(methods, setter_index, &property.name);
                let setter_body = setter.body.take().expect("setter body checked above");
                let value_identifier = setter
                    .signature
                    .parameters
                    .first()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "newValue".to_string());
                (
                    PropertyMode::Accessors {
                        getter: getter_body,
                        setter: PropertySetter {
                            value_identifier,
                            body: setter_body,
                        },
                    },
                    format!(
                        "folded methods '{}' and '{}' into accessors",
                        getter_selector, setter_selector
                    ),
                )
            }
            None => (
                PropertyMode::Computed(getter_body),
                format!("folded method '{}' into computed getter", getter_selector),
            ),
        };

        property.set_mode(mode, TAG, &description);
    }
}

/// Unlink an accessor method, recording the fusion on it before it is
/// dropped.
fn remove_accessor(
    methods: &mut Vec<MethodIntention>,
    index: usize,
    property_name: &str,
) -> MethodIntention {
    let mut method = methods.remove(index);
    method.base.unlink();
    method.base.history.record(
        TAG,
        format!("fused into property '{}'", property_name),
    );
    method
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CompoundStatement, FunctionSignature, IntentionBase, IntentionIdGenerator,
        ParameterSignature, PropertyAttributes, SourceRef, Storage, SwiftExpression,
        SwiftStatement, SwiftType,
    };

    fn body_returning(name: &str) -> FunctionBody {
        FunctionBody::new(CompoundStatement::statements(vec![SwiftStatement::Return(
            Some(SwiftExpression::ident(name)),
        )]))
    }

    fn property(ids: &IntentionIdGenerator, name: &str) -> PropertyIntention {
        PropertyIntention {
            base: IntentionBase::new(ids, SourceRef::synthesized(), false),
            name: name.to_string(),
            storage: Storage::variable(SwiftType::nominal("Int")),
            attributes: PropertyAttributes::default(),
            mode: PropertyMode::Stored,
            is_optional: false,
            setter_access: None,
        }
    }

    fn method(ids: &IntentionIdGenerator, signature: FunctionSignature) -> MethodIntention {
        MethodIntention {
            base: IntentionBase::new(ids, SourceRef::synthesized(), false),
            signature,
            body: Some(body_returning("_count")),
            is_optional: false,
            is_override: false,
        }
    }

    #[test]
    fn test_getter_setter_pair_is_folded() {
        let ids = IntentionIdGenerator::new();
        let mut properties = vec![property(&ids, "count")];
        let mut methods = vec![
            method(&ids, FunctionSignature::new("count", SwiftType::nominal("Int"))),
            method(
                &ids,
                FunctionSignature::new("setCount", SwiftType::Void).with_parameters(vec![
                    ParameterSignature::new(None, "value", SwiftType::nominal("Int")),
                ]),
            ),
        ];

        merge_accessors(&mut properties, &mut methods);

        // Both accessor methods vanish as independent intentions.
        assert!(methods.is_empty());
        match &properties[0].mode {
            PropertyMode::Accessors { getter, setter } => {
                assert!(!getter.is_empty());
                assert_eq!(setter.value_identifier, "value");
                assert!(!setter.body.is_empty());
            }
            other => panic!("expected accessors, got {:?}", other),
        }
        // History records the fusion.
        assert!(properties[0]
            .base
            .history
            .entries()
            .iter()
            .any(|e| e.tag == "PropertyMerge"));
    }

    #[test]
    fn test_getter_only_becomes_computed() {
        let ids = IntentionIdGenerator::new();
        let mut properties = vec![property(&ids, "count")];
        let mut methods = vec![method(
            &ids,
            FunctionSignature::new("count", SwiftType::nominal("Int")),
        )];

        merge_accessors(&mut properties, &mut methods);

        assert!(methods.is_empty());
        assert!(matches!(properties[0].mode, PropertyMode::Computed(_)));
    }

    #[test]
    fn test_unrelated_methods_survive() {
        let ids = IntentionIdGenerator::new();
        let mut properties = vec![property(&ids, "count")];
        let mut methods = vec![method(
            &ids,
            FunctionSignature::new("reset", SwiftType::Void),
        )];

        merge_accessors(&mut properties, &mut methods);

        assert_eq!(methods.len(), 1);
        assert!(matches!(properties[0].mode, PropertyMode::Stored));
    }
}
