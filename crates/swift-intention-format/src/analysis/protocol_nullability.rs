// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Protocol nullability propagation pass
//!
//! A conforming class frequently omits the nullability its protocol spells
//! out. For every class, each method whose selector matches a requirement of
//! a conformed protocol inherits the requirement's specified annotations
//! wherever its own are unspecified, under the same reconciliation policy as
//! header/implementation merging.

use super::IntentionPass;
use crate::{IntentionCollection, Selector, TypeIntention};
use objc_syntax::Nullability;
use std::collections::HashMap;

pub struct ProtocolNullabilityPass;

const TAG: &str = "ProtocolNullability";

/// Selector-keyed nullability of one protocol requirement.
#[derive(Clone)]
struct RequirementAnnotations {
    parameters: Vec<Nullability>,
    return_nullability: Nullability,
}

impl IntentionPass for ProtocolNullabilityPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        // Protocol requirement annotations, collected up front so classes
        // can be mutated freely afterwards.
        let mut requirements: HashMap<String, HashMap<Selector, RequirementAnnotations>> =
            HashMap::new();
        for ty in collection.types() {
            let TypeIntention::Protocol(protocol) = ty else {
                continue;
            };
            let entry = requirements.entry(protocol.name.clone()).or_default();
            for method in &protocol.methods {
                entry.insert(
                    method.selector(),
                    RequirementAnnotations {
                        parameters: method
                            .signature
                            .parameters
                            .iter()
                            .map(|p| p.nullability)
                            .collect(),
                        return_nullability: method.signature.return_nullability,
                    },
                );
            }
        }

        if requirements.is_empty() {
            return;
        }

        for file in collection.files_mut() {
            for ty in &mut file.types {
                let TypeIntention::Class(class) = ty else {
                    continue;
                };
                for protocol_name in class.protocols.clone() {
                    let Some(protocol_requirements) = requirements.get(&protocol_name) else {
                        continue;
                    };
                    for method in &mut class.methods {
                        let Some(requirement) = protocol_requirements.get(&method.selector())
                        else {
                            continue;
                        };
                        for (index, annotation) in requirement.parameters.iter().enumerate() {
                            if index >= method.signature.parameters.len() {
                                break;
                            }
                            if annotation.is_specified()
                                && !method.signature.parameters[index].nullability.is_specified()
                            {
                                method.apply_parameter_nullability(index, *annotation, TAG);
                            }
                        }
                        if requirement.return_nullability.is_specified()
                            && !method.signature.return_nullability.is_specified()
                        {
                            method.apply_return_nullability(requirement.return_nullability, TAG);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ClassIntention, FileIntention, FunctionSignature, IntentionBase, IntentionIdGenerator,
        MethodIntention, ParameterSignature, ProtocolIntention, SourceRef, SwiftType, TypeOrigin,
    };
    use std::sync::Arc;

    #[test]
    fn test_conformer_inherits_protocol_annotations() {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C.m",
        );

        // @protocol P: - (nonnull NSString *)f:(nullable NSObject *)o;
        let mut protocol = ProtocolIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "P",
        );
        let mut requirement_signature = FunctionSignature::new("f", SwiftType::nominal("String"))
            .with_parameters(vec![ParameterSignature {
                label: None,
                name: "o".to_string(),
                swift_type: SwiftType::nominal("NSObject").optional(),
                nullability: Nullability::Nullable,
            }]);
        requirement_signature.return_nullability = Nullability::Nonnull;
        protocol.add_method(MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: requirement_signature,
            body: None,
            is_optional: false,
            is_override: false,
        });
        file.add_type(TypeIntention::Protocol(protocol));

        // @interface C <P>: - (NSString *)f:(NSObject *)o;
        let mut class = ClassIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C",
            TypeOrigin::Implementation,
        );
        class.add_protocol("P");
        class.add_method(MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new(
                "f",
                SwiftType::nominal("String").implicitly_unwrapped(),
            )
            .with_parameters(vec![ParameterSignature::new(
                None,
                "o",
                SwiftType::nominal("NSObject").implicitly_unwrapped(),
            )]),
            body: None,
            is_optional: false,
            is_override: false,
        });
        file.add_type(TypeIntention::Class(class));
        collection.push_file(file);

        ProtocolNullabilityPass.apply(&mut collection);

        let class = collection.find_class("C").unwrap();
        let method = &class.methods[0];
        // (NSObject?) -> String, inherited from the protocol.
        assert_eq!(
            method.signature.parameters[0].swift_type,
            SwiftType::nominal("NSObject").optional()
        );
        assert_eq!(method.signature.return_type, SwiftType::nominal("String"));
    }
}
