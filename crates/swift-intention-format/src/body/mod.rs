// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Body-rewriting expression passes
//!
//! Consumers of the function body queue. Each pass takes one body out of the
//! collection, rewrites it against the type resolver's view of the intention
//! graph, and puts it back. Contract: preserve semantics while adopting
//! Swift's stricter optional discipline.

mod cast_insertion;
mod if_let_rewrite;
mod nil_coalescing;
mod type_resolver;

pub use cast_insertion::CastInsertionPass;
pub use if_let_rewrite::IfLetRewritePass;
pub use nil_coalescing::NilCoalescingPass;
pub use type_resolver::TypeResolver;

use crate::{
    BodyCarrier, FunctionBody, FunctionBodyQueueItem, IntentionCollection, PropertyMode,
    SwiftExpression, SwiftType, TypeIntention,
};

/// Per-item context produced by the queue delegate: the receiving file, the
/// enclosing type, the local bindings in scope, and the expected return type.
#[derive(Debug, Clone, Default)]
pub struct BodyContext {
    pub file: String,
    pub enclosing_type: Option<String>,
    pub locals: Vec<(String, SwiftType)>,
    pub return_type: Option<SwiftType>,
    pub description: String,
}

/// One rewriting pass over a single body.
pub trait BodyPass {
    fn name(&self) -> &'static str;
    fn rewrite(
        &self,
        body: FunctionBody,
        context: &BodyContext,
        resolver: &TypeResolver<'_>,
    ) -> FunctionBody;
}

/// The canonical body pipeline: qualify resolved references, adopt optional
/// chaining with coalesced defaults, insert numeric casts, and lift nullable
/// arguments into `if let` bindings.
pub fn default_body_passes() -> Vec<Box<dyn BodyPass>> {
    vec![
        Box::new(TypeResolutionPass),
        Box::new(NilCoalescingPass),
        Box::new(CastInsertionPass),
        Box::new(IfLetRewritePass),
    ]
}

/// Queue delegate building a [`BodyContext`] for each carrier.
pub fn body_context_for(collection: &IntentionCollection, carrier: BodyCarrier) -> BodyContext {
    let mut context = BodyContext {
        file: String::new(),
        enclosing_type: collection
            .carrier_enclosing_type(carrier)
            .map(str::to_string),
        locals: Vec::new(),
        return_type: None,
        description: collection.describe_carrier(carrier),
    };

    match carrier {
        BodyCarrier::GlobalFunction { file, index } => {
            if let Some(f) = collection.files().get(file) {
                context.file = f.source_path.clone();
                if let Some(function) = f.global_functions.get(index) {
                    for parameter in &function.signature.parameters {
                        context
                            .locals
                            .push((parameter.name.clone(), parameter.swift_type.clone()));
                    }
                    context.return_type = Some(function.signature.return_type.clone());
                }
            }
        }
        BodyCarrier::Method {
            file,
            type_index,
            index,
        } => {
            if let Some(f) = collection.files().get(file) {
                context.file = f.source_path.clone();
                if let Some(method) = f.types.get(type_index).and_then(|t| t.methods().get(index)) {
                    for parameter in &method.signature.parameters {
                        context
                            .locals
                            .push((parameter.name.clone(), parameter.swift_type.clone()));
                    }
                    context.return_type = Some(method.signature.return_type.clone());
                }
            }
        }
        BodyCarrier::Initializer {
            file,
            type_index,
            index,
        } => {
            if let Some(f) = collection.files().get(file) {
                context.file = f.source_path.clone();
                let initializer = f
                    .types
                    .get(type_index)
                    .and_then(TypeIntention::as_class)
                    .and_then(|c| c.initializers.get(index));
                if let Some(initializer) = initializer {
                    for parameter in &initializer.parameters {
                        context
                            .locals
                            .push((parameter.name.clone(), parameter.swift_type.clone()));
                    }
                }
            }
        }
        BodyCarrier::Property {
            file,
            type_index,
            index,
            is_setter,
        } => {
            if let Some(f) = collection.files().get(file) {
                context.file = f.source_path.clone();
                if let Some(property) =
                    f.types.get(type_index).and_then(|t| t.properties().get(index))
                {
                    if is_setter {
                        let value_identifier = match &property.mode {
                            PropertyMode::Accessors { setter, .. } => {
                                setter.value_identifier.clone()
                            }
                            _ => "newValue".to_string(),
                        };
                        context
                            .locals
                            .push((value_identifier, property.storage.swift_type.clone()));
                    } else {
                        context.return_type = Some(property.storage.swift_type.clone());
                    }
                }
            }
        }
    }

    context
}

/// Drain queue items through the body passes, sequentially.
pub fn run_body_passes(
    collection: &mut IntentionCollection,
    items: Vec<FunctionBodyQueueItem<BodyContext>>,
    passes: &[Box<dyn BodyPass>],
) {
    for item in items {
        let Some(mut body) = collection.take_body(item.carrier) else {
            continue;
        };
        {
            let resolver = TypeResolver::new(collection, &item.context);
            for pass in passes {
                log::debug!("body pass {} on {}", pass.name(), item.context.description);
                body = pass.rewrite(body, &item.context, &resolver);
            }
        }
        collection.put_body(item.carrier, body);
    }
}

/// Type resolution pass: rewrites references that resolution can pin to a
/// declaration into their qualified Swift form. Concretely, bare Objective-C
/// enumerator names become `EnumName.case` accesses.
pub struct TypeResolutionPass;

impl BodyPass for TypeResolutionPass {
    fn name(&self) -> &'static str {
        "TypeResolution"
    }

    fn rewrite(
        &self,
        body: FunctionBody,
        _context: &BodyContext,
        resolver: &TypeResolver<'_>,
    ) -> FunctionBody {
        body.map_expressions(&mut |expression| match expression {
            SwiftExpression::Identifier(name) => {
                // Scope wins: a parameter, local, member, or global with the
                // same name is a plain reference, never an enum case.
                match resolver.enum_case_qualifier(&name) {
                    Some(enum_name) => SwiftExpression::member(
                        SwiftExpression::ident(enum_name),
                        &name,
                    ),
                    None => SwiftExpression::Identifier(name),
                }
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CompoundStatement, EnumCaseIntention, EnumIntention, FileIntention, IntentionBase,
        IntentionIdGenerator, SourceRef, StatementItem, SwiftStatement,
    };
    use std::sync::Arc;

    /// A collection declaring `enum Direction { case left }`.
    fn collection_with_enum() -> IntentionCollection {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "Direction.m",
        );
        let mut enumeration = EnumIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "Direction",
            SwiftType::nominal("Int"),
        );
        enumeration.add_case(EnumCaseIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            name: "left".to_string(),
            raw_value: None,
        });
        file.add_type(TypeIntention::Enum(enumeration));
        collection.push_file(file);
        collection
    }

    fn body_referencing(name: &str) -> FunctionBody {
        FunctionBody::new(CompoundStatement::statements(vec![
            SwiftStatement::expression(SwiftExpression::ident(name)),
        ]))
    }

    fn first_expression(body: &FunctionBody) -> &SwiftExpression {
        let StatementItem::Statement(SwiftStatement::Expressions(expressions)) =
            &body.compound.items[0]
        else {
            panic!("expected an expression statement");
        };
        &expressions[0]
    }

    #[test]
    fn test_bare_enum_case_is_qualified() {
        let collection = collection_with_enum();
        let context = BodyContext::default();
        let resolver = TypeResolver::new(&collection, &context);

        let rewritten =
            TypeResolutionPass.rewrite(body_referencing("left"), &context, &resolver);

        assert_eq!(
            *first_expression(&rewritten),
            SwiftExpression::member(SwiftExpression::ident("Direction"), "left")
        );
    }

    #[test]
    fn test_parameter_shadowing_enum_case_stays_plain() {
        let collection = collection_with_enum();
        let context = BodyContext {
            locals: vec![("left".to_string(), SwiftType::nominal("Int"))],
            ..BodyContext::default()
        };
        let resolver = TypeResolver::new(&collection, &context);

        let rewritten =
            TypeResolutionPass.rewrite(body_referencing("left"), &context, &resolver);

        // The parameter shadows the unrelated enum case.
        assert_eq!(*first_expression(&rewritten), SwiftExpression::ident("left"));
    }
}
