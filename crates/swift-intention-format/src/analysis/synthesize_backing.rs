// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Backing field synthesis pass
//!
//! Translates `@synthesize` directives. `@synthesize a = a;` collapses the
//! property and its ivar into one stored property; `@synthesize a = b;`
//! materializes the named backing ivar and turns the property into a
//! computed wrapper over it. `@dynamic` does nothing.
//!
//! Properties with no directive are also given a backing field when some
//! body in the class reaches for the conventional `_name` ivar, which is how
//! `self->_a` references keep working after translation.

use super::IntentionPass;
use crate::{
    AccessLevel, CompoundStatement, FunctionBody, InstanceVariableIntention, IntentionBase,
    IntentionCollection, IntentionIdGenerator, PropertyMode, PropertySetter, SourceRef,
    StatementItem, SwiftExpression, SwiftOperator, SwiftStatement, SynthesizeDirective,
    TypeIntention,
};
use std::collections::HashSet;

pub struct SynthesizeBackingFieldPass;

const TAG: &str = "SynthesizeBackingField";

impl IntentionPass for SynthesizeBackingFieldPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        let ids = collection.ids.clone();
        for file in collection.files_mut() {
            for ty in &mut file.types {
                if let TypeIntention::Class(class) = ty {
                    apply_to_class(&ids, class);
                }
            }
        }
    }
}

fn apply_to_class(ids: &IntentionIdGenerator, class: &mut crate::ClassIntention) {
    let directives: Vec<SynthesizeDirective> = class.synthesizes.clone();
    let referenced = referenced_identifiers(class);

    for directive in &directives {
        if directive.is_dynamic {
            continue;
        }
        let Some(property_index) = class.property_index(&directive.property_name) else {
            continue;
        };
        let backing = directive
            .ivar_name
            .clone()
            .unwrap_or_else(|| directive.property_name.clone());

        if backing == directive.property_name {
            collapse_property_and_ivar(class, property_index, &backing);
        } else {
            synthesize_named_backing(ids, class, property_index, &backing);
        }
    }

    // Implicit synthesis: a stored property whose `_name` ivar is referenced
    // somewhere in the class gets the conventional backing field.
    let implicit: Vec<(usize, String)> = class
        .properties
        .iter()
        .enumerate()
        .filter(|(_, p)| matches!(p.mode, PropertyMode::Stored))
        .filter(|(_, p)| !directives.iter().any(|d| d.property_name == p.name))
        .map(|(index, p)| (index, format!("_{}", p.name)))
        .filter(|(_, underscored)| {
            referenced.contains(underscored) || class.has_ivar(underscored)
        })
        .collect();

    for (property_index, backing) in implicit {
        synthesize_named_backing(ids, class, property_index, &backing);
    }
}

/// Every identifier and member name read or written inside the class's
/// bodies. `self->_a` lowers to a member access named `_a`, so member names
/// count too.
fn referenced_identifiers(class: &crate::ClassIntention) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut visit = |expression: &SwiftExpression| match expression {
        SwiftExpression::Identifier(name) => {
            names.insert(name.clone());
        }
        SwiftExpression::Member { name, .. } => {
            names.insert(name.clone());
        }
        _ => {}
    };
    for method in &class.methods {
        if let Some(body) = &method.body {
            body.for_each_expression(&mut visit);
        }
    }
    for initializer in &class.initializers {
        if let Some(body) = &initializer.body {
            body.for_each_expression(&mut visit);
        }
    }
    names
}

/// `@synthesize a = a;`: the property and the ivar become one stored
/// property. A readonly property over a `@private` ivar keeps its setter
/// private.
fn collapse_property_and_ivar(
    class: &mut crate::ClassIntention,
    property_index: usize,
    backing: &str,
) {
    let ivar_access = class
        .ivars
        .iter()
        .position(|i| i.name == backing)
        .map(|index| {
            let ivar = class.ivars.remove(index);
            ivar.access
        });

    let property = &mut class.properties[property_index];
    if property.attributes.is_readonly && ivar_access == Some(AccessLevel::Private) {
        property.setter_access = Some(AccessLevel::Private);
    }
    property.base.history.record(
        TAG,
        format!("collapsed with ivar '{}' into a stored property", backing),
    );
}

/// `@synthesize a = b;` (and implicit `_a` synthesis): keep a stored ivar
/// and turn the property into a computed wrapper over it.
fn synthesize_named_backing(
    ids: &IntentionIdGenerator,
    class: &mut crate::ClassIntention,
    property_index: usize,
    backing: &str,
) {
    if !class.has_ivar(backing) {
        let storage = class.properties[property_index].storage.clone();
        let mut ivar = InstanceVariableIntention {
            base: IntentionBase::new(ids, SourceRef::synthesized(), false),
            name: backing.to_string(),
            storage,
            access: AccessLevel::Private,
        };
        ivar.base.history.record(
            TAG,
            format!(
                "synthesized backing field for property '{}'",
                class.properties[property_index].name
            ),
        );
        class.add_ivar(ivar);
    }

    let property = &mut class.properties[property_index];
    if !matches!(property.mode, PropertyMode::Stored) {
        return;
    }

    let getter = FunctionBody::new(CompoundStatement::statements(vec![SwiftStatement::Return(
        Some(SwiftExpression::ident(backing)),
    )]));

    let mode = if property.attributes.is_readonly {
        PropertyMode::Computed(getter)
    } else {
        let assignment = SwiftExpression::Assignment {
            target: Box::new(SwiftExpression::ident(backing)),
            op: SwiftOperator::Assign,
            value: Box::new(SwiftExpression::ident("newValue")),
        };
        PropertyMode::Accessors {
            getter,
            setter: PropertySetter {
                value_identifier: "newValue".to_string(),
                body: FunctionBody::new(CompoundStatement::new(vec![StatementItem::Statement(
                    SwiftStatement::expression(assignment),
                )])),
            },
        }
    };
    property.set_mode(
        mode,
        TAG,
        &format!("computed over backing field '{}'", backing),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ClassIntention, FunctionSignature, MethodIntention, PropertyAttributes, PropertyIntention,
        Storage, SwiftType, TypeOrigin,
    };

    fn class_with_property(ids: &IntentionIdGenerator, readonly: bool) -> ClassIntention {
        let mut class = ClassIntention::new(
            IntentionBase::new(ids, SourceRef::synthesized(), false),
            "C",
            TypeOrigin::Implementation,
        );
        class.add_property(PropertyIntention {
            base: IntentionBase::new(ids, SourceRef::synthesized(), false),
            name: "a".to_string(),
            storage: Storage::variable(SwiftType::nominal("Int")),
            attributes: PropertyAttributes {
                is_readonly: readonly,
                ..PropertyAttributes::default()
            },
            mode: PropertyMode::Stored,
            is_optional: false,
            setter_access: None,
        });
        class
    }

    #[test]
    fn test_same_name_synthesize_collapses_to_stored() {
        let ids = IntentionIdGenerator::new();
        let mut class = class_with_property(&ids, true);
        class.add_ivar(InstanceVariableIntention {
            base: IntentionBase::new(&ids, SourceRef::synthesized(), false),
            name: "a".to_string(),
            storage: Storage::variable(SwiftType::nominal("Int")),
            access: AccessLevel::Private,
        });
        class.synthesizes.push(SynthesizeDirective {
            property_name: "a".to_string(),
            ivar_name: Some("a".to_string()),
            is_dynamic: false,
        });

        apply_to_class(&ids, &mut class);

        assert!(class.ivars.is_empty());
        assert!(matches!(class.properties[0].mode, PropertyMode::Stored));
        assert_eq!(class.properties[0].setter_access, Some(AccessLevel::Private));
    }

    #[test]
    fn test_renamed_synthesize_creates_backing_and_computes() {
        let ids = IntentionIdGenerator::new();
        let mut class = class_with_property(&ids, false);
        class.synthesizes.push(SynthesizeDirective {
            property_name: "a".to_string(),
            ivar_name: Some("storedA".to_string()),
            is_dynamic: false,
        });

        apply_to_class(&ids, &mut class);

        assert!(class.has_ivar("storedA"));
        assert!(matches!(
            class.properties[0].mode,
            PropertyMode::Accessors { .. }
        ));
    }

    #[test]
    fn test_dynamic_is_ignored() {
        let ids = IntentionIdGenerator::new();
        let mut class = class_with_property(&ids, false);
        class.synthesizes.push(SynthesizeDirective {
            property_name: "a".to_string(),
            ivar_name: None,
            is_dynamic: true,
        });

        apply_to_class(&ids, &mut class);

        assert!(class.ivars.is_empty());
        assert!(matches!(class.properties[0].mode, PropertyMode::Stored));
    }

    #[test]
    fn test_underscore_reference_triggers_implicit_backing() {
        let ids = IntentionIdGenerator::new();
        let mut class = class_with_property(&ids, true);

        // - (void)m { self->_a = 0; }
        let assignment = SwiftExpression::Assignment {
            target: Box::new(SwiftExpression::member(SwiftExpression::ident("self"), "_a")),
            op: SwiftOperator::Assign,
            value: Box::new(SwiftExpression::integer(0)),
        };
        class.add_method(MethodIntention {
            base: IntentionBase::new(&ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new("m", SwiftType::Void),
            body: Some(FunctionBody::new(CompoundStatement::statements(vec![
                SwiftStatement::expression(assignment),
            ]))),
            is_optional: false,
            is_override: false,
        });

        apply_to_class(&ids, &mut class);

        assert!(class.has_ivar("_a"));
        assert_eq!(class.ivars[0].access, AccessLevel::Private);
        // Readonly property becomes a computed getter over the backing field.
        assert!(matches!(class.properties[0].mode, PropertyMode::Computed(_)));
    }
}
