// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Usage analysis pass
//!
//! Walks every function body and records, for each referenced declaration,
//! the sites that call or mention it. The resulting [`UsageGraph`] feeds the
//! downstream body-rewriting passes. A mutating site contributes both a
//! reference record and a write record for its target.

use super::IntentionPass;
use crate::{
    FunctionBody, IntentionCollection, IntentionId, PropertyMode, SwiftExpression, TypeIntention,
    UsageGraph, UsageSite,
};
use std::collections::HashMap;

pub struct UsageAnalysisPass;

const TAG: &str = "UsageAnalysis";

#[derive(Default)]
struct ClassSymbols {
    ivars: HashMap<String, IntentionId>,
    properties: HashMap<String, IntentionId>,
    /// Keyed by method name and argument count.
    methods: HashMap<(String, usize), IntentionId>,
}

#[derive(Default)]
struct SymbolTables {
    /// Bare enumerator names; Objective-C enum cases are file-scope symbols.
    enum_cases: HashMap<String, IntentionId>,
    /// Per-enum case maps for the qualified `E.case` form.
    enums: HashMap<String, HashMap<String, IntentionId>>,
    globals: HashMap<String, IntentionId>,
    global_functions: HashMap<String, IntentionId>,
    classes: HashMap<String, ClassSymbols>,
}

impl IntentionPass for UsageAnalysisPass {
    fn name(&self) -> &'static str {
        TAG
    }

    fn apply(&mut self, collection: &mut IntentionCollection) {
        let tables = build_tables(collection);
        let mut usage = UsageGraph::default();

        for file in collection.files() {
            let path = &file.source_path;
            for function in &file.global_functions {
                if let Some(body) = &function.body {
                    let context = format!("func {}", function.signature.name);
                    visit_body(&tables, &mut usage, body, None, path, &context);
                }
            }
            for ty in &file.types {
                match ty {
                    TypeIntention::Class(class) => {
                        for method in &class.methods {
                            if let Some(body) = &method.body {
                                let context = format!("{}.{}", class.name, method.signature.name);
                                visit_body(&tables, &mut usage, body, Some(&class.name), path, &context);
                            }
                        }
                        for initializer in &class.initializers {
                            if let Some(body) = &initializer.body {
                                let context = format!("{}.init", class.name);
                                visit_body(&tables, &mut usage, body, Some(&class.name), path, &context);
                            }
                        }
                        for property in &class.properties {
                            let context = format!("{}.{}", class.name, property.name);
                            for body in property_bodies(&property.mode) {
                                visit_body(&tables, &mut usage, body, Some(&class.name), path, &context);
                            }
                        }
                    }
                    TypeIntention::Extension(extension) => {
                        for method in &extension.methods {
                            if let Some(body) = &method.body {
                                let context =
                                    format!("{}.{}", extension.class_name, method.signature.name);
                                visit_body(
                                    &tables,
                                    &mut usage,
                                    body,
                                    Some(&extension.class_name),
                                    path,
                                    &context,
                                );
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        log::debug!(
            "usage analysis recorded sites for {} declarations",
            usage.referenced_ids().count()
        );
        collection.usage = usage;
    }
}

fn property_bodies(mode: &PropertyMode) -> Vec<&FunctionBody> {
    match mode {
        PropertyMode::Stored => Vec::new(),
        PropertyMode::Computed(getter) => vec![getter],
        PropertyMode::Accessors { getter, setter } => vec![getter, &setter.body],
    }
}

fn build_tables(collection: &IntentionCollection) -> SymbolTables {
    let mut tables = SymbolTables::default();

    for file in collection.files() {
        for global in &file.globals {
            tables.globals.insert(global.name.clone(), global.base.id);
        }
        for function in &file.global_functions {
            tables
                .global_functions
                .insert(function.signature.name.clone(), function.base.id);
        }
        for ty in &file.types {
            match ty {
                TypeIntention::Enum(enumeration) => {
                    let cases = tables.enums.entry(enumeration.name.clone()).or_default();
                    for case in &enumeration.cases {
                        cases.insert(case.name.clone(), case.base.id);
                        tables.enum_cases.insert(case.name.clone(), case.base.id);
                    }
                }
                TypeIntention::Class(class) => {
                    let symbols = tables.classes.entry(class.name.clone()).or_default();
                    for ivar in &class.ivars {
                        symbols.ivars.insert(ivar.name.clone(), ivar.base.id);
                    }
                    for property in &class.properties {
                        symbols
                            .properties
                            .insert(property.name.clone(), property.base.id);
                    }
                    for method in &class.methods {
                        symbols.methods.insert(
                            (
                                method.signature.name.clone(),
                                method.signature.parameters.len(),
                            ),
                            method.base.id,
                        );
                    }
                }
                TypeIntention::Extension(extension) => {
                    let symbols = tables.classes.entry(extension.class_name.clone()).or_default();
                    for method in &extension.methods {
                        symbols.methods.insert(
                            (
                                method.signature.name.clone(),
                                method.signature.parameters.len(),
                            ),
                            method.base.id,
                        );
                    }
                }
                _ => {}
            }
        }
    }

    tables
}

fn visit_body(
    tables: &SymbolTables,
    usage: &mut UsageGraph,
    body: &FunctionBody,
    enclosing: Option<&str>,
    file: &str,
    context: &str,
) {
    let site = |is_write: bool| UsageSite {
        file: file.to_string(),
        context: context.to_string(),
        is_write,
    };

    body.for_each_expression(&mut |expression| match expression {
        SwiftExpression::Identifier(name) => {
            if let Some(id) = resolve_bare(tables, enclosing, name) {
                usage.record(id, site(false));
            }
        }
        SwiftExpression::Member { base, name, .. } => {
            if let Some(id) = resolve_member(tables, enclosing, base, name) {
                usage.record(id, site(false));
            }
        }
        SwiftExpression::Call { callee, arguments } => {
            match callee.as_ref() {
                SwiftExpression::Member { base, name, .. } => {
                    if let Some(id) = resolve_method(tables, enclosing, base, name, arguments.len())
                    {
                        usage.record(id, site(false));
                    }
                }
                SwiftExpression::Identifier(name) => {
                    if let Some(&id) = tables.global_functions.get(name) {
                        usage.record(id, site(false));
                    }
                }
                _ => {}
            }
        }
        SwiftExpression::Assignment { target, .. } => {
            let resolved = match target.as_ref() {
                SwiftExpression::Identifier(name) => resolve_bare(tables, enclosing, name),
                SwiftExpression::Member { base, name, .. } => {
                    resolve_member(tables, enclosing, base, name)
                }
                _ => None,
            };
            if let Some(id) = resolved {
                usage.record(id, site(true));
            }
        }
        _ => {}
    });
}

fn resolve_bare(tables: &SymbolTables, enclosing: Option<&str>, name: &str) -> Option<IntentionId> {
    if matches!(name, "self" | "super" | "newValue") {
        return None;
    }
    if let Some(symbols) = enclosing.and_then(|e| tables.classes.get(e)) {
        if let Some(&id) = symbols.ivars.get(name) {
            return Some(id);
        }
        if let Some(&id) = symbols.properties.get(name) {
            return Some(id);
        }
    }
    if let Some(&id) = tables.globals.get(name) {
        return Some(id);
    }
    tables.enum_cases.get(name).copied()
}

fn resolve_member(
    tables: &SymbolTables,
    enclosing: Option<&str>,
    base: &SwiftExpression,
    name: &str,
) -> Option<IntentionId> {
    let SwiftExpression::Identifier(base_name) = base else {
        return None;
    };
    if base_name == "self" {
        let symbols = enclosing.and_then(|e| tables.classes.get(e))?;
        return symbols
            .ivars
            .get(name)
            .or_else(|| symbols.properties.get(name))
            .copied();
    }
    if let Some(cases) = tables.enums.get(base_name) {
        return cases.get(name).copied();
    }
    if let Some(symbols) = tables.classes.get(base_name) {
        return symbols.properties.get(name).copied();
    }
    None
}

fn resolve_method(
    tables: &SymbolTables,
    enclosing: Option<&str>,
    base: &SwiftExpression,
    name: &str,
    argument_count: usize,
) -> Option<IntentionId> {
    let SwiftExpression::Identifier(base_name) = base else {
        return None;
    };
    let class_name = if base_name == "self" {
        enclosing?
    } else if tables.classes.contains_key(base_name.as_str()) {
        base_name.as_str()
    } else {
        return None;
    };
    tables
        .classes
        .get(class_name)?
        .methods
        .get(&(name.to_string(), argument_count))
        .copied()
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

    #[test]
    fn test_self_message_records_method_usage() {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C.m",
        );

        let mut class = ClassIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C",
            TypeOrigin::Implementation,
        );

        // - (void)m { [self m]; }
        let call = SwiftExpression::call(
            SwiftExpression::member(SwiftExpression::ident("self"), "m"),
            Vec::<CallArgument>::new(),
        );
        class.add_method(MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new("m", SwiftType::Void),
            body: Some(FunctionBody::new(CompoundStatement::statements(vec![
                SwiftStatement::expression(call),
            ]))),
            is_optional: false,
            is_override: false,
        });
        let method_id = class.methods[0].base.id;
        file.add_type(TypeIntention::Class(class));
        collection.push_file(file);

        UsageAnalysisPass.apply(&mut collection);

        let sites = collection.usage.sites_for(method_id);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].context, "C.m");
        assert!(!sites[0].is_write);
    }

    #[test]
    fn test_enum_case_reference_is_recorded() {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "E.m",
        );

        let mut enumeration = crate::EnumIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "E",
            SwiftType::nominal("Int"),
        );
        enumeration.add_case(crate::EnumCaseIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            name: "E_a".to_string(),
            raw_value: None,
        });
        let case_id = enumeration.cases[0].base.id;
        file.add_type(TypeIntention::Enum(enumeration));

        let mut class = ClassIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C",
            TypeOrigin::Implementation,
        );
        class.add_method(MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new("m", SwiftType::Void),
            body: Some(FunctionBody::new(CompoundStatement::statements(vec![
                SwiftStatement::expression(SwiftExpression::ident("E_a")),
            ]))),
            is_optional: false,
            is_override: false,
        });
        file.add_type(TypeIntention::Class(class));
        collection.push_file(file);

        UsageAnalysisPass.apply(&mut collection);

        assert_eq!(collection.usage.sites_for(case_id).len(), 1);
    }
}
