// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Nil-coalescing pass
//!
//! Two rewrites, in order: member accesses through an optional receiver
//! become optional-chained (`a?.b`), and chained-optional values flowing into
//! a non-optional binding or assignment target gain a `?? default` fallback
//! when the target type has an obvious default literal.

use super::{BodyContext, BodyPass, TypeResolver};
use crate::{
    CompoundStatement, FunctionBody, LocalVariableDeclaration, StatementItem, SwiftExpression,
    SwiftOperator, SwiftStatement, SwiftType,
};

pub struct NilCoalescingPass;

impl BodyPass for NilCoalescingPass {
    fn name(&self) -> &'static str {
        "NilCoalescing"
    }

    fn rewrite(
        &self,
        body: FunctionBody,
        _context: &BodyContext,
        resolver: &TypeResolver<'_>,
    ) -> FunctionBody {
        // Adopt optional chaining wherever the receiver resolves optional.
        let mut body = body.map_expressions(&mut |expression| match expression {
            SwiftExpression::Member {
                base,
                name,
                optional_chained: false,
            } if matches!(resolver.resolve(&base), SwiftType::Optional(_)) => SwiftExpression::Member {
                base,
                name,
                optional_chained: true,
            },
            other => other,
        });

        // Coalesce chained-optional values flowing into non-optional targets.
        body.compound
            .for_each_compound_mut(&mut |compound| coalesce_in_compound(compound, resolver));
        body
    }
}

fn coalesce_in_compound(compound: &mut CompoundStatement, resolver: &TypeResolver<'_>) {
    for item in &mut compound.items {
        match item {
            StatementItem::Declaration(declaration) => coalesce_declaration(declaration, resolver),
            StatementItem::Statement(SwiftStatement::Expressions(expressions)) => {
                for expression in expressions {
                    coalesce_assignment(expression, resolver);
                }
            }
            _ => {}
        }
    }
}

fn coalesce_declaration(declaration: &mut LocalVariableDeclaration, resolver: &TypeResolver<'_>) {
    let Some(target_type) = &declaration.swift_type else {
        return;
    };
    if target_type.is_optional() {
        return;
    }
    let Some(initializer) = declaration.initializer.take() else {
        return;
    };
    declaration.initializer = Some(coalesce_value(initializer, target_type, resolver));
}

fn coalesce_assignment(expression: &mut SwiftExpression, resolver: &TypeResolver<'_>) {
    let SwiftExpression::Assignment { target, op, value } = expression else {
        return;
    };
    if *op != SwiftOperator::Assign {
        return;
    }
    let target_type = resolver.resolve(target);
    if target_type.is_optional() || matches!(target_type, SwiftType::ImplicitlyUnwrapped(_)) {
        return;
    }
    let taken = std::mem::take(value.as_mut());
    *value.as_mut() = coalesce_value(taken, &target_type, resolver);
}

/// Wrap `value` in `value ?? default` when it resolves optional, the target
/// does not, and the target type has a default literal. Otherwise the value
/// passes through untouched.
fn coalesce_value(
    value: SwiftExpression,
    target_type: &SwiftType,
    resolver: &TypeResolver<'_>,
) -> SwiftExpression {
    if !matches!(resolver.resolve(&value), SwiftType::Optional(_)) {
        return value;
    }
    if matches!(value, SwiftExpression::Binary { op: SwiftOperator::NilCoalesce, .. }) {
        return value;
    }
    let Some(default) = target_type.default_literal() else {
        return value;
    };
    SwiftExpression::Binary {
        op: SwiftOperator::NilCoalesce,
        lhs: Box::new(value),
        rhs: Box::new(SwiftExpression::Constant(default)),
    }
}
