// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Numeric cast insertion pass
//!
//! Swift refuses implicit numeric conversions that Objective-C performs
//! silently. Wherever a value's inferred numeric type differs from the
//! numeric type expected at its use site (a typed declaration, an
//! assignment, a return), the value is wrapped in the target type's
//! conversion initializer: `Int(...)`, `CGFloat(...)`, ...

use super::{BodyContext, BodyPass, TypeResolver};
use crate::{
    CallArgument, CompoundStatement, FunctionBody, StatementItem, SwiftExpression, SwiftOperator,
    SwiftStatement, SwiftType,
};

pub struct CastInsertionPass;

impl BodyPass for CastInsertionPass {
    fn name(&self) -> &'static str {
        "CastInsertion"
    }

    fn rewrite(
        &self,
        mut body: FunctionBody,
        context: &BodyContext,
        resolver: &TypeResolver<'_>,
    ) -> FunctionBody {
        let return_type = context.return_type.clone();
        body.compound.for_each_compound_mut(&mut |compound| {
            cast_in_compound(compound, return_type.as_ref(), resolver);
        });
        body
    }
}

fn cast_in_compound(
    compound: &mut CompoundStatement,
    return_type: Option<&SwiftType>,
    resolver: &TypeResolver<'_>,
) {
    for item in &mut compound.items {
        match item {
            StatementItem::Declaration(declaration) => {
                let Some(target_type) = declaration.swift_type.clone() else {
                    continue;
                };
                if let Some(initializer) = declaration.initializer.take() {
                    declaration.initializer =
                        Some(cast_value(initializer, &target_type, resolver));
                }
            }
            StatementItem::Statement(SwiftStatement::Expressions(expressions)) => {
                for expression in expressions {
                    if let SwiftExpression::Assignment { target, op, value } = expression {
                        if *op != SwiftOperator::Assign {
                            continue;
                        }
                        let target_type = resolver.resolve(target);
                        let taken = std::mem::take(value.as_mut());
                        *value.as_mut() = cast_value(taken, &target_type, resolver);
                    }
                }
            }
            StatementItem::Statement(SwiftStatement::Return(Some(expression))) => {
                if let Some(return_type) = return_type {
                    let taken = std::mem::take(expression);
                    *expression = cast_value(taken, return_type, resolver);
                }
            }
            _ => {}
        }
    }
}

/// Wrap `value` in `Target(value)` when both sides are numeric and disagree.
fn cast_value(
    value: SwiftExpression,
    target_type: &SwiftType,
    resolver: &TypeResolver<'_>,
) -> SwiftExpression {
    if !target_type.is_numeric() {
        return value;
    }
    let value_type = resolver.resolve(&value);
    if !value_type.is_numeric() || value_type.unwrapped() == target_type.unwrapped() {
        return value;
    }
    // Integer literals convert implicitly; only computed values need a cast.
    if matches!(value, SwiftExpression::Constant(_)) {
        return value;
    }
    let Some(target_name) = target_type.nominal_name() else {
        return value;
    };
    SwiftExpression::call(
        SwiftExpression::ident(target_name),
        vec![CallArgument::unlabeled(value)],
    )
}
