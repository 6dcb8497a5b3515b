// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Automatic `if let` rewriting
//!
//! A call statement that passes a nullable identifier where the callee
//! declares a nonnull parameter cannot compile as-is under Swift's optional
//! rules. The statement is wrapped in `if let x = x { ... }`, shadowing the
//! optional with its unwrapped value for the duration of the call.

use super::{BodyContext, BodyPass, TypeResolver};
use crate::{
    CompoundStatement, FunctionBody, StatementItem, SwiftExpression, SwiftStatement, SwiftType,
};

pub struct IfLetRewritePass;

impl BodyPass for IfLetRewritePass {
    fn name(&self) -> &'static str {
        "IfLetRewrite"
    }

    fn rewrite(
        &self,
        mut body: FunctionBody,
        _context: &BodyContext,
        resolver: &TypeResolver<'_>,
    ) -> FunctionBody {
        body.compound
            .for_each_compound_mut(&mut |compound| rewrite_in_compound(compound, resolver));
        body
    }
}

fn rewrite_in_compound(compound: &mut CompoundStatement, resolver: &TypeResolver<'_>) {
    for item in &mut compound.items {
        let StatementItem::Statement(statement) = item else {
            continue;
        };
        let SwiftStatement::Expressions(expressions) = statement else {
            continue;
        };
        if expressions.len() != 1 {
            continue;
        }
        let Some(binding) = nullable_argument_to_nonnull_parameter(&expressions[0], resolver)
        else {
            continue;
        };

        let call = std::mem::take(&mut expressions[0]);
        *statement = SwiftStatement::IfLet {
            name: binding.clone(),
            value: SwiftExpression::ident(&binding),
            body: CompoundStatement::statements(vec![SwiftStatement::expression(call)]),
            else_body: None,
        };
    }
}

/// If this expression is a call passing a plain optional identifier where
/// the resolved callee parameter is non-optional, the identifier to bind.
fn nullable_argument_to_nonnull_parameter(
    expression: &SwiftExpression,
    resolver: &TypeResolver<'_>,
) -> Option<String> {
    let SwiftExpression::Call { callee, arguments } = expression else {
        return None;
    };
    let signature = match callee.as_ref() {
        SwiftExpression::Member { base, name, .. } => {
            let receiver = resolver.resolve(base).nominal_name().map(str::to_string)?;
            resolver.method_signature(&receiver, name, arguments.len())?
        }
        _ => return None,
    };

    for (index, argument) in arguments.iter().enumerate() {
        let SwiftExpression::Identifier(name) = &argument.expression else {
            continue;
        };
        let parameter = signature.parameters.get(index)?;
        if parameter.swift_type.is_optional() {
            continue;
        }
        if !parameter_accepts_optionals(&parameter.swift_type) {
            continue;
        }
        if matches!(resolver.resolve(&argument.expression), SwiftType::Optional(_)) {
            return Some(name.clone());
        }
    }
    None
}

/// Value types cannot be optional-bound away, so only reference-like
/// parameter types trigger the rewrite.
fn parameter_accepts_optionals(ty: &SwiftType) -> bool {
    !ty.is_numeric() && !matches!(ty, SwiftType::Void)
}
