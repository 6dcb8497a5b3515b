// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Expression type resolution
//!
//! Pure queries over the intention graph plus the body's local scope. The
//! resolver never fails: anything it cannot pin down resolves to an
//! implicitly-unwrapped `AnyObject`, mirroring how unannotated Objective-C
//! references behave.

use super::BodyContext;
use crate::{
    FunctionSignature, IntentionCollection, SwiftConstant, SwiftExpression, SwiftOperator,
    SwiftType, TypeIntention,
};
use std::collections::HashMap;

pub struct TypeResolver<'a> {
    collection: &'a IntentionCollection,
    locals: HashMap<String, SwiftType>,
    enclosing_type: Option<String>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(collection: &'a IntentionCollection, context: &BodyContext) -> Self {
        Self {
            collection,
            locals: context.locals.iter().cloned().collect(),
            enclosing_type: context.enclosing_type.clone(),
        }
    }

    fn unresolved() -> SwiftType {
        SwiftType::AnyObject.implicitly_unwrapped()
    }

    /// The enum declaring a case with this name, if any.
    pub fn enum_owning_case(&self, case_name: &str) -> Option<&str> {
        self.collection.types().find_map(|ty| match ty {
            TypeIntention::Enum(e) if e.has_case(case_name) => Some(e.name.as_str()),
            _ => None,
        })
    }

    /// Whether a bare identifier is bound in the body's own scope: a
    /// parameter, a local binding, or one of the implicit receiver names.
    pub fn is_local(&self, name: &str) -> bool {
        matches!(name, "self" | "super" | "newValue") || self.locals.contains_key(name)
    }

    /// The enum to qualify a bare identifier with, honoring scope. A name
    /// shadowed by a local, an enclosing-type member, or a global never
    /// resolves as an enum case, mirroring identifier resolution order.
    pub fn enum_case_qualifier(&self, name: &str) -> Option<&str> {
        if self.is_local(name) {
            return None;
        }
        if let Some(enclosing) = self.enclosing_type.as_deref() {
            if self.member_type(enclosing, name).is_some() {
                return None;
            }
        }
        for file in self.collection.files() {
            if file.globals.iter().any(|g| g.name == name) {
                return None;
            }
        }
        self.enum_owning_case(name)
    }

    /// Look up a member's declared type on a nominal type.
    pub fn member_type(&self, type_name: &str, member: &str) -> Option<SwiftType> {
        let ty = self.collection.find_type(type_name)?;
        if let Some(property) = ty.properties().iter().find(|p| p.name == member) {
            return Some(property.storage.swift_type.clone());
        }
        if let TypeIntention::Class(class) = ty {
            if let Some(ivar) = class.ivars.iter().find(|i| i.name == member) {
                return Some(ivar.storage.swift_type.clone());
            }
        }
        // A parameterless method read through member syntax.
        ty.methods()
            .iter()
            .find(|m| m.signature.name == member && m.signature.parameters.is_empty())
            .map(|m| m.signature.return_type.clone())
    }

    /// Look up a method signature by name and argument count.
    pub fn method_signature(
        &self,
        type_name: &str,
        method: &str,
        argument_count: usize,
    ) -> Option<&FunctionSignature> {
        let ty = self.collection.find_type(type_name)?;
        ty.methods()
            .iter()
            .map(|m| &m.signature)
            .find(|s| s.name == method && s.parameters.len() == argument_count)
    }

    /// Resolve the receiver type name of an expression, if it is nominal.
    fn receiver_type_name(&self, receiver: &SwiftExpression) -> Option<String> {
        if let SwiftExpression::Identifier(name) = receiver {
            if name == "self" || name == "super" {
                return self.enclosing_type.clone();
            }
            // A bare type name used as a receiver.
            if self.collection.find_type(name).is_some() && !self.locals.contains_key(name) {
                return Some(name.clone());
            }
        }
        self.resolve(receiver).nominal_name().map(str::to_string)
    }

    /// Best-effort type of an expression.
    pub fn resolve(&self, expression: &SwiftExpression) -> SwiftType {
        match expression {
            SwiftExpression::Identifier(name) => self.resolve_identifier(name),
            SwiftExpression::Constant(constant) => resolve_constant(constant),
            SwiftExpression::Member {
                base,
                name,
                optional_chained,
            } => {
                let base_type = self.resolve(base);
                let member_type = self
                    .receiver_type_name(base)
                    .and_then(|type_name| self.member_type(&type_name, name));
                match member_type {
                    Some(member_type) => {
                        if *optional_chained || base_type.is_optional() {
                            if member_type.is_optional() {
                                member_type
                            } else {
                                member_type.optional()
                            }
                        } else {
                            member_type
                        }
                    }
                    None => Self::unresolved(),
                }
            }
            SwiftExpression::Call { callee, arguments } => {
                self.resolve_call(callee, arguments.len())
            }
            SwiftExpression::Subscript { base, .. } => match self.resolve(base).unwrapped() {
                SwiftType::Array(element) => (**element).clone(),
                SwiftType::Dictionary { value, .. } => (**value).clone().optional(),
                _ => Self::unresolved(),
            },
            SwiftExpression::Binary { op, lhs, rhs } => {
                if op.is_comparison() {
                    return SwiftType::nominal("Bool");
                }
                if *op == SwiftOperator::NilCoalesce {
                    return self.resolve(rhs);
                }
                let lhs_type = self.resolve(lhs);
                let rhs_type = self.resolve(rhs);
                if rhs_type.is_floating_point() && !lhs_type.is_floating_point() {
                    rhs_type
                } else {
                    lhs_type
                }
            }
            SwiftExpression::Assignment { target, .. } => self.resolve(target),
            SwiftExpression::Prefix { op, operand } => match op {
                SwiftOperator::LogicalNot => SwiftType::nominal("Bool"),
                _ => self.resolve(operand),
            },
            SwiftExpression::Ternary { if_true, .. } => self.resolve(if_true),
            SwiftExpression::Cast { target, .. } => target.clone().optional(),
            SwiftExpression::Range { lower, .. } => SwiftType::Nominal {
                name: "Range".to_string(),
                type_arguments: vec![self.resolve(lower)],
            },
            SwiftExpression::Closure {
                parameters,
                return_type,
                ..
            } => SwiftType::Block {
                return_type: Box::new(return_type.clone()),
                parameters: parameters.iter().map(|p| p.swift_type.clone()).collect(),
            },
            SwiftExpression::ArrayLiteral(elements) => {
                let element = elements
                    .first()
                    .map(|e| self.resolve(e))
                    .unwrap_or(SwiftType::AnyObject);
                SwiftType::Array(Box::new(element))
            }
            SwiftExpression::DictionaryLiteral(pairs) => {
                let (key, value) = pairs
                    .first()
                    .map(|(k, v)| (self.resolve(k), self.resolve(v)))
                    .unwrap_or((SwiftType::AnyObject, SwiftType::AnyObject));
                SwiftType::Dictionary {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            SwiftExpression::Parens(inner) => self.resolve(inner),
            SwiftExpression::Unknown { .. } => Self::unresolved(),
        }
    }

    fn resolve_identifier(&self, name: &str) -> SwiftType {
        if name == "self" {
            return self
                .enclosing_type
                .as_deref()
                .map(SwiftType::nominal)
                .unwrap_or_else(Self::unresolved);
        }
        if let Some(local) = self.locals.get(name) {
            return local.clone();
        }
        if let Some(enclosing) = self.enclosing_type.as_deref() {
            if let Some(member) = self.member_type(enclosing, name) {
                return member;
            }
        }
        for file in self.collection.files() {
            if let Some(global) = file.globals.iter().find(|g| g.name == name) {
                return global.storage.swift_type.clone();
            }
        }
        if let Some(enum_name) = self.enum_owning_case(name) {
            return SwiftType::nominal(enum_name);
        }
        if self.collection.find_type(name).is_some() {
            return SwiftType::nominal(name);
        }
        Self::unresolved()
    }

    fn resolve_call(&self, callee: &SwiftExpression, argument_count: usize) -> SwiftType {
        match callee {
            SwiftExpression::Member { base, name, .. } => {
                let receiver = self.receiver_type_name(base);
                let signature = receiver
                    .as_deref()
                    .and_then(|r| self.method_signature(r, name, argument_count));
                match signature {
                    Some(signature) => signature.return_type.clone(),
                    None => Self::unresolved(),
                }
            }
            SwiftExpression::Identifier(name) => {
                // Numeric conversion call: Int(x), Double(x), ...
                let as_type = SwiftType::nominal(name);
                if as_type.is_numeric() {
                    return as_type;
                }
                // Initializer call: TypeName(...)
                if self.collection.find_type(name).is_some() {
                    return as_type;
                }
                for file in self.collection.files() {
                    if let Some(function) = file
                        .global_functions
                        .iter()
                        .find(|f| f.signature.name == *name)
                    {
                        return function.signature.return_type.clone();
                    }
                }
                Self::unresolved()
            }
            _ => Self::unresolved(),
        }
    }
}

fn resolve_constant(constant: &SwiftConstant) -> SwiftType {
    match constant {
        SwiftConstant::Integer { .. } => SwiftType::nominal("Int"),
        SwiftConstant::Float(_) | SwiftConstant::RawNumber(_) => SwiftType::nominal("Double"),
        SwiftConstant::Boolean(_) => SwiftType::nominal("Bool"),
        SwiftConstant::StringLiteral(_) => SwiftType::nominal("String"),
        SwiftConstant::Nil => SwiftType::AnyObject.optional(),
    }
}
