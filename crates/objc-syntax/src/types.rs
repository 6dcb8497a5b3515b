// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C type descriptors and nullability annotations

use serde::{Deserialize, Serialize};

/// Nullability of a pointer type as written in source.
///
/// `Unspecified` is the absence of an annotation; whether it resolves to
/// optional or implicitly-unwrapped depends on the surrounding assume-nonnull
/// region at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nullability {
    Unspecified,
    Nonnull,
    Nullable,
    NullResettable,
}

impl Nullability {
    pub fn is_specified(&self) -> bool {
        !matches!(self, Nullability::Unspecified)
    }
}

impl Default for Nullability {
    fn default() -> Self {
        Nullability::Unspecified
    }
}

/// An Objective-C type as produced by the external grammar.
///
/// Object types appear as `Pointer` over a named or generic base; C scalars
/// and typedef names appear as `Named`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjcType {
    /// `id`, optionally qualified with a protocol list: `id<P1, P2>`
    Id { protocols: Vec<String> },
    /// A plain type name: a class, a typedef, or a C scalar keyword
    Named(String),
    /// A named type with lightweight generic arguments: `NSArray<NSString *>`
    Generic {
        name: String,
        parameters: Vec<ObjcType>,
    },
    /// A pointer over another type: `NSString *`, `int *`
    Pointer(Box<ObjcType>),
    /// A block type: `R (^)(P1, P2)`
    Block {
        return_type: Box<ObjcType>,
        parameters: Vec<ObjcType>,
    },
    /// A C function pointer: `R (*)(P1, P2)`
    FunctionPointer {
        return_type: Box<ObjcType>,
        parameters: Vec<ObjcType>,
    },
    /// A struct tag reference: `struct timeval`
    Struct(String),
    /// `instancetype`
    InstanceType,
    Void,
}

impl ObjcType {
    /// Convenience for the very common `Name *` shape.
    pub fn pointer_to(name: &str) -> ObjcType {
        ObjcType::Pointer(Box::new(ObjcType::Named(name.to_string())))
    }

    /// Convenience for `Name<Args...> *`.
    pub fn generic_pointer(name: &str, parameters: Vec<ObjcType>) -> ObjcType {
        ObjcType::Pointer(Box::new(ObjcType::Generic {
            name: name.to_string(),
            parameters,
        }))
    }

    pub fn named(name: &str) -> ObjcType {
        ObjcType::Named(name.to_string())
    }

    /// Whether this type is a reference-like type that admits nullability.
    pub fn is_nullable_kind(&self) -> bool {
        matches!(
            self,
            ObjcType::Id { .. }
                | ObjcType::Pointer(_)
                | ObjcType::Block { .. }
                | ObjcType::FunctionPointer { .. }
                | ObjcType::InstanceType
        )
    }
}

/// A type together with the nullability annotation written next to it, e.g.
/// `nullable NSString *` in a method's parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjcTypeAnnotation {
    pub ty: ObjcType,
    pub nullability: Nullability,
}

impl ObjcTypeAnnotation {
    pub fn new(ty: ObjcType) -> Self {
        Self {
            ty,
            nullability: Nullability::Unspecified,
        }
    }

    pub fn with_nullability(ty: ObjcType, nullability: Nullability) -> Self {
        Self { ty, nullability }
    }
}
