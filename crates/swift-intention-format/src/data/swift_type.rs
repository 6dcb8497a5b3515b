// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Swift type descriptors
//!
//! Optionality is part of the descriptor itself, never of the declaration
//! holding it: `String?` is `Optional(Nominal("String"))`.

use objc_syntax::Nullability;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwiftType {
    /// A named type, possibly with generic arguments: `String`, `Set<Int>`
    Nominal {
        name: String,
        type_arguments: Vec<SwiftType>,
    },
    /// `[Element]`
    Array(Box<SwiftType>),
    /// `[Key: Value]`
    Dictionary {
        key: Box<SwiftType>,
        value: Box<SwiftType>,
    },
    /// `UnsafeMutablePointer<Pointee>`
    Pointer(Box<SwiftType>),
    /// A function type: `(P1, P2) -> R`
    Block {
        return_type: Box<SwiftType>,
        parameters: Vec<SwiftType>,
    },
    /// `Wrapped?`
    Optional(Box<SwiftType>),
    /// `Wrapped!`
    ImplicitlyUnwrapped(Box<SwiftType>),
    /// `P1 & P2`
    ProtocolComposition(Vec<String>),
    AnyObject,
    Void,
    /// An unresolved generic parameter name
    GenericPlaceholder(String),
}

/// Value types that never take optionality from nullability context.
const NUMERIC_TYPE_NAMES: &[&str] = &[
    "Int", "UInt", "Int8", "UInt8", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
    "CInt", "CUnsignedInt", "CLong", "CUnsignedLong", "CShort", "CChar", "Float", "Double",
    "CGFloat", "TimeInterval",
];

impl SwiftType {
    pub fn nominal(name: &str) -> SwiftType {
        SwiftType::Nominal {
            name: name.to_string(),
            type_arguments: Vec::new(),
        }
    }

    pub fn optional(self) -> SwiftType {
        SwiftType::Optional(Box::new(self))
    }

    pub fn implicitly_unwrapped(self) -> SwiftType {
        SwiftType::ImplicitlyUnwrapped(Box::new(self))
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            SwiftType::Optional(_) | SwiftType::ImplicitlyUnwrapped(_)
        )
    }

    /// Strip every optional layer.
    pub fn unwrapped(&self) -> &SwiftType {
        match self {
            SwiftType::Optional(inner) | SwiftType::ImplicitlyUnwrapped(inner) => {
                inner.unwrapped()
            }
            other => other,
        }
    }

    /// The nominal name, looking through optional layers.
    pub fn nominal_name(&self) -> Option<&str> {
        match self.unwrapped() {
            SwiftType::Nominal { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.nominal_name()
            .is_some_and(|n| NUMERIC_TYPE_NAMES.contains(&n))
    }

    pub fn is_floating_point(&self) -> bool {
        matches!(
            self.nominal_name(),
            Some("Float" | "Double" | "CGFloat" | "TimeInterval")
        )
    }

    /// Re-resolve this type's optionality against a nullability annotation,
    /// as happens when a header annotation is merged onto an implementation
    /// signature. Value types are left untouched.
    pub fn with_nullability(self, nullability: Nullability) -> SwiftType {
        if self.is_numeric() || matches!(self.unwrapped(), SwiftType::Void) {
            return self;
        }
        let bare = match self {
            SwiftType::Optional(inner) | SwiftType::ImplicitlyUnwrapped(inner) => *inner,
            other => other,
        };
        match nullability {
            Nullability::Nonnull => bare,
            Nullability::Nullable => bare.optional(),
            Nullability::NullResettable | Nullability::Unspecified => bare.implicitly_unwrapped(),
        }
    }

    /// A literal default for inserting null-coalescing fallbacks, if the type
    /// has an obvious one.
    pub fn default_literal(&self) -> Option<crate::SwiftConstant> {
        use crate::{IntegerRadix, SwiftConstant};
        match self.unwrapped() {
            SwiftType::Nominal { name, .. } => match name.as_str() {
                "Bool" => Some(SwiftConstant::Boolean(false)),
                "String" => Some(SwiftConstant::StringLiteral(String::new())),
                n if NUMERIC_TYPE_NAMES.contains(&n) => Some(SwiftConstant::Integer {
                    value: 0,
                    radix: IntegerRadix::Decimal,
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Display for SwiftType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SwiftType::Nominal {
                name,
                type_arguments,
            } => {
                write!(f, "{}", name)?;
                if !type_arguments.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in type_arguments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            SwiftType::Array(element) => write!(f, "[{}]", element),
            SwiftType::Dictionary { key, value } => write!(f, "[{}: {}]", key, value),
            SwiftType::Pointer(pointee) => write!(f, "UnsafeMutablePointer<{}>", pointee),
            SwiftType::Block {
                return_type,
                parameters,
            } => {
                write!(f, "(")?;
                for (i, p) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ") -> {}", return_type)
            }
            SwiftType::Optional(inner) => {
                if needs_parens_in_suffix(inner) {
                    write!(f, "({})?", inner)
                } else {
                    write!(f, "{}?", inner)
                }
            }
            SwiftType::ImplicitlyUnwrapped(inner) => {
                if needs_parens_in_suffix(inner) {
                    write!(f, "({})!", inner)
                } else {
                    write!(f, "{}!", inner)
                }
            }
            SwiftType::ProtocolComposition(names) => write!(f, "{}", names.join(" & ")),
            SwiftType::AnyObject => write!(f, "AnyObject"),
            SwiftType::Void => write!(f, "Void"),
            SwiftType::GenericPlaceholder(name) => write!(f, "{}", name),
        }
    }
}

fn needs_parens_in_suffix(ty: &SwiftType) -> bool {
    matches!(
        ty,
        SwiftType::Block { .. } | SwiftType::ProtocolComposition(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SwiftType::nominal("String").optional().to_string(), "String?");
        assert_eq!(
            SwiftType::Array(Box::new(SwiftType::nominal("Int"))).to_string(),
            "[Int]"
        );
        assert_eq!(
            SwiftType::Block {
                return_type: Box::new(SwiftType::Void),
                parameters: vec![SwiftType::nominal("Int")],
            }
            .optional()
            .to_string(),
            "((Int) -> Void)?"
        );
        assert_eq!(
            SwiftType::ProtocolComposition(vec!["P1".into(), "P2".into()]).to_string(),
            "P1 & P2"
        );
    }

    #[test]
    fn test_with_nullability_reresolves_optionality() {
        let iuo = SwiftType::nominal("String").implicitly_unwrapped();
        assert_eq!(
            iuo.clone().with_nullability(Nullability::Nonnull),
            SwiftType::nominal("String")
        );
        assert_eq!(
            iuo.with_nullability(Nullability::Nullable),
            SwiftType::nominal("String").optional()
        );
        // Value types are immune to nullability.
        assert_eq!(
            SwiftType::nominal("Int").with_nullability(Nullability::Nullable),
            SwiftType::nominal("Int")
        );
    }
}
