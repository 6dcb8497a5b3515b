// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C to Swift type mapping
//!
//! One operation: map an Objective-C type descriptor to a Swift type under a
//! nullability context. Optionality resolution order: an `always_nonnull`
//! override wins, then an explicit annotation, then the surrounding
//! assume-nonnull region; with none of those, reference types come out
//! implicitly unwrapped.

use objc_syntax::{Nullability, ObjcType};
use swift_intention_format::SwiftType;

/// The nullability context a type is mapped under.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingContext {
    pub in_nonnull_region: bool,
    pub explicit_nullability: Option<Nullability>,
    pub always_nonnull: bool,
}

impl MappingContext {
    pub fn unspecified() -> Self {
        Self::default()
    }

    pub fn in_region(in_nonnull_region: bool) -> Self {
        Self {
            in_nonnull_region,
            ..Self::default()
        }
    }

    pub fn with_explicit(mut self, nullability: Nullability) -> Self {
        if nullability.is_specified() {
            self.explicit_nullability = Some(nullability);
        }
        self
    }

    pub fn always_nonnull() -> Self {
        Self {
            always_nonnull: true,
            ..Self::default()
        }
    }
}

/// C scalar spellings and their Swift value types. Always non-optional.
const SCALAR_TYPES: &[(&str, &str)] = &[
    ("BOOL", "Bool"),
    ("NSInteger", "Int"),
    ("NSUInteger", "UInt"),
    ("CGFloat", "CGFloat"),
    ("NSTimeInterval", "TimeInterval"),
    ("float", "Float"),
    ("double", "Double"),
    ("int", "CInt"),
    ("unsigned int", "CUnsignedInt"),
    ("long", "CLong"),
    ("unsigned long", "CUnsignedLong"),
    ("short", "CShort"),
    ("char", "CChar"),
    ("int8_t", "Int8"),
    ("uint8_t", "UInt8"),
    ("int16_t", "Int16"),
    ("uint16_t", "UInt16"),
    ("int32_t", "Int32"),
    ("uint32_t", "UInt32"),
    ("int64_t", "Int64"),
    ("uint64_t", "UInt64"),
];

/// Foundation classes bridged to Swift value types.
const BRIDGED_CLASSES: &[(&str, &str)] = &[("NSString", "String")];

#[derive(Debug, Default)]
pub struct TypeMapper;

impl TypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map an Objective-C type under the given nullability context.
    pub fn map(&self, ty: &ObjcType, context: &MappingContext) -> SwiftType {
        match ty {
            ObjcType::Id { protocols } if protocols.is_empty() => {
                self.apply_optionality(SwiftType::AnyObject, context)
            }
            ObjcType::Id { protocols } => self.apply_optionality(
                SwiftType::ProtocolComposition(protocols.clone()),
                context,
            ),

            ObjcType::Named(name) => self.map_named(name),

            ObjcType::Generic { name, parameters } => {
                // A generic base without its pointer is a value use of the
                // nominal type.
                self.map_generic(name, parameters)
            }

            ObjcType::Pointer(pointee) => self.map_pointer(pointee, context),

            ObjcType::Block {
                return_type,
                parameters,
            } => {
                let block = SwiftType::Block {
                    return_type: Box::new(self.map(return_type, &block_inner_context(context))),
                    parameters: parameters
                        .iter()
                        .map(|p| self.map(p, &block_inner_context(context)))
                        .collect(),
                };
                self.apply_optionality(block, context)
            }

            ObjcType::FunctionPointer {
                return_type,
                parameters,
            } => {
                let block = SwiftType::Block {
                    return_type: Box::new(self.map(return_type, &block_inner_context(context))),
                    parameters: parameters
                        .iter()
                        .map(|p| self.map(p, &block_inner_context(context)))
                        .collect(),
                };
                self.apply_optionality(block, context)
            }

            ObjcType::Struct(name) => SwiftType::nominal(name),

            ObjcType::InstanceType => self.apply_optionality(SwiftType::AnyObject, context),

            ObjcType::Void => SwiftType::Void,
        }
    }

    fn map_named(&self, name: &str) -> SwiftType {
        for (objc, swift) in SCALAR_TYPES {
            if name == *objc {
                return SwiftType::nominal(swift);
            }
        }
        // A bare class or typedef name used as a value type.
        SwiftType::nominal(name)
    }

    fn map_generic(&self, name: &str, parameters: &[ObjcType]) -> SwiftType {
        // Elements of generic containers map as nonnull values.
        let element_context = MappingContext::always_nonnull();
        match (name, parameters) {
            ("NSArray", [element]) => {
                SwiftType::Array(Box::new(self.map(element, &element_context)))
            }
            ("NSMutableArray", [element]) => {
                SwiftType::Array(Box::new(self.map(element, &element_context)))
            }
            ("NSDictionary", [key, value]) | ("NSMutableDictionary", [key, value]) => {
                SwiftType::Dictionary {
                    key: Box::new(self.map(key, &element_context)),
                    value: Box::new(self.map(value, &element_context)),
                }
            }
            _ => SwiftType::Nominal {
                name: name.to_string(),
                type_arguments: parameters
                    .iter()
                    .map(|p| self.map(p, &element_context))
                    .collect(),
            },
        }
    }

    fn map_pointer(&self, pointee: &ObjcType, context: &MappingContext) -> SwiftType {
        match pointee {
            // Object pointers: `NSString *`, `NSArray<T> *`, `C *`
            ObjcType::Named(name) => {
                if name == "void" {
                    return self.apply_optionality(
                        SwiftType::nominal("UnsafeMutableRawPointer"),
                        context,
                    );
                }
                for (objc, swift) in SCALAR_TYPES {
                    if name == *objc {
                        // A pointer to a C scalar stays a raw pointer.
                        return self.apply_optionality(
                            SwiftType::Pointer(Box::new(SwiftType::nominal(swift))),
                            context,
                        );
                    }
                }
                let mapped = BRIDGED_CLASSES
                    .iter()
                    .find(|(objc, _)| name == *objc)
                    .map(|(_, swift)| SwiftType::nominal(swift))
                    .unwrap_or_else(|| SwiftType::nominal(name));
                self.apply_optionality(mapped, context)
            }
            ObjcType::Generic { name, parameters } => {
                self.apply_optionality(self.map_generic(name, parameters), context)
            }
            ObjcType::Id { .. } => self.map(pointee, context),
            ObjcType::Struct(name) => self.apply_optionality(
                SwiftType::Pointer(Box::new(SwiftType::nominal(name))),
                context,
            ),
            other => self.apply_optionality(
                SwiftType::Pointer(Box::new(self.map(other, &MappingContext::always_nonnull()))),
                context,
            ),
        }
    }

    /// Resolve optionality for a reference type under the context.
    fn apply_optionality(&self, ty: SwiftType, context: &MappingContext) -> SwiftType {
        if context.always_nonnull {
            return ty;
        }
        match context.explicit_nullability {
            Some(Nullability::Nonnull) => ty,
            Some(Nullability::Nullable) => ty.optional(),
            Some(Nullability::NullResettable) => ty.implicitly_unwrapped(),
            Some(Nullability::Unspecified) | None => {
                if context.in_nonnull_region {
                    ty
                } else {
                    ty.implicitly_unwrapped()
                }
            }
        }
    }
}

/// Nested block parameter and return types resolve nullability on their own;
/// only the region flag carries through.
fn block_inner_context(context: &MappingContext) -> MappingContext {
    MappingContext::in_region(context.in_nonnull_region)
}
