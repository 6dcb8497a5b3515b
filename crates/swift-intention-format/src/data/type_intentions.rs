// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Type intentions: classes, extensions, protocols, structs, enums
//!
//! All member mutation goes through the add/take operations so parent
//! back-links stay consistent; taking a member unlinks it, adding re-links.

use crate::data::members::{
    EnumCaseIntention, InitializerIntention, InstanceVariableIntention, MethodIntention,
    PropertyIntention,
};
use crate::data::swift_type::SwiftType;
use crate::data::IntentionBase;

/// Which declaration kind produced a type intention. Duplicate-type removal
/// keys on this after file grouping has merged the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    Interface,
    Implementation,
}

/// A `@synthesize`/`@dynamic` directive carried over from the implementation
/// for the backing-field synthesis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizeDirective {
    pub property_name: String,
    pub ivar_name: Option<String>,
    pub is_dynamic: bool,
}

#[derive(Debug, Clone)]
pub enum TypeIntention {
    Class(ClassIntention),
    Extension(ClassExtensionIntention),
    Protocol(ProtocolIntention),
    Struct(StructIntention),
    Enum(EnumIntention),
}

impl TypeIntention {
    /// The declared type name; for extensions, the extended class's name.
    pub fn name(&self) -> &str {
        match self {
            TypeIntention::Class(c) => &c.name,
            TypeIntention::Extension(e) => &e.class_name,
            TypeIntention::Protocol(p) => &p.name,
            TypeIntention::Struct(s) => &s.name,
            TypeIntention::Enum(e) => &e.name,
        }
    }

    pub fn base(&self) -> &IntentionBase {
        match self {
            TypeIntention::Class(c) => &c.base,
            TypeIntention::Extension(e) => &e.base,
            TypeIntention::Protocol(p) => &p.base,
            TypeIntention::Struct(s) => &s.base,
            TypeIntention::Enum(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut IntentionBase {
        match self {
            TypeIntention::Class(c) => &mut c.base,
            TypeIntention::Extension(e) => &mut e.base,
            TypeIntention::Protocol(p) => &mut p.base,
            TypeIntention::Struct(s) => &mut s.base,
            TypeIntention::Enum(e) => &mut e.base,
        }
    }

    pub fn as_class(&self) -> Option<&ClassIntention> {
        match self {
            TypeIntention::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassIntention> {
        match self {
            TypeIntention::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn methods(&self) -> &[MethodIntention] {
        match self {
            TypeIntention::Class(c) => &c.methods,
            TypeIntention::Extension(e) => &e.methods,
            TypeIntention::Protocol(p) => &p.methods,
            TypeIntention::Struct(_) | TypeIntention::Enum(_) => &[],
        }
    }

    pub fn properties(&self) -> &[PropertyIntention] {
        match self {
            TypeIntention::Class(c) => &c.properties,
            TypeIntention::Extension(e) => &e.properties,
            TypeIntention::Protocol(p) => &p.properties,
            TypeIntention::Struct(_) | TypeIntention::Enum(_) => &[],
        }
    }
}

// ============================================================================
// Class
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClassIntention {
    pub base: IntentionBase,
    pub name: String,
    pub superclass: Option<String>,
    pub protocols: Vec<String>,
    pub origin: TypeOrigin,
    pub ivars: Vec<InstanceVariableIntention>,
    pub properties: Vec<PropertyIntention>,
    pub initializers: Vec<InitializerIntention>,
    pub methods: Vec<MethodIntention>,
    pub synthesizes: Vec<SynthesizeDirective>,
}

impl ClassIntention {
    pub fn new(base: IntentionBase, name: impl Into<String>, origin: TypeOrigin) -> Self {
        Self {
            base,
            name: name.into(),
            superclass: None,
            protocols: Vec::new(),
            origin,
            ivars: Vec::new(),
            properties: Vec::new(),
            initializers: Vec::new(),
            methods: Vec::new(),
            synthesizes: Vec::new(),
        }
    }

    pub fn add_protocol(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.protocols.contains(&name) {
            self.protocols.push(name);
        }
    }

    pub fn add_ivar(&mut self, mut ivar: InstanceVariableIntention) {
        ivar.base.parent = Some(self.base.id);
        self.ivars.push(ivar);
    }

    pub fn add_property(&mut self, mut property: PropertyIntention) {
        property.base.parent = Some(self.base.id);
        self.properties.push(property);
    }

    pub fn add_method(&mut self, mut method: MethodIntention) {
        method.base.parent = Some(self.base.id);
        self.methods.push(method);
    }

    pub fn add_initializer(&mut self, mut initializer: InitializerIntention) {
        initializer.base.parent = Some(self.base.id);
        self.initializers.push(initializer);
    }

    /// Remove and return a method, unlinking it from this class.
    pub fn take_method(&mut self, index: usize) -> MethodIntention {
        let mut method = self.methods.remove(index);
        method.base.unlink();
        method
    }

    pub fn has_ivar(&self, name: &str) -> bool {
        self.ivars.iter().any(|i| i.name == name)
    }

    pub fn property_index(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }
}

// ============================================================================
// Class extension (category)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClassExtensionIntention {
    pub base: IntentionBase,
    pub class_name: String,
    /// `None` for anonymous class extensions `@interface C ()`.
    pub category_name: Option<String>,
    pub protocols: Vec<String>,
    pub origin: TypeOrigin,
    pub properties: Vec<PropertyIntention>,
    pub methods: Vec<MethodIntention>,
}

impl ClassExtensionIntention {
    pub fn new(
        base: IntentionBase,
        class_name: impl Into<String>,
        category_name: Option<String>,
        origin: TypeOrigin,
    ) -> Self {
        Self {
            base,
            class_name: class_name.into(),
            category_name,
            protocols: Vec::new(),
            origin,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn add_property(&mut self, mut property: PropertyIntention) {
        property.base.parent = Some(self.base.id);
        self.properties.push(property);
    }

    pub fn add_method(&mut self, mut method: MethodIntention) {
        method.base.parent = Some(self.base.id);
        self.methods.push(method);
    }

    pub fn take_method(&mut self, index: usize) -> MethodIntention {
        let mut method = self.methods.remove(index);
        method.base.unlink();
        method
    }
}

// ============================================================================
// Protocol
// ============================================================================

#[derive(Debug, Clone)]
pub struct ProtocolIntention {
    pub base: IntentionBase,
    pub name: String,
    pub protocols: Vec<String>,
    pub properties: Vec<PropertyIntention>,
    pub methods: Vec<MethodIntention>,
}

impl ProtocolIntention {
    pub fn new(base: IntentionBase, name: impl Into<String>) -> Self {
        Self {
            base,
            name: name.into(),
            protocols: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn add_property(&mut self, mut property: PropertyIntention) {
        property.base.parent = Some(self.base.id);
        self.properties.push(property);
    }

    pub fn add_method(&mut self, mut method: MethodIntention) {
        method.base.parent = Some(self.base.id);
        self.methods.push(method);
    }
}

// ============================================================================
// Struct and enum
// ============================================================================

#[derive(Debug, Clone)]
pub struct StructIntention {
    pub base: IntentionBase,
    pub name: String,
    pub fields: Vec<InstanceVariableIntention>,
}

impl StructIntention {
    pub fn new(base: IntentionBase, name: impl Into<String>) -> Self {
        Self {
            base,
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, mut field: InstanceVariableIntention) {
        field.base.parent = Some(self.base.id);
        self.fields.push(field);
    }
}

#[derive(Debug, Clone)]
pub struct EnumIntention {
    pub base: IntentionBase,
    pub name: String,
    pub raw_type: SwiftType,
    pub cases: Vec<EnumCaseIntention>,
}

impl EnumIntention {
    pub fn new(base: IntentionBase, name: impl Into<String>, raw_type: SwiftType) -> Self {
        Self {
            base,
            name: name.into(),
            raw_type,
            cases: Vec::new(),
        }
    }

    pub fn add_case(&mut self, mut case: EnumCaseIntention) {
        case.base.parent = Some(self.base.id);
        self.cases.push(case);
    }

    pub fn has_case(&self, name: &str) -> bool {
        self.cases.iter().any(|c| c.name == name)
    }
}
