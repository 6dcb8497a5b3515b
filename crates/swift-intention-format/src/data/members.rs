// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Member intentions: methods, initializers, properties, ivars, globals

use crate::data::statements::FunctionBody;
use crate::data::swift_type::SwiftType;
use crate::data::IntentionBase;
use objc_syntax::Nullability;
use std::fmt;
use std::fmt::{Display, Formatter};

// ============================================================================
// Selectors and signatures
// ============================================================================

/// Objective-C selector identity: the ordered keyword labels plus the
/// parameter count. Parameter names and types never participate in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub labels: Vec<String>,
    pub parameter_count: usize,
}

impl Selector {
    pub fn new(labels: Vec<String>, parameter_count: usize) -> Self {
        Self {
            labels,
            parameter_count,
        }
    }

    /// A parameterless selector: `name`.
    pub fn bare(name: &str) -> Self {
        Self {
            labels: vec![name.to_string()],
            parameter_count: 0,
        }
    }

    /// A one-parameter selector: `name:`.
    pub fn unary(name: &str) -> Self {
        Self {
            labels: vec![name.to_string()],
            parameter_count: 1,
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.parameter_count == 0 {
            write!(f, "{}", self.labels.join(""))
        } else {
            for label in &self.labels {
                write!(f, "{}:", label)?;
            }
            Ok(())
        }
    }
}

/// One parameter of a translated signature. The declared Objective-C
/// nullability is retained alongside the mapped Swift type so signature
/// merging can reconcile annotations after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSignature {
    /// Argument label; `None` for the first parameter (folded into the
    /// method name) and for anonymous selector parts.
    pub label: Option<String>,
    pub name: String,
    pub swift_type: SwiftType,
    pub nullability: Nullability,
}

impl ParameterSignature {
    pub fn new(label: Option<&str>, name: &str, swift_type: SwiftType) -> Self {
        Self {
            label: label.map(str::to_string),
            name: name.to_string(),
            swift_type,
            nullability: Nullability::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParameterSignature>,
    pub return_type: SwiftType,
    pub return_nullability: Nullability,
    pub is_static: bool,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, return_type: SwiftType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            return_nullability: Nullability::Unspecified,
            is_static: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterSignature>) -> Self {
        self.parameters = parameters;
        self
    }

    /// The selector this signature answers to. The method name contributes
    /// the first label; each parameter past the first contributes its
    /// argument label.
    pub fn selector(&self) -> Selector {
        let mut labels = vec![self.name.clone()];
        for parameter in self.parameters.iter().skip(1) {
            labels.push(parameter.label.clone().unwrap_or_default());
        }
        Selector::new(labels, self.parameters.len())
    }
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Strong,
    Weak,
    UnownedSafe,
    UnownedUnsafe,
}

impl Default for Ownership {
    fn default() -> Self {
        Ownership::Strong
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Private,
    FilePrivate,
    Internal,
    Public,
}

/// Declaration storage: the variable's type plus ownership and constness.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage {
    pub swift_type: SwiftType,
    pub ownership: Ownership,
    pub is_constant: bool,
}

impl Storage {
    pub fn variable(swift_type: SwiftType) -> Self {
        Self {
            swift_type,
            ownership: Ownership::Strong,
            is_constant: false,
        }
    }

    pub fn constant(swift_type: SwiftType) -> Self {
        Self {
            swift_type,
            ownership: Ownership::Strong,
            is_constant: true,
        }
    }
}

// ============================================================================
// Methods and initializers
// ============================================================================

#[derive(Debug, Clone)]
pub struct MethodIntention {
    pub base: IntentionBase,
    pub signature: FunctionSignature,
    pub body: Option<FunctionBody>,
    /// Declared under `@optional` in a protocol.
    pub is_optional: bool,
    pub is_override: bool,
}

impl MethodIntention {
    pub fn selector(&self) -> Selector {
        self.signature.selector()
    }

    /// Overwrite one parameter's nullability, re-resolving the mapped Swift
    /// type and recording the change.
    pub fn apply_parameter_nullability(
        &mut self,
        index: usize,
        nullability: Nullability,
        tag: &str,
    ) {
        let parameter = &mut self.signature.parameters[index];
        let old = parameter.nullability;
        parameter.nullability = nullability;
        parameter.swift_type = parameter.swift_type.clone().with_nullability(nullability);
        self.base.history.record(
            tag,
            format!(
                "changed nullability of parameter '{}' from {:?} to {:?}",
                parameter.name, old, nullability
            ),
        );
    }

    /// Overwrite the return nullability, re-resolving the mapped Swift type
    /// and recording the change.
    pub fn apply_return_nullability(&mut self, nullability: Nullability, tag: &str) {
        let old = self.signature.return_nullability;
        self.signature.return_nullability = nullability;
        self.signature.return_type = self
            .signature
            .return_type
            .clone()
            .with_nullability(nullability);
        self.base.history.record(
            tag,
            format!(
                "changed return nullability from {:?} to {:?}",
                old, nullability
            ),
        );
    }

    pub fn mark_override(&mut self, tag: &str, reason: &str) {
        if !self.is_override {
            self.is_override = true;
            self.base
                .history
                .record(tag, format!("marked as override: {}", reason));
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitializerIntention {
    pub base: IntentionBase,
    pub parameters: Vec<ParameterSignature>,
    pub is_failable: bool,
    pub body: Option<FunctionBody>,
    pub is_override: bool,
}

impl InitializerIntention {
    /// Initializers answer to an `init`-rooted selector built from their
    /// argument labels.
    pub fn selector(&self) -> Selector {
        let mut labels = vec!["init".to_string()];
        for parameter in &self.parameters {
            labels.push(parameter.label.clone().unwrap_or_default());
        }
        Selector::new(labels, self.parameters.len())
    }

    pub fn mark_override(&mut self, tag: &str, reason: &str) {
        if !self.is_override {
            self.is_override = true;
            self.base
                .history
                .record(tag, format!("marked as override: {}", reason));
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyAttributes {
    pub is_readonly: bool,
    pub is_copy: bool,
    pub is_assign: bool,
    pub is_class: bool,
    pub getter_name: Option<String>,
    pub setter_name: Option<String>,
}

/// How the property is implemented.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyMode {
    /// Plain stored property.
    Stored,
    /// Computed, getter only.
    Computed(FunctionBody),
    /// Explicit getter and setter.
    Accessors {
        getter: FunctionBody,
        setter: PropertySetter,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySetter {
    /// Name the setter body binds the incoming value to.
    pub value_identifier: String,
    pub body: FunctionBody,
}

#[derive(Debug, Clone)]
pub struct PropertyIntention {
    pub base: IntentionBase,
    pub name: String,
    pub storage: Storage,
    pub attributes: PropertyAttributes,
    pub mode: PropertyMode,
    /// Declared under `@optional` in a protocol.
    pub is_optional: bool,
    /// A stricter access level for the setter alone (`private(set)`).
    pub setter_access: Option<AccessLevel>,
}

impl PropertyIntention {
    /// The selector of the synthesized getter: the `getter=` attribute name
    /// when present, otherwise the property name.
    pub fn getter_selector(&self) -> Selector {
        let name = self.attributes.getter_name.as_deref().unwrap_or(&self.name);
        Selector::bare(name)
    }

    /// The selector of the synthesized setter: `setName:`, or the `setter=`
    /// attribute name when present.
    pub fn setter_selector(&self) -> Selector {
        match &self.attributes.setter_name {
            Some(name) => Selector::unary(name.trim_end_matches(':')),
            None => Selector::unary(&format!("set{}", capitalize(&self.name))),
        }
    }

    /// Swap the implementation mode, recording the transition.
    pub fn set_mode(&mut self, mode: PropertyMode, tag: &str, description: &str) {
        let old = mode_name(&self.mode);
        let new = mode_name(&mode);
        self.mode = mode;
        self.base.history.record(
            tag,
            format!("changed mode from {} to {}: {}", old, new, description),
        );
    }
}

fn mode_name(mode: &PropertyMode) -> &'static str {
    match mode {
        PropertyMode::Stored => "stored",
        PropertyMode::Computed(_) => "computed",
        PropertyMode::Accessors { .. } => "getter+setter",
    }
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// Ivars, globals, typealiases, enum cases
// ============================================================================

#[derive(Debug, Clone)]
pub struct InstanceVariableIntention {
    pub base: IntentionBase,
    pub name: String,
    pub storage: Storage,
    pub access: AccessLevel,
}

#[derive(Debug, Clone)]
pub struct GlobalVariableIntention {
    pub base: IntentionBase,
    pub name: String,
    pub storage: Storage,
    pub initializer: Option<crate::SwiftExpression>,
}

#[derive(Debug, Clone)]
pub struct GlobalFunctionIntention {
    pub base: IntentionBase,
    pub signature: FunctionSignature,
    pub body: Option<FunctionBody>,
}

#[derive(Debug, Clone)]
pub struct TypealiasIntention {
    pub base: IntentionBase,
    pub name: String,
    pub aliased: SwiftType,
}

#[derive(Debug, Clone)]
pub struct EnumCaseIntention {
    pub base: IntentionBase,
    pub name: String,
    pub raw_value: Option<crate::SwiftExpression>,
}
