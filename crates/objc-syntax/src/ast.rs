// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Top-level Objective-C declarations
//!
//! One file is a flat list of declarations in source order. Interface bodies
//! keep their ivar lists as token-order streams of access specifiers and
//! declarations, and protocol bodies keep `@required`/`@optional` markers in
//! place, because the structural reader resolves both by scanning in order.

use crate::expr::ObjcExpression;
use crate::source::SourceLocation;
use crate::stmt::ObjcCompoundStatement;
use crate::types::{Nullability, ObjcType, ObjcTypeAnnotation};

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct ObjcFile {
    pub source_path: String,
    pub declarations: Vec<ObjcDeclaration>,
}

impl ObjcFile {
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            declarations: Vec::new(),
        }
    }

    pub fn with_declarations(mut self, declarations: Vec<ObjcDeclaration>) -> Self {
        self.declarations = declarations;
        self
    }
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum ObjcDeclaration {
    Interface(ObjcInterface),
    Implementation(ObjcImplementation),
    CategoryInterface(ObjcCategoryInterface),
    CategoryImplementation(ObjcCategoryImplementation),
    Protocol(ObjcProtocolDecl),
    Enum(ObjcEnumDecl),
    Typedef(ObjcTypedef),
    Struct(ObjcStructDecl),
    Variable(ObjcVariableDecl),
    Function(ObjcFunctionDef),
    /// A preprocessor directive preserved verbatim for comment emission.
    PreprocessorDirective {
        text: String,
        location: SourceLocation,
    },
}

/// `@interface Name : Superclass <Protocols>`
#[derive(Debug, Clone)]
pub struct ObjcInterface {
    pub name: String,
    pub superclass: Option<String>,
    pub protocols: Vec<String>,
    pub ivar_list: Vec<ObjcIvarListItem>,
    pub properties: Vec<ObjcPropertyDecl>,
    pub methods: Vec<ObjcMethodDecl>,
    pub location: SourceLocation,
}

impl ObjcInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            protocols: Vec::new(),
            ivar_list: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            location: SourceLocation::unknown(),
        }
    }
}

/// `@implementation Name`
#[derive(Debug, Clone)]
pub struct ObjcImplementation {
    pub name: String,
    pub superclass: Option<String>,
    pub ivar_list: Vec<ObjcIvarListItem>,
    pub methods: Vec<ObjcMethodDecl>,
    pub synthesizes: Vec<ObjcSynthesizeDecl>,
    pub location: SourceLocation,
}

impl ObjcImplementation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            ivar_list: Vec::new(),
            methods: Vec::new(),
            synthesizes: Vec::new(),
            location: SourceLocation::unknown(),
        }
    }
}

/// `@interface Name (Category)`
#[derive(Debug, Clone)]
pub struct ObjcCategoryInterface {
    pub class_name: String,
    pub category_name: String,
    pub protocols: Vec<String>,
    pub properties: Vec<ObjcPropertyDecl>,
    pub methods: Vec<ObjcMethodDecl>,
    pub location: SourceLocation,
}

/// `@implementation Name (Category)`
#[derive(Debug, Clone)]
pub struct ObjcCategoryImplementation {
    pub class_name: String,
    pub category_name: String,
    pub methods: Vec<ObjcMethodDecl>,
    pub location: SourceLocation,
}

/// `@protocol Name <Inherited>`
#[derive(Debug, Clone)]
pub struct ObjcProtocolDecl {
    pub name: String,
    pub protocols: Vec<String>,
    pub items: Vec<ObjcProtocolItem>,
    pub location: SourceLocation,
}

/// A protocol body item in token order. `Required`/`Optional` markers switch
/// the optionality of every following member until the next marker.
#[derive(Debug, Clone)]
pub enum ObjcProtocolItem {
    Required,
    Optional,
    Property(ObjcPropertyDecl),
    Method(ObjcMethodDecl),
}

/// An ivar list item in token order. `Access` entries switch the access level
/// of every following declaration until the next specifier.
#[derive(Debug, Clone)]
pub enum ObjcIvarListItem {
    Access(ObjcIvarAccess),
    Ivar(ObjcIvarDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjcIvarAccess {
    Private,
    Protected,
    Package,
    Public,
}

#[derive(Debug, Clone)]
pub struct ObjcIvarDecl {
    pub name: String,
    pub ty: ObjcType,
    pub nullability: Nullability,
    pub location: SourceLocation,
}

impl ObjcIvarDecl {
    pub fn new(name: impl Into<String>, ty: ObjcType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullability: Nullability::Unspecified,
            location: SourceLocation::unknown(),
        }
    }
}

/// `@property (attributes) Type name;`
#[derive(Debug, Clone)]
pub struct ObjcPropertyDecl {
    pub name: String,
    pub ty: ObjcType,
    pub attributes: Vec<ObjcPropertyAttribute>,
    pub location: SourceLocation,
}

impl ObjcPropertyDecl {
    pub fn new(name: impl Into<String>, ty: ObjcType) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Vec::new(),
            location: SourceLocation::unknown(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<ObjcPropertyAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn nullability(&self) -> Nullability {
        self.attributes
            .iter()
            .find_map(|a| match a {
                ObjcPropertyAttribute::Nullability(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(Nullability::Unspecified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjcPropertyAttribute {
    Readonly,
    Readwrite,
    Weak,
    Strong,
    Assign,
    Copy,
    Atomic,
    Nonatomic,
    Class,
    Getter(String),
    Setter(String),
    Nullability(Nullability),
}

/// A method declaration or definition.
#[derive(Debug, Clone)]
pub struct ObjcMethodDecl {
    pub is_class_method: bool,
    pub return_type: ObjcTypeAnnotation,
    pub selector: ObjcMethodSelector,
    pub body: Option<ObjcCompoundStatement>,
    pub location: SourceLocation,
}

impl ObjcMethodDecl {
    /// A parameterless instance method: `- (R)name`.
    pub fn bare(name: impl Into<String>, return_type: ObjcTypeAnnotation) -> Self {
        Self {
            is_class_method: false,
            return_type,
            selector: ObjcMethodSelector::Bare(name.into()),
            body: None,
            location: SourceLocation::unknown(),
        }
    }

    /// A keyword-selector instance method: `- (R)a:(T)x b:(U)y`.
    pub fn keywords(keywords: Vec<ObjcKeywordDecl>, return_type: ObjcTypeAnnotation) -> Self {
        Self {
            is_class_method: false,
            return_type,
            selector: ObjcMethodSelector::Keywords(keywords),
            body: None,
            location: SourceLocation::unknown(),
        }
    }

    pub fn with_body(mut self, body: ObjcCompoundStatement) -> Self {
        self.body = Some(body);
        self
    }

    /// The selector labels in declaration order, e.g. `["a", "b"]` for `a:b:`.
    pub fn selector_labels(&self) -> Vec<String> {
        match &self.selector {
            ObjcMethodSelector::Bare(name) => vec![name.clone()],
            ObjcMethodSelector::Keywords(parts) => parts
                .iter()
                .map(|p| p.label.clone().unwrap_or_default())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ObjcMethodSelector {
    /// A selector with no parameters: `name`
    Bare(String),
    /// A keyword selector, one part per parameter: `a:(T)x b:(U)y`
    Keywords(Vec<ObjcKeywordDecl>),
}

#[derive(Debug, Clone)]
pub struct ObjcKeywordDecl {
    /// The keyword label; `None` for the anonymous `:(T)x` form.
    pub label: Option<String>,
    pub parameter: ObjcTypeAnnotation,
    pub name: String,
}

impl ObjcKeywordDecl {
    pub fn new(label: &str, parameter: ObjcTypeAnnotation, name: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            parameter,
            name: name.to_string(),
        }
    }
}

/// `@synthesize property = ivar;` or `@dynamic property;`
#[derive(Debug, Clone)]
pub struct ObjcSynthesizeDecl {
    pub is_dynamic: bool,
    pub property_name: String,
    pub ivar_name: Option<String>,
    pub location: SourceLocation,
}

/// `typedef NS_ENUM(RawType, Name) { ... };`
#[derive(Debug, Clone)]
pub struct ObjcEnumDecl {
    pub name: String,
    pub raw_type: ObjcType,
    pub cases: Vec<ObjcEnumCase>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ObjcEnumCase {
    pub name: String,
    pub value: Option<ObjcExpression>,
}

/// `typedef Existing NewName;`
#[derive(Debug, Clone)]
pub struct ObjcTypedef {
    pub name: String,
    pub ty: ObjcType,
    pub location: SourceLocation,
}

/// A plain C struct declaration.
#[derive(Debug, Clone)]
pub struct ObjcStructDecl {
    pub name: String,
    pub fields: Vec<ObjcStructField>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ObjcStructField {
    pub name: String,
    pub ty: ObjcType,
}

/// A file-scope variable declaration.
#[derive(Debug, Clone)]
pub struct ObjcVariableDecl {
    pub name: String,
    pub ty: ObjcType,
    pub nullability: Nullability,
    pub is_constant: bool,
    pub initializer: Option<ObjcExpression>,
    pub location: SourceLocation,
}

/// A file-scope C function definition or prototype.
#[derive(Debug, Clone)]
pub struct ObjcFunctionDef {
    pub name: String,
    pub return_type: ObjcTypeAnnotation,
    pub parameters: Vec<ObjcFunctionParam>,
    pub body: Option<ObjcCompoundStatement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ObjcFunctionParam {
    pub name: String,
    pub ty: ObjcTypeAnnotation,
}
