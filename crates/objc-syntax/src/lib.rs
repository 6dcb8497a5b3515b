// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C source model
//!
//! This crate defines the parsed representation of Objective-C sources that
//! the translation pipeline consumes: top-level declarations, expression and
//! statement trees, type descriptors with nullability annotations, and source
//! locations. It does not contain a lexer or parser; an external grammar
//! produces these nodes and hands them over through the [`ParserAdapter`]
//! interface together with the file's assume-nonnull regions.

mod ast;
mod diagnostics;
mod expr;
mod input;
mod source;
mod stmt;
mod types;

pub use ast::{
    ObjcCategoryImplementation, ObjcCategoryInterface, ObjcDeclaration, ObjcEnumCase,
    ObjcEnumDecl, ObjcFile, ObjcFunctionDef, ObjcFunctionParam, ObjcImplementation,
    ObjcInterface, ObjcIvarAccess, ObjcIvarDecl, ObjcIvarListItem, ObjcKeywordDecl,
    ObjcMethodDecl, ObjcMethodSelector, ObjcPropertyAttribute, ObjcPropertyDecl,
    ObjcProtocolDecl, ObjcProtocolItem, ObjcStructDecl, ObjcStructField,
    ObjcSynthesizeDecl, ObjcTypedef, ObjcVariableDecl,
};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use expr::{
    ObjcExpression, ObjcKeywordArgument, ObjcLiteral, ObjcMessageSelector, ObjcOperator,
};
pub use input::{InputSource, ParsedSource, ParserAdapter, SourceProvider};
pub use source::{NonnullRegions, SourceLocation, TokenRange};
pub use stmt::{
    ObjcBlockItem, ObjcCompoundStatement, ObjcForInitializer, ObjcLocalDeclaration,
    ObjcStatement, ObjcSwitchCase,
};
pub use types::{Nullability, ObjcType, ObjcTypeAnnotation};
