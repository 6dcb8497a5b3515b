// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C statement trees
//!
//! Compound statements keep declarations and statements interleaved in a
//! single `items` list; source order inside a compound is an invariant the
//! whole pipeline preserves.

use crate::expr::ObjcExpression;
use crate::types::ObjcTypeAnnotation;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjcCompoundStatement {
    pub items: Vec<ObjcBlockItem>,
}

impl ObjcCompoundStatement {
    pub fn new(items: Vec<ObjcBlockItem>) -> Self {
        Self { items }
    }

    pub fn statements(statements: Vec<ObjcStatement>) -> Self {
        Self {
            items: statements.into_iter().map(ObjcBlockItem::Statement).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjcBlockItem {
    Declaration(ObjcLocalDeclaration),
    Statement(ObjcStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjcLocalDeclaration {
    pub name: String,
    pub ty: ObjcTypeAnnotation,
    pub is_constant: bool,
    pub initializer: Option<ObjcExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjcStatement {
    Compound(ObjcCompoundStatement),
    If {
        condition: ObjcExpression,
        body: ObjcCompoundStatement,
        else_body: Option<ObjcCompoundStatement>,
    },
    While {
        condition: ObjcExpression,
        body: ObjcCompoundStatement,
    },
    DoWhile {
        body: ObjcCompoundStatement,
        condition: ObjcExpression,
    },
    /// Classic C `for (init; cond; step)`
    For {
        initializer: Option<ObjcForInitializer>,
        condition: Option<ObjcExpression>,
        increment: Option<ObjcExpression>,
        body: ObjcCompoundStatement,
    },
    /// Fast enumeration: `for (Type name in collection)`
    ForIn {
        variable_name: String,
        variable_type: ObjcTypeAnnotation,
        collection: ObjcExpression,
        body: ObjcCompoundStatement,
    },
    Switch {
        subject: ObjcExpression,
        cases: Vec<ObjcSwitchCase>,
        default: Option<Vec<ObjcBlockItem>>,
    },
    Return(Option<ObjcExpression>),
    Break,
    Continue,
    /// A comma-separated expression statement: `a = 1, b = 2;`
    Expressions(Vec<ObjcExpression>),
    /// An unparseable statement, source text preserved for human review.
    Unknown { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjcSwitchCase {
    pub pattern: ObjcExpression,
    pub body: Vec<ObjcBlockItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjcForInitializer {
    Declaration(ObjcLocalDeclaration),
    Expression(ObjcExpression),
}
