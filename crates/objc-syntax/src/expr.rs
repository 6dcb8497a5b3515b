// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C expression trees
//!
//! Every variant mirrors a grammar production. Nodes the grammar could not
//! parse arrive as `Unknown` with their source text preserved; translation
//! carries them through instead of failing.

use crate::stmt::ObjcCompoundStatement;
use crate::types::{ObjcType, ObjcTypeAnnotation};

#[derive(Debug, Clone, PartialEq)]
pub enum ObjcExpression {
    Identifier(String),
    Constant(ObjcLiteral),
    /// `[receiver selector]` / `[receiver keyword:arg ...]`
    Message {
        receiver: Box<ObjcExpression>,
        selector: ObjcMessageSelector,
    },
    /// `@selector(name:)`
    SelectorLiteral(String),
    Binary {
        op: ObjcOperator,
        lhs: Box<ObjcExpression>,
        rhs: Box<ObjcExpression>,
    },
    Assignment {
        target: Box<ObjcExpression>,
        op: ObjcOperator,
        value: Box<ObjcExpression>,
    },
    Prefix {
        op: ObjcOperator,
        operand: Box<ObjcExpression>,
    },
    /// `x++` / `x--`
    Postfix {
        operand: Box<ObjcExpression>,
        op: ObjcOperator,
    },
    /// `a ? b : c`; `if_true` is absent for the GCC `a ?: c` form
    Ternary {
        condition: Box<ObjcExpression>,
        if_true: Option<Box<ObjcExpression>>,
        if_false: Box<ObjcExpression>,
    },
    /// `(T)expr`
    Cast {
        target: ObjcTypeAnnotation,
        operand: Box<ObjcExpression>,
    },
    FunctionCall {
        callee: Box<ObjcExpression>,
        arguments: Vec<ObjcExpression>,
    },
    Subscript {
        target: Box<ObjcExpression>,
        index: Box<ObjcExpression>,
    },
    /// `x.y` or `x->y`
    MemberAccess {
        target: Box<ObjcExpression>,
        member: String,
        is_arrow: bool,
    },
    /// `^R(params) { ... }`
    Block {
        parameters: Vec<(String, ObjcType)>,
        return_type: Option<ObjcType>,
        body: ObjcCompoundStatement,
    },
    /// `@[a, b]`
    ArrayLiteral(Vec<ObjcExpression>),
    /// `@{k: v}`
    DictionaryLiteral(Vec<(ObjcExpression, ObjcExpression)>),
    Parenthesized(Box<ObjcExpression>),
    /// An unparseable fragment, source text preserved for human review.
    Unknown { text: String },
}

impl ObjcExpression {
    pub fn ident(name: &str) -> ObjcExpression {
        ObjcExpression::Identifier(name.to_string())
    }

    pub fn number(text: &str) -> ObjcExpression {
        ObjcExpression::Constant(ObjcLiteral::Number(text.to_string()))
    }

    /// `[receiver name]`
    pub fn message(receiver: ObjcExpression, name: &str) -> ObjcExpression {
        ObjcExpression::Message {
            receiver: Box::new(receiver),
            selector: ObjcMessageSelector::Bare(name.to_string()),
        }
    }
}

/// Literal constants carry their raw spelling; numeric base and suffix
/// handling happens in the expression reader.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjcLiteral {
    /// Any numeric literal, suffix included: `0x1FUL`, `1.5f`
    Number(String),
    /// `@"..."` and `"..."` both arrive here, quotes stripped
    String(String),
    /// `YES` / `NO`
    Boolean(bool),
    /// `'c'`
    Char(char),
    /// `nil` / `NULL` / `Nil`
    Nil,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjcMessageSelector {
    /// `[receiver name]`
    Bare(String),
    /// `[receiver keyword:arg ...]`
    Keywords(Vec<ObjcKeywordArgument>),
}

/// One keyword argument of a message send. `expressions` holds more than one
/// element for the comma-separated variadic form `keyword:a, b, c`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjcKeywordArgument {
    pub label: Option<String>,
    pub expressions: Vec<ObjcExpression>,
}

impl ObjcKeywordArgument {
    pub fn new(label: &str, expression: ObjcExpression) -> Self {
        Self {
            label: Some(label.to_string()),
            expressions: vec![expression],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjcOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    ShiftLeft,
    ShiftRight,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    Increment,
    Decrement,
    Negate,
    AddressOf,
    Dereference,
}

impl ObjcOperator {
    /// Reconstruct an operator from grammar tokens. The grammar produces the
    /// shift operators as two adjacent angle-bracket tokens, so `<` followed
    /// by an adjacent `<` is `<<`, and likewise for `>`.
    pub fn from_tokens(first: &str, adjacent: Option<&str>) -> Option<ObjcOperator> {
        match (first, adjacent) {
            ("<", Some("<")) => Some(ObjcOperator::ShiftLeft),
            (">", Some(">")) => Some(ObjcOperator::ShiftRight),
            ("<", None) => Some(ObjcOperator::LessThan),
            (">", None) => Some(ObjcOperator::GreaterThan),
            ("+", None) => Some(ObjcOperator::Add),
            ("-", None) => Some(ObjcOperator::Subtract),
            ("*", None) => Some(ObjcOperator::Multiply),
            ("/", None) => Some(ObjcOperator::Divide),
            ("%", None) => Some(ObjcOperator::Modulo),
            ("==", None) => Some(ObjcOperator::Equal),
            ("!=", None) => Some(ObjcOperator::NotEqual),
            ("<=", None) => Some(ObjcOperator::LessThanOrEqual),
            (">=", None) => Some(ObjcOperator::GreaterThanOrEqual),
            ("&&", None) => Some(ObjcOperator::LogicalAnd),
            ("||", None) => Some(ObjcOperator::LogicalOr),
            ("&", None) => Some(ObjcOperator::BitwiseAnd),
            ("|", None) => Some(ObjcOperator::BitwiseOr),
            ("^", None) => Some(ObjcOperator::BitwiseXor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_operators_from_paired_tokens() {
        assert_eq!(
            ObjcOperator::from_tokens("<", Some("<")),
            Some(ObjcOperator::ShiftLeft)
        );
        assert_eq!(
            ObjcOperator::from_tokens(">", Some(">")),
            Some(ObjcOperator::ShiftRight)
        );
        assert_eq!(
            ObjcOperator::from_tokens("<", None),
            Some(ObjcOperator::LessThan)
        );
    }
}
