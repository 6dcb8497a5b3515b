// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Expression lowering
//!
//! Maps every Objective-C expression form onto its Swift counterpart.
//! Message sends become method calls with the first keyword as the method
//! name; the GCC `a ?: c` ternary collapses to `a ?? c`; increment and
//! decrement become compound assignments; casts split into `as?` for
//! reference types and conversion calls for numeric ones.

use crate::statement_reader::StatementReader;
use crate::type_mapper::{MappingContext, TypeMapper};
use objc_syntax::{
    ObjcExpression, ObjcKeywordArgument, ObjcLiteral, ObjcMessageSelector, ObjcOperator,
};
use swift_intention_format::{
    CallArgument, ClosureParameter, IntegerRadix, SwiftConstant, SwiftExpression, SwiftOperator,
    SwiftType,
};

pub struct ExpressionReader<'a> {
    mapper: &'a TypeMapper,
    in_nonnull_region: bool,
}

impl<'a> ExpressionReader<'a> {
    pub fn new(mapper: &'a TypeMapper, in_nonnull_region: bool) -> Self {
        Self {
            mapper,
            in_nonnull_region,
        }
    }

    pub fn read(&self, expression: &ObjcExpression) -> SwiftExpression {
        match expression {
            ObjcExpression::Identifier(name) => SwiftExpression::ident(name),

            ObjcExpression::Constant(literal) => SwiftExpression::Constant(read_literal(literal)),

            ObjcExpression::Message { receiver, selector } => {
                self.read_message(receiver, selector)
            }

            // @selector(x:) -> Selector("x:")
            ObjcExpression::SelectorLiteral(name) => SwiftExpression::call(
                SwiftExpression::ident("Selector"),
                vec![CallArgument::unlabeled(SwiftExpression::Constant(
                    SwiftConstant::StringLiteral(name.clone()),
                ))],
            ),

            ObjcExpression::Binary { op, lhs, rhs } => SwiftExpression::Binary {
                op: read_operator(*op),
                lhs: Box::new(self.read(lhs)),
                rhs: Box::new(self.read(rhs)),
            },

            ObjcExpression::Assignment { target, op, value } => SwiftExpression::Assignment {
                target: Box::new(self.read(target)),
                op: read_operator(*op),
                value: Box::new(self.read(value)),
            },

            ObjcExpression::Prefix { op, operand } => self.read_prefix(*op, operand),

            // x++ / x-- -> x += 1 / x -= 1
            ObjcExpression::Postfix { operand, op } => match op {
                ObjcOperator::Increment => compound_step(self.read(operand), SwiftOperator::AddAssign),
                ObjcOperator::Decrement => {
                    compound_step(self.read(operand), SwiftOperator::SubtractAssign)
                }
                other => SwiftExpression::Prefix {
                    op: read_operator(*other),
                    operand: Box::new(self.read(operand)),
                },
            },

            ObjcExpression::Ternary {
                condition,
                if_true,
                if_false,
            } => match if_true {
                Some(if_true) => SwiftExpression::Ternary {
                    condition: Box::new(self.read(condition)),
                    if_true: Box::new(self.read(if_true)),
                    if_false: Box::new(self.read(if_false)),
                },
                // GCC `a ?: c` collapses to null-coalescing.
                None => SwiftExpression::Binary {
                    op: SwiftOperator::NilCoalesce,
                    lhs: Box::new(self.read(condition)),
                    rhs: Box::new(self.read(if_false)),
                },
            },

            ObjcExpression::Cast { target, operand } => {
                let context = MappingContext::in_region(self.in_nonnull_region)
                    .with_explicit(target.nullability);
                let swift_type = self.mapper.map(&target.ty, &context);
                let operand = self.read(operand);
                if swift_type.is_numeric() {
                    // (NSInteger)x -> Int(x)
                    let name = swift_type
                        .nominal_name()
                        .expect("numeric types are nominal")
                        .to_string();
                    SwiftExpression::call(
                        SwiftExpression::ident(&name),
                        vec![CallArgument::unlabeled(operand)],
                    )
                } else {
                    // (NSString *)x -> x as? String
                    SwiftExpression::Cast {
                        operand: Box::new(operand),
                        target: swift_type.unwrapped().clone(),
                    }
                }
            }

            ObjcExpression::FunctionCall { callee, arguments } => SwiftExpression::call(
                self.read(callee),
                arguments
                    .iter()
                    .map(|a| CallArgument::unlabeled(self.read(a)))
                    .collect(),
            ),

            ObjcExpression::Subscript { target, index } => SwiftExpression::Subscript {
                base: Box::new(self.read(target)),
                index: Box::new(self.read(index)),
            },

            ObjcExpression::MemberAccess { target, member, .. } => {
                SwiftExpression::member(self.read(target), member)
            }

            ObjcExpression::Block {
                parameters,
                return_type,
                body,
            } => {
                let context = MappingContext::in_region(self.in_nonnull_region);
                let statement_reader =
                    StatementReader::new(self.mapper, self.in_nonnull_region);
                SwiftExpression::Closure {
                    parameters: parameters
                        .iter()
                        .map(|(name, ty)| ClosureParameter {
                            name: name.clone(),
                            swift_type: self.mapper.map(ty, &context),
                        })
                        .collect(),
                    return_type: return_type
                        .as_ref()
                        .map(|ty| self.mapper.map(ty, &context))
                        .unwrap_or(SwiftType::Void),
                    body: statement_reader.read_compound(body),
                }
            }

            ObjcExpression::ArrayLiteral(elements) => SwiftExpression::ArrayLiteral(
                elements.iter().map(|e| self.read(e)).collect(),
            ),

            ObjcExpression::DictionaryLiteral(pairs) => SwiftExpression::DictionaryLiteral(
                pairs
                    .iter()
                    .map(|(k, v)| (self.read(k), self.read(v)))
                    .collect(),
            ),

            ObjcExpression::Parenthesized(inner) => {
                SwiftExpression::Parens(Box::new(self.read(inner)))
            }

            ObjcExpression::Unknown { text } => SwiftExpression::Unknown { text: text.clone() },
        }
    }

    /// `[receiver keyword:a extra, rest:b]` -> `receiver.keyword(a, extra, rest: b)`
    fn read_message(
        &self,
        receiver: &ObjcExpression,
        selector: &ObjcMessageSelector,
    ) -> SwiftExpression {
        let receiver = self.read(receiver);
        match selector {
            ObjcMessageSelector::Bare(name) => {
                SwiftExpression::call(SwiftExpression::member(receiver, name), Vec::new())
            }
            ObjcMessageSelector::Keywords(keywords) => {
                let name = keywords
                    .first()
                    .and_then(|k| k.label.clone())
                    .unwrap_or_default();
                let mut arguments = Vec::new();
                for (index, keyword) in keywords.iter().enumerate() {
                    self.push_keyword_arguments(&mut arguments, keyword, index == 0);
                }
                SwiftExpression::call(SwiftExpression::member(receiver, &name), arguments)
            }
        }
    }

    /// The first expression of a keyword takes the keyword as its label
    /// (except for the first keyword, which is the method name); any extra
    /// comma-separated expressions are unlabeled positional arguments.
    fn push_keyword_arguments(
        &self,
        arguments: &mut Vec<CallArgument>,
        keyword: &ObjcKeywordArgument,
        is_first_keyword: bool,
    ) {
        for (index, expression) in keyword.expressions.iter().enumerate() {
            let value = self.read(expression);
            if index == 0 && !is_first_keyword {
                match &keyword.label {
                    Some(label) => arguments.push(CallArgument::labeled(label, value)),
                    None => arguments.push(CallArgument::unlabeled(value)),
                }
            } else {
                arguments.push(CallArgument::unlabeled(value));
            }
        }
    }

    fn read_prefix(&self, op: ObjcOperator, operand: &ObjcExpression) -> SwiftExpression {
        match op {
            // ++x / --x -> x += 1 / x -= 1
            ObjcOperator::Increment => compound_step(self.read(operand), SwiftOperator::AddAssign),
            ObjcOperator::Decrement => {
                compound_step(self.read(operand), SwiftOperator::SubtractAssign)
            }
            // *p -> p.pointee
            ObjcOperator::Dereference => SwiftExpression::member(self.read(operand), "pointee"),
            ObjcOperator::Negate | ObjcOperator::Subtract => SwiftExpression::Prefix {
                op: SwiftOperator::Negate,
                operand: Box::new(self.read(operand)),
            },
            ObjcOperator::LogicalNot => SwiftExpression::Prefix {
                op: SwiftOperator::LogicalNot,
                operand: Box::new(self.read(operand)),
            },
            ObjcOperator::BitwiseNot => SwiftExpression::Prefix {
                op: SwiftOperator::BitwiseNot,
                operand: Box::new(self.read(operand)),
            },
            // &x survives as-is for inout call sites.
            ObjcOperator::AddressOf => SwiftExpression::Prefix {
                op: SwiftOperator::BitwiseAnd,
                operand: Box::new(self.read(operand)),
            },
            other => SwiftExpression::Prefix {
                op: read_operator(other),
                operand: Box::new(self.read(operand)),
            },
        }
    }
}

fn compound_step(target: SwiftExpression, op: SwiftOperator) -> SwiftExpression {
    SwiftExpression::Assignment {
        target: Box::new(target),
        op,
        value: Box::new(SwiftExpression::integer(1)),
    }
}

fn read_operator(op: ObjcOperator) -> SwiftOperator {
    match op {
        ObjcOperator::Add => SwiftOperator::Add,
        ObjcOperator::Subtract => SwiftOperator::Subtract,
        ObjcOperator::Multiply => SwiftOperator::Multiply,
        ObjcOperator::Divide => SwiftOperator::Divide,
        ObjcOperator::Modulo => SwiftOperator::Modulo,
        ObjcOperator::Equal => SwiftOperator::Equal,
        ObjcOperator::NotEqual => SwiftOperator::NotEqual,
        ObjcOperator::LessThan => SwiftOperator::LessThan,
        ObjcOperator::LessThanOrEqual => SwiftOperator::LessThanOrEqual,
        ObjcOperator::GreaterThan => SwiftOperator::GreaterThan,
        ObjcOperator::GreaterThanOrEqual => SwiftOperator::GreaterThanOrEqual,
        ObjcOperator::LogicalAnd => SwiftOperator::LogicalAnd,
        ObjcOperator::LogicalOr => SwiftOperator::LogicalOr,
        ObjcOperator::LogicalNot => SwiftOperator::LogicalNot,
        ObjcOperator::BitwiseAnd | ObjcOperator::AddressOf => SwiftOperator::BitwiseAnd,
        ObjcOperator::BitwiseOr => SwiftOperator::BitwiseOr,
        ObjcOperator::BitwiseXor => SwiftOperator::BitwiseXor,
        ObjcOperator::BitwiseNot => SwiftOperator::BitwiseNot,
        ObjcOperator::ShiftLeft => SwiftOperator::ShiftLeft,
        ObjcOperator::ShiftRight => SwiftOperator::ShiftRight,
        ObjcOperator::Assign => SwiftOperator::Assign,
        ObjcOperator::AddAssign => SwiftOperator::AddAssign,
        ObjcOperator::SubtractAssign => SwiftOperator::SubtractAssign,
        ObjcOperator::MultiplyAssign => SwiftOperator::MultiplyAssign,
        ObjcOperator::DivideAssign => SwiftOperator::DivideAssign,
        ObjcOperator::Increment => SwiftOperator::AddAssign,
        ObjcOperator::Decrement => SwiftOperator::SubtractAssign,
        ObjcOperator::Negate => SwiftOperator::Negate,
        ObjcOperator::Dereference => SwiftOperator::Multiply,
    }
}

fn read_literal(literal: &ObjcLiteral) -> SwiftConstant {
    match literal {
        ObjcLiteral::Number(text) => parse_number(text),
        ObjcLiteral::String(text) => SwiftConstant::StringLiteral(text.clone()),
        ObjcLiteral::Boolean(value) => SwiftConstant::Boolean(*value),
        ObjcLiteral::Char(c) => SwiftConstant::StringLiteral(c.to_string()),
        ObjcLiteral::Nil => SwiftConstant::Nil,
    }
}

/// Parse a numeric literal, stripping C suffixes and tagging the base.
/// Float spellings that Swift cannot parse survive as raw text.
fn parse_number(text: &str) -> SwiftConstant {
    let trimmed = text.trim();

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        let digits = hex.trim_end_matches(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));
        if let Ok(value) = i64::from_str_radix(digits, 16) {
            return SwiftConstant::Integer {
                value,
                radix: IntegerRadix::Hexadecimal,
            };
        }
        return SwiftConstant::RawNumber(trimmed.to_string());
    }

    if let Some(binary) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        let digits = binary.trim_end_matches(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));
        if let Ok(value) = i64::from_str_radix(digits, 2) {
            return SwiftConstant::Integer {
                value,
                radix: IntegerRadix::Binary,
            };
        }
        return SwiftConstant::RawNumber(trimmed.to_string());
    }

    let stripped =
        trimmed.trim_end_matches(|c| matches!(c, 'u' | 'U' | 'l' | 'L' | 'f' | 'F' | 'd' | 'D'));

    if stripped.contains(['.', 'e', 'E']) {
        return match stripped.parse::<f64>() {
            Ok(value) if value.is_finite() => SwiftConstant::Float(value),
            _ => SwiftConstant::RawNumber(trimmed.to_string()),
        };
    }

    // A leading zero with more digits is an octal literal.
    if stripped.len() > 1 && stripped.starts_with('0') {
        if let Ok(value) = i64::from_str_radix(&stripped[1..], 8) {
            return SwiftConstant::Integer {
                value,
                radix: IntegerRadix::Octal,
            };
        }
    }

    match stripped.parse::<i64>() {
        Ok(value) => SwiftConstant::Integer {
            value,
            radix: IntegerRadix::Decimal,
        },
        Err(_) => SwiftConstant::RawNumber(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(expression: &ObjcExpression) -> SwiftExpression {
        let mapper = TypeMapper::new();
        ExpressionReader::new(&mapper, true).read(expression)
    }

    #[test]
    fn test_message_becomes_method_call() {
        // [self setName:x andAge:y]
        let message = ObjcExpression::Message {
            receiver: Box::new(ObjcExpression::ident("self")),
            selector: ObjcMessageSelector::Keywords(vec![
                ObjcKeywordArgument::new("setName", ObjcExpression::ident("x")),
                ObjcKeywordArgument::new("andAge", ObjcExpression::ident("y")),
            ]),
        };
        let result = read(&message);
        let SwiftExpression::Call { callee, arguments } = result else {
            panic!("expected a call");
        };
        assert_eq!(
            *callee,
            SwiftExpression::member(SwiftExpression::ident("self"), "setName")
        );
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].label, None);
        assert_eq!(arguments[1].label.as_deref(), Some("andAge"));
    }

    #[test]
    fn test_variadic_keyword_argument_spills_positionally() {
        // [C withObjects:a, b]
        let message = ObjcExpression::Message {
            receiver: Box::new(ObjcExpression::ident("C")),
            selector: ObjcMessageSelector::Keywords(vec![ObjcKeywordArgument {
                label: Some("withObjects".to_string()),
                expressions: vec![ObjcExpression::ident("a"), ObjcExpression::ident("b")],
            }]),
        };
        let SwiftExpression::Call { arguments, .. } = read(&message) else {
            panic!("expected a call");
        };
        assert_eq!(arguments.len(), 2);
        assert!(arguments.iter().all(|a| a.label.is_none()));
    }

    #[test]
    fn test_elvis_ternary_becomes_nil_coalescing() {
        let ternary = ObjcExpression::Ternary {
            condition: Box::new(ObjcExpression::ident("a")),
            if_true: None,
            if_false: Box::new(ObjcExpression::ident("c")),
        };
        assert_eq!(
            read(&ternary),
            SwiftExpression::Binary {
                op: SwiftOperator::NilCoalesce,
                lhs: Box::new(SwiftExpression::ident("a")),
                rhs: Box::new(SwiftExpression::ident("c")),
            }
        );
    }

    #[test]
    fn test_increment_becomes_compound_assignment() {
        let increment = ObjcExpression::Postfix {
            operand: Box::new(ObjcExpression::ident("i")),
            op: ObjcOperator::Increment,
        };
        assert_eq!(
            read(&increment),
            SwiftExpression::Assignment {
                target: Box::new(SwiftExpression::ident("i")),
                op: SwiftOperator::AddAssign,
                value: Box::new(SwiftExpression::integer(1)),
            }
        );
    }

    #[test]
    fn test_selector_literal() {
        let selector = ObjcExpression::SelectorLiteral("tap:".to_string());
        let SwiftExpression::Call { callee, arguments } = read(&selector) else {
            panic!("expected a call");
        };
        assert_eq!(*callee, SwiftExpression::ident("Selector"));
        assert_eq!(
            arguments[0].expression,
            SwiftExpression::Constant(SwiftConstant::StringLiteral("tap:".to_string()))
        );
    }

    #[test]
    fn test_reference_cast_versus_numeric_cast() {
        let reference = ObjcExpression::Cast {
            target: objc_syntax::ObjcTypeAnnotation::new(objc_syntax::ObjcType::pointer_to(
                "NSString",
            )),
            operand: Box::new(ObjcExpression::ident("x")),
        };
        assert_eq!(
            read(&reference),
            SwiftExpression::Cast {
                operand: Box::new(SwiftExpression::ident("x")),
                target: SwiftType::nominal("String"),
            }
        );

        let numeric = ObjcExpression::Cast {
            target: objc_syntax::ObjcTypeAnnotation::new(objc_syntax::ObjcType::named(
                "NSInteger",
            )),
            operand: Box::new(ObjcExpression::ident("x")),
        };
        assert_eq!(
            read(&numeric),
            SwiftExpression::call(
                SwiftExpression::ident("Int"),
                vec![CallArgument::unlabeled(SwiftExpression::ident("x"))],
            )
        );
    }

    #[test]
    fn test_numeric_literal_suffix_stripping() {
        assert_eq!(
            parse_number("10UL"),
            SwiftConstant::Integer {
                value: 10,
                radix: IntegerRadix::Decimal
            }
        );
        assert_eq!(
            parse_number("0x1F"),
            SwiftConstant::Integer {
                value: 31,
                radix: IntegerRadix::Hexadecimal
            }
        );
        assert_eq!(
            parse_number("0b101"),
            SwiftConstant::Integer {
                value: 5,
                radix: IntegerRadix::Binary
            }
        );
        assert_eq!(
            parse_number("017"),
            SwiftConstant::Integer {
                value: 15,
                radix: IntegerRadix::Octal
            }
        );
        assert_eq!(parse_number("1.5f"), SwiftConstant::Float(1.5));
        assert_eq!(
            parse_number("1.5e999"),
            SwiftConstant::RawNumber("1.5e999".to_string())
        );
    }
}
