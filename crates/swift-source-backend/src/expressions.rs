// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders Swift expression trees to source text
//!
//! Grouping mostly mirrors the parenthesization the reader preserved from
//! the source; assignment and ternary children always get explicit parens
//! when they appear inline.

use itertools::Itertools;
use swift_intention_format::{CallArgument, SwiftExpression, SwiftOperator};

pub struct ExpressionRenderer;

impl ExpressionRenderer {
    pub fn render(&self, expression: &SwiftExpression) -> String {
        match expression {
            SwiftExpression::Identifier(name) => name.clone(),

            SwiftExpression::Constant(constant) => constant.to_string(),

            SwiftExpression::Member {
                base,
                name,
                optional_chained,
            } => {
                let accessor = if *optional_chained { "?." } else { "." };
                format!("{}{}{}", self.render_operand(base), accessor, name)
            }

            SwiftExpression::Call { callee, arguments } => {
                format!("{}({})", self.render_operand(callee), self.render_arguments(arguments))
            }

            SwiftExpression::Subscript { base, index } => {
                format!("{}[{}]", self.render_operand(base), self.render(index))
            }

            SwiftExpression::Binary { op, lhs, rhs } => format!(
                "{} {} {}",
                self.render_operand(lhs),
                op.token(),
                self.render_operand(rhs)
            ),

            SwiftExpression::Assignment { target, op, value } => format!(
                "{} {} {}",
                self.render_operand(target),
                op.token(),
                self.render(value)
            ),

            SwiftExpression::Prefix { op, operand } => {
                format!("{}{}", op.token(), self.render_operand(operand))
            }

            SwiftExpression::Ternary {
                condition,
                if_true,
                if_false,
            } => format!(
                "{} ? {} : {}",
                self.render_operand(condition),
                self.render_operand(if_true),
                self.render_operand(if_false)
            ),

            SwiftExpression::Cast { operand, target } => {
                format!("{} as? {}", self.render_operand(operand), target)
            }

            SwiftExpression::Range {
                lower,
                upper,
                inclusive,
            } => {
                let token = if *inclusive { "..." } else { "..<" };
                format!("{}{}{}", self.render_operand(lower), token, self.render_operand(upper))
            }

            SwiftExpression::Closure {
                parameters,
                return_type,
                body,
            } => {
                let mut writer = crate::SwiftWriter::new();
                let statements = crate::StatementRenderer::new();
                let header = if parameters.is_empty() {
                    String::new()
                } else {
                    let list = parameters
                        .iter()
                        .map(|p| format!("{}: {}", p.name, p.swift_type))
                        .join(", ");
                    format!("({}) -> {} in", list, return_type)
                };
                if header.is_empty() {
                    writer.emit_line("{");
                } else {
                    writer.emit_line(&format!("{{ {}", header));
                }
                writer.with_indent(|w| statements.render_items(&body.items, w));
                writer.emit("}");
                writer.extract_result()
            }

            SwiftExpression::ArrayLiteral(elements) => {
                format!("[{}]", elements.iter().map(|e| self.render(e)).join(", "))
            }

            SwiftExpression::DictionaryLiteral(pairs) => {
                if pairs.is_empty() {
                    return "[:]".to_string();
                }
                format!(
                    "[{}]",
                    pairs
                        .iter()
                        .map(|(k, v)| format!("{}: {}", self.render(k), self.render(v)))
                        .join(", ")
                )
            }

            SwiftExpression::Parens(inner) => format!("({})", self.render(inner)),

            SwiftExpression::Unknown { text } => format!("/* unknown */ {}", text),
        }
    }

    pub fn render_arguments(&self, arguments: &[CallArgument]) -> String {
        arguments
            .iter()
            .map(|argument| match &argument.label {
                Some(label) => format!("{}: {}", label, self.render(&argument.expression)),
                None => self.render(&argument.expression),
            })
            .join(", ")
    }

    /// Render a sub-expression, wrapping compound forms that would read
    /// ambiguously inline.
    fn render_operand(&self, expression: &SwiftExpression) -> String {
        let rendered = self.render(expression);
        if matches!(
            expression,
            SwiftExpression::Assignment { .. } | SwiftExpression::Ternary { .. }
        ) {
            format!("({})", rendered)
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swift_intention_format::{SwiftConstant, SwiftType};

    fn render(expression: &SwiftExpression) -> String {
        ExpressionRenderer.render(expression)
    }

    #[test]
    fn test_method_call() {
        let call = SwiftExpression::call(
            SwiftExpression::member(SwiftExpression::ident("self"), "update"),
            vec![
                CallArgument::unlabeled(SwiftExpression::integer(1)),
                CallArgument::labeled("animated", SwiftExpression::Constant(SwiftConstant::Boolean(true))),
            ],
        );
        assert_eq!(render(&call), "self.update(1, animated: true)");
    }

    #[test]
    fn test_optional_chaining_and_coalescing() {
        let chained = SwiftExpression::Binary {
            op: SwiftOperator::NilCoalesce,
            lhs: Box::new(SwiftExpression::Member {
                base: Box::new(SwiftExpression::ident("user")),
                name: "name".to_string(),
                optional_chained: true,
            }),
            rhs: Box::new(SwiftExpression::Constant(SwiftConstant::StringLiteral(
                String::new(),
            ))),
        };
        assert_eq!(render(&chained), "user?.name ?? \"\"");
    }

    #[test]
    fn test_cast_rendering() {
        let cast = SwiftExpression::Cast {
            operand: Box::new(SwiftExpression::ident("x")),
            target: SwiftType::nominal("String"),
        };
        assert_eq!(render(&cast), "x as? String");
    }

    #[test]
    fn test_range_rendering() {
        let range = SwiftExpression::Range {
            lower: Box::new(SwiftExpression::integer(0)),
            upper: Box::new(SwiftExpression::integer(10)),
            inclusive: false,
        };
        assert_eq!(render(&range), "0..<10");
    }
}
