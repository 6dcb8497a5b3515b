// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders Swift statement trees to a writer

use crate::expressions::ExpressionRenderer;
use crate::writer::SwiftWriter;
use swift_intention_format::{
    CompoundStatement, LocalVariableDeclaration, StatementItem, SwiftStatement,
};

pub struct StatementRenderer {
    expressions: ExpressionRenderer,
}

impl StatementRenderer {
    pub fn new() -> Self {
        Self {
            expressions: ExpressionRenderer,
        }
    }

    /// Render the items of a compound in source order.
    pub fn render_items(&self, items: &[StatementItem], writer: &mut SwiftWriter) {
        for item in items {
            match item {
                StatementItem::Declaration(declaration) => {
                    self.render_declaration(declaration, writer)
                }
                StatementItem::Statement(statement) => self.render_statement(statement, writer),
            }
        }
    }

    fn render_declaration(&self, declaration: &LocalVariableDeclaration, writer: &mut SwiftWriter) {
        let keyword = if declaration.is_constant { "let" } else { "var" };
        let mut line = format!("{} {}", keyword, declaration.name);
        if let Some(swift_type) = &declaration.swift_type {
            line.push_str(&format!(": {}", swift_type));
        }
        if let Some(initializer) = &declaration.initializer {
            line.push_str(&format!(" = {}", self.expressions.render(initializer)));
        }
        writer.emit_line(&line);
    }

    fn render_statement(&self, statement: &SwiftStatement, writer: &mut SwiftWriter) {
        match statement {
            SwiftStatement::Compound(compound) => {
                writer.emit_line("do {");
                writer.with_indent(|w| self.render_items(&compound.items, w));
                writer.emit_line("}");
            }

            SwiftStatement::If {
                condition,
                body,
                else_body,
            } => {
                writer.emit_line(&format!("if {} {{", self.expressions.render(condition)));
                writer.with_indent(|w| self.render_items(&body.items, w));
                self.render_else(else_body.as_ref(), writer);
            }

            SwiftStatement::IfLet {
                name,
                value,
                body,
                else_body,
            } => {
                writer.emit_line(&format!(
                    "if let {} = {} {{",
                    name,
                    self.expressions.render(value)
                ));
                writer.with_indent(|w| self.render_items(&body.items, w));
                self.render_else(else_body.as_ref(), writer);
            }

            SwiftStatement::While { condition, body } => {
                writer.emit_line(&format!("while {} {{", self.expressions.render(condition)));
                writer.with_indent(|w| self.render_items(&body.items, w));
                writer.emit_line("}");
            }

            SwiftStatement::RepeatWhile { body, condition } => {
                writer.emit_line("repeat {");
                writer.with_indent(|w| self.render_items(&body.items, w));
                writer.emit_line(&format!("}} while {}", self.expressions.render(condition)));
            }

            SwiftStatement::ForIn {
                pattern,
                sequence,
                body,
            } => {
                writer.emit_line(&format!(
                    "for {} in {} {{",
                    pattern,
                    self.expressions.render(sequence)
                ));
                writer.with_indent(|w| self.render_items(&body.items, w));
                writer.emit_line("}");
            }

            SwiftStatement::Switch {
                subject,
                cases,
                default,
            } => {
                writer.emit_line(&format!("switch {} {{", self.expressions.render(subject)));
                for case in cases {
                    let patterns = case
                        .patterns
                        .iter()
                        .map(|p| self.expressions.render(p))
                        .collect::<Vec<_>>()
                        .join(", ");
                    writer.emit_line(&format!("case {}:", patterns));
                    writer.with_indent(|w| self.render_items(&case.body.items, w));
                }
                if let Some(default) = default {
                    writer.emit_line("default:");
                    writer.with_indent(|w| self.render_items(&default.items, w));
                }
                writer.emit_line("}");
            }

            SwiftStatement::Return(expression) => match expression {
                Some(expression) => {
                    writer.emit_line(&format!("return {}", self.expressions.render(expression)))
                }
                None => writer.emit_line("return"),
            },

            SwiftStatement::Break => writer.emit_line("break"),
            SwiftStatement::Continue => writer.emit_line("continue"),
            SwiftStatement::Fallthrough => writer.emit_line("fallthrough"),

            SwiftStatement::Expressions(expressions) => {
                for expression in expressions {
                    writer.emit_line(&self.expressions.render(expression));
                }
            }

            SwiftStatement::Unknown { text } => {
                writer.emit_line(&format!("/* unknown */ {}", text));
            }
        }
    }

    fn render_else(&self, else_body: Option<&CompoundStatement>, writer: &mut SwiftWriter) {
        match else_body {
            Some(else_body) => {
                // An else containing exactly one if chains as `else if`.
                if let [StatementItem::Statement(inner @ SwiftStatement::If { .. })] =
                    else_body.items.as_slice()
                {
                    writer.emit("} else ");
                    self.render_statement(inner, writer);
                } else {
                    writer.emit_line("} else {");
                    writer.with_indent(|w| self.render_items(&else_body.items, w));
                    writer.emit_line("}");
                }
            }
            None => writer.emit_line("}"),
        }
    }
}

impl Default for StatementRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use swift_intention_format::{SwiftConstant, SwiftExpression};

    fn render(statement: &SwiftStatement) -> String {
        let renderer = StatementRenderer::new();
        let mut writer = SwiftWriter::new();
        renderer.render_statement(statement, &mut writer);
        writer.extract_result()
    }

    #[test]
    fn test_if_else_chain() {
        let statement = SwiftStatement::If {
            condition: SwiftExpression::ident("a"),
            body: CompoundStatement::statements(vec![SwiftStatement::Return(None)]),
            else_body: Some(CompoundStatement::statements(vec![SwiftStatement::If {
                condition: SwiftExpression::ident("b"),
                body: CompoundStatement::statements(vec![SwiftStatement::Break]),
                else_body: None,
            }])),
        };
        assert_eq!(
            render(&statement),
            indoc! {"
                if a {
                    return
                } else if b {
                    break
                }
            "}
        );
    }

    #[test]
    fn test_repeat_while() {
        let statement = SwiftStatement::RepeatWhile {
            body: CompoundStatement::statements(vec![SwiftStatement::Continue]),
            condition: SwiftExpression::Constant(SwiftConstant::Boolean(true)),
        };
        assert_eq!(
            render(&statement),
            indoc! {"
                repeat {
                    continue
                } while true
            "}
        );
    }
}
