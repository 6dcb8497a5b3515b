// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Statement lowering
//!
//! Maps Objective-C statements onto Swift statements, preserving the source
//! order of declarations and statements inside every compound. The two
//! shape-changing lowerings live here: classic C `for` loops become range
//! iteration (or an equivalent `while`), and `switch` bodies gain the
//! explicit `fallthrough`/`default` structure Swift requires.

use crate::expression_reader::ExpressionReader;
use crate::type_mapper::{MappingContext, TypeMapper};
use objc_syntax::{
    ObjcBlockItem, ObjcCompoundStatement, ObjcExpression, ObjcForInitializer,
    ObjcLocalDeclaration, ObjcOperator, ObjcStatement,
};
use swift_intention_format::{
    CompoundStatement, FunctionBody, LocalVariableDeclaration, StatementItem, SwiftExpression,
    SwiftStatement, SwitchCase,
};

pub struct StatementReader<'a> {
    mapper: &'a TypeMapper,
    in_nonnull_region: bool,
}

impl<'a> StatementReader<'a> {
    pub fn new(mapper: &'a TypeMapper, in_nonnull_region: bool) -> Self {
        Self {
            mapper,
            in_nonnull_region,
        }
    }

    fn expressions(&self) -> ExpressionReader<'a> {
        ExpressionReader::new(self.mapper, self.in_nonnull_region)
    }

    pub fn read_body(&self, compound: &ObjcCompoundStatement) -> FunctionBody {
        FunctionBody::new(self.read_compound(compound))
    }

    pub fn read_compound(&self, compound: &ObjcCompoundStatement) -> CompoundStatement {
        CompoundStatement::new(compound.items.iter().map(|item| self.read_item(item)).collect())
    }

    fn read_item(&self, item: &ObjcBlockItem) -> StatementItem {
        match item {
            ObjcBlockItem::Declaration(declaration) => {
                StatementItem::Declaration(self.read_declaration(declaration))
            }
            ObjcBlockItem::Statement(statement) => {
                StatementItem::Statement(self.read_statement(statement))
            }
        }
    }

    fn read_declaration(&self, declaration: &ObjcLocalDeclaration) -> LocalVariableDeclaration {
        let context = MappingContext::in_region(self.in_nonnull_region)
            .with_explicit(declaration.ty.nullability);
        LocalVariableDeclaration {
            name: declaration.name.clone(),
            swift_type: Some(self.mapper.map(&declaration.ty.ty, &context)),
            is_constant: declaration.is_constant,
            initializer: declaration
                .initializer
                .as_ref()
                .map(|e| self.expressions().read(e)),
        }
    }

    pub fn read_statement(&self, statement: &ObjcStatement) -> SwiftStatement {
        match statement {
            ObjcStatement::Compound(compound) => {
                SwiftStatement::Compound(self.read_compound(compound))
            }

            ObjcStatement::If {
                condition,
                body,
                else_body,
            } => SwiftStatement::If {
                condition: self.expressions().read(condition),
                body: self.read_compound(body),
                else_body: else_body.as_ref().map(|e| self.read_compound(e)),
            },

            ObjcStatement::While { condition, body } => SwiftStatement::While {
                condition: self.expressions().read(condition),
                body: self.read_compound(body),
            },

            ObjcStatement::DoWhile { body, condition } => SwiftStatement::RepeatWhile {
                body: self.read_compound(body),
                condition: self.expressions().read(condition),
            },

            ObjcStatement::For {
                initializer,
                condition,
                increment,
                body,
            } => self.read_for(
                initializer.as_ref(),
                condition.as_ref(),
                increment.as_ref(),
                body,
            ),

            ObjcStatement::ForIn {
                variable_name,
                collection,
                body,
                ..
            } => SwiftStatement::ForIn {
                pattern: variable_name.clone(),
                sequence: self.expressions().read(collection),
                body: self.read_compound(body),
            },

            ObjcStatement::Switch {
                subject,
                cases,
                default,
            } => self.read_switch(subject, cases, default.as_deref()),

            ObjcStatement::Return(expression) => {
                SwiftStatement::Return(expression.as_ref().map(|e| self.expressions().read(e)))
            }

            ObjcStatement::Break => SwiftStatement::Break,
            ObjcStatement::Continue => SwiftStatement::Continue,

            ObjcStatement::Expressions(expressions) => SwiftStatement::Expressions(
                expressions.iter().map(|e| self.expressions().read(e)).collect(),
            ),

            ObjcStatement::Unknown { text } => SwiftStatement::Unknown { text: text.clone() },
        }
    }

    /// Classic C `for`. The `for (T i = a; i < b; i++)` shape becomes range
    /// iteration; anything else desugars to `init; while cond { body; step }`.
    fn read_for(
        &self,
        initializer: Option<&ObjcForInitializer>,
        condition: Option<&ObjcExpression>,
        increment: Option<&ObjcExpression>,
        body: &ObjcCompoundStatement,
    ) -> SwiftStatement {
        if let Some(for_in) = self.counting_loop(initializer, condition, increment, body) {
            return for_in;
        }

        let mut items = Vec::new();
        match initializer {
            Some(ObjcForInitializer::Declaration(declaration)) => {
                items.push(StatementItem::Declaration(self.read_declaration(declaration)));
            }
            Some(ObjcForInitializer::Expression(expression)) => {
                items.push(StatementItem::Statement(SwiftStatement::expression(
                    self.expressions().read(expression),
                )));
            }
            None => {}
        }

        let mut loop_body = self.read_compound(body);
        if let Some(increment) = increment {
            loop_body.items.push(StatementItem::Statement(
                SwiftStatement::expression(self.expressions().read(increment)),
            ));
        }

        let condition = condition
            .map(|c| self.expressions().read(c))
            .unwrap_or(SwiftExpression::Constant(
                swift_intention_format::SwiftConstant::Boolean(true),
            ));

        items.push(StatementItem::Statement(SwiftStatement::While {
            condition,
            body: loop_body,
        }));

        SwiftStatement::Compound(CompoundStatement::new(items))
    }

    /// Recognize `for (T i = a; i < b; i++)` and friends.
    fn counting_loop(
        &self,
        initializer: Option<&ObjcForInitializer>,
        condition: Option<&ObjcExpression>,
        increment: Option<&ObjcExpression>,
        body: &ObjcCompoundStatement,
    ) -> Option<SwiftStatement> {
        let ObjcForInitializer::Declaration(declaration) = initializer? else {
            return None;
        };
        let lower = declaration.initializer.as_ref()?;

        let ObjcExpression::Binary { op, lhs, rhs } = condition? else {
            return None;
        };
        let inclusive = match op {
            ObjcOperator::LessThan => false,
            ObjcOperator::LessThanOrEqual => true,
            _ => return None,
        };
        if !matches!(lhs.as_ref(), ObjcExpression::Identifier(name) if *name == declaration.name) {
            return None;
        }

        let incremented = match increment? {
            ObjcExpression::Postfix {
                operand,
                op: ObjcOperator::Increment,
            }
            | ObjcExpression::Prefix {
                op: ObjcOperator::Increment,
                operand,
            } => operand,
            _ => return None,
        };
        if !matches!(incremented.as_ref(), ObjcExpression::Identifier(name) if *name == declaration.name)
        {
            return None;
        }

        Some(SwiftStatement::ForIn {
            pattern: declaration.name.clone(),
            sequence: SwiftExpression::Range {
                lower: Box::new(self.expressions().read(lower)),
                upper: Box::new(self.expressions().read(rhs)),
                inclusive,
            },
            body: self.read_compound(body),
        })
    }

    /// Objective-C cases fall through implicitly; Swift's break implicitly.
    /// Trailing breaks are dropped, missing breaks become `fallthrough`, and
    /// a missing default clause is completed with an empty one.
    fn read_switch(
        &self,
        subject: &ObjcExpression,
        cases: &[objc_syntax::ObjcSwitchCase],
        default: Option<&[ObjcBlockItem]>,
    ) -> SwiftStatement {
        let case_count = cases.len();
        let swift_cases = cases
            .iter()
            .enumerate()
            .map(|(index, case)| {
                let is_last = index + 1 == case_count && default.is_none();
                let body = self.read_case_body(&case.body, is_last);
                SwitchCase {
                    patterns: vec![self.expressions().read(&case.pattern)],
                    body,
                }
            })
            .collect();

        let default_body = match default {
            Some(items) => Some(self.read_case_body(items, true)),
            None => Some(CompoundStatement::statements(vec![SwiftStatement::Break])),
        };

        SwiftStatement::Switch {
            subject: self.expressions().read(subject),
            cases: swift_cases,
            default: default_body,
        }
    }

    fn read_case_body(&self, items: &[ObjcBlockItem], is_last: bool) -> CompoundStatement {
        let mut body = CompoundStatement::new(
            items.iter().map(|item| self.read_item(item)).collect(),
        );

        match body.items.last() {
            Some(StatementItem::Statement(SwiftStatement::Break)) => {
                body.items.pop();
                if body.items.is_empty() {
                    body.items
                        .push(StatementItem::Statement(SwiftStatement::Break));
                }
            }
            Some(StatementItem::Statement(
                SwiftStatement::Return(_) | SwiftStatement::Continue,
            )) => {}
            Some(_) if !is_last => {
                body.items
                    .push(StatementItem::Statement(SwiftStatement::Fallthrough));
            }
            Some(_) => {}
            // An empty body is a missing break too: a grouped case label
            // falls through to the next clause. The final clause keeps a
            // break so the case body stays non-empty.
            None if is_last => {
                body.items
                    .push(StatementItem::Statement(SwiftStatement::Break));
            }
            None => {
                body.items
                    .push(StatementItem::Statement(SwiftStatement::Fallthrough));
            }
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objc_syntax::{ObjcLiteral, ObjcSwitchCase, ObjcTypeAnnotation};

    fn reader(mapper: &TypeMapper) -> StatementReader<'_> {
        StatementReader::new(mapper, true)
    }

    fn declaration(name: &str, initializer: ObjcExpression) -> ObjcLocalDeclaration {
        ObjcLocalDeclaration {
            name: name.to_string(),
            ty: ObjcTypeAnnotation::new(objc_syntax::ObjcType::named("NSInteger")),
            is_constant: false,
            initializer: Some(initializer),
        }
    }

    #[test]
    fn test_counting_for_becomes_range_iteration() {
        let mapper = TypeMapper::new();
        // for (NSInteger i = 0; i < 10; i++) { }
        let statement = ObjcStatement::For {
            initializer: Some(ObjcForInitializer::Declaration(declaration(
                "i",
                ObjcExpression::number("0"),
            ))),
            condition: Some(ObjcExpression::Binary {
                op: ObjcOperator::LessThan,
                lhs: Box::new(ObjcExpression::ident("i")),
                rhs: Box::new(ObjcExpression::number("10")),
            }),
            increment: Some(ObjcExpression::Postfix {
                operand: Box::new(ObjcExpression::ident("i")),
                op: ObjcOperator::Increment,
            }),
            body: ObjcCompoundStatement::default(),
        };

        let SwiftStatement::ForIn { pattern, sequence, .. } =
            reader(&mapper).read_statement(&statement)
        else {
            panic!("expected for-in");
        };
        assert_eq!(pattern, "i");
        assert!(matches!(
            sequence,
            SwiftExpression::Range {
                inclusive: false,
                ..
            }
        ));
    }

    #[test]
    fn test_general_for_desugars_to_while() {
        let mapper = TypeMapper::new();
        // for (i = 0; i < limit(); i += 2) { work(); }
        let statement = ObjcStatement::For {
            initializer: Some(ObjcForInitializer::Expression(ObjcExpression::Assignment {
                target: Box::new(ObjcExpression::ident("i")),
                op: ObjcOperator::Assign,
                value: Box::new(ObjcExpression::number("0")),
            })),
            condition: Some(ObjcExpression::Binary {
                op: ObjcOperator::LessThan,
                lhs: Box::new(ObjcExpression::ident("i")),
                rhs: Box::new(ObjcExpression::FunctionCall {
                    callee: Box::new(ObjcExpression::ident("limit")),
                    arguments: vec![],
                }),
            }),
            increment: Some(ObjcExpression::Assignment {
                target: Box::new(ObjcExpression::ident("i")),
                op: ObjcOperator::AddAssign,
                value: Box::new(ObjcExpression::number("2")),
            }),
            body: ObjcCompoundStatement::default(),
        };

        let SwiftStatement::Compound(compound) = reader(&mapper).read_statement(&statement) else {
            panic!("expected desugared compound");
        };
        assert_eq!(compound.items.len(), 2);
        let StatementItem::Statement(SwiftStatement::While { body, .. }) = &compound.items[1]
        else {
            panic!("expected while loop");
        };
        // The step lands at the tail of the loop body.
        assert_eq!(body.items.len(), 1);
    }

    #[test]
    fn test_switch_gains_fallthrough_and_default() {
        let mapper = TypeMapper::new();
        // switch (x) { case 0: f(); case 1: g(); break; }
        let call = |name: &str| {
            ObjcBlockItem::Statement(ObjcStatement::Expressions(vec![
                ObjcExpression::FunctionCall {
                    callee: Box::new(ObjcExpression::ident(name)),
                    arguments: vec![],
                },
            ]))
        };
        let statement = ObjcStatement::Switch {
            subject: ObjcExpression::ident("x"),
            cases: vec![
                ObjcSwitchCase {
                    pattern: ObjcExpression::Constant(ObjcLiteral::Number("0".to_string())),
                    body: vec![call("f")],
                },
                ObjcSwitchCase {
                    pattern: ObjcExpression::Constant(ObjcLiteral::Number("1".to_string())),
                    body: vec![call("g"), ObjcBlockItem::Statement(ObjcStatement::Break)],
                },
            ],
            default: None,
        };

        let SwiftStatement::Switch { cases, default, .. } =
            reader(&mapper).read_statement(&statement)
        else {
            panic!("expected switch");
        };
        // First case fell through in C, so it needs an explicit fallthrough.
        assert!(matches!(
            cases[0].body.items.last(),
            Some(StatementItem::Statement(SwiftStatement::Fallthrough))
        ));
        // Second case's trailing break is dropped.
        assert_eq!(cases[1].body.items.len(), 1);
        // Missing default is completed.
        assert!(default.is_some());
    }

    #[test]
    fn test_grouped_case_labels_fall_through() {
        let mapper = TypeMapper::new();
        // switch (x) { case 0: case 1: f(); break; }
        let statement = ObjcStatement::Switch {
            subject: ObjcExpression::ident("x"),
            cases: vec![
                ObjcSwitchCase {
                    pattern: ObjcExpression::Constant(ObjcLiteral::Number("0".to_string())),
                    body: vec![],
                },
                ObjcSwitchCase {
                    pattern: ObjcExpression::Constant(ObjcLiteral::Number("1".to_string())),
                    body: vec![
                        ObjcBlockItem::Statement(ObjcStatement::Expressions(vec![
                            ObjcExpression::FunctionCall {
                                callee: Box::new(ObjcExpression::ident("f")),
                                arguments: vec![],
                            },
                        ])),
                        ObjcBlockItem::Statement(ObjcStatement::Break),
                    ],
                },
            ],
            default: None,
        };

        let SwiftStatement::Switch { cases, .. } = reader(&mapper).read_statement(&statement)
        else {
            panic!("expected switch");
        };
        // The empty grouped label must reach the next clause, so `f()` still
        // runs when the first pattern matches.
        assert_eq!(
            cases[0].body.items,
            vec![StatementItem::Statement(SwiftStatement::Fallthrough)]
        );
        assert!(matches!(
            cases[1].body.items.last(),
            Some(StatementItem::Statement(SwiftStatement::Expressions(_)))
        ));
    }

    #[test]
    fn test_compound_preserves_declaration_statement_order() {
        let mapper = TypeMapper::new();
        let compound = ObjcCompoundStatement::new(vec![
            ObjcBlockItem::Statement(ObjcStatement::Expressions(vec![ObjcExpression::ident(
                "before",
            )])),
            ObjcBlockItem::Declaration(declaration("x", ObjcExpression::number("1"))),
            ObjcBlockItem::Statement(ObjcStatement::Expressions(vec![ObjcExpression::ident(
                "after",
            )])),
        ]);

        let result = reader(&mapper).read_compound(&compound);
        assert_eq!(result.items.len(), 3);
        assert!(matches!(result.items[0], StatementItem::Statement(_)));
        assert!(matches!(result.items[1], StatementItem::Declaration(_)));
        assert!(matches!(result.items[2], StatementItem::Statement(_)));
    }
}
