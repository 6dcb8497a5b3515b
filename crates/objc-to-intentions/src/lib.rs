// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Objective-C to Intention Graph Translation

mod expression_reader;
mod pipeline;
mod statement_reader;
mod structural_reader;
mod type_mapper;

pub use expression_reader::ExpressionReader;
pub use pipeline::TranslationPipeline;
pub use statement_reader::StatementReader;
pub use structural_reader::StructuralReader;
pub use type_mapper::{MappingContext, TypeMapper};
