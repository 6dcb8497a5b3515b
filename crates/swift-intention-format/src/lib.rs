// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Swift Intention Format
//!
//! The intermediate representation between parsed Objective-C and emitted
//! Swift. A translation run builds an [`IntentionCollection`] of file
//! intentions, each owning the type and member intentions that will become
//! Swift declarations; the structural passes in [`analysis`] then reshape the
//! graph, and the body passes in [`body`] rewrite the embedded Swift
//! expression trees. Every mutation is recorded in the owning intention's
//! history log.

pub mod analysis;
pub mod body;
mod data;
mod queue;

pub use data::expressions::{
    CallArgument, ClosureParameter, IntegerRadix, SwiftConstant, SwiftExpression, SwiftOperator,
};
pub use data::file::FileIntention;
pub use data::history::{HistoryEntry, IntentionHistory};
pub use data::members::{
    AccessLevel, EnumCaseIntention, FunctionSignature, GlobalFunctionIntention,
    GlobalVariableIntention, InitializerIntention, InstanceVariableIntention, MethodIntention,
    Ownership, ParameterSignature, PropertyAttributes, PropertyIntention, PropertyMode,
    PropertySetter, Selector, Storage, TypealiasIntention,
};
pub use data::statements::{
    CompoundStatement, FunctionBody, LocalVariableDeclaration, StatementItem, SwiftStatement,
    SwitchCase,
};
pub use data::swift_type::SwiftType;
pub use data::type_intentions::{
    ClassExtensionIntention, ClassIntention, EnumIntention, ProtocolIntention, StructIntention,
    SynthesizeDirective, TypeIntention, TypeOrigin,
};
pub use data::{
    IntentionBase, IntentionCollection, IntentionId, IntentionIdGenerator, SourceRef, UsageGraph,
    UsageSite,
};
pub use queue::{BodyCarrier, FunctionBodyQueue, FunctionBodyQueueItem};
