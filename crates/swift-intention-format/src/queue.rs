// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Function body queue
//!
//! After the structural passes settle the graph, the queue walks every
//! body-carrying intention and emits one work item per body, with a context
//! produced by a caller-supplied delegate. Collection runs on parallel
//! workers; the append path is the only synchronized operation, guarded by a
//! mutex held for the duration of one append.

use crate::data::file::FileIntention;
use crate::data::statements::FunctionBody;
use crate::data::type_intentions::TypeIntention;
use crate::data::IntentionCollection;
use crate::PropertyMode;
use rayon::prelude::*;
use std::mem;
use std::sync::Mutex;

/// Which intention a body belongs to, as an index path into the collection.
/// Paths stay valid while consumers only rewrite bodies, which is all the
/// downstream expression passes do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCarrier {
    GlobalFunction {
        file: usize,
        index: usize,
    },
    Method {
        file: usize,
        type_index: usize,
        index: usize,
    },
    Initializer {
        file: usize,
        type_index: usize,
        index: usize,
    },
    Property {
        file: usize,
        type_index: usize,
        index: usize,
        is_setter: bool,
    },
}

impl BodyCarrier {
    /// Stable ordering key so drained items are deterministic regardless of
    /// worker interleaving.
    fn sort_key(&self) -> (usize, usize, u8, usize, u8) {
        match *self {
            BodyCarrier::GlobalFunction { file, index } => (file, 0, 0, index, 0),
            BodyCarrier::Initializer {
                file,
                type_index,
                index,
            } => (file, type_index + 1, 1, index, 0),
            BodyCarrier::Method {
                file,
                type_index,
                index,
            } => (file, type_index + 1, 2, index, 0),
            BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter,
            } => (file, type_index + 1, 3, index, is_setter as u8),
        }
    }
}

#[derive(Debug)]
pub struct FunctionBodyQueueItem<C> {
    pub carrier: BodyCarrier,
    pub context: C,
}

#[derive(Debug, Default)]
pub struct FunctionBodyQueue<C> {
    items: Mutex<Vec<FunctionBodyQueueItem<C>>>,
}

impl<C: Send> FunctionBodyQueue<C> {
    /// Visit every body-carrying intention in the collection, in parallel,
    /// producing one item per body with a delegate-supplied context.
    pub fn collect<D>(collection: &IntentionCollection, delegate: &D) -> Self
    where
        D: Sync + Fn(&IntentionCollection, BodyCarrier) -> C,
    {
        let queue = FunctionBodyQueue {
            items: Mutex::new(Vec::new()),
        };
        collection
            .files()
            .par_iter()
            .enumerate()
            .for_each(|(file_index, file)| {
                for carrier in carriers_in_file(file_index, file) {
                    let context = delegate(collection, carrier);
                    queue.append(FunctionBodyQueueItem { carrier, context });
                }
            });
        queue
    }

    fn append(&self, item: FunctionBodyQueueItem<C>) {
        self.items.lock().expect("queue mutex poisoned").push(item);
    }

    /// Drain the queue into a deterministic, carrier-ordered list.
    pub fn into_items(self) -> Vec<FunctionBodyQueueItem<C>> {
        let mut items = self.items.into_inner().expect("queue mutex poisoned");
        items.sort_by_key(|item| item.carrier.sort_key());
        items
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("queue mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn carriers_in_file(file_index: usize, file: &FileIntention) -> Vec<BodyCarrier> {
    let mut carriers = Vec::new();
    for (index, function) in file.global_functions.iter().enumerate() {
        if function.body.is_some() {
            carriers.push(BodyCarrier::GlobalFunction {
                file: file_index,
                index,
            });
        }
    }
    for (type_index, ty) in file.types.iter().enumerate() {
        match ty {
            TypeIntention::Class(class) => {
                for (index, initializer) in class.initializers.iter().enumerate() {
                    if initializer.body.is_some() {
                        carriers.push(BodyCarrier::Initializer {
                            file: file_index,
                            type_index,
                            index,
                        });
                    }
                }
                for (index, method) in class.methods.iter().enumerate() {
                    if method.body.is_some() {
                        carriers.push(BodyCarrier::Method {
                            file: file_index,
                            type_index,
                            index,
                        });
                    }
                }
                for (index, property) in class.properties.iter().enumerate() {
                    push_property_carriers(&mut carriers, file_index, type_index, index, &property.mode);
                }
            }
            TypeIntention::Extension(extension) => {
                for (index, method) in extension.methods.iter().enumerate() {
                    if method.body.is_some() {
                        carriers.push(BodyCarrier::Method {
                            file: file_index,
                            type_index,
                            index,
                        });
                    }
                }
                for (index, property) in extension.properties.iter().enumerate() {
                    push_property_carriers(&mut carriers, file_index, type_index, index, &property.mode);
                }
            }
            // Protocol requirements, structs and enums carry no bodies.
            TypeIntention::Protocol(_) | TypeIntention::Struct(_) | TypeIntention::Enum(_) => {}
        }
    }
    carriers
}

fn push_property_carriers(
    carriers: &mut Vec<BodyCarrier>,
    file: usize,
    type_index: usize,
    index: usize,
    mode: &PropertyMode,
) {
    match mode {
        PropertyMode::Stored => {}
        PropertyMode::Computed(_) => carriers.push(BodyCarrier::Property {
            file,
            type_index,
            index,
            is_setter: false,
        }),
        PropertyMode::Accessors { .. } => {
            carriers.push(BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter: false,
            });
            carriers.push(BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter: true,
            });
        }
    }
}

// ============================================================================
// Body access by carrier
// ============================================================================

impl IntentionCollection {
    /// Move a body out of the collection for rewriting. Pair with
    /// [`IntentionCollection::put_body`].
    pub fn take_body(&mut self, carrier: BodyCarrier) -> Option<FunctionBody> {
        match carrier {
            BodyCarrier::GlobalFunction { file, index } => self
                .files_mut()
                .get_mut(file)?
                .global_functions
                .get_mut(index)?
                .body
                .take(),
            BodyCarrier::Method {
                file,
                type_index,
                index,
            } => {
                let ty = self.files_mut().get_mut(file)?.types.get_mut(type_index)?;
                type_methods_mut(ty)?.get_mut(index)?.body.take()
            }
            BodyCarrier::Initializer {
                file,
                type_index,
                index,
            } => {
                let ty = self.files_mut().get_mut(file)?.types.get_mut(type_index)?;
                ty.as_class_mut()?.initializers.get_mut(index)?.body.take()
            }
            BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter,
            } => {
                let ty = self.files_mut().get_mut(file)?.types.get_mut(type_index)?;
                let property = type_properties_mut(ty)?.get_mut(index)?;
                match (&mut property.mode, is_setter) {
                    (PropertyMode::Computed(getter), false) => Some(mem::take(getter)),
                    (PropertyMode::Accessors { getter, .. }, false) => Some(mem::take(getter)),
                    (PropertyMode::Accessors { setter, .. }, true) => {
                        Some(mem::take(&mut setter.body))
                    }
                    _ => None,
                }
            }
        }
    }

    /// Return a body taken with [`IntentionCollection::take_body`].
    pub fn put_body(&mut self, carrier: BodyCarrier, body: FunctionBody) {
        match carrier {
            BodyCarrier::GlobalFunction { file, index } => {
                if let Some(function) = self
                    .files_mut()
                    .get_mut(file)
                    .and_then(|f| f.global_functions.get_mut(index))
                {
                    function.body = Some(body);
                }
            }
            BodyCarrier::Method {
                file,
                type_index,
                index,
            } => {
                if let Some(method) = self
                    .files_mut()
                    .get_mut(file)
                    .and_then(|f| f.types.get_mut(type_index))
                    .and_then(type_methods_mut)
                    .and_then(|m| m.get_mut(index))
                {
                    method.body = Some(body);
                }
            }
            BodyCarrier::Initializer {
                file,
                type_index,
                index,
            } => {
                if let Some(initializer) = self
                    .files_mut()
                    .get_mut(file)
                    .and_then(|f| f.types.get_mut(type_index))
                    .and_then(TypeIntention::as_class_mut)
                    .and_then(|c| c.initializers.get_mut(index))
                {
                    initializer.body = Some(body);
                }
            }
            BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter,
            } => {
                if let Some(property) = self
                    .files_mut()
                    .get_mut(file)
                    .and_then(|f| f.types.get_mut(type_index))
                    .and_then(type_properties_mut)
                    .and_then(|p| p.get_mut(index))
                {
                    match (&mut property.mode, is_setter) {
                        (PropertyMode::Computed(getter), false) => *getter = body,
                        (PropertyMode::Accessors { getter, .. }, false) => *getter = body,
                        (PropertyMode::Accessors { setter, .. }, true) => setter.body = body,
                        _ => {}
                    }
                }
            }
        }
    }

    /// The name of the type enclosing a carrier, if any.
    pub fn carrier_enclosing_type(&self, carrier: BodyCarrier) -> Option<&str> {
        let (file, type_index) = match carrier {
            BodyCarrier::GlobalFunction { .. } => return None,
            BodyCarrier::Method {
                file, type_index, ..
            }
            | BodyCarrier::Initializer {
                file, type_index, ..
            }
            | BodyCarrier::Property {
                file, type_index, ..
            } => (file, type_index),
        };
        self.files().get(file)?.types.get(type_index).map(TypeIntention::name)
    }

    /// Human-readable description of a carrier, for diagnostics and usage
    /// records.
    pub fn describe_carrier(&self, carrier: BodyCarrier) -> String {
        let enclosing = self.carrier_enclosing_type(carrier).unwrap_or("");
        match carrier {
            BodyCarrier::GlobalFunction { file, index } => self
                .files()
                .get(file)
                .and_then(|f| f.global_functions.get(index))
                .map(|f| format!("func {}", f.signature.name))
                .unwrap_or_default(),
            BodyCarrier::Method {
                file,
                type_index,
                index,
            } => self
                .files()
                .get(file)
                .and_then(|f| f.types.get(type_index))
                .and_then(|t| t.methods().get(index))
                .map(|m| format!("{}.{}", enclosing, m.signature.name))
                .unwrap_or_default(),
            BodyCarrier::Initializer { .. } => format!("{}.init", enclosing),
            BodyCarrier::Property {
                file,
                type_index,
                index,
                is_setter,
            } => self
                .files()
                .get(file)
                .and_then(|f| f.types.get(type_index))
                .and_then(|t| t.properties().get(index))
                .map(|p| {
                    let accessor = if is_setter { "set" } else { "get" };
                    format!("{}.{} ({})", enclosing, p.name, accessor)
                })
                .unwrap_or_default(),
        }
    }
}

fn type_methods_mut(
    ty: &mut TypeIntention,
) -> Option<&mut Vec<crate::data::members::MethodIntention>> {
    match ty {
        TypeIntention::Class(c) => Some(&mut c.methods),
        TypeIntention::Extension(e) => Some(&mut e.methods),
        TypeIntention::Protocol(p) => Some(&mut p.methods),
        TypeIntention::Struct(_) | TypeIntention::Enum(_) => None,
    }
}

fn type_properties_mut(
    ty: &mut TypeIntention,
) -> Option<&mut Vec<crate::data::members::PropertyIntention>> {
    match ty {
        TypeIntention::Class(c) => Some(&mut c.properties),
        TypeIntention::Extension(e) => Some(&mut e.properties),
        TypeIntention::Protocol(p) => Some(&mut p.properties),
        TypeIntention::Struct(_) | TypeIntention::Enum(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ClassIntention, CompoundStatement, FunctionSignature, IntentionBase,
        IntentionIdGenerator, MethodIntention, SourceRef, SwiftStatement, SwiftType, TypeOrigin,
    };
    use std::sync::Arc;

    fn collection_with_two_bodies() -> IntentionCollection {
        let ids = Arc::new(IntentionIdGenerator::new());
        let mut collection = IntentionCollection::new(ids);
        let mut file = crate::FileIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C.m",
        );
        let mut class = ClassIntention::new(
            IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            "C",
            TypeOrigin::Implementation,
        );
        for name in ["a", "b"] {
            class.add_method(MethodIntention {
                base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
                signature: FunctionSignature::new(name, SwiftType::Void),
                body: Some(FunctionBody::new(CompoundStatement::statements(vec![
                    SwiftStatement::Return(None),
                ]))),
                is_optional: false,
                is_override: false,
            });
        }
        // A declaration without a body contributes no work item.
        class.add_method(MethodIntention {
            base: IntentionBase::new(&collection.ids, SourceRef::synthesized(), false),
            signature: FunctionSignature::new("declared", SwiftType::Void),
            body: None,
            is_optional: false,
            is_override: false,
        });
        file.add_type(TypeIntention::Class(class));
        collection.push_file(file);
        collection
    }

    #[test]
    fn test_collects_one_item_per_body_in_carrier_order() {
        let collection = collection_with_two_bodies();
        let queue = FunctionBodyQueue::collect(&collection, &|_, carrier| carrier);
        let items = queue.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].carrier,
            BodyCarrier::Method {
                file: 0,
                type_index: 0,
                index: 0
            }
        );
        assert_eq!(
            items[1].carrier,
            BodyCarrier::Method {
                file: 0,
                type_index: 0,
                index: 1
            }
        );
    }

    #[test]
    fn test_take_and_put_body_round_trip() {
        let mut collection = collection_with_two_bodies();
        let carrier = BodyCarrier::Method {
            file: 0,
            type_index: 0,
            index: 0,
        };
        let body = collection.take_body(carrier).expect("body present");
        assert!(collection
            .find_class("C")
            .unwrap()
            .methods[0]
            .body
            .is_none());
        collection.put_body(carrier, body);
        assert!(collection.find_class("C").unwrap().methods[0].body.is_some());
    }
}
