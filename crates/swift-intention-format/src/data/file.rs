// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! File intentions

use crate::data::members::{GlobalFunctionIntention, GlobalVariableIntention, TypealiasIntention};
use crate::data::type_intentions::TypeIntention;
use crate::data::IntentionBase;
use std::path::Path;

/// One output file: the declarations translated from a single source file,
/// in insertion order.
#[derive(Debug, Clone)]
pub struct FileIntention {
    pub base: IntentionBase,
    pub source_path: String,
    pub typealiases: Vec<TypealiasIntention>,
    pub globals: Vec<GlobalVariableIntention>,
    pub global_functions: Vec<GlobalFunctionIntention>,
    pub types: Vec<TypeIntention>,
    /// Preprocessor directives preserved verbatim for comment emission.
    pub preprocessor_directives: Vec<String>,
}

impl FileIntention {
    pub fn new(base: IntentionBase, source_path: impl Into<String>) -> Self {
        Self {
            base,
            source_path: source_path.into(),
            typealiases: Vec::new(),
            globals: Vec::new(),
            global_functions: Vec::new(),
            types: Vec::new(),
            preprocessor_directives: Vec::new(),
        }
    }

    /// File extension of the originating source, lowercased.
    pub fn extension(&self) -> String {
        Path::new(&self.source_path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// File name without directories or extension.
    pub fn base_name(&self) -> String {
        Path::new(&self.source_path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_header(&self) -> bool {
        self.extension() == "h"
    }

    pub fn is_implementation(&self) -> bool {
        matches!(self.extension().as_str(), "m" | "mm")
    }

    pub fn add_type(&mut self, mut ty: TypeIntention) {
        ty.base_mut().parent = Some(self.base.id);
        self.types.push(ty);
    }

    /// Remove and return a type, unlinking it from this file.
    pub fn take_type(&mut self, index: usize) -> TypeIntention {
        let mut ty = self.types.remove(index);
        ty.base_mut().unlink();
        ty
    }

    pub fn add_typealias(&mut self, mut alias: TypealiasIntention) {
        alias.base.parent = Some(self.base.id);
        self.typealiases.push(alias);
    }

    pub fn add_global(&mut self, mut global: GlobalVariableIntention) {
        global.base.parent = Some(self.base.id);
        self.globals.push(global);
    }

    pub fn add_global_function(&mut self, mut function: GlobalFunctionIntention) {
        function.base.parent = Some(self.base.id);
        self.global_functions.push(function);
    }
}
