// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders file and type intentions to Swift declarations
//!
//! Declaration order inside a file: typealiases, globals, functions, types.
//! Member order inside a type: ivars, properties, initializers, methods.

use crate::expressions::ExpressionRenderer;
use crate::options::WriterOptions;
use crate::statements::StatementRenderer;
use crate::writer::SwiftWriter;
use itertools::Itertools;
use swift_intention_format::{
    AccessLevel, ClassExtensionIntention, ClassIntention, EnumIntention, FileIntention,
    FunctionBody, FunctionSignature, GlobalFunctionIntention, GlobalVariableIntention,
    InitializerIntention, InstanceVariableIntention, IntentionHistory, MethodIntention,
    Ownership, ParameterSignature, PropertyIntention, PropertyMode, ProtocolIntention,
    StructIntention, SwiftType, TypeIntention, TypealiasIntention,
};

pub struct FileRenderer {
    options: WriterOptions,
    expressions: ExpressionRenderer,
    statements: StatementRenderer,
}

impl FileRenderer {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            expressions: ExpressionRenderer,
            statements: StatementRenderer::new(),
        }
    }

    pub fn render(&self, file: &FileIntention) -> String {
        let mut writer = SwiftWriter::new();

        for directive in &file.preprocessor_directives {
            writer.emit_line(&format!("// preprocessor: {}", directive));
        }
        if !file.preprocessor_directives.is_empty() {
            writer.blank_line();
        }

        for alias in &file.typealiases {
            self.render_typealias(alias, &mut writer);
        }
        if !file.typealiases.is_empty() {
            writer.blank_line();
        }

        for global in &file.globals {
            self.render_global(global, &mut writer);
        }
        if !file.globals.is_empty() {
            writer.blank_line();
        }

        for function in &file.global_functions {
            self.render_global_function(function, &mut writer);
            writer.blank_line();
        }

        for ty in &file.types {
            self.render_type(ty, &mut writer);
            writer.blank_line();
        }

        writer.extract_result()
    }

    // ========================================================================
    // File-scope declarations
    // ========================================================================

    fn render_history(&self, history: &IntentionHistory, writer: &mut SwiftWriter) {
        if !self.options.print_intention_history || history.is_empty() {
            return;
        }
        for entry in history.entries() {
            writer.emit_line(&format!("// {}", entry));
        }
    }

    fn render_typealias(&self, alias: &TypealiasIntention, writer: &mut SwiftWriter) {
        self.render_history(&alias.base.history, writer);
        writer.emit_line(&format!("typealias {} = {}", alias.name, alias.aliased));
    }

    fn render_global(&self, global: &GlobalVariableIntention, writer: &mut SwiftWriter) {
        self.render_history(&global.base.history, writer);
        let keyword = if global.storage.is_constant { "let" } else { "var" };
        let mut line = format!("{} {}: {}", keyword, global.name, global.storage.swift_type);
        if let Some(initializer) = &global.initializer {
            line.push_str(&format!(" = {}", self.expressions.render(initializer)));
        }
        writer.emit_line(&line);
    }

    fn render_global_function(&self, function: &GlobalFunctionIntention, writer: &mut SwiftWriter) {
        self.render_history(&function.base.history, writer);
        let header = format!("func {}", self.render_signature(&function.signature));
        self.render_braced(&header, function.body.as_ref(), writer);
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn render_type(&self, ty: &TypeIntention, writer: &mut SwiftWriter) {
        match ty {
            TypeIntention::Class(class) => self.render_class(class, writer),
            TypeIntention::Extension(extension) => self.render_extension(extension, writer),
            TypeIntention::Protocol(protocol) => self.render_protocol(protocol, writer),
            TypeIntention::Struct(structure) => self.render_struct(structure, writer),
            TypeIntention::Enum(enumeration) => self.render_enum(enumeration, writer),
        }
    }

    fn render_class(&self, class: &ClassIntention, writer: &mut SwiftWriter) {
        self.render_history(&class.base.history, writer);
        if !self.options.omit_objc_compatibility {
            writer.emit_line("@objc");
        }

        let mut inheritance: Vec<String> = Vec::new();
        match &class.superclass {
            Some(superclass) => inheritance.push(superclass.clone()),
            None if !self.options.omit_objc_compatibility => {
                inheritance.push("NSObject".to_string())
            }
            None => {}
        }
        inheritance.extend(class.protocols.iter().cloned());

        let header = if inheritance.is_empty() {
            format!("class {} {{", class.name)
        } else {
            format!("class {}: {} {{", class.name, inheritance.iter().join(", "))
        };
        writer.emit_line(&header);

        writer.with_indent(|w| {
            for ivar in &class.ivars {
                self.render_ivar(ivar, w);
            }
            for property in &class.properties {
                self.render_property(property, w);
            }
            for initializer in &class.initializers {
                self.render_initializer(initializer, w);
            }
            for method in &class.methods {
                self.render_method(method, true, w);
            }
        });

        writer.emit_line("}");
    }

    fn render_extension(&self, extension: &ClassExtensionIntention, writer: &mut SwiftWriter) {
        if let Some(category) = &extension.category_name {
            writer.emit_line(&format!("// MARK: - {}", category));
        }
        self.render_history(&extension.base.history, writer);

        let header = if extension.protocols.is_empty() {
            format!("extension {} {{", extension.class_name)
        } else {
            format!(
                "extension {}: {} {{",
                extension.class_name,
                extension.protocols.iter().join(", ")
            )
        };
        writer.emit_line(&header);

        writer.with_indent(|w| {
            for property in &extension.properties {
                self.render_property(property, w);
            }
            for method in &extension.methods {
                self.render_method(method, true, w);
            }
        });

        writer.emit_line("}");
    }

    fn render_protocol(&self, protocol: &ProtocolIntention, writer: &mut SwiftWriter) {
        self.render_history(&protocol.base.history, writer);
        if !self.options.omit_objc_compatibility {
            writer.emit_line("@objc");
        }

        let mut inheritance: Vec<String> = Vec::new();
        if !self.options.omit_objc_compatibility {
            inheritance.push("NSObjectProtocol".to_string());
        }
        inheritance.extend(protocol.protocols.iter().cloned());

        let header = if inheritance.is_empty() {
            format!("protocol {} {{", protocol.name)
        } else {
            format!("protocol {}: {} {{", protocol.name, inheritance.iter().join(", "))
        };
        writer.emit_line(&header);

        writer.with_indent(|w| {
            for property in &protocol.properties {
                self.render_protocol_property(property, w);
            }
            for method in &protocol.methods {
                self.render_history(&method.base.history, w);
                let mut prefix = String::new();
                if method.is_optional && !self.options.omit_objc_compatibility {
                    prefix.push_str("@objc optional ");
                }
                if method.signature.is_static {
                    prefix.push_str("static ");
                }
                w.emit_line(&format!(
                    "{}func {}",
                    prefix,
                    self.render_signature(&method.signature)
                ));
            }
        });

        writer.emit_line("}");
    }

    fn render_protocol_property(&self, property: &PropertyIntention, writer: &mut SwiftWriter) {
        self.render_history(&property.base.history, writer);
        let accessors = if property.attributes.is_readonly {
            "{ get }"
        } else {
            "{ get set }"
        };
        let mut prefix = String::new();
        if property.is_optional && !self.options.omit_objc_compatibility {
            prefix.push_str("@objc optional ");
        }
        writer.emit_line(&format!(
            "{}var {}: {} {}",
            prefix, property.name, property.storage.swift_type, accessors
        ));
    }

    fn render_struct(&self, structure: &StructIntention, writer: &mut SwiftWriter) {
        self.render_history(&structure.base.history, writer);
        writer.emit_line(&format!("struct {} {{", structure.name));
        writer.with_indent(|w| {
            for field in &structure.fields {
                w.emit_line(&format!("var {}: {}", field.name, field.storage.swift_type));
            }
        });
        writer.emit_line("}");
    }

    fn render_enum(&self, enumeration: &EnumIntention, writer: &mut SwiftWriter) {
        self.render_history(&enumeration.base.history, writer);
        if !self.options.omit_objc_compatibility {
            writer.emit_line("@objc");
        }
        writer.emit_line(&format!(
            "enum {}: {} {{",
            enumeration.name, enumeration.raw_type
        ));
        writer.with_indent(|w| {
            for case in &enumeration.cases {
                match &case.raw_value {
                    Some(value) => w.emit_line(&format!(
                        "case {} = {}",
                        case.name,
                        self.expressions.render(value)
                    )),
                    None => w.emit_line(&format!("case {}", case.name)),
                }
            }
        });
        writer.emit_line("}");
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn render_ivar(&self, ivar: &InstanceVariableIntention, writer: &mut SwiftWriter) {
        self.render_history(&ivar.base.history, writer);
        let access = match ivar.access {
            AccessLevel::Private => "private ",
            AccessLevel::FilePrivate => "fileprivate ",
            AccessLevel::Internal => "",
            AccessLevel::Public => "public ",
        };
        let keyword = if ivar.storage.is_constant { "let" } else { "var" };
        writer.emit_line(&format!(
            "{}{} {}: {}",
            access, keyword, ivar.name, ivar.storage.swift_type
        ));
    }

    fn render_property(&self, property: &PropertyIntention, writer: &mut SwiftWriter) {
        self.render_history(&property.base.history, writer);

        let mut prefix = String::new();
        if !self.options.omit_objc_compatibility {
            prefix.push_str("@objc ");
        }
        if property.setter_access == Some(AccessLevel::Private) {
            prefix.push_str("private(set) ");
        }
        if property.storage.ownership == Ownership::Weak {
            prefix.push_str("weak ");
        }
        if property.attributes.is_class {
            prefix.push_str("class ");
        }

        let declaration = format!(
            "{}var {}: {}",
            prefix, property.name, property.storage.swift_type
        );

        match &property.mode {
            PropertyMode::Stored => writer.emit_line(&declaration),
            PropertyMode::Computed(getter) => {
                writer.emit_line(&format!("{} {{", declaration));
                writer.with_indent(|w| {
                    self.statements.render_items(&getter.compound.items, w);
                });
                writer.emit_line("}");
            }
            PropertyMode::Accessors { getter, setter } => {
                writer.emit_line(&format!("{} {{", declaration));
                writer.with_indent(|w| {
                    w.emit_line("get {");
                    w.with_indent(|w| self.statements.render_items(&getter.compound.items, w));
                    w.emit_line("}");
                    if setter.value_identifier == "newValue" {
                        w.emit_line("set {");
                    } else {
                        w.emit_line(&format!("set({}) {{", setter.value_identifier));
                    }
                    w.with_indent(|w| self.statements.render_items(&setter.body.compound.items, w));
                    w.emit_line("}");
                });
                writer.emit_line("}");
            }
        }
    }

    fn render_initializer(&self, initializer: &InitializerIntention, writer: &mut SwiftWriter) {
        self.render_history(&initializer.base.history, writer);
        let mut prefix = String::new();
        if !self.options.omit_objc_compatibility {
            prefix.push_str("@objc ");
        }
        if initializer.is_override {
            prefix.push_str("override ");
        }
        let failable = if initializer.is_failable { "?" } else { "" };
        let header = format!(
            "{}init{}({})",
            prefix,
            failable,
            self.render_parameters(&initializer.parameters)
        );
        self.render_braced(&header, initializer.body.as_ref(), writer);
    }

    fn render_method(
        &self,
        method: &MethodIntention,
        with_objc_attribute: bool,
        writer: &mut SwiftWriter,
    ) {
        self.render_history(&method.base.history, writer);
        let mut prefix = String::new();
        if with_objc_attribute && !self.options.omit_objc_compatibility {
            prefix.push_str("@objc ");
        }
        if method.is_override {
            prefix.push_str("override ");
        }
        if method.signature.is_static {
            prefix.push_str("class ");
        }
        let header = format!("{}func {}", prefix, self.render_signature(&method.signature));
        self.render_braced(&header, method.body.as_ref(), writer);
    }

    // ========================================================================
    // Signatures and bodies
    // ========================================================================

    fn render_signature(&self, signature: &FunctionSignature) -> String {
        let mut rendered = format!(
            "{}({})",
            signature.name,
            self.render_parameters(&signature.parameters)
        );
        if signature.return_type != SwiftType::Void {
            rendered.push_str(&format!(" -> {}", signature.return_type));
        }
        rendered
    }

    fn render_parameters(&self, parameters: &[ParameterSignature]) -> String {
        parameters
            .iter()
            .map(|parameter| {
                let declarator = match &parameter.label {
                    None => format!("_ {}", parameter.name),
                    Some(label) if *label == parameter.name => parameter.name.clone(),
                    Some(label) => format!("{} {}", label, parameter.name),
                };
                format!("{}: {}", declarator, parameter.swift_type)
            })
            .join(", ")
    }

    fn render_braced(&self, header: &str, body: Option<&FunctionBody>, writer: &mut SwiftWriter) {
        writer.emit_line(&format!("{} {{", header));
        if let Some(body) = body {
            writer.with_indent(|w| self.statements.render_items(&body.compound.items, w));
        }
        writer.emit_line("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use swift_intention_format::{
        IntentionBase, IntentionIdGenerator, PropertyAttributes, SourceRef, Storage,
    };

    fn empty_class(name: &str) -> ClassIntention {
        let ids = IntentionIdGenerator::new();
        ClassIntention::new(
            IntentionBase::new(&ids, SourceRef::synthesized(), false),
            name,
            swift_intention_format::TypeOrigin::Implementation,
        )
    }

    fn render_with(options: WriterOptions, class: ClassIntention) -> String {
        let renderer = FileRenderer::new(options);
        let mut writer = SwiftWriter::new();
        renderer.render_class(&class, &mut writer);
        writer.extract_result()
    }

    #[test]
    fn test_class_gets_nsobject_base_by_default() {
        assert_eq!(
            render_with(WriterOptions::default(), empty_class("C")),
            indoc! {"
                @objc
                class C: NSObject {
                }
            "}
        );
    }

    #[test]
    fn test_omit_objc_compatibility_drops_base_and_attribute() {
        let options = WriterOptions {
            omit_objc_compatibility: true,
            ..WriterOptions::default()
        };
        assert_eq!(
            render_with(options, empty_class("C")),
            indoc! {"
                class C {
                }
            "}
        );
    }

    #[test]
    fn test_nullable_property_renders_optional() {
        let ids = IntentionIdGenerator::new();
        let mut class = empty_class("C");
        class.add_property(PropertyIntention {
            base: IntentionBase::new(&ids, SourceRef::synthesized(), false),
            name: "s".to_string(),
            storage: Storage::variable(SwiftType::nominal("String").optional()),
            attributes: PropertyAttributes::default(),
            mode: PropertyMode::Stored,
            is_optional: false,
            setter_access: None,
        });
        assert_eq!(
            render_with(WriterOptions::default(), class),
            indoc! {"
                @objc
                class C: NSObject {
                    @objc var s: String?
                }
            "}
        );
    }
}
