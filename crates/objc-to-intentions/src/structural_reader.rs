// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Structural reading: CST declarations to intentions
//!
//! Walks one parsed file and produces its file intention. The reader carries
//! an explicit context: the file under construction, the assume-nonnull
//! state re-evaluated per node from the adapter-provided token ranges, and
//! the current ivar access level, which starts private and switches on
//! access specifier tokens in declaration order.

use crate::statement_reader::StatementReader;
use crate::type_mapper::{MappingContext, TypeMapper};
use objc_syntax::{
    Nullability, ObjcCategoryImplementation, ObjcCategoryInterface, ObjcDeclaration, ObjcEnumDecl,
    ObjcFunctionDef, ObjcImplementation, ObjcInterface, ObjcIvarAccess, ObjcIvarDecl,
    ObjcIvarListItem, ObjcMethodDecl, ObjcMethodSelector, ObjcPropertyAttribute,
    ObjcPropertyDecl, ObjcProtocolDecl, ObjcProtocolItem, ObjcStructDecl, ObjcTypeAnnotation,
    ObjcTypedef, ObjcVariableDecl, ParsedSource, SourceLocation,
};
use swift_intention_format::{
    AccessLevel, ClassExtensionIntention, ClassIntention, EnumCaseIntention, EnumIntention,
    FileIntention, FunctionSignature, GlobalFunctionIntention, GlobalVariableIntention,
    InitializerIntention, InstanceVariableIntention, IntentionBase, IntentionIdGenerator,
    MethodIntention, Ownership, ParameterSignature, PropertyAttributes, PropertyIntention,
    PropertyMode, ProtocolIntention, SourceRef, Storage, StructIntention, SynthesizeDirective,
    TypeIntention, TypeOrigin,
};

pub struct StructuralReader<'a> {
    mapper: &'a TypeMapper,
    ids: &'a IntentionIdGenerator,
}

/// Per-traversal state. One frame per concern, mutated as the walk enters
/// and leaves regions.
struct ReaderContext<'s> {
    source_path: &'s str,
    regions: &'s objc_syntax::NonnullRegions,
    in_nonnull: bool,
    ivar_access: AccessLevel,
}

impl<'s> ReaderContext<'s> {
    fn enter_node(&mut self, location: SourceLocation) {
        self.in_nonnull = self.regions.contains(location.token_index);
    }

    fn enter_ivar_list(&mut self) {
        self.ivar_access = AccessLevel::Private;
    }

    fn source_ref(&self, location: SourceLocation) -> SourceRef {
        SourceRef::new(self.source_path, location)
    }
}

/// Reading a method declaration yields either a method or, for `init`-family
/// selectors, an initializer.
enum MemberIntention {
    Method(MethodIntention),
    Initializer(InitializerIntention),
}

impl<'a> StructuralReader<'a> {
    pub fn new(mapper: &'a TypeMapper, ids: &'a IntentionIdGenerator) -> Self {
        Self { mapper, ids }
    }

    /// Read one parsed source into a file intention.
    pub fn read_file(&self, parsed: &ParsedSource) -> FileIntention {
        let mut context = ReaderContext {
            source_path: &parsed.file.source_path,
            regions: &parsed.nonnull_regions,
            in_nonnull: false,
            ivar_access: AccessLevel::Private,
        };

        let mut file = FileIntention::new(
            IntentionBase::new(
                self.ids,
                SourceRef::new(&parsed.file.source_path, SourceLocation::unknown()),
                false,
            ),
            &parsed.file.source_path,
        );

        for declaration in &parsed.file.declarations {
            match declaration {
                ObjcDeclaration::Interface(interface) => {
                    context.enter_node(interface.location);
                    let class = self.read_interface(interface, &mut context);
                    file.add_type(TypeIntention::Class(class));
                }
                ObjcDeclaration::Implementation(implementation) => {
                    context.enter_node(implementation.location);
                    let class = self.read_implementation(implementation, &mut context);
                    file.add_type(TypeIntention::Class(class));
                }
                ObjcDeclaration::CategoryInterface(category) => {
                    context.enter_node(category.location);
                    let extension = self.read_category_interface(category, &mut context);
                    file.add_type(TypeIntention::Extension(extension));
                }
                ObjcDeclaration::CategoryImplementation(category) => {
                    context.enter_node(category.location);
                    let extension = self.read_category_implementation(category, &mut context);
                    file.add_type(TypeIntention::Extension(extension));
                }
                ObjcDeclaration::Protocol(protocol) => {
                    context.enter_node(protocol.location);
                    let protocol = self.read_protocol(protocol, &mut context);
                    file.add_type(TypeIntention::Protocol(protocol));
                }
                ObjcDeclaration::Enum(declaration) => {
                    context.enter_node(declaration.location);
                    let enumeration = self.read_enum(declaration, &context);
                    file.add_type(TypeIntention::Enum(enumeration));
                }
                ObjcDeclaration::Typedef(typedef) => {
                    context.enter_node(typedef.location);
                    file.add_typealias(self.read_typedef(typedef, &context));
                }
                ObjcDeclaration::Struct(declaration) => {
                    context.enter_node(declaration.location);
                    let structure = self.read_struct(declaration, &context);
                    file.add_type(TypeIntention::Struct(structure));
                }
                ObjcDeclaration::Variable(variable) => {
                    context.enter_node(variable.location);
                    file.add_global(self.read_global_variable(variable, &context));
                }
                ObjcDeclaration::Function(function) => {
                    context.enter_node(function.location);
                    file.add_global_function(self.read_global_function(function, &context));
                }
                ObjcDeclaration::PreprocessorDirective { text, .. } => {
                    file.preprocessor_directives.push(text.clone());
                }
            }
        }

        file
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn read_interface(
        &self,
        interface: &ObjcInterface,
        context: &mut ReaderContext<'_>,
    ) -> ClassIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(interface.location),
            context.in_nonnull,
        );
        let mut class = ClassIntention::new(base, &interface.name, TypeOrigin::Interface);
        class.superclass = interface.superclass.clone();
        for protocol in &interface.protocols {
            class.add_protocol(protocol.clone());
        }

        self.read_ivar_list(&interface.ivar_list, context, |ivar| class.add_ivar(ivar));

        for property in &interface.properties {
            context.enter_node(property.location);
            class.add_property(self.read_property(property, context));
        }
        for method in &interface.methods {
            context.enter_node(method.location);
            match self.read_method(method, context) {
                MemberIntention::Method(method) => class.add_method(method),
                MemberIntention::Initializer(initializer) => class.add_initializer(initializer),
            }
        }
        class
    }

    fn read_implementation(
        &self,
        implementation: &ObjcImplementation,
        context: &mut ReaderContext<'_>,
    ) -> ClassIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(implementation.location),
            context.in_nonnull,
        );
        let mut class = ClassIntention::new(base, &implementation.name, TypeOrigin::Implementation);
        class.superclass = implementation.superclass.clone();

        self.read_ivar_list(&implementation.ivar_list, context, |ivar| {
            class.add_ivar(ivar)
        });

        for method in &implementation.methods {
            context.enter_node(method.location);
            match self.read_method(method, context) {
                MemberIntention::Method(method) => class.add_method(method),
                MemberIntention::Initializer(initializer) => class.add_initializer(initializer),
            }
        }

        for synthesize in &implementation.synthesizes {
            class.synthesizes.push(SynthesizeDirective {
                property_name: synthesize.property_name.clone(),
                ivar_name: synthesize.ivar_name.clone(),
                is_dynamic: synthesize.is_dynamic,
            });
        }
        class
    }

    fn read_category_interface(
        &self,
        category: &ObjcCategoryInterface,
        context: &mut ReaderContext<'_>,
    ) -> ClassExtensionIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(category.location),
            context.in_nonnull,
        );
        let category_name = if category.category_name.is_empty() {
            None
        } else {
            Some(category.category_name.clone())
        };
        let mut extension = ClassExtensionIntention::new(
            base,
            &category.class_name,
            category_name,
            TypeOrigin::Interface,
        );
        extension.protocols = category.protocols.clone();

        for property in &category.properties {
            context.enter_node(property.location);
            extension.add_property(self.read_property(property, context));
        }
        for method in &category.methods {
            context.enter_node(method.location);
            if let MemberIntention::Method(method) = self.read_method(method, context) {
                extension.add_method(method);
            }
        }
        extension
    }

    fn read_category_implementation(
        &self,
        category: &ObjcCategoryImplementation,
        context: &mut ReaderContext<'_>,
    ) -> ClassExtensionIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(category.location),
            context.in_nonnull,
        );
        let category_name = if category.category_name.is_empty() {
            None
        } else {
            Some(category.category_name.clone())
        };
        let mut extension = ClassExtensionIntention::new(
            base,
            &category.class_name,
            category_name,
            TypeOrigin::Implementation,
        );
        for method in &category.methods {
            context.enter_node(method.location);
            if let MemberIntention::Method(method) = self.read_method(method, context) {
                extension.add_method(method);
            }
        }
        extension
    }

    fn read_protocol(
        &self,
        protocol: &ObjcProtocolDecl,
        context: &mut ReaderContext<'_>,
    ) -> ProtocolIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(protocol.location),
            context.in_nonnull,
        );
        let mut intention = ProtocolIntention::new(base, &protocol.name);
        intention.protocols = protocol.protocols.clone();

        // `@optional` switches the flag for every following member until the
        // next `@required`.
        let mut optional = false;
        for item in &protocol.items {
            match item {
                ObjcProtocolItem::Required => optional = false,
                ObjcProtocolItem::Optional => optional = true,
                ObjcProtocolItem::Property(property) => {
                    context.enter_node(property.location);
                    let mut property = self.read_property(property, context);
                    property.is_optional = optional;
                    intention.add_property(property);
                }
                ObjcProtocolItem::Method(method) => {
                    context.enter_node(method.location);
                    if let MemberIntention::Method(mut method) = self.read_method(method, context) {
                        method.is_optional = optional;
                        intention.add_method(method);
                    }
                }
            }
        }
        intention
    }

    fn read_enum(&self, declaration: &ObjcEnumDecl, context: &ReaderContext<'_>) -> EnumIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(declaration.location),
            context.in_nonnull,
        );
        let raw_type = self
            .mapper
            .map(&declaration.raw_type, &MappingContext::always_nonnull());
        let mut enumeration = EnumIntention::new(base, &declaration.name, raw_type);

        let expressions = crate::ExpressionReader::new(self.mapper, context.in_nonnull);
        for case in &declaration.cases {
            enumeration.add_case(EnumCaseIntention {
                base: IntentionBase::new(
                    self.ids,
                    context.source_ref(declaration.location),
                    context.in_nonnull,
                ),
                name: case.name.clone(),
                raw_value: case.value.as_ref().map(|v| expressions.read(v)),
            });
        }
        enumeration
    }

    fn read_struct(
        &self,
        declaration: &ObjcStructDecl,
        context: &ReaderContext<'_>,
    ) -> StructIntention {
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(declaration.location),
            context.in_nonnull,
        );
        let mut structure = StructIntention::new(base, &declaration.name);
        for field in &declaration.fields {
            structure.add_field(InstanceVariableIntention {
                base: IntentionBase::new(
                    self.ids,
                    context.source_ref(declaration.location),
                    context.in_nonnull,
                ),
                name: field.name.clone(),
                storage: Storage::variable(
                    self.mapper
                        .map(&field.ty, &MappingContext::in_region(context.in_nonnull)),
                ),
                access: AccessLevel::Internal,
            });
        }
        structure
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn read_ivar_list(
        &self,
        items: &[ObjcIvarListItem],
        context: &mut ReaderContext<'_>,
        mut add: impl FnMut(InstanceVariableIntention),
    ) {
        context.enter_ivar_list();
        for item in items {
            match item {
                ObjcIvarListItem::Access(access) => {
                    context.ivar_access = read_ivar_access(*access);
                }
                ObjcIvarListItem::Ivar(ivar) => {
                    context.enter_node(ivar.location);
                    add(self.read_ivar(ivar, context));
                }
            }
        }
    }

    fn read_ivar(&self, ivar: &ObjcIvarDecl, context: &ReaderContext<'_>) -> InstanceVariableIntention {
        let mapping = MappingContext::in_region(context.in_nonnull).with_explicit(ivar.nullability);
        InstanceVariableIntention {
            base: IntentionBase::new(
                self.ids,
                context.source_ref(ivar.location),
                context.in_nonnull,
            ),
            name: ivar.name.clone(),
            storage: Storage::variable(self.mapper.map(&ivar.ty, &mapping)),
            access: context.ivar_access,
        }
    }

    fn read_property(
        &self,
        property: &ObjcPropertyDecl,
        context: &ReaderContext<'_>,
    ) -> PropertyIntention {
        let mut attributes = PropertyAttributes::default();
        let mut ownership = Ownership::Strong;
        let mut nullability = Nullability::Unspecified;

        for attribute in &property.attributes {
            match attribute {
                ObjcPropertyAttribute::Readonly => attributes.is_readonly = true,
                ObjcPropertyAttribute::Readwrite => attributes.is_readonly = false,
                ObjcPropertyAttribute::Weak => ownership = Ownership::Weak,
                ObjcPropertyAttribute::Assign => attributes.is_assign = true,
                ObjcPropertyAttribute::Copy => attributes.is_copy = true,
                ObjcPropertyAttribute::Class => attributes.is_class = true,
                ObjcPropertyAttribute::Getter(name) => {
                    attributes.getter_name = Some(name.clone())
                }
                ObjcPropertyAttribute::Setter(name) => {
                    attributes.setter_name = Some(name.clone())
                }
                ObjcPropertyAttribute::Nullability(value) => nullability = *value,
                ObjcPropertyAttribute::Strong
                | ObjcPropertyAttribute::Atomic
                | ObjcPropertyAttribute::Nonatomic => {}
            }
        }

        // A weak property is nullable by nature unless annotated otherwise.
        if ownership == Ownership::Weak && !nullability.is_specified() {
            nullability = Nullability::Nullable;
        }

        let mapping = MappingContext::in_region(context.in_nonnull).with_explicit(nullability);
        let swift_type = self.mapper.map(&property.ty, &mapping);

        PropertyIntention {
            base: IntentionBase::new(
                self.ids,
                context.source_ref(property.location),
                context.in_nonnull,
            ),
            name: property.name.clone(),
            storage: Storage {
                swift_type,
                ownership,
                is_constant: false,
            },
            attributes,
            mode: PropertyMode::Stored,
            is_optional: false,
            setter_access: None,
        }
    }

    fn read_method(&self, method: &ObjcMethodDecl, context: &ReaderContext<'_>) -> MemberIntention {
        let statements = StatementReader::new(self.mapper, context.in_nonnull);
        let body = method.body.as_ref().map(|b| statements.read_body(b));
        let base = IntentionBase::new(
            self.ids,
            context.source_ref(method.location),
            context.in_nonnull,
        );

        if !method.is_class_method && is_initializer_selector(&method.selector) {
            return MemberIntention::Initializer(InitializerIntention {
                base,
                parameters: self.read_initializer_parameters(&method.selector, context),
                is_failable: method.return_type.nullability == Nullability::Nullable,
                body,
                is_override: false,
            });
        }

        let mut signature = self.read_signature(method, context);
        signature.is_static = method.is_class_method;

        MemberIntention::Method(MethodIntention {
            base,
            signature,
            body,
            is_optional: false,
            is_override: false,
        })
    }

    fn read_signature(
        &self,
        method: &ObjcMethodDecl,
        context: &ReaderContext<'_>,
    ) -> FunctionSignature {
        let return_mapping = MappingContext::in_region(context.in_nonnull)
            .with_explicit(method.return_type.nullability);
        let return_type = self.mapper.map(&method.return_type.ty, &return_mapping);

        match &method.selector {
            ObjcMethodSelector::Bare(name) => {
                let mut signature = FunctionSignature::new(name.clone(), return_type);
                signature.return_nullability = method.return_type.nullability;
                signature
            }
            ObjcMethodSelector::Keywords(parts) => {
                let name = parts
                    .first()
                    .and_then(|p| p.label.clone())
                    .unwrap_or_default();
                let parameters = parts
                    .iter()
                    .enumerate()
                    .map(|(index, part)| {
                        let label = if index == 0 {
                            None
                        } else {
                            part.label.clone()
                        };
                        self.read_parameter(label, &part.name, &part.parameter, context)
                    })
                    .collect();
                let mut signature =
                    FunctionSignature::new(name, return_type).with_parameters(parameters);
                signature.return_nullability = method.return_type.nullability;
                signature
            }
        }
    }

    /// `initWithName:age:` becomes `init(name:age:)`: the first keyword's
    /// `initWith` prefix is stripped into the first argument label.
    fn read_initializer_parameters(
        &self,
        selector: &ObjcMethodSelector,
        context: &ReaderContext<'_>,
    ) -> Vec<ParameterSignature> {
        let ObjcMethodSelector::Keywords(parts) = selector else {
            return Vec::new();
        };
        parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let label = if index == 0 {
                    part.label
                        .as_deref()
                        .and_then(|l| l.strip_prefix("initWith"))
                        .map(lowercase_first)
                } else {
                    part.label.clone()
                };
                self.read_parameter(label, &part.name, &part.parameter, context)
            })
            .collect()
    }

    fn read_parameter(
        &self,
        label: Option<String>,
        name: &str,
        annotation: &ObjcTypeAnnotation,
        context: &ReaderContext<'_>,
    ) -> ParameterSignature {
        let mapping =
            MappingContext::in_region(context.in_nonnull).with_explicit(annotation.nullability);
        ParameterSignature {
            label,
            name: name.to_string(),
            swift_type: self.mapper.map(&annotation.ty, &mapping),
            nullability: annotation.nullability,
        }
    }

    // ========================================================================
    // Globals
    // ========================================================================

    fn read_typedef(
        &self,
        typedef: &ObjcTypedef,
        context: &ReaderContext<'_>,
    ) -> swift_intention_format::TypealiasIntention {
        swift_intention_format::TypealiasIntention {
            base: IntentionBase::new(
                self.ids,
                context.source_ref(typedef.location),
                context.in_nonnull,
            ),
            name: typedef.name.clone(),
            aliased: self
                .mapper
                .map(&typedef.ty, &MappingContext::in_region(context.in_nonnull)),
        }
    }

    fn read_global_variable(
        &self,
        variable: &ObjcVariableDecl,
        context: &ReaderContext<'_>,
    ) -> GlobalVariableIntention {
        let mapping =
            MappingContext::in_region(context.in_nonnull).with_explicit(variable.nullability);
        let expressions = crate::ExpressionReader::new(self.mapper, context.in_nonnull);
        GlobalVariableIntention {
            base: IntentionBase::new(
                self.ids,
                context.source_ref(variable.location),
                context.in_nonnull,
            ),
            name: variable.name.clone(),
            storage: Storage {
                swift_type: self.mapper.map(&variable.ty, &mapping),
                ownership: Ownership::Strong,
                is_constant: variable.is_constant,
            },
            initializer: variable.initializer.as_ref().map(|e| expressions.read(e)),
        }
    }

    fn read_global_function(
        &self,
        function: &ObjcFunctionDef,
        context: &ReaderContext<'_>,
    ) -> GlobalFunctionIntention {
        let return_mapping = MappingContext::in_region(context.in_nonnull)
            .with_explicit(function.return_type.nullability);
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| self.read_parameter(None, &parameter.name, &parameter.ty, context))
            .collect();
        let mut signature = FunctionSignature::new(
            function.name.clone(),
            self.mapper.map(&function.return_type.ty, &return_mapping),
        )
        .with_parameters(parameters);
        signature.return_nullability = function.return_type.nullability;

        let statements = StatementReader::new(self.mapper, context.in_nonnull);
        GlobalFunctionIntention {
            base: IntentionBase::new(
                self.ids,
                context.source_ref(function.location),
                context.in_nonnull,
            ),
            signature,
            body: function.body.as_ref().map(|b| statements.read_body(b)),
        }
    }
}

fn is_initializer_selector(selector: &ObjcMethodSelector) -> bool {
    match selector {
        ObjcMethodSelector::Bare(name) => name == "init",
        ObjcMethodSelector::Keywords(parts) => parts
            .first()
            .and_then(|p| p.label.as_deref())
            .is_some_and(|label| label == "init" || label.starts_with("initWith")),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn read_ivar_access(access: ObjcIvarAccess) -> AccessLevel {
    match access {
        ObjcIvarAccess::Private => AccessLevel::Private,
        ObjcIvarAccess::Protected | ObjcIvarAccess::Package => AccessLevel::Internal,
        ObjcIvarAccess::Public => AccessLevel::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objc_syntax::{ObjcFile, ObjcKeywordDecl, ObjcType, TokenRange};

    fn read(file: ObjcFile, regions: objc_syntax::NonnullRegions) -> FileIntention {
        let mapper = TypeMapper::new();
        let ids = IntentionIdGenerator::new();
        let reader = StructuralReader::new(&mapper, &ids);
        let parsed = ParsedSource::new(file).with_nonnull_regions(regions);
        reader.read_file(&parsed)
    }

    #[test]
    fn test_interface_with_nullable_property() {
        let mut interface = ObjcInterface::new("C");
        interface.properties.push(
            ObjcPropertyDecl::new("s", ObjcType::pointer_to("NSString")).with_attributes(vec![
                ObjcPropertyAttribute::Nullability(Nullability::Nullable),
            ]),
        );
        let file =
            ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

        let intention = read(file, objc_syntax::NonnullRegions::default());
        let TypeIntention::Class(class) = &intention.types[0] else {
            panic!("expected class");
        };
        assert_eq!(class.name, "C");
        assert_eq!(class.properties.len(), 1);
        assert_eq!(
            class.properties[0].storage.swift_type,
            swift_intention_format::SwiftType::nominal("String").optional()
        );
    }

    #[test]
    fn test_assume_nonnull_region_elevates_unspecified() {
        let mut interface = ObjcInterface::new("C");
        let mut property = ObjcPropertyDecl::new("s", ObjcType::pointer_to("NSString"));
        property.location = SourceLocation::new(2, 1, 5);
        interface.properties.push(property);
        let file =
            ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

        let regions = objc_syntax::NonnullRegions::new(vec![TokenRange::new(0, 100)]);
        let intention = read(file, regions);
        let TypeIntention::Class(class) = &intention.types[0] else {
            panic!("expected class");
        };
        assert_eq!(
            class.properties[0].storage.swift_type,
            swift_intention_format::SwiftType::nominal("String")
        );
    }

    #[test]
    fn test_ivar_access_switches_on_specifiers() {
        let mut interface = ObjcInterface::new("C");
        interface.ivar_list = vec![
            ObjcIvarListItem::Ivar(ObjcIvarDecl::new("a", ObjcType::named("NSInteger"))),
            ObjcIvarListItem::Access(ObjcIvarAccess::Public),
            ObjcIvarListItem::Ivar(ObjcIvarDecl::new("b", ObjcType::named("NSInteger"))),
        ];
        let file =
            ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

        let intention = read(file, objc_syntax::NonnullRegions::default());
        let TypeIntention::Class(class) = &intention.types[0] else {
            panic!("expected class");
        };
        // Access starts private, then switches on the specifier.
        assert_eq!(class.ivars[0].access, AccessLevel::Private);
        assert_eq!(class.ivars[1].access, AccessLevel::Public);
    }

    #[test]
    fn test_init_selector_becomes_initializer() {
        let mut implementation = ObjcImplementation::new("C");
        implementation.methods.push(ObjcMethodDecl::keywords(
            vec![ObjcKeywordDecl::new(
                "initWithName",
                ObjcTypeAnnotation::new(ObjcType::pointer_to("NSString")),
                "name",
            )],
            ObjcTypeAnnotation::new(ObjcType::InstanceType),
        ));
        let file = ObjcFile::new("C.m")
            .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);

        let intention = read(file, objc_syntax::NonnullRegions::default());
        let TypeIntention::Class(class) = &intention.types[0] else {
            panic!("expected class");
        };
        assert!(class.methods.is_empty());
        assert_eq!(class.initializers.len(), 1);
        assert_eq!(
            class.initializers[0].parameters[0].label.as_deref(),
            Some("name")
        );
    }

    #[test]
    fn test_protocol_optional_marker_propagates() {
        let protocol = ObjcProtocolDecl {
            name: "P".to_string(),
            protocols: vec![],
            items: vec![
                ObjcProtocolItem::Method(ObjcMethodDecl::bare(
                    "required1",
                    ObjcTypeAnnotation::new(ObjcType::Void),
                )),
                ObjcProtocolItem::Optional,
                ObjcProtocolItem::Method(ObjcMethodDecl::bare(
                    "optional1",
                    ObjcTypeAnnotation::new(ObjcType::Void),
                )),
                ObjcProtocolItem::Required,
                ObjcProtocolItem::Method(ObjcMethodDecl::bare(
                    "required2",
                    ObjcTypeAnnotation::new(ObjcType::Void),
                )),
            ],
            location: SourceLocation::unknown(),
        };
        let file =
            ObjcFile::new("P.h").with_declarations(vec![ObjcDeclaration::Protocol(protocol)]);

        let intention = read(file, objc_syntax::NonnullRegions::default());
        let TypeIntention::Protocol(protocol) = &intention.types[0] else {
            panic!("expected protocol");
        };
        assert!(!protocol.methods[0].is_optional);
        assert!(protocol.methods[1].is_optional);
        assert!(!protocol.methods[2].is_optional);
    }
}
