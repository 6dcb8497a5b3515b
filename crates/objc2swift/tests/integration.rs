// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! End-to-end translation scenarios: build CSTs the way the external parser
//! would deliver them, run the full pipeline, and check the intention graph
//! and the emitted Swift.

use objc2swift::{MemoryOutput, MemorySourceProvider, PreparsedAdapter, Rewriter, WriterOptions};
use objc_syntax::{
    Nullability, ObjcCompoundStatement, ObjcDeclaration, ObjcEnumCase, ObjcEnumDecl,
    ObjcExpression, ObjcFile, ObjcImplementation, ObjcInterface, ObjcMethodDecl,
    ObjcPropertyAttribute, ObjcPropertyDecl, ObjcProtocolDecl, ObjcProtocolItem, ObjcStatement,
    ObjcType, ObjcTypeAnnotation, ParsedSource, SourceLocation,
};
use swift_intention_format::{PropertyMode, SwiftType, TypeIntention};

fn provider_for(names: &[&str]) -> MemorySourceProvider {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut provider = MemorySourceProvider::default();
    for name in names {
        provider.add(*name, "");
    }
    provider
}

fn self_message(selector: &str) -> ObjcStatement {
    ObjcStatement::Expressions(vec![ObjcExpression::message(
        ObjcExpression::ident("self"),
        selector,
    )])
}

#[test]
fn test_empty_interface_becomes_nsobject_class() {
    let file = ObjcFile::new("C.h")
        .with_declarations(vec![ObjcDeclaration::Interface(ObjcInterface::new("C"))]);
    let adapter = PreparsedAdapter::new().with("C.h", ParsedSource::new(file));
    let provider = provider_for(&["C.h"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("class C: NSObject {"), "got:\n{}", swift);

    // Under omit_objc_compatibility the implicit base class disappears.
    let file = ObjcFile::new("C.h")
        .with_declarations(vec![ObjcDeclaration::Interface(ObjcInterface::new("C"))]);
    let adapter = PreparsedAdapter::new().with("C.h", ParsedSource::new(file));
    let mut output = MemoryOutput::new();
    Rewriter::new(WriterOptions {
        omit_objc_compatibility: true,
        ..WriterOptions::default()
    })
    .rewrite(&provider, &adapter, &mut output)
    .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("class C {"), "got:\n{}", swift);
    assert!(!swift.contains("@objc"));
}

#[test]
fn test_nullable_property_renders_optional_with_objc() {
    let mut interface = ObjcInterface::new("C");
    interface.properties.push(
        ObjcPropertyDecl::new("s", ObjcType::pointer_to("NSString")).with_attributes(vec![
            ObjcPropertyAttribute::Nullability(Nullability::Nullable),
        ]),
    );
    let file =
        ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);
    let adapter = PreparsedAdapter::new().with("C.h", ParsedSource::new(file));
    let provider = provider_for(&["C.h"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("@objc var s: String?"), "got:\n{}", swift);
}

#[test]
fn test_header_and_implementation_merge_into_one_class() {
    // C.h: @interface C - (void)m; @end
    let mut interface = ObjcInterface::new("C");
    interface.methods.push(ObjcMethodDecl::bare(
        "m",
        ObjcTypeAnnotation::new(ObjcType::Void),
    ));
    let header =
        ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

    // C.m: @implementation C - (void)m { [self m]; } @end
    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void)).with_body(
            ObjcCompoundStatement::statements(vec![self_message("m")]),
        ),
    );
    let source = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);

    let adapter = PreparsedAdapter::new()
        .with("C.h", ParsedSource::new(header))
        .with("C.m", ParsedSource::new(source));
    let provider = provider_for(&["C.h", "C.m"]);

    let rewriter = Rewriter::default();
    let (collection, diagnostics) = rewriter.translate(&provider, &adapter);
    assert!(diagnostics.is_empty());

    // Exactly one file and one class survive.
    assert_eq!(collection.files().len(), 1);
    let classes: Vec<_> = collection.classes().collect();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].methods.len(), 1);
    assert!(classes[0].methods[0].body.is_some());

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("self.m()"), "got:\n{}", swift);
}

#[test]
fn test_protocol_nullability_inherited_by_conformer() {
    // @protocol P - (nonnull NSString *)f:(nullable NSObject *)o; @end
    let requirement = ObjcMethodDecl::keywords(
        vec![objc_syntax::ObjcKeywordDecl::new(
            "f",
            ObjcTypeAnnotation::with_nullability(
                ObjcType::pointer_to("NSObject"),
                Nullability::Nullable,
            ),
            "o",
        )],
        ObjcTypeAnnotation::with_nullability(
            ObjcType::pointer_to("NSString"),
            Nullability::Nonnull,
        ),
    );
    let protocol = ObjcProtocolDecl {
        name: "P".to_string(),
        protocols: vec![],
        items: vec![ObjcProtocolItem::Method(requirement)],
        location: SourceLocation::unknown(),
    };

    // @interface C: NSObject <P> - (NSString *)f:(NSObject *)o; @end
    let mut interface = ObjcInterface::new("C");
    interface.superclass = Some("NSObject".to_string());
    interface.protocols.push("P".to_string());
    interface.methods.push(ObjcMethodDecl::keywords(
        vec![objc_syntax::ObjcKeywordDecl::new(
            "f",
            ObjcTypeAnnotation::new(ObjcType::pointer_to("NSObject")),
            "o",
        )],
        ObjcTypeAnnotation::new(ObjcType::pointer_to("NSString")),
    ));

    let file = ObjcFile::new("C.h").with_declarations(vec![
        ObjcDeclaration::Protocol(protocol),
        ObjcDeclaration::Interface(interface),
    ]);
    let adapter = PreparsedAdapter::new().with("C.h", ParsedSource::new(file));
    let provider = provider_for(&["C.h"]);

    let (collection, _) = Rewriter::default().translate(&provider, &adapter);
    let class = collection.find_class("C").unwrap();
    let method = &class.methods[0];
    assert_eq!(
        method.signature.parameters[0].swift_type,
        SwiftType::nominal("NSObject").optional()
    );
    assert_eq!(method.signature.return_type, SwiftType::nominal("String"));
}

#[test]
fn test_ns_enum_translation_and_case_qualification() {
    // typedef NS_ENUM(NSInteger, E) { E_a, E_b };
    let enumeration = ObjcEnumDecl {
        name: "E".to_string(),
        raw_type: ObjcType::named("NSInteger"),
        cases: vec![
            ObjcEnumCase {
                name: "E_a".to_string(),
                value: None,
            },
            ObjcEnumCase {
                name: "E_b".to_string(),
                value: None,
            },
        ],
        location: SourceLocation::unknown(),
    };

    // @implementation C - (void)m { (E_a); } @end
    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void)).with_body(
            ObjcCompoundStatement::statements(vec![ObjcStatement::Expressions(vec![
                ObjcExpression::Parenthesized(Box::new(ObjcExpression::ident("E_a"))),
            ])]),
        ),
    );

    let file = ObjcFile::new("C.m").with_declarations(vec![
        ObjcDeclaration::Enum(enumeration),
        ObjcDeclaration::Implementation(implementation),
    ]);
    let adapter = PreparsedAdapter::new().with("C.m", ParsedSource::new(file));
    let provider = provider_for(&["C.m"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("enum E: Int {"), "got:\n{}", swift);
    assert!(swift.contains("case E_a"), "got:\n{}", swift);
    assert!(swift.contains("(E.E_a)"), "got:\n{}", swift);
}

#[test]
fn test_ivar_reference_synthesizes_backing_field() {
    // C.h: @interface C @property (readonly) NSInteger a; @end
    let mut interface = ObjcInterface::new("C");
    interface.properties.push(
        ObjcPropertyDecl::new("a", ObjcType::named("NSInteger"))
            .with_attributes(vec![ObjcPropertyAttribute::Readonly]),
    );
    let header =
        ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

    // C.m: @implementation C - (void)m { self->_a = 0; } @end
    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void)).with_body(
            ObjcCompoundStatement::statements(vec![ObjcStatement::Expressions(vec![
                ObjcExpression::Assignment {
                    target: Box::new(ObjcExpression::MemberAccess {
                        target: Box::new(ObjcExpression::ident("self")),
                        member: "_a".to_string(),
                        is_arrow: true,
                    }),
                    op: objc_syntax::ObjcOperator::Assign,
                    value: Box::new(ObjcExpression::number("0")),
                },
            ])]),
        ),
    );
    let source = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);

    let adapter = PreparsedAdapter::new()
        .with("C.h", ParsedSource::new(header))
        .with("C.m", ParsedSource::new(source));
    let provider = provider_for(&["C.h", "C.m"]);

    let (collection, _) = Rewriter::default().translate(&provider, &adapter);
    let class = collection.find_class("C").unwrap();

    // A private backing field plus a computed property over it.
    assert!(class.has_ivar("_a"));
    assert!(matches!(class.properties[0].mode, PropertyMode::Computed(_)));

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("private var _a: Int"), "got:\n{}", swift);
    assert!(swift.contains("return _a"), "got:\n{}", swift);
}

#[test]
fn test_history_is_chronological_and_printable() {
    let mut interface = ObjcInterface::new("C");
    interface.methods.push(ObjcMethodDecl::bare(
        "m",
        ObjcTypeAnnotation::new(ObjcType::Void),
    ));
    let header =
        ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void))
            .with_body(ObjcCompoundStatement::default()),
    );
    let source = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);

    let adapter = PreparsedAdapter::new()
        .with("C.h", ParsedSource::new(header))
        .with("C.m", ParsedSource::new(source));
    let provider = provider_for(&["C.h", "C.m"]);

    let (collection, _) = Rewriter::default().translate(&provider, &adapter);
    for ty in collection.types() {
        let entries = ty.base().history.entries();
        assert!(!entries.is_empty());
        for pair in entries.windows(2) {
            assert!(pair[0].sequence < pair[1].sequence);
        }
    }

    // With history printing on, provenance shows up as comments.
    let mut output = MemoryOutput::new();
    Rewriter::new(WriterOptions {
        print_intention_history: true,
        ..WriterOptions::default()
    })
    .rewrite(&provider, &adapter, &mut output)
    .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("// [Creation]"), "got:\n{}", swift);
    assert!(swift.contains("// [FileGrouping]"), "got:\n{}", swift);
}

#[test]
fn test_statement_and_declaration_order_is_preserved() {
    use objc_syntax::{ObjcBlockItem, ObjcLocalDeclaration};

    let body = ObjcCompoundStatement::new(vec![
        ObjcBlockItem::Statement(self_message("first")),
        ObjcBlockItem::Declaration(ObjcLocalDeclaration {
            name: "x".to_string(),
            ty: ObjcTypeAnnotation::new(ObjcType::named("NSInteger")),
            is_constant: false,
            initializer: Some(ObjcExpression::number("1")),
        }),
        ObjcBlockItem::Statement(self_message("second")),
    ]);

    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void)).with_body(body),
    );
    let file = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);
    let adapter = PreparsedAdapter::new().with("C.m", ParsedSource::new(file));
    let provider = provider_for(&["C.m"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();

    let first = swift.find("self.first()").expect("first call present");
    let declaration = swift.find("var x: Int = 1").expect("declaration present");
    let second = swift.find("self.second()").expect("second call present");
    assert!(first < declaration && declaration < second, "got:\n{}", swift);
}

#[test]
fn test_category_renders_as_marked_extension() {
    let category = objc_syntax::ObjcCategoryInterface {
        class_name: "C".to_string(),
        category_name: "Sorting".to_string(),
        protocols: vec![],
        properties: vec![],
        methods: vec![ObjcMethodDecl::bare(
            "sort",
            ObjcTypeAnnotation::new(ObjcType::Void),
        )],
        location: SourceLocation::unknown(),
    };
    let file = ObjcFile::new("C+Sorting.h")
        .with_declarations(vec![ObjcDeclaration::CategoryInterface(category)]);
    let adapter = PreparsedAdapter::new().with("C+Sorting.h", ParsedSource::new(file));
    let provider = provider_for(&["C+Sorting.h"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C+Sorting.swift").unwrap();
    assert!(swift.contains("// MARK: - Sorting"), "got:\n{}", swift);
    assert!(swift.contains("extension C {"), "got:\n{}", swift);
}

#[test]
fn test_property_accessor_methods_fold_into_property() {
    // @interface C @property NSInteger count; @end
    let mut interface = ObjcInterface::new("C");
    interface
        .properties
        .push(ObjcPropertyDecl::new("count", ObjcType::named("NSInteger")));
    let header =
        ObjcFile::new("C.h").with_declarations(vec![ObjcDeclaration::Interface(interface)]);

    // @implementation C with explicit -count and -setCount: accessors.
    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("count", ObjcTypeAnnotation::new(ObjcType::named("NSInteger")))
            .with_body(ObjcCompoundStatement::statements(vec![
                ObjcStatement::Return(Some(ObjcExpression::ident("_count"))),
            ])),
    );
    implementation.methods.push(
        ObjcMethodDecl::keywords(
            vec![objc_syntax::ObjcKeywordDecl::new(
                "setCount",
                ObjcTypeAnnotation::new(ObjcType::named("NSInteger")),
                "value",
            )],
            ObjcTypeAnnotation::new(ObjcType::Void),
        )
        .with_body(ObjcCompoundStatement::statements(vec![
            ObjcStatement::Expressions(vec![ObjcExpression::Assignment {
                target: Box::new(ObjcExpression::ident("_count")),
                op: objc_syntax::ObjcOperator::Assign,
                value: Box::new(ObjcExpression::ident("value")),
            }]),
        ])),
    );
    let source = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);

    let adapter = PreparsedAdapter::new()
        .with("C.h", ParsedSource::new(header))
        .with("C.m", ParsedSource::new(source));
    let provider = provider_for(&["C.h", "C.m"]);

    let (collection, _) = Rewriter::default().translate(&provider, &adapter);
    let class = collection.find_class("C").unwrap();

    // The accessor pair no longer exists as independent methods, and the
    // property carries both bodies.
    assert!(class.methods.is_empty());
    assert!(matches!(
        class.properties[0].mode,
        PropertyMode::Accessors { .. }
    ));
}

#[test]
fn test_unparseable_fragment_survives_as_unknown_marker() {
    let mut implementation = ObjcImplementation::new("C");
    implementation.methods.push(
        ObjcMethodDecl::bare("m", ObjcTypeAnnotation::new(ObjcType::Void)).with_body(
            ObjcCompoundStatement::statements(vec![ObjcStatement::Unknown {
                text: "__asm__(\"nop\")".to_string(),
            }]),
        ),
    );
    let file = ObjcFile::new("C.m")
        .with_declarations(vec![ObjcDeclaration::Implementation(implementation)]);
    let adapter = PreparsedAdapter::new().with("C.m", ParsedSource::new(file));
    let provider = provider_for(&["C.m"]);

    let mut output = MemoryOutput::new();
    Rewriter::default()
        .rewrite(&provider, &adapter, &mut output)
        .unwrap();
    let swift = output.file("C.swift").unwrap();
    assert!(swift.contains("/* unknown */"), "got:\n{}", swift);
}

#[test]
fn test_single_class_intention_per_file_and_name() {
    // One class-or-struct-or-enum intention per (file, name) after a full
    // h/m round trip that declares the type on both sides.
    let header = ObjcFile::new("T.h")
        .with_declarations(vec![ObjcDeclaration::Interface(ObjcInterface::new("T"))]);
    let source = ObjcFile::new("T.m").with_declarations(vec![
        ObjcDeclaration::Interface(ObjcInterface::new("T")),
        ObjcDeclaration::Implementation(ObjcImplementation::new("T")),
    ]);
    let adapter = PreparsedAdapter::new()
        .with("T.h", ParsedSource::new(header))
        .with("T.m", ParsedSource::new(source));
    let provider = provider_for(&["T.h", "T.m"]);

    let (collection, _) = Rewriter::default().translate(&provider, &adapter);
    assert_eq!(collection.files().len(), 1);
    let named_t = collection
        .files()[0]
        .types
        .iter()
        .filter(|t| matches!(t, TypeIntention::Class(_)) && t.name() == "T")
        .count();
    assert_eq!(named_t, 1);
}
