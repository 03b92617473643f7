//! Annotation argument resolution tests.

use karst_tree::{
    CallNode, CallableId, ClassId, ClassSymbol, ConstValue, ConstantKind, EnumEntrySymbol, Expr,
    FunctionKind, FunctionSymbol, LiteralNode, LiteralValue, NamedArg, PropertySymbol, Qualifier,
    Reference, Session, Span, Spanned, Symbol, SymbolId, TypeRef,
};

use super::*;

fn span(start: usize) -> Span {
    Span::new(start, start + 1)
}

fn int_literal(value: i64) -> Spanned<Expr> {
    Expr::Literal(LiteralNode {
        kind: ConstantKind::Int,
        value: LiteralValue::Int(value),
    })
    .at(span(0))
}

fn untyped_literal(value: i64) -> Spanned<Expr> {
    Expr::Literal(LiteralNode {
        kind: ConstantKind::IntegerLiteral,
        value: LiteralValue::Int(value),
    })
    .at(span(0))
}

fn string_literal(text: &str) -> Spanned<Expr> {
    Expr::Literal(LiteralNode {
        kind: ConstantKind::String,
        value: LiteralValue::String(text.to_string()),
    })
    .at(span(0))
}

fn add_class(session: &mut Session, name: &str, is_annotation: bool) -> SymbolId {
    session.add(Symbol::Class(ClassSymbol {
        class_id: ClassId::new(&["com", "example"], name),
        is_local: false,
        is_annotation,
        alias_of: None,
    }))
}

fn add_constructor(session: &mut Session, owner: SymbolId) -> SymbolId {
    session.add(Symbol::Function(FunctionSymbol {
        callable_id: CallableId::top_level("<init>"),
        kind: FunctionKind::Constructor { owner },
    }))
}

fn add_enum_entry(session: &mut Session, name: &str) -> SymbolId {
    session.add(Symbol::EnumEntry(EnumEntrySymbol {
        callable_id: CallableId::member(ClassId::new(&["com", "example"], "Color"), name),
    }))
}

fn constant(value: ConstValue) -> AnnotationValue {
    AnnotationValue::Constant {
        value,
        span: span(0),
    }
}

// ========================================
// Constants and wrappers
// ========================================

#[test]
fn test_literal_resolves_to_constant() {
    let session = Session::new();
    assert_eq!(
        resolve_argument(&int_literal(7), &session),
        constant(ConstValue::Int(7))
    );
    assert_eq!(
        resolve_argument(&string_literal("s"), &session),
        constant(ConstValue::String("s".into()))
    );
}

#[test]
fn test_untyped_literal_narrows_to_fitting_width() {
    let session = Session::new();
    assert_eq!(
        resolve_argument(&untyped_literal(7), &session),
        constant(ConstValue::Int(7))
    );
    assert_eq!(
        resolve_argument(&untyped_literal(1 << 40), &session),
        constant(ConstValue::Long(1 << 40))
    );
}

#[test]
fn test_named_wrapper_unwraps() {
    let session = Session::new();
    let named = Expr::Named {
        name: "value".into(),
        inner: Box::new(int_literal(7)),
    }
    .at(span(5));
    assert_eq!(
        resolve_argument(&named, &session),
        constant(ConstValue::Int(7))
    );
}

#[test]
fn test_opaque_is_unsupported() {
    let session = Session::new();
    assert_eq!(
        resolve_argument(&Expr::Opaque.at(span(0)), &session),
        AnnotationValue::Unsupported
    );
}

#[test]
fn test_const_only_gating_applies_to_property_reads() {
    let mut session = Session::new();
    let plain_val = session.add(Symbol::Property(PropertySymbol {
        callable_id: CallableId::top_level("limit"),
        ty: TypeRef::int(),
        is_const: false,
        is_val: true,
        initializer: Some(int_literal(10)),
    }));
    let const_val = session.add(Symbol::Property(PropertySymbol {
        callable_id: CallableId::top_level("LIMIT"),
        ty: TypeRef::int(),
        is_const: true,
        is_val: true,
        initializer: Some(int_literal(10)),
    }));

    let access = |id| Expr::NamedReference(Reference::Resolved(id)).at(span(0));
    assert_eq!(
        resolve_argument(&access(plain_val), &session),
        AnnotationValue::Unsupported
    );
    assert_eq!(
        resolve_argument(&access(const_val), &session),
        constant(ConstValue::Int(10))
    );
}

// ========================================
// Vararg flattening
// ========================================

#[test]
fn test_vararg_flattens_and_drops_failed_elements() {
    let session = Session::new();
    let pack = Expr::VarargPack(vec![
        int_literal(1),
        Expr::Opaque.at(span(3)),
        int_literal(2),
    ])
    .at(span(0));

    let AnnotationValue::Array { elements, .. } = resolve_argument(&pack, &session) else {
        panic!("expected an array");
    };
    assert_eq!(
        elements,
        vec![
            constant(ConstValue::Int(1)),
            constant(ConstValue::Int(2)),
        ]
    );
}

#[test]
fn test_vararg_span_comes_from_first_resolved_element() {
    let session = Session::new();
    let mut first = int_literal(1);
    first.span = span(8);
    let pack = Expr::VarargPack(vec![Expr::Opaque.at(span(3)), first]).at(span(0));

    let AnnotationValue::Array { span: array_span, .. } = resolve_argument(&pack, &session) else {
        panic!("expected an array");
    };
    assert_eq!(array_span, span(8));
}

#[test]
fn test_empty_vararg_keeps_pack_span() {
    let session = Session::new();
    let pack = Expr::VarargPack(vec![]).at(span(4));
    assert_eq!(
        resolve_argument(&pack, &session),
        AnnotationValue::Array {
            elements: vec![],
            span: span(4),
        }
    );
}

#[test]
fn test_spread_contributor_splices_one_level() {
    let session = Session::new();
    let spread = Expr::Spread(Box::new(
        Expr::ArrayLiteral(vec![int_literal(2), int_literal(3)]).at(span(2)),
    ))
    .at(span(1));
    let pack = Expr::VarargPack(vec![int_literal(1), spread]).at(span(0));

    let AnnotationValue::Array { elements, .. } = resolve_argument(&pack, &session) else {
        panic!("expected an array");
    };
    assert_eq!(
        elements,
        vec![
            constant(ConstValue::Int(1)),
            constant(ConstValue::Int(2)),
            constant(ConstValue::Int(3)),
        ]
    );
}

#[test]
fn test_direct_array_contributor_stays_nested() {
    let session = Session::new();
    let inner = Expr::ArrayLiteral(vec![int_literal(2)]).at(span(2));
    let pack = Expr::VarargPack(vec![inner]).at(span(0));

    let AnnotationValue::Array { elements, .. } = resolve_argument(&pack, &session) else {
        panic!("expected an array");
    };
    assert_eq!(elements.len(), 1);
    assert!(matches!(elements[0], AnnotationValue::Array { .. }));
}

#[test]
fn test_array_literal_resolves_like_a_pack() {
    let session = Session::new();
    let literal = Expr::ArrayLiteral(vec![string_literal("a"), string_literal("b")]).at(span(0));
    let AnnotationValue::Array { elements, .. } = resolve_argument(&literal, &session) else {
        panic!("expected an array");
    };
    assert_eq!(elements.len(), 2);
}

// ========================================
// Calls
// ========================================

#[test]
fn test_annotation_constructor_call_round_trip() {
    let mut session = Session::new();
    let class = add_class(&mut session, "Foo", true);
    let ctor = add_constructor(&mut session, class);
    let call = Expr::Call(CallNode {
        callee: Reference::Resolved(ctor),
        receiver: None,
        args: Vec::new(),
        mapping: vec![
            NamedArg::new("x", int_literal(1)),
            NamedArg::new("y", string_literal("s")),
        ],
        result_ty: TypeRef::Class(ClassId::new(&["com", "example"], "Foo")),
    })
    .at(span(0));

    let AnnotationValue::Annotation(application) = resolve_argument(&call, &session) else {
        panic!("expected an annotation");
    };
    assert_eq!(application.class, ClassId::new(&["com", "example"], "Foo"));
    assert_eq!(application.call_span, span(0));
    assert_eq!(application.use_site_target, None);
    assert_eq!(application.index, None);
    assert_eq!(application.arguments.len(), 2);
    assert_eq!(application.arguments[0].name, "x");
    assert_eq!(application.arguments[0].value, constant(ConstValue::Int(1)));
    assert_eq!(application.arguments[1].name, "y");
    assert_eq!(
        application.arguments[1].value,
        constant(ConstValue::String("s".into()))
    );
}

#[test]
fn test_non_annotation_constructor_is_unsupported() {
    let mut session = Session::new();
    let class = add_class(&mut session, "Box", false);
    let ctor = add_constructor(&mut session, class);
    let call = Expr::Call(CallNode {
        callee: Reference::Resolved(ctor),
        receiver: None,
        args: vec![int_literal(1)],
        mapping: Vec::new(),
        result_ty: TypeRef::Class(ClassId::new(&["com", "example"], "Box")),
    })
    .at(span(0));
    assert_eq!(
        resolve_argument(&call, &session),
        AnnotationValue::Unsupported
    );
}

#[test]
fn test_array_factory_recurses_into_its_pack() {
    let mut session = Session::new();
    let array_of = session.add(Symbol::Function(FunctionSymbol {
        callable_id: CallableId::top_level("arrayOf"),
        kind: FunctionKind::ArrayFactory,
    }));
    let call = Expr::Call(CallNode {
        callee: Reference::Resolved(array_of),
        receiver: None,
        args: vec![Expr::VarargPack(vec![int_literal(1), int_literal(2)]).at(span(1))],
        mapping: Vec::new(),
        result_ty: TypeRef::Stub,
    })
    .at(span(0));

    let AnnotationValue::Array { elements, .. } = resolve_argument(&call, &session) else {
        panic!("expected an array");
    };
    assert_eq!(elements.len(), 2);
}

#[test]
fn test_enum_entry_through_call_and_reference() {
    let mut session = Session::new();
    let red = add_enum_entry(&mut session, "RED");

    let reference = Expr::NamedReference(Reference::Resolved(red)).at(span(0));
    let access = Expr::PropertyAccess {
        receiver: None,
        target: Reference::Resolved(red),
    }
    .at(span(1));
    let call = Expr::Call(CallNode {
        callee: Reference::Resolved(red),
        receiver: None,
        args: Vec::new(),
        mapping: Vec::new(),
        result_ty: TypeRef::Stub,
    })
    .at(span(2));

    let expected = |s| AnnotationValue::EnumEntry {
        entry: CallableId::member(ClassId::new(&["com", "example"], "Color"), "RED"),
        span: s,
    };
    assert_eq!(resolve_argument(&reference, &session), expected(span(0)));
    assert_eq!(resolve_argument(&access, &session), expected(span(1)));
    assert_eq!(resolve_argument(&call, &session), expected(span(2)));
}

#[test]
fn test_unresolved_callee_is_unsupported() {
    let session = Session::new();
    let call = Expr::Call(CallNode {
        callee: Reference::Unresolved,
        receiver: None,
        args: Vec::new(),
        mapping: Vec::new(),
        result_ty: TypeRef::Stub,
    })
    .at(span(0));
    assert_eq!(
        resolve_argument(&call, &session),
        AnnotationValue::Unsupported
    );
}

// ========================================
// Class literals
// ========================================

#[test]
fn test_class_literal_non_local() {
    let mut session = Session::new();
    let class = add_class(&mut session, "Foo", false);
    let literal = Expr::ClassLiteral {
        resolved: Some(class),
        qualifier: None,
    }
    .at(span(0));

    assert_eq!(
        resolve_argument(&literal, &session),
        AnnotationValue::KClass(KClassValue::NonLocal {
            class: ClassId::new(&["com", "example"], "Foo"),
        })
    );
}

#[test]
fn test_class_literal_local() {
    let mut session = Session::new();
    let local = session.add(Symbol::Class(ClassSymbol {
        class_id: ClassId::new(&[], "Local"),
        is_local: true,
        is_annotation: false,
        alias_of: None,
    }));
    let literal = Expr::ClassLiteral {
        resolved: Some(local),
        qualifier: None,
    }
    .at(span(0));

    assert_eq!(
        resolve_argument(&literal, &session),
        AnnotationValue::KClass(KClassValue::Local { declaration: local })
    );
}

#[test]
fn test_class_literal_expands_alias_chain() {
    let mut session = Session::new();
    let target = add_class(&mut session, "Target", false);
    let inner_alias = session.add(Symbol::Class(ClassSymbol {
        class_id: ClassId::new(&["com", "example"], "Inner"),
        is_local: false,
        is_annotation: false,
        alias_of: Some(target),
    }));
    let outer_alias = session.add(Symbol::Class(ClassSymbol {
        class_id: ClassId::new(&["com", "example"], "Outer"),
        is_local: false,
        is_annotation: false,
        alias_of: Some(inner_alias),
    }));
    let literal = Expr::ClassLiteral {
        resolved: Some(outer_alias),
        qualifier: None,
    }
    .at(span(0));

    assert_eq!(
        resolve_argument(&literal, &session),
        AnnotationValue::KClass(KClassValue::NonLocal {
            class: ClassId::new(&["com", "example"], "Target"),
        })
    );
}

#[test]
fn test_unresolved_class_literal_reconstructs_dotted_name() {
    let session = Session::new();
    let qualifier = Qualifier::unresolved("Nested", Some(Qualifier::unresolved("Unknown", None)));
    let literal = Expr::ClassLiteral {
        resolved: None,
        qualifier: Some(qualifier),
    }
    .at(span(0));

    assert_eq!(
        resolve_argument(&literal, &session),
        AnnotationValue::KClass(KClassValue::Error {
            span: span(0),
            qualifier: Some("Unknown.Nested".into()),
        })
    );
}

#[test]
fn test_unresolved_class_literal_without_qualifier() {
    let session = Session::new();
    let literal = Expr::ClassLiteral {
        resolved: None,
        qualifier: None,
    }
    .at(span(0));

    assert_eq!(
        resolve_argument(&literal, &session),
        AnnotationValue::KClass(KClassValue::Error {
            span: span(0),
            qualifier: None,
        })
    );
}

// ========================================
// Named-argument mapping
// ========================================

#[test]
fn test_resolve_named_arguments_preserves_order_and_arity() {
    let session = Session::new();
    let args = vec![
        NamedArg::new("first", int_literal(1)),
        NamedArg::new("second", Expr::Opaque.at(span(2))),
        NamedArg::new("third", string_literal("s")),
    ];
    let resolved = resolve_named_arguments(&args, &session);
    assert_eq!(resolved.len(), 3);
    assert_eq!(resolved[0].name, "first");
    assert_eq!(resolved[1].name, "second");
    assert_eq!(resolved[1].value, AnnotationValue::Unsupported);
    assert_eq!(resolved[2].value, constant(ConstValue::String("s".into())));
}

#[test]
#[should_panic(expected = "INVARIANT")]
fn test_dangling_reference_panics() {
    let session = Session::new();
    let access = Expr::NamedReference(Reference::Resolved(SymbolId(42))).at(span(0));
    let _ = resolve_argument(&access, &session);
}
