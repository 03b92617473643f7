//! Property-based tests for the constant pipeline.
//!
//! These use proptest to verify coercion and folding invariants across many
//! generated inputs, catching edge cases that hand-written tests might miss.

use karst::{ConstantFolder, EvaluationMode, FoldedConstant, adjust_type, numeric};
use karst_tree::{
    ConstValue, ConstantKind, Expr, LiteralNode, LiteralValue, Session, Span, TypeRef,
};
use proptest::prelude::*;

fn numeric_kind_strategy() -> impl Strategy<Value = ConstantKind> {
    prop_oneof![
        Just(ConstantKind::Byte),
        Just(ConstantKind::Short),
        Just(ConstantKind::Int),
        Just(ConstantKind::Long),
        Just(ConstantKind::Float),
        Just(ConstantKind::Double),
        Just(ConstantKind::IntegerLiteral),
        Just(ConstantKind::UnsignedByte),
        Just(ConstantKind::UnsignedShort),
        Just(ConstantKind::UnsignedInt),
        Just(ConstantKind::UnsignedLong),
        Just(ConstantKind::UnsignedIntegerLiteral),
    ]
}

fn fold_literal(kind: ConstantKind, value: LiteralValue) -> Option<ConstValue> {
    let session = Session::new();
    let expr = Expr::Literal(LiteralNode { kind, value }).at(Span::new(0, 1));
    ConstantFolder::new(&session, EvaluationMode::ConstOnly)
        .fold(&expr)
        .map(|folded| folded.value)
}

proptest! {
    /// Coercing twice to the same kind equals coercing once.
    #[test]
    fn coercion_is_idempotent_per_kind(
        value in any::<i64>(),
        kind in numeric_kind_strategy(),
    ) {
        let start = ConstValue::Long(value);
        let once = numeric::coerce(&start, kind).expect("numeric kinds always coerce");
        let twice = numeric::coerce(&once, kind).expect("re-coercion stays numeric");
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.kind(), kind);
    }

    /// Coercion through f64 is also stable for float inputs.
    #[test]
    fn float_coercion_is_idempotent(
        value in any::<f64>().prop_filter("NaN is never equal to itself", |v| !v.is_nan()),
        kind in numeric_kind_strategy(),
    ) {
        let start = ConstValue::Double(value);
        let once = numeric::coerce(&start, kind).expect("numeric kinds always coerce");
        let twice = numeric::coerce(&once, kind).expect("re-coercion stays numeric");
        prop_assert_eq!(once, twice);
    }

    /// Re-kinding a constant to the same expected type twice changes nothing
    /// the second time.
    #[test]
    fn adjust_type_is_idempotent(value in any::<i64>()) {
        let folded = FoldedConstant {
            value: ConstValue::Long(value),
            span: Span::new(0, 1),
            ty: TypeRef::long(),
        };
        let once = adjust_type(folded, &TypeRef::int());
        let twice = adjust_type(once.clone(), &TypeRef::int());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.value.kind(), ConstantKind::Int);
    }

    /// An in-range literal folds to exactly its payload.
    #[test]
    fn int_literals_round_trip(value in any::<i32>()) {
        let folded = fold_literal(ConstantKind::Int, LiteralValue::Int(i64::from(value)));
        prop_assert_eq!(folded, Some(ConstValue::Int(value)));
    }

    /// Out-of-range payloads truncate rather than fail, matching `as`-cast
    /// conversion semantics.
    #[test]
    fn byte_literals_truncate(value in any::<i64>()) {
        let folded = fold_literal(ConstantKind::Byte, LiteralValue::Int(value));
        prop_assert_eq!(folded, Some(ConstValue::Byte(value as i8)));
    }

    /// String literals are preserved verbatim, whatever they contain.
    #[test]
    fn string_literals_round_trip(text in ".*") {
        let folded = fold_literal(ConstantKind::String, LiteralValue::String(text.clone()));
        prop_assert_eq!(folded, Some(ConstValue::String(text)));
    }

    /// Integral finite doubles always render with a decimal point.
    #[test]
    fn integral_doubles_render_with_decimal_point(value in -1_000_000i64..1_000_000) {
        let rendered = ConstValue::Double(value as f64).to_string();
        prop_assert!(rendered.contains('.'), "rendered as {}", rendered);
    }
}
