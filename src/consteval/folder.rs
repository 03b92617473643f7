//! Recursive constant folder over the resolved expression tree.

use karst_tree::{
    CallNode, ConstValue, ConstantKind, Expr, FieldSymbol, LiteralNode, LiteralValue,
    PropertySymbol, Reference, Session, Span, Spanned, Symbol, SymbolId, TypeRef,
};

use crate::diagnostics::malformed_tree;
use crate::numeric;

use super::kinds::{constant_kind_of, type_of_kind};
use super::{CompileTimeType, EvaluationMode, FoldedConstant, ops};

/// Folding recurses through initializers and operands; source nesting is the
/// only bound, so cap it rather than trusting the stack.
const MAX_FOLD_DEPTH: usize = 256;

/// Re-kind a folded constant to an expected static type.
///
/// Applied after operator folds, where the literal-evaluation kind can
/// diverge from the call's resolved type (e.g. `unaryMinus` on a large
/// literal evaluates as Long while the call site is typed Int). Non-numeric
/// values and kindless expected types pass through unchanged; the function is
/// idempotent.
pub fn adjust_type(folded: FoldedConstant, expected: &TypeRef) -> FoldedConstant {
    let Some(expected_kind) = constant_kind_of(expected) else {
        return folded;
    };
    if expected_kind == folded.kind() || !folded.value.is_numeric() {
        return folded;
    }
    match numeric::coerce(&folded.value, expected_kind) {
        Some(value) => FoldedConstant {
            value,
            span: folded.span,
            ty: expected.clone(),
        },
        None => folded,
    }
}

/// Folds literal-shaped expressions to compile-time constants.
///
/// Pure and stateless apart from the borrowed session; safe to share across
/// threads folding disjoint trees.
pub struct ConstantFolder<'a> {
    session: &'a Session,
    mode: EvaluationMode,
}

impl<'a> ConstantFolder<'a> {
    pub fn new(session: &'a Session, mode: EvaluationMode) -> Self {
        Self { session, mode }
    }

    /// Attempt to fold an expression. `None` means "no compile-time value",
    /// never an internal failure.
    #[tracing::instrument(skip_all, fields(mode = ?self.mode))]
    pub fn fold(&self, expr: &Spanned<Expr>) -> Option<FoldedConstant> {
        self.fold_at(expr, 0)
    }

    fn fold_at(&self, expr: &Spanned<Expr>, depth: usize) -> Option<FoldedConstant> {
        if depth > MAX_FOLD_DEPTH {
            tracing::trace!(start = expr.span.start, "fold recursion limit reached");
            return None;
        }
        match &expr.node {
            Expr::Literal(literal) => self.fold_literal(literal, expr.span),
            Expr::PropertyAccess { receiver, target } => {
                self.fold_reference(receiver.as_deref(), target, expr.span, depth)
            }
            Expr::NamedReference(reference) => {
                self.fold_reference(None, reference, expr.span, depth)
            }
            Expr::StringConcat(parts) => self.fold_concat(parts, expr.span, depth),
            Expr::Call(call) => self.fold_call(call, expr.span, depth),
            Expr::VarargPack(_)
            | Expr::ArrayLiteral(_)
            | Expr::Named { .. }
            | Expr::Spread(_)
            | Expr::ClassLiteral { .. }
            | Expr::Opaque => None,
        }
    }

    /// Literals re-normalize their raw payload to the declared kind, so a
    /// mis-kinded payload (integer literal typed as Char, say) is corrected
    /// instead of leaking.
    fn fold_literal(&self, literal: &LiteralNode, span: Span) -> Option<FoldedConstant> {
        if literal.kind == ConstantKind::Error {
            malformed_tree("error-kinded literal survived resolution", span);
        }
        let value = normalize_literal(literal)?;
        let ty = type_of_kind(value.kind());
        Some(FoldedConstant { value, span, ty })
    }

    fn fold_reference(
        &self,
        receiver: Option<&Spanned<Expr>>,
        target: &Reference,
        span: Span,
        depth: usize,
    ) -> Option<FoldedConstant> {
        let Reference::Resolved(id) = target else {
            return None;
        };
        match self.lookup(*id, span) {
            Symbol::Property(property) => {
                if is_string_length(property) {
                    let receiver = self.fold_at(receiver?, depth + 1)?;
                    let text = receiver.value.as_string()?;
                    return Some(FoldedConstant {
                        value: ConstValue::Int(text.chars().count() as i32),
                        span,
                        ty: TypeRef::int(),
                    });
                }
                if !self.property_folds(property) {
                    return None;
                }
                self.fold_at(property.initializer.as_ref()?, depth + 1)
            }
            Symbol::Field(field) => {
                if !self.field_folds(field) {
                    return None;
                }
                self.fold_at(field.initializer.as_ref()?, depth + 1)
            }
            _ => None,
        }
    }

    /// `var` never folds; `const` always may; a plain `val` only under Full
    /// evaluation.
    fn property_folds(&self, property: &PropertySymbol) -> bool {
        if !property.is_val {
            return false;
        }
        match self.mode {
            EvaluationMode::ConstOnly => property.is_const,
            EvaluationMode::Full => true,
        }
    }

    /// Field gate: `static final` under ConstOnly, any `final` under Full.
    fn field_folds(&self, field: &FieldSymbol) -> bool {
        if !field.is_final {
            return false;
        }
        match self.mode {
            EvaluationMode::ConstOnly => field.is_static,
            EvaluationMode::Full => true,
        }
    }

    /// String templates are all-or-nothing: one unfoldable operand fails the
    /// whole concatenation. (Vararg flattening in the annotation resolver
    /// deliberately has the opposite policy.)
    fn fold_concat(
        &self,
        parts: &[Spanned<Expr>],
        span: Span,
        depth: usize,
    ) -> Option<FoldedConstant> {
        let mut text = String::new();
        for part in parts {
            let folded = self.fold_at(part, depth + 1)?;
            text.push_str(&folded.value.to_string());
        }
        Some(FoldedConstant {
            value: ConstValue::String(text),
            span,
            ty: TypeRef::string(),
        })
    }

    fn fold_call(&self, call: &CallNode, span: Span, depth: usize) -> Option<FoldedConstant> {
        let Reference::Resolved(id) = call.callee else {
            return None;
        };
        let Symbol::Function(function) = self.lookup(id, span) else {
            return None;
        };
        let karst_tree::FunctionKind::Operator { receiver_ty } = &function.kind else {
            return None;
        };
        let receiver = self.fold_at(call.receiver.as_deref()?, depth + 1)?;
        let name = function.callable_id.name.as_str();

        let result = match call.args.as_slice() {
            [] => self.apply_unary(name, receiver_ty, &receiver.value),
            [argument] => {
                let argument = self.fold_at(argument, depth + 1)?;
                self.apply_binary(name, receiver_ty, &receiver.value, &argument.value)
            }
            _ => None,
        }?;

        let folded = FoldedConstant {
            value: result,
            span,
            ty: call.result_ty.clone(),
        };
        Some(adjust_type(folded, &call.result_ty))
    }

    fn apply_unary(
        &self,
        name: &str,
        receiver_ty: &TypeRef,
        receiver: &ConstValue,
    ) -> Option<ConstValue> {
        if let Some(text) = receiver.as_string() {
            return ops::evaluate_unary_string(name, text);
        }
        let (op_ty, coerced) = self.coerce_to_operator_type(receiver_ty, receiver)?;
        ops::evaluate_unary(name, op_ty, &coerced)
    }

    fn apply_binary(
        &self,
        name: &str,
        receiver_ty: &TypeRef,
        receiver: &ConstValue,
        argument: &ConstValue,
    ) -> Option<ConstValue> {
        if let Some(text) = receiver.as_string() {
            // String `plus`/`equals` accept heterogeneous right-hand operands.
            let rhs_ty = if matches!(name, "plus" | "equals") {
                CompileTimeType::Any
            } else {
                CompileTimeType::of_kind(argument.kind())?
            };
            return ops::evaluate_binary_string(name, text, rhs_ty, argument);
        }
        let (_, coerced) = self.coerce_to_operator_type(receiver_ty, receiver)?;
        let rhs_ty = CompileTimeType::of_kind(argument.kind())?;
        ops::evaluate_binary(name, &coerced, rhs_ty, argument)
    }

    /// The receiver folds to whatever kind its literal had; the operator
    /// declares the type it actually works over. Coerce numeric receivers to
    /// the declared type before consulting the tables.
    fn coerce_to_operator_type(
        &self,
        receiver_ty: &TypeRef,
        receiver: &ConstValue,
    ) -> Option<(CompileTimeType, ConstValue)> {
        let declared = constant_kind_of(receiver_ty);
        let op_ty = declared
            .and_then(CompileTimeType::of_kind)
            .unwrap_or(CompileTimeType::Any);
        let coerced = match declared.filter(|kind| kind.is_numeric()) {
            Some(kind) => numeric::coerce(receiver, kind)?,
            None => receiver.clone(),
        };
        Some((op_ty, coerced))
    }

    fn lookup(&self, id: SymbolId, span: Span) -> &'a Symbol {
        match self.session.symbol(id) {
            Some(symbol) => symbol,
            None => malformed_tree(
                format!("dangling symbol id {id:?} in resolved reference"),
                span,
            ),
        }
    }
}

fn is_string_length(property: &PropertySymbol) -> bool {
    property.callable_id.name == "length"
        && property
            .callable_id
            .owner
            .as_ref()
            .is_some_and(|owner| owner.is_builtin() && owner.name == "String")
}

/// Bridge a raw literal payload to the kind resolution assigned.
fn normalize_literal(literal: &LiteralNode) -> Option<ConstValue> {
    match literal.kind {
        ConstantKind::Boolean => match &literal.value {
            LiteralValue::Boolean(b) => Some(ConstValue::Boolean(*b)),
            _ => None,
        },
        ConstantKind::Char => match &literal.value {
            LiteralValue::Char(c) => Some(ConstValue::Char(*c)),
            LiteralValue::Int(code) => {
                char::from_u32(u32::try_from(*code).ok()?).map(ConstValue::Char)
            }
            _ => None,
        },
        ConstantKind::String => match &literal.value {
            LiteralValue::String(text) => Some(ConstValue::String(text.clone())),
            _ => None,
        },
        ConstantKind::Null => Some(ConstValue::Null),
        // Numeric kinds re-normalize through the coercion table.
        kind => numeric::coerce(&raw_numeric(&literal.value)?, kind),
    }
}

fn raw_numeric(raw: &LiteralValue) -> Option<ConstValue> {
    match raw {
        LiteralValue::Int(v) => Some(ConstValue::IntegerLiteral(*v)),
        LiteralValue::UInt(v) => Some(ConstValue::UnsignedIntegerLiteral(*v)),
        LiteralValue::Float(v) => Some(ConstValue::Double(*v)),
        _ => None,
    }
}
