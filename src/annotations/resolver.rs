//! Structural resolution of annotation arguments.

use karst_tree::{
    CallNode, ClassSymbol, ConstValue, Expr, NamedArg, Qualifier, Reference, Session, Span,
    Spanned, Symbol, SymbolId,
};

use crate::consteval::{ConstantFolder, EvaluationMode};
use crate::diagnostics::malformed_tree;

use super::{AnnotationApplication, AnnotationValue, KClassValue, NamedAnnotationValue};

/// Alias chains are finite in well-formed sessions; a longer walk means a
/// cycle.
const MAX_ALIAS_DEPTH: usize = 64;

/// Resolve one annotation argument expression to its value.
///
/// Total: arguments without a compile-time value come back as
/// [`AnnotationValue::Unsupported`] rather than an error.
#[tracing::instrument(skip_all, fields(start = expr.span.start))]
pub fn resolve_argument(expr: &Spanned<Expr>, session: &Session) -> AnnotationValue {
    resolve(expr, session)
}

/// Resolve a call's parameter-to-argument mapping, order-preserving and 1:1.
pub fn resolve_named_arguments(args: &[NamedArg], session: &Session) -> Vec<NamedAnnotationValue> {
    args.iter()
        .map(|arg| NamedAnnotationValue {
            name: arg.name.clone(),
            value: resolve(&arg.value, session),
        })
        .collect()
}

fn resolve(expr: &Spanned<Expr>, session: &Session) -> AnnotationValue {
    match &expr.node {
        Expr::Named { inner, .. } => resolve(inner, session),
        Expr::Spread(inner) => resolve(inner, session),
        Expr::VarargPack(parts) | Expr::ArrayLiteral(parts) => {
            flatten_elements(parts, expr.span, session)
        }
        Expr::Call(call) => resolve_call(call, expr, session),
        Expr::PropertyAccess {
            target: Reference::Resolved(id),
            ..
        }
        | Expr::NamedReference(Reference::Resolved(id)) => {
            match lookup(session, *id, expr.span) {
                Symbol::EnumEntry(entry) => AnnotationValue::EnumEntry {
                    entry: entry.callable_id.clone(),
                    span: expr.span,
                },
                _ => fold_fallback(expr, session),
            }
        }
        Expr::ClassLiteral {
            resolved,
            qualifier,
        } => resolve_class_literal(*resolved, qualifier.as_ref(), expr.span, session),
        _ => fold_fallback(expr, session),
    }
}

/// Flatten vararg contributors into one `Array`.
///
/// Unresolvable contributors are dropped rather than failing the whole array
/// (the opposite of the all-or-nothing string concatenation policy in the
/// folder). Spread and named contributors splice their own array elements in
/// one level deep. The representative span is the first successfully resolved
/// element's, falling back to the pack's own span.
fn flatten_elements(
    parts: &[Spanned<Expr>],
    pack_span: Span,
    session: &Session,
) -> AnnotationValue {
    let mut elements = Vec::new();
    let mut span = None;
    for part in parts {
        let splice = matches!(part.node, Expr::Spread(_) | Expr::Named { .. });
        match resolve(part, session) {
            AnnotationValue::Unsupported => {}
            AnnotationValue::Array {
                elements: inner,
                span: inner_span,
            } if splice => {
                span.get_or_insert(inner_span);
                elements.extend(inner);
            }
            value => {
                span.get_or_insert(part.span);
                elements.push(value);
            }
        }
    }
    AnnotationValue::Array {
        elements,
        span: span.unwrap_or(pack_span),
    }
}

fn resolve_call(call: &CallNode, expr: &Spanned<Expr>, session: &Session) -> AnnotationValue {
    let Reference::Resolved(id) = call.callee else {
        return fold_fallback(expr, session);
    };
    match lookup(session, id, expr.span) {
        Symbol::Function(function) => match &function.kind {
            karst_tree::FunctionKind::Constructor { owner } => {
                let class = lookup_class(session, *owner, expr.span);
                if class.is_annotation {
                    AnnotationValue::Annotation(AnnotationApplication {
                        class: class.class_id.clone(),
                        call_span: expr.span,
                        use_site_target: None,
                        arguments: resolve_named_arguments(&call.mapping, session),
                        index: None,
                    })
                } else {
                    fold_fallback(expr, session)
                }
            }
            karst_tree::FunctionKind::ArrayFactory => match call.args.as_slice() {
                [packed] => resolve(packed, session),
                _ => fold_fallback(expr, session),
            },
            _ => fold_fallback(expr, session),
        },
        Symbol::EnumEntry(entry) => AnnotationValue::EnumEntry {
            entry: entry.callable_id.clone(),
            span: expr.span,
        },
        _ => fold_fallback(expr, session),
    }
}

fn resolve_class_literal(
    resolved: Option<SymbolId>,
    qualifier: Option<&Qualifier>,
    span: Span,
    session: &Session,
) -> AnnotationValue {
    let Some(id) = resolved else {
        return AnnotationValue::KClass(KClassValue::Error {
            span,
            qualifier: dotted_name(qualifier),
        });
    };
    let (declaration, class) = expand_aliases(session, id, span);
    let value = if class.is_local {
        KClassValue::Local { declaration }
    } else {
        KClassValue::NonLocal {
            class: class.class_id.clone(),
        }
    };
    AnnotationValue::KClass(value)
}

fn expand_aliases(session: &Session, mut id: SymbolId, span: Span) -> (SymbolId, &ClassSymbol) {
    for _ in 0..MAX_ALIAS_DEPTH {
        let Some(class) = session.class(id) else {
            malformed_tree(
                format!("class literal target {id:?} is not a class-like symbol"),
                span,
            );
        };
        match class.alias_of {
            Some(next) => id = next,
            None => return (id, class),
        }
    }
    malformed_tree("type alias expansion did not terminate", span)
}

/// Rebuild the dotted source name of an unresolved class literal. The chain
/// stores the outermost segment first, so the walk collects and then
/// reverses.
fn dotted_name(qualifier: Option<&Qualifier>) -> Option<String> {
    let mut segments = Vec::new();
    let mut cursor = qualifier;
    while let Some(q) = cursor {
        if q.unresolved {
            segments.push(q.segment.as_str());
        }
        cursor = q.receiver.as_deref();
    }
    if segments.is_empty() {
        return None;
    }
    segments.reverse();
    Some(segments.join("."))
}

/// Last resort: hand the expression to the constant folder. Untyped integer
/// literals that survive folding are pinned to the narrowest fitting width,
/// since annotation values carry concrete types.
fn fold_fallback(expr: &Spanned<Expr>, session: &Session) -> AnnotationValue {
    let folder = ConstantFolder::new(session, EvaluationMode::ConstOnly);
    match folder.fold(expr) {
        Some(folded) => AnnotationValue::Constant {
            value: narrow_literal(folded.value),
            span: folded.span,
        },
        None => AnnotationValue::Unsupported,
    }
}

fn narrow_literal(value: ConstValue) -> ConstValue {
    match value {
        ConstValue::IntegerLiteral(v) => match i32::try_from(v) {
            Ok(v) => ConstValue::Int(v),
            Err(_) => ConstValue::Long(v),
        },
        ConstValue::UnsignedIntegerLiteral(v) => match u32::try_from(v) {
            Ok(v) => ConstValue::UInt(v),
            Err(_) => ConstValue::ULong(v),
        },
        other => other,
    }
}

fn lookup(session: &Session, id: SymbolId, span: Span) -> &Symbol {
    match session.symbol(id) {
        Some(symbol) => symbol,
        None => malformed_tree(
            format!("dangling symbol id {id:?} in annotation argument"),
            span,
        ),
    }
}

fn lookup_class(session: &Session, id: SymbolId, span: Span) -> &ClassSymbol {
    match session.class(id) {
        Some(class) => class,
        None => malformed_tree(
            format!("constructor owner {id:?} is not a class symbol"),
            span,
        ),
    }
}
