//! The resolved expression tree.
//!
//! This is the subset of the compiler's expression language the constant
//! pipeline can observe. Shapes it does not classify are collapsed into
//! [`Expr::Opaque`] by the lowering that builds these trees; the pipeline
//! treats them as "not a constant" rather than erroring.

use crate::span::{Span, Spanned};
use crate::symbols::SymbolId;
use crate::types::TypeRef;
use crate::value::{ConstantKind, LiteralValue};

/// A literal node: the raw payload plus the kind resolution assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub kind: ConstantKind,
    pub value: LiteralValue,
}

/// A name reference after resolution: either the resolved symbol or an
/// explicit unresolved marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Resolved(SymbolId),
    Unresolved,
}

/// A named argument in a resolved parameter-to-argument mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    pub name: String,
    pub value: Spanned<Expr>,
}

impl NamedArg {
    pub fn new(name: &str, value: Spanned<Expr>) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// A resolved function call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub callee: Reference,
    pub receiver: Option<Box<Spanned<Expr>>>,
    /// Positional value arguments (operator calls use the first).
    pub args: Vec<Spanned<Expr>>,
    /// Resolved parameter-name to argument mapping, in declaration order.
    /// Populated for constructor calls; empty for operator calls.
    pub mapping: Vec<NamedArg>,
    /// Statically resolved type of the whole call expression.
    pub result_ty: TypeRef,
}

/// One segment of a class-literal qualifier chain (`a.b.C::class` keeps the
/// chain `C -> b -> a`, outermost segment first). Segments that failed to
/// resolve keep their source name for best-effort error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    pub segment: String,
    pub unresolved: bool,
    pub receiver: Option<Box<Qualifier>>,
}

impl Qualifier {
    pub fn unresolved(segment: &str, receiver: Option<Qualifier>) -> Self {
        Self {
            segment: segment.to_string(),
            unresolved: true,
            receiver: receiver.map(Box::new),
        }
    }
}

/// A resolved expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralNode),
    /// Qualified access to a property or field.
    PropertyAccess {
        receiver: Option<Box<Spanned<Expr>>>,
        target: Reference,
    },
    /// Bare name reference (desugars the same way as a property access).
    NamedReference(Reference),
    /// Multi-operand string template concatenation.
    StringConcat(Vec<Spanned<Expr>>),
    Call(CallNode),
    /// Vararg call-site packaging: the contributing expressions before
    /// flattening.
    VarargPack(Vec<Spanned<Expr>>),
    /// Collection-literal syntax (`[a, b, c]`) after desugaring.
    ArrayLiteral(Vec<Spanned<Expr>>),
    /// Named-argument wrapper around an inner expression.
    Named {
        name: String,
        inner: Box<Spanned<Expr>>,
    },
    /// Spread-argument wrapper (`*xs`).
    Spread(Box<Spanned<Expr>>),
    /// `X::class`.
    ClassLiteral {
        resolved: Option<SymbolId>,
        qualifier: Option<Qualifier>,
    },
    /// Any expression shape the constant pipeline does not classify.
    Opaque,
}

impl Expr {
    pub fn at(self, span: Span) -> Spanned<Expr> {
        Spanned::new(self, span)
    }
}
