#![forbid(unsafe_code)]
//! Shared vocabulary for the Karst compiler's resolved program representation.
//!
//! This crate defines the data the constant-evaluation pipeline reads but does
//! not produce: the resolved expression tree ([`Expr`]), the symbol table
//! ([`Session`]), resolved type references ([`TypeRef`]), and the typed
//! constant values ([`ConstValue`]) that folding produces.
//!
//! Everything here is plain immutable data. Name resolution, type inference,
//! and body resolution happen upstream; by the time a tree reaches this crate's
//! consumers, every reference either carries its resolved [`SymbolId`] or an
//! explicit unresolved marker.

mod expr;
mod span;
mod symbols;
mod types;
mod value;

pub use expr::{CallNode, Expr, LiteralNode, NamedArg, Qualifier, Reference};
pub use span::{Span, Spanned};
pub use symbols::{
    ClassSymbol, EnumEntrySymbol, FieldSymbol, FunctionKind, FunctionSymbol, PropertySymbol,
    Session, Symbol, SymbolId, UseSiteTarget,
};
pub use types::{ClassId, CallableId, TypeRef};
pub use value::{ConstValue, ConstantKind, LiteralValue};
