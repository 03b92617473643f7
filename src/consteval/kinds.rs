//! Constant-kind inference from resolved types.

use karst_tree::{ConstantKind, TypeRef};

/// Map a resolved static type to the constant kind it can carry, or `None`
/// for types with no kind (error/stub types, unapproximated integer-literal
/// types, non-builtin classes).
///
/// Wrapper shapes are stripped structurally: aliases consult their expansion,
/// flexible types their lower bound, intersections the first member that
/// yields a kind.
pub fn constant_kind_of(ty: &TypeRef) -> Option<ConstantKind> {
    match ty {
        TypeRef::Class(id) if id.is_builtin() => builtin_kind(&id.name),
        TypeRef::Class(_) => None,
        TypeRef::Alias { expanded, .. } => constant_kind_of(expanded),
        TypeRef::Flexible { lower, .. } => constant_kind_of(lower),
        TypeRef::Intersection(members) => members.iter().find_map(constant_kind_of),
        TypeRef::Captured(inner) | TypeRef::DefinitelyNonNull(inner) => constant_kind_of(inner),
        TypeRef::IntegerLiteral | TypeRef::Stub | TypeRef::Error => None,
    }
}

fn builtin_kind(name: &str) -> Option<ConstantKind> {
    match name {
        "Byte" => Some(ConstantKind::Byte),
        "Short" => Some(ConstantKind::Short),
        "Int" => Some(ConstantKind::Int),
        "Long" => Some(ConstantKind::Long),
        "Float" => Some(ConstantKind::Float),
        "Double" => Some(ConstantKind::Double),
        "Char" => Some(ConstantKind::Char),
        "Boolean" => Some(ConstantKind::Boolean),
        "String" => Some(ConstantKind::String),
        "UByte" => Some(ConstantKind::UnsignedByte),
        "UShort" => Some(ConstantKind::UnsignedShort),
        "UInt" => Some(ConstantKind::UnsignedInt),
        "ULong" => Some(ConstantKind::UnsignedLong),
        _ => None,
    }
}

/// The static type a folded value of the given kind carries.
pub(crate) fn type_of_kind(kind: ConstantKind) -> TypeRef {
    match kind {
        ConstantKind::Byte => TypeRef::builtin("Byte"),
        ConstantKind::Short => TypeRef::builtin("Short"),
        ConstantKind::Int => TypeRef::builtin("Int"),
        ConstantKind::Long => TypeRef::builtin("Long"),
        ConstantKind::Float => TypeRef::builtin("Float"),
        ConstantKind::Double => TypeRef::builtin("Double"),
        ConstantKind::Char => TypeRef::builtin("Char"),
        ConstantKind::Boolean => TypeRef::builtin("Boolean"),
        ConstantKind::String => TypeRef::builtin("String"),
        ConstantKind::UnsignedByte => TypeRef::builtin("UByte"),
        ConstantKind::UnsignedShort => TypeRef::builtin("UShort"),
        ConstantKind::UnsignedInt => TypeRef::builtin("UInt"),
        ConstantKind::UnsignedLong => TypeRef::builtin("ULong"),
        ConstantKind::Null => TypeRef::builtin("Nothing"),
        ConstantKind::IntegerLiteral | ConstantKind::UnsignedIntegerLiteral => {
            TypeRef::IntegerLiteral
        }
        ConstantKind::Error => TypeRef::Error,
    }
}
