//! Numeric policy: single source of truth for constant-kind coercion.
//!
//! Folding and type adjustment both re-kind numeric constants through
//! [`coerce`], so narrowing/widening behaves identically everywhere:
//!
//! - Signed kinds narrow by truncation (`as`-cast semantics), matching the
//!   language's `toByte`/`toInt`/... conversions.
//! - Unsigned kinds reinterpret the 64-bit signed pattern, then truncate.
//! - Float kinds convert through `f64`.
//! - Non-numeric kinds (`String`, `Boolean`, `Char`, `Null`, `Error`) have no
//!   numeric representation and always yield `None`.

use karst_tree::{ConstValue, ConstantKind};

/// 64-bit signed view of a numeric constant. Unsigned payloads contribute
/// their bit pattern; floats truncate toward zero.
pub(crate) fn as_long(value: &ConstValue) -> Option<i64> {
    match value {
        ConstValue::Byte(v) => Some(i64::from(*v)),
        ConstValue::Short(v) => Some(i64::from(*v)),
        ConstValue::Int(v) => Some(i64::from(*v)),
        ConstValue::Long(v) => Some(*v),
        ConstValue::IntegerLiteral(v) => Some(*v),
        ConstValue::Float(v) => Some(*v as i64),
        ConstValue::Double(v) => Some(*v as i64),
        ConstValue::UByte(v) => Some(i64::from(*v)),
        ConstValue::UShort(v) => Some(i64::from(*v)),
        ConstValue::UInt(v) => Some(i64::from(*v)),
        ConstValue::ULong(v) => Some(*v as i64),
        ConstValue::UnsignedIntegerLiteral(v) => Some(*v as i64),
        ConstValue::Boolean(_)
        | ConstValue::Char(_)
        | ConstValue::String(_)
        | ConstValue::Null => None,
    }
}

/// Double view of a numeric constant.
pub(crate) fn as_double(value: &ConstValue) -> Option<f64> {
    match value {
        ConstValue::Float(v) => Some(f64::from(*v)),
        ConstValue::Double(v) => Some(*v),
        ConstValue::ULong(v) => Some(*v as f64),
        ConstValue::UnsignedIntegerLiteral(v) => Some(*v as f64),
        other => as_long(other).map(|v| v as f64),
    }
}

/// The coercion table: convert a numeric constant to the given kind.
///
/// Total over all `(kind, value)` pairs; `None` means the pair has no numeric
/// conversion. Re-coercing an already-coerced value to the same kind is a
/// no-op (the table is idempotent per kind).
pub fn coerce(value: &ConstValue, kind: ConstantKind) -> Option<ConstValue> {
    match kind {
        ConstantKind::Byte => Some(ConstValue::Byte(as_long(value)? as i8)),
        ConstantKind::Short => Some(ConstValue::Short(as_long(value)? as i16)),
        ConstantKind::Int => Some(ConstValue::Int(as_long(value)? as i32)),
        ConstantKind::Long => Some(ConstValue::Long(as_long(value)?)),
        ConstantKind::IntegerLiteral => Some(ConstValue::IntegerLiteral(as_long(value)?)),
        ConstantKind::Float => Some(ConstValue::Float(as_double(value)? as f32)),
        ConstantKind::Double => Some(ConstValue::Double(as_double(value)?)),
        ConstantKind::UnsignedByte => Some(ConstValue::UByte(as_long(value)? as u8)),
        ConstantKind::UnsignedShort => Some(ConstValue::UShort(as_long(value)? as u16)),
        ConstantKind::UnsignedInt => Some(ConstValue::UInt(as_long(value)? as u32)),
        ConstantKind::UnsignedLong => Some(ConstValue::ULong(as_long(value)? as u64)),
        ConstantKind::UnsignedIntegerLiteral => {
            Some(ConstValue::UnsignedIntegerLiteral(as_long(value)? as u64))
        }
        ConstantKind::Boolean
        | ConstantKind::Char
        | ConstantKind::String
        | ConstantKind::Null
        | ConstantKind::Error => None,
    }
}
