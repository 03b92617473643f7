//! Operator dispatch tables for unary and binary constant operations.
//!
//! The tables are keyed by `(operator name, compile-time type)` and kept as
//! explicit matches so a missing combination is visible in review and tests
//! instead of surfacing as a silent `None` from some shared helper.
//!
//! Integer arithmetic wraps at the result width, shift counts are masked by
//! the width, and integer division by zero yields `None` (the caller treats
//! it as "not a constant"). Float math is IEEE-754.

use std::cmp::Ordering;

use karst_tree::{ConstValue, ConstantKind};

use crate::numeric::{self, as_long};

/// Coarse type grid the operator tables dispatch over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileTimeType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    String,
    Any,
}

impl CompileTimeType {
    /// The grid slot for a constant kind. Unsigned kinds have no operator
    /// table of their own; unsigned constants re-kind through the coercion
    /// table instead of folding through operators.
    pub fn of_kind(kind: ConstantKind) -> Option<Self> {
        match kind {
            ConstantKind::Byte => Some(CompileTimeType::Byte),
            ConstantKind::Short => Some(CompileTimeType::Short),
            ConstantKind::Int | ConstantKind::IntegerLiteral => Some(CompileTimeType::Int),
            ConstantKind::Long => Some(CompileTimeType::Long),
            ConstantKind::Float => Some(CompileTimeType::Float),
            ConstantKind::Double => Some(CompileTimeType::Double),
            ConstantKind::Char => Some(CompileTimeType::Char),
            ConstantKind::Boolean => Some(CompileTimeType::Boolean),
            ConstantKind::String => Some(CompileTimeType::String),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            CompileTimeType::Byte
                | CompileTimeType::Short
                | CompileTimeType::Int
                | CompileTimeType::Long
                | CompileTimeType::Float
                | CompileTimeType::Double
        )
    }

    /// The constant kind values of this type carry, for coercion.
    pub(crate) fn kind(self) -> Option<ConstantKind> {
        match self {
            CompileTimeType::Byte => Some(ConstantKind::Byte),
            CompileTimeType::Short => Some(ConstantKind::Short),
            CompileTimeType::Int => Some(ConstantKind::Int),
            CompileTimeType::Long => Some(ConstantKind::Long),
            CompileTimeType::Float => Some(ConstantKind::Float),
            CompileTimeType::Double => Some(ConstantKind::Double),
            CompileTimeType::Char => Some(ConstantKind::Char),
            CompileTimeType::Boolean => Some(ConstantKind::Boolean),
            CompileTimeType::String => Some(ConstantKind::String),
            CompileTimeType::Any => None,
        }
    }
}

/// Operand pair promoted to a common arithmetic width.
///
/// Byte and Short promote to Int; mixing Int and Long yields Long; any float
/// operand switches to float math, Double winning over Float.
enum Promoted {
    Int(i64, i64),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
}

#[derive(PartialEq, PartialOrd)]
enum Width {
    Int,
    Long,
    Float,
    Double,
}

fn width(value: &ConstValue) -> Option<Width> {
    match value.kind() {
        ConstantKind::Byte | ConstantKind::Short | ConstantKind::Int | ConstantKind::IntegerLiteral => {
            Some(Width::Int)
        }
        ConstantKind::Long => Some(Width::Long),
        ConstantKind::Float => Some(Width::Float),
        ConstantKind::Double => Some(Width::Double),
        _ => None,
    }
}

fn promote(lhs: &ConstValue, rhs: &ConstValue) -> Option<Promoted> {
    let joint = match (width(lhs)?, width(rhs)?) {
        (a, b) if a >= b => a,
        (_, b) => b,
    };
    Some(match joint {
        Width::Int => Promoted::Int(as_long(lhs)?, as_long(rhs)?),
        Width::Long => Promoted::Long(as_long(lhs)?, as_long(rhs)?),
        Width::Float => Promoted::Float(
            numeric::as_double(lhs)? as f32,
            numeric::as_double(rhs)? as f32,
        ),
        Width::Double => Promoted::Double(numeric::as_double(lhs)?, numeric::as_double(rhs)?),
    })
}

/// Unary table over numeric/boolean receivers. The receiver has already been
/// coerced to the operator's declared compile-time type by the caller.
pub(crate) fn evaluate_unary(
    name: &str,
    op_ty: CompileTimeType,
    receiver: &ConstValue,
) -> Option<ConstValue> {
    match (name, op_ty) {
        ("unaryMinus", ty) if ty.is_numeric() => negate(receiver),
        ("unaryPlus", ty) if ty.is_numeric() => promote_identity(receiver),
        ("inv", ty) if ty.is_numeric() => invert(receiver),
        ("inc", ty) if ty.is_numeric() => step(receiver, 1),
        ("dec", ty) if ty.is_numeric() => step(receiver, -1),
        ("not", CompileTimeType::Boolean) => match receiver {
            ConstValue::Boolean(b) => Some(ConstValue::Boolean(!b)),
            _ => None,
        },
        ("toByte", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Byte),
        ("toShort", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Short),
        ("toInt", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Int),
        ("toLong", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Long),
        ("toFloat", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Float),
        ("toDouble", ty) if ty.is_numeric() => numeric::coerce(receiver, ConstantKind::Double),
        ("toChar", ty) if ty.is_numeric() => {
            let code = as_long(receiver)? as u16;
            char::from_u32(u32::from(code)).map(ConstValue::Char)
        }
        ("toString", _) => Some(ConstValue::String(receiver.to_string())),
        _ => None,
    }
}

/// Unary table over String receivers.
pub(crate) fn evaluate_unary_string(name: &str, receiver: &str) -> Option<ConstValue> {
    match name {
        "length" => Some(ConstValue::Int(receiver.chars().count() as i32)),
        "toString" => Some(ConstValue::String(receiver.to_string())),
        _ => None,
    }
}

/// Binary table over numeric/boolean operands.
pub(crate) fn evaluate_binary(
    name: &str,
    lhs: &ConstValue,
    rhs_ty: CompileTimeType,
    rhs: &ConstValue,
) -> Option<ConstValue> {
    match (name, rhs_ty) {
        ("plus" | "minus" | "times" | "div" | "rem", ty) if ty.is_numeric() => {
            arithmetic(name, lhs, rhs)
        }
        ("and" | "or" | "xor", CompileTimeType::Boolean) => {
            let (ConstValue::Boolean(a), ConstValue::Boolean(b)) = (lhs, rhs) else {
                return None;
            };
            let out = match name {
                "and" => a & b,
                "or" => a | b,
                _ => a ^ b,
            };
            Some(ConstValue::Boolean(out))
        }
        ("and" | "or" | "xor", ty) if ty.is_numeric() => bitwise(name, lhs, rhs),
        ("shl" | "shr" | "ushr", ty) if ty.is_numeric() => shift(name, lhs, rhs),
        ("compareTo", ty) if ty.is_numeric() => compare(lhs, rhs),
        ("equals", _) => Some(ConstValue::Boolean(values_equal(lhs, rhs))),
        _ => None,
    }
}

/// Binary table over String receivers. `plus` and `equals` accept any
/// right-hand kind; `compareTo` requires another String.
pub(crate) fn evaluate_binary_string(
    name: &str,
    lhs: &str,
    rhs_ty: CompileTimeType,
    rhs: &ConstValue,
) -> Option<ConstValue> {
    match (name, rhs_ty) {
        ("plus", CompileTimeType::Any) => Some(ConstValue::String(format!("{lhs}{rhs}"))),
        ("equals", CompileTimeType::Any) => {
            Some(ConstValue::Boolean(rhs.as_string() == Some(lhs)))
        }
        ("compareTo", CompileTimeType::String) => {
            let other = rhs.as_string()?;
            Some(ConstValue::Int(ordering_to_int(lhs.cmp(other))))
        }
        _ => None,
    }
}

fn negate(value: &ConstValue) -> Option<ConstValue> {
    Some(match value {
        ConstValue::Byte(v) => ConstValue::Int(-i32::from(*v)),
        ConstValue::Short(v) => ConstValue::Int(-i32::from(*v)),
        ConstValue::Int(v) => ConstValue::Int(v.wrapping_neg()),
        ConstValue::Long(v) => ConstValue::Long(v.wrapping_neg()),
        ConstValue::IntegerLiteral(v) => ConstValue::IntegerLiteral(v.wrapping_neg()),
        ConstValue::Float(v) => ConstValue::Float(-v),
        ConstValue::Double(v) => ConstValue::Double(-v),
        _ => return None,
    })
}

fn promote_identity(value: &ConstValue) -> Option<ConstValue> {
    Some(match value {
        ConstValue::Byte(v) => ConstValue::Int(i32::from(*v)),
        ConstValue::Short(v) => ConstValue::Int(i32::from(*v)),
        other if other.is_numeric() => other.clone(),
        _ => return None,
    })
}

fn invert(value: &ConstValue) -> Option<ConstValue> {
    Some(match value {
        ConstValue::Byte(v) => ConstValue::Int(!i32::from(*v)),
        ConstValue::Short(v) => ConstValue::Int(!i32::from(*v)),
        ConstValue::Int(v) => ConstValue::Int(!v),
        ConstValue::IntegerLiteral(v) => ConstValue::IntegerLiteral(!v),
        ConstValue::Long(v) => ConstValue::Long(!v),
        _ => return None,
    })
}

fn step(value: &ConstValue, delta: i64) -> Option<ConstValue> {
    Some(match value {
        ConstValue::Byte(v) => ConstValue::Byte(v.wrapping_add(delta as i8)),
        ConstValue::Short(v) => ConstValue::Short(v.wrapping_add(delta as i16)),
        ConstValue::Int(v) => ConstValue::Int(v.wrapping_add(delta as i32)),
        ConstValue::Long(v) => ConstValue::Long(v.wrapping_add(delta)),
        ConstValue::IntegerLiteral(v) => ConstValue::IntegerLiteral(v.wrapping_add(delta)),
        ConstValue::Float(v) => ConstValue::Float(v + delta as f32),
        ConstValue::Double(v) => ConstValue::Double(v + delta as f64),
        _ => return None,
    })
}

fn arithmetic(name: &str, lhs: &ConstValue, rhs: &ConstValue) -> Option<ConstValue> {
    match promote(lhs, rhs)? {
        Promoted::Int(a, b) => int_arithmetic(name, a, b).map(|v| ConstValue::Int(v as i32)),
        Promoted::Long(a, b) => int_arithmetic(name, a, b).map(ConstValue::Long),
        Promoted::Float(a, b) => float_arithmetic(name, f64::from(a), f64::from(b))
            .map(|v| ConstValue::Float(v as f32)),
        Promoted::Double(a, b) => float_arithmetic(name, a, b).map(ConstValue::Double),
    }
}

fn int_arithmetic(name: &str, a: i64, b: i64) -> Option<i64> {
    match name {
        "plus" => Some(a.wrapping_add(b)),
        "minus" => Some(a.wrapping_sub(b)),
        "times" => Some(a.wrapping_mul(b)),
        // Division by zero is "not a constant", not a panic.
        "div" => (b != 0).then(|| a.wrapping_div(b)),
        "rem" => (b != 0).then(|| a.wrapping_rem(b)),
        _ => None,
    }
}

fn float_arithmetic(name: &str, a: f64, b: f64) -> Option<f64> {
    match name {
        "plus" => Some(a + b),
        "minus" => Some(a - b),
        "times" => Some(a * b),
        "div" => Some(a / b),
        "rem" => Some(a % b),
        _ => None,
    }
}

fn bitwise(name: &str, lhs: &ConstValue, rhs: &ConstValue) -> Option<ConstValue> {
    match promote(lhs, rhs)? {
        Promoted::Int(a, b) => {
            let out = match name {
                "and" => a & b,
                "or" => a | b,
                "xor" => a ^ b,
                _ => return None,
            };
            Some(ConstValue::Int(out as i32))
        }
        Promoted::Long(a, b) => {
            let out = match name {
                "and" => a & b,
                "or" => a | b,
                "xor" => a ^ b,
                _ => return None,
            };
            Some(ConstValue::Long(out))
        }
        _ => None,
    }
}

/// Shifts keep the receiver's width: the right operand is only a count.
fn shift(name: &str, lhs: &ConstValue, rhs: &ConstValue) -> Option<ConstValue> {
    let count = as_long(rhs)? as u32;
    match width(lhs)? {
        Width::Int => {
            let a = as_long(lhs)? as i32;
            let out = match name {
                "shl" => a.wrapping_shl(count),
                "shr" => a.wrapping_shr(count),
                "ushr" => ((a as u32).wrapping_shr(count)) as i32,
                _ => return None,
            };
            Some(ConstValue::Int(out))
        }
        Width::Long => {
            let a = as_long(lhs)?;
            let out = match name {
                "shl" => a.wrapping_shl(count),
                "shr" => a.wrapping_shr(count),
                "ushr" => ((a as u64).wrapping_shr(count)) as i64,
                _ => return None,
            };
            Some(ConstValue::Long(out))
        }
        _ => None,
    }
}

fn compare(lhs: &ConstValue, rhs: &ConstValue) -> Option<ConstValue> {
    let ordering = match promote(lhs, rhs)? {
        Promoted::Int(a, b) => a.cmp(&b),
        Promoted::Long(a, b) => a.cmp(&b),
        Promoted::Float(a, b) => a.total_cmp(&b),
        Promoted::Double(a, b) => a.total_cmp(&b),
    };
    Some(ConstValue::Int(ordering_to_int(ordering)))
}

fn values_equal(lhs: &ConstValue, rhs: &ConstValue) -> bool {
    match promote(lhs, rhs) {
        Some(Promoted::Int(a, b)) | Some(Promoted::Long(a, b)) => a == b,
        Some(Promoted::Float(a, b)) => a == b,
        Some(Promoted::Double(a, b)) => a == b,
        None => lhs == rhs,
    }
}

fn ordering_to_int(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
