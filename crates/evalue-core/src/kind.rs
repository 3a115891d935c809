//! Value kinds and their wire codes.

use serde::Serialize;

use crate::error::DecodeError;

/// Discriminant of a [`Value`](crate::Value).
///
/// Codes 0 through 5 are written on the wire; the list kinds (6 through
/// 11) are reserved and never encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ValueKind {
    None = 0,
    Tensor = 1,
    String = 2,
    Double = 3,
    Int = 4,
    Bool = 5,
    ListBool = 6,
    ListDouble = 7,
    ListInt = 8,
    ListTensor = 9,
    ListScalar = 10,
    ListOptionalTensor = 11,
}

impl ValueKind {
    /// Every kind, in code order.
    pub const ALL: [ValueKind; 12] = [
        ValueKind::None,
        ValueKind::Tensor,
        ValueKind::String,
        ValueKind::Double,
        ValueKind::Int,
        ValueKind::Bool,
        ValueKind::ListBool,
        ValueKind::ListDouble,
        ValueKind::ListInt,
        ValueKind::ListTensor,
        ValueKind::ListScalar,
        ValueKind::ListOptionalTensor,
    ];

    /// Wire code of this kind.
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Returns the name used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            ValueKind::None => "None",
            ValueKind::Tensor => "Tensor",
            ValueKind::String => "String",
            ValueKind::Double => "Double",
            ValueKind::Int => "Int",
            ValueKind::Bool => "Bool",
            ValueKind::ListBool => "ListBool",
            ValueKind::ListDouble => "ListDouble",
            ValueKind::ListInt => "ListInt",
            ValueKind::ListTensor => "ListTensor",
            ValueKind::ListScalar => "ListScalar",
            ValueKind::ListOptionalTensor => "ListOptionalTensor",
        }
    }

    /// Returns whether this is one of the six list kinds.
    #[inline]
    pub const fn is_list(&self) -> bool {
        (*self as u8) >= ValueKind::ListBool as u8
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ValueKind {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ValueKind::ALL
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::UnknownTypeCode(value))
    }
}
