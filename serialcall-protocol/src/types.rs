//! Wire types for function signatures and values
//!
//! Every argument and return value is one of a closed set of primitive
//! types with a fixed wire width. Multi-byte values are little-endian.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widest value that can appear on the wire ([`LongWidth::Wide32`])
pub const MAX_VALUE_WIDTH: usize = 4;

/// Primitive types a remote function can take or return
///
/// Discriminants match the type codes hosts already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FunctionType {
    /// `bool`, any non-zero byte is true
    Boolean = 0,
    /// Signed 8-bit
    Char = 1,
    /// Unsigned 8-bit
    UChar = 2,
    /// Unsigned 8-bit
    Byte = 3,
    /// Signed 16-bit
    Int = 4,
    /// Unsigned 16-bit
    UInt = 5,
    /// Unsigned 16-bit
    Word = 6,
    /// Signed 32-bit, marshaled per [`LongWidth`]
    Long = 7,
    /// Unsigned 32-bit, marshaled per [`LongWidth`]
    ULong = 8,
    /// Signed 16-bit
    Short = 9,
    /// No value
    Void = 10,
}

impl FunctionType {
    /// Every variant, in discriminant order
    pub const ALL: [FunctionType; 11] = [
        FunctionType::Boolean,
        FunctionType::Char,
        FunctionType::UChar,
        FunctionType::Byte,
        FunctionType::Int,
        FunctionType::UInt,
        FunctionType::Word,
        FunctionType::Long,
        FunctionType::ULong,
        FunctionType::Short,
        FunctionType::Void,
    ];

    /// Get the type code as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a type from its code
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Wire width in the host-compatible layout
    pub fn width(self) -> usize {
        self.wire_width(LongWidth::Compat16)
    }

    /// Wire width under the given long layout
    pub fn wire_width(self, long: LongWidth) -> usize {
        match self {
            FunctionType::Boolean
            | FunctionType::Char
            | FunctionType::UChar
            | FunctionType::Byte => 1,
            FunctionType::Int | FunctionType::UInt | FunctionType::Word | FunctionType::Short => 2,
            FunctionType::Long | FunctionType::ULong => match long {
                LongWidth::Compat16 => 2,
                LongWidth::Wide32 => 4,
            },
            FunctionType::Void => 0,
        }
    }

    /// Whether values of this type are sign-extended when decoded
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            FunctionType::Char | FunctionType::Int | FunctionType::Long | FunctionType::Short
        )
    }

    pub fn is_void(self) -> bool {
        self == FunctionType::Void
    }
}

/// How `Long` and `ULong` travel on the wire
///
/// Existing hosts expect only the low 16 bits. `Wide32` carries all four
/// bytes and must be enabled on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LongWidth {
    /// Low 16 bits only
    #[default]
    Compat16,
    /// Full 32 bits
    Wide32,
}

/// A typed value produced by a remote function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Void,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
}

impl Value {
    /// Little-endian bytes, sign- or zero-extended to [`MAX_VALUE_WIDTH`]
    pub fn to_le_bytes(self) -> [u8; MAX_VALUE_WIDTH] {
        match self {
            Value::Void => [0; MAX_VALUE_WIDTH],
            Value::Bool(b) => (b as u32).to_le_bytes(),
            Value::I8(v) => (v as i32).to_le_bytes(),
            Value::U8(v) => (v as u32).to_le_bytes(),
            Value::I16(v) => (v as i32).to_le_bytes(),
            Value::U16(v) => (v as u32).to_le_bytes(),
            Value::I32(v) => v.to_le_bytes(),
            Value::U32(v) => v.to_le_bytes(),
        }
    }

    /// Decode a value of type `ty` from its wire bytes
    ///
    /// Returns `None` if `bytes` is not exactly the type's width under
    /// `long`.
    pub fn from_wire(ty: FunctionType, long: LongWidth, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != ty.wire_width(long) {
            return None;
        }
        let mut buf = [0u8; MAX_VALUE_WIDTH];
        buf[..bytes.len()].copy_from_slice(bytes);
        if ty.is_signed() && bytes.last().is_some_and(|b| b & 0x80 != 0) {
            for b in &mut buf[bytes.len()..] {
                *b = 0xFF;
            }
        }
        let raw = u32::from_le_bytes(buf);
        let value = match ty {
            FunctionType::Void => Value::Void,
            FunctionType::Boolean => Value::Bool(raw != 0),
            FunctionType::Char => Value::I8(raw as i8),
            FunctionType::UChar | FunctionType::Byte => Value::U8(raw as u8),
            FunctionType::Int | FunctionType::Short => Value::I16(raw as i16),
            FunctionType::UInt | FunctionType::Word => Value::U16(raw as u16),
            FunctionType::Long => Value::I32(raw as i32),
            FunctionType::ULong => Value::U32(raw),
        };
        Some(value)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::I8(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Void
    }
}
