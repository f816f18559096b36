//! Response serialization
//!
//! Responses are assembled in a fixed inline buffer and written in one go.

use serialcall_protocol::wire::{HANDSHAKE_REPLY, START_OF_RESPONSE_MARKER, VOID_RETURN_RESULT};
use serialcall_protocol::{FunctionType, LongWidth, Value, MAX_VALUE_WIDTH};

const CAPACITY: usize = 2 + MAX_VALUE_WIDTH;

// The handshake reply is the longest fixed response
const _: () = assert!(HANDSHAKE_REPLY.len() <= CAPACITY);

/// One outgoing success response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseBuffer {
    bytes: [u8; CAPACITY],
    len: usize,
}

impl ResponseBuffer {
    fn from_slice(data: &[u8]) -> Self {
        let mut bytes = [0u8; CAPACITY];
        bytes[..data.len()].copy_from_slice(data);
        Self {
            bytes,
            len: data.len(),
        }
    }

    /// Protocol version reply
    pub fn handshake() -> Self {
        Self::from_slice(&HANDSHAKE_REPLY)
    }

    /// Result of a call declared to return `returns`
    ///
    /// Void writes the void sentinel whatever `value` holds; other types
    /// write the low `width` bytes of `value`, little-endian. A handler that
    /// returns [`Value::Void`] for a non-void signature is a bug: debug
    /// builds panic, release builds send zeroes.
    pub fn result(returns: FunctionType, value: Value, long: LongWidth) -> Self {
        if returns.is_void() {
            return Self::from_slice(&[START_OF_RESPONSE_MARKER, VOID_RETURN_RESULT]);
        }
        debug_assert!(value != Value::Void, "non-void function returned Value::Void");
        #[cfg(feature = "defmt")]
        if value == Value::Void {
            defmt::warn!("{} function returned no value", returns);
        }
        let width = returns.wire_width(long);
        let mut out = Self::from_slice(&[START_OF_RESPONSE_MARKER, width as u8]);
        out.bytes[2..2 + width].copy_from_slice(&value.to_le_bytes()[..width]);
        out.len = 2 + width;
        out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_reply() {
        assert_eq!(
            ResponseBuffer::handshake().as_bytes(),
            &[0xF9, 0x03, 0x02, 0x01, 0x02]
        );
    }

    #[test]
    fn test_void_result() {
        let out = ResponseBuffer::result(FunctionType::Void, Value::U8(7), LongWidth::Compat16);
        assert_eq!(out.as_bytes(), &[0xF9, 0xFC]);
    }

    #[test]
    fn test_bool_result() {
        let out = ResponseBuffer::result(
            FunctionType::Boolean,
            Value::Bool(true),
            LongWidth::Compat16,
        );
        assert_eq!(out.as_bytes(), &[0xF9, 0x01, 0x01]);
    }

    #[test]
    fn test_int_result_little_endian() {
        let out =
            ResponseBuffer::result(FunctionType::Int, Value::I16(-1000), LongWidth::Compat16);
        assert_eq!(out.as_bytes(), &[0xF9, 0x02, 0x18, 0xFC]);
    }

    #[test]
    fn test_long_truncated_in_compat_mode() {
        let out = ResponseBuffer::result(
            FunctionType::Long,
            Value::I32(0x0001_0002),
            LongWidth::Compat16,
        );
        assert_eq!(out.as_bytes(), &[0xF9, 0x02, 0x02, 0x00]);
    }

    #[test]
    fn test_long_full_in_wide_mode() {
        let out = ResponseBuffer::result(
            FunctionType::ULong,
            Value::U32(0xDEAD_BEEF),
            LongWidth::Wide32,
        );
        assert_eq!(out.as_bytes(), &[0xF9, 0x04, 0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_value_narrowed_to_declared_width() {
        // A u16 returned from a function declared as Byte keeps its low byte
        let out =
            ResponseBuffer::result(FunctionType::Byte, Value::U16(0x1234), LongWidth::Compat16);
        assert_eq!(out.as_bytes(), &[0xF9, 0x01, 0x34]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-void function returned Value::Void")]
    fn test_missing_value_for_non_void_panics_in_debug() {
        let _ = ResponseBuffer::result(FunctionType::Byte, Value::Void, LongWidth::Compat16);
    }
}
