//! Device responses, decoded on the host side
//!
//! Hosts use this to interpret what a device wrote after the terminator.

use heapless::Vec;

use crate::types::{FunctionType, LongWidth, Value, MAX_VALUE_WIDTH};
use crate::wire::{
    ACK_HANDSHAKE_INITIATE, ERROR_SIGNAL, START_OF_RESPONSE_MARKER, VOID_RETURN_RESULT,
};

/// Errors from decoding a device response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// No bytes at all
    Empty,
    /// First byte is neither the response marker nor an error marker
    MissingStartMarker,
    /// Fewer bytes than the size byte announces
    Truncated,
    /// Size byte does not name any wire width
    InvalidSize,
}

/// One decoded device response
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// The function returned nothing
    Void,
    /// Raw little-endian return bytes
    Value(Vec<u8, MAX_VALUE_WIDTH>),
    /// Reply to the handshake command
    Handshake { major: u8, minor: u8 },
    /// The device rejected the request
    Error,
}

impl Response {
    /// Decode a response from the start of `bytes`
    pub fn parse(bytes: &[u8]) -> Result<Self, ResponseError> {
        if bytes.is_empty() {
            return Err(ResponseError::Empty);
        }
        if bytes.starts_with(&ERROR_SIGNAL) {
            return Ok(Response::Error);
        }
        if bytes[0] != START_OF_RESPONSE_MARKER {
            return Err(ResponseError::MissingStartMarker);
        }
        let size = *bytes.get(1).ok_or(ResponseError::Truncated)?;
        match size {
            VOID_RETURN_RESULT => Ok(Response::Void),
            3 => {
                let body = bytes.get(2..5).ok_or(ResponseError::Truncated)?;
                if body[0] != ACK_HANDSHAKE_INITIATE {
                    return Err(ResponseError::InvalidSize);
                }
                Ok(Response::Handshake {
                    major: body[1],
                    minor: body[2],
                })
            }
            1 | 2 | 4 => {
                let end = 2 + size as usize;
                let value = bytes.get(2..end).ok_or(ResponseError::Truncated)?;
                let mut vec = Vec::new();
                vec.extend_from_slice(value)
                    .map_err(|_| ResponseError::InvalidSize)?;
                Ok(Response::Value(vec))
            }
            _ => Err(ResponseError::InvalidSize),
        }
    }

    /// Number of bytes this response occupies on the wire
    pub fn encoded_len(&self) -> usize {
        match self {
            Response::Void => 2,
            Response::Value(bytes) => 2 + bytes.len(),
            Response::Handshake { .. } => 5,
            Response::Error => ERROR_SIGNAL.len(),
        }
    }

    /// Interpret a value response as the declared return type
    pub fn value(&self, ty: FunctionType, long: LongWidth) -> Option<Value> {
        match self {
            Response::Void if ty.is_void() => Some(Value::Void),
            Response::Value(bytes) => Value::from_wire(ty, long, bytes),
            _ => None,
        }
    }
}
