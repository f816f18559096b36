//! Request frames
//!
//! Body layout (`declared_length + 4` bytes):
//! - byte 0: command id, repeated from the header
//! - byte 1: declared length, repeated from the header
//! - bytes 2..2+len: argument payload
//! - last 2 bytes: footer over everything before it (see [`crate::checksum`])

use heapless::Vec;

use crate::checksum::footer;
use crate::wire::{ALL_BYTES_WRITTEN, HEADER_LEN, START_OF_REQUEST_MARKER, SYNC_PATTERN};

/// Largest declared payload length
pub const MAX_PAYLOAD_SIZE: usize = 124;

/// Largest body: repeated command + length, payload, two footer bytes
pub const MAX_BODY_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

/// Most arguments a single function can declare
pub const MAX_ARGS: usize = 15;

/// Complete host request: sync, header, body, terminator
pub const MAX_REQUEST_SIZE: usize = SYNC_PATTERN.len() + HEADER_LEN + MAX_BODY_SIZE + 1;

/// Errors that can occur while building or checking a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Footer does not match the body
    InvalidChecksum,
    /// Repeated command or length differs from the header
    HeaderMismatch,
}

/// A request as the host builds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    /// Command identifier
    pub command_id: u8,
    /// Argument bytes, already laid out little-endian
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl RequestFrame {
    /// Create a request with the given command and argument bytes
    pub fn new(command_id: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            command_id,
            payload: payload_vec,
        })
    }

    /// Create a request with no arguments
    pub fn empty(command_id: u8) -> Self {
        Self {
            command_id,
            payload: Vec::new(),
        }
    }

    /// Declared payload length
    pub fn declared_length(&self) -> u8 {
        // Bounded by MAX_PAYLOAD_SIZE
        self.payload.len() as u8
    }

    /// The three header bytes
    pub fn header(&self) -> [u8; HEADER_LEN] {
        [
            START_OF_REQUEST_MARKER,
            self.command_id,
            self.declared_length(),
        ]
    }

    /// The echo the device sends back for this header
    pub fn header_echo(&self) -> [u8; HEADER_LEN] {
        [
            self.declared_length(),
            self.command_id,
            START_OF_REQUEST_MARKER,
        ]
    }

    /// Encode the body (repeated header fields, payload, footer)
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.payload.len();
        let body_len = len + 4;
        if buffer.len() < body_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.command_id;
        buffer[1] = self.declared_length();
        buffer[2..2 + len].copy_from_slice(&self.payload);
        let [c0, c1] = footer(&buffer[..2 + len]);
        buffer[2 + len] = c0;
        buffer[3 + len] = c1;

        Ok(body_len)
    }

    /// Encode the body into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_BODY_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_BODY_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Every byte the host sends for one call, in order
    pub fn request_bytes(&self) -> Result<Vec<u8, MAX_REQUEST_SIZE>, FrameError> {
        let mut out = Vec::new();
        let body = self.encode_to_vec()?;
        out.extend_from_slice(&SYNC_PATTERN)
            .map_err(|_| FrameError::BufferTooSmall)?;
        out.extend_from_slice(&self.header())
            .map_err(|_| FrameError::BufferTooSmall)?;
        out.extend_from_slice(&body)
            .map_err(|_| FrameError::BufferTooSmall)?;
        out.push(ALL_BYTES_WRITTEN)
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(out)
    }
}

/// Check a received body against the header it followed
///
/// `body` must hold exactly `declared_length + 4` bytes.
pub fn check_body(command_id: u8, declared_length: u8, body: &[u8]) -> Result<(), FrameError> {
    let len = declared_length as usize;
    if len > MAX_PAYLOAD_SIZE || body.len() != len + 4 {
        return Err(FrameError::PayloadTooLarge);
    }
    let received = [body[len + 2], body[len + 3]];
    if footer(&body[..len + 2]) != received {
        return Err(FrameError::InvalidChecksum);
    }
    if body[0] != command_id || body[1] != declared_length {
        return Err(FrameError::HeaderMismatch);
    }
    Ok(())
}
