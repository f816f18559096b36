//! Marker bytes and fixed sequences
//!
//! Direction is from the device's point of view: `*_REQUEST_*` bytes are
//! received, `*_RESPONSE_*` and ack bytes are sent.

/// Sync probe sent by the host
pub const SYNC_PATTERN: [u8; 4] = [0xFF, 0xFE, 0xFD, 0xFC];

/// Sync acknowledgement sent by the device
pub const SYNC_ACK: [u8; 4] = [0xFC, 0xFD, 0xFE, 0xFF];

/// First header byte of every request
pub const START_OF_REQUEST_MARKER: u8 = 0xFB;

/// Sent by the host after the request body
pub const ALL_BYTES_WRITTEN: u8 = 0xFA;

/// First byte of every successful response
pub const START_OF_RESPONSE_MARKER: u8 = 0xF9;

/// Repeated [`ERROR_SIGNAL`] byte
pub const ERROR_MARKER: u8 = 0xEF;

/// Written on any timeout or integrity failure
pub const ERROR_SIGNAL: [u8; 3] = [ERROR_MARKER; 3];

/// Result byte that stands in for a size when the function returns nothing
pub const VOID_RETURN_RESULT: u8 = 0xFC;

/// Header length: start marker, command, length
pub const HEADER_LEN: usize = 3;

/// Reserved command that asks for the protocol version
pub const CMD_HANDSHAKE_INITIATE: u8 = 0x01;

/// First byte of the handshake reply payload
pub const ACK_HANDSHAKE_INITIATE: u8 = 0x02;

pub const PROTOCOL_VERSION_MAJOR: u8 = 1;
pub const PROTOCOL_VERSION_MINOR: u8 = 2;

/// Complete device reply to [`CMD_HANDSHAKE_INITIATE`]
pub const HANDSHAKE_REPLY: [u8; 5] = [
    START_OF_RESPONSE_MARKER,
    3,
    ACK_HANDSHAKE_INITIATE,
    PROTOCOL_VERSION_MAJOR,
    PROTOCOL_VERSION_MINOR,
];

/// Line rate the device opens the port at unless configured otherwise
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default deadline for the 3 header bytes
pub const DEFAULT_HEADER_TIMEOUT_MS: u32 = 30_000;

/// Default deadline for the body and the terminator
pub const DEFAULT_PAYLOAD_TIMEOUT_MS: u32 = 60_000;
