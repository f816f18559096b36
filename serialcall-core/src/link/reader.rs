//! Frame reader
//!
//! Reads one request after sync in three deadline-bounded phases:
//! header (echoed back before the body is sent), body, terminator.

use serialcall_hal::{Clock, Transport};
use serialcall_protocol::wire::{ALL_BYTES_WRITTEN, HEADER_LEN, START_OF_REQUEST_MARKER};
use serialcall_protocol::{MAX_BODY_SIZE, MAX_PAYLOAD_SIZE};

use super::expect_bytes;
use crate::config::EngineConfig;
use crate::error::{Abort, Fault, IoResultExt, Phase, Stop};

/// Header fields as first received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RequestHeader {
    pub command_id: u8,
    pub declared_length: u8,
}

/// Per-cycle scratch space, zeroed on construction
pub struct CycleBuffer {
    header: RequestHeader,
    body: [u8; MAX_BODY_SIZE],
}

impl CycleBuffer {
    pub fn header(&self) -> RequestHeader {
        self.header
    }

    /// The full body: repeated header fields, payload, footer
    pub fn body(&self) -> &[u8] {
        &self.body[..self.header.declared_length as usize + 4]
    }

    /// Argument bytes only
    pub fn payload(&self) -> &[u8] {
        &self.body[2..2 + self.header.declared_length as usize]
    }
}

/// Read the header, echo it, then read the body and terminator
pub(crate) fn read_request<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    config: &EngineConfig,
) -> Result<CycleBuffer, Stop<T::Error>> {
    let header = read_header(transport, clock, config)?;

    let mut buffer = CycleBuffer {
        header,
        body: [0u8; MAX_BODY_SIZE],
    };
    read_body(transport, clock, config, &mut buffer)?;
    read_terminator(transport, clock, config)?;
    Ok(buffer)
}

fn read_header<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    config: &EngineConfig,
) -> Result<RequestHeader, Stop<T::Error>> {
    expect_bytes(
        transport,
        clock,
        HEADER_LEN,
        config.header_timeout_ms,
        Phase::Header,
    )?;

    if transport.read_byte().io()? != START_OF_REQUEST_MARKER {
        return Err(Abort::BadStartMarker.into());
    }
    let command_id = transport.read_byte().io()?;
    let declared_length = transport.read_byte().io()?;

    // Refuse before the host commits to sending the body
    if declared_length as usize > MAX_PAYLOAD_SIZE {
        return Err(Fault::LengthOverflow.into());
    }

    transport
        .write(&[declared_length, command_id, START_OF_REQUEST_MARKER])
        .io()?;
    transport.flush().io()?;

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "header accepted: cmd {=u8:#x}, len {=u8}",
        command_id,
        declared_length
    );
    Ok(RequestHeader {
        command_id,
        declared_length,
    })
}

fn read_body<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    config: &EngineConfig,
    buffer: &mut CycleBuffer,
) -> Result<(), Stop<T::Error>> {
    let body_len = buffer.header.declared_length as usize + 4;
    expect_bytes(
        transport,
        clock,
        body_len,
        config.payload_timeout_ms,
        Phase::Body,
    )?;
    for byte in buffer.body[..body_len].iter_mut() {
        *byte = transport.read_byte().io()?;
    }
    Ok(())
}

fn read_terminator<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    config: &EngineConfig,
) -> Result<(), Stop<T::Error>> {
    expect_bytes(
        transport,
        clock,
        1,
        config.payload_timeout_ms,
        Phase::Terminator,
    )?;
    if transport.read_byte().io()? != ALL_BYTES_WRITTEN {
        return Err(Abort::BadTerminator.into());
    }
    Ok(())
}
