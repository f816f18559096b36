//! Integrity check for a received request
//!
//! A request is trusted only if both footer bytes match and the command and
//! length repeated in the body equal the header values. There is no partial
//! acceptance and no retransmission; the host retries on the next cycle.

use serialcall_protocol::frame::check_body;
use serialcall_protocol::FrameError;

use crate::error::Fault;
use crate::link::reader::CycleBuffer;

/// Verify the body read in this cycle against its header
pub fn verify(buffer: &CycleBuffer) -> Result<(), Fault> {
    let header = buffer.header();
    check_body(header.command_id, header.declared_length, buffer.body()).map_err(|e| match e {
        FrameError::HeaderMismatch => Fault::HeaderMismatch,
        FrameError::PayloadTooLarge | FrameError::BufferTooSmall => Fault::LengthOverflow,
        FrameError::InvalidChecksum => Fault::InvalidChecksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::link::reader::read_request;
    use crate::testing::{ScriptedTransport, SteppingClock};
    use serialcall_protocol::RequestFrame;

    /// Read `header` followed by `body` and a terminator into a cycle buffer
    fn buffer_for(header: [u8; 3], body: &[u8]) -> CycleBuffer {
        let mut transport = ScriptedTransport::with_rx(&header);
        transport.push_rx(body);
        transport.push_rx(&[0xFA]);
        let clock = SteppingClock::new(1);
        read_request(&mut transport, &clock, &EngineConfig::default())
            .ok()
            .unwrap()
    }

    #[test]
    fn test_valid_request_accepted() {
        let frame = RequestFrame::new(0x30, &[7, 8, 9]).unwrap();
        let body = frame.encode_to_vec().unwrap();
        assert_eq!(verify(&buffer_for(frame.header(), &body)), Ok(()));
    }

    #[test]
    fn test_corrupt_checksum_byte() {
        let frame = RequestFrame::new(0x30, &[7, 8, 9]).unwrap();
        let mut body = frame.encode_to_vec().unwrap();
        body[5] = body[5].wrapping_add(1);
        assert_eq!(
            verify(&buffer_for(frame.header(), &body)),
            Err(Fault::InvalidChecksum)
        );
    }

    #[test]
    fn test_flipped_payload_bit() {
        let frame = RequestFrame::new(0x30, &[7, 8, 9]).unwrap();
        let mut body = frame.encode_to_vec().unwrap();
        body[3] ^= 0x10;
        assert_eq!(
            verify(&buffer_for(frame.header(), &body)),
            Err(Fault::InvalidChecksum)
        );
    }

    #[test]
    fn test_body_for_other_command() {
        let header = RequestFrame::new(0x30, &[1]).unwrap().header();
        let body = RequestFrame::new(0x31, &[1]).unwrap().encode_to_vec().unwrap();
        assert_eq!(verify(&buffer_for(header, &body)), Err(Fault::HeaderMismatch));
    }
}
