//! Sync probe
//!
//! The probe is read as a unit: once four bytes are buffered all four are
//! consumed, then compared. A near miss therefore always shifts the stream
//! by exactly the probe length, and a host that repeats the probe stays
//! aligned.

use serialcall_hal::Transport;
use serialcall_protocol::wire::{SYNC_ACK, SYNC_PATTERN};

use super::block_for_bytes;
use crate::error::{Abort, IoResultExt, Stop};

/// Block for the sync probe and acknowledge it
pub(crate) fn acquire<T: Transport>(transport: &mut T) -> Result<(), Stop<T::Error>> {
    block_for_bytes(transport, SYNC_PATTERN.len())?;

    let mut probe = [0u8; SYNC_PATTERN.len()];
    for byte in probe.iter_mut() {
        *byte = transport.read_byte().io()?;
    }
    if probe != SYNC_PATTERN {
        return Err(Abort::BadSync.into());
    }

    transport.write(&SYNC_ACK).io()?;
    transport.flush().io()?;

    #[cfg(feature = "defmt")]
    defmt::trace!("sync acquired");
    Ok(())
}
