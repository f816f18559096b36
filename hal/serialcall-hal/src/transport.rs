//! Serial transport abstraction
//!
//! The engine polls a transport for the number of buffered bytes, pulls
//! them one at a time, and writes responses in small bursts followed by a
//! flush. Nothing here is async: the protocol is strictly half-duplex and
//! the engine busy-polls.

/// Byte-oriented serial link
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Open the link with the given line settings
    ///
    /// Links that are configured before being handed to the engine can keep
    /// the default no-op.
    fn open(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        let _ = config;
        Ok(())
    }

    /// Whether the link is ready to carry traffic
    fn is_ready(&mut self) -> bool {
        true
    }

    /// Number of received bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize, Self::Error>;

    /// Read a single received byte
    ///
    /// Only called after [`Transport::bytes_available`] reported at least
    /// one byte.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Queue bytes for transmission
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until all queued bytes have left the device
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
