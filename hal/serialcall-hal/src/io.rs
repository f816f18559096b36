//! [`Transport`] adapter for `embedded-io` serial ports
//!
//! `embedded-io` only reports whether *some* data is ready, while the
//! engine needs a byte count. The adapter drains ready bytes into a
//! fixed-size staging queue and reports its length.

use embedded_io::{Read, ReadReady, Write};
use heapless::Deque;

use crate::transport::Transport;

/// Bytes pulled from the port per `read` call while staging
const CHUNK_SIZE: usize = 16;

/// Wraps a blocking `embedded-io` port with an `N`-byte staging queue
pub struct IoTransport<U, const N: usize> {
    port: U,
    staged: Deque<u8, N>,
}

impl<U, const N: usize> IoTransport<U, N>
where
    U: Read + ReadReady + Write,
{
    /// Wrap an already configured port
    pub fn new(port: U) -> Self {
        Self {
            port,
            staged: Deque::new(),
        }
    }

    /// Number of bytes currently staged
    pub fn staged(&self) -> usize {
        self.staged.len()
    }

    /// Give back the wrapped port, dropping any staged bytes
    pub fn into_inner(self) -> U {
        self.port
    }

    fn fill(&mut self) -> Result<(), U::Error> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let room = N - self.staged.len();
            if room == 0 || !self.port.read_ready()? {
                return Ok(());
            }
            let n = self.port.read(&mut chunk[..room.min(CHUNK_SIZE)])?;
            if n == 0 {
                return Ok(());
            }
            for &byte in &chunk[..n] {
                // Cannot overflow: n <= room
                let _ = self.staged.push_back(byte);
            }
        }
    }
}

impl<U, const N: usize> Transport for IoTransport<U, N>
where
    U: Read + ReadReady + Write,
{
    type Error = U::Error;

    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        self.fill()?;
        Ok(self.staged.len())
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        if let Some(byte) = self.staged.pop_front() {
            return Ok(byte);
        }
        // Blocking port: read only returns 0 at end of stream, keep polling
        let mut buf = [0u8; 1];
        loop {
            if self.port.read(&mut buf)? == 1 {
                return Ok(buf[0]);
            }
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use heapless::Vec;

    /// Port with a fixed receive script and a captured transmit buffer
    struct FakePort {
        rx: Deque<u8, 64>,
        tx: Vec<u8, 64>,
        flushes: usize,
    }

    impl FakePort {
        fn with_rx(bytes: &[u8]) -> Self {
            let mut rx = Deque::new();
            for &b in bytes {
                rx.push_back(b).unwrap();
            }
            Self {
                rx,
                tx: Vec::new(),
                flushes: 0,
            }
        }
    }

    impl embedded_io::ErrorType for FakePort {
        type Error = Infallible;
    }

    impl Read for FakePort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    impl ReadReady for FakePort {
        fn read_ready(&mut self) -> Result<bool, Infallible> {
            Ok(!self.rx.is_empty())
        }
    }

    impl Write for FakePort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            self.tx.extend_from_slice(buf).unwrap();
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_available_counts_ready_bytes() {
        let mut transport: IoTransport<_, 32> = IoTransport::new(FakePort::with_rx(&[1, 2, 3]));
        assert_eq!(transport.bytes_available().unwrap(), 3);
        assert_eq!(transport.read_byte().unwrap(), 1);
        assert_eq!(transport.bytes_available().unwrap(), 2);
    }

    #[test]
    fn test_staging_is_bounded() {
        let bytes = [0xAAu8; 40];
        let mut transport: IoTransport<_, 8> = IoTransport::new(FakePort::with_rx(&bytes));
        assert_eq!(transport.bytes_available().unwrap(), 8);
        assert_eq!(transport.staged(), 8);

        // Draining staged bytes makes room for the rest
        for _ in 0..8 {
            transport.read_byte().unwrap();
        }
        assert_eq!(transport.bytes_available().unwrap(), 8);
    }

    #[test]
    fn test_read_byte_preserves_order() {
        let mut transport: IoTransport<_, 4> =
            IoTransport::new(FakePort::with_rx(&[0xFF, 0xFE, 0xFD, 0xFC, 0xFB]));
        transport.bytes_available().unwrap();
        let mut seen = Vec::<u8, 8>::new();
        for _ in 0..5 {
            seen.push(transport.read_byte().unwrap()).unwrap();
        }
        assert_eq!(&seen[..], &[0xFF, 0xFE, 0xFD, 0xFC, 0xFB]);
    }

    #[test]
    fn test_write_and_flush_reach_port() {
        let mut transport: IoTransport<_, 4> = IoTransport::new(FakePort::with_rx(&[]));
        transport.write(&[0xEF, 0xEF, 0xEF]).unwrap();
        transport.flush().unwrap();
        let port = transport.into_inner();
        assert_eq!(&port.tx[..], &[0xEF, 0xEF, 0xEF]);
        assert_eq!(port.flushes, 1);
    }
}
