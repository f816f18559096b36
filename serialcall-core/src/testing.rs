//! In-memory transport and clock for unit tests

use core::cell::Cell;

use heapless::{Deque, Vec};
use serialcall_hal::{Clock, Transport, UartConfig};

const CAPACITY: usize = 512;

/// Transport error raised when writes are set to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDown;

/// Transport fed from a byte script, capturing everything written
pub struct ScriptedTransport {
    rx: Deque<u8, CAPACITY>,
    late: Deque<u8, CAPACITY>,
    tx: Vec<u8, CAPACITY>,
    reads: usize,
    flushes: usize,
    opened: Option<UartConfig>,
    opens: usize,
    not_ready_polls: usize,
    fail_writes: bool,
}

impl ScriptedTransport {
    pub fn with_rx(bytes: &[u8]) -> Self {
        let mut transport = Self {
            rx: Deque::new(),
            late: Deque::new(),
            tx: Vec::new(),
            reads: 0,
            flushes: 0,
            opened: None,
            opens: 0,
            not_ready_polls: 0,
            fail_writes: false,
        };
        transport.push_rx(bytes);
        transport
    }

    /// Append bytes that are available immediately
    pub fn push_rx(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).unwrap();
        }
    }

    /// Append bytes that arrive one per availability poll
    pub fn trickle(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.late.push_back(b).unwrap();
        }
    }

    /// Report not ready for the first `polls` readiness checks
    pub fn not_ready_for(&mut self, polls: usize) {
        self.not_ready_polls = polls;
    }

    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Bytes read so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Bytes still waiting to be read
    pub fn pending(&self) -> usize {
        self.rx.len() + self.late.len()
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn opened(&self) -> Option<UartConfig> {
        self.opened
    }

    /// Times `open` was called
    pub fn opens(&self) -> usize {
        self.opens
    }
}

impl Transport for ScriptedTransport {
    type Error = LinkDown;

    fn open(&mut self, config: &UartConfig) -> Result<(), LinkDown> {
        self.opened = Some(*config);
        self.opens += 1;
        Ok(())
    }

    fn is_ready(&mut self) -> bool {
        if self.not_ready_polls > 0 {
            self.not_ready_polls -= 1;
            return false;
        }
        true
    }

    fn bytes_available(&mut self) -> Result<usize, LinkDown> {
        if let Some(b) = self.late.pop_front() {
            self.rx.push_back(b).unwrap();
        }
        Ok(self.rx.len())
    }

    fn read_byte(&mut self) -> Result<u8, LinkDown> {
        self.reads += 1;
        Ok(self.rx.pop_front().expect("read with nothing available"))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), LinkDown> {
        if self.fail_writes {
            return Err(LinkDown);
        }
        self.tx.extend_from_slice(data).unwrap();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkDown> {
        self.flushes += 1;
        Ok(())
    }
}

/// Clock that advances by a fixed step every time it is read
pub struct SteppingClock {
    now: Cell<u32>,
    step: u32,
}

impl SteppingClock {
    pub fn new(step: u32) -> Self {
        Self::starting_at(0, step)
    }

    pub fn starting_at(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}
