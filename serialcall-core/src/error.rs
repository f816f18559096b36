//! Cycle outcomes and failure taxonomy
//!
//! Protocol failures never surface as `Err`: a cycle either completes,
//! aborts silently, or is rejected with the error signal on the wire.
//! Only transport I/O errors propagate.

use serialcall_protocol::FunctionType;

/// Read phase that ran out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Start marker, command, length
    Header,
    /// Repeated header fields, payload, footer
    Body,
    /// All-bytes-written marker
    Terminator,
}

/// Failures that end a cycle without writing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Abort {
    /// Sync probe did not match
    BadSync,
    /// First header byte was not the start-of-request marker
    BadStartMarker,
    /// Byte after the body was not the all-bytes-written marker
    BadTerminator,
}

/// Failures answered with the error signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Too few bytes arrived before the deadline
    Timeout(Phase),
    /// Declared length exceeds the cycle buffer
    LengthOverflow,
    /// Footer does not match the body
    InvalidChecksum,
    /// Repeated command or length differs from the header
    HeaderMismatch,
    /// Argument windows run past the declared payload
    ArgumentOverflow,
    /// Signature declares more arguments than can be sliced
    TooManyArguments,
    /// No function registered for the command
    UnknownCommand,
}

/// Result of one protocol cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Nothing was written
    Aborted(Abort),
    /// The error signal was written
    Rejected(Fault),
    /// Protocol version reply was written
    Handshake,
    /// A registered function ran and its result was written
    Completed {
        command_id: u8,
        returns: FunctionType,
    },
}

impl CycleOutcome {
    /// Whether a response other than the error signal went out
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CycleOutcome::Handshake | CycleOutcome::Completed { .. }
        )
    }
}

/// Internal stop reason threaded through the stages with `?`
#[derive(Debug)]
pub(crate) enum Stop<E> {
    Io(E),
    Abort(Abort),
    Fault(Fault),
}

impl<E> From<Abort> for Stop<E> {
    fn from(abort: Abort) -> Self {
        Stop::Abort(abort)
    }
}

impl<E> From<Fault> for Stop<E> {
    fn from(fault: Fault) -> Self {
        Stop::Fault(fault)
    }
}

/// Lift transport errors into [`Stop`]
pub(crate) trait IoResultExt<T, E> {
    fn io(self) -> Result<T, Stop<E>>;
}

impl<T, E> IoResultExt<T, E> for Result<T, E> {
    fn io(self) -> Result<T, Stop<E>> {
        self.map_err(Stop::Io)
    }
}
