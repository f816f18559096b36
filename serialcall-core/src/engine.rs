//! Protocol engine
//!
//! Owns the transport, clock and registry, and runs one request per
//! [`Engine::run_cycle`] call. The caller loops forever:
//!
//! ```ignore
//! engine.setup()?;
//! loop {
//!     let outcome = engine.run_cycle()?;
//! }
//! ```

use core::hint::spin_loop;

use serialcall_hal::{Clock, Transport, UartConfig};
use serialcall_protocol::wire::{CMD_HANDSHAKE_INITIATE, ERROR_SIGNAL};

use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::{ArgumentError, Arguments, Registry, ResponseBuffer};
use crate::error::{CycleOutcome, Fault, IoResultExt, Stop};
use crate::integrity;
use crate::link::reader::{read_request, CycleBuffer};
use crate::link::sync;

/// Request/response engine
pub struct Engine<T, C, R> {
    transport: T,
    clock: C,
    registry: R,
    config: EngineConfig,
    ready: bool,
}

impl<T, C, R> Engine<T, C, R>
where
    T: Transport,
    C: Clock,
    R: Registry,
{
    /// Create an engine; the transport is not touched until [`Self::setup`]
    pub fn new(
        transport: T,
        clock: C,
        registry: R,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transport,
            clock,
            registry,
            config,
            ready: false,
        })
    }

    /// Open the transport at the configured baud rate and wait until ready
    ///
    /// Calling it again after success does nothing.
    pub fn setup(&mut self) -> Result<(), T::Error> {
        if self.ready {
            return Ok(());
        }
        self.transport
            .open(&UartConfig::with_baudrate(self.config.baud_rate))?;
        while !self.transport.is_ready() {
            spin_loop();
        }
        self.ready = true;

        #[cfg(feature = "defmt")]
        defmt::info!("serialcall link open at {} baud", self.config.baud_rate);
        Ok(())
    }

    pub fn is_setup(&self) -> bool {
        self.ready
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Take the engine apart
    pub fn release(self) -> (T, C, R) {
        (self.transport, self.clock, self.registry)
    }

    /// Serve one request
    ///
    /// Blocks until a sync probe arrives. Protocol failures are reported in
    /// the outcome; only transport errors are returned as `Err`.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, T::Error> {
        self.setup()?;

        match self.cycle() {
            Ok(outcome) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("cycle done: {}", outcome);
                Ok(outcome)
            }
            Err(Stop::Io(e)) => Err(e),
            Err(Stop::Abort(abort)) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("cycle aborted: {}", abort);
                Ok(CycleOutcome::Aborted(abort))
            }
            Err(Stop::Fault(fault)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("cycle rejected: {}", fault);
                self.transport.write(&ERROR_SIGNAL)?;
                self.transport.flush()?;
                Ok(CycleOutcome::Rejected(fault))
            }
        }
    }

    fn cycle(&mut self) -> Result<CycleOutcome, Stop<T::Error>> {
        sync::acquire(&mut self.transport)?;
        let buffer = read_request(&mut self.transport, &self.clock, &self.config)?;
        integrity::verify(&buffer)?;
        self.dispatch(&buffer)
    }

    fn dispatch(&mut self, buffer: &CycleBuffer) -> Result<CycleOutcome, Stop<T::Error>> {
        let command_id = buffer.header().command_id;

        if command_id == CMD_HANDSHAKE_INITIATE {
            self.send(&ResponseBuffer::handshake())?;
            return Ok(CycleOutcome::Handshake);
        }

        let long = self.config.long_width;
        let callable = self
            .registry
            .resolve(command_id)
            .ok_or(Fault::UnknownCommand)?;
        let signature = callable.signature();
        let args = Arguments::parse(signature.args, buffer.payload(), long).map_err(|e| match e {
            ArgumentError::Overflow => Fault::ArgumentOverflow,
            ArgumentError::TooMany => Fault::TooManyArguments,
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("invoking command {=u8:#x} ({} args)", command_id, args.len());

        let value = callable.invoke(&args);
        self.send(&ResponseBuffer::result(signature.returns, value, long))?;

        Ok(CycleOutcome::Completed {
            command_id,
            returns: signature.returns,
        })
    }

    fn send(&mut self, response: &ResponseBuffer) -> Result<(), Stop<T::Error>> {
        self.transport.write(response.as_bytes()).io()?;
        self.transport.flush().io()
    }
}
