//! Board-agnostic engine that serves remote function calls
//!
//! Each call to [`Engine::run_cycle`] walks one request through four
//! stages and writes exactly one response (or nothing, for silent aborts):
//!
//! - [`link::sync`] - blocking wait for the sync probe
//! - [`link::reader`] - deadline-bounded header, body and terminator reads
//! - [`integrity`] - footer and repeated-field check
//! - [`dispatch`] - handshake reply, or registry lookup, argument slicing,
//!   invocation and return marshaling
//!
//! No state survives a cycle except the transport itself.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod integrity;
pub mod link;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, EngineConfig};
pub use dispatch::{Arguments, Callable, CommandTable, Function, Handler, Registry, Signature};
pub use engine::Engine;
pub use error::{Abort, CycleOutcome, Fault, Phase};
