//! Command dispatch
//!
//! - [`registry`] - the callable and registry seams, plus a fixed-capacity table
//! - [`args`] - bounds-checked argument windows over the payload
//! - [`marshal`] - handshake reply and typed return serialization

pub mod args;
pub mod marshal;
pub mod registry;

pub use args::{ArgumentError, Arguments};
pub use marshal::ResponseBuffer;
pub use registry::{Callable, CommandTable, Function, Handler, Registry, RegistryError, Signature};
