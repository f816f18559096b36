//! Serialcall Hardware Abstraction Layer
//!
//! This crate defines the two collaborators the protocol engine needs from
//! the board: a byte transport and a monotonic millisecond clock. Chip
//! specific code implements these traits; the engine never touches a
//! peripheral directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  serialcall-core (engine, dispatcher)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serialcall-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  IoTransport  │       │  board clock  │
//! │ (embedded-io) │       │ (embassy-time)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Byte-oriented serial link with an available count
//! - [`clock::Clock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod io;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_ms, Clock};
pub use io::IoTransport;
pub use transport::{DataBits, Parity, StopBits, Transport, UartConfig};
