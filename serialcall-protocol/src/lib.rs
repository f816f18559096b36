//! Serialcall Wire Protocol
//!
//! This crate defines the byte-exact protocol a host uses to call functions
//! on a microcontroller over a serial link. The device side lives in
//! `serialcall-core`; this crate holds everything both ends must agree on.
//!
//! # Protocol Overview
//!
//! One call is a strict request/response exchange:
//! ```text
//!  host                                   device
//!  FF FE FD FC                  ──────▶   sync probe
//!                               ◀──────   FC FD FE FF
//!  FB <cmd> <len>               ──────▶   header
//!                               ◀──────   <len> <cmd> FB
//!  <cmd> <len> <payload> c0 c1  ──────▶   body (len + 4 bytes)
//!  FA                           ──────▶   terminator
//!                               ◀──────   F9 <size> <bytes..> | F9 FC | EF EF EF
//! ```
//!
//! The body repeats the command and length so a header/body split caused by
//! line corruption is caught, and ends in a Fletcher-16 complement footer.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod checksum;
pub mod frame;
pub mod response;
pub mod types;
pub mod wire;

pub use checksum::{fletcher16, footer};
pub use frame::{check_body, FrameError, RequestFrame, MAX_ARGS, MAX_BODY_SIZE, MAX_PAYLOAD_SIZE};
pub use response::{Response, ResponseError};
pub use types::{FunctionType, LongWidth, Value, MAX_VALUE_WIDTH};
