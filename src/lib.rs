//! CHIP-8 virtual machine.
//!
//! The machine in `core` is a plain synchronous interpreter: the host
//! fetches and executes opcodes at whatever rate it likes, calls
//! `Processor::countdown` at 60 Hz, reads the display buffer and
//! sound timer, and feeds key events back in. The SDL2 host lives in
//! `external` behind the `frontend` feature.

pub mod config;
pub mod consts;
pub mod core;
#[cfg(feature = "frontend")]
pub mod external;
pub mod utils;
