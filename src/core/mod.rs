pub mod error;
pub mod instruction;
pub mod processor;
pub mod quirks;
pub mod ram;
pub mod rom;
pub mod stack;
pub mod timer;

pub use error::{Chip8Error, RomLoadError};
pub use processor::{CycleStatus, ExecutionState, Processor};
pub use quirks::Quirks;
