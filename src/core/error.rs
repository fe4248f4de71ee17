use std::io;
use std::path::PathBuf;

/// Reasons a ROM image could not be placed in memory.
#[derive(Debug, thiserror::Error)]
pub enum RomLoadError {
    #[error("could not read ROM {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    TooLarge { size: usize, max_size: usize },
}

/// Errors surfaced by the virtual machine. None of them are retried
/// internally; the driver decides whether to halt, reset or continue.
#[derive(Debug, thiserror::Error)]
pub enum Chip8Error {
    #[error(transparent)]
    RomLoad(#[from] RomLoadError),

    #[error("stack overflow: call depth exceeds {capacity} entries")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: attempted to return from a subroutine with empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("unknown opcode: {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },
}
