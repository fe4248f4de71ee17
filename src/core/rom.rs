use std::fs;
use std::path::Path;

use crate::consts;
use crate::core::error::RomLoadError;

/// A program image ready to be copied to the entry address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Rom {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, RomLoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| RomLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Rom::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RomLoadError> {
        if data.len() > consts::MAX_ROM_BYTES {
            return Err(RomLoadError::TooLarge {
                size: data.len(),
                max_size: consts::MAX_ROM_BYTES,
            });
        }
        Ok(Rom { buffer: data })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
