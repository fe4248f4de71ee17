use crate::consts;
use crate::core::error::Chip8Error;
use crate::utils;

#[derive(Debug)]
pub struct Ram {
    pub buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        Ram {
            buffer: [0; consts::RAM_BYTES],
        }
    }
}

impl Ram {
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn read(&self, address: usize, len: usize) -> Result<&[u8], Chip8Error> {
        if !utils::bounds_check(address, len, consts::RAM_BYTES) {
            return Err(Chip8Error::MemoryOutOfBounds { address });
        }
        Ok(&self.buffer[address..address + len])
    }

    /// Copy `data` into memory starting at `address`. Nothing is written
    /// unless the whole range fits.
    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<(), Chip8Error> {
        if !utils::bounds_check(address, data.len(), consts::RAM_BYTES) {
            return Err(Chip8Error::MemoryOutOfBounds { address });
        }
        self.buffer[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn read_word(&self, address: usize) -> Result<u16, Chip8Error> {
        let bytes = self.read(address, consts::OP_CODE_BYTES)?;
        Ok(utils::join_bytes(&[bytes[0], bytes[1]]))
    }
}

/// 64x32 monochrome framebuffer, one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    pub buffer: [[u8; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [[0; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
        }
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [0; consts::CHIP8_WIDTH]);
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[y % consts::CHIP8_HEIGHT][x % consts::CHIP8_WIDTH]
    }

    /// The whole frame as 64-byte rows laid end to end.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_flattened()
    }

    /// XOR an 8-pixel-wide sprite onto the screen with its top-left corner
    /// at (`x`, `y`). Each pixel wraps around the screen edges on its own.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &bits) in sprite.iter().enumerate() {
            let py = (y + row) % consts::CHIP8_HEIGHT;
            for shift_pos in 0..8 {
                let mask = 0x80u8 >> shift_pos;
                if bits & mask == 0 {
                    continue;
                }
                let px = (x + shift_pos) % consts::CHIP8_WIDTH;
                let cell = &mut self.buffer[py][px];
                if *cell == 1 {
                    collision = true;
                }
                *cell ^= 1;
            }
        }
        collision
    }
}

#[derive(Default, Debug)]
pub struct Keypad {
    pub buffer: [bool; consts::KEYBOARD_SIZE],
    latest_press: Option<u8>,
}

impl Keypad {
    pub fn clear(&mut self) {
        *self = Keypad::default();
    }

    /// Record a key-down. Indices outside the hex keypad are ignored.
    pub fn press(&mut self, key: u8) {
        match self.buffer.get_mut(key as usize) {
            Some(state) => {
                *state = true;
                self.latest_press = Some(key);
            }
            None => log::warn!("ignoring key-down for non-existent key {:#X}", key),
        }
    }

    pub fn release(&mut self, key: u8) {
        match self.buffer.get_mut(key as usize) {
            Some(state) => *state = false,
            None => log::warn!("ignoring key-up for non-existent key {:#X}", key),
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.buffer.get(key as usize).copied().unwrap_or(false)
    }

    /// Forget any key-down seen so far.
    pub fn forget_presses(&mut self) {
        self.latest_press = None;
    }

    /// Take the most recent key-down since the last call or `forget_presses`.
    pub fn take_press(&mut self) -> Option<u8> {
        self.latest_press.take()
    }
}
