use crate::consts;
use crate::core::error::Chip8Error;

/// Fixed-capacity return address stack.
#[derive(Debug, Default)]
pub struct CallStack {
    pub entries: [u16; consts::STACK_SIZE],
    pub depth: usize,
}

impl CallStack {
    pub fn push(&mut self, address: u16) -> Result<(), Chip8Error> {
        let slot = self
            .entries
            .get_mut(self.depth)
            .ok_or(Chip8Error::StackOverflow {
                capacity: consts::STACK_SIZE,
            })?;
        *slot = address;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.depth == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(std::mem::take(&mut self.entries[self.depth]))
    }

    pub fn clear(&mut self) {
        *self = CallStack::default();
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}
