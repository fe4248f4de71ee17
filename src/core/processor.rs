use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts;
use crate::core::error::Chip8Error;
use crate::core::instruction::{Instruction, Reg};
use crate::core::quirks::Quirks;
use crate::core::ram::{DisplayBuffer, Keypad, Ram};
use crate::core::rom::Rom;
use crate::core::stack::CallStack;
use crate::core::timer::Timers;
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    RedrawScreen,
    Continue,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Running,
    /// Parked on the wait-for-key instruction at `address` until a
    /// key-down arrives.
    AwaitingKey { register: Reg, address: u16 },
}

/// Where the program counter goes once an instruction has run.
enum ProgramCounter {
    Next,
    Skip,
    Stay,
    Jump(u16),
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> Self {
        if condition {
            ProgramCounter::Skip
        } else {
            ProgramCounter::Next
        }
    }
}

/// The CHIP-8 virtual machine. It owns all of its state; hosts read the
/// display and sound timer and feed key events and ROM images back in.
#[derive(Debug)]
pub struct Processor {
    pub(crate) stack: CallStack,
    pub(crate) registers: [u8; consts::REG_COUNT],
    pub(crate) idx_register: u16,
    pub(crate) pc: u16,
    pub(crate) timers: Timers,
    pub(crate) ram: Ram,
    pub(crate) display_buffer: DisplayBuffer,
    pub(crate) keypad: Keypad,
    quirks: Quirks,
    state: ExecutionState,
    rom_loaded: bool,
    rng: StdRng,
}

impl Processor {
    pub fn new(quirks: Quirks) -> Self {
        Processor::with_rng(quirks, StdRng::from_entropy())
    }

    /// Build a machine whose random opcode output is reproducible.
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Processor::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        let mut processor = Processor {
            stack: CallStack::default(),
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            timers: Timers::default(),
            ram: Ram::default(),
            display_buffer: DisplayBuffer::default(),
            keypad: Keypad::default(),
            quirks,
            state: ExecutionState::Running,
            rom_loaded: false,
            rng,
        };
        processor.reset();
        processor
    }

    /// Return to power-on state: fonts in low memory, everything else
    /// zeroed and the program counter on the entry address. Any loaded
    /// ROM is wiped along with the rest of memory.
    pub fn reset(&mut self) {
        self.ram.clear();
        self.ram.buffer[consts::FONT_OFFSET..consts::FONT_OFFSET + consts::FONT_SET_SIZE]
            .copy_from_slice(&consts::FONT_SET);
        self.registers = [0; consts::REG_COUNT];
        self.idx_register = 0;
        self.pc = consts::PROG_OFFSET as u16;
        self.stack.clear();
        self.timers = Timers::default();
        self.display_buffer.clear();
        self.keypad.clear();
        self.state = ExecutionState::Running;
        self.rom_loaded = false;
        log::info!("machine reset, entry point {:#05X}", self.pc);
    }

    /// Read a ROM file and copy it to the entry address. On failure memory
    /// is left as it was.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Chip8Error> {
        let rom = Rom::new(path)?;
        self.load_rom_image(&rom)
    }

    /// Copy an already read ROM to the entry address. Registers and the
    /// program counter are not touched.
    pub fn load_rom_image(&mut self, rom: &Rom) -> Result<(), Chip8Error> {
        self.ram.write(consts::PROG_OFFSET, &rom.buffer)?;
        self.rom_loaded = true;
        log::info!("loaded {} byte ROM at {:#05X}", rom.len(), consts::PROG_OFFSET);
        Ok(())
    }

    pub fn is_rom_loaded(&self) -> bool {
        self.rom_loaded
    }

    /// Read the big-endian opcode under the program counter.
    pub fn fetch_code(&self) -> Result<u16, Chip8Error> {
        self.ram.read_word(self.pc as usize)
    }

    /// Fetch and execute a single opcode.
    pub fn cycle(&mut self) -> Result<CycleStatus, Chip8Error> {
        let code = self.fetch_code()?;
        self.execute_code(code)
    }

    pub fn execute_code(&mut self, code: u16) -> Result<CycleStatus, Chip8Error> {
        let instruction = Instruction::decode(code)?;
        log::trace!("{:#05X}: {:04X} {:?}", self.pc, code, instruction);

        // Anything other than re-running the parked instruction abandons the wait.
        if let ExecutionState::AwaitingKey { register, address } = self.state {
            let resuming = address == self.pc
                && matches!(instruction, Instruction::WaitKey { x } if x == register);
            if !resuming {
                self.abandon_wait();
            }
        }

        let mut status = CycleStatus::Continue;
        let next = match instruction {
            // Clears screen
            Instruction::ClearScreen => {
                self.display_buffer.clear();
                status = CycleStatus::RedrawScreen;
                ProgramCounter::Next
            }

            // Subroutines: enter and exit
            Instruction::Return => ProgramCounter::Jump(self.stack.pop()?),
            Instruction::Call { nnn } => {
                let target = Processor::jump_target(nnn as usize)?;
                self.stack.push(self.pc.wrapping_add(consts::OP_CODE_BYTES as u16))?;
                ProgramCounter::Jump(target)
            }

            // Jumps
            Instruction::Jump { nnn } => ProgramCounter::Jump(Processor::jump_target(nnn as usize)?),
            Instruction::JumpOffset { x, nnn } => {
                let reg = if self.quirks.jump_uses_vx { x } else { 0 };
                let address = nnn as usize + self.registers[reg] as usize;
                ProgramCounter::Jump(Processor::jump_target(address)?)
            }

            // Conditional skips
            Instruction::SkipEqImm { x, nn } => ProgramCounter::skip_if(self.registers[x] == nn),
            Instruction::SkipNeImm { x, nn } => ProgramCounter::skip_if(self.registers[x] != nn),
            Instruction::SkipEqReg { x, y } => {
                ProgramCounter::skip_if(self.registers[x] == self.registers[y])
            }
            Instruction::SkipNeReg { x, y } => {
                ProgramCounter::skip_if(self.registers[x] != self.registers[y])
            }

            // Set register
            Instruction::LoadImm { x, nn } => {
                self.registers[x] = nn;
                ProgramCounter::Next
            }
            Instruction::LoadReg { x, y } => {
                self.registers[x] = self.registers[y];
                ProgramCounter::Next
            }
            Instruction::LoadIndex { nnn } => {
                self.idx_register = nnn;
                ProgramCounter::Next
            }

            // Add/subtract instructions
            Instruction::AddImm { x, nn } => {
                self.registers[x] = self.registers[x].wrapping_add(nn);
                ProgramCounter::Next
            }
            Instruction::AddReg { x, y } => {
                let (sum, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.set_with_flag(x, sum, carry);
                ProgramCounter::Next
            }
            Instruction::SubReg { x, y } => {
                let (diff, borrow) = self.registers[x].overflowing_sub(self.registers[y]);
                self.set_with_flag(x, diff, !borrow);
                ProgramCounter::Next
            }
            Instruction::SubNeg { x, y } => {
                let (diff, borrow) = self.registers[y].overflowing_sub(self.registers[x]);
                self.set_with_flag(x, diff, !borrow);
                ProgramCounter::Next
            }

            // Logical instructions
            Instruction::Or { x, y } => {
                self.registers[x] |= self.registers[y];
                self.logic_flag_quirk();
                ProgramCounter::Next
            }
            Instruction::And { x, y } => {
                self.registers[x] &= self.registers[y];
                self.logic_flag_quirk();
                ProgramCounter::Next
            }
            Instruction::Xor { x, y } => {
                self.registers[x] ^= self.registers[y];
                self.logic_flag_quirk();
                ProgramCounter::Next
            }

            // Shifting instructions
            Instruction::ShiftRight { x, y } => {
                let source = self.shift_source(x, y);
                self.set_with_flag(x, source >> 1, source & 0b0000_0001 != 0);
                ProgramCounter::Next
            }
            Instruction::ShiftLeft { x, y } => {
                let source = self.shift_source(x, y);
                self.set_with_flag(x, source << 1, source & 0b1000_0000 != 0);
                ProgramCounter::Next
            }

            // Generate randomness
            Instruction::Random { x, nn } => {
                let rand_val: u8 = self.rng.gen();
                self.registers[x] = nn & rand_val;
                ProgramCounter::Next
            }

            // Draw on display
            Instruction::Draw { x, y, n } => {
                let sprite = self.ram.read(self.idx_register as usize, n as usize)?;
                let collision = self.display_buffer.draw_sprite(
                    self.registers[x] as usize,
                    self.registers[y] as usize,
                    sprite,
                );
                self.registers[consts::FLAG_REGISTER] = collision as u8;
                status = CycleStatus::RedrawScreen;
                ProgramCounter::Next
            }

            // Skip on keypress
            Instruction::SkipKeyPressed { x } => {
                ProgramCounter::skip_if(self.keypad.is_pressed(self.registers[x]))
            }
            Instruction::SkipKeyNotPressed { x } => {
                ProgramCounter::skip_if(!self.keypad.is_pressed(self.registers[x]))
            }

            // Halt till key press
            Instruction::WaitKey { x } => match self.state {
                ExecutionState::Running => {
                    self.keypad.forget_presses();
                    self.state = ExecutionState::AwaitingKey {
                        register: x,
                        address: self.pc,
                    };
                    log::debug!("waiting for key into V{:X}", x);
                    status = CycleStatus::Waiting;
                    ProgramCounter::Stay
                }
                ExecutionState::AwaitingKey { .. } => match self.keypad.take_press() {
                    Some(key) => {
                        self.registers[x] = key;
                        self.state = ExecutionState::Running;
                        log::debug!("captured key {:X} into V{:X}", key, x);
                        ProgramCounter::Next
                    }
                    None => {
                        status = CycleStatus::Waiting;
                        ProgramCounter::Stay
                    }
                },
            },

            // Change timers (delay/sound)
            Instruction::LoadDelay { x } => {
                self.registers[x] = self.timers.delay;
                ProgramCounter::Next
            }
            Instruction::SetDelay { x } => {
                self.timers.delay = self.registers[x];
                ProgramCounter::Next
            }
            Instruction::SetSound { x } => {
                self.timers.sound = self.registers[x];
                ProgramCounter::Next
            }

            // Update index register. VF is left alone on overflow.
            Instruction::AddIndex { x } => {
                self.idx_register = self.idx_register.wrapping_add(self.registers[x] as u16);
                ProgramCounter::Next
            }

            // Point index to font character
            Instruction::LoadFont { x } => {
                let glyph = (self.registers[x] & 0x0F) as usize;
                self.idx_register = (consts::FONT_OFFSET + glyph * consts::FONT_GLYPH_BYTES) as u16;
                ProgramCounter::Next
            }

            // Binary byte to decimal digits
            Instruction::StoreBcd { x } => {
                let num = self.registers[x];
                let digits = [num / 100, (num % 100) / 10, num % 10];
                self.ram.write(self.idx_register as usize, &digits)?;
                ProgramCounter::Next
            }

            // Store and load memory
            Instruction::StoreRegs { x } => {
                self.ram
                    .write(self.idx_register as usize, &self.registers[..=x])?;
                self.block_transfer_quirk(x);
                ProgramCounter::Next
            }
            Instruction::LoadRegs { x } => {
                let bytes = self.ram.read(self.idx_register as usize, x + 1)?;
                self.registers[..=x].copy_from_slice(bytes);
                self.block_transfer_quirk(x);
                ProgramCounter::Next
            }
        };

        self.pc = match next {
            ProgramCounter::Next => self.pc.wrapping_add(consts::OP_CODE_BYTES as u16),
            ProgramCounter::Skip => self.pc.wrapping_add(2 * consts::OP_CODE_BYTES as u16),
            ProgramCounter::Stay => self.pc,
            ProgramCounter::Jump(address) => address,
        };
        Ok(status)
    }

    /// Decrement both timers by one. Call at 60 Hz.
    pub fn countdown(&mut self) {
        self.timers.countdown();
    }

    pub fn on_key_down(&mut self, key: u8) {
        self.keypad.press(key);
    }

    pub fn on_key_up(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn is_draw_code(code: u16) -> bool {
        Instruction::is_draw(code)
    }

    /// True when the last sprite draw turned off a lit pixel.
    pub fn is_sprites_overlapped(&self) -> bool {
        self.registers[consts::FLAG_REGISTER] == 1
    }

    pub fn display_buffer(&self) -> &DisplayBuffer {
        &self.display_buffer
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// True while the host should be playing the tone.
    pub fn is_sounding(&self) -> bool {
        self.timers.is_sounding()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    /// Read V`x`. Only the low nibble of `x` selects the register in
    /// release builds; debug builds reject indices above 0xF.
    pub fn register(&self, x: Reg) -> u8 {
        debug_assert!(x < consts::REG_COUNT, "no register V{:X}", x);
        self.registers[x & 0xF]
    }

    /// Write V`x`, with the same indexing rule as `register`.
    pub fn set_register(&mut self, x: Reg, value: u8) {
        debug_assert!(x < consts::REG_COUNT, "no register V{:X}", x);
        self.registers[x & 0xF] = value;
    }

    pub fn index(&self) -> u16 {
        self.idx_register
    }

    pub fn set_index(&mut self, value: u16) {
        self.idx_register = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Move the program counter. A pending wait-for-key is abandoned.
    pub fn set_pc(&mut self, value: u16) {
        self.abandon_wait();
        self.pc = value;
    }

    pub fn memory(&self) -> &Ram {
        &self.ram
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        log::debug!("quirks set to {:?}", quirks);
        self.quirks = quirks;
    }

    pub fn reset_vf(&self) -> bool {
        self.quirks.reset_vf
    }

    pub fn set_reset_vf(&mut self, value: bool) {
        self.set_quirks(Quirks {
            reset_vf: value,
            ..self.quirks
        });
    }

    pub fn shift_uses_vy(&self) -> bool {
        self.quirks.shift_uses_vy
    }

    pub fn set_shift_uses_vy(&mut self, value: bool) {
        self.set_quirks(Quirks {
            shift_uses_vy: value,
            ..self.quirks
        });
    }

    pub fn increment_index(&self) -> bool {
        self.quirks.increment_index
    }

    pub fn set_increment_index(&mut self, value: bool) {
        self.set_quirks(Quirks {
            increment_index: value,
            ..self.quirks
        });
    }

    pub fn jump_uses_vx(&self) -> bool {
        self.quirks.jump_uses_vx
    }

    pub fn set_jump_uses_vx(&mut self, value: bool) {
        self.set_quirks(Quirks {
            jump_uses_vx: value,
            ..self.quirks
        });
    }

    fn abandon_wait(&mut self) {
        if let ExecutionState::AwaitingKey { register, address } = self.state {
            log::debug!("abandoned wait for key into V{:X} at {:#05X}", register, address);
            self.state = ExecutionState::Running;
        }
    }

    /// A jump target must leave room for a full opcode fetch. Odd targets
    /// are allowed.
    fn jump_target(address: usize) -> Result<u16, Chip8Error> {
        if !utils::bounds_check(address, consts::OP_CODE_BYTES, consts::RAM_BYTES) {
            return Err(Chip8Error::MemoryOutOfBounds { address });
        }
        Ok(address as u16)
    }

    // VF is written after VX so the flag wins when X is F.
    fn set_with_flag(&mut self, x: Reg, value: u8, flag: bool) {
        self.registers[x] = value;
        self.registers[consts::FLAG_REGISTER] = flag as u8;
    }

    fn shift_source(&self, x: Reg, y: Reg) -> u8 {
        if self.quirks.shift_uses_vy {
            self.registers[y]
        } else {
            self.registers[x]
        }
    }

    fn logic_flag_quirk(&mut self) {
        if self.quirks.reset_vf {
            self.registers[consts::FLAG_REGISTER] = 0;
        }
    }

    fn block_transfer_quirk(&mut self, x: Reg) {
        if self.quirks.increment_index {
            self.idx_register = self.idx_register.wrapping_add(x as u16 + 1);
        }
    }
}
