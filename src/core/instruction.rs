use crate::core::error::Chip8Error;
use crate::utils;

/// Index of a general purpose register, 0x0..=0xF.
pub type Reg = usize;

/// One decoded CHIP-8 instruction. Field names follow the usual nibble
/// naming: `x`/`y` are register indices, `nn` an 8-bit immediate and `nnn`
/// a 12-bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Return,
    Jump { nnn: u16 },
    Call { nnn: u16 },
    SkipEqImm { x: Reg, nn: u8 },
    SkipNeImm { x: Reg, nn: u8 },
    SkipEqReg { x: Reg, y: Reg },
    LoadImm { x: Reg, nn: u8 },
    AddImm { x: Reg, nn: u8 },
    LoadReg { x: Reg, y: Reg },
    Or { x: Reg, y: Reg },
    And { x: Reg, y: Reg },
    Xor { x: Reg, y: Reg },
    AddReg { x: Reg, y: Reg },
    SubReg { x: Reg, y: Reg },
    ShiftRight { x: Reg, y: Reg },
    SubNeg { x: Reg, y: Reg },
    ShiftLeft { x: Reg, y: Reg },
    SkipNeReg { x: Reg, y: Reg },
    LoadIndex { nnn: u16 },
    JumpOffset { x: Reg, nnn: u16 },
    Random { x: Reg, nn: u8 },
    Draw { x: Reg, y: Reg, n: u8 },
    SkipKeyPressed { x: Reg },
    SkipKeyNotPressed { x: Reg },
    LoadDelay { x: Reg },
    WaitKey { x: Reg },
    SetDelay { x: Reg },
    SetSound { x: Reg },
    AddIndex { x: Reg },
    LoadFont { x: Reg },
    StoreBcd { x: Reg },
    StoreRegs { x: Reg },
    LoadRegs { x: Reg },
}

impl Instruction {
    pub fn decode(code: u16) -> Result<Self, Chip8Error> {
        let (opcode, x, y, n) = utils::nibble_split(code);
        let nn = (code & 0x00FF) as u8;
        let nnn = code & 0x0FFF;
        let (x, y) = (x as Reg, y as Reg);

        let instruction = match (opcode, x, y, n) {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Jump { nnn },
            (2, _, _, _) => Instruction::Call { nnn },
            (3, _, _, _) => Instruction::SkipEqImm { x, nn },
            (4, _, _, _) => Instruction::SkipNeImm { x, nn },
            (5, _, _, 0) => Instruction::SkipEqReg { x, y },
            (6, _, _, _) => Instruction::LoadImm { x, nn },
            (7, _, _, _) => Instruction::AddImm { x, nn },
            (8, _, _, 0) => Instruction::LoadReg { x, y },
            (8, _, _, 1) => Instruction::Or { x, y },
            (8, _, _, 2) => Instruction::And { x, y },
            (8, _, _, 3) => Instruction::Xor { x, y },
            (8, _, _, 4) => Instruction::AddReg { x, y },
            (8, _, _, 5) => Instruction::SubReg { x, y },
            (8, _, _, 6) => Instruction::ShiftRight { x, y },
            (8, _, _, 7) => Instruction::SubNeg { x, y },
            (8, _, _, 0xE) => Instruction::ShiftLeft { x, y },
            (9, _, _, 0) => Instruction::SkipNeReg { x, y },
            (0xA, _, _, _) => Instruction::LoadIndex { nnn },
            (0xB, _, _, _) => Instruction::JumpOffset { x, nnn },
            (0xC, _, _, _) => Instruction::Random { x, nn },
            (0xD, _, _, _) => Instruction::Draw { x, y, n },
            (0xE, _, 9, 0xE) => Instruction::SkipKeyPressed { x },
            (0xE, _, 0xA, 1) => Instruction::SkipKeyNotPressed { x },
            (0xF, _, 0, 7) => Instruction::LoadDelay { x },
            (0xF, _, 0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 1, 5) => Instruction::SetDelay { x },
            (0xF, _, 1, 8) => Instruction::SetSound { x },
            (0xF, _, 1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 2, 9) => Instruction::LoadFont { x },
            (0xF, _, 3, 3) => Instruction::StoreBcd { x },
            (0xF, _, 5, 5) => Instruction::StoreRegs { x },
            (0xF, _, 6, 5) => Instruction::LoadRegs { x },
            // 0NNN machine routines are not supported either
            (_, _, _, _) => return Err(Chip8Error::UnknownOpcode { opcode: code }),
        };
        Ok(instruction)
    }

    pub fn is_draw(code: u16) -> bool {
        code & 0xF000 == 0xD000
    }
}
