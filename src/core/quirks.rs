/// Switches selecting between historically divergent opcode semantics.
///
/// Each flag is read at the moment the affected instruction executes, so
/// changes made between two `execute_code` calls apply to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY1`/`8XY2`/`8XY3` clear VF after the logic operation.
    pub reset_vf: bool,
    /// `8XY6`/`8XYE` shift VY into VX instead of shifting VX in place.
    pub shift_uses_vy: bool,
    /// `FX55`/`FX65` leave I pointing past the last transferred register.
    pub increment_index: bool,
    /// `BNNN` behaves as `BXNN`, adding VX rather than V0.
    pub jump_uses_vx: bool,
}

impl Quirks {
    /// Behaviour of the original COSMAC VIP interpreter.
    pub fn cosmac_vip() -> Self {
        Quirks {
            reset_vf: true,
            shift_uses_vy: true,
            increment_index: true,
            jump_uses_vx: false,
        }
    }

    /// Behaviour of the HP48 SUPER-CHIP interpreters.
    pub fn super_chip() -> Self {
        Quirks {
            reset_vf: false,
            shift_uses_vy: false,
            increment_index: false,
            jump_uses_vx: true,
        }
    }
}
