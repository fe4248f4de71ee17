use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::core::Quirks;

/// Starting point for the quirk switches before individual flags apply.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuirkPreset {
    /// Every quirk off
    #[default]
    None,
    /// COSMAC VIP interpreter
    Vip,
    /// HP48 SUPER-CHIP
    Schip,
}

#[derive(Parser, Debug)]
#[command(
    name = "chip8vm",
    about = "CHIP-8 interpreter",
    version
)]
pub struct Config {
    /// ROM image to run
    pub rom: PathBuf,

    /// Quirk preset applied before the individual quirk flags
    #[arg(long, value_enum, default_value_t = QuirkPreset::None)]
    pub preset: QuirkPreset,

    /// 8XY1/8XY2/8XY3 clear VF
    #[arg(long)]
    pub reset_vf: bool,

    /// 8XY6/8XYE shift VY into VX
    #[arg(long)]
    pub shift_uses_vy: bool,

    /// FX55/FX65 advance I past the transferred registers
    #[arg(long)]
    pub increment_index: bool,

    /// BNNN adds VX instead of V0
    #[arg(long)]
    pub jump_uses_vx: bool,

    /// Keep executing after a draw that collided instead of waiting for the next frame
    #[arg(long)]
    pub skip_on_collision: bool,

    /// Frames per second; timers tick at 60 Hz regardless
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    pub ips: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Seed for the random number opcode
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn quirks(&self) -> Quirks {
        let base = match self.preset {
            QuirkPreset::None => Quirks::default(),
            QuirkPreset::Vip => Quirks::cosmac_vip(),
            QuirkPreset::Schip => Quirks::super_chip(),
        };
        Quirks {
            reset_vf: base.reset_vf || self.reset_vf,
            shift_uses_vy: base.shift_uses_vy || self.shift_uses_vy,
            increment_index: base.increment_index || self.increment_index,
            jump_uses_vx: base.jump_uses_vx || self.jump_uses_vx,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Instructions to run between two timer ticks, at least one.
    pub fn instructions_per_frame(&self) -> u32 {
        (self.ips / self.fps).max(1)
    }
}
