use std::error::Error;
use std::thread;
use std::time::Instant;

use chip8vm::config::Config;
use chip8vm::core::timer::TickClock;
use chip8vm::core::{Chip8Error, CycleStatus, Processor};
use chip8vm::external::input::{HostEvent, KeyboardDriver};
use chip8vm::external::output::DisplayDriver;
use clap::Parser;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = Config::parse();

    let quirks = config.quirks();
    let mut chip8 = match config.seed {
        Some(seed) => Processor::with_seed(quirks, seed),
        None => Processor::new(quirks),
    };
    chip8.load_rom(&config.rom)?;

    let context = sdl2::init()?;
    let mut display = DisplayDriver::new(&context, config.scale)?;
    let mut keyboard = KeyboardDriver::new(&context)?;

    let frame = config.frame_duration();
    let mut next_frame = Instant::now() + frame;
    let mut sounding = false;
    let mut clock = TickClock::default();
    let mut last_tick = Instant::now();

    'running: loop {
        for event in keyboard.poll() {
            match event {
                HostEvent::Quit => break 'running,
                HostEvent::KeyDown(key) => chip8.on_key_down(key),
                HostEvent::KeyUp(key) => chip8.on_key_up(key),
            }
        }

        if let Err(e) = run_frame(&mut chip8, &config) {
            log::error!("halting at {:#05X}: {}", chip8.pc(), e);
            return Err(e.into());
        }

        // the host only edge-detects the tone, it does not synthesise one
        let tone = chip8.is_sounding();
        if tone != sounding {
            log::debug!("tone {}", if tone { "on" } else { "off" });
            sounding = tone;
        }
        let now = Instant::now();
        for _ in 0..clock.advance(now - last_tick) {
            chip8.countdown();
        }
        last_tick = now;
        display.draw(chip8.display_buffer())?;

        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
            next_frame += frame;
        } else {
            next_frame = now + frame;
        }
    }
    Ok(())
}

/// Run one frame's worth of instructions. A draw ends the frame early so
/// the sprite is shown before the program moves on, unless it collided and
/// the host was asked to keep going in that case.
fn run_frame(chip8: &mut Processor, config: &Config) -> Result<(), Chip8Error> {
    if !chip8.is_rom_loaded() {
        return Ok(());
    }
    for _ in 0..config.instructions_per_frame() {
        let code = chip8.fetch_code()?;
        if chip8.execute_code(code)? == CycleStatus::Waiting {
            break;
        }
        if Processor::is_draw_code(code)
            && !(chip8.is_sprites_overlapped() && config.skip_on_collision)
        {
            break;
        }
    }
    Ok(())
}
