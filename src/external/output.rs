use crate::consts;
use crate::core::ram::DisplayBuffer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const OFF: Color = Color::RGB(0, 0, 0);
const ON: Color = Color::RGB(0, 255, 0);

pub struct DisplayDriver {
    pub screen: Canvas<Window>,
    scale: u32,
}

impl DisplayDriver {
    pub fn new(context: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = context
            .video()
            .map_err(|e| format!("could not obtain video context: {e}"))?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                consts::CHIP8_WIDTH as u32 * scale,
                consts::CHIP8_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        canvas.set_draw_color(OFF);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            scale,
        })
    }

    pub fn draw(&mut self, display: &DisplayBuffer) -> Result<(), String> {
        self.screen.set_draw_color(OFF);
        self.screen.clear();
        self.screen.set_draw_color(ON);
        for (p, &pixel) in display.as_bytes().iter().enumerate() {
            if pixel == 0 {
                continue;
            }
            let i = (p % consts::CHIP8_WIDTH) as u32 * self.scale;
            let j = (p / consts::CHIP8_WIDTH) as u32 * self.scale;
            self.screen
                .fill_rect(Rect::new(i as i32, j as i32, self.scale, self.scale))?;
        }
        self.screen.present();
        Ok(())
    }
}
