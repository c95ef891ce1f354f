//! Drivers.
//!
//! The machine core only knows these interfaces; the winit/pixels driver
//! module implements them against a real window.

pub mod pixels_driver;
pub mod winit_driver;

pub use self::pixels_driver::PixelsRenderDriver;
pub use self::winit_driver::{WinitInputDriver, WinitWindowDriver};

use crate::emulator::Emulator;
use crate::errors::CResult;
use crate::peripherals::input::InputState;

/// Render scale (host pixels per CHIP-8 pixel).
pub const RENDER_SCALE: usize = 10;
/// Window width.
pub const WINDOW_WIDTH: u32 = 640;
/// Window height.
pub const WINDOW_HEIGHT: u32 = 320;
/// Window title.
pub const WINDOW_TITLE: &str = "CHIP-8 Studio";

/// Window interface.
pub trait WindowInterface {
    /// Run the emulator inside the host window loop.
    fn run_emulator(&mut self, emulator: Emulator) -> CResult;
}

/// Input interface.
pub trait InputInterface {
    /// Refresh the input state from pending host events.
    fn update_input_state(&mut self, state: &mut InputState);
}

/// Render interface.
pub trait RenderInterface {
    /// Render one logical pixel.
    fn render_pixel(
        &mut self,
        x: usize,
        y: usize,
        scale: usize,
        on: bool,
        frame_width: usize,
    ) -> CResult;
}
