//! Winit window and input drivers.
//!
//! Hosts the main loop: render the previous frame, refresh input, tick the
//! CPU once, update the debugger, present. The hex keypad maps to the
//! numeric keypad for digits 0-9 and the Q,W,E,R,T,Y row for A-F; other
//! monitored keys flow through the free-key channel.

use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::LogicalSize,
    event::{Event, VirtualKeyCode},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};
use winit_input_helper::WinitInputHelper;

use crate::debugger::Debugger;
use crate::emulator::Emulator;
use crate::errors::CResult;
use crate::peripherals::input::{FreeKeyCode, InputState, INPUT_STATE_COUNT};
use crate::types::C8Byte;

use super::{
    InputInterface, PixelsRenderDriver, RENDER_SCALE, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH,
    WindowInterface,
};

/// Free key toggling the debugger report.
pub const DEBUGGER_TOGGLE_KEY: VirtualKeyCode = VirtualKeyCode::LShift;

// Non-keypad keys forwarded through the free-key channel.
const FREE_KEYS: [VirtualKeyCode; 2] = [VirtualKeyCode::LShift, VirtualKeyCode::RShift];

/// Window driver for winit.
#[derive(Default)]
pub struct WinitWindowDriver;

/// Input driver for winit.
pub struct WinitInputDriver {
    helper: WinitInputHelper,
}

impl Default for WinitInputDriver {
    fn default() -> Self {
        Self {
            helper: WinitInputHelper::new(),
        }
    }
}

impl WinitWindowDriver {
    /// Creates new driver.
    pub fn new() -> Self {
        Default::default()
    }

    fn create_window(&mut self) -> CResult<(EventLoop<()>, Window)> {
        let event_loop = EventLoop::new();
        let size = LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        let window = winit::window::WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?;

        Ok((event_loop, window))
    }
}

impl WinitInputDriver {
    /// Creates new driver.
    pub fn new() -> Self {
        Default::default()
    }

    /// Get helper.
    pub fn helper(&mut self) -> &mut WinitInputHelper {
        &mut self.helper
    }

    fn keypad_binding(key: C8Byte) -> VirtualKeyCode {
        match key {
            0x0 => VirtualKeyCode::Numpad0,
            0x1 => VirtualKeyCode::Numpad1,
            0x2 => VirtualKeyCode::Numpad2,
            0x3 => VirtualKeyCode::Numpad3,
            0x4 => VirtualKeyCode::Numpad4,
            0x5 => VirtualKeyCode::Numpad5,
            0x6 => VirtualKeyCode::Numpad6,
            0x7 => VirtualKeyCode::Numpad7,
            0x8 => VirtualKeyCode::Numpad8,
            0x9 => VirtualKeyCode::Numpad9,
            0xA => VirtualKeyCode::Q,
            0xB => VirtualKeyCode::W,
            0xC => VirtualKeyCode::E,
            0xD => VirtualKeyCode::R,
            0xE => VirtualKeyCode::T,
            0xF => VirtualKeyCode::Y,
            _ => unreachable!(),
        }
    }
}

impl WindowInterface for WinitWindowDriver {
    fn run_emulator(&mut self, mut emulator: Emulator) -> CResult {
        let (event_loop, window) = self.create_window()?;

        let mut pixels = {
            let window_size = window.inner_size();
            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, &window);
            Pixels::new(WINDOW_WIDTH, WINDOW_HEIGHT, surface_texture)?
        };

        let mut input = WinitInputDriver::new();
        let mut debugger = Debugger::new(DEBUGGER_TOGGLE_KEY as FreeKeyCode);

        event_loop.run(move |event, _, control_flow| {
            if let Event::RedrawRequested(_) = event {
                let mut render_driver = PixelsRenderDriver::new(pixels.get_frame());
                if let Err(e) = emulator.cpu.peripherals.screen.render(
                    RENDER_SCALE,
                    WINDOW_WIDTH as usize,
                    &mut render_driver,
                ) {
                    error!("render error: {}", e);
                }
                if let Err(e) = pixels.render() {
                    error!("surface error: {}", e);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            if input.helper().update(&event) {
                if input.helper().key_pressed(VirtualKeyCode::Escape) {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                input.update_input_state(&mut emulator.cpu.peripherals.input);
                if emulator.cpu.peripherals.input.should_quit() {
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                emulator.cpu.tick();
                debugger.update(&emulator.cpu);

                window.request_redraw();
            }
        });
    }
}

impl InputInterface for WinitInputDriver {
    fn update_input_state(&mut self, state: &mut InputState) {
        state.begin_refresh();

        if self.helper.quit() {
            state.request_quit();
        }

        for key in 0..INPUT_STATE_COUNT {
            let key8 = key as C8Byte;
            let binding = Self::keypad_binding(key8);

            if self.helper.key_held(binding) {
                state.press(key8);
            } else {
                state.release(key8);
            }
        }

        for free_key in &FREE_KEYS {
            if self.helper.key_pressed(*free_key) {
                state.press_free(*free_key as FreeKeyCode);
            }
            if self.helper.key_released(*free_key) {
                state.release_free(*free_key as FreeKeyCode);
            }
        }
    }
}
