//! Peripherals.

pub mod input;
pub mod memory;
pub mod screen;

use self::input::InputState;
use self::memory::Memory;
use self::screen::Screen;

/// Peripherals bundle.
#[derive(Default)]
pub struct Peripherals {
    /// Memory.
    pub memory: Memory,
    /// Screen.
    pub screen: Screen,
    /// Input.
    pub input: InputState,
}

impl Peripherals {
    /// Create new peripherals.
    pub fn new() -> Self {
        Default::default()
    }

    /// Reset peripherals.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.screen.reset();
        self.input.reset();
    }
}
