//! CHIP-8 emulator.

use crate::cartridge::Cartridge;
use crate::core::cpu::Cpu;

/// CHIP-8 emulator.
///
/// Owns the CPU and the state it schedules; the host driver runs the frame
/// loop around it.
#[derive(Default)]
pub struct Emulator {
    /// CPU handle.
    pub cpu: Cpu,
}

impl Emulator {
    /// Create new CHIP-8 emulator.
    pub fn new() -> Self {
        Default::default()
    }

    /// Load a game.
    ///
    /// The font is already resident; program bytes land at 0x200.
    ///
    /// # Arguments
    ///
    /// * `cartridge` - Cartridge.
    ///
    pub fn load_game(&mut self, cartridge: &Cartridge) {
        debug!("loading game {}", cartridge.get_title());
        self.cpu.load_cartridge_data(cartridge);
    }

    /// Reset the emulator and reload a game.
    ///
    /// # Arguments
    ///
    /// * `cartridge` - Cartridge.
    ///
    pub fn reset(&mut self, cartridge: &Cartridge) {
        self.cpu.reset();
        self.load_game(cartridge);
    }
}
