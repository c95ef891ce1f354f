//! State debugger.
//!
//! A toggleable report of the machine state, driven once per host frame.
//! The debugger holds no ownership over the CPU: it only borrows it for the
//! duration of an update, and reads through the public state.

use std::time::Instant;

use crate::core::cpu::Cpu;
use crate::peripherals::input::FreeKeyCode;

/// Seconds between two reports while the debugger is visible.
pub const REPORT_INTERVAL: f64 = 1.0;

/// State debugger.
pub struct Debugger {
    toggle_key: FreeKeyCode,
    displayed: bool,
    last_report: Instant,
}

impl Debugger {
    /// Create new debugger.
    ///
    /// # Arguments
    ///
    /// * `toggle_key` - Free key toggling the report.
    ///
    /// # Returns
    ///
    /// * Debugger instance.
    ///
    pub fn new(toggle_key: FreeKeyCode) -> Self {
        Debugger {
            toggle_key,
            displayed: false,
            last_report: Instant::now(),
        }
    }

    /// Update the debugger against the current machine state.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU view.
    ///
    pub fn update(&mut self, cpu: &Cpu) {
        if self.displayed && self.last_report.elapsed().as_secs_f64() >= REPORT_INTERVAL {
            self.print_report(cpu);
            self.last_report = Instant::now();
        }

        if cpu
            .peripherals
            .input
            .is_free_key_just_pressed(self.toggle_key)
        {
            self.displayed = !self.displayed;

            if self.displayed {
                self.print_report(cpu);
                self.last_report = Instant::now();
            }
        }
    }

    /// Check if the report is visible.
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    fn print_report(&self, cpu: &Cpu) {
        for line in cpu.registers.dump() {
            println!("{}", line);
        }

        println!("[Frequency]: {:.3}Hz", cpu.frequency());

        let history = cpu
            .opcode_history()
            .map(|opcode| format!("{:#06X}", opcode))
            .collect::<Vec<_>>()
            .join(", ");
        println!("[Opcodes history]: {}", history);

        let keys = cpu
            .peripherals
            .input
            .keys()
            .iter()
            .enumerate()
            .map(|(index, held)| format!("({:#X})->{}", index, *held as u8))
            .collect::<Vec<_>>()
            .join(", ");
        println!("[Keys]: {}", keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_on_free_key_edge() {
        let mut debugger = Debugger::new(42);
        let mut cpu = Cpu::new();

        debugger.update(&cpu);
        assert!(!debugger.is_displayed());

        cpu.peripherals.input.begin_refresh();
        cpu.peripherals.input.press_free(42);
        debugger.update(&cpu);
        assert!(debugger.is_displayed());

        // The edge is consumed at the next refresh; state sticks.
        cpu.peripherals.input.begin_refresh();
        debugger.update(&cpu);
        assert!(debugger.is_displayed());

        cpu.peripherals.input.press_free(43);
        debugger.update(&cpu);
        assert!(debugger.is_displayed());
    }
}
