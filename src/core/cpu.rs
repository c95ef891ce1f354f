//! CHIP-8 CPU.
//!
//! The scheduler runs two decoupled 60 Hz clocks off a monotonic seconds
//! source: one gating instruction execution, one gating timer decrements.
//! A frequency meter publishes the measured cycles per second once per
//! wall-clock second, and a short ring keeps the most recent opcodes for
//! inspection.

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use crate::cartridge::Cartridge;
use crate::peripherals::memory::INITIAL_MEMORY_POINTER;
use crate::peripherals::Peripherals;
use crate::types::C8Addr;

use super::opcodes::{decode, OpcodePayload, OpcodeTable};
use super::registers::Registers;

/// Instruction clock period, in seconds.
pub const CYCLE_DURATION: f64 = 1.0 / 60.0;
/// Timer clock period, in seconds.
pub const TIMER_DURATION: f64 = 1.0 / 60.0;
/// Opcode history depth.
pub const OPCODE_HISTORY_LENGTH: usize = 10;

// Families that set PC themselves; everything else auto-increments.
const PC_MANAGED_FAMILIES: [C8Addr; 3] = [0x1000, 0x2000, 0xB000];

/// CHIP-8 CPU struct.
pub struct Cpu {
    /// Registers.
    pub registers: Registers,
    /// Peripherals.
    pub peripherals: Peripherals,

    opcode_table: OpcodeTable,
    origin: Instant,

    last_cycle_time: f64,
    last_timer_update: f64,

    frequency: f64,
    cycles_executed: u64,
    last_frequency_time: f64,

    opcode_history: VecDeque<C8Addr>,
    cycles_per_tick: u32,
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu {
            registers: Registers::new(),
            peripherals: Peripherals::new(),
            opcode_table: OpcodeTable::new(),
            origin: Instant::now(),
            last_cycle_time: 0.0,
            last_timer_update: 0.0,
            frequency: 0.0,
            cycles_executed: 0,
            last_frequency_time: 0.0,
            opcode_history: VecDeque::with_capacity(OPCODE_HISTORY_LENGTH),
            cycles_per_tick: 1,
        }
    }
}

impl Cpu {
    /// Create CHIP-8 CPU.
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the number of instructions executed per clock tick.
    ///
    /// Timers keep their own 60 Hz pace regardless.
    ///
    /// # Arguments
    ///
    /// * `count` - Instruction count (minimum 1).
    ///
    pub fn set_cycles_per_tick(&mut self, count: u32) {
        self.cycles_per_tick = count.max(1);
    }

    /// Load cartridge data into memory at the program start address.
    ///
    /// # Arguments
    ///
    /// * `cartridge` - Cartridge.
    ///
    pub fn load_cartridge_data(&mut self, cartridge: &Cartridge) {
        self.peripherals
            .memory
            .set_many(cartridge.get_data(), INITIAL_MEMORY_POINTER);
    }

    /// Advance the scheduler against the CPU's own clock.
    pub fn tick(&mut self) {
        let now = self.origin.elapsed().as_secs_f64();
        self.tick_at(now);
    }

    /// Advance the scheduler against an explicit monotonic timestamp.
    ///
    /// # Arguments
    ///
    /// * `now` - Seconds elapsed on the host clock.
    ///
    pub fn tick_at(&mut self, now: f64) {
        if now - self.last_cycle_time >= CYCLE_DURATION {
            for _ in 0..self.cycles_per_tick {
                self.step();
            }

            self.last_cycle_time = now;
            self.cycles_executed += u64::from(self.cycles_per_tick);
        }

        self.update_timers(now);
        self.update_frequency(now);
    }

    /// Execute one fetch-decode-dispatch cycle, regardless of the clock.
    pub fn step(&mut self) {
        let opcode = self.peripherals.memory.read_opcode_at(self.registers.pc);
        let fields = decode(opcode);

        if let Some(handler) = self.opcode_table.lookup(opcode) {
            let mut payload = OpcodePayload {
                registers: &mut self.registers,
                memory: &mut self.peripherals.memory,
                screen: &mut self.peripherals.screen,
                input: &mut self.peripherals.input,
            };
            handler(&mut payload, fields);
        }

        self.record_opcode(opcode);

        if !PC_MANAGED_FAMILIES.contains(&(opcode & 0xF000)) {
            self.registers.advance_pc();
        }
    }

    fn update_timers(&mut self, now: f64) {
        if now - self.last_timer_update >= TIMER_DURATION {
            self.registers.decrement_timers();
            self.last_timer_update = now;
        }
    }

    fn update_frequency(&mut self, now: f64) {
        let elapsed = now - self.last_frequency_time;
        if elapsed >= 1.0 {
            self.frequency = self.cycles_executed as f64 / elapsed;
            self.cycles_executed = 0;
            self.last_frequency_time = now;
        }
    }

    fn record_opcode(&mut self, opcode: C8Addr) {
        if self.opcode_history.len() >= OPCODE_HISTORY_LENGTH {
            self.opcode_history.pop_front();
        }
        self.opcode_history.push_back(opcode);
    }

    /// Get the measured execution frequency, in cycles per second.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Get the most recent executed opcodes, oldest first.
    pub fn opcode_history(&self) -> impl Iterator<Item = &C8Addr> {
        self.opcode_history.iter()
    }

    /// Reset CPU.
    pub fn reset(&mut self) {
        self.peripherals.reset();
        self.registers.reset();

        self.origin = Instant::now();
        self.last_cycle_time = 0.0;
        self.last_timer_update = 0.0;
        self.frequency = 0.0;
        self.cycles_executed = 0;
        self.last_frequency_time = 0.0;
        self.opcode_history.clear();
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Registers:")?;
        write!(f, "{}", self.registers)?;

        writeln!(f, "  Input:")?;
        write!(f, "{:?}", self.peripherals.input)?;

        writeln!(f, "  Screen:")?;
        write!(f, "{:?}", self.peripherals.screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_with_program(opcodes: &[C8Addr]) -> Cpu {
        let mut cpu = Cpu::new();
        let mut bytes = Vec::with_capacity(opcodes.len() * 2);
        for opcode in opcodes {
            bytes.extend_from_slice(&opcode.to_be_bytes());
        }

        cpu.peripherals.memory.set_many(&bytes, INITIAL_MEMORY_POINTER);
        cpu
    }

    #[test]
    fn test_opcode_history_ring() {
        // 12 loads; the ring keeps the last 10.
        let program: Vec<C8Addr> = (0..12).map(|i| 0x6000 | i).collect();
        let mut cpu = cpu_with_program(&program);

        for _ in 0..12 {
            cpu.step();
        }

        let history: Vec<C8Addr> = cpu.opcode_history().copied().collect();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0], 0x6002);
        assert_eq!(history[9], 0x600B);
    }

    #[test]
    fn test_instruction_clock_gating() {
        let mut cpu = cpu_with_program(&[0x6001]);

        // Under one period: nothing runs.
        cpu.tick_at(0.001);
        cpu.tick_at(0.002);
        assert_eq!(cpu.registers.pc, 0x200);
        assert_eq!(cpu.registers.v[0], 0);

        // Past one period: exactly one instruction.
        cpu.tick_at(CYCLE_DURATION);
        assert_eq!(cpu.registers.pc, 0x202);
        assert_eq!(cpu.registers.v[0], 1);
    }

    #[test]
    fn test_timer_clock_independence() {
        let mut cpu = cpu_with_program(&[0x6001]);
        cpu.registers.dt = 5;

        // Rapid ticks inside the first period decrement nothing.
        for i in 1..10 {
            cpu.tick_at(i as f64 * 0.001);
        }
        assert_eq!(cpu.registers.dt, 5);

        // Three simulated periods drop the timer by three.
        for k in 1..=3 {
            cpu.tick_at(k as f64 * TIMER_DURATION);
        }
        assert_eq!(cpu.registers.dt, 2);
    }

    #[test]
    fn test_frequency_meter() {
        let mut cpu = cpu_with_program(&[0x6001, 0x6102, 0x6203]);

        cpu.tick_at(CYCLE_DURATION);
        cpu.tick_at(2.0 * CYCLE_DURATION);
        cpu.tick_at(1.0);

        // Three cycles over one second.
        assert!((cpu.frequency() - 3.0).abs() < 0.5);
    }
}
