//! CPU memory.
//!
//! 4096 bytes, with the system font resident at 0x000 and program data
//! loaded at 0x200. Out-of-range reads return zero and out-of-range writes
//! are dropped; both are reported on the log.

use std::fmt;

use crate::core::font::{FONT_DATA, FONT_DATA_ADDR};
use crate::types::{C8Addr, C8Byte};

/// Memory size.
pub const MEMORY_SIZE: usize = 4096;
/// Chunk size for memory dumps.
const CHUNK_SIZE: usize = 64;

/// Initial memory pointer.
pub const INITIAL_MEMORY_POINTER: C8Addr = 0x200;

/// CPU memory struct.
#[derive(Clone)]
pub struct Memory {
    data: Vec<C8Byte>,
}

impl Default for Memory {
    fn default() -> Self {
        let mut memory = Memory {
            data: vec![0; MEMORY_SIZE],
        };
        memory.set_many(&FONT_DATA, FONT_DATA_ADDR);
        memory
    }
}

impl Memory {
    /// Create new memory, with the font installed.
    ///
    /// # Returns
    ///
    /// * Memory instance.
    ///
    pub fn new() -> Self {
        Default::default()
    }

    fn is_valid_address(&self, addr: C8Addr) -> bool {
        let overflowing = addr as usize >= MEMORY_SIZE;
        if overflowing {
            error!("memory access out of range: {:#05X}", addr);
        }

        !overflowing
    }

    /// Get byte at address.
    ///
    /// Out-of-range reads return 0.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address.
    ///
    /// # Returns
    ///
    /// * Byte value.
    ///
    pub fn get(&self, addr: C8Addr) -> C8Byte {
        if self.is_valid_address(addr) {
            self.data[addr as usize]
        } else {
            0
        }
    }

    /// Set byte at address.
    ///
    /// Out-of-range writes are dropped.
    ///
    /// # Arguments
    ///
    /// * `value` - Byte value.
    /// * `addr` - Address.
    ///
    pub fn set(&mut self, value: C8Byte, addr: C8Addr) {
        if self.is_valid_address(addr) {
            self.data[addr as usize] = value;
        }
    }

    /// Set a block of bytes starting at address.
    ///
    /// The end bound is one past the last written byte, so a block reaching
    /// the final memory cell is valid. The whole write is dropped if the
    /// block extends past the end of memory.
    ///
    /// # Arguments
    ///
    /// * `values` - Byte values.
    /// * `addr` - Start address.
    ///
    pub fn set_many(&mut self, values: &[C8Byte], addr: C8Addr) {
        let last_addr = addr as usize + values.len();
        if last_addr > MEMORY_SIZE {
            error!(
                "memory block write out of range: {:#05X} + {} bytes",
                addr,
                values.len()
            );
            return;
        }

        self.data[addr as usize..last_addr].copy_from_slice(values);
    }

    /// Read a big-endian opcode at address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address.
    ///
    /// # Returns
    ///
    /// * Opcode value.
    ///
    pub fn read_opcode_at(&self, addr: C8Addr) -> C8Addr {
        (C8Addr::from(self.get(addr)) << 8) | C8Addr::from(self.get(addr.wrapping_add(1)))
    }

    /// Get data.
    ///
    /// # Returns
    ///
    /// * Data.
    ///
    pub fn get_data(&self) -> &[C8Byte] {
        &self.data
    }

    /// Reset memory, reinstalling the font.
    pub fn reset(&mut self) {
        self.data = vec![0; MEMORY_SIZE];
        self.set_many(&FONT_DATA, FONT_DATA_ADDR);
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, chunk) in self.data.chunks(CHUNK_SIZE).enumerate() {
            write!(
                f,
                "    {:04X}-{:04X} | ",
                idx * CHUNK_SIZE,
                (idx + 1) * CHUNK_SIZE
            )?;

            for chunk_value in chunk.iter() {
                write!(f, "{:02X} ", chunk_value)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
