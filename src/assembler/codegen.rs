//! Code generator.
//!
//! Merges each decoded instruction's base opcode with its operand values,
//! positionally packed into the opcode nibbles, and emits the resulting
//! words big-endian.

use crate::types::{C8Addr, C8Byte};

use super::parser::{Instruction, OperandKind};

/// Encode an instruction into its opcode.
///
/// # Arguments
///
/// * `instruction` - Decoded instruction.
///
/// # Returns
///
/// * Opcode value.
///
pub fn encode_instruction(instruction: &Instruction) -> C8Addr {
    let mut opcode = instruction.code;

    for (kind, value) in &instruction.operands {
        opcode |= match kind {
            OperandKind::Vx => (value & 0xF) << 8,
            OperandKind::Vy => (value & 0xF) << 4,
            OperandKind::N => value & 0xF,
            OperandKind::Nn => value & 0xFF,
            OperandKind::Nnn => value & 0xFFF,
        };
    }

    opcode
}

/// Generate ROM bytes from decoded instructions.
///
/// Opcodes are written in order, high byte first. No header, no padding.
///
/// # Arguments
///
/// * `instructions` - Decoded instructions.
///
/// # Returns
///
/// * ROM bytes.
///
pub fn generate_rom(instructions: &[Instruction]) -> Vec<C8Byte> {
    let mut data = Vec::with_capacity(instructions.len() * 2);

    for instruction in instructions {
        let opcode = encode_instruction(instruction);
        data.extend_from_slice(&opcode.to_be_bytes());
    }

    data
}
