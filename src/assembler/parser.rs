//! Source parser.
//!
//! Groups tokens into lines, binds labels to instruction addresses,
//! validates operands against the mnemonic table and parses numeric
//! literals. Only as many operand tokens are consumed as a mnemonic
//! declares; stray trailing tokens are tolerated for now.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use regex::Regex;

use crate::peripherals::memory::INITIAL_MEMORY_POINTER;
use crate::types::C8Addr;

use super::lexer::Token;

/// Operand kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// 4-bit literal.
    N,
    /// 8-bit literal.
    Nn,
    /// 12-bit address literal.
    Nnn,
    /// First register index.
    Vx,
    /// Second register index.
    Vy,
}

/// Mnemonic definition: base opcode and declared operand kinds.
pub struct MnemonicDef {
    /// Base opcode.
    pub code: C8Addr,
    /// Operand kinds, positional.
    pub operands: &'static [OperandKind],
}

const fn def(code: C8Addr, operands: &'static [OperandKind]) -> MnemonicDef {
    MnemonicDef { code, operands }
}

use self::OperandKind::{Vx, Vy, N, Nn, Nnn};

lazy_static! {
    /// Mnemonic table.
    pub static ref MNEMONICS: HashMap<&'static str, MnemonicDef> = {
        let mut table = HashMap::new();
        table.insert("WAIT", def(0x0FFF, &[]));
        table.insert("CLS", def(0x00E0, &[]));
        table.insert("RET", def(0x00EE, &[]));
        table.insert("JP", def(0x1000, &[Nnn]));
        table.insert("CALL", def(0x2000, &[Nnn]));
        table.insert("SE", def(0x3000, &[Vx, Nn]));
        table.insert("SNE", def(0x4000, &[Vx, Nn]));
        table.insert("SE_REG", def(0x5000, &[Vx, Vy]));
        table.insert("LD", def(0x6000, &[Vx, Nn]));
        table.insert("ADD", def(0x7000, &[Vx, Nn]));
        table.insert("LD_REG", def(0x8000, &[Vx, Vy]));
        table.insert("OR", def(0x8001, &[Vx, Vy]));
        table.insert("AND", def(0x8002, &[Vx, Vy]));
        table.insert("XOR", def(0x8003, &[Vx, Vy]));
        table.insert("ADD_REG", def(0x8004, &[Vx, Vy]));
        table.insert("SUB", def(0x8005, &[Vx, Vy]));
        table.insert("SHR", def(0x8006, &[Vx]));
        table.insert("SUBN", def(0x8007, &[Vx, Vy]));
        table.insert("SHL", def(0x800E, &[Vx]));
        table.insert("SNE_REG", def(0x9000, &[Vx, Vy]));
        table.insert("LD_I", def(0xA000, &[Nnn]));
        table.insert("JP_V0", def(0xB000, &[Nnn]));
        table.insert("RND", def(0xC000, &[Vx, Nn]));
        table.insert("DRW", def(0xD000, &[Vx, Vy, N]));
        table.insert("SKP", def(0xE09E, &[Vx]));
        table.insert("SKNP", def(0xE0A1, &[Vx]));
        table.insert("LD_VX_DT", def(0xF007, &[Vx]));
        table.insert("LD_VX_K", def(0xF00A, &[Vx]));
        table.insert("LD_DT_VX", def(0xF015, &[Vx]));
        table.insert("LD_ST_VX", def(0xF018, &[Vx]));
        table.insert("ADD_I_VX", def(0xF01E, &[Vx]));
        table.insert("LD_F", def(0xF029, &[Vx]));
        table.insert("LD_B", def(0xF033, &[Vx]));
        table.insert("LD_I_TO_V", def(0xF055, &[Vx]));
        table.insert("LD_V_TO_I", def(0xF065, &[Vx]));
        table
    };

    static ref REGISTER_RE: Regex = Regex::new(r"^v([0-9]+)$").unwrap();
}

// Mnemonics whose NNN operand may name a label.
const LABEL_MNEMONICS: [&str; 2] = ["JP", "CALL"];

/// Decoded instruction: base opcode plus validated operand values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Base opcode.
    pub code: C8Addr,
    /// Operands, positional.
    pub operands: Vec<(OperandKind, u16)>,
}

/// Parse error.
///
/// `line` is a 0-based index: over the label-free instruction stream for
/// instruction errors, over all grouped lines for label errors.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Error description, naming the offending mnemonic where relevant.
    pub message: String,
    /// 0-based line index.
    pub line: usize,
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {} (line {})", self.message, self.line)
    }
}

impl ParseError {
    fn new(message: String, line: usize) -> Self {
        ParseError { message, line }
    }
}

/// Parse a token sequence into decoded instructions.
///
/// # Arguments
///
/// * `tokens` - Token sequence.
///
/// # Returns
///
/// * Instruction list result.
///
pub fn parse(tokens: &[Token]) -> Result<Vec<Instruction>, ParseError> {
    let lines = group_lines(tokens);
    let (labels, instruction_lines) = register_labels(lines)?;

    instruction_lines
        .iter()
        .enumerate()
        .map(|(index, line)| decode_line(line, index, &labels))
        .collect()
}

// Fold tokens into lines: split on newlines, drop commas, omit empty lines.
fn group_lines(tokens: &[Token]) -> Vec<Vec<String>> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for token in tokens {
        match token {
            Token::Newline => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            Token::Comma => {}
            Token::Word(word) => current.push(word.clone()),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Bind each label to the address of the next instruction line and strip
// label lines from the stream.
fn register_labels(
    lines: Vec<Vec<String>>,
) -> Result<(HashMap<String, C8Addr>, Vec<Vec<String>>), ParseError> {
    let mut labels = HashMap::new();
    let mut instruction_lines = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let head = &line[0];

        if head.len() > 1 && head.ends_with(':') {
            let name = head[..head.len() - 1].to_string();
            if labels.contains_key(&name) {
                return Err(ParseError::new(format!("reused label '{}'", name), index));
            }

            let address = INITIAL_MEMORY_POINTER + (instruction_lines.len() as C8Addr) * 2;
            labels.insert(name, address);
        } else {
            instruction_lines.push(line);
        }
    }

    Ok((labels, instruction_lines))
}

fn decode_line(
    line: &[String],
    index: usize,
    labels: &HashMap<String, C8Addr>,
) -> Result<Instruction, ParseError> {
    let action = line[0].as_str();
    let mnemonic = MNEMONICS.get(action).ok_or_else(|| {
        ParseError::new(format!("unknown instruction '{}'", action), index)
    })?;

    let args = &line[1..];
    if args.len() < mnemonic.operands.len() {
        return Err(ParseError::new(
            format!("missing operand (instruction {})", action),
            index,
        ));
    }

    let mut operands = Vec::with_capacity(mnemonic.operands.len());
    for (position, kind) in mnemonic.operands.iter().enumerate() {
        let token = args[position].as_str();

        let value = match kind {
            OperandKind::Vx | OperandKind::Vy => {
                parse_register(token, position, action, index)?
            }
            OperandKind::N => parse_literal(token, 15, "N", position, action, index)?,
            OperandKind::Nn => parse_literal(token, 255, "NN", position, action, index)?,
            OperandKind::Nnn => match resolve_label(token, action, labels, index)? {
                Some(address) => address,
                None => parse_literal(token, 4095, "NNN", position, action, index)?,
            },
        };

        operands.push((*kind, value));
    }

    Ok(Instruction {
        code: mnemonic.code,
        operands,
    })
}

// Label resolution applies to JP/CALL address operands only, and only when
// the token is not a plain decimal literal.
fn resolve_label(
    token: &str,
    action: &str,
    labels: &HashMap<String, C8Addr>,
    index: usize,
) -> Result<Option<u16>, ParseError> {
    if LABEL_MNEMONICS.contains(&action) && !is_decimal(token) {
        let address = labels.get(token).copied().ok_or_else(|| {
            ParseError::new(
                format!("unknown label '{}' (instruction {})", token, action),
                index,
            )
        })?;
        return Ok(Some(address));
    }

    Ok(None)
}

fn parse_register(
    token: &str,
    position: usize,
    action: &str,
    index: usize,
) -> Result<u16, ParseError> {
    if !token.starts_with('v') {
        return Err(ParseError::new(
            format!(
                "operand #{} of {} expected a register, got '{}'",
                position, action, token
            ),
            index,
        ));
    }

    let captures = REGISTER_RE.captures(token).ok_or_else(|| {
        ParseError::new(
            format!("invalid register '{}' (instruction {})", token, action),
            index,
        )
    })?;

    let value: u32 = captures[1].parse().map_err(|_| {
        ParseError::new(
            format!("invalid register '{}' (instruction {})", token, action),
            index,
        )
    })?;

    if value > 15 {
        return Err(ParseError::new(
            format!(
                "register index out of range at operand #{} (instruction {})",
                position, action
            ),
            index,
        ));
    }

    Ok(value as u16)
}

fn parse_literal(
    token: &str,
    max: u32,
    kind_name: &str,
    position: usize,
    action: &str,
    index: usize,
) -> Result<u16, ParseError> {
    let value = if let Some(digits) = token.strip_prefix("0x") {
        if digits.is_empty() || !digits.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')) {
            return Err(ParseError::new(
                format!("invalid hexadecimal number '{}' (instruction {})", token, action),
                index,
            ));
        }
        u32::from_str_radix(digits, 16)
    } else if let Some(digits) = token.strip_prefix("0b") {
        if digits.is_empty() || !digits.chars().all(|c| matches!(c, '0' | '1')) {
            return Err(ParseError::new(
                format!("invalid binary number '{}' (instruction {})", token, action),
                index,
            ));
        }
        u32::from_str_radix(digits, 2)
    } else {
        if !is_decimal(token) {
            return Err(ParseError::new(
                format!(
                    "invalid number at operand #{} (instruction {})",
                    position, action
                ),
                index,
            ));
        }
        token.parse::<u32>()
    }
    // A literal too wide for u32 is just as overflowing as one above `max`.
    .unwrap_or(u32::MAX);

    if value > max {
        return Err(ParseError::new(
            format!(
                "overflowing {} at operand #{} (instruction {})",
                kind_name, position, action
            ),
            index,
        ));
    }

    Ok(value as u16)
}

fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
