//! Assembler.
//!
//! Compiles `.c8s` mnemonic source into CHIP-8 ROM images: a lexing pass
//! over the raw text, a parsing pass resolving labels and validating
//! operands, and a generation pass packing opcodes big-endian.

pub mod codegen;
pub mod lexer;
pub mod parser;

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::cartridge::Cartridge;
use crate::errors::CResult;
use crate::types::C8Byte;

use self::lexer::{tokenize, Token};

/// Source file extension.
pub const SOURCE_EXTENSION: &str = "c8s";

/// File error.
#[derive(Debug)]
pub struct FileError(pub String);

impl Error for FileError {}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file error: {}", self.0)
    }
}

/// Assembler.
#[derive(Debug, PartialEq, Default)]
pub struct Assembler {
    contents: String,
}

impl Assembler {
    /// Creates new assembler.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates new assembler from path.
    ///
    /// The file must carry the `.c8s` extension and be readable.
    ///
    /// # Arguments
    ///
    /// * `path` - Path.
    ///
    /// # Returns
    ///
    /// * Assembler result.
    ///
    pub fn from_path<P: AsRef<Path>>(path: P) -> CResult<Self> {
        let path = path.as_ref();

        let extension_ok = path
            .extension()
            .map(|ext| ext.to_string_lossy() == SOURCE_EXTENSION)
            .unwrap_or(false);
        if !extension_ok {
            return Err(Box::new(FileError(format!(
                "specified file has no .{} extension: {}",
                SOURCE_EXTENSION,
                path.display()
            ))));
        }

        debug!("reading assembly source from {:?}", path);
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| FileError(format!("could not read {}: {}", path.display(), e)))?;

        Ok(Self::from_string(&contents))
    }

    /// Creates new assembler from string contents.
    ///
    /// # Arguments
    ///
    /// * `contents` - String contents.
    ///
    /// # Returns
    ///
    /// * Assembler instance.
    ///
    pub fn from_string(contents: &str) -> Self {
        Self {
            contents: contents.to_string(),
        }
    }

    /// Tokenize the source without parsing.
    ///
    /// # Returns
    ///
    /// * Token sequence.
    ///
    pub fn tokenize(&self) -> Vec<Token> {
        tokenize(&self.contents)
    }

    /// Assemble ROM data.
    ///
    /// # Returns
    ///
    /// * Byte vector result.
    ///
    pub fn assemble_data(&self) -> CResult<Vec<C8Byte>> {
        debug!("assembling instructions ...");
        let tokens = self.tokenize();
        let instructions = parser::parse(&tokens)?;
        let data = codegen::generate_rom(&instructions);
        debug!("{} instructions assembled", instructions.len());

        Ok(data)
    }

    /// Assemble a cartridge.
    ///
    /// # Returns
    ///
    /// * Cartridge result.
    ///
    pub fn assemble_cartridge(&self) -> CResult<Cartridge> {
        let data = self.assemble_data()?;
        let mut cartridge = Cartridge::new_empty();
        cartridge.set_data(data);

        Ok(cartridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_from_string() {
        let example = "JP 526\nLD_I 0x20A";
        let assembler = Assembler::from_string(example);
        let data = assembler.assemble_data().unwrap();

        assert_eq!(data, vec![0x12, 0x0E, 0xA2, 0x0A]);
    }

    #[test]
    fn test_from_path_rejects_extension() {
        let error = Assembler::from_path("game.ch8").unwrap_err();

        assert!(error.to_string().contains(".c8s"));
    }
}
