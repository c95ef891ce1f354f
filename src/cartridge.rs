//! CHIP-8 cartridge.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::errors::CResult;
use crate::peripherals::memory::{INITIAL_MEMORY_POINTER, MEMORY_SIZE};
use crate::types::C8Byte;

/// Cartridge max size.
pub const CARTRIDGE_MAX_SIZE: usize = MEMORY_SIZE - INITIAL_MEMORY_POINTER as usize;

const EMPTY_GAME_NAME: &str = "<EMPTY>";

/// CHIP-8 cartridge type.
pub struct Cartridge {
    title: String,
    data: Vec<C8Byte>,
}

/// Cartridge error.
#[derive(Debug)]
pub struct CartridgeError(String);

impl Error for CartridgeError {}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cartridge error: {}", self.0)
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Cartridge {
    /// New empty cartridge.
    pub fn new_empty() -> Self {
        Self {
            title: String::from(EMPTY_GAME_NAME),
            data: vec![],
        }
    }

    /// Get game name from path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to file.
    ///
    /// # Returns
    ///
    /// * Game name.
    ///
    pub fn get_game_name(path: &Path) -> String {
        match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_uppercase().replace("_", " "),
            None => String::from(EMPTY_GAME_NAME),
        }
    }

    /// Load cartridge from path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to file.
    ///
    /// # Returns
    ///
    /// * Cartridge result.
    ///
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> CResult<Cartridge> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| CartridgeError(format!("could not open {}: {}", path.display(), e)))?;

        let mut contents = Vec::with_capacity(CARTRIDGE_MAX_SIZE);
        file.read_to_end(&mut contents)?;

        if contents.len() > CARTRIDGE_MAX_SIZE {
            return Err(Box::new(CartridgeError(format!(
                "{} is too large: {} bytes (limit: {})",
                path.display(),
                contents.len(),
                CARTRIDGE_MAX_SIZE
            ))));
        }

        let mut cartridge = Cartridge::new_empty();
        cartridge.title = Self::get_game_name(path);
        cartridge.set_data(contents);

        Ok(cartridge)
    }

    /// Save cartridge to path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to file.
    ///
    /// # Returns
    ///
    /// * Result.
    ///
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> CResult {
        let mut file = File::create(path.as_ref())?;
        file.write_all(&self.data)?;

        Ok(())
    }

    /// Set cartridge data.
    ///
    /// # Arguments
    ///
    /// * `data` - ROM bytes.
    ///
    pub fn set_data(&mut self, data: Vec<C8Byte>) {
        self.data = data;
    }

    /// Get cartridge data.
    pub fn get_data(&self) -> &[C8Byte] {
        &self.data
    }

    /// Get cartridge title.
    pub fn get_title(&self) -> &str {
        &self.title
    }
}
