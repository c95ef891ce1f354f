//! Input state.
//!
//! Tracks the held-state of the 16-key hex keypad, plus "free" keys: host
//! key codes outside the keypad mapping, kept both as a held set and as the
//! set of keys whose key-down edge arrived since the last refresh. A quit
//! flag is raised by the host close event.

use std::fmt;

use crate::types::C8RegIdx;

/// Input state count.
pub const INPUT_STATE_COUNT: usize = 16;

/// Host key code for a free (non-keypad) key.
pub type FreeKeyCode = u32;

/// Input state struct.
#[derive(Default)]
pub struct InputState {
    keys: [bool; INPUT_STATE_COUNT],
    free_held: Vec<FreeKeyCode>,
    free_edge: Vec<FreeKeyCode>,
    quit_requested: bool,
}

impl InputState {
    /// Create new input state.
    pub fn new() -> Self {
        Default::default()
    }

    fn is_key_in_range(&self, key: C8RegIdx) -> bool {
        let in_range = (key as usize) < INPUT_STATE_COUNT;
        if !in_range {
            error!("key {:#X} is not in the keypad range", key);
        }

        in_range
    }

    /// Start an input refresh.
    ///
    /// Clears the free-key edge set, so it only ever holds edges received
    /// since the previous refresh.
    pub fn begin_refresh(&mut self) {
        self.free_edge.clear();
    }

    /// Press a keypad key.
    ///
    /// # Arguments
    ///
    /// * `key` - Keypad key.
    ///
    pub fn press(&mut self, key: C8RegIdx) {
        if self.is_key_in_range(key) {
            self.keys[key as usize] = true;
        }
    }

    /// Release a keypad key.
    ///
    /// # Arguments
    ///
    /// * `key` - Keypad key.
    ///
    pub fn release(&mut self, key: C8RegIdx) {
        if self.is_key_in_range(key) {
            self.keys[key as usize] = false;
        }
    }

    /// Press a free key.
    ///
    /// Records a key-down edge for a key that was not already held.
    ///
    /// # Arguments
    ///
    /// * `code` - Host key code.
    ///
    pub fn press_free(&mut self, code: FreeKeyCode) {
        if !self.free_held.contains(&code) {
            self.free_edge.push(code);
            self.free_held.push(code);
        }
    }

    /// Release a free key.
    ///
    /// # Arguments
    ///
    /// * `code` - Host key code.
    ///
    pub fn release_free(&mut self, code: FreeKeyCode) {
        self.free_held.retain(|&held| held != code);
    }

    /// Raise the quit flag.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Check the quit flag.
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Check if a keypad key is held.
    ///
    /// # Arguments
    ///
    /// * `key` - Keypad key.
    ///
    /// # Returns
    ///
    /// * `true` if held.
    ///
    pub fn is_key_pressed(&self, key: C8RegIdx) -> bool {
        if self.is_key_in_range(key) {
            self.keys[key as usize]
        } else {
            false
        }
    }

    /// Get the lowest-indexed held keypad key, if any.
    ///
    /// # Returns
    ///
    /// * Key option.
    ///
    pub fn get_any_key_pressed(&self) -> Option<C8RegIdx> {
        self.keys
            .iter()
            .position(|&held| held)
            .map(|index| index as C8RegIdx)
    }

    /// Check if a free key is held.
    pub fn is_free_key_pressed(&self, code: FreeKeyCode) -> bool {
        self.free_held.contains(&code)
    }

    /// Check if a free key went down since the last refresh.
    pub fn is_free_key_just_pressed(&self, code: FreeKeyCode) -> bool {
        self.free_edge.contains(&code)
    }

    /// Get the most recently pressed free key still held, if any.
    pub fn get_free_key_pressed(&self) -> Option<FreeKeyCode> {
        self.free_held.last().copied()
    }

    /// Get the keypad held-state snapshot.
    pub fn keys(&self) -> &[bool; INPUT_STATE_COUNT] {
        &self.keys
    }

    /// Reset input state.
    pub fn reset(&mut self) {
        self.keys = [false; INPUT_STATE_COUNT];
        self.free_held.clear();
        self.free_edge.clear();
        self.quit_requested = false;
    }
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, held) in self.keys.iter().enumerate() {
            writeln!(f, "    K{:X}: {}", idx, *held as u8)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_state() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(0x4));
        input.press(0x4);
        assert!(input.is_key_pressed(0x4));
        input.release(0x4);
        assert!(!input.is_key_pressed(0x4));

        // Out-of-range keys are reported and read as released.
        input.press(0x10);
        assert!(!input.is_key_pressed(0x10));
    }

    #[test]
    fn test_lowest_held_key_wins() {
        let mut input = InputState::new();

        assert_eq!(input.get_any_key_pressed(), None);
        input.press(0xA);
        input.press(0x3);
        assert_eq!(input.get_any_key_pressed(), Some(0x3));
    }

    #[test]
    fn test_free_key_edges() {
        let mut input = InputState::new();

        input.begin_refresh();
        input.press_free(42);
        assert!(input.is_free_key_pressed(42));
        assert!(input.is_free_key_just_pressed(42));

        // The edge only lives until the next refresh.
        input.begin_refresh();
        assert!(input.is_free_key_pressed(42));
        assert!(!input.is_free_key_just_pressed(42));

        // Re-pressing a held key is not a new edge.
        input.press_free(42);
        assert!(!input.is_free_key_just_pressed(42));

        input.release_free(42);
        assert!(!input.is_free_key_pressed(42));
    }

    #[test]
    fn test_last_free_key_pressed() {
        let mut input = InputState::new();

        input.press_free(1);
        input.press_free(2);
        assert_eq!(input.get_free_key_pressed(), Some(2));
        input.release_free(2);
        assert_eq!(input.get_free_key_pressed(), Some(1));
    }
}
