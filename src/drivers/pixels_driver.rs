//! Pixels render driver.

use crate::errors::CResult;

use super::RenderInterface;

const LIT_PIXEL: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
const DARK_PIXEL: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Render driver writing into a `pixels` RGBA frame.
pub struct PixelsRenderDriver<'a> {
    frame: &'a mut [u8],
}

impl<'a> PixelsRenderDriver<'a> {
    /// Creates new driver over a frame buffer.
    pub fn new(frame: &'a mut [u8]) -> Self {
        Self { frame }
    }
}

impl<'a> RenderInterface for PixelsRenderDriver<'a> {
    fn render_pixel(
        &mut self,
        x: usize,
        y: usize,
        scale: usize,
        on: bool,
        frame_width: usize,
    ) -> CResult {
        let color = if on { LIT_PIXEL } else { DARK_PIXEL };
        let cursor = (x * scale + y * scale * frame_width) * 4;

        for row in 0..scale {
            for col in 0..scale {
                let cursor = cursor + (col + row * frame_width) * 4;
                let slice = &mut self.frame[cursor..cursor + 4];
                slice.copy_from_slice(&color);
            }
        }

        Ok(())
    }
}
