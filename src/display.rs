//! Panel geometry and the packed frame buffer layout.
//!
//! Frames are 1 bit per pixel, row-major, MSB first: pixel `(x, y)` lives in
//! byte `y * WIDTH / 8 + x / 8` under mask `0x80 >> (x % 8)`.

use embedded_graphics::geometry::{OriginDimensions, Size};

/// Width in pixels
pub const EPD_WIDTH: u16 = 800;
/// Height in pixels
pub const EPD_HEIGHT: u16 = 480;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
}

/// 7in5 V2
pub const EPD_7IN5_V2: PanelGeometry = PanelGeometry {
    width: EPD_WIDTH,
    height: EPD_HEIGHT,
};

impl PanelGeometry {
    pub const fn bytes_per_row(&self) -> usize {
        self.width as usize / 8 + (self.width % 8 != 0) as usize
    }

    /// Exact length of a frame buffer for this panel.
    pub const fn buffer_len(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Payload of the resolution setting command.
    pub const fn resolution_payload(&self) -> [u8; 4] {
        [
            (self.width >> 8) as u8,
            self.width as u8,
            (self.height >> 8) as u8,
            self.height as u8,
        ]
    }

    /// Byte offset and bit mask of a pixel, `None` when off the panel.
    pub fn bit_position(&self, x: u16, y: u16) -> Option<(usize, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte_offset = y as usize * self.bytes_per_row() + x as usize / 8;
        Some((byte_offset, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for PanelGeometry {
    fn size(&self) -> Size {
        Size::new(self.width as _, self.height as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_len_is_one_bit_per_pixel() {
        assert_eq!(EPD_7IN5_V2.bytes_per_row(), 100);
        assert_eq!(EPD_7IN5_V2.buffer_len(), 48_000);
    }

    #[test]
    fn test_resolution_payload() {
        assert_eq!(EPD_7IN5_V2.resolution_payload(), [0x03, 0x20, 0x01, 0xE0]);
    }

    #[test]
    fn test_bit_position_is_msb_first() {
        assert_eq!(EPD_7IN5_V2.bit_position(0, 0), Some((0, 0x80)));
        assert_eq!(EPD_7IN5_V2.bit_position(9, 0), Some((1, 0x40)));
        assert_eq!(EPD_7IN5_V2.bit_position(799, 479), Some((47_999, 0x01)));
        assert_eq!(EPD_7IN5_V2.bit_position(800, 0), None);
        assert_eq!(EPD_7IN5_V2.bit_position(0, 480), None);
    }

    #[test]
    fn test_size() {
        assert_eq!(EPD_7IN5_V2.size(), Size::new(800, 480));
    }
}
