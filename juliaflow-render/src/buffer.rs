/// An RGB pixel buffer representing one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    pub const CHANNELS: usize = 3;

    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * Self::CHANNELS],
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The RGB triple at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Iterate over pixels as RGB triples in row-major order.
    pub fn rgb(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .chunks_exact(Self::CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black() {
        let buf = FrameBuffer::new(4, 3);
        assert_eq!(buf.pixels.len(), 4 * 3 * 3);
        assert_eq!(buf.pixel_count(), 12);
        assert!(buf.rgb().all(|px| px == [0, 0, 0]));
    }

    #[test]
    fn pixel_addresses_row_major() {
        let mut buf = FrameBuffer::new(3, 2);
        // Pixel (1, 1) is the fifth triple.
        buf.pixels[12..15].copy_from_slice(&[10, 20, 30]);
        assert_eq!(buf.pixel(1, 1), Some([10, 20, 30]));
        assert_eq!(buf.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(buf.pixel(3, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
    }
}
