// Software rasterization over host-owned pixel memory.
//
// FrameBuffer is a borrowed view, not an owning type: the host allocates the
// bitmap (and keeps it across frames), we only read the dimensions and write
// pixels inside them. Rows are addressed by `pitch` bytes, which may exceed
// `width * PIXEL_BYTES` when the host pads rows; pixels are little-endian
// 0xAARRGGBB words.

use crate::color::Color;
use crate::error::Error;

/// Bytes per pixel: one byte each for alpha, red, green, blue.
pub const PIXEL_BYTES: usize = 4;

/// A writable view into the host's bitmap for one frame.
pub struct FrameBuffer<'a> {
    width: usize,
    height: usize,
    pitch: usize,
    pixel_bytes: usize,
    data: &'a mut [u8],
}

impl<'a> FrameBuffer<'a> {
    /// Wrap host pixel storage, validating that it can back the declared
    /// dimensions. `pitch` is in bytes; the last row does not need trailing
    /// padding.
    pub fn new(data: &'a mut [u8], width: usize, height: usize, pitch: usize) -> Result<Self, Error> {
        let row_bytes = width * PIXEL_BYTES;
        if pitch < row_bytes {
            return Err(Error::PitchTooSmall { pitch, row_bytes });
        }
        let needed = if height == 0 { 0 } else { (height - 1) * pitch + row_bytes };
        if data.len() < needed {
            return Err(Error::BufferTooSmall { needed, actual: data.len() });
        }
        Ok(Self { width, height, pitch, pixel_bytes: PIXEL_BYTES, data })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Byte offset of the pixel at (x, y).
    ///
    /// Callers must guarantee `x < width` and `y < height`; no bounds check
    /// is performed here.
    #[inline]
    pub fn pixel_offset(&self, x: usize, y: usize) -> usize {
        x * self.pixel_bytes + y * self.pitch
    }

    #[inline]
    fn load(&self, offset: usize) -> Color {
        Color(u32::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]))
    }

    #[inline]
    fn store(&mut self, offset: usize, color: Color) {
        self.data[offset..offset + 4].copy_from_slice(&color.0.to_le_bytes());
    }

    /// Fill an axis-aligned rectangle, blending by the color's alpha.
    ///
    /// Bounds are rounded to the nearest pixel, then intersected with the
    /// buffer on all four sides; an inverted or fully off-buffer rectangle
    /// touches nothing. Fully opaque colors take an overwrite path that never
    /// reads the destination. No partial coverage at the edges.
    pub fn fill_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64, color: Color) {
        let min_x = (min_x.round() as i64).max(0) as usize;
        let min_y = (min_y.round() as i64).max(0) as usize;
        let max_x = (max_x.round() as i64).clamp(0, self.width as i64) as usize;
        let max_y = (max_y.round() as i64).clamp(0, self.height as i64) as usize;
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for y in min_y..max_y {
            for x in min_x..max_x {
                let offset = self.pixel_offset(x, y);
                if color.a() == 255 {
                    // Overwrite
                    self.store(offset, color);
                } else {
                    // Compositing
                    let dest = self.load(offset);
                    self.store(offset, color.composite(dest));
                }
            }
        }
    }

    /// Debugging fill for frame timing and channel order: a diagonal gradient
    /// that scrolls with `offset`. Touches every pixel; not used by the
    /// particle path.
    pub fn render_gradient(&mut self, offset: u64) {
        for y in 0..self.height {
            for x in 0..self.width {
                let red = offset as u8;
                let green = (y as u64 + offset) as u8;
                let blue = (x as u64 + offset) as u8;
                self.store(self.pixel_offset(x, y), Color::from_channels(0, red, green, blue));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn buffer(width: usize, height: usize, pitch: usize) -> Vec<u8> {
        vec![0u8; if height == 0 { 0 } else { (height - 1) * pitch + width * PIXEL_BYTES }]
    }

    fn pixel(data: &[u8], pitch: usize, x: usize, y: usize) -> u32 {
        let o = x * PIXEL_BYTES + y * pitch;
        u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]])
    }

    #[test]
    fn rejects_undersized_storage() {
        let mut data = vec![0u8; 10];
        match FrameBuffer::new(&mut data, 4, 4, 16) {
            Err(Error::BufferTooSmall { needed, actual }) => {
                assert_eq!(needed, 3 * 16 + 16);
                assert_eq!(actual, 10);
            }
            other => panic!("expected BufferTooSmall, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_pitch_smaller_than_row() {
        let mut data = vec![0u8; 64];
        assert!(matches!(
            FrameBuffer::new(&mut data, 4, 2, 8),
            Err(Error::PitchTooSmall { pitch: 8, row_bytes: 16 })
        ));
    }

    #[test]
    fn opaque_fill_overwrites_clamped_region() {
        let pitch = 4 * PIXEL_BYTES;
        let mut data = buffer(4, 4, pitch);
        {
            let mut fb = FrameBuffer::new(&mut data, 4, 4, pitch).unwrap();
            // Requested rect spills over every edge; only the buffer
            // intersection is written.
            fb.fill_rect(-3.0, -3.0, 10.0, 2.0, Color::from_channels(255, 1, 2, 3));
        }
        let expect = Color::from_channels(255, 1, 2, 3).0;
        for y in 0..4 {
            for x in 0..4 {
                let want = if y < 2 { expect } else { 0 };
                assert_eq!(pixel(&data, pitch, x, y), want, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn offscreen_rect_touches_nothing() {
        let pitch = 4 * PIXEL_BYTES;
        let mut data = buffer(4, 4, pitch);
        {
            let mut fb = FrameBuffer::new(&mut data, 4, 4, pitch).unwrap();
            let white = Color::from_channels(255, 255, 255, 255);
            // Entirely past each of the four edges, plus an inverted rect.
            fb.fill_rect(-10.0, 0.0, -5.0, 4.0, white);
            fb.fill_rect(0.0, -10.0, 4.0, -5.0, white);
            fb.fill_rect(6.0, 0.0, 9.0, 4.0, white);
            fb.fill_rect(0.0, 6.0, 4.0, 9.0, white);
            fb.fill_rect(3.0, 3.0, 1.0, 1.0, white);
        }
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn translucent_fill_composites_against_destination() {
        let pitch = 2 * PIXEL_BYTES;
        let mut data = buffer(2, 1, pitch);
        {
            let mut fb = FrameBuffer::new(&mut data, 2, 1, pitch).unwrap();
            fb.fill_rect(0.0, 0.0, 2.0, 1.0, Color::from_channels(255, 0, 0, 100));
            fb.fill_rect(0.0, 0.0, 1.0, 1.0, Color::from_channels(128, 200, 0, 0));
        }
        let blended = Color(pixel(&data, pitch, 0, 0));
        assert_eq!((blended.r(), blended.b()), (100, 50));
        // Second pixel untouched by the translucent pass.
        assert_eq!(pixel(&data, pitch, 1, 0), Color::from_channels(255, 0, 0, 100).0);
    }

    #[test]
    fn fill_respects_row_padding() {
        // 8 bytes of padding per row must stay zero.
        let pitch = 2 * PIXEL_BYTES + 8;
        let mut data = buffer(2, 3, pitch);
        {
            let mut fb = FrameBuffer::new(&mut data, 2, 3, pitch).unwrap();
            fb.fill_rect(0.0, 0.0, 2.0, 3.0, Color::from_channels(255, 9, 9, 9));
        }
        for y in 0..2 {
            assert!(data[y * pitch + 2 * PIXEL_BYTES..(y + 1) * pitch].iter().all(|&b| b == 0));
        }
        assert_eq!(pixel(&data, pitch, 1, 2), Color::from_channels(255, 9, 9, 9).0);
    }

    #[test]
    fn gradient_touches_every_pixel() {
        let pitch = 3 * PIXEL_BYTES;
        let mut data = buffer(3, 3, pitch);
        {
            let mut fb = FrameBuffer::new(&mut data, 3, 3, pitch).unwrap();
            fb.render_gradient(7);
        }
        for y in 0..3 {
            for x in 0..3 {
                let c = Color(pixel(&data, pitch, x, y));
                assert_eq!(c.r(), 7);
                assert_eq!(c.g(), (y + 7) as u8);
                assert_eq!(c.b(), (x + 7) as u8);
            }
        }
    }
}
