// Packed and normalized pixel colors.
//
// All color math runs on DoubleColor (one f64 per channel) so repeated
// blends don't pick up integer rounding artifacts; Color is the packed
// 0xAARRGGBB form the framebuffer actually stores.

/// Packed 32-bit ARGB color, one byte per channel (alpha in the high byte).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color(pub u32);

impl Color {
    #[inline]
    pub fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub fn a(self) -> u8 { (self.0 >> 24) as u8 }
    #[inline]
    pub fn r(self) -> u8 { (self.0 >> 16) as u8 }
    #[inline]
    pub fn g(self) -> u8 { (self.0 >> 8) as u8 }
    #[inline]
    pub fn b(self) -> u8 { self.0 as u8 }

    /// Quantize a normalized color to packed form.
    ///
    /// Each channel is scaled by 255 and rounded to nearest (half away from
    /// zero). Channels are expected to already be in [0.0, 1.0]; values
    /// outside that range are a caller bug and are not clamped here.
    #[inline]
    pub fn from_normalized(c: DoubleColor) -> Self {
        Self::from_channels(
            (c.a * 255.0).round() as u8,
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        )
    }

    /// Straight-alpha blend of `self` over `dest`.
    ///
    /// Each of r/g/b moves from `dest` toward `self` by `self.a / 255`; the
    /// result keeps `self`'s alpha. Destination alpha is discarded, which
    /// matches an opaque framebuffer.
    pub fn composite(self, dest: Color) -> Color {
        let t = self.a() as f64 / 255.0;
        Color::from_channels(
            self.a(),
            lerp(dest.r(), self.r(), t),
            lerp(dest.g(), self.g(), t),
            lerp(dest.b(), self.b(), t),
        )
    }
}

/// Normalized color, each channel in [0.0, 1.0].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DoubleColor {
    pub a: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl DoubleColor {
    /// Unpack a 0xAARRGGBB integer, dividing each byte by 255.
    pub fn from_packed(c: u32) -> Self {
        Self {
            a: ((c >> 24) & 0xff) as f64 / 255.0,
            r: ((c >> 16) & 0xff) as f64 / 255.0,
            g: ((c >> 8) & 0xff) as f64 / 255.0,
            b: (c & 0xff) as f64 / 255.0,
        }
    }
}

#[inline]
fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}
