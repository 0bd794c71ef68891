//! Plain color values carried by picker styling attributes.

/// A color in the sRGB color space with an alpha component.
///
/// Values are stored as `f32`s, typically in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Color = Color::new(0.8, 0.8, 0.8, 1.0);

    /// Creates a color from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Packs the channels into `0xAARRGGBB`, rounding each to 8 bits.
    pub fn to_argb(self) -> u32 {
        u32::from_be_bytes([byte(self.a), byte(self.r), byte(self.g), byte(self.b)])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(channel(r), channel(g), channel(b), 1.0)
    }
}

const fn channel(value: u8) -> f32 {
    value as f32 / 255.0
}

fn byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let purple = Color::from_argb(0xFF37_00B3);
        assert_eq!(purple, Color::from([0x37, 0x00, 0xB3]));
        assert_eq!(purple.with_alpha(0.3).a, 0.3);
        assert_eq!(purple.to_argb(), 0xFF37_00B3);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_argb(), 0xFFFF_0080);
    }
}
