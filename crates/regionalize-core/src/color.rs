//! Channels of 32 bpp pixels
//!
//! Color pixels are laid out as `0xRRGGBBAA`. Channel indices count from
//! the most significant byte.

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const ALPHA: usize = 3;

/// Byte `channel` of `pixel`, 0 being the most significant. Indices past
/// [`ALPHA`] read the alpha byte.
#[inline]
pub fn channel(pixel: u32, channel: usize) -> u8 {
    pixel.to_be_bytes()[channel.min(ALPHA)]
}

#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

/// Opaque color.
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    compose_rgba(r, g, b, u8::MAX)
}

#[inline]
pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = pixel.to_be_bytes();
    (r, g, b, a)
}

#[inline]
pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
    let (r, g, b, _) = extract_rgba(pixel);
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order() {
        let p = compose_rgba(1, 2, 3, 4);
        assert_eq!(p, 0x0102_0304);
        assert_eq!(extract_rgba(p), (1, 2, 3, 4));
        assert_eq!(channel(p, RED), 1);
        assert_eq!(channel(p, GREEN), 2);
        assert_eq!(channel(p, ALPHA), 4);
        assert_eq!(channel(p, 7), 4);
    }

    #[test]
    fn test_rgb_is_opaque() {
        let p = compose_rgb(10, 20, 30);
        assert_eq!(channel(p, ALPHA), 255);
        assert_eq!(extract_rgb(p), (10, 20, 30));
    }
}
