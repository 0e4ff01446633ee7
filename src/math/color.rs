/// Split a `0xRRGGBB` value into normalized sRGB channels
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Hex colour converted for shading on an sRGB surface
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_rgb(hex).map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_grey() {
        let rgb = hex_to_rgb(0xCCCCCC);
        for c in rgb {
            assert!((c - 0.8).abs() < 0.001);
        }
    }

    #[test]
    fn test_hex_to_rgb_channels() {
        assert_eq!(hex_to_rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00FF00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_rgb(0x0000FF), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_to_linear(0xFFFFFF);
        for c in white {
            assert!((c - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_linear_darker_than_srgb() {
        let srgb = hex_to_rgb(0xCCCCCC)[0];
        let linear = hex_to_linear(0xCCCCCC)[0];
        assert!(linear < srgb);
        assert!((linear - 0.6038).abs() < 0.001);
    }
}
