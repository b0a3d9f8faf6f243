/// Split a packed `0xRRGGBB` value into linear-ish float channels
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Pack float channels back into `0xRRGGBB`, clamping each to [0, 1]
pub fn hex_from_rgb(rgb: [f32; 3]) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(rgb[0]) << 16) | (channel(rgb[1]) << 8) | channel(rgb[2])
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = (h * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex_grey() {
        let rgb = rgb_from_hex(0xcccccc);
        for c in rgb {
            assert!((c - 0.8).abs() < 0.01);
        }
    }

    #[test]
    fn test_hex_round_trip_primary() {
        assert_eq!(hex_from_rgb(rgb_from_hex(0x66ccff)), 0x66ccff);
        assert_eq!(hex_from_rgb([2.0, -1.0, 0.0]), 0xff0000);
    }

    #[test]
    fn test_hsv_to_rgb_red() {
        let rgb = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!(rgb[1].abs() < 0.01);
        assert!(rgb[2].abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_white() {
        let rgb = hsv_to_rgb(0.0, 0.0, 1.0);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!((rgb[1] - 1.0).abs() < 0.01);
        assert!((rgb[2] - 1.0).abs() < 0.01);
    }
}
