use nalgebra::Vector3;

/// Linear floating-point RGB. Values outside [0, 1] are legal until conversion.
pub type Color = Vector3<f32>;

pub const BLACK: Color = Vector3::new(0.0, 0.0, 0.0);

/// One channel to 8 bits: `clamp(c * 255, 0, 255)` truncated. NaN becomes 0.
#[inline(always)]
pub fn channel_to_u8(c: f32) -> u8 {
    if c.is_nan() {
        return 0;
    }
    (c * 255.0).clamp(0.0, 255.0) as u8
}

#[inline]
pub fn to_rgb8(color: &Color) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_clamps_and_truncates() {
        assert_eq!(to_rgb8(&Color::new(0.0, 1.0, 0.5)), [0, 255, 127]);
        assert_eq!(to_rgb8(&Color::new(-3.0, 7.5, 0.999)), [0, 255, 254]);
        assert_eq!(channel_to_u8(f32::NAN), 0);
        assert_eq!(channel_to_u8(f32::INFINITY), 255);
    }
}
