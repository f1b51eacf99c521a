use std::f32::consts::PI;

/// Linear RGB color with channels in the unit range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Quantise to 8-bit RGBA with full alpha. Out-of-range channels
    /// saturate at the cast.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            255,
        ]
    }
}

/// Maps an escape count to its display color through a fixed sinusoid
/// palette.
///
/// Counts at or above the cap are interior and render black, so the set
/// stays solid at every zoom level. Escaped counts spread over one sine
/// period, with the green and blue channels phase shifted by a third of a
/// turn each, so consecutive counts shade smoothly and the low-count
/// exterior stays distinct from the interior. The angle is computed in
/// `f32`; the palette is a display map, not a measurement.
pub fn color_for(count: u32, max_count: u32) -> Rgb {
    if count >= max_count {
        return Rgb::BLACK;
    }
    let angle = 2.0 * PI * count as f32 / max_count as f32;
    let third = 2.0 * PI / 3.0;
    Rgb {
        r: 0.5 * angle.sin() + 0.5,
        g: 0.5 * (angle + third).sin() + 0.5,
        b: 0.5 * (angle + 2.0 * third).sin() + 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_count_is_black() {
        assert_eq!(color_for(256, 256), Rgb::BLACK);
        assert_eq!(color_for(300, 256), Rgb::BLACK);
        assert_eq!(color_for(1, 1), Rgb::BLACK);
    }

    #[test]
    fn zero_count_sits_at_phase_origin() {
        let c = color_for(0, 256);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.933).abs() < 1e-3);
        assert!((c.b - 0.067).abs() < 1e-3);
    }

    #[test]
    fn channels_stay_in_unit_range() {
        for count in 0..256 {
            let c = color_for(count, 256);
            for channel in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&channel), "count {count}: {channel}");
            }
        }
    }

    #[test]
    fn nearby_counts_shade_smoothly() {
        // One count step moves the angle by 2π/max, so adjacent colors stay
        // close everywhere along the ramp.
        for count in 0..255 {
            let a = color_for(count, 256);
            let b = color_for(count + 1, 256);
            let dr = (a.r - b.r).abs();
            let dg = (a.g - b.g).abs();
            let db = (a.b - b.b).abs();
            assert!(dr.max(dg).max(db) < 0.02, "jump at count {count}");
        }
    }

    #[test]
    fn same_ratio_different_cap_changes_color() {
        // The angle depends on count / max, not count alone.
        let shallow = color_for(10, 64);
        let deep = color_for(10, 1024);
        assert_ne!(shallow, deep);
    }

    #[test]
    fn rgba8_quantisation_saturates_and_fills_alpha() {
        let px = Rgb {
            r: 1.0,
            g: 0.0,
            b: 2.0,
        }
        .to_rgba8();
        assert_eq!(px, [255, 0, 255, 255]);
        assert_eq!(Rgb::BLACK.to_rgba8(), [0, 0, 0, 255]);
    }
}
