//! Integer RGB <-> HSV conversion for color dynamics
//!
//! Hue is in degrees (0..360), saturation and value in 0..255, matching the
//! units the color dynamics settings are expressed in.

use crate::constants::HUE_RANGE;

/// An HSV color with integer channels
///
/// Channels may temporarily leave their ranges while dynamics are applied;
/// call [`Hsv::normalized`] before converting back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: i32,
    pub s: i32,
    pub v: i32,
}

impl Hsv {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(i32::from);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let v = max;
        let s = if max != 0 {
            (max - min) as f32 * 255.0 / max as f32
        } else {
            0.0
        };

        let h = if s == 0.0 {
            0.0
        } else {
            let delta = (max - min) as f32;
            let sector = if r == max {
                (g - b) as f32 / delta
            } else if g == max {
                2.0 + (b - r) as f32 / delta
            } else {
                4.0 + (r - g) as f32 / delta
            };
            let mut h = sector * 60.0;
            if h < 0.0 {
                h += 360.0;
            }
            h
        };

        Self {
            h: h.round() as i32,
            s: s.round() as i32,
            v,
        }
    }

    /// Wrap hue into `[0, 360)` and clamp saturation and value into `[0, 255]`
    pub fn normalized(self) -> Self {
        Self {
            h: self.h.rem_euclid(HUE_RANGE),
            s: self.s.clamp(0, 255),
            v: self.v.clamp(0, 255),
        }
    }

    /// Convert back to RGB. Out-of-range channels are normalized first.
    pub fn to_rgb(self) -> [u8; 3] {
        let Hsv { h, s, v } = self.normalized();
        if s == 0 {
            let v = v as u8;
            return [v, v, v];
        }

        let h = h as f32 / 60.0;
        let s = s as f32 / 255.0;
        let v = v as f32 / 255.0;

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        [r, g, b].map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }
}
