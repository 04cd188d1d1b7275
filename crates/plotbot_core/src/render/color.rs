//! Deterministic per-label colors.
//!
//! # Responsibility
//! - Map a point label to a stable, visually distinct color.
//!
//! # Invariants
//! - The same label yields the same color in every process.

use plotters::style::RGBColor;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const SATURATIONS: [f64; 3] = [0.50, 0.65, 0.80];
const VALUES: [f64; 3] = [0.70, 0.80, 0.90];

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = h * 6.0;
    let sector = h.floor() as i64;
    let f = h - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector.rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Stable scatter color for one label.
///
/// Hue is taken from an FNV-1a hash of the label; saturation and value
/// come from small fixed palettes so neighboring hues stay legible on a
/// white background.
pub fn label_color(label: &str) -> RGBColor {
    let hash = fnv1a(label.as_bytes());
    let hue = (hash % 360) as f64 / 360.0;
    let saturation = SATURATIONS[((hash >> 16) % 3) as usize];
    let value = VALUES[((hash >> 24) % 3) as usize];

    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    RGBColor(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::{hsv_to_rgb, label_color};

    #[test]
    fn same_label_same_color() {
        assert_eq!(label_color("alice"), label_color("alice"));
    }

    #[test]
    fn different_labels_usually_differ() {
        assert_ne!(label_color("alice"), label_color("bob"));
        assert_ne!(label_color("bob"), label_color("carol"));
    }

    #[test]
    fn hsv_primaries_round_trip() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        let (r, g, b) = hsv_to_rgb(2.0 / 6.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);
    }
}
