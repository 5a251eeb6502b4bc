//! Shared chart colors, backend independent.

use crate::data::{MOVIE, TV_SHOW};

/// Plain RGB triple, converted into each drawing backend's color type.
pub type Rgb = (u8, u8, u8);

pub const MOVIE_COLOR: Rgb = (229, 9, 20); // #e50914
pub const TV_SHOW_COLOR: Rgb = (105, 87, 160); // #6957a0

/// Colors for content types other than Movie / TV Show.
pub const FALLBACK_PALETTE: [Rgb; 6] = [
    (46, 204, 113),  // Green
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

/// Orange-red sequential scale, light to dark.
const OR_RD: [Rgb; 9] = [
    (255, 247, 236),
    (254, 232, 200),
    (253, 212, 158),
    (253, 187, 132),
    (252, 141, 89),
    (239, 101, 72),
    (215, 48, 31),
    (179, 0, 0),
    (127, 0, 0),
];

/// Line/bar color for a content type. `index` picks the fallback color
/// for unrecognized types.
pub fn type_color(content_type: &str, index: usize) -> Rgb {
    match content_type {
        MOVIE => MOVIE_COLOR,
        TV_SHOW => TV_SHOW_COLOR,
        _ => FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()],
    }
}

/// Color of `count` on the OrRd scale relative to `max`.
pub fn or_rd_shade(count: usize, max: usize) -> Rgb {
    if max == 0 {
        return OR_RD[0];
    }
    let t = (count as f64 / max as f64).clamp(0.0, 1.0);
    let pos = t * (OR_RD.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(OR_RD.len() - 1);
    let frac = pos - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (OR_RD[lower], OR_RD[upper]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}
