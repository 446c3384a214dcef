//! Deterministic chart palette: N alpha shades of one base color.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// An RGB triple plus alpha, ready for chart consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
    }
}

/// Derive `count` shades of a `#RRGGBB` color.
///
/// Shade `i` keeps the base RGB triple with alpha `max(0.2, 1 - 0.1 * i)`,
/// so alphas decrease and floor at 0.2; past eight shades the trailing
/// entries become visually identical, which callers accept.
pub fn shades(base_hex: &str, count: usize) -> Result<Vec<Rgba>> {
    let (r, g, b) = parse_hex(base_hex)?;
    Ok((0..count)
        .map(|i| Rgba {
            r,
            g,
            b,
            a: (1.0 - 0.1 * i as f64).max(0.2),
        })
        .collect())
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        bail!("invalid hex color '{hex}' (expected #RRGGBB)");
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .with_context(|| format!("invalid hex color '{hex}'"))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
