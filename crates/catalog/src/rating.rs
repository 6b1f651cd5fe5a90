//! Star-rating breakdown for product cards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Whole stars for the integer part, one half star for any fractional part, and
/// empty stars up to five.
pub fn stars(rating: f32) -> Vec<Star> {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() != 0.0;
    let empty = 5 - rating.ceil() as usize;

    let mut out = Vec::with_capacity(5);
    out.extend(std::iter::repeat_n(Star::Full, full));
    if half {
        out.push(Star::Half);
    }
    out.extend(std::iter::repeat_n(Star::Empty, empty));
    out
}
