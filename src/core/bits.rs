//! Binary subdivision of a real interval.
//!
//! A value is quantized by repeatedly halving `[min, max]` and recording which half it
//! falls in; decoding replays the halvings and returns the midpoint of what is left.

/// Quantizes `value` into `bit_count` bits over `[min, max]`.
///
/// Each step emits `true` and keeps the upper half when `value` is strictly greater than
/// the midpoint, otherwise emits `false` and keeps the lower half.
///
/// # Example
/// ```
/// use geohash_rs::encode_bits;
///
/// assert_eq!(encode_bits(42.6, -90.0, 90.0, 3), vec![true, false, true]);
/// assert!(encode_bits(42.6, -90.0, 90.0, 0).is_empty());
/// ```
pub fn encode_bits(value: f64, min: f64, max: f64, bit_count: usize) -> Vec<bool> {
    let (mut lo, mut hi) = (min, max);
    let mut bits = Vec::with_capacity(bit_count);

    for _ in 0..bit_count {
        let mid = (lo + hi) / 2.0;
        if value > mid {
            bits.push(true);
            lo = mid;
        } else {
            bits.push(false);
            hi = mid;
        }
    }

    bits
}

/// Reconstructs the midpoint of the sub-interval selected by `bits` over `[min, max]`.
pub fn decode_bits(bits: &[bool], min: f64, max: f64) -> f64 {
    let (mut lo, mut hi) = (min, max);

    for &bit in bits {
        let mid = (lo + hi) / 2.0;
        if bit {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    (lo + hi) / 2.0
}

/// Maximum deviation of a decoded value from the input value, given `bit_count` bits over
/// `[min, max]`.
pub fn error_bound(bit_count: usize, min: f64, max: f64) -> f64 {
    let mut err = (max - min) / 2.0;
    for _ in 0..bit_count {
        err /= 2.0;
    }
    err
}

/// Number of meaningful decimal places for a value known to within `error`.
///
/// Returns `None` when `error` is zero, negative or not finite, where the logarithm is
/// undefined. Callers treat that as maximum precision.
pub fn decimal_places(error: f64) -> Option<u32> {
    if !error.is_finite() || error <= 0.0 {
        return None;
    }
    let places = (-error.log10()).round().max(1.0) - 1.0;
    Some(places as u32)
}
