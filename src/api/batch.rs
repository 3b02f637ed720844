use crate::api::cell::GeohashCell;
use crate::core::codec::{decode, encode};
use crate::error::GeohashError;
use crate::util::coord::Coordinate;
use rayon::prelude::*;

/// Encodes many (lng, lat) coordinates in parallel, preserving input order.
///
/// Each hash is sized from the decimal digits of its own coordinate, as with [`encode`].
///
/// # Example
/// ```
/// use geohash_rs::encode_batch;
///
/// let hashes = encode_batch(&[(-5.6, 42.6), (112.5584, 37.8324)], 12);
/// assert_eq!(hashes, vec!["ezs42", "ww8p1r4t8"]);
/// ```
pub fn encode_batch<C: Coordinate + Sync>(coords: &[C], max_length: usize) -> Vec<String> {
    coords
        .par_iter()
        .map(|c| encode(c.lat(), c.lng(), max_length))
        .collect()
}

/// Decodes many hashes in parallel. Each entry fails independently.
pub fn decode_batch<S: AsRef<str> + Sync>(hashes: &[S]) -> Vec<Result<(f64, f64), GeohashError>> {
    hashes.par_iter().map(|h| decode(h.as_ref())).collect()
}

/// Builds the cell of exactly `length` characters for each coordinate in parallel.
pub fn cells_from_coords<C: Coordinate + Sync>(coords: &[C], length: usize) -> Vec<GeohashCell> {
    coords
        .par_iter()
        .map(|c| GeohashCell::from_wgs84(c, length))
        .collect()
}
