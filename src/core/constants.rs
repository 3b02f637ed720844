/// The 32-symbol geohash alphabet. Omits `a`, `i`, `l` and `o`.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Number of bits carried by one hash character
pub const BITS_PER_CHAR: usize = 5;

/// Default maximum hash length produced by `encode`
pub const DEFAULT_LENGTH: usize = 12;

/// Latitude range [min, max] in degrees
pub const LAT_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude range [min, max] in degrees
pub const LNG_RANGE: [f64; 2] = [-180.0, 180.0];

/// Mean Earth radius in meters used by the haversine distance
pub const EARTH_RADIUS_METERS: f64 = 6_371_393.0;

/// Decimal places beyond which rounding an `f64` coordinate has no effect
pub(crate) const MAX_ROUNDING_PLACES: u32 = 15;
