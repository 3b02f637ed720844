pub mod alphabet;
pub mod bits;
pub mod codec;
pub mod constants;
pub mod distance;
pub mod neighbors;

pub use alphabet::{bits_to_char, char_to_bits};
pub use bits::{decimal_places, decode_bits, encode_bits, error_bound};
pub use codec::{
    DecodedHash, Precision, bounds, decode, decode_exact, encode, encode_with_precision,
};
pub use constants::{
    ALPHABET, BITS_PER_CHAR, DEFAULT_LENGTH, EARTH_RADIUS_METERS, LAT_RANGE, LNG_RANGE,
};
pub use distance::{distance, distance_between};
pub use neighbors::{Direction, Neighbors, adjacent, neighbors};
