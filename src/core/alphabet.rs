use crate::core::constants::ALPHABET;
use crate::error::GeohashError;

const INVALID: u8 = 0xff;

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// ASCII byte to alphabet index, `INVALID` for bytes outside the alphabet.
static DECODE_TABLE: [u8; 128] = build_decode_table();

/// Returns the 5-bit value (0-31) of a geohash character.
///
/// The lookup is case-sensitive: the alphabet is lower-case.
///
/// # Example
/// ```
/// use geohash_rs::char_to_bits;
///
/// assert_eq!(char_to_bits('0').unwrap(), 0);
/// assert_eq!(char_to_bits('z').unwrap(), 31);
/// assert!(char_to_bits('a').is_err());
/// ```
///
/// # Errors
///
/// - [`GeohashError::InvalidCharacter`] - `c` is not in the alphabet
pub fn char_to_bits(c: char) -> Result<u8, GeohashError> {
    if !c.is_ascii() {
        return Err(GeohashError::InvalidCharacter(c));
    }
    match DECODE_TABLE[c as usize] {
        INVALID => Err(GeohashError::InvalidCharacter(c)),
        bits => Ok(bits),
    }
}

/// Returns the alphabet character for the low 5 bits of `bits`.
pub fn bits_to_char(bits: u8) -> char {
    ALPHABET[(bits & 0x1f) as usize] as char
}
