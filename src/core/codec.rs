use crate::core::alphabet::{bits_to_char, char_to_bits};
use crate::core::bits::{decimal_places, decode_bits, encode_bits, error_bound};
use crate::core::constants::{BITS_PER_CHAR, LAT_RANGE, LNG_RANGE, MAX_ROUNDING_PLACES};
use crate::error::GeohashError;
use geo_types::{Rect, coord};
use serde::{Deserialize, Serialize};

/// Error tolerances, in degrees, that a hash has to cover.
///
/// The encoder allocates just enough bits to each coordinate for its decoded value to
/// stay within the tolerance, so coarser input yields shorter hashes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    lat_error: f64,
    lng_error: f64,
    /// Bits per coordinate when fixed by a target length rather than a tolerance.
    bits: Option<usize>,
}

impl Precision {
    /// Explicit latitude and longitude tolerances in degrees.
    ///
    /// # Errors
    ///
    /// - [`GeohashError::InvalidPrecision`] - a tolerance is zero, negative or not finite
    pub fn from_error(lat_error: f64, lng_error: f64) -> Result<Self, GeohashError> {
        for (name, err) in [("latitude", lat_error), ("longitude", lng_error)] {
            if !err.is_finite() || err <= 0.0 {
                return Err(GeohashError::InvalidPrecision(format!(
                    "{} tolerance must be finite and positive, got {}",
                    name, err
                )));
            }
        }
        Ok(Self {
            lat_error,
            lng_error,
            bits: None,
        })
    }

    /// Tolerances implied by values given to `lat_places` and `lng_places` decimal places.
    ///
    /// `d` places imply half a unit in the last place, `10^-d / 2`; zero places imply 0.5.
    pub fn from_decimals(lat_places: u32, lng_places: u32) -> Self {
        Self {
            lat_error: decimal_error(lat_places),
            lng_error: decimal_error(lng_places),
            bits: None,
        }
    }

    /// Tolerances implied by the decimal digits written in two textual coordinates.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::Precision;
    ///
    /// assert_eq!(Precision::from_text("37.8324", "112.5"), Precision::from_decimals(4, 1));
    /// assert_eq!(Precision::from_text("42", "-71"), Precision::from_decimals(0, 0));
    /// ```
    pub fn from_text(lat: &str, lng: &str) -> Self {
        Self::from_decimals(fraction_digits(lat), fraction_digits(lng))
    }

    /// Tolerances implied by the shortest decimal form that round-trips each `f64`.
    ///
    /// `37.8324` infers four decimal places, `42.0` infers none.
    pub fn infer(lat: f64, lng: f64) -> Self {
        Self::from_text(&lat.to_string(), &lng.to_string())
    }

    /// Tolerances that make the encoder emit exactly `length` characters.
    ///
    /// The bit count is fixed directly, so lengths whose error bound underflows `f64`
    /// still come out exact.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::{Precision, encode_with_precision};
    ///
    /// let hash = encode_with_precision(-33.8688, 151.2093, &Precision::for_length(5), 12);
    /// assert_eq!(hash.len(), 5);
    /// ```
    pub fn for_length(length: usize) -> Self {
        let bits = length * BITS_PER_CHAR / 2;
        Self {
            lat_error: error_bound(bits, LAT_RANGE[0], LAT_RANGE[1]),
            lng_error: error_bound(bits, LNG_RANGE[0], LNG_RANGE[1]),
            bits: Some(bits),
        }
    }

    pub fn lat_error(&self) -> f64 {
        self.lat_error
    }

    pub fn lng_error(&self) -> f64 {
        self.lng_error
    }
}

fn decimal_error(places: u32) -> f64 {
    10f64.powi(-(places.min(i32::MAX as u32) as i32)) / 2.0
}

fn fraction_digits(text: &str) -> u32 {
    text.trim()
        .split_once('.')
        .map(|(_, frac)| frac.chars().take_while(char::is_ascii_digit).count())
        .unwrap_or(0) as u32
}

/// Picks `(lat_bits, lng_bits)` for a precision, padded so the total packs into whole
/// characters.
fn allocate_bits(precision: &Precision) -> (usize, usize) {
    let bits = precision.bits.unwrap_or_else(|| {
        let lat_bits = bits_for_tolerance(LAT_RANGE, precision.lat_error);
        let lng_bits = bits_for_tolerance(LNG_RANGE, precision.lng_error);
        lat_bits.max(lng_bits)
    });
    let (mut lat_bits, mut lng_bits) = (bits, bits);
    let mut add_lng = true;
    while (lat_bits + lng_bits) % BITS_PER_CHAR != 0 {
        if add_lng {
            lng_bits += 1;
        } else {
            lat_bits += 1;
        }
        add_lng = !add_lng;
    }

    (lat_bits, lng_bits)
}

fn bits_for_tolerance(range: [f64; 2], tolerance: f64) -> usize {
    let mut bits = 1;
    let mut err = (range[1] - range[0]) / 4.0;
    while err > tolerance {
        bits += 1;
        err /= 2.0;
    }
    bits
}

/// Interleaves two bit streams, longitude first. The streams may differ in length.
fn interleave(lng_bits: &[bool], lat_bits: &[bool]) -> Vec<bool> {
    let mut combined = Vec::with_capacity(lng_bits.len() + lat_bits.len());
    let mut lng_iter = lng_bits.iter();
    let mut lat_iter = lat_bits.iter();

    loop {
        match (lng_iter.next(), lat_iter.next()) {
            (None, None) => break,
            (lng, lat) => {
                combined.extend(lng);
                combined.extend(lat);
            }
        }
    }

    combined
}

/// Encodes a coordinate into a geohash of at most `max_length` characters.
///
/// The hash is sized from the decimal digits of the inputs (see [`Precision::infer`]):
/// a coordinate given to four decimal places gets just enough characters to cover that
/// precision, even when `max_length` allows more.
///
/// # Example
/// ```
/// use geohash_rs::encode;
///
/// assert_eq!(encode(42.6, -5.6, 12), "ezs42");
/// assert_eq!(encode(37.8324, 112.5584, 12), "ww8p1r4t8");
/// assert_eq!(encode(37.8324, 112.5584, 5), "ww8p1");
/// ```
pub fn encode(lat: f64, lng: f64, max_length: usize) -> String {
    encode_with_precision(lat, lng, &Precision::infer(lat, lng), max_length)
}

/// Encodes a coordinate with explicit error tolerances.
///
/// # Process
///
/// 1. Allocates bits per coordinate until its error bound is within the tolerance
/// 2. Equalizes both counts, then pads longitude and latitude alternately to a multiple of 5
/// 3. Bisects latitude over [-90, 90] and longitude over [-180, 180]
/// 4. Interleaves the bit streams, longitude first
/// 5. Maps every 5 bits to an alphabet character and truncates to `max_length`
///
/// # Example
/// ```
/// use geohash_rs::{Precision, encode_with_precision};
///
/// let hash = encode_with_precision(57.64911, 10.40744, &Precision::for_length(6), 12);
/// assert_eq!(hash, "u4pruy");
/// ```
pub fn encode_with_precision(
    lat: f64,
    lng: f64,
    precision: &Precision,
    max_length: usize,
) -> String {
    let (lat_bits, lng_bits) = allocate_bits(precision);
    tracing::trace!(lat, lng, lat_bits, lng_bits, "allocated geohash bits");

    let lat_stream = encode_bits(lat, LAT_RANGE[0], LAT_RANGE[1], lat_bits);
    let lng_stream = encode_bits(lng, LNG_RANGE[0], LNG_RANGE[1], lng_bits);
    let combined = interleave(&lng_stream, &lat_stream);

    combined
        .chunks(BITS_PER_CHAR)
        .take(max_length)
        .map(|chunk| bits_to_char(chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8)))
        .collect()
}

/// Center of a decoded hash with its error bounds, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedHash {
    pub lat: f64,
    pub lng: f64,
    /// Half the cell height in degrees
    pub lat_error: f64,
    /// Half the cell width in degrees
    pub lng_error: f64,
}

impl DecodedHash {
    /// Center rounded to the decimal places its error bounds make meaningful.
    pub fn rounded(&self) -> (f64, f64) {
        (
            round_to(self.lat, decimal_places(self.lat_error)),
            round_to(self.lng, decimal_places(self.lng_error)),
        )
    }

    /// Cell rectangle with x as longitude and y as latitude.
    pub fn bounds(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.lng - self.lng_error, y: self.lat - self.lat_error },
            coord! { x: self.lng + self.lng_error, y: self.lat + self.lat_error },
        )
    }
}

fn round_to(value: f64, places: Option<u32>) -> f64 {
    match places {
        Some(p) if p <= MAX_ROUNDING_PLACES => {
            let factor = 10f64.powi(p as i32);
            (value * factor).round() / factor
        }
        _ => value,
    }
}

/// Decodes a geohash into its unrounded cell center and error bounds.
///
/// # Errors
///
/// - [`GeohashError::EmptyInput`] - `hash` is empty
/// - [`GeohashError::InvalidCharacter`] - `hash` contains a character outside the alphabet
pub fn decode_exact(hash: &str) -> Result<DecodedHash, GeohashError> {
    if hash.is_empty() {
        return Err(GeohashError::EmptyInput);
    }

    let half = hash.len() * BITS_PER_CHAR / 2 + 1;
    let mut lat_bits = Vec::with_capacity(half);
    let mut lng_bits = Vec::with_capacity(half);
    let mut position = 0usize;

    for c in hash.chars() {
        let value = char_to_bits(c)?;
        for shift in (0..BITS_PER_CHAR).rev() {
            let bit = (value >> shift) & 1 == 1;
            if position % 2 == 0 {
                lng_bits.push(bit);
            } else {
                lat_bits.push(bit);
            }
            position += 1;
        }
    }

    Ok(DecodedHash {
        lat: decode_bits(&lat_bits, LAT_RANGE[0], LAT_RANGE[1]),
        lng: decode_bits(&lng_bits, LNG_RANGE[0], LNG_RANGE[1]),
        lat_error: error_bound(lat_bits.len(), LAT_RANGE[0], LAT_RANGE[1]),
        lng_error: error_bound(lng_bits.len(), LNG_RANGE[0], LNG_RANGE[1]),
    })
}

/// Decodes a geohash into `(lat, lng)`, rounded to the precision the hash carries.
///
/// # Example
/// ```
/// use geohash_rs::decode;
///
/// let (lat, lng) = decode("ww8p1r4t8").unwrap();
/// assert_eq!((lat, lng), (37.8324, 112.5584));
/// ```
///
/// # Errors
///
/// - [`GeohashError::EmptyInput`] - `hash` is empty
/// - [`GeohashError::InvalidCharacter`] - `hash` contains a character outside the alphabet
pub fn decode(hash: &str) -> Result<(f64, f64), GeohashError> {
    Ok(decode_exact(hash)?.rounded())
}

/// Returns the rectangle covered by a geohash (x = longitude, y = latitude).
pub fn bounds(hash: &str) -> Result<Rect<f64>, GeohashError> {
    Ok(decode_exact(hash)?.bounds())
}
