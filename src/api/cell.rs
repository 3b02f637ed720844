use crate::core::codec::{Precision, decode_exact, encode_with_precision};
use crate::core::distance::distance_between;
use crate::core::neighbors::{Direction, Neighbors, adjacent, neighbors};
use crate::error::GeohashError;
use crate::util::coord::Coordinate;
use geo_types::{Point, Polygon, Rect, coord};

/// A single geohash cell.
///
/// Each `GeohashCell` carries its hash, the center of the rectangle the hash covers, and
/// the half-extent of that rectangle in degrees.
///
/// # Example
///
/// ```
/// use geohash_rs::GeohashCell;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// // From (lng, lat)
/// let cell = GeohashCell::from_wgs84(&(-5.6, 42.6), 5);
/// assert_eq!(cell.hash, "ezs42");
///
/// // Back from the hash
/// let restored = GeohashCell::from_hash("ezs42")?;
/// assert_eq!(cell, restored);
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeohashCell {
    /// Geohash string for this cell
    pub hash: String,
    /// Cell center as (longitude, latitude)
    pub center: Point<f64>,
    /// Half the cell height in degrees
    pub lat_error: f64,
    /// Half the cell width in degrees
    pub lng_error: f64,
}

impl GeohashCell {
    /// Create a GeohashCell from an existing hash.
    ///
    /// # Errors
    ///
    /// - [`GeohashError::EmptyInput`] - `hash` is empty
    /// - [`GeohashError::InvalidCharacter`] - `hash` contains a character outside the alphabet
    pub fn from_hash(hash: &str) -> Result<Self, GeohashError> {
        let decoded = decode_exact(hash)?;

        Ok(Self {
            hash: hash.to_string(),
            center: Point::new(decoded.lng, decoded.lat),
            lat_error: decoded.lat_error,
            lng_error: decoded.lng_error,
        })
    }

    /// Create the cell of exactly `length` characters containing a WGS84 (lng, lat) coordinate.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::GeohashCell;
    /// use geo_types::Point;
    ///
    /// let cell = GeohashCell::from_wgs84(&Point::new(10.40744, 57.64911), 11);
    /// assert_eq!(cell.hash, "u4pruydqqvj");
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate, length: usize) -> Self {
        let hash = encode_with_precision(
            coord.lat(),
            coord.lng(),
            &Precision::for_length(length),
            length,
        );

        match decode_exact(&hash) {
            Ok(decoded) => Self {
                hash,
                center: Point::new(decoded.lng, decoded.lat),
                lat_error: decoded.lat_error,
                lng_error: decoded.lng_error,
            },
            // Only a zero length produces an empty hash, which covers the whole globe.
            Err(_) => Self {
                hash,
                center: Point::new(0.0, 0.0),
                lat_error: 90.0,
                lng_error: 180.0,
            },
        }
    }

    /// Returns the latitude of the cell center.
    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    /// Returns the longitude of the cell center.
    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    /// Number of characters in the hash.
    pub fn level(&self) -> usize {
        self.hash.len()
    }

    /// Returns the cell rectangle with x as longitude and y as latitude.
    pub fn bounds(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.longitude() - self.lng_error, y: self.latitude() - self.lat_error },
            coord! { x: self.longitude() + self.lng_error, y: self.latitude() + self.lat_error },
        )
    }

    /// Converts this cell to a rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds().to_polygon()
    }

    /// Whether a (lng, lat) coordinate falls inside the cell, edges included.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let rect = self.bounds();
        (rect.min().x..=rect.max().x).contains(&coord.lng())
            && (rect.min().y..=rect.max().y).contains(&coord.lat())
    }

    /// Hashes of the eight surrounding cells.
    pub fn neighbors(&self) -> Result<Neighbors, GeohashError> {
        neighbors(&self.hash)
    }

    /// The adjacent cell in `direction`.
    pub fn neighbor(&self, direction: Direction) -> Result<Self, GeohashError> {
        Self::from_hash(&adjacent(&self.hash, direction)?)
    }

    /// Great-circle distance in meters between the two cell centers.
    pub fn distance_to(&self, other: &GeohashCell) -> u64 {
        distance_between(&self.center, &other.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wgs84_tuple() {
        let cell = GeohashCell::from_wgs84(&(112.5584, 37.8324), 9);

        assert_eq!(cell.hash, "ww8p1r4t8");
        assert_eq!(cell.level(), 9);
        assert!((cell.latitude() - 37.8324).abs() <= cell.lat_error);
        assert!((cell.longitude() - 112.5584).abs() <= cell.lng_error);
    }

    #[test]
    fn test_from_wgs84_point() {
        let from_tuple = GeohashCell::from_wgs84(&(121.47, 31.23), 7);
        let from_point = GeohashCell::from_wgs84(&Point::new(121.47, 31.23), 7);

        assert_eq!(from_tuple, from_point);
        assert_eq!(from_tuple.hash, "wtw3sj5");
    }

    #[test]
    fn test_from_wgs84_zero_length() {
        let cell = GeohashCell::from_wgs84(&(121.47, 31.23), 0);
        assert!(cell.hash.is_empty());
        assert_eq!(cell.bounds().width(), 360.0);
    }

    #[test]
    fn test_from_hash_invalid() {
        assert_eq!(GeohashCell::from_hash(""), Err(GeohashError::EmptyInput));
        assert!(GeohashCell::from_hash("ezs4i").is_err());
    }

    #[test]
    fn test_same_point_same_cell() {
        let cell1 = GeohashCell::from_wgs84(&(-5.6, 42.6), 6);
        let cell2 = GeohashCell::from_wgs84(&(-5.6, 42.6), 6);
        assert_eq!(cell1, cell2);

        // A point close to the center lands in the same cell
        let nudged = (cell1.longitude() + cell1.lng_error / 2.0, cell1.latitude());
        assert_eq!(GeohashCell::from_wgs84(&nudged, 6).hash, cell1.hash);
    }

    #[test]
    fn test_bounds_and_polygon() -> Result<(), GeohashError> {
        let cell = GeohashCell::from_hash("ezs42")?;
        let rect = cell.bounds();

        assert!(cell.contains(&(-5.6, 42.6)));
        assert!(!cell.contains(&(-5.0, 42.6)));
        assert!((rect.height() - 2.0 * cell.lat_error).abs() < 1e-12);
        assert_eq!(cell.to_polygon().exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_neighbor_cells_touch() -> Result<(), GeohashError> {
        let cell = GeohashCell::from_hash("9q8yyk")?;
        let top = cell.neighbor(Direction::Top)?;
        let right = cell.neighbor(Direction::Right)?;

        assert_eq!(top.hash, "9q8yym");
        assert!((top.bounds().min().y - cell.bounds().max().y).abs() < 1e-9);
        assert!((right.bounds().min().x - cell.bounds().max().x).abs() < 1e-9);
        assert_eq!(cell.neighbors()?.right, right.hash);
        Ok(())
    }

    #[test]
    fn test_distance_to_neighbor() -> Result<(), GeohashError> {
        let cell = GeohashCell::from_hash("ezs42")?;
        let top = cell.neighbor(Direction::Top)?;

        // Cell height at 5 characters is about 4.9 km
        let d = cell.distance_to(&top);
        assert!(d > 4_000 && d < 6_000, "got {d}");
        assert_eq!(cell.distance_to(&cell), 0);
        Ok(())
    }
}
