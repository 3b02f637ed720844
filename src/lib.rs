//! # geohash-rs
//!
//! A geohash codec: coordinates to short, sortable base-32 strings and back, the eight
//! cells around a hash, and haversine distance.
//!
//! ### 1. Functions - Encode, Decode, Neighbors, Distance
//!
//! ```
//! use geohash_rs::{decode, distance, encode, neighbors};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! // Hash length follows the decimal digits of the input
//! let hash = encode(37.8324, 112.5584, 12);
//! assert_eq!(hash, "ww8p1r4t8");
//!
//! let (lat, lng) = decode(&hash)?;
//! assert_eq!((lat, lng), (37.8324, 112.5584));
//!
//! let around = neighbors("9q8yyk")?;
//! assert_eq!(around.left, "9q8yyh");
//!
//! let meters = distance(31.23, 121.47, 39.9042, 116.4074);
//! assert!(meters > 1_000_000);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GeohashCell` and `GeohashGrid` - Cells and Collections of Cells
//!
//! ```
//! use geohash_rs::{Direction, GeohashCell, GeohashGrid};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let cell = GeohashCell::from_wgs84(&(-5.6, 42.6), 5);
//! let north = cell.neighbor(Direction::Top)?;
//! println!("{} -> {}", cell.hash, north.hash);
//!
//! let grid = GeohashGrid::builder()
//!     .length(5)
//!     .extent(-5.7, 42.5, -5.5, 42.7)
//!     .build()?;
//! assert!(grid.get_cell_at(&(-5.6, 42.6)).is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToGeohash` - CSV File Conversion
//!
//! ```no_run
//! use geohash_rs::{CsvGeohashConfig, CsvToGeohash, GeometryFormat};
//!
//! let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 9)
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "stations.csv".to_geohash_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod error;
pub mod geom;
pub mod util;

pub use crate::core::{
    ALPHABET, BITS_PER_CHAR, DEFAULT_LENGTH, DecodedHash, Direction, EARTH_RADIUS_METERS,
    LAT_RANGE, LNG_RANGE, Neighbors, Precision, adjacent, bits_to_char, bounds, char_to_bits,
    decimal_places, decode, decode_bits, decode_exact, distance, distance_between, encode,
    encode_bits, encode_with_precision, error_bound, neighbors,
};
pub use api::{
    CoordinateSource, CsvGeohashConfig, CsvToGeohash, GeohashCell, GeohashGrid,
    GeohashGridBuilder, GeometryFormat, PrecisionMode, cells_from_coords, csv_to_geohash_csv,
    decode_batch, encode_batch, read_geohash_csv,
};
pub use error::GeohashError;
pub use geom::{parse_geojson, parse_geometry, parse_wkt, representative_points};
pub use util::Coordinate;

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Rect, coord, point};

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeohashError> {
        let hash = encode(57.64911, 10.40744, DEFAULT_LENGTH);
        assert_eq!(hash, "u4pruydqqvj");

        let (lat, lng) = decode(&hash)?;
        assert_eq!((lat, lng), (57.64911, 10.40744));

        let around = neighbors(&hash)?;
        for (direction, neighbor) in around.iter() {
            assert_eq!(neighbor.len(), hash.len());
            assert_eq!(adjacent(neighbor, direction.opposite())?, hash);
        }
        Ok(())
    }

    #[test]
    fn test_cells_and_distance() -> Result<(), GeohashError> {
        let shanghai = GeohashCell::from_wgs84(&point! { x: 121.47, y: 31.23 }, 7);
        let beijing = GeohashCell::from_wgs84(&(116.4074, 39.9042), 7);

        let direct = distance(31.23, 121.47, 39.9042, 116.4074);
        let between_cells = shanghai.distance_to(&beijing);
        assert!(direct.abs_diff(between_cells) < 500);
        Ok(())
    }

    #[test]
    fn test_grid_workflow() -> Result<(), GeohashError> {
        let rect = Rect::new(coord! { x: 112.5, y: 37.8 }, coord! { x: 112.6, y: 37.9 });
        let grid = GeohashGrid::from_rect(&rect, 5)?;

        assert!(!grid.is_empty());
        let cell = grid.get_cell_at(&(112.5584, 37.8324));
        assert_eq!(cell.map(|c| c.hash.as_str()), Some("ww8p1"));

        let polygons = grid.to_polygons();
        assert_eq!(polygons.len(), grid.len());
        Ok(())
    }

    #[test]
    fn test_neighbors_json() -> Result<(), GeohashError> {
        let json = serde_json::to_string(&neighbors("9q8yyk")?)
            .map_err(|e| GeohashError::IoError(e.to_string()))?;
        assert!(json.contains("\"topleft\":\"9q8yyj\""));
        Ok(())
    }
}
