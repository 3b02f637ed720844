pub mod batch;
pub mod cell;
pub mod geohash_csv;
pub mod grid;

pub use batch::{cells_from_coords, decode_batch, encode_batch};
pub use cell::GeohashCell;
pub use geohash_csv::{
    CoordinateSource, CsvGeohashConfig, CsvToGeohash, GeometryFormat, PrecisionMode,
    csv_to_geohash_csv, read_geohash_csv,
};
pub use grid::{GeohashGrid, GeohashGridBuilder};
