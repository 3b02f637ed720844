use crate::api::cell::GeohashCell;
use crate::core::codec::{Precision, decode_exact, encode_with_precision};
use crate::error::GeohashError;
use crate::geom::parse::{parse_geometry, representative_points};
use geo_types::Polygon;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lng_idx: usize, lat_idx: usize },
}

/// How the length of each output hash is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrecisionMode {
    /// Every hash has exactly the configured length.
    #[default]
    FixedLength,
    /// Hashes are sized from the decimal digits written in the coordinate columns, capped
    /// at the configured length. Geometry columns fall back to the digits of each parsed
    /// value.
    FromText,
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lng_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to geohash conversion.
#[derive(Debug, Clone)]
pub struct CsvGeohashConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub length: usize,
    pub precision: PrecisionMode,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvGeohashConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvGeohashConfig;
    ///
    /// let config = CsvGeohashConfig::new("geometry", 9);
    /// ```
    pub fn new(geometry_column: impl Into<String>, length: usize) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            length,
            precision: PrecisionMode::default(),
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::{CsvGeohashConfig, PrecisionMode};
    ///
    /// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 12)
    ///     .precision(PrecisionMode::FromText);
    /// ```
    pub fn from_coords(
        lng_column: impl Into<String>,
        lat_column: impl Into<String>,
        length: usize,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lng_column: lng_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            length,
            precision: PrecisionMode::default(),
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn precision(mut self, mode: PrecisionMode) -> Self {
        self.precision = mode;
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToGeohash {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<(), GeohashError>;
}

impl<P: AsRef<Path>> CsvToGeohash for P {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<(), GeohashError> {
        csv_to_geohash_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Precision for a parsed coordinate. `text` holds the raw cell text when available.
fn precision_for(
    mode: PrecisionMode,
    length: usize,
    (lat, lng): (f64, f64),
    text: Option<(&str, &str)>,
) -> Precision {
    match (mode, text) {
        (PrecisionMode::FixedLength, _) => Precision::for_length(length),
        (PrecisionMode::FromText, Some((lat_text, lng_text))) => {
            Precision::from_text(lat_text, lng_text)
        }
        (PrecisionMode::FromText, None) => Precision::infer(lat, lng),
    }
}

fn parse_coordinate(text: &str, axis: &str) -> Result<f64, GeohashError> {
    text.parse()
        .map_err(|_| GeohashError::CsvError(format!("Invalid {}: '{}'", axis, text)))
}

fn cell_geometry(hash: &str, format: GeometryFormat) -> Result<String, GeohashError> {
    let polygon = decode_exact(hash)?.bounds().to_polygon();
    Ok(match format {
        GeometryFormat::Wkt => polygon_to_wkt(&polygon),
        GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
    })
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with geohashes.
///
/// Streams output row by row. The output starts with a `geohash` column, followed by
/// `geohash_geometry` when cell geometry is requested, then every input column that is
/// neither a source column nor excluded.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvGeohashConfig, GeometryFormat};
///
/// let config = CsvGeohashConfig::new("Geo Shape", 9)
///     .exclude(vec!["Geo Point".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_geohash_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvGeohashConfig, PrecisionMode};
///
/// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 12)
///     .precision(PrecisionMode::FromText);
///
/// csv_to_geohash_csv("stations.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_geohash_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvGeohashConfig,
) -> Result<(), GeohashError> {
    let file = File::open(csv_path).map_err(|e| GeohashError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GeohashError::CsvError(e.to_string()))?
        .clone();

    let column = |name: &str, role: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            GeohashError::CsvError(format!("{} column '{}' not found", role, name))
        })
    };

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column(col.as_str(), "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lng_column,
            lat_column,
        } => {
            let lng_idx = column(lng_column.as_str(), "Longitude")?;
            let lat_idx = column(lat_column.as_str(), "Latitude")?;
            (
                SourceIndices::Coordinates { lng_idx, lat_idx },
                HashSet::from([lng_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeohashError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohash"];
    if config.include_cell_geometry.is_some() {
        header_row.push("geohash_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| GeohashError::CsvError(e.to_string()))?;

    let mut rows_read = 0usize;
    let mut rows_written = 0usize;
    let mut rows_skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| GeohashError::CsvError(e.to_string()))?;
        rows_read += 1;

        let hashes = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    GeohashError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                let points = representative_points(&geom);
                if points.is_empty() {
                    rows_skipped += 1;
                    tracing::debug!(row = rows_read, "skipping row with empty geometry");
                }
                points
                    .into_iter()
                    .map(|pt| {
                        let precision =
                            precision_for(config.precision, config.length, (pt.y(), pt.x()), None);
                        encode_with_precision(pt.y(), pt.x(), &precision, config.length)
                    })
                    .collect::<Vec<_>>()
            }
            SourceIndices::Coordinates { lng_idx, lat_idx } => {
                let lng_str = record
                    .get(*lng_idx)
                    .ok_or_else(|| {
                        GeohashError::CsvError(format!("Missing longitude at index {}", lng_idx))
                    })?
                    .trim();
                let lat_str = record
                    .get(*lat_idx)
                    .ok_or_else(|| {
                        GeohashError::CsvError(format!("Missing latitude at index {}", lat_idx))
                    })?
                    .trim();

                let lng = parse_coordinate(lng_str, "longitude")?;
                let lat = parse_coordinate(lat_str, "latitude")?;

                let precision = precision_for(
                    config.precision,
                    config.length,
                    (lat, lng),
                    Some((lat_str, lng_str)),
                );
                vec![encode_with_precision(lat, lng, &precision, config.length)]
            }
        };

        for hash in hashes {
            let mut row: Vec<String> = Vec::with_capacity(record.len() + 2);

            if let Some(format) = config.include_cell_geometry {
                let geometry = cell_geometry(&hash, format)?;
                row.push(hash);
                row.push(geometry);
            } else {
                row.push(hash);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| GeohashError::CsvError(e.to_string()))?;
            rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| GeohashError::CsvError(e.to_string()))?;

    tracing::debug!(rows_read, rows_written, rows_skipped, "converted CSV to geohashes");
    Ok(())
}

/// Reads the `geohash` column of a converted CSV back into cells.
pub fn read_geohash_csv(path: impl AsRef<Path>) -> Result<Vec<GeohashCell>, GeohashError> {
    let file = File::open(path).map_err(|e| GeohashError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let idx = reader
        .headers()
        .map_err(|e| GeohashError::CsvError(e.to_string()))?
        .iter()
        .position(|h| h == "geohash")
        .ok_or_else(|| GeohashError::CsvError("geohash column not found".to_string()))?;

    let mut cells = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| GeohashError::CsvError(e.to_string()))?;
        let hash = record
            .get(idx)
            .ok_or_else(|| GeohashError::CsvError(format!("Missing geohash at index {}", idx)))?;
        cells.push(GeohashCell::from_hash(hash)?);
    }
    Ok(cells)
}
