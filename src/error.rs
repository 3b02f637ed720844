/// Error type for geohash-rs operations.
#[derive(Debug, PartialEq)]
pub enum GeohashError {
    /// A hash character is not part of the base-32 geohash alphabet.
    InvalidCharacter(char),
    /// An empty hash was passed where at least one character is required.
    EmptyInput,
    /// A precision tolerance is not a finite, positive number.
    InvalidPrecision(String),
    /// The hash length is outside the usable range (e.g., zero).
    InvalidLength(usize),
    /// A required builder parameter was never set.
    MissingParameter(&'static str),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for GeohashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeohashError::InvalidCharacter(c) => write!(f, "Invalid geohash character: {:?}", c),
            GeohashError::EmptyInput => write!(f, "Empty geohash"),
            GeohashError::InvalidPrecision(msg) => write!(f, "Invalid precision: {}", msg),
            GeohashError::InvalidLength(len) => write!(f, "Invalid geohash length: {}", len),
            GeohashError::MissingParameter(name) => write!(f, "Missing parameter: {}", name),
            GeohashError::IoError(msg) => write!(f, "IO error: {}", msg),
            GeohashError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            GeohashError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeohashError {}
