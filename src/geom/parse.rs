use crate::error::GeohashError;
use geo::Centroid;
use geo_types::{Geometry, Point};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| GeohashError::GeometryParseError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            GeohashError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeohashError::GeometryParseError(
                "FeatureCollection not supported, use individual geometries".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(|e| GeohashError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeohashError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| GeohashError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        GeohashError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

/// Points to hash for a geometry: every point of a point or multipoint, the centroid of
/// anything else. Empty geometries yield nothing.
pub fn representative_points(geom: &Geometry<f64>) -> Vec<Point<f64>> {
    match geom {
        Geometry::Point(pt) => vec![*pt],
        Geometry::MultiPoint(mp) => mp.0.clone(),
        other => other.centroid().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_point() -> Result<(), GeohashError> {
        let json = r#"{"type":"Point","coordinates":[121.47,31.23]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert_eq!(pt.x(), 121.47);
                assert_eq!(pt.y(), 31.23);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), GeohashError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[-5.6,42.6]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(GeohashError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_wkt_point() -> Result<(), GeohashError> {
        match parse_geometry("POINT(112.5584 37.8324)")? {
            Geometry::Point(pt) => {
                assert_eq!(pt.x(), 112.5584);
                assert_eq!(pt.y(), 37.8324);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_invalid_wkt() {
        assert!(parse_geometry("NOT A GEOMETRY").is_err());
    }

    #[test]
    fn test_representative_points() -> Result<(), GeohashError> {
        let multi = parse_geometry("MULTIPOINT((0 0),(10 10))")?;
        assert_eq!(representative_points(&multi).len(), 2);

        let square = parse_geometry("POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))")?;
        let points = representative_points(&square);
        assert_eq!(points, vec![Point::new(1.0, 1.0)]);
        Ok(())
    }
}
