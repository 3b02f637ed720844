use crate::core::constants::EARTH_RADIUS_METERS;
use crate::util::coord::Coordinate;

/// Great-circle distance in meters between two points given in degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`], rounded to
/// the nearest meter.
///
/// [`EARTH_RADIUS_METERS`]: crate::EARTH_RADIUS_METERS
///
/// # Example
/// ```
/// use geohash_rs::distance;
///
/// // One degree of longitude along the equator
/// assert_eq!(distance(0.0, 0.0, 0.0, 1.0), 111_202);
/// ```
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_METERS * c).round() as u64
}

/// Great-circle distance in meters between two coordinates.
pub fn distance_between<A: Coordinate, B: Coordinate>(from: &A, to: &B) -> u64 {
    distance(from.lat(), from.lng(), to.lat(), to.lng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    #[test]
    fn test_known_distances() {
        assert_eq!(distance(0.0, 0.0, 0.0, 1.0), 111_202);
        assert_eq!(distance(0.0, 0.0, 1.0, 0.0), 111_202);
        // Shanghai to Beijing
        assert_eq!(distance(31.23, 121.47, 39.9042, 116.4074), 1_067_274);
        // London to Paris
        assert_eq!(distance(51.5074, -0.1278, 48.8566, 2.3522), 343_577);
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance(37.8324, 112.5584, 37.8324, 112.5584), 0);
    }

    #[test]
    fn test_symmetry() {
        let there = distance(31.23, 121.47, -33.8688, 151.2093);
        let back = distance(-33.8688, 151.2093, 31.23, 121.47);
        assert_eq!(there, back);
    }

    #[test]
    fn test_antipodal_points() {
        let half_circumference = (std::f64::consts::PI * EARTH_RADIUS_METERS).round() as u64;
        assert_eq!(distance(0.0, 0.0, 0.0, 180.0), half_circumference);
        assert_eq!(distance(90.0, 0.0, -90.0, 0.0), half_circumference);
    }

    #[test]
    fn test_distance_between_coordinates() {
        let shanghai = (121.47, 31.23);
        let beijing = Point::new(116.4074, 39.9042);
        assert_eq!(distance_between(&shanghai, &beijing), 1_067_274);
    }
}
