use geo_types::Point;

/// Trait for types that can provide longitude/latitude coordinates.
///
/// Implemented for `(f64, f64)` tuples as `(lng, lat)` and `geo_types::Point<f64>`,
/// following the x/y order of GIS geometry types. This allows functions to accept
/// either type.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;

    fn lng(&self) -> f64 {
        self.x()
    }

    fn lat(&self) -> f64 {
        self.y()
    }
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (121.47, 31.23);
        assert_eq!(tuple.lng(), 121.47);
        assert_eq!(tuple.lat(), 31.23);
    }

    #[test]
    fn test_coordinate_trait_point() {
        // Point has deprecated inherent lng/lat methods, so call through the trait
        let point = Point::new(121.47, 31.23);
        assert_eq!(Coordinate::lng(&point), 121.47);
        assert_eq!(Coordinate::lat(&point), 31.23);
    }

    #[test]
    fn test_generic_function_accepts_both_types() {
        fn sum<C: Coordinate>(coord: &C) -> f64 {
            coord.lat() + coord.lng()
        }

        assert_eq!(sum(&(1.5, 2.5)), sum(&Point::new(1.5, 2.5)));
    }
}
