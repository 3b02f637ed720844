use crate::api::cell::GeohashCell;
use crate::core::neighbors::{Direction, adjacent};
use crate::error::GeohashError;
use crate::util::coord::Coordinate;
use geo_types::{Polygon, Rect};
use rayon::prelude::*;

/// Every geohash cell of one length covering a longitude/latitude extent.
#[derive(Debug, Clone)]
pub struct GeohashGrid {
    cells: Vec<GeohashCell>,
    length: usize,
}

impl GeohashGrid {
    pub fn builder() -> GeohashGridBuilder {
        GeohashGridBuilder::new()
    }

    /// Covers `[min_lng, max_lng] x [min_lat, max_lat]` with cells of `length` characters.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::GeohashGrid;
    ///
    /// let grid = GeohashGrid::from_extent(-5.7, 42.5, -5.5, 42.7, 5).unwrap();
    /// assert!(grid.iter().any(|cell| cell.hash == "ezs42"));
    /// ```
    ///
    /// # Errors
    ///
    /// - [`GeohashError::InvalidLength`] - `length` is zero
    pub fn from_extent(
        min_lng: f64,
        min_lat: f64,
        max_lng: f64,
        max_lat: f64,
        length: usize,
    ) -> Result<Self, GeohashError> {
        if length == 0 {
            return Err(GeohashError::InvalidLength(length));
        }
        let cells = generate_cells_for_extent(min_lng, min_lat, max_lng, max_lat, length)?;
        tracing::debug!(length, cells = cells.len(), "built geohash grid");
        Ok(Self { cells, length })
    }

    pub fn from_rect(rect: &Rect<f64>, length: usize) -> Result<Self, GeohashError> {
        Self::from_extent(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            length,
        )
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[GeohashCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeohashCell> {
        self.cells.iter()
    }

    pub fn hashes(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.hash.as_str()).collect()
    }

    pub fn get_cell_at(&self, coord: &impl Coordinate) -> Option<&GeohashCell> {
        let hash = GeohashCell::from_wgs84(coord, self.length).hash;
        self.cells.iter().find(|cell| cell.hash == hash)
    }

    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.cells.par_iter().map(|cell| cell.to_polygon()).collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&GeohashCell>
    where
        F: Fn(&GeohashCell) -> bool,
    {
        self.cells.iter().filter(|cell| predicate(cell)).collect()
    }
}

#[derive(Debug, Default)]
pub struct GeohashGridBuilder {
    length: Option<usize>,
    min_lng: Option<f64>,
    min_lat: Option<f64>,
    max_lng: Option<f64>,
    max_lat: Option<f64>,
}

impl GeohashGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn extent(mut self, min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        self.min_lng = Some(min_lng);
        self.min_lat = Some(min_lat);
        self.max_lng = Some(max_lng);
        self.max_lat = Some(max_lat);
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.min_lng = Some(rect.min().x);
        self.min_lat = Some(rect.min().y);
        self.max_lng = Some(rect.max().x);
        self.max_lat = Some(rect.max().y);
        self
    }

    pub fn build(self) -> Result<GeohashGrid, GeohashError> {
        let length = self.length.ok_or(GeohashError::MissingParameter("length"))?;
        let (Some(min_lng), Some(min_lat), Some(max_lng), Some(max_lat)) =
            (self.min_lng, self.min_lat, self.max_lng, self.max_lat)
        else {
            return Err(GeohashError::MissingParameter("extent"));
        };

        GeohashGrid::from_extent(min_lng, min_lat, max_lng, max_lat, length)
    }
}

/// Walks rows from the bottom-left cell, stepping right until past `max_lng` and up until
/// past `max_lat`. A step that wraps around the globe ends its row or column.
fn generate_cells_for_extent(
    min_lng: f64,
    min_lat: f64,
    max_lng: f64,
    max_lat: f64,
    length: usize,
) -> Result<Vec<GeohashCell>, GeohashError> {
    let mut cells = Vec::new();
    let mut row_start = GeohashCell::from_wgs84(&(min_lng, min_lat), length);

    loop {
        let mut cell = row_start.clone();
        loop {
            let west = cell.bounds().min().x;
            if west > max_lng {
                break;
            }
            let next = cell.neighbor(Direction::Right)?;
            cells.push(cell);
            if next.bounds().min().x <= west {
                break;
            }
            cell = next;
        }

        let south = row_start.bounds().min().y;
        let next_row = GeohashCell::from_hash(&adjacent(&row_start.hash, Direction::Top)?)?;
        let next_south = next_row.bounds().min().y;
        if next_south > max_lat || next_south <= south {
            break;
        }
        row_start = next_row;
    }

    Ok(cells)
}
