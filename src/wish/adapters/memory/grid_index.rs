//! Latitude/longitude grid implementation of the proximity index.

use std::collections::{HashMap, HashSet};

use crate::wish::{
    domain::{Distance, GeoPoint, WishId},
    ports::{ProximityHit, ProximityIndex},
};

type CellKey = (i32, i32);

/// Buckets points into square cells of `cell_degrees` and answers radius
/// queries by scanning only the cells overlapping the search's bounding box.
///
/// Searches whose box touches a pole or crosses the antimeridian fall back to
/// scanning every indexed point.
#[derive(Debug, Clone)]
pub struct GridProximityIndex {
    cell_degrees: f64,
    points: HashMap<WishId, GeoPoint>,
    cells: HashMap<CellKey, HashSet<WishId>>,
}

impl GridProximityIndex {
    /// Cell edge length used by [`GridProximityIndex::new`].
    pub const DEFAULT_CELL_DEGREES: f64 = 1.0;

    /// Smallest accepted cell edge length.
    pub const MIN_CELL_DEGREES: f64 = 0.01;

    /// Creates an empty index with one-degree cells.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cell_degrees(Self::DEFAULT_CELL_DEGREES)
    }

    /// Creates an empty index with the given cell edge length, clamped to at
    /// least [`GridProximityIndex::MIN_CELL_DEGREES`].
    #[must_use]
    pub fn with_cell_degrees(cell_degrees: f64) -> Self {
        let clamped = if cell_degrees.is_finite() {
            cell_degrees.max(Self::MIN_CELL_DEGREES)
        } else {
            Self::DEFAULT_CELL_DEGREES
        };
        Self {
            cell_degrees: clamped,
            points: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    /// Returns the number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "coordinates are bounded to ±180 degrees and cells are at least 0.01 degrees"
    )]
    fn cell_coordinate(&self, degrees: f64) -> i32 {
        (degrees / self.cell_degrees).floor() as i32
    }

    fn cell_of(&self, point: GeoPoint) -> CellKey {
        (
            self.cell_coordinate(point.latitude()),
            self.cell_coordinate(point.longitude()),
        )
    }

    fn candidates(&self, center: GeoPoint, radius: Distance) -> Vec<WishId> {
        let bounds = center.bounding_box(radius);
        let Some((min_longitude, max_longitude)) = bounds.longitude_range else {
            return self.points.keys().copied().collect();
        };

        let rows = self.cell_coordinate(bounds.min_latitude)
            ..=self.cell_coordinate(bounds.max_latitude);
        let columns =
            self.cell_coordinate(min_longitude)..=self.cell_coordinate(max_longitude);

        rows.flat_map(|row| columns.clone().map(move |column| (row, column)))
            .filter_map(|key| self.cells.get(&key))
            .flat_map(|ids| ids.iter().copied())
            .collect()
    }
}

impl Default for GridProximityIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ProximityIndex for GridProximityIndex {
    fn upsert(&mut self, wish_id: WishId, point: GeoPoint) {
        self.remove(wish_id);
        let key = self.cell_of(point);
        self.cells.entry(key).or_default().insert(wish_id);
        self.points.insert(wish_id, point);
    }

    fn remove(&mut self, wish_id: WishId) {
        let Some(previous) = self.points.remove(&wish_id) else {
            return;
        };
        let key = self.cell_of(previous);
        if let Some(ids) = self.cells.get_mut(&key) {
            ids.remove(&wish_id);
            if ids.is_empty() {
                self.cells.remove(&key);
            }
        }
    }

    fn within(&self, center: GeoPoint, radius: Distance) -> Vec<ProximityHit> {
        let mut hits: Vec<ProximityHit> = self
            .candidates(center, radius)
            .into_iter()
            .filter_map(|wish_id| {
                let point = self.points.get(&wish_id)?;
                let distance = center.distance_to(*point);
                (distance <= radius).then_some(ProximityHit { wish_id, distance })
            })
            .collect();
        hits.sort_by(|left, right| left.distance.meters().total_cmp(&right.distance.meters()));
        hits
    }
}
