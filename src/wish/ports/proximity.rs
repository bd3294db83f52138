//! Spatial index port used for radius searches.

use crate::wish::domain::{Distance, GeoPoint, WishId};

/// A wish found by a radius search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHit {
    /// Matching wish.
    pub wish_id: WishId,
    /// Great-circle distance from the search origin.
    pub distance: Distance,
}

/// Point index answering "what lies within this radius" queries.
///
/// Implementations are owned by a store and mutated under the store's own
/// write lock, so they need not be internally synchronised.
pub trait ProximityIndex: Send + Sync {
    /// Inserts or moves the point for `wish_id`.
    fn upsert(&mut self, wish_id: WishId, point: GeoPoint);

    /// Removes `wish_id` from the index; unknown identifiers are ignored.
    fn remove(&mut self, wish_id: WishId);

    /// Returns every indexed wish within `radius` of `center`, nearest first.
    fn within(&self, center: GeoPoint, radius: Distance) -> Vec<ProximityHit>;
}
