//! Geographic points, distances, and wish locations.

use super::WishDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sphere radius used for great-circle distances, matching the radius used by
/// common `2dsphere` spatial indexes.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// A point on the globe in `(longitude, latitude)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidCoordinates`] when the longitude is
    /// outside `[-180, 180]`, the latitude is outside `[-90, 90]`, or either
    /// value is not finite.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, WishDomainError> {
        let valid = longitude.is_finite()
            && latitude.is_finite()
            && (-180.0..=180.0).contains(&longitude)
            && (-90.0..=90.0).contains(&latitude);
        if !valid {
            return Err(WishDomainError::InvalidCoordinates {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Parses a `"longitude,latitude"` pair as used by the list query string.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidLocation`] when the text is not two
    /// comma-separated numbers and [`WishDomainError::InvalidCoordinates`]
    /// when the numbers are out of range.
    pub fn parse_lng_lat(value: &str) -> Result<Self, WishDomainError> {
        let invalid = || WishDomainError::InvalidLocation(value.to_owned());
        let mut parts = value.split(',');
        let longitude = parts.next().ok_or_else(invalid)?;
        let latitude = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        let parsed_longitude = longitude.trim().parse::<f64>().map_err(|_| invalid())?;
        let parsed_latitude = latitude.trim().parse::<f64>().map_err(|_| invalid())?;
        Self::new(parsed_longitude, parsed_latitude)
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the great-circle distance to `other` (haversine formula).
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "great-circle distance is inherently floating-point"
    )]
    pub fn distance_to(self, other: Self) -> Distance {
        let from_latitude = self.latitude.to_radians();
        let to_latitude = other.latitude.to_radians();
        let delta_latitude = (other.latitude - self.latitude).to_radians();
        let delta_longitude = (other.longitude - self.longitude).to_radians();

        let haversine = (delta_latitude / 2.0).sin().powi(2)
            + from_latitude.cos() * to_latitude.cos() * (delta_longitude / 2.0).sin().powi(2);
        let central_angle = 2.0 * haversine.sqrt().min(1.0).asin();
        Distance::from_meters(EARTH_RADIUS_METERS * central_angle)
    }

    /// Returns the latitude/longitude box enclosing every point within
    /// `radius` of this point.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "bounding box derivation is inherently floating-point"
    )]
    pub fn bounding_box(self, radius: Distance) -> BoundingBox {
        let angular_radius = radius.meters() / EARTH_RADIUS_METERS;
        let latitude_delta = angular_radius.to_degrees();
        let min_latitude = self.latitude - latitude_delta;
        let max_latitude = self.latitude + latitude_delta;

        if min_latitude <= -90.0 || max_latitude >= 90.0 {
            return BoundingBox {
                min_latitude: min_latitude.max(-90.0),
                max_latitude: max_latitude.min(90.0),
                longitude_range: None,
            };
        }

        let ratio = angular_radius.sin() / self.latitude.to_radians().cos();
        if ratio >= 1.0 {
            return BoundingBox {
                min_latitude,
                max_latitude,
                longitude_range: None,
            };
        }
        let longitude_delta = ratio.asin().to_degrees();
        let min_longitude = self.longitude - longitude_delta;
        let max_longitude = self.longitude + longitude_delta;
        let crosses_antimeridian = min_longitude < -180.0 || max_longitude > 180.0;

        BoundingBox {
            min_latitude,
            max_latitude,
            longitude_range: (!crosses_antimeridian).then_some((min_longitude, max_longitude)),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Axis-aligned latitude/longitude box used to prefilter proximity searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub min_latitude: f64,
    /// Northern edge in degrees.
    pub max_latitude: f64,
    /// Western and eastern edges in degrees, or `None` when the box spans
    /// every longitude (near a pole or across the antimeridian).
    pub longitude_range: Option<(f64, f64)>,
}

/// A non-negative distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Creates a distance from meters.
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Creates a validated distance from kilometres.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidRadius`] when the value is negative
    /// or not finite.
    #[expect(
        clippy::float_arithmetic,
        reason = "unit conversion from kilometres to meters"
    )]
    pub fn from_kilometers(kilometers: f64) -> Result<Self, WishDomainError> {
        if !kilometers.is_finite() || kilometers < 0.0 {
            return Err(WishDomainError::InvalidRadius(kilometers));
        }
        Ok(Self(kilometers * 1_000.0))
    }

    /// Returns the distance in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }
}

/// Where a wish takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    point: GeoPoint,
    address: String,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::EmptyAddress`] when the address is blank.
    pub fn new(point: GeoPoint, address: impl Into<String>) -> Result<Self, WishDomainError> {
        let raw = address.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WishDomainError::EmptyAddress);
        }
        Ok(Self {
            point,
            address: trimmed.to_owned(),
        })
    }

    /// Returns the indexed point.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        self.point
    }

    /// Returns the free-text address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}
