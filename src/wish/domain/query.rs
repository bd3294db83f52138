//! Query model for filtered, paginated wish listings.

use super::{ActorId, Distance, GeoPoint, Wish, WishCategory, WishDomainError, WishStatus};
use serde::Serialize;

/// Inclusive budget bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetRange {
    /// Lowest accepted budget.
    pub min: Option<f64>,
    /// Highest accepted budget.
    pub max: Option<f64>,
}

impl BudgetRange {
    /// Returns whether `amount` lies within the bounds.
    #[must_use]
    pub fn contains(&self, amount: f64) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Restricts results to wishes within `radius` of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityFilter {
    /// Search origin.
    pub center: GeoPoint,
    /// Search radius.
    pub radius: Distance,
}

impl ProximityFilter {
    /// Returns the distance from the search origin to `point` when it lies
    /// within the radius.
    #[must_use]
    pub fn distance_within(&self, point: GeoPoint) -> Option<Distance> {
        let distance = self.center.distance_to(point);
        (distance <= self.radius).then_some(distance)
    }
}

/// Attribute and proximity filters for a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishFilter {
    /// Only wishes in this category.
    pub category: Option<WishCategory>,
    /// Only wishes in this status.
    pub status: Option<WishStatus>,
    /// Only wishes posted by this actor.
    pub creator: Option<ActorId>,
    /// Only wishes accepted by this helper.
    pub helper: Option<ActorId>,
    /// Budget bounds.
    pub budget: BudgetRange,
    /// Optional radius search; switches ordering to nearest-first.
    pub proximity: Option<ProximityFilter>,
}

impl WishFilter {
    /// Returns whether `wish` satisfies every filter except proximity.
    #[must_use]
    pub fn matches_attributes(&self, wish: &Wish) -> bool {
        self.category.is_none_or(|category| wish.category() == category)
            && self.status.is_none_or(|status| wish.status() == status)
            && self.creator.is_none_or(|creator| wish.creator() == creator)
            && self.helper.is_none_or(|helper| wish.helper() == Some(helper))
            && self.budget.contains(wish.budget().value())
    }
}

/// One-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError::InvalidPage`] or
    /// [`WishDomainError::InvalidLimit`] when either value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, WishDomainError> {
        if page == 0 {
            return Err(WishDomainError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(WishDomainError::InvalidLimit(limit));
        }
        Ok(Self { page, limit })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns how many matching records precede this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.limit))
    }
}

/// A complete listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct WishQuery {
    /// Filters to apply.
    pub filter: WishFilter,
    /// Page to return.
    pub page: PageRequest,
}

/// One page of results plus the number of matches across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct WishPage {
    /// Wishes on the requested page, in result order.
    pub wishes: Vec<Wish>,
    /// Number of wishes matching the filter.
    pub total: u64,
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Number of wishes matching the filter.
    pub total: u64,
    /// Requested page number.
    pub page: u32,
    /// Number of pages, `ceil(total / limit)`.
    pub pages: u64,
}

impl Pagination {
    /// Computes pagination metadata for `total` matches.
    #[must_use]
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}
