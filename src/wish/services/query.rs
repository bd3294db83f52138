//! Filtered, paginated wish listings.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::{
    error::{WishAction, WishServiceError, WishServiceResult},
    requests::ListWishesRequest,
};
use crate::wish::{
    config::QueryDefaults,
    domain::{
        ActorId, Budget, BudgetRange, Distance, GeoPoint, PageRequest, Pagination,
        ProximityFilter, Wish, WishCategory, WishDomainError, WishFilter, WishQuery, WishStatus,
    },
    ports::WishRepository,
};

/// Translates raw list parameters into a validated [`WishQuery`].
///
/// A radius search applies only when both `location` and `radius` are
/// supplied; either one alone is still validated but otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct WishQueryBuilder {
    defaults: QueryDefaults,
}

impl WishQueryBuilder {
    /// Creates a builder using `defaults` for omitted pagination values.
    #[must_use]
    pub const fn new(defaults: QueryDefaults) -> Self {
        Self { defaults }
    }

    /// Builds a query from list parameters.
    ///
    /// # Errors
    ///
    /// Returns [`WishDomainError`] for an unknown category or status, a
    /// malformed actor identifier, location or radius, a negative budget
    /// bound, or a zero page or limit.
    pub fn build(&self, request: &ListWishesRequest) -> Result<WishQuery, WishDomainError> {
        let filter = WishFilter {
            category: present(request.category.as_deref())
                .map(WishCategory::try_from)
                .transpose()?,
            status: present(request.status.as_deref())
                .map(WishStatus::try_from)
                .transpose()?,
            creator: present(request.creator.as_deref())
                .map(ActorId::parse)
                .transpose()?,
            helper: present(request.helper.as_deref())
                .map(ActorId::parse)
                .transpose()?,
            budget: BudgetRange {
                min: budget_bound(request.min_budget)?,
                max: budget_bound(request.max_budget)?,
            },
            proximity: proximity(request)?,
        };
        let page = PageRequest::new(
            request.page.unwrap_or(1),
            request.limit.unwrap_or(self.defaults.default_limit),
        )?;
        Ok(WishQuery { filter, page })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn budget_bound(value: Option<f64>) -> Result<Option<f64>, WishDomainError> {
    value
        .map(|amount| Budget::new(amount).map(Budget::value))
        .transpose()
}

fn proximity(request: &ListWishesRequest) -> Result<Option<ProximityFilter>, WishDomainError> {
    let center = present(request.location.as_deref())
        .map(GeoPoint::parse_lng_lat)
        .transpose()?;
    let radius = request.radius.map(Distance::from_kilometers).transpose()?;
    Ok(center
        .zip(radius)
        .map(|(origin, within)| ProximityFilter {
            center: origin,
            radius: within,
        }))
}

/// A page of wishes with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishListing {
    /// Wishes on the page, in result order.
    pub wishes: Vec<Wish>,
    /// Totals for the whole result set.
    pub pagination: Pagination,
}

/// Read-only listing service.
#[derive(Clone)]
pub struct WishQueryService<R>
where
    R: WishRepository,
{
    repository: Arc<R>,
    builder: WishQueryBuilder,
}

impl<R> WishQueryService<R>
where
    R: WishRepository,
{
    /// Creates a listing service with default pagination settings.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            builder: WishQueryBuilder::default(),
        }
    }

    /// Replaces the pagination defaults.
    #[must_use]
    pub const fn with_defaults(mut self, defaults: QueryDefaults) -> Self {
        self.builder = WishQueryBuilder::new(defaults);
        self
    }

    /// Lists wishes matching `request`.
    ///
    /// Radius searches are ordered nearest first, everything else newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] for invalid parameters and
    /// [`WishServiceError::Repository`] when storage fails.
    pub async fn list(&self, request: &ListWishesRequest) -> WishServiceResult<WishListing> {
        let query = self.builder.build(request)?;
        self.run(query).await
    }

    /// Lists wishes in `category`, ignoring any category in `request`.
    ///
    /// # Errors
    ///
    /// See [`WishQueryService::list`].
    pub async fn by_category(
        &self,
        category: &str,
        request: &ListWishesRequest,
    ) -> WishServiceResult<WishListing> {
        let scoped = ListWishesRequest {
            category: Some(category.to_owned()),
            ..request.clone()
        };
        self.list(&scoped).await
    }

    /// Lists wishes within `request.radius` kilometres of
    /// `request.location`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`WishServiceError::BadRequest`] when either the location or
    /// the radius is missing, otherwise see [`WishQueryService::list`].
    pub async fn nearby(&self, request: &ListWishesRequest) -> WishServiceResult<WishListing> {
        let query = self.builder.build(request)?;
        if query.filter.proximity.is_none() {
            return Err(WishDomainError::MissingProximity.into());
        }
        self.run(query).await
    }

    async fn run(&self, query: WishQuery) -> WishServiceResult<WishListing> {
        let page = self
            .repository
            .search(&query)
            .await
            .map_err(|err| WishServiceError::repository_failure(err, WishAction::Read))?;
        let pagination = Pagination::new(page.total, query.page);
        debug!(
            total = pagination.total,
            page = pagination.page,
            pages = pagination.pages,
            returned = page.wishes.len(),
            proximity = query.filter.proximity.is_some(),
            "wish listing served"
        );
        Ok(WishListing {
            wishes: page.wishes,
            pagination,
        })
    }
}
