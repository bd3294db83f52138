//! Result ordering and paging shared by the repository adapters.

use std::cmp::Ordering;

use crate::wish::domain::{Distance, PageRequest, Wish};

/// Orders newest first, breaking timestamp ties by identifier so pages are
/// stable.
pub(crate) fn compare_newest(left: &Wish, right: &Wish) -> Ordering {
    right
        .created_at()
        .cmp(&left.created_at())
        .then_with(|| left.id().cmp(&right.id()))
}

/// Orders nearest first, then newest first.
pub(crate) fn compare_nearest(left: (Distance, &Wish), right: (Distance, &Wish)) -> Ordering {
    left.0
        .meters()
        .total_cmp(&right.0.meters())
        .then_with(|| compare_newest(left.1, right.1))
}

/// Returns the slice of `ordered` selected by `page`.
pub(crate) fn page_of<T>(ordered: Vec<T>, page: PageRequest) -> Vec<T> {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    ordered.into_iter().skip(skip).take(take).collect()
}

/// Converts a match count to the wire type.
pub(crate) fn total_of(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}
