/// One page of a result list.
///
/// Pages are zero-based internally; callers showing them to a user add one.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub index: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slice `items` into pages of `per_page` and return page `index`.
    ///
    /// An empty list still has one (empty) page. Asking past the end yields
    /// an empty slice rather than an error. `per_page` of 0 is treated as 1.
    pub fn of(items: &'a [T], index: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = items.len().div_ceil(per_page).max(1);
        let start = index.saturating_mul(per_page).min(items.len());
        let end = start.saturating_add(per_page).min(items.len());

        Self {
            items: &items[start..end],
            index,
            per_page,
            total_pages,
        }
    }

    /// Position of the first item on this page within the full list.
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.index.saturating_add(1) < self.total_pages
    }
}
