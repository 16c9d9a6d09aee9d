/// Results per page handed to the host.
pub const SEARCH_PAGE_SIZE: usize = 100;

/// One page of an ordered result list.
///
/// `page_count` is never below 1 and `items.len() <= page_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

impl<T> SearchPage<T> {
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page,
            page_size,
            total: 0,
            page_count: 1,
        }
    }
}

/// 1-based page number from host input; anything unusable becomes 1.
pub fn parse_page(raw: &str) -> usize {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Slices `items` to `page`. Pages past the end are empty but still report
/// the full `total` and `page_count`.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> SearchPage<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(page_size);

    SearchPage {
        items: items.into_iter().skip(start).take(page_size).collect(),
        page,
        page_size,
        total,
        page_count: page_count(total, page_size),
    }
}
