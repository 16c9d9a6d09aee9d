//! Result pipeline: classify and merge provider partitions, rank, paginate.

pub mod merge;
pub mod paginate;
pub mod priority;
pub mod provider;
pub mod rank;
pub mod timestamp;

pub use merge::RankedItem;
pub use paginate::{SEARCH_PAGE_SIZE, SearchPage};
pub use priority::PanPriority;
use tracing::debug;

use crate::backend::types::Partitions;

/// Runs a backend response through the whole pipeline and returns `page`.
pub fn rank_and_paginate(
    partitions: Partitions,
    priority: &PanPriority,
    page: usize,
    page_size: usize,
) -> SearchPage<RankedItem> {
    let merged = merge::merge_partitions(partitions, priority);
    let ranked = rank::rank(merged, priority);
    debug!(total = ranked.len(), page, "results ranked");
    paginate::paginate(ranked, page, page_size)
}
