use std::cmp::Reverse;

use super::merge::RankedItem;
use super::priority::PanPriority;

/// Orders merged items: by allow-list position then newest first, or newest
/// first alone when there is no allow-list.
///
/// `sort_by_key` is stable, so equal keys keep merge order and identical
/// input always ranks identically.
pub fn rank(mut items: Vec<RankedItem>, priority: &PanPriority) -> Vec<RankedItem> {
    if priority.is_empty() {
        items.sort_by_key(|item| Reverse(item.sort_timestamp));
    } else {
        items.sort_by_key(|item| {
            (
                priority.position(item.provider.as_str()),
                Reverse(item.sort_timestamp),
            )
        });
    }
    items
}
