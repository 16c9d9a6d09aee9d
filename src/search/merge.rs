//! Classifies provider partitions and flattens them into one candidate list.

use tracing::debug;

use super::priority::PanPriority;
use super::provider::ProviderCode;
use super::timestamp;
use crate::backend::types::{Partitions, RawResultItem};

/// Source label used when the backend doesn't name one.
pub const DEFAULT_SOURCE: &str = "盘搜";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItem {
    pub url: String,
    pub title: String,
    /// `{provider}|{MM-DD HH:MM}|{source}`
    pub remarks: String,
    /// Epoch seconds; 0 when the timestamp is unknown.
    pub sort_timestamp: i64,
    pub provider: ProviderCode,
}

/// Flattens partitions into unranked items, in partition then item order.
///
/// Partitions outside a non-empty `allow` list are skipped whole and items
/// without a URL are dropped. Identical URLs from different providers are
/// kept as separate entries.
pub fn merge_partitions(partitions: Partitions, allow: &PanPriority) -> Vec<RankedItem> {
    let mut merged = Vec::new();

    for (external_id, items) in partitions.0 {
        let provider = ProviderCode::from_external_id(&external_id);
        if !allow.allows(provider.as_str()) {
            debug!(
                provider = provider.as_str(),
                skipped = items.len(),
                "partition filtered out"
            );
            continue;
        }

        merged.extend(
            items
                .into_iter()
                .filter_map(|item| to_ranked(item, &provider)),
        );
    }

    merged
}

fn to_ranked(item: RawResultItem, provider: &ProviderCode) -> Option<RankedItem> {
    let url = item.url.filter(|u| !u.is_empty())?;

    let instant = timestamp::parse(item.datetime.as_deref());
    let source = item
        .source
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let remarks = format!(
        "{}|{}|{source}",
        provider.display_name(),
        timestamp::display(instant.as_ref())
    );

    Some(RankedItem {
        url,
        title: item.note.unwrap_or_default(),
        remarks,
        sort_timestamp: timestamp::sort_timestamp(instant.as_ref()),
        provider: provider.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(url: Option<&str>, datetime: Option<&str>) -> RawResultItem {
        RawResultItem {
            url: url.map(str::to_string),
            note: url.map(|u| format!("title of {u}")),
            datetime: datetime.map(str::to_string),
            source: None,
        }
    }

    fn partitions(groups: Vec<(&str, Vec<RawResultItem>)>) -> Partitions {
        Partitions(
            groups
                .into_iter()
                .map(|(id, items)| (id.to_string(), items))
                .collect(),
        )
    }

    #[test]
    fn resolves_external_ids_and_builds_remarks() {
        let mut item = raw(
            Some("https://www.alipan.com/s/1"),
            Some("2024-05-01T10:20:30Z"),
        );
        item.source = Some("tg:channel".into());
        let merged = merge_partitions(
            partitions(vec![("aliyun", vec![item])]),
            &PanPriority::default(),
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].provider.as_str(), "ali");
        assert_eq!(merged[0].remarks, "阿里|05-01 10:20|tg:channel");
        assert_eq!(merged[0].sort_timestamp, 1_714_558_830);
        assert_eq!(merged[0].title, "title of https://www.alipan.com/s/1");
    }

    #[test]
    fn unknown_time_and_source_use_defaults() {
        let merged = merge_partitions(
            partitions(vec![(
                "quark",
                vec![raw(Some("https://pan.quark.cn/s/1"), Some(timestamp::ZERO_DATE))],
            )]),
            &PanPriority::default(),
        );
        assert_eq!(merged[0].remarks, "夸克||盘搜");
        assert_eq!(merged[0].sort_timestamp, 0);
    }

    #[test]
    fn unmapped_provider_passes_through_without_filter() {
        let merged = merge_partitions(
            partitions(vec![("baidu", vec![raw(Some("https://pan.baidu.com/s/1"), None)])]),
            &PanPriority::default(),
        );
        assert_eq!(merged[0].provider, ProviderCode::Unmapped("baidu".into()));
        assert!(merged[0].remarks.starts_with("baidu|"));
    }

    #[test]
    fn items_without_url_are_dropped() {
        let merged = merge_partitions(
            partitions(vec![(
                "quark",
                vec![
                    raw(None, None),
                    raw(Some(""), None),
                    raw(Some("https://pan.quark.cn/s/ok"), None),
                ],
            )]),
            &PanPriority::default(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].url, "https://pan.quark.cn/s/ok");
    }

    #[test]
    fn allow_list_skips_whole_partitions() {
        let allow = PanPriority::new(["ali"]);
        let merged = merge_partitions(
            partitions(vec![
                ("quark", vec![raw(Some("https://pan.quark.cn/s/1"), None)]),
                ("aliyun", vec![raw(Some("https://www.alipan.com/s/2"), None)]),
                ("baidu", vec![raw(Some("https://pan.baidu.com/s/3"), None)]),
            ]),
            &allow,
        );
        assert_eq!(merged.len(), 1);
        assert!(merged.iter().all(|i| allow.allows(i.provider.as_str())));
    }

    #[test]
    fn duplicate_urls_across_providers_survive() {
        let url = "https://pan.quark.cn/s/same";
        let merged = merge_partitions(
            partitions(vec![
                ("quark", vec![raw(Some(url), None)]),
                ("uc", vec![raw(Some(url), None)]),
            ]),
            &PanPriority::default(),
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].provider.as_str(), "quark");
        assert_eq!(merged[1].provider.as_str(), "uc");
    }
}
