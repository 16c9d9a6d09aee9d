use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub kw: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<SearchData>,
}

impl SearchResponse {
    pub fn into_partitions(self) -> Partitions {
        self.data
            .and_then(|d| d.merged_by_type)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub merged_by_type: Option<Partitions>,
}

/// Fields of the wrong type read as absent, so one odd field never costs
/// the rest of the item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResultItem {
    #[serde(default, deserialize_with = "string_or_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub source: Option<String>,
}

fn string_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Results grouped by external provider id, in the order the backend sent
/// the groups. Ranking ties fall back to this order, so a sorted map won't do.
///
/// A group that isn't a list, or an entry that isn't an item object, is
/// skipped rather than failing the whole response.
#[derive(Debug, Default)]
pub struct Partitions(pub Vec<(String, Vec<RawResultItem>)>);

impl<'de> Deserialize<'de> for Partitions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PartitionsVisitor;

        impl<'de> Visitor<'de> for PartitionsVisitor {
            type Value = Partitions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of provider id to result list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Partitions, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, group)) = map.next_entry::<String, Value>()? {
                    let Value::Array(entries) = group else {
                        debug!(provider = %id, "skipping non-list result group");
                        continue;
                    };
                    let total = entries.len();
                    let items: Vec<RawResultItem> = entries
                        .into_iter()
                        .filter_map(|entry| serde_json::from_value(entry).ok())
                        .collect();
                    if items.len() < total {
                        debug!(
                            provider = %id,
                            skipped = total - items.len(),
                            "skipping malformed result items"
                        );
                    }
                    groups.push((id, items));
                }
                Ok(Partitions(groups))
            }
        }

        deserializer.deserialize_map(PartitionsVisitor)
    }
}
