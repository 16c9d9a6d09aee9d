//! JSON shapes the host expects back from each plugin call.

use serde::Serialize;

use crate::backend::client::USER_AGENT;
use crate::search::{RankedItem, SearchPage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VodSummary {
    pub vod_id: String,
    pub vod_name: String,
    pub vod_pic: String,
    pub vod_remarks: String,
}

impl From<RankedItem> for VodSummary {
    fn from(item: RankedItem) -> Self {
        Self {
            vod_id: item.url,
            vod_name: item.title,
            vod_pic: String::new(),
            vod_remarks: item.remarks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VodPage {
    pub list: Vec<VodSummary>,
    pub page: usize,
    pub pagecount: usize,
    pub limit: usize,
    pub total: usize,
}

impl<T: Into<VodSummary>> From<SearchPage<T>> for VodPage {
    fn from(page: SearchPage<T>) -> Self {
        Self {
            list: page.items.into_iter().map(Into::into).collect(),
            page: page.page,
            pagecount: page.page_count,
            limit: page.page_size,
            total: page.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VodClass {
    pub type_id: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContent {
    pub class: Vec<VodClass>,
    pub list: Vec<VodSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VodDetail {
    pub vod_id: String,
    pub vod_name: String,
    pub vod_pic: String,
    pub vod_play_from: String,
    pub vod_play_url: String,
    pub vod_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailContent {
    pub list: Vec<VodDetail>,
}

/// Request headers the host should replay when opening the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerHeader {
    #[serde(rename = "User-Agent")]
    pub user_agent: &'static str,
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
}

impl Default for PlayerHeader {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT,
            content_type: "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerContent {
    /// 0: the url is final, the host doesn't sniff it.
    pub parse: u8,
    pub header: PlayerHeader,
    pub url: String,
}
