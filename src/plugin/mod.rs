mod config;
pub mod schema;

pub use config::PluginConfig;

use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use schema::{
    DetailContent, HomeContent, PlayerContent, PlayerHeader, VodClass, VodDetail, VodPage,
    VodSummary,
};

use crate::backend::client::REQUEST_TIMEOUT;
use crate::backend::{BackendError, PanSearch, PanSouClient};
use crate::search::paginate::parse_page;
use crate::search::provider;
use crate::search::{RankedItem, SEARCH_PAGE_SIZE, SearchPage};

pub const PLUGIN_NAME: &str = "盘搜";

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HOME_CLASS_ID: &str = "1";
const HOME_CLASS_NAME: &str = "盘搜|聚合搜索";
const CATEGORY_HINT: &str = "请在搜索框中输入关键词搜索";
const UNKNOWN_PAN_NAME: &str = "网盘资源";
const PUSH_PREFIX: &str = "push:";

/// Result of one search call. The host only ever sees the page; the
/// degraded cause is kept for logging and tests.
#[derive(Debug)]
pub enum SearchOutcome {
    Page(SearchPage<RankedItem>),
    Degraded {
        page: SearchPage<RankedItem>,
        cause: BackendError,
    },
}

impl SearchOutcome {
    pub fn into_page(self) -> SearchPage<RankedItem> {
        match self {
            Self::Page(page) | Self::Degraded { page, .. } => page,
        }
    }
}

/// Host-facing plugin: the lifecycle calls a video-browsing host makes.
///
/// Configuration is fixed at [`PanSou::init`]; every call afterwards is
/// independent, so one instance can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct PanSou<C = PanSouClient> {
    client: C,
    config: PluginConfig,
}

impl PanSou<PanSouClient> {
    /// Parses the host's `ext` payload (falling back to defaults) and builds
    /// the HTTP client.
    pub fn init(ext: Option<&str>) -> Result<Self, reqwest::Error> {
        let config = PluginConfig::load(ext);
        let http = build_http_client(config.proxy.as_deref())?;
        let client = PanSouClient::new(http, &config.base_url);
        info!(
            server = %config.base_url,
            proxy = config.proxy.is_some(),
            priority = ?config.pan_priority.codes(),
            tokens = config.tokens.len(),
            "plugin initialized"
        );
        Ok(Self { client, config })
    }
}

impl<C: PanSearch> PanSou<C> {
    pub fn with_client(client: C, config: PluginConfig) -> Self {
        Self { client, config }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn home_content(&self, _filter: bool) -> HomeContent {
        HomeContent {
            class: vec![VodClass {
                type_id: HOME_CLASS_ID.to_string(),
                type_name: HOME_CLASS_NAME.to_string(),
            }],
            list: Vec::new(),
        }
    }

    pub fn home_video_content(&self) -> Map<String, Value> {
        Map::new()
    }

    /// A single hint entry: browsing is search-only.
    pub fn category_content(
        &self,
        _cid: &str,
        _page: &str,
        _filter: bool,
        _ext: Option<&str>,
    ) -> VodPage {
        VodPage {
            list: vec![VodSummary {
                vod_id: HOME_CLASS_ID.to_string(),
                vod_name: CATEGORY_HINT.to_string(),
                vod_pic: String::new(),
                vod_remarks: PLUGIN_NAME.to_string(),
            }],
            page: 1,
            pagecount: 1,
            limit: 1,
            total: 1,
        }
    }

    /// Detail for the first id, which is the share link itself.
    pub fn detail_content(&self, ids: &[String]) -> DetailContent {
        let Some(url) = ids.first().filter(|id| !id.is_empty()) else {
            return DetailContent::default();
        };

        let code = provider::resolve_by_url(url);
        debug!(provider = code, "detail");
        let pan_name = provider::by_code(code).map_or(UNKNOWN_PAN_NAME, |p| p.display_name);

        DetailContent {
            list: vec![VodDetail {
                vod_id: url.clone(),
                vod_name: format!("{pan_name}资源"),
                vod_pic: String::new(),
                vod_play_from: PLUGIN_NAME.to_string(),
                vod_play_url: format!("{PLUGIN_NAME}${url}"),
                vod_content: format!("网盘类型: {pan_name}\n资源链接: {url}"),
            }],
        }
    }

    pub async fn search_content(&self, key: &str, _quick: bool, pg: &str) -> VodPage {
        self.search_outcome(key, parse_page(pg))
            .await
            .into_page()
            .into()
    }

    pub async fn search_content_page(&self, key: &str, _quick: bool, page: &str) -> VodPage {
        self.search_content(key, false, page).await
    }

    /// One backend call, then merge, rank and paginate. Backend failures
    /// degrade to an empty page.
    pub async fn search_outcome(&self, keyword: &str, page: usize) -> SearchOutcome {
        let page = page.max(1);
        if keyword.is_empty() {
            return SearchOutcome::Page(SearchPage::empty(page, SEARCH_PAGE_SIZE));
        }

        info!(keyword, page, "search");

        match self.client.search(keyword).await {
            Ok(partitions) => {
                let result = crate::search::rank_and_paginate(
                    partitions,
                    &self.config.pan_priority,
                    page,
                    SEARCH_PAGE_SIZE,
                );
                info!(
                    total = result.total,
                    returned = result.items.len(),
                    "search complete"
                );
                SearchOutcome::Page(result)
            }
            Err(cause) => {
                warn!(error = %cause, keyword, "search degraded to empty page");
                SearchOutcome::Degraded {
                    page: SearchPage::empty(page, SEARCH_PAGE_SIZE),
                    cause,
                }
            }
        }
    }

    pub fn player_content(&self, _flag: &str, id: &str, _vip_flags: &[String]) -> PlayerContent {
        PlayerContent {
            parse: 0,
            header: PlayerHeader::default(),
            url: push_url(id),
        }
    }
}

/// Wraps a share link for the host's push handler, adding `https://` when
/// the link has no http(s) scheme. Already-pushed links pass through.
pub fn push_url(id: &str) -> String {
    if id.is_empty() {
        return String::new();
    }
    if id.starts_with(PUSH_PREFIX) {
        return id.to_string();
    }

    let url = id.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        format!("{PUSH_PREFIX}{url}")
    } else {
        format!("{PUSH_PREFIX}https://{url}")
    }
}

/// Shared client for backend calls, routed through `proxy` when it parses.
pub fn build_http_client(proxy: Option<&str>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT);

    if let Some(proxy) = proxy {
        match reqwest::Proxy::all(proxy) {
            Ok(p) => builder = builder.proxy(p),
            Err(e) => warn!(error = %e, "ignoring invalid proxy"),
        }
    }

    builder.build()
}
