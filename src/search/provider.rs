//! Cloud-drive provider table and the lookups built from it.
//!
//! One [`ProviderDescriptor`] per drive. The backend groups results by
//! `external_id`, the allow-list and ranking speak `code`, and single links
//! (detail views) are classified by `url_signatures`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Code returned by [`resolve_by_url`] when no signature matches.
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub code: &'static str,
    pub display_name: &'static str,
    pub external_id: &'static str,
    /// Lowercase substrings matched against a lowercased URL.
    pub url_signatures: &'static [&'static str],
}

/// Definition order is the tie-break for URLs matching several providers.
pub static PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        code: "ali",
        display_name: "阿里",
        external_id: "aliyun",
        url_signatures: &["alipan.com", "aliyundrive.com"],
    },
    ProviderDescriptor {
        code: "quark",
        display_name: "夸克",
        external_id: "quark",
        url_signatures: &["pan.quark.cn"],
    },
    ProviderDescriptor {
        code: "uc",
        display_name: "UC",
        external_id: "uc",
        url_signatures: &["drive.uc.cn"],
    },
    ProviderDescriptor {
        code: "xunlei",
        display_name: "迅雷",
        external_id: "xunlei",
        url_signatures: &["xunlei", "thunder"],
    },
    ProviderDescriptor {
        code: "a123",
        display_name: "123",
        external_id: "123",
        url_signatures: &[
            "123684.com",
            "123685.com",
            "123912.com",
            "123pan.com",
            "123pan.cn",
            "123592.com",
        ],
    },
    ProviderDescriptor {
        code: "a189",
        display_name: "天翼",
        external_id: "tianyi",
        url_signatures: &["cloud.189.cn"],
    },
    ProviderDescriptor {
        code: "a139",
        display_name: "移动",
        external_id: "mobile",
        url_signatures: &["caiyun.139.com"],
    },
    ProviderDescriptor {
        code: "a115",
        display_name: "115",
        external_id: "115",
        url_signatures: &["115cdn.com", "115.com", "anxia.com"],
    },
];

static BY_EXTERNAL_ID: LazyLock<HashMap<&'static str, &'static ProviderDescriptor>> =
    LazyLock::new(|| PROVIDERS.iter().map(|p| (p.external_id, p)).collect());

static BY_CODE: LazyLock<HashMap<&'static str, &'static ProviderDescriptor>> =
    LazyLock::new(|| PROVIDERS.iter().map(|p| (p.code, p)).collect());

pub fn by_external_id(id: &str) -> Option<&'static ProviderDescriptor> {
    BY_EXTERNAL_ID.get(id).copied()
}

pub fn by_code(code: &str) -> Option<&'static ProviderDescriptor> {
    BY_CODE.get(code).copied()
}

/// First provider (in table order) with a signature contained in `url`,
/// compared case-insensitively.
pub fn by_url_signature(url: &str) -> Option<&'static ProviderDescriptor> {
    if url.is_empty() {
        return None;
    }
    let lowered = url.to_lowercase();
    PROVIDERS
        .iter()
        .find(|p| p.url_signatures.iter().any(|sig| lowered.contains(sig)))
}

/// Provider code for a single link, or [`UNKNOWN`].
pub fn resolve_by_url(url: &str) -> &'static str {
    by_url_signature(url).map_or(UNKNOWN, |p| p.code)
}

/// Provider of a result partition. Labels the table doesn't know are carried
/// through verbatim so their items are never lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCode {
    Known(&'static ProviderDescriptor),
    Unmapped(String),
}

impl ProviderCode {
    pub fn from_external_id(id: &str) -> Self {
        match by_external_id(id) {
            Some(p) => Self::Known(p),
            None => Self::Unmapped(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(p) => p.code,
            Self::Unmapped(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Known(p) => p.display_name,
            Self::Unmapped(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_keys_are_unique() {
        let codes: HashSet<_> = PROVIDERS.iter().map(|p| p.code).collect();
        let ids: HashSet<_> = PROVIDERS.iter().map(|p| p.external_id).collect();
        assert_eq!(codes.len(), PROVIDERS.len());
        assert_eq!(ids.len(), PROVIDERS.len());
    }

    fn code_of(external_id: &str) -> String {
        ProviderCode::from_external_id(external_id).as_str().to_string()
    }

    #[test]
    fn external_ids_map_to_internal_codes() {
        assert_eq!(code_of("aliyun"), "ali");
        assert_eq!(code_of("123"), "a123");
        assert_eq!(code_of("tianyi"), "a189");
        assert_eq!(code_of("mobile"), "a139");
        assert_eq!(code_of("quark"), "quark");
    }

    #[test]
    fn unknown_external_id_passes_through() {
        assert_eq!(code_of("baidu"), "baidu");
        let code = ProviderCode::from_external_id("magnet");
        assert_eq!(code, ProviderCode::Unmapped("magnet".into()));
        assert_eq!(code.display_name(), "magnet");
    }

    #[test]
    fn known_code_uses_display_name() {
        let code = ProviderCode::from_external_id("xunlei");
        assert_eq!(code.as_str(), "xunlei");
        assert_eq!(code.display_name(), "迅雷");
    }

    #[test]
    fn by_code_finds_descriptor() {
        assert_eq!(by_code("a115").map(|p| p.external_id), Some("115"));
        assert!(by_code("aliyun").is_none());
    }

    #[test]
    fn url_classification_is_case_insensitive() {
        assert_eq!(resolve_by_url("https://PAN.QUARK.CN/s/abc"), "quark");
        assert_eq!(resolve_by_url("https://www.AliPan.com/s/xyz"), "ali");
        assert_eq!(resolve_by_url("https://www.123pan.com/s/1"), "a123");
        assert_eq!(resolve_by_url("https://cloud.189.cn/t/q"), "a189");
        assert_eq!(resolve_by_url("https://115cdn.com/s/q"), "a115");
    }

    #[test]
    fn url_without_signature_is_unknown() {
        assert_eq!(resolve_by_url("https://example.com/file"), UNKNOWN);
        assert_eq!(resolve_by_url(""), UNKNOWN);
    }

    #[test]
    fn ambiguous_url_resolves_in_table_order() {
        // matches both quark and xunlei signatures
        let url = "https://pan.quark.cn/s/thunder-pack";
        assert_eq!(resolve_by_url(url), "quark");
    }
}
