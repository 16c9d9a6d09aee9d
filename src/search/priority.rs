//! The optional provider allow-list (`pan_priority`).
//!
//! Unset and empty both mean "no filter". When present, the list both
//! filters partitions and orders them: earlier codes rank first.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanPriority(Vec<String>);

impl PanPriority {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for code in codes {
            let code: String = code.into();
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            // a repeated code takes its last position
            list.retain(|c| c != code);
            list.push(code.to_string());
        }
        Self(list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether an item of this provider survives filtering.
    pub fn allows(&self, code: &str) -> bool {
        self.is_empty() || self.0.iter().any(|c| c == code)
    }

    /// Rank of `code` within the list; unlisted codes sort after all listed ones.
    pub fn position(&self, code: &str) -> usize {
        self.0.iter().position(|c| c == code).unwrap_or(usize::MAX)
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    /// Comma-separated codes; blanks are dropped and the last occurrence
    /// of a repeated code wins.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }
}
