use serde::{Deserialize, Serialize};

/// The `@HD` line. A file carries at most one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLine {
    /// Format version (VN tag), e.g. `1.6`
    pub version: String,

    /// Sort order (SO tag). Free-form: `unknown`, `unsorted`, `queryname`
    /// and `coordinate` are the documented values but others are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl HeaderLine {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sort_order: None,
        }
    }

    #[must_use]
    pub fn with_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }
}
