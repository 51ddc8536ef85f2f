//! Per-call options supplied by the host

use serde::Deserialize;

/// Options for one extraction call, sent by the host as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    /// URL of the page the snapshot was taken from. When set, the URL gate
    /// runs before the document is inspected.
    pub page_url: Option<String>,
}

impl ExtractOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}
