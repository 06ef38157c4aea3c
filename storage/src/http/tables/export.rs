use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::tables::WhereFilter;
use crate::http::Escape;

/// Output format of an export.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// RFC 4180 CSV, every value enclosed in double quotes.
    #[default]
    Rfc,
    Raw,
    Escaped,
}

/// Body of the asynchronous table export.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportTableRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    pub format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_until: Option<String>,
    /// Subset of columns to export, in this order.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub filter: Option<WhereFilter>,
    /// Compress the exported file.
    pub gzip: bool,
}

pub(crate) fn build(base_url: &str, client: &Client, table_id: &str, req: &ExportTableRequest) -> RequestBuilder {
    let url = format!("{}/tables/{}/export-async", base_url, table_id.escape());
    client.post(url).json(req)
}
