use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::tables::CsvDialect;
use crate::http::Escape;

/// Body of the asynchronous table import.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportTableRequest {
    pub data_file_id: String,
    /// Append to (or upsert by primary key into) the table instead of replacing its content.
    #[serde(serialize_with = "crate::http::bool_as_int")]
    pub incremental: bool,
    #[serde(flatten)]
    pub dialect: CsvDialect,
    /// Column names of a file without a header row.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub columns: Vec<String>,
    #[serde(serialize_with = "crate::http::bool_as_int")]
    pub without_headers: bool,
}

pub(crate) fn build(base_url: &str, client: &Client, table_id: &str, req: &ImportTableRequest) -> RequestBuilder {
    let url = format!("{}/tables/{}/import-async", base_url, table_id.escape());
    client.post(url).json(req)
}
