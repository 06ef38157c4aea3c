use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::tables::CsvDialect;
use crate::http::Escape;

/// Body of the asynchronous table creation.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub name: String,
    /// Id of an uploaded file holding the initial data, header row included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file_id: Option<String>,
    /// Public URL of the initial data, used when no file id is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub primary_key: Vec<String>,
    #[serde(flatten)]
    pub dialect: CsvDialect,
}

pub(crate) fn build(base_url: &str, client: &Client, bucket_id: &str, req: &CreateTableRequest) -> RequestBuilder {
    let url = format!("{}/buckets/{}/tables-async", base_url, bucket_id.escape());
    client.post(url).json(req)
}
