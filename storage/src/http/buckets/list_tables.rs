use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketTablesRequest {
    /// Additional properties to return, e.g. `["columns", "metadata"]`.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub include: Vec<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, bucket_id: &str, req: &ListBucketTablesRequest) -> RequestBuilder {
    let url = format!("{}/buckets/{}/tables", base_url, bucket_id.escape());
    client.get(url).query(req)
}
