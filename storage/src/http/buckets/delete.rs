use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBucketRequest {
    /// Delete the bucket even when it still contains tables.
    #[serde(
        skip_serializing_if = "crate::http::is_false",
        serialize_with = "crate::http::bool_as_int"
    )]
    pub force: bool,
}

pub(crate) fn build(base_url: &str, client: &Client, bucket_id: &str, req: &DeleteBucketRequest) -> RequestBuilder {
    let url = format!("{}/buckets/{}", base_url, bucket_id.escape());
    client.delete(url).query(req)
}
