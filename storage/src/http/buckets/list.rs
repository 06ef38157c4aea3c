use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketsRequest {
    /// Additional properties to return, e.g. `["metadata"]`.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub include: Vec<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListBucketsRequest) -> RequestBuilder {
    let url = format!("{base_url}/buckets");
    client.get(url).query(req)
}
