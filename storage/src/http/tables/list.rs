use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesRequest {
    /// Additional properties to return, e.g. `["buckets", "columns"]`.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "crate::http::comma_joined"
    )]
    pub include: Vec<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListTablesRequest) -> RequestBuilder {
    let url = format!("{base_url}/tables");
    client.get(url).query(req)
}
