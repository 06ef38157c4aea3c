use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::buckets::Stage;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketRequest {
    /// Name without the `c-` prefix; the service adds it.
    pub name: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backend to create the bucket in. The project default is used when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CreateBucketRequest) -> RequestBuilder {
    let url = format!("{base_url}/buckets");
    client.post(url).json(req)
}

impl CreateBucketRequest {
    /// Id the bucket will have once created, e.g. `in.c-main`.
    pub fn bucket_id(&self) -> String {
        format!("{}.c-{}", self.stage.as_str(), self.name)
    }
}
