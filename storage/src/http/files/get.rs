use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetFileRequest {
    /// Also return temporary credentials for direct access to the object.
    #[serde(
        skip_serializing_if = "crate::http::is_false",
        serialize_with = "crate::http::bool_as_int"
    )]
    pub federation_token: bool,
}

pub(crate) fn build(base_url: &str, client: &Client, file_id: &str, req: &GetFileRequest) -> RequestBuilder {
    let url = format!("{}/files/{}", base_url, file_id.escape());
    client.get(url).query(req)
}
