use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Registers a file and asks for a place to upload its content.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrepareUploadRequest {
    pub name: String,
    pub size_bytes: u64,
    pub is_public: bool,
    /// Keep the file forever instead of the default retention.
    pub is_permanent: bool,
    pub is_encrypted: bool,
    pub is_sliced: bool,
    pub notify: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Return temporary credentials in `uploadParams`.
    pub federation_token: bool,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &PrepareUploadRequest) -> RequestBuilder {
    let url = format!("{base_url}/files/prepare");
    client.post(url).json(req)
}
