use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

pub(crate) fn build(base_url: &str, client: &Client, file_id: &str) -> RequestBuilder {
    let url = format!("{}/files/{}", base_url, file_id.escape());
    client.delete(url)
}
