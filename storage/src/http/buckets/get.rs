use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

pub(crate) fn build(base_url: &str, client: &Client, bucket_id: &str) -> RequestBuilder {
    let url = format!("{}/buckets/{}", base_url, bucket_id.escape());
    client.get(url)
}
