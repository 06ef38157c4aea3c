use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

pub(crate) fn build(base_url: &str, client: &Client, job_id: &str) -> RequestBuilder {
    let url = format!("{}/jobs/{}", base_url, job_id.escape());
    client.get(url)
}
