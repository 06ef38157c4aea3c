use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

pub(crate) fn build(base_url: &str, client: &Client, table_id: &str) -> RequestBuilder {
    let url = format!("{}/tables/{}", base_url, table_id.escape());
    client.delete(url)
}
