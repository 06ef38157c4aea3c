use std::sync::Arc;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::{check_response_status, Error};
use crate::token_source::TokenSource;

pub const TOKEN_HEADER: &str = "X-StorageApi-Token";

const USER_AGENT: &str = concat!("kbc-storage-rust/", env!("CARGO_PKG_VERSION"));

/// Request core shared by the resource clients.
#[derive(Debug, Clone)]
pub struct StorageClient {
    ts: Arc<dyn TokenSource>,
    endpoint: String,
    http: Client,
    debug: bool,
}

impl StorageClient {
    pub(crate) fn new(ts: Arc<dyn TokenSource>, endpoint: &str, http: Client, debug: bool) -> Self {
        Self {
            ts,
            endpoint: format!("{}/v2/storage", endpoint.trim_end_matches('/')),
            http,
            debug,
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    async fn with_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let token = self.ts.token().await.map_err(Error::TokenSource)?;
        Ok(builder
            .header(TOKEN_HEADER, token)
            .header(reqwest::header::USER_AGENT, USER_AGENT))
    }

    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = self.with_headers(builder).await?;
        let response = request.send().await?;
        let response = check_response_status(response).await?;
        if self.debug {
            let text = response.text().await?;
            tracing::info!("{}", text);
            Ok(serde_json::from_str(text.as_str())?)
        } else {
            Ok(response.json().await?)
        }
    }

    /// Sends the request and returns the body as text, for CSV responses.
    pub async fn send_text(&self, builder: RequestBuilder) -> Result<String, Error> {
        let request = self.with_headers(builder).await?;
        let response = request.send().await?;
        let response = check_response_status(response).await?;
        Ok(response.text().await?)
    }

    pub async fn send_get_empty(&self, builder: RequestBuilder) -> Result<(), Error> {
        let builder = self.with_headers(builder).await?;
        let response = builder.send().await?;
        check_response_status(response).await?;
        Ok(())
    }
}
