use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;

use crate::http::s3_client::S3Client;
use crate::http::storage_bucket_client::StorageBucketClient;
use crate::http::storage_client::StorageClient;
use crate::http::storage_file_client::StorageFileClient;
use crate::http::storage_job_client::{JobPollSetting, StorageJobClient};
use crate::http::storage_table_client::StorageTableClient;
use crate::token_source::{StaticTokenSource, TokenSourceProvider};

pub const URL_ENV: &str = "KBC_STORAGE_API_URL";
pub const TOKEN_ENV: &str = "KBC_STORAGE_API_TOKEN";

#[derive(Debug)]
pub struct ClientConfig {
    pub http: Option<ClientWithMiddleware>,
    /// Root URL of the stack, e.g. `https://connection.keboola.com`.
    pub storage_endpoint: String,
    pub token_source_provider: Box<dyn TokenSourceProvider>,
    /// Path-style S3 endpoint used instead of AWS, e.g. `http://localhost:4566`.
    pub s3_endpoint: Option<String>,
    pub job_polling: JobPollSetting,
    /// Log raw JSON responses before decoding them.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            storage_endpoint: "https://connection.keboola.com".to_string(),
            token_source_provider: Box::new(StaticTokenSource::new("")),
            s3_endpoint: None,
            job_polling: JobPollSetting::default(),
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            storage_endpoint: url.into(),
            token_source_provider: Box::new(StaticTokenSource::new(token)),
            ..Default::default()
        }
    }

    /// Reads the URL and token from `KBC_STORAGE_API_URL` and `KBC_STORAGE_API_TOKEN`.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let url = std::env::var(URL_ENV)?;
        let token = std::env::var(TOKEN_ENV)?;
        Ok(Self::new(url, token))
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    bucket_client: StorageBucketClient,
    table_client: StorageTableClient,
    file_client: StorageFileClient,
    job_client: StorageJobClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// New client
    pub fn new(config: ClientConfig) -> Self {
        let ts = config.token_source_provider.token_source();
        let http = config
            .http
            .unwrap_or_else(|| reqwest_middleware::ClientBuilder::new(reqwest::Client::default()).build());

        let inner = Arc::new(StorageClient::new(
            ts,
            config.storage_endpoint.as_str(),
            http.clone(),
            config.debug,
        ));
        let s3 = S3Client::new(http, config.s3_endpoint);
        let file_client = StorageFileClient::new(inner.clone(), s3);
        let job_client = StorageJobClient::new(inner.clone(), config.job_polling);
        let table_client = StorageTableClient::new(inner.clone(), file_client.clone(), job_client.clone());

        Self {
            bucket_client: StorageBucketClient::new(inner),
            table_client,
            file_client,
            job_client,
        }
    }

    pub fn buckets(&self) -> &StorageBucketClient {
        &self.bucket_client
    }

    pub fn tables(&self) -> &StorageTableClient {
        &self.table_client
    }

    pub fn files(&self) -> &StorageFileClient {
        &self.file_client
    }

    pub fn jobs(&self) -> &StorageJobClient {
        &self.job_client
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::{Client, ClientConfig, TOKEN_ENV, URL_ENV};
    use crate::http::buckets::list::ListBucketsRequest;
    use crate::http::storage_client::TOKEN_HEADER;

    #[tokio::test]
    async fn sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/storage/buckets"))
            .and(header(TOKEN_HEADER, "123-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(ClientConfig::new(format!("{}/", server.uri()), "123-abc"));
        let buckets = client.buckets().list(&ListBucketsRequest::default()).await.unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    #[serial]
    fn config_from_env() {
        std::env::remove_var(TOKEN_ENV);
        std::env::set_var(URL_ENV, "https://connection.eu-central-1.keboola.com");
        assert!(ClientConfig::from_env().is_err());

        std::env::set_var(TOKEN_ENV, "123-abc");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.storage_endpoint, "https://connection.eu-central-1.keboola.com");
        assert!(config.s3_endpoint.is_none());
        assert!(!config.debug);

        std::env::remove_var(URL_ENV);
        std::env::remove_var(TOKEN_ENV);
    }
}
