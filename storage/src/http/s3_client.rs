use std::path::Path;
use std::time::SystemTime;

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::{BehaviorVersion, Builder as S3ConfigBuilder, Region};
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ObjectCannedAcl, ServerSideEncryption};
use aws_sdk_s3::Client as AwsS3Client;
use futures_util::StreamExt;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use tokio::io::AsyncWriteExt;

use crate::http::files::{Credentials, S3Path, UploadParams};
use crate::http::{check_response_status, Error};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Moves file content to and from S3, either through pre-signed URLs or
/// with the temporary credentials of a file.
#[derive(Debug, Clone)]
pub struct S3Client {
    http: Client,
    /// Path-style endpoint used instead of AWS, e.g. `http://localhost:4566`.
    endpoint: Option<String>,
}

impl S3Client {
    pub(crate) fn new(http: Client, endpoint: Option<String>) -> Self {
        Self { http, endpoint }
    }

    /// An SDK client signing with the temporary credentials of one file.
    fn sdk(&self, credentials: &Credentials, region: &str) -> AwsS3Client {
        let credentials = aws_sdk_s3::config::Credentials::new(
            &credentials.access_key_id,
            &credentials.secret_access_key,
            Some(credentials.session_token.clone()).filter(|t| !t.is_empty()),
            credentials.expiration.map(SystemTime::from),
            "kbc-storage",
        );
        let mut config = S3ConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired);
        if let Some(endpoint) = &self.endpoint {
            config = config.endpoint_url(endpoint.trim_end_matches('/')).force_path_style(true);
        }
        AwsS3Client::from_conf(config.build())
    }

    /// Uploads the content of a prepared file.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn put_object(&self, params: &UploadParams, region: &str, body: Vec<u8>) -> Result<(), Error> {
        tracing::debug!("uploading {} bytes to s3://{}/{}", body.len(), params.bucket, params.key);
        let mut req = self
            .sdk(&params.credentials, region)
            .put_object()
            .bucket(&params.bucket)
            .key(&params.key)
            .body(ByteStream::from(body));
        if let Some(acl) = &params.acl {
            req = req.acl(ObjectCannedAcl::from(acl.as_str()));
        }
        if let Some(sse) = &params.server_side_encryption {
            req = req.server_side_encryption(ServerSideEncryption::from(sse.as_str()));
        }
        req.send().await.map_err(s3_error)?;
        Ok(())
    }

    /// Downloads one object into `dest`, returning the number of bytes written.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_object(
        &self,
        path: &S3Path,
        credentials: &Credentials,
        region: &str,
        dest: &Path,
    ) -> Result<u64, Error> {
        tracing::debug!("downloading s3://{}/{} to {}", path.bucket, path.key, dest.display());
        let response = self
            .sdk(credentials, region)
            .get_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(s3_error)?;

        let mut reader = response.body.into_async_read();
        let mut file = tokio::fs::File::create(dest).await?;
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        Ok(written)
    }

    /// Downloads a pre-signed URL into `dest`, returning the number of bytes written.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64, Error> {
        self.write_response(self.http.get(url), dest).await
    }

    /// Fetches and decodes a JSON document from a pre-signed URL.
    pub async fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.http.get(url).send().await?;
        let response = check_response_status(response).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    async fn write_response(&self, builder: RequestBuilder, dest: &Path) -> Result<u64, Error> {
        let response = builder.send().await?;
        let response = check_response_status(response).await?;
        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}

fn s3_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::S3 {
        status: err.raw_response().map(|r| r.status().as_u16()),
        message: DisplayErrorContext(&err).to_string(),
    }
}
