use std::sync::Arc;

use crate::http::buckets;
use crate::http::buckets::delete::DeleteBucketRequest;
use crate::http::buckets::insert::CreateBucketRequest;
use crate::http::buckets::list::ListBucketsRequest;
use crate::http::buckets::list_tables::ListBucketTablesRequest;
use crate::http::buckets::Bucket;
use crate::http::storage_client::StorageClient;
use crate::http::tables::Table;
use crate::http::Error;

#[derive(Debug, Clone)]
pub struct StorageBucketClient {
    inner: Arc<StorageClient>,
}

impl StorageBucketClient {
    pub fn new(inner: Arc<StorageClient>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListBucketsRequest) -> Result<Vec<Bucket>, Error> {
        let builder = buckets::list::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_tables(&self, bucket_id: &str, req: &ListBucketTablesRequest) -> Result<Vec<Table>, Error> {
        let builder = buckets::list_tables::build(self.inner.endpoint(), self.inner.http(), bucket_id, req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, bucket_id: &str) -> Result<Bucket, Error> {
        let builder = buckets::get::build(self.inner.endpoint(), self.inner.http(), bucket_id);
        self.inner.send(builder).await
    }

    /// Creates a bucket. The new bucket id is `{stage}.c-{name}`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, req: &CreateBucketRequest) -> Result<Bucket, Error> {
        let builder = buckets::insert::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(&self, bucket_id: &str, req: &DeleteBucketRequest) -> Result<(), Error> {
        let builder = buckets::delete::build(self.inner.endpoint(), self.inner.http(), bucket_id, req);
        self.inner.send_get_empty(builder).await
    }
}
