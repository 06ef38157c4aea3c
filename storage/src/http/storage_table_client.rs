use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::http::files::get::GetFileRequest;
use crate::http::jobs::Job;
use crate::http::storage_client::StorageClient;
use crate::http::storage_file_client::{StorageFileClient, UploadFileOptions};
use crate::http::storage_job_client::StorageJobClient;
use crate::http::tables;
use crate::http::tables::export::ExportTableRequest;
use crate::http::tables::import::ImportTableRequest;
use crate::http::tables::insert::CreateTableRequest;
use crate::http::tables::list::ListTablesRequest;
use crate::http::tables::preview::PreviewTableRequest;
use crate::http::tables::{CsvDialect, Table};
use crate::http::Error;
use crate::util;

/// Tag of the files uploaded to create or load a table.
pub const FILE_IMPORT_TAG: &str = "file-import";

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CreateTableOptions {
    pub primary_key: Vec<String>,
    pub dialect: CsvDialect,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LoadTableOptions {
    /// Append to the table instead of replacing its content.
    pub incremental: bool,
    pub dialect: CsvDialect,
    /// Columns of the file when it has no header row.
    pub columns: Vec<String>,
    pub without_headers: bool,
}

#[derive(Debug, Clone)]
pub struct StorageTableClient {
    inner: Arc<StorageClient>,
    files: StorageFileClient,
    jobs: StorageJobClient,
}

impl StorageTableClient {
    pub fn new(inner: Arc<StorageClient>, files: StorageFileClient, jobs: StorageJobClient) -> Self {
        Self { inner, files, jobs }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListTablesRequest) -> Result<Vec<Table>, Error> {
        let builder = tables::list::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, table_id: &str) -> Result<Table, Error> {
        let builder = tables::get::build(self.inner.endpoint(), self.inner.http(), table_id);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(&self, table_id: &str) -> Result<(), Error> {
        let builder = tables::delete::build(self.inner.endpoint(), self.inner.http(), table_id);
        self.inner.send_get_empty(builder).await
    }

    /// Starts the creation job without waiting for it.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_raw(&self, bucket_id: &str, req: &CreateTableRequest) -> Result<Job, Error> {
        let builder = tables::insert::build(self.inner.endpoint(), self.inner.http(), bucket_id, req);
        self.inner.send(builder).await
    }

    /// Creates a table from a local CSV file with a header row and returns the table id.
    ///
    /// ```ignore
    /// let table_id = client
    ///     .tables()
    ///     .create("in.c-main", "some-table", Path::new("data.csv"), &CreateTableOptions::default())
    ///     .await?;
    /// ```
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(
        &self,
        bucket_id: &str,
        name: &str,
        file_path: &Path,
        opts: &CreateTableOptions,
    ) -> Result<String, Error> {
        let file_id = self.upload_for_import(file_path).await?;
        let req = CreateTableRequest {
            name: name.to_string(),
            data_file_id: Some(file_id),
            data_url: None,
            primary_key: opts.primary_key.clone(),
            dialect: opts.dialect.clone(),
        };
        let job = self.create_raw(bucket_id, &req).await?;
        let job = self.jobs.block_for_success(&job.id).await?;
        job.result_id()
            .ok_or_else(|| Error::UnexpectedResponse(format!("job {} has no table id", job.id)))
    }

    /// Starts the import job without waiting for it.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn load_raw(&self, table_id: &str, req: &ImportTableRequest) -> Result<Job, Error> {
        let builder = tables::import::build(self.inner.endpoint(), self.inner.http(), table_id, req);
        self.inner.send(builder).await
    }

    /// Imports a local CSV file into an existing table and returns the finished job.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn load(&self, table_id: &str, file_path: &Path, opts: &LoadTableOptions) -> Result<Job, Error> {
        let file_id = self.upload_for_import(file_path).await?;
        let req = ImportTableRequest {
            data_file_id: file_id,
            incremental: opts.incremental,
            dialect: opts.dialect.clone(),
            columns: opts.columns.clone(),
            without_headers: opts.without_headers,
        };
        let job = self.load_raw(table_id, &req).await?;
        self.jobs.block_for_success(&job.id).await
    }

    /// Returns the first rows of the table as CSV, header included.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn preview(&self, table_id: &str, req: &PreviewTableRequest) -> Result<String, Error> {
        let builder = tables::preview::build(self.inner.endpoint(), self.inner.http(), table_id, req);
        self.inner.send_text(builder).await
    }

    /// Starts the export job without waiting for it.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn export_raw(&self, table_id: &str, req: &ExportTableRequest) -> Result<Job, Error> {
        let builder = tables::export::build(self.inner.endpoint(), self.inner.http(), table_id, req);
        self.inner.send(builder).await
    }

    /// Exports the table into a Storage file and returns the file id.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn export(&self, table_id: &str, req: &ExportTableRequest) -> Result<String, Error> {
        let job = self.export_raw(table_id, req).await?;
        let job = self.jobs.block_for_success(&job.id).await?;
        job.result_file_id()
            .ok_or_else(|| Error::UnexpectedResponse(format!("job {} has no file id", job.id)))
    }

    /// Exports the table to `dir/<table name>` as plain CSV with a header row.
    ///
    /// `req.gzip` only compresses the transfer. The local file is decompressed either way,
    /// so leaving it at the default `false` gives the same result.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn export_to_file(&self, table_id: &str, dir: &Path, req: &ExportTableRequest) -> Result<PathBuf, Error> {
        let table = self.get(table_id).await?;
        let file_id = self.export(table_id, req).await?;
        let file = self.files.get(&file_id, &GetFileRequest { federation_token: true }).await?;

        let work = tempfile::tempdir()?;
        let gzip = req.gzip || file.name.ends_with(".gz");
        let (sources, header) = if file.is_sliced {
            // slices have no header row
            let header = if req.columns.is_empty() {
                table.columns.clone()
            } else {
                req.columns.clone()
            };
            (self.files.download_slices(&file, work.path()).await?, Some(header))
        } else {
            let local = work.path().join(&file.name);
            self.files.s3().download(&file.url, &local).await?;
            (vec![local], None)
        };

        let dest = dir.join(&table.name);
        let target = dest.clone();
        util::blocking(move || util::concat_files(&sources, &target, header.as_deref(), gzip)).await?;
        tracing::debug!("exported {} to {}", table_id, dest.display());
        Ok(dest)
    }

    async fn upload_for_import(&self, file_path: &Path) -> Result<String, Error> {
        let opts = UploadFileOptions {
            tags: vec![FILE_IMPORT_TAG.to_string()],
            ..Default::default()
        };
        self.files.upload_file(file_path, &opts).await
    }
}
