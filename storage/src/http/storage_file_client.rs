use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::http::files;
use crate::http::files::get::GetFileRequest;
use crate::http::files::list::ListFilesRequest;
use crate::http::files::prepare::PrepareUploadRequest;
use crate::http::files::{File, Manifest};
use crate::http::s3_client::{S3Client, DEFAULT_REGION};
use crate::http::storage_client::StorageClient;
use crate::http::Error;
use crate::util;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UploadFileOptions {
    pub tags: Vec<String>,
    pub is_public: bool,
    pub is_permanent: bool,
    pub is_encrypted: bool,
    pub is_sliced: bool,
    pub notify: bool,
    /// Gzip the content before uploading; the file name gets a `.gz` suffix.
    pub compress: bool,
}

impl Default for UploadFileOptions {
    fn default() -> Self {
        Self {
            tags: vec![],
            is_public: false,
            is_permanent: false,
            is_encrypted: true,
            is_sliced: false,
            notify: false,
            compress: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageFileClient {
    inner: Arc<StorageClient>,
    s3: S3Client,
}

impl StorageFileClient {
    pub fn new(inner: Arc<StorageClient>, s3: S3Client) -> Self {
        Self { inner, s3 }
    }

    pub fn s3(&self) -> &S3Client {
        &self.s3
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn prepare_upload(&self, req: &PrepareUploadRequest) -> Result<File, Error> {
        let builder = files::prepare::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    /// Uploads a local file and returns the id of the new file resource.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn upload_file(&self, path: &Path, opts: &UploadFileOptions) -> Result<String, Error> {
        let mut name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::Io(std::io::Error::other(format!("{} is not a file", path.display()))))?;
        let mut body = tokio::fs::read(path).await?;
        if opts.compress {
            body = util::blocking(move || util::gzip(&body)).await?;
            name.push_str(".gz");
        }

        let file = self
            .prepare_upload(&PrepareUploadRequest {
                name,
                size_bytes: body.len() as u64,
                is_public: opts.is_public,
                is_permanent: opts.is_permanent,
                is_encrypted: opts.is_encrypted,
                is_sliced: opts.is_sliced,
                notify: opts.notify,
                tags: opts.tags.clone(),
                federation_token: true,
            })
            .await?;
        let params = file
            .upload_params
            .as_ref()
            .ok_or_else(|| Error::UnexpectedResponse(format!("file {} has no upload parameters", file.id)))?;
        let region = file.region.as_deref().unwrap_or(DEFAULT_REGION);
        self.s3.put_object(params, region, body).await?;
        tracing::debug!("uploaded {} as file {}", path.display(), file.id);
        Ok(file.id)
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, file_id: &str, req: &GetFileRequest) -> Result<File, Error> {
        let builder = files::get::build(self.inner.endpoint(), self.inner.http(), file_id, req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListFilesRequest) -> Result<Vec<File>, Error> {
        let builder = files::list::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(&self, file_id: &str) -> Result<(), Error> {
        let builder = files::delete::build(self.inner.endpoint(), self.inner.http(), file_id);
        self.inner.send_get_empty(builder).await
    }

    /// Downloads the file into `dir` under its own name. Slices of a sliced
    /// file are joined into that one file as they are.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn download(&self, file_id: &str, dir: &Path) -> Result<PathBuf, Error> {
        let file = self.get(file_id, &GetFileRequest { federation_token: true }).await?;
        let dest = dir.join(&file.name);
        if file.is_sliced {
            let slices_dir = tempfile::tempdir()?;
            let slices = self.download_slices(&file, slices_dir.path()).await?;
            let target = dest.clone();
            util::blocking(move || util::concat_files(&slices, &target, None, false)).await?;
        } else {
            self.s3.download(&file.url, &dest).await?;
        }
        Ok(dest)
    }

    /// Downloads every slice listed in the manifest of a sliced file into `dir`,
    /// returning their paths in manifest order.
    ///
    /// `file` must have been fetched with a federation token.
    pub async fn download_slices(&self, file: &File, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let credentials = file
            .credentials
            .as_ref()
            .ok_or_else(|| Error::UnexpectedResponse(format!("file {} has no credentials", file.id)))?;
        let region = file.region.as_deref().unwrap_or(DEFAULT_REGION);
        let manifest: Manifest = self.s3.get_json(&file.url).await?;

        let mut paths = Vec::with_capacity(manifest.entries.len());
        for (index, entry) in manifest.entries.iter().enumerate() {
            let s3_path = entry
                .s3_path()
                .ok_or_else(|| Error::UnexpectedResponse(format!("invalid slice url {}", entry.url)))?;
            // slice names are unique per manifest but keep the order visible
            let base = s3_path.key.rsplit('/').next().unwrap_or_default();
            let dest = dir.join(format!("{index:05}_{base}"));
            self.s3.get_object(&s3_path, credentials, region, &dest).await?;
            paths.push(dest);
        }
        tracing::debug!("downloaded {} slices of file {}", paths.len(), file.id);
        Ok(paths)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::Read;
    use std::sync::Arc;

    use flate2::read::GzDecoder;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use crate::http::files::get::GetFileRequest;
    use crate::http::files::list::ListFilesRequest;
    use crate::http::s3_client::S3Client;
    use crate::http::storage_client::test::{create_client, http, write_csv, TOKEN};
    use crate::http::storage_client::TOKEN_HEADER;
    use crate::http::storage_file_client::{StorageFileClient, UploadFileOptions};

    pub fn credentials_json() -> serde_json::Value {
        json!({
            "AccessKeyId": "ASIAEXAMPLE",
            "SecretAccessKey": "secret",
            "SessionToken": "session",
            "Expiration": "2030-01-01T00:00:00+00:00"
        })
    }

    /// Mounts `prepare` returning file `id` and an S3 PUT target for it.
    pub async fn mount_upload(server: &MockServer, id: u64) {
        Mock::given(method("POST"))
            .and(path("/v2/storage/files/prepare"))
            .and(body_partial_json(json!({"federationToken": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": "upload",
                "region": "us-east-1",
                "isSliced": false,
                "uploadParams": {
                    "bucket": "kbc-sapi-files",
                    "key": format!("exp-15/files/{id}"),
                    "acl": "private",
                    "x-amz-server-side-encryption": "AES256",
                    "credentials": credentials_json()
                }
            })))
            .mount(server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/kbc-sapi-files/exp-15/files/{id}")))
            .and(header("x-amz-server-side-encryption", "AES256"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    /// Mounts a sliced file whose manifest lists `slices`, each served from S3.
    pub async fn mount_sliced_file(server: &MockServer, id: u64, name: &str, slices: &[Vec<u8>]) {
        let entries: Vec<_> = (0..slices.len())
            .map(|i| json!({"url": format!("s3://kbc-sapi-files/exp-2/{id}/{id}.csv.gz000{i}_part_00")}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/v2/storage/files/{id}")))
            .and(query_param("federationToken", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": name,
                "isSliced": true,
                "region": "us-east-1",
                "url": format!("{}/manifests/{id}.manifest", server.uri()),
                "s3Path": {"bucket": "kbc-sapi-files", "key": format!("exp-2/{id}/{id}.csv.gz")},
                "credentials": credentials_json()
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/manifests/{id}.manifest")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": entries})))
            .mount(server)
            .await;
        for (i, slice) in slices.iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(format!("/kbc-sapi-files/exp-2/{id}/{id}.csv.gz000{i}_part_00")))
                .and(header("x-amz-security-token", "session"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(slice.clone()))
                .mount(server)
                .await;
        }
    }

    async fn create_file_client() -> (StorageFileClient, MockServer) {
        let (client, server) = create_client().await;
        let s3 = S3Client::new(http(), Some(server.uri()));
        (StorageFileClient::new(Arc::new(client), s3), server)
    }

    #[tokio::test]
    async fn upload_compressed() {
        let (client, server) = create_file_client().await;
        Mock::given(method("POST"))
            .and(path("/v2/storage/files/prepare"))
            .and(header(TOKEN_HEADER, TOKEN))
            .and(body_partial_json(json!({
                "name": "sapi-test.csv.gz",
                "isEncrypted": true,
                "federationToken": true,
                "tags": ["file-import"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 55,
                "name": "sapi-test.csv.gz",
                "region": "us-east-1",
                "uploadParams": {
                    "bucket": "kbc-sapi-files",
                    "key": "exp-15/files/55",
                    "credentials": credentials_json()
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/kbc-sapi-files/exp-15/files/55"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("sapi-test.csv");
        write_csv(&csv_path, &["col1", "col2"], &[&["ping", "pong"]]);

        let id = client
            .upload_file(
                &csv_path,
                &UploadFileOptions {
                    tags: vec!["file-import".to_string()],
                    compress: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(id, "55");

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
        let mut plain = String::new();
        GzDecoder::new(put.body.as_slice()).read_to_string(&mut plain).unwrap();
        assert_eq!(plain, "col1,col2\nping,pong\n");
    }

    #[tokio::test]
    async fn download_plain_file() {
        let (client, server) = create_file_client().await;
        Mock::given(method("GET"))
            .and(path("/v2/storage/files/77"))
            .and(query_param("federationToken", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 77,
                "name": "data.csv",
                "isSliced": false,
                "url": format!("{}/presigned/77", server.uri())
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/presigned/77"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"a\"\n\"b\"\n"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = client.download("77", dir.path()).await.unwrap();
        assert_eq!(local, dir.path().join("data.csv"));
        assert_eq!(std::fs::read_to_string(local).unwrap(), "\"a\"\n\"b\"\n");
    }

    #[tokio::test]
    async fn download_sliced_file() {
        let (client, server) = create_file_client().await;
        mount_sliced_file(&server, 78, "sliced.csv", &[b"\"1\"\n".to_vec(), b"\"2\"\n".to_vec()]).await;

        let dir = tempfile::tempdir().unwrap();
        let local = client.download("78", dir.path()).await.unwrap();
        assert_eq!(std::fs::read_to_string(local).unwrap(), "\"1\"\n\"2\"\n");
    }

    #[tokio::test]
    async fn list_and_delete() {
        let (client, server) = create_file_client().await;
        Mock::given(method("GET"))
            .and(path("/v2/storage/files"))
            .and(query_param("tags[]", "file-import"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "a.csv", "tags": ["file-import"]},
                {"id": 2, "name": "b.csv", "tags": ["file-import"]}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/storage/files/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let files = client
            .list(&ListFilesRequest {
                limit: Some(2),
                tags: vec!["file-import".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].name, "b.csv");
        client.delete(&files[0].id).await.unwrap();
    }

    #[tokio::test]
    async fn get_without_federation_token() {
        let (client, server) = create_file_client().await;
        Mock::given(method("GET"))
            .and(path("/v2/storage/files/91"))
            .and(query_param_is_missing("federationToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 91,
                "name": "plain.csv",
                "url": "https://kbc-sapi-files.s3.amazonaws.com/exp-15/91?signature",
                "sizeBytes": "12",
                "isSliced": false,
                "tags": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = client.get("91", &GetFileRequest::default()).await.unwrap();
        assert_eq!(file.id, "91");
        assert_eq!(file.size_bytes, Some(12));
        assert!(file.tags.is_empty());
        assert!(file.credentials.is_none());
        assert!(file.s3_path.is_none());
    }
}
