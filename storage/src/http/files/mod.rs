pub mod delete;
pub mod get;
pub mod list;
pub mod prepare;

/// A file kept in the project's file storage.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(deserialize_with = "crate::http::string_or_number")]
    pub id: String,
    pub name: String,
    /// Pre-signed download URL. For sliced files it points to the manifest.
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub size_bytes: Option<u64>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_sliced: bool,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_public: bool,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_encrypted: bool,
    pub created: Option<String>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub tags: Vec<String>,
    /// Storage provider, `aws` for S3 backed projects.
    pub provider: Option<String>,
    pub region: Option<String>,
    /// Location of the object, returned with a federation token.
    pub s3_path: Option<S3Path>,
    /// Temporary credentials, returned with a federation token.
    pub credentials: Option<Credentials>,
    /// Where to put the content, returned by [`prepare`](crate::http::storage_file_client::StorageFileClient::prepare_upload).
    pub upload_params: Option<UploadParams>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct S3Path {
    pub bucket: String,
    pub key: String,
}

/// Temporary AWS credentials scoped to a single file.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expiration: Option<time::OffsetDateTime>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct UploadParams {
    pub bucket: String,
    pub key: String,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub acl: Option<String>,
    pub credentials: Credentials,
    /// Server side encryption to request, e.g. `AES256`.
    #[serde(default, rename = "x-amz-server-side-encryption")]
    pub server_side_encryption: Option<String>,
}

/// Content of a sliced file's manifest.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
pub struct ManifestEntry {
    /// `s3://bucket/key` of one slice.
    pub url: String,
}

impl ManifestEntry {
    /// Splits the `s3://` URL into bucket and key.
    pub fn s3_path(&self) -> Option<S3Path> {
        let rest = self.url.strip_prefix("s3://")?;
        let (bucket, key) = rest.split_once('/')?;
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(S3Path {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}
