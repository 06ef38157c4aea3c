use crate::http::types::Metadata;

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;
pub mod list_tables;

/// Stage of a bucket, the first part of its id (`in.c-main`).
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    In,
    Out,
    Sys,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::In => "in",
            Stage::Out => "out",
            Stage::Sys => "sys",
        }
    }
}

/// A bucket.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Full id, `{stage}.c-{name}`.
    pub id: String,
    /// Name including the `c-` prefix.
    pub name: String,
    pub display_name: Option<String>,
    pub stage: Stage,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub description: String,
    /// Backend the bucket lives in, e.g. `snowflake`.
    pub backend: Option<String>,
    /// URL of the bucket's table listing.
    pub tables: Option<String>,
    pub created: Option<String>,
    pub last_change_date: Option<String>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_read_only: bool,
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub data_size_bytes: Option<u64>,
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub rows_count: Option<u64>,
    /// Present when listed with `include=metadata`.
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub metadata: Vec<Metadata>,
}
