use std::collections::HashMap;

use crate::http::buckets::Bucket;
use crate::http::types::Metadata;

pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod insert;
pub mod list;
pub mod preview;

/// A table.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Full id, `{bucket id}.{name}`.
    pub id: String,
    /// API URL of the table resource.
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub uri: String,
    pub name: String,
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub transactional: bool,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub primary_key: Vec<String>,
    pub created: Option<String>,
    /// `None` until the first import finished.
    pub last_import_date: Option<String>,
    pub last_change_date: Option<String>,
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub rows_count: Option<u64>,
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub data_size_bytes: Option<u64>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_alias: bool,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub is_aliasable: bool,
    /// Column names in table order.
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub columns: Vec<String>,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub metadata: Vec<Metadata>,
    #[serde(default, deserialize_with = "crate::http::map_or_empty_seq")]
    pub column_metadata: HashMap<String, Vec<Metadata>>,
    pub bucket: Option<Bucket>,
}

/// CSV dialect of an uploaded file.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CsvDialect {
    pub delimiter: String,
    pub enclosure: String,
    /// Escape character; empty when quotes are escaped by doubling them.
    pub escaped_by: String,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            enclosure: "\"".to_string(),
            escaped_by: "".to_string(),
        }
    }
}

/// Comparison used by `whereColumn`/`whereValues` filters.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum WhereOperator {
    #[default]
    Eq,
    Ne,
}

impl WhereOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereOperator::Eq => "eq",
            WhereOperator::Ne => "ne",
        }
    }
}

/// Row filter shared by preview and export.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct WhereFilter {
    pub where_column: String,
    pub where_values: Vec<String>,
    pub where_operator: WhereOperator,
}
