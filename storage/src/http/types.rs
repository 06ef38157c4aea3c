/// A key/value metadata entry attached to a bucket, table or column.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(deserialize_with = "crate::http::string_or_number")]
    pub id: String,
    pub key: String,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub value: String,
    /// Component or user that wrote the entry.
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub provider: String,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub timestamp: String,
}
