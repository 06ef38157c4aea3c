use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Response;
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub mod buckets;
pub mod error;
pub mod files;
pub mod jobs;
pub mod s3_client;
pub mod storage_bucket_client;
pub mod storage_client;
pub mod storage_file_client;
pub mod storage_job_client;
pub mod storage_table_client;
pub mod tables;
pub mod types;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error returned from the Storage API.
    #[error(transparent)]
    Response(#[from] error::ErrorResponse),

    /// An error from the underlying HTTP client.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// An error from one of the middleware used.
    #[error(transparent)]
    HttpMiddleware(anyhow::Error),

    /// An error from a token source.
    #[error("token source failed: {0}")]
    TokenSource(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A failed S3 request made with a file's temporary credentials.
    #[error("s3 request failed: {message}")]
    S3 { status: Option<u16>, message: String },

    /// The asynchronous job finished with status `error`.
    #[error("job {id} failed: {message}")]
    JobFailed { id: String, message: String },

    /// The job was still running after the configured number of polls.
    #[error("job {0} did not finish in time")]
    JobTimeout(String),

    /// The response was successful but lacked something the operation needs.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// The HTTP status of a failed request, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response(e) => Some(e.http_status),
            Error::HttpClient(e) => e.status().map(|s| s.as_u16()),
            Error::S3 { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(err) => Error::HttpMiddleware(err),
            reqwest_middleware::Error::Reqwest(err) => Error::HttpClient(err),
        }
    }
}

/// Checks whether an HTTP response is successful and returns it, or returns an error.
pub(crate) async fn check_response_status(response: Response) -> Result<Response, Error> {
    // Check the status code, returning the response if it is not an error.
    let error = match response.error_for_status_ref() {
        Ok(_) => return Ok(response),
        Err(error) => error,
    };
    let status = response.status().as_u16();

    // try to extract a response error, falling back to the status error if it can not be parsed.
    Err(response
        .json::<error::ErrorResponse>()
        .await
        .map(|mut body| {
            body.http_status = status;
            Error::Response(body)
        })
        .unwrap_or(Error::HttpClient(error)))
}

pub(crate) trait Escape {
    fn escape(&self) -> String;
}

impl Escape for str {
    fn escape(&self) -> String {
        utf8_percent_encode(self, ENCODE_SET).to_string()
    }
}

impl Escape for String {
    fn escape(&self) -> String {
        self.as_str().escape()
    }
}

const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

/// Ids are numbers in most responses and strings in a few.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(num) => Ok(num.to_string()),
        _ => Err(de::Error::custom("Incorrect type")),
    }
}

pub(crate) fn from_str_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s: Result<Value, _> = Deserialize::deserialize(deserializer);
    match s {
        Ok(Value::String(s)) => T::from_str(&s).map_err(de::Error::custom).map(Some),
        Ok(Value::Number(num)) => T::from_str(&num.to_string()).map_err(de::Error::custom).map(Some),
        Ok(Value::Null) => Ok(None),
        Ok(_) => Err(de::Error::custom("Incorrect type")),
        Err(_) => Ok(None),
    }
}

/// The service encodes an empty map as `[]`.
pub(crate) fn map_or_empty_seq<'de, T, D>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    T: serde::de::DeserializeOwned,
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| serde_json::from_value(v).map(|v| (k, v)).map_err(de::Error::custom))
            .collect(),
        Value::Array(items) if items.is_empty() => Ok(HashMap::new()),
        Value::Null => Ok(HashMap::new()),
        _ => Err(de::Error::custom("Incorrect type")),
    }
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lists such as `primaryKey` and `columns` travel as one comma separated string.
pub(crate) fn comma_joined<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&values.join(","))
}

pub(crate) fn bool_as_int<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
