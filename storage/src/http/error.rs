use std::error::Error;
use std::fmt;

/// An error response returned from the Storage API.
///
/// The body looks like
/// `{"error": "The table \"x\" was not found.", "code": "storage.tables.notFound", "status": "error", "exceptionId": "..."}`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// The HTTP status of the response, e.g. `404`. Not part of the body.
    #[serde(skip)]
    pub http_status: u16,

    /// Human readable description of the error.
    pub error: String,

    /// Machine readable error code, e.g. `storage.buckets.notFound`.
    pub code: Option<String>,

    /// Identifier of the failure on the server side, useful for support requests.
    pub exception_id: Option<String>,
}

impl ErrorResponse {
    /// Returns `true` for statuses that are worth retrying.
    pub fn is_retriable(&self) -> bool {
        matches!(self.http_status, 408 | 429 | 500..=599)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({}, status {})", self.error, code, self.http_status),
            None => write!(f, "{} (status {})", self.error, self.http_status),
        }
    }
}

impl Error for ErrorResponse {}

#[cfg(test)]
mod test {
    use crate::http::error::ErrorResponse;

    #[test]
    fn parse_error_body() {
        let body = r#"{"error":"The table \"x\" was not found in the bucket \"in.c-main\"","code":"storage.tables.notFound","status":"error","exceptionId":"exception-8a0e"}"#;
        let mut err: ErrorResponse = serde_json::from_str(body).unwrap();
        err.http_status = 404;
        assert_eq!(err.code.as_deref(), Some("storage.tables.notFound"));
        assert_eq!(err.exception_id.as_deref(), Some("exception-8a0e"));
        assert!(!err.is_retriable());
        assert!(err.to_string().contains("status 404"));

        err.http_status = 503;
        assert!(err.is_retriable());
    }
}
