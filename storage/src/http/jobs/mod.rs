use serde_json::Value;

pub mod get;
pub mod list;

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Waiting,
    Processing,
    Success,
    Error,
}

impl JobStatus {
    /// Returns `true` once the job will not change anymore.
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Error)
    }
}

/// An asynchronous operation started by the Storage API.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(deserialize_with = "crate::http::string_or_number")]
    pub id: String,
    pub status: JobStatus,
    #[serde(default, deserialize_with = "crate::http::null_as_default")]
    pub url: String,
    /// E.g. `tableCreate`, `tableImport`, `tableExport`.
    pub operation_name: Option<String>,
    pub operation_params: Option<Value>,
    pub table_id: Option<String>,
    pub run_id: Option<String>,
    pub created_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Operation specific output; only meaningful once the job succeeded.
    pub results: Option<Value>,
    pub error: Option<JobError>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobError {
    pub code: Option<String>,
    pub message: String,
    pub exception_id: Option<String>,
}

impl Job {
    /// `results.id`, the id of a created table.
    pub fn result_id(&self) -> Option<String> {
        id_value(self.results.as_ref()?.get("id")?)
    }

    /// `results.file.id`, the id of an exported file.
    pub fn result_file_id(&self) -> Option<String> {
        id_value(self.results.as_ref()?.get("file")?.get("id")?)
    }

    pub(crate) fn error_message(&self) -> String {
        match &self.error {
            Some(e) => e.message.clone(),
            None => "unknown error".to_string(),
        }
    }
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crate::http::jobs::{Job, JobStatus};

    #[test]
    fn parse_finished_jobs() {
        let create: Job = serde_json::from_str(
            r#"{"id": 2451150, "status": "success", "operationName": "tableCreate",
                "results": {"id": "in.c-py-test-tables.some-table"}, "error": null}"#,
        )
        .unwrap();
        assert_eq!(create.id, "2451150");
        assert!(create.status.is_finished());
        assert_eq!(create.result_id().as_deref(), Some("in.c-py-test-tables.some-table"));

        let export: Job = serde_json::from_str(
            r#"{"id": "2451151", "status": "success", "results": {"file": {"id": 236672234}}}"#,
        )
        .unwrap();
        assert_eq!(export.result_file_id().as_deref(), Some("236672234"));

        let failed: Job = serde_json::from_str(
            r#"{"id": 3, "status": "error", "results": null,
                "error": {"code": "storage.tables.validation", "message": "Invalid primary key", "exceptionId": "x"}}"#,
        )
        .unwrap();
        assert_eq!(failed.status, JobStatus::Error);
        assert_eq!(failed.error_message(), "Invalid primary key");
        assert!(failed.result_id().is_none());
    }
}
