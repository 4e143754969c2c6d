//! Transport envelope.
//!
//! A request carries a base64 document plus operation groups; the response
//! carries the re-encoded document or a `Bad Request` message. The document
//! travels as the JSON serialization of [`Workbook`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::options::Options;
use crate::pipeline::Pipeline;
use crate::types::{OperationGroup, Workbook};

/// Default content label, echoed from the request into the response. It names
/// the document the service stands in for; `file` and `output` always hold
/// base64 of the [`Workbook`] JSON form regardless of the label.
pub const XLSX_MIMETYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_ERROR: &str = "Error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Base64-encoded document.
    pub file: String,
    #[serde(default = "default_mimetype")]
    pub mimetype: String,
    pub operations: Vec<OperationGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResponse {
    /// Base64 document on success, `Bad Request: <message>` on failure.
    pub output: String,
    /// The request's label on success, [`XLSX_MIMETYPE`] on failure.
    #[serde(default = "default_mimetype")]
    pub mimetype: String,
    pub status: String,
    pub error_code: u16,
    pub status_code: u16,
}

fn default_mimetype() -> String {
    XLSX_MIMETYPE.to_string()
}

impl TransformResponse {
    fn success(output: String, mimetype: String) -> Self {
        Self {
            output,
            mimetype,
            status: STATUS_SUCCESS.to_string(),
            error_code: 200,
            status_code: 200,
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            output: format!("Bad Request: {message}"),
            mimetype: default_mimetype(),
            status: STATUS_ERROR.to_string(),
            error_code: 400,
            status_code: 400,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl TransformRequest {
    /// Build a request around an in-memory workbook.
    pub fn new(workbook: &Workbook, operations: Vec<OperationGroup>) -> Result<Self> {
        Ok(Self {
            file: encode_workbook(workbook)?,
            mimetype: default_mimetype(),
            operations,
            options: None,
        })
    }
}

/// Decode a base64 document handle.
pub fn decode_workbook(file: &str) -> Result<Workbook> {
    let bytes = BASE64.decode(file.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Encode a document handle as base64.
pub fn encode_workbook(workbook: &Workbook) -> Result<String> {
    let bytes = serde_json::to_vec(workbook)?;
    Ok(BASE64.encode(bytes))
}

/// Run a request with its own options.
#[must_use]
pub fn transform(request: &TransformRequest) -> TransformResponse {
    transform_with(request, request.options.clone().unwrap_or_default())
}

/// Run a request with explicit options, ignoring any it carries.
#[must_use]
pub fn transform_with(request: &TransformRequest, options: Options) -> TransformResponse {
    match run(request, options) {
        Ok(output) => TransformResponse::success(output, request.mimetype.clone()),
        Err(err) => {
            warn!("transform rejected ({}): {err}", err.kind());
            TransformResponse::bad_request(&err.to_string())
        }
    }
}

fn run(request: &TransformRequest, options: Options) -> Result<String> {
    let mut workbook = decode_workbook(&request.file)?;
    let report = Pipeline::new(&mut workbook, options).run(&request.operations)?;
    info!(
        "applied {} operations, touched sheets: {:?}",
        report.applied, report.dirty_sheets
    );
    encode_workbook(&workbook)
}

/// JSON in, JSON out. A request that fails to parse yields a `Bad Request`
/// response rather than an error.
#[must_use]
pub fn transform_json(json: &str) -> String {
    let response = match serde_json::from_str::<TransformRequest>(json) {
        Ok(request) => transform(&request),
        Err(err) => {
            warn!("malformed request: {err}");
            TransformResponse::bad_request(&err.to_string())
        }
    };
    response_to_json(&response)
}

pub(crate) fn response_to_json(response: &TransformResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"output":"Bad Request: {}","status":"Error","error_code":400,"status_code":400}}"#,
            e.to_string().replace('"', "'")
        )
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    #[test]
    fn test_bad_base64() {
        let request = TransformRequest {
            file: "%%%".into(),
            mimetype: default_mimetype(),
            operations: Vec::new(),
            options: None,
        };
        let response = transform(&request);
        assert!(!response.is_success());
        assert_eq!(response.status_code, 400);
        assert!(response.output.starts_with("Bad Request: "));
    }

    #[test]
    fn test_empty_operations_roundtrip_document() {
        let wb = workbook();
        let response = transform(&TransformRequest::new(&wb, Vec::new()).unwrap());
        assert!(response.is_success());
        assert_eq!(response.error_code, 200);
        assert_eq!(response.mimetype, XLSX_MIMETYPE);
        assert_eq!(decode_workbook(&response.output).unwrap(), wb);
    }

    #[test]
    fn test_malformed_json() {
        let out = transform_json("{not json");
        let response: TransformResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.status, STATUS_ERROR);
    }

    #[test]
    fn test_mimetype_defaults() {
        let file = encode_workbook(&workbook()).unwrap();
        let json = format!(r#"{{"file":"{file}","operations":[]}}"#);
        let request: TransformRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.mimetype, XLSX_MIMETYPE);
        assert!(request.options.is_none());
    }
}
