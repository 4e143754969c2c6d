//! Structured error types for xltransform.
//!
//! Every engine error is deterministic: it stems from malformed input and
//! retrying the same request yields the same failure.

/// All errors that can occur while applying operations to a workbook.
#[derive(Debug, thiserror::Error)]
pub enum XltransformError {
    /// A cell address or range that does not resolve to valid indices.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The named sheet does not exist.
    #[error("Sheet {0} does not exist")]
    SheetNotFound(String),

    /// A sheet with this name already exists.
    #[error("Sheet {0} already exists")]
    SheetAlreadyExists(String),

    /// The operation needs a `target` (or `target.cells`) it was not given.
    #[error("Target is required for {0} operation")]
    MissingTarget(&'static str),

    /// The operation needs a `paste_target` it was not given.
    #[error("paste_target is required for {0} operation")]
    MissingPasteTarget(&'static str),

    /// Unknown `processing_type`.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A merged region overlaps one that is already registered.
    #[error("Merged region {0} overlaps existing merged region {1}")]
    MergeConflict(String, String),

    /// JSON (de)serialization of the request or the document.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding of the document payload.
    #[error("Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XltransformError>;

impl XltransformError {
    /// Stable kind name, used in logs and by callers that map errors to codes.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "InvalidAddress",
            Self::SheetNotFound(_) => "SheetNotFound",
            Self::SheetAlreadyExists(_) => "SheetAlreadyExists",
            Self::MissingTarget(_) => "MissingTarget",
            Self::MissingPasteTarget(_) => "MissingPasteTarget",
            Self::UnsupportedOperation(_) => "UnsupportedOperation",
            Self::MergeConflict(..) => "MergeConflict",
            Self::Json(_) => "Json",
            Self::Base64(_) => "Base64",
            Self::Io(_) => "Io",
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XltransformError> for wasm_bindgen::JsValue {
    fn from(e: XltransformError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
