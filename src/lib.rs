//! xltransform - declarative spreadsheet editing
//!
//! Applies an ordered list of edit operations to an in-memory workbook:
//! - Cell values and styles (font, fill, border, alignment, number format)
//! - Block copy of values and styles, within and across sheets
//! - Row/column insertion, deletion and hiding
//! - Merged regions, sheet copy/insert/delete
//!
//! # Usage (Rust)
//!
//! ```
//! use xltransform::{apply_operations, cell_ref::parse_range};
//! use xltransform::{OperationGroup, Processing, ProcessingType, Workbook};
//!
//! let mut workbook = Workbook::new();
//! workbook.create_sheet("Sheet1")?;
//! let set = Processing::new(ProcessingType::SetCells)
//!     .with_cells(parse_range("A1")?)
//!     .with_values(vec![vec!["hello".into()]]);
//! apply_operations(&mut workbook, &[OperationGroup::new("Sheet1", vec![set])])?;
//! assert_eq!(workbook.sheet("Sheet1")?.value(1, 1).as_str(), Some("hello"));
//! # Ok::<(), xltransform::error::XltransformError>(())
//! ```

// Document model
pub mod cell_ref;
pub mod merges;
pub mod structure;
pub mod styles;
pub mod types;

// Engine
pub mod editor;
pub mod error;
pub mod options;
pub mod pipeline;

// Transport
pub mod request;

use wasm_bindgen::prelude::*;

pub use editor::Editor;
pub use error::{Result, XltransformError};
pub use options::Options;
pub use pipeline::{apply_operations, Pipeline, PipelineReport, PipelineState};
pub use request::{TransformRequest, TransformResponse};
pub use types::*;

/// Run a JSON transform request and return the JSON response.
///
/// Failures are reported inside the response (`status: "Error"`), never
/// thrown.
#[must_use]
#[wasm_bindgen]
pub fn transform_excel(request_json: &str) -> String {
    console_error_panic_hook::set_once();
    request::transform_json(request_json)
}

/// Run a transform request given as a JS object and return the response
/// object.
///
/// # Errors
/// Returns an error if the request or response cannot be converted.
#[wasm_bindgen]
pub fn transform_js(request: JsValue) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let request: TransformRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid request: {e}")))?;
    let response = request::transform(&request);
    serde_wasm_bindgen::to_value(&response)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
