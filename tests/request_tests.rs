//! Tests for the transport envelope: request parsing, document encoding and
//! response shape.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{assert_text, test_data_workbook};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use xltransform::request::{
    decode_workbook, encode_workbook, transform, transform_json, transform_with,
    TransformRequest, TransformResponse, XLSX_MIMETYPE,
};
use xltransform::Options;

fn request_json(operations: Value) -> String {
    let file = encode_workbook(&test_data_workbook()).unwrap();
    json!({
        "file": file,
        "mimetype": XLSX_MIMETYPE,
        "operations": operations
    })
    .to_string()
}

fn parse_response(json: &str) -> TransformResponse {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_success_envelope() {
    let json = request_json(json!([{
        "sheet_name": "Sheet1",
        "processing": [{
            "processing_type": "copy",
            "target": { "cells": {
                "start_cell": { "col_letter": "A", "row": 1 },
                "end_cell": { "col_letter": "B", "row": 1 }
            } },
            "paste_target": {
                "sheet_name": "Sheet1",
                "cells": { "start_cell": { "col_letter": "C", "row": 1 } },
                "is_insert": false
            }
        }]
    }]));
    let response = parse_response(&transform_json(&json));

    assert_eq!(response.status, "Success");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.error_code, 200);
    assert_eq!(response.mimetype, XLSX_MIMETYPE);

    let wb = decode_workbook(&response.output).unwrap();
    assert_text(&wb, "Sheet1", "C1", "Test");
    assert_text(&wb, "Sheet1", "D1", "Data");
}

#[test]
fn test_engine_error_becomes_bad_request() {
    let json = request_json(json!([{
        "sheet_name": "Sheet1",
        "processing": [{ "processing_type": "frobnicate" }]
    }]));
    let response = parse_response(&transform_json(&json));

    assert_eq!(
        response,
        TransformResponse {
            output: "Bad Request: Unsupported operation: frobnicate".into(),
            mimetype: XLSX_MIMETYPE.into(),
            status: "Error".into(),
            error_code: 400,
            status_code: 400,
        }
    );
}

#[test]
fn test_missing_sheet_message() {
    let json = request_json(json!([{
        "sheet_name": "Nope",
        "processing": [{ "processing_type": "delete_sheet" }]
    }]));
    let response = parse_response(&transform_json(&json));
    assert_eq!(response.output, "Bad Request: Sheet Nope does not exist");
}

#[test]
fn test_undecodable_document() {
    let json = json!({ "file": "not base64!", "operations": [] }).to_string();
    let response = parse_response(&transform_json(&json));
    assert_eq!(response.status_code, 400);
    assert!(response.output.starts_with("Bad Request: Base64"));
}

#[test]
fn test_request_missing_operations() {
    let file = encode_workbook(&test_data_workbook()).unwrap();
    let json = json!({ "file": file }).to_string();
    let response = parse_response(&transform_json(&json));
    assert_eq!(response.status, "Error");
}

#[test]
fn test_request_options_are_honored() {
    let wb = test_data_workbook();
    let mut request: TransformRequest = serde_json::from_value(json!({
        "file": encode_workbook(&wb).unwrap(),
        "operations": [{
            "sheet_name": "Sheet1",
            "processing": [{ "processing_type": "copy_sheet" }]
        }],
        "options": { "sheet_copy_suffix": "-bak" }
    }))
    .unwrap();

    let response = transform(&request);
    let out = decode_workbook(&response.output).unwrap();
    assert_eq!(out.sheet_names(), vec!["Sheet1", "Sheet1-bak"]);

    // Explicit options win over the request's own.
    request.options = None;
    let response = transform_with(&request, Options::default());
    let out = decode_workbook(&response.output).unwrap();
    assert_eq!(out.sheet_names(), vec!["Sheet1", "Sheet1_copy"]);
}

#[test]
fn test_mimetype_is_echoed_label() {
    let mut request = TransformRequest::new(&test_data_workbook(), Vec::new()).unwrap();
    request.mimetype = "application/json".into();
    let response = transform(&request);

    assert_eq!(response.mimetype, "application/json");
    // The payload is the JSON workbook whatever the label says.
    assert_eq!(decode_workbook(&response.output).unwrap(), test_data_workbook());
}

#[test]
fn test_document_encoding_roundtrip() {
    let wb = test_data_workbook();
    let encoded = encode_workbook(&wb).unwrap();
    assert_eq!(decode_workbook(&encoded).unwrap(), wb);
}

#[test]
fn test_document_wire_shape() {
    let wb = test_data_workbook();
    let value = serde_json::to_value(&wb).unwrap();
    assert_eq!(value["sheets"][0]["name"], "Sheet1");
    assert_eq!(
        value["sheets"][0]["cells"],
        json!([
            { "r": 1, "c": 1, "value": "Test" },
            { "r": 1, "c": 2, "value": "Data" }
        ])
    );
}
