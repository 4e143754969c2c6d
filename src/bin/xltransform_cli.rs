//! CLI tool for xltransform - runs a transform request and outputs the JSON response
//!
//! Usage:
//!   xltransform_cli <request.json>                      # Response JSON to stdout
//!   xltransform_cli <request.json> -o out.json          # Response JSON to file
//!   xltransform_cli <request.json> --config opts.json   # Override request options
//!
//! Exits with status 2 when the request was rejected.
//!
//! No `log` backend is installed, so the library's pipeline and request
//! records are discarded here; embedders that want them install their own.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use xltransform::request::{transform, transform_with, TransformRequest};
use xltransform::Options;

const USAGE: &str = "Usage: xltransform_cli <request.json> [-o output.json] [--config options.json]";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path = None;
    let mut config_path = None;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let slot = match flag.as_str() {
            "-o" => &mut output_path,
            "--config" => &mut config_path,
            _ => {
                eprintln!("Unknown argument: {flag}\n{USAGE}");
                std::process::exit(1);
            }
        };
        match rest.next() {
            Some(value) => *slot = Some(value.clone()),
            None => {
                eprintln!("Missing value for {flag}\n{USAGE}");
                std::process::exit(1);
            }
        }
    }

    // Read request
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let request: TransformRequest = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing request: {}", e);
            std::process::exit(1);
        }
    };

    // Run
    let response = match config_path {
        Some(path) => match Options::from_file(Path::new(&path)) {
            Ok(options) => transform_with(&request, options),
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => transform(&request),
    };

    let json = match serde_json::to_string_pretty(&response) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }

    if !response.is_success() {
        eprintln!("{}", response.output);
        std::process::exit(2);
    }
}
