//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the attendance endpoints to disk.
//!
//! Usage: `openapi [OUTPUT]` (defaults to `openapi.json`).

use api_lib::web::rest::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("openapi.json"));

    let api_doc = ApiDoc::openapi();
    let path_count = api_doc.paths.paths.len();
    std::fs::write(&output, api_doc.to_pretty_json()?)?;

    println!(
        "Wrote {} path(s) of the attendance API to {}",
        path_count,
        output.display()
    );
    Ok(())
}
