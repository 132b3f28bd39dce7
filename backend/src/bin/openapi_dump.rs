//! Print the OpenAPI document as JSON.

use std::io::{self, Write};
use std::process::ExitCode;

use bitslow::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let document = match ApiDoc::openapi().to_pretty_json() {
        Ok(document) => document,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "openapi serialisation failed: {err}") {
                drop(write_err);
            }
            return ExitCode::FAILURE;
        }
    };
    match writeln!(io::stdout().lock(), "{document}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
