//! Prints a generated example ledger as JSON.
//!
//! Usage: `example-data-preview [--registry <path>] [seed-name]`. Without a
//! registry path the bundled registry is used; without a seed name the first
//! seed in the registry is previewed.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use example_data::{SeedRegistry, generate_ledger};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{message}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut registry_path: Option<PathBuf> = None;
    let mut seed_name: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--registry" => {
                let path = args.next().ok_or("--registry requires a path")?;
                registry_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                let usage = "Usage: example-data-preview [--registry <path>] [seed-name]\n";
                return io::stdout()
                    .lock()
                    .write_all(usage.as_bytes())
                    .map_err(|err| err.to_string());
            }
            other => seed_name = Some(other.to_owned()),
        }
    }

    let registry = match registry_path {
        Some(path) => SeedRegistry::from_file(&path),
        None => SeedRegistry::bundled(),
    }
    .map_err(|err| err.to_string())?;

    let seed = match seed_name {
        Some(name) => registry.find_seed(&name).map_err(|err| err.to_string())?,
        None => registry
            .seeds()
            .first()
            .ok_or("registry contains no seeds")?,
    };

    let ledger = generate_ledger(seed).map_err(|err| err.to_string())?;
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &ledger).map_err(|err| err.to_string())?;
    writeln!(out).map_err(|err| err.to_string())
}
