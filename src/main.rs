//! Release packager for the launcher.
//!
//! This binary builds the launcher for every configured platform target,
//! normalizes the build output, and produces one distributable archive per
//! target, with proper error handling and a run summary.

mod cli;
mod config;
mod error;
mod packager;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
