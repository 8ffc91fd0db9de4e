//! hvtools_bundler - packages the MacHyperVSupport daemons into a zipped
//! multi-package installer.
//!
//! Meant to run as an Xcode build phase; exits non-zero on any failure.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match hvtools_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = hvtools_bundler::cli::OutputManager::new(false, false);
            if output.error(&e.to_string()).is_err() {
                eprintln!("Error: {}", e);
            }
            -1
        }
    };

    process::exit(exit_code);
}
