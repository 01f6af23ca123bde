//! jenkins-views - generate Jenkins view configuration from YAML
//!
//! ## Commands
//!
//! - `jenkins-views test` - Generate view XML from definitions
//! - `jenkins-views columns` - List list-view column identifiers
//! - `jenkins-views completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the XML for every view in a file
//! jenkins-views test views.yaml
//!
//! # Write one file per view into out/
//! jenkins-views test -r definitions/ -o out/
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if std::env::var("JENKINS_VIEWS_VERBOSE").is_ok() {
                eprintln!("{:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}
