mod application;
mod presentation {
    pub mod cli;
}

use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    match application::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
