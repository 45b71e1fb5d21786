//! Desktop map editor entrypoint.

use std::process::ExitCode;

fn main() -> ExitCode {
    match geoedit::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", geoedit::failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
