//! Map editor binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match geoedit_gui::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", geoedit_gui::failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
