use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match esmini_ipcd::run_server() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io::stderr(), "esmini-ipcd: {error}");
            ExitCode::FAILURE
        }
    }
}
