use std::process::ExitCode;

fn main() -> ExitCode {
    match switchboardd::run_backend() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("switchboardd: {error}");
            ExitCode::FAILURE
        }
    }
}
