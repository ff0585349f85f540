use std::process::ExitCode;

use jwtgen::{Args, Config, EmbeddedKey};

fn main() -> ExitCode {
    let _ = jwtgen::logging::init();

    let config = Config::from(Args::parse_normalized());
    let mut stdout = std::io::stdout().lock();

    match jwtgen::run(&config, EmbeddedKey, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
