//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use shawarmap_cli::CliError;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    match shawarmap_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("shawarmap: {err}");
            std::process::exit(1);
        }
    }
}
