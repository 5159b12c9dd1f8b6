#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = algoviz_cli::run_from_env() {
        tracing::error!(%error, exit_code = error.exit_code(), "algoviz failed");
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}
