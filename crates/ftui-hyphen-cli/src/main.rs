#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = ftui_hyphen_cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
