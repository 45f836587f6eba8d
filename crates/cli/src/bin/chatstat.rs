//! chatstat binary entrypoint.

fn main() {
    if let Err(err) = chatstat_cli::app::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
