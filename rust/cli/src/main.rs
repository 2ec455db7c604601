use std::io;

fn main() {
    pokergym_cli::logging::init_logging();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let code = pokergym_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
