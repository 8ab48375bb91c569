use clap::Parser;
use treasury_desk::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
