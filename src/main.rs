//! Knitchart - command-line editor for layered knitting charts

use std::process::ExitCode;

use knitchart::cli;

fn main() -> ExitCode {
    cli::run()
}
