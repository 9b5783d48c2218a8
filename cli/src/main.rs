use clap::Parser;
use weblate_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = cli.run() {
        eprintln!("weblate error: {:#}", err);
        std::process::exit(1);
    }
}
