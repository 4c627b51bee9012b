use std::process;

use clap::Parser;

use orz_cli::cli::Cli;
use orz_cli::output;

fn main() {
    let cli = Cli::parse();
    output::init_logging(cli.verbose);

    if let Err(err) = orz_cli::app::run(cli) {
        output::fail(&err);
        process::exit(err.exit_code());
    }
}
