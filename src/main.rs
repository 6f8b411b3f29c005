use clap::Parser;

use coach::cli::Cli;
use coach::commands;

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    if let Err(err) = commands::dispatch(cli.command) {
        // single-line diagnostic; the {:#} format keeps the context chain inline
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
