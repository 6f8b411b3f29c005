pub mod addtest;
pub mod build;
pub mod create;
pub mod fetch;
pub mod info;
pub mod init;
pub mod rmtest;
pub mod run;

use anyhow::Result;

use crate::cli::Command;
use crate::config::Config;

/// Dispatches a parsed subcommand. The configuration is bootstrapped on
/// every invocation; method tables are derived from it fresh and never
/// cached across runs.
pub fn dispatch(command: Command) -> Result<()> {
    let config = Config::load_or_create()?;
    match command {
        Command::Init { url, directory } => init::execute(&url, directory.as_deref()),
        Command::Create { template, filename } => {
            create::execute(&config, template.as_deref(), &filename)
        }
        Command::Fetch { all } => fetch::execute(all),
        Command::Addtest { token } => addtest::execute(&token),
        Command::Rmtest { token } => rmtest::execute(&token),
        Command::Info => info::execute(),
        Command::Build {
            method,
            input,
            output,
        } => build::execute(&config, method.as_deref(), input.as_deref(), output.as_deref()),
        Command::Run {
            method,
            solution,
            interactive,
            tokens,
        } => run::execute(&config, method.as_deref(), solution.as_deref(), interactive, &tokens),
    }
}
