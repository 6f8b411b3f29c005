use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "coach",
    version,
    about = "Contestant helper",
    long_about = "coach is a CLI tool that helps contestants of programming contests\n\
                  to write, build and test code of solutions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a directory with the metadata of a contest
    Init {
        /// Contest page URL
        url: String,
        /// Target directory, created if missing (defaults to the current directory)
        directory: Option<PathBuf>,
    },

    /// Copy a code template into the current directory
    Create {
        /// Template name (defaults to the configured default)
        template: Option<String>,
        /// Destination filename
        #[arg(short, long, default_value = "main")]
        filename: String,
    },

    /// Fetch sample tests for task(s)
    Fetch {
        /// Fetch tests for all tasks of the contest
        #[arg(short, long)]
        all: bool,
    },

    /// Add an existing test case to the current task
    Addtest {
        /// Test token whose .in/.out files are already in place
        token: String,
    },

    /// Remove a test case from the current task
    Rmtest {
        /// Test token to remove
        token: String,
    },

    /// Show info about the working tree
    Info,

    /// Build the solution using a configured build method
    Build {
        /// Build method name (defaults to the configured default)
        method: Option<String>,
        /// Build input file pattern
        #[arg(short, long)]
        input: Option<String>,
        /// Build output artifact name (defaults to the configured solution name)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run the built solution on test cases
    Run {
        /// Run method name (defaults to the configured default)
        #[arg(short, long)]
        method: Option<String>,
        /// Solution artifact to execute (defaults to the configured solution name)
        #[arg(short, long)]
        solution: Option<String>,
        /// Attach the solution to the terminal instead of test files
        #[arg(short, long)]
        interactive: bool,
        /// Test tokens to run, in the given order; all registered tests when empty
        tokens: Vec<String>,
    },
}
