use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy of the core pipeline.
///
/// Configuration and lookup errors are always fatal and are reported once
/// at the top-level boundary in `main`. `BuildFailed` aborts the build
/// command; `ExecutionFailed` aborts the current test and the remaining
/// iteration, but the run command still exits zero after reporting it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no contest metadata found in '{0}' or any parent directory")]
    ContestNotFound(PathBuf),

    #[error("working directory '{0}' does not match any task of the contest")]
    TaskNotMatched(PathBuf),

    #[error("no task with token '{0}' in the contest")]
    UnknownTask(String),

    #[error("test '{0}' is not registered for the current task")]
    UnknownTestToken(String),

    #[error("build method '{0}' not found in config")]
    UnknownBuildMethod(String),

    #[error("run method '{0}' not found in config")]
    UnknownRunMethod(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("run method resolved to an empty command")]
    EmptyCommand,

    #[error("build input file '{0}' does not exist")]
    InputMissing(PathBuf),

    #[error("build command exited with failure")]
    BuildFailed { stderr: String },

    #[error("failed to run '{target}': {detail}")]
    ExecutionFailed { target: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
