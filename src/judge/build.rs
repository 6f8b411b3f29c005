use std::path::PathBuf;
use std::process::Command;

use crate::config::{BuildMethod, Language};
use crate::error::{Error, Result};

use super::render_command;

/// Outcome of a successful build invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The method has an empty command template: nothing to compile.
    NoBuildStep,
    /// The compiler ran and exited zero; captured streams are kept for
    /// diagnostic visibility even on success.
    Compiled { stdout: String, stderr: String },
}

/// Resolves the build input file from the configured pattern. A trailing
/// `.*` takes the extension of the method's language.
pub fn resolve_input(pattern: &str, language: &Language) -> Result<PathBuf> {
    let name = match pattern.strip_suffix(".*") {
        Some(stem) => format!("{stem}.{}", language.extension),
        None => pattern.to_string(),
    };
    let path = PathBuf::from(name);
    if !path.exists() {
        return Err(Error::InputMissing(path));
    }
    Ok(path)
}

/// Builds the solution with the given method: resolves the input file,
/// renders the command template and runs the compiler synchronously with
/// both streams captured.
pub fn run_build(method: &BuildMethod, input_pattern: &str, output: &str) -> Result<BuildOutcome> {
    let input = resolve_input(input_pattern, &method.language)?;
    let input = input.to_string_lossy().into_owned();
    if input == output {
        return Err(Error::InvalidConfig(format!(
            "build input and output are the same file '{input}'"
        )));
    }

    let argv = render_command(&method.command, &[("$INPUT", &input), ("$OUTPUT", output)]);
    if argv.is_empty() {
        return Ok(BuildOutcome::NoBuildStep);
    }

    let captured = Command::new(&argv[0])
        .args(&argv[1..])
        .output()
        .map_err(|e| Error::BuildFailed {
            stderr: format!("failed to launch '{}': {e}", argv[0]),
        })?;

    let stdout = String::from_utf8_lossy(&captured.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();
    if !captured.status.success() {
        return Err(Error::BuildFailed { stderr });
    }
    Ok(BuildOutcome::Compiled { stdout, stderr })
}
