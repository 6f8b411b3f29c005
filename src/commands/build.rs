use anyhow::Result;

use crate::config::Config;
use crate::error::Error;
use crate::judge::build::{BuildOutcome, run_build};
use crate::judge::emit_diagnostic_block;

pub fn execute(
    config: &Config,
    method_name: Option<&str>,
    input: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let methods = config.build_methods()?;
    let name = method_name.unwrap_or(&config.default_build_method);
    let method = methods
        .get(name)
        .ok_or_else(|| Error::UnknownBuildMethod(name.to_string()))?;

    let input_pattern = input.unwrap_or(&config.input_pattern);
    let output = output.unwrap_or(&config.solution_name);

    match run_build(method, input_pattern, output) {
        Ok(outcome) => {
            println!("OK");
            if let BuildOutcome::Compiled { stdout, stderr } = outcome {
                emit_diagnostic_block("<stdout>", &stdout);
                emit_diagnostic_block("<stderr>", &stderr);
            }
            Ok(())
        }
        Err(Error::BuildFailed { stderr }) => {
            emit_diagnostic_block("<stderr>", &stderr);
            Err(Error::BuildFailed { stderr }.into())
        }
        Err(other) => Err(other.into()),
    }
}
