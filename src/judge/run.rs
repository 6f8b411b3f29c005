use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::config::RunMethod;
use crate::error::{Error, Result};

use super::{emit_diagnostic_block, render_command};

/// A single completed solution invocation.
#[derive(Debug)]
pub struct TestRun {
    pub elapsed: Duration,
}

impl TestRun {
    pub fn millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Renders the run-method template into an argument vector. Run methods
/// know only `$OUTPUT`; test input reaches the solution through the
/// executor, never the command line. An empty command is an
/// unrecoverable misconfiguration, unlike an empty build template.
pub fn resolve_run_command(method: &RunMethod, solution: &str) -> Result<Vec<String>> {
    let argv = render_command(&method.command, &[("$OUTPUT", solution)]);
    if argv.is_empty() {
        return Err(Error::EmptyCommand);
    }
    Ok(argv)
}

/// Executes the solution once in file mode: stdin bound to the `.in`
/// file, stdout bound to a freshly truncated `.result` file.
pub fn execute_file_test(
    argv: &[String],
    test_token: &str,
    input_path: &Path,
    result_path: &Path,
) -> Result<TestRun> {
    let input = fs::File::open(input_path)?;
    let result = fs::File::create(result_path)?;

    let mut command = Command::new(&argv[0]);
    command
        .args(&argv[1..])
        .stdin(Stdio::from(input))
        .stdout(Stdio::from(result))
        .stderr(Stdio::piped());
    run_child(command, test_token)
}

/// Executes the solution once with stdin and stdout attached to the
/// terminal, for manual exploration. No result file is produced.
pub fn execute_interactive(argv: &[String]) -> Result<TestRun> {
    let mut command = Command::new(&argv[0]);
    command
        .args(&argv[1..])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());
    run_child(command, "interactive session")
}

/// Runs the prepared child and times the invocation alone; the caller
/// opens any redirected files beforehand. Captured stderr is shown as a
/// diagnostic block whether or not the child succeeded.
fn run_child(mut command: Command, target: &str) -> Result<TestRun> {
    let start = Instant::now();
    let child = command.spawn().map_err(|e| Error::ExecutionFailed {
        target: target.to_string(),
        detail: format!("failed to launch solution: {e}"),
    })?;
    let output = child.wait_with_output().map_err(|e| Error::ExecutionFailed {
        target: target.to_string(),
        detail: format!("failed to wait for solution: {e}"),
    })?;
    let elapsed = start.elapsed();

    emit_diagnostic_block("<stderr>", &String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(Error::ExecutionFailed {
            target: target.to_string(),
            detail: format!("solution exited with {}", output.status),
        });
    }
    Ok(TestRun { elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn method(command: &str) -> RunMethod {
        RunMethod {
            command: command.to_string(),
        }
    }

    #[test]
    fn solution_name_substitutes_into_the_command() {
        let argv = resolve_run_command(&method("./$OUTPUT"), "main").unwrap();
        assert_eq!(argv, vec!["./main"]);

        let argv = resolve_run_command(&method("python3 $OUTPUT"), "main.py").unwrap();
        assert_eq!(argv, vec!["python3", "main.py"]);
    }

    #[test]
    fn empty_run_command_is_rejected() {
        let err = resolve_run_command(&method(""), "main").unwrap_err();
        assert!(matches!(err, Error::EmptyCommand));
    }

    #[test]
    fn file_mode_pipes_input_to_result() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("sample1.in");
        let result_path = dir.path().join("sample1.result");
        fs::write(&input_path, "2 2\n").unwrap();

        let argv = vec!["cat".to_string()];
        execute_file_test(&argv, "sample1", &input_path, &result_path).unwrap();
        assert_eq!(fs::read_to_string(&result_path).unwrap(), "2 2\n");
    }

    #[test]
    fn result_file_is_truncated_on_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("sample1.in");
        let result_path = dir.path().join("sample1.result");
        fs::write(&input_path, "4\n").unwrap();
        fs::write(&result_path, "stale output from an earlier run\n").unwrap();

        let argv = vec!["cat".to_string()];
        execute_file_test(&argv, "sample1", &input_path, &result_path).unwrap();
        assert_eq!(fs::read_to_string(&result_path).unwrap(), "4\n");
    }

    #[test]
    fn nonzero_exit_is_an_execution_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("sample1.in");
        let result_path = dir.path().join("sample1.result");
        fs::write(&input_path, "").unwrap();

        let argv = vec!["false".to_string()];
        let err = execute_file_test(&argv, "sample1", &input_path, &result_path).unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
    }

    #[test]
    fn unlaunchable_command_is_an_execution_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("sample1.in");
        let result_path = dir.path().join("sample1.result");
        fs::write(&input_path, "").unwrap();

        let argv = vec!["./no-such-solution-binary".to_string()];
        let err = execute_file_test(&argv, "sample1", &input_path, &result_path).unwrap_err();
        match err {
            Error::ExecutionFailed { target, .. } => assert_eq!(target, "sample1"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
