use std::io::{self, Write};
use std::path::Path;

use anyhow::{Result, bail};

use crate::config::Config;
use crate::contest::{Contest, Task};
use crate::error::Error;
use crate::judge::run::{execute_file_test, execute_interactive, resolve_run_command};
use crate::judge::{Verdict, compare};

/// Result of one test iteration, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub token: String,
    pub verdict: Verdict,
}

pub fn execute(
    config: &Config,
    method_name: Option<&str>,
    solution: Option<&str>,
    interactive: bool,
    tokens: &[String],
) -> Result<()> {
    if interactive && !tokens.is_empty() {
        bail!("interactive mode cannot be combined with explicit test tokens");
    }

    let methods = config.run_methods();
    let name = method_name.unwrap_or(&config.default_run_method);
    let method = methods
        .get(name)
        .ok_or_else(|| Error::UnknownRunMethod(name.to_string()))?;
    let solution = solution.unwrap_or(&config.solution_name);
    let argv = resolve_run_command(method, solution)?;

    if interactive {
        let run = execute_interactive(&argv)?;
        println!("done -- {}ms", run.millis());
        return Ok(());
    }

    let contest = Contest::locate()?;
    let task_token = contest.current_task_token()?;
    let task = contest
        .tasks
        .get(&task_token)
        .ok_or_else(|| Error::UnknownTask(task_token.clone()))?;

    run_tests(&argv, &contest.task_dir(&task_token), task, tokens)?;
    Ok(())
}

/// The fail-fast test loop: runs the selected tokens in order, printing
/// a verdict line per test, and stops at the first `Differs` or
/// execution failure. Both are reported outcomes; only lookup and I/O
/// problems bubble up as errors.
pub fn run_tests(
    argv: &[String],
    task_dir: &Path,
    task: &Task,
    requested: &[String],
) -> Result<Vec<TestReport>> {
    if task.test_tokens.is_empty() && requested.is_empty() {
        println!("No tests.");
        return Ok(Vec::new());
    }

    // every requested token must exist before anything runs
    for token in requested {
        if !task.has_test(token) {
            return Err(Error::UnknownTestToken(token.clone()).into());
        }
    }

    let selection: &[String] = if requested.is_empty() {
        &task.test_tokens
    } else {
        requested
    };

    let mut reports = Vec::new();
    for token in selection {
        print!("[{token}] ... ");
        io::stdout().flush()?;

        let input_path = task_dir.join(format!("{token}.in"));
        let expected_path = task_dir.join(format!("{token}.out"));
        let result_path = task_dir.join(format!("{token}.result"));

        let run = match execute_file_test(argv, token, &input_path, &result_path) {
            Ok(run) => run,
            Err(Error::ExecutionFailed { detail, .. }) => {
                println!("{} -- {detail}", Verdict::Failed);
                reports.push(TestReport {
                    token: token.clone(),
                    verdict: Verdict::Failed,
                });
                break;
            }
            Err(other) => return Err(other.into()),
        };

        let verdict = if compare::differs(&expected_path, &result_path)? {
            Verdict::Differs
        } else {
            Verdict::Ok
        };
        println!("{verdict} -- {}ms", run.millis());
        reports.push(TestReport {
            token: token.clone(),
            verdict,
        });
        if verdict == Verdict::Differs {
            break;
        }
    }
    Ok(reports)
}
