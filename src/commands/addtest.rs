use anyhow::{Result, bail};

use crate::contest::Contest;
use crate::error::Error;

/// Registers a hand-written test case whose `.in`/`.out` files are
/// already in the task directory.
pub fn execute(token: &str) -> Result<()> {
    let mut contest = Contest::locate()?;
    let task_token = contest.current_task_token()?;
    let task_dir = contest.task_dir(&task_token);

    let task = contest
        .tasks
        .get_mut(&task_token)
        .ok_or_else(|| Error::UnknownTask(task_token.clone()))?;
    if task.has_test(token) {
        bail!("test '{token}' already added");
    }

    let input_path = task_dir.join(format!("{token}.in"));
    let output_path = task_dir.join(format!("{token}.out"));
    if !input_path.is_file() {
        bail!("input file should exist at {}", input_path.display());
    }
    if !output_path.is_file() {
        bail!("output file should exist at {}", output_path.display());
    }

    task.register_test(token);
    contest.save()?;
    println!("Test {token} is added to task {task_token}");
    Ok(())
}
