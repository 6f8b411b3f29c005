use anyhow::Result;

use crate::contest::Contest;
use crate::error::Error;

/// Unregisters a test case from the current task. The fixture files are
/// left on disk.
pub fn execute(token: &str) -> Result<()> {
    let mut contest = Contest::locate()?;
    let task_token = contest.current_task_token()?;

    let task = contest
        .tasks
        .get_mut(&task_token)
        .ok_or_else(|| Error::UnknownTask(task_token.clone()))?;
    if !task.remove_test(token) {
        return Err(Error::UnknownTestToken(token.to_string()).into());
    }

    contest.save()?;
    println!("Test {token} is removed from task {task_token}");
    Ok(())
}
