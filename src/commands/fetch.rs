use std::fs;

use anyhow::{Context, Result, anyhow};

use crate::contest::Contest;
use crate::error::Error;
use crate::platforms::{self, Platform};

pub fn execute(all: bool) -> Result<()> {
    let mut contest = Contest::locate()?;
    let platform = platforms::find(&contest.link).ok_or_else(|| {
        anyhow!("no platform adapter accepts contest url {}", contest.link)
    })?;

    if all {
        // token-sorted order; a failing task is reported and skipped
        let tokens: Vec<String> = contest.tasks.keys().cloned().collect();
        for token in tokens {
            if let Err(err) = fetch_for_task(platform.as_ref(), &mut contest, &token) {
                log::warn!("can't fetch task '{token}': {err:#}");
            }
        }
    } else {
        let token = contest.current_task_token()?;
        fetch_for_task(platform.as_ref(), &mut contest, &token)
            .with_context(|| format!("can't fetch task '{token}'"))?;
    }
    Ok(())
}

/// Downloads the samples of one task and persists them as fixture
/// files. Tokens already registered keep their position in the list;
/// their files are overwritten in place.
fn fetch_for_task(platform: &dyn Platform, contest: &mut Contest, token: &str) -> Result<()> {
    log::info!("processing task '{token}'");
    let task = contest
        .tasks
        .get(token)
        .ok_or_else(|| Error::UnknownTask(token.to_string()))?
        .clone();
    let task_dir = contest.task_dir(token);
    fs::create_dir_all(&task_dir)
        .with_context(|| format!("can't create task directory '{}'", task_dir.display()))?;

    let fetched = platform
        .fetch_tests(&task)
        .with_context(|| format!("unable to get tests for task '{token}'"))?;
    for warning in &fetched.warnings {
        log::warn!("{warning}");
    }

    let entry = contest
        .tasks
        .get_mut(token)
        .ok_or_else(|| Error::UnknownTask(token.to_string()))?;
    let mut registered = false;
    for test in &fetched.tests {
        fs::write(task_dir.join(format!("{}.in", test.token)), &test.input)?;
        fs::write(task_dir.join(format!("{}.out", test.token)), &test.output)?;
        registered |= entry.register_test(&test.token);
        log::info!("saved test '{}' for task '{token}'", test.token);
    }

    // the record only changed if a new token was registered
    if registered {
        contest.save()?;
    }
    Ok(())
}
