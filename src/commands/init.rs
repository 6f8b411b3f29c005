use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use crate::platforms;

pub fn execute(url: &str, directory: Option<&Path>) -> Result<()> {
    let root_dir = determine_root_directory(directory)?;

    let platform = platforms::find(url)
        .ok_or_else(|| anyhow!("no platform adapter accepts url {url}"))?;
    let contest = platform
        .fetch_contest(url, &root_dir)
        .with_context(|| format!("can't fetch contest from {url}"))?;

    let root_file = contest.root_file();
    if root_file.exists() {
        bail!(
            "{} already exists; remove it to initialize the directory for the contest",
            root_file.display()
        );
    }

    fs::create_dir_all(&contest.root_dir)?;
    contest.save()?;
    for token in contest.tasks.keys() {
        fs::create_dir_all(contest.task_dir(token))?;
    }

    println!(
        "Initialized contest '{}' with {} task(s)",
        contest.name,
        contest.tasks.len()
    );
    println!("Root directory: {}", contest.root_dir.display());
    Ok(())
}

fn determine_root_directory(directory: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    Ok(match directory {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}
