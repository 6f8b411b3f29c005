use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::contest::Contest;

pub fn execute() -> Result<()> {
    let contest = Contest::locate()?;
    println!("Contest: {} -- {}", contest.name, contest.link);

    if contest.tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    let workdir = env::current_dir()?;
    println!("Tasks:");
    for (token, task) in &contest.tasks {
        let task_path = contest.task_dir(token);
        let rel_path = relative_path(&workdir, &task_path);
        let marker = if rel_path == Path::new(".") { "*" } else { " " };
        println!(
            "\n{marker} [{token}] {} -- {}\n\tpath:  {}",
            task.name,
            task.link,
            rel_path.display()
        );
        if !task.test_tokens.is_empty() {
            println!("\ttests: {}", task.test_tokens.join(" "));
        }
    }
    Ok(())
}

/// Renders `dest` relative to `src`, both absolute, using `..` segments
/// where the destination is outside the source tree.
fn relative_path(src: &Path, dest: &Path) -> PathBuf {
    let mut base = src.to_path_buf();
    let mut prefix = PathBuf::new();
    loop {
        if let Ok(rest) = dest.strip_prefix(&base) {
            let joined = prefix.join(rest);
            return if joined.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                joined
            };
        }
        if !base.pop() {
            return dest.to_path_buf();
        }
        prefix.push("..");
    }
}
