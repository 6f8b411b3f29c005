use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel metadata file marking a directory as a contest root.
pub const ROOT_FILE: &str = ".contest.json";

/// A sample test produced by a platform adapter. Never persisted as an
/// object: on disk it becomes a `token.in` / `token.out` file pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Test {
    pub token: String,
    pub input: String,
    pub output: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub link: String,
    pub name: String,
    pub token: String,
    /// Test tokens known to this task, insertion order preserved. The
    /// order drives the default run order of the test loop.
    pub test_tokens: Vec<String>,
}

impl Task {
    pub fn new(link: String, name: String, token: String) -> Task {
        Task {
            link,
            name,
            token,
            test_tokens: Vec::new(),
        }
    }

    pub fn has_test(&self, token: &str) -> bool {
        self.test_tokens.iter().any(|t| t == token)
    }

    /// Registers a test token, keeping the list duplicate-free. Returns
    /// whether the list changed; re-registering an existing token is a
    /// replace-in-place of its fixture files, not a list mutation.
    pub fn register_test(&mut self, token: &str) -> bool {
        if self.has_test(token) {
            return false;
        }
        self.test_tokens.push(token.to_string());
        true
    }

    pub fn remove_test(&mut self, token: &str) -> bool {
        let before = self.test_tokens.len();
        self.test_tokens.retain(|t| t != token);
        self.test_tokens.len() != before
    }
}

/// The whole contest record, serialized as one JSON object to the
/// sentinel file. Mutations are read-modify-write of the full record;
/// concurrent invocations are not coordinated and the last save wins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Contest {
    pub link: String,
    pub name: String,
    pub tasks: BTreeMap<String, Task>,
    pub root_dir: PathBuf,
}

impl Contest {
    pub fn root_file(&self) -> PathBuf {
        self.root_dir.join(ROOT_FILE)
    }

    pub fn task_dir(&self, token: &str) -> PathBuf {
        self.root_dir.join(token)
    }

    pub fn load(path: &Path) -> Result<Contest> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(self.root_file(), data)?;
        Ok(())
    }

    /// Locates the contest governing the current working directory by
    /// walking upward until a sentinel file is found.
    pub fn locate() -> Result<Contest> {
        let start = env::current_dir()?;
        Contest::locate_from(&start)
    }

    pub fn locate_from(start: &Path) -> Result<Contest> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(ROOT_FILE);
            if candidate.is_file() {
                return Contest::load(&candidate);
            }
            if !dir.pop() {
                return Err(Error::ContestNotFound(start.to_path_buf()));
            }
        }
    }

    /// Matches the current working directory to exactly one task
    /// subdirectory. Unlike contest location, there is no ancestor
    /// matching: the working directory must be `root_dir/token` itself.
    pub fn current_task_token(&self) -> Result<String> {
        let workdir = env::current_dir()?;
        self.task_token_for(&workdir)
    }

    pub fn task_token_for(&self, workdir: &Path) -> Result<String> {
        for token in self.tasks.keys() {
            if self.task_dir(token) == *workdir {
                return Ok(token.clone());
            }
        }
        Err(Error::TaskNotMatched(workdir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_contest(root_dir: PathBuf) -> Contest {
        let mut tasks = BTreeMap::new();
        tasks.insert(
            "a".to_string(),
            Task::new(
                "http://example.com/contest/1/problem/A".to_string(),
                "Theatre Square".to_string(),
                "a".to_string(),
            ),
        );
        tasks.insert(
            "b".to_string(),
            Task::new(
                "http://example.com/contest/1/problem/B".to_string(),
                "Spreadsheets".to_string(),
                "b".to_string(),
            ),
        );
        Contest {
            link: "http://example.com/contest/1".to_string(),
            name: "Example Round".to_string(),
            tasks,
            root_dir,
        }
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut contest = sample_contest(dir.path().to_path_buf());
        contest
            .tasks
            .get_mut("a")
            .unwrap()
            .register_test("sample1");
        contest.save().unwrap();

        let loaded = Contest::load(&dir.path().join(ROOT_FILE)).unwrap();
        assert_eq!(contest, loaded);
    }

    #[test]
    fn locate_walks_up_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let contest = sample_contest(dir.path().to_path_buf());
        contest.save().unwrap();
        let nested = dir.path().join("a").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let located = Contest::locate_from(&nested).unwrap();
        assert_eq!(contest, located);
    }

    #[test]
    fn locate_fails_without_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let err = Contest::locate_from(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ContestNotFound(_)));
    }

    #[test]
    fn task_matching_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let contest = sample_contest(dir.path().to_path_buf());

        let token = contest.task_token_for(&dir.path().join("a")).unwrap();
        assert_eq!(token, "a");

        // neither the contest root nor a nested directory is a task
        assert!(contest.task_token_for(dir.path()).is_err());
        assert!(
            contest
                .task_token_for(&dir.path().join("a").join("deep"))
                .is_err()
        );
    }

    #[test]
    fn register_test_is_replace_in_place() {
        let mut task = Task::new(String::new(), String::new(), "a".to_string());
        assert!(task.register_test("sample1"));
        assert!(task.register_test("sample2"));
        assert!(!task.register_test("sample1"));
        assert_eq!(task.test_tokens, vec!["sample1", "sample2"]);
    }

    #[test]
    fn remove_test_reports_missing_token() {
        let mut task = Task::new(String::new(), String::new(), "a".to_string());
        task.register_test("sample1");
        assert!(task.remove_test("sample1"));
        assert!(!task.remove_test("sample1"));
        assert!(task.test_tokens.is_empty());
    }
}
