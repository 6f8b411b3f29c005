use std::collections::BTreeMap;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "config.json";

/// A build method as written in the configuration file: the language is
/// still a name to be resolved against the extension table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawBuildMethod {
    pub language: String,
    pub command: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawRunMethod {
    pub command: String,
}

/// Per-user configuration, loaded once per invocation. The method tables
/// derived from it are recreated fresh every time and never persisted as
/// contest state.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub templates_dir: PathBuf,
    pub default_template: String,
    pub solution_name: String,
    pub input_pattern: String,
    pub extensions: BTreeMap<String, String>,
    pub build_methods: BTreeMap<String, RawBuildMethod>,
    pub default_build_method: String,
    pub run_methods: BTreeMap<String, RawRunMethod>,
    pub default_run_method: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    pub name: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildMethod {
    pub language: Language,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunMethod {
    pub command: String,
}

impl Config {
    /// Loads the configuration from the per-user config directory,
    /// materializing a default config and starter templates on first run.
    pub fn load_or_create() -> Result<Config> {
        let proj_dirs = ProjectDirs::from("", "", "coach").ok_or_else(|| {
            Error::InvalidConfig("unable to determine the user config directory".to_string())
        })?;
        Config::load_or_create_at(proj_dirs.config_dir())
    }

    pub fn load_or_create_at(location: &Path) -> Result<Config> {
        let path = location.join(CONFIG_FILE);
        if path.is_file() {
            let file = fs::File::open(&path)?;
            let reader = BufReader::new(file);
            return Ok(serde_json::from_reader(reader)?);
        }
        let config = Config::default_at(location);
        fs::create_dir_all(&config.templates_dir)?;
        config.seed_templates()?;
        fs::write(&path, serde_json::to_vec_pretty(&config)?)?;
        log::info!("a new configuration was written to {}", path.display());
        Ok(config)
    }

    pub fn languages(&self) -> BTreeMap<String, Language> {
        self.extensions
            .iter()
            .map(|(name, extension)| {
                (
                    name.clone(),
                    Language {
                        name: name.clone(),
                        extension: extension.clone(),
                    },
                )
            })
            .collect()
    }

    /// Resolves the raw build-method table against the language table.
    /// A method naming an unknown language is a configuration error.
    pub fn build_methods(&self) -> Result<BTreeMap<String, BuildMethod>> {
        let languages = self.languages();
        let mut methods = BTreeMap::new();
        for (name, raw) in &self.build_methods {
            let language = languages.get(&raw.language).cloned().ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "build method '{name}' uses unknown language '{}'",
                    raw.language
                ))
            })?;
            methods.insert(
                name.clone(),
                BuildMethod {
                    language,
                    command: raw.command.clone(),
                },
            );
        }
        Ok(methods)
    }

    pub fn run_methods(&self) -> BTreeMap<String, RunMethod> {
        self.run_methods
            .iter()
            .map(|(name, raw)| {
                (
                    name.clone(),
                    RunMethod {
                        command: raw.command.clone(),
                    },
                )
            })
            .collect()
    }

    fn default_at(location: &Path) -> Config {
        let extensions = [("c++17", "cpp"), ("python3", "py"), ("rust", "rs")]
            .into_iter()
            .map(|(name, ext)| (name.to_string(), ext.to_string()))
            .collect();

        let build_methods = [
            (
                "gcc",
                "c++17",
                "g++ --std=c++17 -pedantic -Wshadow -Wformat=2 -Wfloat-equal -Wconversion \
                 -g -fsanitize=address -fstack-protector -Wall -Werror -Wextra $INPUT -o $OUTPUT",
            ),
            (
                "gcc_fast",
                "c++17",
                "g++ --std=c++17 -O2 -Wall $INPUT -o $OUTPUT",
            ),
            ("rust", "rust", "rustc -O $INPUT -o $OUTPUT"),
            ("python3", "python3", "cp $INPUT $OUTPUT"),
        ]
        .into_iter()
        .map(|(name, language, command)| {
            (
                name.to_string(),
                RawBuildMethod {
                    language: language.to_string(),
                    command: command.to_string(),
                },
            )
        })
        .collect();

        let run_methods = [
            ("gcc", "./$OUTPUT"),
            ("rust", "./$OUTPUT"),
            ("python3", "python3 $OUTPUT"),
        ]
        .into_iter()
        .map(|(name, command)| {
            (
                name.to_string(),
                RawRunMethod {
                    command: command.to_string(),
                },
            )
        })
        .collect();

        Config {
            templates_dir: location.join("templates"),
            default_template: "gcc".to_string(),
            solution_name: "main".to_string(),
            input_pattern: "main.*".to_string(),
            extensions,
            build_methods,
            default_build_method: "gcc".to_string(),
            run_methods,
            default_run_method: "gcc".to_string(),
        }
    }

    /// Writes the starter templates, never overwriting a file the user
    /// already has.
    fn seed_templates(&self) -> Result<()> {
        for (file_name, body) in [
            ("gcc.cpp", CPP_TEMPLATE),
            ("py3.py", PY3_TEMPLATE),
            ("rust.rs", RUST_TEMPLATE),
        ] {
            let path = self.templates_dir.join(file_name);
            if !path.exists() {
                fs::write(&path, body)?;
            }
        }
        Ok(())
    }
}

const CPP_TEMPLATE: &str = "#include <bits/stdc++.h>

using namespace std;

int main() {
  // solution comes here
}
";

const PY3_TEMPLATE: &str = "import sys


def main():
  return 0


if __name__ == \"__main__\":
  sys.exit(main())
";

const RUST_TEMPLATE: &str = "use std::io::{self, Read};

fn main() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).unwrap();
    // solution comes here
}
";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_tables_resolve() {
        let config = Config::default_at(Path::new("/tmp/coach"));
        let methods = config.build_methods().unwrap();
        assert_eq!(methods["gcc"].language.extension, "cpp");
        assert_eq!(methods["python3"].command, "cp $INPUT $OUTPUT");
        assert_eq!(config.run_methods()["python3"].command, "python3 $OUTPUT");
        assert!(methods.contains_key(&config.default_build_method));
        assert!(config.run_methods().contains_key(&config.default_run_method));
    }

    #[test]
    fn unknown_language_is_invalid_config() {
        let mut config = Config::default_at(Path::new("/tmp/coach"));
        config.build_methods.insert(
            "weird".to_string(),
            RawBuildMethod {
                language: "cobol".to_string(),
                command: String::new(),
            },
        );
        let err = config.build_methods().unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidConfig(_)));
    }

    #[test]
    fn first_run_seeds_config_and_templates() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create_at(dir.path()).unwrap();
        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert!(config.templates_dir.join("gcc.cpp").is_file());

        // a second load reads the file back without reseeding
        let reloaded = Config::load_or_create_at(dir.path()).unwrap();
        assert_eq!(reloaded.default_build_method, config.default_build_method);
    }

    #[test]
    fn existing_templates_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("gcc.cpp"), "// custom").unwrap();

        Config::load_or_create_at(dir.path()).unwrap();
        let body = fs::read_to_string(templates.join("gcc.cpp")).unwrap();
        assert_eq!(body, "// custom");
    }
}
