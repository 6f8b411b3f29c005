use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use crate::config::Config;

/// A code template: a regular file `name.extension` in the templates
/// directory.
#[derive(Debug, Clone, PartialEq)]
struct Template {
    name: String,
    extension: String,
}

impl Template {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

pub fn execute(config: &Config, template: Option<&str>, filename: &str) -> Result<()> {
    let name = template.unwrap_or(&config.default_template);
    let template = find_template(&config.templates_dir, name)?;
    let destination = check_destination(&template, filename)?;

    let source = config.templates_dir.join(template.file_name());
    fs::copy(&source, &destination).with_context(|| {
        format!(
            "failed to copy template '{}' into '{}'",
            template.name,
            destination.display()
        )
    })?;
    println!("Created {}", destination.display());
    Ok(())
}

fn list_templates(dir: &Path) -> Result<Vec<Template>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("unable to read templates directory '{}'", dir.display()))?;
    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some((name, extension)) = file_name.rsplit_once('.')
            && !name.is_empty()
        {
            templates.push(Template {
                name: name.to_string(),
                extension: extension.to_string(),
            });
        }
    }
    Ok(templates)
}

fn find_template(dir: &Path, name: &str) -> Result<Template> {
    let templates = list_templates(dir)?;
    templates
        .into_iter()
        .find(|template| template.name == name)
        .ok_or_else(|| anyhow!("not found template '{name}'"))
}

/// Appends the template extension to the destination when missing and
/// refuses to overwrite an existing file.
fn check_destination(template: &Template, filename: &str) -> Result<PathBuf> {
    let suffix = format!(".{}", template.extension);
    let destination = if filename.ends_with(&suffix) {
        PathBuf::from(filename)
    } else {
        PathBuf::from(format!("{filename}{suffix}"))
    };
    if destination.exists() {
        bail!(
            "file {} already exists; remove it to proceed",
            destination.display()
        );
    }
    Ok(destination)
}
