//! Settings file for the command-line front end
//!
//! ```toml
//! [output]
//! dir = "Generated"
//!
//! [converter]
//! program = "/usr/bin/ibtool"
//! temp_path = "/tmp/xib2objc.xml"
//!
//! [project]
//! author = "Ada"
//! date = "2024-03-01"
//!
//! [templates]
//! header = "templates/View.h"
//! implementation = "templates/View.m"
//! ```
//!
//! Relative template paths are resolved against the settings file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::codegen::{ProjectInfo, TemplateSet};

/// Errors that can occur when loading settings or templates
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to read template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Settings for one run of the front end
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub output_dir: Option<PathBuf>,
    pub converter: Option<PathBuf>,
    pub temp_path: Option<PathBuf>,
    pub project: ProjectInfo,
    pub header_template: Option<PathBuf>,
    pub implementation_template: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlSettings {
    #[serde(default)]
    output: TomlOutput,
    #[serde(default)]
    converter: TomlConverter,
    #[serde(default)]
    project: TomlProject,
    #[serde(default)]
    templates: TomlTemplates,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlOutput {
    dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConverter {
    program: Option<PathBuf>,
    temp_path: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlProject {
    author: Option<String>,
    date: Option<String>,
    year: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlTemplates {
    header: Option<PathBuf>,
    implementation: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_str(&content)?;
        if let Some(base) = path.parent() {
            settings.resolve_relative_to(base);
        }
        Ok(settings)
    }

    /// Parse settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let toml: TomlSettings = toml::from_str(content)?;
        let mut project = ProjectInfo::new();
        if let Some(author) = toml.project.author {
            project = project.with_author(author);
        }
        if let Some(date) = toml.project.date {
            project = project.with_date(date);
        }
        if let Some(year) = toml.project.year {
            project = project.with_year(year);
        }

        Ok(Self {
            output_dir: toml.output.dir,
            converter: toml.converter.program,
            temp_path: toml.converter.temp_path,
            project,
            header_template: toml.templates.header,
            implementation_template: toml.templates.implementation,
        })
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.header_template, &mut self.implementation_template]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Built-in skeletons with any configured template files swapped in
    pub fn templates(&self) -> Result<TemplateSet, ConfigError> {
        let mut set = TemplateSet::default();
        if let Some(path) = &self.header_template {
            set = set.with_header(read_template(path)?);
        }
        if let Some(path) = &self.implementation_template {
            set = set.with_implementation(read_template(path)?);
        }
        Ok(set)
    }
}

fn read_template(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Template {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings() {
        let settings = Settings::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.templates().unwrap(), TemplateSet::default());
    }

    #[test]
    fn test_parse_all_sections() {
        let settings = Settings::from_str(
            r#"
[output]
dir = "Generated"

[converter]
program = "/usr/local/bin/ibtool"
temp_path = "/tmp/view.xml"

[project]
author = "Ada"
date = "2024-03-01"
"#,
        )
        .unwrap();
        assert_eq!(settings.output_dir, Some(PathBuf::from("Generated")));
        assert_eq!(settings.converter, Some(PathBuf::from("/usr/local/bin/ibtool")));
        assert_eq!(settings.temp_path, Some(PathBuf::from("/tmp/view.xml")));
        assert_eq!(settings.project.author, "Ada");
        assert_eq!(settings.project.year(), "2024");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Settings::from_str("[output]\ndirectory = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_template_paths_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("View.h"), "// [View-Name]\n").unwrap();
        std::fs::write(
            dir.path().join("settings.toml"),
            "[templates]\nheader = \"View.h\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(dir.path().join("settings.toml")).unwrap();
        let templates = settings.templates().unwrap();
        assert_eq!(templates.header, "// [View-Name]\n");
        assert_eq!(templates.implementation, TemplateSet::default().implementation);
    }

    #[test]
    fn test_missing_template_file() {
        let settings = Settings {
            implementation_template: Some(PathBuf::from("/nonexistent/View.m")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.templates(),
            Err(ConfigError::Template { .. })
        ));
    }

    #[test]
    fn test_missing_settings_file() {
        assert!(matches!(
            Settings::from_file("/nonexistent/settings.toml"),
            Err(ConfigError::IoError(_))
        ));
    }
}
