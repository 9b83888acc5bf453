use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./bookmark_review.ron";

/// Display strings normally looked up from the host's locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub no_title: String,
    pub title: String,
    pub path: String,
    pub state: String,
    pub new_url: String,
    pub no_results: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            no_title: review_core::NO_TITLE_PLACEHOLDER.to_string(),
            title: "Title".to_string(),
            path: "Path".to_string(),
            state: "State".to_string(),
            new_url: "New URL".to_string(),
            no_results: "No broken bookmarks found.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Mode sent with `execute` when `start` names none.
    pub default_mode: String,
    pub labels: Labels,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            default_mode: "broken-bookmarks".to_string(),
            labels: Labels::default(),
        }
    }
}

impl ReviewConfig {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Missing file means defaults; a file that cannot be read or parsed is an error.
pub fn load_config(path: &Path) -> Result<ReviewConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ReviewConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config from {:?}", path));
        }
    };

    ron::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("review.ron");
        fs::write(
            &path,
            r#"(
                log_destination: Both,
                log_level: "debug",
                labels: (no_title: "(sans titre)"),
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.default_mode, "broken-bookmarks");
        assert_eq!(config.labels.no_title, "(sans titre)");
        assert_eq!(config.labels.new_url, "New URL");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(log_level: ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let config = ReviewConfig {
            log_level: "chatty".to_string(),
            ..ReviewConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
