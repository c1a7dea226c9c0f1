//! Contact book configuration stored in `contactbook.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::codec::FileFormat;
use crate::io::store::{ContactFile, LoadPolicy};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "contactbook.toml";

/// Contact book configuration (TOML).
///
/// Missing fields default to a JSON file named `contacts.json` in the working
/// directory, and a startup that aborts on an unreadable file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BookConfig {
    /// Backing file for the contact list.
    pub path: PathBuf,

    /// Serialization format of `path`.
    pub format: FileFormat,

    /// Startup behavior when `path` exists but cannot be parsed.
    pub on_load_error: LoadPolicy,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("contacts.json"),
            format: FileFormat::default(),
            on_load_error: LoadPolicy::default(),
        }
    }
}

impl BookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(anyhow!("path must be non-empty"));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, path: Option<PathBuf>, format: Option<FileFormat>) -> Self {
        if let Some(path) = path {
            self.path = path;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn contact_file(&self) -> ContactFile {
        ContactFile::new(&self.path, self.format)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BookConfig::default()`.
pub fn load_config(path: &Path) -> Result<BookConfig> {
    if !path.exists() {
        let cfg = BookConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BookConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, BookConfig::default());
        assert_eq!(cfg.format, FileFormat::Json);
        assert_eq!(cfg.on_load_error, LoadPolicy::Abort);
    }

    #[test]
    fn load_reads_every_field() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contactbook.toml");
        fs::write(
            &path,
            "path = \"people.csv\"\nformat = \"csv\"\non_load_error = \"start-empty\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.path, PathBuf::from("people.csv"));
        assert_eq!(cfg.format, FileFormat::Csv);
        assert_eq!(cfg.on_load_error, LoadPolicy::StartEmpty);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contactbook.toml");
        fs::write(&path, "format = \"csv\"\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.path, PathBuf::from("contacts.json"));
        assert_eq!(cfg.format, FileFormat::Csv);
    }

    #[test]
    fn empty_path_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contactbook.toml");
        fs::write(&path, "path = \"\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contactbook.toml");
        fs::write(&path, "format = \"xml\"\n").expect("write");
        let err = load_config(&path).expect_err("bad format");
        assert!(format!("{err:#}").contains("parse"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let cfg = BookConfig::default()
            .with_overrides(Some(PathBuf::from("other.csv")), Some(FileFormat::Csv));
        assert_eq!(cfg.contact_file(), ContactFile::new("other.csv", FileFormat::Csv));
    }
}
