//! Backing file load/save for the contact list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contact::Contact;
use crate::core::book::ContactBook;
use crate::io::codec::FileFormat;

/// What to do when the backing file exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Propagate the error and refuse to start.
    #[default]
    Abort,
    /// Move the unreadable file aside to `<path>.bad` and start empty.
    StartEmpty,
}

/// The file a contact list is persisted to, and its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFile {
    pub path: PathBuf,
    pub format: FileFormat,
}

impl ContactFile {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Read every contact in file order. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Contact>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "contacts file absent, starting empty");
            return Ok(Vec::new());
        }
        let codec = self.format.codec();
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("read contacts {}", self.path.display()))?;
        let contacts = codec
            .deserialize(&contents)
            .with_context(|| format!("parse contacts {} as {}", self.path.display(), codec.name()))?;
        debug!(path = %self.path.display(), format = codec.name(), count = contacts.len(), "contacts loaded");
        Ok(contacts)
    }

    /// Overwrite the file with the full list.
    ///
    /// The write is a plain truncate-and-write; a failure part way through
    /// leaves whatever reached the disk.
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        let codec = self.format.codec();
        let payload = codec
            .serialize(contacts)
            .with_context(|| format!("serialize contacts as {}", codec.name()))?;
        fs::write(&self.path, payload)
            .with_context(|| format!("write contacts {}", self.path.display()))?;
        debug!(path = %self.path.display(), format = codec.name(), count = contacts.len(), "contacts saved");
        Ok(())
    }

    /// Load into a book, applying `policy` when the file is unreadable.
    pub fn load_book(&self, policy: LoadPolicy) -> Result<ContactBook> {
        match (self.load(), policy) {
            (Ok(contacts), _) => Ok(ContactBook::from_contacts(contacts)),
            (Err(err), LoadPolicy::Abort) => Err(err.context(format!(
                "contacts file {} is unreadable; set on_load_error = \"start-empty\" to move it aside and start empty",
                self.path.display()
            ))),
            (Err(err), LoadPolicy::StartEmpty) => {
                let aside = quarantine_path(&self.path);
                fs::rename(&self.path, &aside).with_context(|| {
                    format!(
                        "move unreadable contacts {} to {}",
                        self.path.display(),
                        aside.display()
                    )
                })?;
                warn!(
                    error = %format!("{err:#}"),
                    moved_to = %aside.display(),
                    "contacts file unreadable, starting with an empty list"
                );
                Ok(ContactBook::new())
            }
        }
    }
}

fn quarantine_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bad");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_contacts;

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = ContactFile::new(temp.path().join("contacts.json"), FileFormat::Json);
        assert!(file.load().expect("load").is_empty());
    }

    /// Verifies save → load preserves contacts and order for both formats.
    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        for (name, format) in [("c.json", FileFormat::Json), ("c.csv", FileFormat::Csv)] {
            let file = ContactFile::new(temp.path().join(name), format);
            file.save(&sample_contacts()).expect("save");
            assert_eq!(file.load().expect("load"), sample_contacts());
        }
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = ContactFile::new(temp.path().join("contacts.json"), FileFormat::Json);
        file.save(&sample_contacts()).expect("save");
        file.save(&[]).expect("save empty");
        assert_eq!(
            fs::read_to_string(&file.path).expect("read"),
            "[]\n"
        );
    }

    #[test]
    fn malformed_file_aborts_by_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contacts.json");
        fs::write(&path, "not json").expect("write");
        let file = ContactFile::new(&path, FileFormat::Json);

        let err = file.load_book(LoadPolicy::Abort).expect_err("abort");
        assert!(format!("{err:#}").contains("parse contacts"));
        assert!(format!("{err:#}").contains("on_load_error = \"start-empty\""));
        assert_eq!(fs::read_to_string(&path).expect("read"), "not json");
    }

    #[test]
    fn start_empty_moves_malformed_file_aside() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("contacts.csv");
        fs::write(&path, "name,phone,email\na,b,c,d\n").expect("write");
        let file = ContactFile::new(&path, FileFormat::Csv);

        let book = file.load_book(LoadPolicy::StartEmpty).expect("start empty");

        assert!(book.is_empty());
        assert!(!path.exists());
        let aside = temp.path().join("contacts.csv.bad");
        assert_eq!(
            fs::read_to_string(aside).expect("read aside"),
            "name,phone,email\na,b,c,d\n"
        );
    }
}
