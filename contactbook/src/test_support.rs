//! Test-only helpers for building contacts and temporary contact files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::contact::Contact;
use crate::core::book::ContactBook;
use crate::io::codec::FileFormat;
use crate::io::config::BookConfig;

pub fn alice() -> Contact {
    Contact::new("Alice", "555-1111", "a@x.com")
}

pub fn bob() -> Contact {
    Contact::new("Bob", "555-2222", "b@x.com")
}

pub fn carol() -> Contact {
    Contact::new("Carol", "020-3333", "c@x.com")
}

/// Alice, Bob, Carol in that order.
pub fn sample_contacts() -> Vec<Contact> {
    vec![alice(), bob(), carol()]
}

pub fn sample_book() -> ContactBook {
    ContactBook::from_contacts(sample_contacts())
}

/// A temporary directory holding one contact file.
pub struct TempBook {
    dir: TempDir,
    pub config: BookConfig,
}

impl TempBook {
    /// Empty directory; the contact file does not exist yet.
    pub fn new(format: FileFormat) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let name = match format {
            FileFormat::Json => "contacts.json",
            FileFormat::Csv => "contacts.csv",
        };
        let config = BookConfig::default().with_overrides(Some(dir.path().join(name)), Some(format));
        Ok(Self { dir, config })
    }

    /// Same as [`TempBook::new`], with `contacts` already saved.
    pub fn with_contacts(format: FileFormat, contacts: &[Contact]) -> Result<Self> {
        let book = Self::new(format)?;
        book.config.contact_file().save(contacts)?;
        Ok(book)
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn path(&self) -> PathBuf {
        self.config.path.clone()
    }

    /// Contacts currently on disk.
    pub fn contacts(&self) -> Result<Vec<Contact>> {
        self.config.contact_file().load()
    }
}
