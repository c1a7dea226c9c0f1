//! Shared application state for the UI server.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use contactbook::core::session::Session;
use contactbook::io::store::ContactFile;
use minijinja::Environment;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// The one session behind the form, plus the file it persists to.
pub struct Book {
    pub session: Session,
    pub file: ContactFile,
}

/// Shared state accessible from all request handlers.
///
/// Every action locks `book` for its full duration, so actions run one at a
/// time and each finishes (validate, mutate, save, render) before the next.
#[derive(Clone)]
pub struct AppState {
    book: Arc<Mutex<Book>>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(session: Session, file: ContactFile) -> Result<Self> {
        let mut templates = Environment::new();
        templates
            .add_template("index.html", INDEX_TEMPLATE)
            .context("load index template")?;
        Ok(Self {
            book: Arc::new(Mutex::new(Book { session, file })),
            templates: Arc::new(templates),
        })
    }

    pub fn lock(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn templates(&self) -> &Environment<'static> {
        &self.templates
    }
}
