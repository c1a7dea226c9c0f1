//! Orchestration: run the session reducer and carry out its effects.

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::notice::Notice;
use crate::core::session::{Effect, Event, Session, update};
use crate::io::config::BookConfig;
use crate::io::store::ContactFile;

/// Observable result of one dispatched event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Notifications to show the user, in the order raised.
    pub notices: Vec<Notice>,
    /// True if the backing file was rewritten.
    pub persisted: bool,
}

impl Outcome {
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.first()
    }
}

/// Load the configured backing file and open a session over it.
pub fn open_session(config: &BookConfig) -> Result<(Session, ContactFile)> {
    let file = config.contact_file();
    let book = file
        .load_book(config.on_load_error)
        .context("load contact book")?;
    debug!(path = %file.path.display(), count = book.len(), "session opened");
    Ok((Session::new(book), file))
}

/// Apply `event` to `session`, persisting to `file` if the book changed.
///
/// A save failure is returned as an error; the in-memory session keeps the
/// mutation.
pub fn dispatch(session: &mut Session, file: &ContactFile, event: Event) -> Result<Outcome> {
    let mut outcome = Outcome::default();
    for effect in update(session, event) {
        match effect {
            Effect::Persist => {
                file.save(&session.book.contacts())?;
                outcome.persisted = true;
            }
            Effect::Notify(notice) => {
                debug!(kind = ?notice.kind, message = %notice.message, "notice raised");
                outcome.notices.push(notice);
            }
        }
    }
    Ok(outcome)
}
