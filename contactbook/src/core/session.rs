//! Interaction state and the pure event reducer behind every surface.
//!
//! A [`Session`] holds everything a form surface needs to render: the book,
//! the current field contents, the search text, the visible rows, and the
//! selected row. [`update`] applies one user action and returns the side
//! effects the caller must carry out. It never touches the filesystem.

use tracing::debug;

use crate::contact::{Contact, ContactFields};
use crate::core::book::{ContactBook, ContactId};
use crate::core::notice::{Notice, validate_fields};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Append the given fields as a new contact.
    Add(ContactFields),
    /// Narrow the visible rows to `find(term)`.
    Search(String),
    /// Choose a row of the current view.
    Select(usize),
    /// Choose the row showing `id`. Ids not in the current view select nothing.
    SelectId(ContactId),
    ClearSelection,
    /// Overwrite the selected contact with the given fields.
    Edit(ContactFields),
    /// Remove the selected contact.
    Delete,
}

/// Work the caller must perform after [`update`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The book changed and must be rewritten to the backing file.
    Persist,
    /// Show a modal notification.
    Notify(Notice),
}

/// Rows currently displayed, each resolved to the contact it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub rows: Vec<ContactId>,
}

/// Explicit application state passed to every handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub book: ContactBook,
    pub form: ContactFields,
    pub search: String,
    pub view: View,
    pub selected: Option<usize>,
}

impl Session {
    /// Start a session showing every contact in `book`.
    pub fn new(book: ContactBook) -> Self {
        let mut session = Self {
            book,
            ..Self::default()
        };
        session.show_all();
        session
    }

    /// Contacts of the current view in row order.
    pub fn visible(&self) -> Vec<(ContactId, &Contact)> {
        self.view
            .rows
            .iter()
            .filter_map(|id| self.book.get(*id).map(|contact| (*id, contact)))
            .collect()
    }

    /// Id behind the selected row, if a row is selected and still present.
    pub fn selected_id(&self) -> Option<ContactId> {
        let row = self.selected?;
        let id = *self.view.rows.get(row)?;
        self.book.get(id).map(|_| id)
    }

    fn show_all(&mut self) {
        self.view = View {
            rows: self.book.ids(),
        };
        self.selected = None;
    }

    fn show_matches(&mut self, term: &str) {
        self.view = View {
            rows: self.book.find(term),
        };
        self.selected = None;
    }
}

/// Apply `event` to `session` and return the resulting side effects.
///
/// Mutating events leave the session showing the full list with nothing
/// selected. Rejected events leave the book untouched.
pub fn update(session: &mut Session, event: Event) -> Vec<Effect> {
    match event {
        Event::Add(fields) => {
            session.form = fields.clone();
            if let Err(notice) = validate_fields(&fields) {
                return vec![Effect::Notify(notice)];
            }
            let id = session.book.add(fields.into_contact());
            debug!(id = id.0, len = session.book.len(), "contact added");
            session.show_all();
            vec![Effect::Persist]
        }
        Event::Search(term) => {
            session.show_matches(&term);
            debug!(term = %term, rows = session.view.rows.len(), "search applied");
            session.search = term;
            Vec::new()
        }
        Event::Select(row) => {
            session.selected = (row < session.view.rows.len()).then_some(row);
            if session.selected.is_none() {
                debug!(row, rows = session.view.rows.len(), "selection out of range");
            }
            Vec::new()
        }
        Event::SelectId(id) => {
            session.selected = session.view.rows.iter().position(|row| *row == id);
            if session.selected.is_none() {
                debug!(id = id.0, "selected contact is not in the current view");
            }
            Vec::new()
        }
        Event::ClearSelection => {
            session.selected = None;
            Vec::new()
        }
        Event::Edit(fields) => {
            session.form = fields.clone();
            let Some(id) = session.selected_id() else {
                return vec![Effect::Notify(Notice::no_selection("edit"))];
            };
            if let Err(notice) = validate_fields(&fields) {
                return vec![Effect::Notify(notice)];
            }
            session.book.update(id, &fields);
            debug!(id = id.0, "contact edited");
            session.show_all();
            vec![Effect::Persist]
        }
        Event::Delete => {
            let Some(id) = session.selected_id() else {
                return vec![Effect::Notify(Notice::no_selection("delete"))];
            };
            session.book.remove(id);
            debug!(id = id.0, len = session.book.len(), "contact deleted");
            session.show_all();
            vec![Effect::Persist]
        }
    }
}
