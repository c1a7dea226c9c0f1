//! In-memory ordered contact list with stable synthetic ids.

use serde::{Deserialize, Serialize};

use crate::contact::{Contact, ContactFields};

/// Identifier assigned when a contact enters the book.
///
/// Ids are never reused within a book and never persisted; they only exist so
/// a displayed row can be resolved back to its contact after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: ContactId,
    contact: Contact,
}

/// Ordered sequence of contacts. Insertion order is display and save order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let mut book = Self::new();
        for contact in contacts {
            book.add(contact);
        }
        book
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a contact and return its new id.
    pub fn add(&mut self, contact: Contact) -> ContactId {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, contact });
        id
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.position(id).map(|index| &self.entries[index].contact)
    }

    /// Overwrite the required fields of `id` in place.
    ///
    /// Returns false when `id` is not in the book.
    pub fn update(&mut self, id: ContactId, fields: &ContactFields) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries[index].contact.apply(fields);
                true
            }
            None => false,
        }
    }

    /// Remove `id`, shifting later contacts down by one.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let index = self.position(id)?;
        Some(self.entries.remove(index).contact)
    }

    /// Ids of contacts whose name contains `term` ignoring case, or whose
    /// phone contains `term` exactly. Empty `term` matches everything.
    pub fn find(&self, term: &str) -> Vec<ContactId> {
        let folded = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| matches_term(&entry.contact, term, &folded))
            .map(|entry| entry.id)
            .collect()
    }

    /// All ids in store order.
    pub fn ids(&self) -> Vec<ContactId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.entries
            .iter()
            .map(|entry| entry.contact.clone())
            .collect()
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

fn matches_term(contact: &Contact, term: &str, folded: &str) -> bool {
    contact.name.to_lowercase().contains(folded) || contact.phone.contains(term)
}
