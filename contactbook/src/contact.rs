use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single contact record.
///
/// `extra` carries any fields beyond the required three. Only the JSON codec
/// writes them back out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Overwrite the three required fields, leaving `extra` untouched.
    pub fn apply(&mut self, fields: &ContactFields) {
        self.name.clone_from(&fields.name);
        self.phone.clone_from(&fields.phone);
        self.email.clone_from(&fields.email);
    }

    /// One-line rendering used by the result list.
    pub fn display_row(&self) -> String {
        format!("{} - {} - {}", self.name, self.phone, self.email)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_row())
    }
}

/// The three form inputs, as typed by the user.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn into_contact(self) -> Contact {
        Contact::new(self.name, self.phone, self.email)
    }
}

impl From<&Contact> for ContactFields {
    fn from(contact: &Contact) -> Self {
        Self::new(&contact.name, &contact.phone, &contact.email)
    }
}
