//! User-facing notifications and form validation.

use serde::Serialize;

use crate::contact::ContactFields;

/// Category of a modal notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    /// A required form field was left empty.
    InputError,
    /// Edit or Delete was triggered with no row selected.
    SelectionError,
}

impl NoticeKind {
    pub fn title(self) -> &'static str {
        match self {
            NoticeKind::InputError => "Input Error",
            NoticeKind::SelectionError => "Selection Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title(),
            message: message.into(),
        }
    }

    pub fn missing_fields() -> Self {
        Self::new(NoticeKind::InputError, "All fields must be filled!")
    }

    pub fn no_selection(action: &str) -> Self {
        Self::new(
            NoticeKind::SelectionError,
            format!("Please select a contact to {action}."),
        )
    }
}

/// Presence check for Add and Edit. Whitespace counts as content.
pub fn validate_fields(fields: &ContactFields) -> Result<(), Notice> {
    if fields.name.is_empty() || fields.phone.is_empty() || fields.email.is_empty() {
        return Err(Notice::missing_fields());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_empty_field_is_an_input_error() {
        let cases = [
            ContactFields::new("", "1", "e"),
            ContactFields::new("n", "", "e"),
            ContactFields::new("n", "1", ""),
        ];
        for fields in cases {
            let notice = validate_fields(&fields).expect_err("empty field");
            assert_eq!(notice.kind, NoticeKind::InputError);
            assert_eq!(notice.title, "Input Error");
        }
    }

    #[test]
    fn whitespace_passes_presence_check() {
        assert!(validate_fields(&ContactFields::new(" ", " ", " ")).is_ok());
    }

    #[test]
    fn selection_notice_names_the_action() {
        let notice = Notice::no_selection("delete");
        assert_eq!(notice.title, "Selection Error");
        assert_eq!(notice.message, "Please select a contact to delete.");
    }
}
