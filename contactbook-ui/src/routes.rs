//! HTTP route handlers for the contact form.

use axum::Router;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use contactbook::contact::ContactFields;
use contactbook::core::book::ContactId;
use contactbook::core::notice::Notice;
use contactbook::core::session::{Event, Session};
use contactbook::dispatch::dispatch;
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::state::AppState;

const TITLE: &str = "Contact Book";

/// Build the router: the form page plus a small JSON API.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/health", get(health))
        .route("/api/contacts", get(list_rows))
}

/// Button pressed on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Search,
    Edit,
    Delete,
}

/// Everything the browser posts back on a button press.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub search: String,
    /// Contact behind the checked row, absent when nothing is selected.
    pub selected: Option<ContactId>,
    pub action: Option<Action>,
}

impl FormInput {
    fn fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.phone, &self.email)
    }

    /// Events for this submission: the selection first, then the action.
    fn events(&self) -> Vec<Event> {
        let selection = match self.selected {
            Some(id) => Event::SelectId(id),
            None => Event::ClearSelection,
        };
        let action = match self.action {
            Some(Action::Add) => Event::Add(self.fields()),
            Some(Action::Search) => Event::Search(self.search.clone()),
            Some(Action::Edit) => Event::Edit(self.fields()),
            Some(Action::Delete) => Event::Delete,
            None => return vec![selection],
        };
        vec![selection, action]
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Row {
    pub id: ContactId,
    pub label: String,
    pub selected: bool,
}

fn rows(session: &Session) -> Vec<Row> {
    session
        .visible()
        .into_iter()
        .enumerate()
        .map(|(index, (id, contact))| Row {
            id,
            label: contact.display_row(),
            selected: session.selected == Some(index),
        })
        .collect()
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/contacts - rows of the current view.
async fn list_rows(State(state): State<AppState>) -> Json<Vec<Row>> {
    let book = state.lock();
    Json(rows(&book.session))
}

/// GET / - render the form with the current view.
async fn show_form(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let book = state.lock();
    render(&state, &book.session, None)
}

/// POST / - apply one button press and re-render.
async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<FormInput>,
) -> Result<Html<String>, StatusCode> {
    debug!(action = ?input.action, selected = ?input.selected, "form submitted");
    let mut guard = state.lock();
    let book = &mut *guard;

    let mut notice = None;
    for event in input.events() {
        let outcome = dispatch(&mut book.session, &book.file, event).map_err(|err| {
            error!(error = %format!("{err:#}"), "action failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        if let Some(raised) = outcome.notices.into_iter().next() {
            notice = Some(raised);
            break;
        }
    }

    // Inputs keep what the user typed, whatever the action.
    book.session.search = input.search;
    book.session.form = ContactFields::new(input.name, input.phone, input.email);
    render(&state, &book.session, notice.as_ref())
}

fn render(
    state: &AppState,
    session: &Session,
    notice: Option<&Notice>,
) -> Result<Html<String>, StatusCode> {
    let template = state.templates().get_template("index.html").map_err(|err| {
        error!(error = %err, "template missing");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let html = template
        .render(context! {
            title => TITLE,
            form => &session.form,
            search => &session.search,
            rows => rows(session),
            notice => notice,
        })
        .map_err(|err| {
            error!(error = %err, "render failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contactbook::dispatch::open_session;
    use contactbook::io::codec::FileFormat;
    use contactbook::test_support::{TempBook, sample_contacts};

    fn state_for(book: &TempBook) -> AppState {
        let (session, file) = open_session(&book.config).expect("open");
        AppState::new(session, file).expect("state")
    }

    fn input(action: Action) -> FormInput {
        FormInput {
            action: Some(action),
            ..FormInput::default()
        }
    }

    async fn post(state: &AppState, input: FormInput) -> String {
        let Html(body) = submit_form(State(state.clone()), Form(input))
            .await
            .expect("submit");
        body
    }

    #[tokio::test]
    async fn form_lists_every_contact() {
        let book = TempBook::with_contacts(FileFormat::Json, &sample_contacts()).expect("book");
        let state = state_for(&book);

        let Html(body) = show_form(State(state.clone())).await.expect("render");

        assert!(body.contains("<title>Contact Book</title>"));
        assert!(body.contains("Alice - 555-1111 - a@x.com"));
        assert!(body.contains("Carol - 020-3333 - c@x.com"));
        assert!(!body.contains("<dialog"));
    }

    #[tokio::test]
    async fn add_with_empty_field_renders_input_error() {
        let book = TempBook::new(FileFormat::Csv).expect("book");
        let state = state_for(&book);

        let body = post(
            &state,
            FormInput {
                name: "Alice".to_string(),
                ..input(Action::Add)
            },
        )
        .await;

        assert!(body.contains("Input Error"));
        assert!(body.contains("All fields must be filled!"));
        assert!(state.lock().session.book.is_empty());
        assert!(!book.path().exists());
    }

    #[tokio::test]
    async fn delete_without_selection_renders_selection_error() {
        let book = TempBook::with_contacts(FileFormat::Json, &sample_contacts()).expect("book");
        let state = state_for(&book);

        let body = post(&state, input(Action::Delete)).await;

        assert!(body.contains("Selection Error"));
        assert_eq!(state.lock().session.book.len(), 3);
    }

    #[tokio::test]
    async fn search_then_edit_selected_row() {
        let book = TempBook::with_contacts(FileFormat::Json, &sample_contacts()).expect("book");
        let state = state_for(&book);

        post(
            &state,
            FormInput {
                search: "BOB".to_string(),
                ..input(Action::Search)
            },
        )
        .await;
        let Json(view) = list_rows(State(state.clone())).await;
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].label, "Bob - 555-2222 - b@x.com");

        post(
            &state,
            FormInput {
                name: "Robert".to_string(),
                phone: "555-2222".to_string(),
                email: "r@x.com".to_string(),
                selected: Some(view[0].id),
                ..input(Action::Edit)
            },
        )
        .await;

        let on_disk = book.contacts().expect("contacts");
        assert_eq!(on_disk[0], sample_contacts()[0]);
        assert_eq!(on_disk[1].name, "Robert");
        assert_eq!(on_disk[2], sample_contacts()[2]);
        let Json(view) = list_rows(State(state.clone())).await;
        assert_eq!(view.len(), 3);
    }

    #[tokio::test]
    async fn stale_page_cannot_delete_a_different_contact() {
        let book = TempBook::with_contacts(FileFormat::Json, &sample_contacts()).expect("book");
        let state = state_for(&book);
        let search = |term: &str| FormInput {
            search: term.to_string(),
            ..input(Action::Search)
        };

        // First page shows only Bob; a second page then narrows to Carol.
        post(&state, search("bob")).await;
        let Json(first_page) = list_rows(State(state.clone())).await;
        post(&state, search("carol")).await;

        let body = post(
            &state,
            FormInput {
                selected: Some(first_page[0].id),
                ..input(Action::Delete)
            },
        )
        .await;

        assert!(body.contains("Selection Error"));
        assert_eq!(book.contacts().expect("contacts"), sample_contacts());
    }

    #[tokio::test]
    async fn rows_carry_contact_ids() {
        let book = TempBook::with_contacts(FileFormat::Json, &sample_contacts()).expect("book");
        let state = state_for(&book);
        let ids = state.lock().session.book.ids();

        let Html(body) = show_form(State(state.clone())).await.expect("render");

        assert!(body.contains(&format!("name=\"selected\" value=\"{}\"", ids[2].0)));
    }

    #[test]
    fn unselected_submission_clears_selection_before_action() {
        let events = input(Action::Delete).events();
        assert_eq!(events, vec![Event::ClearSelection, Event::Delete]);
    }
}
