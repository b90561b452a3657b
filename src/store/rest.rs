//! Hosted note store over the PostgREST HTTP dialect.

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::{NoteStore, Session, StoreError};
use crate::components::mind_map::{Note, NoteId};

/// Client for the `notes` table of a hosted PostgREST endpoint.
#[derive(Clone, Debug)]
pub struct RestNoteStore {
	client: Client,
	base_url: String,
	api_key: String,
}

#[derive(Deserialize)]
struct LinkedNotesRow {
	linked_notes: Option<Vec<NoteId>>,
}

#[derive(Serialize)]
struct LinkedNotesPatch<'a> {
	linked_notes: &'a [NoteId],
	updated_at: DateTime<Utc>,
}

impl RestNoteStore {
	/// Client for the store at `base_url`.
	pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
		Self {
			client: Client::new(),
			base_url: base_url.into().trim_end_matches('/').to_string(),
			api_key: api_key.into(),
		}
	}

	fn notes_url(&self) -> String {
		format!("{}/rest/v1/notes", self.base_url)
	}

	fn request(&self, method: Method, session: &Session) -> RequestBuilder {
		let token = session.access_token.as_deref().unwrap_or(&self.api_key);
		self.client
			.request(method, self.notes_url())
			.header("apikey", &self.api_key)
			.bearer_auth(token)
	}

	async fn checked(response: Response) -> Result<String, StoreError> {
		let status = response.status();
		let body = response.text().await?;
		if !status.is_success() {
			return Err(StoreError::Status {
				status: status.as_u16(),
				body,
			});
		}
		Ok(body)
	}
}

impl NoteStore for RestNoteStore {
	async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, StoreError> {
		let response = self
			.request(Method::GET, session)
			.query(&[
				("user_id", format!("eq.{}", session.user_id)),
				("order", "created_at.desc".to_string()),
				("select", "*".to_string()),
			])
			.send()
			.await?;
		let body = Self::checked(response).await?;
		let notes: Vec<Note> = serde_json::from_str(&body)?;
		debug!("mindmap: fetched {} notes", notes.len());
		Ok(notes)
	}

	async fn linked_notes(&self, session: &Session, note: &str) -> Result<Vec<NoteId>, StoreError> {
		let response = self
			.request(Method::GET, session)
			.query(&[
				("id", format!("eq.{note}")),
				("select", "linked_notes".to_string()),
			])
			.send()
			.await?;
		let body = Self::checked(response).await?;
		let rows: Vec<LinkedNotesRow> = serde_json::from_str(&body)?;
		rows.into_iter()
			.next()
			.map(|row| row.linked_notes.unwrap_or_default())
			.ok_or_else(|| StoreError::NotFound(note.to_string()))
	}

	async fn update_linked_notes(
		&self,
		session: &Session,
		note: &str,
		linked: &[NoteId],
		updated_at: DateTime<Utc>,
	) -> Result<(), StoreError> {
		let response = self
			.request(Method::PATCH, session)
			.query(&[("id", format!("eq.{note}"))])
			.header("Prefer", "return=minimal")
			.json(&LinkedNotesPatch {
				linked_notes: linked,
				updated_at,
			})
			.send()
			.await?;
		Self::checked(response).await?;
		Ok(())
	}
}
