//! Page-supplied configuration.
//!
//! The host page embeds a JSON document in
//! `<script id="mindmap-config" type="application/json">`. Without a `store`
//! section the app runs offline on the `notes` listed in the document.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::mind_map::{LayoutStrategy, Note};
use crate::store::{AppStore, MemoryNoteStore, RestNoteStore, Session};

/// Id of the script element holding the configuration.
pub const CONFIG_ELEMENT_ID: &str = "mindmap-config";

const OFFLINE_USER: &str = "local";

/// Why the page configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The script element is missing.
	#[error("configuration element #{0} not found")]
	Missing(&'static str),
	/// The element does not hold valid JSON.
	#[error("invalid configuration: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Connection details for the hosted note store.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoreConfig {
	/// Base URL of the store.
	pub url: String,
	/// Public API key sent with every request.
	pub api_key: String,
}

/// Settings read from the page at startup.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Owner of the notes.
	pub user_id: String,
	/// Bearer token for the hosted store.
	pub access_token: Option<String>,
	/// Hosted store. `None` runs offline on `notes`.
	pub store: Option<StoreConfig>,
	/// Initial layout.
	pub layout: LayoutStrategy,
	/// Theme name, see [`Theme::by_name`](crate::components::mind_map::Theme::by_name).
	pub theme: String,
	/// Seed notes for offline mode.
	pub notes: Vec<Note>,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			user_id: OFFLINE_USER.to_string(),
			access_token: None,
			store: None,
			layout: LayoutStrategy::default(),
			theme: "default".to_string(),
			notes: Vec::new(),
		}
	}
}

impl AppConfig {
	/// Parses a JSON configuration. Missing keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads the configuration from the current document.
	pub fn from_document() -> Result<Self, ConfigError> {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|s| s.text().ok())
			.ok_or(ConfigError::Missing(CONFIG_ELEMENT_ID))?;
		Self::from_json(&text)
	}

	/// Identity for store calls.
	pub fn session(&self) -> Session {
		Session {
			user_id: self.user_id.clone(),
			access_token: self.access_token.clone(),
		}
	}

	/// Builds the store this configuration points at.
	pub fn build_store(&self) -> AppStore {
		match &self.store {
			Some(store) => AppStore::Rest(RestNoteStore::new(&store.url, &store.api_key)),
			None => AppStore::Memory(MemoryNoteStore::new(&self.user_id, self.notes.clone())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_gives_offline_defaults() {
		let config = AppConfig::from_json("{}").unwrap();
		assert_eq!(config.user_id, OFFLINE_USER);
		assert_eq!(config.layout, LayoutStrategy::Radial);
		assert!(matches!(config.build_store(), AppStore::Memory(_)));
	}

	#[test]
	fn hosted_store_and_layout_are_read() {
		let config = AppConfig::from_json(
			r#"{
				"user_id": "8c1f",
				"access_token": "jwt",
				"store": { "url": "https://db.example.com", "api_key": "anon" },
				"layout": "tree"
			}"#,
		)
		.unwrap();
		assert_eq!(config.layout, LayoutStrategy::Tree);
		assert_eq!(config.session().access_token.as_deref(), Some("jwt"));
		assert!(matches!(config.build_store(), AppStore::Rest(_)));
	}

	#[test]
	fn malformed_document_is_an_error() {
		assert!(matches!(
			AppConfig::from_json("{\"user_id\": 42}"),
			Err(ConfigError::Parse(_))
		));
	}
}
