use crate::prelude::*;
use indicatif::ProgressBar;
use serde::Serialize;
use toanki_core::anki::{
    add_note_request, add_notes_request, create_deck_request, create_model_request, Note, Request,
};

/// Thin client for the AnkiConnect add-on's JSON-over-HTTP API
///
/// Calls are not retried and response bodies are only logged; any transport
/// failure or non-success status aborts the caller.
#[derive(Debug, Clone)]
pub struct AnkiClient {
    client: reqwest::Client,
    host: String,
}

/// Helper to advance a progress bar if one is present
fn tick(progress: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(p) = progress {
        p.set_message(msg.into());
        p.inc(1);
    }
}

impl AnkiClient {
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// POST one action and return the raw response body
    async fn post<P: Serialize>(&self, request: &Request<P>) -> Result<String> {
        let remote_error = |reason: String| Error::RemoteCall {
            action: request.action.clone(),
            reason,
        };

        let response = self
            .client
            .post(&self.host)
            .json(request)
            .send()
            .await
            .map_err(|e| remote_error(format!("request to {} failed: {e}", self.host)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|e| {
            log::debug!("Failed to read AnkiConnect {} response body: {e}", request.action);
            String::new()
        });
        log::debug!("AnkiConnect {} [{}]: {}", request.action, status, body);

        if !status.is_success() {
            return Err(remote_error(format!("HTTP {status}: {body}")).into());
        }

        Ok(body)
    }

    pub async fn create_deck(&self, deck: &str) -> Result<()> {
        self.post(&create_deck_request(deck)).await?;
        Ok(())
    }

    /// Create every deck in order, stopping at the first failure
    pub async fn create_decks(&self, decks: &[String], progress: Option<&ProgressBar>) -> Result<()> {
        for deck in decks {
            tick(progress, f!("Creating deck {deck}"));
            self.create_deck(deck).await?;
        }
        Ok(())
    }

    /// Register the note template imported cards use
    pub async fn create_model(&self, model_name: &str) -> Result<()> {
        self.post(&create_model_request(model_name)).await?;
        Ok(())
    }

    pub async fn add_note(&self, note: Note) -> Result<()> {
        self.post(&add_note_request(note)).await?;
        Ok(())
    }

    /// Add all notes in a single batch request
    pub async fn add_notes(&self, notes: Vec<Note>) -> Result<()> {
        self.post(&add_notes_request(notes)).await?;
        Ok(())
    }
}
