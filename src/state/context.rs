//! Application-wide state shared by the form
//!
//! Owns the current application, the API used to persist it and the resume
//! token store. Hydrates once on start-up. Save and submit requests run as
//! background tasks; their responses are applied here when they arrive.

use super::entities::Application;
use crate::api::{ApiError, QuoteApi, SaveResponse, SubmitResponse};
use crate::storage::{ResumeStore, StorageError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPhase {
    Initializing,
    Ready,
}

/// Confirmation shown to the user after a save or submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct ApplicationContext {
    api: Arc<dyn QuoteApi>,
    store: ResumeStore,
    application: Option<Application>,
    phase: ContextPhase,
}

impl ApplicationContext {
    pub fn new(api: Arc<dyn QuoteApi>, store: ResumeStore) -> Self {
        Self {
            api,
            store,
            application: None,
            phase: ContextPhase::Ready,
        }
    }

    pub fn application(&self) -> Option<&Application> {
        self.application.as_ref()
    }

    pub fn phase(&self) -> ContextPhase {
        self.phase
    }

    /// Handle to the API for requests spawned off the event loop
    pub fn api(&self) -> Arc<dyn QuoteApi> {
        Arc::clone(&self.api)
    }

    /// Load the application for a stored resume token, if there is one
    ///
    /// Failures are logged and leave no application loaded. Always ends ready.
    pub async fn hydrate(&mut self) {
        self.phase = ContextPhase::Initializing;
        match self.fetch_saved().await {
            Ok(Some(application)) => {
                tracing::info!(id = ?application.id, "Resumed saved application");
                self.application = Some(application);
            }
            Ok(None) => tracing::debug!("No resume token stored"),
            Err(ContextError::Api(e)) if e.is_not_found() => {
                tracing::warn!("Resume token is no longer known to the quote API")
            }
            Err(e) => tracing::warn!("Fetching saved application failed: {e}"),
        }
        self.phase = ContextPhase::Ready;
    }

    async fn fetch_saved(&self) -> Result<Option<Application>, ContextError> {
        let Some(token) = self.store.load()? else {
            return Ok(None);
        };
        let application = self.api.fetch_application(&token).await?;
        Ok(Some(application))
    }

    /// Apply a save response and remember its resume token
    ///
    /// The returned application is adopted even when the token cannot be
    /// written, so ids assigned by the API are never lost.
    pub fn finish_save(&mut self, response: SaveResponse) -> Result<Notice, ContextError> {
        self.application = Some(response.application);
        self.store.store(&response.resume)?;
        tracing::info!("Application saved");
        Ok(Notice::new("Saved", "Application saved!"))
    }

    /// Apply a submit response and report the quoted price
    pub fn finish_submit(&mut self, response: SubmitResponse) -> Result<Notice, ContextError> {
        let price = response.price_text();
        self.application = Some(response.application);
        self.store.clear()?;
        tracing::info!(%price, "Application submitted");
        Ok(Notice::new(
            "Quote",
            format!("Your quote price is {price}!"),
        ))
    }
}
