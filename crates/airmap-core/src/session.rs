// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::{AirportId, AirportRecord};
use crate::ingest::{Dataset, IngestError};
use log::{debug, info, warn};

/// UI-relevant state. Only [`Session`] mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// One-way: set by the first successful load, never cleared.
    pub uploaded: bool,
    pub selected_country: Option<String>,
    pub selected_airport: Option<AirportId>,
    pub hover_label: Option<String>,
    /// Last fatal ingestion error, shown next to the upload control.
    pub upload_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// A dataset is already loaded; re-upload is not supported.
    Ignored,
}

/// Owns the loaded dataset and the interaction state, and exposes one handler
/// per user action.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Dataset>,
    state: InteractionState,
    source: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Name of the file the dataset came from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn airport(&self, id: AirportId) -> Option<&AirportRecord> {
        self.dataset.as_ref().and_then(|d| d.get(id))
    }

    pub fn selected_airport(&self) -> Option<&AirportRecord> {
        self.state.selected_airport.and_then(|id| self.airport(id))
    }

    /// Completion of an ingestion attempt for the file named `source`.
    pub fn load(&mut self, source: &str, result: Result<Dataset, IngestError>) -> LoadOutcome {
        if self.state.uploaded {
            warn!(
                "Ignoring {}: a dataset is already loaded from {}",
                source,
                self.source.as_deref().unwrap_or("?")
            );
            return LoadOutcome::Ignored;
        }

        match result {
            Ok(dataset) => {
                info!(
                    "Loaded {} — airports={} countries={}",
                    source,
                    dataset.len(),
                    dataset.groups().len()
                );
                self.dataset = Some(dataset);
                self.source = Some(source.to_string());
                self.state.uploaded = true;
                self.state.upload_error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("Failed to load {}: {}", source, e);
                self.state.upload_error = Some(format!("Could not read {}: {}", source, e));
                LoadOutcome::Failed
            }
        }
    }

    pub fn select_country(&mut self, code: &str) {
        debug!("Selected country {}", code);
        self.state.selected_country = Some(code.to_string());
    }

    pub fn marker_entered(&mut self, id: AirportId) {
        if let Some(label) = self.airport(id).map(AirportRecord::hover_label) {
            self.state.hover_label = Some(label);
        }
    }

    pub fn marker_left(&mut self) {
        self.state.hover_label = None;
    }

    pub fn marker_clicked(&mut self, id: AirportId) {
        if self.airport(id).is_some() {
            self.state.selected_airport = Some(id);
        } else {
            debug!("Click on unknown airport id {}", id.0);
        }
    }

    pub fn dismiss_detail(&mut self) {
        self.state.selected_airport = None;
    }
}
