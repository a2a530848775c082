//! Per-provider output slots for one comparison

use comparator_application::OutcomeSink;
use comparator_domain::{CallOutcome, ProviderDescriptor, ProviderId};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// State of one provider's slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotState {
    Pending,
    Success { text: String },
    Failed { message: String },
}

/// One provider's output slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub provider_id: ProviderId,
    pub display_name: String,
    #[serde(flatten)]
    pub state: SlotState,
}

impl Slot {
    /// Text shown in the slot: the response, or `Error: <message>`
    pub fn body(&self) -> String {
        match &self.state {
            SlotState::Pending => "...".to_string(),
            SlotState::Success { text } => text.clone(),
            SlotState::Failed { message } => format!("Error: {message}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.state, SlotState::Success { .. })
    }
}

/// Collects outcomes into slots kept in dispatch order
///
/// Each slot is filled the moment its provider settles, regardless of how
/// the other providers are doing.
#[derive(Debug, Default)]
pub struct ComparisonBoard {
    slots: Mutex<Vec<Slot>>,
}

impl ComparisonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> Vec<Slot> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn pending(&self) -> usize {
        self.slots()
            .iter()
            .filter(|s| s.state == SlotState::Pending)
            .count()
    }
}

impl OutcomeSink for ComparisonBoard {
    fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        *slots = providers
            .iter()
            .map(|d| Slot {
                provider_id: d.id.clone(),
                display_name: d.display_name.clone(),
                state: SlotState::Pending,
            })
            .collect();
    }

    fn on_outcome(&self, outcome: &CallOutcome) {
        let state = match outcome.result() {
            Ok(text) => SlotState::Success { text: text.clone() },
            Err(error) => SlotState::Failed {
                message: error.to_string(),
            },
        };

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match slots.iter_mut().find(|s| &s.provider_id == outcome.provider_id()) {
            Some(slot) => slot.state = state,
            None => slots.push(Slot {
                provider_id: outcome.provider_id().clone(),
                display_name: outcome.provider_id().to_string(),
                state,
            }),
        }
    }
}
