use crate::model::{ClientId, ProviderId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotbookError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(ProviderId),

    #[error("Slot {slot} is not available at provider {provider}")]
    SlotNotFound { provider: ProviderId, slot: String },

    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    #[error("{}", appointment_not_found_message(.client, .slot))]
    AppointmentNotFound {
        client: ClientId,
        slot: Option<String>,
    },

    #[error("Client {0} already holds an active appointment")]
    ClientAlreadyBooked(ClientId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),
}

fn appointment_not_found_message(client: &ClientId, slot: &Option<String>) -> String {
    match slot {
        Some(slot) => format!("No active appointment for client {} at {}", client, slot),
        None => format!("No active appointment for client {}", client),
    }
}

impl SlotbookError {
    /// True for booking outcomes a caller is expected to handle (bad ids,
    /// taken slots). False for environment failures.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            SlotbookError::ProviderNotFound(_)
                | SlotbookError::SlotNotFound { .. }
                | SlotbookError::ClientNotFound(_)
                | SlotbookError::AppointmentNotFound { .. }
                | SlotbookError::ClientAlreadyBooked(_)
        )
    }

    /// Stable machine-readable name used by the request/response API.
    pub fn kind(&self) -> &'static str {
        match self {
            SlotbookError::ProviderNotFound(_) => "provider_not_found",
            SlotbookError::SlotNotFound { .. } => "slot_not_found",
            SlotbookError::ClientNotFound(_) => "client_not_found",
            SlotbookError::AppointmentNotFound { .. } => "appointment_not_found",
            SlotbookError::ClientAlreadyBooked(_) => "client_already_booked",
            SlotbookError::Io(_) => "io",
            SlotbookError::Serialization(_) => "serialization",
            SlotbookError::Config(_) => "config",
            SlotbookError::Input(_) => "invalid_request",
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotbookError>;
