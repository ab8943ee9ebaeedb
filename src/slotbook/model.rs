//! Core data types: providers, clients and appointments.
//!
//! Identifiers are newtypes so a provider id can never be passed where a
//! client id is expected. Providers and clients get sequential ids starting
//! at 1; appointments get a random v4 UUID.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub u32);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub Uuid);

impl AppointmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone offering bookable time, together with their free slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    /// Free slot labels, in inventory order. Claimed slots are not listed.
    pub slots: Vec<String>,
}

/// Which menu a registered user sees. Has no effect on booking rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Operator => write!(f, "operator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// A claim binding one client to one (provider, slot) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub provider_id: ProviderId,
    pub slot: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(client_id: ClientId, provider_id: ProviderId, slot: String, date: NaiveDate) -> Self {
        Self {
            id: AppointmentId::new(),
            client_id,
            provider_id,
            slot,
            date,
            created_at: Utc::now(),
        }
    }

    /// Whether this appointment holds `slot` at `provider_id`.
    pub fn holds(&self, provider_id: ProviderId, slot: &str) -> bool {
        self.provider_id == provider_id && self.slot == slot
    }
}

/// Whether a client may hold more than one active appointment at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPolicy {
    #[default]
    Multiple,
    Single,
}

/// The calendar date stamped on new bookings.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
