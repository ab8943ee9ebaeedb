use crate::error::Result;
use crate::model::{Appointment, ClientId, Provider, ProviderId};
use crate::schedule::Schedule;
use serde::Serialize;

/// A provider's free and booked slots, read together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub provider: Provider,
    pub booked: Vec<Appointment>,
}

impl Availability {
    pub fn free(&self) -> &[String] {
        &self.provider.slots
    }
}

pub fn current_appointment(schedule: &Schedule, client: ClientId) -> Option<Appointment> {
    schedule.ledger.find_active_by_client(client).cloned()
}

pub fn active_appointments(schedule: &Schedule, client: ClientId) -> Vec<Appointment> {
    schedule.ledger.active_for_client(client)
}

pub fn history(schedule: &Schedule, client: ClientId) -> Vec<Appointment> {
    schedule.ledger.history_for_client(client)
}

pub fn list_slots(schedule: &Schedule, provider: ProviderId) -> Result<Vec<String>> {
    schedule.providers.list_slots(provider)
}

pub fn list_providers(schedule: &Schedule) -> Vec<Provider> {
    schedule.providers.list()
}

pub fn get_provider(schedule: &Schedule, provider: ProviderId) -> Result<Provider> {
    schedule.providers.get(provider).cloned()
}

/// Booked appointments at `provider`, oldest first.
pub fn provider_bookings(schedule: &Schedule, provider: ProviderId) -> Result<Vec<Appointment>> {
    schedule.providers.get(provider)?;
    Ok(schedule.ledger.active_for_provider(provider))
}

pub fn availability(schedule: &Schedule, provider: ProviderId) -> Result<Availability> {
    Ok(Availability {
        provider: schedule.providers.get(provider)?.clone(),
        booked: schedule.ledger.active_for_provider(provider),
    })
}
