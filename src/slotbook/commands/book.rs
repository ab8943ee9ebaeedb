use crate::error::{Result, SlotbookError};
use crate::model::{Appointment, BookingPolicy, ClientId, ProviderId};
use crate::registry::ClientRegistry;
use crate::schedule::Schedule;
use chrono::NaiveDate;

/// Claims `slot` from `provider` and records the appointment.
///
/// Checks run before any mutation, in order: client, booking policy,
/// provider, slot. Any failure leaves the schedule untouched. The claim
/// happens before the record so a failed claim never produces a ledger entry.
pub fn run(
    schedule: &mut Schedule,
    clients: &ClientRegistry,
    policy: BookingPolicy,
    client: ClientId,
    provider: ProviderId,
    slot: &str,
    date: NaiveDate,
) -> Result<Appointment> {
    clients.lookup(client)?;

    if policy == BookingPolicy::Single && schedule.ledger.find_active_by_client(client).is_some() {
        return Err(SlotbookError::ClientAlreadyBooked(client));
    }

    schedule.providers.claim_slot(provider, slot)?;

    let appointment = Appointment::new(client, provider, slot.to_string(), date);
    schedule.ledger.record(appointment.clone());
    Ok(appointment)
}
