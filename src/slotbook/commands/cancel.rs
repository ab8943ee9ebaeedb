use crate::error::{Result, SlotbookError};
use crate::model::{Appointment, ClientId};
use crate::schedule::Schedule;

/// Cancels the client's first active appointment at `slot`.
pub fn run(schedule: &mut Schedule, client: ClientId, slot: &str) -> Result<Appointment> {
    let appointment = schedule.ledger.remove_active(client, slot)?;
    release(schedule, &appointment)?;
    Ok(appointment)
}

/// Cancels the client's oldest active appointment, whatever its slot.
pub fn current(schedule: &mut Schedule, client: ClientId) -> Result<Appointment> {
    let appointment = schedule.ledger.remove_first_active(client)?;
    release(schedule, &appointment)?;
    Ok(appointment)
}

// The ledger entry is already retired at this point, so the slot goes back
// exactly once per cancelled claim.
fn release(schedule: &mut Schedule, appointment: &Appointment) -> Result<()> {
    match schedule
        .providers
        .release_slot(appointment.provider_id, &appointment.slot)
    {
        Ok(()) => Ok(()),
        Err(SlotbookError::ProviderNotFound(id)) => {
            tracing::warn!(provider = %id, slot = %appointment.slot, "released slot for unknown provider");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::book;
    use crate::model::{today, BookingPolicy, ProviderId, Role};
    use crate::registry::ClientRegistry;

    fn booked() -> (Schedule, ClientId, ProviderId) {
        let mut schedule = Schedule::new();
        let mut clients = ClientRegistry::new();
        let alex = schedule.providers.register(
            "Alex",
            vec!["10:00".into(), "11:00".into(), "12:00".into()],
        )
        .unwrap();
        let pete = clients.register("Pete", Role::Customer);
        book::run(
            &mut schedule,
            &clients,
            BookingPolicy::Multiple,
            pete,
            alex,
            "10:00",
            today(),
        )
        .unwrap();
        (schedule, pete, alex)
    }

    #[test]
    fn cancel_restores_slot_at_end() {
        let (mut schedule, pete, alex) = booked();
        let appt = run(&mut schedule, pete, "10:00").unwrap();

        assert_eq!(appt.slot, "10:00");
        assert_eq!(
            schedule.providers.list_slots(alex).unwrap(),
            vec!["11:00", "12:00", "10:00"]
        );
        assert_eq!(schedule.ledger.history_for_client(pete), vec![appt]);
        assert!(schedule.ledger.find_active_by_client(pete).is_none());
    }

    #[test]
    fn cancel_missing_pair_leaves_inventory() {
        let (mut schedule, pete, alex) = booked();
        let result = run(&mut schedule, pete, "11:00");
        assert!(matches!(
            result,
            Err(SlotbookError::AppointmentNotFound { .. })
        ));
        assert_eq!(
            schedule.providers.list_slots(alex).unwrap(),
            vec!["11:00", "12:00"]
        );
        assert_eq!(schedule.ledger.history_len(), 0);
    }

    #[test]
    fn second_cancel_does_not_duplicate_slot() {
        let (mut schedule, pete, alex) = booked();
        run(&mut schedule, pete, "10:00").unwrap();
        assert!(run(&mut schedule, pete, "10:00").is_err());
        let slots = schedule.providers.list_slots(alex).unwrap();
        assert_eq!(slots.iter().filter(|s| *s == "10:00").count(), 1);
    }

    #[test]
    fn cancel_current_takes_oldest() {
        let (mut schedule, pete, _) = booked();
        let appt = current(&mut schedule, pete).unwrap();
        assert_eq!(appt.slot, "10:00");
        assert!(matches!(
            current(&mut schedule, pete),
            Err(SlotbookError::AppointmentNotFound { slot: None, .. })
        ));
    }
}
