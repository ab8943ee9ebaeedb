use crate::ledger::AppointmentLedger;
use crate::registry::ProviderRegistry;

/// The state a booking transaction touches: slot inventory plus the ledger.
///
/// Kept together so one lock can cover both halves of a claim/record or
/// remove/release pair.
#[derive(Debug, Default)]
pub struct Schedule {
    pub providers: ProviderRegistry,
    pub ledger: AppointmentLedger,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free slots the ledger also holds a claim on.
    pub fn inconsistencies(&self) -> Vec<String> {
        self.providers
            .list()
            .iter()
            .flat_map(|p| {
                p.slots
                    .iter()
                    .filter(|slot| self.ledger.is_claimed(p.id, slot))
                    .map(|slot| format!("slot {} at provider {} is both booked and free", slot, p.id))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{today, Appointment, ClientId};

    #[test]
    fn unclaimed_record_is_reported() {
        let mut schedule = Schedule::new();
        let alex = schedule
            .providers
            .register("Alex", vec!["10:00".into(), "11:00".into()])
            .unwrap();
        assert!(schedule.inconsistencies().is_empty());

        schedule.providers.claim_slot(alex, "10:00").unwrap();
        schedule
            .ledger
            .record(Appointment::new(ClientId(1), alex, "10:00".into(), today()));
        assert!(schedule.inconsistencies().is_empty());

        // Recorded without claiming first.
        schedule
            .ledger
            .record(Appointment::new(ClientId(2), alex, "11:00".into(), today()));
        assert_eq!(
            schedule.inconsistencies(),
            vec!["slot 11:00 at provider 1 is both booked and free"]
        );
    }
}
