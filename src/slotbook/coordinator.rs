//! # Booking Coordinator
//!
//! The coordinator is the **single entry point** for booking operations, for
//! every front end (menu CLI, JSON-lines API, tests). It owns no business
//! logic of its own: each method takes the locks it needs and dispatches to
//! the matching function in [`crate::commands`].
//!
//! ## Locking
//!
//! State is split across two `parking_lot::RwLock`s:
//!
//! - `clients`: the [`ClientRegistry`]
//! - `schedule`: the [`Schedule`] (slot inventory + appointment ledger)
//!
//! Inventory and ledger share one lock, so a claim and its ledger record (or
//! a ledger removal and its release) commit together. Readers take the
//! schedule read lock and therefore never see one half without the other.
//!
//! When both locks are needed they are taken in the order **clients, then
//! schedule**. No code path takes them the other way round.
//!
//! ## Sharing
//!
//! `BookingCoordinator` is `Send + Sync`. Wrap it in an `Arc` to hand it to
//! several threads.

use crate::commands::query::Availability;
use crate::commands::{book, cancel, query, register};
use crate::config::SlotbookConfig;
use crate::error::Result;
use crate::model::{
    today, Appointment, BookingPolicy, Client, ClientId, Provider, ProviderId, Role,
};
use crate::registry::ClientRegistry;
use crate::schedule::Schedule;
use chrono::NaiveDate;
use parking_lot::RwLock;

#[derive(Debug)]
pub struct BookingCoordinator {
    clients: RwLock<ClientRegistry>,
    schedule: RwLock<Schedule>,
    policy: BookingPolicy,
    default_slots: Vec<String>,
}

impl Default for BookingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingCoordinator {
    pub fn new() -> Self {
        Self::with_policy(BookingPolicy::default())
    }

    pub fn with_policy(policy: BookingPolicy) -> Self {
        Self {
            clients: RwLock::new(ClientRegistry::new()),
            schedule: RwLock::new(Schedule::new()),
            policy,
            default_slots: SlotbookConfig::default().default_slots,
        }
    }

    /// Builds a coordinator from config and registers its seed providers.
    pub fn from_config(config: &SlotbookConfig) -> Result<Self> {
        let coordinator = Self {
            clients: RwLock::new(ClientRegistry::new()),
            schedule: RwLock::new(Schedule::new()),
            policy: config.booking_policy,
            default_slots: config.default_slots.clone(),
        };
        for seed in &config.seed_providers {
            coordinator.register_provider(&seed.name, config.slots_for(seed))?;
        }
        Ok(coordinator)
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// Fails with `Input` when `slots` holds an empty or repeated label.
    pub fn register_provider(&self, name: &str, slots: Vec<String>) -> Result<ProviderId> {
        let result = register::provider(&mut self.schedule.write(), name, slots);
        match &result {
            Ok(id) => tracing::info!(provider = %id, name, "registered provider"),
            Err(e) => tracing::debug!(name, kind = e.kind(), "rejected provider: {}", e),
        }
        result
    }

    pub fn register_provider_with_defaults(&self, name: &str) -> Result<ProviderId> {
        self.register_provider(name, self.default_slots.clone())
    }

    pub fn register_client(&self, name: &str, role: Role) -> ClientId {
        let id = register::client(&mut self.clients.write(), name, role);
        tracing::info!(client = %id, name, %role, "registered client");
        id
    }

    pub fn lookup_client(&self, id: ClientId) -> Result<Client> {
        self.clients.read().lookup(id).cloned()
    }

    /// Books `slot` at `provider` for `client`, dated today.
    pub fn book(&self, client: ClientId, provider: ProviderId, slot: &str) -> Result<Appointment> {
        self.book_on(client, provider, slot, today())
    }

    pub fn book_on(
        &self,
        client: ClientId,
        provider: ProviderId,
        slot: &str,
        date: NaiveDate,
    ) -> Result<Appointment> {
        let clients = self.clients.read();
        let mut schedule = self.schedule.write();
        let result = book::run(
            &mut schedule,
            &clients,
            self.policy,
            client,
            provider,
            slot,
            date,
        );
        log_outcome("book", client, slot, &result);
        result
    }

    /// Cancels the client's appointment at `slot` and returns the slot to
    /// its provider.
    pub fn cancel(&self, client: ClientId, slot: &str) -> Result<Appointment> {
        let result = cancel::run(&mut self.schedule.write(), client, slot);
        log_outcome("cancel", client, slot, &result);
        result
    }

    /// Cancels the client's current (oldest active) appointment.
    pub fn cancel_current(&self, client: ClientId) -> Result<Appointment> {
        let result = cancel::current(&mut self.schedule.write(), client);
        log_outcome("cancel", client, "<current>", &result);
        result
    }

    pub fn current_appointment(&self, client: ClientId) -> Option<Appointment> {
        query::current_appointment(&self.schedule.read(), client)
    }

    pub fn active_appointments(&self, client: ClientId) -> Vec<Appointment> {
        query::active_appointments(&self.schedule.read(), client)
    }

    pub fn history(&self, client: ClientId) -> Vec<Appointment> {
        query::history(&self.schedule.read(), client)
    }

    pub fn list_slots(&self, provider: ProviderId) -> Result<Vec<String>> {
        query::list_slots(&self.schedule.read(), provider)
    }

    pub fn list_providers(&self) -> Vec<Provider> {
        query::list_providers(&self.schedule.read())
    }

    pub fn get_provider(&self, provider: ProviderId) -> Result<Provider> {
        query::get_provider(&self.schedule.read(), provider)
    }

    pub fn provider_bookings(&self, provider: ProviderId) -> Result<Vec<Appointment>> {
        query::provider_bookings(&self.schedule.read(), provider)
    }

    /// Free and booked slots of `provider` from a single read.
    pub fn availability(&self, provider: ProviderId) -> Result<Availability> {
        query::availability(&self.schedule.read(), provider)
    }

    /// Slots that are booked and free at the same time. Always empty while
    /// every booking goes through this coordinator.
    pub fn audit(&self) -> Vec<String> {
        self.schedule.read().inconsistencies()
    }
}

fn log_outcome(op: &str, client: ClientId, slot: &str, result: &Result<Appointment>) {
    match result {
        Ok(appt) => tracing::info!(
            op,
            client = %client,
            provider = %appt.provider_id,
            slot = %appt.slot,
            appointment = %appt.id,
            "ok"
        ),
        Err(e) if e.is_domain() => {
            tracing::debug!(op, client = %client, slot, kind = e.kind(), "rejected: {}", e)
        }
        Err(e) => tracing::error!(op, client = %client, slot, "failed: {}", e),
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Provider "Alex" with 10:00, 11:00, 12:00 and customer "Pete".
    pub struct BookingFixture {
        pub coordinator: BookingCoordinator,
        pub alex: ProviderId,
        pub pete: ClientId,
    }

    impl Default for BookingFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BookingFixture {
        pub fn new() -> Self {
            Self::with_policy(BookingPolicy::Multiple)
        }

        pub fn with_policy(policy: BookingPolicy) -> Self {
            let coordinator = BookingCoordinator::with_policy(policy);
            let alex = coordinator
                .register_provider_with_defaults("Alex")
                .expect("default slots are valid");
            let pete = coordinator.register_client("Pete", Role::Customer);
            Self {
                coordinator,
                alex,
                pete,
            }
        }

        pub fn with_clients(self, count: usize) -> (Self, Vec<ClientId>) {
            let ids = (0..count)
                .map(|i| {
                    self.coordinator
                        .register_client(&format!("Client {}", i + 1), Role::Customer)
                })
                .collect();
            (self, ids)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::BookingFixture;
    use super::*;
    use crate::config::SeedProvider;
    use crate::error::SlotbookError;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn alex_and_pete_scenario() {
        let f = BookingFixture::new();
        f.coordinator.book(f.pete, f.alex, "10:00").unwrap();
        assert_eq!(
            f.coordinator.list_slots(f.alex).unwrap(),
            vec!["11:00", "12:00"]
        );

        f.coordinator.cancel(f.pete, "10:00").unwrap();
        assert_eq!(
            f.coordinator.list_slots(f.alex).unwrap(),
            vec!["11:00", "12:00", "10:00"]
        );
    }

    #[test]
    fn book_cancel_book_round_trip() {
        let f = BookingFixture::new();
        f.coordinator.book(f.pete, f.alex, "11:00").unwrap();
        f.coordinator.cancel(f.pete, "11:00").unwrap();
        let again = f.coordinator.book(f.pete, f.alex, "11:00").unwrap();
        assert_eq!(f.coordinator.current_appointment(f.pete), Some(again));
    }

    #[test]
    fn unknown_provider_is_reported() {
        let f = BookingFixture::new();
        let before = f.coordinator.list_slots(f.alex).unwrap();
        assert!(matches!(
            f.coordinator.book(f.pete, ProviderId(999), "10:00"),
            Err(SlotbookError::ProviderNotFound(ProviderId(999)))
        ));
        assert_eq!(f.coordinator.list_slots(f.alex).unwrap(), before);
        assert!(f.coordinator.current_appointment(f.pete).is_none());
    }

    #[test]
    fn unknown_client_is_reported() {
        let f = BookingFixture::new();
        assert!(matches!(
            f.coordinator.book(ClientId(77), f.alex, "10:00"),
            Err(SlotbookError::ClientNotFound(ClientId(77)))
        ));
        assert_eq!(f.coordinator.list_slots(f.alex).unwrap().len(), 3);
    }

    #[test]
    fn cancel_without_booking_changes_nothing() {
        let f = BookingFixture::new();
        assert!(matches!(
            f.coordinator.cancel(f.pete, "10:00"),
            Err(SlotbookError::AppointmentNotFound { .. })
        ));
        assert_eq!(
            f.coordinator.list_slots(f.alex).unwrap(),
            vec!["10:00", "11:00", "12:00"]
        );
        assert!(f.coordinator.history(f.pete).is_empty());
    }

    #[test]
    fn history_counts_successful_cancellations() {
        let f = BookingFixture::new();
        let mut last_len = 0;
        for slot in ["10:00", "11:00", "10:00"] {
            f.coordinator.book(f.pete, f.alex, slot).unwrap();
            f.coordinator.cancel(f.pete, slot).unwrap();
            let _ = f.coordinator.cancel(f.pete, slot);
            let len = f.coordinator.history(f.pete).len();
            assert!(len > last_len);
            last_len = len;
        }
        assert_eq!(last_len, 3);
    }

    #[test]
    fn single_policy_blocks_second_booking() {
        let f = BookingFixture::with_policy(BookingPolicy::Single);
        f.coordinator.book(f.pete, f.alex, "10:00").unwrap();
        assert!(matches!(
            f.coordinator.book(f.pete, f.alex, "11:00"),
            Err(SlotbookError::ClientAlreadyBooked(_))
        ));
        f.coordinator.cancel_current(f.pete).unwrap();
        f.coordinator.book(f.pete, f.alex, "11:00").unwrap();
    }

    #[test]
    fn from_config_registers_seeds() {
        let config = SlotbookConfig {
            default_slots: vec!["09:00".into()],
            booking_policy: BookingPolicy::Single,
            seed_providers: vec![
                SeedProvider {
                    name: "Alex".into(),
                    slots: None,
                },
                SeedProvider {
                    name: "Sam".into(),
                    slots: Some(vec!["14:00".into(), "15:00".into()]),
                },
            ],
        };
        let coordinator = BookingCoordinator::from_config(&config).unwrap();
        assert_eq!(coordinator.policy(), BookingPolicy::Single);

        let providers = coordinator.list_providers();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].slots, vec!["09:00"]);
        assert_eq!(providers[1].slots, vec!["14:00", "15:00"]);
        assert_eq!(
            coordinator
                .list_slots(coordinator.register_provider_with_defaults("Kim").unwrap())
                .unwrap(),
            vec!["09:00"]
        );
    }

    #[test]
    fn repeated_slot_label_is_refused() {
        let coordinator = BookingCoordinator::new();
        assert!(matches!(
            coordinator.register_provider("Dup", vec!["10:00".into(), "10:00".into()]),
            Err(SlotbookError::Input(_))
        ));
        assert!(coordinator.list_providers().is_empty());
        assert_eq!(
            coordinator.register_provider("Dup", vec!["10:00".into()]).unwrap(),
            ProviderId(1)
        );
    }

    #[test]
    fn from_config_rejects_repeated_seed_slots() {
        let config = SlotbookConfig {
            seed_providers: vec![SeedProvider {
                name: "Dup".into(),
                slots: Some(vec!["10:00".into(), "10:00".into()]),
            }],
            ..SlotbookConfig::default()
        };
        assert!(matches!(
            BookingCoordinator::from_config(&config),
            Err(SlotbookError::Input(_))
        ));
    }

    #[test]
    fn concurrent_bookings_of_last_slot_yield_one_winner() {
        let (f, clients) = BookingFixture::new().with_clients(16);
        let alex = f.alex;
        f.coordinator.book(f.pete, alex, "10:00").unwrap();
        f.coordinator.book(f.pete, alex, "11:00").unwrap();
        assert_eq!(f.coordinator.list_slots(alex).unwrap(), vec!["12:00"]);

        let coordinator = Arc::new(f.coordinator);
        let barrier = Arc::new(Barrier::new(clients.len()));

        let handles: Vec<_> = clients
            .iter()
            .map(|&client| {
                let coordinator = Arc::clone(&coordinator);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    coordinator.book(client, alex, "12:00")
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(SlotbookError::SlotNotFound { .. }))));
        let bookings = coordinator.provider_bookings(alex).unwrap();
        assert_eq!(bookings.len(), 3);
        assert_eq!(bookings.iter().filter(|a| a.slot == "12:00").count(), 1);
        assert!(coordinator.list_slots(alex).unwrap().is_empty());
        assert!(coordinator.audit().is_empty());
    }

    #[test]
    fn readers_never_see_half_committed_state() {
        let (f, clients) = BookingFixture::new().with_clients(4);
        let coordinator = f.coordinator;
        let alex = f.alex;

        thread::scope(|s| {
            for &client in &clients {
                let coordinator = &coordinator;
                s.spawn(move || {
                    for _ in 0..200 {
                        for slot in ["10:00", "11:00", "12:00"] {
                            if coordinator.book(client, alex, slot).is_ok() {
                                coordinator.cancel(client, slot).unwrap();
                            }
                        }
                    }
                });
            }

            s.spawn(|| {
                for _ in 0..500 {
                    let view = coordinator.availability(alex).unwrap();
                    assert_eq!(view.free().len() + view.booked.len(), 3);
                    assert!(coordinator.audit().is_empty());
                }
            });
        });

        let mut slots = coordinator.list_slots(alex).unwrap();
        slots.sort();
        assert_eq!(slots, vec!["10:00", "11:00", "12:00"]);
        assert!(coordinator.provider_bookings(alex).unwrap().is_empty());
    }
}
