//! # Appointment Ledger
//!
//! The authoritative record of bookings. It holds two collections:
//!
//! - **active**: current claims, in booking order. Lookups scan this in
//!   insertion order, so "first match" always means "oldest booking".
//! - **history**: cancelled appointments, append-only.
//!
//! An appointment moves from active to history exactly once, when one of the
//! `remove_*` methods retires it. Nothing moves it back.
//!
//! A `(provider, slot) -> appointment` index sits beside the active list so a
//! double claim is detectable without a scan. It is updated on every insert
//! and removal.
//!
//! The ledger never checks inventory. Callers (the command layer) are
//! responsible for only recording appointments whose slot they just claimed.

use crate::error::{Result, SlotbookError};
use crate::model::{Appointment, AppointmentId, ClientId, ProviderId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AppointmentLedger {
    active: Vec<Appointment>,
    history: Vec<Appointment>,
    claimed: HashMap<(ProviderId, String), AppointmentId>,
}

impl AppointmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, appointment: Appointment) -> AppointmentId {
        let id = appointment.id;
        let previous = self
            .claimed
            .insert((appointment.provider_id, appointment.slot.clone()), id);
        debug_assert!(
            previous.is_none(),
            "slot {} at provider {} recorded twice",
            appointment.slot,
            appointment.provider_id
        );
        self.active.push(appointment);
        id
    }

    /// Moves the first active appointment of `client` at `slot` to history.
    pub fn remove_active(&mut self, client: ClientId, slot: &str) -> Result<Appointment> {
        let pos = self
            .active
            .iter()
            .position(|a| a.client_id == client && a.slot == slot)
            .ok_or_else(|| SlotbookError::AppointmentNotFound {
                client,
                slot: Some(slot.to_string()),
            })?;
        Ok(self.retire(pos))
    }

    /// Moves the first active appointment of `client` to history.
    pub fn remove_first_active(&mut self, client: ClientId) -> Result<Appointment> {
        let pos = self
            .active
            .iter()
            .position(|a| a.client_id == client)
            .ok_or(SlotbookError::AppointmentNotFound { client, slot: None })?;
        Ok(self.retire(pos))
    }

    fn retire(&mut self, pos: usize) -> Appointment {
        let appointment = self.active.remove(pos);
        let removed = self
            .claimed
            .remove(&(appointment.provider_id, appointment.slot.clone()));
        debug_assert_eq!(removed, Some(appointment.id), "claim index out of sync");
        self.history.push(appointment.clone());
        appointment
    }

    pub fn find_active_by_client(&self, client: ClientId) -> Option<&Appointment> {
        self.active.iter().find(|a| a.client_id == client)
    }

    pub fn active_for_client(&self, client: ClientId) -> Vec<Appointment> {
        self.active
            .iter()
            .filter(|a| a.client_id == client)
            .cloned()
            .collect()
    }

    pub fn active_for_provider(&self, provider: ProviderId) -> Vec<Appointment> {
        self.active
            .iter()
            .filter(|a| a.provider_id == provider)
            .cloned()
            .collect()
    }

    pub fn history_for_client(&self, client: ClientId) -> Vec<Appointment> {
        self.history
            .iter()
            .filter(|a| a.client_id == client)
            .cloned()
            .collect()
    }

    /// True while an active appointment holds `slot` at `provider`.
    pub fn is_claimed(&self, provider: ProviderId, slot: &str) -> bool {
        self.claimed.contains_key(&(provider, slot.to_string()))
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
