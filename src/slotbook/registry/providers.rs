use crate::error::{Result, SlotbookError};
use crate::model::{Provider, ProviderId};
use std::collections::{BTreeMap, HashSet};

/// Owns every provider and their free-slot inventory.
///
/// Ids come from a counter that starts at 1 and never goes backwards.
/// Slot order is insertion order; released slots go to the end. Labels are
/// unique within one provider, so a booked slot never also sits in inventory.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: BTreeMap<ProviderId, Provider>,
    next_id: u32,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self {
            providers: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects an empty or repeated label; no id is consumed on failure.
    pub fn register(&mut self, name: impl Into<String>, slots: Vec<String>) -> Result<ProviderId> {
        let name = name.into();
        if let Some(problem) = slot_label_problem(&slots) {
            return Err(SlotbookError::Input(format!("provider {} {}", name, problem)));
        }
        let id = ProviderId(self.next_id);
        self.next_id += 1;
        self.providers.insert(
            id,
            Provider {
                id,
                name,
                slots,
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: ProviderId) -> Result<&Provider> {
        self.providers
            .get(&id)
            .ok_or(SlotbookError::ProviderNotFound(id))
    }

    /// Removes the first inventory entry equal to `slot`.
    pub fn claim_slot(&mut self, id: ProviderId, slot: &str) -> Result<()> {
        let provider = self
            .providers
            .get_mut(&id)
            .ok_or(SlotbookError::ProviderNotFound(id))?;

        match provider.slots.iter().position(|s| s == slot) {
            Some(pos) => {
                provider.slots.remove(pos);
                Ok(())
            }
            None => Err(SlotbookError::SlotNotFound {
                provider: id,
                slot: slot.to_string(),
            }),
        }
    }

    /// Appends `slot` to the end of the inventory.
    ///
    /// Not idempotent: only release what a matching claim removed.
    pub fn release_slot(&mut self, id: ProviderId, slot: &str) -> Result<()> {
        let provider = self
            .providers
            .get_mut(&id)
            .ok_or(SlotbookError::ProviderNotFound(id))?;
        provider.slots.push(slot.to_string());
        Ok(())
    }

    pub fn list_slots(&self, id: ProviderId) -> Result<Vec<String>> {
        Ok(self.get(id)?.slots.clone())
    }

    /// Snapshot of all providers in id order.
    pub fn list(&self) -> Vec<Provider> {
        self.providers.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Describes the first empty or repeated label in `slots`, if any.
pub fn slot_label_problem(slots: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    for slot in slots {
        if slot.trim().is_empty() {
            return Some("has an empty slot label".to_string());
        }
        if !seen.insert(slot.as_str()) {
            return Some(format!("repeats slot {}", slot));
        }
    }
    None
}
