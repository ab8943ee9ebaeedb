use crate::error::Result;
use crate::model::{ClientId, ProviderId, Role};
use crate::registry::ClientRegistry;
use crate::schedule::Schedule;

pub fn provider(schedule: &mut Schedule, name: &str, slots: Vec<String>) -> Result<ProviderId> {
    schedule.providers.register(name, slots)
}

pub fn client(clients: &mut ClientRegistry, name: &str, role: Role) -> ClientId {
    clients.register(name, role)
}
