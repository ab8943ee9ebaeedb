use crate::error::{Result, SlotbookError};
use crate::model::{Client, ClientId, Role};
use std::collections::HashMap;

/// Client identity records. Entries are immutable once registered.
#[derive(Debug)]
pub struct ClientRegistry {
    clients: HashMap<ClientId, Client>,
    next_id: u64,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self {
            clients: HashMap::new(),
            next_id: 1,
        }
    }
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, role: Role) -> ClientId {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        self.clients.insert(
            id,
            Client {
                id,
                name: name.into(),
                role,
            },
        );
        id
    }

    pub fn lookup(&self, id: ClientId) -> Result<&Client> {
        self.clients.get(&id).ok_or(SlotbookError::ClientNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
