//! # Request/Response API
//!
//! A transport-agnostic front end over [`BookingCoordinator`]. A [`Request`]
//! names one coordinator operation; [`handle`] runs it and wraps the outcome
//! in a [`Response`]. Both sides are plain serde types, so any transport that
//! can move JSON (the binary's `serve` loop reads one request per stdin line)
//! gets the full operation set.
//!
//! Request shape: `{"op": "book", "client": 1, "provider": 1, "slot": "10:00"}`.
//!
//! Response shape: `{"ok": true, "result": {"type": "appointment", "data": {..}}}`
//! or `{"ok": false, "error": {"kind": "slot_not_found", "message": ".."}}`.

use crate::commands::query::Availability;
use crate::coordinator::BookingCoordinator;
use crate::error::{Result, SlotbookError};
use crate::model::{Appointment, Client, ClientId, Provider, ProviderId, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    RegisterProvider {
        name: String,
        /// Uses the coordinator's default slots when omitted
        #[serde(default)]
        slots: Option<Vec<String>>,
    },
    RegisterClient {
        name: String,
        #[serde(default)]
        role: Role,
    },
    LookupClient {
        client: ClientId,
    },
    Book {
        client: ClientId,
        provider: ProviderId,
        slot: String,
    },
    /// Without a slot, cancels the client's current appointment
    Cancel {
        client: ClientId,
        #[serde(default)]
        slot: Option<String>,
    },
    CurrentAppointment {
        client: ClientId,
    },
    ActiveAppointments {
        client: ClientId,
    },
    History {
        client: ClientId,
    },
    ListSlots {
        provider: ProviderId,
    },
    ListProviders,
    ProviderBookings {
        provider: ProviderId,
    },
    Availability {
        provider: ProviderId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Reply {
    ProviderId(ProviderId),
    ClientId(ClientId),
    Client(Client),
    Appointment(Appointment),
    CurrentAppointment(Option<Appointment>),
    Appointments(Vec<Appointment>),
    Slots(Vec<String>),
    Providers(Vec<Provider>),
    Availability(Availability),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl From<&SlotbookError> for ErrorBody {
    fn from(err: &SlotbookError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn ok(reply: Reply) -> Self {
        Self {
            ok: true,
            result: Some(reply),
            error: None,
        }
    }

    pub fn error(err: &SlotbookError) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(err.into()),
        }
    }
}

impl From<Result<Reply>> for Response {
    fn from(result: Result<Reply>) -> Self {
        match result {
            Ok(reply) => Response::ok(reply),
            Err(e) => Response::error(&e),
        }
    }
}

pub fn handle(coordinator: &BookingCoordinator, request: Request) -> Response {
    dispatch(coordinator, request).into()
}

fn dispatch(coordinator: &BookingCoordinator, request: Request) -> Result<Reply> {
    match request {
        Request::RegisterProvider { name, slots } => {
            let registered = match slots {
                Some(slots) => coordinator.register_provider(&name, slots),
                None => coordinator.register_provider_with_defaults(&name),
            };
            registered.map(Reply::ProviderId)
        }
        Request::RegisterClient { name, role } => {
            Ok(Reply::ClientId(coordinator.register_client(&name, role)))
        }
        Request::LookupClient { client } => coordinator.lookup_client(client).map(Reply::Client),
        Request::Book {
            client,
            provider,
            slot,
        } => coordinator
            .book(client, provider, &slot)
            .map(Reply::Appointment),
        Request::Cancel { client, slot } => {
            let cancelled = match slot {
                Some(slot) => coordinator.cancel(client, &slot),
                None => coordinator.cancel_current(client),
            };
            cancelled.map(Reply::Appointment)
        }
        Request::CurrentAppointment { client } => Ok(Reply::CurrentAppointment(
            coordinator.current_appointment(client),
        )),
        Request::ActiveAppointments { client } => Ok(Reply::Appointments(
            coordinator.active_appointments(client),
        )),
        Request::History { client } => Ok(Reply::Appointments(coordinator.history(client))),
        Request::ListSlots { provider } => coordinator.list_slots(provider).map(Reply::Slots),
        Request::ListProviders => Ok(Reply::Providers(coordinator.list_providers())),
        Request::ProviderBookings { provider } => coordinator
            .provider_bookings(provider)
            .map(Reply::Appointments),
        Request::Availability { provider } => coordinator
            .availability(provider)
            .map(Reply::Availability),
    }
}

/// Parses one JSON request, runs it and returns the JSON response.
///
/// Malformed input becomes an `invalid_request` error response rather than an
/// `Err`; only response serialization can fail.
pub fn handle_line(coordinator: &BookingCoordinator, line: &str) -> Result<String> {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(coordinator, request),
        Err(e) => Response::error(&SlotbookError::Input(e.to_string())),
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::fixtures::BookingFixture;
    use serde_json::{json, Value};

    fn call(coordinator: &BookingCoordinator, request: Value) -> Value {
        let line = handle_line(coordinator, &request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn book_and_cancel_over_json() {
        let f = BookingFixture::new();
        let c = &f.coordinator;

        let booked = call(
            c,
            json!({"op": "book", "client": f.pete.0, "provider": f.alex.0, "slot": "10:00"}),
        );
        assert_eq!(booked["ok"], true);
        assert_eq!(booked["result"]["type"], "appointment");
        assert_eq!(booked["result"]["data"]["slot"], "10:00");

        let slots = call(c, json!({"op": "list_slots", "provider": f.alex.0}));
        assert_eq!(slots["result"]["data"], json!(["11:00", "12:00"]));

        let cancelled = call(c, json!({"op": "cancel", "client": f.pete.0, "slot": "10:00"}));
        assert_eq!(cancelled["ok"], true);

        let slots = call(c, json!({"op": "list_slots", "provider": f.alex.0}));
        assert_eq!(slots["result"]["data"], json!(["11:00", "12:00", "10:00"]));

        let history = call(c, json!({"op": "history", "client": f.pete.0}));
        assert_eq!(history["result"]["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn errors_carry_kind() {
        let f = BookingFixture::new();
        let response = call(
            &f.coordinator,
            json!({"op": "book", "client": f.pete.0, "provider": 999, "slot": "10:00"}),
        );
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["kind"], "provider_not_found");
        assert!(response.get("result").is_none());

        let response = call(&f.coordinator, json!({"op": "cancel", "client": f.pete.0}));
        assert_eq!(response["error"]["kind"], "appointment_not_found");
    }

    #[test]
    fn malformed_line_is_invalid_request() {
        let f = BookingFixture::new();
        let line = handle_line(&f.coordinator, "{\"op\": \"teleport\"}").unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["kind"], "invalid_request");

        let line = handle_line(&f.coordinator, "not json").unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["ok"], false);
    }

    #[test]
    fn register_provider_uses_defaults_when_slots_omitted() {
        let coordinator = BookingCoordinator::new();
        let response = handle(
            &coordinator,
            Request::RegisterProvider {
                name: "Sam".into(),
                slots: None,
            },
        );
        assert_eq!(response.result, Some(Reply::ProviderId(ProviderId(1))));
        assert_eq!(
            coordinator.list_slots(ProviderId(1)).unwrap(),
            vec!["10:00", "11:00", "12:00"]
        );
    }

    #[test]
    fn register_provider_refuses_repeated_slot() {
        let f = BookingFixture::new();
        let c = &f.coordinator;
        let response = call(
            c,
            json!({"op": "register_provider", "name": "Dup", "slots": ["10:00", "10:00"]}),
        );
        assert_eq!(response["ok"], false);
        assert_eq!(response["error"]["kind"], "invalid_request");
        assert_eq!(
            response["error"]["message"],
            "Invalid input: provider Dup repeats slot 10:00"
        );

        let providers = call(c, json!({"op": "list_providers"}));
        assert_eq!(providers["result"]["data"].as_array().unwrap().len(), 1);

        let booked = call(
            c,
            json!({"op": "book", "client": f.pete.0, "provider": 2, "slot": "10:00"}),
        );
        assert_eq!(booked["error"]["kind"], "provider_not_found");
        assert!(c.audit().is_empty());
    }

    #[test]
    fn current_appointment_is_null_when_none() {
        let f = BookingFixture::new();
        let response = call(
            &f.coordinator,
            json!({"op": "current_appointment", "client": f.pete.0}),
        );
        assert_eq!(response["ok"], true);
        assert!(response["result"]["data"].is_null());
    }

    #[test]
    fn register_client_defaults_to_customer() {
        let coordinator = BookingCoordinator::new();
        let response = call(&coordinator, json!({"op": "register_client", "name": "Ann"}));
        let id = response["result"]["data"].as_u64().unwrap();
        let client = coordinator.lookup_client(ClientId(id)).unwrap();
        assert_eq!(client.role, Role::Customer);
    }
}
