//! # Slotbook Architecture
//!
//! Slotbook is an **in-memory appointment booking library**. Clients reserve
//! time slots with providers; the library guarantees a slot is never booked
//! twice, even when many callers book and cancel at the same time. The
//! binary's menu and JSON-lines front ends are thin clients of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front ends (binary cli/, service.rs)                       │
//! │  - Menu prompts, JSON request/response, exit codes          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Coordinator (coordinator.rs)                               │
//! │  - Thread-safe facade, owns the locks                       │
//! │  - One critical section per book/cancel transaction         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Validate, mutate, return typed results                   │
//! │  - No locks, no terminal                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State (registry/, ledger.rs, schedule.rs)                  │
//! │  - Provider inventory, client records, appointment ledger   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Appointment lifecycle
//!
//! A slot starts **available** in its provider's inventory. A successful
//! `book` removes it from inventory and records an active appointment.
//! `cancel` retires the appointment to history and appends the slot back to
//! the inventory. Cancelled appointments are never reactivated; rebooking the
//! same slot creates a new appointment.
//!
//! ## Module Overview
//!
//! - [`coordinator`]: The entry point for all operations
//! - [`commands`]: Booking transactions and queries
//! - [`registry`]: Provider inventory and client records
//! - [`ledger`]: Active and historical appointments
//! - [`schedule`]: Inventory + ledger under one roof
//! - [`service`]: Serde request/response dispatch
//! - [`model`]: Core data types
//! - [`config`]: Configuration file handling
//! - [`logging`]: tracing subscriber setup
//! - [`error`]: Error types

pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod registry;
pub mod schedule;
pub mod service;

pub use coordinator::BookingCoordinator;
pub use error::{Result, SlotbookError};
