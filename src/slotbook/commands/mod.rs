//! # Commands
//!
//! Pure booking logic. Each submodule exposes plain functions over
//! [`Schedule`](crate::schedule::Schedule) and
//! [`ClientRegistry`](crate::registry::ClientRegistry) that validate, mutate
//! and return typed results.
//!
//! Nothing here locks, logs to a terminal or touches the clock beyond
//! stamping new appointments. Callers own the borrow for the whole call, which
//! is what makes each function a single transaction once the coordinator
//! wraps it in a lock.

pub mod book;
pub mod cancel;
pub mod query;
pub mod register;
