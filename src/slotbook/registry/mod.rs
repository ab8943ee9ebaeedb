//! # Registries
//!
//! Two independent registries own the identity records the booking layer
//! works against:
//!
//! - [`providers::ProviderRegistry`]: providers and their free-slot inventory.
//!   The only place slots are claimed or released.
//! - [`clients::ClientRegistry`]: client identities. Never touched by a
//!   booking transaction beyond a lookup.
//!
//! Neither registry locks anything. Concurrency is handled one level up in
//! [`crate::coordinator`].

pub mod clients;
pub mod providers;

pub use clients::ClientRegistry;
pub use providers::ProviderRegistry;
