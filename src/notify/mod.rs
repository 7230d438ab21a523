//! Change-notification substrate shared by every chemical object.
//!
//! - [`ChangeEvent`] – immutable token naming the entity a change started from.
//! - [`ChangeListener`] – the single callback a subscriber implements.
//! - [`NotifyConfig`] – per-entity switches for delivery and the dispatch-depth guard.
//!
//! Each entity owns a lazily allocated notifier holding non-owning
//! registrations. Dispatch is synchronous, runs in registration order and
//! iterates a snapshot of the listener list, so listeners may subscribe,
//! unsubscribe or mutate the model while an event is being delivered.

mod config;
mod event;
mod notifier;

pub use config::{ConfigError, NotifyConfig};
pub use event::{ChangeEvent, ChangeListener};

pub(crate) use notifier::{dispatch, relay, Notifier};
