//! Synchronous multicast notification between a sender and its receivers.
//!
//! An [`EventChannel`] is embedded in whatever owns the event (a widget, a
//! controller) and triggered with the owner and a payload. Receivers
//! subscribe with a closure and get back a [`SubscriptionId`] they later use
//! to unsubscribe.

pub mod channel;
pub mod subscription;

pub use channel::{EventChannel, Handler};
pub use subscription::SubscriptionId;
