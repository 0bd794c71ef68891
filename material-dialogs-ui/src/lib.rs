//! Headless composition runtime for material dialogs.
//!
//! Provides remembered state slots owned by dialog scopes, change
//! subscriptions, shared callback handles and the tracing setup used by the
//! demo application.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod color;
pub mod logging;
pub mod prop;
pub mod runtime;

pub use crate::{
    color::Color,
    prop::{Callback, CallbackWith},
    runtime::{Scope, ScopeId, State, StateError, Subscription, take_invalidated_scopes},
};
