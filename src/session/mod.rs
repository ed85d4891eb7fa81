//! Session lifecycle: login, logout and token issuance over a record store.

pub mod context;
pub mod controller;

pub use context::TokenContext;
pub use controller::SessionController;

use strum::Display;

/// Observable state of a [`SessionController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}
