//! Session gate and auth provider client for Edvise.
//!
//! "Session present" is the entire authorization model: there are no roles
//! and no permissions. [`SessionGate`] owns the current session, resolves the
//! initial `Unknown` state with one provider lookup, and broadcasts every
//! transition so protected views can redirect the moment a session dies.

mod client;
mod gate;

pub use client::{AuthClient, AuthUser, Session, SessionProvider};
pub use gate::{LoginMode, LoginOutcome, SessionGate, SessionState, SessionWatch};
