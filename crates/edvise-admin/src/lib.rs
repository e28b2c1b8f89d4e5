//! Admin workflow controller for Edvise.
//!
//! Two parallel CRUD workflows (colleges, partner logos) share one
//! notification slot and one session gate. The controller holds the full
//! record lists in memory and always re-fetches from the store after a
//! mutation rather than splicing the mutation response in locally, so the
//! displayed lists reflect server truth at the cost of an extra round trip.

mod filter;
mod notify;
mod workflow;

pub use filter::{filter_colleges, filter_logos};
pub use notify::{Notification, NotificationKind, NotificationSlot};
pub use workflow::{AdminWorkflow, CollegeAssetField};
