//! Record store client for Edvise.
//!
//! A thin wrapper over the hosted relational backend's REST interface for two
//! tables, `colleges` and `logos`. No caching, no retries: every call is one
//! round trip, and every outcome is logged.
//!
//! The [`RecordStore`] trait is the seam the workflow layer depends on;
//! [`StoreClient`] is the production implementation.

mod client;
mod traits;

pub use client::StoreClient;
pub use traits::RecordStore;
