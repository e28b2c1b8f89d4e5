//! Object storage upload client for Edvise.
//!
//! Stores a binary blob under a generated, category-scoped key and returns a
//! durable public URL. Write-once: nothing here deletes, and record deletion
//! never cleans up the blobs a record pointed at.

mod client;
mod key;

pub use client::{AssetClient, AssetStore};
pub use key::object_key;
