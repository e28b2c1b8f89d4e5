//! Entity and asset types shared across the workspace.

pub mod asset;
pub mod college;
pub mod logo;
