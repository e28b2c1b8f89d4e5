//! Edvise Core — shared types, errors, and configuration.
//!
//! This crate provides the foundational types used across all Edvise crates.
//! It has no internal Edvise dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`config`]: Environment-resolved configuration
//! - [`normalize`]: Field trimming and numeric coercion rules
//! - [`types`]: College, Logo, drafts, and asset types

pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::EdviseConfig;
pub use error::{Error, Result};
pub use types::asset::{AssetCategory, AssetSource};
pub use types::college::{College, CollegeDraft, CollegeRecord};
pub use types::logo::{Logo, LogoDraft, LogoRecord};
