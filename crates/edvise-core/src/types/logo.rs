//! Partner logo entity, draft, and wire record.
//!
//! Logos are an independent entity: no foreign key to [`College`], even
//! though a college carries its own `logo` field.
//!
//! [`College`]: crate::types::college::College

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize;
use crate::types::asset::AssetSource;

/// A partner logo row as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    /// Opaque unique numeric id.
    pub id: i64,
    /// Partner name.
    pub name: String,
    /// Public URL of the logo image.
    pub logo_url: String,
    /// Creation timestamp, assigned by the store.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The mutable fields of a logo, in wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoRecord {
    /// Partner name (required, non-empty).
    pub name: String,
    /// Logo URL (required, non-empty).
    pub logo_url: String,
}

/// An in-progress logo form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogoDraft {
    /// Name as typed.
    pub name: String,
    /// Logo attachment — uploaded or typed directly.
    pub logo: AssetSource,
}

impl LogoDraft {
    /// Seed a draft from an existing record for the edit flow.
    pub fn from_record(logo: &Logo) -> Self {
        Self {
            name: logo.name.clone(),
            logo: AssetSource::Direct(logo.logo_url.clone()),
        }
    }

    /// Validate required fields and normalize into a wire record.
    pub fn normalize(&self) -> Result<LogoRecord> {
        let name = normalize::require("name", &self.name)?;
        let logo_url = self
            .logo
            .resolve()
            .map(str::to_string)
            .ok_or_else(|| crate::Error::validation_field("logo_url", "must not be empty"))?;
        Ok(LogoRecord { name, logo_url })
    }
}
