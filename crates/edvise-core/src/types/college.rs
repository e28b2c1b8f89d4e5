//! College entity, draft, and wire record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize;
use crate::types::asset::AssetSource;

/// A college row as returned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    /// Opaque unique id, assigned by the store on creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// City / country line.
    pub location: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// National or global ranking. Numeric, not necessarily integral: the
    /// admin form accepts anything that parses as a number.
    #[serde(default)]
    pub ranking: Option<f64>,
    /// Admission rate as a fraction or percentage, as entered.
    #[serde(default, rename = "admissionRate")]
    pub admission_rate: Option<f64>,
    /// Annual tuition.
    #[serde(default)]
    pub tuition: Option<f64>,
    /// Homepage URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Campus image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// College crest/logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Brochure download URL.
    #[serde(default)]
    pub brochure: Option<String>,
    /// Creation timestamp, assigned by the store.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The mutable fields of a college, in wire shape.
///
/// Used for both insert and full-overwrite update. Optional fields serialize
/// as explicit nulls so an update clears anything the draft left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRecord {
    /// Display name (required, non-empty).
    pub name: String,
    /// Location (required, non-empty).
    pub location: String,
    /// Free-text description.
    pub description: Option<String>,
    /// National or global ranking.
    pub ranking: Option<f64>,
    /// Admission rate.
    #[serde(rename = "admissionRate")]
    pub admission_rate: Option<f64>,
    /// Annual tuition.
    pub tuition: Option<f64>,
    /// Homepage URL.
    pub website: Option<String>,
    /// Campus image URL.
    pub image: Option<String>,
    /// College crest/logo URL.
    pub logo: Option<String>,
    /// Brochure download URL.
    pub brochure: Option<String>,
}

/// An in-progress college form, fields exactly as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollegeDraft {
    /// Name as typed.
    pub name: String,
    /// Location as typed.
    pub location: String,
    /// Description as typed.
    pub description: String,
    /// Ranking as typed; number-coerced or null at submission.
    pub ranking: String,
    /// Admission rate as typed; number-coerced or null at submission.
    pub admission_rate: String,
    /// Tuition as typed; number-coerced or null at submission.
    pub tuition: String,
    /// Website as typed.
    pub website: String,
    /// Campus image attachment.
    pub image: AssetSource,
    /// College logo attachment.
    pub logo: AssetSource,
    /// Brochure attachment.
    pub brochure: AssetSource,
}

impl CollegeDraft {
    /// Seed a draft from an existing record for the edit flow.
    pub fn from_record(college: &College) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let url = |value: &Option<String>| match value {
            Some(u) if !u.trim().is_empty() => AssetSource::Direct(u.clone()),
            _ => AssetSource::Absent,
        };
        Self {
            name: college.name.clone(),
            location: college.location.clone(),
            description: text(&college.description),
            ranking: college.ranking.map(|r| r.to_string()).unwrap_or_default(),
            admission_rate: college
                .admission_rate
                .map(|r| r.to_string())
                .unwrap_or_default(),
            tuition: college.tuition.map(|t| t.to_string()).unwrap_or_default(),
            website: text(&college.website),
            image: url(&college.image),
            logo: url(&college.logo),
            brochure: url(&college.brochure),
        }
    }

    /// Validate required fields and normalize into a wire record.
    ///
    /// Fails with a validation error (no remote call made) when name or
    /// location is empty after trimming. Empty optional strings become null,
    /// never `""`.
    pub fn normalize(&self) -> Result<CollegeRecord> {
        Ok(CollegeRecord {
            name: normalize::require("name", &self.name)?,
            location: normalize::require("location", &self.location)?,
            description: normalize::non_empty(&self.description),
            ranking: normalize::coerce_float(&self.ranking),
            admission_rate: normalize::coerce_float(&self.admission_rate),
            tuition: normalize::coerce_float(&self.tuition),
            website: normalize::non_empty(&self.website),
            image: self.image.clone().into_url(),
            logo: self.logo.clone().into_url(),
            brochure: self.brochure.clone().into_url(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> CollegeDraft {
        CollegeDraft {
            name: " Test U ".into(),
            location: "Testville".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_minimal_draft() {
        let record = draft().normalize().unwrap();
        assert_eq!(record.name, "Test U");
        assert_eq!(record.location, "Testville");
        assert_eq!(record.description, None);
        assert_eq!(record.ranking, None);
        assert_eq!(record.admission_rate, None);
        assert_eq!(record.tuition, None);
        assert_eq!(record.website, None);
        assert_eq!(record.image, None);
        assert_eq!(record.logo, None);
        assert_eq!(record.brochure, None);
    }

    #[test]
    fn test_normalize_rejects_empty_name() {
        let mut d = draft();
        d.name = "   ".into();
        assert!(d.normalize().is_err());
    }

    #[test]
    fn test_normalize_rejects_empty_location() {
        let mut d = draft();
        d.location = String::new();
        assert!(d.normalize().is_err());
    }

    #[test]
    fn test_numeric_coercion() {
        let mut d = draft();
        d.ranking = "12".into();
        d.tuition = "45000".into();
        d.admission_rate = "0.62".into();
        let record = d.normalize().unwrap();
        assert_eq!(record.ranking, Some(12.0));
        assert_eq!(record.tuition, Some(45000.0));
        assert_eq!(record.admission_rate, Some(0.62));
    }

    #[test]
    fn test_fractional_numeric_input_is_kept() {
        let mut d = draft();
        d.ranking = "4.5".into();
        d.tuition = "45000.50".into();
        let record = d.normalize().unwrap();
        assert_eq!(record.ranking, Some(4.5));
        assert_eq!(record.tuition, Some(45000.5));
    }

    #[test]
    fn test_non_numeric_input_stores_null() {
        let mut d = draft();
        d.ranking = "top ten".into();
        d.admission_rate = "62%".into();
        d.tuition = "varies".into();
        let record = d.normalize().unwrap();
        assert_eq!(record.ranking, None);
        assert_eq!(record.admission_rate, None);
        assert_eq!(record.tuition, None);
    }

    #[test]
    fn test_record_serializes_explicit_nulls() {
        let record = draft().normalize().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("description").unwrap().is_null());
        assert!(json.get("admissionRate").unwrap().is_null());
    }

    #[test]
    fn test_from_record_round_trips_fields() {
        let college = College {
            id: "abc".into(),
            name: "Test U".into(),
            location: "Testville".into(),
            description: Some("Old school".into()),
            ranking: Some(7.0),
            admission_rate: Some(0.5),
            tuition: Some(30000.0),
            website: Some("https://test.example".into()),
            image: Some("https://cdn.example/a.png".into()),
            logo: None,
            brochure: None,
            created_at: None,
        };
        let d = CollegeDraft::from_record(&college);
        assert_eq!(d.name, "Test U");
        assert_eq!(d.ranking, "7");
        assert_eq!(d.image, AssetSource::Direct("https://cdn.example/a.png".into()));
        assert_eq!(d.logo, AssetSource::Absent);

        // An untouched edit draft must submit the same field values back.
        let record = d.normalize().unwrap();
        assert_eq!(record.description, college.description);
        assert_eq!(record.ranking, college.ranking);
        assert_eq!(record.tuition, college.tuition);
        assert_eq!(record.image, college.image);
    }

    #[test]
    fn test_deserialize_store_row() {
        let row = serde_json::json!({
            "id": "c1",
            "name": "Test U",
            "location": "Testville",
            "description": null,
            "ranking": 3,
            "admissionRate": 0.4,
            "tuition": null,
            "website": null,
            "image": null,
            "logo": null,
            "brochure": null,
            "created_at": "2024-03-01T10:00:00+00:00"
        });
        let college: College = serde_json::from_value(row).unwrap();
        assert_eq!(college.ranking, Some(3.0));
        assert_eq!(college.admission_rate, Some(0.4));
        assert!(college.created_at.is_some());
    }

    #[test]
    fn test_deserialize_row_with_fractional_ranking() {
        // Rows written by other clients can carry fractional numerics; a
        // list fetch must not fail on them.
        let row = serde_json::json!({
            "id": "c2",
            "name": "Test U",
            "location": "Testville",
            "ranking": 4.5,
            "tuition": 45000.5
        });
        let college: College = serde_json::from_value(row).unwrap();
        assert_eq!(college.ranking, Some(4.5));
        assert_eq!(college.tuition, Some(45000.5));
    }
}
