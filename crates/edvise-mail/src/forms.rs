//! Visitor-entered form data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use edvise_core::{Result, normalize};

/// Contact-form inquiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryForm {
    /// Visitor name.
    pub name: String,
    /// Reply-to email.
    pub email: String,
    /// Free-text message.
    pub message: String,
}

impl InquiryForm {
    /// Require the fields the contact template interpolates.
    pub fn validate(&self) -> Result<()> {
        normalize::require("name", &self.name)?;
        normalize::require("email", &self.email)?;
        normalize::require("message", &self.message)?;
        Ok(())
    }
}

/// Application-form submission.
///
/// A fixed set of named fields; only name and email are required, everything
/// else renders as "Not provided" when blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    /// Applicant name.
    pub name: String,
    /// Applicant email.
    pub email: String,
    /// Mobile number.
    pub mobile_number: String,
    /// WhatsApp number.
    pub whatsapp_number: String,
    /// Gender as entered.
    pub gender: String,
    /// Nationality.
    pub nationality: String,
    /// Postal address.
    pub address: String,
    /// Course of interest.
    pub interested_course: String,
    /// Guardian name.
    pub guardian_name: String,
    /// Guardian phone number.
    pub guardian_number: String,
    /// Blood group.
    pub blood_group: String,
    /// Date of birth, normalized to an ISO `yyyy-MM-dd` date.
    pub date_of_birth: Option<NaiveDate>,
}

impl ApplicationForm {
    /// Require the fields the application template cannot do without.
    pub fn validate(&self) -> Result<()> {
        normalize::require("name", &self.name)?;
        normalize::require("email", &self.email)?;
        Ok(())
    }

    /// Labelled field values in template order.
    pub fn labelled_fields(&self) -> Vec<(&'static str, String)> {
        let dob = self
            .date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        vec![
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
            ("Mobile Number", self.mobile_number.clone()),
            ("Whatsapp Number", self.whatsapp_number.clone()),
            ("Gender", self.gender.clone()),
            ("Nationality", self.nationality.clone()),
            ("Address", self.address.clone()),
            ("Interested Course", self.interested_course.clone()),
            ("Guardian Name", self.guardian_name.clone()),
            ("Guardian Number", self.guardian_number.clone()),
            ("Blood Group", self.blood_group.clone()),
            ("Date Of Birth", dob),
        ]
    }
}
