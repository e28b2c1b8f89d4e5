//! Asset attachment types.
//!
//! A draft field that can carry a file URL is an [`AssetSource`]: either the
//! result of an upload, a URL the admin typed directly, or nothing. The two
//! populated arms are mutually exclusive by construction, which replaces the
//! last-write-wins aliasing the admin form would otherwise need.

use serde::{Deserialize, Serialize};

/// Where a draft's asset URL came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetSource {
    /// No asset attached.
    #[default]
    Absent,
    /// Public URL returned by an upload.
    Uploaded(String),
    /// URL typed directly by the admin.
    Direct(String),
}

impl AssetSource {
    /// The URL to submit, regardless of how it arrived.
    pub fn resolve(&self) -> Option<&str> {
        match self {
            AssetSource::Absent => None,
            AssetSource::Uploaded(url) | AssetSource::Direct(url) => {
                let trimmed = url.trim();
                if trimmed.is_empty() { None } else { Some(trimmed) }
            }
        }
    }

    /// Returns `true` when no asset is attached.
    pub fn is_absent(&self) -> bool {
        self.resolve().is_none()
    }

    /// Resolve into an owned optional URL for wire submission.
    pub fn into_url(self) -> Option<String> {
        self.resolve().map(str::to_string)
    }
}

/// Storage category an upload belongs to.
///
/// Categories keep asset kinds separable in the backing bucket; the variant
/// set is closed here even though the storage layer accepts any path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    /// Campus photo shown on a college card.
    CollegeImage,
    /// A college's own crest or logo.
    CollegeLogo,
    /// Downloadable brochure attached to a college.
    CollegeBrochure,
    /// Standalone partner logo for the public slider.
    PartnerLogo,
}

impl AssetCategory {
    /// Path prefix inside the storage bucket.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            AssetCategory::CollegeImage => "college-images",
            AssetCategory::CollegeLogo => "college-logos",
            AssetCategory::CollegeBrochure => "college-brochures",
            AssetCategory::PartnerLogo => "partner-logos",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_prefix())
    }
}
