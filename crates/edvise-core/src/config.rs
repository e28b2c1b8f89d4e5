//! Environment-resolved configuration.
//!
//! All persistence is delegated to remote collaborators, so configuration is
//! a handful of endpoints and credentials. Values come from the environment
//! with sensible defaults for everything but credentials; there is no config
//! file surface.

use serde::{Deserialize, Serialize};

/// Backend-as-a-service connection settings (record store, storage, auth).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.example`.
    pub url: String,
    /// Anonymous API key sent with every request.
    pub api_key: String,
    /// Storage bucket for uploaded assets.
    pub bucket: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            bucket: "colleges".to_string(),
        }
    }
}

/// Email provider settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    /// HTTP endpoint of the email provider's send API.
    pub endpoint: String,
    /// Provider API key.
    pub api_key: String,
    /// Sender address for outbound mail.
    pub from: String,
    /// Recipients for contact-form inquiries.
    pub contact_recipients: Vec<String>,
    /// Recipients for application submissions.
    pub application_recipients: Vec<String>,
}

/// Top-level configuration for the Edvise services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdviseConfig {
    /// Backend-as-a-service settings.
    pub backend: BackendConfig,
    /// Email provider settings.
    pub mail: MailConfig,
}

impl EdviseConfig {
    /// Resolve configuration from the environment.
    ///
    /// Recipient lists are comma-separated. Missing variables leave the
    /// defaults in place; credential checks belong to the clients that use
    /// them.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        let list = |name: &str| {
            var(name)
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut config = Self::default();
        if let Some(url) = var("EDVISE_BACKEND_URL") {
            config.backend.url = url;
        }
        if let Some(key) = var("EDVISE_BACKEND_KEY") {
            config.backend.api_key = key;
        }
        if let Some(bucket) = var("EDVISE_STORAGE_BUCKET") {
            config.backend.bucket = bucket;
        }
        if let Some(endpoint) = var("EDVISE_MAIL_ENDPOINT") {
            config.mail.endpoint = endpoint;
        }
        if let Some(key) = var("EDVISE_MAIL_KEY") {
            config.mail.api_key = key;
        }
        if let Some(from) = var("EDVISE_MAIL_FROM") {
            config.mail.from = from;
        }
        config.mail.contact_recipients = list("EDVISE_MAIL_CONTACT_TO");
        config.mail.application_recipients = list("EDVISE_MAIL_APPLICATION_TO");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bucket() {
        let config = EdviseConfig::default();
        assert_eq!(config.backend.bucket, "colleges");
        assert!(config.backend.url.is_empty());
    }

    #[test]
    fn test_recipient_list_parsing() {
        // Exercise the splitting rule through the same closure shape used by
        // from_env, without mutating process environment in tests.
        let raw = "a@example.com, b@example.com,,";
        let parsed: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        assert_eq!(parsed, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = EdviseConfig {
            backend: BackendConfig {
                url: "https://backend.example".into(),
                api_key: "anon".into(),
                bucket: "colleges".into(),
            },
            mail: MailConfig {
                endpoint: "https://mail.example/send".into(),
                api_key: "mk".into(),
                from: "noreply@edvise.example".into(),
                contact_recipients: vec!["admin@edvise.example".into()],
                application_recipients: vec!["apply@edvise.example".into()],
            },
        };
        let json = serde_json::to_string(&config).unwrap_or_default();
        let back: EdviseConfig = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, config);
    }
}
