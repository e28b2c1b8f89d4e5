//! Inquiry and application submission flows.
//!
//! Each flow validates locally, builds its template, and sends exactly one
//! message. An in-flight flag per flow lets the caller disable resubmission
//! until the send resolves; a failed send retains nothing, the visitor
//! resubmits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use edvise_core::config::MailConfig;
use edvise_core::{Error, Result};
use edvise_mail::{ApplicationForm, InquiryForm, Mailer, application_message, contact_message};

/// The two visitor-facing email flows.
#[derive(Clone)]
pub struct Submissions {
    mailer: Arc<dyn Mailer>,
    config: MailConfig,
    inquiry_in_flight: Arc<AtomicBool>,
    application_in_flight: Arc<AtomicBool>,
}

impl Submissions {
    /// Create the flows over a mailer and its settings.
    pub fn new(mailer: Arc<dyn Mailer>, config: MailConfig) -> Self {
        Self {
            mailer,
            config,
            inquiry_in_flight: Arc::new(AtomicBool::new(false)),
            application_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an inquiry send is unresolved.
    pub fn inquiry_in_flight(&self) -> bool {
        self.inquiry_in_flight.load(Ordering::SeqCst)
    }

    /// Whether an application send is unresolved.
    pub fn application_in_flight(&self) -> bool {
        self.application_in_flight.load(Ordering::SeqCst)
    }

    /// Send a contact inquiry. Returns the provider's message id.
    pub async fn submit_inquiry(&self, form: &InquiryForm) -> Result<String> {
        let message = contact_message(&self.config, form)?;
        let _guard = InFlight::acquire(&self.inquiry_in_flight)?;
        match self.mailer.send(&message).await {
            Ok(id) => {
                tracing::info!(message_id = %id, "Inquiry sent");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Inquiry send failed");
                Err(err)
            }
        }
    }

    /// Send an application. Returns the provider's message id.
    pub async fn submit_application(&self, form: &ApplicationForm) -> Result<String> {
        let message = application_message(&self.config, form)?;
        let _guard = InFlight::acquire(&self.application_in_flight)?;
        match self.mailer.send(&message).await {
            Ok(id) => {
                tracing::info!(message_id = %id, "Application sent");
                Ok(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Application send failed");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Submissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submissions")
            .field("inquiry_in_flight", &self.inquiry_in_flight())
            .field("application_in_flight", &self.application_in_flight())
            .finish()
    }
}

/// Holds the flag for the duration of a send, clearing it on every exit
/// path including cancellation.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(Error::validation("a submission is already in progress"));
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
