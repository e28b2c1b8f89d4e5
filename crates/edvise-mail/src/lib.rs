//! Outbound email delivery for Edvise.
//!
//! Visitor-facing inquiry and application forms are relayed to an HTTP email
//! provider. Fire-and-forget: no retry, no persistence — a failed send is the
//! visitor's to resubmit.

mod client;
mod forms;
mod template;

pub use client::{EmailMessage, MailClient, Mailer};
pub use forms::{ApplicationForm, InquiryForm};
pub use template::{application_message, contact_message};
