//! Message templates for the two visitor flows.
//!
//! Both flows send through the same provider; only the template and the
//! recipient list differ.

use edvise_core::Result;
use edvise_core::config::MailConfig;

use crate::client::EmailMessage;
use crate::forms::{ApplicationForm, InquiryForm};

/// Build the contact-inquiry message.
pub fn contact_message(config: &MailConfig, form: &InquiryForm) -> Result<EmailMessage> {
    form.validate()?;
    let html = format!(
        "<h2>New Contact Form Submission</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <h3>Message:</h3>\
         <p>{}</p>",
        form.name,
        form.email,
        form.message.replace('\n', "<br>"),
    );
    let text = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        form.name, form.email, form.message
    );
    Ok(EmailMessage {
        from: config.from.clone(),
        to: config.contact_recipients.clone(),
        subject: format!("New Contact Form Submission from {}", form.name),
        html,
        text: Some(text),
    })
}

/// Build the application message.
///
/// Every field renders as a bold label with "Not provided" standing in for
/// blanks.
pub fn application_message(config: &MailConfig, form: &ApplicationForm) -> Result<EmailMessage> {
    form.validate()?;
    let details = form
        .labelled_fields()
        .into_iter()
        .map(|(label, value)| {
            let value = if value.trim().is_empty() {
                "Not provided".to_string()
            } else {
                value
            };
            format!("<strong>{label}:</strong> {value}")
        })
        .collect::<Vec<_>>()
        .join("<br>");
    let html = format!(
        "<h2>New Application Submission</h2>\
         <p>A new application has been submitted through the website:</p>\
         <div>{details}</div>\
         <p>This is an automated message from the Edvise website.</p>"
    );
    Ok(EmailMessage {
        from: config.from.clone(),
        to: config.application_recipients.clone(),
        subject: format!("New Application from {}", form.name),
        html,
        text: None,
    })
}
