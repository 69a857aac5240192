//! Contact form validation.
//!
//! The check is deliberately shallow: required fields must be non-empty and
//! the email field must contain an `@` and a `.` somewhere. `"a.b@c"` passes;
//! so does `"@."`. Rejections surface as a single generic notice, never as
//! per-field messages.
//!
//! Nothing is transmitted. An accepted snapshot is handed to an [`Outbox`];
//! the page's outbox only logs it.

use crate::config::{ContactConfig, MessagesConfig};
use crate::notify::{Notice, NoticeSink};
use log::{debug, info};
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name → submitted value, captured once per submit attempt.
pub type FormSnapshot = BTreeMap<String, String>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(String),
    #[error("`{0}` does not look like an email address")]
    MalformedEmail(String),
}

/// Validate a snapshot against the required fields and email shape.
pub fn validate_form(data: &FormSnapshot, config: &ContactConfig) -> Result<(), ValidationError> {
    for field in &config.required_fields {
        if data.get(field).is_none_or(|v| v.is_empty()) {
            return Err(ValidationError::MissingField(field.clone()));
        }
    }
    let email = data
        .get(&config.email_field)
        .map(String::as_str)
        .unwrap_or_default();
    if !(email.contains('@') && email.contains('.')) {
        return Err(ValidationError::MalformedEmail(config.email_field.clone()));
    }
    Ok(())
}

/// Receiver of accepted submissions.
pub trait Outbox {
    fn deliver(&mut self, data: &FormSnapshot);
}

/// Outbox that only logs what would have been sent.
#[derive(Debug, Default)]
pub struct LogOutbox;

impl Outbox for LogOutbox {
    fn deliver(&mut self, data: &FormSnapshot) {
        info!("Form data: {data:?}");
    }
}

/// What the DOM layer does after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Snapshot accepted and delivered; clear the form.
    Accepted,
    /// Snapshot rejected; leave the form as the user typed it.
    Rejected,
}

/// Submit handler: validate, deliver, and notify.
#[derive(Debug, Clone)]
pub struct ContactForm {
    config: ContactConfig,
    messages: MessagesConfig,
}

impl ContactForm {
    pub fn new(config: ContactConfig, messages: MessagesConfig) -> Self {
        Self { config, messages }
    }

    pub fn submit(
        &self,
        data: FormSnapshot,
        outbox: &mut dyn Outbox,
        notices: &mut dyn NoticeSink,
    ) -> SubmitOutcome {
        match validate_form(&data, &self.config) {
            Ok(()) => {
                outbox.deliver(&data);
                notices.post(Notice::success(&self.messages.contact_accepted));
                SubmitOutcome::Accepted
            }
            Err(e) => {
                debug!("contact form rejected: {e}");
                notices.post(Notice::error(&self.messages.contact_rejected));
                SubmitOutcome::Rejected
            }
        }
    }
}
