//! Contact form submit handling.

use super::dom::{self, WebError};
use super::notify::Presenter;
use crate::config::{ContactConfig, MessagesConfig};
use crate::contact::{ContactForm, FormSnapshot, LogOutbox, SubmitOutcome};
use js_sys::Array;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlFormElement};

/// Intercept submits: validate, notify, and reset the form on success.
pub fn init(
    document: &Document,
    config: &ContactConfig,
    messages: &MessagesConfig,
    presenter: Presenter,
) -> Result<(), WebError> {
    let Some(element) = document.get_element_by_id(&config.form_id) else {
        log::debug!("no #{}, contact form disabled", config.form_id);
        return Ok(());
    };
    let form: HtmlFormElement = element
        .dyn_into()
        .map_err(|_| WebError::NotAForm(config.form_id.clone()))?;

    let handler = ContactForm::new(config.clone(), messages.clone());
    let mut presenter = presenter;
    let mut outbox = LogOutbox;
    let target = form.clone();
    dom::on(&form, "submit", move |event| {
        event.prevent_default();
        match snapshot(&target) {
            Ok(data) => {
                if handler.submit(data, &mut outbox, &mut presenter) == SubmitOutcome::Accepted {
                    target.reset();
                }
            }
            Err(e) => log::warn!("contact form not read: {e}"),
        }
    })
}

/// Capture the form's string fields. File inputs are skipped.
pub fn snapshot(form: &HtmlFormElement) -> Result<FormSnapshot, WebError> {
    let data = FormData::new_with_form(form)?;
    let mut snapshot = FormSnapshot::new();
    if let Some(entries) = js_sys::try_iter(&data)? {
        for entry in entries {
            let pair = Array::from(&entry?);
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                snapshot.insert(name, value);
            }
        }
    }
    Ok(snapshot)
}
