//! Small helpers over `web-sys` shared by the bindings.

use js_sys::Function;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, NodeList, Window};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("document has no head")]
    NoHead,
    #[error("#{0} is not a form")]
    NotAForm(String),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(describe(&value))
    }
}

/// Best-effort human-readable text for a thrown JavaScript value.
pub fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Collect the elements of a `NodeList`, skipping non-element nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach `handler` for the page lifetime.
pub fn on(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WebError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `f` once after `ms` milliseconds.
pub fn set_timeout(window: &Window, ms: u32, f: impl FnOnce() + 'static) -> Result<i32, WebError> {
    let callback = Closure::once_into_js(f);
    let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref::<Function>(),
        i32::try_from(ms).unwrap_or(i32::MAX),
    )?;
    Ok(handle)
}

/// Add or remove `class` on `element`.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = result {
        log::debug!("class `{class}` not updated: {}", describe(&e));
    }
}
