//! Browser bindings.
//!
//! Only compiled for `wasm32`. Every function here is glue: it reads the DOM
//! into the snapshots the core modules expect, registers listeners and
//! observers, and writes the core modules' decisions back to the DOM.
//!
//! Start-up order: console logging, config, stylesheet, then each behavior
//! independently. A behavior whose elements are missing is skipped; one that
//! fails to bind is logged and skipped. The page never sees an exception
//! from here.

pub mod contact;
pub mod dom;
pub mod export;
pub mod menu;
pub mod nav;
pub mod notify;
pub mod observe;

use crate::config::{self, BehaviorConfig};
use crate::markup;
use dom::WebError;
use log::{error, info, warn};
use notify::Presenter;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// Id of the inline `<script type="application/toml">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Module entry point: runs when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
    log::set_max_level(log::LevelFilter::Info);

    let Some(window) = web_sys::window() else {
        error!("folio: {}", WebError::NoWindow);
        return;
    };
    let Some(document) = window.document() else {
        error!("folio: {}", WebError::NoDocument);
        return;
    };

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let registered = dom::on(&document, "DOMContentLoaded", move |_| boot(&w, &d));
        if let Err(e) = registered {
            error!("folio: {e}");
        }
    } else {
        boot(&window, &document);
    }
}

/// Crate version, for pages that want to report it.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn boot(window: &Window, document: &Document) {
    info!("Portfolio loaded");
    let config = load_config(document);
    log::set_max_level(config.logging.level.into());

    if let Err(e) = inject_stylesheet(document, &config) {
        warn!("animation stylesheet not injected: {e}");
    }

    let presenter = Presenter::new(
        window.clone(),
        document.clone(),
        config.notifications.clone(),
    );
    let messages = &config.notifications.messages;
    let behaviors = [
        ("navigation", nav::init(window, document, &config.navigation)),
        ("anchors", nav::init_anchors(document, &config.navigation)),
        ("reveal", observe::init_reveal(document, &config.reveal)),
        (
            "resume export",
            export::init(document, &config.export, messages, presenter.clone()),
        ),
        (
            "contact form",
            contact::init(document, &config.contact, messages, presenter),
        ),
        ("mobile menu", menu::init(document, &config.menu)),
        ("lazy images", observe::init_lazy_images(document, &config.lazy_images)),
    ];
    for (name, result) in behaviors {
        if let Err(e) = result {
            warn!("{name} not initialized: {e}");
        }
    }
    info!("All behaviors initialized");
}

/// Stock config merged with the page's inline overrides, if any.
fn load_config(document: &Document) -> BehaviorConfig {
    let source = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
        .unwrap_or_default();
    config::load_config_str(&source).unwrap_or_else(|e| {
        error!("#{CONFIG_ELEMENT_ID} ignored: {e}");
        BehaviorConfig::default()
    })
}

fn inject_stylesheet(document: &Document, config: &BehaviorConfig) -> Result<(), WebError> {
    let head = document.head().ok_or(WebError::NoHead)?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(&markup::keyframes_css(&config.reveal.class)));
    head.append_child(&style)?;
    Ok(())
}
