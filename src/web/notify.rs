//! DOM presenter for notifications.
//!
//! Wraps the single-slot [`Notifier`] and mirrors it into one `<div>` appended
//! to `<body>`. Exit and removal run on timers keyed by notification id.

use super::dom::{self, WebError};
use crate::config::NotificationConfig;
use crate::markup;
use crate::notify::{Notice, NoticeSink, NotificationId, Notifier, Timing};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

struct Inner {
    notifier: Notifier,
    node: Option<Element>,
    config: NotificationConfig,
}

/// Cloneable handle to the page's notification slot.
#[derive(Clone)]
pub struct Presenter {
    window: Window,
    document: Document,
    inner: Rc<RefCell<Inner>>,
}

impl Presenter {
    pub fn new(window: Window, document: Document, config: NotificationConfig) -> Self {
        Self {
            window,
            document,
            inner: Rc::new(RefCell::new(Inner {
                notifier: Notifier::new(Timing::from(&config)),
                node: None,
                config,
            })),
        }
    }

    fn show(&self, notice: Notice) -> Result<(), WebError> {
        let body = self.document.body().ok_or(WebError::NoBody)?;
        let node = self.document.create_element("div")?;
        node.set_class_name(&markup::notification_class(notice.severity));
        node.set_text_content(Some(&notice.message));

        let mut inner = self.inner.borrow_mut();
        node.set_attribute(
            "style",
            &markup::notification_style(notice.severity, &inner.config),
        )?;
        let id = inner.notifier.show(notice, js_sys::Date::now()).id;
        if let Some(previous) = inner.node.replace(node.clone()) {
            previous.remove();
        }
        let display_ms = inner.notifier.timing().display_ms;
        drop(inner);

        body.append_child(&node)?;
        let this = self.clone();
        dom::set_timeout(&self.window, display_ms, move || this.begin_exit(id))?;
        Ok(())
    }

    fn begin_exit(&self, id: NotificationId) {
        let mut inner = self.inner.borrow_mut();
        if !inner.notifier.begin_exit(id) {
            return;
        }
        if let Some(node) = inner.node.as_ref().and_then(|n| n.dyn_ref::<HtmlElement>()) {
            let animation = markup::notification_exit_animation(&inner.config);
            if let Err(e) = node.style().set_property("animation", &animation) {
                log::debug!("exit animation not applied: {}", dom::describe(&e));
            }
        }
        let exit_ms = inner.notifier.timing().exit_ms;
        drop(inner);

        let this = self.clone();
        if let Err(e) = dom::set_timeout(&self.window, exit_ms, move || this.dismiss(id)) {
            log::warn!("notification removal not scheduled: {e}");
            self.dismiss(id);
        }
    }

    fn dismiss(&self, id: NotificationId) {
        let mut inner = self.inner.borrow_mut();
        if inner.notifier.remove(id) {
            if let Some(node) = inner.node.take() {
                node.remove();
            }
        }
    }
}

impl NoticeSink for Presenter {
    fn post(&mut self, notice: Notice) {
        if let Err(e) = self.show(notice) {
            log::error!("notification not shown: {e}");
        }
    }
}
