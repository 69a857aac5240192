//! Scroll-spy highlighting and smooth in-page anchors.

use super::dom::{self, WebError};
use crate::config::NavigationConfig;
use crate::scroll_spy::{AnchorAction, NavLink, ScrollSpy, SectionBounds, anchor_action};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

/// Snapshot links and sections, then keep the highlight in sync with
/// scrolling and clicks.
pub fn init(window: &Window, document: &Document, config: &NavigationConfig) -> Result<(), WebError> {
    let links = dom::elements(document.query_selector_all(&config.link_selector)?);
    let sections = dom::elements(document.query_selector_all(&config.section_selector)?);

    let spy = ScrollSpy::new(
        links
            .iter()
            .map(|link| NavLink::new(link.get_attribute("href").unwrap_or_default()))
            .collect(),
        sections.iter().map(section_bounds).collect(),
        config.threshold,
    );
    let spy = Rc::new(RefCell::new(spy));
    let links = Rc::new(links);

    for (index, link) in links.iter().enumerate() {
        let spy = Rc::clone(&spy);
        let links = Rc::clone(&links);
        let class = config.active_class.clone();
        dom::on(link, "click", move |_| {
            spy.borrow_mut().on_link_click(index);
            paint(&links, spy.borrow().active(), &class);
        })?;
    }

    let scroller = window.clone();
    let class = config.active_class.clone();
    dom::on(window, "scroll", move |_| {
        let y = scroller.scroll_y().unwrap_or(0.0);
        let active = spy.borrow_mut().on_scroll(y);
        paint(&links, active, &class);
    })?;
    Ok(())
}

/// Replace jumps to in-page anchors with smooth scrolls.
pub fn init_anchors(document: &Document, config: &NavigationConfig) -> Result<(), WebError> {
    for anchor in dom::elements(document.query_selector_all(&config.anchor_selector)?) {
        let source = anchor.clone();
        let document = document.clone();
        dom::on(&anchor, "click", move |event| {
            let href = source.get_attribute("href").unwrap_or_default();
            if let AnchorAction::SmoothScroll(id) = anchor_action(&href) {
                event.prevent_default();
                if let Some(target) = document.get_element_by_id(id) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
        })?;
    }
    Ok(())
}

fn section_bounds(section: &Element) -> SectionBounds {
    let top = section
        .dyn_ref::<HtmlElement>()
        .map(HtmlElement::offset_top)
        .unwrap_or_default();
    SectionBounds {
        id: section.get_attribute("id"),
        top: f64::from(top),
        height: f64::from(section.client_height()),
    }
}

fn paint(links: &[Element], active: Option<usize>, class: &str) {
    for (i, link) in links.iter().enumerate() {
        dom::set_class(link, class, active == Some(i));
    }
}
