//! Intersection-observer driven behaviors: reveal animation and lazy images.

use super::dom::{self, WebError};
use crate::config::{LazyImagesConfig, RevealConfig};
use crate::lazy_images::LazyLoader;
use crate::reveal::Revealer;
use crate::viewport::{Intersection, ObserverOptions};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Add the reveal class to each matching element the first time it shows.
pub fn init_reveal(document: &Document, config: &RevealConfig) -> Result<(), WebError> {
    let elements = dom::elements(document.query_selector_all(&config.selector_list())?);
    if elements.is_empty() {
        return Ok(());
    }

    let mut revealer = Revealer::new(elements.len());
    let targets = elements.clone();
    let class = config.class.clone();
    let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
        for index in revealer.on_intersections(&reports(&entries, &targets)) {
            dom::set_class(&targets[index], &class, true);
        }
    });

    let observer = observer(&ObserverOptions::from(config), &callback)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}

/// Swap in deferred image sources on first intersection.
pub fn init_lazy_images(document: &Document, config: &LazyImagesConfig) -> Result<(), WebError> {
    let images = dom::elements(document.query_selector_all(&config.selector())?);
    if images.is_empty() {
        return Ok(());
    }

    let attribute = config.source_attribute.clone();
    let mut loader = LazyLoader::new(
        images
            .iter()
            .map(|img| img.get_attribute(&attribute).unwrap_or_default())
            .collect(),
    );
    let targets = images.clone();
    let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
        for swap in loader.on_intersections(&reports(&entries, &targets)) {
            let img = &targets[swap.index];
            let result = img
                .set_attribute("src", &swap.src)
                .and_then(|()| img.remove_attribute(&attribute));
            if let Err(e) = result {
                log::warn!("lazy image not loaded: {}", dom::describe(&e));
            }
            observer.unobserve(img);
        }
    });

    let observer = observer(&ObserverOptions::default(), &callback)?;
    for img in &images {
        observer.observe(img);
    }
    callback.forget();
    Ok(())
}

fn observer(
    options: &ObserverOptions,
    callback: &ObserverCallback,
) -> Result<IntersectionObserver, WebError> {
    let init = IntersectionObserverInit::new();
    if let Some(threshold) = options.threshold {
        init.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(margin) = &options.root_margin {
        init.set_root_margin(margin);
    }
    Ok(IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    )?)
}

/// Translate observer entries into reports indexed by element position.
fn reports(entries: &Array, elements: &[Element]) -> Vec<Intersection> {
    entries
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .filter_map(|entry| {
            let target = entry.target();
            let index = elements.iter().position(|e| *e == target)?;
            Some(Intersection {
                index,
                is_intersecting: entry.is_intersecting(),
            })
        })
        .collect()
}
