//! Resume export through the page's global `html2pdf`.
//!
//! The html2pdf worker is a promise-like chain:
//!
//! ```text
//! html2pdf().set(options).from(element).toPdf().get('pdf')   → jsPDF
//!                                                 .save()    → file prompt
//! ```
//!
//! [`Html2Pdf::to_page`] runs the chain up to `get('pdf')` and awaits the
//! jsPDF instance; [`Html2Pdf::save`] continues the same worker after the
//! scale factor has been adjusted.

use super::dom::{self, WebError};
use super::notify::Presenter;
use crate::config::{ExportConfig, MessagesConfig};
use crate::export::{
    Affordance, ContentSize, Exporter, PageGeometry, PipelineOptions, RenderError, RenderPipeline,
    TriggerControl, run_export,
};
use js_sys::{Array, Function, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement};

/// The download button.
struct ButtonControl {
    element: HtmlElement,
}

impl TriggerControl for ButtonControl {
    fn label(&self) -> String {
        self.element.inner_html()
    }

    fn apply(&mut self, affordance: &Affordance) {
        self.element.set_inner_html(&affordance.label);
        let style = self.element.style();
        let pointer = if affordance.interactive { "auto" } else { "none" };
        let result = style
            .set_property("pointer-events", pointer)
            .and_then(|()| style.set_property("opacity", &affordance.opacity.to_string()));
        if let Err(e) = result {
            log::warn!("export button style not updated: {}", dom::describe(&e));
        }
    }
}

/// html2pdf bound to one content element.
struct Html2Pdf {
    element: Element,
}

/// A jsPDF instance plus the worker that produced it.
struct JsPdfPage {
    worker: JsValue,
    internal: JsValue,
    width: f64,
    height: f64,
    scale_factor: f64,
}

impl JsPdfPage {
    fn from_js(worker: JsValue, pdf: &JsValue) -> Result<Self, JsValue> {
        let internal = Reflect::get(pdf, &JsValue::from_str("internal"))?;
        let page_size = Reflect::get(&internal, &JsValue::from_str("pageSize"))?;
        let width = number(&call_method(&page_size, "getWidth", &[])?)?;
        let height = number(&call_method(&page_size, "getHeight", &[])?)?;
        let scale_factor = number(&Reflect::get(&internal, &JsValue::from_str("scaleFactor"))?)?;
        Ok(Self {
            worker,
            internal,
            width,
            height,
            scale_factor,
        })
    }
}

impl PageGeometry for JsPdfPage {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn set_scale_factor(&mut self, factor: f64) {
        match Reflect::set(
            &self.internal,
            &JsValue::from_str("scaleFactor"),
            &JsValue::from_f64(factor),
        ) {
            Ok(_) => self.scale_factor = factor,
            Err(e) => log::warn!("scale factor not applied: {}", dom::describe(&e)),
        }
    }
}

impl RenderPipeline for Html2Pdf {
    type Page = JsPdfPage;

    async fn to_page(&self, options: &PipelineOptions) -> Result<JsPdfPage, RenderError> {
        let factory = Reflect::get(&js_sys::global(), &JsValue::from_str("html2pdf"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| RenderError::Unavailable("html2pdf is not loaded".into()))?;
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| RenderError::Failed(format!("options: {e}")))?;

        let worker = start_worker(&factory, &options, &self.element).map_err(failure)?;
        let pdf = JsFuture::from(Promise::resolve(&worker))
            .await
            .map_err(failure)?;
        JsPdfPage::from_js(worker, &pdf).map_err(failure)
    }

    async fn save(&self, page: JsPdfPage) -> Result<(), RenderError> {
        let saved = call_method(&page.worker, "save", &[]).map_err(failure)?;
        JsFuture::from(Promise::resolve(&saved))
            .await
            .map_err(failure)?;
        Ok(())
    }
}

fn start_worker(factory: &Function, options: &JsValue, element: &Element) -> Result<JsValue, JsValue> {
    let worker = factory.call0(&JsValue::NULL)?;
    let worker = call_method(&worker, "set", &[options])?;
    let element: &JsValue = element.as_ref();
    let worker = call_method(&worker, "from", &[element])?;
    let worker = call_method(&worker, "toPdf", &[])?;
    call_method(&worker, "get", &[&JsValue::from_str("pdf")])
}

fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    let args: Array = args.iter().copied().collect();
    method.apply(target, &args)
}

fn number(value: &JsValue) -> Result<f64, JsValue> {
    value
        .as_f64()
        .ok_or_else(|| JsValue::from_str("expected a number"))
}

fn failure(value: JsValue) -> RenderError {
    RenderError::Failed(dom::describe(&value))
}

/// Wire the download button to the exporter.
pub fn init(
    document: &Document,
    config: &ExportConfig,
    messages: &MessagesConfig,
    presenter: Presenter,
) -> Result<(), WebError> {
    let Some(button) = document.get_element_by_id(&config.button_id) else {
        log::debug!("no #{}, resume export disabled", config.button_id);
        return Ok(());
    };

    let exporter = Rc::new(RefCell::new(Exporter::new(config.clone(), messages.clone())));
    let document = document.clone();
    let config = config.clone();
    dom::on(&button, "click", move |event| {
        event.prevent_default();
        let exporter = Rc::clone(&exporter);
        let document = document.clone();
        let config = config.clone();
        let mut presenter = presenter.clone();
        spawn_local(async move {
            run(&exporter, &document, &config, &mut presenter).await;
        });
    })
}

async fn run(
    exporter: &RefCell<Exporter>,
    document: &Document,
    config: &ExportConfig,
    presenter: &mut Presenter,
) {
    let content = document.get_element_by_id(&config.content_id);
    let button = document
        .get_element_by_id(&config.button_id)
        .and_then(|b| b.dyn_into::<HtmlElement>().ok());
    let (Some(content), Some(button)) = (content, button) else {
        log::debug!("resume content or button missing, skipping export");
        return;
    };

    let size = ContentSize {
        width: f64::from(content.scroll_width()),
        height: f64::from(content.scroll_height()),
    };
    let mut control = ButtonControl { element: button };
    let pipeline = Html2Pdf { element: content };
    run_export(exporter, &pipeline, Some(size), Some(&mut control), presenter).await;
}
