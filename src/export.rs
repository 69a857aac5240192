//! Resume export orchestration.
//!
//! Rendering is delegated to an external pipeline (html2pdf in the browser)
//! behind the [`RenderPipeline`] trait. This module owns everything around it:
//! the job state, the trigger control's affordance while rendering, fitting
//! the content onto one page, and turning the outcome into a notice.
//!
//! # Job Lifecycle
//!
//! ```text
//!          begin()                 finish(Ok)
//!   Idle ───────────▶ Rendering ───────────────▶ Succeeded
//!    ▲                    │
//!    │                    │ finish(Err)
//!    │                    ▼
//!    └──── begin() ◀── Failed / Succeeded
//! ```
//!
//! [`Exporter::begin`] and [`Exporter::finish`] are synchronous so the DOM
//! layer can keep the exporter in a `RefCell` without holding a borrow across
//! the pipeline await. `finish` restores the control on both outcomes.
//!
//! A `begin` while a job is already rendering returns `None`: overlapping
//! clicks are dropped, not queued.

use crate::config::{ExportConfig, MessagesConfig, Orientation};
use crate::markup;
use crate::notify::{Notice, NoticeSink};
use log::{debug, error, info};
use serde::Serialize;
use std::cell::RefCell;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("rendering pipeline unavailable: {0}")]
    Unavailable(String),
    #[error("rendering failed: {0}")]
    Failed(String),
}

/// Export job state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportState {
    #[default]
    Idle,
    Rendering,
    Succeeded,
    Failed,
}

/// Visual state of the trigger control.
#[derive(Debug, Clone, PartialEq)]
pub struct Affordance {
    /// Inner HTML of the control.
    pub label: String,
    /// Whether the control accepts pointer events.
    pub interactive: bool,
    pub opacity: f64,
}

impl Affordance {
    /// Busy indicator shown while rendering.
    pub fn busy(config: &ExportConfig) -> Self {
        Self {
            label: markup::busy_label(&config.busy_label).into_string(),
            interactive: false,
            opacity: config.busy_opacity,
        }
    }

    /// Back to normal, with the label captured before rendering.
    pub fn restored(label: String) -> Self {
        Self {
            label,
            interactive: true,
            opacity: 1.0,
        }
    }
}

/// The control that triggers an export.
pub trait TriggerControl {
    /// Current inner HTML.
    fn label(&self) -> String;
    fn apply(&mut self, affordance: &Affordance);
}

/// Rendered content size, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

/// A produced page, before it is saved.
pub trait PageGeometry {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// The pipeline's internal scale factor.
    fn scale_factor(&self) -> f64;
    fn set_scale_factor(&mut self, factor: f64);
}

/// External document renderer.
pub trait RenderPipeline {
    type Page: PageGeometry;

    /// Rasterize the content and lay it out into a page object.
    fn to_page(
        &self,
        options: &PipelineOptions,
    ) -> impl Future<Output = Result<Self::Page, RenderError>>;

    /// Finalize the page and prompt the file save.
    fn save(&self, page: Self::Page) -> impl Future<Output = Result<(), RenderError>>;
}

/// Options record handed to the pipeline, serialized in the shape html2pdf
/// expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOptions {
    pub margin: f64,
    pub filename: String,
    pub image: ImageOptions,
    pub html2canvas: RasterOptions,
    #[serde(rename = "jsPDF")]
    pub js_pdf: PageOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterOptions {
    pub scale: u32,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub logging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOptions {
    pub unit: String,
    pub format: String,
    pub orientation: Orientation,
}

impl From<&ExportConfig> for PipelineOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            margin: config.margin,
            filename: config.filename.clone(),
            image: ImageOptions {
                kind: config.image_type.clone(),
                quality: config.image_quality,
            },
            html2canvas: RasterOptions {
                scale: config.raster_scale,
                use_cors: config.use_cors,
                logging: config.pipeline_logging,
            },
            js_pdf: PageOptions {
                unit: config.unit.clone(),
                format: config.format.clone(),
                orientation: config.orientation,
            },
        }
    }
}

/// Uniform factor that fits `content` onto a `page_width` x `page_height`
/// page without distortion.
///
/// Degenerate content (zero or negative extent on both axes) leaves the
/// scale unchanged. An empty axis is ignored.
pub fn fit_scale(page_width: f64, page_height: f64, content: ContentSize) -> f64 {
    let fits = [
        (page_width, content.width),
        (page_height, content.height),
    ]
    .into_iter()
    .filter(|(_, extent)| *extent > 0.0)
    .map(|(page, extent)| page / extent);
    fits.reduce(f64::min).unwrap_or(1.0)
}

/// Produce the page, scale it to fit, and save it.
pub async fn render_fitted<P: RenderPipeline>(
    pipeline: &P,
    options: &PipelineOptions,
    content: ContentSize,
) -> Result<(), RenderError> {
    let mut page = pipeline.to_page(options).await?;
    let scale = fit_scale(page.width(), page.height(), content);
    debug!(
        "fitting {}x{} content onto {}x{} page, scale {scale}",
        content.width,
        content.height,
        page.width(),
        page.height()
    );
    page.set_scale_factor(page.scale_factor() * scale);
    pipeline.save(page).await
}

/// Proof that a job was started; carries the label to restore.
#[derive(Debug)]
#[must_use = "a started export must be finished to restore its control"]
pub struct ExportTicket {
    original_label: String,
}

/// Owner of the export job state.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
    messages: MessagesConfig,
    state: ExportState,
}

impl Exporter {
    pub fn new(config: ExportConfig, messages: MessagesConfig) -> Self {
        Self {
            config,
            messages,
            state: ExportState::Idle,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn options(&self) -> PipelineOptions {
        PipelineOptions::from(&self.config)
    }

    /// Enter Rendering: capture the control's label and show the busy
    /// affordance.
    ///
    /// `None` when a job is already rendering; the control is left untouched.
    pub fn begin(&mut self, control: &mut dyn TriggerControl) -> Option<ExportTicket> {
        if self.state == ExportState::Rendering {
            debug!("export already rendering, ignoring");
            return None;
        }
        let original_label = control.label();
        control.apply(&Affordance::busy(&self.config));
        self.state = ExportState::Rendering;
        Some(ExportTicket { original_label })
    }

    /// Leave Rendering: restore the control and report the outcome.
    pub fn finish(
        &mut self,
        ticket: ExportTicket,
        control: &mut dyn TriggerControl,
        result: Result<(), RenderError>,
        notices: &mut dyn NoticeSink,
    ) -> ExportState {
        control.apply(&Affordance::restored(ticket.original_label));
        self.state = match result {
            Ok(()) => {
                info!("exported {}", self.config.filename);
                notices.post(Notice::success(&self.messages.export_succeeded));
                ExportState::Succeeded
            }
            Err(e) => {
                error!("PDF generation failed: {e}");
                notices.post(Notice::error(&self.messages.export_failed));
                ExportState::Failed
            }
        };
        self.state
    }
}

/// Run a whole export: begin, render and fit, finish.
///
/// The exporter sits in a `RefCell` shared by every click handler. Each borrow
/// ends before the pipeline is awaited, so a second call made while the first
/// is rendering sees `Rendering` and returns without touching its control.
///
/// Missing content or control makes this a silent no-op.
pub async fn run_export<P: RenderPipeline>(
    exporter: &RefCell<Exporter>,
    pipeline: &P,
    content: Option<ContentSize>,
    control: Option<&mut dyn TriggerControl>,
    notices: &mut dyn NoticeSink,
) -> ExportState {
    let (Some(content), Some(control)) = (content, control) else {
        debug!("export target missing, skipping");
        return exporter.borrow().state();
    };
    let started = exporter.borrow_mut().begin(control);
    let Some(ticket) = started else {
        return exporter.borrow().state();
    };
    let options = exporter.borrow().options();
    let result = render_fitted(pipeline, &options, content).await;
    exporter.borrow_mut().finish(ticket, control, result, notices)
}
