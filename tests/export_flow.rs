//! End-to-end resume export against a scripted pipeline.
//!
//! Run with: `cargo test --test export_flow`

#![cfg(not(target_arch = "wasm32"))]

use folio::config::{ExportConfig, MessagesConfig};
use folio::export::{
    Affordance, ContentSize, ExportState, Exporter, PageGeometry, PipelineOptions, RenderError,
    RenderPipeline, TriggerControl, run_export,
};
use folio::notify::{Notice, Severity};
use std::cell::RefCell;

// ---------------------------------------------------------------------------
// Scripted collaborators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Failure {
    None,
    OnRender,
    OnSave,
}

/// Pipeline that produces a letter page and records what it saw.
struct ScriptedPipeline {
    failure: Failure,
    seen_options: RefCell<Vec<PipelineOptions>>,
    saved_scale: RefCell<Option<f64>>,
}

impl ScriptedPipeline {
    fn new(failure: Failure) -> Self {
        Self {
            failure,
            seen_options: RefCell::new(Vec::new()),
            saved_scale: RefCell::new(None),
        }
    }
}

struct LetterPage {
    scale_factor: f64,
}

impl PageGeometry for LetterPage {
    fn width(&self) -> f64 {
        8.5
    }

    fn height(&self) -> f64 {
        11.0
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }
}

impl RenderPipeline for ScriptedPipeline {
    type Page = LetterPage;

    async fn to_page(&self, options: &PipelineOptions) -> Result<LetterPage, RenderError> {
        self.seen_options.borrow_mut().push(options.clone());
        // Rendering takes at least one turn of the event loop.
        tokio::task::yield_now().await;
        if self.failure == Failure::OnRender {
            return Err(RenderError::Failed("canvas is tainted".into()));
        }
        Ok(LetterPage { scale_factor: 72.0 })
    }

    async fn save(&self, page: LetterPage) -> Result<(), RenderError> {
        if self.failure == Failure::OnSave {
            return Err(RenderError::Failed("save blocked".into()));
        }
        *self.saved_scale.borrow_mut() = Some(page.scale_factor);
        Ok(())
    }
}

struct Button {
    html: String,
    interactive: bool,
    opacity: f64,
    history: Vec<Affordance>,
}

impl Button {
    fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            interactive: true,
            opacity: 1.0,
            history: Vec::new(),
        }
    }
}

impl TriggerControl for Button {
    fn label(&self) -> String {
        self.html.clone()
    }

    fn apply(&mut self, affordance: &Affordance) {
        self.html = affordance.label.clone();
        self.interactive = affordance.interactive;
        self.opacity = affordance.opacity;
        self.history.push(affordance.clone());
    }
}

const ORIGINAL: &str = r#"<i class="fas fa-download"></i> Download Resume"#;

fn exporter() -> RefCell<Exporter> {
    RefCell::new(Exporter::new(ExportConfig::default(), MessagesConfig::default()))
}

fn content() -> Option<ContentSize> {
    Some(ContentSize {
        width: 850.0,
        height: 2200.0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "current_thread")]
async fn successful_export_restores_button_and_notifies_once() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    let state = run_export(&exporter, &pipeline, content(), Some(&mut button), &mut notices)
        .await;

    assert_eq!(state, ExportState::Succeeded);
    assert_eq!(button.html, ORIGINAL);
    assert!(button.interactive);
    assert_eq!(button.opacity, 1.0);
    assert_eq!(
        notices,
        vec![Notice::success("Resume downloaded successfully!")]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn button_is_busy_while_rendering() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let exporter = exporter();

    run_export(&exporter, &pipeline, content(), Some(&mut button), &mut Vec::<Notice>::new())
        .await;

    assert_eq!(button.history.len(), 2);
    let busy = &button.history[0];
    assert!(!busy.interactive);
    assert_eq!(busy.opacity, 0.7);
    assert!(busy.label.contains("fa-spinner fa-spin"));
}

#[tokio::test(flavor = "current_thread")]
async fn render_failure_restores_button_and_notifies_error_once() {
    let pipeline = ScriptedPipeline::new(Failure::OnRender);
    let mut button = Button::new(ORIGINAL);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    let state = run_export(&exporter, &pipeline, content(), Some(&mut button), &mut notices)
        .await;

    assert_eq!(state, ExportState::Failed);
    assert_eq!(button.html, ORIGINAL);
    assert!(button.interactive);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert_eq!(*pipeline.saved_scale.borrow(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn save_failure_is_reported_like_render_failure() {
    let pipeline = ScriptedPipeline::new(Failure::OnSave);
    let mut button = Button::new(ORIGINAL);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    let state = run_export(&exporter, &pipeline, content(), Some(&mut button), &mut notices)
        .await;

    assert_eq!(state, ExportState::Failed);
    assert_eq!(button.html, ORIGINAL);
    assert_eq!(
        notices,
        vec![Notice::error("Failed to generate PDF. Please try again.")]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn page_scale_is_fitted_before_save() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let exporter = exporter();

    run_export(&exporter, &pipeline, content(), Some(&mut button), &mut Vec::<Notice>::new())
        .await;

    // min(8.5 / 850, 11 / 2200) = 0.005
    let expected = 72.0 * (11.0 / 2200.0);
    assert_eq!(*pipeline.saved_scale.borrow(), Some(expected));
}

#[tokio::test(flavor = "current_thread")]
async fn pipeline_receives_configured_options() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let config = ExportConfig {
        filename: "Jane_Doe_Resume.pdf".into(),
        ..ExportConfig::default()
    };
    let exporter = RefCell::new(Exporter::new(config, MessagesConfig::default()));

    run_export(&exporter, &pipeline, content(), Some(&mut button), &mut Vec::<Notice>::new())
        .await;

    let seen = pipeline.seen_options.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].filename, "Jane_Doe_Resume.pdf");
    assert_eq!(seen[0].margin, 0.2);
    assert_eq!(seen[0].html2canvas.scale, 2);
    assert!(seen[0].html2canvas.use_cors);
}

#[tokio::test(flavor = "current_thread")]
async fn missing_content_is_a_silent_no_op() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    let state = run_export(&exporter, &pipeline, None, Some(&mut button), &mut notices)
        .await;

    assert_eq!(state, ExportState::Idle);
    assert!(button.history.is_empty());
    assert!(notices.is_empty());
    assert!(pipeline.seen_options.borrow().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn missing_button_is_a_silent_no_op() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    let state = run_export(&exporter, &pipeline, content(), None, &mut notices).await;

    assert_eq!(state, ExportState::Idle);
    assert!(notices.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn click_during_rendering_is_dropped() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let mut button = Button::new(ORIGINAL);
    let mut notices: Vec<Notice> = Vec::new();
    let exporter = exporter();

    // First click started but not finished yet.
    let ticket = exporter.borrow_mut().begin(&mut button).unwrap();
    let state = run_export(&exporter, &pipeline, content(), Some(&mut button), &mut notices)
        .await;
    assert_eq!(state, ExportState::Rendering);
    assert!(notices.is_empty());
    assert!(pipeline.seen_options.borrow().is_empty());

    exporter
        .borrow_mut()
        .finish(ticket, &mut button, Ok(()), &mut notices);
    assert_eq!(button.html, ORIGINAL);
    assert_eq!(notices.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn overlapping_clicks_render_once() {
    let pipeline = ScriptedPipeline::new(Failure::None);
    let exporter = exporter();
    // Two handlers for the same button, each with its own view of it.
    let mut first_button = Button::new(ORIGINAL);
    let mut second_button = Button::new(ORIGINAL);
    let mut first_notices: Vec<Notice> = Vec::new();
    let mut second_notices: Vec<Notice> = Vec::new();

    let (first, second) = tokio::join!(
        run_export(&exporter, &pipeline, content(), Some(&mut first_button), &mut first_notices),
        run_export(&exporter, &pipeline, content(), Some(&mut second_button), &mut second_notices),
    );

    let mut states = [first, second];
    states.sort_by_key(|s| *s == ExportState::Rendering);
    assert_eq!(states, [ExportState::Succeeded, ExportState::Rendering]);
    assert_eq!(pipeline.seen_options.borrow().len(), 1);
    assert_eq!(first_notices.len() + second_notices.len(), 1);

    let (ran, dropped) = if first == ExportState::Succeeded {
        (&first_button, &second_button)
    } else {
        (&second_button, &first_button)
    };
    assert_eq!(ran.history.len(), 2);
    assert_eq!(ran.html, ORIGINAL);
    assert!(dropped.history.is_empty());
    assert_eq!(exporter.borrow().state(), ExportState::Succeeded);
}
