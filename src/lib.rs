//! # Folio
//!
//! Client-side behavior for a static portfolio page: scroll-spy navigation,
//! reveal-on-view animations, lazy images, a resume-to-PDF export, contact
//! form validation and a mobile menu toggle.
//!
//! # Architecture: State Machines Behind a Thin DOM Layer
//!
//! Every behavior is split in two:
//!
//! ```text
//! core module (any target)          web module (wasm32 only)
//! ─────────────────────────         ─────────────────────────────
//! owns state, exposes               queries the DOM, registers
//! transition operations       ◀──── listeners/observers, applies
//! returning what to change          the returned changes
//! ```
//!
//! The core modules never touch a browser API. They take snapshots (section
//! offsets, intersection reports, form values) and return decisions (which
//! link is active, which images to swap, which notice to show). This keeps
//! each behavior unit-testable with plain `cargo test`, and keeps the
//! `wasm-bindgen` glue free of logic.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | TOML behavior config: selectors, thresholds, timings, messages |
//! | [`notify`] | Single-slot notification presenter and the shared [`notify::NoticeSink`] |
//! | [`scroll_spy`] | Active-section tracking and in-page anchor handling |
//! | [`viewport`] | Intersection-observer options and reports |
//! | [`reveal`] | One-way reveal animation state |
//! | [`lazy_images`] | Deferred image source swaps |
//! | [`export`] | Resume export orchestration over a [`export::RenderPipeline`] |
//! | [`contact`] | Contact form validation and submission hand-off |
//! | [`menu`] | Mobile menu open/closed state |
//! | [`markup`] | Maud-rendered fragments: busy label, notification, keyframes |
//! | `web` | DOM bindings and the `#[wasm_bindgen(start)]` entry point |
//!
//! # Design Decisions
//!
//! ## Components Share Nothing but the Notice Sink
//!
//! Each behavior initializes independently on page load and is skipped when
//! its DOM targets are absent. The only cross-component channel is the
//! notification presenter, and it is last-writer-wins: a new notice replaces
//! the live one immediately, with no queue.
//!
//! ## One Await, No Borrow Across It
//!
//! The resume export is the only operation that suspends. The exporter's
//! transitions ([`export::Exporter::begin`], [`export::Exporter::finish`]) are
//! synchronous; the DOM layer awaits the pipeline between them with no
//! borrow held. A second click while rendering is dropped.
//!
//! ## Snapshot Geometry
//!
//! Section offsets are read once at load. Layout reflows afterwards (fonts,
//! lazy images) are not tracked; the page is short and the threshold is
//! generous enough that this has not mattered.

pub mod config;
pub mod contact;
pub mod export;
pub mod lazy_images;
pub mod markup;
pub mod menu;
pub mod notify;
pub mod reveal;
pub mod scroll_spy;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;
