//! Scroll-spy navigation.
//!
//! Highlights the navigation link whose target section is current for the
//! scroll position. Section geometry is a snapshot taken once at page load;
//! later reflows are not tracked.
//!
//! ## Which Section Is Current
//!
//! Sections are evaluated in document order and the last one satisfying
//! `scroll_y >= top - threshold` wins. With a 200px threshold:
//!
//! ```text
//! scroll_y    sections (top)             current
//!    0        about(300) work(900)       none
//!  100        about(300) work(900)       about
//!  700        about(300) work(900)       work
//! ```
//!
//! A link is active when its `href` is `#` followed by the current section's
//! id. At most one link is ever active; when several links share an href the
//! first in document order is chosen.

/// One navigation link, identified by its `href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Whether this link points at the section with `id`.
    fn targets(&self, id: &str) -> bool {
        self.href.strip_prefix('#') == Some(id)
    }
}

/// Geometry of one page section at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    /// Section id; `None` for sections without an `id` attribute.
    pub id: Option<String>,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: Some(id.into()),
            top,
            height,
        }
    }
}

/// The navigation link set and the section snapshot, plus the active link.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    links: Vec<NavLink>,
    sections: Vec<SectionBounds>,
    threshold: f64,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new(links: Vec<NavLink>, sections: Vec<SectionBounds>, threshold: f64) -> Self {
        Self {
            links,
            sections,
            threshold,
            active: None,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Index of the active link.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The active link itself.
    pub fn active_link(&self) -> Option<&NavLink> {
        self.active.and_then(|i| self.links.get(i))
    }

    /// Id of the section that is current at `scroll_y`.
    ///
    /// `None` both when the page is above every threshold and when the
    /// winning section has no id.
    pub fn current_section(&self, scroll_y: f64) -> Option<&str> {
        let mut current = None;
        for section in &self.sections {
            if scroll_y >= section.top - self.threshold {
                current = Some(section.id.as_deref());
            }
        }
        current.flatten()
    }

    /// Recompute the active link for a scroll event. Returns the new active
    /// index.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<usize> {
        let active = self
            .current_section(scroll_y)
            .and_then(|id| self.links.iter().position(|link| link.targets(id)));
        self.active = active;
        active
    }

    /// Mark a clicked link active until the next scroll event. Out-of-range
    /// indices leave the state unchanged.
    pub fn on_link_click(&mut self, index: usize) {
        if index < self.links.len() {
            self.active = Some(index);
        }
    }
}

/// What a click on an in-page anchor should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Leave the browser's default behavior alone (bare `#`, or not an
    /// in-page anchor).
    Default,
    /// Prevent the jump and scroll smoothly to the element with this id, if
    /// it exists.
    SmoothScroll(&'a str),
}

/// Classify an anchor click by its `href`.
pub fn anchor_action(href: &str) -> AnchorAction<'_> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => AnchorAction::SmoothScroll(id),
        _ => AnchorAction::Default,
    }
}
